//! Supported languages and their message tables
//!
//! The tables are private to this module. Callers only reach them through
//! the greeter, which looks them up by its current language code.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GreetError;

/// A supported greeting language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (default)
    #[default]
    En,
    /// Spanish
    Es,
}

impl Language {
    /// Ordered set of supported languages
    pub const SUPPORTED: [Language; 2] = [Language::En, Language::Es];

    /// Language code as stored on a greeter ("en", "es")
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Exact, case-sensitive lookup of a language code
    pub fn parse(code: &str) -> Option<Self> {
        Self::SUPPORTED.into_iter().find(|lang| lang.code() == code)
    }

    /// Name of the language in that language
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Español",
        }
    }

    pub(crate) const fn informal(self) -> &'static str {
        match self {
            Self::En => "Hello",
            Self::Es => "Hola",
        }
    }

    pub(crate) const fn formal(self) -> &'static str {
        match self {
            Self::En => "Greetings",
            Self::Es => "Saludos",
        }
    }

    pub(crate) const fn log_message(self) -> &'static str {
        match self {
            Self::En => "Logged In",
            Self::Es => "Inició sesión",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = GreetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| GreetError::InvalidLanguage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_codes_round_trip() {
        for lang in Language::SUPPORTED {
            assert_eq!(Language::parse(lang.code()), Some(lang));
            assert_eq!(lang.to_string(), lang.code());
        }
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(Language::parse("EN"), None);
        assert_eq!(Language::parse(" es"), None);
        assert_eq!(Language::parse(""), None);
        assert_eq!(Language::parse("fr"), None);
    }

    #[test]
    fn test_from_str_reports_rejected_code() {
        let err = "fr".parse::<Language>().unwrap_err();
        assert_eq!(err, GreetError::InvalidLanguage("fr".to_string()));
    }

    #[test]
    fn test_default_is_english() {
        assert_eq!(Language::default(), Language::En);
        assert_eq!(Language::SUPPORTED[0], Language::En);
    }

    #[test]
    fn test_message_tables() {
        assert_eq!(Language::En.informal(), "Hello");
        assert_eq!(Language::Es.informal(), "Hola");
        assert_eq!(Language::En.formal(), "Greetings");
        assert_eq!(Language::Es.formal(), "Saludos");
        assert_eq!(Language::En.log_message(), "Logged In");
        assert_eq!(Language::Es.log_message(), "Inició sesión");
    }

    #[test]
    fn test_serde_uses_codes() {
        #[derive(Deserialize)]
        struct Wrapper {
            lang: Language,
        }
        let parsed: Wrapper = toml::from_str("lang = \"es\"").unwrap();
        assert_eq!(parsed.lang, Language::Es);
        assert_eq!(serde_json::to_string(&Language::En).unwrap(), "\"en\"");
    }
}
