//! The greeter: a name, a language, and chainable greeting operations
//!
//! ```
//! use greetr::{create_greeter, BufferSink};
//!
//! let sink = BufferSink::new();
//! let mut g = create_greeter(Some("John"), Some("Doe"), None).with_sink(sink.clone());
//! g.greet(false).set_lang("es")?.greet(true);
//! assert_eq!(sink.messages(), vec!["Hello John!", "Saludos, John Doe"]);
//! # Ok::<(), greetr::GreetError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use crate::document::UiInjector;
use crate::error::{GreetError, Result};
use crate::language::Language;
use crate::sink::MessageSink;


/// Build a greeter; absent or empty arguments fall back to `""`, `""`, `"en"`.
///
/// The language is stored unvalidated. Call [`Greetr::validate`] (or
/// [`Greetr::set_lang`]) before relying on the greeting text.
pub fn create_greeter(
    first_name: Option<&str>,
    last_name: Option<&str>,
    language: Option<&str>,
) -> Greetr {
    Greetr::create(first_name, last_name, language)
}

/// Greeting state for one person
pub struct Greetr {
    first_name: String,
    last_name: String,
    /// Raw language code; only `set_lang` guarantees it is supported
    language: String,
    sink: Option<Arc<dyn MessageSink>>,
    ui: Option<Arc<dyn UiInjector>>,
}

impl Greetr {
    /// See [`create_greeter`]
    pub fn create(
        first_name: Option<&str>,
        last_name: Option<&str>,
        language: Option<&str>,
    ) -> Self {
        let language = language
            .filter(|code| !code.is_empty())
            .unwrap_or(Language::default().code());

        Self {
            first_name: first_name.unwrap_or_default().to_string(),
            last_name: last_name.unwrap_or_default().to_string(),
            language: language.to_string(),
            sink: None,
            ui: None,
        }
    }

    /// English greeter for `first_name last_name`
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            language: Language::default().code().to_string(),
            sink: None,
            ui: None,
        }
    }

    /// Attach the sink that `greet` and `log` forward to
    pub fn with_sink(mut self, sink: impl MessageSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Attach a shared sink
    pub fn with_shared_sink(mut self, sink: Arc<dyn MessageSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn without_sink(mut self) -> Self {
        self.sink = None;
        self
    }

    /// Attach the UI injector used by `html_greeting`
    pub fn with_ui(mut self, ui: impl UiInjector + 'static) -> Self {
        self.ui = Some(Arc::new(ui));
        self
    }

    /// Attach a shared UI injector, e.g. a document the caller still reads
    pub fn with_shared_ui(mut self, ui: Arc<dyn UiInjector>) -> Self {
        self.ui = Some(ui);
        self
    }

    pub fn without_ui(mut self) -> Self {
        self.ui = None;
        self
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// The stored language code, validated or not
    pub fn language(&self) -> &str {
        &self.language
    }

    /// `first_name + " " + last_name`, untrimmed
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Check the stored language against the supported set
    pub fn validate(&self) -> Result<Language> {
        self.language.parse()
    }

    /// Informal greeting, e.g. "Hello John!"
    ///
    /// With an unsupported language the template part is empty; the text is
    /// not meaningful until the language has been validated.
    pub fn greeting(&self) -> String {
        let template = self.lookup(Language::informal);
        format!("{} {}!", template, self.first_name)
    }

    /// Formal greeting, e.g. "Greetings, John Doe"
    pub fn formal_greeting(&self) -> String {
        let template = self.lookup(Language::formal);
        format!("{}, {}", template, self.full_name())
    }

    /// Forward the informal (or formal) greeting to the sink
    pub fn greet(&mut self, formal: bool) -> &mut Self {
        let message = self.message(formal);
        self.forward(&message);
        self
    }

    /// Forward "<log message>: <full name>" to the sink
    pub fn log(&mut self) -> &mut Self {
        let message = format!("{}: {}", self.lookup(Language::log_message), self.full_name());
        self.forward(&message);
        self
    }

    /// Switch language. An unsupported code is rejected and the current
    /// language is kept.
    pub fn set_lang(&mut self, lang: &str) -> Result<&mut Self> {
        let language: Language = lang.parse()?;
        tracing::debug!(from = %self.language, to = %language, "Language changed");
        self.language = language.code().to_string();
        Ok(self)
    }

    /// Inject the informal (or formal) greeting into every element matching
    /// `selector` through the attached UI injector
    pub fn html_greeting(&mut self, selector: &str, formal: bool) -> Result<&mut Self> {
        let ui = self.ui.as_ref().ok_or(GreetError::MissingUiCollaborator)?;
        if selector.trim().is_empty() {
            return Err(GreetError::MissingSelector);
        }

        let message = self.message(formal);
        let updated = ui.set_html(selector, &message);
        tracing::debug!(selector, updated, "Injected greeting");
        Ok(self)
    }

    fn message(&self, formal: bool) -> String {
        if formal {
            self.formal_greeting()
        } else {
            self.greeting()
        }
    }

    fn lookup(&self, table: fn(Language) -> &'static str) -> &'static str {
        Language::parse(&self.language).map(table).unwrap_or_default()
    }

    fn forward(&self, message: &str) {
        match &self.sink {
            Some(sink) => {
                tracing::debug!(text = message, "Forwarding message");
                sink.write_message(message);
            }
            None => tracing::trace!(text = message, "No sink attached, message dropped"),
        }
    }
}

impl fmt::Debug for Greetr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Greetr")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("language", &self.language)
            .field("has_sink", &self.sink.is_some())
            .field("has_ui", &self.ui.is_some())
            .finish()
    }
}
