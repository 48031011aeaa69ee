//! Configuration for the greetr binary
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/greetr/config.toml)
//! 3. Built-in defaults (lowest priority)
//!
//! The greeter itself never reads configuration; only the binary does.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod serialization;


pub use logging::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Language override
pub const ENV_LANG: &str = "GREETR_LANG";
/// Formal register override ("1" or "true")
pub const ENV_FORMAL: &str = "GREETR_FORMAL";
/// Log level override (RUST_LOG still wins over this)
pub const ENV_LOG_LEVEL: &str = "GREETR_LOG_LEVEL";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// First name used when none is given on the command line
    pub first_name: String,

    /// Last name used when none is given on the command line
    pub last_name: String,

    /// Language code; validated when a greeter is built from it
    pub language: String,

    /// Use the formal register by default
    pub formal: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            language: "en".to_string(),
            formal: false,
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure; every key is optional
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language: Option<String>,
    pub formal: Option<bool>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/greetr/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("greetr").join("config.toml"))
    }

    /// Load configuration: env vars > file > defaults
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path().as_deref(), |key| std::env::var(key).ok())
    }

    /// Load from an explicit file path and environment lookup
    ///
    /// A missing file means defaults. A file that exists but cannot be read
    /// or parsed is an error; silently falling back would hide the typo.
    pub fn load_from(path: Option<&Path>, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let file = match path {
            Some(path) => Self::load_file_config(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::from_sources(file, env))
    }

    fn load_file_config(path: &Path) -> Result<FileConfig> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e)
                .with_context(|| format!("Cannot read config file {}", path.display())),
        }
    }

    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Language: env > file > default (raw code, checked by the greeter)
        // An empty value counts as unset at each layer
        let language = env(ENV_LANG)
            .filter(|code| !code.is_empty())
            .or(file.language)
            .filter(|code| !code.is_empty())
            .unwrap_or(defaults.language);

        // Formal: env > file > default
        let formal = env(ENV_FORMAL)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .or(file.formal)
            .unwrap_or(defaults.formal);

        // Names: file only
        let first_name = file.first_name.unwrap_or(defaults.first_name);
        let last_name = file.last_name.unwrap_or(defaults.last_name);

        let mut logging = LoggingConfig::from_file(file.logging);
        if let Some(level) = env(ENV_LOG_LEVEL) {
            logging.level = level;
        }

        Self {
            first_name,
            last_name,
            language,
            formal,
            logging,
        }
    }

    /// Write the default config file unless one already exists
    pub fn ensure_config_exists() -> Result<Option<PathBuf>> {
        let Some(path) = Self::config_path() else {
            return Ok(None);
        };
        if path.exists() {
            return Ok(Some(path));
        }
        Self::default().write_to(&path)?;
        Ok(Some(path))
    }

    /// Serialize to `path`, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create directory {}", parent.display()))?;
        }
        std::fs::write(path, self.to_toml())
            .with_context(|| format!("Cannot write config file {}", path.display()))
    }
}
