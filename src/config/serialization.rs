//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

/// Quote a string as a TOML basic string
fn quote(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

impl Config {
    /// Serialize to a commented TOML document that `load` reads back
    pub fn to_toml(&self) -> String {
        format!(
            r#"# greetr configuration

# Default name, used when none is given on the command line
first_name = {first}
last_name = {last}

# Language: en, es
language = {language}

# Use the formal register ("Greetings, John Doe") by default
formal = {formal}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# JSON file logging (in addition to stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            first = quote(&self.first_name),
            last = quote(&self.last_name),
            language = quote(&self.language),
            formal = self.formal,
            log_level = quote(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quote(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = quote(&self.logging.file_prefix),
        )
    }
}
