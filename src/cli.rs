// CLI module - command-line argument parsing and handlers
//
// `greetr [FIRST] [LAST]` greets; subcommands cover language listing and
// configuration management:
// - languages: list the supported languages
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --edit: Open config file in $EDITOR
// - config --path: Show config file path

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use greetr::config::{Config, VERSION};
use greetr::{
    create_greeter, BufferSink, ConsoleSink, Greetr, Language, MemoryDocument, TracingSink,
};
use serde::Serialize;
use std::io::Write;
use std::process::Command;
use std::sync::Arc;

/// Greetr - greetings in English and Spanish
#[derive(Parser)]
#[command(name = "greetr")]
#[command(version = VERSION)]
#[command(about = "Greetings in English and Spanish", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub greet: GreetArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List supported languages
    Languages,

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct GreetArgs {
    /// First name (defaults to the configured one)
    pub first_name: Option<String>,

    /// Last name (defaults to the configured one)
    pub last_name: Option<String>,

    /// Language code: en, es
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Use the formal register
    #[arg(short, long)]
    pub formal: bool,

    /// Also emit the "logged in" message
    #[arg(long)]
    pub log: bool,

    /// Inject the greeting into the demo page at SELECTOR and print the page
    #[arg(long, value_name = "SELECTOR")]
    pub html: Option<String>,

    /// Where greetings go in text mode
    #[arg(long, value_enum, default_value_t = SinkKind::Console)]
    pub sink: SinkKind,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SinkKind {
    /// Print to stdout
    #[default]
    Console,
    /// Emit as tracing events (stderr / log file)
    Tracing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Machine-readable result of a greeting run
#[derive(Debug, Serialize)]
struct GreetingReport {
    first_name: String,
    last_name: String,
    language: Language,
    formal: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Greeting
// ─────────────────────────────────────────────────────────────────────────────

/// Build a greeter from args over config and run the requested operations
pub fn run_greeting(args: &GreetArgs, config: &Config) -> Result<()> {
    let run = GreetingRun::prepare(args, config)?;
    match args.format {
        OutputFormat::Text => run.print(args),
        OutputFormat::Json => {
            let report = run.report(args)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

/// A validated greeter plus the demo page when `--html` was given
struct GreetingRun {
    greeter: Greetr,
    language: Language,
    formal: bool,
    document: Option<Arc<MemoryDocument>>,
}

impl GreetingRun {
    fn prepare(args: &GreetArgs, config: &Config) -> Result<Self> {
        let first = args.first_name.as_deref().unwrap_or(&config.first_name);
        let last = args.last_name.as_deref().unwrap_or(&config.last_name);
        let lang = args.lang.as_deref().unwrap_or(&config.language);
        let formal = args.formal || config.formal;

        let greeter = create_greeter(Some(first), Some(last), Some(lang));
        let language = greeter
            .validate()
            .with_context(|| format!("Supported languages: {}", supported_codes()))?;

        tracing::debug!(%language, formal, "Greeting {}", greeter.full_name());

        let document = args.html.as_ref().map(|_| Arc::new(MemoryDocument::demo_page()));
        let greeter = match &document {
            Some(doc) => greeter.with_shared_ui(doc.clone()),
            None => greeter,
        };

        Ok(Self {
            greeter,
            language,
            formal,
            document,
        })
    }

    /// Text mode: greetings to the chosen sink, page to stdout
    fn print(self, args: &GreetArgs) -> Result<()> {
        let mut greeter = match args.sink {
            SinkKind::Console => self.greeter.with_sink(ConsoleSink),
            SinkKind::Tracing => self.greeter.with_sink(TracingSink),
        };
        greeter.greet(self.formal);
        if args.log {
            greeter.log();
        }
        if let (Some(selector), Some(doc)) = (&args.html, &self.document) {
            greeter.html_greeting(selector, self.formal)?;
            print!("{}", doc.render());
        }
        Ok(())
    }

    /// JSON mode: run against a buffer and collect what it produced
    fn report(self, args: &GreetArgs) -> Result<GreetingReport> {
        let buffer = BufferSink::new();
        let mut greeter = self.greeter.with_sink(buffer.clone());
        greeter.greet(self.formal);
        if args.log {
            greeter.log();
        }
        let html = match (&args.html, &self.document) {
            (Some(selector), Some(doc)) => {
                greeter.html_greeting(selector, self.formal)?;
                Some(doc.render())
            }
            _ => None,
        };

        // Sink order: greeting first, then the log line if requested
        let mut messages = buffer.messages().into_iter();
        Ok(GreetingReport {
            first_name: greeter.first_name().to_string(),
            last_name: greeter.last_name().to_string(),
            language: self.language,
            formal: self.formal,
            message: messages.next().unwrap_or_default(),
            log_message: messages.next(),
            html,
        })
    }
}

fn supported_codes() -> String {
    Language::SUPPORTED
        .iter()
        .map(|lang| lang.code())
        .collect::<Vec<_>>()
        .join(", ")
}

// ─────────────────────────────────────────────────────────────────────────────
// Subcommands
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Languages => {
            for lang in Language::SUPPORTED {
                println!("{}  {}", lang.code(), lang.display_name());
            }
            Ok(())
        }
        Commands::Config {
            show,
            reset,
            edit,
            path,
        } => {
            if path {
                handle_config_path()
            } else if show {
                handle_config_show()
            } else if reset {
                handle_config_reset()
            } else if edit {
                handle_config_edit()
            } else {
                // No flag provided, show help
                println!("Usage: greetr config [--show|--reset|--edit|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --edit    Open config file in $EDITOR");
                println!("  --path    Show config file path");
                Ok(())
            }
        }
    }
}

fn config_path() -> Result<std::path::PathBuf> {
    Config::config_path().context("Could not determine config path")
}

fn handle_config_path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::load()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    // Show source info
    println!();
    let path = config_path()?;
    if path.exists() {
        println!("# Source: {}", path.display());
    } else {
        println!("# Source: defaults (no config file)");
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = config_path()?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    Config::default().write_to(&path)?;
    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

fn handle_config_edit() -> Result<()> {
    let path = match Config::ensure_config_exists()? {
        Some(path) => path,
        None => bail!("Could not determine config path"),
    };

    // Get editor from environment
    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            // Platform-specific fallback
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .with_context(|| {
            format!(
                "Failed to launch editor '{}' (set $EDITOR to your preferred editor)",
                editor
            )
        })?;

    if !status.success() {
        bail!("Editor exited with status: {}", status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_greeting_args() {
        let cli = Cli::try_parse_from(["greetr", "John", "Doe", "--lang", "es", "-f"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.greet.first_name.as_deref(), Some("John"));
        assert_eq!(cli.greet.last_name.as_deref(), Some("Doe"));
        assert_eq!(cli.greet.lang.as_deref(), Some("es"));
        assert!(cli.greet.formal);
        assert_eq!(cli.greet.format, OutputFormat::Text);
    }

    #[test]
    fn test_parse_subcommand() {
        let cli = Cli::try_parse_from(["greetr", "config", "--path"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config { path: true, .. })
        ));
    }

    #[test]
    fn test_invalid_language_is_rejected() {
        let args = GreetArgs {
            lang: Some("fr".to_string()),
            format: OutputFormat::Json,
            ..Default::default()
        };
        let err = run_greeting(&args, &Config::default()).unwrap_err();
        let root = err.root_cause().to_string();
        assert!(root.contains("fr"), "unexpected error: {}", root);
    }

    fn report_for(args: &GreetArgs) -> GreetingReport {
        GreetingRun::prepare(args, &Config::default())
            .unwrap()
            .report(args)
            .unwrap()
    }

    #[test]
    fn test_json_report_with_log_line() {
        let args = GreetArgs {
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            log: true,
            format: OutputFormat::Json,
            ..Default::default()
        };
        let report = report_for(&args);
        assert_eq!(report.language, Language::En);
        assert!(!report.formal);
        assert_eq!(report.message, "Hello John!");
        assert_eq!(report.log_message.as_deref(), Some("Logged In: John Doe"));
        assert_eq!(report.html, None);

        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["language"], "en");
        assert_eq!(json["message"], "Hello John!");
        assert!(json.get("html").is_none());
    }

    #[test]
    fn test_json_report_without_log_line() {
        let args = GreetArgs {
            first_name: Some("John".to_string()),
            format: OutputFormat::Json,
            ..Default::default()
        };
        let report = report_for(&args);
        assert_eq!(report.message, "Hello John!");
        assert_eq!(report.log_message, None);
    }

    #[test]
    fn test_html_report_formal_spanish() {
        let args = GreetArgs {
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            lang: Some("es".to_string()),
            formal: true,
            html: Some("#greeting".to_string()),
            format: OutputFormat::Json,
            ..Default::default()
        };
        let report = report_for(&args);
        assert_eq!(report.language, Language::Es);
        assert_eq!(report.message, "Saludos, John Doe");
        let html = report.html.expect("page should be rendered");
        assert!(
            html.contains("<h1 id=\"greeting\">Saludos, John Doe</h1>"),
            "unexpected page:\n{}",
            html
        );
    }

    #[test]
    fn test_html_report_informal_english() {
        let args = GreetArgs {
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            html: Some("#greeting".to_string()),
            format: OutputFormat::Json,
            ..Default::default()
        };
        let html = report_for(&args).html.unwrap();
        assert!(html.contains("<h1 id=\"greeting\">Hello John!</h1>"));
    }

    #[test]
    fn test_config_defaults_fill_missing_args() {
        let config = Config {
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            language: "es".to_string(),
            formal: true,
            ..Config::default()
        };
        let args = GreetArgs::default();
        let report = GreetingRun::prepare(&args, &config)
            .unwrap()
            .report(&args)
            .unwrap();
        assert_eq!(report.message, "Saludos, Jane Smith");
    }

    #[test]
    fn test_supported_codes() {
        assert_eq!(supported_codes(), "en, es");
    }
}
