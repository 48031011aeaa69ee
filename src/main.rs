// Greetr - greetings in English and Spanish
//
// The binary wires configuration, logging and the CLI around the greetr
// library:
// - Config: env > ~/.config/greetr/config.toml > defaults
// - Logging: tracing to stderr, optional JSON file output
// - Greeting: printed to stdout (or emitted as tracing events)

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use greetr::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Subcommands (languages, config ...) run without logging setup
    if let Some(command) = cli.command {
        return cli::handle_command(command);
    }

    let config = Config::load()?;

    // The guard must be kept alive for the duration of the program to ensure logs flush
    let _file_guard = greetr::logging::init(&config.logging)?;

    tracing::debug!("greetr v{}", greetr::config::VERSION);

    cli::run_greeting(&cli.greet, &config)
}
