//! lined - an EDLIN-style line editor
//!
//! This is the main entry point. It parses CLI arguments, builds the
//! configuration and hands off to the interactive runner.

mod cli;
mod run;

use clap::Parser;

use lined::config::Config;
use lined::user_config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let cli = cli::Cli::parse();

    // Logs go to stderr; RUST_LOG overrides -v
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    // Load configuration
    let mut config = Config::default();
    user_config::configure(&mut config);

    // Apply CLI overrides
    cli.apply_to_config(&mut config);

    run::run_interactive(&cli, &config)
}
