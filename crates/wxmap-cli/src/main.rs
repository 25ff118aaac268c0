//! Wxmap CLI - validation and development tools for WMS configuration
//!
//! This is the main entry point for the wxmap CLI, providing the layer,
//! model, and style validators, the EDR product dumper, and the dashboard
//! static file server.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use output::OutputWriter;
use std::process;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    // Initialize logging
    if let Err(e) = logging::init_logging(cli.verbosity_level(), cli.quiet) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    // Run the application
    match run(cli).await {
        Ok(()) => {
            process::exit(0);
        }
        Err(e) => {
            eprintln!(
                "{}",
                error::format_error(&e, control::SHOULD_COLORIZE.should_colorize())
            );
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<()> {
    // Load configuration
    tracing::debug!("loading configuration");
    let config = Config::load_with_file(cli.config.as_deref())?;

    // Create output writer
    let mut output = OutputWriter::new(cli.use_color(), cli.quiet, cli.verbosity_level());

    tracing::info!(command = ?cli.command, "executing command");

    // Handle the subcommand
    match cli.command {
        Commands::ValidateLayers(args) => {
            handlers::handle_validate_layers(args, &config, &mut output).await
        }
        Commands::ValidateModels(args) => {
            handlers::handle_validate_models(args, &config, &mut output).await
        }
        Commands::ValidateStyles(args) => {
            handlers::handle_validate_styles(args, &config, &mut output).await
        }
        Commands::EdrDump(args) => handlers::handle_edr_dump(args, &config, &mut output).await,
        Commands::Serve(args) => handlers::handle_serve(args, &config, &mut output).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["wxmap", "validate-styles"]);
        assert_eq!(cli.verbosity_level(), 0);

        let cli = Cli::parse_from(["wxmap", "-v", "validate-layers"]);
        assert_eq!(cli.verbosity_level(), 1);

        let cli = Cli::parse_from(["wxmap", "--quiet", "validate-models", "gfs.yaml"]);
        assert_eq!(cli.verbosity_level(), 0);
    }
}
