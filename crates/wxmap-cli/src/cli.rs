//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API. Each
//! subcommand corresponds to one standalone tool; the global flags cover
//! verbosity, color, and the optional config file.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Wxmap CLI - validation and development tools for WMS configuration
///
/// Validates model, layer, and style configuration files against their
/// schemas, dumps every product an EDR API advertises, and serves the
/// dashboard directory with CORS enabled.
#[derive(Parser, Debug)]
#[command(
    name = "wxmap",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only show errors, not warnings
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "WXMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate WMS layer configuration files against the style directory
    ValidateLayers(ValidateLayersArgs),

    /// Validate model configuration YAML files
    ValidateModels(ValidateModelsArgs),

    /// Validate cartographic style JSON documents
    ValidateStyles(ValidateStylesArgs),

    /// Query every product an EDR API advertises and dump the responses
    EdrDump(EdrDumpArgs),

    /// Serve the dashboard directory over HTTP with CORS enabled
    Serve(ServeArgs),
}

/// Arguments for the validate-layers command
#[derive(Parser, Debug)]
pub struct ValidateLayersArgs {
    /// Directory containing layer YAML files (default: config/layers)
    #[arg(long, value_name = "DIR")]
    pub layer_dir: Option<PathBuf>,

    /// Directory style_file references resolve against (default: config/styles)
    #[arg(long, value_name = "DIR")]
    pub style_dir: Option<PathBuf>,
}

/// Arguments for the validate-models command
#[derive(Parser, Debug)]
pub struct ValidateModelsArgs {
    /// YAML files to validate (default: all *.yaml in the model directory)
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Directory searched when no files are given (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub model_dir: Option<PathBuf>,
}

/// Arguments for the validate-styles command
#[derive(Parser, Debug)]
pub struct ValidateStylesArgs {
    /// Directory containing style JSON documents (default: config/styles)
    #[arg(long, value_name = "DIR")]
    pub style_dir: Option<PathBuf>,
}

/// Arguments for the edr-dump command
#[derive(Parser, Debug)]
pub struct EdrDumpArgs {
    /// EDR API endpoint
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Output directory (default: ./edr-dump-TIMESTAMP)
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Query type to use
    #[arg(long, value_enum, default_value = "position")]
    pub query_type: QueryTypeArg,

    /// Location ID for locations queries (default: first available)
    #[arg(long, value_name = "ID")]
    pub location: Option<String>,

    /// Max queries per collection (default: unlimited)
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "both")]
    pub format: DumpFormatArg,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to bind
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory to serve (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

/// EDR query families exposed on the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum QueryTypeArg {
    /// Point queries at the test coordinate
    Position,
    /// 1x1 degree polygon queries around the test coordinate
    Area,
    /// Queries against a named location
    Locations,
}

impl From<QueryTypeArg> for wxmap_edr::QueryType {
    fn from(arg: QueryTypeArg) -> Self {
        match arg {
            QueryTypeArg::Position => wxmap_edr::QueryType::Position,
            QueryTypeArg::Area => wxmap_edr::QueryType::Area,
            QueryTypeArg::Locations => wxmap_edr::QueryType::Locations,
        }
    }
}

/// Response encodings exposed on the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DumpFormatArg {
    /// CoverageJSON only
    Covjson,
    /// GeoJSON only
    Geojson,
    /// Both encodings
    Both,
}

impl From<DumpFormatArg> for wxmap_edr::DumpFormat {
    fn from(arg: DumpFormatArg) -> Self {
        match arg {
            DumpFormatArg::Covjson => wxmap_edr::DumpFormat::Covjson,
            DumpFormatArg::Geojson => wxmap_edr::DumpFormat::Geojson,
            DumpFormatArg::Both => wxmap_edr::DumpFormat::Both,
        }
    }
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli::parse_from(["wxmap", "-vv", "validate-models", "gfs.yaml"]);
        assert_eq!(cli.verbosity_level(), 2);

        let quiet = Cli::parse_from(["wxmap", "--quiet", "validate-models"]);
        assert_eq!(quiet.verbosity_level(), 0);
        assert!(quiet.quiet);
    }

    #[test]
    fn test_edr_dump_defaults() {
        let cli = Cli::parse_from(["wxmap", "edr-dump"]);
        match cli.command {
            Commands::EdrDump(args) => {
                assert_eq!(args.query_type, QueryTypeArg::Position);
                assert_eq!(args.format, DumpFormatArg::Both);
                assert!(args.endpoint.is_none());
                assert!(args.limit.is_none());
            }
            _ => panic!("expected edr-dump"),
        }
    }
}
