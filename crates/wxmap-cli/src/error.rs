//! Error types and handling for the CLI
//!
//! Exit codes are part of the tools' contract: 0 means every checked file
//! was valid, 1 means validation errors (or any operational failure), and 2
//! is reserved for validate-models finding nothing to validate.

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from the EDR dumper library
    #[error("EDR dump error: {0}")]
    Edr(#[from] wxmap_edr::Error),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Dashboard server failed to start or crashed
    #[error("Server error: {0}")]
    Serve(String),

    /// One or more files failed validation
    #[error("Validation failed: {errors} error(s) in {files} file(s)")]
    ValidationFailed { errors: usize, files: usize },

    /// Zero input files where at least one was expected
    #[error("{0}")]
    NoInput(String),

    /// validate-models found no YAML files to check
    #[error("No YAML files found to validate")]
    NoFilesToValidate,
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a zero-input-files error
    pub fn no_input(message: impl Into<String>) -> Self {
        Self::NoInput(message.into())
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoFilesToValidate => 2,
            _ => 1,
        }
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            Error::ValidationFailed { errors: 3, files: 1 }.exit_code(),
            1
        );
        assert_eq!(Error::no_input("No style JSON files found").exit_code(), 1);
        assert_eq!(Error::NoFilesToValidate.exit_code(), 2);
    }

    #[test]
    fn test_format_error_plain() {
        let error = Error::config("bad config");
        assert_eq!(
            format_error(&error, false),
            "Error: Configuration error: bad config"
        );
    }
}
