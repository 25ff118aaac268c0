//! Error types for document loading
//!
//! Copyright (c) 2025 Wxmap Team
//! Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Errors raised while reading and parsing a configuration document.
///
/// A loader error is fatal to the file it names and to nothing else; callers
/// record it and move on to the next file.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// File could not be read
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML syntax error
    #[error("invalid YAML syntax in {}: {source}", path.display())]
    YamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// JSON syntax error
    #[error("invalid JSON in {}: {source}", path.display())]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// File extension is not a supported configuration format
    #[error("unsupported file format: {} (expected .yaml, .yml, or .json)", path.display())]
    UnsupportedFormat { path: PathBuf },
}

impl LoaderError {
    pub fn io(path: PathBuf, source: std::io::Error) -> Self {
        Self::Io { path, source }
    }

    pub fn yaml_parse(path: PathBuf, source: serde_yaml::Error) -> Self {
        Self::YamlParse { path, source }
    }

    pub fn json_parse(path: PathBuf, source: serde_json::Error) -> Self {
        Self::JsonParse { path, source }
    }

    pub fn unsupported_format(path: PathBuf) -> Self {
        Self::UnsupportedFormat { path }
    }
}
