//! Error types for the EDR dumper

use thiserror::Error;

/// Result type for dumper operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a dump run.
///
/// Per-query failures are not errors at this level - they are recorded in
/// the run's [`Stats`](crate::dump::Stats) and the crawl continues. Only
/// conditions that make the run itself impossible (client construction, an
/// unwritable output tree) surface here.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client could not be constructed
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Output tree could not be created or written
    #[error("could not write {path}: {source}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Summary serialization failed
    #[error("failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    pub fn output(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }
}
