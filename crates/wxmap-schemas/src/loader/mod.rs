//! Document loading for YAML and JSON configuration files
//!
//! Copyright (c) 2025 Wxmap Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod parser;

pub use error::{LoaderError, LoaderResult};
pub use parser::{load_document, Format};
