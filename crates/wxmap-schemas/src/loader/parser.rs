//! Parsing of YAML and JSON documents into a common raw representation
//!
//! Copyright (c) 2025 Wxmap Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde_json::Value;
use std::path::Path;

/// Supported file formats for configuration documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => match ext.to_lowercase().as_str() {
                "yaml" | "yml" => Ok(Format::Yaml),
                "json" => Ok(Format::Json),
                _ => Err(LoaderError::unsupported_format(path.to_path_buf())),
            },
            None => Err(LoaderError::unsupported_format(path.to_path_buf())),
        }
    }

    /// File extensions recognized for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Yaml => &["yaml", "yml"],
            Format::Json => &["json"],
        }
    }
}

/// Load a configuration file, detecting the format from its extension.
///
/// YAML content is parsed through `serde_yaml::Value` first (so YAML syntax
/// errors carry YAML positions), then converted to a `serde_json::Value` so
/// every validator walks a single raw representation.
pub fn load_document(path: &Path) -> LoaderResult<Value> {
    let format = Format::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .map_err(|e| LoaderError::io(path.to_path_buf(), e))?;

    parse_content(&content, format, path)
}

/// Parse document content with an explicit format
pub fn parse_content(content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
    match format {
        Format::Yaml => {
            let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
                .map_err(|e| LoaderError::yaml_parse(path.to_path_buf(), e))?;
            serde_json::to_value(yaml_value)
                .map_err(|e| LoaderError::json_parse(path.to_path_buf(), e))
        }
        Format::Json => serde_json::from_str(content)
            .map_err(|e| LoaderError::json_parse(path.to_path_buf(), e)),
    }
}
