//! Layered TOML configuration for the CLI
//!
//! Settings come from (highest precedence first): command-line flags, an
//! explicit `--config` file, `.wxmap.toml` in the working directory, and
//! `~/.config/wxmap/config.toml`. Flags are merged in the handlers; this
//! module only loads the file layer.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub edr: EdrConfig,
    pub serve: ServeConfig,
}

/// Directories the validators operate on
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Layer descriptor directory
    pub layers_dir: PathBuf,
    /// Style document directory; also resolves layer style_file references
    pub styles_dir: PathBuf,
    /// Model descriptor directory
    pub models_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            layers_dir: PathBuf::from("config/layers"),
            styles_dir: PathBuf::from("config/styles"),
            models_dir: PathBuf::from("."),
        }
    }
}

/// EDR dumper defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EdrConfig {
    pub endpoint: String,
}

impl Default for EdrConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8083/edr".to_string(),
        }
    }
}

/// Dashboard server defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    pub port: u16,
    pub dir: PathBuf,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration, optionally from an explicit file.
    ///
    /// An explicit file that is missing or malformed is an error; the
    /// implicit locations fall back to defaults silently.
    pub fn load_with_file(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            return Self::from_file(path);
        }

        for candidate in Self::default_locations() {
            if candidate.exists() {
                tracing::debug!("loading configuration from {}", candidate.display());
                return Self::from_file(&candidate);
            }
        }

        Ok(Self::default())
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("invalid config {}: {e}", path.display())))
    }

    fn default_locations() -> Vec<PathBuf> {
        let mut locations = vec![PathBuf::from(".wxmap.toml")];
        if let Some(config_dir) = dirs::config_dir() {
            locations.push(config_dir.join("wxmap").join("config.toml"));
        }
        locations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.paths.layers_dir, PathBuf::from("config/layers"));
        assert_eq!(config.paths.styles_dir, PathBuf::from("config/styles"));
        assert_eq!(config.edr.endpoint, "http://localhost:8083/edr");
        assert_eq!(config.serve.port, 8000);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[serve]\nport = 9000").unwrap();

        let config = Config::load_with_file(Some(file.path())).unwrap();
        assert_eq!(config.serve.port, 9000);
        assert_eq!(config.edr.endpoint, "http://localhost:8083/edr");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = Config::load_with_file(Some(Path::new("/no/such/wxmap.toml")));
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml [").unwrap();
        let result = Config::load_with_file(Some(file.path()));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
