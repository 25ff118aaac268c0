//! Command handlers for CLI subcommands
//!
//! One module per tool. Each handler merges its arguments with the config
//! file layer, drives the corresponding library code, prints the report,
//! and maps the outcome to the tool's exit contract.

pub mod edr_dump;
pub mod layers;
pub mod models;
pub mod serve;
pub mod styles;

pub use edr_dump::handle_edr_dump;
pub use layers::handle_validate_layers;
pub use models::handle_validate_models;
pub use serve::handle_serve;
pub use styles::handle_validate_styles;

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Sorted list of files in `dir` whose extension matches one of
/// `extensions` (case-insensitive). Sorted order keeps cross-file checks
/// like duplicate-id ownership deterministic.
pub(crate) fn files_with_extensions(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.contains(&ext.to_lowercase().as_str()));
        if matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Display name for a path in reports
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("<unknown>")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_files_with_extensions_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        for name in ["zebra.yaml", "alpha.yml", "notes.txt", "mid.yaml"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.yaml")).unwrap();

        let files = files_with_extensions(dir.path(), &["yaml", "yml"]).unwrap();
        let names: Vec<_> = files.iter().map(|p| file_name(p)).collect();
        assert_eq!(names, vec!["alpha.yml", "mid.yaml", "zebra.yaml"]);
    }
}
