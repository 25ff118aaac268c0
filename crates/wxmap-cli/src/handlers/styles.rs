//! Handler for the validate-styles command

use crate::cli::ValidateStylesArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::handlers::{file_name, files_with_extensions};
use crate::output::OutputWriter;
use wxmap_schemas::{load_document, validate_style_document, Issue, Report};

/// The example document shipped next to the real styles; not validated
const SCHEMA_EXAMPLE_FILE: &str = "schema.example.json";

/// Validate every style JSON document in the style directory, excluding
/// the schema example.
///
/// Exit contract: 0 all valid, 1 any error or no input files.
pub async fn handle_validate_styles(
    args: ValidateStylesArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let style_dir = args
        .style_dir
        .unwrap_or_else(|| config.paths.styles_dir.clone());

    let files: Vec<_> = files_with_extensions(&style_dir, &["json"])?
        .into_iter()
        .filter(|path| file_name(path) != SCHEMA_EXAMPLE_FILE)
        .collect();

    if files.is_empty() {
        return Err(Error::no_input("No style JSON files found"));
    }

    output.writeln(&format!("Validating {} style files...\n", files.len()))?;

    // Flat (file, issue) list so the summary shows everything in one place.
    let mut all_errors: Vec<(String, Issue)> = Vec::new();
    let mut files_with_errors = 0usize;

    for file in &files {
        let name = file_name(file);
        if output.is_verbose() {
            output.writeln(&format!("Validating {name}..."))?;
        }

        let report = match load_document(file) {
            Ok(doc) => validate_style_document(&doc),
            Err(e) => {
                let mut report = Report::new();
                report.add_error("root", e.to_string());
                report
            }
        };

        if !report.is_valid() {
            files_with_errors += 1;
            if output.is_verbose() {
                for error in report.errors() {
                    output.error(&format!("  ERROR: {}", error.text()))?;
                }
            }
            all_errors.extend(report.errors().cloned().map(|issue| (name.clone(), issue)));
        }
    }

    output.writeln(&"-".repeat(60))?;
    if all_errors.is_empty() {
        output.success(&format!("\nSUCCESS: All {} files are valid!", files.len()))?;
        for file in &files {
            output.writeln(&format!("  {}", file_name(file)))?;
        }
        Ok(())
    } else {
        output.error(&format!(
            "\nFOUND {} ERROR(S) in {} file(s):\n",
            all_errors.len(),
            files_with_errors
        ))?;
        for (file, issue) in &all_errors {
            output.error(&format!("  {file}: {}", issue.text()))?;
        }
        output.writeln("")?;
        Err(Error::ValidationFailed {
            errors: all_errors.len(),
            files: files_with_errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn output() -> OutputWriter {
        OutputWriter::with_writer(false, false, 0, Box::new(std::io::sink()))
    }

    fn args(dir: &TempDir) -> ValidateStylesArgs {
        ValidateStylesArgs {
            style_dir: Some(dir.path().to_path_buf()),
        }
    }

    const VALID_STYLES: &str = r##"{
  "version": "1.0",
  "styles": {
    "temperature": {
      "type": "gradient",
      "stops": [
        {"value": 233.15, "color": "#0000ff"},
        {"value": 313.15, "color": "#ff0000"}
      ]
    }
  }
}"##;

    #[tokio::test]
    async fn test_schema_example_is_excluded() {
        let dir = TempDir::new().unwrap();
        // Deliberately invalid; must not be picked up.
        std::fs::write(dir.path().join("schema.example.json"), "{}").unwrap();

        let result = handle_validate_styles(args(&dir), &Config::default(), &mut output()).await;
        assert!(matches!(result.unwrap_err(), Error::NoInput(_)));
    }

    #[tokio::test]
    async fn test_valid_documents_pass() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("temperature.json"), VALID_STYLES).unwrap();

        let result = handle_validate_styles(args(&dir), &Config::default(), &mut output()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_errors_from_all_files_accumulate() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.json"), r#"{"styles": {}}"#).unwrap();
        std::fs::write(dir.path().join("b.json"), "{not json").unwrap();

        let result = handle_validate_styles(args(&dir), &Config::default(), &mut output()).await;
        match result.unwrap_err() {
            Error::ValidationFailed { errors, files } => {
                assert_eq!(errors, 2);
                assert_eq!(files, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
