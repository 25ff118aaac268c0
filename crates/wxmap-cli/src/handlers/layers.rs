//! Handler for the validate-layers command

use crate::cli::ValidateLayersArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::handlers::{file_name, files_with_extensions};
use crate::output::OutputWriter;
use serde_json::Value;
use wxmap_schemas::{load_document, LayerFileValidator, LayerIdRegistry};

/// Validate every layer file in the layer directory against the style
/// directory, tracking layer-id ownership across files.
///
/// Exit contract: 0 pass (warnings allowed), 1 any error or no input files.
pub async fn handle_validate_layers(
    args: ValidateLayersArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let layer_dir = args
        .layer_dir
        .unwrap_or_else(|| config.paths.layers_dir.clone());
    let style_dir = args
        .style_dir
        .unwrap_or_else(|| config.paths.styles_dir.clone());

    let files = files_with_extensions(&layer_dir, &["yaml", "yml"])?;
    if files.is_empty() {
        return Err(Error::no_input(format!(
            "No .yaml files found in {}",
            layer_dir.display()
        )));
    }

    output.writeln("Layer Configuration Validator")?;
    output.writeln(&"=".repeat(50))?;
    output.writeln(&format!("Found {} layer config file(s)", files.len()))?;
    output.writeln(&format!("Style directory: {}", style_dir.display()))?;

    let validator = LayerFileValidator::new(&style_dir);
    let mut registry = LayerIdRegistry::new();
    let mut total_errors = 0usize;
    let mut total_warnings = 0usize;
    let mut invalid_files = 0usize;

    for file in &files {
        let name = file_name(file);
        output.writeln(&format!("\nValidating {name}..."))?;

        let doc = match load_document(file) {
            Ok(doc) => doc,
            Err(e) => {
                output.error(&format!("  ERROR: {e}"))?;
                total_errors += 1;
                invalid_files += 1;
                continue;
            }
        };

        let report = validator.validate_file(&doc, &name, &mut registry);
        for error in report.errors() {
            output.error(&format!("  ERROR: {}", error.text()))?;
        }
        for warning in report.warnings() {
            output.warning(&format!("  WARNING: {}", warning.text()))?;
        }
        if report.is_empty() {
            let layer_count = doc
                .get("layers")
                .and_then(Value::as_array)
                .map(Vec::len)
                .unwrap_or(0);
            output.writeln(&format!("  OK ({layer_count} layers)"))?;
        }

        if !report.is_valid() {
            invalid_files += 1;
        }
        total_errors += report.error_count();
        total_warnings += report.warning_count();
    }

    output.writeln(&format!("\n{}", "=".repeat(50)))?;
    output.writeln(&format!(
        "Summary: {} total layers across {} files",
        registry.len(),
        files.len()
    ))?;

    if total_errors > 0 {
        output.error(&format!(
            "\nFAILED: {total_errors} error(s), {total_warnings} warning(s)"
        ))?;
        Err(Error::ValidationFailed {
            errors: total_errors,
            files: invalid_files,
        })
    } else if total_warnings > 0 {
        output.success(&format!("\nPASSED with {total_warnings} warning(s)"))?;
        Ok(())
    } else {
        output.success("\nPASSED: All validations successful")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn output() -> OutputWriter {
        OutputWriter::with_writer(false, false, 0, Box::new(std::io::sink()))
    }

    fn layer_yaml(model: &str, id: &str) -> String {
        format!(
            "\
model: {model}
display_name: {model}
layers:
  - id: {id}
    parameter: TMP
    title: Temperature
    style_file: temperature.json
    units:
      native: K
    levels:
      - type: isobaric
        value: 850
        default: true
"
        )
    }

    struct Fixture {
        layers: TempDir,
        styles: TempDir,
    }

    fn fixture() -> Fixture {
        let layers = TempDir::new().unwrap();
        let styles = TempDir::new().unwrap();
        std::fs::write(styles.path().join("temperature.json"), "{}").unwrap();
        Fixture { layers, styles }
    }

    fn args(fixture: &Fixture) -> ValidateLayersArgs {
        ValidateLayersArgs {
            layer_dir: Some(fixture.layers.path().to_path_buf()),
            style_dir: Some(fixture.styles.path().to_path_buf()),
        }
    }

    #[tokio::test]
    async fn test_empty_layer_directory_is_an_error() {
        let fixture = fixture();
        let result =
            handle_validate_layers(args(&fixture), &Config::default(), &mut output()).await;
        let error = result.unwrap_err();
        assert!(matches!(error, Error::NoInput(_)));
        assert_eq!(error.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_clean_files_pass() {
        let fixture = fixture();
        std::fs::write(
            fixture.layers.path().join("gfs.yaml"),
            layer_yaml("gfs", "gfs_temp"),
        )
        .unwrap();
        std::fs::write(
            fixture.layers.path().join("hrrr.yaml"),
            layer_yaml("hrrr", "hrrr_temp"),
        )
        .unwrap();

        let result =
            handle_validate_layers(args(&fixture), &Config::default(), &mut output()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_id_across_files_fails() {
        let fixture = fixture();
        // Both files declare gfs_temp; sorted order makes gfs.yaml the owner.
        std::fs::write(
            fixture.layers.path().join("gfs.yaml"),
            layer_yaml("gfs", "gfs_temp"),
        )
        .unwrap();
        std::fs::write(
            fixture.layers.path().join("hrrr.yaml"),
            layer_yaml("gfs", "gfs_temp"),
        )
        .unwrap();

        let result =
            handle_validate_layers(args(&fixture), &Config::default(), &mut output()).await;
        match result.unwrap_err() {
            Error::ValidationFailed { errors, files } => {
                assert_eq!(errors, 1);
                assert_eq!(files, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
