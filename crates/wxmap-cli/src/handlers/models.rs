//! Handler for the validate-models command

use crate::cli::ValidateModelsArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::handlers::{file_name, files_with_extensions};
use crate::output::OutputWriter;
use tracing::debug;
use wxmap_schemas::{load_document, validate_model_config, Report};

/// Validate the given model files, or every YAML file in the model
/// directory when none are named.
///
/// Exit contract: 0 all valid, 1 validation errors, 2 nothing to validate.
pub async fn handle_validate_models(
    args: ValidateModelsArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let files = if args.files.is_empty() {
        let dir = args
            .model_dir
            .unwrap_or_else(|| config.paths.models_dir.clone());
        files_with_extensions(&dir, &["yaml", "yml"])?
    } else {
        args.files
    };

    if files.is_empty() {
        return Err(Error::NoFilesToValidate);
    }

    let mut total_errors = 0usize;
    let mut total_warnings = 0usize;
    let mut valid_count = 0usize;

    for file in &files {
        let name = file_name(file);
        debug!("validating model config {name}");

        let report = match load_document(file) {
            Ok(doc) => validate_model_config(&doc),
            Err(e) => {
                // Structural failure: fatal to this file only.
                let mut report = Report::new();
                report.add_error("(file)", e.to_string());
                report
            }
        };

        if report.is_valid() {
            valid_count += 1;
            if output.is_verbose() {
                output.success(&format!("OK {name}"))?;
                for warning in report.warnings() {
                    output.warning(&format!("  {warning}"))?;
                }
            }
        } else {
            output.error(&format!("INVALID {name}"))?;
            for error in report.errors() {
                output.error(&format!("  {error}"))?;
            }
            for warning in report.warnings() {
                output.warning(&format!("  {warning}"))?;
            }
            total_errors += report.error_count();
        }

        total_warnings += report.warning_count();
    }

    output.writeln("")?;
    if total_errors == 0 {
        output.writeln(&format!(
            "All {} model configuration(s) valid",
            files.len()
        ))?;
        if total_warnings > 0 && !output.is_quiet() {
            output.writeln(&format!("  ({total_warnings} warning(s))"))?;
        }
        Ok(())
    } else {
        let invalid_files = files.len() - valid_count;
        output.writeln(&format!(
            "Validation failed: {total_errors} error(s) in {invalid_files} file(s)"
        ))?;
        if total_warnings > 0 && !output.is_quiet() {
            output.writeln(&format!("  ({total_warnings} warning(s))"))?;
        }
        Err(Error::ValidationFailed {
            errors: total_errors,
            files: invalid_files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ValidateModelsArgs;
    use tempfile::TempDir;

    fn output() -> OutputWriter {
        OutputWriter::with_writer(false, false, 0, Box::new(std::io::sink()))
    }

    fn args_for_dir(dir: &TempDir) -> ValidateModelsArgs {
        ValidateModelsArgs {
            files: Vec::new(),
            model_dir: Some(dir.path().to_path_buf()),
        }
    }

    const VALID_MODEL: &str = "\
model:
  id: gfs
  name: GFS
dimensions:
  type: forecast
source:
  type: local
  path: /data/gfs
grid:
  projection: latlon
schedule:
  cycles: [0, 6, 12, 18]
retention:
  hours: 48
parameters:
  - name: TMP
    levels:
      - type: isobaric
        values: [850, 500]
";

    #[tokio::test]
    async fn test_empty_directory_exits_2() {
        let dir = TempDir::new().unwrap();
        let result =
            handle_validate_models(args_for_dir(&dir), &Config::default(), &mut output()).await;
        let error = result.unwrap_err();
        assert!(matches!(error, Error::NoFilesToValidate));
        assert_eq!(error.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_valid_file_passes() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("gfs.yaml"), VALID_MODEL).unwrap();
        let result =
            handle_validate_models(args_for_dir(&dir), &Config::default(), &mut output()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_file_exits_1() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("gfs.yaml"), VALID_MODEL).unwrap();
        std::fs::write(dir.path().join("broken.yaml"), "model:\n  id: gfs\n").unwrap();

        let result =
            handle_validate_models(args_for_dir(&dir), &Config::default(), &mut output()).await;
        match result.unwrap_err() {
            Error::ValidationFailed { files, .. } => {
                assert_eq!(files, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_unreadable_yaml_is_file_local() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bad.yaml"), "model: [unclosed\n").unwrap();
        std::fs::write(dir.path().join("good.yaml"), VALID_MODEL).unwrap();

        let result =
            handle_validate_models(args_for_dir(&dir), &Config::default(), &mut output()).await;
        // The malformed file fails, the good one still validates.
        match result.unwrap_err() {
            Error::ValidationFailed { errors, files } => {
                assert_eq!(errors, 1);
                assert_eq!(files, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
