//! Layer configuration validation
//!
//! Validates WMS layer descriptor files: required fields, units, naming
//! convention, on-disk style references, level defaults, and composite
//! rules. Layer identifiers are the one invariant that spans files - the
//! first file to introduce an id owns it, and every later occurrence is an
//! error naming the owning file.
//!
//! Copyright (c) 2025 Wxmap Team
//! Licensed under the Apache-2.0 license

use crate::validation::json_type_name;
use crate::validation::report::Report;
use serde_json::{Map, Value};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Fields every layer entry must carry
const REQUIRED_LAYER_FIELDS: &[&str] = &["id", "parameter", "title", "style_file"];

/// Fields every layer file must carry at the top level
const REQUIRED_MODEL_FIELDS: &[&str] = &["model", "display_name", "layers"];

/// Cross-file registry of layer ids and the file that introduced each.
///
/// Files must be fed in sorted filename order so ownership is deterministic.
#[derive(Debug, Default)]
pub struct LayerIdRegistry {
    owners: BTreeMap<String, String>,
}

impl LayerIdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim an id for `file`. Returns the owning file's name when the id is
    /// already taken, `None` when the claim succeeds.
    pub fn claim(&mut self, id: &str, file: &str) -> Option<&str> {
        match self.owners.entry(id.to_string()) {
            Entry::Occupied(entry) => Some(entry.into_mut().as_str()),
            Entry::Vacant(entry) => {
                entry.insert(file.to_string());
                None
            }
        }
    }

    /// Number of distinct layer ids seen so far
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

/// Validator for layer descriptor files, bound to the style directory the
/// files' `style_file` references must resolve against.
#[derive(Debug)]
pub struct LayerFileValidator {
    style_dir: PathBuf,
}

impl LayerFileValidator {
    pub fn new<P: Into<PathBuf>>(style_dir: P) -> Self {
        Self {
            style_dir: style_dir.into(),
        }
    }

    /// Validate one layer file, claiming its layer ids in `registry`.
    pub fn validate_file(
        &self,
        doc: &Value,
        file_name: &str,
        registry: &mut LayerIdRegistry,
    ) -> Report {
        let mut report = Report::new();

        let Some(root) = doc.as_object() else {
            report.add_error("", "Root must be a YAML mapping");
            return report;
        };

        for field in REQUIRED_MODEL_FIELDS {
            if !root.contains_key(*field) {
                report.add_error("", format!("Missing required field '{field}'"));
            }
        }

        let model = root.get("model").and_then(Value::as_str).unwrap_or("unknown");

        let layers: &[Value] = match root.get("layers") {
            Some(Value::Array(layers)) => layers,
            Some(_) => {
                report.add_error("", "'layers' must be a list");
                &[]
            }
            None => &[],
        };

        for layer_value in layers {
            let Some(layer) = layer_value.as_object() else {
                report.add_error(
                    "",
                    format!(
                        "Layer entry must be an object, got: {}",
                        json_type_name(layer_value)
                    ),
                );
                continue;
            };

            let layer_id = self.validate_layer(layer, model, &mut report);

            if let Some(layer_id) = layer_id {
                if let Some(owner) = registry.claim(&layer_id, file_name) {
                    report.add_error(
                        "",
                        format!("Duplicate layer ID '{layer_id}' (also in {owner})"),
                    );
                }
            }
        }

        report
    }

    /// Validate a single layer entry. Returns the layer id when one is
    /// declared, for duplicate tracking.
    fn validate_layer(
        &self,
        layer: &Map<String, Value>,
        model: &str,
        report: &mut Report,
    ) -> Option<String> {
        let layer_id = layer
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or("<missing>")
            .to_string();
        let subject = format!("Layer '{layer_id}'");

        for field in REQUIRED_LAYER_FIELDS {
            if !layer.contains_key(*field) {
                report.add_error(
                    subject.clone(),
                    format!("missing required field '{field}'"),
                );
            }
        }

        // Composites derive their values from other layers, so they carry no
        // native unit of their own.
        let is_composite = layer.get("composite").is_some_and(truthy);
        let units = layer.get("units");
        let units_present = units.is_some_and(truthy);
        if units_present && !units.is_some_and(Value::is_object) {
            report.add_error(subject.clone(), "'units' must be an object");
        } else if !is_composite {
            if !units_present {
                report.add_error(subject.clone(), "missing required field 'units'");
            } else if units
                .and_then(Value::as_object)
                .is_some_and(|u| !u.contains_key("native"))
            {
                report.add_error(subject.clone(), "missing required field 'units.native'");
            }
        }

        if layer.contains_key("id") && layer.contains_key("parameter") {
            let expected_prefix = format!("{model}_");
            if !layer_id.starts_with(&expected_prefix) {
                report.add_warning(
                    subject.clone(),
                    format!("ID should start with '{expected_prefix}'"),
                );
            }
        }

        if let Some(style_file) = layer.get("style_file").and_then(Value::as_str) {
            if !style_file.is_empty() && !self.style_dir.join(style_file).exists() {
                report.add_error(
                    subject.clone(),
                    format!("style file '{style_file}' not found in {}/", self.style_dir.display()),
                );
            }
        }

        if let Some(levels) = layer.get("levels").and_then(Value::as_array) {
            if !levels.is_empty() {
                let has_default = levels.iter().any(|level| {
                    level
                        .as_object()
                        .and_then(|l| l.get("default"))
                        .is_some_and(truthy)
                });
                if !has_default {
                    report.add_warning(subject.clone(), "no default level specified");
                }
            }
        }

        if is_composite && !layer.get("requires").is_some_and(truthy) {
            report.add_error(subject, "composite layer must have 'requires' field");
        }

        layer.contains_key("id").then_some(layer_id)
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_first_file_owns_id() {
        let mut registry = LayerIdRegistry::new();
        assert!(registry.claim("gfs_temp", "gfs.yaml").is_none());
        assert_eq!(registry.claim("gfs_temp", "hrrr.yaml"), Some("gfs.yaml"));
        assert_eq!(registry.claim("gfs_temp", "nam.yaml"), Some("gfs.yaml"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_non_mapping_root() {
        let validator = LayerFileValidator::new("styles");
        let mut registry = LayerIdRegistry::new();
        let report = validator.validate_file(&json!("nope"), "gfs.yaml", &mut registry);
        assert_eq!(report.error_count(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_composite_layer_skips_units_but_needs_requires() {
        let validator = LayerFileValidator::new("/nonexistent-styles");
        let mut registry = LayerIdRegistry::new();
        let doc = json!({
            "model": "gfs",
            "display_name": "GFS",
            "layers": [{
                "id": "gfs_wind",
                "parameter": "WIND",
                "title": "Wind",
                "style_file": "",
                "composite": true
            }]
        });
        let report = validator.validate_file(&doc, "gfs.yaml", &mut registry);
        let messages: Vec<_> = report.errors().map(|e| e.text()).collect();
        assert!(messages
            .iter()
            .any(|m| m.contains("composite layer must have 'requires' field")));
        assert!(!messages.iter().any(|m| m.contains("'units'")));
    }
}
