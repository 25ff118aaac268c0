//! Validation of wxmap configuration documents
//!
//! One submodule per document kind, sharing the path-tracking context, the
//! issue accumulator, and the closed vocabularies. Every validator takes a
//! raw [`serde_json::Value`] and returns a [`Report`]; nothing here reads or
//! writes files except the layer validator's style-reference check.
//!
//! Copyright (c) 2025 Wxmap Team
//! Licensed under the Apache-2.0 license

pub mod context;
pub mod layer_config;
pub mod model_config;
pub mod report;
pub mod style_config;
pub mod vocab;

pub use context::ValidationContext;
pub use layer_config::{LayerFileValidator, LayerIdRegistry};
pub use model_config::validate_model_config;
pub use report::{Issue, Report, Severity};
pub use style_config::validate_style_document;

use serde_json::Value;

/// Human-readable name for a raw JSON value's type, used in issue messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Render a raw value for an issue message: strings bare, everything else as
/// its JSON form.
pub fn value_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
