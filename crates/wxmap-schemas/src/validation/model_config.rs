//! Model configuration validation
//!
//! Validates a per-model YAML descriptor against the fixed schema: identity,
//! dimensionality, data source, grid projection, schedule, retention,
//! precaching, parameter/level definitions, and composites. Each file is
//! validated independently; there is no cross-file invariant for models.
//!
//! Copyright (c) 2025 Wxmap Team
//! Licensed under the Apache-2.0 license

use crate::validation::context::ValidationContext;
use crate::validation::report::Report;
use crate::validation::{value_display, vocab};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Validate a model configuration document.
///
/// Returns the full issue list; the document is valid iff
/// [`Report::is_valid`] holds afterwards.
pub fn validate_model_config(doc: &Value) -> Report {
    let mut report = Report::new();

    let Some(root) = doc.as_object() else {
        report.add_error("(root)", "Root must be a YAML mapping");
        return report;
    };

    validate_model_section(root, &mut report);
    validate_dimensions_section(root, &mut report);
    validate_source_section(root, &mut report);
    validate_grid_section(root, &mut report);
    validate_schedule_section(root, &mut report);
    validate_retention_section(root, &mut report);
    validate_precaching_section(root, &mut report);
    validate_parameters_section(root, &mut report);
    validate_composites_section(root, &mut report);

    report
}

/// The 'model' identity section (required)
fn validate_model_section(root: &Map<String, Value>, report: &mut Report) {
    let Some(section) = root.get("model") else {
        report.add_error("model", "Missing required section 'model'");
        return;
    };
    let Some(model) = section.as_object() else {
        report.add_error("model", "Section must be a mapping");
        return;
    };

    match model.get("id") {
        None => report.add_error("model.id", "Missing required field 'id'"),
        Some(Value::String(id)) => {
            if !vocab::model_id_pattern().is_match(id) {
                report.add_error(
                    "model.id",
                    "Must be lowercase alphanumeric with underscores, starting with letter",
                );
            }
        }
        Some(_) => report.add_error("model.id", "Must be a string"),
    }

    match model.get("name") {
        None => report.add_error("model.name", "Missing required field 'name'"),
        Some(Value::String(_)) => {}
        Some(_) => report.add_error("model.name", "Must be a string"),
    }

    optional_string(model, "model.description", report);
    optional_bool(model, "model.enabled", report);
}

/// The 'dimensions' section (recommended)
fn validate_dimensions_section(root: &Map<String, Value>, report: &mut Report) {
    let Some(section) = root.get("dimensions") else {
        report.add_warning(
            "dimensions",
            "Missing 'dimensions' section - will infer from schedule.type",
        );
        return;
    };
    let Some(dims) = section.as_object() else {
        report.add_error("dimensions", "Section must be a mapping");
        return;
    };

    let dim_type = dims.get("type").and_then(Value::as_str);
    match dims.get("type") {
        None => report.add_warning(
            "dimensions.type",
            "Missing 'type' - will default to 'forecast'",
        ),
        Some(value) => {
            if !dim_type.is_some_and(|t| vocab::DIMENSION_TYPES.contains(&t)) {
                report.add_error(
                    "dimensions.type",
                    format!(
                        "Invalid type '{}'. Must be one of: {}",
                        value_display(value),
                        vocab::membership_list(vocab::DIMENSION_TYPES)
                    ),
                );
            }
        }
    }

    // Forecast models use RUN + FORECAST axes, observation models use TIME;
    // carrying the other family's axis is almost always a mistake.
    match dim_type {
        Some("forecast") => {
            if dims.get("time").is_some_and(truthy) {
                report.add_warning(
                    "dimensions.time",
                    "Forecast models typically don't use TIME dimension (use RUN + FORECAST)",
                );
            }
        }
        Some("observation") => {
            if dims.get("run").is_some_and(truthy) || dims.get("forecast").is_some_and(truthy) {
                report.add_warning(
                    "dimensions.run/forecast",
                    "Observation models typically don't use RUN/FORECAST dimensions (use TIME)",
                );
            }
        }
        _ => {}
    }

    for field in ["run", "forecast", "time", "elevation"] {
        if let Some(value) = dims.get(field) {
            if !value.is_boolean() {
                report.add_error(
                    format!("dimensions.{field}"),
                    "Must be a boolean (true/false)",
                );
            }
        }
    }
}

/// The 'source' section (required)
fn validate_source_section(root: &Map<String, Value>, report: &mut Report) {
    let Some(section) = root.get("source") else {
        report.add_error("source", "Missing required section 'source'");
        return;
    };
    let Some(source) = section.as_object() else {
        report.add_error("source", "Section must be a mapping");
        return;
    };

    let source_type = source.get("type").and_then(Value::as_str);
    match source.get("type") {
        None => report.add_error("source.type", "Missing required field 'type'"),
        Some(value) => {
            if !source_type.is_some_and(|t| vocab::SOURCE_TYPES.contains(&t)) {
                report.add_error(
                    "source.type",
                    format!(
                        "Invalid type '{}'. Must be one of: {}",
                        value_display(value),
                        vocab::membership_list(vocab::SOURCE_TYPES)
                    ),
                );
            }
        }
    }

    if source_type.is_some_and(|t| t.starts_with("aws_s3")) {
        if !source.contains_key("bucket") {
            report.add_error(
                "source.bucket",
                "Missing required field 'bucket' for AWS S3 source",
            );
        }
        if !source.contains_key("region") {
            report.add_warning("source.region", "Missing 'region' - will default to us-east-1");
        }
    }
}

/// The 'grid' section (required)
fn validate_grid_section(root: &Map<String, Value>, report: &mut Report) {
    let Some(section) = root.get("grid") else {
        report.add_error("grid", "Missing required section 'grid'");
        return;
    };
    let Some(grid) = section.as_object() else {
        report.add_error("grid", "Section must be a mapping");
        return;
    };

    let projection = grid.get("projection").and_then(Value::as_str);
    match grid.get("projection") {
        None => report.add_error("grid.projection", "Missing required field 'projection'"),
        Some(value) => {
            if !projection.is_some_and(|p| vocab::PROJECTION_TYPES.contains(&p)) {
                report.add_error(
                    "grid.projection",
                    format!(
                        "Invalid projection '{}'. Must be one of: {}",
                        value_display(value),
                        vocab::membership_list(vocab::PROJECTION_TYPES)
                    ),
                );
            }
        }
    }

    if let Some(bbox_value) = grid.get("bbox") {
        match bbox_value.as_object() {
            None => report.add_error(
                "grid.bbox",
                "Must be a mapping with min_lon, min_lat, max_lon, max_lat",
            ),
            Some(bbox) => validate_bbox(bbox, report),
        }
    }

    if projection == Some("geostationary") && !grid.contains_key("projection_params") {
        report.add_error(
            "grid.projection_params",
            "Missing required 'projection_params' for geostationary projection",
        );
    }
}

fn validate_bbox(bbox: &Map<String, Value>, report: &mut Report) {
    for field in ["min_lon", "min_lat", "max_lon", "max_lat"] {
        match bbox.get(field) {
            None => report.add_error(
                format!("grid.bbox.{field}"),
                format!("Missing required field '{field}'"),
            ),
            Some(value) if !value.is_number() => {
                report.add_error(format!("grid.bbox.{field}"), "Must be a number");
            }
            Some(_) => {}
        }
    }

    let coord = |field: &str| bbox.get(field).and_then(Value::as_f64);
    if let (Some(min), Some(max)) = (coord("min_lon"), coord("max_lon")) {
        if min >= max {
            report.add_error("grid.bbox", "min_lon must be less than max_lon");
        }
    }
    if let (Some(min), Some(max)) = (coord("min_lat"), coord("max_lat")) {
        if min >= max {
            report.add_error("grid.bbox", "min_lat must be less than max_lat");
        }
    }
}

/// The 'schedule' section (required)
fn validate_schedule_section(root: &Map<String, Value>, report: &mut Report) {
    let Some(section) = root.get("schedule") else {
        report.add_error("schedule", "Missing required section 'schedule'");
        return;
    };
    let Some(schedule) = section.as_object() else {
        report.add_error("schedule", "Section must be a mapping");
        return;
    };

    let schedule_type = schedule.get("type").and_then(Value::as_str);

    // Observation schedules poll continuously; only forecast-style schedules
    // carry cycles and forecast hours.
    if schedule_type != Some("observation") {
        if let Some(cycles_value) = schedule.get("cycles") {
            match cycles_value.as_array() {
                None => report.add_error("schedule.cycles", "Must be a list of hours (0-23)"),
                Some(cycles) => {
                    let ctx = ValidationContext::at("schedule.cycles");
                    for (i, cycle) in cycles.iter().enumerate() {
                        let hour = cycle.as_i64();
                        if !hour.is_some_and(|h| (0..=23).contains(&h)) {
                            report.add_error(
                                ctx.child_index(i).path,
                                format!(
                                    "Invalid cycle hour: {}. Must be 0-23",
                                    value_display(cycle)
                                ),
                            );
                        }
                    }
                }
            }
        }

        if let Some(fh) = schedule.get("forecast_hours") {
            if let Some(range) = fh.as_object() {
                for field in ["start", "end"] {
                    match range.get(field) {
                        None => report.add_error(
                            format!("schedule.forecast_hours.{field}"),
                            format!("Missing required field '{field}'"),
                        ),
                        Some(value) if value.as_i64().is_none() => {
                            report.add_error(
                                format!("schedule.forecast_hours.{field}"),
                                "Must be an integer",
                            );
                        }
                        Some(_) => {}
                    }
                }
                if let (Some(start), Some(end)) = (
                    range.get("start").and_then(Value::as_i64),
                    range.get("end").and_then(Value::as_i64),
                ) {
                    if start >= end {
                        report.add_error(
                            "schedule.forecast_hours",
                            "start must be less than end",
                        );
                    }
                }
            } else if !fh.is_array() {
                report.add_error(
                    "schedule.forecast_hours",
                    "Must be a list or mapping with start/end/step",
                );
            }
        }
    }

    if let Some(poll) = schedule.get("poll_interval_secs") {
        if !poll.as_i64().is_some_and(|p| p > 0) {
            report.add_error("schedule.poll_interval_secs", "Must be a positive integer");
        }
    }
}

/// The 'retention' section (optional but recommended)
fn validate_retention_section(root: &Map<String, Value>, report: &mut Report) {
    let Some(section) = root.get("retention") else {
        report.add_warning(
            "retention",
            "Missing 'retention' section - data will be kept indefinitely",
        );
        return;
    };
    let Some(retention) = section.as_object() else {
        report.add_error("retention", "Section must be a mapping");
        return;
    };

    if let Some(hours) = retention.get("hours") {
        if !hours.as_i64().is_some_and(|h| h > 0) {
            report.add_error("retention.hours", "Must be a positive integer");
        }
    }
}

/// The 'precaching' section (optional)
fn validate_precaching_section(root: &Map<String, Value>, report: &mut Report) {
    let Some(section) = root.get("precaching") else {
        return;
    };
    let Some(precaching) = section.as_object() else {
        report.add_error("precaching", "Section must be a mapping");
        return;
    };

    optional_bool(precaching, "precaching.enabled", report);

    if let Some(params) = precaching.get("parameters") {
        if !params.is_array() {
            report.add_error("precaching.parameters", "Must be a list of parameter names");
        }
    }
}

/// The 'parameters' section (required, non-empty)
fn validate_parameters_section(root: &Map<String, Value>, report: &mut Report) {
    let Some(section) = root.get("parameters") else {
        report.add_error("parameters", "Missing required section 'parameters'");
        return;
    };
    let Some(params) = section.as_array() else {
        report.add_error("parameters", "Section must be a list");
        return;
    };
    if params.is_empty() {
        report.add_error("parameters", "Must have at least one parameter defined");
        return;
    }

    let ctx = ValidationContext::at("parameters");
    for (i, param_value) in params.iter().enumerate() {
        let param_ctx = ctx.child_index(i);
        let Some(param) = param_value.as_object() else {
            report.add_error(param_ctx.path, "Each parameter must be a mapping");
            continue;
        };

        match param.get("name") {
            None => report.add_error(
                param_ctx.child("name").path,
                "Missing required field 'name'",
            ),
            Some(Value::String(_)) => {}
            Some(_) => report.add_error(param_ctx.child("name").path, "Must be a string"),
        }

        // Duplicate parameter names across entries are deliberately allowed:
        // the same parameter may appear twice with different level sets.

        optional_string(param, &param_ctx.child("description").path, report);
        optional_string(param, &param_ctx.child("units").path, report);
        optional_string(param, &param_ctx.child("display_units").path, report);

        match param.get("levels") {
            None => report.add_error(
                param_ctx.child("levels").path,
                "Missing required field 'levels'",
            ),
            Some(levels) => validate_levels(levels, &param_ctx.child("levels"), report),
        }

        if let Some(style) = param.get("style") {
            let known = style
                .as_str()
                .is_some_and(|s| vocab::STYLE_NAMES.contains(&s));
            if !known {
                report.add_warning(
                    param_ctx.child("style").path,
                    format!(
                        "Unknown style '{}'. Known styles: {}",
                        value_display(style),
                        vocab::membership_list(vocab::STYLE_NAMES)
                    ),
                );
            }
        }

        if let Some(conversion) = param.get("conversion") {
            let known = conversion
                .as_str()
                .is_some_and(|c| vocab::CONVERSIONS.contains(&c));
            if !known {
                report.add_warning(
                    param_ctx.child("conversion").path,
                    format!(
                        "Unknown conversion '{}'. Known: {}",
                        value_display(conversion),
                        vocab::membership_list(vocab::CONVERSIONS)
                    ),
                );
            }
        }
    }
}

fn validate_levels(levels: &Value, ctx: &ValidationContext, report: &mut Report) {
    let Some(levels) = levels.as_array() else {
        report.add_error(ctx.path.clone(), "Must be a list");
        return;
    };
    if levels.is_empty() {
        report.add_error(ctx.path.clone(), "Must have at least one level defined");
        return;
    }

    for (i, level_value) in levels.iter().enumerate() {
        let level_ctx = ctx.child_index(i);
        let Some(level) = level_value.as_object() else {
            report.add_error(level_ctx.path, "Each level must be a mapping");
            continue;
        };

        match level.get("type") {
            None => report.add_error(
                level_ctx.child("type").path,
                "Missing required field 'type'",
            ),
            Some(type_value) => {
                let known = type_value
                    .as_str()
                    .is_some_and(|t| vocab::LEVEL_TYPES.contains(&t));
                if !known {
                    report.add_warning(
                        level_ctx.child("type").path,
                        format!(
                            "Unknown level type '{}'. Known types: {}",
                            value_display(type_value),
                            vocab::membership_list(vocab::LEVEL_TYPES)
                        ),
                    );
                }
            }
        }

        let has_value = level.contains_key("value");
        match level.get("values") {
            Some(values) => match values.as_array() {
                None => report.add_error(level_ctx.child("values").path, "Must be a list"),
                Some(list) if list.is_empty() => report.add_error(
                    level_ctx.child("values").path,
                    "Must have at least one value",
                ),
                Some(_) => {}
            },
            None if !has_value => report.add_error(
                level_ctx.path,
                "Must have either 'value' or 'values'",
            ),
            None => {}
        }
    }
}

/// The 'composites' section (optional)
fn validate_composites_section(root: &Map<String, Value>, report: &mut Report) {
    let Some(section) = root.get("composites") else {
        return;
    };
    let Some(composites) = section.as_array() else {
        report.add_error("composites", "Section must be a list");
        return;
    };

    // Cross-reference against this file's own declared parameter names.
    let declared: HashSet<&str> = root
        .get("parameters")
        .and_then(Value::as_array)
        .map(|params| {
            params
                .iter()
                .filter_map(|p| p.get("name").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    let ctx = ValidationContext::at("composites");
    for (i, comp_value) in composites.iter().enumerate() {
        let comp_ctx = ctx.child_index(i);
        let Some(comp) = comp_value.as_object() else {
            report.add_error(comp_ctx.path, "Each composite must be a mapping");
            continue;
        };

        if !comp.contains_key("name") {
            report.add_error(comp_ctx.child("name").path, "Missing required field 'name'");
        }

        match comp.get("requires") {
            None => report.add_error(
                comp_ctx.child("requires").path,
                "Missing required field 'requires'",
            ),
            Some(requires) => match requires.as_array() {
                None => report.add_error(
                    comp_ctx.child("requires").path,
                    "Must be a list of parameter names",
                ),
                Some(entries) => {
                    // A composite may draw on a parameter defined in another
                    // model, so an unknown reference is only a warning.
                    for entry in entries {
                        let known = entry.as_str().is_some_and(|name| declared.contains(name));
                        if !known {
                            report.add_warning(
                                comp_ctx.child("requires").path.clone(),
                                format!(
                                    "Required parameter '{}' not defined in parameters section",
                                    value_display(entry)
                                ),
                            );
                        }
                    }
                }
            },
        }
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

fn optional_string(obj: &Map<String, Value>, path: &str, report: &mut Report) {
    let field = path.rsplit('.').next().unwrap_or(path);
    if let Some(value) = obj.get(field) {
        if !value.is_string() {
            report.add_error(path.to_string(), "Must be a string");
        }
    }
}

fn optional_bool(obj: &Map<String, Value>, path: &str, report: &mut Report) {
    let field = path.rsplit('.').next().unwrap_or(path);
    if let Some(value) = obj.get(field) {
        if !value.is_boolean() {
            report.add_error(path.to_string(), "Must be a boolean (true/false)");
        }
    }
}
