//! Style document validation
//!
//! Validates cartographic style JSON: a version-tagged map of style id to
//! definition, dispatched on the declared rendering type. A single shared
//! color predicate covers every color-bearing field, and stop lists are
//! checked with one helper wherever they appear (gradients, filled contours,
//! wind speed ramps).
//!
//! Copyright (c) 2025 Wxmap Team
//! Licensed under the Apache-2.0 license

use crate::validation::context::ValidationContext;
use crate::validation::report::Report;
use crate::validation::{json_type_name, value_display, vocab};
use serde_json::{Map, Value};

/// Validate a style document.
///
/// Issues accumulate across every style in the document; there is no early
/// exit, so one run surfaces the complete defect list.
pub fn validate_style_document(doc: &Value) -> Report {
    let mut report = Report::new();

    let Some(root) = doc.as_object() else {
        report.add_error(
            "root",
            format!("Root must be object, got {}", json_type_name(doc)),
        );
        return report;
    };

    match root.get("version") {
        None => report.add_error("root", "Missing required field 'version'"),
        Some(version) if version != "1.0" => report.add_error(
            "version",
            format!("Unknown version '{}'. Expected '1.0'", value_display(version)),
        ),
        Some(_) => {}
    }

    if let Some(metadata) = root.get("metadata") {
        if !metadata.is_object() {
            report.add_error("metadata", "Metadata must be object");
        }
    }

    match root.get("styles") {
        None => report.add_error("root", "Missing required field 'styles'"),
        Some(styles_value) => match styles_value.as_object() {
            None => report.add_error(
                "styles",
                format!("Styles must be object, got {}", json_type_name(styles_value)),
            ),
            Some(styles) => {
                for (style_id, style) in styles {
                    // Keys starting with an underscore are comments.
                    if style_id.starts_with('_') {
                        continue;
                    }
                    let ctx = ValidationContext::at("styles").child(style_id);
                    validate_style(style, &ctx, &mut report);
                }
            }
        },
    }

    report
}

fn validate_style(style: &Value, ctx: &ValidationContext, report: &mut Report) {
    let Some(style) = style.as_object() else {
        report.add_error(
            ctx.path.clone(),
            format!("Style must be object, got {}", json_type_name(style)),
        );
        return;
    };

    let Some(type_value) = style.get("type") else {
        report.add_error(ctx.path.clone(), "Missing required field 'type'");
        return;
    };
    let style_type = type_value.as_str().unwrap_or_default();
    if !vocab::STYLE_TYPES.contains(&style_type) {
        report.add_error(
            ctx.child("type").path,
            format!(
                "Invalid style type '{}'. Valid types: {}",
                value_display(type_value),
                vocab::membership_list(vocab::STYLE_TYPES)
            ),
        );
        return;
    }

    // Common optional fields, uniform across all types.
    for (field, label) in [
        ("name", "Name"),
        ("description", "Description"),
        ("units", "Units"),
    ] {
        if let Some(value) = style.get(field) {
            if !value.is_string() {
                report.add_error(ctx.child(field).path, format!("{label} must be string"));
            }
        }
    }

    if let Some(transform) = style.get("transform") {
        validate_transform(transform, &ctx.child("transform"), report);
    }
    if let Some(range) = style.get("range") {
        validate_range(range, &ctx.child("range"), report);
    }
    if let Some(legend) = style.get("legend") {
        validate_legend(legend, &ctx.child("legend"), report);
    }

    match style_type {
        "gradient" | "filled_contour" => {
            validate_stop_ramp(style, style_type, ctx, report);

            if let Some(interpolation) = style.get("interpolation") {
                validate_enum_field(
                    interpolation,
                    vocab::INTERPOLATION_TYPES,
                    "interpolation",
                    &ctx.child("interpolation"),
                    report,
                );
            }
            if let Some(out_of_range) = style.get("out_of_range") {
                validate_enum_field(
                    out_of_range,
                    vocab::OUT_OF_RANGE_MODES,
                    "out_of_range",
                    &ctx.child("out_of_range"),
                    report,
                );
            }
        }
        "contour" => {
            if let Some(contour) = style.get("contour") {
                validate_contour(contour, &ctx.child("contour"), report);
            }
        }
        "wind_barbs" | "wind_arrows" => {
            if let Some(wind) = style.get("wind") {
                validate_wind(wind, &ctx.child("wind"), report);
            }
            if let Some(cbs) = style.get("color_by_speed") {
                validate_color_by_speed(cbs, &ctx.child("color_by_speed"), report);
            }
        }
        "numbers" => {
            if let Some(numbers) = style.get("numbers") {
                validate_numbers(numbers, &ctx.child("numbers"), report);
            }
        }
        _ => unreachable!("membership checked above"),
    }
}

/// Gradient and filled contour styles require a ramp of at least two stops.
fn validate_stop_ramp(
    style: &Map<String, Value>,
    style_type: &str,
    ctx: &ValidationContext,
    report: &mut Report,
) {
    match style.get("stops") {
        None => report.add_error(
            ctx.path.clone(),
            format!("Style type '{style_type}' requires 'stops' array"),
        ),
        Some(stops_value) => match stops_value.as_array() {
            None => report.add_error(ctx.child("stops").path, "Stops must be array"),
            Some(stops) if stops.len() < 2 => report.add_error(
                ctx.child("stops").path,
                "Stops must have at least 2 entries",
            ),
            Some(stops) => {
                let stops_ctx = ctx.child("stops");
                for (i, stop) in stops.iter().enumerate() {
                    validate_stop(stop, &stops_ctx.child_index(i), report);
                }
            }
        },
    }
}

fn validate_stop(stop: &Value, ctx: &ValidationContext, report: &mut Report) {
    let Some(stop) = stop.as_object() else {
        report.add_error(
            ctx.path.clone(),
            format!("Stop must be object, got {}", json_type_name(stop)),
        );
        return;
    };

    match stop.get("value") {
        None => report.add_error(ctx.path.clone(), "Missing required field 'value'"),
        Some(value) if !value.is_number() => report.add_error(
            ctx.child("value").path,
            format!("Value must be number, got {}", json_type_name(value)),
        ),
        Some(_) => {}
    }

    match stop.get("color") {
        None => report.add_error(ctx.path.clone(), "Missing required field 'color'"),
        Some(color) => validate_color(color, &ctx.child("color"), report),
    }

    if let Some(label) = stop.get("label") {
        if !label.is_string() {
            report.add_error(
                ctx.child("label").path,
                format!("Label must be string, got {}", json_type_name(label)),
            );
        }
    }
}

/// Shared color predicate: the literal `transparent`, or `#RRGGBB` /
/// `#RRGGBBAA` hex.
fn validate_color(color: &Value, ctx: &ValidationContext, report: &mut Report) {
    if color == "transparent" {
        return;
    }
    let Some(color_str) = color.as_str() else {
        report.add_error(
            ctx.path.clone(),
            format!("Color must be string, got {}", json_type_name(color)),
        );
        return;
    };
    if !vocab::hex_color_pattern().is_match(color_str) {
        report.add_error(
            ctx.path.clone(),
            format!("Invalid color format '{color_str}'. Expected #RRGGBB or #RRGGBBAA"),
        );
    }
}

fn validate_transform(transform: &Value, ctx: &ValidationContext, report: &mut Report) {
    let Some(transform) = transform.as_object() else {
        report.add_error(
            ctx.path.clone(),
            format!("Transform must be object, got {}", json_type_name(transform)),
        );
        return;
    };

    match transform.get("type") {
        None => report.add_error(ctx.path.clone(), "Missing required field 'type'"),
        Some(type_value) => {
            let known = type_value
                .as_str()
                .is_some_and(|t| vocab::TRANSFORM_TYPES.contains(&t));
            if !known {
                report.add_error(
                    ctx.child("type").path,
                    format!(
                        "Invalid transform type '{}'. Valid types: {}",
                        value_display(type_value),
                        vocab::membership_list(vocab::TRANSFORM_TYPES)
                    ),
                );
            }
        }
    }

    if transform.get("type").and_then(Value::as_str) == Some("linear") {
        if let Some(scale) = transform.get("scale") {
            if !scale.is_number() {
                report.add_error(ctx.child("scale").path, "Scale must be a number");
            }
        }
        if let Some(offset) = transform.get("offset") {
            if !offset.is_number() {
                report.add_error(ctx.child("offset").path, "Offset must be a number");
            }
        }
    }
}

fn validate_range(range: &Value, ctx: &ValidationContext, report: &mut Report) {
    let Some(range) = range.as_object() else {
        report.add_error(
            ctx.path.clone(),
            format!("Range must be object, got {}", json_type_name(range)),
        );
        return;
    };

    if let Some(min) = range.get("min") {
        if !min.is_number() {
            report.add_error(ctx.child("min").path, "Min must be a number");
        }
    }
    if let Some(max) = range.get("max") {
        if !max.is_number() {
            report.add_error(ctx.child("max").path, "Max must be a number");
        }
    }

    if let (Some(min), Some(max)) = (
        range.get("min").and_then(Value::as_f64),
        range.get("max").and_then(Value::as_f64),
    ) {
        if min >= max {
            report.add_error(
                ctx.path.clone(),
                format!("Min ({min}) must be less than max ({max})"),
            );
        }
    }
}

fn validate_legend(legend: &Value, ctx: &ValidationContext, report: &mut Report) {
    let Some(legend) = legend.as_object() else {
        report.add_error(
            ctx.path.clone(),
            format!("Legend must be object, got {}", json_type_name(legend)),
        );
        return;
    };

    if let Some(title) = legend.get("title") {
        if !title.is_string() {
            report.add_error(ctx.child("title").path, "Title must be string");
        }
    }

    if let Some(labels_value) = legend.get("labels") {
        match labels_value.as_array() {
            None => report.add_error(ctx.child("labels").path, "Labels must be array"),
            Some(labels) => {
                let labels_ctx = ctx.child("labels");
                for (i, label) in labels.iter().enumerate() {
                    if !label.is_string() {
                        report.add_error(
                            labels_ctx.child_index(i).path,
                            format!("Label must be string, got {}", json_type_name(label)),
                        );
                    }
                }
            }
        }
    }
}

fn validate_contour(contour: &Value, ctx: &ValidationContext, report: &mut Report) {
    let Some(contour) = contour.as_object() else {
        report.add_error(
            ctx.path.clone(),
            format!("Contour must be object, got {}", json_type_name(contour)),
        );
        return;
    };

    let number_fields = [
        "interval",
        "base",
        "min_value",
        "max_value",
        "line_width",
        "major_interval",
        "major_line_width",
        "label_font_size",
        "smoothing_passes",
    ];
    check_number_fields(contour, &number_fields, ctx, report);

    if let Some(line_color) = contour.get("line_color") {
        validate_color(line_color, &ctx.child("line_color"), report);
    }

    if let Some(labels) = contour.get("labels") {
        if !labels.is_boolean() {
            report.add_error(ctx.child("labels").path, "Labels must be boolean");
        }
    }
}

fn validate_wind(wind: &Value, ctx: &ValidationContext, report: &mut Report) {
    let Some(wind) = wind.as_object() else {
        report.add_error(
            ctx.path.clone(),
            format!("Wind must be object, got {}", json_type_name(wind)),
        );
        return;
    };

    let number_fields = [
        "spacing",
        "size",
        "line_width",
        "calm_threshold",
        "min_length",
        "max_length",
    ];
    check_number_fields(wind, &number_fields, ctx, report);

    if let Some(color) = wind.get("color") {
        validate_color(color, &ctx.child("color"), report);
    }

    if let Some(direction_from) = wind.get("direction_from") {
        if !direction_from.is_boolean() {
            report.add_error(
                ctx.child("direction_from").path,
                "direction_from must be boolean",
            );
        }
    }
}

fn validate_color_by_speed(cbs: &Value, ctx: &ValidationContext, report: &mut Report) {
    let Some(cbs) = cbs.as_object() else {
        report.add_error(ctx.path.clone(), "color_by_speed must be object");
        return;
    };

    if let Some(enabled) = cbs.get("enabled") {
        if !enabled.is_boolean() {
            report.add_error(ctx.child("enabled").path, "enabled must be boolean");
        }
    }

    if let Some(stops_value) = cbs.get("stops") {
        match stops_value.as_array() {
            None => report.add_error(ctx.child("stops").path, "stops must be array"),
            Some(stops) => {
                let stops_ctx = ctx.child("stops");
                for (i, stop) in stops.iter().enumerate() {
                    validate_stop(stop, &stops_ctx.child_index(i), report);
                }
            }
        }
    }

    if let Some(interpolation) = cbs.get("interpolation") {
        validate_enum_field(
            interpolation,
            vocab::INTERPOLATION_TYPES,
            "interpolation",
            &ctx.child("interpolation"),
            report,
        );
    }
}

fn validate_numbers(numbers: &Value, ctx: &ValidationContext, report: &mut Report) {
    let Some(numbers) = numbers.as_object() else {
        report.add_error(
            ctx.path.clone(),
            format!("Numbers must be object, got {}", json_type_name(numbers)),
        );
        return;
    };

    check_number_fields(numbers, &["spacing", "font_size", "decimal_places"], ctx, report);

    for field in ["font_color", "background_color"] {
        if let Some(color) = numbers.get(field) {
            validate_color(color, &ctx.child(field), report);
        }
    }
}

fn check_number_fields(
    obj: &Map<String, Value>,
    fields: &[&str],
    ctx: &ValidationContext,
    report: &mut Report,
) {
    for field in fields {
        if let Some(value) = obj.get(*field) {
            if !value.is_number() {
                report.add_error(ctx.child(field).path, "Field must be number");
            }
        }
    }
}

fn validate_enum_field(
    value: &Value,
    allowed: &[&str],
    field_name: &str,
    ctx: &ValidationContext,
    report: &mut Report,
) {
    let known = value.as_str().is_some_and(|v| allowed.contains(&v));
    if !known {
        report.add_error(
            ctx.path.clone(),
            format!(
                "Invalid {field_name} '{}'. Valid: {}",
                value_display(value),
                vocab::membership_list(allowed)
            ),
        );
    }
}
