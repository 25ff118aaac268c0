//! Unit tests for model configuration validation
//!
//! Exercises section presence, conditional source/grid rules, schedule
//! bounds, nested parameter/level checks, and composite cross-references.

use serde_json::{json, Value};
use wxmap_schemas::validate_model_config;

fn valid_model() -> Value {
    json!({
        "model": {
            "id": "hrrr",
            "name": "HRRR",
            "description": "High-Resolution Rapid Refresh",
            "enabled": true
        },
        "dimensions": {"type": "forecast", "run": true, "forecast": true},
        "source": {"type": "aws_s3", "bucket": "noaa-hrrr-bdp-pds", "region": "us-east-1"},
        "grid": {
            "projection": "lambert_conformal",
            "bbox": {"min_lon": -134.1, "min_lat": 21.1, "max_lon": -60.9, "max_lat": 52.6}
        },
        "schedule": {
            "cycles": [0, 6, 12, 18],
            "forecast_hours": {"start": 0, "end": 48},
            "poll_interval_secs": 300
        },
        "retention": {"hours": 36},
        "parameters": [
            {
                "name": "TMP",
                "levels": [{"type": "height_above_ground", "value": 2}],
                "style": "temperature",
                "units": "K",
                "conversion": "K_to_F"
            },
            {
                "name": "REFC",
                "levels": [{"type": "entire_atmosphere", "value": 0}],
                "style": "reflectivity"
            }
        ],
        "composites": [
            {"name": "wind_combined", "requires": ["TMP", "REFC"]}
        ]
    })
}

mod section_presence {
    use super::*;

    #[test]
    fn test_fully_populated_model_is_clean() {
        let report = validate_model_config(&valid_model());
        assert!(report.is_valid(), "unexpected issues: {:?}", report.issues());
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn test_each_required_section_reported() {
        let report = validate_model_config(&json!({}));
        let error_paths: Vec<_> = report.errors().map(|e| e.path.as_str()).collect();
        for section in ["model", "source", "grid", "schedule", "parameters"] {
            assert!(
                error_paths.contains(&section),
                "expected an error for missing section {section}"
            );
        }
        // Recommended sections only warn.
        let warning_paths: Vec<_> = report.warnings().map(|w| w.path.as_str()).collect();
        assert!(warning_paths.contains(&"dimensions"));
        assert!(warning_paths.contains(&"retention"));
    }

    #[test]
    fn test_missing_parameters_is_exactly_one_error() {
        let mut doc = valid_model();
        doc.as_object_mut().unwrap().remove("parameters");
        let report = validate_model_config(&doc);
        let parameter_errors: Vec<_> = report
            .errors()
            .filter(|e| e.path.starts_with("parameters"))
            .collect();
        assert_eq!(parameter_errors.len(), 1);
        assert_eq!(
            parameter_errors[0].message,
            "Missing required section 'parameters'"
        );
    }
}

mod model_section {
    use super::*;

    #[test]
    fn test_id_pattern_enforced() {
        let mut doc = valid_model();
        doc["model"]["id"] = json!("HRRR-3km");
        let report = validate_model_config(&doc);
        assert!(report
            .errors()
            .any(|e| e.path == "model.id" && e.message.contains("lowercase")));
    }

    #[test]
    fn test_enabled_must_be_boolean() {
        let mut doc = valid_model();
        doc["model"]["enabled"] = json!("yes");
        let report = validate_model_config(&doc);
        assert!(report
            .errors()
            .any(|e| e.path == "model.enabled" && e.message.contains("boolean")));
    }
}

mod source_section {
    use super::*;

    #[test]
    fn test_s3_source_requires_bucket() {
        let mut doc = valid_model();
        doc["source"] = json!({"type": "aws_s3_grib2"});
        let report = validate_model_config(&doc);
        assert!(report
            .errors()
            .any(|e| e.path == "source.bucket" && e.message.contains("'bucket'")));
        assert!(report
            .warnings()
            .any(|w| w.path == "source.region" && w.message.contains("us-east-1")));
    }

    #[test]
    fn test_local_source_needs_no_bucket() {
        let mut doc = valid_model();
        doc["source"] = json!({"type": "local", "path": "/data/radar"});
        let report = validate_model_config(&doc);
        assert!(report.is_valid());
    }

    #[test]
    fn test_unknown_source_type() {
        let mut doc = valid_model();
        doc["source"]["type"] = json!("ftp");
        let report = validate_model_config(&doc);
        assert!(report
            .errors()
            .any(|e| e.path == "source.type" && e.message.contains("Invalid type 'ftp'")));
    }
}

mod grid_section {
    use super::*;

    #[test]
    fn test_bbox_lon_ordering() {
        let mut doc = valid_model();
        doc["grid"]["bbox"] = json!({"min_lon": 10, "max_lon": 5, "min_lat": 0, "max_lat": 10});
        let report = validate_model_config(&doc);
        let messages: Vec<_> = report.errors().map(|e| e.message.as_str()).collect();
        assert!(messages.contains(&"min_lon must be less than max_lon"));
    }

    #[test]
    fn test_ordered_bbox_is_clean() {
        let mut doc = valid_model();
        doc["grid"]["bbox"] = json!({"min_lon": 5, "max_lon": 10, "min_lat": 0, "max_lat": 10});
        let report = validate_model_config(&doc);
        assert!(report.is_valid(), "unexpected issues: {:?}", report.issues());
    }

    #[test]
    fn test_bbox_missing_corner() {
        let mut doc = valid_model();
        doc["grid"]["bbox"] = json!({"min_lon": -10, "max_lon": 10, "min_lat": 0});
        let report = validate_model_config(&doc);
        assert!(report
            .errors()
            .any(|e| e.path == "grid.bbox.max_lat" && e.message.contains("'max_lat'")));
    }

    #[test]
    fn test_geostationary_requires_projection_params() {
        let mut doc = valid_model();
        doc["grid"] = json!({"projection": "geostationary"});
        let report = validate_model_config(&doc);
        assert!(report
            .errors()
            .any(|e| e.path == "grid.projection_params"));

        doc["grid"]["projection_params"] = json!({"satellite_height": 35786023.0});
        let report = validate_model_config(&doc);
        assert!(report.is_valid());
    }
}

mod schedule_section {
    use super::*;

    #[test]
    fn test_cycle_hours_bounded() {
        let mut doc = valid_model();
        doc["schedule"]["cycles"] = json!([0, 6, 24, -1]);
        let report = validate_model_config(&doc);
        let cycle_errors: Vec<_> = report
            .errors()
            .filter(|e| e.path.starts_with("schedule.cycles["))
            .collect();
        assert_eq!(cycle_errors.len(), 2);
        assert_eq!(cycle_errors[0].path, "schedule.cycles[2]");
        assert_eq!(cycle_errors[1].path, "schedule.cycles[3]");
    }

    #[test]
    fn test_forecast_hours_mapping_requires_start_and_end() {
        let mut doc = valid_model();
        doc["schedule"]["forecast_hours"] = json!({"start": 0});
        let report = validate_model_config(&doc);
        assert!(report
            .errors()
            .any(|e| e.path == "schedule.forecast_hours.end"));
    }

    #[test]
    fn test_forecast_hours_start_before_end() {
        let mut doc = valid_model();
        doc["schedule"]["forecast_hours"] = json!({"start": 48, "end": 0});
        let report = validate_model_config(&doc);
        assert!(report
            .errors()
            .any(|e| e.message == "start must be less than end"));
    }

    #[test]
    fn test_forecast_hours_list_form_accepted() {
        let mut doc = valid_model();
        doc["schedule"]["forecast_hours"] = json!([0, 1, 2, 3, 6, 12]);
        let report = validate_model_config(&doc);
        assert!(report.is_valid());
    }

    #[test]
    fn test_observation_schedule_skips_cycles() {
        let mut doc = valid_model();
        doc["dimensions"] = json!({"type": "observation", "time": true});
        doc["schedule"] = json!({"type": "observation", "cycles": "n/a", "poll_interval_secs": 60});
        let report = validate_model_config(&doc);
        assert!(report.is_valid(), "unexpected issues: {:?}", report.issues());
    }

    #[test]
    fn test_poll_interval_positive() {
        let mut doc = valid_model();
        doc["schedule"]["poll_interval_secs"] = json!(0);
        let report = validate_model_config(&doc);
        assert!(report
            .errors()
            .any(|e| e.path == "schedule.poll_interval_secs"));
    }
}

mod parameters_section {
    use super::*;

    #[test]
    fn test_empty_parameters_list() {
        let mut doc = valid_model();
        doc["parameters"] = json!([]);
        let report = validate_model_config(&doc);
        assert!(report
            .errors()
            .any(|e| e.message == "Must have at least one parameter defined"));
    }

    #[test]
    fn test_level_needs_value_or_values() {
        let mut doc = valid_model();
        doc["parameters"] = json!([
            {"name": "TMP", "levels": [{"type": "surface"}]}
        ]);
        let report = validate_model_config(&doc);
        assert!(report
            .errors()
            .any(|e| e.path == "parameters[0].levels[0]"
                && e.message == "Must have either 'value' or 'values'"));
    }

    #[test]
    fn test_empty_values_list_rejected() {
        let mut doc = valid_model();
        doc["parameters"][0]["levels"] = json!([{"type": "isobaric", "values": []}]);
        let report = validate_model_config(&doc);
        assert!(report
            .errors()
            .any(|e| e.path == "parameters[0].levels[0].values"
                && e.message == "Must have at least one value"));
    }

    #[test]
    fn test_unknown_level_type_warns() {
        let mut doc = valid_model();
        doc["parameters"][0]["levels"] = json!([{"type": "sigma", "value": 0.995}]);
        let report = validate_model_config(&doc);
        assert!(report.is_valid());
        assert!(report
            .warnings()
            .any(|w| w.path == "parameters[0].levels[0].type"
                && w.message.contains("Unknown level type 'sigma'")));
    }

    #[test]
    fn test_unknown_style_and_conversion_warn() {
        let mut doc = valid_model();
        doc["parameters"][0]["style"] = json!("neon");
        doc["parameters"][0]["conversion"] = json!("K_to_R");
        let report = validate_model_config(&doc);
        assert!(report.is_valid());
        assert_eq!(report.warning_count(), 2);
    }

    #[test]
    fn test_duplicate_parameter_names_are_not_flagged() {
        let mut doc = valid_model();
        doc["parameters"] = json!([
            {"name": "TMP", "levels": [{"type": "surface", "value": 0}]},
            {"name": "TMP", "levels": [{"type": "isobaric", "values": [850, 700, 500]}]}
        ]);
        let report = validate_model_config(&doc);
        assert!(report.is_valid());
        assert_eq!(report.warning_count(), 0);
    }
}

mod composites_section {
    use super::*;

    #[test]
    fn test_unknown_requirement_is_warning() {
        let mut doc = valid_model();
        doc["composites"] = json!([{"name": "combo", "requires": ["TMP", "UGRD"]}]);
        let report = validate_model_config(&doc);
        assert!(report.is_valid());
        assert!(report
            .warnings()
            .any(|w| w.message.contains("'UGRD' not defined in parameters section")));
    }

    #[test]
    fn test_composite_requires_name_and_requires() {
        let mut doc = valid_model();
        doc["composites"] = json!([{}]);
        let report = validate_model_config(&doc);
        assert!(report.errors().any(|e| e.path == "composites[0].name"));
        assert!(report.errors().any(|e| e.path == "composites[0].requires"));
    }
}

mod dimensions_section {
    use super::*;

    #[test]
    fn test_forecast_model_with_time_axis_warns() {
        let mut doc = valid_model();
        doc["dimensions"] = json!({"type": "forecast", "time": true});
        let report = validate_model_config(&doc);
        assert!(report.is_valid());
        assert!(report.warnings().any(|w| w.path == "dimensions.time"));
    }

    #[test]
    fn test_observation_model_with_run_axis_warns() {
        let mut doc = valid_model();
        doc["dimensions"] = json!({"type": "observation", "run": true});
        doc["schedule"] = json!({"type": "observation"});
        let report = validate_model_config(&doc);
        assert!(report
            .warnings()
            .any(|w| w.path == "dimensions.run/forecast"));
    }

    #[test]
    fn test_dimension_flags_must_be_boolean() {
        let mut doc = valid_model();
        doc["dimensions"]["elevation"] = json!("yes");
        let report = validate_model_config(&doc);
        assert!(report.errors().any(|e| e.path == "dimensions.elevation"));
    }
}

#[test]
fn test_validation_is_idempotent() {
    let mut doc = valid_model();
    doc["grid"]["bbox"] = json!({"min_lon": 10, "max_lon": 5});
    doc["parameters"][1]["style"] = json!("mystery");

    let first = validate_model_config(&doc);
    let second = validate_model_config(&doc);
    assert_eq!(first.issues(), second.issues());
}
