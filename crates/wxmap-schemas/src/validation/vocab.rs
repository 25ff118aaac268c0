//! Closed vocabularies for enumerated configuration fields
//!
//! Unknown values are not a decode failure; validators check membership at
//! runtime and report an error or warning depending on the field.
//!
//! Copyright (c) 2025 Wxmap Team
//! Licensed under the Apache-2.0 license

use regex::Regex;
use std::sync::OnceLock;

/// Dimensionality classification of a model
pub const DIMENSION_TYPES: &[&str] = &["forecast", "observation"];

/// Data source kinds a model can ingest from
pub const SOURCE_TYPES: &[&str] = &["aws_s3", "aws_s3_goes", "aws_s3_grib2", "local", "http"];

/// Grid projections
pub const PROJECTION_TYPES: &[&str] = &[
    "geographic",
    "latlon",
    "geostationary",
    "lambert_conformal",
    "mercator",
];

/// Known vertical coordinate types for parameter levels
pub const LEVEL_TYPES: &[&str] = &[
    "surface",
    "height_above_ground",
    "height_above_ground_layer",
    "isobaric",
    "mean_sea_level",
    "entire_atmosphere",
    "low_cloud_layer",
    "middle_cloud_layer",
    "high_cloud_layer",
    "cloud_top",
    "top_of_atmosphere",
    "depth_below_surface",
    "boundary_layer",
    "tropopause",
];

/// Known style names a model parameter may reference
pub const STYLE_NAMES: &[&str] = &[
    "default",
    "temperature",
    "wind",
    "precipitation",
    "humidity",
    "atmospheric",
    "cape",
    "cloud",
    "visibility",
    "reflectivity",
    "precip_rate",
    "goes_visible",
    "goes_ir",
    "wind_barbs",
    "helicity",
    "lightning",
    "smoke",
    "radar",
];

/// Known unit conversions for model parameters
pub const CONVERSIONS: &[&str] = &[
    "K_to_C",
    "K_to_F",
    "Pa_to_hPa",
    "Pa_to_mb",
    "m_to_km",
    "m_to_ft",
    "m_to_kft",
    "ms_to_kt",
    "ms_to_mph",
];

/// Rendering types a style definition may declare
pub const STYLE_TYPES: &[&str] = &[
    "gradient",
    "contour",
    "filled_contour",
    "wind_barbs",
    "wind_arrows",
    "numbers",
];

/// Value transforms applied before rendering
pub const TRANSFORM_TYPES: &[&str] = &[
    "none",
    "linear",
    "pa_to_hpa",
    "mps_to_knots",
    "k_to_c",
    "m_to_km",
];

/// Gradient interpolation modes
pub const INTERPOLATION_TYPES: &[&str] = &["linear", "step", "nearest"];

/// Behavior for values outside the declared range
pub const OUT_OF_RANGE_MODES: &[&str] = &["clamp", "extend", "transparent"];

/// Sorted, comma-joined vocabulary for issue messages
pub fn membership_list(values: &[&str]) -> String {
    let mut sorted: Vec<&str> = values.to_vec();
    sorted.sort_unstable();
    sorted.join(", ")
}

/// Pattern for model identifiers: lowercase alphanumeric with underscores,
/// starting with a letter.
pub fn model_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z][a-z0-9_]*$").unwrap())
}

/// Pattern for `#RRGGBB` / `#RRGGBBAA` hex colors
pub fn hex_color_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}([0-9A-Fa-f]{2})?$").unwrap())
}
