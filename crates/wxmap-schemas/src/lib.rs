//! Wxmap Schemas - validators for WMS configuration documents
//!
//! This crate validates the three document kinds that make up a wxmap
//! configuration tree:
//! - **Model configs**: per-model YAML descriptors (identity, source, grid,
//!   schedule, retention, parameters, composites)
//! - **Layer configs**: WMS layer descriptor YAML files grouped by model
//! - **Style documents**: cartographic style JSON (gradients, contours,
//!   wind rendering, number overlays)
//!
//! Documents are loaded into a raw [`serde_json::Value`] first and classified
//! as runtime data; enumerated fields are checked against closed
//! vocabularies rather than rejected at decode time, so a bad enum value
//! produces a readable issue instead of a parse failure.
//!
//! Issues accumulate per file - validation never stops at the first
//! violation, and warnings never make a file invalid.
//!
//! ## Quick Start
//!
//! ```rust
//! use wxmap_schemas::validation::validate_model_config;
//! use serde_json::json;
//!
//! let doc = json!({
//!     "model": {"id": "gfs", "name": "GFS"},
//!     "source": {"type": "aws_s3", "bucket": "noaa-gfs-bdp-pds", "region": "us-east-1"},
//!     "grid": {"projection": "latlon"},
//!     "schedule": {"cycles": [0, 6, 12, 18]},
//!     "parameters": [
//!         {"name": "TMP", "levels": [{"type": "isobaric", "values": [850, 500]}]}
//!     ]
//! });
//!
//! let report = validate_model_config(&doc);
//! assert!(report.is_valid());
//! ```
//!
//! Copyright (c) 2025 Wxmap Team
//! Licensed under the Apache-2.0 license

pub mod loader;
pub mod validation;

pub use loader::{load_document, Format, LoaderError};
pub use validation::{
    validate_model_config, validate_style_document, Issue, LayerFileValidator, LayerIdRegistry,
    Report, Severity, ValidationContext,
};
