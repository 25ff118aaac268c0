//! Sequential crawl of an EDR API's advertised products
//!
//! For every collection the endpoint lists, fetch its parameter/level/time
//! extents and issue one query per parameter×level combination, saving each
//! response under the output tree. Progress is printed as the crawl runs,
//! exactly one request in flight at a time.

use crate::client::EdrClient;
use crate::error::{Error, Result};
use crate::report;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::io::Write as _;
use std::path::PathBuf;
use tracing::debug;

/// Test coordinates used for position and area queries (center of CONUS)
const TEST_POINT: (f64, f64) = (-100.0, 40.0);

/// Which EDR query family to exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    Position,
    Area,
    Locations,
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryType::Position => write!(f, "position"),
            QueryType::Area => write!(f, "area"),
            QueryType::Locations => write!(f, "locations"),
        }
    }
}

/// Which response encodings to request and save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    Covjson,
    Geojson,
    Both,
}

impl DumpFormat {
    fn includes_covjson(self) -> bool {
        matches!(self, DumpFormat::Covjson | DumpFormat::Both)
    }

    fn includes_geojson(self) -> bool {
        matches!(self, DumpFormat::Geojson | DumpFormat::Both)
    }
}

impl fmt::Display for DumpFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DumpFormat::Covjson => write!(f, "covjson"),
            DumpFormat::Geojson => write!(f, "geojson"),
            DumpFormat::Both => write!(f, "both"),
        }
    }
}

/// Configuration for one dump run
#[derive(Debug, Clone)]
pub struct DumpConfig {
    /// EDR API endpoint, e.g. `http://localhost:8083/edr`
    pub endpoint: String,
    /// Root of the output tree
    pub output_dir: PathBuf,
    pub query_type: QueryType,
    /// Explicit location id for `locations` queries; the first advertised
    /// location is used when unset
    pub location_id: Option<String>,
    /// Maximum queries per collection
    pub limit: Option<usize>,
    pub format: DumpFormat,
}

/// One recorded query failure
#[derive(Debug, Clone, Serialize)]
pub struct QueryFailure {
    pub collection: String,
    pub param: String,
    pub error: String,
}

/// Running counters for the crawl
#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    pub total: usize,
    pub success: usize,
    pub empty: usize,
    pub failed: usize,
    pub errors: Vec<QueryFailure>,
}

/// Per-query record written to `results.json`
#[derive(Debug, Clone, Serialize)]
pub struct QueryRecord {
    pub collection: String,
    pub parameter: String,
    pub level: Option<f64>,
    pub time: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub covjson_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geojson_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_null_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Drives a full dump run against one endpoint
pub struct ProductDumper {
    config: DumpConfig,
    client: EdrClient,
    stats: Stats,
    results: Vec<QueryRecord>,
}

impl ProductDumper {
    pub fn new(config: DumpConfig) -> Result<Self> {
        let client = EdrClient::new(&config.endpoint)?;
        Ok(Self {
            config,
            client,
            stats: Stats::default(),
            results: Vec::new(),
        })
    }

    /// Counters for the run so far
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Run the crawl to completion and write the summary files.
    ///
    /// Per-query failures never abort the run; only an unwritable output
    /// tree does.
    pub async fn run(&mut self) -> Result<()> {
        println!("{}", "=".repeat(60));
        println!("EDR Product Dump");
        println!("{}", "=".repeat(60));
        println!("Endpoint:    {}", self.config.endpoint);
        println!("Output:      {}", self.config.output_dir.display());
        println!("Query type:  {}", self.config.query_type);
        println!("Format:      {}", self.config.format);
        println!();

        for subdir in ["covjson", "geojson", "metadata"] {
            let path = self.config.output_dir.join(subdir);
            std::fs::create_dir_all(&path)
                .map_err(|e| Error::output(path.display().to_string(), e))?;
        }

        let collections = match self.client.collections().await {
            Ok(data) => {
                self.write_metadata("collections.json", &data)?;
                data.get("collections")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default()
            }
            Err(e) => {
                println!("ERROR fetching collections: {e}");
                Vec::new()
            }
        };

        if collections.is_empty() {
            println!("ERROR: No collections found");
            return Ok(());
        }

        println!("Found {} collections", collections.len());

        for coll in &collections {
            self.process_collection(coll).await?;
        }

        report::write_summary_text(
            &self.config.output_dir,
            &self.config.endpoint,
            self.config.query_type,
            &self.stats,
        )?;
        report::write_results_json(
            &self.config.output_dir,
            &self.config.endpoint,
            self.config.query_type,
            &self.stats,
            &self.results,
        )?;
        report::write_index_html(&self.config.output_dir)?;

        println!();
        println!("{}", "=".repeat(60));
        println!("Summary");
        println!("{}", "=".repeat(60));
        println!("Total queries:  {}", self.stats.total);
        println!("Success:        {}", self.stats.success);
        println!("Empty:          {}", self.stats.empty);
        println!("Failed:         {}", self.stats.failed);
        println!();
        println!("Results saved to: {}", self.config.output_dir.display());

        Ok(())
    }

    async fn process_collection(&mut self, coll: &Value) -> Result<()> {
        let coll_id = coll
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        println!();
        println!("Processing: {coll_id}");
        println!("{}", "-".repeat(40));

        let detail = match self.client.collection(&coll_id).await {
            Ok(detail) => detail,
            Err(e) => {
                println!("  ERROR fetching collection details: {e}");
                return Ok(());
            }
        };
        self.write_metadata(&format!("{coll_id}.json"), &detail)?;

        let params: Vec<String> = detail
            .get("parameter_names")
            .and_then(Value::as_object)
            .map(|names| names.keys().cloned().collect())
            .unwrap_or_default();
        if params.is_empty() {
            println!("  No parameters found, skipping");
            return Ok(());
        }

        let levels = extract_levels(&detail);
        let latest_time = detail
            .pointer("/extent/temporal/values/0")
            .and_then(Value::as_str)
            .map(String::from);

        println!("  Parameters: {}", params.len());
        if levels.is_empty() {
            println!("  Levels: none");
        } else {
            println!("  Levels: {}", levels.len());
        }
        println!(
            "  Latest time: {}",
            latest_time.as_deref().unwrap_or("none")
        );

        for subdir in ["covjson", "geojson"] {
            let path = self.config.output_dir.join(subdir).join(&coll_id);
            std::fs::create_dir_all(&path)
                .map_err(|e| Error::output(path.display().to_string(), e))?;
        }

        let location_id = match self.config.query_type {
            QueryType::Locations => match &self.config.location_id {
                Some(id) => Some(id.clone()),
                None => {
                    let found = self.fetch_first_location(&coll_id).await;
                    if found.is_none() {
                        println!("  No locations available, skipping");
                        return Ok(());
                    }
                    found
                }
            },
            _ => None,
        };

        let level_slots: Vec<Option<f64>> = if levels.is_empty() {
            vec![None]
        } else {
            levels.into_iter().map(Some).collect()
        };

        let mut query_count = 0usize;
        for param in &params {
            for level in &level_slots {
                if self.config.limit.is_some_and(|limit| query_count >= limit) {
                    println!(
                        "  Reached limit of {} queries",
                        self.config.limit.unwrap_or_default()
                    );
                    return Ok(());
                }
                self.query_product(
                    &coll_id,
                    param,
                    *level,
                    latest_time.as_deref(),
                    location_id.as_deref(),
                )
                .await;
                query_count += 1;
            }
        }

        Ok(())
    }

    /// First advertised location id for a collection, with any
    /// `/locations/` URI prefix stripped.
    async fn fetch_first_location(&self, coll_id: &str) -> Option<String> {
        match self.client.locations(coll_id).await {
            Ok(data) => {
                let raw_id = data
                    .pointer("/features/0/id")
                    .and_then(Value::as_str)?
                    .to_string();
                match raw_id.rsplit_once("/locations/") {
                    Some((_, id)) => Some(id.to_string()),
                    None => Some(raw_id),
                }
            }
            Err(e) => {
                println!("  Warning: Could not fetch locations: {e}");
                None
            }
        }
    }

    async fn query_product(
        &mut self,
        coll_id: &str,
        param: &str,
        level: Option<f64>,
        time: Option<&str>,
        location_id: Option<&str>,
    ) {
        self.stats.total += 1;

        let filename = product_filename(param, level);
        let (path, mut query_params) = self.build_query(coll_id, location_id);
        query_params.push(("parameter-name".to_string(), param.to_string()));
        if let Some(level) = level {
            query_params.push(("z".to_string(), level_tag(level)));
        }
        if let Some(time) = time {
            query_params.push(("datetime".to_string(), time.to_string()));
        }

        match level {
            Some(level) => print!("  {param} @ z={}... ", level_tag(level)),
            None => print!("  {param}... "),
        }
        let _ = std::io::stdout().flush();

        let mut record = QueryRecord {
            collection: coll_id.to_string(),
            parameter: param.to_string(),
            level,
            time: time.map(String::from),
            status: "unknown".to_string(),
            covjson_url: None,
            geojson_url: None,
            value_count: None,
            non_null_count: None,
            feature_count: None,
            error: None,
        };

        if self.config.format.includes_covjson() {
            self.query_one_format(&path, &query_params, false, coll_id, param, &filename, &mut record)
                .await;
        }
        if self.config.format.includes_geojson() {
            let mut geojson_params = query_params.clone();
            geojson_params.push(("f".to_string(), "geojson".to_string()));
            self.query_one_format(&path, &geojson_params, true, coll_id, param, &filename, &mut record)
                .await;
        }

        // A covjson response classifies the product; a geojson-only run
        // falls back to the feature count.
        if record.status == "unknown" {
            record.status = match record.feature_count {
                Some(n) if n > 0 => "success".to_string(),
                Some(_) => "empty".to_string(),
                None => "failed".to_string(),
            };
        }

        match record.status.as_str() {
            "success" => {
                self.stats.success += 1;
                match record.non_null_count {
                    Some(n) => println!("OK ({n} values)"),
                    None => println!("OK ({} features)", record.feature_count.unwrap_or(0)),
                }
            }
            "empty" => {
                self.stats.empty += 1;
                println!("EMPTY");
            }
            _ => {
                self.stats.failed += 1;
                println!(
                    "FAILED: {}",
                    record.error.as_deref().unwrap_or("unknown")
                );
            }
        }

        self.results.push(record);
    }

    #[allow(clippy::too_many_arguments)]
    async fn query_one_format(
        &mut self,
        path: &str,
        params: &[(String, String)],
        geojson: bool,
        coll_id: &str,
        param: &str,
        filename: &str,
        record: &mut QueryRecord,
    ) {
        let fmt_dir = if geojson { "geojson" } else { "covjson" };
        let output_file = self
            .config
            .output_dir
            .join(fmt_dir)
            .join(coll_id)
            .join(format!("{filename}.json"));

        match self.client.fetch_product(path, params).await {
            Ok(outcome) => {
                if geojson {
                    record.geojson_url = Some(outcome.url.clone());
                } else {
                    record.covjson_url = Some(outcome.url.clone());
                }

                if outcome.status.is_success() {
                    match serde_json::from_str::<Value>(&outcome.body) {
                        Ok(data) => {
                            let pretty = serde_json::to_string_pretty(&data)
                                .unwrap_or(outcome.body);
                            if let Err(e) = std::fs::write(&output_file, pretty) {
                                debug!("could not write {}: {e}", output_file.display());
                            }

                            if geojson {
                                let features = data
                                    .get("features")
                                    .and_then(Value::as_array)
                                    .map(Vec::len)
                                    .unwrap_or(0);
                                record.feature_count = Some(features);
                            } else {
                                let values = data
                                    .pointer(&format!("/ranges/{param}/values"))
                                    .and_then(Value::as_array)
                                    .cloned()
                                    .unwrap_or_default();
                                let non_null =
                                    values.iter().filter(|v| !v.is_null()).count();
                                record.value_count = Some(values.len());
                                record.non_null_count = Some(non_null);
                                record.status = if non_null > 0 {
                                    "success".to_string()
                                } else {
                                    "empty".to_string()
                                };
                            }
                        }
                        Err(e) => {
                            record.status = "failed".to_string();
                            record.error = Some(format!("invalid JSON response: {e}"));
                            self.stats.errors.push(QueryFailure {
                                collection: coll_id.to_string(),
                                param: param.to_string(),
                                error: format!("invalid JSON response: {e}"),
                            });
                        }
                    }
                } else {
                    record.status = "failed".to_string();
                    record.error = Some(format!("HTTP {}", outcome.status.as_u16()));
                    if let Err(e) = std::fs::write(&output_file, &outcome.body) {
                        debug!("could not write {}: {e}", output_file.display());
                    }
                }
            }
            Err(e) => {
                record.status = "failed".to_string();
                record.error = Some(e.to_string());
                self.stats.errors.push(QueryFailure {
                    collection: coll_id.to_string(),
                    param: param.to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    /// Query path and coordinate parameters for the configured query type
    fn build_query(
        &self,
        coll_id: &str,
        location_id: Option<&str>,
    ) -> (String, Vec<(String, String)>) {
        let (lon, lat) = TEST_POINT;
        match self.config.query_type {
            QueryType::Locations if location_id.is_some() => (
                format!(
                    "collections/{coll_id}/locations/{}",
                    location_id.unwrap_or_default()
                ),
                Vec::new(),
            ),
            QueryType::Area => (
                format!("collections/{coll_id}/area"),
                vec![("coords".to_string(), area_polygon(lon, lat))],
            ),
            _ => (
                format!("collections/{coll_id}/position"),
                vec![("coords".to_string(), format!("POINT({lon} {lat})"))],
            ),
        }
    }

    fn write_metadata(&self, name: &str, data: &Value) -> Result<()> {
        let path = self.config.output_dir.join("metadata").join(name);
        let pretty = serde_json::to_string_pretty(data)?;
        std::fs::write(&path, pretty).map_err(|e| Error::output(path.display().to_string(), e))
    }
}

/// Vertical levels advertised by a collection: the lower bound of each
/// vertical interval, deduplicated and sorted.
fn extract_levels(detail: &Value) -> Vec<f64> {
    let mut levels: Vec<f64> = detail
        .pointer("/extent/vertical/interval")
        .and_then(Value::as_array)
        .map(|intervals| {
            intervals
                .iter()
                .filter_map(|interval| interval.get(0))
                .filter_map(Value::as_f64)
                .collect()
        })
        .unwrap_or_default();
    levels.sort_by(f64::total_cmp);
    levels.dedup();
    levels
}

/// Output filename stem for a product: `{param}` or `{param}_z{level}`
fn product_filename(param: &str, level: Option<f64>) -> String {
    match level {
        Some(level) => format!("{param}_z{}", level_tag(level)),
        None => param.to_string(),
    }
}

/// Render a level value the way it appears in the API: integral levels
/// without a trailing `.0`.
fn level_tag(level: f64) -> String {
    if level.fract() == 0.0 {
        format!("{}", level as i64)
    } else {
        format!("{level}")
    }
}

/// 1°x1° WKT polygon centered on the test point
fn area_polygon(lon: f64, lat: f64) -> String {
    format!(
        "POLYGON(({} {},{} {},{} {},{} {},{} {}))",
        lon - 0.5,
        lat - 0.5,
        lon + 0.5,
        lat - 0.5,
        lon + 0.5,
        lat + 0.5,
        lon - 0.5,
        lat + 0.5,
        lon - 0.5,
        lat - 0.5,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_levels_dedupes_and_sorts() {
        let detail = json!({
            "extent": {
                "vertical": {
                    "interval": [[850.0, 850.0], [500.0, 500.0], [850.0, 850.0], [null, null]]
                }
            }
        });
        assert_eq!(extract_levels(&detail), vec![500.0, 850.0]);
    }

    #[test]
    fn test_extract_levels_without_vertical_extent() {
        assert!(extract_levels(&json!({"extent": {}})).is_empty());
    }

    #[test]
    fn test_product_filename() {
        assert_eq!(product_filename("TMP", None), "TMP");
        assert_eq!(product_filename("TMP", Some(850.0)), "TMP_z850");
        assert_eq!(product_filename("TMP", Some(0.995)), "TMP_z0.995");
    }

    #[test]
    fn test_area_polygon_is_closed() {
        let polygon = area_polygon(-100.0, 40.0);
        assert!(polygon.starts_with("POLYGON((-100.5 39.5,"));
        assert!(polygon.ends_with("-100.5 39.5))"));
    }
}
