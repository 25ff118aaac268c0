//! Summary artifacts written at the end of a dump run
//!
//! Three views of the same results: a plain-text summary for the terminal
//! or CI logs, a machine-readable `results.json`, and a static `index.html`
//! that renders `results.json` in a browser when the output tree is served
//! over HTTP.

use crate::dump::{QueryRecord, QueryType, Stats};
use crate::error::{Error, Result};
use serde_json::json;
use std::fmt::Write as _;
use std::path::Path;

/// Cap on errors listed in the text summary; the full list is in results.json
const SUMMARY_ERROR_LIMIT: usize = 20;

/// Write `summary.txt`
pub fn write_summary_text(
    dir: &Path,
    endpoint: &str,
    query_type: QueryType,
    stats: &Stats,
) -> Result<()> {
    let mut text = String::new();
    let _ = writeln!(text, "EDR Product Dump Summary");
    let _ = writeln!(text, "{}", "=".repeat(40));
    let _ = writeln!(text, "Endpoint: {endpoint}");
    let _ = writeln!(text, "Timestamp: {}", chrono::Local::now().to_rfc3339());
    let _ = writeln!(text, "Query type: {query_type}");
    let _ = writeln!(text);
    let _ = writeln!(text, "Total queries:  {}", stats.total);
    let _ = writeln!(text, "Success:        {}", stats.success);
    let _ = writeln!(text, "Empty:          {}", stats.empty);
    let _ = writeln!(text, "Failed:         {}", stats.failed);

    if !stats.errors.is_empty() {
        let _ = writeln!(text);
        let _ = writeln!(text, "Errors:");
        for failure in stats.errors.iter().take(SUMMARY_ERROR_LIMIT) {
            let _ = writeln!(
                text,
                "  {}/{}: {}",
                failure.collection, failure.param, failure.error
            );
        }
    }

    let path = dir.join("summary.txt");
    std::fs::write(&path, text).map_err(|e| Error::output(path.display().to_string(), e))
}

/// Write `results.json` with the run configuration, counters, and the full
/// per-query record list
pub fn write_results_json(
    dir: &Path,
    endpoint: &str,
    query_type: QueryType,
    stats: &Stats,
    results: &[QueryRecord],
) -> Result<()> {
    let document = json!({
        "endpoint": endpoint,
        "timestamp": chrono::Local::now().to_rfc3339(),
        "query_type": query_type.to_string(),
        "stats": stats,
        "results": results,
    });

    let path = dir.join("results.json");
    let pretty = serde_json::to_string_pretty(&document)?;
    std::fs::write(&path, pretty).map_err(|e| Error::output(path.display().to_string(), e))
}

/// Write the static `index.html` viewer next to `results.json`
pub fn write_index_html(dir: &Path) -> Result<()> {
    let path = dir.join("index.html");
    std::fs::write(&path, include_str!("../assets/index.html"))
        .map_err(|e| Error::output(path.display().to_string(), e))
}
