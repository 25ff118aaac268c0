//! Handler for the edr-dump command

use crate::cli::EdrDumpArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use std::path::PathBuf;
use wxmap_edr::{DumpConfig, ProductDumper};

/// Crawl the EDR endpoint and dump every advertised product.
///
/// Per-request failures are recorded in the run's results, not surfaced as
/// process errors; once the crawl starts the command exits 0.
pub async fn handle_edr_dump(
    args: EdrDumpArgs,
    config: &Config,
    _output: &mut OutputWriter,
) -> Result<()> {
    let endpoint = args
        .endpoint
        .unwrap_or_else(|| config.edr.endpoint.clone());
    let output_dir = args.output.unwrap_or_else(default_output_dir);

    let dump_config = DumpConfig {
        endpoint,
        output_dir,
        query_type: args.query_type.into(),
        location_id: args.location,
        limit: args.limit,
        format: args.format.into(),
    };

    let mut dumper = ProductDumper::new(dump_config)?;
    dumper.run().await?;
    Ok(())
}

/// Timestamped default so repeated runs never clobber each other
fn default_output_dir() -> PathBuf {
    PathBuf::from(format!(
        "./edr-dump-{}",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ))
}
