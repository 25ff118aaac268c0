//! Handler for the serve command
//!
//! Static file server for the WMS dashboard: every response carries
//! permissive CORS headers and OPTIONS preflights are answered with 200, so
//! the dashboard can fetch tiles and metadata from other local services.

use crate::cli::ServeArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use axum::http::{header, Method};
use axum::Router;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Serve the dashboard directory until interrupted
pub async fn handle_serve(
    args: ServeArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let port = args.port.unwrap_or(config.serve.port);
    let dir = args.dir.unwrap_or_else(|| config.serve.dir.clone());

    run_server(dir, port, output)
        .await
        .map_err(|e| Error::Serve(e.to_string()))
}

async fn run_server(dir: PathBuf, port: u16, output: &mut OutputWriter) -> anyhow::Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = Router::new()
        .fallback_service(ServeDir::new(&dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Prefer a dual-stack socket; hosts with IPv6 disabled fall back to
    // IPv4-only.
    let (listener, stack) = match TcpListener::bind(("::", port)).await {
        Ok(listener) => (listener, "IPv4+IPv6"),
        Err(e) => {
            debug!("dual-stack bind failed ({e}), falling back to IPv4");
            (TcpListener::bind(("0.0.0.0", port)).await?, "IPv4 only")
        }
    };

    output.writeln(&format!(
        "WMS dashboard running at http://localhost:{port} ({stack})"
    ))?;
    output.writeln(&format!("Serving from: {}", dir.display()))?;
    output.writeln("Press Ctrl+C to stop")?;

    axum::serve(listener, app).await?;
    Ok(())
}
