//! Thin HTTP client for an EDR endpoint
//!
//! One reqwest client, two fixed timeouts (metadata vs. product queries),
//! no retry policy. Failures are returned to the caller to record.

use crate::error::{Error, Result};
use reqwest::{Client as ReqwestClient, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Timeout for collection/location metadata requests
const METADATA_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for product queries, which can be slower on cold data
const QUERY_TIMEOUT: Duration = Duration::from_secs(60);

/// Outcome of a product query, kept raw so non-JSON error bodies can still
/// be written to disk.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Final request URL, recorded in the run results
    pub url: String,
    pub status: StatusCode,
    pub body: String,
}

/// Client for a single EDR API endpoint
pub struct EdrClient {
    http: ReqwestClient,
    endpoint: String,
}

impl EdrClient {
    /// Create a client for `endpoint` (trailing slashes are stripped)
    pub fn new(endpoint: &str) -> Result<Self> {
        let http = ReqwestClient::builder()
            .build()
            .map_err(Error::Client)?;
        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// The endpoint this client talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET `/collections`
    pub async fn collections(&self) -> std::result::Result<Value, reqwest::Error> {
        self.metadata_json(&format!("{}/collections", self.endpoint)).await
    }

    /// GET `/collections/{id}`
    pub async fn collection(&self, id: &str) -> std::result::Result<Value, reqwest::Error> {
        self.metadata_json(&format!("{}/collections/{}", self.endpoint, id)).await
    }

    /// GET `/collections/{id}/locations`
    pub async fn locations(&self, id: &str) -> std::result::Result<Value, reqwest::Error> {
        self.metadata_json(&format!("{}/collections/{}/locations", self.endpoint, id))
            .await
    }

    async fn metadata_json(&self, url: &str) -> std::result::Result<Value, reqwest::Error> {
        self.http
            .get(url)
            .timeout(METADATA_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await
    }

    /// Issue one product query. The query string is built by reqwest so
    /// coordinate strings are percent-encoded correctly.
    pub async fn fetch_product(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> std::result::Result<FetchOutcome, reqwest::Error> {
        let request = self
            .http
            .get(format!("{}/{}", self.endpoint, path.trim_start_matches('/')))
            .query(params)
            .timeout(QUERY_TIMEOUT)
            .build()?;
        let url = request.url().to_string();

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(FetchOutcome { url, status, body })
    }
}
