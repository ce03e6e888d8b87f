//! HTTP search fetcher backed by `reqwest`.
//!
//! [`PixabayClient`] issues one GET per fetch against the configured endpoint and
//! maps every failure (transport, status, decode, missing `hits`) to
//! [`FetchOutcome::Failure`] after logging it.

use super::fetcher::SearchFetcher;
use super::messages::FetchOutcome;
use super::params::{Endpoint, QueryParams};
use crate::domain::error::{PixgridError, Result};
use crate::domain::SearchResponse;
use crate::Config;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::Instrument;

/// Search API client.
pub struct PixabayClient {
    client: Client,
    endpoint: Endpoint,
}

impl PixabayClient {
    /// Creates a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: Endpoint::from_config(config),
        })
    }

    /// Runs one search request and decodes the response envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the endpoint answers with a
    /// non-success status, or the body cannot be decoded.
    pub async fn search(&self, params: Option<&QueryParams>) -> Result<SearchResponse> {
        let page = params.and_then(QueryParams::page);
        let span = tracing::debug_span!("search_request", page = ?page);
        self.send_search(params).instrument(span).await
    }

    async fn send_search(&self, params: Option<&QueryParams>) -> Result<SearchResponse> {
        let url = self.endpoint.format_url(params);
        tracing::debug!(param_count = params.map_or(0, |p| p.iter().count()), "sending search request");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PixgridError::Api { status, body });
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| PixgridError::Decode(format!("failed to parse search response: {e}")))
    }
}

#[async_trait]
impl SearchFetcher for PixabayClient {
    async fn fetch(&self, params: &QueryParams) -> FetchOutcome {
        match self.search(Some(params)).await {
            Ok(SearchResponse { hits: Some(hits), total_hits, .. }) => {
                tracing::debug!(hit_count = hits.len(), total_hits, "search succeeded");
                FetchOutcome::Success(hits)
            }
            Ok(_) => {
                tracing::warn!("search response contained no hits");
                FetchOutcome::Failure("response contained no hits".to_string())
            }
            Err(e) => {
                tracing::warn!(error = %e, "search request failed");
                FetchOutcome::Failure(e.to_string())
            }
        }
    }
}

impl std::fmt::Debug for PixabayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixabayClient")
            .field("base_url", &self.endpoint.base_url)
            .field("per_page", &self.endpoint.per_page)
            .finish_non_exhaustive()
    }
}
