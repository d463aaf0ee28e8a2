// ==============================================================================
// client.rs - Upstream HTTP Client
// ==============================================================================
// Description: Shared reqwest client for the genomics data providers
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-03-14
// Version: 1.0.0
// ==============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::AggregatorError;

/// Upstream request timeout. Third-party providers can stall; the caller
/// must never hang longer than this per outbound call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Cap on upstream error bodies echoed into error messages.
const MAX_ERROR_BODY_LEN: usize = 512;

/// Shared client for all upstream providers.
///
/// Holds one connection-pooled `reqwest::Client` plus the immutable provider
/// configuration. Procedures are stateless; cloning is cheap and every call
/// builds its result fresh from upstream JSON.
#[derive(Debug, Clone)]
pub struct GenomicsClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl GenomicsClient {
    /// Build the shared client with default JSON headers and a bounded
    /// request timeout.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("genomics-aggregator/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build upstream HTTP client")?;

        Ok(Self { http, config })
    }

    /// Provider configuration this client was built with.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// GET a JSON document and parse it into `T`.
    ///
    /// Transport failures and non-success statuses raise `Upstream`; a body
    /// that does not parse as `T` raises `Validation` with the serde detail
    /// (which names the offending field).
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        provider: &'static str,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, AggregatorError> {
        debug!("GET {} ({})", url, provider);

        let mut request = self.http.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AggregatorError::upstream(provider, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AggregatorError::upstream(
                provider,
                format!("unexpected status {status}: {}", truncate(&body)),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AggregatorError::upstream(provider, e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| AggregatorError::validation(provider, e.to_string()))
    }

    /// POST a JSON body and parse the JSON response into `T`.
    ///
    /// On a non-success status the response body is captured into the
    /// `Upstream` error so scorer-side failure detail reaches the caller.
    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        provider: &'static str,
        url: &str,
        body: &B,
    ) -> Result<T, AggregatorError> {
        debug!("POST {} ({})", url, provider);

        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AggregatorError::upstream(provider, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AggregatorError::upstream(
                provider,
                format!("unexpected status {status}: {}", truncate(&body)),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AggregatorError::upstream(provider, e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| AggregatorError::validation(provider, e.to_string()))
    }
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(MAX_ERROR_BODY_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
