// ==============================================================================
// state.rs - Application State Management
// ==============================================================================
// Description: Shared application state for the genomics API gateway
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-03-14
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use genomics_aggregator::{GenomicsClient, ProviderConfig};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Shared upstream client for all aggregation procedures
    client: GenomicsClient,
}

impl AppState {
    /// Create new application state from environment
    pub fn new() -> Result<Self> {
        let config = ProviderConfig::from_env();

        info!("Assembly/sequence provider: {}", config.ucsc_base_url);
        info!("Annotation/variant provider: {}", config.eutils_base_url);
        info!("Gene search provider: {}", config.clinical_tables_base_url);
        match &config.variant_scorer_url {
            Some(url) => info!("Variant scorer: {}", url),
            None => info!("Variant scorer: not configured (analysis endpoint disabled)"),
        }

        let client = GenomicsClient::new(config).context("Failed to build upstream client")?;

        Ok(Self {
            inner: Arc::new(AppStateInner { client }),
        })
    }

    /// Get the shared upstream client
    pub fn client(&self) -> &GenomicsClient {
        &self.inner.client
    }
}
