// ==============================================================================
// models.rs - API Data Models
// ==============================================================================
// Description: Request/response models for the genomics API gateway
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-03-14
// Version: 1.0.0
// ==============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use genomics_aggregator::models::{Chromosome, GenomeAssembly};

/// API information response
#[derive(Debug, Serialize)]
pub struct ApiInfoResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<&'static str>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Genome catalog response: organism -> assemblies
#[derive(Debug, Serialize)]
pub struct GenomeListResponse {
    pub genomes: BTreeMap<String, Vec<GenomeAssembly>>,
}

/// Chromosome listing response
#[derive(Debug, Serialize)]
pub struct ChromosomeListResponse {
    pub chromosomes: Vec<Chromosome>,
}

/// Query parameters for the clinical variant search. Bounds arrive flat
/// (min/max) and are folded into the core input's nested shape.
#[derive(Debug, Deserialize)]
pub struct ClinvarQueryParams {
    pub chrom: String,
    pub min: u64,
    pub max: u64,
    pub genome: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}
