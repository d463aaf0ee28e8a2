// ==============================================================================
// handlers.rs - API Request Handlers
// ==============================================================================
// Description: HTTP request handlers for the genomics aggregation endpoints
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-03-14
// Version: 1.0.0
// ==============================================================================

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use tracing::error;

use genomics_aggregator::models::{
    AnalysisResult, AnalyzeVariantInput, ClinvarVariant, ClinvarVariantsInput, GeneBounds,
    GeneDetailsResult, GeneSearchResults, SearchGenesInput, SequenceInput, SequenceResult,
};
use genomics_aggregator::nomenclature::is_standard_base;
use genomics_aggregator::{clinvar, genes, genomes, sequence, variant_effect, AggregatorError};

use crate::models::*;
use crate::state::AppState;

/// Root endpoint - API information
pub async fn root() -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        service: "Genomics API Gateway",
        version: "1.0.0",
        endpoints: vec![
            "/health - Health check",
            "/api/genomics/genomes - List genome assemblies by organism (GET)",
            "/api/genomics/genomes/{genome}/chromosomes - List chromosomes (GET)",
            "/api/genomics/genes/search?query=&genome= - Search genes (GET)",
            "/api/genomics/genes/{gene_id} - Gene details and locus bounds (GET)",
            "/api/genomics/sequence?genome=&chrom=&start=&end= - Reference sequence (GET)",
            "/api/genomics/clinvar/variants?genome=&chrom=&min=&max= - Clinical variants (GET)",
            "/api/genomics/variants/analyze - Score a substitution (POST)",
        ],
    })
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: "1.0.0",
        timestamp: Utc::now(),
    })
}

/// List genome assemblies grouped by organism
pub async fn list_genomes(State(state): State<AppState>) -> Result<Json<GenomeListResponse>, AppError> {
    let genomes = genomes::available_genomes(state.client()).await?;
    Ok(Json(GenomeListResponse { genomes }))
}

/// List the primary chromosomes of one assembly
pub async fn list_chromosomes(
    State(state): State<AppState>,
    Path(genome): Path<String>,
) -> Result<Json<ChromosomeListResponse>, AppError> {
    let chromosomes = genomes::genome_chromosomes(state.client(), &genome).await?;
    Ok(Json(ChromosomeListResponse { chromosomes }))
}

/// Free-text gene search
pub async fn search_genes(
    State(state): State<AppState>,
    Query(input): Query<SearchGenesInput>,
) -> Result<Json<GeneSearchResults>, AppError> {
    let results = genes::search_genes(state.client(), &input).await?;
    Ok(Json(results))
}

/// Gene details with locus bounds and initial viewing range.
/// Best-effort: unresolvable genes yield the all-null triple, not an error.
pub async fn gene_details(
    State(state): State<AppState>,
    Path(gene_id): Path<String>,
) -> Json<GeneDetailsResult> {
    Json(genes::fetch_gene_details(state.client(), &gene_id).await)
}

/// Reference sequence for a 1-based inclusive range.
/// Best-effort: failures degrade to an empty sequence with inline error.
pub async fn fetch_sequence(
    State(state): State<AppState>,
    Query(input): Query<SequenceInput>,
) -> Json<SequenceResult> {
    Json(sequence::fetch_sequence(state.client(), &input).await)
}

/// Clinical variants overlapping a gene locus
pub async fn clinvar_variants(
    State(state): State<AppState>,
    Query(params): Query<ClinvarQueryParams>,
) -> Result<Json<Vec<ClinvarVariant>>, AppError> {
    let input = ClinvarVariantsInput {
        chrom: params.chrom,
        gene_bounds: GeneBounds {
            min: params.min,
            max: params.max,
        },
        genome: params.genome,
    };
    let variants = clinvar::fetch_clinvar_variants(state.client(), &input).await?;
    Ok(Json(variants))
}

/// Score a single-nucleotide substitution.
///
/// The single-base constraint is enforced here, before the pipeline is
/// invoked: the scorer charges per call and must not see junk input.
pub async fn analyze_variant(
    State(state): State<AppState>,
    Json(input): Json<AnalyzeVariantInput>,
) -> Result<Json<AnalysisResult>, AppError> {
    let mut bases = input.alternative.chars();
    match (bases.next(), bases.next()) {
        (Some(base), None) if is_standard_base(base) => {}
        _ => {
            return Err(AppError::BadRequest(
                "Nucleotides must be A, C, G or T".to_string(),
            ))
        }
    }

    let result = variant_effect::analyze_variant(state.client(), &input).await?;
    Ok(Json(result))
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    BadGateway(String),
    Internal(String),
}

impl From<AggregatorError> for AppError {
    fn from(err: AggregatorError) -> Self {
        match err {
            AggregatorError::InvalidInput(_) => AppError::BadRequest(err.to_string()),
            AggregatorError::Validation { .. } | AggregatorError::Upstream { .. } => {
                AppError::BadGateway(err.to_string())
            }
            AggregatorError::Configuration(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_message));
        (status, body).into_response()
    }
}
