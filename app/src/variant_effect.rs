// ==============================================================================
// variant_effect.rs - Variant Effect Scoring Procedure
// ==============================================================================
// Description: Delegates substitution scoring to the external model endpoint
// Author: Matt Barham
// Created: 2026-02-11
// Modified: 2026-03-14
// Version: 1.0.0
// ==============================================================================

use tracing::info;
use validator::Validate;

use crate::client::GenomicsClient;
use crate::coords::canonicalize_chromosome;
use crate::error::AggregatorError;
use crate::models::{AnalysisResult, AnalyzeVariantInput};
use crate::schema::ScorerRequest;

const PROVIDER: &str = "variant scorer";

/// Score a single-nucleotide substitution through the configured model
/// endpoint.
///
/// Fails with a configuration error (before any network activity) when no
/// endpoint is configured. No retry: scoring is an expensive external
/// computation; retry/backoff policy belongs to the caller. The single-base
/// A/T/G/C constraint on `alternative` is validated by the caller, not here.
pub async fn analyze_variant(
    client: &GenomicsClient,
    input: &AnalyzeVariantInput,
) -> Result<AnalysisResult, AggregatorError> {
    input.validate()?;

    let Some(scorer_url) = client.config().variant_scorer_url.clone() else {
        return Err(AggregatorError::Configuration(
            "variant scorer endpoint is not set (VARIANT_SCORER_URL)",
        ));
    };

    let request = ScorerRequest {
        variant_position: input.position,
        alternative: input.alternative.clone(),
        genome: input.genome.clone(),
        chromosome: canonicalize_chromosome(&input.chromosome),
    };

    info!(
        "scoring {}:{}>{} on {}",
        request.chromosome, request.variant_position, request.alternative, request.genome
    );

    client.post_json(PROVIDER, &scorer_url, &request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;

    fn input() -> AnalyzeVariantInput {
        AnalyzeVariantInput {
            position: 43_119_628,
            alternative: "T".to_string(),
            genome: "hg38".to_string(),
            chromosome: "17".to_string(),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_scorer_fails_before_any_network_call() {
        let client = GenomicsClient::new(ProviderConfig::default()).unwrap();
        let err = analyze_variant(&client, &input()).await.unwrap_err();
        assert!(matches!(err, AggregatorError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_invalid_input_rejected_before_configuration_check() {
        let client = GenomicsClient::new(ProviderConfig::default()).unwrap();
        let mut bad = input();
        bad.alternative = String::new();
        let err = analyze_variant(&client, &bad).await.unwrap_err();
        assert!(matches!(err, AggregatorError::InvalidInput(_)));
    }
}
