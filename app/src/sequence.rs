// ==============================================================================
// sequence.rs - Reference Sequence Fetch Procedure
// ==============================================================================
// Description: Nucleotide sequence retrieval for a 1-based coordinate range
// Author: Matt Barham
// Created: 2026-02-10
// Modified: 2026-03-14
// Version: 1.0.0
// ==============================================================================

use tracing::warn;
use validator::Validate;

use crate::client::GenomicsClient;
use crate::coords::canonicalize_chromosome;
use crate::models::{CoordinateRange, SequenceInput, SequenceResult};
use crate::schema::UcscSequenceResponse;

const PROVIDER: &str = "UCSC";

/// Fetch the reference sequence for a 1-based inclusive range.
///
/// The provider speaks 0-based half-open coordinates, so [start, end] is
/// sent as start-1/end. The result always echoes the range the caller asked
/// for; sequence retrieval is never fatal, and every failure mode (invalid
/// input, transport, malformed body, provider-reported error) degrades to an
/// empty sequence with the error text inline.
pub async fn fetch_sequence(client: &GenomicsClient, input: &SequenceInput) -> SequenceResult {
    let range = CoordinateRange {
        start: input.start,
        end: input.end,
    };

    if let Err(e) = input.validate() {
        return degraded(range, e.to_string());
    }

    let chromosome = canonicalize_chromosome(&input.chrom);
    let (provider_start, provider_end) = provider_window(input.start, input.end);

    // The provider takes semicolon-separated parameters on this endpoint
    let url = format!(
        "{}/getData/sequence?genome={};chrom={};start={};end={}",
        client.config().ucsc_base_url,
        input.genome,
        chromosome,
        provider_start,
        provider_end
    );

    let response: UcscSequenceResponse = match client.get_json(PROVIDER, &url, &[]).await {
        Ok(response) => response,
        Err(e) => return degraded(range, e.to_string()),
    };

    match response.dna {
        Some(dna) if response.error.is_none() => SequenceResult {
            sequence: dna.to_uppercase(),
            range,
            error: None,
        },
        _ => SequenceResult {
            sequence: String::new(),
            range,
            error: response.error,
        },
    }
}

/// Convert a 1-based inclusive range to the provider's 0-based half-open
/// convention.
fn provider_window(start: u64, end: u64) -> (u64, u64) {
    (start.saturating_sub(1), end)
}

fn degraded(range: CoordinateRange, error: String) -> SequenceResult {
    warn!("sequence fetch degraded: {}", error);
    SequenceResult {
        sequence: String::new(),
        range,
        error: Some(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_window_converts_to_zero_based_half_open() {
        assert_eq!(provider_window(1000, 1010), (999, 1010));
        assert_eq!(provider_window(1, 1), (0, 1));
    }

    #[test]
    fn test_degraded_result_echoes_requested_range() {
        let result = degraded(
            CoordinateRange {
                start: 1000,
                end: 1010,
            },
            "start out of range".to_string(),
        );
        assert_eq!(result.sequence, "");
        assert_eq!(result.range.start, 1000);
        assert_eq!(result.range.end, 1010);
        assert_eq!(result.error.as_deref(), Some("start out of range"));
    }
}
