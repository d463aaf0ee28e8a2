// ==============================================================================
// clinvar.rs - Clinical Variant Search Procedure
// ==============================================================================
// Description: Two-phase search/summary query against the clinical variant DB
// Author: Matt Barham
// Created: 2026-02-11
// Modified: 2026-03-14
// Version: 1.0.0
// ==============================================================================
// Phase 1 (esearch) resolves the locus to an ID list; phase 2 (esummary)
// fetches all IDs in one batch and is correlated by identifier. Sequential
// on purpose: phase 2 depends on phase 1's IDs.
// ==============================================================================

use tracing::debug;
use validator::Validate;

use crate::client::GenomicsClient;
use crate::coords::{normalize_bounds, strip_chromosome_prefix};
use crate::error::AggregatorError;
use crate::models::{ClinvarVariant, ClinvarVariantsInput};
use crate::nomenclature::{format_thousands, title_case_words};
use crate::schema::{ClinvarSearchResponse, ClinvarSummaryResponse, ClinvarSummaryResult};

const PROVIDER: &str = "ClinVar";

/// Search result page cap; the locus view shows at most this many variants.
const MAX_VARIANTS: &str = "20";

/// Fallback for classification, variation type and location fields the
/// summary does not carry.
const UNKNOWN: &str = "Unknown";

/// Fetch catalogued clinical variants overlapping a gene locus.
///
/// An empty list is a valid outcome (no variants at the locus); transport or
/// shape failures at either phase raise.
pub async fn fetch_clinvar_variants(
    client: &GenomicsClient,
    input: &ClinvarVariantsInput,
) -> Result<Vec<ClinvarVariant>, AggregatorError> {
    input.validate()?;

    // Bounds may arrive unordered; the chromosome is indexed unprefixed
    let bounds = normalize_bounds(input.gene_bounds.min, input.gene_bounds.max);
    let chromosome = strip_chromosome_prefix(&input.chrom).to_string();
    let term = search_term(&chromosome, bounds.min, bounds.max, &input.genome);

    let search_url = format!("{}/esearch.fcgi", client.config().eutils_base_url);
    let search: ClinvarSearchResponse = client
        .get_json(
            PROVIDER,
            &search_url,
            &[
                ("db", "clinvar"),
                ("term", term.as_str()),
                ("retmode", "json"),
                ("retmax", MAX_VARIANTS),
            ],
        )
        .await?;

    let ids = search
        .esearchresult
        .map(|result| result.idlist)
        .unwrap_or_default();
    if ids.is_empty() {
        debug!("no clinical variants at {}:{}-{}", chromosome, bounds.min, bounds.max);
        return Ok(Vec::new());
    }

    let summary_url = format!("{}/esummary.fcgi", client.config().eutils_base_url);
    let summary: ClinvarSummaryResponse = client
        .get_json(
            PROVIDER,
            &summary_url,
            &[
                ("db", "clinvar"),
                ("id", ids.join(",").as_str()),
                ("retmode", "json"),
            ],
        )
        .await?;

    match summary.result {
        Some(result) => collect_variants(&result, &chromosome),
        None => Ok(Vec::new()),
    }
}

/// Structured search term for the locus, e.g.
/// `17[chromosome] AND 43044295:43125364[chrpos38]`.
///
/// The position field is assembly-specific: the legacy hg19 assembly is
/// indexed under `chrpos37`, everything current under `chrpos38`.
fn search_term(chromosome: &str, min: u64, max: u64, genome_id: &str) -> String {
    let position_field = if genome_id == "hg19" {
        "chrpos37"
    } else {
        "chrpos38"
    };
    format!("{chromosome}[chromosome] AND {min}:{max}[{position_field}]")
}

/// Normalize the batch summary into the internal variant shape.
///
/// Iteration follows the summary's own `uids` list, which silently drops
/// phase-1 IDs the batch did not return (provider inconsistency, not an
/// error). A uid listed without a matching entry, or with a malformed entry,
/// is a shape failure.
fn collect_variants(
    result: &ClinvarSummaryResult,
    chromosome: &str,
) -> Result<Vec<ClinvarVariant>, AggregatorError> {
    let mut variants = Vec::with_capacity(result.uids.len());

    for uid in &result.uids {
        let entry = result
            .entry_for(uid)
            .map_err(|detail| AggregatorError::validation(PROVIDER, detail))?
            .ok_or_else(|| {
                AggregatorError::validation(
                    PROVIDER,
                    format!("summary entry {uid} listed in uids but missing"),
                )
            })?;

        variants.push(ClinvarVariant {
            clinvar_id: uid.clone(),
            title: entry.title,
            variation_type: title_case_words(entry.obj_type.as_deref().unwrap_or(UNKNOWN)),
            classification: entry
                .germline_classification
                .description
                .unwrap_or_else(|| UNKNOWN.to_string()),
            gene_sort: entry.gene_sort.unwrap_or_default(),
            chromosome: chromosome.to_string(),
            location: entry
                .location_sort
                .as_deref()
                .and_then(|location| location.trim().parse::<u64>().ok())
                .map(format_thousands)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            analysis: None,
            is_analyzing: None,
            analysis_error: None,
        });
    }

    Ok(variants)
}
