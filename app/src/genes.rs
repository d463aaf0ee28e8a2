// ==============================================================================
// genes.rs - Gene Search & Gene Detail Procedures
// ==============================================================================
// Description: Free-text gene index search; annotation-backed gene details
// Author: Matt Barham
// Created: 2026-02-10
// Modified: 2026-03-14
// Version: 1.0.0
// ==============================================================================

use tracing::warn;
use validator::Validate;

use crate::client::GenomicsClient;
use crate::coords::{derive_initial_range, normalize_bounds};
use crate::error::AggregatorError;
use crate::models::{
    GeneDetails, GeneDetailsResult, GeneFromSearch, GeneSearchResults, GenomicInterval, Organism,
    SearchGenesInput,
};
use crate::schema::{GeneSearchResponse, GeneSummaryResponse, NcbiGeneSummary};

const SEARCH_PROVIDER: &str = "gene search index";
const ANNOTATION_PROVIDER: &str = "gene annotation service";

/// Cap on search hits projected into results.
const MAX_SEARCH_RESULTS: usize = 10;

/// Display-field projection requested from the search index.
const SEARCH_DISPLAY_FIELDS: &str = "chromosome,Symbol,description,map_location,type_of_gene";

/// Extra-field projection; GeneID is correlated with rows by index.
const SEARCH_EXTRA_FIELDS: &str =
    "chromosome,Symbol,description,map_location,type_of_gene,GenomicInfo,GeneID";

/// Query the free-text gene index and project hits into the internal gene
/// shape. An empty result list is a valid, non-error outcome.
pub async fn search_genes(
    client: &GenomicsClient,
    input: &SearchGenesInput,
) -> Result<GeneSearchResults, AggregatorError> {
    input.validate()?;

    let url = format!(
        "{}/api/ncbi_genes/v3/search",
        client.config().clinical_tables_base_url
    );
    let response: GeneSearchResponse = client
        .get_json(
            SEARCH_PROVIDER,
            &url,
            &[
                ("terms", input.query.as_str()),
                ("df", SEARCH_DISPLAY_FIELDS),
                ("ef", SEARCH_EXTRA_FIELDS),
            ],
        )
        .await?;

    Ok(GeneSearchResults {
        query: input.query.clone(),
        genome: input.genome.clone(),
        results: project_search_rows(&response),
    })
}

/// Resolve one gene's bounds and initial viewing window from its annotation
/// summary.
///
/// Detail lookups are best-effort enrichment: transport failures, malformed
/// summaries and genes without genomic placements all yield the "not found"
/// triple instead of an error.
pub async fn fetch_gene_details(client: &GenomicsClient, gene_id: &str) -> GeneDetailsResult {
    if gene_id.trim().is_empty() {
        return GeneDetailsResult::not_found();
    }

    let url = format!("{}/esummary.fcgi", client.config().eutils_base_url);
    let response: Result<GeneSummaryResponse, AggregatorError> = client
        .get_json(
            ANNOTATION_PROVIDER,
            &url,
            &[("db", "gene"), ("id", gene_id), ("retmode", "json")],
        )
        .await;

    let response = match response {
        Ok(response) => response,
        Err(e) => {
            warn!("gene detail lookup for {} degraded: {}", gene_id, e);
            return GeneDetailsResult::not_found();
        }
    };

    match response.summary_for(gene_id) {
        Some(summary) => derive_gene_record(summary),
        None => GeneDetailsResult::not_found(),
    }
}

/// Project the tuple response's row matrix into gene hits.
///
/// Takes up to [`MAX_SEARCH_RESULTS`] rows; rows beyond the returned matrix
/// are skipped even when the total count claims more. The identifier column
/// is correlated positionally, and an identifier that is missing or empty
/// stays `None` so callers know downstream lookups are impossible.
fn project_search_rows(response: &GeneSearchResponse) -> Vec<GeneFromSearch> {
    let mut results = Vec::new();
    if response.total == 0 {
        return results;
    }

    let limit = MAX_SEARCH_RESULTS.min(response.total as usize);
    for (index, row) in response.rows.iter().take(limit).enumerate() {
        let column = |i: usize| row.get(i).cloned().unwrap_or_default();
        results.push(GeneFromSearch {
            chrom: column(0),
            symbol: column(1),
            description: column(2),
            name: column(3),
            gene_id: response
                .fields
                .gene_ids
                .get(index)
                .filter(|id| !id.is_empty())
                .cloned(),
        });
    }
    results
}

/// Build the detail triple from a parsed annotation summary. Only the first
/// genomic placement is used; providers may list several transcripts but the
/// primary one is index 0.
fn derive_gene_record(summary: NcbiGeneSummary) -> GeneDetailsResult {
    let Some(genomic_info) = summary.genomicinfo.as_ref().and_then(|info| info.first()) else {
        return GeneDetailsResult::not_found();
    };

    let bounds = normalize_bounds(genomic_info.chrstart, genomic_info.chrstop);
    let initial_range = derive_initial_range(&bounds);

    let details = GeneDetails {
        genomic_info: vec![GenomicInterval {
            chr_start: genomic_info.chrstart,
            chr_stop: genomic_info.chrstop,
            strand: genomic_info.strand.clone(),
        }],
        summary: summary.summary,
        organism: summary.organism.map(|organism| Organism {
            scientific_name: organism.scientificname,
            common_name: organism.commonname,
        }),
    };

    GeneDetailsResult {
        gene_details: Some(details),
        gene_bounds: Some(bounds),
        initial_range: Some(initial_range),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_search_rows_brca1() {
        let response: GeneSearchResponse = serde_json::from_str(
            r#"[1, null, {"GeneID": ["672"]},
                [["17", "BRCA1", "BRCA1 DNA repair...", "BRCA1, DNA repair associated"]]]"#,
        )
        .unwrap();

        let results = project_search_rows(&response);
        assert_eq!(results.len(), 1);
        let gene = &results[0];
        assert_eq!(gene.symbol, "BRCA1");
        assert_eq!(gene.chrom, "17");
        assert_eq!(gene.description, "BRCA1 DNA repair...");
        assert_eq!(gene.name, "BRCA1, DNA repair associated");
        assert_eq!(gene.gene_id.as_deref(), Some("672"));
    }

    #[test]
    fn test_project_search_rows_caps_at_ten() {
        let rows: Vec<String> = (0..15)
            .map(|i| format!(r#"["1", "GENE{i}", "desc", "name"]"#))
            .collect();
        let raw = format!(r#"[15, null, {{}}, [{}]]"#, rows.join(","));
        let response: GeneSearchResponse = serde_json::from_str(&raw).unwrap();

        let results = project_search_rows(&response);
        assert_eq!(results.len(), 10);
        // No GeneID column: identifiers absent rather than defaulted
        assert!(results.iter().all(|gene| gene.gene_id.is_none()));
    }

    #[test]
    fn test_project_search_rows_skips_rows_beyond_matrix() {
        // Count claims three but the matrix only carries one row
        let response: GeneSearchResponse = serde_json::from_str(
            r#"[3, null, {"GeneID": ["1", "2", "3"]}, [["17", "A", "d", "n"]]]"#,
        )
        .unwrap();
        assert_eq!(project_search_rows(&response).len(), 1);
    }

    #[test]
    fn test_project_search_rows_treats_empty_identifier_as_absent() {
        let response: GeneSearchResponse = serde_json::from_str(
            r#"[2, null, {"GeneID": ["", "672"]},
                [["17", "A", "d", "n"], ["13", "B", "d", "n"]]]"#,
        )
        .unwrap();

        let results = project_search_rows(&response);
        assert!(results[0].gene_id.is_none());
        assert_eq!(results[1].gene_id.as_deref(), Some("672"));
    }

    #[test]
    fn test_derive_gene_record_uses_first_placement() {
        let summary: NcbiGeneSummary = serde_json::from_str(
            r#"{
                "summary": "tumor suppressor",
                "genomicinfo": [
                    {"chrstart": 43125364, "chrstop": 43044295, "strand": "-"},
                    {"chrstart": 1, "chrstop": 2}
                ],
                "organism": {"scientificname": "Homo sapiens", "commonname": "human"}
            }"#,
        )
        .unwrap();

        let record = derive_gene_record(summary);
        let bounds = record.gene_bounds.unwrap();
        // Minus-strand gene: raw start > stop, bounds re-ordered
        assert_eq!(bounds.min, 43_044_295);
        assert_eq!(bounds.max, 43_125_364);

        let range = record.initial_range.unwrap();
        // Span 81_069 gives 10% padding of 8_106
        assert_eq!(range.start, 43_044_295 - 8_106);
        assert_eq!(range.end, 43_125_364 + 8_106);

        let details = record.gene_details.unwrap();
        assert_eq!(details.genomic_info.len(), 1);
        assert_eq!(details.genomic_info[0].chr_start, 43_125_364);
        assert_eq!(details.organism.unwrap().common_name, "human");
    }

    #[test]
    fn test_derive_gene_record_without_placement_is_not_found() {
        let summary: NcbiGeneSummary =
            serde_json::from_str(r#"{"summary": "no placement", "genomicinfo": []}"#).unwrap();
        let record = derive_gene_record(summary);
        assert!(record.gene_details.is_none());
        assert!(record.gene_bounds.is_none());
        assert!(record.initial_range.is_none());
    }
}
