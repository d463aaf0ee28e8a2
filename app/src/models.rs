// ==============================================================================
// models.rs - Genomics Domain Models
// ==============================================================================
// Description: Data structures produced and consumed by the aggregation pipeline
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-03-14
// Version: 1.0.0
// ==============================================================================
// Every entity here is a value type built fresh per request from upstream
// JSON; nothing is cached or shared across calls.
// ==============================================================================

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::nomenclature::{parse_substitution, Substitution};

/// A named reference genome release, grouped by organism in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenomeAssembly {
    /// Assembly identifier, e.g. "hg38"
    pub id: String,
    /// Display name, e.g. "Human Dec. 2013 (GRCh38/hg38)"
    pub name: String,
    /// Provider source name, e.g. "GRCh38 Genome Reference Consortium"
    pub source_name: String,
    /// Whether the provider lists the assembly as active
    pub active: bool,
}

/// A primary chromosome of one assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chromosome {
    /// Canonical name with "chr" prefix, e.g. "chr17"
    pub name: String,
    /// Length in bases
    pub size: u64,
}

/// One hit from the free-text gene search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneFromSearch {
    /// Gene symbol, e.g. "BRCA1"
    pub symbol: String,
    /// Full gene name
    pub name: String,
    /// Chromosome the gene maps to (no "chr" prefix in the index)
    pub chrom: String,
    /// Index description line
    pub description: String,
    /// External gene identifier. Absent means detail/sequence/variant
    /// lookups for this hit are impossible; callers must surface that
    /// instead of defaulting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gene_id: Option<String>,
}

/// Strand-annotated genomic interval as reported by the annotation provider.
/// Raw start/stop order is strand-dependent; use [`GeneBounds`] for ordered
/// coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenomicInterval {
    pub chr_start: u64,
    pub chr_stop: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strand: Option<String>,
}

/// Organism naming carried on a gene annotation summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Organism {
    pub scientific_name: String,
    pub common_name: String,
}

/// Gene annotation detail used to seed the gene view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneDetails {
    /// Genomic placements; only the first (primary) entry is used downstream
    pub genomic_info: Vec<GenomicInterval>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organism: Option<Organism>,
}

/// Ordered min/max genomic coordinates of a gene, independent of strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneBounds {
    pub min: u64,
    pub max: u64,
}

/// A 1-based inclusive coordinate range with start <= end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoordinateRange {
    pub start: u64,
    pub end: u64,
}

/// Catalogued clinical variant at a gene locus, normalized from the
/// two-phase search/summary query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClinvarVariant {
    /// Clinical variant database identifier
    pub clinvar_id: String,
    /// Free-text variant title, e.g. "NM_007294.4(BRCA1):c.5503C>T"
    pub title: String,
    /// Variation type in Title Case, e.g. "Single Nucleotide Variant"
    pub variation_type: String,
    /// Clinical significance classification, "Unknown" when unreported
    pub classification: String,
    /// Provider gene-sort key
    pub gene_sort: String,
    /// Chromosome without "chr" prefix
    pub chromosome: String,
    /// Human-readable, thousands-separated position, "Unknown" when absent
    pub location: String,
    /// Effect analysis attached by the caller after scoring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<VariantImpact>,
    /// In-flight marker for UI bookkeeping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_analyzing: Option<bool>,
    /// Scoring failure marker for UI bookkeeping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_error: Option<String>,
}

impl ClinvarVariant {
    /// Whether this variant is a single-nucleotide substitution per its
    /// normalized variation type.
    pub fn is_single_nucleotide(&self) -> bool {
        self.variation_type
            .to_lowercase()
            .contains("single nucleotide")
    }

    /// Extract the ref/alt substitution from the variant title, when the
    /// title carries one.
    pub fn substitution(&self) -> Option<Substitution> {
        parse_substitution(&self.title)
    }
}

/// Effect-analysis subset carried on a [`ClinvarVariant`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantImpact {
    pub prediction: String,
    pub delta_score: f64,
    pub classification_confidence: f64,
}

/// Scored impact of a single-nucleotide substitution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// 1-based genomic position of the substitution
    pub position: u64,
    /// Reference base at the position, as reported by the scorer
    pub reference: String,
    /// Alternate base, always exactly one of A/T/G/C
    pub alternative: String,
    /// Signed delta likelihood score; negative means loss of function
    pub delta_score: f64,
    /// Categorical prediction label
    pub prediction: String,
    /// Classification confidence in [0, 1]
    pub classification_confidence: f64,
}

impl From<AnalysisResult> for VariantImpact {
    fn from(result: AnalysisResult) -> Self {
        Self {
            prediction: result.prediction,
            delta_score: result.delta_score,
            classification_confidence: result.classification_confidence,
        }
    }
}

// ==============================================================================
// Procedure inputs
// ==============================================================================

/// Input for the gene search procedure.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchGenesInput {
    /// Free-text search term
    #[validate(length(min = 1, message = "Search query is required"))]
    pub query: String,
    /// Assembly identifier, echoed back with the results
    #[validate(length(min = 1, message = "Genome is required"))]
    pub genome: String,
}

/// Input for the sequence fetch procedure. Coordinates are 1-based inclusive.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SequenceInput {
    #[validate(length(min = 1, message = "Chromosome is required"))]
    pub chrom: String,
    #[validate(range(min = 1, message = "Start position must be positive"))]
    pub start: u64,
    #[validate(range(min = 1, message = "End position must be positive"))]
    pub end: u64,
    #[validate(length(min = 1, message = "Genome ID is required"))]
    pub genome: String,
}

/// Input for the clinical variant search procedure.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClinvarVariantsInput {
    #[validate(length(min = 1, message = "Chromosome is required"))]
    pub chrom: String,
    /// Gene locus bounds; min/max order is restored before querying
    pub gene_bounds: GeneBounds,
    #[validate(length(min = 1, message = "Genome ID is required"))]
    pub genome: String,
}

/// Input for the variant effect procedure.
///
/// The single-base A/T/G/C constraint on `alternative` is the caller's
/// responsibility (see `nomenclature::is_standard_base`); the procedure only
/// requires it to be non-empty.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnalyzeVariantInput {
    #[validate(range(min = 1, message = "Position must be positive"))]
    pub position: u64,
    #[validate(length(min = 1, message = "Alternative sequence is required"))]
    pub alternative: String,
    #[validate(length(min = 1, message = "Genome ID is required"))]
    pub genome: String,
    #[validate(length(min = 1, message = "Chromosome is required"))]
    pub chromosome: String,
}

// ==============================================================================
// Procedure outputs
// ==============================================================================

/// Gene search results with the query echoed back.
#[derive(Debug, Clone, Serialize)]
pub struct GeneSearchResults {
    pub query: String,
    pub genome: String,
    pub results: Vec<GeneFromSearch>,
}

/// Gene detail triple. All three fields are null together when the gene
/// cannot be resolved; detail lookups are best-effort enrichment and never
/// fail hard.
#[derive(Debug, Clone, Serialize)]
pub struct GeneDetailsResult {
    pub gene_details: Option<GeneDetails>,
    pub gene_bounds: Option<GeneBounds>,
    pub initial_range: Option<CoordinateRange>,
}

impl GeneDetailsResult {
    /// The "not found" triple returned for any resolution failure.
    pub fn not_found() -> Self {
        Self {
            gene_details: None,
            gene_bounds: None,
            initial_range: None,
        }
    }
}

/// Sequence fetch result. `range` always echoes the caller's requested
/// 1-based window regardless of provider success.
#[derive(Debug, Clone, Serialize)]
pub struct SequenceResult {
    /// Upper-cased nucleotide sequence, empty on failure
    pub sequence: String,
    /// The range the caller asked for, echoed back
    pub range: CoordinateRange,
    /// Provider or transport error text when the fetch degraded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(variation_type: &str, title: &str) -> ClinvarVariant {
        ClinvarVariant {
            clinvar_id: "12345".to_string(),
            title: title.to_string(),
            variation_type: variation_type.to_string(),
            classification: "Pathogenic".to_string(),
            gene_sort: "BRCA1".to_string(),
            chromosome: "17".to_string(),
            location: "43,044,295".to_string(),
            analysis: None,
            is_analyzing: None,
            analysis_error: None,
        }
    }

    #[test]
    fn test_is_single_nucleotide_matches_normalized_type() {
        assert!(variant("Single Nucleotide Variant", "t").is_single_nucleotide());
        assert!(!variant("Deletion", "t").is_single_nucleotide());
    }

    #[test]
    fn test_substitution_comes_from_title() {
        let v = variant("Single Nucleotide Variant", "NM_007294.4(BRCA1):c.5503C>T");
        let sub = v.substitution().unwrap();
        assert_eq!(sub.reference, 'C');
        assert_eq!(sub.alternate, 'T');

        assert!(variant("Deletion", "deletion of exon 5").substitution().is_none());
    }

    #[test]
    fn test_search_input_rejects_empty_query() {
        let input = SearchGenesInput {
            query: String::new(),
            genome: "hg38".to_string(),
        };
        assert!(input.validate().is_err());

        let input = SearchGenesInput {
            query: "BRCA1".to_string(),
            genome: "hg38".to_string(),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_sequence_input_rejects_zero_positions() {
        let input = SequenceInput {
            chrom: "chr17".to_string(),
            start: 0,
            end: 100,
            genome: "hg38".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_analysis_result_projects_to_variant_impact() {
        let result = AnalysisResult {
            position: 43_119_628,
            reference: "A".to_string(),
            alternative: "T".to_string(),
            delta_score: -0.004,
            prediction: "Likely pathogenic".to_string(),
            classification_confidence: 0.89,
        };
        let impact = VariantImpact::from(result);
        assert_eq!(impact.prediction, "Likely pathogenic");
        assert!((impact.delta_score + 0.004).abs() < 1e-12);
    }
}
