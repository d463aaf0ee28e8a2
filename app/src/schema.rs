// ==============================================================================
// schema.rs - Upstream Response Schemas
// ==============================================================================
// Description: Typed shapes and runtime validation for provider responses
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-03-14
// Version: 1.0.0
// ==============================================================================
// The external providers are not under our control and evolve independently.
// Parsing here is structural: required fields must be present with the right
// types, unknown extra fields are ignored, never rejected. Every procedure
// parses the raw body through these types before touching it.
// ==============================================================================

use std::collections::HashMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ==============================================================================
// UCSC genome browser API
// ==============================================================================

/// Top-level shape of `GET /list/ucscGenomes`.
///
/// `ucscGenomes` is kept as an order-preserving JSON map: the catalog
/// procedure groups assemblies by organism in provider-returned order, and
/// per-entry parsing reports the offending assembly id on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct UcscGenomesResponse {
    #[serde(rename = "ucscGenomes")]
    pub ucsc_genomes: Option<serde_json::Map<String, Value>>,
}

/// Per-assembly catalog entry. The provider emits `active` as 0/1 numbers;
/// `truthy` coerces numbers, strings and booleans alike.
#[derive(Debug, Clone, Deserialize)]
pub struct UcscGenomeInfo {
    pub description: Option<String>,
    pub organism: Option<String>,
    #[serde(rename = "sourceName")]
    pub source_name: Option<String>,
    #[serde(default, deserialize_with = "truthy")]
    pub active: bool,
}

/// Top-level shape of `GET /list/chromosomes?genome=<id>`.
#[derive(Debug, Clone, Deserialize)]
pub struct UcscChromosomesResponse {
    /// Chromosome name -> size in bases
    pub chromosomes: Option<HashMap<String, u64>>,
}

/// Top-level shape of `GET /getData/sequence`. The provider reports errors
/// in-band: a missing `dna` with an `error` string, both on HTTP 200.
#[derive(Debug, Clone, Deserialize)]
pub struct UcscSequenceResponse {
    pub dna: Option<String>,
    pub error: Option<String>,
}

// ==============================================================================
// Gene search index (NLM Clinical Tables)
// ==============================================================================

/// Tuple-shaped response from the gene search index:
///
/// `[total_count, _, {"GeneID": [...]}, [[chrom, symbol, description, name], ...]]`
///
/// The identifier array in element 2 is positionally aligned with the row
/// matrix in element 3; correlation by row index is a genuine upstream
/// contract. Elements beyond the fourth are ignored.
#[derive(Debug, Clone)]
pub struct GeneSearchResponse {
    pub total: u64,
    pub fields: GeneSearchFields,
    pub rows: Vec<Vec<String>>,
}

/// Extra-field columns of the gene search response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneSearchFields {
    #[serde(rename = "GeneID", default)]
    pub gene_ids: Vec<String>,
}

impl<'de> Deserialize<'de> for GeneSearchResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let elements = Vec::<Value>::deserialize(deserializer)?;
        if elements.len() < 4 {
            return Err(D::Error::custom(format!(
                "gene search tuple has {} elements, expected at least 4",
                elements.len()
            )));
        }

        let total = elements[0]
            .as_u64()
            .ok_or_else(|| D::Error::custom("gene search tuple element 0 is not a count"))?;
        let fields: GeneSearchFields = serde_json::from_value(elements[2].clone())
            .map_err(|e| D::Error::custom(format!("gene search tuple element 2: {e}")))?;
        let rows: Vec<Vec<String>> = serde_json::from_value(elements[3].clone())
            .map_err(|e| D::Error::custom(format!("gene search tuple element 3: {e}")))?;

        Ok(Self {
            total,
            fields,
            rows,
        })
    }
}

// ==============================================================================
// NCBI E-utilities: gene annotation summaries
// ==============================================================================

/// Top-level shape of `GET /esummary.fcgi?db=gene`. The `result` map mixes a
/// `uids` string array with per-gene objects, so entries stay as raw values
/// until looked up by identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneSummaryResponse {
    pub result: Option<HashMap<String, Value>>,
}

impl GeneSummaryResponse {
    /// Look up and parse the summary object for one gene identifier.
    /// `None` when the identifier is absent or its entry is not summary-shaped.
    pub fn summary_for(&self, gene_id: &str) -> Option<NcbiGeneSummary> {
        let entry = self.result.as_ref()?.get(gene_id)?;
        serde_json::from_value(entry.clone()).ok()
    }
}

/// Per-gene annotation summary.
#[derive(Debug, Clone, Deserialize)]
pub struct NcbiGeneSummary {
    pub summary: Option<String>,
    pub genomicinfo: Option<Vec<NcbiGenomicInfo>>,
    pub organism: Option<NcbiOrganism>,
}

/// One genomic placement; providers may list several, the first is primary.
#[derive(Debug, Clone, Deserialize)]
pub struct NcbiGenomicInfo {
    pub chrstart: u64,
    pub chrstop: u64,
    pub strand: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NcbiOrganism {
    pub scientificname: String,
    pub commonname: String,
}

// ==============================================================================
// NCBI E-utilities: clinical variant database
// ==============================================================================

/// Top-level shape of `GET /esearch.fcgi?db=clinvar`. A missing
/// `esearchresult` or `idlist` reads as "no variants at this locus".
#[derive(Debug, Clone, Deserialize)]
pub struct ClinvarSearchResponse {
    pub esearchresult: Option<ClinvarSearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClinvarSearchResult {
    #[serde(default)]
    pub idlist: Vec<String>,
}

/// Top-level shape of `GET /esummary.fcgi?db=clinvar`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClinvarSummaryResponse {
    pub result: Option<ClinvarSummaryResult>,
}

/// The clinvar summary `result` object: a `uids` list plus one entry per
/// uid flattened alongside it.
#[derive(Debug, Clone, Deserialize)]
pub struct ClinvarSummaryResult {
    #[serde(default)]
    pub uids: Vec<String>,
    #[serde(flatten)]
    pub entries: HashMap<String, Value>,
}

impl ClinvarSummaryResult {
    /// Parse the summary entry for one uid. `Err` carries the serde detail
    /// when the entry exists but is malformed; `Ok(None)` when absent.
    pub fn entry_for(&self, uid: &str) -> Result<Option<ClinvarVariantSummary>, String> {
        match self.entries.get(uid) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| format!("summary entry {uid}: {e}")),
        }
    }
}

/// Per-variant clinvar summary entry. `title` and the nested germline
/// classification are required; everything else is optional and defaulted
/// during normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct ClinvarVariantSummary {
    pub title: String,
    pub obj_type: Option<String>,
    pub germline_classification: GermlineClassification,
    pub gene_sort: Option<String>,
    pub location_sort: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GermlineClassification {
    pub description: Option<String>,
}

// ==============================================================================
// Variant effect scorer
// ==============================================================================

/// POST body for the variant effect scorer. Field names are the scorer's
/// wire contract; do not rename.
#[derive(Debug, Clone, Serialize)]
pub struct ScorerRequest {
    pub variant_position: u64,
    pub alternative: String,
    pub genome: String,
    pub chromosome: String,
}

// ==============================================================================
// Coercion helpers
// ==============================================================================

/// Accept booleans, numbers and strings as a boolean flag: providers encode
/// "active" as 0/1. Absent/null reads as false.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Some(Value::String(s)) => !s.is_empty(),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genome_info_coerces_numeric_active_flag() {
        let info: UcscGenomeInfo = serde_json::from_str(
            r#"{"description": "Human Dec. 2013 (GRCh38/hg38)", "organism": "Human",
                "sourceName": "GRCh38 Genome Reference Consortium", "active": 1}"#,
        )
        .unwrap();
        assert!(info.active);
        assert_eq!(info.organism.as_deref(), Some("Human"));

        let info: UcscGenomeInfo =
            serde_json::from_str(r#"{"organism": "Mouse", "active": 0}"#).unwrap();
        assert!(!info.active);

        // Absent flag defaults to inactive
        let info: UcscGenomeInfo = serde_json::from_str(r#"{"organism": "Cow"}"#).unwrap();
        assert!(!info.active);
    }

    #[test]
    fn test_genomes_response_ignores_unknown_fields() {
        let response: UcscGenomesResponse = serde_json::from_str(
            r#"{"downloadTime": "now", "ucscGenomes": {"hg38": {"organism": "Human"}}}"#,
        )
        .unwrap();
        assert!(response.ucsc_genomes.unwrap().contains_key("hg38"));

        let response: UcscGenomesResponse = serde_json::from_str(r#"{"error": "oops"}"#).unwrap();
        assert!(response.ucsc_genomes.is_none());
    }

    #[test]
    fn test_sequence_response_carries_in_band_errors() {
        let response: UcscSequenceResponse =
            serde_json::from_str(r#"{"error": "start out of range"}"#).unwrap();
        assert!(response.dna.is_none());
        assert_eq!(response.error.as_deref(), Some("start out of range"));

        let response: UcscSequenceResponse =
            serde_json::from_str(r#"{"dna": "acgtACGT", "chrom": "chr17"}"#).unwrap();
        assert_eq!(response.dna.as_deref(), Some("acgtACGT"));
    }

    #[test]
    fn test_gene_search_tuple_parses() {
        let response: GeneSearchResponse = serde_json::from_str(
            r#"[1, null, {"GeneID": ["672"]},
                [["17", "BRCA1", "BRCA1 DNA repair associated", "BRCA1, DNA repair associated"]]]"#,
        )
        .unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.fields.gene_ids, vec!["672"]);
        assert_eq!(response.rows[0][1], "BRCA1");
    }

    #[test]
    fn test_gene_search_tuple_tolerates_missing_gene_ids_and_extras() {
        // No GeneID column requested and a trailing extra element
        let response: GeneSearchResponse =
            serde_json::from_str(r#"[0, null, {}, [], "trailing"]"#).unwrap();
        assert_eq!(response.total, 0);
        assert!(response.fields.gene_ids.is_empty());
        assert!(response.rows.is_empty());
    }

    #[test]
    fn test_gene_search_tuple_rejects_short_or_mistyped_tuples() {
        assert!(serde_json::from_str::<GeneSearchResponse>(r#"[1, null]"#).is_err());
        assert!(
            serde_json::from_str::<GeneSearchResponse>(r#"["one", null, {}, []]"#).is_err()
        );
        assert!(serde_json::from_str::<GeneSearchResponse>(r#"[1, null, null, []]"#).is_err());
    }

    #[test]
    fn test_gene_summary_lookup_by_identifier() {
        let response: GeneSummaryResponse = serde_json::from_str(
            r#"{"result": {
                "uids": ["672"],
                "672": {
                    "summary": "This gene encodes a 190 kD nuclear phosphoprotein.",
                    "genomicinfo": [{"chrstart": 43125364, "chrstop": 43044295, "strand": "-"}],
                    "organism": {"scientificname": "Homo sapiens", "commonname": "human"}
                }
            }}"#,
        )
        .unwrap();

        let summary = response.summary_for("672").unwrap();
        let info = &summary.genomicinfo.unwrap()[0];
        assert_eq!(info.chrstart, 43_125_364);
        assert_eq!(info.chrstop, 43_044_295);
        assert_eq!(summary.organism.unwrap().commonname, "human");

        assert!(response.summary_for("9999").is_none());
    }

    #[test]
    fn test_clinvar_search_missing_idlist_reads_as_empty() {
        let response: ClinvarSearchResponse =
            serde_json::from_str(r#"{"esearchresult": {"count": "0"}}"#).unwrap();
        assert!(response.esearchresult.unwrap().idlist.is_empty());

        let response: ClinvarSearchResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(response.esearchresult.is_none());
    }

    #[test]
    fn test_clinvar_summary_flattens_uid_entries() {
        let response: ClinvarSummaryResponse = serde_json::from_str(
            r#"{"result": {
                "uids": ["3521"],
                "3521": {
                    "title": "NM_007294.4(BRCA1):c.5503C>T (p.Arg1835Ter)",
                    "obj_type": "single nucleotide variant",
                    "germline_classification": {"description": "Pathogenic"},
                    "gene_sort": "BRCA1",
                    "location_sort": "00000043045767"
                }
            }}"#,
        )
        .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result.uids, vec!["3521"]);
        let entry = result.entry_for("3521").unwrap().unwrap();
        assert_eq!(entry.obj_type.as_deref(), Some("single nucleotide variant"));
        assert_eq!(
            entry.germline_classification.description.as_deref(),
            Some("Pathogenic")
        );

        assert!(result.entry_for("404").unwrap().is_none());
    }

    #[test]
    fn test_clinvar_summary_entry_without_classification_is_malformed() {
        let result: ClinvarSummaryResult = serde_json::from_str(
            r#"{"uids": ["1"], "1": {"title": "some variant"}}"#,
        )
        .unwrap();
        assert!(result.entry_for("1").is_err());
    }

    #[test]
    fn test_scorer_request_wire_names() {
        let body = serde_json::to_value(ScorerRequest {
            variant_position: 43_119_628,
            alternative: "T".to_string(),
            genome: "hg38".to_string(),
            chromosome: "chr17".to_string(),
        })
        .unwrap();
        assert_eq!(body["variant_position"], 43_119_628);
        assert_eq!(body["alternative"], "T");
        assert_eq!(body["genome"], "hg38");
        assert_eq!(body["chromosome"], "chr17");
    }
}
