// ==============================================================================
// config.rs - Upstream Provider Configuration
// ==============================================================================
// Description: Base URLs for the external genomics data providers
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-02-09
// Version: 1.0.0
// ==============================================================================

/// Default UCSC genome browser API base URL
const DEFAULT_UCSC_BASE_URL: &str = "https://api.genome.ucsc.edu";

/// Default NCBI E-utilities base URL (gene summaries, ClinVar)
const DEFAULT_EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Default NLM Clinical Tables base URL (free-text gene search index)
const DEFAULT_CLINICAL_TABLES_BASE_URL: &str = "https://clinicaltables.nlm.nih.gov";

/// Base URLs for every upstream provider.
///
/// Read once at process start and immutable thereafter. The variant scorer
/// has no public default; leaving it unset makes the variant effect
/// procedure fail with a configuration error instead of guessing.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Genome assembly catalog, chromosome catalog and sequence retrieval
    pub ucsc_base_url: String,

    /// Gene annotation summaries and the clinical variant database
    pub eutils_base_url: String,

    /// Free-text gene search index
    pub clinical_tables_base_url: String,

    /// Variant effect scoring endpoint (POST), optional
    pub variant_scorer_url: Option<String>,
}

impl ProviderConfig {
    /// Load provider URLs from the environment, falling back to the public
    /// endpoints. Trailing slashes are trimmed so URL assembly is uniform.
    pub fn from_env() -> Self {
        Self {
            ucsc_base_url: base_url_var("UCSC_API_URL", DEFAULT_UCSC_BASE_URL),
            eutils_base_url: base_url_var("NCBI_EUTILS_URL", DEFAULT_EUTILS_BASE_URL),
            clinical_tables_base_url: base_url_var(
                "CLINICAL_TABLES_URL",
                DEFAULT_CLINICAL_TABLES_BASE_URL,
            ),
            variant_scorer_url: std::env::var("VARIANT_SCORER_URL")
                .ok()
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            ucsc_base_url: DEFAULT_UCSC_BASE_URL.to_string(),
            eutils_base_url: DEFAULT_EUTILS_BASE_URL.to_string(),
            clinical_tables_base_url: DEFAULT_CLINICAL_TABLES_BASE_URL.to_string(),
            variant_scorer_url: None,
        }
    }
}

fn base_url_var(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => value.trim().trim_end_matches('/').to_string(),
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_public_endpoints() {
        let config = ProviderConfig::default();
        assert_eq!(config.ucsc_base_url, "https://api.genome.ucsc.edu");
        assert_eq!(
            config.eutils_base_url,
            "https://eutils.ncbi.nlm.nih.gov/entrez/eutils"
        );
        assert_eq!(
            config.clinical_tables_base_url,
            "https://clinicaltables.nlm.nih.gov"
        );
        assert!(config.variant_scorer_url.is_none());
    }
}
