// ==============================================================================
// genomes.rs - Genome & Chromosome Catalog Procedures
// ==============================================================================
// Description: Assembly catalog grouped by organism; per-assembly chromosomes
// Author: Matt Barham
// Created: 2026-02-10
// Modified: 2026-03-14
// Version: 1.0.0
// ==============================================================================

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::client::GenomicsClient;
use crate::coords::{is_primary_contig, sort_chromosomes};
use crate::error::AggregatorError;
use crate::models::{Chromosome, GenomeAssembly};
use crate::schema::{UcscChromosomesResponse, UcscGenomeInfo, UcscGenomesResponse};

const PROVIDER: &str = "UCSC";

/// Organism bucket for assemblies the provider does not attribute.
const UNATTRIBUTED_ORGANISM: &str = "Other";

/// Fetch the genome assembly catalog, grouped by organism.
///
/// Within each organism the assemblies keep provider-returned order;
/// organisms themselves are sorted for deterministic output. Fails with an
/// upstream error when the catalog key is missing from the response.
pub async fn available_genomes(
    client: &GenomicsClient,
) -> Result<BTreeMap<String, Vec<GenomeAssembly>>, AggregatorError> {
    let url = format!("{}/list/ucscGenomes", client.config().ucsc_base_url);
    let response: UcscGenomesResponse = client.get_json(PROVIDER, &url, &[]).await?;

    let Some(genomes) = response.ucsc_genomes else {
        return Err(AggregatorError::upstream(
            PROVIDER,
            "assembly catalog response is missing ucscGenomes",
        ));
    };

    group_by_organism(&genomes)
}

/// Fetch the primary chromosomes of one assembly, sorted.
pub async fn genome_chromosomes(
    client: &GenomicsClient,
    genome_id: &str,
) -> Result<Vec<Chromosome>, AggregatorError> {
    if genome_id.trim().is_empty() {
        return Err(AggregatorError::InvalidInput(
            "genome_id: Genome ID is required".to_string(),
        ));
    }

    let url = format!("{}/list/chromosomes", client.config().ucsc_base_url);
    let response: UcscChromosomesResponse = client
        .get_json(PROVIDER, &url, &[("genome", genome_id)])
        .await?;

    let Some(chromosomes) = response.chromosomes else {
        return Err(AggregatorError::upstream(
            PROVIDER,
            format!("chromosome listing for {genome_id} is missing chromosomes"),
        ));
    };

    debug!(
        "{} returned {} sequences for {}",
        PROVIDER,
        chromosomes.len(),
        genome_id
    );
    Ok(build_chromosome_list(chromosomes))
}

/// Group raw catalog entries by organism, defaulting unattributed entries
/// to "Other". Entry order inside each organism follows the provider.
fn group_by_organism(
    genomes: &serde_json::Map<String, Value>,
) -> Result<BTreeMap<String, Vec<GenomeAssembly>>, AggregatorError> {
    let mut grouped: BTreeMap<String, Vec<GenomeAssembly>> = BTreeMap::new();

    for (genome_id, raw_info) in genomes {
        let info: UcscGenomeInfo = serde_json::from_value(raw_info.clone()).map_err(|e| {
            AggregatorError::validation(PROVIDER, format!("assembly {genome_id}: {e}"))
        })?;

        let organism = info
            .organism
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNATTRIBUTED_ORGANISM.to_string());

        grouped.entry(organism).or_default().push(GenomeAssembly {
            id: genome_id.clone(),
            name: info.description.unwrap_or_else(|| genome_id.clone()),
            source_name: info.source_name.unwrap_or_else(|| genome_id.clone()),
            active: info.active,
        });
    }

    Ok(grouped)
}

/// Drop non-primary contigs and sort what remains.
fn build_chromosome_list(chromosomes: std::collections::HashMap<String, u64>) -> Vec<Chromosome> {
    let mut list: Vec<Chromosome> = chromosomes
        .into_iter()
        .filter(|(name, _)| is_primary_contig(name))
        .map(|(name, size)| Chromosome { name, size })
        .collect();
    sort_chromosomes(&mut list);
    list
}
