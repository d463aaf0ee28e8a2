// ==============================================================================
// coords.rs - Genomic Coordinate Utilities
// ==============================================================================
// Description: Bound normalization, viewing-window padding, chromosome naming
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-03-02
// Version: 1.0.0
// ==============================================================================
// Convention: all coordinates handed to callers are 1-based inclusive.
// Providers that speak 0-based half-open are converted at the fetch boundary.
// ==============================================================================

use std::cmp::Ordering;

use crate::models::{Chromosome, CoordinateRange, GeneBounds};

/// Minimum flanking context around a gene, in bases
const MIN_RANGE_PADDING: u64 = 1000;

/// Normalize a raw provider start/stop pair into ordered bounds.
///
/// Minus-strand genes arrive with start > stop, so bounds are always the
/// numeric min/max, never the raw order.
pub fn normalize_bounds(a: u64, b: u64) -> GeneBounds {
    GeneBounds {
        min: a.min(b),
        max: a.max(b),
    }
}

/// Derive the initial viewing window for a gene.
///
/// Padding is max(1000, 10% of the gene span): at least a kilobase of
/// flanking context, proportionally more for large genes. The window start
/// is clamped so it never drops below position 1.
pub fn derive_initial_range(bounds: &GeneBounds) -> CoordinateRange {
    let padding = MIN_RANGE_PADDING.max((bounds.max - bounds.min) / 10);
    CoordinateRange {
        start: bounds.min.saturating_sub(padding).max(1),
        end: bounds.max + padding,
    }
}

/// Prefix a chromosome name with "chr" unless it already carries it.
pub fn canonicalize_chromosome(name: &str) -> String {
    if name.starts_with("chr") {
        name.to_string()
    } else {
        format!("chr{name}")
    }
}

/// Strip a leading "chr"/"CHR" prefix. The clinical variant database indexes
/// chromosomes without the prefix.
pub fn strip_chromosome_prefix(name: &str) -> &str {
    if name.len() >= 3 && name.as_bytes()[..3].eq_ignore_ascii_case(b"chr") {
        // A case-insensitive "chr" match means the first 3 bytes are ASCII
        &name[3..]
    } else {
        name
    }
}

/// Whether a chromosome name refers to a primary assembly sequence.
///
/// Alternate haplotypes, unplaced and random contigs carry an underscore,
/// "Un" or "random" in their names and are excluded from chromosome listings.
pub fn is_primary_contig(name: &str) -> bool {
    !name.contains('_') && !name.contains("Un") && !name.contains("random")
}

/// Ordering for chromosome names: numeric chromosomes ascending by value,
/// then non-numeric ones (X, Y, M, ...) compared lexicographically.
pub fn compare_chromosome_names(a: &str, b: &str) -> Ordering {
    let a_key = a.strip_prefix("chr").unwrap_or(a);
    let b_key = b.strip_prefix("chr").unwrap_or(b);

    match (parse_numeric(a_key), parse_numeric(b_key)) {
        (Some(a_num), Some(b_num)) => a_num.cmp(&b_num),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a_key.cmp(b_key),
    }
}

/// Sort a chromosome list in place per `compare_chromosome_names`.
pub fn sort_chromosomes(chromosomes: &mut [Chromosome]) {
    chromosomes.sort_by(|a, b| compare_chromosome_names(&a.name, &b.name));
}

fn parse_numeric(name: &str) -> Option<u64> {
    if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) {
        name.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_bounds_orders_pairs() {
        let bounds = normalize_bounds(43_125_364, 43_044_295);
        assert_eq!(bounds.min, 43_044_295);
        assert_eq!(bounds.max, 43_125_364);

        let bounds = normalize_bounds(100, 200);
        assert_eq!(bounds.min, 100);
        assert_eq!(bounds.max, 200);
    }

    #[test]
    fn test_derive_initial_range_uses_minimum_padding() {
        // Span of 1000 gives 10% = 100, below the 1000 floor
        let range = derive_initial_range(&GeneBounds { min: 5000, max: 6000 });
        assert_eq!(range.start, 4000);
        assert_eq!(range.end, 7000);
    }

    #[test]
    fn test_derive_initial_range_scales_with_large_genes() {
        // Span of 100_000 gives 10% = 10_000
        let range = derive_initial_range(&GeneBounds {
            min: 1_000_000,
            max: 1_100_000,
        });
        assert_eq!(range.start, 990_000);
        assert_eq!(range.end, 1_110_000);
    }

    #[test]
    fn test_derive_initial_range_clamps_start_to_one() {
        let range = derive_initial_range(&GeneBounds { min: 1, max: 100 });
        assert_eq!(range.start, 1);
        assert_eq!(range.end, 1100);
    }

    #[test]
    fn test_canonicalize_chromosome() {
        assert_eq!(canonicalize_chromosome("17"), "chr17");
        assert_eq!(canonicalize_chromosome("chr17"), "chr17");
        assert_eq!(canonicalize_chromosome("X"), "chrX");
    }

    #[test]
    fn test_strip_chromosome_prefix_is_case_insensitive() {
        assert_eq!(strip_chromosome_prefix("chr17"), "17");
        assert_eq!(strip_chromosome_prefix("CHRX"), "X");
        assert_eq!(strip_chromosome_prefix("17"), "17");
    }

    #[test]
    fn test_is_primary_contig_excludes_alt_and_unplaced() {
        assert!(is_primary_contig("chr1"));
        assert!(is_primary_contig("chrX"));
        assert!(!is_primary_contig("chr1_random"));
        assert!(!is_primary_contig("chrUn_gl000220"));
        assert!(!is_primary_contig("chr6_apd_hap1"));
    }

    #[test]
    fn test_chromosome_sort_numeric_before_lexicographic() {
        let mut chromosomes: Vec<Chromosome> = ["chr2", "chr1", "chrX", "chr10"]
            .iter()
            .map(|name| Chromosome {
                name: name.to_string(),
                size: 0,
            })
            .collect();

        sort_chromosomes(&mut chromosomes);

        let names: Vec<&str> = chromosomes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["chr1", "chr2", "chr10", "chrX"]);
    }

    #[test]
    fn test_chromosome_sort_non_numeric_lexicographic() {
        let mut chromosomes: Vec<Chromosome> = ["chrY", "chrM", "chrX", "chr22"]
            .iter()
            .map(|name| Chromosome {
                name: name.to_string(),
                size: 0,
            })
            .collect();

        sort_chromosomes(&mut chromosomes);

        let names: Vec<&str> = chromosomes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["chr22", "chrM", "chrX", "chrY"]);
    }
}
