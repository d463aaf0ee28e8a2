// ==============================================================================
// lib.rs - Genomics Aggregator Library
// ==============================================================================
// Description: Library interface for the genomics aggregation pipeline
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-03-14
// Version: 1.0.0
// ==============================================================================
// Aggregates and normalizes responses from the external genomics providers
// (assembly catalog, gene annotation, sequence retrieval, clinical variants,
// variant effect scoring) into one coherent domain model with 1-based
// coordinates, stable sort order and normalized classification vocabulary.
// ==============================================================================

pub mod client;
pub mod clinvar;
pub mod config;
pub mod coords;
pub mod error;
pub mod genes;
pub mod genomes;
pub mod models;
pub mod nomenclature;
pub mod schema;
pub mod sequence;
pub mod variant_effect;

pub use client::GenomicsClient;
pub use config::ProviderConfig;
pub use error::AggregatorError;
