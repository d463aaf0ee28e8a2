// ==============================================================================
// main.rs - Genomics API Gateway Entry Point
// ==============================================================================
// Description: Axum web server exposing the genomics aggregation pipeline
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-03-14
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, Level};

mod handlers;
mod models;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    info!("Starting Genomics API Gateway v1.0.0");

    // Load environment variables
    dotenvy::dotenv().ok();

    let server_port: u16 = std::env::var("GATEWAY_PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(8098);

    // Initialize application state
    let state = AppState::new().context("Failed to initialize application state")?;

    // Build router with all endpoints
    let app = build_router(state);

    // Bind server
    let addr = SocketAddr::from(([0, 0, 0, 0], server_port));
    info!("API Gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    // Run server
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    // API routes
    let api_routes = Router::new()
        // Genome assembly catalog
        .route("/genomes", get(handlers::list_genomes))
        // Chromosomes of one assembly
        .route("/genomes/{genome}/chromosomes", get(handlers::list_chromosomes))
        // Free-text gene search
        .route("/genes/search", get(handlers::search_genes))
        // Gene details, locus bounds, initial viewing range
        .route("/genes/{gene_id}", get(handlers::gene_details))
        // Reference sequence for a coordinate range
        .route("/sequence", get(handlers::fetch_sequence))
        // Clinical variants at a locus
        .route("/clinvar/variants", get(handlers::clinvar_variants))
        // Variant effect scoring
        .route("/variants/analyze", post(handlers::analyze_variant))
        // Health check (nested under /api/genomics for consistency)
        .route("/health", get(handlers::health_check));

    // CORS origins are configured via CORS_ALLOWED_ORIGINS (comma-separated)
    // Example: CORS_ALLOWED_ORIGINS=https://genome.example.com
    let cors_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000".to_string());
    let allowed_origins: Vec<_> = cors_origins
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_credentials(false)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    // Combine all routes
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .nest("/api/genomics", api_routes)
        .layer(
            ServiceBuilder::new()
                // Request tracing
                .layer(TraceLayer::new_for_http())
                // CORS for the browser-facing presentation layer
                .layer(cors),
        )
        .with_state(state)
}
