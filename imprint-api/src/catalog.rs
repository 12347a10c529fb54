use std::fs::File;
use std::sync::Arc;

use anyhow::Context;
use axum::{extract::State, Json};
use serde::Serialize;

use imprint_catalog::{read_decoration_feed, read_product_feed, Catalog, FeedFormat};

use crate::app_config::FeedsConfig;
use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub products: usize,
    pub techniques: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub products: usize,
    pub techniques: usize,
}

// ============================================================================
// Snapshot loading
// ============================================================================

/// Read both feeds and build a validated catalog snapshot.
pub fn load_snapshot(feeds: &FeedsConfig) -> Result<Catalog, ApiError> {
    let product_file = File::open(&feeds.product_path)
        .with_context(|| format!("opening product feed {}", feeds.product_path))?;
    let product_rows =
        read_product_feed(product_file, &FeedFormat::new(feeds.product_delimiter as u8))?;

    let decoration_file = File::open(&feeds.decoration_path)
        .with_context(|| format!("opening decoration feed {}", feeds.decoration_path))?;
    let decoration_rows =
        read_decoration_feed(decoration_file, &FeedFormat::new(feeds.decoration_delimiter as u8))?;

    Ok(Catalog::load(product_rows, decoration_rows)?)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/catalog/reload
/// Re-ingest the configured feeds and swap the snapshot atomically. On any
/// failure the previous snapshot stays in service untouched.
pub async fn reload_catalog(
    State(state): State<AppState>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let snapshot = load_snapshot(&state.feeds)?;
    let response =
        SnapshotResponse { products: snapshot.product_count(), techniques: snapshot.technique_count() };

    state.catalog.store(Arc::new(snapshot));
    tracing::info!(products = response.products, techniques = response.techniques, "catalog reloaded");

    Ok(Json(response))
}

/// GET /healthz
pub async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog = state.catalog.load_full();
    Json(HealthResponse {
        status: "ok",
        products: catalog.product_count(),
        techniques: catalog.technique_count(),
    })
}
