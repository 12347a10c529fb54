use axum::{
    extract::{Path, Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use imprint_catalog::ProductSummary;
use imprint_pricing::PricingError;

use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductDetailResponse {
    pub item_code: String,
    pub description: String,
    pub tiers: Vec<TierResponse>,
    pub techniques: Vec<TechniqueResponse>,
}

#[derive(Debug, Serialize)]
pub struct TierResponse {
    pub price_bar: u32,
    pub unit_price: Decimal,
}

#[derive(Debug, Serialize)]
pub struct TechniqueResponse {
    pub technique_code: String,
    /// Absent when the product references a technique the decoration feed
    /// does not carry.
    pub name: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/products?q=
/// Case-insensitive substring search over product descriptions; an empty
/// query lists everything.
pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<ProductSummary>> {
    let catalog = state.catalog.load_full();
    Json(catalog.search_products(params.q.as_deref().unwrap_or("")))
}

/// GET /v1/products/{item_code}
/// The item's price tiers and available decoration techniques.
pub async fn get_product(
    State(state): State<AppState>,
    Path(item_code): Path<String>,
) -> Result<Json<ProductDetailResponse>, ApiError> {
    let catalog = state.catalog.load_full();
    let product = catalog
        .product(&item_code)
        .ok_or_else(|| PricingError::UnknownItem { item_code: item_code.clone() })?;

    let tiers = product
        .tiers()
        .iter()
        .map(|t| TierResponse { price_bar: t.price_bar, unit_price: t.unit_price })
        .collect();

    let techniques = product
        .decoration_codes()
        .iter()
        .map(|code| TechniqueResponse {
            technique_code: code.clone(),
            name: catalog.technique(code).map(|t| t.name().to_string()),
        })
        .collect();

    Ok(Json(ProductDetailResponse {
        item_code,
        description: product.description().to_string(),
        tiers,
        techniques,
    }))
}
