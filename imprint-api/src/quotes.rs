use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use imprint_pricing::{CostBreakdown, PricingRequest};

use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub quote_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub item_code: String,
    pub quantity: u32,
    pub breakdown: CostBreakdown,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/quotes
/// Price one request against the current catalog snapshot.
pub async fn create_quote(
    State(state): State<AppState>,
    Json(request): Json<PricingRequest>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let catalog = state.catalog.load_full();
    let breakdown = state.engine.quote(&catalog, &request)?;

    Ok(Json(QuoteResponse {
        quote_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        item_code: request.item_code,
        quantity: request.quantity,
        breakdown,
    }))
}
