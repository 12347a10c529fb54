use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use imprint_catalog::CatalogError;
use imprint_pricing::PricingError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

fn pricing_status(err: &PricingError) -> StatusCode {
    match err {
        PricingError::UnknownItem { .. } | PricingError::UnknownTechnique { .. } => {
            StatusCode::NOT_FOUND
        }
        PricingError::UnmatchedConfiguration { .. } | PricingError::NoApplicablePrice { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        PricingError::InvalidMargin(_) | PricingError::InvalidQuantity => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Pricing(err) => {
                (pricing_status(err), json!({ "error": err.to_string() }))
            }
            ApiError::Catalog(CatalogError::Validation(issues)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": self.to_string(), "issues": issues }),
            ),
            ApiError::Catalog(err) => {
                tracing::error!("catalog load failed: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": err.to_string() }))
            }
            ApiError::Internal(err) => {
                tracing::error!("internal error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
