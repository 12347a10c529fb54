use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod app_config;
pub mod catalog;
pub mod error;
pub mod products;
pub mod quotes;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/healthz", get(catalog::healthz))
        .route("/v1/quotes", post(quotes::create_quote))
        .route("/v1/products", get(products::search_products))
        .route("/v1/products/{item_code}", get(products::get_product))
        .route("/v1/catalog/reload", post(catalog::reload_catalog))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
