use std::net::SocketAddr;

use imprint_api::{app, catalog::load_snapshot, state::AppState};
use imprint_pricing::QuoteEngine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imprint_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = imprint_api::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Imprint API on port {}", config.server.port);

    let catalog = load_snapshot(&config.feeds).expect("Failed to load catalog feeds");
    let engine = QuoteEngine::new(config.shipping.clone());
    let state = AppState::new(catalog, engine, config.feeds.clone());

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}
