use std::sync::Arc;

use arc_swap::ArcSwap;

use imprint_catalog::Catalog;
use imprint_pricing::QuoteEngine;

use crate::app_config::FeedsConfig;

/// Shared application state.
///
/// The catalog lives behind an `ArcSwap`: reloads store a whole new snapshot
/// atomically, and every in-flight request keeps the snapshot it loaded, so
/// a request never observes a partially updated catalog.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ArcSwap<Catalog>>,
    pub engine: Arc<QuoteEngine>,
    pub feeds: FeedsConfig,
}

impl AppState {
    pub fn new(catalog: Catalog, engine: QuoteEngine, feeds: FeedsConfig) -> Self {
        Self {
            catalog: Arc::new(ArcSwap::from_pointee(catalog)),
            engine: Arc::new(engine),
            feeds,
        }
    }
}
