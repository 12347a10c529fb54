pub mod decoration;
pub mod engine;
pub mod models;
pub mod shipping;
pub mod tiers;

pub use decoration::resolve_decoration_cost;
pub use engine::{aggregate, invert_margin, QuoteEngine};
pub use models::{CostBreakdown, DecorationCharge, DecorationSelection, PricingRequest};
pub use shipping::{ShippingBasis, ShippingPolicy};
pub use tiers::resolve_unit_price;

/// Pricing failures. Every variant carries the codes needed to diagnose the
/// request; the engine never substitutes a silent zero or a guessed default.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    /// The item has no published price tiers at all. Fatal to the request.
    #[error("item {item_code} has no published price tiers")]
    NoApplicablePrice { item_code: String },

    #[error("unknown item {item_code}")]
    UnknownItem { item_code: String },

    /// The technique is not offered for the item, or the decoration catalog
    /// does not carry it. A configuration error, not a crash.
    #[error("technique {technique_code} is not available for item {item_code}")]
    UnknownTechnique { item_code: String, technique_code: String },

    /// The requested color-count/size combination is absent from the
    /// catalog. Recoverable: the caller should offer a different choice.
    #[error("no {technique_code} price for the requested configuration: {detail}")]
    UnmatchedConfiguration { technique_code: String, detail: String },

    /// Margin of 100% or more would divide by zero (or worse).
    #[error("margin must be below 100%, got {0}%")]
    InvalidMargin(u8),

    #[error("quantity must be greater than zero")]
    InvalidQuantity,
}

pub type PricingResult<T> = Result<T, PricingError>;
