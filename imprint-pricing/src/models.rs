use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use imprint_catalog::ColorSelection;

/// One quote request: an item, a quantity, the selected decorations in
/// order, and the target margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    pub item_code: String,
    pub quantity: u32,
    #[serde(default)]
    pub decorations: Vec<DecorationSelection>,
    /// Target profit margin in percent, 0 to 99.
    pub margin_percent: u8,
}

/// One selected technique plus the key its price dependence needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorationSelection {
    pub technique_code: String,
    #[serde(default)]
    pub color: Option<ColorSelection>,
    #[serde(default)]
    pub size_cm2: Option<Decimal>,
}

/// Cost of one resolved decoration, keyed by technique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorationCharge {
    pub technique_code: String,
    pub cost: Decimal,
}

/// The full cost picture of one quote. Derived per request, never stored;
/// the same catalog snapshot and request always produce the same breakdown.
///
/// Totals are exact; `unit_cost` and `sell_price` are rounded to two decimal
/// places at this boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub product_cost: Decimal,
    pub decoration_costs: Vec<DecorationCharge>,
    pub shipping_cost: Decimal,
    pub total_excl_shipping: Decimal,
    pub total_incl_shipping: Decimal,
    pub unit_cost: Decimal,
    pub sell_price: Decimal,
}
