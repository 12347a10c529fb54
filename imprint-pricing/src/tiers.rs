use rust_decimal::Decimal;

use imprint_catalog::ProductTierRow;

use crate::{PricingError, PricingResult};

/// Resolve the unit price for a quantity against an item's tier rows.
///
/// The applicable tier is the one with the largest price bar at or below the
/// quantity. A quantity below every published bar is priced at the lowest
/// tier's rate rather than rejected; this fallback is a deliberate policy,
/// not an accident. Price bars are unique per item (catalog invariant), so
/// there is no tie to break.
pub fn resolve_unit_price(
    item_code: &str,
    tiers: &[ProductTierRow],
    quantity: u32,
) -> PricingResult<Decimal> {
    let applicable =
        tiers.iter().filter(|t| t.price_bar <= quantity).max_by_key(|t| t.price_bar);
    let row = applicable
        .or_else(|| tiers.iter().min_by_key(|t| t.price_bar))
        .ok_or_else(|| PricingError::NoApplicablePrice { item_code: item_code.to_string() })?;
    Ok(row.unit_price)
}
