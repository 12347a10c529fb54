use rust_decimal::Decimal;

use imprint_catalog::{DecorationPriceRow, PriceDependence};

use crate::models::DecorationSelection;
use crate::{PricingError, PricingResult};

/// Resolve the total cost of one decoration technique for a quantity.
///
/// Dispatches on the row set's price dependence (shared across the set, a
/// catalog invariant) to pick the variable unit price, then applies the one
/// formula every technique follows:
///
/// `total = setup_charge + quantity × unit_price`
///
/// The setup charge is incurred once per order per technique, never scaled
/// by the quantity.
pub fn resolve_decoration_cost(
    rows: &[DecorationPriceRow],
    quantity: u32,
    selection: &DecorationSelection,
) -> PricingResult<Decimal> {
    let first = rows.first().ok_or_else(|| unmatched(selection, "no price rows published"))?;

    let row = match first.price_dependence {
        PriceDependence::Flat => first,
        PriceDependence::ColorCount => {
            let color = selection
                .color
                .ok_or_else(|| unmatched(selection, "a color count is required"))?;
            rows.iter()
                .find(|r| r.color == Some(color))
                .ok_or_else(|| unmatched(selection, &format!("{color} is not offered")))?
        }
        PriceDependence::Size => {
            // Exact size match only; sizes between published rows are not
            // interpolated.
            let size = selection
                .size_cm2
                .ok_or_else(|| unmatched(selection, "a print size is required"))?;
            rows.iter()
                .find(|r| r.size_cm2 == Some(size))
                .ok_or_else(|| unmatched(selection, &format!("size {size} cm2 is not offered")))?
        }
        PriceDependence::QuantityTier => {
            // Same resolution and below-lowest-threshold fallback as the
            // product tier resolver, on purpose.
            rows.iter()
                .filter(|r| r.min_quantity.is_some_and(|bar| bar <= quantity))
                .max_by_key(|r| r.min_quantity)
                .or_else(|| {
                    rows.iter().filter(|r| r.min_quantity.is_some()).min_by_key(|r| r.min_quantity)
                })
                .ok_or_else(|| unmatched(selection, "no quantity thresholds published"))?
        }
    };

    Ok(row.setup_charge + Decimal::from(quantity) * row.unit_price)
}

fn unmatched(selection: &DecorationSelection, detail: &str) -> PricingError {
    PricingError::UnmatchedConfiguration {
        technique_code: selection.technique_code.clone(),
        detail: detail.to_string(),
    }
}
