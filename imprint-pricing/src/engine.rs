use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use imprint_catalog::Catalog;
use imprint_shared::round_money;

use crate::decoration::resolve_decoration_cost;
use crate::models::{CostBreakdown, DecorationCharge, PricingRequest};
use crate::shipping::ShippingPolicy;
use crate::tiers::resolve_unit_price;
use crate::{PricingError, PricingResult};

/// Invert a target margin into a sell price: `sell = cost / (1 - margin%)`.
///
/// A margin of 100% would divide by zero and anything above it flips the
/// sign, so both are rejected up front.
pub fn invert_margin(unit_cost: Decimal, margin_percent: u8) -> PricingResult<Decimal> {
    if margin_percent >= 100 {
        return Err(PricingError::InvalidMargin(margin_percent));
    }
    let keep = Decimal::ONE - Decimal::from(margin_percent) / dec!(100);
    Ok(round_money(unit_cost / keep))
}

/// Combine product and decoration costs into the full breakdown: totals,
/// shipping surcharge, per-unit cost, and the margin-adjusted sell price.
pub fn aggregate(
    product_cost: Decimal,
    decoration_costs: Vec<DecorationCharge>,
    quantity: u32,
    margin_percent: u8,
    shipping: &ShippingPolicy,
) -> PricingResult<CostBreakdown> {
    if quantity == 0 {
        return Err(PricingError::InvalidQuantity);
    }

    let decoration_total: Decimal = decoration_costs.iter().map(|c| c.cost).sum();
    let total_excl_shipping = product_cost + decoration_total;
    let shipping_cost = shipping.fee_for(product_cost, total_excl_shipping);
    let total_incl_shipping = total_excl_shipping + shipping_cost;
    let unit_cost = round_money(total_incl_shipping / Decimal::from(quantity));
    let sell_price = invert_margin(unit_cost, margin_percent)?;

    Ok(CostBreakdown {
        product_cost,
        decoration_costs,
        shipping_cost,
        total_excl_shipping,
        total_incl_shipping,
        unit_cost,
        sell_price,
    })
}

/// The pricing entry point.
///
/// Holds the shipping policy; everything else comes in per call. Quoting is
/// pure and synchronous: a catalog snapshot plus a request always produce
/// the same breakdown, so embeddings may run quotes concurrently against a
/// shared snapshot.
#[derive(Debug, Clone, Default)]
pub struct QuoteEngine {
    shipping: ShippingPolicy,
}

impl QuoteEngine {
    pub fn new(shipping: ShippingPolicy) -> Self {
        Self { shipping }
    }

    pub fn quote(
        &self,
        catalog: &Catalog,
        request: &PricingRequest,
    ) -> PricingResult<CostBreakdown> {
        if request.quantity == 0 {
            return Err(PricingError::InvalidQuantity);
        }
        if request.margin_percent >= 100 {
            return Err(PricingError::InvalidMargin(request.margin_percent));
        }

        let product = catalog
            .product(&request.item_code)
            .ok_or_else(|| PricingError::UnknownItem { item_code: request.item_code.clone() })?;

        let unit_price = resolve_unit_price(&request.item_code, product.tiers(), request.quantity)?;
        let product_cost = Decimal::from(request.quantity) * unit_price;

        let mut charges = Vec::with_capacity(request.decorations.len());
        for selection in &request.decorations {
            let technique = product
                .offers_technique(&selection.technique_code)
                .then(|| catalog.technique(&selection.technique_code))
                .flatten()
                .ok_or_else(|| PricingError::UnknownTechnique {
                    item_code: request.item_code.clone(),
                    technique_code: selection.technique_code.clone(),
                })?;
            let cost = resolve_decoration_cost(technique.rows(), request.quantity, selection)?;
            charges.push(DecorationCharge {
                technique_code: selection.technique_code.clone(),
                cost,
            });
        }

        let breakdown =
            aggregate(product_cost, charges, request.quantity, request.margin_percent, &self.shipping)?;
        tracing::debug!(
            item_code = %request.item_code,
            quantity = request.quantity,
            unit_cost = %breakdown.unit_cost,
            sell_price = %breakdown.sell_price,
            "quote resolved"
        );
        Ok(breakdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DecorationSelection;
    use imprint_catalog::{DecorationPriceRow, PriceDependence, ProductTierRow};

    fn catalog() -> Catalog {
        let product_rows = vec![
            ProductTierRow {
                item_code: "MUG".to_string(),
                description: "Ceramic mug".to_string(),
                decoration_codes: vec!["P1".to_string(), "GHOST".to_string()],
                price_bar: 1,
                unit_price: dec!(10.00),
            },
            ProductTierRow {
                item_code: "MUG".to_string(),
                description: "Ceramic mug".to_string(),
                decoration_codes: vec!["P1".to_string(), "GHOST".to_string()],
                price_bar: 100,
                unit_price: dec!(9.00),
            },
        ];
        let decoration_rows = vec![DecorationPriceRow {
            technique_code: "P1".to_string(),
            technique_name: "Pad print".to_string(),
            price_dependence: PriceDependence::Flat,
            color: None,
            size_cm2: None,
            setup_charge: dec!(20),
            unit_price: dec!(0.30),
            min_quantity: None,
        }];
        Catalog::load(product_rows, decoration_rows).unwrap()
    }

    fn request() -> PricingRequest {
        PricingRequest {
            item_code: "MUG".to_string(),
            quantity: 100,
            decorations: vec![DecorationSelection {
                technique_code: "P1".to_string(),
                color: None,
                size_cm2: None,
            }],
            margin_percent: 38,
        }
    }

    #[test]
    fn margin_inversion() {
        assert_eq!(invert_margin(dec!(10), 50).unwrap(), dec!(20.00));
        assert_eq!(invert_margin(dec!(10), 0).unwrap(), dec!(10));
        assert_eq!(invert_margin(dec!(10), 100).unwrap_err(), PricingError::InvalidMargin(100));
        assert_eq!(invert_margin(dec!(10), 250).unwrap_err(), PricingError::InvalidMargin(250));
    }

    #[test]
    fn aggregate_rejects_zero_quantity() {
        let err = aggregate(dec!(100), Vec::new(), 0, 10, &ShippingPolicy::default()).unwrap_err();
        assert_eq!(err, PricingError::InvalidQuantity);
    }

    #[test]
    fn aggregate_adds_shipping_below_threshold() {
        let breakdown =
            aggregate(dec!(100), Vec::new(), 10, 0, &ShippingPolicy::default()).unwrap();
        assert_eq!(breakdown.shipping_cost, dec!(18));
        assert_eq!(breakdown.total_incl_shipping, dec!(118));
        assert_eq!(breakdown.unit_cost, dec!(11.80));
    }

    #[test]
    fn end_to_end_quote_matches_the_worked_example() {
        // 100 mugs at 9.00, pad print at setup 20 + 100 × 0.30, margin 38%.
        let breakdown = QuoteEngine::default().quote(&catalog(), &request()).unwrap();

        assert_eq!(breakdown.product_cost, dec!(900.00));
        assert_eq!(breakdown.decoration_costs.len(), 1);
        assert_eq!(breakdown.decoration_costs[0].technique_code, "P1");
        assert_eq!(breakdown.decoration_costs[0].cost, dec!(50.00));
        assert_eq!(breakdown.total_excl_shipping, dec!(950.00));
        assert_eq!(breakdown.shipping_cost, Decimal::ZERO); // 950 >= 620
        assert_eq!(breakdown.total_incl_shipping, dec!(950.00));
        assert_eq!(breakdown.unit_cost, dec!(9.50));
        assert_eq!(breakdown.sell_price, dec!(15.32)); // 9.50 / 0.62
    }

    #[test]
    fn quoting_twice_is_idempotent() {
        let catalog = catalog();
        let engine = QuoteEngine::default();
        let first = engine.quote(&catalog, &request()).unwrap();
        let second = engine.quote(&catalog, &request()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_item_and_technique_are_typed_errors() {
        let catalog = catalog();
        let engine = QuoteEngine::default();

        let mut missing_item = request();
        missing_item.item_code = "CAP".to_string();
        assert_eq!(
            engine.quote(&catalog, &missing_item).unwrap_err(),
            PricingError::UnknownItem { item_code: "CAP".to_string() }
        );

        // Technique not offered for the item at all.
        let mut wrong_technique = request();
        wrong_technique.decorations[0].technique_code = "LASER".to_string();
        assert!(matches!(
            engine.quote(&catalog, &wrong_technique).unwrap_err(),
            PricingError::UnknownTechnique { .. }
        ));

        // Offered by the item but missing from the decoration catalog: the
        // dangling-reference case surfaces the same way.
        let mut dangling = request();
        dangling.decorations[0].technique_code = "GHOST".to_string();
        assert!(matches!(
            engine.quote(&catalog, &dangling).unwrap_err(),
            PricingError::UnknownTechnique { .. }
        ));
    }

    #[test]
    fn request_validation_happens_before_resolution() {
        let catalog = catalog();
        let engine = QuoteEngine::default();

        let mut zero_quantity = request();
        zero_quantity.quantity = 0;
        assert_eq!(engine.quote(&catalog, &zero_quantity).unwrap_err(), PricingError::InvalidQuantity);

        let mut full_margin = request();
        full_margin.margin_percent = 100;
        assert_eq!(
            engine.quote(&catalog, &full_margin).unwrap_err(),
            PricingError::InvalidMargin(100)
        );
    }
}
