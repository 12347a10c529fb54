use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Which amount the shipping threshold is compared against.
///
/// Historical revisions of the price sheet disagreed on this: one compared
/// the full order total, another the product cost alone. The two behaviors
/// are kept as explicit configuration, never merged in a single computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingBasis {
    /// Product cost plus decoration costs (the newer behavior, default).
    OrderTotal,
    /// Product cost alone.
    ProductOnly,
}

/// Threshold-and-fee shipping surcharge rule.
///
/// Orders whose basis amount is strictly below the threshold pay the fee;
/// everything at or above it ships free. The observed feed values are a 620
/// threshold with a fee of 13 or 18, but both are plain configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingPolicy {
    pub threshold: Decimal,
    pub fee: Decimal,
    pub basis: ShippingBasis,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self { threshold: dec!(620), fee: dec!(18), basis: ShippingBasis::OrderTotal }
    }
}

impl ShippingPolicy {
    pub fn fee_for(&self, product_cost: Decimal, total_excl_shipping: Decimal) -> Decimal {
        let base = match self.basis {
            ShippingBasis::OrderTotal => total_excl_shipping,
            ShippingBasis::ProductOnly => product_cost,
        };
        if base < self.threshold {
            self.fee
        } else {
            Decimal::ZERO
        }
    }
}
