use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One quantity tier of a base product's price list.
///
/// The rows sharing an `item_code` form a step function over quantity:
/// `price_bar` is the minimum quantity at which `unit_price` applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTierRow {
    pub item_code: String,
    pub description: String,
    /// Technique codes offered for this item, in feed order.
    pub decoration_codes: Vec<String>,
    pub price_bar: u32,
    pub unit_price: Decimal,
}

/// Which catalog dimension selects a decoration's variable price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceDependence {
    /// A single price row, independent of configuration.
    Flat,
    /// One row per printable color count (or the full-color key).
    ColorCount,
    /// One row per print area in cm².
    Size,
    /// One row per minimum-quantity threshold, resolved like product tiers.
    QuantityTier,
}

impl PriceDependence {
    /// Parse a feed value. The feeds are case-inconsistent ("Colors" vs
    /// "colors" across revisions), so matching is case-insensitive; the set
    /// of accepted spellings is still closed.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "none" | "flat" => Some(Self::Flat),
            "colors" | "color" | "colorcount" => Some(Self::ColorCount),
            "size" => Some(Self::Size),
            "quantity" | "qty" => Some(Self::QuantityTier),
            _ => None,
        }
    }
}

impl fmt::Display for PriceDependence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Flat => "flat",
            Self::ColorCount => "color count",
            Self::Size => "size",
            Self::QuantityTier => "quantity tier",
        };
        f.write_str(s)
    }
}

/// A color-count key. "Full color" is a key of its own in the decoration
/// feed, never a numeric count, so it gets its own variant instead of a
/// sentinel number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSelection {
    Count(u32),
    FullColor,
}

impl ColorSelection {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("full color") || trimmed.eq_ignore_ascii_case("full colour")
        {
            return Some(Self::FullColor);
        }
        trimmed.parse::<u32>().ok().filter(|n| *n > 0).map(Self::Count)
    }
}

impl fmt::Display for ColorSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n} color(s)"),
            Self::FullColor => f.write_str("full color"),
        }
    }
}

/// One price row of a decoration/print technique.
///
/// Which of the optional keys is populated depends on `price_dependence`:
/// `color` for [`PriceDependence::ColorCount`], `size_cm2` for
/// [`PriceDependence::Size`], `min_quantity` for
/// [`PriceDependence::QuantityTier`]. Flat techniques carry exactly one row
/// with no key at all. Enforced by `Catalog::load`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorationPriceRow {
    pub technique_code: String,
    pub technique_name: String,
    pub price_dependence: PriceDependence,
    pub color: Option<ColorSelection>,
    pub size_cm2: Option<Decimal>,
    /// Charged once per order per technique, never scaled by quantity.
    pub setup_charge: Decimal,
    pub unit_price: Decimal,
    pub min_quantity: Option<u32>,
}
