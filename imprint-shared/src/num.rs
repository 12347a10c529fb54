use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// A catalog field that should have been a decimal numeral but is not.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed decimal literal {literal:?}")]
pub struct FormatError {
    pub literal: String,
}

/// Parse a decimal that may use either a comma or a dot as its fractional
/// separator.
///
/// The price feeds write `"9,50"` where API clients write `"9.50"`; both must
/// mean the same number. A comma is taken as the decimal separator only when
/// no dot is present. A literal carrying both separators is ambiguous
/// (thousands grouping cannot be told apart from a typo) and is rejected.
pub fn parse_decimal(raw: &str) -> Result<Decimal, FormatError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || (trimmed.contains(',') && trimmed.contains('.')) {
        return Err(FormatError { literal: raw.to_string() });
    }

    let normalized = if trimmed.contains(',') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };

    Decimal::from_str(&normalized).map_err(|_| FormatError { literal: raw.to_string() })
}

/// Round a monetary amount to two decimal places, midpoint away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
