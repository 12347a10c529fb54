pub mod num;

pub use num::{parse_decimal, round_money, FormatError};
