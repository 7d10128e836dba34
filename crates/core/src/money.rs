//! Money

use rust_decimal::Decimal;
use rusty_money::{Money, iso};

/// Currency all amounts are displayed in.
pub const CURRENCY: &iso::Currency = iso::INR;

/// Format an amount in the display currency, e.g. `₹1,234.50`.
pub fn format_amount(amount: Decimal) -> String {
    Money::from_decimal(amount, CURRENCY).to_string()
}
