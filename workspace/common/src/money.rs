use rust_decimal::Decimal;
use rusty_money::{iso, Money};

/// Formats an amount as Indian rupees, e.g. `₹1,234.50`.
pub fn format_inr(amount: Decimal) -> String {
    Money::from_decimal(amount.round_dp(2), iso::INR).to_string()
}

/// Formats a stock quantity with its unit, trimming trailing zeros.
pub fn format_quantity(quantity: Decimal, unit: Option<&str>) -> String {
    let value = quantity.normalize();
    match unit {
        Some(unit) if !unit.trim().is_empty() => format!("{} {}", value, unit.trim()),
        _ => value.to_string(),
    }
}
