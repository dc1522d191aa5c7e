//! Money helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations. All amounts
//! are `rust_decimal::Decimal`, rounded to two decimal places with Banker's
//! Rounding at the API boundary.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places stored for monetary amounts.
pub const MONEY_SCALE: u32 = 2;

/// Rounds a monetary amount to two decimal places using Banker's Rounding.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Validates that an amount is strictly positive.
///
/// # Errors
///
/// Returns a message suitable for surfacing verbatim to the caller.
pub fn validate_positive_amount(amount: Decimal) -> Result<(), String> {
    if amount <= Decimal::ZERO {
        return Err(format!("amount must be greater than zero, got {amount}"));
    }
    Ok(())
}

/// Validates that an amount is zero or positive.
///
/// # Errors
///
/// Returns a message suitable for surfacing verbatim to the caller.
pub fn validate_non_negative_amount(amount: Decimal) -> Result<(), String> {
    if amount < Decimal::ZERO {
        return Err(format!("amount cannot be negative, got {amount}"));
    }
    Ok(())
}
