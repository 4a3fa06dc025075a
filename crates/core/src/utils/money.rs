//! Conversions between integer cents and decimal currency units.
//!
//! Amounts are stored and aggregated as integer cents. Decimal dollar values
//! only exist at the HTTP boundary.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::{Error, Result};

/// Converts a decimal dollar amount to cents, rounding half away from zero.
pub fn dollars_to_cents(amount: Decimal) -> Result<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| {
            cents
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        })
        .ok_or_else(|| Error::invalid_field("amount", "value is out of range"))
}

/// Converts cents to a decimal dollar amount with two fractional digits.
pub fn cents_to_dollars(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
