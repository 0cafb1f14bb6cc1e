//! Common utility functions for tax calculations.
//!
//! Rounding only ever happens here, at display time. The calculator itself
//! works with unrounded values.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to `dp` places using half-up rounding.
///
/// Values exactly at the midpoint are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454), 2), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455), 2), dec!(123.46));
/// assert_eq!(round_half_up(dec!(31.74552), 2), dec!(31.75));
/// ```
pub fn round_half_up(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the smaller of two decimal values.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::min;
///
/// assert_eq!(min(dec!(100.00), dec!(200.00)), dec!(100.00));
/// ```
pub fn min(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a < b { a } else { b }
}

/// Formats a money amount with exactly two decimals, e.g. `9727.60`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::format_amount;
///
/// assert_eq!(format_amount(dec!(9727.6)), "9727.60");
/// assert_eq!(format_amount(dec!(0)), "0.00");
/// ```
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", round_half_up(amount, 2))
}

/// Formats a fractional rate as a percentage with one decimal, e.g.
/// `0.017` becomes `1.7`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::format_rate_percent;
///
/// assert_eq!(format_rate_percent(dec!(0.017)), "1.7");
/// assert_eq!(format_rate_percent(dec!(0.0)), "0.0");
/// ```
pub fn format_rate_percent(rate: Decimal) -> String {
    format!("{:.1}", round_half_up(rate * Decimal::ONE_HUNDRED, 1))
}
