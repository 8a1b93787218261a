//! Rounding helpers shared by the PAYE calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places in a currency amount.
pub const CURRENCY_DP: u32 = 2;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(690.8225)), dec!(690.82));
/// assert_eq!(round_half_up(dec!(0.005)), dec!(0.01));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(147.3225)), dec!(147.32));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(62.655)), dec!(62.66));
    }

    #[test]
    fn round_half_up_rounds_up_above_midpoint() {
        assert_eq!(round_half_up(dec!(62.6551)), dec!(62.66));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        assert_eq!(round_half_up(dec!(-12.345)), dec!(-12.35));
    }

    #[test]
    fn round_half_up_preserves_already_rounded_values() {
        let result = round_half_up(dec!(525.00));

        assert_eq!(result, dec!(525.00));
        assert_eq!(result.scale(), 2);
    }

    #[test]
    fn round_half_up_handles_zero() {
        assert_eq!(round_half_up(Decimal::ZERO), dec!(0.00));
    }

    #[test]
    fn round_half_up_handles_large_values() {
        assert_eq!(round_half_up(dec!(999999.999)), dec!(1000000.00));
    }
}
