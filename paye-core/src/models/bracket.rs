use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Errors raised when a [`Bracket`] is constructed from invalid values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketError {
    /// The rate must be a percentage between 0 and 100 inclusive.
    #[error("invalid rate {0}: rate should be between 0 and 100")]
    InvalidRate(Decimal),

    /// The chargeable income must not be negative.
    #[error("invalid chargeable income {0}: value should not be less than 0")]
    InvalidChargeableIncome(Decimal),

    /// The cumulative income must not be negative.
    #[error("invalid cumulative income {0}: value should not be less than 0")]
    InvalidCumulativeIncome(Decimal),
}

/// A single marginal tax band.
///
/// `chargeable_income` is the width of the band and `cumulative_income` is the
/// running total of chargeable income up to and including this band. Fields are
/// private so a bracket can only be obtained through [`Bracket::new`].
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::Bracket;
///
/// let bracket = Bracket::new(dec!(17.5), dec!(3000), dec!(3642)).unwrap();
///
/// assert_eq!(bracket.rate_decimal(), dec!(0.175));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Bracket {
    rate_percent: Decimal,
    chargeable_income: Decimal,
    cumulative_income: Decimal,
}

impl Bracket {
    /// Creates a bracket after validating each field.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError`] if:
    /// - `rate_percent` is not in [0, 100]
    /// - `chargeable_income` is negative
    /// - `cumulative_income` is negative
    pub fn new(
        rate_percent: Decimal,
        chargeable_income: Decimal,
        cumulative_income: Decimal,
    ) -> Result<Self, BracketError> {
        if rate_percent < Decimal::ZERO || rate_percent > Decimal::ONE_HUNDRED {
            return Err(BracketError::InvalidRate(rate_percent));
        }
        if chargeable_income < Decimal::ZERO {
            return Err(BracketError::InvalidChargeableIncome(chargeable_income));
        }
        if cumulative_income < Decimal::ZERO {
            return Err(BracketError::InvalidCumulativeIncome(cumulative_income));
        }

        Ok(Self {
            rate_percent,
            chargeable_income,
            cumulative_income,
        })
    }

    pub fn rate_percent(&self) -> Decimal {
        self.rate_percent
    }

    /// The rate as a fraction, e.g. `0.175` for a 17.5% band.
    pub fn rate_decimal(&self) -> Decimal {
        self.rate_percent / Decimal::ONE_HUNDRED
    }

    pub fn chargeable_income(&self) -> Decimal {
        self.chargeable_income
    }

    pub fn cumulative_income(&self) -> Decimal {
        self.cumulative_income
    }

    /// Tax contributed by the slice of `taxable_income` above this bracket.
    ///
    /// The rate applied to the slice comes from `next`, the bracket that
    /// follows this one, and the slice is capped at `next`'s chargeable
    /// income. When there is no following bracket the remainder is taxed at
    /// this bracket's own rate. The result is not rounded.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use paye_core::Bracket;
    ///
    /// let current = Bracket::new(dec!(17.5), dec!(3000), dec!(3642)).unwrap();
    /// let next = Bracket::new(dec!(25), dec!(16395), dec!(20037)).unwrap();
    ///
    /// assert_eq!(current.slice_tax(dec!(4231.29), Some(&next)), dec!(147.3225));
    /// ```
    pub fn slice_tax(
        &self,
        taxable_income: Decimal,
        next: Option<&Bracket>,
    ) -> Decimal {
        let remainder = taxable_income - self.cumulative_income;

        match next {
            Some(next) if remainder > next.chargeable_income => {
                next.chargeable_income * next.rate_decimal()
            }
            Some(next) => remainder * next.rate_decimal(),
            None => remainder * self.rate_decimal(),
        }
    }
}

impl fmt::Display for Bracket {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{}% on {} (cumulative {})",
            self.rate_percent, self.chargeable_income, self.cumulative_income
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn bracket(
        rate: Decimal,
        chargeable: Decimal,
        cumulative: Decimal,
    ) -> Bracket {
        Bracket::new(rate, chargeable, cumulative).expect("valid bracket")
    }

    // =========================================================================
    // Bracket::new tests
    // =========================================================================

    #[test]
    fn new_accepts_valid_values() {
        let result = Bracket::new(dec!(5), dec!(110), dec!(512)).unwrap();

        assert_eq!(result.rate_percent(), dec!(5));
        assert_eq!(result.chargeable_income(), dec!(110));
        assert_eq!(result.cumulative_income(), dec!(512));
    }

    #[test]
    fn new_accepts_zero_rate() {
        assert!(Bracket::new(dec!(0), dec!(402), dec!(402)).is_ok());
    }

    #[test]
    fn new_accepts_hundred_percent_rate() {
        assert!(Bracket::new(dec!(100), dec!(100000), dec!(100000)).is_ok());
    }

    #[test]
    fn new_accepts_zero_incomes() {
        assert!(Bracket::new(dec!(10), dec!(0), dec!(0)).is_ok());
    }

    #[test]
    fn new_rejects_negative_rate() {
        let result = Bracket::new(dec!(-0.01), dec!(110), dec!(512));

        assert_eq!(result, Err(BracketError::InvalidRate(dec!(-0.01))));
    }

    #[test]
    fn new_rejects_rate_above_hundred() {
        let result = Bracket::new(dec!(100.5), dec!(110), dec!(512));

        assert_eq!(result, Err(BracketError::InvalidRate(dec!(100.5))));
    }

    #[test]
    fn new_rejects_negative_chargeable_income() {
        let result = Bracket::new(dec!(5), dec!(-1), dec!(512));

        assert_eq!(result, Err(BracketError::InvalidChargeableIncome(dec!(-1))));
    }

    #[test]
    fn new_rejects_negative_cumulative_income() {
        let result = Bracket::new(dec!(5), dec!(110), dec!(-512));

        assert_eq!(
            result,
            Err(BracketError::InvalidCumulativeIncome(dec!(-512)))
        );
    }

    #[test]
    fn new_checks_rate_before_incomes() {
        let result = Bracket::new(dec!(101), dec!(-1), dec!(-1));

        assert_eq!(result, Err(BracketError::InvalidRate(dec!(101))));
    }

    #[test]
    fn rate_decimal_divides_by_hundred() {
        assert_eq!(bracket(dec!(5), dec!(110), dec!(512)).rate_decimal(), dec!(0.05));
        assert_eq!(bracket(dec!(0), dec!(402), dec!(402)).rate_decimal(), dec!(0));
        assert_eq!(bracket(dec!(100), dec!(1), dec!(1)).rate_decimal(), dec!(1));
    }

    #[test]
    fn equality_compares_all_fields() {
        let a = bracket(dec!(5), dec!(110), dec!(512));

        assert_eq!(a, bracket(dec!(5), dec!(110), dec!(512)));
        assert_ne!(a, bracket(dec!(5), dec!(110), dec!(513)));
        assert_ne!(a, bracket(dec!(5), dec!(111), dec!(512)));
        assert_ne!(a, bracket(dec!(6), dec!(110), dec!(512)));
    }

    #[test]
    fn display_shows_rate_and_incomes() {
        let result = bracket(dec!(17.5), dec!(3000), dec!(3642)).to_string();

        assert_eq!(result, "17.5% on 3000 (cumulative 3642)");
    }

    // =========================================================================
    // slice_tax tests
    // =========================================================================

    #[test]
    fn slice_tax_caps_at_next_chargeable_income() {
        let current = bracket(dec!(0), dec!(402), dec!(402));
        let next = bracket(dec!(5), dec!(110), dec!(512));

        let result = current.slice_tax(dec!(4231.29), Some(&next));

        assert_eq!(result, dec!(5.50));
    }

    #[test]
    fn slice_tax_taxes_remainder_at_next_rate() {
        let current = bracket(dec!(10), dec!(130), dec!(642));
        let next = bracket(dec!(17.5), dec!(3000), dec!(3642));

        let result = current.slice_tax(dec!(1000), Some(&next));

        assert_eq!(result, dec!(62.65));
    }

    #[test]
    fn slice_tax_remainder_equal_to_next_slice_is_not_capped() {
        let current = bracket(dec!(0), dec!(402), dec!(402));
        let next = bracket(dec!(5), dec!(110), dec!(512));

        let result = current.slice_tax(dec!(512), Some(&next));

        assert_eq!(result, dec!(5.50));
    }

    #[test]
    fn slice_tax_uses_own_rate_without_next() {
        let current = bracket(dec!(30), dec!(29963), dec!(50000));

        let result = current.slice_tax(dec!(60000), None);

        assert_eq!(result, dec!(3000));
    }

    #[test]
    fn slice_tax_is_unrounded() {
        let current = bracket(dec!(0), dec!(0), dec!(0));
        let next = bracket(dec!(17.5), dec!(3000), dec!(3000));

        let result = current.slice_tax(dec!(0.01), Some(&next));

        assert_eq!(result, dec!(0.00175));
    }
}
