//! Graduated PAYE calculation over a table of marginal brackets.
//!
//! The calculator keeps its brackets sorted by rate and walks them from the
//! lowest rate upwards. Each bracket taxes the slice of income above its
//! cumulative threshold at the rate of the bracket that follows it, capped at
//! that following bracket's chargeable income. The walk stops at the first
//! bracket whose cumulative income already covers the taxable income, or at
//! the last bracket.
//!
//! # Example
//!
//! Using the monthly Ghana bracket table:
//!
//! | Rate  | Chargeable income | Cumulative income |
//! |-------|-------------------|-------------------|
//! | 0%    | 402               | 402               |
//! | 5%    | 110               | 512               |
//! | 10%   | 130               | 642               |
//! | 17.5% | 3,000             | 3,642             |
//! | 25%   | 16,395            | 20,037            |
//! | 30%   | 29,963            | 50,000            |
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paye_core::{Bracket, PayeCalculator};
//!
//! let brackets = vec![
//!     Bracket::new(dec!(0), dec!(402), dec!(402)).unwrap(),
//!     Bracket::new(dec!(5), dec!(110), dec!(512)).unwrap(),
//!     Bracket::new(dec!(10), dec!(130), dec!(642)).unwrap(),
//!     Bracket::new(dec!(17.5), dec!(3000), dec!(3642)).unwrap(),
//!     Bracket::new(dec!(25), dec!(16395), dec!(20037)).unwrap(),
//!     Bracket::new(dec!(30), dec!(29963), dec!(50000)).unwrap(),
//! ];
//!
//! let calculator = PayeCalculator::new(brackets).unwrap();
//!
//! // 5.50 + 13.00 + 525.00 + 147.3225
//! assert_eq!(calculator.compute(dec!(4231.29)).unwrap(), dec!(690.82));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::Bracket;
use crate::calculations::common::round_half_up;

/// Errors that can occur while managing brackets or computing PAYE.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayeCalculatorError {
    /// The calculator holds no brackets.
    #[error("tax brackets cannot be empty, at least one bracket is required")]
    EmptyBracketList,

    /// The bracket to remove is not held by the calculator.
    #[error("bracket not found: {0}")]
    BracketNotFound(Bracket),
}

/// Calculator for graduated PAYE.
///
/// Brackets are always held in ascending order of
/// [`rate_percent`](Bracket::rate_percent). Brackets with equal rates keep the
/// order in which they were supplied, so callers must supply them in an order
/// consistent with ascending cumulative income.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayeCalculator {
    brackets: Vec<Bracket>,
}

impl PayeCalculator {
    /// Creates a calculator from the given brackets.
    ///
    /// # Errors
    ///
    /// Returns [`PayeCalculatorError::EmptyBracketList`] if `brackets` is empty.
    pub fn new(brackets: Vec<Bracket>) -> Result<Self, PayeCalculatorError> {
        if brackets.is_empty() {
            return Err(PayeCalculatorError::EmptyBracketList);
        }

        let mut calculator = Self { brackets };
        calculator.sort_brackets();
        Ok(calculator)
    }

    /// The brackets in ascending rate order.
    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// Adds a bracket. Duplicates are permitted.
    pub fn add(
        &mut self,
        bracket: Bracket,
    ) {
        debug!(
            rate = %bracket.rate_percent(),
            cumulative_income = %bracket.cumulative_income(),
            "adding bracket"
        );
        self.brackets.push(bracket);
        self.sort_brackets();
    }

    /// Removes the first bracket equal to `bracket`.
    ///
    /// Removing the last remaining bracket is allowed; a later
    /// [`compute`](Self::compute) call then fails with
    /// [`PayeCalculatorError::EmptyBracketList`].
    ///
    /// # Errors
    ///
    /// Returns [`PayeCalculatorError::BracketNotFound`] if no held bracket is
    /// equal to `bracket`. The calculator is left unchanged.
    pub fn remove(
        &mut self,
        bracket: &Bracket,
    ) -> Result<(), PayeCalculatorError> {
        let index = self
            .brackets
            .iter()
            .position(|b| b == bracket)
            .ok_or_else(|| PayeCalculatorError::BracketNotFound(bracket.clone()))?;

        self.brackets.remove(index);
        self.sort_brackets();

        debug!(
            rate = %bracket.rate_percent(),
            cumulative_income = %bracket.cumulative_income(),
            "removed bracket"
        );
        if self.brackets.is_empty() {
            warn!("last bracket removed; PAYE cannot be computed until a bracket is added");
        }
        Ok(())
    }

    /// Computes PAYE for `taxable_income`, rounded to two decimal places.
    ///
    /// Income at or below the lowest bracket's cumulative income is taxed at
    /// zero.
    ///
    /// # Errors
    ///
    /// Returns [`PayeCalculatorError::EmptyBracketList`] if every bracket has
    /// been removed.
    pub fn compute(
        &self,
        taxable_income: Decimal,
    ) -> Result<Decimal, PayeCalculatorError> {
        if self.brackets.is_empty() {
            warn!(taxable_income = %taxable_income, "PAYE requested with no brackets");
            return Err(PayeCalculatorError::EmptyBracketList);
        }

        let mut paye = Decimal::ZERO;

        for (index, current) in self.brackets.iter().enumerate() {
            let Some(next) = self.brackets.get(index + 1) else {
                break;
            };
            if taxable_income <= current.cumulative_income() {
                break;
            }

            let tax = current.slice_tax(taxable_income, Some(next));
            debug!(
                rate = %next.rate_percent(),
                threshold = %current.cumulative_income(),
                tax = %tax,
                "taxed income slice"
            );
            paye += tax;
        }

        let paye = round_half_up(paye);
        debug!(taxable_income = %taxable_income, paye = %paye, "computed PAYE");
        Ok(paye)
    }

    fn sort_brackets(&mut self) {
        self.brackets.sort_by_key(Bracket::rate_percent);
    }
}
