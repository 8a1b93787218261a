//! PAYE calculation modules.
//!
//! This module provides the graduated tax calculator along with the shared
//! rounding helpers used to produce currency amounts.

pub mod common;
pub mod paye;

pub use paye::{PayeCalculator, PayeCalculatorError};
