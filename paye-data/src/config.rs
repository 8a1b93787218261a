//! TOML bracket table configuration.
//!
//! A table is an optional `name` followed by one `[[brackets]]` entry per
//! band. Amounts may be written as TOML numbers or as strings; strings keep
//! the exact decimal value.
//!
//! ```toml
//! name = "Ghana monthly PAYE"
//!
//! [[brackets]]
//! rate_percent = "0"
//! chargeable_income = "402"
//! cumulative_income = "402"
//!
//! [[brackets]]
//! rate_percent = "5"
//! chargeable_income = "110"
//! cumulative_income = "512"
//! ```

use std::fs;
use std::path::Path;

use paye_core::PayeCalculator;
use serde::Deserialize;
use tracing::debug;

use crate::loader::{BracketRecord, BracketTableError, BracketTableLoader};

/// A named bracket table read from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BracketTableConfig {
    /// Human-readable label for the table, used only in logs.
    #[serde(default)]
    pub name: Option<String>,

    pub brackets: Vec<BracketRecord>,
}

impl BracketTableConfig {
    /// Parses a table from TOML text.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use paye_data::BracketTableConfig;
    ///
    /// let config = BracketTableConfig::from_toml_str(
    ///     r#"
    ///     [[brackets]]
    ///     rate_percent = 0
    ///     chargeable_income = 402
    ///     cumulative_income = 402
    ///
    ///     [[brackets]]
    ///     rate_percent = 5
    ///     chargeable_income = 110
    ///     cumulative_income = 512
    ///     "#,
    /// )
    /// .unwrap();
    ///
    /// let calculator = config.into_calculator().unwrap();
    /// assert_eq!(calculator.compute(dec!(600)).unwrap(), dec!(5.50));
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self, BracketTableError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses a table from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, BracketTableError> {
        let contents = fs::read_to_string(path).map_err(|source| BracketTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&contents)
    }

    /// Validates every entry and builds a [`PayeCalculator`].
    ///
    /// # Errors
    ///
    /// Returns [`BracketTableError::InvalidBracket`] naming the 1-based entry
    /// that failed validation, or [`BracketTableError::Calculator`] if the
    /// table has no entries.
    pub fn into_calculator(self) -> Result<PayeCalculator, BracketTableError> {
        let brackets = BracketTableLoader::to_brackets(&self.brackets)?;
        debug!(
            table = self.name.as_deref().unwrap_or("unnamed"),
            brackets = brackets.len(),
            "building PAYE calculator"
        );

        Ok(PayeCalculator::new(brackets)?)
    }
}
