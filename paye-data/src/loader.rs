use std::io::{self, Read};
use std::path::PathBuf;

use paye_core::{Bracket, BracketError, PayeCalculator, PayeCalculatorError};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading a bracket table.
#[derive(Debug, Error)]
pub enum BracketTableError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("cannot read bracket table '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A row held values that do not form a valid bracket.
    /// `row` is 1-based and does not count the CSV header.
    #[error("invalid bracket on row {row}: {source}")]
    InvalidBracket {
        row: usize,
        #[source]
        source: BracketError,
    },

    #[error(transparent)]
    Calculator(#[from] PayeCalculatorError),
}

impl From<csv::Error> for BracketTableError {
    fn from(err: csv::Error) -> Self {
        BracketTableError::CsvParse(err.to_string())
    }
}

/// A single, not yet validated, row of a bracket table.
///
/// - `rate_percent`: marginal rate as a percentage (e.g. 17.5)
/// - `chargeable_income`: width of the band
/// - `cumulative_income`: running total up to and including the band
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BracketRecord {
    pub rate_percent: Decimal,
    pub chargeable_income: Decimal,
    pub cumulative_income: Decimal,
}

impl BracketRecord {
    /// Validates the record into a [`Bracket`].
    pub fn to_bracket(&self) -> Result<Bracket, BracketError> {
        Bracket::new(
            self.rate_percent,
            self.chargeable_income,
            self.cumulative_income,
        )
    }
}

/// Loader for bracket tables stored as CSV.
///
/// The CSV file must have a header naming the columns `rate_percent`,
/// `chargeable_income` and `cumulative_income`; column order does not matter.
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_data::BracketTableLoader;
///
/// let csv = "rate_percent,chargeable_income,cumulative_income
/// 0,402,402
/// 5,110,512
/// ";
///
/// let calculator = BracketTableLoader::load(csv.as_bytes()).unwrap();
///
/// assert_eq!(calculator.compute(dec!(450)).unwrap(), dec!(2.40));
/// ```
pub struct BracketTableLoader;

impl BracketTableLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or a
    /// byte slice. Records are returned in file order and are not validated.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        debug!(records = records.len(), "parsed bracket records");
        Ok(records)
    }

    /// Validate records into brackets, stopping at the first invalid record.
    pub fn to_brackets(records: &[BracketRecord]) -> Result<Vec<Bracket>, BracketTableError> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                record
                    .to_bracket()
                    .map_err(|source| BracketTableError::InvalidBracket {
                        row: index + 1,
                        source,
                    })
            })
            .collect()
    }

    /// Parse, validate and build a [`PayeCalculator`] from a CSV reader.
    ///
    /// # Errors
    ///
    /// Returns [`BracketTableError`] if the CSV is malformed, a row is not a
    /// valid bracket, or the table has no rows.
    pub fn load<R: Read>(reader: R) -> Result<PayeCalculator, BracketTableError> {
        let records = Self::parse(reader)?;
        let brackets = Self::to_brackets(&records)?;

        Ok(PayeCalculator::new(brackets)?)
    }
}
