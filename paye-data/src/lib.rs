//! Loading of PAYE bracket tables from CSV and TOML data.

mod config;
mod loader;

pub use config::BracketTableConfig;
pub use loader::{BracketRecord, BracketTableError, BracketTableLoader};
