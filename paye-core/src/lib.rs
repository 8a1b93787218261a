pub mod calculations;
pub mod models;

pub use calculations::{PayeCalculator, PayeCalculatorError};
pub use models::*;
