pub mod calculations;
pub mod models;

pub use calculations::{InvalidInput, TaxBreakdownCalculator, parse_salary};
pub use models::*;
