//! Tax calculation logic.
//!
//! [`breakdown`] holds the progressive bracket algorithm; [`salary`] turns
//! user text into a validated salary; [`common`] has the rounding helpers
//! shared by every presentation layer.

pub mod breakdown;
pub mod common;
pub mod salary;

pub use breakdown::{InvalidInput, TaxBreakdownCalculator};
pub use salary::parse_salary;
