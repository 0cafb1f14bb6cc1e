use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One slice of a progressive schedule.
///
/// The lower bound is implied by the previous bracket's `upper_bound`
/// (or zero for the first bracket). `None` means the bracket is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn bounded(
        upper_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.upper_bound.is_none()
    }
}
