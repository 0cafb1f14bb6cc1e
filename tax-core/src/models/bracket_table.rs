//! Validated, ordered progressive bracket table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ScheduleError, TaxBracket};

/// An ordered sequence of [`TaxBracket`]s that partitions `[0, ∞)`.
///
/// Invariants, checked by [`BracketTable::new`]:
/// - at least one bracket
/// - upper bounds are positive and strictly increasing
/// - the last bracket, and only the last, is unbounded
/// - every rate lies in `[0, 1]` and rates never decrease
///
/// The table is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Builds a table after checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScheduleError`] found, scanning brackets in order.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, ScheduleError> {
        let Some(last) = brackets.last() else {
            return Err(ScheduleError::EmptyTable);
        };
        let last_index = brackets.len() - 1;

        let mut previous_bound = Decimal::ZERO;
        let mut previous_rate = Decimal::ZERO;

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(ScheduleError::RateOutOfRange {
                    index,
                    rate: bracket.rate,
                });
            }
            if bracket.rate < previous_rate {
                return Err(ScheduleError::RateDecreasing {
                    index,
                    rate: bracket.rate,
                });
            }

            match bracket.upper_bound {
                Some(bound) if bound <= previous_bound => {
                    return Err(ScheduleError::BoundNotIncreasing { index, bound });
                }
                Some(bound) => previous_bound = bound,
                None if index != last_index => {
                    return Err(ScheduleError::UnboundedBracketNotLast { index });
                }
                None => {}
            }

            previous_rate = bracket.rate;
        }

        if !last.is_unbounded() {
            return Err(ScheduleError::MissingUnboundedBracket);
        }

        Ok(Self { brackets })
    }

    /// Wraps brackets that are known to be valid (the built-in schedules).
    pub(crate) fn from_trusted(brackets: Vec<TaxBracket>) -> Self {
        debug_assert!(Self::new(brackets.clone()).is_ok());
        Self { brackets }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaxBracket> {
        self.brackets.iter()
    }
}

impl TryFrom<Vec<TaxBracket>> for BracketTable {
    type Error = ScheduleError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<BracketTable> for Vec<TaxBracket> {
    fn from(table: BracketTable) -> Self {
        table.brackets
    }
}

impl<'a> IntoIterator for &'a BracketTable {
    type Item = &'a TaxBracket;
    type IntoIter = std::slice::Iter<'a, TaxBracket>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
