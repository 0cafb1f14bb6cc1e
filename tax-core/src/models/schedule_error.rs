use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a bracket table or flat-rate set is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// A schedule needs at least one bracket.
    #[error("bracket table is empty")]
    EmptyTable,

    /// Upper bounds must be positive and strictly increasing.
    #[error("bracket {index}: upper bound {bound} does not exceed the previous bound")]
    BoundNotIncreasing { index: usize, bound: Decimal },

    /// Only the final bracket may be open-ended.
    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedBracketNotLast { index: usize },

    /// The final bracket must be open-ended so every salary is covered.
    #[error("the last bracket must be unbounded")]
    MissingUnboundedBracket,

    #[error("bracket {index}: rate {rate} is outside [0, 1]")]
    RateOutOfRange { index: usize, rate: Decimal },

    /// Rates must be non-decreasing from one bracket to the next.
    #[error("bracket {index}: rate {rate} is lower than the previous bracket's rate")]
    RateDecreasing { index: usize, rate: Decimal },

    #[error("{name} rate {rate} is outside [0, 1]")]
    FlatRateOutOfRange { name: &'static str, rate: Decimal },
}
