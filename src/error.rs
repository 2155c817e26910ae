//! Failure taxonomy shared by every validated statistic.

use crate::sample::HighPrecisionFloat;
use thiserror::Error;

/// Reason a statistic could not be computed.
///
/// Composite statistics return the first failure of the step they delegate to,
/// without wrapping it. The `Display` text is meant for logs; match on the variant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// The two series have different lengths.
    #[error("series lengths differ: x has {len_x} values, but y has {len_y}")]
    ShapeMismatch { len_x: usize, len_y: usize },

    /// A series that must hold at least one value is empty.
    #[error("series must not be empty")]
    EmptyInput,

    /// Fewer paired observations than the statistic is defined for.
    #[error("not enough data points: at least {needed} are required, but there are {n}")]
    InsufficientData { needed: usize, n: usize },

    /// Round-off produced a negative value under a square root that is mathematically
    /// non-negative.
    #[error(
        "negative radicand {radicand} computed from sum = {sum}, sum of squares = {sum_squared}, n = {n}"
    )]
    NegativeRadicand {
        sum: HighPrecisionFloat,
        sum_squared: HighPrecisionFloat,
        n: usize,
        radicand: HighPrecisionFloat,
    },

    /// The correlation denominator is zero because a series is constant.
    #[error("denominator is zero: at least one series has zero variance")]
    DegenerateVariance,

    /// An intermediate term or the result overflowed, or an input was NaN or infinite.
    #[error("{quantity} is not finite: {value}")]
    NonFinite {
        quantity: &'static str,
        value: HighPrecisionFloat,
    },

    /// A sum of products was negative in a domain the caller declared non-negative.
    #[error("sum of products must be non-negative, but is {total}")]
    NegativeSumProduct { total: HighPrecisionFloat },
}

pub type Result<T> = std::result::Result<T, StatsError>;
