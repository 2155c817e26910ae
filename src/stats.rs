//! Single-series accumulators and the aggregates derived from them.

use crate::sample::{CompensatedSum, HighPrecisionFloat, Sample};

/// Total of all values; `0` for an empty series.
pub fn sum<T: Sample>(vals: &[T]) -> HighPrecisionFloat {
    vals.iter().map(|&val| val.widen()).collect::<CompensatedSum>().value()
}

/// Total of every value squared; `0` for an empty series.
pub fn sum_squared<T: Sample>(vals: &[T]) -> HighPrecisionFloat {
    vals.iter()
        .map(|&val| {
            let val = val.widen();
            val * val
        })
        .collect::<CompensatedSum>()
        .value()
}

/// Product of all values, seeded at the multiplicative identity.
///
/// An empty series yields `1`, not `0`.
pub fn product<T: Sample>(vals: &[T]) -> HighPrecisionFloat {
    vals.iter().fold(1.0, |acc, &val| acc * val.widen())
}

/// Arithmetic mean; `0` for an empty series.
pub fn average<T: Sample>(vals: &[T]) -> HighPrecisionFloat {
    if vals.is_empty() {
        return 0.0;
    }
    sum(vals) / vals.len() as HighPrecisionFloat
}

/// Geometric mean, the `n`-th root of the product; `0` for an empty series.
///
/// Values are expected to be positive. A zero or negative product follows `powf`.
pub fn geometric_mean<T: Sample>(vals: &[T]) -> HighPrecisionFloat {
    if vals.is_empty() {
        return 0.0;
    }
    product(vals).powf(1.0 / vals.len() as HighPrecisionFloat)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn integer_sum_is_exact(vals in proptest::collection::vec(-1_000_000_i64..1_000_000, 1..200)) {
            let exact: i64 = vals.iter().sum();
            prop_assert_eq!(sum(&vals), exact as f64);
        }

        #[test]
        fn integer_sum_squared_is_exact(vals in proptest::collection::vec(-10_000_i64..10_000, 1..200)) {
            let exact: i64 = vals.iter().map(|v| v * v).sum();
            prop_assert_eq!(sum_squared(&vals), exact as f64);
        }

        #[test]
        fn average_lies_between_extremes(vals in proptest::collection::vec(-1e6_f64..1e6, 1..100)) {
            let avg = average(&vals);
            let min = vals.iter().copied().fold(f64::INFINITY, f64::min);
            let max = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(avg >= min - 1e-9 && avg <= max + 1e-9, "average {} outside [{}, {}]", avg, min, max);
        }
    }
}
