//! Paired statistics over two equal-length series.
//!
//! Everything here uses the raw-score formulas, built from the plain sums, the sums of
//! squares and the sum of products of the two series:
//!
//! - covariance: `(Σxy − ΣxΣy/n) / (n−1)`
//! - correlation: `(nΣxy − ΣxΣy) / (sqrt(nΣx² − (Σx)²) · sqrt(nΣy² − (Σy)²))`
//!
//! Lengths are always compared before any value is read.

use crate::error::{Result, StatsError};
use crate::sample::{CompensatedSum, HighPrecisionFloat, Sample};
use crate::stats::{sum, sum_squared};

/// Sign constraint a caller may place on a sum of products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductDomain {
    /// Any total is accepted.
    #[default]
    Any,
    /// The series are known to be non-negatively related (for example both all
    /// positive), so a negative total signals bad input.
    NonNegative,
}

fn check_same_len(len_x: usize, len_y: usize) -> Result<()> {
    if len_x != len_y {
        return Err(StatsError::ShapeMismatch { len_x, len_y });
    }
    Ok(())
}

fn check_enough_points(n: usize, needed: usize) -> Result<()> {
    if n < needed {
        return Err(StatsError::InsufficientData { needed, n });
    }
    Ok(())
}

fn check_finite(quantity: &'static str, value: HighPrecisionFloat) -> Result<HighPrecisionFloat> {
    if !value.is_finite() {
        return Err(StatsError::NonFinite { quantity, value });
    }
    Ok(value)
}

/// Sum of element-wise products `Σ xᵢ·yᵢ`.
///
/// # Errors
/// [`StatsError::ShapeMismatch`] if the lengths differ, then
/// [`StatsError::EmptyInput`] if both series are empty, and
/// [`StatsError::NonFinite`] if the total overflows or an input is not finite.
pub fn sum_product<T: Sample, U: Sample>(x: &[T], y: &[U]) -> Result<HighPrecisionFloat> {
    sum_product_in(x, y, ProductDomain::Any)
}

/// Sum of element-wise products with an explicit sign constraint on the total.
///
/// # Errors
/// As [`sum_product`], plus [`StatsError::NegativeSumProduct`] when `domain` is
/// [`ProductDomain::NonNegative`] and the total is negative.
pub fn sum_product_in<T: Sample, U: Sample>(
    x: &[T],
    y: &[U],
    domain: ProductDomain,
) -> Result<HighPrecisionFloat> {
    check_same_len(x.len(), y.len())?;
    if x.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let total = x
        .iter()
        .zip(y)
        .map(|(&x_val, &y_val)| x_val.widen() * y_val.widen())
        .collect::<CompensatedSum>()
        .value();
    let total = check_finite("sum of products", total)?;

    if domain == ProductDomain::NonNegative && total < 0.0 {
        return Err(StatsError::NegativeSumProduct { total });
    }

    Ok(total)
}

/// One factor of the correlation denominator, `sqrt(n·Σx² − (Σx)²)`.
///
/// The radicand is `n` times the sum of squared deviations, so it can only be
/// negative through round-off. That case is reported instead of clamped.
///
/// # Errors
/// [`StatsError::NegativeRadicand`] if `n·sum_squared − sum²` is negative, or
/// [`StatsError::NonFinite`] if it overflows or is NaN.
pub fn raw_deviation_denominator_part(
    sum: HighPrecisionFloat,
    sum_squared: HighPrecisionFloat,
    n: usize,
) -> Result<HighPrecisionFloat> {
    let radicand = n as HighPrecisionFloat * sum_squared - sum * sum;
    if radicand < 0.0 {
        return Err(StatsError::NegativeRadicand {
            sum,
            sum_squared,
            n,
            radicand,
        });
    }
    Ok(check_finite("radicand", radicand)?.sqrt())
}

/// Sample covariance with Bessel's correction.
///
/// # Errors
/// [`StatsError::ShapeMismatch`] if the lengths differ,
/// [`StatsError::InsufficientData`] for fewer than two pairs, any failure of
/// [`sum_product`], or [`StatsError::NonFinite`] if the result overflows.
///
/// # Examples
/// ```
/// use statlib::covariance;
/// let x = [-0.10, -0.05, 0.00, 0.08, 0.14, 0.20, 0.25];
/// let y = [-0.20, -0.10, -0.05, 0.00, 0.10, 0.20, 0.30];
/// let cov = covariance(&x, &y).unwrap();
/// assert!((cov - 0.022571428571428576).abs() < 1e-10);
/// ```
pub fn covariance<T: Sample, U: Sample>(x: &[T], y: &[U]) -> Result<HighPrecisionFloat> {
    check_same_len(x.len(), y.len())?;
    let n = x.len();
    check_enough_points(n, 2)?;

    let sum_xy = sum_product(x, y)?;
    let sum_x = sum(x);
    let sum_y = sum(y);
    log::debug!("covariance: n = {n}, Σx = {sum_x}, Σy = {sum_y}, Σxy = {sum_xy}");

    let n = n as HighPrecisionFloat;
    check_finite("covariance", (sum_xy - sum_x * sum_y / n) / (n - 1.0))
}

/// Pearson correlation coefficient, computed with the raw-score formula.
///
/// The result lies in `[-1, 1]` up to floating-point error.
///
/// # Errors
/// In evaluation order: [`StatsError::ShapeMismatch`], [`StatsError::InsufficientData`],
/// failures of [`sum_product`], [`StatsError::NegativeRadicand`] for either series, and
/// [`StatsError::DegenerateVariance`] when a series is constant. Overflowing
/// intermediate terms give [`StatsError::NonFinite`], never a NaN result.
///
/// # Examples
/// ```
/// use statlib::{StatsError, coefficient_correlation};
/// let r = coefficient_correlation(&[0.07, 0.09, 0.10], &[0.085, 0.07, 0.095]).unwrap();
/// assert!((r - 0.21677749238102959).abs() < 1e-10);
///
/// let err = coefficient_correlation(&[1, 1, 1], &[1, 2, 3]).unwrap_err();
/// assert_eq!(err, StatsError::DegenerateVariance);
/// ```
pub fn coefficient_correlation<T: Sample, U: Sample>(
    x: &[T],
    y: &[U],
) -> Result<HighPrecisionFloat> {
    check_same_len(x.len(), y.len())?;
    let n = x.len();
    check_enough_points(n, 2)?;

    let sum_x = sum(x);
    let sum_y = sum(y);
    let sum_x2 = sum_squared(x);
    let sum_y2 = sum_squared(y);
    let sum_xy = sum_product(x, y)?;
    log::debug!(
        "correlation: n = {n}, Σx = {sum_x}, Σy = {sum_y}, Σx² = {sum_x2}, Σy² = {sum_y2}, Σxy = {sum_xy}"
    );

    let part_x = raw_deviation_denominator_part(sum_x, sum_x2, n)?;
    let part_y = raw_deviation_denominator_part(sum_y, sum_y2, n)?;
    let denominator = part_x * part_y;
    if denominator == 0.0 {
        return Err(StatsError::DegenerateVariance);
    }

    let numerator = n as HighPrecisionFloat * sum_xy - sum_x * sum_y;
    log::debug!("correlation: numerator = {numerator}, denominator = {denominator}");

    check_finite("correlation", numerator / denominator)
}

/// Alias of [`coefficient_correlation`].
pub use self::coefficient_correlation as correlation_coefficient;


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn int_pairs(max_len: usize) -> impl Strategy<Value = (Vec<i64>, Vec<i64>)> {
        (2..=max_len).prop_flat_map(|n| {
            (
                proptest::collection::vec(-100_i64..=100, n),
                proptest::collection::vec(-100_i64..=100, n),
            )
        })
    }

    fn is_constant(vals: &[i64]) -> bool {
        vals.iter().all(|&val| val == vals[0])
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn covariance_is_symmetric((x, y) in int_pairs(30)) {
            let cov_xy = covariance(&x, &y).unwrap();
            let cov_yx = covariance(&y, &x).unwrap();
            prop_assert!((cov_xy - cov_yx).abs() < 1e-9, "{} != {}", cov_xy, cov_yx);
        }

        #[test]
        fn correlation_is_symmetric((x, y) in int_pairs(30)) {
            prop_assume!(!is_constant(&x) && !is_constant(&y));
            let r_xy = coefficient_correlation(&x, &y).unwrap();
            let r_yx = coefficient_correlation(&y, &x).unwrap();
            prop_assert!((r_xy - r_yx).abs() < 1e-12, "{} != {}", r_xy, r_yx);
        }

        #[test]
        fn correlation_is_bounded((x, y) in int_pairs(30)) {
            prop_assume!(!is_constant(&x) && !is_constant(&y));
            let r = coefficient_correlation(&x, &y).unwrap();
            prop_assert!((-1.0 - 1e-12..=1.0 + 1e-12).contains(&r), "r = {} out of range", r);
        }

        #[test]
        fn correlation_is_invariant_under_positive_affine_maps(
            (x, y) in int_pairs(30),
            scale in 0.5_f64..5.0,
            shift in -10.0_f64..10.0,
        ) {
            prop_assume!(!is_constant(&x) && !is_constant(&y));
            let r = coefficient_correlation(&x, &y).unwrap();
            let x_mapped: Vec<f64> = x.iter().map(|&val| scale * val as f64 + shift).collect();
            let r_mapped = coefficient_correlation(&x_mapped, &y).unwrap();
            prop_assert!((r - r_mapped).abs() < 1e-6, "{} != {}", r, r_mapped);
        }

        #[test]
        fn huge_values_never_yield_nan(
            x in proptest::collection::vec(-1e300_f64..1e300, 2..10),
            y in proptest::collection::vec(-1e300_f64..1e300, 2..10),
        ) {
            let n = x.len().min(y.len());
            if let Ok(r) = coefficient_correlation(&x[..n], &y[..n]) {
                prop_assert!(r.is_finite(), "r = {}", r);
            }
            if let Ok(cov) = covariance(&x[..n], &y[..n]) {
                prop_assert!(cov.is_finite(), "cov = {}", cov);
            }
        }

        #[test]
        fn constant_series_is_degenerate(
            val in -1000_i64..1000,
            y in proptest::collection::vec(-100_i64..=100, 2..30),
        ) {
            let x = vec![val; y.len()];
            prop_assert_eq!(coefficient_correlation(&x, &y), Err(StatsError::DegenerateVariance));
        }
    }
}
