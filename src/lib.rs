//! Descriptive and bivariate statistics over finite numeric series.
//!
//! Every function is pure: it borrows one or two slices of any primitive numeric type,
//! widens each element to [`HighPrecisionFloat`] and returns either the statistic or a
//! [`StatsError`] describing why it is undefined for the given input.
//!
//! ```
//! use statlib::{coefficient_correlation, covariance};
//!
//! let x = [0.07, 0.09, 0.10];
//! let y = [0.12, 0.11, 0.10];
//! let r = coefficient_correlation(&x, &y).unwrap();
//! assert!((r + 0.9819805060619121).abs() < 1e-10);
//! assert!(covariance(&x, &[1.0]).is_err());
//! ```

pub mod bivariate;
pub mod error;
pub mod sample;
pub mod stats;

pub use bivariate::{
    ProductDomain, coefficient_correlation, correlation_coefficient, covariance,
    raw_deviation_denominator_part, sum_product, sum_product_in,
};
pub use error::{Result, StatsError};
pub use sample::{CompensatedSum, HighPrecisionFloat, Sample};
pub use stats::{average, geometric_mean, product, sum, sum_squared};
