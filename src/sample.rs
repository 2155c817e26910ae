//! Sample widening and the compensated accumulator used by every running sum.

use num_traits::AsPrimitive;

/// Floating-point type every sample is widened to before any arithmetic.
///
/// Rust has no stable float wider than `f64`, so extra precision comes from
/// [`CompensatedSum`], which carries the rounding error of a running total alongside it.
pub type HighPrecisionFloat = f64;

/// Element type accepted by the statistics: any primitive integer or float.
pub trait Sample: Copy + AsPrimitive<HighPrecisionFloat> {
    /// Widen to the accumulator type.
    fn widen(self) -> HighPrecisionFloat {
        self.as_()
    }
}

impl<T> Sample for T where T: Copy + AsPrimitive<HighPrecisionFloat> {}

/// Neumaier compensated summation.
///
/// Keeps a running compensation term recovering the low-order bits lost at each
/// addition, including when the addend is larger in magnitude than the running total.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompensatedSum {
    sum: HighPrecisionFloat,
    comp: HighPrecisionFloat,
}

impl CompensatedSum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, val: HighPrecisionFloat) {
        let total = self.sum + val;
        if !total.is_finite() {
            // Past overflow the compensation would only turn into `inf - inf`.
            self.sum = total;
            return;
        }
        if self.sum.abs() >= val.abs() {
            self.comp += (self.sum - total) + val;
        } else {
            self.comp += (val - total) + self.sum;
        }
        self.sum = total;
    }

    pub fn value(&self) -> HighPrecisionFloat {
        if !self.sum.is_finite() {
            return self.sum;
        }
        self.sum + self.comp
    }
}

impl FromIterator<HighPrecisionFloat> for CompensatedSum {
    fn from_iter<I: IntoIterator<Item = HighPrecisionFloat>>(iter: I) -> Self {
        let mut acc = Self::new();
        for val in iter {
            acc.add(val);
        }
        acc
    }
}
