// Copyright (c) The Heisenberg Authors.
// Licensed under the MIT License.

use num_complex::Complex64;

/// Tolerance used when comparing simulated amplitudes.
pub const EPSILON: f64 = 1e-10;

/// Floating point comparison that treats rounding noise as zero.
pub trait NearlyZero {
    fn is_nearly_zero(&self) -> bool;
}

impl NearlyZero for f64 {
    fn is_nearly_zero(&self) -> bool {
        self.abs() <= EPSILON
    }
}

impl NearlyZero for Complex64 {
    fn is_nearly_zero(&self) -> bool {
        self.re.is_nearly_zero() && self.im.is_nearly_zero()
    }
}
