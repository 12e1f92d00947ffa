// Copyright 2026 the swcanvas Authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/// Default precision of a scalar comparison.
pub const SCALAR_NEARLY_ZERO: f32 = 1.0 / (1 << 12) as f32;

/// Two times pi.
pub const SCALAR_TAU: f32 = std::f32::consts::TAU;

/// A float extension trait with geometry helpers.
pub trait Scalar {
    /// Half of the value.
    fn half(self) -> Self;
    /// The average of two values.
    fn ave(self, other: Self) -> Self;
    /// The squared value.
    fn sqr(self) -> Self;
    /// `1.0 / self`.
    fn invert(self) -> Self;
    /// Checks that the value is close to zero within `SCALAR_NEARLY_ZERO`.
    fn is_nearly_zero(self) -> bool;
    /// Checks that the value is close to zero within `tolerance`.
    fn is_nearly_zero_within_tolerance(self, tolerance: Self) -> bool;
    /// Checks that two values are approximately equal.
    fn is_nearly_equal(self, other: Self) -> bool;
}

impl Scalar for f32 {
    fn half(self) -> f32 {
        self * 0.5
    }

    fn ave(self, other: f32) -> f32 {
        (self + other) * 0.5
    }

    fn sqr(self) -> f32 {
        self * self
    }

    fn invert(self) -> f32 {
        1.0 / self
    }

    fn is_nearly_zero(self) -> bool {
        self.is_nearly_zero_within_tolerance(SCALAR_NEARLY_ZERO)
    }

    fn is_nearly_zero_within_tolerance(self, tolerance: f32) -> bool {
        debug_assert!(tolerance >= 0.0);
        self.abs() <= tolerance
    }

    fn is_nearly_equal(self, other: f32) -> bool {
        (self - other).is_nearly_zero()
    }
}
