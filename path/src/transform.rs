// Copyright 2026 the swcanvas Authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::scalar::{Scalar, SCALAR_NEARLY_ZERO};
use crate::Point;

/// An affine transformation matrix.
///
/// The six scalars represent
///
/// ```text
/// | a  c  e |
/// | b  d  f |
/// | 0  0  1 |
/// ```
///
/// so a point maps as `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Transform::identity()
    }
}

impl Transform {
    /// Creates an identity transform.
    pub fn identity() -> Self {
        Transform {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Creates a new `Transform` from the six matrix values.
    pub fn from_row(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Transform { a, b, c, d, e, f }
    }

    /// Creates a translating transform.
    pub fn from_translate(tx: f32, ty: f32) -> Self {
        Transform::from_row(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Creates a scaling transform.
    pub fn from_scale(sx: f32, sy: f32) -> Self {
        Transform::from_row(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Creates a rotating transform. The angle is in radians, clockwise in
    /// the y-down device space.
    pub fn from_rotate(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Transform::from_row(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Checks that the transform is identity.
    pub fn is_identity(&self) -> bool {
        *self == Transform::identity()
    }

    /// Checks that all values are finite.
    pub fn is_finite(&self) -> bool {
        self.a.is_finite()
            && self.b.is_finite()
            && self.c.is_finite()
            && self.d.is_finite()
            && self.e.is_finite()
            && self.f.is_finite()
    }

    /// Checks that the transform maps axis-aligned rectangles to
    /// axis-aligned rectangles.
    ///
    /// Exact comparison by design: any skew deflects to the path pipeline.
    pub fn is_axis_aligned(&self) -> bool {
        self.b == 0.0 && self.c == 0.0
    }

    /// Checks that the transform is a rotation combined with a uniform scale
    /// and a translation. Such transforms keep rectangles rectangular and
    /// circles circular.
    pub fn is_rigid_rotation(&self) -> bool {
        self.a == self.d && self.b == -self.c && (self.a != 0.0 || self.b != 0.0)
    }

    /// The uniform scale factor of a rigid-rotation transform.
    pub fn uniform_scale(&self) -> f32 {
        (self.a.sqr() + self.b.sqr()).sqrt()
    }

    /// Pre-concatenates `other`: the returned transform applies `other`
    /// first and `self` second.
    #[must_use]
    pub fn pre_concat(&self, other: &Self) -> Self {
        Transform {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Pre-translates the current transform.
    #[must_use]
    pub fn pre_translate(&self, tx: f32, ty: f32) -> Self {
        self.pre_concat(&Transform::from_translate(tx, ty))
    }

    /// Pre-scales the current transform.
    #[must_use]
    pub fn pre_scale(&self, sx: f32, sy: f32) -> Self {
        self.pre_concat(&Transform::from_scale(sx, sy))
    }

    /// Pre-rotates the current transform.
    #[must_use]
    pub fn pre_rotate(&self, angle: f32) -> Self {
        self.pre_concat(&Transform::from_rotate(angle))
    }

    /// Maps a point.
    pub fn transform_point(&self, p: Point) -> Point {
        Point::from_xy(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Maps a slice of points in place.
    pub fn map_points(&self, points: &mut [Point]) {
        if self.is_identity() {
            return;
        }

        if self.b == 0.0 && self.c == 0.0 {
            for p in points {
                p.x = p.x * self.a + self.e;
                p.y = p.y * self.d + self.f;
            }
        } else {
            for p in points {
                let x = self.a * p.x + self.c * p.y + self.e;
                let y = self.b * p.x + self.d * p.y + self.f;
                p.x = x;
                p.y = y;
            }
        }
    }

    /// Returns an inverted transform.
    ///
    /// Returns `None` when the determinant is nearly zero. Callers that must
    /// report the failure map it to `CanvasError::Singular`.
    pub fn invert(&self) -> Option<Self> {
        if self.is_identity() {
            return Some(*self);
        }

        // The determinant is on the order of the square of the matrix
        // members, so the tolerance is squared as well.
        let det = f64::from(self.a) * f64::from(self.d) - f64::from(self.b) * f64::from(self.c);
        let tolerance = f64::from(SCALAR_NEARLY_ZERO * SCALAR_NEARLY_ZERO);
        if det.abs() < tolerance {
            return None;
        }

        let inv_det = 1.0 / det;
        let a = (f64::from(self.d) * inv_det) as f32;
        let b = (-f64::from(self.b) * inv_det) as f32;
        let c = (-f64::from(self.c) * inv_det) as f32;
        let d = (f64::from(self.a) * inv_det) as f32;
        let e = ((f64::from(self.c) * f64::from(self.f)
            - f64::from(self.d) * f64::from(self.e))
            * inv_det) as f32;
        let f = ((f64::from(self.b) * f64::from(self.e)
            - f64::from(self.a) * f64::from(self.f))
            * inv_det) as f32;

        let ts = Transform { a, b, c, d, e, f };
        if ts.is_finite() {
            Some(ts)
        } else {
            None
        }
    }

    /// The scale factor curve flattening has to account for: the larger of
    /// the lengths the two basis vectors map to.
    pub fn resolution_scale(&self) -> f32 {
        let sx = (self.a.sqr() + self.b.sqr()).sqrt();
        let sy = (self.c.sqr() + self.d.sqr()).sqrt();
        let scale = sx.max(sy);
        if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        }
    }
}
