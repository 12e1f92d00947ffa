// Copyright 2026 the swcanvas Authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::scalar::Scalar;

/// A point.
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Creates a new `Point`.
    pub fn from_xy(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    /// Creates a point at 0x0 position.
    pub fn zero() -> Self {
        Point { x: 0.0, y: 0.0 }
    }

    /// Returns the length of the vector.
    pub fn length(&self) -> f32 {
        (self.x.sqr() + self.y.sqr()).sqrt()
    }

    /// Returns the distance to `other`.
    pub fn distance_to(&self, other: Point) -> f32 {
        (other - *self).length()
    }

    /// Dot product of two vectors.
    pub fn dot(&self, other: Point) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the cross product of two vectors.
    pub fn cross(&self, other: Point) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Returns a vector rotated by 90 degrees.
    pub fn perp(&self) -> Point {
        Point::from_xy(-self.y, self.x)
    }

    /// Returns a unit vector or `None` for a degenerate one.
    pub fn normalized(&self) -> Option<Point> {
        let len = self.length();
        if len.is_nearly_zero_within_tolerance(f32::EPSILON) {
            None
        } else {
            Some(Point::from_xy(self.x / len, self.y / len))
        }
    }

    /// Returns a vector scaled by `factor`.
    pub fn scaled(&self, factor: f32) -> Point {
        Point::from_xy(self.x * factor, self.y * factor)
    }

    /// Checks that both components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Linear interpolation towards `other`.
    pub fn lerp(&self, other: Point, t: f32) -> Point {
        Point::from_xy(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Midpoint between `self` and `other`.
    pub fn mid(&self, other: Point) -> Point {
        Point::from_xy(self.x.ave(other.x), self.y.ave(other.y))
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::from_xy(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::from_xy(self.x - other.x, self.y - other.y)
    }
}
