// Copyright 2026 the swcanvas Authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Arc rasterizers: the circle traversals filtered by angle.
//!
//! Candidate pixels come from the same row spans and outline walk as the
//! circle rasterizers; each one is kept iff the angle of its center,
//! `atan2(dy, dx)` normalized to `[0, 2*pi)`, lies within the arc range.
//! The range test is inclusive at both ends.

use swcanvas_path::SCALAR_TAU;

use crate::mask::ClipMask;
use crate::raster::{circle, write_pixel, DirectPaint};
use crate::surface::Surface;

/// Angular slack of the inclusive range test.
const ANGLE_EPSILON: f32 = 1e-6;

/// An arc's angular coverage, reduced to a clockwise sweep from a start
/// angle in `[0, 2*pi)`.
#[derive(Copy, Clone, PartialEq, Debug)]
pub(crate) enum ArcRange {
    /// The sweep covers the whole circumference; no filtering needed.
    Full,
    /// A partial sweep.
    Partial { start: f32, sweep: f32 },
    /// Zero sweep: nothing to draw.
    Empty,
}

impl ArcRange {
    /// Normalizes canvas arc angles. A counter-clockwise arc from `start`
    /// to `end` covers the same pixels as a clockwise arc from `end` to
    /// `start`.
    pub fn new(start_angle: f32, end_angle: f32, ccw: bool) -> Self {
        let delta = end_angle - start_angle;
        let (origin, sweep) = if !ccw {
            if delta >= SCALAR_TAU {
                return ArcRange::Full;
            }
            (start_angle, delta.rem_euclid(SCALAR_TAU))
        } else {
            if -delta >= SCALAR_TAU {
                return ArcRange::Full;
            }
            (end_angle, (start_angle - end_angle).rem_euclid(SCALAR_TAU))
        };

        if sweep == 0.0 {
            return ArcRange::Empty;
        }

        ArcRange::Partial {
            start: origin.rem_euclid(SCALAR_TAU),
            sweep,
        }
    }

    fn contains(&self, angle: f32) -> bool {
        match *self {
            ArcRange::Full => true,
            ArcRange::Empty => false,
            ArcRange::Partial { start, sweep } => {
                let rel = (angle - start).rem_euclid(SCALAR_TAU);
                rel <= sweep + ANGLE_EPSILON || rel >= SCALAR_TAU - ANGLE_EPSILON
            }
        }
    }
}

fn pixel_in_range(range: &ArcRange, cx: f32, cy: f32, x: i32, y: i32) -> bool {
    let dx = x as f32 + 0.5 - cx;
    let dy = y as f32 + 0.5 - cy;
    range.contains(dy.atan2(dx).rem_euclid(SCALAR_TAU))
}

/// One-pixel arc outline: the circle outline with the angle filter.
pub(crate) fn stroke_arc_1px(
    surface: &mut Surface,
    clip: Option<&ClipMask>,
    paint: DirectPaint,
    cx: f32,
    cy: f32,
    radius: f32,
    range: ArcRange,
) {
    circle::for_each_outline_pixel(cx, cy, radius, |x, y| {
        if pixel_in_range(&range, cx, cy, x, y) {
            write_pixel(surface, clip, paint, x, y);
        }
    });
}

/// Thick arc stroke: the annulus scan with the angle filter.
pub(crate) fn stroke_arc_thick(
    surface: &mut Surface,
    clip: Option<&ClipMask>,
    paint: DirectPaint,
    cx: f32,
    cy: f32,
    radius: f32,
    half: f32,
    range: ArcRange,
) {
    circle::for_each_annulus_span(cx, cy, radius, half, |y, x0, x1| {
        for x in x0..=x1 {
            if pixel_in_range(&range, cx, cy, x, y) {
                write_pixel(surface, clip, paint, x, y);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_sweep() {
        assert_eq!(ArcRange::new(0.0, SCALAR_TAU, false), ArcRange::Full);
        assert_eq!(ArcRange::new(0.0, 100.0, false), ArcRange::Full);
        assert_eq!(ArcRange::new(0.0, -SCALAR_TAU, true), ArcRange::Full);
        assert_eq!(ArcRange::new(1.0, 1.0, false), ArcRange::Empty);
    }

    #[test]
    fn quarter_sweep_contains() {
        let range = ArcRange::new(0.0, std::f32::consts::FRAC_PI_2, false);
        assert!(range.contains(0.0));
        assert!(range.contains(1.0));
        assert!(range.contains(std::f32::consts::FRAC_PI_2));
        assert!(!range.contains(2.0));
        assert!(!range.contains(6.0));
    }

    #[test]
    fn ccw_covers_complement() {
        // Counter-clockwise from 0 to pi/2 is everything but the first
        // quadrant.
        let range = ArcRange::new(0.0, std::f32::consts::FRAC_PI_2, true);
        assert!(range.contains(0.0));
        assert!(range.contains(std::f32::consts::FRAC_PI_2));
        assert!(!range.contains(1.0));
        assert!(range.contains(3.0));
        assert!(range.contains(6.0));
    }
}
