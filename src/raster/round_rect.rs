// Copyright 2026 the swcanvas Authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Rounded-rectangle rasterizers.
//!
//! Axis-aligned variants scan per-row bounds analytically: straight rows
//! span the full rectangle, corner rows are inset by the corner circle's
//! half-width, with the same half-pixel conventions as the circle
//! rasterizers. Rotated variants go through the perimeter polygon and the
//! edge buffer.

use swcanvas_path::Point;

use crate::mask::ClipMask;
use crate::raster::{write_span, DirectPaint};
use crate::scan::{span_end, span_start};
use crate::surface::Surface;

/// An axis-aligned rounded rectangle in device space.
#[derive(Copy, Clone, Debug)]
pub(crate) struct RoundRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub radius: f32,
}

impl RoundRect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32, radius: f32) -> Self {
        // The corner radius never exceeds half the shorter side.
        let max_radius = ((right - left).min(bottom - top)).max(0.0) * 0.5;
        RoundRect {
            left,
            top,
            right,
            bottom,
            radius: radius.clamp(0.0, max_radius),
        }
    }

    /// Shrinks (positive `delta`) or grows (negative) on all sides, scaling
    /// the corner radius along.
    pub fn inset(&self, delta: f32) -> Option<Self> {
        let left = self.left + delta;
        let top = self.top + delta;
        let right = self.right - delta;
        let bottom = self.bottom - delta;
        if left >= right || top >= bottom {
            return None;
        }

        Some(RoundRect::new(left, top, right, bottom, self.radius - delta))
    }

    /// The horizontal bounds at scanline sample `ys`, or `None` when the
    /// sample is outside.
    fn row_bounds(&self, ys: f32) -> Option<(f32, f32)> {
        if ys < self.top || ys >= self.bottom {
            return None;
        }

        let inset = if self.radius <= 0.0 {
            0.0
        } else if ys < self.top + self.radius {
            let dy = (self.top + self.radius) - ys;
            self.radius - circle_half_width(self.radius, dy)
        } else if ys > self.bottom - self.radius {
            let dy = ys - (self.bottom - self.radius);
            self.radius - circle_half_width(self.radius, dy)
        } else {
            0.0
        };

        let xl = self.left + inset;
        let xr = self.right - inset;
        if xl < xr {
            Some((xl, xr))
        } else {
            None
        }
    }

    /// The flattened outline, clockwise, for the rotated variants and the
    /// general pipeline fallback.
    pub fn perimeter(&self, tolerance: f32) -> Vec<Point> {
        let RoundRect {
            left,
            top,
            right,
            bottom,
            radius,
        } = *self;

        if radius <= 0.0 {
            return vec![
                Point::from_xy(left, top),
                Point::from_xy(right, top),
                Point::from_xy(right, bottom),
                Point::from_xy(left, bottom),
            ];
        }

        let quarter = std::f32::consts::FRAC_PI_2;
        let corners = [
            // (center, start angle): clockwise from the top edge.
            (Point::from_xy(right - radius, top + radius), -quarter),
            (Point::from_xy(right - radius, bottom - radius), 0.0),
            (Point::from_xy(left + radius, bottom - radius), quarter),
            (Point::from_xy(left + radius, top + radius), 2.0 * quarter),
        ];

        let segments = corner_segment_count(radius, tolerance);
        let mut points = Vec::with_capacity(4 * (segments + 1));
        for (center, start) in corners {
            for i in 0..=segments {
                let angle = start + quarter * (i as f32 / segments as f32);
                points.push(Point::from_xy(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                ));
            }
        }

        points
    }
}

fn circle_half_width(radius: f32, dy: f32) -> f32 {
    let rr = radius * radius - dy * dy;
    if rr > 0.0 {
        rr.sqrt()
    } else {
        0.0
    }
}

fn corner_segment_count(radius: f32, tolerance: f32) -> usize {
    if radius <= tolerance {
        return 1;
    }

    let max_step = 2.0 * (1.0 - tolerance / radius).clamp(-1.0, 1.0).acos();
    if !(max_step > 0.0) {
        return 1;
    }

    ((std::f32::consts::FRAC_PI_2 / max_step).ceil() as usize).clamp(1, 256)
}

pub(crate) fn fill_round_rect(
    surface: &mut Surface,
    clip: Option<&ClipMask>,
    paint: DirectPaint,
    rrect: &RoundRect,
) {
    let y0 = span_start(rrect.top).max(0);
    let y1 = span_end(rrect.bottom).min(surface.height() as i32 - 1);

    for y in y0..=y1 {
        if let Some((xl, xr)) = rrect.row_bounds(y as f32 + 0.5) {
            write_span(surface, clip, paint, y, span_start(xl), span_end(xr));
        }
    }
}

/// Strokes an axis-aligned rounded rectangle: the ring between the outer
/// and inner outlines, one or two spans per row.
pub(crate) fn stroke_round_rect(
    surface: &mut Surface,
    clip: Option<&ClipMask>,
    paint: DirectPaint,
    outer: &RoundRect,
    inner: Option<&RoundRect>,
) {
    let inner = match inner {
        Some(inner) => inner,
        None => return fill_round_rect(surface, clip, paint, outer),
    };

    let y0 = span_start(outer.top).max(0);
    let y1 = span_end(outer.bottom).min(surface.height() as i32 - 1);

    for y in y0..=y1 {
        let (xl, xr) = match outer.row_bounds(y as f32 + 0.5) {
            Some(bounds) => bounds,
            None => continue,
        };
        let x0 = span_start(xl);
        let x1 = span_end(xr);

        match inner.row_bounds(y as f32 + 0.5) {
            Some((il, ir)) => {
                let ix0 = span_start(il);
                let ix1 = span_end(ir);
                if ix0 > ix1 {
                    write_span(surface, clip, paint, y, x0, x1);
                } else {
                    write_span(surface, clip, paint, y, x0, ix0 - 1);
                    write_span(surface, clip, paint, y, ix1 + 1, x1);
                }
            }
            None => write_span(surface, clip, paint, y, x0, x1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_is_clamped() {
        let rr = RoundRect::new(0.0, 0.0, 10.0, 4.0, 100.0);
        assert_eq!(rr.radius, 2.0);
    }

    #[test]
    fn corner_rows_are_inset() {
        let rr = RoundRect::new(0.0, 0.0, 20.0, 20.0, 5.0);

        let (xl, xr) = rr.row_bounds(10.0).unwrap();
        assert_eq!((xl, xr), (0.0, 20.0));

        let (xl, xr) = rr.row_bounds(0.5).unwrap();
        assert!(xl > 0.0 && xr < 20.0);
        // Symmetric top/bottom.
        let (bl, br) = rr.row_bounds(19.5).unwrap();
        assert!((xl - bl).abs() < 1e-5);
        assert!((xr - br).abs() < 1e-5);
    }

    #[test]
    fn perimeter_is_closed_loop() {
        let rr = RoundRect::new(0.0, 0.0, 20.0, 10.0, 3.0);
        let points = rr.perimeter(0.25);
        assert!(points.len() >= 8);
        for p in &points {
            assert!(p.x >= -1e-4 && p.x <= 20.0001);
            assert!(p.y >= -1e-4 && p.y <= 10.0001);
        }
    }

    #[test]
    fn zero_radius_is_a_rect() {
        let rr = RoundRect::new(1.0, 2.0, 9.0, 8.0, 0.0);
        assert_eq!(rr.perimeter(0.25).len(), 4);
        assert_eq!(rr.row_bounds(5.0), Some((1.0, 9.0)));
    }
}
