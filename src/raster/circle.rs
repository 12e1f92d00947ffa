// Copyright 2026 the swcanvas Authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Circle rasterizers.
//!
//! Circles use a center offset of `(-0.5, -0.5)` before flooring, so an
//! even diameter at an integer center lands symmetrically on the pixel
//! grid. Fill, thick strokes and the arc variants all derive their rows
//! from the same half-width math (the `extents` table for the one-pixel
//! outline), which keeps `fill_circle`, `stroke_circle` and `arc` pixel
//! consistent with each other.

use std::collections::HashSet;

use crate::mask::ClipMask;
use crate::raster::{write_pixel, write_span, DirectPaint};
use crate::scan::{span_end, span_start};
use crate::surface::Surface;

/// The maximum pixel offset from the half-grid center for each row offset
/// `k` (row sample at `k + 0.5` from the center line). `-1` marks a row the
/// circle does not reach.
///
/// This is the shared table behind the one-pixel circle outline; the span
/// variants compute the same quantity directly from the half-width.
pub(crate) fn extents(radius: f32) -> Vec<i32> {
    let mut table = Vec::new();
    let mut k = 0;
    loop {
        let dy = k as f32 + 0.5;
        if dy >= radius {
            break;
        }

        let hw = (radius * radius - dy * dy).sqrt();
        table.push((hw - 0.5).floor() as i32);
        k += 1;
    }

    table
}

/// Visits every row the circle covers as `(y, x0, x1)` pixel spans.
pub(crate) fn for_each_row_span<F>(cx: f32, cy: f32, radius: f32, mut f: F)
where
    F: FnMut(i32, i32, i32),
{
    let y0 = span_start(cy - radius);
    let y1 = span_end(cy + radius);

    for y in y0..=y1 {
        let dy = y as f32 + 0.5 - cy;
        let rr = radius * radius - dy * dy;
        if rr <= 0.0 {
            continue;
        }

        let hw = rr.sqrt();
        let x0 = span_start(cx - hw);
        let x1 = span_end(cx + hw);
        if x0 <= x1 {
            f(y, x0, x1);
        }
    }
}

/// Visits the one-or-two spans per row of the annulus between
/// `radius + half` and `radius - half`.
pub(crate) fn for_each_annulus_span<F>(cx: f32, cy: f32, radius: f32, half: f32, mut f: F)
where
    F: FnMut(i32, i32, i32),
{
    let outer = radius + half;
    let inner = radius - half;

    let y0 = span_start(cy - outer);
    let y1 = span_end(cy + outer);

    for y in y0..=y1 {
        let dy = y as f32 + 0.5 - cy;
        let orr = outer * outer - dy * dy;
        if orr <= 0.0 {
            continue;
        }

        let ohw = orr.sqrt();
        let x0 = span_start(cx - ohw);
        let x1 = span_end(cx + ohw);
        if x0 > x1 {
            continue;
        }

        let irr = if inner > 0.0 {
            inner * inner - dy * dy
        } else {
            -1.0
        };

        if irr <= 0.0 {
            f(y, x0, x1);
            continue;
        }

        let ihw = irr.sqrt();
        let ix0 = span_start(cx - ihw);
        let ix1 = span_end(cx + ihw);
        if ix0 > ix1 {
            f(y, x0, x1);
        } else {
            if x0 <= ix0 - 1 {
                f(y, x0, ix0 - 1);
            }
            if ix1 + 1 <= x1 {
                f(y, ix1 + 1, x1);
            }
        }
    }
}

/// Visits every pixel of the one-pixel circle outline exactly once.
///
/// Walks the extents table along rows and, transposed, along columns so
/// steep sections stay gap-free; the set dedups the symmetry junctions
/// where both walks land on the same pixel.
pub(crate) fn for_each_outline_pixel<F>(cx: f32, cy: f32, radius: f32, mut f: F)
where
    F: FnMut(i32, i32),
{
    let icx = (cx - 0.5).floor() as i32;
    let icy = (cy - 0.5).floor() as i32;

    let table = extents(radius);
    let mut seen = HashSet::new();
    let mut emit = |x: i32, y: i32, f: &mut F| {
        if seen.insert((x, y)) {
            f(x, y);
        }
    };

    for (k, ext) in table.iter().cloned().enumerate() {
        if ext < 0 {
            continue;
        }

        let k = k as i32;
        let (west, east) = (icx - ext, icx + 1 + ext);
        let (north, south) = (icy - ext, icy + 1 + ext);

        // Row boundaries above and below the center line.
        emit(west, icy - k, &mut f);
        emit(east, icy - k, &mut f);
        emit(west, icy + 1 + k, &mut f);
        emit(east, icy + 1 + k, &mut f);

        // Column boundaries left and right of the center line.
        emit(icx - k, north, &mut f);
        emit(icx - k, south, &mut f);
        emit(icx + 1 + k, north, &mut f);
        emit(icx + 1 + k, south, &mut f);
    }
}

pub(crate) fn fill_circle(
    surface: &mut Surface,
    clip: Option<&ClipMask>,
    paint: DirectPaint,
    cx: f32,
    cy: f32,
    radius: f32,
) {
    for_each_row_span(cx, cy, radius, |y, x0, x1| {
        write_span(surface, clip, paint, y, x0, x1);
    });
}

pub(crate) fn stroke_circle_thick(
    surface: &mut Surface,
    clip: Option<&ClipMask>,
    paint: DirectPaint,
    cx: f32,
    cy: f32,
    radius: f32,
    half: f32,
) {
    for_each_annulus_span(cx, cy, radius, half, |y, x0, x1| {
        write_span(surface, clip, paint, y, x0, x1);
    });
}

pub(crate) fn stroke_circle_1px(
    surface: &mut Surface,
    clip: Option<&ClipMask>,
    paint: DirectPaint,
    cx: f32,
    cy: f32,
    radius: f32,
) {
    for_each_outline_pixel(cx, cy, radius, |x, y| {
        write_pixel(surface, clip, paint, x, y);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extents_shrink_monotonically() {
        let table = extents(5.0);
        assert_eq!(table.len(), 5);
        for pair in table.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn even_diameter_is_symmetric() {
        // Integer center: rows pair up around cy - 0.5.
        let mut spans = Vec::new();
        for_each_row_span(5.0, 5.0, 3.0, |y, x0, x1| spans.push((y, x0, x1)));

        assert_eq!(spans.first().unwrap().0, 2);
        assert_eq!(spans.last().unwrap().0, 7);
        let n = spans.len();
        for i in 0..n / 2 {
            let top = spans[i];
            let bottom = spans[n - 1 - i];
            assert_eq!(top.1, bottom.1);
            assert_eq!(top.2, bottom.2);
            // Mirror rows: 4 <-> 5, 3 <-> 6, ...
            assert_eq!(top.0 + bottom.0, 9);
        }

        // Every span is horizontally symmetric around x = 4.5.
        for (_, x0, x1) in spans {
            assert_eq!(x0 + x1, 9);
        }
    }

    #[test]
    fn outline_touches_fill_boundary() {
        // The 1px outline's west/east pixels match the fill span ends.
        let mut fill_spans = std::collections::HashMap::new();
        for_each_row_span(10.0, 10.0, 4.0, |y, x0, x1| {
            fill_spans.insert(y, (x0, x1));
        });

        let mut outline = std::collections::HashSet::new();
        for_each_outline_pixel(10.0, 10.0, 4.0, |x, y| {
            outline.insert((x, y));
        });

        for (y, (x0, x1)) in fill_spans {
            assert!(outline.contains(&(x0, y)), "missing west pixel at {}", y);
            assert!(outline.contains(&(x1, y)), "missing east pixel at {}", y);
        }
    }

    #[test]
    fn annulus_leaves_hole() {
        let mut hole_rows = 0;
        for_each_annulus_span(10.0, 10.0, 5.0, 1.0, |y, x0, x1| {
            // Center row spans must not cross the middle.
            if y == 9 || y == 10 {
                assert!(x1 < 10 || x0 > 9, "span {}..{} crosses the hole", x0, x1);
                hole_rows += 1;
            }
        });
        assert!(hole_rows > 0);
    }
}
