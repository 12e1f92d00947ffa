// Copyright 2026 the swcanvas Authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::mask::ClipMask;
use crate::raster::{write_pixel, DirectPaint};
use crate::surface::Surface;

/// One-pixel Bresenham line between device-space endpoints.
///
/// Endpoints map to pixels with the half-pixel offset (`floor(c - 0.5)`),
/// matching the circle rasterizers' center convention. Axis-aligned lines
/// take the exact span path in the dispatcher instead; this walk is for
/// the diagonal case, where Bresenham is the defined output.
pub(crate) fn stroke_line_1px(
    surface: &mut Surface,
    clip: Option<&ClipMask>,
    paint: DirectPaint,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
) {
    let mut x = (x0 - 0.5).floor() as i32;
    let mut y = (y0 - 0.5).floor() as i32;
    let xe = (x1 - 0.5).floor() as i32;
    let ye = (y1 - 0.5).floor() as i32;

    let dx = (xe - x).abs();
    let dy = -(ye - y).abs();
    let sx = if x < xe { 1 } else { -1 };
    let sy = if y < ye { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        write_pixel(surface, clip, paint, x, y);

        if x == xe && y == ye {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
