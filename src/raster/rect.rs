// Copyright 2026 the swcanvas Authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::mask::ClipMask;
use crate::raster::{write_span, DirectPaint};
use crate::scan::{span_end, span_start};
use crate::surface::Surface;

/// Fills an axis-aligned device-space rectangle.
pub(crate) fn fill_rect(
    surface: &mut Surface,
    clip: Option<&ClipMask>,
    paint: DirectPaint,
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
) {
    let x0 = span_start(left);
    let x1 = span_end(right);
    let y0 = span_start(top).max(0);
    let y1 = span_end(bottom).min(surface.height() as i32 - 1);

    for y in y0..=y1 {
        write_span(surface, clip, paint, y, x0, x1);
    }
}

/// Strokes an axis-aligned rectangle: fills the band between the outer and
/// inner boundaries. `inner` is `None` when the stroke is wide enough to
/// swallow the interior.
pub(crate) fn stroke_rect(
    surface: &mut Surface,
    clip: Option<&ClipMask>,
    paint: DirectPaint,
    outer: (f32, f32, f32, f32),
    inner: Option<(f32, f32, f32, f32)>,
) {
    let (ol, ot, or, ob) = outer;
    let inner = match inner {
        Some(inner) => inner,
        None => return fill_rect(surface, clip, paint, ol, ot, or, ob),
    };

    let (il, it, ir, ib) = inner;
    let x0 = span_start(ol);
    let x1 = span_end(or);
    let y0 = span_start(ot).max(0);
    let y1 = span_end(ob).min(surface.height() as i32 - 1);

    let ix0 = span_start(il);
    let ix1 = span_end(ir);
    let iy0 = span_start(it);
    let iy1 = span_end(ib);

    if ix0 > ix1 || iy0 > iy1 {
        return fill_rect(surface, clip, paint, ol, ot, or, ob);
    }

    for y in y0..=y1 {
        if y < iy0 || y > iy1 {
            write_span(surface, clip, paint, y, x0, x1);
        } else {
            write_span(surface, clip, paint, y, x0, ix0 - 1);
            write_span(surface, clip, paint, y, ix1 + 1, x1);
        }
    }
}
