// Copyright 2026 the swcanvas Authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Direct rasterizers: primitive-specific fast paths that bypass the
//! flatten/scanline pipeline for rectangles, circles, arcs, rounded
//! rectangles and lines.
//!
//! All of them share one discipline: the clip bit is tested before every
//! write, opaque paint goes out as packed 32-bit words, translucent paint
//! as a source-over blend. The pixel conventions match the scanline filler
//! (`span_start`/`span_end` center sampling), so wherever the dispatch rule
//! admits a direct path it produces the same pixels as the general one.

pub mod arc;
pub mod circle;
pub mod edge_buffer;
pub mod line;
pub mod rect;
pub mod round_rect;

use crate::composite::{blend_pixel, CompositeOp};
use crate::mask::ClipMask;
use crate::surface::Surface;
use crate::Color;

/// The fill/stroke seam contraction used by `fill_and_stroke` draws: the
/// fill is shrunk by this amount and the stroke overpaints the boundary
/// exactly once, preventing speckles without double-blending.
pub(crate) const SEAM_EPSILON: f32 = 1e-4;

/// Solid paint prepared for a direct rasterizer.
#[derive(Copy, Clone, Debug)]
pub(crate) enum DirectPaint {
    /// Replace the destination word: opaque source-over, or copy.
    Write(u32),
    /// Source-over blend of a translucent solid color.
    Blend(Color),
}

impl DirectPaint {
    /// `color` must already carry the global alpha.
    pub fn new(color: Color, op: CompositeOp) -> Self {
        if op == CompositeOp::Copy || color.is_opaque() {
            DirectPaint::Write(color.get())
        } else {
            DirectPaint::Blend(color)
        }
    }
}

pub(crate) fn write_pixel(
    surface: &mut Surface,
    clip: Option<&ClipMask>,
    paint: DirectPaint,
    x: i32,
    y: i32,
) {
    if x < 0 || y < 0 || x >= surface.width() as i32 || y >= surface.height() as i32 {
        return;
    }

    let (x, y) = (x as u32, y as u32);
    if let Some(clip) = clip {
        if !clip.test(x, y) {
            return;
        }
    }

    match paint {
        DirectPaint::Write(word) => surface.put32(x, y, word),
        DirectPaint::Blend(color) => {
            let dst = Color::from_packed(surface.get32(x, y));
            surface.put32(x, y, blend_pixel(CompositeOp::SourceOver, color, dst).get());
        }
    }
}

pub(crate) fn write_span(
    surface: &mut Surface,
    clip: Option<&ClipMask>,
    paint: DirectPaint,
    y: i32,
    x0: i32,
    x1: i32,
) {
    if y < 0 || y >= surface.height() as i32 {
        return;
    }

    let x0 = x0.max(0);
    let x1 = x1.min(surface.width() as i32 - 1);
    let y = y as u32;

    for x in x0..=x1 {
        let x = x as u32;
        if let Some(clip) = clip {
            if !clip.test(x, y) {
                continue;
            }
        }

        match paint {
            DirectPaint::Write(word) => surface.put32(x, y, word),
            DirectPaint::Blend(color) => {
                let dst = Color::from_packed(surface.get32(x, y));
                surface.put32(x, y, blend_pixel(CompositeOp::SourceOver, color, dst).get());
            }
        }
    }
}
