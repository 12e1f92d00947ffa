// Copyright 2026 the swcanvas Authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use swcanvas_path::{Point, Rect};

use crate::mask::ClipMask;
use crate::raster::{write_span, DirectPaint};
use crate::scan::{span_end, span_start};
use crate::surface::Surface;

/// Per-row `[min_x, max_x)` bounds of a convex device-space perimeter.
///
/// Rotated rectangle and rounded-rectangle variants rasterize through this
/// buffer: the perimeter is intersected with each scanline at `y + 0.5`
/// with the same math as the scanline filler, so the result is pixel-exact
/// with the general pipeline.
#[derive(Clone, Debug)]
pub(crate) struct EdgeBuffer {
    y0: i32,
    spans: Vec<Option<(f32, f32)>>,
}

impl EdgeBuffer {
    pub fn from_perimeter(points: &[Point], height: u32) -> Option<EdgeBuffer> {
        if points.len() < 3 {
            return None;
        }

        // Also rejects non-finite perimeters.
        let bounds = Rect::from_points(points)?;
        let y0 = span_start(bounds.top()).max(0);
        let y1 = span_end(bounds.bottom()).min(height as i32 - 1);
        if y0 > y1 {
            return Some(EdgeBuffer {
                y0,
                spans: Vec::new(),
            });
        }

        let mut spans = vec![None; (y1 - y0 + 1) as usize];
        for (row, span) in spans.iter_mut().enumerate() {
            let sample = (y0 + row as i32) as f32 + 0.5;
            let mut min_x = f32::MAX;
            let mut max_x = f32::MIN;
            let mut crossed = false;

            for i in 0..points.len() {
                let p0 = points[i];
                let p1 = points[(i + 1) % points.len()];
                if (p1.y - p0.y).abs() < 1e-9 {
                    continue;
                }

                let (lo, hi) = if p0.y < p1.y { (p0.y, p1.y) } else { (p1.y, p0.y) };
                if lo <= sample && sample < hi {
                    let t = (sample - p0.y) / (p1.y - p0.y);
                    let x = p0.x + t * (p1.x - p0.x);
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                    crossed = true;
                }
            }

            if crossed {
                *span = Some((min_x, max_x));
            }
        }

        Some(EdgeBuffer { y0, spans })
    }

    fn span_at(&self, y: i32) -> Option<(f32, f32)> {
        let row = y.checked_sub(self.y0)?;
        if row < 0 {
            return None;
        }
        self.spans.get(row as usize).copied().flatten()
    }

    /// Fills each row as one contiguous span.
    pub fn fill(&self, surface: &mut Surface, clip: Option<&ClipMask>, paint: DirectPaint) {
        for (row, span) in self.spans.iter().enumerate() {
            if let Some((min_x, max_x)) = span {
                let y = self.y0 + row as i32;
                write_span(surface, clip, paint, y, span_start(*min_x), span_end(*max_x));
            }
        }
    }
}

/// Fills the region between an outer and an inner perimeter as one or two
/// spans per row. Used for strokes of rotated rectangles and rounded
/// rectangles.
pub(crate) fn fill_ring(
    surface: &mut Surface,
    clip: Option<&ClipMask>,
    paint: DirectPaint,
    outer: &EdgeBuffer,
    inner: &EdgeBuffer,
) {
    for (row, span) in outer.spans.iter().enumerate() {
        let (min_x, max_x) = match span {
            Some(span) => *span,
            None => continue,
        };

        let y = outer.y0 + row as i32;
        let x0 = span_start(min_x);
        let x1 = span_end(max_x);

        match inner.span_at(y) {
            Some((imin, imax)) => {
                let ix0 = span_start(imin);
                let ix1 = span_end(imax);
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
