// Copyright 2026 the swcanvas Authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! The general-purpose path renderer: a scanline polygon filler.
//!
//! Pixels are sampled at their centers. A pixel `(x, y)` belongs to a span
//! `[xl, xr)` on scanline `y` iff `xl <= x + 0.5 < xr`, and an edge
//! contributes a crossing iff `min_y <= y + 0.5 < max_y`. The half-open
//! intervals partition shared edges between adjacent polygons: nothing is
//! filled twice and no gaps are left.

use swcanvas_path::{Point, Rect};

use crate::composite::{blend_pixel, CompositeOp};
use crate::mask::ClipMask;
use crate::paint::{PaintContext, PaintSource};
use crate::surface::Surface;
use crate::{CanvasError, Color};

/// A path filling rule.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum FillRule {
    /// "Inside" is a non-zero sum of signed edge crossings.
    NonZero,
    /// "Inside" is an odd number of edge crossings.
    EvenOdd,
}

impl Default for FillRule {
    fn default() -> Self {
        FillRule::NonZero
    }
}

impl std::str::FromStr for FillRule {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nonzero" => Ok(FillRule::NonZero),
            "evenodd" => Ok(FillRule::EvenOdd),
            _ => Err(CanvasError::InvalidEnum),
        }
    }
}

/// First pixel whose center is >= `edge`.
pub(crate) fn span_start(edge: f32) -> i32 {
    (edge - 0.5).ceil() as i32
}

/// Last pixel whose center is < `edge`.
pub(crate) fn span_end(edge: f32) -> i32 {
    (edge - 0.5).ceil() as i32 - 1
}

struct Edge {
    p0: Point,
    p1: Point,
    winding: i32,
}

/// Runs the scanline walk over device-space polygons, reporting every
/// inside span as `(y, x0, x1)` with inclusive pixel bounds already clipped
/// to the surface.
pub(crate) fn scan_spans<F>(
    polygons: &[Vec<Point>],
    width: u32,
    height: u32,
    rule: FillRule,
    mut span: F,
) where
    F: FnMut(i32, i32, i32),
{
    let mut edges = Vec::new();
    let mut min_y = f32::MAX;
    let mut max_y = f32::MIN;

    for polygon in polygons {
        if polygon.len() < 3 {
            continue;
        }

        // Rejects non-finite vertices as a side effect.
        let bounds = match Rect::from_points(polygon) {
            Some(bounds) => bounds,
            None => {
                log::warn!("polygon with non-finite coordinates cannot be filled");
                return;
            }
        };
        min_y = min_y.min(bounds.top());
        max_y = max_y.max(bounds.bottom());

        for i in 0..polygon.len() {
            let p0 = polygon[i];
            let p1 = polygon[(i + 1) % polygon.len()];

            // Horizontal edges never cross a scanline sample.
            if (p1.y - p0.y).abs() < 1e-9 {
                continue;
            }

            let winding = if p1.y > p0.y { 1 } else { -1 };
            edges.push(Edge { p0, p1, winding });
        }
    }

    if edges.is_empty() {
        return;
    }

    let y0 = span_start(min_y).max(0);
    let y1 = span_end(max_y).min(height as i32 - 1);

    let mut crossings: Vec<(f32, i32)> = Vec::new();
    for y in y0..=y1 {
        let sample = y as f32 + 0.5;

        crossings.clear();
        for edge in &edges {
            let (lo, hi) = if edge.p0.y < edge.p1.y {
                (edge.p0.y, edge.p1.y)
            } else {
                (edge.p1.y, edge.p0.y)
            };
            if lo <= sample && sample < hi {
                let t = (sample - edge.p0.y) / (edge.p1.y - edge.p0.y);
                let x = edge.p0.x + t * (edge.p1.x - edge.p0.x);
                crossings.push((x, edge.winding));
            }
        }

        if crossings.len() < 2 {
            continue;
        }

        crossings.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut winding = 0;
        for i in 0..crossings.len() - 1 {
            winding += crossings[i].1;
            let inside = match rule {
                FillRule::NonZero => winding != 0,
                FillRule::EvenOdd => i % 2 == 0,
            };
            if !inside {
                continue;
            }

            let x0 = span_start(crossings[i].0).max(0);
            let x1 = span_end(crossings[i + 1].0).min(width as i32 - 1);
            if x0 <= x1 {
                span(y, x0, x1);
            }
        }
    }
}

/// Fills device-space polygons into the surface.
///
/// When `source_mask` is provided the surface is left untouched and only
/// the coverage bits are recorded, for the second pass of canvas-wide
/// compositing.
pub(crate) fn fill_polygons(
    surface: &mut Surface,
    polygons: &[Vec<Point>],
    paint: &PaintSource,
    ctx: &PaintContext,
    rule: FillRule,
    op: CompositeOp,
    clip: Option<&ClipMask>,
    source_mask: Option<&mut ClipMask>,
) {
    let width = surface.width();
    let height = surface.height();

    if let Some(mask) = source_mask {
        scan_spans(polygons, width, height, rule, |y, x0, x1| {
            for x in x0..=x1 {
                mask.set(x as u32, y as u32);
            }
        });
        return;
    }

    let solid = paint.resolve_solid(ctx);

    // An opaque solid source-over span and a copy span are plain word writes.
    let direct_word = match solid {
        Some(color) if op == CompositeOp::Copy => Some(color.get()),
        Some(color) if op == CompositeOp::SourceOver && color.is_opaque() => Some(color.get()),
        _ => None,
    };

    scan_spans(polygons, width, height, rule, |y, x0, x1| {
        for x in x0..=x1 {
            let (ux, uy) = (x as u32, y as u32);
            if let Some(clip) = clip {
                if !clip.test(ux, uy) {
                    continue;
                }
            }

            if let Some(word) = direct_word {
                surface.put32(ux, uy, word);
                continue;
            }

            let src = match solid {
                Some(color) => color,
                None => paint.eval(x, y, ctx),
            };
            let dst = Color::from_packed(surface.get32(ux, uy));
            surface.put32(ux, uy, blend_pixel(op, src, dst).get());
        }
    });
}

/// Rasterizes device-space polygons into a 1-bit mask, setting bits inside
/// per the fill rule. Used to build clip masks.
pub(crate) fn fill_mask(mask: &mut ClipMask, polygons: &[Vec<Point>], rule: FillRule) {
    let width = mask.width();
    let height = mask.height();
    scan_spans(polygons, width, height, rule, |y, x0, x1| {
        for x in x0..=x1 {
            mask.set(x as u32, y as u32);
        }
    });
}

/// The winding test behind `is_point_in_path`, evaluated at the exact
/// point with a ray toward positive x.
pub(crate) fn hit_test(polygons: &[Vec<Point>], x: f32, y: f32, rule: FillRule) -> bool {
    let mut winding = 0;
    let mut crossings = 0;

    for polygon in polygons {
        if polygon.len() < 3 {
            continue;
        }

        for i in 0..polygon.len() {
            let p0 = polygon[i];
            let p1 = polygon[(i + 1) % polygon.len()];
            if (p1.y - p0.y).abs() < 1e-9 {
                continue;
            }

            let (lo, hi) = if p0.y < p1.y { (p0.y, p1.y) } else { (p1.y, p0.y) };
            if lo <= y && y < hi {
                let t = (y - p0.y) / (p1.y - p0.y);
                let ix = p0.x + t * (p1.x - p0.x);
                if ix > x {
                    winding += if p1.y > p0.y { 1 } else { -1 };
                    crossings += 1;
                }
            }
        }
    }

    match rule {
        FillRule::NonZero => winding != 0,
        FillRule::EvenOdd => crossings % 2 != 0,
    }
}
