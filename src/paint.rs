// Copyright 2026 the swcanvas Authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use swcanvas_path::{NormalizedF32, Transform};

use crate::Color;

/// Per-pixel evaluation context for a paint source.
#[derive(Copy, Clone, Debug)]
pub struct PaintContext {
    /// The current transform, for paint sources defined in user space.
    pub transform: Transform,

    /// The context's global alpha.
    pub global_alpha: NormalizedF32,

    /// Attenuation for strokes thinner than one pixel. `1.0` otherwise.
    pub sub_pixel_opacity: NormalizedF32,
}

impl PaintContext {
    pub(crate) fn opacity(&self) -> f32 {
        self.global_alpha.get() * self.sub_pixel_opacity.get()
    }
}

impl Default for PaintContext {
    fn default() -> Self {
        PaintContext {
            transform: Transform::identity(),
            global_alpha: NormalizedF32::ONE,
            sub_pixel_opacity: NormalizedF32::ONE,
        }
    }
}

/// A source of per-pixel paint.
///
/// `Solid` is the only variant the engine carries; gradients and patterns
/// plug in as further variants evaluated through [`eval`](PaintSource::eval).
#[derive(Clone, PartialEq, Debug)]
pub enum PaintSource {
    /// A solid color.
    Solid(Color),
}

impl Default for PaintSource {
    fn default() -> Self {
        PaintSource::Solid(Color::BLACK)
    }
}

impl PaintSource {
    /// Returns the color when the paint is solid.
    ///
    /// Lets the direct-path dispatcher keep its fast path without
    /// inspecting variants.
    pub fn is_solid(&self) -> Option<Color> {
        match self {
            PaintSource::Solid(color) => Some(*color),
        }
    }

    /// Evaluates the paint at a device-space pixel.
    ///
    /// The output alpha carries the context's global alpha and sub-pixel
    /// opacity.
    pub fn eval(&self, x: i32, y: i32, ctx: &PaintContext) -> Color {
        let _ = (x, y);
        match self {
            PaintSource::Solid(color) => color.mul_alpha(ctx.opacity()),
        }
    }

    /// The solid color with the context opacity applied, when the paint is
    /// solid. The scanline filler hoists this out of its pixel loop.
    pub(crate) fn resolve_solid(&self, ctx: &PaintContext) -> Option<Color> {
        self.is_solid().map(|c| c.mul_alpha(ctx.opacity()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_eval_applies_opacity() {
        let paint = PaintSource::Solid(Color::from_rgba8(10, 20, 30, 200));
        let mut ctx = PaintContext::default();
        assert_eq!(paint.eval(0, 0, &ctx).alpha(), 200);

        ctx.global_alpha = NormalizedF32::new(0.5).unwrap();
        assert_eq!(paint.eval(0, 0, &ctx).alpha(), 100);

        ctx.sub_pixel_opacity = NormalizedF32::new(0.5).unwrap();
        assert_eq!(paint.eval(0, 0, &ctx).alpha(), 50);
    }
}
