// Copyright 2026 the swcanvas Authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::{CanvasError, Color};

/// A Porter-Duff compositing operator.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CompositeOp {
    /// Source over destination.
    SourceOver,
    /// Destination over source.
    DestinationOver,
    /// Source trimmed inside destination.
    SourceIn,
    /// Destination trimmed by source.
    DestinationIn,
    /// Source trimmed outside destination.
    SourceOut,
    /// Destination trimmed outside source.
    DestinationOut,
    /// Source inside destination blended with destination.
    SourceAtop,
    /// Destination inside source blended with source.
    DestinationAtop,
    /// Each of source and destination trimmed outside the other.
    Xor,
    /// Replaces destination.
    Copy,
    /// Preserves destination.
    Destination,
}

impl Default for CompositeOp {
    fn default() -> Self {
        CompositeOp::SourceOver
    }
}

impl std::str::FromStr for CompositeOp {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "source-over" => Ok(CompositeOp::SourceOver),
            "destination-over" => Ok(CompositeOp::DestinationOver),
            "source-in" => Ok(CompositeOp::SourceIn),
            "destination-in" => Ok(CompositeOp::DestinationIn),
            "source-out" => Ok(CompositeOp::SourceOut),
            "destination-out" => Ok(CompositeOp::DestinationOut),
            "source-atop" => Ok(CompositeOp::SourceAtop),
            "destination-atop" => Ok(CompositeOp::DestinationAtop),
            "xor" => Ok(CompositeOp::Xor),
            "copy" => Ok(CompositeOp::Copy),
            "destination" => Ok(CompositeOp::Destination),
            _ => Err(CanvasError::InvalidEnum),
        }
    }
}

impl CompositeOp {
    /// Checks whether the operator can change pixels the source shape does
    /// not cover, requiring the two-pass source-mask compositor.
    pub fn is_canvas_wide(self) -> bool {
        matches!(
            self,
            CompositeOp::SourceIn
                | CompositeOp::SourceOut
                | CompositeOp::DestinationIn
                | CompositeOp::DestinationAtop
                | CompositeOp::Copy
        )
    }

    /// Checks that a fully transparent source leaves the destination
    /// unchanged, so the draw can be skipped outright.
    pub(crate) fn transparent_source_is_noop(self) -> bool {
        !self.is_canvas_wide()
    }

    /// The Porter-Duff source and destination factors.
    fn factors(self, sa: f32, da: f32) -> (f32, f32) {
        match self {
            CompositeOp::SourceOver => (1.0, 1.0 - sa),
            CompositeOp::DestinationOver => (1.0 - da, 1.0),
            CompositeOp::SourceIn => (da, 0.0),
            CompositeOp::DestinationIn => (0.0, sa),
            CompositeOp::SourceOut => (1.0 - da, 0.0),
            CompositeOp::DestinationOut => (0.0, 1.0 - sa),
            CompositeOp::SourceAtop => (da, 1.0 - sa),
            CompositeOp::DestinationAtop => (1.0 - da, sa),
            CompositeOp::Xor => (1.0 - da, 1.0 - sa),
            CompositeOp::Copy => (1.0, 0.0),
            CompositeOp::Destination => (0.0, 1.0),
        }
    }
}

/// Blends a non-premultiplied source pixel onto a non-premultiplied
/// destination pixel.
///
/// The caller applies global alpha and sub-pixel opacity to `src` before
/// blending.
pub fn blend_pixel(op: CompositeOp, src: Color, dst: Color) -> Color {
    // Opaque source-over replacement is by far the most common case.
    if op == CompositeOp::SourceOver && src.alpha() == 255 {
        return src;
    }

    if op == CompositeOp::Copy {
        return src;
    }

    let sa = f32::from(src.alpha()) / 255.0;
    let da = f32::from(dst.alpha()) / 255.0;
    let (fs, fd) = op.factors(sa, da);

    let out_a = sa * fs + da * fd;
    if out_a <= 0.0 {
        return Color::TRANSPARENT;
    }

    let blend_channel = |sc: u8, dc: u8| -> u8 {
        let sc = f32::from(sc);
        let dc = f32::from(dc);
        let c = (sc * sa * fs + dc * da * fd) / out_a;
        (c + 0.5) as u8
    };

    Color::from_rgba8(
        blend_channel(src.red(), dst.red()),
        blend_channel(src.green(), dst.green()),
        blend_channel(src.blue(), dst.blue()),
        (out_a * 255.0 + 0.5) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing() {
        assert_eq!("source-over".parse::<CompositeOp>(), Ok(CompositeOp::SourceOver));
        assert_eq!("xor".parse::<CompositeOp>(), Ok(CompositeOp::Xor));
        assert_eq!(
            "lighter".parse::<CompositeOp>(),
            Err(CanvasError::InvalidEnum)
        );
    }

    #[test]
    fn canvas_wide_set() {
        use CompositeOp::*;
        for op in [SourceIn, SourceOut, DestinationIn, DestinationAtop, Copy] {
            assert!(op.is_canvas_wide(), "{:?}", op);
        }
        for op in [
            SourceOver,
            DestinationOver,
            DestinationOut,
            SourceAtop,
            Xor,
            Destination,
        ] {
            assert!(!op.is_canvas_wide(), "{:?}", op);
        }
    }

    #[test]
    fn over_with_transparent_source_is_identity() {
        let dst = Color::from_rgba8(12, 34, 56, 78);
        assert_eq!(
            blend_pixel(CompositeOp::SourceOver, Color::TRANSPARENT, dst),
            dst
        );
    }

    #[test]
    fn copy_replaces_exactly() {
        let dst = Color::from_rgba8(12, 34, 56, 78);
        let src = Color::from_rgba8(1, 2, 3, 200);
        assert_eq!(blend_pixel(CompositeOp::Copy, src, dst), src);
    }

    #[test]
    fn xor_of_opaque_over_itself_is_transparent() {
        let c = Color::from_rgba8(10, 20, 30, 255);
        assert_eq!(blend_pixel(CompositeOp::Xor, c, c).alpha(), 0);
    }

    #[test]
    fn over_half_alpha_on_white() {
        let src = Color::from_rgba8(0, 128, 0, 128);
        let out = blend_pixel(CompositeOp::SourceOver, src, Color::WHITE);
        assert_eq!(out.alpha(), 255);
        assert!((i32::from(out.red()) - 127).abs() <= 1);
        assert!((i32::from(out.green()) - 191).abs() <= 1);
        assert!((i32::from(out.blue()) - 127).abs() <= 1);
    }

    #[test]
    fn destination_out_erases() {
        let dst = Color::from_rgba8(255, 0, 0, 255);
        let src = Color::from_rgba8(9, 9, 9, 255);
        assert_eq!(blend_pixel(CompositeOp::DestinationOut, src, dst).alpha(), 0);
    }
}
