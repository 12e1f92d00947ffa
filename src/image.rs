// Copyright 2026 the swcanvas Authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::surface::MAX_DIMENSION;
use crate::{CanvasError, Color, Result};

/// A caller-provided image for `draw_image`.
///
/// Stored as RGBA internally; RGB input gets an opaque alpha channel
/// appended at construction.
#[derive(Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Image {
    /// Creates an image from non-premultiplied RGBA bytes
    /// (`width * height * 4` of them).
    ///
    /// Zero or over-limit dimensions fail with `InvalidDimensions` /
    /// `SurfaceTooLarge`; a length mismatch fails with `InvalidArgCount`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::validate(width, height, data.len(), 4)?;
        Ok(Image {
            width,
            height,
            data,
        })
    }

    /// Creates an image from RGB bytes (`width * height * 3` of them),
    /// appending alpha 255 to every pixel.
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::validate(width, height, data.len(), 3)?;

        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        for rgb in data.chunks(3) {
            rgba.push(rgb[0]);
            rgba.push(rgb[1]);
            rgba.push(rgb[2]);
            rgba.push(255);
        }

        Ok(Image {
            width,
            height,
            data: rgba,
        })
    }

    fn validate(width: u32, height: u32, len: usize, bpp: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidDimensions);
        }

        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(CanvasError::SurfaceTooLarge);
        }

        if len != width as usize * height as usize * bpp {
            return Err(CanvasError::InvalidArgCount);
        }

        Ok(())
    }

    /// Returns image's width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns image's height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the internal RGBA data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The pixel at integer source coordinates; callers keep coordinates in
    /// bounds.
    pub(crate) fn pixel(&self, x: u32, y: u32) -> Color {
        debug_assert!(x < self.width && y < self.height);
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Color::from_rgba8(
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("data", &"...")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation() {
        assert_eq!(
            Image::from_rgba(0, 1, vec![]).unwrap_err(),
            CanvasError::InvalidDimensions
        );
        assert_eq!(
            Image::from_rgba(2, 1, vec![0; 4]).unwrap_err(),
            CanvasError::InvalidArgCount
        );
        assert_eq!(
            Image::from_rgb(MAX_DIMENSION + 1, 1, vec![]).unwrap_err(),
            CanvasError::SurfaceTooLarge
        );
    }

    #[test]
    fn rgb_gains_opaque_alpha() {
        let img = Image::from_rgb(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(img.pixel(0, 0), Color::from_rgba8(1, 2, 3, 255));
        assert_eq!(img.pixel(1, 0), Color::from_rgba8(4, 5, 6, 255));
    }
}
