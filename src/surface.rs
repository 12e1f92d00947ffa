// Copyright 2026 the swcanvas Authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use arrayref::array_ref;

use crate::{CanvasError, Color, Result};

/// Number of bytes per pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// The largest supported surface side.
pub const MAX_DIMENSION: u32 = 16384;

/// A container that owns non-premultiplied RGBA pixels.
///
/// The data is row-major with `stride == width * 4` bytes per row; one pixel
/// is the four bytes `R,G,B,A`. The 32-bit view returned by
/// [`data32`](Surface::data32) aliases the same storage; on little-endian
/// targets (the documented choice) each word equals
/// [`pack_color`](crate::pack_color) of its pixel.
#[derive(Clone, PartialEq)]
pub struct Surface {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Surface {
    /// Allocates a new surface filled with transparent black.
    ///
    /// A zero dimension fails with `InvalidDimensions`; a dimension above
    /// [`MAX_DIMENSION`] fails with `SurfaceTooLarge`.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidDimensions);
        }

        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(CanvasError::SurfaceTooLarge);
        }

        let len = width as usize * height as usize * BYTES_PER_PIXEL;
        Ok(Surface {
            data: vec![0; len],
            width,
            height,
        })
    }

    /// Returns surface's width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns surface's height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Returns the internal data.
    ///
    /// Bytes are ordered as RGBA.
    pub fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// Returns the mutable internal data.
    ///
    /// Bytes are ordered as RGBA.
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.data.as_mut_slice()
    }

    /// Returns the pixels as one 32-bit word each, aliasing [`data`](Surface::data).
    pub fn data32(&self) -> &[u32] {
        bytemuck::cast_slice(self.data.as_slice())
    }

    /// Returns the mutable 32-bit pixel view.
    pub fn data32_mut(&mut self) -> &mut [u32] {
        bytemuck::cast_slice_mut(self.data.as_mut_slice())
    }

    /// Returns a pixel color.
    ///
    /// Returns `None` when the position is out of bounds; out-of-bounds
    /// reads are not an error.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let idx = self.pixel_index(x, y) * BYTES_PER_PIXEL;
        let rgba = array_ref![self.data, idx, BYTES_PER_PIXEL];
        Some(Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3]))
    }

    /// Fills the entire surface with the color.
    pub fn fill(&mut self, color: Color) {
        let word = color.get();
        for p in self.data32_mut() {
            *p = word;
        }
    }

    /// Consumes the internal data.
    pub fn take(self) -> Vec<u8> {
        self.data
    }

    pub(crate) fn pixel_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub(crate) fn get32(&self, x: u32, y: u32) -> u32 {
        let idx = self.pixel_index(x, y);
        self.data32()[idx]
    }

    pub(crate) fn put32(&mut self, x: u32, y: u32, word: u32) {
        let idx = self.pixel_index(x, y);
        self.data32_mut()[idx] = word;
    }

    /// Encodes the surface into PNG data.
    #[cfg(feature = "png-format")]
    pub fn encode_png(&self) -> std::result::Result<Vec<u8>, png::EncodingError> {
        let mut data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut data, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.data)?;
        }

        Ok(data)
    }

    /// Saves the surface as a PNG file.
    #[cfg(feature = "png-format")]
    pub fn save_png<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> std::result::Result<(), png::EncodingError> {
        let data = self.encode_png()?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("data", &"...")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
