// Copyright 2026 the swcanvas Authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/// A `Result` alias over [`CanvasError`].
pub type Result<T> = std::result::Result<T, CanvasError>;

/// Errors reported at the drawing API boundary.
///
/// Validation failures abort the current operation without touching the
/// surface. Geometry that simply produces no pixels is not an error.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CanvasError {
    /// A surface or image dimension is zero.
    InvalidDimensions,
    /// A surface or image dimension exceeds the implementation limit.
    SurfaceTooLarge,
    /// The transform is not invertible.
    Singular,
    /// A radius is negative.
    IndexSize,
    /// A numeric input is not finite.
    TypeError,
    /// An enumeration string is not recognized.
    InvalidEnum,
    /// A source rectangle lies outside the image bounds.
    SourceRectOutOfBounds,
    /// A drawing call received an unsupported combination of arguments.
    InvalidArgCount,
}

impl std::fmt::Display for CanvasError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CanvasError::InvalidDimensions => write!(f, "width and height must be positive"),
            CanvasError::SurfaceTooLarge => write!(f, "surface dimensions exceed the limit"),
            CanvasError::Singular => write!(f, "transform is not invertible"),
            CanvasError::IndexSize => write!(f, "radius must not be negative"),
            CanvasError::TypeError => write!(f, "numeric input must be finite"),
            CanvasError::InvalidEnum => write!(f, "unrecognized enumeration value"),
            CanvasError::SourceRectOutOfBounds => {
                write!(f, "source rectangle is outside the image")
            }
            CanvasError::InvalidArgCount => write!(f, "unsupported argument combination"),
        }
    }
}

impl std::error::Error for CanvasError {}
