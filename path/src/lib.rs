/*!
`swcanvas-path` is the geometry layer of the `swcanvas` raster engine.

It provides path commands and flattening, affine transforms, stroke
expansion and dashing, and holds no pixel state: everything here is a pure
function from geometry to geometry.
*/

#![warn(missing_debug_implementations)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]

mod dash;
mod error;
mod flatten;
mod path;
mod point;
mod rect;
mod scalar;
mod stroke;
mod transform;

pub use strict_num::NormalizedF32;

pub use dash::StrokeDash;
pub use error::{CanvasError, Result};
pub use flatten::{flatten, Contour};
pub use path::{Path, PathCmd};
pub use point::Point;
pub use rect::{IntRect, Rect};
pub use scalar::{Scalar, SCALAR_NEARLY_ZERO, SCALAR_TAU};
pub use stroke::{expand, LineCap, LineJoin, Stroke, StrokeOutline};
pub use transform::Transform;
