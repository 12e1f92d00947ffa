/*!
`swcanvas` is a software 2D raster engine with a Canvas-style immediate-mode
drawing API.

It renders pixel-accurate, deliberately aliased output into a caller-owned
RGBA byte buffer with no GPU, windowing system or platform graphics
dependency. Draws are dispatched to primitive-specific direct rasterizers
when possible and fall back to a flatten/stroke/scanline pipeline otherwise;
the two agree pixel for pixel wherever the dispatch rule admits the fast
path.

```
use swcanvas::{Color, Context, PaintSource, Surface};

let surface = Surface::new(100, 100).unwrap();
let mut ctx = Context::new(surface);
ctx.set_fill_style(PaintSource::Solid(Color::from_rgba8(255, 0, 0, 255)));
ctx.fill_rect(10.0, 10.0, 50.0, 30.0);
assert_eq!(ctx.surface().pixel(12, 12), Some(Color::from_rgba8(255, 0, 0, 255)));
```
*/

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::identity_op)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]

mod color;
mod composite;
mod context;
mod image;
mod mask;
mod paint;
mod raster;
mod scan;
mod shadow;
mod surface;

pub use swcanvas_path::{
    CanvasError, Contour, LineCap, LineJoin, Path, PathCmd, Point, Result, StrokeDash, Transform,
};

pub use color::{pack_color, Color, ALPHA_OPAQUE, ALPHA_TRANSPARENT};
pub use composite::{blend_pixel, CompositeOp};
pub use context::Context;
pub use image::Image;
pub use mask::ClipMask;
pub use paint::{PaintContext, PaintSource};
pub use scan::FillRule;
pub use shadow::Shadow;
pub use surface::{Surface, BYTES_PER_PIXEL, MAX_DIMENSION};
