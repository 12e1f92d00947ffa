// Copyright 2026 the swcanvas Authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! The drawing context: owns the state stack and the current path, and
//! routes every draw either to a direct rasterizer or through the general
//! flatten/stroke/scanline pipeline.

use std::sync::Arc;

use swcanvas_path::{
    expand, flatten, CanvasError, IntRect, LineCap, LineJoin, NormalizedF32, Path, PathCmd, Point,
    Rect, Result, Stroke, StrokeDash, Transform, SCALAR_TAU,
};

use crate::composite::{blend_pixel, CompositeOp};
use crate::image::Image;
use crate::mask::ClipMask;
use crate::paint::{PaintContext, PaintSource};
use crate::raster::arc::ArcRange;
use crate::raster::edge_buffer::{fill_ring, EdgeBuffer};
use crate::raster::round_rect::RoundRect;
use crate::raster::{arc, circle, line, rect, round_rect, DirectPaint, SEAM_EPSILON};
use crate::scan::{self, FillRule};
use crate::shadow::{composite_shadow, Shadow};
use crate::surface::Surface;
use crate::Color;

/// Curve flatness tolerance used when the context builds device perimeters
/// itself (rotated rounded rects, slow-path circles).
const PERIMETER_TOLERANCE: f32 = 0.25;

#[derive(Clone, Debug)]
struct DrawState {
    transform: Transform,
    line_width: f32,
    line_cap: LineCap,
    line_join: LineJoin,
    miter_limit: f32,
    line_dash: Vec<f32>,
    line_dash_offset: f32,
    fill_style: PaintSource,
    stroke_style: PaintSource,
    global_alpha: NormalizedF32,
    composite_op: CompositeOp,
    shadow: Shadow,
    clip: Option<Arc<ClipMask>>,
}

impl Default for DrawState {
    fn default() -> Self {
        DrawState {
            transform: Transform::identity(),
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: 10.0,
            line_dash: Vec::new(),
            line_dash_offset: 0.0,
            fill_style: PaintSource::default(),
            stroke_style: PaintSource::default(),
            global_alpha: NormalizedF32::ONE,
            composite_op: CompositeOp::default(),
            shadow: Shadow::default(),
            clip: None,
        }
    }
}

/// A lone-command path a draw can dispatch directly on.
enum LonePrimitive {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
    Arc {
        cx: f32,
        cy: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        ccw: bool,
    },
    Line {
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
    },
}

/// An immediate-mode drawing context over an owned [`Surface`].
///
/// The context keeps a stack of draw states (`save`/`restore`) and a
/// current path; the current path is deliberately not part of the saved
/// state. Paths are recorded in user coordinates and mapped to device
/// space by the transform current at draw time.
pub struct Context {
    surface: Surface,
    state: DrawState,
    stack: Vec<DrawState>,
    path: Path,
    slow_path_draws: u64,
}

impl Context {
    /// Creates a context drawing into `surface`.
    pub fn new(surface: Surface) -> Self {
        Context {
            surface,
            state: DrawState::default(),
            stack: Vec::new(),
            path: Path::new(),
            slow_path_draws: 0,
        }
    }

    /// Returns the surface.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Returns the mutable surface.
    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// Consumes the context, returning the surface.
    pub fn into_surface(self) -> Surface {
        self.surface
    }

    /// The number of draws the dispatch rule deflected to the general path
    /// pipeline. Tests use this to pin down which draws stay on a direct
    /// rasterizer.
    pub fn slow_path_count(&self) -> u64 {
        self.slow_path_draws
    }

    // ------------------------------------------------------------------
    // State stack.

    /// Pushes a copy of the current draw state.
    pub fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    /// Pops the last saved state. Without a matching `save` this is a
    /// no-op.
    pub fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    // ------------------------------------------------------------------
    // Transform.

    /// Returns the current transform.
    pub fn transform(&self) -> Transform {
        self.state.transform
    }

    /// Replaces the current transform. Non-finite input is ignored.
    pub fn set_transform(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        let ts = Transform::from_row(a, b, c, d, e, f);
        if ts.is_finite() {
            self.state.transform = ts;
        }
    }

    /// Resets the current transform to identity.
    pub fn reset_transform(&mut self) {
        self.state.transform = Transform::identity();
    }

    /// Translates the current transform. Non-finite input is ignored.
    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.apply_transform(Transform::from_translate(tx, ty));
    }

    /// Scales the current transform. Non-finite input is ignored.
    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.apply_transform(Transform::from_scale(sx, sy));
    }

    /// Rotates the current transform. Non-finite input is ignored.
    pub fn rotate(&mut self, angle: f32) {
        self.apply_transform(Transform::from_rotate(angle));
    }

    /// Multiplies the current transform by the given matrix. Non-finite
    /// input is ignored.
    pub fn concat_transform(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.apply_transform(Transform::from_row(a, b, c, d, e, f));
    }

    fn apply_transform(&mut self, other: Transform) {
        if !other.is_finite() {
            return;
        }

        let ts = self.state.transform.pre_concat(&other);
        if ts.is_finite() {
            self.state.transform = ts;
        }
    }

    // ------------------------------------------------------------------
    // Styles and state.

    /// Sets the fill paint source.
    pub fn set_fill_style(&mut self, paint: PaintSource) {
        self.state.fill_style = paint;
    }

    /// Returns the fill paint source.
    pub fn fill_style(&self) -> &PaintSource {
        &self.state.fill_style
    }

    /// Sets the stroke paint source.
    pub fn set_stroke_style(&mut self, paint: PaintSource) {
        self.state.stroke_style = paint;
    }

    /// Returns the stroke paint source.
    pub fn stroke_style(&self) -> &PaintSource {
        &self.state.stroke_style
    }

    /// Sets the stroke width. Zero, negative and non-finite values are
    /// ignored.
    pub fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    /// Returns the stroke width.
    pub fn line_width(&self) -> f32 {
        self.state.line_width
    }

    /// Sets the line cap.
    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    /// Returns the line cap.
    pub fn line_cap(&self) -> LineCap {
        self.state.line_cap
    }

    /// Sets the line join.
    pub fn set_line_join(&mut self, join: LineJoin) {
        self.state.line_join = join;
    }

    /// Returns the line join.
    pub fn line_join(&self) -> LineJoin {
        self.state.line_join
    }

    /// Sets the miter limit. Zero, negative and non-finite values are
    /// ignored.
    pub fn set_miter_limit(&mut self, limit: f32) {
        if limit.is_finite() && limit > 0.0 {
            self.state.miter_limit = limit;
        }
    }

    /// Returns the miter limit.
    pub fn miter_limit(&self) -> f32 {
        self.state.miter_limit
    }

    /// Sets the dash pattern. A list with a negative or non-finite value is
    /// ignored; an odd-length list is stored as its own duplication; an
    /// empty list (or one summing to zero) means solid.
    pub fn set_line_dash(&mut self, segments: Vec<f32>) {
        if segments.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return;
        }

        let mut list = segments;
        if list.len() % 2 != 0 {
            let copy = list.clone();
            list.extend_from_slice(&copy);
        }

        self.state.line_dash = list;
    }

    /// Returns the stored dash pattern.
    pub fn line_dash(&self) -> &[f32] {
        &self.state.line_dash
    }

    /// Sets the dash offset. Non-finite values are ignored.
    pub fn set_line_dash_offset(&mut self, offset: f32) {
        if offset.is_finite() {
            self.state.line_dash_offset = offset;
        }
    }

    /// Returns the dash offset.
    pub fn line_dash_offset(&self) -> f32 {
        self.state.line_dash_offset
    }

    /// Sets the global alpha. Values outside `[0, 1]` are ignored.
    pub fn set_global_alpha(&mut self, alpha: f32) {
        if let Some(alpha) = NormalizedF32::new(alpha) {
            self.state.global_alpha = alpha;
        }
    }

    /// Returns the global alpha.
    pub fn global_alpha(&self) -> f32 {
        self.state.global_alpha.get()
    }

    /// Sets the composite operation.
    pub fn set_composite_op(&mut self, op: CompositeOp) {
        self.state.composite_op = op;
    }

    /// Returns the composite operation.
    pub fn composite_op(&self) -> CompositeOp {
        self.state.composite_op
    }

    /// Sets the shadow color.
    pub fn set_shadow_color(&mut self, color: Color) {
        self.state.shadow.color = color;
    }

    /// Returns the shadow color.
    pub fn shadow_color(&self) -> Color {
        self.state.shadow.color
    }

    /// Sets the shadow offset. Non-finite values are ignored.
    pub fn set_shadow_offset(&mut self, dx: f32, dy: f32) {
        if dx.is_finite() && dy.is_finite() {
            self.state.shadow.offset_x = dx;
            self.state.shadow.offset_y = dy;
        }
    }

    /// Returns the shadow offset.
    pub fn shadow_offset(&self) -> (f32, f32) {
        (self.state.shadow.offset_x, self.state.shadow.offset_y)
    }

    /// Sets the shadow blur radius. Negative and non-finite values are
    /// ignored.
    pub fn set_shadow_blur(&mut self, blur: f32) {
        if blur.is_finite() && blur >= 0.0 {
            self.state.shadow.blur = blur;
        }
    }

    /// Returns the shadow blur radius.
    pub fn shadow_blur(&self) -> f32 {
        self.state.shadow.blur
    }

    // ------------------------------------------------------------------
    // Path building.

    /// Clears the current path.
    pub fn begin_path(&mut self) {
        self.path.clear();
    }

    /// Returns the current path.
    pub fn current_path(&self) -> &Path {
        &self.path
    }

    /// Starts a new subpath.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(x, y);
    }

    /// Adds a line to the current subpath.
    pub fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(x, y);
    }

    /// Adds a quadratic curve to the current subpath.
    pub fn quadratic_curve_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.path.quad_to(x1, y1, x, y);
    }

    /// Adds a cubic curve to the current subpath.
    pub fn bezier_curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.path.cubic_to(x1, y1, x2, y2, x, y);
    }

    /// Adds a circular arc.
    pub fn arc(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        ccw: bool,
    ) -> Result<()> {
        self.path.arc(cx, cy, radius, start_angle, end_angle, ccw)
    }

    /// Adds a tangent arc.
    pub fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) -> Result<()> {
        self.path.arc_to(x1, y1, x2, y2, radius)
    }

    /// Adds a closed rectangle subpath.
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.path.rect(x, y, w, h);
    }

    /// Closes the current subpath.
    pub fn close_path(&mut self) {
        self.path.close();
    }

    // ------------------------------------------------------------------
    // Clipping.

    /// Intersects the clip region with the current path under the non-zero
    /// rule.
    pub fn clip(&mut self) {
        self.clip_with_rule(FillRule::NonZero);
    }

    /// Intersects the clip region with the current path.
    pub fn clip_with_rule(&mut self, rule: FillRule) {
        let polygons = self.device_fill_polygons(&self.path.clone());
        let mut mask = ClipMask::empty(self.surface.width(), self.surface.height());
        scan::fill_mask(&mut mask, &polygons, rule);

        match &mut self.state.clip {
            Some(current) => Arc::make_mut(current).intersect(&mask),
            None => self.state.clip = Some(Arc::new(mask)),
        }
    }

    /// Returns the current clip mask, if any clip has been applied.
    pub fn clip_mask(&self) -> Option<&ClipMask> {
        self.state.clip.as_deref()
    }

    // ------------------------------------------------------------------
    // Hit testing.

    /// Checks whether a device-space point is inside the current path under
    /// the non-zero rule.
    pub fn is_point_in_path(&self, x: f32, y: f32) -> bool {
        self.is_point_in_path_with_rule(x, y, FillRule::NonZero)
    }

    /// Checks whether a device-space point is inside the current path.
    pub fn is_point_in_path_with_rule(&self, x: f32, y: f32, rule: FillRule) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }

        let polygons = self.device_fill_polygons(&self.path);
        scan::hit_test(&polygons, x, y, rule)
    }

    /// Checks whether a device-space point is inside the stroke of the
    /// current path under the current stroke state.
    pub fn is_point_in_stroke(&self, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }

        let contours = flatten(&self.path, self.state.transform.resolution_scale());
        let outline = expand(&contours, &self.stroke_props());
        let polygons = self.to_device(outline.polygons);
        scan::hit_test(&polygons, x, y, FillRule::NonZero)
    }

    // ------------------------------------------------------------------
    // Path draws.

    /// Fills the current path under the non-zero rule.
    pub fn fill(&mut self) {
        self.fill_with_rule(FillRule::NonZero);
    }

    /// Fills the current path.
    pub fn fill_with_rule(&mut self, rule: FillRule) {
        if self.path.is_empty() {
            return;
        }

        // A lone rect or full-circle arc path takes the same direct route
        // as the dedicated calls.
        match self.lone_primitive() {
            Some(LonePrimitive::Rect { x, y, w, h }) => {
                self.fill_rect(x, y, w, h);
                return;
            }
            Some(LonePrimitive::Arc {
                cx,
                cy,
                radius,
                start_angle,
                end_angle,
                ccw,
            }) => {
                if ArcRange::new(start_angle, end_angle, ccw) == ArcRange::Full {
                    let _ = self.fill_circle(cx, cy, radius);
                    return;
                }
            }
            _ => {}
        }

        let polygons = self.device_fill_polygons(&self.path.clone());
        let paint = self.state.fill_style.clone();
        self.render_polygons(&polygons, rule, &paint, 1.0);
    }

    /// Strokes the current path under the current stroke state.
    pub fn stroke(&mut self) {
        if self.path.is_empty() {
            return;
        }

        match self.lone_primitive() {
            Some(LonePrimitive::Rect { x, y, w, h }) => {
                self.stroke_rect(x, y, w, h);
                return;
            }
            Some(LonePrimitive::Arc {
                cx,
                cy,
                radius,
                start_angle,
                end_angle,
                ccw,
            }) => {
                if self.try_direct_stroke_arc(cx, cy, radius, start_angle, end_angle, ccw) {
                    return;
                }
            }
            Some(LonePrimitive::Line { x0, y0, x1, y1 }) => {
                if self.try_direct_stroke_line(x0, y0, x1, y1) {
                    return;
                }
            }
            None => {}
        }

        self.stroke_slow_path();
    }

    fn stroke_slow_path(&mut self) {
        let contours = flatten(&self.path, self.state.transform.resolution_scale());
        let outline = expand(&contours, &self.stroke_props());
        let polygons = self.to_device(outline.polygons);
        let paint = self.state.stroke_style.clone();
        self.render_polygons(
            &polygons,
            FillRule::NonZero,
            &paint,
            outline.sub_pixel_opacity,
        );
    }

    // ------------------------------------------------------------------
    // Rectangles.

    /// Fills a rectangle with the fill style.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let (x, y, w, h) = match normalize_rect(x, y, w, h) {
            Some(r) => r,
            None => return,
        };

        let ts = self.state.transform;
        if let Some(color) = self.direct_solid(&self.state.fill_style) {
            if ts.is_axis_aligned() {
                if self.skip_transparent(color) {
                    return;
                }
                let (l, t, r, b) = device_rect(&ts, x, y, w, h);
                self.direct_draw(color, |surface, clip, paint| {
                    rect::fill_rect(surface, clip, paint, l, t, r, b);
                });
                return;
            }

            if ts.is_rigid_rotation() {
                if self.skip_transparent(color) {
                    return;
                }
                let quad = device_quad(&ts, x, y, w, h);
                if let Some(buffer) = EdgeBuffer::from_perimeter(&quad, self.surface.height()) {
                    self.direct_draw(color, |surface, clip, paint| {
                        buffer.fill(surface, clip, paint);
                    });
                    return;
                }
            }
        }

        let polygons = vec![self.to_device_points(rect_points(x, y, w, h))];
        let paint = self.state.fill_style.clone();
        self.render_polygons(&polygons, FillRule::NonZero, &paint, 1.0);
    }

    /// Strokes a rectangle with the stroke style.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let (x, y, w, h) = match normalize_rect(x, y, w, h) {
            Some(r) => r,
            None => return,
        };

        if w > 0.0 && h > 0.0 && self.try_direct_stroke_rect(x, y, w, h) {
            return;
        }

        // Stroke the rectangle as a path without disturbing the current one.
        let mut path = Path::new();
        path.rect(x, y, w, h);
        let contours = flatten(&path, self.state.transform.resolution_scale());
        let outline = expand(&contours, &self.stroke_props());
        let polygons = self.to_device(outline.polygons);
        let paint = self.state.stroke_style.clone();
        self.render_polygons(
            &polygons,
            FillRule::NonZero,
            &paint,
            outline.sub_pixel_opacity,
        );
    }

    fn try_direct_stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) -> bool {
        if !self.state.line_dash.is_empty() {
            return false;
        }

        // Only miter corners that actually stay miters match the band fill.
        if self.state.line_join != LineJoin::Miter || self.state.miter_limit < std::f32::consts::SQRT_2
        {
            return false;
        }

        let color = match self.direct_solid(&self.state.stroke_style) {
            Some(color) => color,
            None => return false,
        };

        let (half, opacity) = self.stroke_half_width();
        let color = color.mul_alpha(opacity);
        if self.skip_transparent(color) {
            return true;
        }

        let ts = self.state.transform;
        if ts.is_axis_aligned() {
            let (l, t, r, b) = device_rect(&ts, x, y, w, h);
            let hx = half * ts.a.abs();
            let hy = half * ts.d.abs();
            let outer = (l - hx, t - hy, r + hx, b + hy);
            let inner = if r - l > 2.0 * hx && b - t > 2.0 * hy {
                Some((l + hx, t + hy, r - hx, b - hy))
            } else {
                None
            };
            self.direct_draw(color, |surface, clip, paint| {
                rect::stroke_rect(surface, clip, paint, outer, inner);
            });
            return true;
        }

        if ts.is_rigid_rotation() {
            let outer_quad = device_quad(&ts, x - half, y - half, w + 2.0 * half, h + 2.0 * half);
            let inner = if w > 2.0 * half && h > 2.0 * half {
                Some(device_quad(&ts, x + half, y + half, w - 2.0 * half, h - 2.0 * half))
            } else {
                None
            };

            let height = self.surface.height();
            let outer_buffer = match EdgeBuffer::from_perimeter(&outer_quad, height) {
                Some(buffer) => buffer,
                None => return false,
            };

            match inner.and_then(|quad| EdgeBuffer::from_perimeter(&quad, height)) {
                Some(inner_buffer) => self.direct_draw(color, |surface, clip, paint| {
                    fill_ring(surface, clip, paint, &outer_buffer, &inner_buffer);
                }),
                None => self.direct_draw(color, |surface, clip, paint| {
                    outer_buffer.fill(surface, clip, paint);
                }),
            }
            return true;
        }

        false
    }

    /// Fills then strokes a rectangle, with the fill contracted by the seam
    /// epsilon so the stroke covers the boundary exactly once.
    pub fn fill_and_stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let e = SEAM_EPSILON;
        if w > 2.0 * e && h > 2.0 * e {
            self.fill_rect(x + e, y + e, w - 2.0 * e, h - 2.0 * e);
        }
        self.stroke_rect(x, y, w, h);
    }

    /// Replaces a rectangle with transparent black, honoring the transform
    /// and clip but not the global alpha or composite operation.
    pub fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let (x, y, w, h) = match normalize_rect(x, y, w, h) {
            Some(r) => r,
            None => return,
        };

        let ts = self.state.transform;
        let clip = self.state.clip.clone();

        if ts.is_axis_aligned() {
            let (l, t, r, b) = device_rect(&ts, x, y, w, h);
            rect::fill_rect(
                &mut self.surface,
                clip.as_deref(),
                DirectPaint::Write(0),
                l,
                t,
                r,
                b,
            );
            return;
        }

        if ts.is_rigid_rotation() {
            let quad = device_quad(&ts, x, y, w, h);
            if let Some(buffer) = EdgeBuffer::from_perimeter(&quad, self.surface.height()) {
                buffer.fill(&mut self.surface, clip.as_deref(), DirectPaint::Write(0));
                return;
            }
        }

        self.slow_path_draws += 1;
        let polygons = vec![self.to_device_points(rect_points(x, y, w, h))];
        let ctx = PaintContext {
            transform: ts,
            global_alpha: NormalizedF32::ONE,
            sub_pixel_opacity: NormalizedF32::ONE,
        };
        scan::fill_polygons(
            &mut self.surface,
            &polygons,
            &PaintSource::Solid(Color::TRANSPARENT),
            &ctx,
            FillRule::NonZero,
            CompositeOp::Copy,
            clip.as_deref(),
            None,
        );
    }

    // ------------------------------------------------------------------
    // Circles and arcs.

    /// Fills a circle with the fill style.
    ///
    /// Produces the same pixels as filling an equivalent full-sweep `arc`
    /// path.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) -> Result<()> {
        validate_circle(cx, cy, radius)?;
        if radius == 0.0 {
            return Ok(());
        }

        let ts = self.state.transform;
        if let Some(color) = self.direct_solid(&self.state.fill_style) {
            if preserves_circles(&ts) {
                if self.skip_transparent(color) {
                    return Ok(());
                }
                let center = ts.transform_point(Point::from_xy(cx, cy));
                let r = radius * ts.uniform_scale();
                self.direct_draw(color, |surface, clip, paint| {
                    circle::fill_circle(surface, clip, paint, center.x, center.y, r);
                });
                return Ok(());
            }
        }

        let polygons = vec![self.to_device_points(circle_points(cx, cy, radius, &ts))];
        let paint = self.state.fill_style.clone();
        self.render_polygons(&polygons, FillRule::NonZero, &paint, 1.0);
        Ok(())
    }

    /// Strokes a circle with the stroke style.
    pub fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32) -> Result<()> {
        validate_circle(cx, cy, radius)?;
        if radius == 0.0 {
            return Ok(());
        }

        if self.try_direct_stroke_circle(cx, cy, radius, ArcRange::Full) {
            return Ok(());
        }

        let mut path = Path::new();
        path.arc(cx, cy, radius, 0.0, SCALAR_TAU, false)?;
        let contours = flatten(&path, self.state.transform.resolution_scale());
        let outline = expand(&contours, &self.stroke_props());
        let polygons = self.to_device(outline.polygons);
        let paint = self.state.stroke_style.clone();
        self.render_polygons(
            &polygons,
            FillRule::NonZero,
            &paint,
            outline.sub_pixel_opacity,
        );
        Ok(())
    }

    /// Fills then strokes a circle, seam-free.
    pub fn fill_and_stroke_circle(&mut self, cx: f32, cy: f32, radius: f32) -> Result<()> {
        validate_circle(cx, cy, radius)?;
        if radius > SEAM_EPSILON {
            self.fill_circle(cx, cy, radius - SEAM_EPSILON)?;
        }
        self.stroke_circle(cx, cy, radius)
    }

    fn try_direct_stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, range: ArcRange) -> bool {
        if !self.state.line_dash.is_empty() {
            return false;
        }

        // Partial arcs end in caps the angle filter cannot express.
        if range != ArcRange::Full && self.state.line_cap != LineCap::Butt {
            return false;
        }

        let ts = self.state.transform;
        if !preserves_circles(&ts) {
            return false;
        }

        let color = match self.direct_solid(&self.state.stroke_style) {
            Some(color) => color,
            None => return false,
        };

        let scale = ts.uniform_scale();
        let center = ts.transform_point(Point::from_xy(cx, cy));
        let r = radius * scale;
        let device_width = self.state.line_width * scale;

        let (color, one_px) = if device_width <= 1.0 {
            (color.mul_alpha(device_width.min(1.0)), true)
        } else {
            (color, false)
        };

        if self.skip_transparent(color) {
            return true;
        }

        match (one_px, range) {
            (true, ArcRange::Full) => self.direct_draw(color, |surface, clip, paint| {
                circle::stroke_circle_1px(surface, clip, paint, center.x, center.y, r);
            }),
            (false, ArcRange::Full) => {
                let half = device_width * 0.5;
                self.direct_draw(color, |surface, clip, paint| {
                    circle::stroke_circle_thick(surface, clip, paint, center.x, center.y, r, half);
                });
            }
            (_, ArcRange::Empty) => {}
            (true, range) => self.direct_draw(color, |surface, clip, paint| {
                arc::stroke_arc_1px(surface, clip, paint, center.x, center.y, r, range);
            }),
            (false, range) => {
                let half = device_width * 0.5;
                self.direct_draw(color, |surface, clip, paint| {
                    arc::stroke_arc_thick(surface, clip, paint, center.x, center.y, r, half, range);
                });
            }
        }

        true
    }

    fn try_direct_stroke_arc(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        ccw: bool,
    ) -> bool {
        // Rotating a partial arc shifts its angle range; only the full
        // sweep stays rotation-invariant, so partial arcs require an
        // axis-aligned transform.
        let range = ArcRange::new(start_angle, end_angle, ccw);
        if range != ArcRange::Full && !self.state.transform.is_axis_aligned() {
            return false;
        }

        self.try_direct_stroke_circle(cx, cy, radius, range)
    }

    fn try_direct_stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) -> bool {
        if !self.state.line_dash.is_empty() || self.state.line_cap == LineCap::Round {
            return false;
        }

        let ts = self.state.transform;
        if !ts.is_axis_aligned() && !ts.is_rigid_rotation() {
            return false;
        }

        let color = match self.direct_solid(&self.state.stroke_style) {
            Some(color) => color,
            None => return false,
        };

        let (half, opacity) = self.stroke_half_width();
        let color = color.mul_alpha(opacity);
        if self.skip_transparent(color) {
            return true;
        }

        let p0 = ts.transform_point(Point::from_xy(x0, y0));
        let p1 = ts.transform_point(Point::from_xy(x1, y1));

        // Pure rotation or translation, one pixel wide, not axis-aligned:
        // the Bresenham walk is the defined output.
        let diagonal = p0.x != p1.x && p0.y != p1.y;
        if diagonal
            && self.state.line_cap == LineCap::Butt
            && self.state.line_width <= 1.0
            && (ts.uniform_scale() - 1.0).abs() < 1e-6
            && ts.is_rigid_rotation()
        {
            self.direct_draw(color, |surface, clip, paint| {
                line::stroke_line_1px(surface, clip, paint, p0.x, p0.y, p1.x, p1.y);
            });
            return true;
        }

        // Everything else fills the stroke quad through the edge buffer,
        // which matches the general pipeline span for span.
        // Zero-length lines are cap dots; the stroke generator handles them.
        let dir = match (Point::from_xy(x1, y1) - Point::from_xy(x0, y0)).normalized() {
            Some(dir) => dir,
            None => return false,
        };

        let n = dir.perp().scaled(half);
        let (a, b) = if self.state.line_cap == LineCap::Square {
            let ext = dir.scaled(half);
            (Point::from_xy(x0, y0) - ext, Point::from_xy(x1, y1) + ext)
        } else {
            (Point::from_xy(x0, y0), Point::from_xy(x1, y1))
        };

        let quad = self.to_device_points(vec![a + n, b + n, b - n, a - n]);
        match EdgeBuffer::from_perimeter(&quad, self.surface.height()) {
            Some(buffer) => {
                self.direct_draw(color, |surface, clip, paint| {
                    buffer.fill(surface, clip, paint);
                });
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Rounded rectangles.

    /// Fills a rounded rectangle with the fill style.
    pub fn fill_round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32) -> Result<()> {
        validate_round_rect(x, y, w, h, radius)?;
        let (x, y, w, h) = match normalize_rect(x, y, w, h) {
            Some(r) => r,
            None => return Ok(()),
        };

        let ts = self.state.transform;
        if let Some(color) = self.direct_solid(&self.state.fill_style) {
            if ts.is_axis_aligned() && ts.a.abs() == ts.d.abs() {
                if self.skip_transparent(color) {
                    return Ok(());
                }
                let rrect = device_round_rect(&ts, x, y, w, h, radius);
                self.direct_draw(color, |surface, clip, paint| {
                    round_rect::fill_round_rect(surface, clip, paint, &rrect);
                });
                return Ok(());
            }

            if ts.is_rigid_rotation() {
                if self.skip_transparent(color) {
                    return Ok(());
                }
                let user = RoundRect::new(x, y, x + w, y + h, radius);
                let perimeter = self
                    .to_device_points(user.perimeter(PERIMETER_TOLERANCE / ts.resolution_scale()));
                if let Some(buffer) = EdgeBuffer::from_perimeter(&perimeter, self.surface.height())
                {
                    self.direct_draw(color, |surface, clip, paint| {
                        buffer.fill(surface, clip, paint);
                    });
                    return Ok(());
                }
            }
        }

        let user = RoundRect::new(x, y, x + w, y + h, radius);
        let polygons = vec![self
            .to_device_points(user.perimeter(PERIMETER_TOLERANCE / ts.resolution_scale()))];
        let paint = self.state.fill_style.clone();
        self.render_polygons(&polygons, FillRule::NonZero, &paint, 1.0);
        Ok(())
    }

    /// Strokes a rounded rectangle with the stroke style.
    pub fn stroke_round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32) -> Result<()> {
        validate_round_rect(x, y, w, h, radius)?;
        let (x, y, w, h) = match normalize_rect(x, y, w, h) {
            Some(r) => r,
            None => return Ok(()),
        };

        if self.try_direct_stroke_round_rect(x, y, w, h, radius) {
            return Ok(());
        }

        let ts = self.state.transform;
        let user = RoundRect::new(x, y, x + w, y + h, radius);
        let contour = swcanvas_path::Contour {
            points: user.perimeter(PERIMETER_TOLERANCE / ts.resolution_scale()),
            closed: true,
        };
        let outline = expand(&[contour], &self.stroke_props());
        let polygons = self.to_device(outline.polygons);
        let paint = self.state.stroke_style.clone();
        self.render_polygons(
            &polygons,
            FillRule::NonZero,
            &paint,
            outline.sub_pixel_opacity,
        );
        Ok(())
    }

    /// Fills then strokes a rounded rectangle, seam-free.
    pub fn fill_and_stroke_round_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
    ) -> Result<()> {
        validate_round_rect(x, y, w, h, radius)?;
        let e = SEAM_EPSILON;
        if w > 2.0 * e && h > 2.0 * e {
            self.fill_round_rect(x + e, y + e, w - 2.0 * e, h - 2.0 * e, (radius - e).max(0.0))?;
        }
        self.stroke_round_rect(x, y, w, h, radius)
    }

    fn try_direct_stroke_round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32) -> bool {
        if !self.state.line_dash.is_empty() || w <= 0.0 || h <= 0.0 {
            return false;
        }

        let color = match self.direct_solid(&self.state.stroke_style) {
            Some(color) => color,
            None => return false,
        };

        let (half, opacity) = self.stroke_half_width();
        let color = color.mul_alpha(opacity);

        let ts = self.state.transform;
        if ts.is_axis_aligned() && ts.a.abs() == ts.d.abs() {
            if self.skip_transparent(color) {
                return true;
            }
            let scale = ts.a.abs();
            let rrect = device_round_rect(&ts, x, y, w, h, radius);
            let outer = match rrect.inset(-half * scale) {
                Some(outer) => outer,
                None => return false,
            };
            let inner = rrect.inset(half * scale);
            self.direct_draw(color, |surface, clip, paint| {
                round_rect::stroke_round_rect(surface, clip, paint, &outer, inner.as_ref());
            });
            return true;
        }

        if ts.is_rigid_rotation() {
            if self.skip_transparent(color) {
                return true;
            }
            let tolerance = PERIMETER_TOLERANCE / ts.resolution_scale();
            let user = RoundRect::new(x, y, x + w, y + h, radius);
            let outer = match user.inset(-half) {
                Some(outer) => outer,
                None => return false,
            };
            let inner = user.inset(half);

            let height = self.surface.height();
            let outer_points = self.to_device_points(outer.perimeter(tolerance));
            let outer_buffer = match EdgeBuffer::from_perimeter(&outer_points, height) {
                Some(buffer) => buffer,
                None => return false,
            };

            let inner_buffer = inner.and_then(|inner| {
                let points = self.to_device_points(inner.perimeter(tolerance));
                EdgeBuffer::from_perimeter(&points, height)
            });

            match inner_buffer {
                Some(inner_buffer) => self.direct_draw(color, |surface, clip, paint| {
                    fill_ring(surface, clip, paint, &outer_buffer, &inner_buffer);
                }),
                None => self.direct_draw(color, |surface, clip, paint| {
                    outer_buffer.fill(surface, clip, paint);
                }),
            }
            return true;
        }

        false
    }

    // ------------------------------------------------------------------
    // Images.

    /// Draws the whole image with its top-left corner at `(dx, dy)`.
    pub fn draw_image(&mut self, image: &Image, dx: f32, dy: f32) -> Result<()> {
        let (w, h) = (image.width() as f32, image.height() as f32);
        self.draw_image_full(image, 0.0, 0.0, w, h, dx, dy, w, h)
    }

    /// Draws the whole image scaled into the destination rectangle.
    pub fn draw_image_rect(
        &mut self,
        image: &Image,
        dx: f32,
        dy: f32,
        dw: f32,
        dh: f32,
    ) -> Result<()> {
        let (w, h) = (image.width() as f32, image.height() as f32);
        self.draw_image_full(image, 0.0, 0.0, w, h, dx, dy, dw, dh)
    }

    /// Draws a source rectangle of the image into a destination rectangle,
    /// resampling with nearest-neighbor over the transformed quad.
    pub fn draw_image_full(
        &mut self,
        image: &Image,
        sx: f32,
        sy: f32,
        sw: f32,
        sh: f32,
        dx: f32,
        dy: f32,
        dw: f32,
        dh: f32,
    ) -> Result<()> {
        for v in [sx, sy, sw, sh, dx, dy, dw, dh] {
            if !v.is_finite() {
                return Err(CanvasError::TypeError);
            }
        }

        if sw < 0.0
            || sh < 0.0
            || sx < 0.0
            || sy < 0.0
            || sx + sw > image.width() as f32
            || sy + sh > image.height() as f32
        {
            return Err(CanvasError::SourceRectOutOfBounds);
        }

        let ts = self.state.transform;
        let inverse = ts.invert().ok_or(CanvasError::Singular)?;

        if sw == 0.0 || sh == 0.0 || dw <= 0.0 || dh <= 0.0 {
            return Ok(());
        }

        // Conservative device bounding box of the destination quad.
        let corners = device_quad(&ts, dx, dy, dw, dh);
        let bounds = match Rect::from_points(&corners) {
            Some(bounds) => bounds,
            None => return Ok(()),
        };
        let bbox = IntRect::from_ltrb(
            bounds.left().floor() as i32,
            bounds.top().floor() as i32,
            bounds.right().ceil() as i32 + 1,
            bounds.bottom().ceil() as i32 + 1,
        )
        .intersect(&IntRect::from_ltrb(
            0,
            0,
            self.surface.width() as i32,
            self.surface.height() as i32,
        ));
        if bbox.is_empty() {
            return Ok(());
        }

        let (x0, y0) = (bbox.left, bbox.top);
        let (x1, y1) = (bbox.right - 1, bbox.bottom - 1);

        let last_col = (sx + sw).ceil() as u32 - 1;
        let last_row = (sy + sh).ceil() as u32 - 1;
        let sample = |x: i32, y: i32| -> Option<Color> {
            let p = inverse.transform_point(Point::from_xy(x as f32 + 0.5, y as f32 + 0.5));
            if p.x < dx || p.x >= dx + dw || p.y < dy || p.y >= dy + dh {
                return None;
            }

            let u = sx + (p.x - dx) / dw * sw;
            let v = sy + (p.y - dy) / dh * sh;
            let ix = (u.floor() as u32).min(last_col.min(image.width() - 1));
            let iy = (v.floor() as u32).min(last_row.min(image.height() - 1));
            Some(image.pixel(ix, iy))
        };

        let clip = self.state.clip.clone();
        let op = self.state.composite_op;
        let alpha = self.state.global_alpha.get();

        if self.state.shadow.is_active() {
            let mut scratch = Surface::new(self.surface.width(), self.surface.height())
                .expect("surface dimensions are already validated");
            for y in y0..=y1 {
                for x in x0..=x1 {
                    if let Some(color) = sample(x, y) {
                        scratch.put32(x as u32, y as u32, color.get());
                    }
                }
            }
            let shadow = self.state.shadow;
            composite_shadow(&mut self.surface, &scratch, &shadow, alpha, clip.as_deref());
        }

        if op.is_canvas_wide() {
            let mut mask = ClipMask::empty(self.surface.width(), self.surface.height());
            for y in y0..=y1 {
                for x in x0..=x1 {
                    if sample(x, y).is_some() {
                        mask.set(x as u32, y as u32);
                    }
                }
            }

            for y in 0..self.surface.height() as i32 {
                for x in 0..self.surface.width() as i32 {
                    let (ux, uy) = (x as u32, y as u32);
                    if let Some(clip) = clip.as_deref() {
                        if !clip.test(ux, uy) {
                            continue;
                        }
                    }

                    let src = if mask.test(ux, uy) {
                        sample(x, y).unwrap_or(Color::TRANSPARENT).mul_alpha(alpha)
                    } else {
                        Color::TRANSPARENT
                    };
                    let dst = Color::from_packed(self.surface.get32(ux, uy));
                    self.surface.put32(ux, uy, blend_pixel(op, src, dst).get());
                }
            }
            return Ok(());
        }

        for y in y0..=y1 {
            for x in x0..=x1 {
                let src = match sample(x, y) {
                    Some(color) => color.mul_alpha(alpha),
                    None => continue,
                };
                if src.alpha() == 0 {
                    continue;
                }

                let (ux, uy) = (x as u32, y as u32);
                if let Some(clip) = clip.as_deref() {
                    if !clip.test(ux, uy) {
                        continue;
                    }
                }

                let dst = Color::from_packed(self.surface.get32(ux, uy));
                self.surface.put32(ux, uy, blend_pixel(op, src, dst).get());
            }
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals.

    fn lone_primitive(&self) -> Option<LonePrimitive> {
        match self.path.commands() {
            &[PathCmd::Rect { x, y, w, h }] => Some(LonePrimitive::Rect { x, y, w, h }),
            &[PathCmd::Arc {
                cx,
                cy,
                radius,
                start_angle,
                end_angle,
                ccw,
            }] => Some(LonePrimitive::Arc {
                cx,
                cy,
                radius,
                start_angle,
                end_angle,
                ccw,
            }),
            &[PathCmd::MoveTo { x: x0, y: y0 }, PathCmd::LineTo { x: x1, y: y1 }] => {
                Some(LonePrimitive::Line { x0, y0, x1, y1 })
            }
            _ => None,
        }
    }

    fn stroke_props(&self) -> Stroke {
        let dash = if self.state.line_dash.is_empty() {
            None
        } else {
            StrokeDash::new(self.state.line_dash.clone(), self.state.line_dash_offset)
        };

        Stroke {
            width: self.state.line_width,
            miter_limit: self.state.miter_limit,
            line_cap: self.state.line_cap,
            line_join: self.state.line_join,
            dash,
        }
    }

    /// The user-space stroke half-width and the sub-pixel opacity that goes
    /// with it.
    fn stroke_half_width(&self) -> (f32, f32) {
        if self.state.line_width < 1.0 {
            (0.5, self.state.line_width)
        } else {
            (self.state.line_width * 0.5, 1.0)
        }
    }

    fn paint_ctx(&self, sub_pixel_opacity: f32) -> PaintContext {
        PaintContext {
            transform: self.state.transform,
            global_alpha: self.state.global_alpha,
            sub_pixel_opacity: NormalizedF32::new_clamped(sub_pixel_opacity),
        }
    }

    /// The solid color for a direct rasterizer, with the global alpha
    /// applied, or `None` when the dispatch rule deflects the draw.
    fn direct_solid(&self, paint: &PaintSource) -> Option<Color> {
        if self.state.shadow.is_active() {
            return None;
        }

        let op = self.state.composite_op;
        if op != CompositeOp::SourceOver && op != CompositeOp::Copy {
            return None;
        }

        let color = paint.is_solid()?;
        Some(color.mul_alpha(self.state.global_alpha.get()))
    }

    /// A transparent source under source-over draws nothing.
    fn skip_transparent(&self, color: Color) -> bool {
        color.alpha() == 0 && self.state.composite_op == CompositeOp::SourceOver
    }

    /// Runs a direct rasterizer, handling the canvas-wide half of `copy`
    /// by clearing every writable pixel first and replace-writing the
    /// primitive.
    fn direct_draw<F>(&mut self, color: Color, draw: F)
    where
        F: FnOnce(&mut Surface, Option<&ClipMask>, DirectPaint),
    {
        if self.state.composite_op == CompositeOp::Copy {
            self.clear_writable();
        }

        let paint = DirectPaint::new(color, self.state.composite_op);
        let clip = self.state.clip.clone();
        draw(&mut self.surface, clip.as_deref(), paint);
    }

    fn clear_writable(&mut self) {
        match self.state.clip.clone() {
            None => self.surface.fill(Color::TRANSPARENT),
            Some(mask) => {
                for y in 0..self.surface.height() {
                    for x in 0..self.surface.width() {
                        if mask.test(x, y) {
                            self.surface.put32(x, y, 0);
                        }
                    }
                }
            }
        }
    }

    /// The general pipeline: shadow wrap, canvas-wide two-pass or plain
    /// scanline fill of device-space polygons. Every call counts as a
    /// slow-path draw.
    fn render_polygons(
        &mut self,
        polygons: &[Vec<Point>],
        rule: FillRule,
        paint: &PaintSource,
        sub_pixel_opacity: f32,
    ) {
        self.slow_path_draws += 1;

        let ctx = self.paint_ctx(sub_pixel_opacity);
        let op = self.state.composite_op;
        let clip = self.state.clip.clone();

        if let Some(color) = paint.is_solid() {
            let invisible = color.alpha() == 0 || ctx.opacity() == 0.0;
            if invisible && op.transparent_source_is_noop() {
                return;
            }
        }

        if self.state.shadow.is_active() {
            let mut scratch = Surface::new(self.surface.width(), self.surface.height())
                .expect("surface dimensions are already validated");
            let shape_ctx = PaintContext {
                transform: ctx.transform,
                global_alpha: NormalizedF32::ONE,
                sub_pixel_opacity: ctx.sub_pixel_opacity,
            };
            scan::fill_polygons(
                &mut scratch,
                polygons,
                paint,
                &shape_ctx,
                rule,
                CompositeOp::SourceOver,
                clip.as_deref(),
                None,
            );
            let shadow = self.state.shadow;
            composite_shadow(
                &mut self.surface,
                &scratch,
                &shadow,
                ctx.global_alpha.get(),
                clip.as_deref(),
            );
        }

        if op.is_canvas_wide() {
            let mut mask = ClipMask::empty(self.surface.width(), self.surface.height());
            scan::fill_polygons(
                &mut self.surface,
                polygons,
                paint,
                &ctx,
                rule,
                op,
                None,
                Some(&mut mask),
            );

            let solid = paint.resolve_solid(&ctx);
            for y in 0..self.surface.height() {
                for x in 0..self.surface.width() {
                    if let Some(clip) = clip.as_deref() {
                        if !clip.test(x, y) {
                            continue;
                        }
                    }

                    let src = if mask.test(x, y) {
                        match solid {
                            Some(color) => color,
                            None => paint.eval(x as i32, y as i32, &ctx),
                        }
                    } else {
                        Color::TRANSPARENT
                    };

                    let dst = Color::from_packed(self.surface.get32(x, y));
                    self.surface.put32(x, y, blend_pixel(op, src, dst).get());
                }
            }
        } else {
            scan::fill_polygons(
                &mut self.surface,
                polygons,
                paint,
                &ctx,
                rule,
                op,
                clip.as_deref(),
                None,
            );
        }
    }

    /// Flattens a path and maps it to device space under the current
    /// transform.
    fn device_fill_polygons(&self, path: &Path) -> Vec<Vec<Point>> {
        let contours = flatten(path, self.state.transform.resolution_scale());
        self.to_device(contours.into_iter().map(|c| c.points).collect())
    }

    fn to_device(&self, mut polygons: Vec<Vec<Point>>) -> Vec<Vec<Point>> {
        for polygon in &mut polygons {
            self.state.transform.map_points(polygon);
        }
        polygons
    }

    fn to_device_points(&self, mut points: Vec<Point>) -> Vec<Point> {
        self.state.transform.map_points(&mut points);
        points
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("surface", &self.surface)
            .field("saved_states", &self.stack.len())
            .field("slow_path_draws", &self.slow_path_draws)
            .finish()
    }
}

/// Normalizes a rectangle with negative extents; `None` means nothing to
/// draw. Non-finite input is dropped with a warning.
fn normalize_rect(x: f32, y: f32, w: f32, h: f32) -> Option<(f32, f32, f32, f32)> {
    if !(x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite()) {
        log::warn!("non-finite rectangle is ignored");
        return None;
    }

    let (x, w) = if w < 0.0 { (x + w, -w) } else { (x, w) };
    let (y, h) = if h < 0.0 { (y + h, -h) } else { (y, h) };
    if w == 0.0 || h == 0.0 {
        return None;
    }

    Some((x, y, w, h))
}

fn validate_circle(cx: f32, cy: f32, radius: f32) -> Result<()> {
    if !(cx.is_finite() && cy.is_finite() && radius.is_finite()) {
        return Err(CanvasError::TypeError);
    }
    if radius < 0.0 {
        return Err(CanvasError::IndexSize);
    }
    Ok(())
}

fn validate_round_rect(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Result<()> {
    if !(x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite() && radius.is_finite()) {
        return Err(CanvasError::TypeError);
    }
    if radius < 0.0 {
        return Err(CanvasError::IndexSize);
    }
    Ok(())
}

/// Device edges of an axis-aligned rect under an axis-aligned transform.
fn device_rect(ts: &Transform, x: f32, y: f32, w: f32, h: f32) -> (f32, f32, f32, f32) {
    let p0 = ts.transform_point(Point::from_xy(x, y));
    let p1 = ts.transform_point(Point::from_xy(x + w, y + h));
    (
        p0.x.min(p1.x),
        p0.y.min(p1.y),
        p0.x.max(p1.x),
        p0.y.max(p1.y),
    )
}

fn rect_points(x: f32, y: f32, w: f32, h: f32) -> Vec<Point> {
    vec![
        Point::from_xy(x, y),
        Point::from_xy(x + w, y),
        Point::from_xy(x + w, y + h),
        Point::from_xy(x, y + h),
    ]
}

fn device_quad(ts: &Transform, x: f32, y: f32, w: f32, h: f32) -> Vec<Point> {
    let mut points = rect_points(x, y, w, h);
    ts.map_points(&mut points);
    points
}

fn device_round_rect(ts: &Transform, x: f32, y: f32, w: f32, h: f32, radius: f32) -> RoundRect {
    let (l, t, r, b) = device_rect(ts, x, y, w, h);
    RoundRect::new(l, t, r, b, radius * ts.a.abs())
}

/// Transforms under which a circle stays a circle: rigid rotations and
/// axis-aligned flips with a uniform scale magnitude.
fn preserves_circles(ts: &Transform) -> bool {
    ts.is_rigid_rotation() || (ts.is_axis_aligned() && ts.a.abs() == ts.d.abs() && ts.a != 0.0)
}

/// A full-circle outline flattened in user space.
fn circle_points(cx: f32, cy: f32, radius: f32, ts: &Transform) -> Vec<Point> {
    let mut path = Path::new();
    // The angles are finite, so recording cannot fail.
    let _ = path.arc(cx, cy, radius, 0.0, SCALAR_TAU, false);
    flatten(&path, ts.resolution_scale())
        .into_iter()
        .next()
        .map(|c| c.points)
        .unwrap_or_default()
}
