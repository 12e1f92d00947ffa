// Copyright 2026 the swcanvas Authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::dash::StrokeDash;
use crate::flatten::Contour;
use crate::scalar::{Scalar, SCALAR_TAU};
use crate::{CanvasError, Point};

/// Deviation tolerance for round joins, caps and dots.
const CAP_TOLERANCE: f32 = 0.25;

/// Draws at the beginning and end of an open path contour.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum LineCap {
    /// No stroke extension.
    Butt,
    /// Adds a square extending half the stroke width past the endpoint.
    Square,
    /// Adds a half-disc of half the stroke width around the endpoint.
    Round,
}

impl Default for LineCap {
    fn default() -> Self {
        LineCap::Butt
    }
}

impl std::str::FromStr for LineCap {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "butt" => Ok(LineCap::Butt),
            "square" => Ok(LineCap::Square),
            "round" => Ok(LineCap::Round),
            _ => Err(CanvasError::InvalidEnum),
        }
    }
}

/// Specifies how corners are drawn when a shape is stroked.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum LineJoin {
    /// Extends the outer edges to meet, falling back to `Bevel` past the
    /// miter limit.
    Miter,
    /// Connects the outer corners with a straight edge.
    Bevel,
    /// Rounds the corner with a circular fan.
    Round,
}

impl Default for LineJoin {
    fn default() -> Self {
        LineJoin::Miter
    }
}

impl std::str::FromStr for LineJoin {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "miter" => Ok(LineJoin::Miter),
            "bevel" => Ok(LineJoin::Bevel),
            "round" => Ok(LineJoin::Round),
            _ => Err(CanvasError::InvalidEnum),
        }
    }
}

/// Stroking properties.
#[derive(Clone, PartialEq, Debug)]
pub struct Stroke {
    /// A stroke thickness. Must be > 0.
    pub width: f32,

    /// The limit at which a miter join degrades to a bevel join.
    pub miter_limit: f32,

    /// A stroke line cap.
    pub line_cap: LineCap,

    /// A stroke line join.
    pub line_join: LineJoin,

    /// A stroke dashing properties.
    pub dash: Option<StrokeDash>,
}

impl Default for Stroke {
    fn default() -> Self {
        Stroke {
            width: 1.0,
            miter_limit: 10.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            dash: None,
        }
    }
}

/// The result of stroke expansion: filled polygons whose non-zero-winding
/// union is the stroke, plus the opacity strokes thinner than one pixel are
/// rendered with.
#[derive(Clone, Debug)]
pub struct StrokeOutline {
    pub polygons: Vec<Vec<Point>>,
    pub sub_pixel_opacity: f32,
}

/// Expands contours into stroke polygons.
///
/// Strokes thinner than one pixel are emitted one pixel wide with
/// `sub_pixel_opacity` set to the requested width, which the paint source
/// multiplies into the output alpha.
///
/// The polygon union is independent of the traversal direction of each
/// contour, apart from caps at open ends.
pub fn expand(contours: &[Contour], stroke: &Stroke) -> StrokeOutline {
    let mut outline = StrokeOutline {
        polygons: Vec::new(),
        sub_pixel_opacity: 1.0,
    };

    if !stroke.width.is_finite() || stroke.width <= 0.0 {
        return outline;
    }

    let half = if stroke.width < 1.0 {
        outline.sub_pixel_opacity = stroke.width;
        0.5
    } else {
        stroke.width.half()
    };

    for contour in contours {
        match &stroke.dash {
            Some(dash) => {
                for run in dash.split(&contour.points, contour.closed) {
                    stroke_polyline(&mut outline.polygons, &run, false, half, stroke);
                }
            }
            None => {
                stroke_polyline(
                    &mut outline.polygons,
                    &contour.points,
                    contour.closed,
                    half,
                    stroke,
                );
            }
        }
    }

    outline
}

fn stroke_polyline(
    polygons: &mut Vec<Vec<Point>>,
    points: &[Point],
    closed: bool,
    half: f32,
    stroke: &Stroke,
) {
    let mut pts: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if pts.last() != Some(p) {
            pts.push(*p);
        }
    }

    if closed && pts.len() >= 2 && pts.first() == pts.last() {
        pts.pop();
    }

    if pts.is_empty() {
        return;
    }

    if pts.len() == 1 {
        push_dot(polygons, pts[0], half, stroke.line_cap);
        return;
    }

    let closed = closed && pts.len() >= 3;
    let segment_count = if closed { pts.len() } else { pts.len() - 1 };

    let mut dirs = Vec::with_capacity(segment_count);
    for i in 0..segment_count {
        let p0 = pts[i];
        let p1 = pts[(i + 1) % pts.len()];
        match (p1 - p0).normalized() {
            Some(d) => dirs.push(d),
            None => dirs.push(Point::from_xy(1.0, 0.0)),
        }
    }

    // One quad per segment; joins and caps fill the gaps between them.
    for i in 0..segment_count {
        let p0 = pts[i];
        let p1 = pts[(i + 1) % pts.len()];
        let n = dirs[i].perp().scaled(half);
        push_polygon(polygons, vec![p0 + n, p1 + n, p1 - n, p0 - n]);
    }

    let join_range = if closed { 0..segment_count } else { 1..segment_count };
    for i in join_range {
        let prev = if i == 0 { segment_count - 1 } else { i - 1 };
        push_join(polygons, pts[i], dirs[prev], dirs[i], half, stroke);
    }

    if !closed {
        let start_dir = dirs[0].scaled(-1.0);
        let end_dir = dirs[segment_count - 1];
        push_cap(polygons, pts[0], start_dir, half, stroke.line_cap);
        push_cap(polygons, *pts.last().unwrap(), end_dir, half, stroke.line_cap);
    }
}

fn push_join(
    polygons: &mut Vec<Vec<Point>>,
    vertex: Point,
    d1: Point,
    d2: Point,
    half: f32,
    stroke: &Stroke,
) {
    let cross = d1.cross(d2);
    let dot = d1.dot(d2);

    if cross.is_nearly_zero_within_tolerance(1e-6) {
        if dot > 0.0 {
            // Collinear continuation, the segment quads already overlap.
            return;
        }

        // A full reversal has no outer corner. Round joins still bulge out.
        if stroke.line_join == LineJoin::Round {
            push_cap(polygons, vertex, d1, half, LineCap::Round);
        }
        return;
    }

    // The outer side is the one the turn opens away from.
    let side = if cross > 0.0 { -1.0 } else { 1.0 };
    let n1 = d1.perp().scaled(half * side);
    let n2 = d2.perp().scaled(half * side);
    let c1 = vertex + n1;
    let c2 = vertex + n2;

    match stroke.line_join {
        LineJoin::Bevel => push_polygon(polygons, vec![vertex, c1, c2]),
        LineJoin::Round => {
            let fan = arc_fan(vertex, n1, n2, half, n1 + n2);
            let mut poly = Vec::with_capacity(fan.len() + 1);
            poly.push(vertex);
            poly.extend(fan);
            push_polygon(polygons, poly);
        }
        LineJoin::Miter => {
            // miter length / (width / 2) == 1 / cos(half the turn angle)
            let cos_half = ((1.0 + dot.clamp(-1.0, 1.0)).half()).sqrt();
            let ratio = if cos_half > 0.0 { cos_half.invert() } else { f32::INFINITY };
            if !ratio.is_finite() || ratio > stroke.miter_limit {
                push_polygon(polygons, vec![vertex, c1, c2]);
            } else {
                // The tip is the intersection of the two outer offset lines.
                let t = (c2 - c1).cross(d2) / cross;
                let tip = c1 + d1.scaled(t);
                push_polygon(polygons, vec![vertex, c1, tip, c2]);
            }
        }
    }
}

fn push_cap(
    polygons: &mut Vec<Vec<Point>>,
    endpoint: Point,
    outward: Point,
    half: f32,
    cap: LineCap,
) {
    let n = outward.perp().scaled(half);
    match cap {
        LineCap::Butt => {}
        LineCap::Square => {
            let ext = outward.scaled(half);
            push_polygon(
                polygons,
                vec![
                    endpoint + n,
                    endpoint + n + ext,
                    endpoint - n + ext,
                    endpoint - n,
                ],
            );
        }
        LineCap::Round => {
            let fan = arc_fan(endpoint, n, n.scaled(-1.0), half, outward);
            push_polygon(polygons, fan);
        }
    }
}

fn push_dot(polygons: &mut Vec<Vec<Point>>, center: Point, half: f32, cap: LineCap) {
    match cap {
        LineCap::Butt => {}
        LineCap::Square => {
            push_polygon(
                polygons,
                vec![
                    Point::from_xy(center.x - half, center.y - half),
                    Point::from_xy(center.x + half, center.y - half),
                    Point::from_xy(center.x + half, center.y + half),
                    Point::from_xy(center.x - half, center.y + half),
                ],
            );
        }
        LineCap::Round => {
            let segments = fan_segment_count(half, SCALAR_TAU);
            let mut poly = Vec::with_capacity(segments);
            for i in 0..segments {
                let angle = SCALAR_TAU * (i as f32 / segments as f32);
                poly.push(Point::from_xy(
                    center.x + half * angle.cos(),
                    center.y + half * angle.sin(),
                ));
            }
            push_polygon(polygons, poly);
        }
    }
}

/// A fan from offset `n1` to offset `n2` around `center`, sweeping the side
/// the `via` direction points into. The returned polyline starts at
/// `center + n1` and ends at `center + n2`.
fn arc_fan(center: Point, n1: Point, n2: Point, radius: f32, via: Point) -> Vec<Point> {
    let a0 = n1.y.atan2(n1.x);
    let a1 = n2.y.atan2(n2.x);
    let mut sweep = a1 - a0;
    if sweep > std::f32::consts::PI {
        sweep -= SCALAR_TAU;
    } else if sweep < -std::f32::consts::PI {
        sweep += SCALAR_TAU;
    }

    // Half turns are ambiguous; pick the side the fan must pass through.
    let mid = a0 + sweep.half();
    if Point::from_xy(mid.cos(), mid.sin()).dot(via) < 0.0 {
        sweep -= sweep.signum() * SCALAR_TAU;
    }

    let segments = fan_segment_count(radius, sweep.abs());
    let mut fan = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let angle = a0 + sweep * (i as f32 / segments as f32);
        fan.push(Point::from_xy(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        ));
    }

    fan
}

fn fan_segment_count(radius: f32, sweep: f32) -> usize {
    if radius <= CAP_TOLERANCE {
        return 1;
    }

    let max_step = 2.0 * (1.0 - CAP_TOLERANCE / radius).clamp(-1.0, 1.0).acos();
    if !(max_step > 0.0) {
        return 1;
    }

    ((sweep / max_step).ceil() as usize).clamp(1, 256)
}

/// Pushes a polygon with a canonical orientation so that overlapping stroke
/// pieces accumulate winding instead of cancelling it.
fn push_polygon(polygons: &mut Vec<Vec<Point>>, mut points: Vec<Point>) {
    if points.len() < 3 {
        return;
    }

    let mut doubled_area = 0.0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        doubled_area += a.cross(b);
    }

    if doubled_area < 0.0 {
        points.reverse();
    }

    polygons.push(points);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn winding_at(polygons: &[Vec<Point>], x: f32, y: f32) -> i32 {
        let mut winding = 0;
        for poly in polygons {
            for i in 0..poly.len() {
                let a = poly[i];
                let b = poly[(i + 1) % poly.len()];
                if (a.y - b.y).abs() < 1e-12 {
                    continue;
                }
                let (min_y, max_y) = if a.y < b.y { (a.y, b.y) } else { (b.y, a.y) };
                if min_y <= y && y < max_y {
                    let t = (y - a.y) / (b.y - a.y);
                    let ix = a.x + t * (b.x - a.x);
                    if ix > x {
                        winding += if b.y > a.y { 1 } else { -1 };
                    }
                }
            }
        }
        winding
    }

    fn contour(points: Vec<Point>, closed: bool) -> Contour {
        Contour { points, closed }
    }

    #[test]
    fn horizontal_band() {
        let c = contour(
            vec![Point::from_xy(10.0, 10.0), Point::from_xy(30.0, 10.0)],
            false,
        );
        let outline = expand(&[c], &Stroke { width: 4.0, ..Stroke::default() });
        assert_eq!(outline.sub_pixel_opacity, 1.0);

        assert_ne!(winding_at(&outline.polygons, 20.0, 10.0), 0);
        assert_ne!(winding_at(&outline.polygons, 20.0, 8.5), 0);
        assert_ne!(winding_at(&outline.polygons, 20.0, 11.5), 0);
        // Outside the band and past the butt cap.
        assert_eq!(winding_at(&outline.polygons, 20.0, 12.5), 0);
        assert_eq!(winding_at(&outline.polygons, 9.0, 10.0), 0);
    }

    #[test]
    fn sub_pixel_width() {
        let c = contour(
            vec![Point::from_xy(0.0, 0.0), Point::from_xy(10.0, 0.0)],
            false,
        );
        let outline = expand(&[c], &Stroke { width: 0.25, ..Stroke::default() });
        assert_eq!(outline.sub_pixel_opacity, 0.25);
        // Emitted one pixel wide.
        assert_ne!(winding_at(&outline.polygons, 5.0, 0.4), 0);
    }

    #[test]
    fn miter_vs_bevel() {
        let pts = vec![
            Point::from_xy(0.0, 0.0),
            Point::from_xy(10.0, 0.0),
            Point::from_xy(10.0, 10.0),
        ];

        let miter = expand(
            &[contour(pts.clone(), false)],
            &Stroke { width: 2.0, ..Stroke::default() },
        );
        // The outer corner tip reaches (11, -1) for a right-angle miter.
        assert_ne!(winding_at(&miter.polygons, 10.9, -0.9), 0);

        let bevel = expand(
            &[contour(pts, false)],
            &Stroke {
                width: 2.0,
                miter_limit: 1.2,
                ..Stroke::default()
            },
        );
        // Past the limit the corner is cut.
        assert_eq!(winding_at(&bevel.polygons, 10.9, -0.9), 0);
        assert_ne!(winding_at(&bevel.polygons, 10.4, -0.4), 0);
    }

    #[test]
    fn square_cap_extends() {
        let c = contour(
            vec![Point::from_xy(10.0, 10.0), Point::from_xy(20.0, 10.0)],
            false,
        );
        let butt = expand(&[c.clone()], &Stroke { width: 4.0, ..Stroke::default() });
        assert_eq!(winding_at(&butt.polygons, 21.0, 10.0), 0);

        let square = expand(
            &[c],
            &Stroke {
                width: 4.0,
                line_cap: LineCap::Square,
                ..Stroke::default()
            },
        );
        assert_ne!(winding_at(&square.polygons, 21.0, 10.0), 0);
        assert_ne!(winding_at(&square.polygons, 8.5, 10.0), 0);
        assert_eq!(winding_at(&square.polygons, 7.5, 10.0), 0);
    }

    #[test]
    fn direction_invariance() {
        let forward = vec![
            Point::from_xy(0.0, 0.0),
            Point::from_xy(10.0, 0.0),
            Point::from_xy(10.0, 10.0),
            Point::from_xy(0.0, 10.0),
        ];
        let mut backward = forward.clone();
        backward.reverse();

        let a = expand(
            &[contour(forward, true)],
            &Stroke { width: 3.0, ..Stroke::default() },
        );
        let b = expand(
            &[contour(backward, true)],
            &Stroke { width: 3.0, ..Stroke::default() },
        );

        for &(x, y) in &[
            (0.0, 0.0),
            (5.0, 0.6),
            (5.0, -0.6),
            (10.6, 10.6),
            (5.0, 5.0),
            (11.9, 5.0),
        ] {
            assert_eq!(
                winding_at(&a.polygons, x, y) != 0,
                winding_at(&b.polygons, x, y) != 0,
                "diverged at {} {}",
                x,
                y
            );
        }
    }

    #[test]
    fn closed_contour_has_no_caps() {
        let square = vec![
            Point::from_xy(0.0, 0.0),
            Point::from_xy(10.0, 0.0),
            Point::from_xy(10.0, 10.0),
            Point::from_xy(0.0, 10.0),
        ];
        let outline = expand(
            &[contour(square, true)],
            &Stroke {
                width: 2.0,
                line_cap: LineCap::Square,
                ..Stroke::default()
            },
        );

        // A square cap at an open start would stick out past (-1, -1).
        assert_eq!(winding_at(&outline.polygons, -1.5, 0.0), 0);
        // The closing join covers the corner.
        assert_ne!(winding_at(&outline.polygons, -0.6, -0.6), 0);
    }

    #[test]
    fn enum_parsing() {
        assert_eq!("round".parse::<LineCap>(), Ok(LineCap::Round));
        assert_eq!("bevel".parse::<LineJoin>(), Ok(LineJoin::Bevel));
        assert_eq!("beveled".parse::<LineJoin>(), Err(CanvasError::InvalidEnum));
    }
}
