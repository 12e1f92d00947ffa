// Copyright 2026 the swcanvas Authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use arrayvec::ArrayVec;

use crate::path::{Path, PathCmd};
use crate::scalar::{Scalar, SCALAR_TAU};
use crate::Point;

/// Flatness tolerance in device pixels.
const FLATNESS_TOLERANCE: f32 = 0.25;

/// Subdivision stack capacity. When the stack is exhausted the remaining
/// curve is emitted as a chord, which keeps flattening bounded on
/// pathological input.
const STACK_CAPACITY: usize = 34;

/// Maximum number of segments a single arc discretizes into.
const MAX_ARC_SEGMENTS: usize = 4096;

/// A flattened subpath: a polyline plus a closed flag.
///
/// Filling treats every contour as implicitly closed; stroking caps open
/// contours and joins closed ones end-to-start.
#[derive(Clone, PartialEq, Debug)]
pub struct Contour {
    pub points: Vec<Point>,
    pub closed: bool,
}

/// Converts a path into a list of polyline contours.
///
/// `resolution_scale` is the device scale factor of the current transform
/// (see `Transform::resolution_scale`); curve subdivision keeps the
/// chord-to-curve deviation below a quarter pixel after that scale.
///
/// Isolated `MoveTo` commands produce no contour.
pub fn flatten(path: &Path, resolution_scale: f32) -> Vec<Contour> {
    let scale = if resolution_scale.is_finite() && resolution_scale > 0.0 {
        resolution_scale
    } else {
        1.0
    };

    let mut flattener = Flattener {
        tolerance: FLATNESS_TOLERANCE / scale,
        contours: Vec::new(),
        points: Vec::new(),
    };

    for cmd in path.commands() {
        flattener.apply(*cmd);
    }

    flattener.finish()
}

struct Flattener {
    tolerance: f32,
    contours: Vec<Contour>,
    points: Vec<Point>,
}

impl Flattener {
    fn apply(&mut self, cmd: PathCmd) {
        match cmd {
            PathCmd::MoveTo { x, y } => {
                self.flush(false);
                self.begin(Point::from_xy(x, y));
            }
            PathCmd::LineTo { x, y } => {
                let p = Point::from_xy(x, y);
                self.ensure_subpath(p);
                self.push_point(p);
            }
            PathCmd::QuadTo { x1, y1, x, y } => {
                let p1 = Point::from_xy(x1, y1);
                let p = Point::from_xy(x, y);
                self.ensure_subpath(p1);
                let p0 = self.current_point();
                self.flatten_quad(p0, p1, p);
            }
            PathCmd::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let p1 = Point::from_xy(x1, y1);
                let p2 = Point::from_xy(x2, y2);
                let p = Point::from_xy(x, y);
                self.ensure_subpath(p1);
                let p0 = self.current_point();
                self.flatten_cubic(p0, p1, p2, p);
            }
            PathCmd::Arc {
                cx,
                cy,
                radius,
                start_angle,
                end_angle,
                ccw,
            } => {
                self.add_arc(cx, cy, radius, start_angle, end_angle, ccw);
            }
            PathCmd::ArcTo {
                x1,
                y1,
                x2,
                y2,
                radius,
            } => {
                self.add_arc_to(
                    Point::from_xy(x1, y1),
                    Point::from_xy(x2, y2),
                    radius,
                );
            }
            PathCmd::Rect { x, y, w, h } => {
                self.flush(false);
                self.begin(Point::from_xy(x, y));
                self.push_point(Point::from_xy(x + w, y));
                self.push_point(Point::from_xy(x + w, y + h));
                self.push_point(Point::from_xy(x, y + h));
                self.flush(true);
                // A new subpath continues from the rect origin.
                self.begin(Point::from_xy(x, y));
            }
            PathCmd::Close => {
                if let Some(first) = self.points.first().cloned() {
                    self.flush(true);
                    self.begin(first);
                }
            }
        }
    }

    fn finish(mut self) -> Vec<Contour> {
        self.flush(false);
        self.contours
    }

    fn begin(&mut self, p: Point) {
        self.points.push(p);
    }

    /// Commands other than `MoveTo` on an empty path start a subpath at
    /// their first point.
    fn ensure_subpath(&mut self, p: Point) {
        if self.points.is_empty() {
            self.begin(p);
        }
    }

    fn current_point(&self) -> Point {
        *self.points.last().unwrap()
    }

    fn push_point(&mut self, p: Point) {
        // Zero-length segments are skipped by policy.
        if self.points.last() != Some(&p) {
            self.points.push(p);
        }
    }

    fn flush(&mut self, closed: bool) {
        let points = std::mem::take(&mut self.points);
        if points.len() >= 2 {
            self.contours.push(Contour { points, closed });
        }
    }

    fn flatten_quad(&mut self, p0: Point, p1: Point, p2: Point) {
        let tolerance = self.tolerance;
        let mut stack: ArrayVec<[Point; 3], STACK_CAPACITY> = ArrayVec::new();
        stack.push([p0, p1, p2]);

        while let Some([q0, q1, q2]) = stack.pop() {
            if quad_is_flat(q0, q1, q2, tolerance) || stack.len() + 2 > STACK_CAPACITY {
                self.push_point(q2);
            } else {
                let q01 = q0.mid(q1);
                let q12 = q1.mid(q2);
                let mid = q01.mid(q12);
                stack.push([mid, q12, q2]);
                stack.push([q0, q01, mid]);
            }
        }
    }

    fn flatten_cubic(&mut self, p0: Point, p1: Point, p2: Point, p3: Point) {
        let tolerance = self.tolerance;
        let mut stack: ArrayVec<[Point; 4], STACK_CAPACITY> = ArrayVec::new();
        stack.push([p0, p1, p2, p3]);

        while let Some([c0, c1, c2, c3]) = stack.pop() {
            if cubic_is_flat(c0, c1, c2, c3, tolerance) || stack.len() + 2 > STACK_CAPACITY {
                self.push_point(c3);
            } else {
                let c01 = c0.mid(c1);
                let c12 = c1.mid(c2);
                let c23 = c2.mid(c3);
                let c012 = c01.mid(c12);
                let c123 = c12.mid(c23);
                let mid = c012.mid(c123);
                stack.push([mid, c123, c23, c3]);
                stack.push([c0, c01, c012, mid]);
            }
        }
    }

    fn add_arc(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        ccw: bool,
    ) {
        let start = arc_point(cx, cy, radius, start_angle);

        if self.points.is_empty() {
            self.begin(start);
        } else {
            self.push_point(start);
        }

        if radius == 0.0 {
            return;
        }

        let sweep = arc_sweep(start_angle, end_angle, ccw);
        if sweep == 0.0 {
            return;
        }

        self.emit_arc(cx, cy, radius, start_angle, sweep);
    }

    fn emit_arc(&mut self, cx: f32, cy: f32, radius: f32, start_angle: f32, sweep: f32) {
        let segments = arc_segment_count(radius, sweep, self.tolerance);
        for i in 1..=segments {
            let angle = start_angle + sweep * (i as f32 / segments as f32);
            self.push_point(arc_point(cx, cy, radius, angle));
        }
    }

    fn add_arc_to(&mut self, p1: Point, p2: Point, radius: f32) {
        if self.points.is_empty() {
            self.begin(p1);
            return;
        }

        let p0 = self.current_point();

        // Degenerate configurations collapse to a line to the first control
        // point.
        let v1 = match (p0 - p1).normalized() {
            Some(v) => v,
            None => {
                self.push_point(p1);
                return;
            }
        };
        let v2 = match (p2 - p1).normalized() {
            Some(v) => v,
            None => {
                self.push_point(p1);
                return;
            }
        };

        let cross = v1.cross(v2);
        if radius == 0.0 || cross.is_nearly_zero_within_tolerance(1e-9) {
            self.push_point(p1);
            return;
        }

        let dot = v1.dot(v2).clamp(-1.0, 1.0);
        let half_angle = dot.acos().half();
        let tangent_dist = radius / half_angle.tan();

        let t1 = p1 + v1.scaled(tangent_dist);
        let t2 = p1 + v2.scaled(tangent_dist);
        let bisector = match (v1 + v2).normalized() {
            Some(v) => v,
            None => {
                self.push_point(p1);
                return;
            }
        };
        let center = p1 + bisector.scaled(radius / half_angle.sin());

        self.push_point(t1);

        let a0 = (t1.y - center.y).atan2(t1.x - center.x);
        let a1 = (t2.y - center.y).atan2(t2.x - center.x);
        // The tangent arc is always shorter than half a turn.
        let mut sweep = a1 - a0;
        if sweep > std::f32::consts::PI {
            sweep -= SCALAR_TAU;
        } else if sweep < -std::f32::consts::PI {
            sweep += SCALAR_TAU;
        }

        self.emit_arc(center.x, center.y, radius, a0, sweep);
        self.push_point(t2);
    }
}

fn arc_point(cx: f32, cy: f32, radius: f32, angle: f32) -> Point {
    Point::from_xy(cx + radius * angle.cos(), cy + radius * angle.sin())
}

/// The signed sweep of an arc, following the canvas rules: a difference of
/// two pi or more covers the whole circumference, anything else is reduced
/// modulo two pi in the arc's direction.
fn arc_sweep(start_angle: f32, end_angle: f32, ccw: bool) -> f32 {
    let delta = end_angle - start_angle;
    if !ccw {
        if delta >= SCALAR_TAU {
            SCALAR_TAU
        } else {
            delta.rem_euclid(SCALAR_TAU)
        }
    } else if delta <= -SCALAR_TAU {
        -SCALAR_TAU
    } else {
        -((start_angle - end_angle).rem_euclid(SCALAR_TAU))
    }
}

/// Segment count keeping the chord-to-arc deviation within `tolerance`.
fn arc_segment_count(radius: f32, sweep: f32, tolerance: f32) -> usize {
    if radius <= tolerance {
        return 1;
    }

    let max_step = 2.0 * (1.0 - tolerance / radius).clamp(-1.0, 1.0).acos();
    if !(max_step > 0.0) {
        return MAX_ARC_SEGMENTS;
    }

    let count = (sweep.abs() / max_step).ceil() as usize;
    count.clamp(1, MAX_ARC_SEGMENTS)
}

/// The deviation of a quad from its chord is at most |p0 - 2*p1 + p2| / 4.
fn quad_is_flat(p0: Point, p1: Point, p2: Point, tolerance: f32) -> bool {
    let dx = p0.x - 2.0 * p1.x + p2.x;
    let dy = p0.y - 2.0 * p1.y + p2.y;
    dx.sqr() + dy.sqr() <= (4.0 * tolerance).sqr()
}

fn cubic_is_flat(p0: Point, p1: Point, p2: Point, p3: Point, tolerance: f32) -> bool {
    let d1x = p0.x - 2.0 * p1.x + p2.x;
    let d1y = p0.y - 2.0 * p1.y + p2.y;
    let d2x = p1.x - 2.0 * p2.x + p3.x;
    let d2y = p1.y - 2.0 * p2.y + p3.y;
    let err = (d1x.sqr() + d1y.sqr()).max(d2x.sqr() + d2y.sqr());
    err <= (4.0 * tolerance).sqr()
}
