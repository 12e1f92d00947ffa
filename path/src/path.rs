// Copyright 2026 the swcanvas Authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::{CanvasError, Point, Result};

/// A path command.
///
/// Commands are recorded as issued; all geometric interpretation (arc
/// normalization, tangent-arc construction, rectangle lowering) happens
/// during flattening.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum PathCmd {
    MoveTo {
        x: f32,
        y: f32,
    },
    LineTo {
        x: f32,
        y: f32,
    },
    QuadTo {
        x1: f32,
        y1: f32,
        x: f32,
        y: f32,
    },
    CubicTo {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        x: f32,
        y: f32,
    },
    Arc {
        cx: f32,
        cy: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        ccw: bool,
    },
    ArcTo {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        radius: f32,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
    Close,
}

/// An ordered sequence of path commands.
///
/// A path holds no device state: it can be built once and flattened many
/// times under different transforms.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Path {
    cmds: Vec<PathCmd>,
}

impl Path {
    /// Creates an empty path.
    pub fn new() -> Self {
        Path { cmds: Vec::new() }
    }

    /// Returns the recorded commands.
    pub fn commands(&self) -> &[PathCmd] {
        &self.cmds
    }

    /// Checks that no commands were recorded.
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Removes all commands. Memory is not deallocated.
    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    /// Starts a new subpath at the given point.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.cmds.push(PathCmd::MoveTo { x, y });
    }

    /// Adds a line from the last point.
    pub fn line_to(&mut self, x: f32, y: f32) {
        self.cmds.push(PathCmd::LineTo { x, y });
    }

    /// Adds a quadratic curve from the last point.
    pub fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.cmds.push(PathCmd::QuadTo { x1, y1, x, y });
    }

    /// Adds a cubic curve from the last point.
    pub fn cubic_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.cmds.push(PathCmd::CubicTo {
            x1,
            y1,
            x2,
            y2,
            x,
            y,
        });
    }

    /// Adds a circular arc.
    ///
    /// Angles are in radians and may be arbitrary; sweeps of two pi or more
    /// cover the whole circumference. A negative radius fails with
    /// `IndexSize`, non-finite input with `TypeError`.
    pub fn arc(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        ccw: bool,
    ) -> Result<()> {
        if !(cx.is_finite()
            && cy.is_finite()
            && radius.is_finite()
            && start_angle.is_finite()
            && end_angle.is_finite())
        {
            return Err(CanvasError::TypeError);
        }

        if radius < 0.0 {
            return Err(CanvasError::IndexSize);
        }

        self.cmds.push(PathCmd::Arc {
            cx,
            cy,
            radius,
            start_angle,
            end_angle,
            ccw,
        });
        Ok(())
    }

    /// Adds an arc tangent to the lines from the last point to `(x1, y1)`
    /// and from `(x1, y1)` to `(x2, y2)`.
    ///
    /// A negative radius fails with `IndexSize`, non-finite input with
    /// `TypeError`. Degenerate control points collapse to a line to the
    /// first control point during flattening.
    pub fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) -> Result<()> {
        if !(x1.is_finite() && y1.is_finite() && x2.is_finite() && y2.is_finite() && radius.is_finite())
        {
            return Err(CanvasError::TypeError);
        }

        if radius < 0.0 {
            return Err(CanvasError::IndexSize);
        }

        self.cmds.push(PathCmd::ArcTo {
            x1,
            y1,
            x2,
            y2,
            radius,
        });
        Ok(())
    }

    /// Adds a closed rectangle subpath.
    ///
    /// Lowered to move/line/line/line/close during flattening; afterwards a
    /// new subpath starts at `(x, y)`.
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.cmds.push(PathCmd::Rect { x, y, w, h });
    }

    /// Closes the current subpath.
    pub fn close(&mut self) {
        self.cmds.push(PathCmd::Close);
    }

    /// Returns the end point of the last recorded command, if it has one.
    pub fn last_point(&self) -> Option<Point> {
        match *self.cmds.last()? {
            PathCmd::MoveTo { x, y }
            | PathCmd::LineTo { x, y }
            | PathCmd::QuadTo { x, y, .. }
            | PathCmd::CubicTo { x, y, .. }
            | PathCmd::Rect { x, y, .. } => Some(Point::from_xy(x, y)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_to_validation() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        assert_eq!(
            path.arc_to(10.0, 0.0, 10.0, 10.0, -1.0),
            Err(CanvasError::IndexSize)
        );
        assert_eq!(
            path.arc_to(f32::NAN, 0.0, 10.0, 10.0, 5.0),
            Err(CanvasError::TypeError)
        );
        assert_eq!(path.arc_to(10.0, 0.0, 10.0, 10.0, 5.0), Ok(()));
        // Failed commands are not recorded.
        assert_eq!(path.commands().len(), 2);
    }

    #[test]
    fn arc_validation() {
        let mut path = Path::new();
        assert_eq!(
            path.arc(0.0, 0.0, -2.0, 0.0, 1.0, false),
            Err(CanvasError::IndexSize)
        );
        assert_eq!(
            path.arc(0.0, f32::INFINITY, 2.0, 0.0, 1.0, false),
            Err(CanvasError::TypeError)
        );
        assert!(path.is_empty());
    }
}
