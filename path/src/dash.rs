// Copyright 2026 the swcanvas Authors
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use strict_num::NonZeroPositiveF32;

use crate::Point;

/// Stroke dashing properties.
///
/// Contains an array of alternating "on" and "off" interval lengths and a
/// dash offset.
///
/// # Guarantees
///
/// - The dash array always has an even number of values. An odd input array
///   is stored as its own duplication, `[a, b, c]` => `[a, b, c, a, b, c]`.
/// - All dash array values are finite and >= 0.
/// - The sum of all dash array values is positive and finite.
/// - The offset is finite and normalized into `[0, interval_len)`.
#[derive(Clone, PartialEq, Debug)]
pub struct StrokeDash {
    array: Vec<f32>,
    offset: f32,
    interval_len: NonZeroPositiveF32,
    first_len: f32,
    first_index: usize,
}

impl StrokeDash {
    /// Creates a new stroke dashing object.
    ///
    /// Returns `None` for an empty array, negative or non-finite values, a
    /// non-finite offset, or a zero interval sum; such patterns mean "solid".
    pub fn new(dash_array: Vec<f32>, dash_offset: f32) -> Option<Self> {
        if !dash_offset.is_finite() {
            return None;
        }

        if dash_array.is_empty() {
            return None;
        }

        if dash_array.iter().any(|n| !n.is_finite() || *n < 0.0) {
            return None;
        }

        let mut array = dash_array;
        if array.len() % 2 != 0 {
            let copy = array.clone();
            array.extend_from_slice(&copy);
        }

        let interval_len: f32 = array.iter().sum();
        let interval_len = NonZeroPositiveF32::new(interval_len)?;

        let offset = adjust_dash_offset(dash_offset, interval_len.get());
        debug_assert!(offset >= 0.0);
        debug_assert!(offset < interval_len.get());

        let (first_len, first_index) = find_first_interval(&array, offset);
        debug_assert!(first_len >= 0.0);
        debug_assert!(first_index < array.len());

        Some(StrokeDash {
            array,
            offset,
            interval_len,
            first_len,
            first_index,
        })
    }

    /// Returns the stored dash array, including the odd-input duplication.
    pub fn array(&self) -> &[f32] {
        &self.array
    }

    /// Returns the normalized dash offset.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Splits a polyline into the sub-polylines covered by "on" intervals.
    ///
    /// For a closed contour the walk continues across the closing segment;
    /// the result is always a list of open runs.
    pub fn split(&self, points: &[Point], closed: bool) -> Vec<Vec<Point>> {
        if points.len() < 2 {
            return Vec::new();
        }

        let mut runs = Vec::new();
        let mut index = self.first_index;
        let mut remaining = self.first_len;
        let mut on = index % 2 == 0;
        let mut run: Vec<Point> = Vec::new();
        if on {
            run.push(points[0]);
        }

        let mut flush = |run: &mut Vec<Point>| {
            if run.len() >= 2 {
                runs.push(std::mem::take(run));
            } else {
                run.clear();
            }
        };

        let count = if closed { points.len() } else { points.len() - 1 };
        for i in 0..count {
            let p0 = points[i];
            let p1 = points[(i + 1) % points.len()];
            let seg_len = p0.distance_to(p1);
            if seg_len <= 0.0 {
                continue;
            }

            let mut consumed = 0.0;
            while seg_len - consumed > remaining {
                consumed += remaining;
                let boundary = p0.lerp(p1, consumed / seg_len);
                if on {
                    run.push(boundary);
                    flush(&mut run);
                } else {
                    run.push(boundary);
                }
                on = !on;

                index = (index + 1) % self.array.len();
                remaining = self.array[index];
            }

            remaining -= seg_len - consumed;
            if on {
                run.push(p1);
            }
        }

        flush(&mut run);
        runs
    }
}

/// Normalizes the offset into `[0, interval_len)`.
fn adjust_dash_offset(mut offset: f32, interval_len: f32) -> f32 {
    if offset < 0.0 {
        offset = -offset;
        if offset > interval_len {
            offset %= interval_len;
        }

        offset = interval_len - offset;

        // Catch the case where the above math found an answer that's just
        // less than interval_len.
        if offset == interval_len {
            offset = 0.0;
        }

        offset
    } else if offset > interval_len {
        offset % interval_len
    } else {
        offset
    }
}

/// Returns the index of the first interval the offset lands in and the
/// length remaining in it.
fn find_first_interval(dash_array: &[f32], mut dash_offset: f32) -> (f32, usize) {
    for (i, gap) in dash_array.iter().cloned().enumerate() {
        if dash_offset > gap || (dash_offset == gap && gap != 0.0) {
            dash_offset -= gap;
        } else {
            return (gap - dash_offset, i);
        }
    }

    // unreachable, in theory
    (0.0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation() {
        assert_eq!(StrokeDash::new(vec![], 0.0), None);
        assert_eq!(StrokeDash::new(vec![1.0, -2.0], 0.0), None);
        assert_eq!(StrokeDash::new(vec![0.0, 0.0], 0.0), None);
        assert_eq!(StrokeDash::new(vec![f32::NAN, 2.0], 0.0), None);
        assert_eq!(StrokeDash::new(vec![1.0, 2.0], f32::INFINITY), None);
        assert!(StrokeDash::new(vec![1.0, 2.0], 0.0).is_some());
    }

    #[test]
    fn odd_array_is_duplicated() {
        let dash = StrokeDash::new(vec![1.0, 2.0, 3.0], 0.0).unwrap();
        assert_eq!(dash.array(), &[1.0, 2.0, 3.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn offset_normalization() {
        let dash = StrokeDash::new(vec![20.0, 10.0], 40.0).unwrap();
        assert_eq!(dash.offset(), 10.0);

        let dash = StrokeDash::new(vec![20.0, 10.0], -10.0).unwrap();
        assert_eq!(dash.offset(), 20.0);
    }

    #[test]
    fn split_simple() {
        let dash = StrokeDash::new(vec![20.0, 10.0], 0.0).unwrap();
        let line = [Point::from_xy(20.0, 100.0), Point::from_xy(180.0, 100.0)];
        let runs = dash.split(&line, false);

        // 160px long line: on [0, 20), [30, 50), [60, 80) ...
        assert_eq!(runs.len(), 6);
        assert_eq!(runs[0][0], Point::from_xy(20.0, 100.0));
        assert_eq!(runs[0][1], Point::from_xy(40.0, 100.0));
        assert_eq!(runs[1][0], Point::from_xy(50.0, 100.0));
        assert_eq!(runs[1][1], Point::from_xy(70.0, 100.0));
    }

    #[test]
    fn split_with_offset() {
        let dash = StrokeDash::new(vec![20.0, 10.0], 10.0).unwrap();
        let line = [Point::from_xy(0.0, 0.0), Point::from_xy(100.0, 0.0)];
        let runs = dash.split(&line, false);

        // Phase starts 10 units into the first "on" interval:
        // on [0, 10), [20, 40), [50, 70), [80, 100).
        assert_eq!(runs[0][1], Point::from_xy(10.0, 0.0));
        assert_eq!(runs[1][0], Point::from_xy(20.0, 0.0));
        assert_eq!(runs[1][1], Point::from_xy(40.0, 0.0));
    }
}
