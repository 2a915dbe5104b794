//! # Path Measurement
//!
//! Length along a path and the position/direction at a given distance.
//! Curves are measured by flattening them into straight pieces no longer than
//! a step (in path units); smaller steps are slower and more accurate.
//!
//! Move-to jumps do not count towards the length. Close-path does: it draws
//! the closing line back to the subpath start.

use super::{PathData, Primitive};
use crate::geometry::Point;

/// Flattening step used by [`total_length`] and [`point_and_vector_at`].
pub const DEFAULT_STEP: f64 = 1.0;

/// Upper bound on pieces per curve, whatever the step.
const MAX_PIECES: usize = 1024;

/// Approximate length of a quadratic Bézier.
pub fn quadratic_length(start: Point, ctrl: Point, end: Point, step: f64) -> f64 {
    polyline_length(&flatten_quadratic(start, ctrl, end, step))
}

/// Approximate length of a cubic Bézier.
pub fn cubic_length(start: Point, ctrl1: Point, ctrl2: Point, end: Point, step: f64) -> f64 {
    polyline_length(&flatten_cubic(start, ctrl1, ctrl2, end, step))
}

/// Total drawn length of `path`.
pub fn total_length(path: &PathData) -> f64 {
    segments(path, DEFAULT_STEP)
        .iter()
        .map(|(a, b)| a.distance_to(*b))
        .sum()
}

/// Walk `distance` along the path and return the point reached together with
/// the unit tangent there.
///
/// Returns `None` for a negative distance, a distance beyond the end, or a
/// path with no drawn length.
pub fn point_and_vector_at(path: &PathData, distance: f64) -> Option<(Point, Point)> {
    if distance < 0.0 {
        return None;
    }
    let mut walked = 0.0;
    let mut last = None;
    for (a, b) in segments(path, DEFAULT_STEP) {
        let len = a.distance_to(b);
        if len == 0.0 {
            continue;
        }
        let direction = (b - a).normalized();
        if walked + len >= distance {
            let t = (distance - walked) / len;
            return Some((a.lerp(b, t), direction));
        }
        walked += len;
        last = Some((b, direction));
    }
    // Accept distances that overshoot only by rounding in the running sum.
    match last {
        Some(end) if distance - walked <= 1e-9 => Some(end),
        _ => None,
    }
}

/// Unit normal of the segment from `start` to `end`, rotated a quarter turn
/// counter-clockwise from its direction (in a y-up frame). A zero-length
/// segment has the zero vector as normal.
pub fn normal(start: Point, end: Point) -> Point {
    let d = (end - start).normalized();
    Point::new(-d.y, d.x)
}

/// Flatten the drawn parts of a path into straight segments.
fn segments(path: &PathData, step: f64) -> Vec<(Point, Point)> {
    let mut out = Vec::new();
    let mut current = Point::default();
    let mut start = Point::default();

    for primitive in path {
        match *primitive {
            Primitive::MoveTo { to } => {
                current = to;
                start = to;
            }
            Primitive::LineTo { to } => {
                out.push((current, to));
                current = to;
            }
            Primitive::QuadCurveTo { ctrl, to } => {
                extend_polyline(&mut out, &flatten_quadratic(current, ctrl, to, step));
                current = to;
            }
            Primitive::CubicCurveTo { ctrl1, ctrl2, to } => {
                extend_polyline(&mut out, &flatten_cubic(current, ctrl1, ctrl2, to, step));
                current = to;
            }
            Primitive::ClosePath => {
                out.push((current, start));
                current = start;
            }
        }
    }
    out
}

fn extend_polyline(out: &mut Vec<(Point, Point)>, points: &[Point]) {
    out.extend(points.windows(2).map(|w| (w[0], w[1])));
}

/// Pieces needed so that each is at most `step` long, judged by the control
/// polygon (which is never shorter than the curve).
fn piece_count(polygon: f64, step: f64) -> usize {
    if step.is_nan() || step <= 0.0 || polygon == 0.0 {
        return 1;
    }
    ((polygon / step).ceil() as usize).clamp(1, MAX_PIECES)
}

fn flatten_quadratic(p0: Point, p1: Point, p2: Point, step: f64) -> Vec<Point> {
    let n = piece_count(p0.distance_to(p1) + p1.distance_to(p2), step);
    (0..=n)
        .map(|i| {
            let t = i as f64 / n as f64;
            let mt = 1.0 - t;
            p0 * (mt * mt) + p1 * (2.0 * mt * t) + p2 * (t * t)
        })
        .collect()
}

fn flatten_cubic(p0: Point, p1: Point, p2: Point, p3: Point, step: f64) -> Vec<Point> {
    let n = piece_count(
        p0.distance_to(p1) + p1.distance_to(p2) + p2.distance_to(p3),
        step,
    );
    (0..=n)
        .map(|i| {
            let t = i as f64 / n as f64;
            let mt = 1.0 - t;
            p0 * (mt * mt * mt)
                + p1 * (3.0 * mt * mt * t)
                + p2 * (3.0 * mt * t * t)
                + p3 * (t * t * t)
        })
        .collect()
}

fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_path;

    #[test]
    fn test_straight_curves_measure_exactly() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((quadratic_length(a, Point::new(5.0, 0.0), b, 1.0) - 10.0).abs() < 1e-9);
        assert!(
            (cubic_length(a, Point::new(2.0, 0.0), Point::new(8.0, 0.0), b, 1.0) - 10.0).abs()
                < 1e-9
        );
    }

    #[test]
    fn test_quarter_circle_length() {
        // Circle arc approximated by a cubic; length should be close to πr/2.
        let path = parse_path("M 100 0 A 100 100 0 0 1 0 100").unwrap();
        let expected = std::f64::consts::FRAC_PI_2 * 100.0;
        assert!((total_length(&path) - expected).abs() < 0.1);
    }

    #[test]
    fn test_total_length_skips_moves_counts_close() {
        let path = parse_path("M 0 0 L 3 0 L 3 4 Z M 100 100 L 101 100").unwrap();
        assert!((total_length(&path) - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_and_vector_at() {
        let path = parse_path("M 0 0 L 10 0 L 10 10").unwrap();
        let (p, v) = point_and_vector_at(&path, 15.0).unwrap();
        assert_eq!(p, Point::new(10.0, 5.0));
        assert_eq!(v, Point::new(0.0, 1.0));

        let (p, _) = point_and_vector_at(&path, 20.0).unwrap();
        assert_eq!(p, Point::new(10.0, 10.0));

        assert!(point_and_vector_at(&path, 20.5).is_none());
        assert!(point_and_vector_at(&path, -1.0).is_none());
        assert!(point_and_vector_at(&PathData::default(), 0.0).is_none());
    }

    #[test]
    fn test_normal() {
        assert_eq!(
            normal(Point::new(0.0, 0.0), Point::new(5.0, 0.0)),
            Point::new(0.0, 1.0)
        );
        assert_eq!(normal(Point::new(1.0, 1.0), Point::new(1.0, 1.0)), Point::new(0.0, 0.0));
    }
}
