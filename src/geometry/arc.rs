//! # Elliptical Arc Conversion
//!
//! Converts an SVG endpoint-parameterized arc into cubic Bézier segments.
//!
//! The arc is first turned into its center parameterization (see SVG 2,
//! implementation notes B.2.4), then the angular span is split into pieces of
//! at most 90° and each piece is approximated with the usual
//! `k = 4/3 · tan(Δ/4)` control-point distance on the unit circle.

use std::f64::consts::{FRAC_PI_2, PI};

use super::Point;

/// Largest angular span covered by a single cubic segment.
pub const MAX_SEGMENT_SWEEP: f64 = FRAC_PI_2;

/// Slack when counting segments, so a span of exactly n·90° is not split
/// into n + 1 pieces because of rounding in the angle computation.
const SEGMENT_COUNT_EPSILON: f64 = 1e-7;

/// An arc in SVG endpoint form, in absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipticalArc {
    pub from: Point,
    pub radii: (f64, f64),
    /// Rotation of the ellipse's x-axis, in degrees.
    pub x_axis_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
    pub to: Point,
}

/// Center parameterization of an arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterArc {
    pub center: Point,
    /// Radii after out-of-range correction.
    pub radii: (f64, f64),
    /// Rotation of the ellipse's x-axis, in radians.
    pub phi: f64,
    /// Angle of the start point on the unrotated ellipse.
    pub theta1: f64,
    /// Signed angular span; positive when sweeping in the +angle direction.
    pub delta_theta: f64,
}

/// One cubic segment produced from an arc. The start point is implied by the
/// previous segment (or the arc's start).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

/// What an arc command turns into.
#[derive(Debug, Clone, PartialEq)]
pub enum ArcOutcome {
    /// Start and end coincide: nothing is drawn.
    Omit,
    /// A zero radius degrades the arc to a straight line.
    LineTo(Point),
    Curves(Vec<CubicSegment>),
}

impl EllipticalArc {
    /// Compute the center parameterization, or `None` when the arc is
    /// degenerate: coincident endpoints, a radius too small to divide by, or
    /// magnitudes that leave no finite ellipse.
    pub fn center_parameterization(&self) -> Option<CenterArc> {
        let (mut rx, mut ry) = (self.radii.0.abs(), self.radii.1.abs());
        if self.from == self.to || rx * rx < f64::EPSILON || ry * ry < f64::EPSILON {
            return None;
        }

        let phi = self.x_axis_rotation.rem_euclid(360.0).to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();

        // Move the origin to the chord midpoint, align axes with the ellipse
        // and divide by the radii, so the ellipse becomes the unit circle.
        let half = (self.from - self.to) * 0.5;
        let x1 = cos_phi * half.x + sin_phi * half.y;
        let y1 = -sin_phi * half.x + cos_phi * half.y;
        let (mut ux, mut uy) = (x1 / rx, y1 / ry);

        let mut lambda = ux * ux + uy * uy;
        if !lambda.is_finite() || lambda == 0.0 {
            return None;
        }
        // Grow the radii uniformly when they cannot span the chord.
        if lambda > 1.0 {
            let scale = lambda.sqrt();
            rx *= scale;
            ry *= scale;
            ux /= scale;
            uy /= scale;
            lambda = 1.0;
        }

        let mut coef = ((1.0 - lambda) / lambda).max(0.0).sqrt();
        if self.large_arc == self.sweep {
            coef = -coef;
        }
        let cx1 = coef * rx * uy;
        let cy1 = -coef * ry * ux;

        let mid = self.from.lerp(self.to, 0.5);
        let center = Point::new(
            cos_phi * cx1 - sin_phi * cy1 + mid.x,
            sin_phi * cx1 + cos_phi * cy1 + mid.y,
        );
        if !(center.x.is_finite() && center.y.is_finite() && rx.is_finite() && ry.is_finite()) {
            return None;
        }

        let u = Point::new(ux - coef * uy, uy + coef * ux);
        let v = Point::new(-ux - coef * uy, -uy + coef * ux);
        let theta1 = vector_angle(Point::new(1.0, 0.0), u);
        let mut delta_theta = vector_angle(u, v);
        // Nearly coincident endpoints can round the span to zero; a large arc
        // between them is then the whole ellipse.
        let whole = self.large_arc && delta_theta == 0.0;
        if self.sweep && (delta_theta < 0.0 || whole) {
            delta_theta += 2.0 * PI;
        } else if !self.sweep && (delta_theta > 0.0 || whole) {
            delta_theta -= 2.0 * PI;
        }

        Some(CenterArc {
            center,
            radii: (rx, ry),
            phi,
            theta1,
            delta_theta,
        })
    }

    /// Convert the arc to line or cubic segments.
    pub fn to_cubics(&self) -> ArcOutcome {
        if self.from == self.to {
            return ArcOutcome::Omit;
        }
        match self.center_parameterization() {
            Some(arc) => {
                let mut segments = arc.to_cubics();
                // Pin the final endpoint so the path continues from exactly
                // the coordinates that were asked for.
                if let Some(last) = segments.last_mut() {
                    last.to = self.to;
                }
                ArcOutcome::Curves(segments)
            }
            None => ArcOutcome::LineTo(self.to),
        }
    }
}

impl CenterArc {
    /// Number of cubic segments needed to keep each under 90°.
    pub fn segment_count(&self) -> usize {
        let n = (self.delta_theta.abs() / MAX_SEGMENT_SWEEP - SEGMENT_COUNT_EPSILON).ceil();
        n.max(1.0) as usize
    }

    /// Point on the ellipse at parametric angle `theta`.
    pub fn point_at(&self, theta: f64) -> Point {
        let (sin, cos) = theta.sin_cos();
        self.map_unit(Point::new(cos, sin))
    }

    pub fn to_cubics(&self) -> Vec<CubicSegment> {
        let count = self.segment_count();
        let step = self.delta_theta / count as f64;
        let k = 4.0 / 3.0 * (step / 4.0).tan();

        (0..count)
            .map(|i| {
                let a0 = self.theta1 + step * i as f64;
                let a1 = a0 + step;
                let (s0, c0) = a0.sin_cos();
                let (s1, c1) = a1.sin_cos();
                CubicSegment {
                    ctrl1: self.map_unit(Point::new(c0 - k * s0, s0 + k * c0)),
                    ctrl2: self.map_unit(Point::new(c1 + k * s1, s1 - k * c1)),
                    to: self.map_unit(Point::new(c1, s1)),
                }
            })
            .collect()
    }

    /// Map a point on the unit circle onto the rotated, translated ellipse.
    fn map_unit(&self, p: Point) -> Point {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (rx, ry) = self.radii;
        Point::new(
            self.center.x + cos_phi * rx * p.x - sin_phi * ry * p.y,
            self.center.y + sin_phi * rx * p.x + cos_phi * ry * p.y,
        )
    }
}

/// Signed angle from `u` to `v`, in `[-π, π]`.
fn vector_angle(u: Point, v: Point) -> f64 {
    let cross = u.x * v.y - u.y * v.x;
    let dot = u.x * v.x + u.y * v.y;
    cross.atan2(dot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc(
        from: (f64, f64),
        r: (f64, f64),
        rot: f64,
        large: bool,
        sweep: bool,
        to: (f64, f64),
    ) -> EllipticalArc {
        EllipticalArc {
            from: from.into(),
            radii: r,
            x_axis_rotation: rot,
            large_arc: large,
            sweep,
            to: to.into(),
        }
    }

    fn curves(outcome: ArcOutcome) -> Vec<CubicSegment> {
        match outcome {
            ArcOutcome::Curves(c) => c,
            other => panic!("expected curves, got {other:?}"),
        }
    }

    fn close(a: Point, x: f64, y: f64) -> bool {
        (a.x - x).abs() < 1e-6 && (a.y - y).abs() < 1e-6
    }

    #[test]
    fn test_coincident_endpoints_omit() {
        let a = arc((5.0, 5.0), (10.0, 10.0), 0.0, true, true, (5.0, 5.0));
        assert_eq!(a.to_cubics(), ArcOutcome::Omit);
    }

    #[test]
    fn test_zero_radius_is_line() {
        let a = arc((0.0, 0.0), (0.0, 10.0), 0.0, false, true, (10.0, 10.0));
        assert_eq!(a.to_cubics(), ArcOutcome::LineTo(Point::new(10.0, 10.0)));
        let a = arc((0.0, 0.0), (10.0, 0.0), 0.0, false, true, (10.0, 10.0));
        assert_eq!(a.to_cubics(), ArcOutcome::LineTo(Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_tiny_radii_are_lines() {
        for r in [(1e-200, 1e-200), (1e-160, 5.0), (1e-320, 1e-320), (5.0, -1e-9)] {
            let a = arc((0.0, 0.0), r, 0.0, false, true, (10.0, 0.0));
            assert_eq!(a.to_cubics(), ArcOutcome::LineTo(Point::new(10.0, 0.0)), "{r:?}");
        }
    }

    #[test]
    fn test_extreme_magnitudes_stay_finite() {
        let cases = [
            arc((0.0, 0.0), (1e200, 1e200), 0.0, false, true, (10.0, 0.0)),
            arc((0.0, 0.0), (1e300, 1e-3), 45.0, true, false, (10.0, 0.0)),
            arc((0.0, 0.0), (1e-7, 5.0), 0.0, false, true, (1e300, 0.0)),
            arc((-1e300, 0.0), (1.0, 1.0), 0.0, true, true, (1e300, 1e300)),
        ];
        for a in cases {
            let points: Vec<Point> = match a.to_cubics() {
                ArcOutcome::Omit => Vec::new(),
                ArcOutcome::LineTo(to) => vec![to],
                ArcOutcome::Curves(c) => c.iter().flat_map(|s| [s.ctrl1, s.ctrl2, s.to]).collect(),
            };
            assert!(
                points.iter().all(|p| p.x.is_finite() && p.y.is_finite()),
                "{a:?}: {points:?}"
            );
        }
    }

    #[test]
    fn test_nearly_closed_large_arc_is_whole_ellipse() {
        for dx in [1e-4, 1e-7, 1e-12] {
            let a = arc((0.0, 0.0), (10.0, 10.0), 0.0, true, true, (dx, 0.0));
            let c = a.center_parameterization().unwrap();
            assert!(c.delta_theta > 1.99 * PI, "dx={dx}: {}", c.delta_theta);
            assert_eq!(c.segment_count(), 4);

            let a = arc((0.0, 0.0), (10.0, 10.0), 0.0, true, false, (dx, 0.0));
            let c = a.center_parameterization().unwrap();
            assert!(c.delta_theta < -1.99 * PI, "dx={dx}: {}", c.delta_theta);

            // The small arc between the same points stays small.
            let a = arc((0.0, 0.0), (10.0, 10.0), 0.0, false, true, (dx, 0.0));
            let c = a.center_parameterization().unwrap();
            assert!(c.delta_theta.abs() < 1e-3);
            assert_eq!(c.segment_count(), 1);
        }
    }

    #[test]
    fn test_vector_angle_is_signed() {
        let x = Point::new(1.0, 0.0);
        assert!((vector_angle(x, Point::new(0.0, 2.0)) - FRAC_PI_2).abs() < 1e-12);
        assert!((vector_angle(x, Point::new(0.0, -2.0)) + FRAC_PI_2).abs() < 1e-12);
        assert!((vector_angle(x, Point::new(-3.0, 0.0)) - PI).abs() < 1e-12);
        assert_eq!(vector_angle(x, x), 0.0);
    }

    #[test]
    fn test_quarter_circle_single_segment() {
        let a = arc((0.0, 0.0), (10.0, 10.0), 0.0, false, true, (10.0, 10.0));
        let center = a.center_parameterization().unwrap();
        assert!(close(center.center, 0.0, 10.0));
        assert!((center.delta_theta - FRAC_PI_2).abs() < 1e-9);

        let segs = curves(a.to_cubics());
        assert_eq!(segs.len(), 1);
        let k = 4.0 / 3.0 * (FRAC_PI_2 / 4.0).tan() * 10.0;
        assert!(close(segs[0].ctrl1, k, 0.0));
        assert!(close(segs[0].ctrl2, 10.0, 10.0 - k));
        assert_eq!(segs[0].to, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_flag_combinations_pick_span() {
        // Same chord, four arcs: small/large × positive/negative sweep.
        let spans = [
            (false, true, 90.0),
            (true, true, 270.0),
            (false, false, -90.0),
            (true, false, -270.0),
        ];
        for (large, sweep, degrees) in spans {
            let a = arc((0.0, 0.0), (10.0, 10.0), 0.0, large, sweep, (10.0, 10.0));
            let c = a.center_parameterization().unwrap();
            assert!(
                (c.delta_theta.to_degrees() - degrees).abs() < 1e-9,
                "large={large} sweep={sweep}: {}",
                c.delta_theta.to_degrees()
            );
            assert_eq!(c.segment_count(), degrees.abs() as usize / 90);
        }
    }

    #[test]
    fn test_radii_too_small_are_scaled_up() {
        // Chord of length ~37.16 with radius 18: scaled to a half circle.
        let a = arc((41.0, 109.0), (18.0, 18.0), 0.0, true, true, (56.0, 75.0));
        let c = a.center_parameterization().unwrap();
        assert!(close(c.center, 48.5, 92.0));
        assert!((c.radii.0 - 1381.0_f64.sqrt() / 2.0).abs() < 1e-9);
        assert!((c.delta_theta - PI).abs() < 1e-9);
        assert_eq!(c.segment_count(), 2);
    }

    #[test]
    fn test_negative_radii_use_absolute_value() {
        let pos = arc((0.0, 0.0), (10.0, 10.0), 0.0, false, true, (10.0, 10.0));
        let neg = arc((0.0, 0.0), (-10.0, -10.0), 0.0, false, true, (10.0, 10.0));
        assert_eq!(pos.to_cubics(), neg.to_cubics());
    }

    #[test]
    fn test_rotation_out_of_range_wraps() {
        let a = arc((0.0, 0.0), (10.0, 20.0), 30.0, false, false, (10.0, 10.0));
        let b = arc((0.0, 0.0), (10.0, 20.0), 390.0, false, false, (10.0, 10.0));
        let c = arc((0.0, 0.0), (10.0, 20.0), -330.0, false, false, (10.0, 10.0));
        let (a, b, c) = (curves(a.to_cubics()), curves(b.to_cubics()), curves(c.to_cubics()));
        for (x, y) in a.iter().zip(&b).chain(a.iter().zip(&c)) {
            assert!(close(x.ctrl1, y.ctrl1.x, y.ctrl1.y));
            assert!(close(x.ctrl2, y.ctrl2.x, y.ctrl2.y));
        }
    }

    #[test]
    fn test_segments_stay_on_ellipse() {
        let a = arc((0.0, 0.0), (30.0, 15.0), 25.0, true, false, (20.0, -5.0));
        let c = a.center_parameterization().unwrap();
        let segs = c.to_cubics();
        assert_eq!(segs.len(), c.segment_count());
        let step = c.delta_theta / segs.len() as f64;
        for (i, seg) in segs.iter().enumerate() {
            let expected = c.point_at(c.theta1 + step * (i + 1) as f64);
            assert!(close(seg.to, expected.x, expected.y));
        }
        assert!(close(c.point_at(c.theta1), 0.0, 0.0));
    }
}
