//! # Basic Shapes
//!
//! Path geometry for the SVG basic shapes: `line`, `polyline`, `polygon`,
//! `rect`, `circle` and `ellipse`. Each builder returns the same primitives a
//! renderer would get from the equivalent path data, with rounded corners and
//! ellipses built from the arc converter's quarter-turn cubics.
//!
//! A shape with a non-positive size is not rendered and yields an empty path,
//! as does one whose corners cannot be represented with finite coordinates.

use std::f64::consts::{FRAC_PI_2, PI};

use super::lexer::{is_separator, scan_number};
use super::{PathData, Primitive};
use crate::error::PathError;
use crate::geometry::arc::CenterArc;
use crate::geometry::Point;

/// A single straight segment.
pub fn line(from: Point, to: Point) -> PathData {
    finish(vec![Primitive::MoveTo { to: from }, Primitive::LineTo { to }])
}

/// An open polyline through the points of an SVG `points` attribute.
pub fn polyline(points: &str) -> Result<PathData, PathError> {
    Ok(through(&parse_points(points)?, false))
}

/// A closed polygon through the points of an SVG `points` attribute.
pub fn polygon(points: &str) -> Result<PathData, PathError> {
    Ok(through(&parse_points(points)?, true))
}

/// Parse an SVG `points` attribute (`"10,20 30,40"`) into points.
///
/// A trailing unpaired coordinate is dropped; a malformed number fails the
/// whole list.
pub fn parse_points(s: &str) -> Result<Vec<Point>, PathError> {
    let bytes = s.as_bytes();
    let mut numbers = Vec::new();
    let mut pos = 0;
    loop {
        while pos < bytes.len() && is_separator(bytes[pos]) {
            pos += 1;
        }
        if pos >= bytes.len() {
            break;
        }
        let (value, end) = scan_number(bytes, pos).map_err(|text| PathError::MalformedNumber {
            text,
            position: pos,
        })?;
        numbers.push(value);
        pos = end;
    }
    Ok(numbers
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect())
}

fn through(points: &[Point], close: bool) -> PathData {
    let Some((&first, rest)) = points.split_first() else {
        return PathData::default();
    };
    let mut out = vec![Primitive::MoveTo { to: first }];
    out.extend(rest.iter().map(|&to| Primitive::LineTo { to }));
    if close {
        out.push(Primitive::ClosePath);
    }
    finish(out)
}

/// A rectangle, optionally with rounded corners.
///
/// When only one corner radius is given the other takes the same value.
/// Negative radii count as not given, and each radius is clamped to half the
/// matching side.
pub fn rect(x: f64, y: f64, width: f64, height: f64, rx: Option<f64>, ry: Option<f64>) -> PathData {
    if !(width > 0.0 && height > 0.0) {
        return PathData::default();
    }
    let rx = rx.filter(|r| *r >= 0.0);
    let ry = ry.filter(|r| *r >= 0.0);
    let (rx, ry) = match (rx, ry) {
        (Some(rx), Some(ry)) => (rx, ry),
        (Some(r), None) | (None, Some(r)) => (r, r),
        (None, None) => (0.0, 0.0),
    };
    let rx = rx.min(width / 2.0);
    let ry = ry.min(height / 2.0);

    let (right, bottom) = (x + width, y + height);
    if rx == 0.0 || ry == 0.0 {
        return finish(vec![
            Primitive::MoveTo { to: Point::new(x, y) },
            Primitive::LineTo { to: Point::new(right, y) },
            Primitive::LineTo { to: Point::new(right, bottom) },
            Primitive::LineTo { to: Point::new(x, bottom) },
            Primitive::ClosePath,
        ]);
    }

    let radii = (rx, ry);
    let mut out = vec![Primitive::MoveTo { to: Point::new(x + rx, y) }];
    out.push(Primitive::LineTo { to: Point::new(right - rx, y) });
    quarter(&mut out, Point::new(right - rx, y + ry), radii, -FRAC_PI_2, Point::new(right, y + ry));
    out.push(Primitive::LineTo { to: Point::new(right, bottom - ry) });
    quarter(&mut out, Point::new(right - rx, bottom - ry), radii, 0.0, Point::new(right - rx, bottom));
    out.push(Primitive::LineTo { to: Point::new(x + rx, bottom) });
    quarter(&mut out, Point::new(x + rx, bottom - ry), radii, FRAC_PI_2, Point::new(x, bottom - ry));
    out.push(Primitive::LineTo { to: Point::new(x, y + ry) });
    quarter(&mut out, Point::new(x + rx, y + ry), radii, PI, Point::new(x + rx, y));
    out.push(Primitive::ClosePath);
    finish(out)
}

pub fn circle(cx: f64, cy: f64, r: f64) -> PathData {
    ellipse(cx, cy, r, r)
}

/// An axis-aligned ellipse: four quarter-turn cubics starting at the
/// rightmost point and turning towards +y.
pub fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> PathData {
    if !(rx > 0.0 && ry > 0.0) {
        return PathData::default();
    }
    let center = Point::new(cx, cy);
    let start = Point::new(cx + rx, cy);
    let mut out = vec![Primitive::MoveTo { to: start }];
    for (i, end) in [
        Point::new(cx, cy + ry),
        Point::new(cx - rx, cy),
        Point::new(cx, cy - ry),
        start,
    ]
    .into_iter()
    .enumerate()
    {
        quarter(&mut out, center, (rx, ry), FRAC_PI_2 * i as f64, end);
    }
    out.push(Primitive::ClosePath);
    finish(out)
}

/// Append a quarter turn of the ellipse starting at `theta1`, ending exactly
/// on `end`.
fn quarter(out: &mut Vec<Primitive>, center: Point, radii: (f64, f64), theta1: f64, end: Point) {
    let arc = CenterArc {
        center,
        radii,
        phi: 0.0,
        theta1,
        delta_theta: FRAC_PI_2,
    };
    let mut segments = arc.to_cubics();
    if let Some(last) = segments.last_mut() {
        last.to = end;
    }
    out.extend(segments.into_iter().map(|seg| Primitive::CubicCurveTo {
        ctrl1: seg.ctrl1,
        ctrl2: seg.ctrl2,
        to: seg.to,
    }));
}

fn finish(primitives: Vec<Primitive>) -> PathData {
    if primitives.iter().all(Primitive::is_finite) {
        PathData::from_primitives(primitives)
    } else {
        PathData::default()
    }
}
