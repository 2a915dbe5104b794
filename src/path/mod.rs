//! # Path Data
//!
//! The output model of the parser: an ordered list of drawing primitives.
//! Order matters (it defines subpaths and draw order). Points are already in
//! the final coordinate space; no transform travels with the path.

pub mod dump;
pub mod lexer;
pub mod measure;
pub mod parser;
pub mod shapes;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// A single drawing primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Primitive {
    MoveTo {
        to: Point,
    },
    LineTo {
        to: Point,
    },
    CubicCurveTo {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    QuadCurveTo {
        ctrl: Point,
        to: Point,
    },
    ClosePath,
}

impl Primitive {
    /// The point this primitive ends on, `None` for `ClosePath`.
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            Primitive::MoveTo { to }
            | Primitive::LineTo { to }
            | Primitive::CubicCurveTo { to, .. }
            | Primitive::QuadCurveTo { to, .. } => Some(to),
            Primitive::ClosePath => None,
        }
    }

    /// The points carried by this primitive, control points first.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let (points, count) = match *self {
            Primitive::MoveTo { to } | Primitive::LineTo { to } => ([to; 3], 1),
            Primitive::CubicCurveTo { ctrl1, ctrl2, to } => ([ctrl1, ctrl2, to], 3),
            Primitive::QuadCurveTo { ctrl, to } => ([ctrl, to, to], 2),
            Primitive::ClosePath => ([Point::default(); 3], 0),
        };
        points.into_iter().take(count)
    }

    pub fn is_finite(&self) -> bool {
        self.points().all(Point::is_finite)
    }

    /// Single-letter tag used by the diagnostic dump.
    pub fn tag(&self) -> char {
        match self {
            Primitive::MoveTo { .. } => 'M',
            Primitive::LineTo { .. } => 'L',
            Primitive::CubicCurveTo { .. } => 'C',
            Primitive::QuadCurveTo { .. } => 'Q',
            Primitive::ClosePath => 'Z',
        }
    }
}

/// A finished, immutable sequence of primitives.
///
/// An empty path is valid and means "nothing to draw".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathData {
    primitives: Vec<Primitive>,
}

impl PathData {
    pub(crate) fn from_primitives(primitives: Vec<Primitive>) -> Self {
        PathData { primitives }
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Primitive> {
        self.primitives.iter()
    }

    pub fn as_slice(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn into_primitives(self) -> Vec<Primitive> {
        self.primitives
    }

    /// Number of subpaths, i.e. the number of `MoveTo` primitives.
    pub fn subpath_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::MoveTo { .. }))
            .count()
    }
}

impl<'a> IntoIterator for &'a PathData {
    type Item = &'a Primitive;
    type IntoIter = std::slice::Iter<'a, Primitive>;

    fn into_iter(self) -> Self::IntoIter {
        self.primitives.iter()
    }
}

/// Formats the diagnostic dump with two decimal places.
impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dump::write_dump(f, self, dump::DEFAULT_PRECISION)
    }
}
