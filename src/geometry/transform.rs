//! # Affine Transforms
//!
//! A 2×3 affine matrix in the SVG/PDF convention:
//!
//! ```text
//! x' = a·x + c·y + e
//! y' = b·x + d·y + f
//! ```
//!
//! Also parses the SVG `transform` attribute mini-language
//! (`matrix`, `translate`, `scale`, `rotate`, `skewX`, `skewY`) and writes a
//! transform back out in `matrix(...)` form.

use serde::{Deserialize, Serialize};

use super::Point;
use crate::error::TransformError;
use crate::path::lexer::{scan_number, starts_number};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Transform::identity()
    }
}

impl Transform {
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Transform { a, b, c, d, e, f }
    }

    pub const fn identity() -> Self {
        Transform::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub const fn translate(tx: f64, ty: f64) -> Self {
        Transform::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub const fn scale(sx: f64, sy: f64) -> Self {
        Transform::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation by `degrees`; positive angles turn +x towards +y.
    pub fn rotate(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Transform::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Rotation by `degrees` around `(cx, cy)`.
    pub fn rotate_about(degrees: f64, cx: f64, cy: f64) -> Self {
        Transform::translate(-cx, -cy)
            .then(&Transform::rotate(degrees))
            .then(&Transform::translate(cx, cy))
    }

    pub fn skew_x(degrees: f64) -> Self {
        Transform::new(1.0, 0.0, degrees.to_radians().tan(), 1.0, 0.0, 0.0)
    }

    pub fn skew_y(degrees: f64) -> Self {
        Transform::new(1.0, degrees.to_radians().tan(), 0.0, 1.0, 0.0, 0.0)
    }

    /// The transform that applies `self` first and `next` second.
    pub fn then(&self, next: &Transform) -> Transform {
        let (n, s) = (next, self);
        Transform {
            a: n.a * s.a + n.c * s.b,
            b: n.b * s.a + n.d * s.b,
            c: n.a * s.c + n.c * s.d,
            d: n.b * s.c + n.d * s.d,
            e: n.a * s.e + n.c * s.f + n.e,
            f: n.b * s.e + n.d * s.f + n.f,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Transform::identity()
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Parse an SVG `transform` attribute such as
    /// `"translate(10, 20) scale(2) rotate(45 5 5)"`.
    ///
    /// Functions compose left to right: the rightmost one is applied to
    /// coordinates first. An empty string yields the identity.
    pub fn parse(attr: &str) -> Result<Transform, TransformError> {
        let bytes = attr.as_bytes();
        let mut pos = 0;
        let mut result = Transform::identity();

        loop {
            pos = skip_separators(bytes, pos);
            if pos >= bytes.len() {
                break;
            }

            let name_start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
                pos += 1;
            }
            if pos == name_start {
                return Err(TransformError::UnknownFunction {
                    name: attr[name_start..].chars().take(1).collect(),
                });
            }
            let name = &attr[name_start..pos];

            pos = skip_whitespace(bytes, pos);
            if bytes.get(pos) != Some(&b'(') {
                return Err(TransformError::Expected {
                    expected: '(',
                    position: pos,
                });
            }
            pos += 1;

            let mut args = Vec::new();
            loop {
                pos = skip_separators(bytes, pos);
                match bytes.get(pos) {
                    Some(b')') => {
                        pos += 1;
                        break;
                    }
                    Some(&b) if starts_number(b) => {
                        let (value, end) = scan_number(bytes, pos).map_err(|text| {
                            TransformError::MalformedNumber {
                                text,
                                position: pos,
                            }
                        })?;
                        args.push(value);
                        pos = end;
                    }
                    _ => {
                        return Err(TransformError::Expected {
                            expected: ')',
                            position: pos,
                        })
                    }
                }
            }

            let op = function_transform(name, &args)?;
            result = op.then(&result);
        }

        Ok(result)
    }

    /// Serialize as an SVG `matrix(a b c d e f)` function.
    pub fn to_svg(&self) -> String {
        // Adding 0.0 folds negative zero into positive zero.
        format!(
            "matrix({} {} {} {} {} {})",
            self.a + 0.0,
            self.b + 0.0,
            self.c + 0.0,
            self.d + 0.0,
            self.e + 0.0,
            self.f + 0.0
        )
    }
}

fn function_transform(name: &str, args: &[f64]) -> Result<Transform, TransformError> {
    let arity = |expected: &'static str| TransformError::ArgumentCount {
        name: name.to_string(),
        expected,
        found: args.len(),
    };

    match name {
        "matrix" => match *args {
            [a, b, c, d, e, f] => Ok(Transform::new(a, b, c, d, e, f)),
            _ => Err(arity("6")),
        },
        "translate" => match *args {
            [tx] => Ok(Transform::translate(tx, 0.0)),
            [tx, ty] => Ok(Transform::translate(tx, ty)),
            _ => Err(arity("1 or 2")),
        },
        "scale" => match *args {
            [s] => Ok(Transform::scale(s, s)),
            [sx, sy] => Ok(Transform::scale(sx, sy)),
            _ => Err(arity("1 or 2")),
        },
        "rotate" => match *args {
            [angle] => Ok(Transform::rotate(angle)),
            [angle, cx, cy] => Ok(Transform::rotate_about(angle, cx, cy)),
            _ => Err(arity("1 or 3")),
        },
        "skewX" => match *args {
            [angle] => Ok(Transform::skew_x(angle)),
            _ => Err(arity("1")),
        },
        "skewY" => match *args {
            [angle] => Ok(Transform::skew_y(angle)),
            _ => Err(arity("1")),
        },
        _ => Err(TransformError::UnknownFunction {
            name: name.to_string(),
        }),
    }
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

fn skip_separators(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && (bytes[pos].is_ascii_whitespace() || bytes[pos] == b',') {
        pos += 1;
    }
    pos
}
