//! Diagnostic text form of a path: one primitive per line, fixed precision.
//!
//! ```text
//! M (0.00, 0.00)
//! C (-1.26, 8.86, 3.14, 13.26, 10.00, 10.00)
//! Z
//! ```
//!
//! Meant for tests and debugging only. It is not path data and is not meant
//! to be parsed back.

use std::fmt::{self, Write};

use super::PathData;

pub const DEFAULT_PRECISION: usize = 2;

/// Render `path` with `precision` digits after the decimal point.
pub fn dump(path: &PathData, precision: usize) -> String {
    Dump { path, precision }.to_string()
}

struct Dump<'a> {
    path: &'a PathData,
    precision: usize,
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_dump(f, self.path, self.precision)
    }
}

/// Write the dump of `path` into any formatter or string buffer.
pub fn write_dump<W: Write>(out: &mut W, path: &PathData, precision: usize) -> fmt::Result {
    for primitive in path {
        out.write_char(primitive.tag())?;
        for (i, p) in primitive.points().enumerate() {
            out.write_str(if i == 0 { " (" } else { ", " })?;
            write!(out, "{}, {}", coord(p.x, precision), coord(p.y, precision))?;
        }
        if primitive.points().next().is_some() {
            out.write_char(')')?;
        }
        out.write_char('\n')?;
    }
    Ok(())
}

/// Fixed-precision number with negative zero printed as zero.
fn coord(value: f64, precision: usize) -> String {
    let s = format!("{:.*}", precision, value);
    match s.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => s,
    }
}
