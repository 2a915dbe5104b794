//! # svgpath
//!
//! A parser for SVG path data: the `d` attribute mini-language.
//!
//! Path text goes in, a flat list of drawing primitives comes out: move-to,
//! line-to, cubic and quadratic curves, close-path. Elliptical arcs (`A`/`a`)
//! are converted to cubic Béziers, one per 90° or less of sweep, so the output
//! can be handed to any renderer that understands those five primitives.
//!
//! ## Architecture
//!
//! ```text
//! path data text
//!       ↓
//!   [path::lexer]    — command letters and numbers
//!       ↓
//!   [path::parser]   — current point, smooth-curve reflection, transform
//!       ↓               (arcs via [geometry::arc])
//!   [PathData]       — ordered primitives
//!       ↓
//!   [path::dump]     — fixed-precision text, for tests and debugging
//! ```
//!
//! The SVG basic shapes (`rect`, `circle`, ...) are available as path geometry
//! through [`path::shapes`].
//!
//! ```
//! let path = svgpath::parse_path("M 0 0 L 10 0 A 5 5 0 0 1 10 10 Z").unwrap();
//! assert_eq!(path.len(), 5);
//! ```

pub mod error;
pub mod geometry;
pub mod path;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{PathError, TransformError};
pub use geometry::transform::Transform;
pub use geometry::Point;
pub use path::dump::dump;
pub use path::parser::{parse_path, parse_path_with_transform};
pub use path::{PathData, Primitive};

/// Parse `d` with a transform given in SVG `transform` attribute syntax.
///
/// Convenience for callers holding both attributes of a `<path>` element.
pub fn parse_path_with_transform_attr(
    d: &str,
    transform: &str,
) -> Result<PathData, Box<dyn std::error::Error + Send + Sync>> {
    let transform = Transform::parse(transform)?;
    Ok(parse_path_with_transform(d, &transform)?)
}
