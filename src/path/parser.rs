//! # Path Command Interpreter
//!
//! Walks the token stream and turns each command into primitives. The state
//! lives in a [`PathParser`] created per call: current point, subpath start,
//! the last control points for the smooth commands, and the transform that is
//! applied to every point on its way out.
//!
//! Coordinates are resolved (relative → absolute) in the untransformed space,
//! and only emitted points pass through the transform. Reflections for `S`
//! and `T` therefore happen before the transform as well.
//!
//! Every emitted point is finite. Literals are checked by the lexer; sums of
//! relative offsets, arc geometry and the transform can still overflow, and
//! such an operand group is reported as a malformed number.

use super::lexer::{Lexer, Token};
use super::{PathData, Primitive};
use crate::error::PathError;
use crate::geometry::arc::{ArcOutcome, EllipticalArc};
use crate::geometry::transform::Transform;
use crate::geometry::Point;

/// Parse path data with no transform.
pub fn parse_path(d: &str) -> Result<PathData, PathError> {
    parse_path_with_transform(d, &Transform::identity())
}

/// Parse path data, applying `transform` to every emitted point.
///
/// Parsing is all-or-nothing: on error nothing is returned, not even the
/// primitives before the failure.
pub fn parse_path_with_transform(d: &str, transform: &Transform) -> Result<PathData, PathError> {
    let mut parser = PathParser::new(d, *transform);
    parser.run()?;
    Ok(PathData::from_primitives(parser.out))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Nothing but `M`/`m` is accepted.
    AwaitingFirstMove,
    InSubpath,
    /// Right after `Z`. A new `M` starts the next subpath; a drawing command
    /// reopens one at the old start point.
    Closed,
}

struct PathParser<'a> {
    lexer: Lexer<'a>,
    transform: Transform,
    state: ParseState,
    current: Point,
    subpath_start: Point,
    last_cubic_ctrl: Option<Point>,
    last_quad_ctrl: Option<Point>,
    /// Byte offset of the operand group being interpreted.
    group_start: usize,
    out: Vec<Primitive>,
}

impl<'a> PathParser<'a> {
    fn new(d: &'a str, transform: Transform) -> Self {
        PathParser {
            lexer: Lexer::new(d),
            transform,
            state: ParseState::AwaitingFirstMove,
            current: Point::default(),
            subpath_start: Point::default(),
            last_cubic_ctrl: None,
            last_quad_ctrl: None,
            group_start: 0,
            out: Vec::new(),
        }
    }

    fn run(&mut self) -> Result<(), PathError> {
        loop {
            if self.lexer.at_end() {
                return Ok(());
            }
            let position = self.lexer.position();
            match self.lexer.next_token() {
                None => return Ok(()),
                Some(Ok(Token::Command(command))) => self.command(command)?,
                Some(Ok(Token::Number(_))) => {
                    return Err(PathError::UnexpectedNumber { position })
                }
                Some(Err(e)) => return Err(e),
            }
        }
    }

    /// Handle one command letter and every operand group that follows it.
    fn command(&mut self, command: char) -> Result<(), PathError> {
        let mut kind = command.to_ascii_uppercase();
        let relative = command.is_ascii_lowercase();

        if kind != 'M' {
            match self.state {
                ParseState::AwaitingFirstMove => {
                    return Err(PathError::CommandBeforeMove { command })
                }
                ParseState::Closed if kind == 'Z' => return Ok(()),
                ParseState::Closed => {
                    self.emit(Primitive::MoveTo {
                        to: self.map(self.subpath_start),
                    })?;
                    self.state = ParseState::InSubpath;
                }
                ParseState::InSubpath => {}
            }
        }

        loop {
            self.group_start = self.lexer.skip_separators();
            self.segment(kind, command, relative)?;
            if kind == 'Z' || !self.lexer.at_number() {
                return Ok(());
            }
            // Extra coordinate pairs after a move-to are line-tos.
            if kind == 'M' {
                kind = 'L';
            }
        }
    }

    /// Consume one operand group of `kind` and emit its primitives.
    fn segment(&mut self, kind: char, command: char, relative: bool) -> Result<(), PathError> {
        let prev_cubic = self.last_cubic_ctrl.take();
        let prev_quad = self.last_quad_ctrl.take();

        match kind {
            'M' => {
                let to = self.point(command, relative)?;
                self.emit(Primitive::MoveTo { to: self.map(to) })?;
                self.current = to;
                self.subpath_start = to;
                self.state = ParseState::InSubpath;
            }
            'L' => {
                let to = self.point(command, relative)?;
                self.line_to(to)?;
            }
            'H' => {
                let x = self.operand(command)?;
                let x = if relative { self.current.x + x } else { x };
                self.line_to(Point::new(x, self.current.y))?;
            }
            'V' => {
                let y = self.operand(command)?;
                let y = if relative { self.current.y + y } else { y };
                self.line_to(Point::new(self.current.x, y))?;
            }
            'C' => {
                let ctrl1 = self.point(command, relative)?;
                let ctrl2 = self.point(command, relative)?;
                let to = self.point(command, relative)?;
                self.cubic_to(ctrl1, ctrl2, to)?;
            }
            'S' => {
                let ctrl1 = prev_cubic
                    .map(|c| c.reflect_through(self.current))
                    .unwrap_or(self.current);
                let ctrl2 = self.point(command, relative)?;
                let to = self.point(command, relative)?;
                self.cubic_to(ctrl1, ctrl2, to)?;
            }
            'Q' => {
                let ctrl = self.point(command, relative)?;
                let to = self.point(command, relative)?;
                self.quad_to(ctrl, to)?;
            }
            'T' => {
                let ctrl = prev_quad
                    .map(|c| c.reflect_through(self.current))
                    .unwrap_or(self.current);
                let to = self.point(command, relative)?;
                self.quad_to(ctrl, to)?;
            }
            'A' => {
                let rx = self.operand(command)?;
                let ry = self.operand(command)?;
                let x_axis_rotation = self.operand(command)?;
                let large_arc = self.lexer.flag(command)?;
                let sweep = self.lexer.flag(command)?;
                let to = self.point(command, relative)?;
                self.arc_to(EllipticalArc {
                    from: self.current,
                    radii: (rx, ry),
                    x_axis_rotation,
                    large_arc,
                    sweep,
                    to,
                })?;
            }
            'Z' => {
                self.emit(Primitive::ClosePath)?;
                self.current = self.subpath_start;
                self.state = ParseState::Closed;
            }
            _ => {
                return Err(PathError::UnknownCommand {
                    found: command,
                    position: self.lexer.position(),
                })
            }
        }
        Ok(())
    }

    fn operand(&mut self, command: char) -> Result<f64, PathError> {
        if self.lexer.at_number() {
            self.lexer.number()
        } else {
            Err(PathError::MissingOperand {
                command,
                position: self.lexer.position(),
            })
        }
    }

    /// Read an x/y pair, resolved against the current point when relative.
    fn point(&mut self, command: char, relative: bool) -> Result<Point, PathError> {
        let x = self.operand(command)?;
        let y = self.operand(command)?;
        let p = Point::new(x, y);
        Ok(if relative { self.current + p } else { p })
    }

    fn line_to(&mut self, to: Point) -> Result<(), PathError> {
        self.emit(Primitive::LineTo { to: self.map(to) })?;
        self.current = to;
        Ok(())
    }

    fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) -> Result<(), PathError> {
        self.emit(Primitive::CubicCurveTo {
            ctrl1: self.map(ctrl1),
            ctrl2: self.map(ctrl2),
            to: self.map(to),
        })?;
        self.last_cubic_ctrl = Some(ctrl2);
        self.current = to;
        Ok(())
    }

    fn quad_to(&mut self, ctrl: Point, to: Point) -> Result<(), PathError> {
        self.emit(Primitive::QuadCurveTo {
            ctrl: self.map(ctrl),
            to: self.map(to),
        })?;
        self.last_quad_ctrl = Some(ctrl);
        self.current = to;
        Ok(())
    }

    fn arc_to(&mut self, arc: EllipticalArc) -> Result<(), PathError> {
        match arc.to_cubics() {
            ArcOutcome::Omit => {}
            ArcOutcome::LineTo(to) => self.line_to(to)?,
            ArcOutcome::Curves(segments) => {
                for seg in segments {
                    self.emit(Primitive::CubicCurveTo {
                        ctrl1: self.map(seg.ctrl1),
                        ctrl2: self.map(seg.ctrl2),
                        to: self.map(seg.to),
                    })?;
                }
                self.current = arc.to;
            }
        }
        Ok(())
    }

    fn map(&self, p: Point) -> Point {
        self.transform.apply(p)
    }

    fn emit(&mut self, primitive: Primitive) -> Result<(), PathError> {
        if !primitive.is_finite() {
            return Err(PathError::MalformedNumber {
                text: self.lexer.consumed_since(self.group_start).trim().to_string(),
                position: self.group_start,
            });
        }
        self.out.push(primitive);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump(d: &str) -> String {
        parse_path(d).unwrap().to_string()
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_path("").unwrap().is_empty());
        assert!(parse_path(" \n, ").unwrap().is_empty());
    }

    #[test]
    fn test_horizontal_vertical() {
        assert_eq!(
            dump("M 1 2 H 10 v 5 h -3 V 0"),
            "M (1.00, 2.00)\nL (10.00, 2.00)\nL (10.00, 7.00)\nL (7.00, 7.00)\nL (7.00, 0.00)\n"
        );
    }

    #[test]
    fn test_move_to_repeats_as_line_to() {
        assert_eq!(dump("M 0 0 10 10"), dump("M 0 0 L 10 10"));
        assert_eq!(dump("m 5 5 10 0"), "M (5.00, 5.00)\nL (15.00, 5.00)\n");
    }

    #[test]
    fn test_relative_curves_resolve_against_segment_start() {
        assert_eq!(
            dump("M 10 10 c 1 2 3 4 5 6 q 1 1 2 0"),
            "M (10.00, 10.00)\n\
             C (11.00, 12.00, 13.00, 14.00, 15.00, 16.00)\n\
             Q (16.00, 17.00, 17.00, 16.00)\n"
        );
    }

    #[test]
    fn test_smooth_cubic_without_previous_cubic() {
        // No cubic before S: the first control point is the current point.
        assert_eq!(
            dump("M 0 0 L 5 5 S 10 0 10 10"),
            "M (0.00, 0.00)\nL (5.00, 5.00)\nC (5.00, 5.00, 10.00, 0.00, 10.00, 10.00)\n"
        );
    }

    #[test]
    fn test_smooth_quad_reflection_chain() {
        assert_eq!(
            dump("M 0 0 Q 5 10 10 0 T 20 0 t 10 0"),
            "M (0.00, 0.00)\n\
             Q (5.00, 10.00, 10.00, 0.00)\n\
             Q (15.00, -10.00, 20.00, 0.00)\n\
             Q (25.00, 10.00, 30.00, 0.00)\n"
        );
    }

    #[test]
    fn test_smooth_quad_after_cubic_uses_current_point() {
        assert_eq!(
            dump("M 0 0 C 0 5 5 5 5 0 T 10 0"),
            "M (0.00, 0.00)\n\
             C (0.00, 5.00, 5.00, 5.00, 5.00, 0.00)\n\
             Q (5.00, 0.00, 10.00, 0.00)\n"
        );
    }

    #[test]
    fn test_close_resets_current_point() {
        assert_eq!(
            dump("M 10 10 l 5 0 z l 0 5"),
            "M (10.00, 10.00)\n\
             L (15.00, 10.00)\n\
             Z\n\
             M (10.00, 10.00)\n\
             L (10.00, 15.00)\n"
        );
    }

    #[test]
    fn test_relative_move_after_close() {
        assert_eq!(
            dump("M 10 10 L 20 10 Z m 1 1 l 1 0"),
            "M (10.00, 10.00)\n\
             L (20.00, 10.00)\n\
             Z\n\
             M (11.00, 11.00)\n\
             L (12.00, 11.00)\n"
        );
    }

    #[test]
    fn test_repeated_close_is_single() {
        assert_eq!(dump("M 0 0 L 1 1 Z Z z"), "M (0.00, 0.00)\nL (1.00, 1.00)\nZ\n");
    }

    #[test]
    fn test_arc_flags_without_separators() {
        assert_eq!(
            dump("M0 0A10 10 0 0110 10"),
            dump("M 0 0 A 10 10 0 0 1 10 10")
        );
    }

    #[test]
    fn test_arc_no_op_keeps_state() {
        assert_eq!(dump("M 5 5 a 3 3 0 0 1 0 0 l 1 0"), "M (5.00, 5.00)\nL (6.00, 5.00)\n");
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_path("L 10 10"),
            Err(PathError::CommandBeforeMove { command: 'L' })
        );
        assert_eq!(
            parse_path("M 10"),
            Err(PathError::MissingOperand {
                command: 'M',
                position: 4
            })
        );
        assert_eq!(
            parse_path("M 0 0 C 1 1 2 2 L 3 3"),
            Err(PathError::MissingOperand {
                command: 'C',
                position: 16
            })
        );
        assert_eq!(
            parse_path("M 0 0 A 5 5 0 2 0 1 1"),
            Err(PathError::DegenerateArcFlag {
                found: '2',
                position: 14
            })
        );
        assert_eq!(
            parse_path("M 0 0 Z 5"),
            Err(PathError::UnexpectedNumber { position: 8 })
        );
        assert_eq!(
            parse_path("10 10"),
            Err(PathError::UnexpectedNumber { position: 0 })
        );
        assert!(matches!(
            parse_path("M 0 0 B 1 1"),
            Err(PathError::UnknownCommand { found: 'B', .. })
        ));
        assert!(matches!(
            parse_path("M 0 0 L 1e 2"),
            Err(PathError::MalformedNumber { .. })
        ));
    }

    #[test]
    fn test_overflowing_coordinates_are_rejected() {
        assert_eq!(
            parse_path("M 1e308 0 l 1e308 0"),
            Err(PathError::MalformedNumber {
                text: "1e308 0".to_string(),
                position: 12
            })
        );
        assert!(matches!(
            parse_path("M 1e308 1 h 1e308"),
            Err(PathError::MalformedNumber { position: 12, .. })
        ));
        assert!(matches!(
            parse_path("M 0 -1e308 v -1e308"),
            Err(PathError::MalformedNumber { position: 13, .. })
        ));
        assert!(matches!(
            parse_path("M 1e308 0 a 5 5 0 0 1 1e308 0"),
            Err(PathError::MalformedNumber { .. })
        ));
    }

    #[test]
    fn test_overflowing_transform_is_rejected() {
        let t = Transform::scale(1e300, 1e300);
        assert_eq!(
            parse_path_with_transform("M 1 1 L 1e10 0", &t),
            Err(PathError::MalformedNumber {
                text: "1e10 0".to_string(),
                position: 8
            })
        );
        assert!(parse_path_with_transform("M 1 1 L 2 2", &t).is_ok());
    }

    #[test]
    fn test_transform_applies_after_relative_resolution() {
        let t = Transform::scale(2.0, 3.0);
        let path = parse_path_with_transform("M 1 1 l 1 1 H 5", &t).unwrap();
        assert_eq!(
            path.to_string(),
            "M (2.00, 3.00)\nL (4.00, 6.00)\nL (10.00, 6.00)\n"
        );
    }
}
