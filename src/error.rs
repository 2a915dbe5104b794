//! Structured error types for path and transform parsing.
//!
//! Parsing is all-or-nothing: the first error aborts the parse and no partial
//! path is returned. Positions are byte offsets into the input text.

use thiserror::Error;

/// Errors produced while parsing SVG path data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// A numeric token could not be read as a finite floating value.
    #[error("malformed number {text:?} at offset {position}")]
    MalformedNumber { text: String, position: usize },

    /// A command needs more operands than remain before the next command
    /// letter or the end of input.
    #[error("command '{command}' is missing an operand at offset {position}")]
    MissingOperand { command: char, position: usize },

    /// A character outside the command set appears where a command is expected.
    #[error("unknown path command '{found}' at offset {position}")]
    UnknownCommand { found: char, position: usize },

    /// A drawing command appears before the first move-to.
    #[error("path data must start with a move-to, found '{command}'")]
    CommandBeforeMove { command: char },

    /// An arc's large-arc or sweep flag is not exactly `0` or `1`.
    #[error("arc flag at offset {position} must be 0 or 1, found '{found}'")]
    DegenerateArcFlag { found: char, position: usize },

    /// A number appears where a command letter is required.
    #[error("number at offset {position} is not preceded by a command")]
    UnexpectedNumber { position: usize },
}

/// Errors produced while parsing an SVG `transform` attribute.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("unknown transform function {name:?}")]
    UnknownFunction { name: String },

    #[error("{name}() takes {expected} arguments, got {found}")]
    ArgumentCount {
        name: String,
        expected: &'static str,
        found: usize,
    },

    #[error("malformed number {text:?} at offset {position}")]
    MalformedNumber { text: String, position: usize },

    #[error("expected '{expected}' at offset {position}")]
    Expected { expected: char, position: usize },
}
