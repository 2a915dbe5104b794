//! # Path Tokenizer
//!
//! Splits path data into command letters and numbers. Whitespace and commas
//! separate tokens and are otherwise ignored. Numbers may run together when
//! the boundary is unambiguous: `10.5.5` is `10.5` then `.5`, and `10-5` is
//! `10` then `-5`.
//!
//! The tokenizer does not know about arc flags. The interpreter reads those
//! with [`Lexer::flag`], which consumes exactly one character, so `A 5 5 0 11 9 9`
//! yields the flags `1` and `1` followed by the number `9`.

use crate::error::PathError;

/// A single token of path data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Command(char),
    Number(f64),
}

/// Lazy tokenizer over path data.
///
/// Iterating yields tokens until the input is exhausted or an error is hit;
/// after an error the iterator is fused. To re-tokenize, construct a new lexer.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Lexer {
            src,
            pos: 0,
            failed: false,
        }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    /// Skip whitespace and commas, returning the new position.
    pub fn skip_separators(&mut self) -> usize {
        let bytes = self.bytes();
        while self.pos < bytes.len() && is_separator(bytes[self.pos]) {
            self.pos += 1;
        }
        self.pos
    }

    /// Source text from `start` up to the current position.
    pub fn consumed_since(&self, start: usize) -> &'a str {
        &self.src[start.min(self.pos)..self.pos]
    }

    /// Skip separators and report whether any input is left.
    pub fn at_end(&mut self) -> bool {
        self.skip_separators();
        self.pos >= self.src.len()
    }

    /// Skip separators and report whether the next token is a number.
    pub fn at_number(&mut self) -> bool {
        self.skip_separators();
        self.bytes().get(self.pos).is_some_and(|&b| starts_number(b))
    }

    /// Read a number. The caller checks [`Lexer::at_number`] first; a
    /// non-number here is reported as a malformed number.
    pub fn number(&mut self) -> Result<f64, PathError> {
        self.skip_separators();
        let start = self.pos;
        let (value, end) = scan_number(self.bytes(), start).map_err(|text| {
            PathError::MalformedNumber {
                text,
                position: start,
            }
        })?;
        self.pos = end;
        Ok(value)
    }

    /// Read a single-character arc flag.
    pub fn flag(&mut self, command: char) -> Result<bool, PathError> {
        self.skip_separators();
        let position = self.pos;
        match self.src[position..].chars().next() {
            Some('0') => {
                self.pos += 1;
                Ok(false)
            }
            Some('1') => {
                self.pos += 1;
                Ok(true)
            }
            Some(c) if c.is_ascii_alphabetic() => {
                Err(PathError::MissingOperand { command, position })
            }
            Some(found) => Err(PathError::DegenerateArcFlag { found, position }),
            None => Err(PathError::MissingOperand { command, position }),
        }
    }

    /// Read the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Result<Token, PathError>> {
        if self.at_end() {
            return None;
        }
        let position = self.pos;
        let c = self.src[position..].chars().next()?;

        if c.is_ascii() && starts_number(c as u8) {
            return Some(self.number().map(Token::Number));
        }
        if is_command(c) {
            self.pos += 1;
            return Some(Ok(Token::Command(c)));
        }
        Some(Err(PathError::UnknownCommand { found: c, position }))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, PathError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let token = self.next_token();
        if matches!(token, Some(Err(_))) {
            self.failed = true;
        }
        token
    }
}

/// True for the path command letters, upper and lower case.
pub fn is_command(c: char) -> bool {
    matches!(
        c.to_ascii_uppercase(),
        'M' | 'L' | 'H' | 'V' | 'C' | 'S' | 'Q' | 'T' | 'A' | 'Z'
    )
}

pub(crate) fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0C' | b',')
}

pub(crate) fn starts_number(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+')
}

/// Scan one number starting at `start`:
/// `sign? (digits ('.' digits?)? | '.' digits) (('e'|'E') sign? digits)?`.
///
/// Returns the value and the offset just past it, or the offending text.
pub(crate) fn scan_number(bytes: &[u8], start: usize) -> Result<(f64, usize), String> {
    let mut pos = start;
    let digits = |pos: &mut usize| {
        let from = *pos;
        while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
            *pos += 1;
        }
        *pos - from
    };

    if matches!(bytes.get(pos), Some(b'+' | b'-')) {
        pos += 1;
    }
    let mut mantissa = digits(&mut pos);
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        mantissa += digits(&mut pos);
    }

    let text = |end: usize| String::from_utf8_lossy(&bytes[start..end]).into_owned();

    if mantissa == 0 {
        // Include the offending character so the message points at something.
        return Err(text((pos + 1).min(bytes.len())));
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        if digits(&mut pos) == 0 {
            return Err(text(pos.min(bytes.len())));
        }
    }

    let literal = text(pos);
    match literal.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok((value, pos)),
        _ => Err(literal),
    }
}
