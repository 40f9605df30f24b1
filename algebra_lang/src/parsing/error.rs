use nom::error::{ContextError, ErrorKind};

use super::cursor::CharClass;

/// What a grammar rule was looking for when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Class(CharClass),
    Rule(&'static str),
    EndOfInput,
    /// Failures of sibling alternatives that have not been named yet.
    OneOf,
    Nom(ErrorKind),
}

/// A parse failure together with the failures of every alternative that was
/// tried and abandoned on the way, in the order they were attempted.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub remaining: String,
    pub expected: Expected,
    pub alternatives: Vec<ParseError>,
}

impl ParseError {
    pub fn expected(remaining: &str, expected: Expected) -> Self {
        ParseError {
            remaining: remaining.to_string(),
            expected,
            alternatives: Vec::new(),
        }
    }

    /// Number of characters that were consumed before the failure, given the
    /// input the whole parse started from.
    pub fn offset_in(&self, input: &str) -> usize {
        input.len().saturating_sub(self.remaining.len())
    }
}

impl<'a> nom::error::ParseError<&'a str> for ParseError {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        let expected = match kind {
            ErrorKind::Eof => Expected::EndOfInput,
            kind => Expected::Nom(kind),
        };
        ParseError::expected(input, expected)
    }

    fn append(input: &'a str, kind: ErrorKind, other: Self) -> Self {
        match (kind, other.expected) {
            // `alt` reports the collected branches against the input it started from
            (ErrorKind::Alt, Expected::OneOf) => ParseError {
                remaining: input.to_string(),
                ..other
            },
            _ => other,
        }
    }

    fn from_char(input: &'a str, c: char) -> Self {
        ParseError::expected(input, Expected::Class(CharClass::Literal(c)))
    }

    fn or(self, other: Self) -> Self {
        let remaining = self.remaining.clone();
        let mut alternatives = match self.expected {
            Expected::OneOf => self.alternatives,
            _ => vec![self],
        };
        alternatives.push(other);

        ParseError {
            remaining,
            expected: Expected::OneOf,
            alternatives,
        }
    }
}

impl<'a> ContextError<&'a str> for ParseError {
    fn add_context(input: &'a str, ctx: &'static str, other: Self) -> Self {
        match other.expected {
            Expected::OneOf => ParseError {
                remaining: input.to_string(),
                expected: Expected::Rule(ctx),
                alternatives: other.alternatives,
            },
            _ => ParseError {
                remaining: input.to_string(),
                expected: Expected::Rule(ctx),
                alternatives: vec![other],
            },
        }
    }
}

impl std::error::Error for ParseError {}
