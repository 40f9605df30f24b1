use nom::{combinator::recognize, multi::many1_count};

use super::{error::{Expected, ParseError}, PResult};

/// A set of characters a single step of the parser accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Literal(char),
    Digit,
    Letter,
    Operator(&'static str),
}

pub const TERM_OPERATORS: CharClass = CharClass::Operator("+-");
pub const FACTOR_OPERATORS: CharClass = CharClass::Operator("*/");

impl CharClass {
    pub fn contains(&self, c: char) -> bool {
        match self {
            CharClass::Literal(literal) => c == *literal,
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::Letter => c.is_ascii_lowercase(),
            CharClass::Operator(operators) => operators.contains(c),
        }
    }
}

/// Consumes exactly one character of `class`, or fails without consuming.
pub fn take<'a>(class: CharClass) -> impl Fn(&'a str) -> PResult<'a, char> {
    move |input: &'a str| match input.chars().next() {
        Some(c) if class.contains(c) => Ok((&input[c.len_utf8()..], c)),
        _ => Err(nom::Err::Error(ParseError::expected(
            input,
            Expected::Class(class),
        ))),
    }
}

/// Longest non-empty run of characters of `class`.
pub fn take_one_or_more<'a>(class: CharClass) -> impl FnMut(&'a str) -> PResult<'a, &'a str> {
    recognize(many1_count(take(class)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_single_char() {
        assert_eq!(take(CharClass::Digit)("7x"), Ok(("x", '7')));
        assert_eq!(take(TERM_OPERATORS)("-1"), Ok(("1", '-')));
    }

    #[test]
    fn test_take_does_not_consume_on_mismatch() {
        let err = take(CharClass::Literal('('))("a)").unwrap_err();
        assert_eq!(
            err,
            nom::Err::Error(ParseError::expected("a)", Expected::Class(CharClass::Literal('('))))
        );
    }

    #[test]
    fn test_take_one_or_more_is_greedy() {
        assert_eq!(take_one_or_more(CharClass::Digit)("1234+5"), Ok(("+5", "1234")));
        assert_eq!(take_one_or_more(CharClass::Letter)("abc1"), Ok(("1", "abc")));
    }

    #[test]
    fn test_take_one_or_more_needs_one_match() {
        let err = take_one_or_more(CharClass::Letter)("Abc").unwrap_err();
        assert_eq!(
            err,
            nom::Err::Error(ParseError::expected("Abc", Expected::Class(CharClass::Letter)))
        );
    }
}
