use log::debug;
use nom::{
    branch::alt,
    combinator::{cut, eof, map, map_opt, opt},
    error::context,
    multi::fold_many0,
    sequence::{pair, preceded, terminated, tuple},
    Finish, IResult,
};

use self::{
    cursor::{take, take_one_or_more, CharClass, FACTOR_OPERATORS, TERM_OPERATORS},
    error::ParseError,
};

pub mod cursor;
pub mod error;

pub type PResult<'a, O> = IResult<&'a str, O, ParseError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

/// Non-empty run of ASCII digits, kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerLiteral(String);

impl IntegerLiteral {
    pub fn digits(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Binary {
        left: Box<Node>,
        op: BinaryOp,
        right: Box<Node>,
    },
    Combined {
        sign: Option<Sign>,
        primary: Box<Node>,
        exponent: Option<IntegerLiteral>,
    },
    Integer(IntegerLiteral),
    Name(String),
    Parenthesized(Box<Node>),
    HistoryRef(IntegerLiteral),
    Coefficiented {
        coef: Option<IntegerLiteral>,
        base: Box<Node>,
    },
}

impl Node {
    pub fn binary(left: Node, op: BinaryOp, right: Node) -> Self {
        Node::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// A signed or raised operand; a bare operand stays as it is.
    pub fn combined(sign: Option<Sign>, primary: Node, exponent: Option<IntegerLiteral>) -> Self {
        match (sign, exponent) {
            (None, None) => primary,
            (sign, exponent) => Node::Combined {
                sign,
                primary: Box::new(primary),
                exponent,
            },
        }
    }

    pub fn coefficiented(coef: Option<IntegerLiteral>, base: Node) -> Self {
        match coef {
            None => base,
            coef => Node::Coefficiented {
                coef,
                base: Box::new(base),
            },
        }
    }
}

fn space(input: &str) -> PResult<char> {
    take(CharClass::Literal(' '))(input)
}

fn integer(input: &str) -> PResult<IntegerLiteral> {
    map(take_one_or_more(CharClass::Digit), |digits: &str| {
        IntegerLiteral(digits.to_string())
    })(input)
}

fn name(input: &str) -> PResult<Node> {
    map(take_one_or_more(CharClass::Letter), |letters: &str| {
        Node::Name(letters.to_string())
    })(input)
}

fn num(input: &str) -> PResult<Node> {
    map(integer, Node::Integer)(input)
}

fn parenthesized(input: &str) -> PResult<Node> {
    map(
        preceded(
            take(CharClass::Literal('(')),
            cut(terminated(expression, take(CharClass::Literal(')')))),
        ),
        |inner| Node::Parenthesized(Box::new(inner)),
    )(input)
}

fn history_ref(input: &str) -> PResult<Node> {
    map(
        preceded(
            take(CharClass::Literal('[')),
            cut(terminated(integer, take(CharClass::Literal(']')))),
        ),
        Node::HistoryRef,
    )(input)
}

fn coefficientable(input: &str) -> PResult<Node> {
    context("coefficientable", alt((name, parenthesized, history_ref)))(input)
}

fn coefficiented(input: &str) -> PResult<Node> {
    map(pair(opt(integer), coefficientable), |(coef, base)| {
        Node::coefficiented(coef, base)
    })(input)
}

fn exponentiation(input: &str) -> PResult<IntegerLiteral> {
    preceded(take(CharClass::Literal('^')), integer)(input)
}

fn sign(input: &str) -> PResult<Sign> {
    map_opt(take(TERM_OPERATORS), Sign::from_char)(input)
}

fn combined(input: &str) -> PResult<Node> {
    map(
        tuple((
            opt(sign),
            context("coefficiented or num", alt((coefficiented, num))),
            opt(exponentiation),
        )),
        |(sign, primary, exponent)| Node::combined(sign, primary, exponent),
    )(input)
}

fn operator<'a>(class: CharClass) -> impl FnMut(&'a str) -> PResult<'a, BinaryOp> {
    preceded(opt(space), map_opt(take(class), BinaryOp::from_char))
}

/// `operand (_ op _ operand)*`, folded to the left.
///
/// `fold_many0` rewinds to where a failed iteration started, so a dangling
/// space is never consumed. An operator without an operand is a hard error.
fn chain<'a>(
    input: &'a str,
    class: CharClass,
    operand: fn(&'a str) -> PResult<'a, Node>,
) -> PResult<'a, Node> {
    let (input, first) = operand(input)?;

    fold_many0(
        pair(operator(class), cut(preceded(opt(space), operand))),
        move || first.clone(),
        |left, (op, right)| Node::binary(left, op, right),
    )(input)
}

fn factor(input: &str) -> PResult<Node> {
    chain(input, FACTOR_OPERATORS, combined)
}

fn term(input: &str) -> PResult<Node> {
    chain(input, TERM_OPERATORS, factor)
}

fn expression(input: &str) -> PResult<Node> {
    term(input)
}

/// Parses a whole line; anything left after the expression is an error.
pub fn parse(input: &str) -> Result<Node, ParseError> {
    let input = input.trim();
    let result = terminated(expression, eof)(input)
        .finish()
        .map(|(_, node)| node);

    match &result {
        Ok(node) => debug!("parsed {:?} as {}", input, node),
        Err(e) => debug!("failed to parse {:?}: {}", input, e),
    }

    result
}

#[macro_export]
macro_rules! parse_it {
    ($input:expr) => {
        $crate::parsing::parse($input).unwrap()
    };
}
