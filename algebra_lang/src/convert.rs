use std::num::ParseIntError;

use num::{BigInt, BigRational, Zero};

use crate::{
    evaluation::value::Value,
    parsing::{BinaryOp, IntegerLiteral, Sign},
};

impl BinaryOp {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(BinaryOp::Add),
            '-' => Some(BinaryOp::Sub),
            '*' => Some(BinaryOp::Mul),
            '/' => Some(BinaryOp::Div),
            _ => None,
        }
    }
}

impl Sign {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Sign::Plus),
            '-' => Some(Sign::Minus),
            _ => None,
        }
    }
}

impl From<BinaryOp> for char {
    fn from(op: BinaryOp) -> Self {
        match op {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
        }
    }
}

impl From<&IntegerLiteral> for BigInt {
    fn from(literal: &IntegerLiteral) -> Self {
        literal
            .digits()
            .bytes()
            .fold(BigInt::zero(), |acc, digit| acc * 10u32 + u32::from(digit - b'0'))
    }
}

impl TryFrom<&IntegerLiteral> for usize {
    type Error = ParseIntError;

    fn try_from(literal: &IntegerLiteral) -> Result<Self, Self::Error> {
        literal.digits().parse()
    }
}

impl TryFrom<&IntegerLiteral> for u32 {
    type Error = ParseIntError;

    fn try_from(literal: &IntegerLiteral) -> Result<Self, Self::Error> {
        literal.digits().parse()
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::integer(n)
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::number(BigRational::from_integer(n))
    }
}

impl From<BigRational> for Value {
    fn from(coefficient: BigRational) -> Self {
        Value::number(coefficient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_it;
    use crate::parsing::Node;

    fn literal(input: &str) -> IntegerLiteral {
        match parse_it!(input) {
            Node::Integer(literal) => literal,
            node => panic!("expected an integer, got {:?}", node),
        }
    }

    #[test]
    fn test_big_literals() {
        let big = literal("123456789012345678901234567890");
        assert_eq!(
            BigInt::from(&big),
            "123456789012345678901234567890".parse::<BigInt>().unwrap()
        );
        assert!(usize::try_from(&big).is_err());
        assert_eq!(u32::try_from(&literal("007")), Ok(7));
    }

    #[test]
    fn test_numbers_into_values() {
        assert_eq!(Value::from(12i64), Value::integer(12));
        assert_eq!(Value::from(BigInt::from(-4)), Value::integer(-4));
        assert!(Value::from(BigRational::new(BigInt::from(1), BigInt::from(3))).is_number());
    }

    #[test]
    fn test_operator_chars() {
        for c in "+-*/".chars() {
            assert_eq!(BinaryOp::from_char(c).map(char::from), Some(c));
        }
        assert_eq!(BinaryOp::from_char('^'), None);
        assert_eq!(Sign::from_char('*'), None);
    }
}
