use num::{BigInt, BigRational, One, Zero};

use super::error::EvalError;
use crate::parsing::BinaryOp;

/// Exponents larger than this are refused instead of computed.
pub const MAX_POWER: u32 = 1024;

/// Upper bound on the size of a coefficient produced by `pow`, in bits of
/// numerator plus denominator.
pub const MAX_COEFFICIENT_BITS: u64 = 1 << 16;

/// A monomial `coefficient * symbol^exponent`.
///
/// An empty symbol means a plain number; its exponent is always 1. A zero
/// coefficient or a zero exponent also makes a plain number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    coefficient: BigRational,
    symbol: String,
    exponent: i64,
}

impl Value {
    pub fn new(coefficient: BigRational, symbol: String, exponent: i64) -> Self {
        if symbol.is_empty() || exponent == 0 || coefficient.is_zero() {
            Value {
                coefficient,
                symbol: String::new(),
                exponent: 1,
            }
        } else {
            Value {
                coefficient,
                symbol,
                exponent,
            }
        }
    }

    pub fn number(coefficient: BigRational) -> Self {
        Value::new(coefficient, String::new(), 1)
    }

    pub fn integer(n: i64) -> Self {
        Value::number(BigRational::from_integer(BigInt::from(n)))
    }

    pub fn symbol(symbol: &str) -> Self {
        Value::new(BigRational::one(), symbol.to_string(), 1)
    }

    pub fn coefficient(&self) -> &BigRational {
        &self.coefficient
    }

    pub fn symbol_name(&self) -> &str {
        &self.symbol
    }

    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    pub fn is_number(&self) -> bool {
        self.symbol.is_empty()
    }

    /// A symbol with neither coefficient nor exponent, e.g. `ab`.
    pub fn is_bare_symbol(&self) -> bool {
        !self.is_number() && self.coefficient.is_one() && self.exponent == 1
    }

    fn with_coefficient(&self, coefficient: BigRational) -> Self {
        Value::new(coefficient, self.symbol.clone(), self.exponent)
    }

    pub fn negate(&self) -> Self {
        self.with_coefficient(-self.coefficient.clone())
    }

    pub fn scale(&self, factor: &BigInt) -> Self {
        self.with_coefficient(&self.coefficient * BigRational::from_integer(factor.clone()))
    }

    pub fn pow(&self, power: u32) -> Result<Self, EvalError> {
        if power > MAX_POWER {
            return Err(EvalError::Unsupported(format!(
                "exponent {} is larger than {}",
                power, MAX_POWER
            )));
        }

        let exponent = self
            .exponent
            .checked_mul(i64::from(power))
            .ok_or(EvalError::ExponentOverflow)?;

        let bits = self.coefficient.numer().bits() + self.coefficient.denom().bits();
        if bits.saturating_mul(u64::from(power)) > MAX_COEFFICIENT_BITS {
            return Err(EvalError::Unsupported(format!(
                "raising `{}` to {} gives a coefficient that is too large",
                self, power
            )));
        }

        Ok(Value::new(
            num::pow(self.coefficient.clone(), power as usize),
            self.symbol.clone(),
            exponent,
        ))
    }

    fn incompatible(&self, op: BinaryOp, other: &Self) -> EvalError {
        EvalError::IncompatibleTerms {
            op,
            left: self.clone(),
            right: other.clone(),
        }
    }

    fn like_terms(&self, op: BinaryOp, other: &Self) -> Result<(), EvalError> {
        if self.symbol == other.symbol && self.exponent == other.exponent {
            Ok(())
        } else {
            Err(self.incompatible(op, other))
        }
    }

    pub fn try_add(&self, other: &Self) -> Result<Self, EvalError> {
        self.like_terms(BinaryOp::Add, other)?;
        Ok(self.with_coefficient(&self.coefficient + &other.coefficient))
    }

    pub fn try_sub(&self, other: &Self) -> Result<Self, EvalError> {
        self.like_terms(BinaryOp::Sub, other)?;
        Ok(self.with_coefficient(&self.coefficient - &other.coefficient))
    }

    /// Both sides must share a symbol; exponents add.
    pub fn try_mul(&self, other: &Self) -> Result<Self, EvalError> {
        if self.symbol != other.symbol {
            return Err(self.incompatible(BinaryOp::Mul, other));
        }

        let exponent = self
            .exponent
            .checked_add(other.exponent)
            .ok_or(EvalError::ExponentOverflow)?;
        Ok(Value::new(
            &self.coefficient * &other.coefficient,
            self.symbol.clone(),
            exponent,
        ))
    }

    /// Exact division of monomials sharing a symbol; exponents subtract.
    pub fn try_div(&self, other: &Self) -> Result<Self, EvalError> {
        if other.coefficient.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        if self.symbol != other.symbol {
            return Err(self.incompatible(BinaryOp::Div, other));
        }

        let exponent = self
            .exponent
            .checked_sub(other.exponent)
            .ok_or(EvalError::ExponentOverflow)?;
        Ok(Value::new(
            &self.coefficient / &other.coefficient,
            self.symbol.clone(),
            exponent,
        ))
    }

    pub fn apply(&self, op: BinaryOp, other: &Self) -> Result<Self, EvalError> {
        match op {
            BinaryOp::Add => self.try_add(other),
            BinaryOp::Sub => self.try_sub(other),
            BinaryOp::Mul => self.try_mul(other),
            BinaryOp::Div => self.try_div(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(numer: i64, denom: i64) -> BigRational {
        BigRational::new(BigInt::from(numer), BigInt::from(denom))
    }

    #[test]
    fn test_number_keeps_unit_exponent() {
        let six = Value::integer(2).try_mul(&Value::integer(3)).unwrap();
        assert!(six.is_number());
        assert_eq!(six.exponent(), 1);
        assert_eq!(six, Value::integer(6));
    }

    #[test]
    fn test_like_terms_add() {
        let a = Value::symbol("a");
        assert_eq!(a.try_add(&a).unwrap(), Value::new(ratio(2, 1), "a".into(), 1));
    }

    #[test]
    fn test_unlike_terms_do_not_add() {
        let a = Value::symbol("a");
        let a2 = a.try_mul(&a).unwrap();
        assert!(matches!(
            a.try_add(&a2),
            Err(EvalError::IncompatibleTerms { op: BinaryOp::Add, .. })
        ));
        assert!(matches!(
            a.try_sub(&Value::integer(1)),
            Err(EvalError::IncompatibleTerms { op: BinaryOp::Sub, .. })
        ));
    }

    #[test]
    fn test_multiplication_adds_exponents() {
        let a = Value::symbol("a");
        let a3 = a.try_mul(&a).unwrap().try_mul(&a).unwrap();
        assert_eq!(a3.exponent(), 3);
        assert_eq!(a3.try_div(&a).unwrap().exponent(), 2);
    }

    #[test]
    fn test_mismatched_symbols_do_not_multiply() {
        let a = Value::symbol("a");
        assert!(matches!(
            Value::integer(4).try_mul(&a),
            Err(EvalError::IncompatibleTerms { op: BinaryOp::Mul, .. })
        ));
        assert!(matches!(
            a.try_mul(&Value::integer(4)),
            Err(EvalError::IncompatibleTerms { op: BinaryOp::Mul, .. })
        ));
        assert!(matches!(
            a.try_mul(&Value::symbol("b")),
            Err(EvalError::IncompatibleTerms { op: BinaryOp::Mul, .. })
        ));
    }

    #[test]
    fn test_division_is_exact() {
        assert_eq!(
            Value::integer(1).try_div(&Value::integer(2)).unwrap(),
            Value::number(ratio(1, 2))
        );
        let x = Value::new(ratio(3, 1), "x".into(), 2);
        assert_eq!(
            x.try_div(&Value::new(ratio(2, 1), "x".into(), 1)).unwrap(),
            Value::new(ratio(3, 2), "x".into(), 1)
        );
    }

    #[test]
    fn test_mismatched_symbols_do_not_divide() {
        assert!(matches!(
            Value::integer(2).try_div(&Value::symbol("x")),
            Err(EvalError::IncompatibleTerms { op: BinaryOp::Div, .. })
        ));
        assert!(matches!(
            Value::symbol("x").try_div(&Value::integer(2)),
            Err(EvalError::IncompatibleTerms { op: BinaryOp::Div, .. })
        ));
    }

    #[test]
    fn test_zero_coefficient_is_a_number() {
        let zero = Value::new(BigRational::zero(), "a".into(), 2);
        assert!(zero.is_number());
        assert_eq!(zero, Value::integer(0));

        let a = Value::symbol("a");
        assert_eq!(a.try_sub(&a).unwrap(), Value::integer(0));
        assert_eq!(
            a.try_sub(&a).unwrap().try_add(&Value::integer(1)).unwrap(),
            Value::integer(1)
        );
    }

    #[test]
    fn test_symbol_divided_by_itself_is_one() {
        let a = Value::symbol("a");
        assert_eq!(a.try_div(&a).unwrap(), Value::integer(1));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            Value::symbol("a").try_div(&Value::integer(0)),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn test_pow() {
        let v = Value::new(ratio(-2, 1), "y".into(), 3);
        assert_eq!(v.pow(2).unwrap(), Value::new(ratio(4, 1), "y".into(), 6));
        assert_eq!(v.pow(0).unwrap(), Value::integer(1));
        assert!(matches!(v.pow(MAX_POWER + 1), Err(EvalError::Unsupported(_))));
    }

    #[test]
    fn test_pow_bounds_coefficient_size() {
        let big = Value::integer(9).pow(MAX_POWER).unwrap();
        assert!(big.pow(2).is_ok());
        assert!(matches!(big.pow(MAX_POWER), Err(EvalError::Unsupported(_))));
        assert!(matches!(big.pow(64), Err(EvalError::Unsupported(_))));
        assert_eq!(Value::integer(0).pow(MAX_POWER).unwrap(), Value::integer(0));
    }

    #[test]
    fn test_exponent_overflow() {
        let huge = Value::new(ratio(1, 1), "a".into(), i64::MAX);
        assert_eq!(huge.try_mul(&Value::symbol("a")), Err(EvalError::ExponentOverflow));
    }
}
