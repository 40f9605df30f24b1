use thiserror::Error;

use super::value::Value;
use crate::parsing::BinaryOp;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("cannot combine `{left}` {op} `{right}`, the terms are not alike")]
    IncompatibleTerms {
        op: BinaryOp,
        left: Value,
        right: Value,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("unknown history index `[{index}]`, there are {len} entries")]
    UnknownIndex { index: String, len: usize },
    #[error("history entry `[{index}]` refers back to itself")]
    CyclicReference { index: usize },
    #[error("unsupported: {0}")]
    Unsupported(String),
    #[error("exponent out of range")]
    ExponentOverflow,
}
