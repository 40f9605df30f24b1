use thiserror::Error;

use crate::{evaluation::error::EvalError, parsing::error::ParseError};

/// Failure of [`History::evaluate_and_record`](crate::History::evaluate_and_record).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// The input was rejected; nothing was recorded.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// The input was recorded at `index` but could not be reduced to a value.
    #[error("[{index}] {source}")]
    Eval {
        index: usize,
        #[source]
        source: EvalError,
    },
}

impl CoreError {
    pub fn index(&self) -> Option<usize> {
        match self {
            CoreError::Parse(_) => None,
            CoreError::Eval { index, .. } => Some(*index),
        }
    }
}
