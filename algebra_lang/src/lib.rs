//! Parser and evaluator for single-term algebraic expressions.
//!
//! Every expression reduces to a monomial `coefficient * symbol^exponent`.
//! Results are kept in a [`History`] so later input can refer to them as `[n]`.

mod convert;
mod display;
pub mod error;
pub mod evaluation;
pub mod parsing;

pub use error::CoreError;
pub use evaluation::{error::EvalError, history::{Entry, History}, value::Value};
pub use parsing::{error::ParseError, parse, Node};

/// Renders a value the way the REPL prints it, e.g. `3a^2`, `-b`, `7/2`.
pub fn format_value(value: &Value) -> String {
    value.to_string()
}

/// Renders an error for the user. Parse errors include the nested failures of
/// every alternative that was tried.
pub fn format_error(error: &CoreError) -> String {
    match error {
        CoreError::Parse(e) => format!("{:#}", e),
        CoreError::Eval { index, source } => format!("[{}] {}", index, source),
    }
}
