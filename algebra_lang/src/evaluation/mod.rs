use log::trace;
use num::{BigInt, BigRational};

use crate::parsing::{IntegerLiteral, Node, Sign};
use error::EvalError;
use history::History;
use value::Value;

pub mod error;
pub mod history;
pub mod value;

type EvalResult = Result<Value, EvalError>;

/// The history an expression is evaluated against, plus the chain of entries
/// whose evaluation is currently underway.
pub struct Context<'h> {
    history: &'h History,
    in_progress: Vec<usize>,
}

impl<'h> Context<'h> {
    pub fn new(history: &'h History) -> Self {
        Context {
            history,
            in_progress: Vec::new(),
        }
    }

    /// Evaluates the entry at `index` as if `[index]` had been typed.
    pub fn eval_entry(&mut self, index: usize) -> EvalResult {
        let history = self.history;
        let entry = history.get(index).ok_or_else(|| EvalError::UnknownIndex {
            index: index.to_string(),
            len: history.len(),
        })?;

        if self.in_progress.contains(&index) {
            return Err(EvalError::CyclicReference { index });
        }

        trace!("evaluating history entry [{}] {:?}", index, entry.source);

        self.in_progress.push(index);
        let result = eval_in(self, &entry.ast);
        self.in_progress.pop();

        result
    }
}

fn eval_history_ref(ctx: &mut Context, literal: &IntegerLiteral) -> EvalResult {
    let index = usize::try_from(literal).map_err(|_| EvalError::UnknownIndex {
        index: literal.digits().to_string(),
        len: ctx.history.len(),
    })?;

    ctx.eval_entry(index)
}

fn eval_parenthesized(ctx: &mut Context, inner: &Node) -> EvalResult {
    let value = eval_in(ctx, inner)?;

    if value.is_number() || value.is_bare_symbol() {
        Ok(value)
    } else {
        Ok(Value::symbol(&format!("({})", value)))
    }
}

fn power_of(literal: &IntegerLiteral) -> Result<u32, EvalError> {
    u32::try_from(literal)
        .map_err(|_| EvalError::Unsupported(format!("exponent {} is too large", literal.digits())))
}

fn eval_coefficiented(ctx: &mut Context, coef: Option<&IntegerLiteral>, base: &Node) -> EvalResult {
    let value = eval_in(ctx, base)?;

    Ok(match coef {
        Some(coef) => value.scale(&BigInt::from(coef)),
        None => value,
    })
}

fn eval_combined(
    ctx: &mut Context,
    sign: Option<Sign>,
    primary: &Node,
    exponent: Option<&IntegerLiteral>,
) -> EvalResult {
    let value = match (primary, exponent) {
        // `3a^2` raises only the base
        (Node::Coefficiented { coef, base }, Some(exponent)) => {
            let power = power_of(exponent)?;
            let raised = eval_in(ctx, base)?.pow(power)?;
            match coef {
                Some(coef) => raised.scale(&BigInt::from(coef)),
                None => raised,
            }
        }
        (primary, Some(exponent)) => {
            let power = power_of(exponent)?;
            eval_in(ctx, primary)?.pow(power)?
        }
        (primary, None) => eval_in(ctx, primary)?,
    };

    Ok(match sign {
        Some(Sign::Minus) => value.negate(),
        Some(Sign::Plus) | None => value,
    })
}

fn eval_in(ctx: &mut Context, expr: &Node) -> EvalResult {
    match expr {
        Node::Integer(literal) => Ok(Value::number(BigRational::from_integer(BigInt::from(
            literal,
        )))),
        Node::Name(name) => Ok(Value::symbol(name)),
        Node::Parenthesized(inner) => eval_parenthesized(ctx, inner),
        Node::HistoryRef(literal) => eval_history_ref(ctx, literal),
        Node::Coefficiented { coef, base } => eval_coefficiented(ctx, coef.as_ref(), base),
        Node::Combined {
            sign,
            primary,
            exponent,
        } => eval_combined(ctx, *sign, primary, exponent.as_ref()),
        Node::Binary { left, op, right } => {
            let left = eval_in(ctx, left)?;
            let right = eval_in(ctx, right)?;
            left.apply(*op, &right)
        }
    }
}

/// Reduces a tree to a single monomial. `[n]` is resolved against `history`.
pub fn eval(history: &History, expr: &Node) -> EvalResult {
    eval_in(&mut Context::new(history), expr)
}

#[macro_export]
macro_rules! eval_it {
    ($expr:expr) => {
        $crate::evaluation::eval(
            &$crate::evaluation::history::History::new(),
            &$crate::parse_it!($expr),
        )
        .unwrap()
        .to_string()
    };
    ($expr:expr, $history:expr) => {
        $crate::evaluation::eval($history, &$crate::parse_it!($expr))
            .unwrap()
            .to_string()
    };
}
