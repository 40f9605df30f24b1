use std::fmt::{Display, Formatter, Result};

use num::{One, Signed};

use crate::{
    evaluation::{history::Entry, value::Value},
    parsing::{
        cursor::CharClass,
        error::{Expected, ParseError},
        BinaryOp, Node, Sign,
    },
};

impl Display for BinaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", char::from(*self))
    }
}

impl Display for Sign {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Sign::Plus => write!(f, "+"),
            Sign::Minus => write!(f, "-"),
        }
    }
}

/// Canonical text of a tree, with every binary operation parenthesized.
impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Node::Binary { left, op, right } => write!(f, "({} {} {})", left, op, right),
            Node::Combined {
                sign,
                primary,
                exponent,
            } => {
                if let Some(sign) = sign {
                    write!(f, "{}", sign)?;
                }
                write!(f, "{}", primary)?;
                if let Some(exponent) = exponent {
                    write!(f, "^{}", exponent.digits())?;
                }
                Ok(())
            }
            Node::Integer(literal) => write!(f, "{}", literal.digits()),
            Node::Name(name) => write!(f, "{}", name),
            Node::Parenthesized(inner) => write!(f, "({})", inner),
            Node::HistoryRef(index) => write!(f, "[{}]", index.digits()),
            Node::Coefficiented { coef, base } => match coef {
                Some(coef) => write!(f, "{}{}", coef.digits(), base),
                None => write!(f, "{}", base),
            },
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let coefficient = self.coefficient();

        if self.is_number() {
            return write!(f, "{}", coefficient);
        }

        if coefficient.is_one() {
            // bare symbol
        } else if (-coefficient).is_one() {
            write!(f, "-")?;
        } else if coefficient.is_integer() {
            write!(f, "{}", coefficient)?;
        } else if coefficient.is_negative() {
            write!(f, "-({})", -coefficient)?;
        } else {
            write!(f, "({})", coefficient)?;
        }

        write!(f, "{}", self.symbol_name())?;

        if self.exponent() != 1 {
            write!(f, "^{}", self.exponent())?;
        }
        Ok(())
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self.value {
            Some(value) => write!(f, "{} = {}", self.source, value),
            None => write!(f, "{}", self.source),
        }
    }
}

impl Display for CharClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            CharClass::Literal(' ') => write!(f, "space"),
            CharClass::Literal(c) => write!(f, "`{}`", c),
            CharClass::Digit => write!(f, "digit"),
            CharClass::Letter => write!(f, "lowercase letter"),
            CharClass::Operator(operators) => {
                let quoted = operators
                    .chars()
                    .map(|c| format!("`{}`", c))
                    .collect::<Vec<_>>();
                write!(f, "one of {}", quoted.join(", "))
            }
        }
    }
}

impl Display for Expected {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Expected::Class(class) => write!(f, "{}", class),
            Expected::Rule(rule) => write!(f, "{}", rule),
            Expected::EndOfInput => write!(f, "end of input"),
            Expected::OneOf => write!(f, "one of the alternatives"),
            Expected::Nom(kind) => write!(f, "{}", kind.description()),
        }
    }
}

impl ParseError {
    fn fmt_tree(&self, f: &mut Formatter<'_>, depth: usize) -> Result {
        write!(
            f,
            "{:indent$}\"{}\" <--- here expected {}",
            "",
            self.remaining,
            self.expected,
            indent = depth * 2
        )?;

        for alternative in &self.alternatives {
            writeln!(f)?;
            alternative.fmt_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

/// One line by default; `{:#}` renders the failure of every alternative tried.
impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if f.alternate() {
            return self.fmt_tree(f, 0);
        }

        if self.remaining.is_empty() {
            write!(f, "expected {} at end of input", self.expected)
        } else {
            write!(f, "expected {} at `{}`", self.expected, self.remaining)
        }
    }
}
