use colored::Colorize;
use lazy_static::lazy_static;
use regex::Regex;

use algebra_lang::{format_value, EvalError, Value};

lazy_static! {
    static ref QUOTED: Regex = Regex::new(r"`(?:[^`\\]|\\.)*`").expect("valid quote pattern");
}

/// Highlights every `back-quoted` snippet of a diagnostic, dropping the quotes.
pub fn colorize_quoted(s: &str) -> String {
    QUOTED
        .replace_all(s, |captures: &regex::Captures| {
            let quoted = &captures[0];
            quoted[1..quoted.len() - 1].bright_blue().to_string()
        })
        .into_owned()
}

pub struct ColoredValue {
    value: Value,
}

impl ColoredValue {
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

impl std::fmt::Display for ColoredValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = format_value(&self.value);
        if self.value.is_number() {
            write!(f, "{}", text.bright_green())
        } else {
            write!(f, "{}", text.bright_blue())
        }
    }
}

/// A history line: its source and what it evaluates to now.
pub struct ColoredEntry<'a> {
    source: &'a str,
    outcome: Result<Value, EvalError>,
}

impl<'a> ColoredEntry<'a> {
    pub fn new(source: &'a str, outcome: Result<Value, EvalError>) -> Self {
        Self { source, outcome }
    }
}

impl<'a> std::fmt::Display for ColoredEntry<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.outcome {
            Ok(value) => write!(f, "{} = {}", self.source, ColoredValue::new(value.clone())),
            Err(e) => write!(f, "{} ({})", self.source, e.to_string().red()),
        }
    }
}
