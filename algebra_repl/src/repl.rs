use std::fmt;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::Editor;

use algebra_lang::{format_error, parse, CoreError, History};

use crate::display::{colorize_quoted, ColoredEntry, ColoredValue};

#[derive(Debug)]
pub enum REPLError {
    ReadlineError(String),
    ParseError(String),
    EvaluationError(String),
}

impl std::error::Error for REPLError {}

impl fmt::Display for REPLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            REPLError::ReadlineError(s) => write!(f, "{}", s),
            REPLError::ParseError(s) => write!(f, "{} {}", "Parse Error:".red(), s),
            REPLError::EvaluationError(s) => write!(f, "{} {}", "Evaluation Error:".red(), s),
        }
    }
}

fn to_readline_error(e: ReadlineError) -> REPLError {
    match e {
        ReadlineError::Interrupted => REPLError::ReadlineError("CTRL-C".to_string()),
        ReadlineError::Eof => REPLError::ReadlineError("CTRL-D".to_string()),
        err => REPLError::ReadlineError(format!("Error: {:?}", err)),
    }
}

pub fn read(rl: &mut Editor<()>) -> Result<String, REPLError> {
    let prompt = format!("{} ", ">>>".bright_blue().bold());
    let input = rl.readline(&prompt).map_err(to_readline_error)?;

    Ok(input)
}

/// What a line typed at the prompt asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Skip,
    Exit,
    ShowHistory,
    ShowTree(&'a str),
    Evaluate(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();

        match line {
            "" => Command::Skip,
            "exit" => Command::Exit,
            ":history" => Command::ShowHistory,
            _ => {
                if let Some(expr) = word_argument(line, ":ast") {
                    Command::ShowTree(expr)
                } else if let Some(expr) = word_argument(line, "expand").filter(|e| !e.is_empty()) {
                    Command::Evaluate(expr)
                } else {
                    Command::Evaluate(line)
                }
            }
        }
    }
}

/// The text after `word` when `line` starts with it as a whole word.
fn word_argument<'a>(line: &'a str, word: &str) -> Option<&'a str> {
    match line.strip_prefix(word) {
        Some(rest) if rest.is_empty() || rest.starts_with(' ') => Some(rest.trim()),
        _ => None,
    }
}

fn to_repl_error(e: CoreError, verbose: bool) -> REPLError {
    match e {
        CoreError::Parse(e) if verbose => {
            REPLError::ParseError(format!("\n{}", colorize_quoted(&format!("{:#}", e))))
        }
        CoreError::Parse(e) => REPLError::ParseError(colorize_quoted(&e.to_string())),
        e => REPLError::EvaluationError(colorize_quoted(&format_error(&e))),
    }
}

/// Records `input` and renders it as `N: value`.
pub fn evaluate(history: &mut History, input: &str, verbose: bool) -> Result<String, REPLError> {
    history
        .evaluate_and_record(input)
        .map(|(index, value)| {
            format!("{}: {}", index.to_string().dimmed(), ColoredValue::new(value))
        })
        .map_err(|e| to_repl_error(e, verbose))
}

/// Shows how `input` groups without recording it.
pub fn show_tree(input: &str, verbose: bool) -> Result<String, REPLError> {
    parse(input)
        .map(|node| node.to_string())
        .map_err(|e| to_repl_error(CoreError::Parse(e), verbose))
}

/// One line per entry; entries that failed before are evaluated again.
pub fn list_history(history: &mut History) -> Vec<String> {
    (0..history.len())
        .filter_map(|index| {
            let outcome = history.reevaluate(index);
            history.get(index).map(|entry| {
                let entry = ColoredEntry::new(&entry.source, outcome);
                format!("{}: {}", index.to_string().dimmed(), entry)
            })
        })
        .collect()
}
