use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, warn};

use algebra_lang::History;
use repl::{evaluate, list_history, read, show_tree, Command, REPLError};

mod display;
mod repl;

/// Interactive evaluator for single-term algebraic expressions.
///
/// Every result is numbered; type `[n]` to reuse result n.
/// `:history` lists the results so far, `:ast <expr>` shows how an
/// expression groups, `expand <expr>` is the same as typing `<expr>`,
/// `exit` quits.
#[derive(Parser, Debug)]
#[command(name = "algebra", version)]
struct Cli {
    /// File the line editor keeps previously typed lines in
    #[arg(long, env = "ALGEBRA_HISTORY_FILE", default_value = ".algebra_history")]
    history_file: PathBuf,

    /// Print the failure of every alternative when an expression does not parse
    #[arg(long, env = "ALGEBRA_VERBOSE_ERRORS")]
    verbose_errors: bool,

    /// Log filter used when ALGEBRA_LOG is not set
    #[arg(long, env = "ALGEBRA_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env = Env::default().filter_or("ALGEBRA_LOG", cli.log_level.as_str());
    env_logger::Builder::from_env(env).init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let color_mode = if cli.no_color {
        rustyline::ColorMode::Disabled
    } else {
        rustyline::ColorMode::Enabled
    };
    let config = rustyline::Config::builder()
        .auto_add_history(true)
        .color_mode(color_mode)
        .build();

    let mut rl = rustyline::Editor::<()>::with_config(config)
        .context("could not initialize the line editor")?;
    let mut history = History::new();

    if let Err(err) = rl.load_history(&cli.history_file) {
        debug!("no line history loaded from {}: {}", cli.history_file.display(), err);
    }

    loop {
        let input = match read(&mut rl) {
            Ok(input) => input,
            Err(err) => {
                println!("{}", err);
                break;
            }
        };

        let output = match Command::parse(&input) {
            Command::Skip => continue,
            Command::Exit => break,
            Command::ShowHistory => Ok(list_history(&mut history).join("\n")),
            Command::ShowTree(expr) => show_tree(expr, cli.verbose_errors),
            Command::Evaluate(expr) => evaluate(&mut history, expr, cli.verbose_errors),
        };

        match output {
            Ok(text) if text.is_empty() => {}
            Ok(text) => println!("{}", text),
            Err(err @ REPLError::ReadlineError(_)) => {
                println!("{}", err);
                break;
            }
            Err(err) => println!("{}", err),
        }
    }

    if let Err(err) = rl.save_history(&cli.history_file) {
        warn!("could not save line history to {}: {}", cli.history_file.display(), err);
    }

    Ok(())
}
