//! retint: theme migration codemod for CSS variables and Tailwind classes.
//!
//! Exit codes: 0 success, 1 fatal error, 2 finished with per-file errors.

mod cli;
mod run;

use std::process::ExitCode;

use clap::Parser;
use retint_core::tracing::init_tracing_with_default;
use retint_core::tracing::setup::{DEFAULT_FILTER, QUIET_FILTER};

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // Usage errors exit 1; 2 is reserved for partial failures.
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing_with_default(if cli.quiet() { QUIET_FILTER } else { DEFAULT_FILTER });

    match run::execute(cli) {
        Ok(outcome) => outcome.into(),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
