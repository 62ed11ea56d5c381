//! Command execution: config resolution, the run itself, report output.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use retint_core::analysis::VariableAnalyzer;
use retint_core::config::{CliOverrides, RetintConfig};
use retint_core::pipeline::Codemod;
use retint_core::report::{
    create_reporter, render_analysis, write_report, ReportFormat, RunError,
};
use retint_core::scanner::{ScanOptions, Scanner};

use crate::cli::{AnalyzeArgs, Cli, Command, CommonArgs, RunArgs};

/// Exit status of a completed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Finished, but some files could not be read or written.
    PartialFailure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::PartialFailure => ExitCode::from(2),
        }
    }
}

pub fn execute(cli: Cli) -> Result<Outcome> {
    match cli.command {
        Some(Command::Analyze(args)) => analyze(&args),
        None => run(&cli.run),
    }
}

fn load_config(root: &Path, common: &CommonArgs, overrides: &CliOverrides) -> Result<RetintConfig> {
    RetintConfig::load(root, common.config.as_deref(), Some(overrides))
        .with_context(|| format!("loading configuration for {}", root.display()))
}

fn run(args: &RunArgs) -> Result<Outcome> {
    let root: PathBuf = args
        .directory
        .clone()
        .context("a directory to migrate is required")?;
    let config = load_config(&root, &args.common, &args.overrides())?;

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(Outcome::Success);
    }

    let codemod = Codemod::from_config(&root, &config)
        .with_context(|| format!("preparing rules for {}", root.display()))?;
    let report = codemod
        .run()
        .with_context(|| format!("migrating {}", root.display()))?;

    let format = config.report.effective_format();
    let color = config.report.effective_color() && std::io::stdout().is_terminal();

    match config.report.path.as_deref() {
        Some(path) => {
            let rendered = create_reporter(format, false).generate(&report)?;
            write_report(Path::new(path), &rendered)?;
            tracing::info!(path, format = %format, "report written");
            if !args.common.quiet {
                print!("{}", create_reporter(ReportFormat::Console, color).generate(&report)?);
            }
        }
        None if !args.common.quiet => {
            print!("{}", create_reporter(format, color).generate(&report)?);
        }
        None => {}
    }

    Ok(if report.has_errors() {
        Outcome::PartialFailure
    } else {
        Outcome::Success
    })
}

fn analyze(args: &AnalyzeArgs) -> Result<Outcome> {
    let root = &args.directory;
    let config = load_config(root, &args.common, &args.overrides())?;

    let scanner = Scanner::new(ScanOptions::from_config(root, &config.scan))
        .with_context(|| format!("scanning {}", root.display()))?;
    let scan = scanner.collect();

    let analyzer = VariableAnalyzer::new(&config.analysis, &config.mappings)?;
    let mut result = analyzer.analyze(&root.display().to_string(), &scan.files);
    for err in &scan.errors {
        let path = err.path().map(|p| p.display().to_string()).unwrap_or_default();
        result.errors.push(RunError::new(path, err));
    }

    let format = config.report.effective_format();
    let rendered = render_analysis(&result, format)?;
    match config.report.path.as_deref() {
        Some(path) => {
            write_report(Path::new(path), &rendered)?;
            tracing::info!(path, format = %format, "analysis report written");
            if !args.common.quiet {
                print!("{}", render_analysis(&result, ReportFormat::Console)?);
            }
        }
        None if !args.common.quiet => print!("{rendered}"),
        None => {}
    }

    Ok(if result.errors.is_empty() {
        Outcome::Success
    } else {
        Outcome::PartialFailure
    })
}
