//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use retint_core::config::CliOverrides;
use retint_core::report::ReportFormat;
use retint_core::rules::Preset;

/// Migrate CSS variable usage and Tailwind classes to theme-aware classes.
///
/// A directory literally named `analyze` must be passed as `./analyze`.
#[derive(Debug, Parser)]
#[command(
    name = "retint",
    version,
    about,
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inventory custom properties without rewriting anything.
    Analyze(AnalyzeArgs),
}

/// Options shared by the codemod run and `analyze`.
#[derive(Debug, Args, Clone, Default)]
pub struct CommonArgs {
    /// Config file (default: retint.toml in the directory).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the report to this file. Format follows the extension unless
    /// --format is given.
    #[arg(long, value_name = "PATH")]
    pub report: Option<String>,

    /// Report format: console, markdown, html or json.
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<ReportFormat>,

    /// File extension to scan (repeatable). Replaces the default list.
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Extra gitignore-style pattern to skip (repeatable).
    #[arg(long = "ignore", value_name = "PATTERN")]
    pub ignore: Vec<String>,

    /// Only warnings and errors on stderr; no report on stdout.
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable ANSI colors in console output.
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Args, Clone, Default)]
pub struct RunArgs {
    /// Root of the source tree to migrate.
    #[arg(value_name = "DIRECTORY", required = true)]
    pub directory: Option<PathBuf>,

    /// Report what would change without writing any file.
    #[arg(long)]
    pub dry_run: bool,

    /// Do not write backups before modifying files.
    #[arg(long)]
    pub no_backup: bool,

    /// Rule preset: classes, variables or direct-colors.
    #[arg(long, value_name = "MODE")]
    pub mode: Option<Preset>,

    /// Insert a review marker after tokens that have no mapping.
    #[arg(long)]
    pub annotate_unmapped: bool,

    /// Name backups `<file>.<timestamp>.bak` instead of `<file>.backup`.
    #[arg(long)]
    pub timestamped_backups: bool,

    /// Worker threads (0 = one per core).
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Print the resolved configuration as TOML and exit.
    #[arg(long)]
    pub print_config: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args, Clone)]
pub struct AnalyzeArgs {
    /// Root of the source tree to analyze.
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl Cli {
    pub fn quiet(&self) -> bool {
        match &self.command {
            Some(Command::Analyze(args)) => args.common.quiet,
            None => self.run.common.quiet,
        }
    }
}

impl CommonArgs {
    fn apply(&self, overrides: &mut CliOverrides) {
        overrides.extensions = self.extensions.clone();
        overrides.extra_ignore = self.ignore.clone();
        overrides.report_format = self.format;
        overrides.report_path = self.report.clone();
        if self.no_color {
            overrides.color = Some(false);
        }
    }
}

impl RunArgs {
    /// Flags that were actually given; absent flags leave lower layers alone.
    pub fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides {
            mode: self.mode,
            dry_run: self.dry_run.then_some(true),
            backup: self.no_backup.then_some(false),
            timestamped_backups: self.timestamped_backups.then_some(true),
            annotate_unmapped: self.annotate_unmapped.then_some(true),
            threads: self.threads,
            ..CliOverrides::default()
        };
        self.common.apply(&mut overrides);
        overrides
    }
}

impl AnalyzeArgs {
    pub fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides::default();
        self.common.apply(&mut overrides);
        overrides
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "retint",
            "src",
            "--dry-run",
            "--no-backup",
            "--mode",
            "variables",
            "--ext",
            "tsx",
            "--ext",
            "css",
            "--report",
            "out/report.md",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.run.directory, Some(PathBuf::from("src")));

        let overrides = cli.run.overrides();
        assert_eq!(overrides.mode, Some(Preset::Variables));
        assert_eq!(overrides.dry_run, Some(true));
        assert_eq!(overrides.backup, Some(false));
        assert_eq!(overrides.annotate_unmapped, None);
        assert_eq!(overrides.extensions, vec!["tsx", "css"]);
        assert_eq!(overrides.report_path.as_deref(), Some("out/report.md"));
        assert_eq!(overrides.report_format, None);
    }

    #[test]
    fn test_analyze_subcommand() {
        let cli = Cli::try_parse_from(["retint", "analyze", "web", "--format", "json", "-q"]).unwrap();
        match &cli.command {
            Some(Command::Analyze(args)) => {
                assert_eq!(args.directory, PathBuf::from("web"));
                assert_eq!(args.common.format, Some(ReportFormat::Json));
            }
            other => panic!("expected analyze, got {other:?}"),
        }
        assert!(cli.quiet());
    }

    #[test]
    fn test_directory_is_required() {
        assert!(Cli::try_parse_from(["retint", "--dry-run"]).is_err());
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["retint", "src", "--mode", "tailwind"]).is_err());
    }
}
