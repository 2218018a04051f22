//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::{Priority, ReportKind};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// GovCheck - AI governance assessment reports
///
/// Reads a completed answer sheet and produces compliance, risk and
/// action-plan reports as Markdown or JSON.
///
/// Examples:
///   govcheck --answers answers.toml
///   govcheck --answers answers.toml --kind risk --format json
///   govcheck --answers answers.toml --fail-on high
///   govcheck --init-answers answers.toml
///   govcheck --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Answer sheet (TOML) to assess
    #[arg(
        short,
        long,
        value_name = "FILE",
        required_unless_present_any = ["init_config", "init_answers"]
    )]
    pub answers: Option<PathBuf>,

    /// Which report to generate
    ///
    /// Defaults to the config file setting, or all reports.
    #[arg(short, long, value_name = "KIND")]
    pub kind: Option<ReportSelection>,

    /// Output format (markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Output file path for the report
    ///
    /// Prints to stdout when neither this flag nor the config sets one.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .govcheck.toml in the current directory.
    /// Can also be set via the GOVCHECK_CONFIG env var.
    #[arg(short, long, value_name = "FILE", env = "GOVCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Hide the score breakdown tables
    #[arg(long)]
    pub no_breakdown: bool,

    /// Fail if the action plan has items at or above this priority
    ///
    /// Useful for CI pipelines. Exit code 2 when threshold is exceeded.
    /// Values: high, medium, low
    #[arg(long, value_name = "LEVEL")]
    pub fail_on: Option<FailOnLevel>,

    /// Fail with exit code 2 if any question is unanswered
    #[arg(long)]
    pub require_complete: bool,

    /// Generate a default .govcheck.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Write an empty answer sheet template to FILE
    #[arg(long, value_name = "FILE", conflicts_with = "init_config")]
    pub init_answers: Option<PathBuf>,
}

/// Report selection for --kind and the config file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ReportSelection {
    Compliance,
    Risk,
    ActionPlan,
    /// Every report, in presentation order (default)
    #[default]
    All,
}

impl ReportSelection {
    /// Report kinds covered by this selection.
    pub fn kinds(&self) -> Vec<ReportKind> {
        match self {
            ReportSelection::Compliance => vec![ReportKind::Compliance],
            ReportSelection::Risk => vec![ReportKind::Risk],
            ReportSelection::ActionPlan => vec![ReportKind::ActionPlan],
            ReportSelection::All => ReportKind::ALL.to_vec(),
        }
    }
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

/// Priority level for --fail-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
pub enum FailOnLevel {
    Low,
    Medium,
    High,
}

impl From<FailOnLevel> for Priority {
    fn from(level: FailOnLevel) -> Self {
        match level {
            FailOnLevel::Low => Priority::Low,
            FailOnLevel::Medium => Priority::Medium,
            FailOnLevel::High => Priority::High,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Skip file checks when only generating templates
        if self.init_config || self.init_answers.is_some() {
            return Ok(());
        }

        if let Some(ref answers) = self.answers {
            if !answers.exists() {
                return Err(format!(
                    "Answer sheet does not exist: {}",
                    answers.display()
                ));
            }
            if !answers.is_file() {
                return Err(format!(
                    "Answer sheet is not a file: {}",
                    answers.display()
                ));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            answers: None,
            kind: None,
            format: None,
            output: None,
            config: None,
            verbose: false,
            quiet: false,
            no_breakdown: false,
            fail_on: None,
            require_complete: false,
            init_config: false,
            init_answers: None,
        }
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "govcheck",
            "--answers",
            "answers.toml",
            "--kind",
            "action-plan",
            "--format",
            "json",
            "--fail-on",
            "medium",
        ])
        .unwrap();

        assert_eq!(args.answers, Some(PathBuf::from("answers.toml")));
        assert_eq!(args.kind, Some(ReportSelection::ActionPlan));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.fail_on, Some(FailOnLevel::Medium));
    }

    #[test]
    fn test_answers_required_unless_generating_templates() {
        assert!(Args::try_parse_from(["govcheck"]).is_err());
        assert!(Args::try_parse_from(["govcheck", "--init-config"]).is_ok());
        assert!(Args::try_parse_from(["govcheck", "--init-answers", "a.toml"]).is_ok());
    }

    #[test]
    fn test_validation_missing_answer_sheet() {
        let mut args = make_args();
        args.answers = Some(PathBuf::from("/nonexistent/answers.toml"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_report_selection_kinds() {
        assert_eq!(ReportSelection::All.kinds(), ReportKind::ALL.to_vec());
        assert_eq!(ReportSelection::Risk.kinds(), vec![ReportKind::Risk]);
    }

    #[test]
    fn test_fail_on_maps_to_priority() {
        assert_eq!(Priority::from(FailOnLevel::High), Priority::High);
        assert_eq!(Priority::from(FailOnLevel::Low), Priority::Low);
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
