//! GovCheck - AI governance assessment reports
//!
//! Reads an answer sheet and renders compliance, risk and action-plan
//! reports.
//!
//! Exit codes:
//!   0 - Success (no threshold exceeded, or no threshold set)
//!   1 - Runtime error (bad config, unreadable or invalid answer sheet, etc.)
//!   2 - --fail-on or --require-complete threshold exceeded (an incomplete
//!       sheet never passes --fail-on)

use anyhow::{Context, Result};
use chrono::Utc;
use govcheck::analysis::{check_threshold, ThresholdCheck};
use govcheck::catalog::Catalog;
use govcheck::cli::{Args, OutputFormat};
use govcheck::config::{Config, CONFIG_FILE};
use govcheck::models::{Priority, ReportKind};
use govcheck::report::{self, RenderOptions};
use govcheck::scoring::{generate_report, generate_reports};
use govcheck::store::{AnswerSheet, AnswerStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Template generation needs no logging
    if args.init_config {
        return handle_init_config();
    }
    if let Some(ref path) = args.init_answers {
        return handle_init_answers(path);
    }

    // Config is read before logging so its verbose flag applies
    let (mut config, config_source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(&args, &config);

    info!("GovCheck v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {}", config_source);
    debug!("Arguments: {:?}", args);

    match run_assessment(args, config) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Assessment failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .govcheck.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE);
        std::process::exit(1);
    }

    std::fs::write(path, Config::default_toml())
        .with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    Ok(())
}

/// Handle --init-answers: write an empty answer sheet.
fn handle_init_answers(path: &Path) -> Result<()> {
    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", path.display());
        std::process::exit(1);
    }

    let template = AnswerSheet::template(&Catalog::standard());
    std::fs::write(path, template)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("✅ Created answer sheet template at {}.", path.display());
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so a report printed to stdout stays clean.
fn init_logging(args: &Args, config: &Config) {
    let level = if !args.quiet && config.general.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the assessment workflow. Returns exit code (0 or 2).
fn run_assessment(args: Args, config: Config) -> Result<i32> {
    let sheet_path = args
        .answers
        .clone()
        .context("No answer sheet given (use --answers)")?;

    info!("Loading answer sheet: {}", sheet_path.display());
    let sheet = AnswerSheet::load(&sheet_path)?;
    let store = AnswerStore::from_sheet(Arc::new(Catalog::standard()), &sheet)
        .with_context(|| format!("Invalid answer sheet: {}", sheet_path.display()))?;

    let progress = store.progress();
    if !progress.is_complete() {
        warn!(
            "Only {}/{} questions answered; reports will be marked incomplete",
            progress.answered, progress.total
        );
    }

    let reports = generate_reports(&store, &config.report.kind.kinds());

    let output = match config.report.format {
        OutputFormat::Json => report::generate_json_report(&reports)?,
        OutputFormat::Markdown => report::generate_markdown_report(
            &reports,
            progress,
            &RenderOptions {
                include_breakdown: config.report.include_breakdown,
                generated_at: Utc::now(),
            },
        ),
    };

    match config.general.output {
        Some(ref output_path) => {
            let output_path = PathBuf::from(output_path);
            report::write_report(&output, &output_path)?;
            println!("📊 Assessment Summary:");
            for report in &reports {
                match report.score_label() {
                    Some(label) => println!("   {}: {}", report.title, label),
                    None => println!(
                        "   {}: {} actions",
                        report.title,
                        report.action_items().len()
                    ),
                }
            }
            println!("\n✅ Report saved to: {}", output_path.display());
        }
        None => print!("{}", output),
    }

    if args.require_complete && !progress.is_complete() {
        eprintln!(
            "\n⛔ Assessment incomplete ({}/{} questions answered). Failing (exit code 2).",
            progress.answered, progress.total
        );
        return Ok(2);
    }

    // Check --fail-on threshold
    if let Some(fail_level) = args.fail_on {
        let threshold: Priority = fail_level.into();
        let plan = reports
            .iter()
            .find(|r| r.kind == ReportKind::ActionPlan)
            .cloned()
            .unwrap_or_else(|| generate_report(&store, ReportKind::ActionPlan));

        match check_threshold(&plan, threshold) {
            ThresholdCheck::Pass => {}
            ThresholdCheck::Exceeded(count) => {
                eprintln!(
                    "\n⛔ {} actions at or above {} priority. Failing (exit code 2).",
                    count, threshold
                );
                return Ok(2);
            }
            ThresholdCheck::Unevaluated => {
                warn!("Cannot evaluate --fail-on {} on an incomplete answer sheet", threshold);
                eprintln!(
                    "\n⛔ Assessment incomplete ({}/{} questions answered); --fail-on cannot pass. Failing (exit code 2).",
                    progress.answered, progress.total
                );
                return Ok(2);
            }
        }
    }

    Ok(0)
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is set up, so it reports where the configuration
/// came from instead of logging.
fn load_config(args: &Args) -> Result<(Config, String)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, format!("loaded from {}", config_path.display())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, format!("loaded from {}", CONFIG_FILE))),
        Ok(None) => Ok((Config::default(), "defaults (no config file found)".to_string())),
        Err(e) => Ok((
            Config::default(),
            format!("defaults (failed to load {}: {:#})", CONFIG_FILE, e),
        )),
    }
}
