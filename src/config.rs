//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.govcheck.toml` files.

use crate::cli::{OutputFormat, ReportSelection};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".govcheck.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Output file path; reports go to stdout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Which reports to generate.
    #[serde(default)]
    pub kind: ReportSelection,

    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Include score breakdown tables in Markdown output.
    #[serde(default = "default_true")]
    pub include_breakdown: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            kind: ReportSelection::default(),
            format: OutputFormat::default(),
            include_breakdown: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.govcheck.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when explicitly provided.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(kind) = args.kind {
            self.report.kind = kind;
        }
        if let Some(format) = args.format {
            self.report.format = format;
        }
        if let Some(ref output) = args.output {
            self.general.output = Some(output.display().to_string());
        }

        // Flags always override
        if args.no_breakdown {
            self.report.include_breakdown = false;
        }
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.output, None);
        assert_eq!(config.report.kind, ReportSelection::All);
        assert_eq!(config.report.format, OutputFormat::Markdown);
        assert!(config.report.include_breakdown);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "governance.json"
verbose = true

[report]
kind = "action-plan"
format = "json"
include_breakdown = false
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output.as_deref(), Some("governance.json"));
        assert!(config.general.verbose);
        assert_eq!(config.report.kind, ReportSelection::ActionPlan);
        assert_eq!(config.report.format, OutputFormat::Json);
        assert!(!config.report.include_breakdown);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = toml::from_str("[report]\nkind = \"risk\"\n").unwrap();
        assert_eq!(config.report.kind, ReportSelection::Risk);
        assert_eq!(config.report.format, OutputFormat::Markdown);
        assert!(config.report.include_breakdown);
    }

    #[test]
    fn test_merge_with_args_prefers_explicit_flags() {
        let mut config: Config =
            toml::from_str("[report]\nkind = \"risk\"\nformat = \"json\"\n").unwrap();
        let args = Args::try_parse_from([
            "govcheck",
            "--answers",
            "answers.toml",
            "--kind",
            "compliance",
            "--no-breakdown",
            "-o",
            "out.md",
        ])
        .unwrap();

        config.merge_with_args(&args);
        assert_eq!(config.report.kind, ReportSelection::Compliance);
        assert_eq!(config.report.format, OutputFormat::Json);
        assert!(!config.report.include_breakdown);
        assert_eq!(config.general.output.as_deref(), Some("out.md"));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(dir.path().join(CONFIG_FILE), "[general]\nverbose = true\n").unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert!(config.general.verbose);

        std::fs::write(dir.path().join(CONFIG_FILE), "[general\n").unwrap();
        assert!(Config::load_from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[report]"));
        assert!(toml_str.contains("kind = \"all\""));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.report.format, OutputFormat::Markdown);
    }
}
