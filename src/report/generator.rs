//! Markdown and JSON report rendering.
//!
//! This is the presentation boundary: recommendation wording, score
//! breakdowns and action-plan tables are turned into text here.

use crate::analysis::{group_by_owner, PrioritySummary};
use crate::models::{ActionItem, Priority, Recommendation, Report, Score};
use crate::store::Progress;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Controls optional parts of the Markdown output.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Show which scoring rules fired.
    pub include_breakdown: bool,
    /// Timestamp printed in the header.
    pub generated_at: DateTime<Utc>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_breakdown: true,
            generated_at: Utc::now(),
        }
    }
}

/// Generate a complete Markdown document for the given reports.
pub fn generate_markdown_report(
    reports: &[Report],
    progress: Progress,
    options: &RenderOptions,
) -> String {
    let mut output = String::new();

    output.push_str("# AI Governance Assessment\n\n");
    output.push_str(&generate_metadata_section(progress, options));

    for report in reports {
        output.push_str(&generate_report_section(report, options));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(progress: Progress, options: &RenderOptions) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        "- **Generated:** {}\n",
        options.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Questions Answered:** {}/{} ({}%)\n\n",
        progress.answered,
        progress.total,
        progress.percent()
    ));

    section
}

/// Generate the section for a single report.
fn generate_report_section(report: &Report, options: &RenderOptions) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", report.title));
    section.push_str(&report.content);
    section.push_str("\n\n");

    if let Some(label) = report.score_label() {
        section.push_str(&format!("**Score:** {}\n\n", label));
    }

    if options.include_breakdown {
        if let Some(score) = report.score() {
            section.push_str(&generate_breakdown_table(score));
        }
    }

    section.push_str(&generate_recommendations_section(&report.recommendations));

    let items = report.action_items();
    if !items.is_empty() {
        section.push_str(&generate_action_table(items));
        section.push_str(&generate_owner_table(items));
    }

    section
}

/// Generate the score breakdown table.
fn generate_breakdown_table(score: &Score) -> String {
    if score.components.is_empty() {
        return "*No scoring criteria were met.*\n\n".to_string();
    }

    let mut table = String::new();

    table.push_str("| Criterion | Points |\n");
    table.push_str("|:---|:---:|\n");
    for component in &score.components {
        table.push_str(&format!("| {} | +{} |\n", component.rule, component.points));
    }
    table.push_str(&format!("| **Total** | **{}/{}** |\n\n", score.value, score.max));

    table
}

/// Generate the recommendations list.
fn generate_recommendations_section(recommendations: &[Recommendation]) -> String {
    if recommendations.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("### Recommendations\n\n");
    for (i, rec) in recommendations.iter().enumerate() {
        section.push_str(&format!("{}. {}\n", i + 1, rec));
    }
    section.push('\n');

    section
}

/// Generate the action plan table.
fn generate_action_table(items: &[ActionItem]) -> String {
    let summary = PrioritySummary::from_items(items);
    let mut table = String::new();

    table.push_str("### Actions\n\n");
    table.push_str(&format!(
        "{} High: {} | {} Medium: {} | {} Low: {}\n\n",
        Priority::High.emoji(),
        summary.high,
        Priority::Medium.emoji(),
        summary.medium,
        Priority::Low.emoji(),
        summary.low
    ));
    table.push_str("| # | Action | Priority | Owner | Deadline |\n");
    table.push_str("|:---:|:---|:---:|:---|:---:|\n");
    for item in items {
        table.push_str(&format!(
            "| {} | {} | {} {} | {} | {} |\n",
            item.id,
            item.action,
            item.priority.emoji(),
            item.priority,
            item.owner,
            item.deadline
        ));
    }
    table.push('\n');

    table
}

/// Generate the per-owner workload table.
fn generate_owner_table(items: &[ActionItem]) -> String {
    let mut table = String::new();

    table.push_str("### Responsibilities\n\n");
    table.push_str("| Owner | Actions |\n");
    table.push_str("|:---|:---|\n");
    for (owner, owned) in group_by_owner(items) {
        let ids: Vec<String> = owned.iter().map(|i| format!("#{}", i.id)).collect();
        table.push_str(&format!("| {} | {} |\n", owner, ids.join(", ")));
    }
    table.push('\n');

    table
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by GovCheck*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(reports: &[Report]) -> Result<String> {
    serde_json::to_string_pretty(reports).map_err(Into::into)
}

/// Write rendered output to a file.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    use anyhow::Context;

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::build_action_plan;
    use crate::models::{Assessment, ReportKind, ScoreComponent};
    use chrono::TimeZone;

    fn fixed_options() -> RenderOptions {
        RenderOptions {
            include_breakdown: true,
            generated_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    fn create_test_reports() -> Vec<Report> {
        let compliance = Report {
            kind: ReportKind::Compliance,
            title: "Compliance Report".to_string(),
            content: "The compliance analysis indicates a low compliance level (3/10).".to_string(),
            recommendations: vec![Recommendation::AdoptEuAiAct],
            assessment: Assessment::Scored {
                score: Score::from_components(
                    vec![ScoreComponent {
                        rule: "At least three kinds of documentation maintained",
                        points: 3,
                    }],
                    10,
                    |_| "Low compliance".to_string(),
                ),
            },
        };

        let plan = Report {
            kind: ReportKind::ActionPlan,
            title: "Action Plan".to_string(),
            content: "Based on the compliance and risk analyses, an action plan with 2 items was developed.".to_string(),
            recommendations: Vec::new(),
            assessment: Assessment::Planned {
                action_items: build_action_plan(
                    &[Recommendation::AdoptEuAiAct],
                    &[Recommendation::ContinuousMonitoring],
                ),
            },
        };

        vec![compliance, plan]
    }

    #[test]
    fn test_generate_markdown_report() {
        let markdown = generate_markdown_report(
            &create_test_reports(),
            Progress {
                answered: 9,
                total: 9,
            },
            &fixed_options(),
        );

        assert!(markdown.contains("# AI Governance Assessment"));
        assert!(markdown.contains("2026-03-01 12:00:00 UTC"));
        assert!(markdown.contains("9/9 (100%)"));
        assert!(markdown.contains("## Compliance Report"));
        assert!(markdown.contains("**Score:** 3/10 - Low compliance"));
        assert!(markdown.contains("| At least three kinds of documentation maintained | +3 |"));
        assert!(markdown.contains("1. Consider adopting the EU AI Act"));
        assert!(markdown.contains("## Action Plan"));
        assert!(markdown.contains(
            "| 2 | Establish a continuous monitoring system for early detection of issues | 🔴 High | AI Governance Team | 30 days |"
        ));
        assert!(markdown.contains("| Data Security Team | #1 |"));
    }

    #[test]
    fn test_breakdown_can_be_hidden() {
        let options = RenderOptions {
            include_breakdown: false,
            ..fixed_options()
        };
        let markdown = generate_markdown_report(
            &create_test_reports(),
            Progress {
                answered: 9,
                total: 9,
            },
            &options,
        );

        assert!(markdown.contains("**Score:**"));
        assert!(!markdown.contains("| Criterion | Points |"));
    }

    #[test]
    fn test_incomplete_report_section() {
        let section =
            generate_report_section(&Report::incomplete(ReportKind::Risk), &fixed_options());

        assert!(section.contains("## Incomplete assessment"));
        assert!(section.contains("**Score:** N/A"));
        assert!(!section.contains("### Recommendations"));
    }

    #[test]
    fn test_generate_json_report() {
        let json = generate_json_report(&create_test_reports()).unwrap();

        assert!(json.contains("\"status\": \"scored\""));
        assert!(json.contains("\"action_items\""));
        assert!(json.contains("\"Consider adopting the EU AI Act for systems that process personal data\""));
        assert!(!json.contains("generated"));
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");

        write_report("# Report\n", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Report\n");
    }
}
