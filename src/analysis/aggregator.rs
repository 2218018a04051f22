//! Action plan aggregation and statistics.
//!
//! This module merges compliance and risk recommendations into a single,
//! deduplicated action plan and provides summaries over its items.

use crate::models::{ActionItem, Assessment, Owner, Priority, Recommendation, Report, ReportKind};
use crate::scoring::{compliance, risk};
use crate::store::AnswerStore;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Counts of action items per priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrioritySummary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PrioritySummary {
    /// Creates a summary from a list of action items.
    pub fn from_items(items: &[ActionItem]) -> Self {
        let mut summary = Self {
            total: items.len(),
            ..Self::default()
        };

        for item in items {
            match item.priority {
                Priority::High => summary.high += 1,
                Priority::Medium => summary.medium += 1,
                Priority::Low => summary.low += 1,
            }
        }

        summary
    }
}

/// Merges recommendations into numbered action items.
///
/// Compliance recommendations come first, then risk recommendations not
/// already present. Ids are contiguous and start at 1.
pub fn build_action_plan(
    compliance: &[Recommendation],
    risk: &[Recommendation],
) -> Vec<ActionItem> {
    let mut seen = HashSet::new();

    compliance
        .iter()
        .chain(risk.iter())
        .filter(|rec| seen.insert(**rec))
        .enumerate()
        .map(|(index, rec)| ActionItem::new(index + 1, *rec))
        .collect()
}

/// Builds the action plan report from the current answers.
///
/// Callers go through [`crate::scoring::generate_report`], which checks
/// completeness first.
pub fn action_plan_report(store: &AnswerStore) -> Report {
    let compliance_report = compliance::evaluate(store);
    let risk_report = risk::evaluate(store);

    let action_items = build_action_plan(
        &compliance_report.recommendations,
        &risk_report.recommendations,
    );
    let summary = PrioritySummary::from_items(&action_items);

    debug!(
        "Action plan: {} items ({} high, {} medium, {} low)",
        summary.total, summary.high, summary.medium, summary.low
    );

    let urgency = if summary.high > 0 {
        format!(
            "There are {} high-priority actions that should be implemented urgently.",
            summary.high
        )
    } else {
        "No high-priority actions were identified.".to_string()
    };

    Report {
        kind: ReportKind::ActionPlan,
        title: "Action Plan".to_string(),
        content: format!(
            "Based on the compliance and risk analyses, an action plan with {} items was developed. {}",
            summary.total, urgency
        ),
        recommendations: Vec::new(),
        assessment: Assessment::Planned { action_items },
    }
}

/// Group action items by owner.
pub fn group_by_owner(items: &[ActionItem]) -> BTreeMap<Owner, Vec<ActionItem>> {
    let mut grouped: BTreeMap<Owner, Vec<ActionItem>> = BTreeMap::new();

    for item in items {
        grouped.entry(item.owner).or_default().push(item.clone());
    }

    grouped
}

/// Items whose priority is at or above `threshold`.
pub fn items_at_or_above(items: &[ActionItem], threshold: Priority) -> Vec<&ActionItem> {
    items
        .iter()
        .filter(|item| item.priority >= threshold)
        .collect()
}

/// Result of checking an action plan against a priority threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdCheck {
    /// No item at or above the threshold.
    Pass,
    /// Number of items at or above the threshold.
    Exceeded(usize),
    /// The plan is incomplete, so the threshold cannot be evaluated.
    Unevaluated,
}

impl ThresholdCheck {
    pub fn fails(&self) -> bool {
        !matches!(self, ThresholdCheck::Pass)
    }
}

/// Checks a generated action plan report against `threshold`.
///
/// An incomplete plan has no items to inspect and never passes.
pub fn check_threshold(plan: &Report, threshold: Priority) -> ThresholdCheck {
    if plan.is_incomplete() {
        return ThresholdCheck::Unevaluated;
    }

    match items_at_or_above(plan.action_items(), threshold).len() {
        0 => ThresholdCheck::Pass,
        n => ThresholdCheck::Exceeded(n),
    }
}
