//! Report generation.
//!
//! Every report is a pure function of the answer store. The completeness
//! check happens once here, before dispatching to a specific report.

pub mod compliance;
pub mod risk;

use crate::analysis::action_plan_report;
use crate::models::{Report, ReportKind};
use crate::store::AnswerStore;
use tracing::debug;

/// Upper bound of the compliance and risk scores.
pub const MAX_SCORE: u8 = 10;

/// Generates the requested report, or the incomplete sentinel when any
/// question is still unanswered.
pub fn generate_report(store: &AnswerStore, kind: ReportKind) -> Report {
    if !store.all_answered() {
        let progress = store.progress();
        debug!(
            "Skipping {} report: {}/{} questions answered",
            kind, progress.answered, progress.total
        );
        return Report::incomplete(kind);
    }

    let report = match kind {
        ReportKind::Compliance => compliance::evaluate(store),
        ReportKind::Risk => risk::evaluate(store),
        ReportKind::ActionPlan => action_plan_report(store),
    };

    debug!(
        "Generated {} report with {} recommendations",
        kind,
        report.recommendations.len()
    );
    report
}

/// Generates several reports from the same answers.
pub fn generate_reports(store: &AnswerStore, kinds: &[ReportKind]) -> Vec<Report> {
    kinds
        .iter()
        .map(|kind| generate_report(store, *kind))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::test_support::complete_store;
    use super::*;
    use crate::catalog::{options, Catalog, SectionKey};
    use std::sync::Arc;

    #[test]
    fn test_incomplete_store_yields_sentinel_for_every_kind() {
        let catalog = Arc::new(Catalog::standard());
        let mut store = AnswerStore::new(catalog);
        store
            .select(SectionKey::Governance, 1, options::EU_AI_ACT)
            .unwrap();

        for kind in ReportKind::ALL {
            let report = generate_report(&store, kind);
            assert!(report.is_incomplete());
            assert_eq!(report.kind, kind);
            assert_eq!(report.title, "Incomplete assessment");
            assert_eq!(report.score_label().as_deref(), Some("N/A"));
            assert!(report.recommendations.is_empty());
        }
    }

    #[test]
    fn test_generate_reports_is_idempotent() {
        let store = complete_store(&[]);

        let first = generate_reports(&store, &ReportKind::ALL);
        let second = generate_reports(&store, &ReportKind::ALL);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(first.len(), 3);
        assert!(first.iter().all(|r| !r.is_incomplete()));
    }
}
