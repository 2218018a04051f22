//! Compliance report.

use super::MAX_SCORE;
use crate::catalog::{options, questions};
use crate::models::{Assessment, Recommendation, Report, ReportKind, Score, ScoreComponent};
use crate::store::AnswerStore;
use tracing::debug;

/// Qualitative compliance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplianceStatus {
    High,
    Partial,
    Low,
}

impl ComplianceStatus {
    pub fn from_score(score: u8) -> Self {
        if score >= 8 {
            ComplianceStatus::High
        } else if score >= 5 {
            ComplianceStatus::Partial
        } else {
            ComplianceStatus::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComplianceStatus::High => "High compliance",
            ComplianceStatus::Partial => "Partial compliance",
            ComplianceStatus::Low => "Low compliance",
        }
    }
}

/// Scores governance practices against the compliance rules.
pub fn evaluate(store: &AnswerStore) -> Report {
    let data_types = store.selections(questions::DATA_TYPES);
    let oversight = store.selections(questions::OVERSIGHT);
    let frameworks = store.selections(questions::FRAMEWORKS);
    let documentation = store.selections(questions::DOCUMENTATION);
    let risks = store.selections(questions::IDENTIFIED_RISKS);
    let mitigations = store.selections(questions::MITIGATIONS);

    let mut components = Vec::new();

    if frameworks.includes(options::EU_AI_ACT) || frameworks.includes(options::NIST_AI_RMF) {
        components.push(ScoreComponent {
            rule: "Recognized governance framework adopted",
            points: 3,
        });
    }

    if documentation.len() >= 3 {
        components.push(ScoreComponent {
            rule: "At least three kinds of documentation maintained",
            points: 3,
        });
    }

    if oversight.includes(options::ETHICS_COMMITTEE) {
        components.push(ScoreComponent {
            rule: "Ethics committee oversees the system",
            points: 2,
        });
    }

    if mitigations.includes(options::HUMAN_REVIEW) {
        components.push(ScoreComponent {
            rule: "Decisions are reviewed by humans",
            points: 2,
        });
    }

    let score = Score::from_components(components, MAX_SCORE, |value| {
        ComplianceStatus::from_score(value).label().to_string()
    });
    let status = ComplianceStatus::from_score(score.value);

    let mut recommendations = Vec::new();

    if !frameworks.includes(options::EU_AI_ACT) && data_types.includes(options::PERSONAL_DATA) {
        recommendations.push(Recommendation::AdoptEuAiAct);
    }

    if !documentation.includes(options::PERIODIC_AUDITS) {
        recommendations.push(Recommendation::PeriodicAudits);
    }

    if !oversight.includes(options::ETHICS_COMMITTEE)
        && risks.includes(options::BIAS_AND_DISCRIMINATION)
    {
        recommendations.push(Recommendation::BiasEthicsCommittee);
    }

    debug!(
        "Compliance score {}/{} ({}), {} recommendations",
        score.value,
        MAX_SCORE,
        status.label(),
        recommendations.len()
    );

    let outlook = if score.value < 8 {
        "Additional actions are needed to improve compliance with industry best practices."
    } else {
        "The system shows good adherence to recommended AI governance practices."
    };

    Report {
        kind: ReportKind::Compliance,
        title: "Compliance Report".to_string(),
        content: format!(
            "The compliance analysis indicates a {} level ({}/{}). {}",
            status.label().to_lowercase(),
            score.value,
            MAX_SCORE,
            outlook
        ),
        recommendations,
        assessment: Assessment::Scored { score },
    }
}
