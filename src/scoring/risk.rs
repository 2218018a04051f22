//! Risk analysis report.
//!
//! A higher score means a better controlled system, so the level runs the
//! opposite way to the score: 8 and above is low risk.

use super::MAX_SCORE;
use crate::catalog::{options, questions};
use crate::models::{Assessment, Recommendation, Report, ReportKind, Score, ScoreComponent};
use crate::store::AnswerStore;
use std::fmt;
use tracing::debug;

/// Qualitative risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        if score >= 8 {
            RiskLevel::Low
        } else if score >= 5 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    fn outlook(&self) -> &'static str {
        match self {
            RiskLevel::High => {
                "Additional urgent measures are needed to mitigate the identified risks."
            }
            RiskLevel::Medium => {
                "There are areas for improvement to further reduce the risk profile."
            }
            RiskLevel::Low => "The system demonstrates good control over potential risks.",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Scores the identified risks against the planned mitigations.
pub fn evaluate(store: &AnswerStore) -> Report {
    let data_types = store.selections(questions::DATA_TYPES);
    let oversight = store.selections(questions::OVERSIGHT);
    let risks = store.selections(questions::IDENTIFIED_RISKS);
    let mitigations = store.selections(questions::MITIGATIONS);
    let impact = store.selections(questions::IMPACT);

    let mut components = Vec::new();

    if risks.len() <= 2 {
        components.push(ScoreComponent {
            rule: "Two or fewer risks identified",
            points: 2,
        });
    }

    if mitigations.len() >= 3 {
        components.push(ScoreComponent {
            rule: "At least three mitigation measures planned",
            points: 3,
        });
    }

    if impact.includes(options::LOW_IMPACT) || impact.includes(options::MINIMAL_IMPACT) {
        components.push(ScoreComponent {
            rule: "Low or minimal impact classification",
            points: 3,
        });
    } else if impact.includes(options::MEDIUM_IMPACT) {
        components.push(ScoreComponent {
            rule: "Medium impact classification",
            points: 1,
        });
    }

    if !data_types.includes(options::SENSITIVE_DATA) {
        components.push(ScoreComponent {
            rule: "No sensitive data processed",
            points: 2,
        });
    }

    let score = Score::from_components(components, MAX_SCORE, |value| {
        format!("{} risk", RiskLevel::from_score(value))
    });
    let level = RiskLevel::from_score(score.value);

    let mut recommendations = Vec::new();

    if risks.includes(options::BIAS_AND_DISCRIMINATION)
        && !mitigations.includes(options::BIAS_TESTING)
    {
        recommendations.push(Recommendation::BiasTesting);
    }

    if risks.includes(options::PRIVACY_AND_SECURITY)
        && !mitigations.includes(options::DATA_ANONYMIZATION)
    {
        recommendations.push(Recommendation::DataAnonymization);
    }

    if !mitigations.includes(options::CONTINUOUS_MONITORING) {
        recommendations.push(Recommendation::ContinuousMonitoring);
    }

    if impact.includes(options::HIGH_IMPACT) && !oversight.includes(options::ETHICS_COMMITTEE) {
        recommendations.push(Recommendation::HighImpactEthicsCommittee);
    }

    debug!(
        "Risk score {}/{} ({} risk), {} recommendations",
        score.value,
        MAX_SCORE,
        level,
        recommendations.len()
    );

    Report {
        kind: ReportKind::Risk,
        title: "Risk Analysis Report".to_string(),
        content: format!(
            "The analysis indicates the system presents a {} risk level ({}/{}). {}",
            level.to_string().to_lowercase(),
            score.value,
            MAX_SCORE,
            level.outlook()
        ),
        recommendations,
        assessment: Assessment::Scored { score },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::test_support::complete_store;

    fn score_of(report: &Report) -> u8 {
        report.score().map(|s| s.value).unwrap()
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(RiskLevel::from_score(8), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(7), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(5), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(4), RiskLevel::High);
    }

    #[test]
    fn test_well_controlled_system() {
        let store = complete_store(&[
            (questions::DATA_TYPES, &[options::CORPORATE_DATA]),
            (
                questions::IDENTIFIED_RISKS,
                &[options::BIAS_AND_DISCRIMINATION],
            ),
            (
                questions::MITIGATIONS,
                &[
                    options::BIAS_TESTING,
                    options::HUMAN_REVIEW,
                    options::CONTINUOUS_MONITORING,
                ],
            ),
            (questions::IMPACT, &[options::LOW_IMPACT]),
        ]);

        let report = evaluate(&store);
        assert_eq!(report.score_label().as_deref(), Some("10/10 - Low risk"));
        assert!(report.content.contains("low risk level (10/10)"));
        assert!(report.content.contains("good control"));
        assert!(!report.recommendations.contains(&Recommendation::BiasTesting));
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_impact_branches_are_exclusive() {
        let both: &[&str] = &[options::MEDIUM_IMPACT, options::MINIMAL_IMPACT];
        let medium: &[&str] = &[options::MEDIUM_IMPACT];
        let high: &[&str] = &[options::HIGH_IMPACT];

        // Defaults: one risk (+2), one mitigation (+0), public data (+2).
        let store = complete_store(&[(questions::IMPACT, both)]);
        assert_eq!(score_of(&evaluate(&store)), 7);

        let store = complete_store(&[(questions::IMPACT, medium)]);
        let report = evaluate(&store);
        assert_eq!(score_of(&report), 5);
        assert_eq!(report.score_label().as_deref(), Some("5/10 - Medium risk"));
        assert!(report.content.contains("medium risk level (5/10)"));
        assert!(report.content.ends_with(
            "There are areas for improvement to further reduce the risk profile."
        ));

        let store = complete_store(&[(questions::IMPACT, high)]);
        let report = evaluate(&store);
        assert_eq!(score_of(&report), 4);
        assert_eq!(report.score().unwrap().label, "High risk");
        assert!(report.content.contains("urgent measures"));
    }

    #[test]
    fn test_high_risk_profile_recommendations() {
        let store = complete_store(&[
            (questions::DATA_TYPES, &[options::SENSITIVE_DATA]),
            (questions::OVERSIGHT, &[options::TECHNICAL_TEAM]),
            (
                questions::IDENTIFIED_RISKS,
                &[
                    options::BIAS_AND_DISCRIMINATION,
                    options::PRIVACY_AND_SECURITY,
                    options::TRANSPARENCY,
                ],
            ),
            (questions::MITIGATIONS, &[options::HUMAN_REVIEW]),
            (questions::IMPACT, &[options::HIGH_IMPACT]),
        ]);

        let report = evaluate(&store);
        assert_eq!(score_of(&report), 0);
        assert_eq!(
            report.recommendations,
            vec![
                Recommendation::BiasTesting,
                Recommendation::DataAnonymization,
                Recommendation::ContinuousMonitoring,
                Recommendation::HighImpactEthicsCommittee,
            ]
        );
    }

    #[test]
    fn test_ethics_committee_covers_high_impact() {
        let store = complete_store(&[
            (questions::OVERSIGHT, &[options::ETHICS_COMMITTEE]),
            (questions::IMPACT, &[options::HIGH_IMPACT]),
        ]);

        let report = evaluate(&store);
        assert!(!report
            .recommendations
            .contains(&Recommendation::HighImpactEthicsCommittee));
    }
}
