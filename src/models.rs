//! Data models for assessment reports.
//!
//! This module contains the value types produced by the scoring engine and
//! the action-plan aggregator: reports, scores, recommendations and action
//! items. They are rebuilt on every request and never shared.

use serde::{Serialize, Serializer};
use std::fmt;

/// Which report to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Compliance,
    Risk,
    ActionPlan,
}

impl ReportKind {
    /// All report kinds in presentation order.
    pub const ALL: [ReportKind; 3] = [
        ReportKind::Compliance,
        ReportKind::Risk,
        ReportKind::ActionPlan,
    ];
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Compliance => write!(f, "compliance"),
            ReportKind::Risk => write!(f, "risk"),
            ReportKind::ActionPlan => write!(f, "action plan"),
        }
    }
}

/// Priority of an action item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Deadline attached to every action item of this priority.
    pub fn deadline(&self) -> &'static str {
        match self {
            Priority::High => "30 days",
            Priority::Medium => "60 days",
            Priority::Low => "90 days",
        }
    }

    /// Returns an emoji representation of the priority.
    pub fn emoji(&self) -> &'static str {
        match self {
            Priority::Low => "🟢",
            Priority::Medium => "🟡",
            Priority::High => "🔴",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

/// Role responsible for carrying out an action item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Owner {
    #[serde(rename = "Ethics Committee")]
    EthicsCommittee,
    #[serde(rename = "Data Security Team")]
    DataSecurityTeam,
    #[serde(rename = "AI Governance Team")]
    AiGovernanceTeam,
    #[serde(rename = "Legal Department")]
    LegalDepartment,
    #[serde(rename = "Project Manager")]
    ProjectManager,
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::EthicsCommittee => write!(f, "Ethics Committee"),
            Owner::DataSecurityTeam => write!(f, "Data Security Team"),
            Owner::AiGovernanceTeam => write!(f, "AI Governance Team"),
            Owner::LegalDepartment => write!(f, "Legal Department"),
            Owner::ProjectManager => write!(f, "Project Manager"),
        }
    }
}

/// A recommendation one of the report rules can emit.
///
/// Priority and owner are fixed per variant; the wording is only produced
/// when the recommendation is displayed or serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recommendation {
    /// Personal data is processed without the EU AI Act in place.
    AdoptEuAiAct,
    /// Documentation does not include periodic audits.
    PeriodicAudits,
    /// Bias was identified and nobody with an ethics remit oversees it.
    BiasEthicsCommittee,
    /// Bias was identified but is not tested for.
    BiasTesting,
    /// Privacy risk without data anonymization.
    DataAnonymization,
    /// No continuous monitoring in place.
    ContinuousMonitoring,
    /// High-impact system without an ethics committee.
    HighImpactEthicsCommittee,
}

impl Recommendation {
    pub const ALL: [Recommendation; 7] = [
        Recommendation::AdoptEuAiAct,
        Recommendation::PeriodicAudits,
        Recommendation::BiasEthicsCommittee,
        Recommendation::BiasTesting,
        Recommendation::DataAnonymization,
        Recommendation::ContinuousMonitoring,
        Recommendation::HighImpactEthicsCommittee,
    ];

    /// Human-readable wording.
    pub fn text(&self) -> &'static str {
        match self {
            Recommendation::AdoptEuAiAct => {
                "Consider adopting the EU AI Act for systems that process personal data"
            }
            Recommendation::PeriodicAudits => "Implement a periodic audit program",
            Recommendation::BiasEthicsCommittee => {
                "Establish an ethics committee to oversee bias issues"
            }
            Recommendation::BiasTesting => "Implement regular bias testing",
            Recommendation::DataAnonymization => "Adopt data anonymization techniques",
            Recommendation::ContinuousMonitoring => {
                "Establish a continuous monitoring system for early detection of issues"
            }
            Recommendation::HighImpactEthicsCommittee => {
                "For high-impact systems, establish a dedicated ethics committee"
            }
        }
    }

    pub fn priority(&self) -> Priority {
        match self {
            Recommendation::BiasEthicsCommittee
            | Recommendation::ContinuousMonitoring
            | Recommendation::HighImpactEthicsCommittee => Priority::High,
            Recommendation::PeriodicAudits
            | Recommendation::BiasTesting
            | Recommendation::DataAnonymization => Priority::Medium,
            Recommendation::AdoptEuAiAct => Priority::Low,
        }
    }

    pub fn owner(&self) -> Owner {
        match self {
            Recommendation::BiasEthicsCommittee
            | Recommendation::BiasTesting
            | Recommendation::HighImpactEthicsCommittee => Owner::EthicsCommittee,
            // Matched on the personal-data clause before the EU AI Act one.
            Recommendation::AdoptEuAiAct | Recommendation::DataAnonymization => {
                Owner::DataSecurityTeam
            }
            Recommendation::PeriodicAudits | Recommendation::ContinuousMonitoring => {
                Owner::AiGovernanceTeam
            }
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.text())
    }
}

/// One scoring rule that fired and the points it contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub rule: &'static str,
    pub points: u8,
}

/// A numeric score with its qualitative label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Score {
    pub value: u8,
    pub max: u8,
    pub label: String,
    pub components: Vec<ScoreComponent>,
}

impl Score {
    /// Sums the components into a score and labels the total.
    pub fn from_components(
        components: Vec<ScoreComponent>,
        max: u8,
        label: impl FnOnce(u8) -> String,
    ) -> Self {
        let value = components.iter().map(|c| c.points).sum();
        Self {
            value,
            max,
            label: label(value),
            components,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} - {}", self.value, self.max, self.label)
    }
}

/// A prioritized, owned unit of work in the action plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionItem {
    /// 1-based position in the plan.
    pub id: usize,
    pub action: Recommendation,
    pub priority: Priority,
    pub owner: Owner,
    pub deadline: &'static str,
}

impl ActionItem {
    pub fn new(id: usize, action: Recommendation) -> Self {
        let priority = action.priority();
        Self {
            id,
            action,
            priority,
            owner: action.owner(),
            deadline: priority.deadline(),
        }
    }
}

/// What a report concluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Assessment {
    Scored {
        #[serde(rename = "score_breakdown")]
        score: Score,
    },
    Planned { action_items: Vec<ActionItem> },
    Incomplete,
}

/// The output of one report function.
///
/// Serializes with a `score` display string (see [`Report::score_label`])
/// next to the flattened assessment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub kind: ReportKind,
    pub title: String,
    pub content: String,
    pub recommendations: Vec<Recommendation>,
    pub assessment: Assessment,
}

#[derive(Serialize)]
struct ReportRepr<'a> {
    kind: ReportKind,
    title: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<String>,
    recommendations: &'a [Recommendation],
    #[serde(flatten)]
    assessment: &'a Assessment,
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ReportRepr {
            kind: self.kind,
            title: &self.title,
            content: &self.content,
            score: self.score_label(),
            recommendations: &self.recommendations,
            assessment: &self.assessment,
        }
        .serialize(serializer)
    }
}

impl Report {
    /// Sentinel returned for any kind while questions remain unanswered.
    pub fn incomplete(kind: ReportKind) -> Self {
        Self {
            kind,
            title: "Incomplete assessment".to_string(),
            content: "Please answer every question to generate a complete report.".to_string(),
            recommendations: Vec::new(),
            assessment: Assessment::Incomplete,
        }
    }

    /// Score display string; `"N/A"` when incomplete, `None` for action plans.
    pub fn score_label(&self) -> Option<String> {
        match &self.assessment {
            Assessment::Scored { score } => Some(score.to_string()),
            Assessment::Incomplete => Some("N/A".to_string()),
            Assessment::Planned { .. } => None,
        }
    }

    pub fn score(&self) -> Option<&Score> {
        match &self.assessment {
            Assessment::Scored { score } => Some(score),
            _ => None,
        }
    }

    /// Action items; empty for anything but a completed action plan.
    pub fn action_items(&self) -> &[ActionItem] {
        match &self.assessment {
            Assessment::Planned { action_items } => action_items,
            _ => &[],
        }
    }

    pub fn is_incomplete(&self) -> bool {
        matches!(self.assessment, Assessment::Incomplete)
    }
}
