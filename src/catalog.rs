//! The fixed questionnaire catalog.
//!
//! Sections, questions and option labels are defined once here. Scoring
//! rules match option labels exactly, so they use the same [`options`]
//! constants the catalog is built from.

use crate::error::{AssessmentError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Option labels, shared verbatim between the catalog and the scoring rules.
pub mod options {
    pub const PERSONAL_DATA: &str = "Personal data";
    pub const SENSITIVE_DATA: &str = "Sensitive data";
    pub const CORPORATE_DATA: &str = "Corporate data";
    pub const PUBLIC_DATA: &str = "Public data";

    pub const FINANCE: &str = "Finance";
    pub const HR: &str = "HR";
    pub const MARKETING: &str = "Marketing";
    pub const OPERATIONS: &str = "Operations";
    pub const IT: &str = "IT";

    pub const PROCESS_AUTOMATION: &str = "Process automation";
    pub const PREDICTIVE_ANALYTICS: &str = "Predictive analytics";
    pub const DECISION_SUPPORT: &str = "Decision support";
    pub const CUSTOMER_SERVICE: &str = "Customer service";

    pub const ETHICS_COMMITTEE: &str = "Ethics committee";
    pub const COMPLIANCE_DEPARTMENT: &str = "Compliance department";
    pub const TECHNICAL_TEAM: &str = "Technical team";
    pub const BUSINESS_MANAGERS: &str = "Business managers";

    pub const NIST_AI_RMF: &str = "NIST AI Risk Management Framework";
    pub const EU_AI_ACT: &str = "EU AI Act";
    pub const ISO_42001: &str = "ISO/IEC 42001";
    pub const INTERNAL_FRAMEWORK: &str = "Internal framework";

    pub const MODEL_DOCUMENTATION: &str = "Technical model documentation";
    pub const TRAINING_RECORDS: &str = "Training records";
    pub const DECISION_LOGS: &str = "Decision logs";
    pub const PERIODIC_AUDITS: &str = "Periodic audits";

    pub const BIAS_AND_DISCRIMINATION: &str = "Bias and discrimination";
    pub const PRIVACY_AND_SECURITY: &str = "Privacy and data security";
    pub const TRANSPARENCY: &str = "Transparency and explainability";
    pub const RELIABILITY: &str = "Reliability and robustness";

    pub const BIAS_TESTING: &str = "Bias testing";
    pub const HUMAN_REVIEW: &str = "Human review of decisions";
    pub const CONTINUOUS_MONITORING: &str = "Continuous monitoring";
    pub const DATA_ANONYMIZATION: &str = "Data anonymization";

    pub const HIGH_IMPACT: &str = "High impact";
    pub const MEDIUM_IMPACT: &str = "Medium impact";
    pub const LOW_IMPACT: &str = "Low impact";
    pub const MINIMAL_IMPACT: &str = "Minimal impact";
}

/// One of the three questionnaire topics, in their fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    Characterization,
    Governance,
    Risk,
}

impl SectionKey {
    /// All sections in questionnaire order.
    pub const ALL: [SectionKey; 3] = [
        SectionKey::Characterization,
        SectionKey::Governance,
        SectionKey::Risk,
    ];

    /// Stable key used in answer sheets.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Characterization => "characterization",
            SectionKey::Governance => "governance",
            SectionKey::Risk => "risk",
        }
    }

    /// Human-readable section title.
    pub fn title(&self) -> &'static str {
        match self {
            SectionKey::Characterization => "Characterization",
            SectionKey::Governance => "Governance",
            SectionKey::Risk => "Risk",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKey {
    type Err = AssessmentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "characterization" => Ok(SectionKey::Characterization),
            "governance" => Ok(SectionKey::Governance),
            "risk" => Ok(SectionKey::Risk),
            _ => Err(AssessmentError::UnknownSection(s.to_string())),
        }
    }
}

/// Identifies a question by its section and position within the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct QuestionId {
    pub section: SectionKey,
    pub index: usize,
}

impl QuestionId {
    pub const fn new(section: SectionKey, index: usize) -> Self {
        Self { section, index }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.section, self.index)
    }
}

/// Named ids for the questions the scoring rules read.
pub mod questions {
    use super::{QuestionId, SectionKey};

    pub const DATA_TYPES: QuestionId = QuestionId::new(SectionKey::Characterization, 0);
    pub const IMPACTED_AREAS: QuestionId = QuestionId::new(SectionKey::Characterization, 1);
    pub const OBJECTIVES: QuestionId = QuestionId::new(SectionKey::Characterization, 2);
    pub const OVERSIGHT: QuestionId = QuestionId::new(SectionKey::Governance, 0);
    pub const FRAMEWORKS: QuestionId = QuestionId::new(SectionKey::Governance, 1);
    pub const DOCUMENTATION: QuestionId = QuestionId::new(SectionKey::Governance, 2);
    pub const IDENTIFIED_RISKS: QuestionId = QuestionId::new(SectionKey::Risk, 0);
    pub const MITIGATIONS: QuestionId = QuestionId::new(SectionKey::Risk, 1);
    pub const IMPACT: QuestionId = QuestionId::new(SectionKey::Risk, 2);
}

/// A multi-select question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    /// Stable snake_case key used in answer sheets.
    pub key: &'static str,
    pub prompt: &'static str,
    pub options: Vec<&'static str>,
}

impl Question {
    fn new(id: QuestionId, key: &'static str, prompt: &'static str, options: &[&'static str]) -> Self {
        Self {
            id,
            key,
            prompt,
            options: options.to_vec(),
        }
    }

    /// Whether `option` is one of this question's labels.
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| *o == option)
    }
}

/// A section and its ordered questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub key: SectionKey,
    pub questions: Vec<Question>,
}

/// The immutable questionnaire definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    sections: Vec<Section>,
}

impl Catalog {
    /// Builds the standard AI governance questionnaire.
    pub fn standard() -> Self {
        use options::*;
        use questions::*;

        let characterization = Section {
            key: SectionKey::Characterization,
            questions: vec![
                Question::new(
                    DATA_TYPES,
                    "data_types",
                    "Which types of data does the system use?",
                    &[PERSONAL_DATA, SENSITIVE_DATA, CORPORATE_DATA, PUBLIC_DATA],
                ),
                Question::new(
                    IMPACTED_AREAS,
                    "impacted_areas",
                    "Which areas of the organization will be impacted?",
                    &[FINANCE, HR, MARKETING, OPERATIONS, IT],
                ),
                Question::new(
                    OBJECTIVES,
                    "objectives",
                    "What are the objectives of the AI system?",
                    &[
                        PROCESS_AUTOMATION,
                        PREDICTIVE_ANALYTICS,
                        DECISION_SUPPORT,
                        CUSTOMER_SERVICE,
                    ],
                ),
            ],
        };

        let governance = Section {
            key: SectionKey::Governance,
            questions: vec![
                Question::new(
                    OVERSIGHT,
                    "oversight",
                    "Who will be responsible for overseeing the system?",
                    &[
                        ETHICS_COMMITTEE,
                        COMPLIANCE_DEPARTMENT,
                        TECHNICAL_TEAM,
                        BUSINESS_MANAGERS,
                    ],
                ),
                Question::new(
                    FRAMEWORKS,
                    "frameworks",
                    "Which governance frameworks will be adopted?",
                    &[NIST_AI_RMF, EU_AI_ACT, ISO_42001, INTERNAL_FRAMEWORK],
                ),
                Question::new(
                    DOCUMENTATION,
                    "documentation",
                    "Which documentation will be maintained?",
                    &[
                        MODEL_DOCUMENTATION,
                        TRAINING_RECORDS,
                        DECISION_LOGS,
                        PERIODIC_AUDITS,
                    ],
                ),
            ],
        };

        let risk = Section {
            key: SectionKey::Risk,
            questions: vec![
                Question::new(
                    IDENTIFIED_RISKS,
                    "identified_risks",
                    "Which risks have been identified?",
                    &[
                        BIAS_AND_DISCRIMINATION,
                        PRIVACY_AND_SECURITY,
                        TRANSPARENCY,
                        RELIABILITY,
                    ],
                ),
                Question::new(
                    MITIGATIONS,
                    "mitigations",
                    "Which mitigation measures will be implemented?",
                    &[
                        BIAS_TESTING,
                        HUMAN_REVIEW,
                        CONTINUOUS_MONITORING,
                        DATA_ANONYMIZATION,
                    ],
                ),
                Question::new(
                    IMPACT,
                    "impact",
                    "What is the impact classification of the system?",
                    &[HIGH_IMPACT, MEDIUM_IMPACT, LOW_IMPACT, MINIMAL_IMPACT],
                ),
            ],
        };

        Self {
            sections: vec![characterization, governance, risk],
        }
    }

    /// Sections in questionnaire order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Looks up a section by key.
    pub fn section(&self, key: SectionKey) -> &Section {
        // Every SectionKey is present; standard() is the only constructor.
        &self.sections[key as usize]
    }

    /// Looks up a question, rejecting out-of-range positions.
    pub fn question(&self, id: QuestionId) -> Result<&Question> {
        let section = self.section(id.section);
        section
            .questions
            .get(id.index)
            .ok_or(AssessmentError::QuestionOutOfRange {
                section: id.section,
                index: id.index,
                count: section.questions.len(),
            })
    }

    /// Looks up a question by its answer-sheet key.
    pub fn question_by_key(&self, section: SectionKey, key: &str) -> Result<&Question> {
        self.section(section)
            .questions
            .iter()
            .find(|q| q.key == key)
            .ok_or_else(|| AssessmentError::UnknownQuestion {
                section,
                key: key.to_string(),
            })
    }

    /// Every question in questionnaire order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    /// Every question id in questionnaire order.
    pub fn question_ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.questions().map(|q| q.id)
    }

    /// Total number of questions.
    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_shape() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.sections().len(), 3);
        assert_eq!(catalog.question_count(), 9);

        for (section, key) in catalog.sections().iter().zip(SectionKey::ALL) {
            assert_eq!(section.key, key);
            assert_eq!(section.questions.len(), 3);
            for (index, question) in section.questions.iter().enumerate() {
                assert_eq!(question.id, QuestionId::new(key, index));
                assert!((4..=5).contains(&question.options.len()));
            }
        }
    }

    #[test]
    fn test_scoring_labels_exist_in_catalog() {
        let catalog = Catalog::standard();
        let checks = [
            (questions::FRAMEWORKS, options::EU_AI_ACT),
            (questions::FRAMEWORKS, options::NIST_AI_RMF),
            (questions::OVERSIGHT, options::ETHICS_COMMITTEE),
            (questions::MITIGATIONS, options::HUMAN_REVIEW),
            (questions::DATA_TYPES, options::SENSITIVE_DATA),
            (questions::IMPACT, options::MINIMAL_IMPACT),
        ];
        for (id, option) in checks {
            assert!(catalog.question(id).unwrap().has_option(option), "{option}");
        }
    }

    #[test]
    fn test_section_key_from_str() {
        assert_eq!("governance".parse::<SectionKey>(), Ok(SectionKey::Governance));
        assert_eq!(" Risk ".parse::<SectionKey>(), Ok(SectionKey::Risk));
        assert_eq!(
            "finance".parse::<SectionKey>(),
            Err(AssessmentError::UnknownSection("finance".to_string()))
        );
    }

    #[test]
    fn test_question_lookup_errors() {
        let catalog = Catalog::standard();
        let err = catalog
            .question(QuestionId::new(SectionKey::Risk, 3))
            .unwrap_err();
        assert_eq!(
            err,
            AssessmentError::QuestionOutOfRange {
                section: SectionKey::Risk,
                index: 3,
                count: 3
            }
        );

        assert_eq!(
            catalog
                .question_by_key(SectionKey::Governance, "frameworks")
                .unwrap()
                .id,
            questions::FRAMEWORKS
        );
        assert!(catalog
            .question_by_key(SectionKey::Governance, "impact")
            .is_err());
    }
}
