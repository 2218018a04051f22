//! Error types for catalog lookups and answer handling.
//!
//! Incomplete answers are not an error: they produce the incomplete report.
//! Everything here signals a caller that stepped outside the fixed catalog.

use crate::catalog::SectionKey;
use thiserror::Error;

/// Errors raised when an answer or lookup does not fit the catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    #[error("unknown section '{0}' (expected characterization, governance or risk)")]
    UnknownSection(String),

    #[error("section {section} has no question named '{key}'")]
    UnknownQuestion { section: SectionKey, key: String },

    #[error("section {section} has {count} questions, index {index} is out of range")]
    QuestionOutOfRange {
        section: SectionKey,
        index: usize,
        count: usize,
    },

    #[error("'{option}' is not an option of {section} question {index}")]
    InvalidOption {
        section: SectionKey,
        index: usize,
        option: String,
    },

    #[error("invalid answer sheet: {message}")]
    Sheet { message: String },
}

/// Convenience alias for results carrying an [`AssessmentError`].
pub type Result<T> = std::result::Result<T, AssessmentError>;

impl From<toml::de::Error> for AssessmentError {
    fn from(err: toml::de::Error) -> Self {
        Self::Sheet {
            message: err.to_string(),
        }
    }
}
