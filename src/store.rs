//! Answer storage and answer-sheet loading.
//!
//! The store maps each question to the set of selected option labels. It is
//! mutated through `&mut self` and read through `&self`, so report
//! generation always sees a consistent snapshot.

use crate::catalog::{Catalog, QuestionId, SectionKey};
use crate::error::{AssessmentError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Selected options for every answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerStore {
    catalog: Arc<Catalog>,
    answers: BTreeMap<QuestionId, BTreeSet<String>>,
}

impl AnswerStore {
    /// Creates an empty store over the given catalog.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            answers: BTreeMap::new(),
        }
    }

    /// Builds a store from a parsed answer sheet.
    pub fn from_sheet(catalog: Arc<Catalog>, sheet: &AnswerSheet) -> Result<Self> {
        let mut store = Self::new(catalog);

        for (section_name, questions) in &sheet.sections {
            let section: SectionKey = section_name.parse()?;
            for (key, selected) in questions {
                let id = store.catalog.question_by_key(section, key)?.id;
                for option in selected {
                    store.insert(id, option)?;
                }
            }
        }

        debug!(
            "Loaded answer sheet: {} of {} questions answered",
            store.progress().answered,
            store.progress().total
        );
        Ok(store)
    }

    /// The catalog this store validates against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Toggles `option` for the given question.
    ///
    /// Selecting an already selected option removes it. Unknown positions
    /// and labels are rejected and leave the store unchanged.
    pub fn select(&mut self, section: SectionKey, index: usize, option: &str) -> Result<()> {
        let id = QuestionId::new(section, index);
        self.validate(id, option)?;

        let selected = self.answers.entry(id).or_default();
        if !selected.remove(option) {
            selected.insert(option.to_string());
        }
        if selected.is_empty() {
            self.answers.remove(&id);
        }
        Ok(())
    }

    /// Whether the question has at least one selected option.
    ///
    /// Positions outside the catalog are rejected like they are in
    /// [`AnswerStore::select`].
    pub fn is_answered(&self, section: SectionKey, index: usize) -> Result<bool> {
        let id = QuestionId::new(section, index);
        self.catalog.question(id)?;
        Ok(self.has_answer(id))
    }

    /// Whether every question in the catalog is answered.
    pub fn all_answered(&self) -> bool {
        self.catalog.question_ids().all(|id| self.has_answer(id))
    }

    /// Whether `option` is currently selected for the question.
    pub fn is_selected(&self, section: SectionKey, index: usize, option: &str) -> bool {
        self.selections(QuestionId::new(section, index))
            .includes(option)
    }

    /// Read view over one question's selections. Unanswered questions yield
    /// an empty view.
    pub fn selections(&self, id: QuestionId) -> Selection<'_> {
        Selection {
            options: self.answers.get(&id),
        }
    }

    /// How many questions are answered.
    pub fn progress(&self) -> Progress {
        let total = self.catalog.question_count();
        let answered = self
            .catalog
            .question_ids()
            .filter(|id| self.has_answer(*id))
            .count();
        Progress { answered, total }
    }

    fn has_answer(&self, id: QuestionId) -> bool {
        self.answers
            .get(&id)
            .is_some_and(|selected| !selected.is_empty())
    }

    fn insert(&mut self, id: QuestionId, option: &str) -> Result<()> {
        self.validate(id, option)?;
        self.answers
            .entry(id)
            .or_default()
            .insert(option.to_string());
        Ok(())
    }

    fn validate(&self, id: QuestionId, option: &str) -> Result<()> {
        let question = self.catalog.question(id)?;
        if question.has_option(option) {
            Ok(())
        } else {
            Err(AssessmentError::InvalidOption {
                section: id.section,
                index: id.index,
                option: option.to_string(),
            })
        }
    }
}

/// Borrowed view of the options selected for one question.
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    options: Option<&'a BTreeSet<String>>,
}

impl<'a> Selection<'a> {
    pub fn includes(&self, option: &str) -> bool {
        self.options.is_some_and(|set| set.contains(option))
    }

    pub fn len(&self) -> usize {
        self.options.map_or(0, BTreeSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> {
        self.options
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }
}

/// Answered versus total question counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

impl Progress {
    pub fn is_complete(&self) -> bool {
        self.answered == self.total
    }

    /// Completion as a whole percentage.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.answered * 100) / self.total) as u8
    }
}

/// An answer sheet as read from TOML.
///
/// ```toml
/// [governance]
/// frameworks = ["EU AI Act"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet {
    sections: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl AnswerSheet {
    /// Parses a sheet from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Reads and parses a sheet from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read answer sheet: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse answer sheet: {}", path.display()))
    }

    /// Renders an empty sheet listing every prompt and its options.
    pub fn template(catalog: &Catalog) -> String {
        let mut output = String::new();

        output.push_str("# AI governance answer sheet\n");
        output.push_str("# Fill each list with the labels that apply; every question needs at least one.\n");

        for section in catalog.sections() {
            output.push_str(&format!("\n[{}]\n", section.key));
            for question in &section.questions {
                output.push_str(&format!("# {}\n", question.prompt));
                output.push_str(&format!(
                    "# Options: {}\n",
                    question
                        .options
                        .iter()
                        .map(|o| format!("\"{}\"", o))
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
                output.push_str(&format!("{} = []\n", question.key));
            }
        }

        output
    }
}
