//! GovCheck - AI governance assessment engine
//!
//! Collects multi-select answers across the characterization, governance
//! and risk sections of a fixed questionnaire and derives compliance, risk
//! and action-plan reports from deterministic scoring rules.
//!
//! ```no_run
//! use govcheck::catalog::{options, Catalog, SectionKey};
//! use govcheck::models::ReportKind;
//! use govcheck::scoring::generate_report;
//! use govcheck::store::AnswerStore;
//! use std::sync::Arc;
//!
//! let mut store = AnswerStore::new(Arc::new(Catalog::standard()));
//! store.select(SectionKey::Governance, 1, options::EU_AI_ACT)?;
//! let report = generate_report(&store, ReportKind::Compliance);
//! println!("{}", report.title);
//! # Ok::<(), govcheck::error::AssessmentError>(())
//! ```

pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod scoring;
pub mod store;
