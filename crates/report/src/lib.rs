//! Markdown rendering of migration assessments.
//!
//! Two documents come out of a run: the full matrix, rewritten every time,
//! and a gap section that lives between sentinel markers inside a document
//! people also edit by hand.

mod config;
mod error;
mod gap;
mod group;
mod matrix;
mod merge;

pub use config::ReportConfig;
pub use error::{ReportError, Result};
pub use gap::render_gap_section;
pub use group::ROOT_GROUP_LABEL;
pub use matrix::render_matrix;
pub use merge::{merge_section, upsert_section, write_document, MergeOutcome};
