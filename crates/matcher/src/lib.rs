//! # portmap matcher
//!
//! Correlates each source declaration with same-named target declarations and
//! classifies its migration status.
//!
//! ```text
//! SourceDeclaration ──> candidates (same name) ──> ScoringRules::best_match
//!                                                    └─> Classifier ──> Status
//! ```
//!
//! Scoring is a name/package heuristic: with several same-named types in
//! unrelated packages it can pick a plausible but wrong one.

mod assess;
mod classify;
mod scoring;

pub use assess::Matcher;
pub use classify::{Classifier, ClassifierRules, PLACEHOLDER_MARKER, UNSUPPORTED_NAMES};
pub use scoring::{MatchScore, ScoreRule, ScoringRules};
