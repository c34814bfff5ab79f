//! Revision comparison.
//!
//! Compares two revisions of a sectioned document and produces a structured
//! result: a classification of every section key (unchanged, added, removed
//! or moved) in one display order, plus line diffs for the metadata and for
//! each section's text.
//!
//! ## Entry point
//!
//! ```
//! use revcmp_core::diff::{compare_revisions, render_human_summary};
//! use revcmp_core::model::{Metadata, Revision, Section};
//! use revcmp_core::plugins::default_registry;
//! use serde_json::json;
//!
//! let old = Revision::new("r1", Metadata::new(), vec![
//!     Section::new("intro", "text", json!({"body": "Hello\n"})),
//! ]);
//! let new = Revision::new("r2", Metadata::new(), vec![
//!     Section::new("intro", "text", json!({"body": "Hello, world\n"})),
//! ]);
//!
//! let comparison = compare_revisions(&old, &new, &default_registry()).unwrap();
//! assert_eq!(comparison.summary().modified, 1);
//! let summary = render_human_summary(&comparison);
//! assert!(summary.contains("intro"));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical output.
//! - **Coverage**: every section key of either revision appears in the
//!   classification; a moved key appears twice, once per position.
//! - **Order**: filtering the classification to old-side entries yields the
//!   old key order, and likewise for the new side.

pub mod align;
pub mod classify;
pub mod engine;
pub mod human_summary;
pub mod model;
pub mod text;

pub use align::{align, moved_keys, stationary_keys, Alignment};
pub use classify::classify;
pub use engine::{compare_revisions, RevisionComparer};
pub use human_summary::render_human_summary;
pub use model::{
    ChangeType, ClassifiedEntry, ComparisonSummary, DiffResult, DiffStats, DiffType,
    RevisionComparison, SectionComparison,
};
pub use text::{diff_text, tokenize_hunks};
