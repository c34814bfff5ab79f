//! Revcmp Core - structural comparison of document revisions
//!
//! This crate compares two revisions of a document made of uniquely keyed
//! sections plus a metadata record, including:
//! - Section key alignment and move detection (LCS over common keys)
//! - Change classification in a single interleaved display order
//! - Myers line diffs with inline word highlights
//! - Section-type plugins that render content as diffable text
//! - Structured error and logging facilities

pub mod canonical;
pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod plugins;

pub use revcmp_core_types::schema;

// Re-export commonly used types
pub use config::CompareOptions;
pub use diff::{compare_revisions, RevisionComparer, RevisionComparison};
pub use errors::{ExError, ExErrorKind, Result, RevcmpError, TokenizeError};
pub use model::{Metadata, Revision, Section};
pub use plugins::{
    default_registry, PluginError, PluginRegistry, PluginResolver, PluginResult, SectionPlugin,
    TextRepresentation,
};
