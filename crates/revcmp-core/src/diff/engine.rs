//! Revision comparison engine.
//!
//! The core entry point is [`RevisionComparer::compare`], which validates both
//! revisions, diffs their metadata, classifies their section keys and diffs
//! the text of every classified entry, then links the two halves of each
//! moved section.

use std::sync::Arc;

use serde_json::Value;

use crate::canonical;
use crate::config::CompareOptions;
use crate::diff::classify::classify;
use crate::diff::model::{
    entry_key, ChangeType, ClassifiedEntry, DiffType, RevisionComparison, SectionComparison,
};
use crate::diff::text::diff_text;
use crate::errors::{ExError, Result, RevcmpError};
use crate::model::{Revision, Section};
use crate::plugins::{PluginError, PluginResolver};
use crate::schema;
use crate::{log_op_end, log_op_error, log_op_start};
use revcmp_core_types::RequestContext;

/// Compares revisions using a plugin resolver and a fixed set of options.
///
/// Cheap to clone and safe to share across threads.
#[derive(Clone)]
pub struct RevisionComparer {
    resolver: Arc<dyn PluginResolver>,
    options: CompareOptions,
}

impl RevisionComparer {
    pub fn new(resolver: Arc<dyn PluginResolver>) -> Self {
        Self::with_options(resolver, CompareOptions::default())
    }

    pub fn with_options(resolver: Arc<dyn PluginResolver>, options: CompareOptions) -> Self {
        Self { resolver, options }
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Compare two revisions.
    ///
    /// # Errors
    ///
    /// - `DuplicateSectionKey`: a revision repeats a section key
    /// - `TooManySections`: a revision exceeds `max_sections`
    /// - `InvariantBroken`: the classifier reached an uncovered state
    pub fn compare(&self, old: &Revision, new: &Revision) -> Result<RevisionComparison> {
        self.compare_with_context(&RequestContext::new(), old, new)
    }

    /// Same as [`compare`](Self::compare), tagging log events with the
    /// caller's correlation ids.
    ///
    /// # Errors
    ///
    /// See [`compare`](Self::compare).
    pub fn compare_with_context(
        &self,
        ctx: &RequestContext,
        old: &Revision,
        new: &Revision,
    ) -> Result<RevisionComparison> {
        compare_impl(ctx, old, new, self.resolver.as_ref(), &self.options)
    }
}

impl std::fmt::Debug for RevisionComparer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevisionComparer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Compare two revisions with default options.
///
/// # Errors
///
/// See [`RevisionComparer::compare`].
pub fn compare_revisions(
    old: &Revision,
    new: &Revision,
    resolver: &dyn PluginResolver,
) -> Result<RevisionComparison> {
    compare_impl(
        &RequestContext::new(),
        old,
        new,
        resolver,
        &CompareOptions::default(),
    )
}

fn compare_impl(
    ctx: &RequestContext,
    old: &Revision,
    new: &Revision,
    resolver: &dyn PluginResolver,
    options: &CompareOptions,
) -> Result<RevisionComparison> {
    log_op_start!(
        "compare_revisions",
        request_id = ctx.request_id.as_str(),
        trace_id = ctx.trace_str(),
        old_revision = old.id.as_str(),
        new_revision = new.id.as_str(),
        old_sections = old.sections.len(),
        new_sections = new.sections.len()
    );
    let start = std::time::Instant::now();

    let result = build_comparison(old, new, resolver, options).map_err(|e| {
        log_op_error!(
            "compare_revisions",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "compare_revisions",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ctx.request_id.as_str(),
        entries = result.sections.len()
    );

    Ok(result)
}

fn build_comparison(
    old: &Revision,
    new: &Revision,
    resolver: &dyn PluginResolver,
    options: &CompareOptions,
) -> Result<RevisionComparison> {
    validate(old, options)?;
    validate(new, options)?;

    let metadata = diff_text(
        &old.metadata.canonical_text(&options.reference_key),
        &new.metadata.canonical_text(&options.reference_key),
        DiffType::Modify,
        options,
    );

    let entries = classify(&old.section_keys(), &new.section_keys())?;
    tracing::debug!(entries = entries.len(), "classified section keys");

    let mut sections: Vec<SectionComparison> = entries
        .iter()
        .map(|entry| compare_entry(entry, old, new, resolver, options))
        .collect();
    link_moves(&mut sections);

    Ok(RevisionComparison {
        old_revision: old.clone(),
        new_revision: new.clone(),
        metadata,
        sections,
    })
}

fn validate(revision: &Revision, options: &CompareOptions) -> Result<()> {
    if let Some(limit) = options.max_sections {
        let count = revision.sections.len();
        if count > limit {
            return Err(RevcmpError::TooManySections {
                revision_id: revision.id.clone(),
                count,
                limit,
            });
        }
    }
    revision.validate_unique_keys()
}

fn compare_entry(
    entry: &ClassifiedEntry,
    old: &Revision,
    new: &Revision,
    resolver: &dyn PluginResolver,
    options: &CompareOptions,
) -> SectionComparison {
    let old_section = match entry.change_type {
        ChangeType::Added => None,
        _ => old.section(&entry.key).cloned(),
    };
    let new_section = match entry.change_type {
        ChangeType::Removed => None,
        _ => new.section(&entry.key).cloned(),
    };
    let section_type = old_section
        .as_ref()
        .or(new_section.as_ref())
        .map(|s| s.section_type.clone())
        .unwrap_or_default();

    let old_text = section_text(old_section.as_ref(), resolver);
    let new_text = section_text(new_section.as_ref(), resolver);
    let diff = diff_text(&old_text, &new_text, entry.change_type.diff_type(), options);

    SectionComparison {
        key: entry_key(&entry.key, entry.change_type),
        target_key: String::new(),
        change_type: entry.change_type,
        diff,
        old_section,
        new_section,
        section_type,
    }
}

/// Text of a section for diffing: the plugin's rendering when available,
/// canonical JSON otherwise, empty for an absent section.
fn section_text(section: Option<&Section>, resolver: &dyn PluginResolver) -> String {
    let Some(section) = section else {
        return String::new();
    };
    let Some(content) = &section.content else {
        return canonical::to_canonical_text(&Value::Null);
    };

    match plugin_text(&section.section_type, content, resolver) {
        Ok(Some(text)) => text,
        Ok(None) => {
            tracing::debug!(
                section_key = %section.key,
                section_type = %section.section_type,
                "no text plugin, using canonical JSON"
            );
            canonical::to_canonical_text(content)
        }
        Err(err) => {
            let ex: ExError = err.clone().into();
            tracing::warn!(
                op = "resolve_section_text",
                event = schema::EVENT_FALLBACK,
                section_key = %section.key,
                section_type = %section.section_type,
                err_code = ex.code(),
                error = %err,
                "plugin failed, using canonical JSON"
            );
            canonical::to_canonical_text(content)
        }
    }
}

fn plugin_text(
    section_type: &str,
    content: &Value,
    resolver: &dyn PluginResolver,
) -> std::result::Result<Option<String>, PluginError> {
    let Some(plugin) = resolver.resolve(section_type)? else {
        return Ok(None);
    };
    match plugin.text_capability() {
        Some(capability) => capability.text_representation(content).map(Some),
        None => Ok(None),
    }
}

/// Pair each departure with the first arrival not yet linked.
///
/// Pairing is positional, not by key: with several moves in one comparison
/// a departure can be linked to another section's arrival.
fn link_moves(sections: &mut [SectionComparison]) {
    for departure in 0..sections.len() {
        if !sections[departure].change_type.is_departure() {
            continue;
        }
        let arrival = sections
            .iter()
            .position(|s| s.change_type == ChangeType::MovedHere && s.target_key.is_empty());
        if let Some(arrival) = arrival {
            sections[departure].target_key = sections[arrival].key.clone();
            sections[arrival].target_key = sections[departure].key.clone();
        }
    }
}
