//! Human-readable summary renderer for revision comparisons.

use crate::diff::model::{ChangeType, RevisionComparison, SectionComparison};

/// Render a Markdown summary of a [`RevisionComparison`].
///
/// The summary is intended for review workflows. It is informational only
/// and does not affect the structured comparison.
pub fn render_human_summary(comparison: &RevisionComparison) -> String {
    let mut out = String::new();

    out.push_str("## Revision Comparison\n\n");
    out.push_str(&format!(
        "**Old**: `{}`  \n**New**: `{}`\n\n",
        comparison.old_revision.id, comparison.new_revision.id
    ));

    if comparison.is_identical() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    let summary = comparison.summary();
    out.push_str("### Totals\n\n");
    out.push_str("| Unchanged | Modified | Added | Removed | Moved | Lines |\n");
    out.push_str("|---|---|---|---|---|---|\n");
    out.push_str(&format!(
        "| {} | {} | {} | {} | {} | +{} -{} |\n\n",
        summary.unchanged,
        summary.modified,
        summary.added,
        summary.removed,
        summary.moved,
        summary.stats.additions,
        summary.stats.deletions,
    ));

    if summary.metadata_changed {
        out.push_str(&format!(
            "### Metadata\n\n- changed (+{} -{})\n\n",
            comparison.metadata.stats.additions, comparison.metadata.stats.deletions
        ));
    }

    let changed: Vec<&SectionComparison> = comparison
        .sections
        .iter()
        .filter(|s| s.change_type != ChangeType::Unchanged || !s.diff.stats.is_zero())
        .collect();
    if !changed.is_empty() {
        out.push_str("### Sections\n\n");
        for section in changed {
            out.push_str(&section_line(section));
        }
    }

    out
}

fn section_line(section: &SectionComparison) -> String {
    let label = match section.change_type {
        ChangeType::Unchanged => "modified",
        other => other.as_str(),
    };
    let mut line = format!(
        "- `{}` ({}) **{}**",
        section.section_key(),
        section.section_type,
        label
    );
    if section.is_linked() {
        line.push_str(&format!(" -> `{}`", section.target_key));
    }
    let stats = section.diff.stats;
    if !stats.is_zero() && !section.change_type.is_departure() {
        line.push_str(&format!(" +{} -{}", stats.additions, stats.deletions));
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::engine::compare_revisions;
    use crate::model::{Metadata, Revision, Section};
    use crate::plugins::default_registry;
    use serde_json::json;

    fn rev(id: &str, meta: Metadata, sections: &[(&str, &str)]) -> Revision {
        let sections = sections
            .iter()
            .map(|(k, body)| Section::new(*k, "text", json!({ "body": body })))
            .collect();
        Revision::new(id, meta, sections)
    }

    #[test]
    fn test_identical_revisions() {
        let old = rev("r1", Metadata::new(), &[("a", "x\n")]);
        let new = rev("r2", Metadata::new(), &[("a", "x\n")]);
        let comparison = compare_revisions(&old, &new, &default_registry()).unwrap();
        let text = render_human_summary(&comparison);
        assert!(text.contains("`r1`"));
        assert!(text.contains("_No changes detected._"));
        assert!(!text.contains("### Sections"));
    }

    #[test]
    fn test_lists_changed_sections() {
        let old = rev(
            "r1",
            Metadata::new().with("title", json!("Draft")),
            &[("a", "x\n"), ("b", "y\n"), ("gone", "z\n")],
        );
        let new = rev(
            "r2",
            Metadata::new().with("title", json!("Final")),
            &[("b", "Y\n"), ("a", "x\n"), ("fresh", "w\n")],
        );
        let comparison = compare_revisions(&old, &new, &default_registry()).unwrap();
        let text = render_human_summary(&comparison);

        assert!(text.contains("### Metadata"));
        assert!(text.contains("- `b` (text) **modified** +1 -1"));
        assert!(text.contains("- `a` (text) **moved_down** -> `a|moved_here`"));
        assert!(text.contains("- `fresh` (text) **added** +1 -0"));
        assert!(text.contains("- `gone` (text) **removed** +0 -1"));
    }

    #[test]
    fn test_edited_move_counted_once() {
        let old = rev("r1", Metadata::new(), &[("a", "one\n"), ("b", "two\n")]);
        let new = rev("r2", Metadata::new(), &[("b", "two\n"), ("a", "ONE\n")]);
        let comparison = compare_revisions(&old, &new, &default_registry()).unwrap();
        let text = render_human_summary(&comparison);

        assert!(text.contains("| 1 | 0 | 0 | 0 | 1 | +1 -1 |"));
        assert!(text.contains("- `a` (text) **moved_down** -> `a|moved_here`\n"));
        assert!(text.contains("- `a` (text) **moved_here** -> `a|moved_down` +1 -1\n"));
    }
}
