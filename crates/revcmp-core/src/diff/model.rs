//! Revision comparison output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Enums serialize as snake_case strings.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{Revision, Section};

/// How one section entry changed between the two revisions.
///
/// A moved section yields two entries: a departure marker (`MovedUp` or
/// `MovedDown`) at its old position and an arrival marker (`MovedHere`) at its
/// new one. `MovedUp` means the arrival was emitted before the departure in
/// display order, `MovedDown` the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Unchanged,
    Added,
    Removed,
    MovedHere,
    MovedUp,
    MovedDown,
}

impl ChangeType {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeType::Unchanged => "unchanged",
            ChangeType::Added => "added",
            ChangeType::Removed => "removed",
            ChangeType::MovedHere => "moved_here",
            ChangeType::MovedUp => "moved_up",
            ChangeType::MovedDown => "moved_down",
        }
    }

    /// `MovedUp` or `MovedDown`
    pub fn is_departure(self) -> bool {
        matches!(self, ChangeType::MovedUp | ChangeType::MovedDown)
    }

    /// Whether an entry of this type stands for a position in the old revision
    pub fn in_old(self) -> bool {
        matches!(
            self,
            ChangeType::Unchanged
                | ChangeType::Removed
                | ChangeType::MovedUp
                | ChangeType::MovedDown
        )
    }

    /// Whether an entry of this type stands for a position in the new revision
    pub fn in_new(self) -> bool {
        matches!(
            self,
            ChangeType::Unchanged | ChangeType::Added | ChangeType::MovedHere
        )
    }

    /// Diff tag used for the entry's text diff
    pub fn diff_type(self) -> DiffType {
        match self {
            ChangeType::Added => DiffType::Add,
            ChangeType::Removed => DiffType::Delete,
            _ => DiffType::Modify,
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the interleaved classification list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedEntry {
    pub key: String,
    pub change_type: ChangeType,
}

impl ClassifiedEntry {
    pub fn new(key: impl Into<String>, change_type: ChangeType) -> Self {
        Self {
            key: key.into(),
            change_type,
        }
    }
}

/// Caller-supplied tag on a text diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffType {
    Add,
    Delete,
    Modify,
}

/// Role of a line inside a hunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Present on both sides
    Context,
    /// Present only on the new side
    Insert,
    /// Present only on the old side
    Delete,
}

/// A single line inside a hunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub kind: ChangeKind,
    /// Line text including its terminator, if it had one
    pub content: String,
    /// 1-based line number on the old side, absent for insertions
    #[serde(default)]
    pub old_line: Option<u32>,
    /// 1-based line number on the new side, absent for deletions
    #[serde(default)]
    pub new_line: Option<u32>,
}

/// A contiguous group of changes with its line ranges.
///
/// A start of `0` means the side has no lines at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunk {
    pub old_start: u32,
    pub old_lines: u32,
    pub new_start: u32,
    pub new_lines: u32,
    #[serde(default)]
    pub changes: Vec<Change>,
}

impl Hunk {
    /// Old-side text covered by this hunk
    pub fn old_text(&self) -> String {
        self.changes
            .iter()
            .filter(|c| c.kind != ChangeKind::Insert)
            .map(|c| c.content.as_str())
            .collect()
    }

    /// New-side text covered by this hunk
    pub fn new_text(&self) -> String {
        self.changes
            .iter()
            .filter(|c| c.kind != ChangeKind::Delete)
            .map(|c| c.content.as_str())
            .collect()
    }
}

/// Piece of a line for inline highlighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineToken {
    pub value: String,
    /// Whether this piece differs from the paired line on the other side
    pub emphasized: bool,
}

/// Inline tokens for one hunk line; concatenated values equal the line
/// without its terminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizedLine {
    pub kind: ChangeKind,
    pub tokens: Vec<InlineToken>,
}

/// Inline tokens for one hunk, aligned with `Hunk::changes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunkTokens {
    pub lines: Vec<TokenizedLine>,
}

/// Summary of inserted/deleted lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DiffStats {
    pub additions: u32,
    pub deletions: u32,
}

impl DiffStats {
    pub const ZERO: Self = Self {
        additions: 0,
        deletions: 0,
    };

    pub const fn new(additions: u32, deletions: u32) -> Self {
        Self {
            additions,
            deletions,
        }
    }

    pub const fn add(self, other: Self) -> Self {
        Self {
            additions: self.additions + other.additions,
            deletions: self.deletions + other.deletions,
        }
    }

    pub fn from_hunks(hunks: &[Hunk]) -> Self {
        hunks
            .iter()
            .flat_map(|h| h.changes.iter())
            .fold(Self::ZERO, |stats, change| match change.kind {
                ChangeKind::Insert => stats.add(Self::new(1, 0)),
                ChangeKind::Delete => stats.add(Self::new(0, 1)),
                ChangeKind::Context => stats,
            })
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Line diff of two texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffResult {
    pub diff_type: DiffType,
    #[serde(default)]
    pub hunks: Vec<Hunk>,
    /// Inline highlight data; `None` when disabled or tokenization failed
    #[serde(default)]
    pub tokens: Option<Vec<HunkTokens>>,
    #[serde(default)]
    pub stats: DiffStats,
}

/// Comparison of one classified section entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionComparison {
    /// `"{section_key}|{change_type}"`, distinct for both halves of a move
    pub key: String,
    /// `key` of the paired entry for a moved section, empty otherwise
    #[serde(default)]
    pub target_key: String,
    pub change_type: ChangeType,
    pub diff: DiffResult,
    pub old_section: Option<Section>,
    pub new_section: Option<Section>,
    pub section_type: String,
}

impl SectionComparison {
    /// Section key without the change-type suffix
    pub fn section_key(&self) -> &str {
        self.key
            .rsplit_once('|')
            .map(|(key, _)| key)
            .unwrap_or(&self.key)
    }

    pub fn is_linked(&self) -> bool {
        !self.target_key.is_empty()
    }
}

/// Composite key of a section comparison entry.
pub fn entry_key(section_key: &str, change_type: ChangeType) -> String {
    format!("{}|{}", section_key, change_type)
}

/// Full comparison of two revisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionComparison {
    pub old_revision: Revision,
    pub new_revision: Revision,
    pub metadata: DiffResult,
    pub sections: Vec<SectionComparison>,
}

/// Counts per change type plus aggregated line stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ComparisonSummary {
    pub unchanged: usize,
    pub modified: usize,
    pub added: usize,
    pub removed: usize,
    pub moved: usize,
    pub metadata_changed: bool,
    pub stats: DiffStats,
}

impl RevisionComparison {
    /// Look up an entry by its composite key
    pub fn entry(&self, key: &str) -> Option<&SectionComparison> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// The entry a moved entry is linked to
    pub fn target_of(&self, entry: &SectionComparison) -> Option<&SectionComparison> {
        if entry.is_linked() {
            self.entry(&entry.target_key)
        } else {
            None
        }
    }

    /// Whether nothing changed at all
    pub fn is_identical(&self) -> bool {
        self.metadata.stats.is_zero()
            && self
                .sections
                .iter()
                .all(|s| s.change_type == ChangeType::Unchanged && s.diff.stats.is_zero())
    }

    /// Roll-up counts. `modified` counts unchanged-position entries whose
    /// text differs; `moved` counts arrival markers.
    ///
    /// Both halves of a move hold the same diff, so line stats are taken
    /// from the arrival only.
    pub fn summary(&self) -> ComparisonSummary {
        let mut summary = ComparisonSummary {
            metadata_changed: !self.metadata.stats.is_zero(),
            stats: self.metadata.stats,
            ..ComparisonSummary::default()
        };
        for section in &self.sections {
            match section.change_type {
                ChangeType::Unchanged if section.diff.stats.is_zero() => summary.unchanged += 1,
                ChangeType::Unchanged => summary.modified += 1,
                ChangeType::Added => summary.added += 1,
                ChangeType::Removed => summary.removed += 1,
                ChangeType::MovedHere => summary.moved += 1,
                ChangeType::MovedUp | ChangeType::MovedDown => {}
            }
            if !section.change_type.is_departure() {
                summary.stats = summary.stats.add(section.diff.stats);
            }
        }
        summary
    }
}
