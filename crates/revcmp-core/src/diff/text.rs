//! Line-level text diffing with inline word highlights.
//!
//! Differing texts get a Myers line diff with unlimited context: one hunk
//! holding every line of both sides. Identical non-empty texts get a
//! pseudo-hunk of context lines so renderers still show the full content.
//! Two empty texts produce no hunks.

use similar::{utils::diff_words, Algorithm, ChangeTag, TextDiff};

use crate::config::CompareOptions;
use crate::diff::model::{
    Change, ChangeKind, DiffResult, DiffStats, DiffType, Hunk, HunkTokens, InlineToken,
    TokenizedLine,
};
use crate::errors::{ExError, TokenizeError};
use crate::schema;

/// Diff two texts.
///
/// Never fails: if inline tokenization fails, `tokens` is `None` and the
/// hunks are still returned.
pub fn diff_text(
    old: &str,
    new: &str,
    diff_type: DiffType,
    options: &CompareOptions,
) -> DiffResult {
    let hunks = if old != new {
        vec![line_diff_hunk(old, new)]
    } else if !old.is_empty() {
        vec![pseudo_hunk(old)]
    } else {
        Vec::new()
    };

    let tokens = if options.inline_tokens {
        match tokenize_hunks(&hunks, options.max_inline_line_len) {
            Ok(tokens) => Some(tokens),
            Err(err) => {
                let ex: ExError = err.clone().into();
                tracing::warn!(
                    op = "tokenize_hunks",
                    event = schema::EVENT_FALLBACK,
                    err_code = ex.code(),
                    error = %err,
                    "inline tokens dropped"
                );
                None
            }
        }
    } else {
        None
    };

    let stats = DiffStats::from_hunks(&hunks);
    DiffResult {
        diff_type,
        hunks,
        tokens,
        stats,
    }
}

fn line_no(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn hunk_from_changes(changes: Vec<Change>) -> Hunk {
    let old_lines = count(changes.iter().filter(|c| c.kind != ChangeKind::Insert).count());
    let new_lines = count(changes.iter().filter(|c| c.kind != ChangeKind::Delete).count());
    Hunk {
        old_start: u32::from(old_lines > 0),
        old_lines,
        new_start: u32::from(new_lines > 0),
        new_lines,
        changes,
    }
}

fn line_diff_hunk(old: &str, new: &str) -> Hunk {
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_lines(old, new);

    let changes = diff
        .iter_all_changes()
        .map(|change| Change {
            kind: match change.tag() {
                ChangeTag::Equal => ChangeKind::Context,
                ChangeTag::Insert => ChangeKind::Insert,
                ChangeTag::Delete => ChangeKind::Delete,
            },
            content: change.value().to_string(),
            old_line: change.old_index().map(line_no),
            new_line: change.new_index().map(line_no),
        })
        .collect();

    hunk_from_changes(changes)
}

fn pseudo_hunk(text: &str) -> Hunk {
    let changes = text
        .split_inclusive('\n')
        .enumerate()
        .map(|(index, line)| Change {
            kind: ChangeKind::Context,
            content: line.to_string(),
            old_line: Some(line_no(index)),
            new_line: Some(line_no(index)),
        })
        .collect();
    hunk_from_changes(changes)
}

fn strip_eol(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => line,
    }
}

/// Word-level highlight data for each hunk line.
///
/// Runs of deleted lines directly followed by inserted lines are paired up
/// line by line and word-diffed; every other line becomes a single plain
/// token.
///
/// # Errors
///
/// `LineTooLong` if a paired line is longer than `max_line_len` bytes.
pub fn tokenize_hunks(
    hunks: &[Hunk],
    max_line_len: usize,
) -> Result<Vec<HunkTokens>, TokenizeError> {
    hunks
        .iter()
        .map(|hunk| tokenize_hunk(hunk, max_line_len))
        .collect()
}

fn tokenize_hunk(hunk: &Hunk, max_line_len: usize) -> Result<HunkTokens, TokenizeError> {
    let changes = &hunk.changes;
    let mut lines = Vec::with_capacity(changes.len());
    let mut idx = 0;

    while idx < changes.len() {
        if changes[idx].kind != ChangeKind::Delete {
            lines.push(plain_line(&changes[idx]));
            idx += 1;
            continue;
        }

        let del_start = idx;
        while idx < changes.len() && changes[idx].kind == ChangeKind::Delete {
            idx += 1;
        }
        let ins_start = idx;
        while idx < changes.len() && changes[idx].kind == ChangeKind::Insert {
            idx += 1;
        }
        let deleted = &changes[del_start..ins_start];
        let inserted = &changes[ins_start..idx];

        let mut old_side = Vec::with_capacity(deleted.len());
        let mut new_side = Vec::with_capacity(inserted.len());
        for (k, del) in deleted.iter().enumerate() {
            match inserted.get(k) {
                Some(ins) => {
                    let (old_line, new_line) = word_pair(del, ins, max_line_len)?;
                    old_side.push(old_line);
                    new_side.push(new_line);
                }
                None => old_side.push(plain_line(del)),
            }
        }
        new_side.extend(inserted.iter().skip(deleted.len()).map(plain_line));

        lines.extend(old_side);
        lines.extend(new_side);
    }

    Ok(HunkTokens { lines })
}

fn plain_line(change: &Change) -> TokenizedLine {
    let text = strip_eol(&change.content);
    let tokens = if text.is_empty() {
        Vec::new()
    } else {
        vec![InlineToken {
            value: text.to_string(),
            emphasized: false,
        }]
    };
    TokenizedLine {
        kind: change.kind,
        tokens,
    }
}

fn check_len(change: &Change, max_line_len: usize) -> Result<(), TokenizeError> {
    let len = strip_eol(&change.content).len();
    if len > max_line_len {
        return Err(TokenizeError::LineTooLong {
            line: change.old_line.or(change.new_line).unwrap_or(0),
            len,
            limit: max_line_len,
        });
    }
    Ok(())
}

fn word_pair(
    del: &Change,
    ins: &Change,
    max_line_len: usize,
) -> Result<(TokenizedLine, TokenizedLine), TokenizeError> {
    check_len(del, max_line_len)?;
    check_len(ins, max_line_len)?;

    let mut old_tokens = Vec::new();
    let mut new_tokens = Vec::new();
    for (tag, piece) in diff_words(
        Algorithm::Myers,
        strip_eol(&del.content),
        strip_eol(&ins.content),
    ) {
        match tag {
            ChangeTag::Equal => {
                push_token(&mut old_tokens, piece, false);
                push_token(&mut new_tokens, piece, false);
            }
            ChangeTag::Delete => push_token(&mut old_tokens, piece, true),
            ChangeTag::Insert => push_token(&mut new_tokens, piece, true),
        }
    }

    Ok((
        TokenizedLine {
            kind: ChangeKind::Delete,
            tokens: old_tokens,
        },
        TokenizedLine {
            kind: ChangeKind::Insert,
            tokens: new_tokens,
        },
    ))
}

/// Append `piece`, merging it into the last token when emphasis matches.
fn push_token(tokens: &mut Vec<InlineToken>, piece: &str, emphasized: bool) {
    if piece.is_empty() {
        return;
    }
    match tokens.last_mut() {
        Some(last) if last.emphasized == emphasized => last.value.push_str(piece),
        _ => tokens.push(InlineToken {
            value: piece.to_string(),
            emphasized,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> CompareOptions {
        CompareOptions::default()
    }

    fn kinds(hunk: &Hunk) -> Vec<ChangeKind> {
        hunk.changes.iter().map(|c| c.kind).collect()
    }

    #[test]
    fn test_empty_texts_have_no_hunks() {
        let result = diff_text("", "", DiffType::Modify, &opts());
        assert!(result.hunks.is_empty());
        assert_eq!(result.tokens, Some(Vec::new()));
        assert!(result.stats.is_zero());
    }

    #[test]
    fn test_identical_text_yields_pseudo_hunk() {
        let result = diff_text("one\ntwo\nthree", "one\ntwo\nthree", DiffType::Modify, &opts());
        assert_eq!(result.hunks.len(), 1);
        let hunk = &result.hunks[0];
        assert_eq!((hunk.old_start, hunk.old_lines), (1, 3));
        assert_eq!((hunk.new_start, hunk.new_lines), (1, 3));
        for (index, change) in hunk.changes.iter().enumerate() {
            assert_eq!(change.kind, ChangeKind::Context);
            assert_eq!(change.old_line, Some(index as u32 + 1));
            assert_eq!(change.old_line, change.new_line);
        }
        assert_eq!(hunk.changes[2].content, "three");
    }

    #[test]
    fn test_modified_line_single_hunk_with_full_context() {
        let old = "a\nb\nc\nd\ne\nf\ng\nh\n";
        let new = "a\nb\nc\nd\nE\nf\ng\nh\n";
        let result = diff_text(old, new, DiffType::Modify, &opts());
        assert_eq!(result.hunks.len(), 1);
        let hunk = &result.hunks[0];
        assert_eq!(hunk.changes.len(), 9);
        assert_eq!(hunk.changes[4].kind, ChangeKind::Delete);
        assert_eq!(hunk.changes[4].old_line, Some(5));
        assert_eq!(hunk.changes[4].new_line, None);
        assert_eq!(hunk.changes[5].kind, ChangeKind::Insert);
        assert_eq!(hunk.changes[5].new_line, Some(5));
        assert_eq!(hunk.old_text(), old);
        assert_eq!(hunk.new_text(), new);
        assert_eq!(result.stats, DiffStats::new(1, 1));
    }

    #[test]
    fn test_added_text_starts_from_empty_old_side() {
        let result = diff_text("", "x\ny\n", DiffType::Add, &opts());
        let hunk = &result.hunks[0];
        assert_eq!((hunk.old_start, hunk.old_lines), (0, 0));
        assert_eq!((hunk.new_start, hunk.new_lines), (1, 2));
        assert_eq!(kinds(hunk), vec![ChangeKind::Insert, ChangeKind::Insert]);
        assert_eq!(result.diff_type, DiffType::Add);
    }

    #[test]
    fn test_deleted_text() {
        let result = diff_text("x\n", "", DiffType::Delete, &opts());
        let hunk = &result.hunks[0];
        assert_eq!((hunk.new_start, hunk.new_lines), (0, 0));
        assert_eq!(kinds(hunk), vec![ChangeKind::Delete]);
    }

    #[test]
    fn test_word_tokens_emphasize_changed_words() {
        let result = diff_text(
            "the quick fox\n",
            "the slow fox\n",
            DiffType::Modify,
            &opts(),
        );
        let tokens = result.tokens.expect("tokens");
        let lines = &tokens[0].lines;
        assert_eq!(lines.len(), 2);

        let old_emph: Vec<&str> = lines[0]
            .tokens
            .iter()
            .filter(|t| t.emphasized)
            .map(|t| t.value.as_str())
            .collect();
        let new_emph: Vec<&str> = lines[1]
            .tokens
            .iter()
            .filter(|t| t.emphasized)
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(old_emph, vec!["quick"]);
        assert_eq!(new_emph, vec!["slow"]);

        let rebuilt: String = lines[1].tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(rebuilt, "the slow fox");
    }

    #[test]
    fn test_unpaired_insert_is_plain() {
        let result = diff_text("a\n", "a\nb\n", DiffType::Modify, &opts());
        let tokens = result.tokens.expect("tokens");
        let last = tokens[0].lines.last().unwrap();
        assert_eq!(last.kind, ChangeKind::Insert);
        assert_eq!(last.tokens.len(), 1);
        assert!(!last.tokens[0].emphasized);
    }

    #[test]
    fn test_tokenization_failure_keeps_hunks() {
        let options = CompareOptions {
            max_inline_line_len: 4,
            ..CompareOptions::default()
        };
        let result = diff_text("short\n", "longer line\n", DiffType::Modify, &options);
        assert!(result.tokens.is_none());
        assert_eq!(result.hunks.len(), 1);
        assert_eq!(result.stats, DiffStats::new(1, 1));
    }

    #[test]
    fn test_tokens_disabled_by_option() {
        let options = CompareOptions {
            inline_tokens: false,
            ..CompareOptions::default()
        };
        let result = diff_text("a\n", "b\n", DiffType::Modify, &options);
        assert!(result.tokens.is_none());
    }

    #[test]
    fn test_tokens_align_with_changes() {
        let result = diff_text("a\nb\nc\n", "a\nB\nC\nd\n", DiffType::Modify, &opts());
        let tokens = result.tokens.expect("tokens");
        let hunk_kinds = kinds(&result.hunks[0]);
        let token_kinds: Vec<ChangeKind> = tokens[0].lines.iter().map(|l| l.kind).collect();
        assert_eq!(hunk_kinds, token_kinds);
    }
}
