//! Sequence alignment of section keys.
//!
//! Keys present in both revisions are split into *stationary* keys, which
//! keep their relative order (a longest common subsequence of the common
//! keys), and *moved* keys, which do not.

use std::collections::HashSet;

/// Split of the keys common to both sequences.
///
/// Every common key is in exactly one of `stationary` and `moved`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment<'a> {
    /// Longest common subsequence of the common keys, in order
    pub stationary: Vec<&'a str>,
    /// Common keys whose relative order changed
    pub moved: HashSet<&'a str>,
}

/// Align two key sequences. Neither sequence may repeat a key.
pub fn align<'a, K: AsRef<str>>(old_keys: &'a [K], new_keys: &'a [K]) -> Alignment<'a> {
    let old_set: HashSet<&str> = old_keys.iter().map(AsRef::as_ref).collect();
    let new_set: HashSet<&str> = new_keys.iter().map(AsRef::as_ref).collect();

    let common_old: Vec<&str> = old_keys
        .iter()
        .map(AsRef::as_ref)
        .filter(|k| new_set.contains(k))
        .collect();
    let common_new: Vec<&str> = new_keys
        .iter()
        .map(AsRef::as_ref)
        .filter(|k| old_set.contains(k))
        .collect();

    let stationary = lcs(&common_old, &common_new);
    let stationary_set: HashSet<&str> = stationary.iter().copied().collect();
    let moved = common_new
        .into_iter()
        .filter(|k| !stationary_set.contains(k))
        .collect();

    Alignment { stationary, moved }
}

/// Keys common to both sequences whose relative order changed.
pub fn moved_keys<'a, K: AsRef<str>>(old_keys: &'a [K], new_keys: &'a [K]) -> HashSet<&'a str> {
    align(old_keys, new_keys).moved
}

/// Keys common to both sequences that kept their relative order.
pub fn stationary_keys<'a, K: AsRef<str>>(old_keys: &'a [K], new_keys: &'a [K]) -> Vec<&'a str> {
    align(old_keys, new_keys).stationary
}

/// Longest common subsequence by dynamic programming over suffixes.
///
/// `table[i][j]` holds the LCS length of `a[i..]` and `b[j..]`. On a
/// mismatch the walk skips the element of `a` whenever that does not shorten
/// the result, so ties resolve the same way for the same input.
fn lcs<'a>(a: &[&'a str], b: &[&str]) -> Vec<&'a str> {
    let (n, m) = (a.len(), b.len());
    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i][j] = if a[i] == b[j] {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }

    let mut out = Vec::with_capacity(table[0][0]);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i] == b[j] {
            out.push(a[i]);
            i += 1;
            j += 1;
        } else if table[i + 1][j] >= table[i][j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }
    out
}
