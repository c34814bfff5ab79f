//! Two-pointer change classification over section keys.
//!
//! The walk keeps one cursor into each key sequence and emits entries in
//! display order. Rules are tried in a fixed priority; the first match emits
//! one entry and advances one or both cursors:
//!
//! 1. same key under both cursors: `Unchanged`, advance both
//! 2. new key unknown to the old revision: `Added`
//! 3. old key unknown to the new revision: `Removed`
//! 4. new key is moved: `MovedHere` (arrival)
//! 5. old key is moved: `MovedUp` if its arrival was already emitted,
//!    otherwise `MovedDown` (departure)
//!
//! Falling through every rule is an internal invariant violation.

use std::collections::HashSet;

use crate::diff::align::align;
use crate::diff::model::{ChangeType, ClassifiedEntry};
use crate::errors::{Result, RevcmpError};

/// Classify every key of both sequences.
///
/// Keys common to both sequences appear once (`Unchanged`) or, when moved,
/// twice (departure and arrival). Neither sequence may repeat a key.
///
/// # Errors
///
/// `InvariantBroken` if no rule applies, which only happens when a sequence
/// repeats a key.
pub fn classify<K: AsRef<str>>(old_keys: &[K], new_keys: &[K]) -> Result<Vec<ClassifiedEntry>> {
    let mut walk = Walk::new(old_keys, new_keys);
    while !walk.is_done() {
        walk.step()?;
    }
    Ok(walk.finish())
}

/// Explicit state of the classification walk.
struct Walk<'a> {
    old: Vec<&'a str>,
    new: Vec<&'a str>,
    old_set: HashSet<&'a str>,
    new_set: HashSet<&'a str>,
    moved: HashSet<&'a str>,
    processed: HashSet<&'a str>,
    i: usize,
    j: usize,
    out: Vec<ClassifiedEntry>,
}

impl<'a> Walk<'a> {
    fn new<K: AsRef<str>>(old_keys: &'a [K], new_keys: &'a [K]) -> Self {
        let old: Vec<&str> = old_keys.iter().map(AsRef::as_ref).collect();
        let new: Vec<&str> = new_keys.iter().map(AsRef::as_ref).collect();
        let moved = align(old_keys, new_keys).moved;
        Self {
            old_set: old.iter().copied().collect(),
            new_set: new.iter().copied().collect(),
            processed: HashSet::with_capacity(old.len() + new.len()),
            out: Vec::with_capacity(old.len() + new.len()),
            old,
            new,
            moved,
            i: 0,
            j: 0,
        }
    }

    fn is_done(&self) -> bool {
        self.i >= self.old.len() && self.j >= self.new.len()
    }

    fn step(&mut self) -> Result<()> {
        let o = self.old.get(self.i).copied();
        let n = self.new.get(self.j).copied();

        match (o, n) {
            (Some(o), Some(n)) if o == n => {
                self.i += 1;
                self.j += 1;
                self.emit(o, ChangeType::Unchanged);
            }
            (_, Some(n)) if !self.old_set.contains(n) => {
                self.j += 1;
                self.emit(n, ChangeType::Added);
            }
            (Some(o), _) if !self.new_set.contains(o) => {
                self.i += 1;
                self.emit(o, ChangeType::Removed);
            }
            (_, Some(n)) if self.moved.contains(n) => {
                self.j += 1;
                self.emit(n, ChangeType::MovedHere);
            }
            (Some(o), _) if self.moved.contains(o) => {
                self.i += 1;
                let change_type = if self.processed.contains(o) {
                    ChangeType::MovedUp
                } else {
                    ChangeType::MovedDown
                };
                self.emit(o, change_type);
            }
            _ => {
                return Err(RevcmpError::InvariantBroken {
                    old_index: self.i,
                    new_index: self.j,
                    old_key: o.map(String::from),
                    new_key: n.map(String::from),
                });
            }
        }
        Ok(())
    }

    fn emit(&mut self, key: &'a str, change_type: ChangeType) {
        self.out.push(ClassifiedEntry::new(key, change_type));
        self.processed.insert(key);
    }

    fn finish(self) -> Vec<ClassifiedEntry> {
        self.out
    }
}
