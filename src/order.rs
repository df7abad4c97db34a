//! Stable numeric ordering of scanned entries.
//!
//! Entries are paired with the integer key extracted from their name, entries
//! without a key are dropped, and the remainder is stable-sorted ascending by
//! key so that entries sharing a key keep their discovery order. Ordering an
//! already-ordered sequence returns the same sequence.

use std::cmp::Ordering;
use std::path::PathBuf;

use rayon::prelude::*;

use crate::error::Result;
use crate::key::extract_key;
use crate::types::Entry;

/// An entry paired with its extracted numeric key, alive only between
/// extraction and the sort.
#[derive(Debug, Clone)]
pub struct SortableEntry {
    pub key: u64,
    pub entry: Entry,
}

/// Pairs each entry with its numeric key, dropping entries whose names
/// contain no digits.
///
/// Key overflow is propagated as an error rather than treated as a skip.
pub fn make_sortable(entries: Vec<Entry>) -> Result<Vec<SortableEntry>> {
    let mut sortable = Vec::with_capacity(entries.len());

    for entry in entries {
        match extract_key(&entry.name)? {
            Some(key) => sortable.push(SortableEntry { key, entry }),
            None => {
                log::debug!("Skipping '{}' (no numeric key in name)", entry.name);
            }
        }
    }

    Ok(sortable)
}

/// Orders entries ascending by numeric key.
///
/// The sort is stable, so ties keep discovery order, and the operation is
/// idempotent: `order(order(xs)) == order(xs)`.
pub fn order(entries: Vec<Entry>) -> Result<Vec<Entry>> {
    let mut sortable = make_sortable(entries)?;
    // par_sort_by_key is a stable sort, like its std counterpart.
    sortable.par_sort_by_key(|s| s.key);
    Ok(sortable.into_iter().map(|s| s.entry).collect())
}

/// Orders entries with a caller-supplied path comparator.
///
/// The keyless filter still applies, so digitless names never reach the
/// output even under a custom sort.
pub fn order_with<F>(entries: Vec<Entry>, comparator: &F) -> Result<Vec<Entry>>
where
    F: Fn(&PathBuf, &PathBuf) -> Ordering + Sync + ?Sized,
{
    let mut sortable = make_sortable(entries)?;
    sortable.par_sort_by(|a, b| comparator(&a.entry.path, &b.entry.path));
    Ok(sortable.into_iter().map(|s| s.entry).collect())
}
