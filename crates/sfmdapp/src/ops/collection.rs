//! Generic collection operations.
//!
//! Everything here works on a plain `Vec<R>` plus a key extraction function,
//! so the same code serves every collection of every document kind. The
//! document layer hands in the contiguous run of records extracted with
//! [`Element::with_collection`](crate::xml::element::Element::with_collection).

use super::filter::Predicate;
use crate::error::{MdError, Result};
use std::fmt::Display;

/// What a delete should do when nothing matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroMatch {
    Error,
    Allow,
}

/// Appends `record` unless a record with the same key is already present.
pub fn add<R, K, F>(items: &mut Vec<R>, record: R, key_of: F) -> Result<()>
where
    K: PartialEq + Display,
    F: Fn(&R) -> K,
{
    let key = key_of(&record);
    if items.iter().any(|existing| key_of(existing) == key) {
        return Err(MdError::already_exists(key.to_string()));
    }
    items.push(record);
    Ok(())
}

/// Appends without a key check, for collections that allow repeats.
pub fn add_unchecked<R>(items: &mut Vec<R>, record: R) {
    items.push(record);
}

/// Removes every record matching `pred` and returns how many were removed.
pub fn delete<R>(items: &mut Vec<R>, pred: impl Predicate<R>) -> usize {
    let before = items.len();
    items.retain(|r| !pred.matches(r));
    before - items.len()
}

/// [`delete`] with an explicit policy for the zero-match case.
pub fn delete_matching<R>(
    items: &mut Vec<R>,
    pred: impl Predicate<R>,
    zero: ZeroMatch,
    what: impl Display,
) -> Result<usize> {
    let removed = delete(items, pred);
    if removed == 0 && zero == ZeroMatch::Error {
        return Err(MdError::not_found(what.to_string()));
    }
    Ok(removed)
}

/// Applies `merge` to the record(s) whose key equals `key`.
pub fn update<R, K, F>(items: &mut [R], key: &K, key_of: F, mut merge: impl FnMut(&mut R)) -> Result<()>
where
    K: PartialEq + Display,
    F: Fn(&R) -> K,
{
    let mut found = false;
    for item in items.iter_mut().filter(|r| key_of(r) == *key) {
        merge(item);
        found = true;
    }
    if !found {
        return Err(MdError::not_found(key.to_string()));
    }
    Ok(())
}

/// Lazy, restartable view over the records that satisfy every predicate.
pub struct Filtered<'a, R, P> {
    items: std::slice::Iter<'a, R>,
    preds: Vec<P>,
}

impl<R, P: Clone> Clone for Filtered<'_, R, P> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            preds: self.preds.clone(),
        }
    }
}

impl<'a, R, P: Predicate<R>> Iterator for Filtered<'a, R, P> {
    type Item = &'a R;

    fn next(&mut self) -> Option<Self::Item> {
        let preds = &self.preds;
        self.items.find(|r| preds.iter().all(|p| p.matches(r)))
    }
}

pub fn filter<R, P: Predicate<R>>(items: &[R], preds: Vec<P>) -> Filtered<'_, R, P> {
    Filtered {
        items: items.iter(),
        preds,
    }
}

/// Copies every record keyed `src` under `dest`, then re-sorts by key.
pub fn clone_record<R, K, F>(
    items: &mut Vec<R>,
    src: &K,
    dest: &K,
    key_of: F,
    rekey: impl Fn(&mut R, &K),
) -> Result<()>
where
    R: Clone,
    K: Ord + Display,
    F: Fn(&R) -> K,
{
    let mut clones: Vec<R> = items.iter().filter(|r| key_of(r) == *src).cloned().collect();
    if clones.is_empty() {
        return Err(MdError::not_found(src.to_string()));
    }
    if items.iter().any(|r| key_of(r) == *dest) {
        return Err(MdError::already_exists(dest.to_string()));
    }
    for clone in &mut clones {
        rekey(clone, dest);
    }
    items.append(&mut clones);
    items.sort_by_cached_key(|r| key_of(r));
    Ok(())
}

/// Restores matching records to their default shape in place.
pub fn reset<R>(items: &mut [R], pred: impl Predicate<R>, mut reset_fn: impl FnMut(&mut R)) -> usize {
    let mut count = 0;
    for item in items.iter_mut().filter(|r| pred.matches(r)) {
        reset_fn(item);
        count += 1;
    }
    count
}

/// Stable sort by key, optionally dropping exact duplicates.
pub fn sort_canonical<R, K, F>(items: &mut Vec<R>, key_of: F, dedup: bool)
where
    R: PartialEq,
    K: Ord,
    F: Fn(&R) -> K,
{
    items.sort_by_cached_key(|r| key_of(r));
    if !dedup {
        return;
    }
    // Exact duplicates share a key, so only the current run of equal keys
    // needs checking.
    let mut kept: Vec<R> = Vec::with_capacity(items.len());
    let mut run_start = 0;
    for item in items.drain(..) {
        let key = key_of(&item);
        if kept.last().map_or(true, |last| key_of(last) != key) {
            run_start = kept.len();
        }
        if !kept[run_start..].contains(&item) {
            kept.push(item);
        }
    }
    *items = kept;
}

/// Drops exact duplicates, keeping the first occurrence and the original order.
pub fn dedup_preserving_order<R: PartialEq>(items: &mut Vec<R>) {
    let mut kept: Vec<R> = Vec::with_capacity(items.len());
    for item in items.drain(..) {
        if !kept.contains(&item) {
            kept.push(item);
        }
    }
    *items = kept;
}
