//! Query and aggregation primitives over lists of shared documents.
//!
//! Every function here works on [Doc] handles and never copies document
//! storage. Value comparisons go through [crate::common::compare].

use crate::collection::{Doc, List};
use crate::common::{compare, order, Column, Value};
use crate::errors::KestrelResult;
use std::cmp::Ordering;
use std::sync::Arc;

/// Scans `list` in order and returns the selected documents together with
/// their positions in `list`.
///
/// The predicate returns `(matched, stop)`:
/// - `(false, false)` skips the document,
/// - `(false, true)` ends the scan without selecting it,
/// - `(true, false)` selects it and continues,
/// - `(true, true)` selects it and ends the scan.
///
/// A positive `limit` also ends the scan once that many documents are
/// selected. Zero or a negative limit means no limit.
///
/// ```rust
/// use std::sync::Arc;
/// use kestrel::collection::select;
/// use kestrel::{doc, val};
///
/// let list = vec![Arc::new(doc!{ a: 1 }), Arc::new(doc!{ a: 2 }), Arc::new(doc!{ a: 3 })];
/// let (selected, positions) = select(&list, 0, |d| (d.get("a") != val!(2), false));
/// assert_eq!(selected.len(), 2);
/// assert_eq!(positions, vec![0, 2]);
/// ```
pub fn select<F>(list: &[Doc], limit: i64, mut predicate: F) -> (List, Vec<usize>)
where
    F: FnMut(&Doc) -> (bool, bool),
{
    let result = try_select(list, limit, |doc| Ok(predicate(doc)));
    // an infallible predicate cannot produce an error
    result.unwrap_or_default()
}

/// Fallible form of [select]; the first predicate error aborts the scan.
pub fn try_select<F>(list: &[Doc], limit: i64, mut predicate: F) -> KestrelResult<(List, Vec<usize>)>
where
    F: FnMut(&Doc) -> KestrelResult<(bool, bool)>,
{
    let mut selected = Vec::with_capacity(list.len());
    let mut positions = Vec::with_capacity(list.len());

    for (position, doc) in list.iter().enumerate() {
        let (matched, stop) = predicate(doc)?;
        if !matched {
            if stop {
                break;
            }
            continue;
        }

        selected.push(doc.clone());
        positions.push(position);

        if stop || (limit > 0 && selected.len() as i64 >= limit) {
            break;
        }
    }

    Ok((selected, positions))
}

/// Sorts `list` in place by the value at `path`, ascending unless
/// `reverse`. The sort is stable: documents with equal values keep their
/// relative order in both directions.
pub fn sort(list: &mut [Doc], path: &str, reverse: bool) {
    list.sort_by(|a, b| {
        let ordering = compare(a.lookup(path), b.lookup(path));
        if reverse {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

/// Stable sort by a compound key, see [crate::common::order].
pub fn sort_by_columns(list: &mut [Doc], columns: &[Column]) {
    list.sort_by(|a, b| order(a, b, columns));
}

/// Gathers the value at `path` from every document.
///
/// With `compact`, [Value::Missing] results are dropped. With `distinct`,
/// the values are sorted and equal neighbours collapsed, so the result is
/// ascending and free of duplicates.
pub fn collect(list: &[Doc], path: &str, compact: bool, distinct: bool) -> Vec<Value> {
    let mut values: Vec<Value> = list
        .iter()
        .map(|doc| doc.lookup(path))
        .filter(|value| !(compact && value.is_missing()))
        .cloned()
        .collect();

    if distinct {
        values.sort_by(compare);
        values.dedup_by(|a, b| compare(a, b) == Ordering::Equal);
    }
    values
}

/// Returns the documents of `a` that are not in `b`.
///
/// `b` must be a subsequence of `a`: same handles, same relative order,
/// as produced by [select] over `a`. This is not checked; a `b` that
/// breaks the contract yields an unspecified result.
pub fn difference(a: &[Doc], b: &[Doc]) -> List {
    let mut result = Vec::with_capacity(a.len().saturating_sub(b.len()));
    let mut cursor = 0;

    for doc in a {
        if cursor < b.len() && Arc::ptr_eq(&b[cursor], doc) {
            cursor += 1;
            continue;
        }
        result.push(doc.clone());
    }
    result
}
