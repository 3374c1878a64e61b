//! Sort engine
//!
//! Two comparison sorts over records keyed by a field name:
//! - merge-sort: midpoint split, stable linear merge
//! - quick-sort: middle-element pivot, three-way partition, not stable
//!
//! Both use [`compare_records`] so they agree on key order and on where nulls go.
//! Neither mutates its input. Elements are anything that borrows as a [`Record`]
//! (owned records, `&Record`, `Arc<Record>`), so callers can sort references
//! into a shared snapshot without copying rows.

use crate::compare::{compare_keys, compare_records, SortDirection};
use crate::record::Record;
use std::borrow::Borrow;
use std::cmp::Ordering;

/// Sorting algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortAlgorithm {
    #[default]
    MergeSort,
    QuickSort,
}

impl SortAlgorithm {
    /// Resolve a requested algorithm name.
    ///
    /// No value selects merge-sort, `"mergesort"` (any case) selects merge-sort,
    /// and every other value selects quick-sort.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            None => Self::MergeSort,
            Some(name) if name.trim().eq_ignore_ascii_case("mergesort") => Self::MergeSort,
            Some(_) => Self::QuickSort,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MergeSort => "mergesort",
            Self::QuickSort => "quicksort",
        }
    }
}

/// Sort `records` by `field` with the selected algorithm.
pub fn sort<T>(
    records: &[T],
    field: &str,
    direction: SortDirection,
    algorithm: SortAlgorithm,
) -> Vec<T>
where
    T: Borrow<Record> + Clone,
{
    match algorithm {
        SortAlgorithm::MergeSort => merge_sort(records, field, direction),
        SortAlgorithm::QuickSort => quick_sort(records, field, direction),
    }
}

/// Stable top-down merge-sort.
pub fn merge_sort<T>(records: &[T], field: &str, direction: SortDirection) -> Vec<T>
where
    T: Borrow<Record> + Clone,
{
    if records.len() <= 1 {
        return records.to_vec();
    }

    let mid = records.len() / 2;
    let left = merge_sort(&records[..mid], field, direction);
    let right = merge_sort(&records[mid..], field, direction);
    merge(left, right, field, direction)
}

fn merge<T>(left: Vec<T>, right: Vec<T>, field: &str, direction: SortDirection) -> Vec<T>
where
    T: Borrow<Record>,
{
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        // Ties take from the left run.
        let take_right =
            compare_records(l.borrow(), r.borrow(), field, direction) == Ordering::Greater;
        let next = if take_right { right.next() } else { left.next() };
        out.extend(next);
    }

    out.extend(left);
    out.extend(right);
    out
}

/// Quick-sort with a deterministic middle-element pivot.
///
/// Worst case is O(n²) on adversarial input.
pub fn quick_sort<T>(records: &[T], field: &str, direction: SortDirection) -> Vec<T>
where
    T: Borrow<Record> + Clone,
{
    if records.len() <= 1 {
        return records.to_vec();
    }

    let pivot = records[records.len() / 2].borrow().value(field);

    let mut less = Vec::new();
    let mut equal = Vec::new();
    let mut greater = Vec::new();
    for item in records {
        match compare_keys(item.borrow().value(field), pivot, direction) {
            Ordering::Less => less.push(item.clone()),
            Ordering::Equal => equal.push(item.clone()),
            Ordering::Greater => greater.push(item.clone()),
        }
    }

    let mut out = quick_sort(&less, field, direction);
    out.extend(equal);
    out.extend(quick_sort(&greater, field, direction));
    out
}
