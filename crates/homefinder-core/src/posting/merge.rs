//! Set algebra over posting collections.
//!
//! Sorted-list functions expect ascending, duplicate-free input and keep
//! that invariant in their output. They run in `O(n + m)` per pair.

use rustc_hash::FxHashSet;

use super::RecordId;

/// Two-pointer intersection of two sorted lists.
#[must_use]
pub fn intersect_two(a: &[RecordId], b: &[RecordId]) -> Vec<RecordId> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
        }
    }
    out
}

/// Intersects many sorted lists, shortest first.
///
/// Empty lists are dropped before folding; the fold stops as soon as an
/// intermediate result is empty.
#[must_use]
pub fn intersect_many<L: AsRef<[RecordId]>>(lists: &[L]) -> Vec<RecordId> {
    let mut non_empty: Vec<&[RecordId]> = lists
        .iter()
        .map(AsRef::as_ref)
        .filter(|l| !l.is_empty())
        .collect();
    if non_empty.is_empty() {
        return Vec::new();
    }
    non_empty.sort_by_key(|l| l.len());

    let mut current = non_empty[0].to_vec();
    for next in &non_empty[1..] {
        if current.is_empty() {
            break;
        }
        current = intersect_two(&current, next);
    }
    current
}

/// Two-pointer union of two sorted lists without duplicates.
#[must_use]
pub fn merge_union_two(a: &[RecordId], b: &[RecordId]) -> Vec<RecordId> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let mut last: Option<RecordId> = None;
    let mut emit = |v: RecordId, out: &mut Vec<RecordId>| {
        if last != Some(v) {
            out.push(v);
            last = Some(v);
        }
    };

    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let v = match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Equal => {
                i += 1;
                j += 1;
                a[i - 1]
            }
            std::cmp::Ordering::Less => {
                i += 1;
                a[i - 1]
            }
            std::cmp::Ordering::Greater => {
                j += 1;
                b[j - 1]
            }
        };
        emit(v, &mut out);
    }
    for &v in a[i..].iter().chain(&b[j..]) {
        emit(v, &mut out);
    }
    out
}

/// Unions many sorted lists by folding [`merge_union_two`] left to right.
#[must_use]
pub fn union_many<L: AsRef<[RecordId]>>(lists: &[L]) -> Vec<RecordId> {
    let mut out: Vec<RecordId> = Vec::new();
    for list in lists.iter().map(AsRef::as_ref).filter(|l| !l.is_empty()) {
        out = if out.is_empty() {
            list.to_vec()
        } else {
            merge_union_two(&out, list)
        };
    }
    out
}

/// Intersects hash sets, returning survivors in ascending order.
///
/// Iterates the smallest non-empty set and keeps an element only if every
/// other set contains it, stopping at the first miss.
#[must_use]
pub fn intersect_sets(sets: &[FxHashSet<RecordId>]) -> Vec<RecordId> {
    let mut non_empty: Vec<&FxHashSet<RecordId>> = sets.iter().filter(|s| !s.is_empty()).collect();
    non_empty.sort_by_key(|s| s.len());

    let Some((base, others)) = non_empty.split_first() else {
        return Vec::new();
    };
    let mut out: Vec<RecordId> = base
        .iter()
        .copied()
        .filter(|id| others.iter().all(|s| s.contains(id)))
        .collect();
    out.sort_unstable();
    out
}
