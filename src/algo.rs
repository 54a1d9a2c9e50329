//! Textbook sorting and searching routines.
//!
//! These are deliberately classic implementations over slices, driven by
//! caller-supplied comparators so the report menu can apply them to the
//! reservation list and time them side by side.

use std::cmp::Ordering;
use std::time::{Duration, Instant};

/// Sort a slice in place with bubble sort.
///
/// O(n²) comparisons, with an early exit once a full pass makes no swap.
pub fn bubble_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let n = items.len();
    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for i in 0..n - pass - 1 {
            if compare(&items[i], &items[i + 1]) == Ordering::Greater {
                items.swap(i, i + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

/// Sort a slice with a stable top-down merge sort.
///
/// Equal elements keep their relative order. Allocates one scratch buffer
/// of the slice's length.
pub fn merge_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return;
    }
    let mut scratch = Vec::with_capacity(items.len());
    split_merge(items, &mut scratch, &mut compare);
}

fn split_merge<T, F>(items: &mut [T], scratch: &mut Vec<T>, compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return;
    }
    let mid = items.len() / 2;
    split_merge(&mut items[..mid], scratch, compare);
    split_merge(&mut items[mid..], scratch, compare);
    merge(items, mid, scratch, compare);
}

/// Merge the two sorted halves `items[..mid]` and `items[mid..]`.
fn merge<T, F>(items: &mut [T], mid: usize, scratch: &mut Vec<T>, compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    scratch.clear();
    let (mut left, mut right) = (0, mid);
    while left < mid && right < items.len() {
        // <= keeps the sort stable: ties come from the left half first.
        if compare(&items[left], &items[right]) != Ordering::Greater {
            scratch.push(items[left].clone());
            left += 1;
        } else {
            scratch.push(items[right].clone());
            right += 1;
        }
    }
    while left < mid {
        scratch.push(items[left].clone());
        left += 1;
    }
    while right < items.len() {
        scratch.push(items[right].clone());
        right += 1;
    }
    items.clone_from_slice(scratch);
}

/// Find the first index whose element satisfies the predicate, scanning
/// front to back.
pub fn linear_search_by<T, P>(items: &[T], mut matches: P) -> Option<usize>
where
    P: FnMut(&T) -> bool,
{
    for (index, item) in items.iter().enumerate() {
        if matches(item) {
            return Some(index);
        }
    }
    None
}

/// Classic halving search over a slice already ordered by the probe.
///
/// `probe` compares an element against the target: `Less` means the element
/// sorts before the target (search right), `Greater` means after (search
/// left). Returns the index of an equal element, if any.
pub fn binary_search_by<T, F>(items: &[T], mut probe: F) -> Option<usize>
where
    F: FnMut(&T) -> Ordering,
{
    let mut low = 0;
    let mut high = items.len();
    while low < high {
        let mid = low + (high - low) / 2;
        match probe(&items[mid]) {
            Ordering::Equal => return Some(mid),
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
        }
    }
    None
}

/// Run a closure and measure its wall-clock duration.
pub fn timed<R>(run: impl FnOnce() -> R) -> (R, Duration) {
    let start = Instant::now();
    let result = run();
    (result, start.elapsed())
}
