//! Quick sort with Lomuto partitioning.
//!
//! Time complexity: O(n log n) average, O(n²) on already-ordered input
//! Space complexity: O(log n) recursion on average

use super::{SortProbe, Sorter};
use crate::sample::Sample;

/// Partitions around the last sample of each range and recurses on both sides.
///
/// No pivot randomization: the same input always yields the same event stream.
pub struct QuickSort;

impl Sorter for QuickSort {
    fn sort(&self, data: &mut [Sample], probe: &mut SortProbe<'_>) {
        quick_sort(data, 0, data.len(), probe);
    }
}

/// Sorts the half-open range `low..high`.
fn quick_sort(data: &mut [Sample], low: usize, high: usize, probe: &mut SortProbe<'_>) {
    if high - low < 2 {
        return;
    }
    let pivot = partition(data, low, high, probe);
    quick_sort(data, low, pivot, probe);
    quick_sort(data, pivot + 1, high, probe);
}

/// Lomuto partition of `low..high`. Returns the pivot's final position.
fn partition(data: &mut [Sample], low: usize, high: usize, probe: &mut SortProbe<'_>) -> usize {
    let pivot = high - 1;
    let mut store = low;
    for j in low..pivot {
        if probe.less(data, j, pivot) {
            // Silent while everything so far was smaller (store == j).
            probe.swap(data, store, j);
            store += 1;
        }
    }
    probe.swap(data, store, pivot);
    store
}
