//! Top-down merge sort.
//!
//! Time complexity: O(n log n)
//! Space complexity: O(n) scratch per merge level

use super::{SortProbe, Sorter};
use crate::sample::Sample;

/// Splits recursively, then merges the halves back into the caller's slice.
///
/// Merging moves samples by exchange: each chosen sample is swapped into the
/// next output position, and the sample it displaces takes its old slot. Every
/// event names current positions, so replaying the swaps rebuilds the slice.
/// Samples already in place are never moved. Ties take the left half first.
pub struct MergeSort;

impl Sorter for MergeSort {
    fn sort(&self, data: &mut [Sample], probe: &mut SortProbe<'_>) {
        merge_sort(data, 0, data.len(), probe);
    }
}

/// Sorts the half-open range `low..high`.
fn merge_sort(data: &mut [Sample], low: usize, high: usize, probe: &mut SortProbe<'_>) {
    if high - low < 2 {
        return;
    }
    let mid = low + (high - low) / 2;
    merge_sort(data, low, mid, probe);
    merge_sort(data, mid, high, probe);
    merge(data, low, mid, high, probe);
}

/// Where the pending samples of one merge currently sit.
///
/// Runs are numbered by their starting offset: left run `0..mid - low`, right
/// run `mid - low..high - low`.
struct Placement {
    low: usize,
    slot_of: Vec<usize>,
    run_at: Vec<usize>,
}

impl Placement {
    fn new(low: usize, high: usize) -> Self {
        let offsets: Vec<usize> = (0..high - low).collect();
        Self {
            low,
            slot_of: offsets.iter().map(|&o| low + o).collect(),
            run_at: offsets,
        }
    }

    fn slot(&self, run: usize) -> usize {
        self.slot_of[run]
    }

    /// Swaps run entry `run` into slot `k`; the displaced sample moves to the
    /// slot `run` came from. Slots below `k` are already final.
    fn place(&mut self, data: &mut [Sample], probe: &mut SortProbe<'_>, run: usize, k: usize) {
        let from = self.slot_of[run];
        if from == k {
            return;
        }
        probe.swap(data, k, from);
        let displaced = self.run_at[k - self.low];
        self.slot_of[displaced] = from;
        self.run_at[from - self.low] = displaced;
        self.slot_of[run] = k;
        self.run_at[k - self.low] = run;
    }
}

/// Merges the sorted runs `low..mid` and `mid..high`.
fn merge(data: &mut [Sample], low: usize, mid: usize, high: usize, probe: &mut SortProbe<'_>) {
    let (left_len, total) = (mid - low, high - low);
    let mut placement = Placement::new(low, high);

    let (mut i, mut j, mut k) = (0, left_len, low);
    while i < left_len && j < total {
        let (left, right) = (placement.slot(i), placement.slot(j));
        if probe.greater(data, left, right) {
            placement.place(data, probe, j, k);
            j += 1;
        } else {
            placement.place(data, probe, i, k);
            i += 1;
        }
        k += 1;
    }

    // Left leftovers may have been scattered by earlier displacements.
    for run in i..left_len {
        placement.place(data, probe, run, k);
        k += 1;
    }
    // Right leftovers never move: nothing ahead of them was displaced.
    debug_assert!((j..total).all(|run| placement.slot(run) == low + run));
}
