//! Selection sort.
//!
//! Time complexity: O(n²)
//! Space complexity: O(1)

use super::{SortProbe, Sorter};
use crate::sample::Sample;

/// Moves the minimum of the unsorted suffix into place, one exchange per pass.
pub struct SelectionSort;

impl Sorter for SelectionSort {
    fn sort(&self, data: &mut [Sample], probe: &mut SortProbe<'_>) {
        let len = data.len();
        for i in 0..len.saturating_sub(1) {
            let mut min_idx = i;
            for j in i + 1..len {
                if probe.less(data, j, min_idx) {
                    min_idx = j;
                }
            }
            // No event when the minimum is already at `i`.
            probe.swap(data, i, min_idx);
        }
    }
}
