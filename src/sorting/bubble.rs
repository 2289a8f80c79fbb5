//! Bubble sort.
//!
//! Time complexity: O(n²)
//! Space complexity: O(1)

use super::{SortProbe, Sorter};
use crate::sample::Sample;

/// Repeatedly exchanges adjacent out-of-order samples.
///
/// Pass `p` compares every adjacent pair in `0..n - 1 - p`; after each pass the
/// largest remaining sample has settled at the end, so the bound shrinks by one.
pub struct BubbleSort;

impl Sorter for BubbleSort {
    fn sort(&self, data: &mut [Sample], probe: &mut SortProbe<'_>) {
        let len = data.len();
        for pass in 0..len.saturating_sub(1) {
            for j in 0..len - 1 - pass {
                if probe.greater(data, j, j + 1) {
                    probe.swap(data, j, j + 1);
                }
            }
        }
    }
}
