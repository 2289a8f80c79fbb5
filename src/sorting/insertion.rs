//! Insertion sort.
//!
//! Time complexity: O(n²)
//! Space complexity: O(1)

use super::{SortProbe, Sorter};
use crate::sample::Sample;

/// Grows a sorted prefix by walking each new sample backward.
///
/// The shift is expressed as adjacent exchanges so every move is observable.
/// Each backward step costs one comparison, including the final one that finds
/// the sample already in place.
pub struct InsertionSort;

impl Sorter for InsertionSort {
    fn sort(&self, data: &mut [Sample], probe: &mut SortProbe<'_>) {
        for i in 1..data.len() {
            let mut j = i;
            while j > 0 && probe.greater(data, j - 1, j) {
                probe.swap(data, j - 1, j);
                j -= 1;
            }
        }
    }
}
