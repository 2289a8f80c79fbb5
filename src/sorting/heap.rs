//! Heap sort.
//!
//! Time complexity: O(n log n)
//! Space complexity: O(1)

use super::{SortProbe, Sorter};
use crate::sample::Sample;

/// Builds a max-heap bottom-up, then repeatedly moves the root behind the heap.
pub struct HeapSort;

impl Sorter for HeapSort {
    fn sort(&self, data: &mut [Sample], probe: &mut SortProbe<'_>) {
        let len = data.len();
        for root in (0..len / 2).rev() {
            sift_down(data, len, root, probe);
        }
        for end in (1..len).rev() {
            probe.swap(data, 0, end);
            sift_down(data, end, 0, probe);
        }
    }
}

/// Restores the max-heap property below `root` within the first `len` samples.
fn sift_down(data: &mut [Sample], len: usize, mut root: usize, probe: &mut SortProbe<'_>) {
    loop {
        let left = 2 * root + 1;
        let right = left + 1;
        let mut largest = root;

        if left < len && probe.greater(data, left, largest) {
            largest = left;
        }
        if right < len && probe.greater(data, right, largest) {
            largest = right;
        }
        if largest == root {
            return;
        }
        probe.swap(data, root, largest);
        root = largest;
    }
}

#[cfg(test)]
mod tests {
    use crate::observer::SortEvent;
    use crate::sorting::test_support::*;
    use crate::sorting::SortAlgorithm;

    #[test]
    fn builds_heap_then_extracts() {
        let (data, log, _) = run_on(SortAlgorithm::Heap, &[1.0, 3.0, 2.0]);
        assert_eq!(elevations(&data), vec![1.0, 2.0, 3.0]);
        assert_eq!(
            &log.events()[..4],
            &[
                SortEvent::Compare(1, 0),
                SortEvent::Compare(2, 1),
                SortEvent::Swap(0, 1),
                // Extraction moves the maximum behind the heap.
                SortEvent::Swap(0, 2),
            ]
        );
    }

    #[test]
    fn sift_down_checks_both_children() {
        let (_, log, _) = run_on(SortAlgorithm::Heap, &[9.0, 1.0, 2.0]);
        // Root 9 beats both children, so heap construction only compares.
        assert_eq!(
            log.comparisons().take(2).collect::<Vec<_>>(),
            vec![(1, 0), (2, 0)]
        );
    }
}
