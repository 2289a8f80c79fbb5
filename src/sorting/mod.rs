//! Instrumented comparison sorts.
//!
//! Every algorithm sorts a sample slice in place, ascending by
//! [`ComparisonKey`](crate::sample::ComparisonKey), and reports each logical step
//! through a [`SortProbe`]. The probe is the only way an algorithm touches keys or
//! moves samples, so counting and event emission can't drift apart.
//!
//! Available algorithms:
//! - [`BubbleSort`]: adjacent exchanges, shrinking pass bound
//! - [`InsertionSort`]: backward scan with adjacent exchanges
//! - [`SelectionSort`]: one exchange per pass
//! - [`QuickSort`]: Lomuto partition around the last element
//! - [`MergeSort`]: top-down, merged by exchanges with tracked positions
//! - [`HeapSort`]: bottom-up max-heap with repeated extraction

mod bubble;
mod heap;
mod insertion;
mod merge;
mod quick;
mod selection;

pub use bubble::BubbleSort;
pub use heap::HeapSort;
pub use insertion::InsertionSort;
pub use merge::MergeSort;
pub use quick::QuickSort;
pub use selection::SelectionSort;

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use thiserror::Error;

use crate::metrics::Metrics;
use crate::observer::ObservationSink;
use crate::sample::Sample;

/// Trait for instrumented sorting algorithms.
///
/// Implementors must route every key comparison through [`SortProbe::less`] or
/// [`SortProbe::greater`] and every move through [`SortProbe::swap`]. They
/// must accept any slice length and must not emit `on_done` themselves.
pub trait Sorter {
    fn sort(&self, data: &mut [Sample], probe: &mut SortProbe<'_>);
}

/// Couples the observation sink with the run's metrics.
///
/// Metrics are updated before the sink is notified, so a sink that never
/// returns still leaves accurate counts behind.
pub struct SortProbe<'a> {
    sink: &'a mut dyn ObservationSink,
    metrics: &'a mut Metrics,
}

impl<'a> SortProbe<'a> {
    pub fn new(sink: &'a mut dyn ObservationSink, metrics: &'a mut Metrics) -> Self {
        Self { sink, metrics }
    }

    /// Compares positions `i` and `j`: `key(data[i]) < key(data[j])`.
    #[inline]
    pub fn less(&mut self, data: &[Sample], i: usize, j: usize) -> bool {
        self.observe_compare(i, j);
        data[i].key() < data[j].key()
    }

    /// Compares positions `i` and `j`: `key(data[i]) > key(data[j])`.
    #[inline]
    pub fn greater(&mut self, data: &[Sample], i: usize, j: usize) -> bool {
        self.observe_compare(i, j);
        data[i].key() > data[j].key()
    }

    /// Exchanges positions `i` and `j`. Returns false without counting or
    /// notifying when nothing would move.
    #[inline]
    pub fn swap(&mut self, data: &mut [Sample], i: usize, j: usize) -> bool {
        if i == j || data[i].same_element(&data[j]) {
            return false;
        }
        data.swap(i, j);
        self.metrics.record_swap();
        self.sink.on_swap(i, j);
        true
    }

    fn observe_compare(&mut self, i: usize, j: usize) {
        self.metrics.record_comparison();
        self.sink.on_compare(i, j);
    }

    fn done(&mut self) {
        self.sink.on_done();
    }
}

/// The available algorithms, selectable by name or menu number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortAlgorithm {
    Bubble,
    Insertion,
    Selection,
    #[default]
    Quick,
    Merge,
    Heap,
}

impl SortAlgorithm {
    /// Every algorithm, in order of increasing asymptotic efficiency.
    pub const ALL: [SortAlgorithm; 6] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Insertion,
        SortAlgorithm::Selection,
        SortAlgorithm::Quick,
        SortAlgorithm::Merge,
        SortAlgorithm::Heap,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "Bubble Sort",
            SortAlgorithm::Insertion => "Insertion Sort",
            SortAlgorithm::Selection => "Selection Sort",
            SortAlgorithm::Quick => "Quick Sort",
            SortAlgorithm::Merge => "Merge Sort",
            SortAlgorithm::Heap => "Heap Sort",
        }
    }

    /// Position in the interactive menu (1-based).
    pub fn menu_number(&self) -> u8 {
        match self {
            SortAlgorithm::Quick => 1,
            SortAlgorithm::Merge => 2,
            SortAlgorithm::Insertion => 3,
            SortAlgorithm::Selection => 4,
            SortAlgorithm::Heap => 5,
            SortAlgorithm::Bubble => 6,
        }
    }

    /// Algorithms ordered by menu number.
    pub fn menu() -> [SortAlgorithm; 6] {
        let mut menu = Self::ALL;
        menu.sort_by_key(SortAlgorithm::menu_number);
        menu
    }

    fn sorter(&self) -> &'static dyn Sorter {
        match self {
            SortAlgorithm::Bubble => &BubbleSort,
            SortAlgorithm::Insertion => &InsertionSort,
            SortAlgorithm::Selection => &SelectionSort,
            SortAlgorithm::Quick => &QuickSort,
            SortAlgorithm::Merge => &MergeSort,
            SortAlgorithm::Heap => &HeapSort,
        }
    }

    /// Sorts `data` in place, reporting to `sink` and counting into `metrics`.
    ///
    /// `metrics.elapsed` is overwritten with the run's wall-clock time. Slices
    /// shorter than two samples emit nothing but the final `on_done`.
    pub fn run(&self, data: &mut [Sample], sink: &mut dyn ObservationSink, metrics: &mut Metrics) {
        let start = Instant::now();
        let mut probe = SortProbe::new(sink, metrics);
        if data.len() > 1 {
            self.sorter().sort(data, &mut probe);
        }
        probe.metrics.elapsed = start.elapsed();
        probe.done();
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sorting algorithm: {0}")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for SortAlgorithm {
    type Err = ParseAlgorithmError;

    /// Accepts menu numbers (`"1"`..`"6"`) and names such as `"heap"`,
    /// `"Heap Sort"` or `"heap_sort"`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        let word = normalized
            .strip_suffix(" sort")
            .unwrap_or(&normalized)
            .trim();

        if let Ok(number) = word.parse::<u8>() {
            return Self::ALL
                .into_iter()
                .find(|a| a.menu_number() == number)
                .ok_or_else(|| ParseAlgorithmError(s.to_string()));
        }

        match word {
            "bubble" => Ok(SortAlgorithm::Bubble),
            "insertion" => Ok(SortAlgorithm::Insertion),
            "selection" => Ok(SortAlgorithm::Selection),
            "quick" => Ok(SortAlgorithm::Quick),
            "merge" => Ok(SortAlgorithm::Merge),
            "heap" => Ok(SortAlgorithm::Heap),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::observer::EventLog;
    use crate::sample::Dataset;

    /// Runs `algorithm` on bare elevations, returning the sorted samples, the
    /// recorded events and the metrics.
    pub fn run_on(
        algorithm: SortAlgorithm,
        elevations: &[f64],
    ) -> (Vec<Sample>, EventLog, Metrics) {
        let mut data = Dataset::from_elevations(elevations).samples().to_vec();
        let mut log = EventLog::new();
        let mut metrics = Metrics::new();
        algorithm.run(&mut data, &mut log, &mut metrics);
        (data, log, metrics)
    }

    pub fn elevations(data: &[Sample]) -> Vec<f64> {
        data.iter().map(|s| s.elevation).collect()
    }

    pub fn indices(data: &[Sample]) -> Vec<usize> {
        data.iter().map(|s| s.original_index).collect()
    }
}
