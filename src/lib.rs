//! Instrumented sorting of elevation samples for step-by-step visualization.
//!
//! This crate provides six classic comparison sorts that report every
//! comparison and exchange to an observer, plus the session state machine that
//! loads a grid, shuffles it, and runs algorithms against the same starting
//! order. Drawing is left to whatever sits behind the [`ObservationSink`].
//!
//! # Quick Start
//!
//! ```no_run
//! use terrasort::prelude::*;
//!
//! let config = VisualizerConfig::default();
//! let mut session = SessionController::new(SyntheticTerrain::new(config.seed()), &config);
//! session.load()?;
//! let metrics = session.run(SortAlgorithm::Heap, &mut EventLog::new())?;
//! println!("{metrics}");
//! # Ok::<(), terrasort::session::SessionError>(())
//! ```

// Public API - exposed to library consumers
pub mod config;
pub mod metrics;
pub mod observer;
pub mod sample;
pub mod session;
pub mod sorting;
pub mod source;
pub mod theme;

// Re-export commonly needed types at crate root for convenience
pub use config::VisualizerConfig;
pub use metrics::Metrics;
pub use observer::{EventLog, NullSink, ObservationSink, PacedSink, SortEvent};
pub use sample::{ComparisonKey, Dataset, Sample, Summary};
pub use session::{Command, Flow, RunState, SessionController, SessionError};
pub use sorting::SortAlgorithm;
pub use theme::ColorTheme;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use terrasort::prelude::*;
/// ```
pub mod prelude {
    // Data
    pub use crate::sample::{ComparisonKey, Dataset, GridPoint, Sample, Summary};
    pub use crate::source::{DataSource, FixedSource, SyntheticTerrain};

    // Sorting
    pub use crate::metrics::Metrics;
    pub use crate::sorting::SortAlgorithm;

    // Observation
    pub use crate::observer::{EventLog, NullSink, ObservationSink, PacedSink, SortEvent};

    // Session
    pub use crate::config::VisualizerConfig;
    pub use crate::session::{Command, Flow, RunState, SessionController};
    pub use crate::theme::ColorTheme;
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::sorting::{
        BubbleSort, HeapSort, InsertionSort, MergeSort, QuickSort, SelectionSort, SortProbe,
        Sorter,
    };
}
