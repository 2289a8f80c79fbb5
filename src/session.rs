//! Interactive run lifecycle.
//!
//! The [`SessionController`] owns the loaded dataset, the pre-run snapshot every
//! run starts from, and the working copy an algorithm sorts. States move
//! `Idle -> Running -> Completed`, and back to `Idle` on reload or shuffle.
//!
//! ```text
//! Idle      --run----------> Running
//! Running   --returns------> Completed
//! Running   --panics-------> Idle
//! Completed --run----------> Running   (from the same snapshot)
//! any       --load/shuffle-> Idle
//! ```

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::VisualizerConfig;
use crate::metrics::Metrics;
use crate::observer::ObservationSink;
use crate::sample::{summarize, Dataset, Sample, Summary};
use crate::sorting::{ParseAlgorithmError, SortAlgorithm};
use crate::source::DataSource;
use crate::theme::ColorTheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Completed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "Idle"),
            RunState::Running => write!(f, "Running"),
            RunState::Completed => write!(f, "Completed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The source failed, returned nothing, or returned more than was asked for.
    #[error("elevation data unavailable: {0}")]
    DataUnavailable(String),
    #[error("no dataset loaded")]
    EmptyDataset,
    #[error("a run is already in progress")]
    RunInProgress,
    #[error("no algorithm has been run yet")]
    NothingToReplay,
    #[error("{algorithm} aborted after {metrics}")]
    RunAborted {
        algorithm: SortAlgorithm,
        metrics: Metrics,
    },
}

/// One request from the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Reset,
    Shuffle,
    CycleTheme,
    /// Run the named algorithm on the pre-run snapshot.
    Select(SortAlgorithm),
    /// Re-run the most recent algorithm.
    Replay,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command: {0}")]
pub struct ParseCommandError(pub String);

impl From<ParseAlgorithmError> for ParseCommandError {
    fn from(err: ParseAlgorithmError) -> Self {
        ParseCommandError(err.0)
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Single keys (`r`, `s`, `t`, `p`, `q`), their long names, or anything
    /// [`SortAlgorithm`] parses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "reset" | "reload" => Ok(Command::Reset),
            "s" | "shuffle" => Ok(Command::Shuffle),
            "t" | "theme" => Ok(Command::CycleTheme),
            "p" | "replay" => Ok(Command::Replay),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            _ => Ok(Command::Select(s.parse()?)),
        }
    }
}

/// What the caller should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct SessionController<D> {
    source: D,
    rows: usize,
    cols: usize,
    /// `rows * cols`; `None` when the product overflows.
    expected: Option<usize>,
    dataset: Dataset,
    /// Order every run starts from.
    snapshot: Vec<Sample>,
    working: Vec<Sample>,
    state: RunState,
    metrics: Metrics,
    last_algorithm: Option<SortAlgorithm>,
    theme: ColorTheme,
    rng: SmallRng,
}

impl<D: DataSource> SessionController<D> {
    /// Creates an idle session with nothing loaded. Call [`load`](Self::load)
    /// before running.
    pub fn new(source: D, config: &VisualizerConfig) -> Self {
        Self {
            source,
            rows: config.rows,
            cols: config.cols,
            expected: config.expected_samples(),
            dataset: Dataset::default(),
            snapshot: Vec::new(),
            working: Vec::new(),
            state: RunState::Idle,
            metrics: Metrics::default(),
            last_algorithm: None,
            theme: config.theme,
            rng: SmallRng::seed_from_u64(config.seed()),
        }
    }

    /// Fetches a fresh dataset and numbers its samples in arrival order.
    ///
    /// On failure the previous dataset is kept, but state still returns to
    /// `Idle` so nothing runs on stale expectations.
    pub fn load(&mut self) -> Result<(), SessionError> {
        self.state = RunState::Idle;
        self.metrics.reset();

        let expected = self.expected.ok_or_else(|| {
            SessionError::DataUnavailable(format!(
                "a {}x{} grid cannot be addressed",
                self.rows, self.cols
            ))
        })?;
        let points = self
            .source
            .fetch_grid(self.rows, self.cols)
            .map_err(|err| SessionError::DataUnavailable(err.to_string()))?;

        if points.is_empty() {
            warn!(rows = self.rows, cols = self.cols, "elevation source returned no data");
            return Err(SessionError::DataUnavailable("source returned no samples".into()));
        }
        if points.len() > expected {
            warn!(expected, actual = points.len(), "elevation grid larger than requested");
            return Err(SessionError::DataUnavailable(format!(
                "expected at most {expected} samples, got {}",
                points.len()
            )));
        }
        if points.len() < expected {
            warn!(expected, actual = points.len(), "elevation grid smaller than requested");
        }

        self.dataset = Dataset::from_triples(points);
        self.snapshot = self.dataset.samples().to_vec();
        self.working = self.snapshot.clone();

        if let Some(summary) = self.dataset.summary() {
            info!(
                samples = self.dataset.len(),
                min = summary.min.elevation,
                median = summary.median.elevation,
                max = summary.max.elevation,
                "loaded elevation dataset"
            );
        }
        Ok(())
    }

    /// Randomly permutes the working copy with the session's seeded RNG and
    /// makes that order the new starting point for runs.
    pub fn shuffle(&mut self) {
        self.working.clone_from(&self.snapshot);
        self.working.shuffle(&mut self.rng);
        self.snapshot.clone_from(&self.working);
        self.metrics.reset();
        self.state = RunState::Idle;
        debug!(samples = self.working.len(), "shuffled working copy");
    }

    pub fn cycle_theme(&mut self) -> ColorTheme {
        self.theme = self.theme.next();
        debug!(theme = %self.theme, "color theme changed");
        self.theme
    }

    /// Runs `algorithm` on a fresh copy of the pre-run snapshot.
    ///
    /// Events go to `sink` synchronously. If the run panics (typically inside
    /// the sink), the working copy is restored, state returns to `Idle`, and the
    /// metrics gathered so far are kept for display.
    pub fn run(
        &mut self,
        algorithm: SortAlgorithm,
        sink: &mut dyn ObservationSink,
    ) -> Result<Metrics, SessionError> {
        if self.state == RunState::Running {
            return Err(SessionError::RunInProgress);
        }
        if self.snapshot.is_empty() {
            return Err(SessionError::EmptyDataset);
        }

        self.working.clone_from(&self.snapshot);
        self.metrics.reset();
        self.last_algorithm = Some(algorithm);
        self.state = RunState::Running;
        info!(%algorithm, samples = self.working.len(), "starting run");

        let start = Instant::now();
        let working = &mut self.working;
        let metrics = &mut self.metrics;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            algorithm.run(working, sink, metrics);
        }));

        match outcome {
            Ok(()) => {
                self.state = RunState::Completed;
                info!(
                    %algorithm,
                    comparisons = self.metrics.comparisons,
                    swaps = self.metrics.swaps,
                    elapsed_ms = self.metrics.elapsed.as_secs_f64() * 1000.0,
                    "run completed"
                );
                Ok(self.metrics)
            }
            Err(_) => {
                self.metrics.elapsed = start.elapsed();
                self.working.clone_from(&self.snapshot);
                self.state = RunState::Idle;
                error!(
                    %algorithm,
                    comparisons = self.metrics.comparisons,
                    swaps = self.metrics.swaps,
                    "run aborted"
                );
                Err(SessionError::RunAborted {
                    algorithm,
                    metrics: self.metrics,
                })
            }
        }
    }

    /// Re-runs the most recent algorithm on the same starting order.
    pub fn replay(&mut self, sink: &mut dyn ObservationSink) -> Result<Metrics, SessionError> {
        let algorithm = self.last_algorithm.ok_or(SessionError::NothingToReplay)?;
        self.run(algorithm, sink)
    }

    /// Maps one control-surface command onto its transition.
    pub fn apply(
        &mut self,
        command: Command,
        sink: &mut dyn ObservationSink,
    ) -> Result<Flow, SessionError> {
        match command {
            Command::Reset => self.load()?,
            Command::Shuffle => self.shuffle(),
            Command::CycleTheme => {
                self.cycle_theme();
            }
            Command::Select(algorithm) => {
                self.run(algorithm, sink)?;
            }
            Command::Replay => {
                self.replay(sink)?;
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Metrics of the current or most recent run.
    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn theme(&self) -> ColorTheme {
        self.theme
    }

    pub fn last_algorithm(&self) -> Option<SortAlgorithm> {
        self.last_algorithm
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn snapshot(&self) -> &[Sample] {
        &self.snapshot
    }

    pub fn working(&self) -> &[Sample] {
        &self.working
    }

    /// Min / median / max of the loaded samples. Position-independent, so it
    /// reads the same before and after any run.
    pub fn summary(&self) -> Option<Summary> {
        summarize(&self.working)
    }
}
