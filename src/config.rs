//! Session configuration.
//!
//! Rendering geometry never lives here: the core only needs grid dimensions,
//! the shuffle seed, and the animation pacing handed to [`PacedSink`].
//!
//! [`PacedSink`]: crate::observer::PacedSink

use std::time::Duration;

use thiserror::Error;

use crate::theme::ColorTheme;

pub const DEFAULT_ROWS: usize = 10;
pub const DEFAULT_COLS: usize = 10;
pub const DEFAULT_FRAME_RATE: u32 = 60;
pub const DEFAULT_STEP_DELAY_MS: u64 = 10;
pub const DEFAULT_SEED: u64 = 0x5EED_E1E7_A710_0001;

/// Largest grid the session accepts. Quadratic sorts animate one frame per
/// event, so anything bigger would take hours to watch.
pub const MAX_SAMPLES: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("grid of {rows}x{cols} exceeds the {max} sample limit")]
    GridTooLarge { rows: usize, cols: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualizerConfig {
    pub rows: usize,
    pub cols: usize,
    /// Seed for dataset generation and shuffles. `None` uses [`DEFAULT_SEED`].
    pub seed: Option<u64>,
    /// Frame cap for the animation; 0 disables it.
    pub frame_rate: u32,
    pub step_delay: Duration,
    pub theme: ColorTheme,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            seed: None,
            frame_rate: DEFAULT_FRAME_RATE,
            step_delay: Duration::from_millis(DEFAULT_STEP_DELAY_MS),
            theme: ColorTheme::default(),
        }
    }
}

impl VisualizerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        match self.expected_samples() {
            Some(n) if n <= MAX_SAMPLES => Ok(()),
            _ => Err(ConfigError::GridTooLarge {
                rows: self.rows,
                cols: self.cols,
                max: MAX_SAMPLES,
            }),
        }
    }

    /// `rows * cols`, or `None` when the product overflows.
    pub fn expected_samples(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }
}
