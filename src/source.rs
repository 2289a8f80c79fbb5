//! Elevation grid providers.
//!
//! The session only sees the [`DataSource`] trait. Remote elevation services
//! live outside this crate; [`SyntheticTerrain`] stands in for them with a
//! seeded pseudo-terrain over a random bounding box, and [`FixedSource`] serves
//! stored points.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::debug;

use crate::sample::GridPoint;

/// Grid spacing in degrees between neighbouring rows or columns.
pub const GRID_STEP_DEGREES: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("elevation source unavailable: {0}")]
    Unavailable(String),
}

/// Provider of `(latitude, longitude, elevation)` triples in row-major order.
///
/// May return fewer than `rows * cols` points when the underlying grid is
/// smaller than requested.
pub trait DataSource {
    fn fetch_grid(&mut self, rows: usize, cols: usize) -> Result<Vec<GridPoint>, SourceError>;
}

impl<F> DataSource for F
where
    F: FnMut(usize, usize) -> Result<Vec<GridPoint>, SourceError>,
{
    fn fetch_grid(&mut self, rows: usize, cols: usize) -> Result<Vec<GridPoint>, SourceError> {
        self(rows, cols)
    }
}

/// Serves the same stored points on every fetch, regardless of grid size.
#[derive(Debug, Clone, Default)]
pub struct FixedSource {
    points: Vec<GridPoint>,
}

impl FixedSource {
    pub fn new(points: Vec<GridPoint>) -> Self {
        Self { points }
    }

    pub fn from_elevations(elevations: &[f64]) -> Self {
        Self::new(elevations.iter().map(|&e| (0.0, 0.0, e)).collect())
    }
}

impl DataSource for FixedSource {
    fn fetch_grid(&mut self, _rows: usize, _cols: usize) -> Result<Vec<GridPoint>, SourceError> {
        Ok(self.points.clone())
    }
}

/// Seeded pseudo-terrain over a random bounding box.
///
/// Each fetch picks a south-west corner with latitude in `[-89, 88)` and
/// longitude in `[-179, 178)`, rounded to two decimals, and lays the grid out
/// at [`GRID_STEP_DEGREES`] spacing. Elevations are whole meters, so equal
/// values show up often enough to exercise tie-breaking.
pub struct SyntheticTerrain {
    rng: SmallRng,
}

impl SyntheticTerrain {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl DataSource for SyntheticTerrain {
    fn fetch_grid(&mut self, rows: usize, cols: usize) -> Result<Vec<GridPoint>, SourceError> {
        let lat = round_to_hundredths(self.rng.random_range(-89.0..88.0));
        let lon = round_to_hundredths(self.rng.random_range(-179.0..178.0));
        let base = self.rng.random_range(0.0..2500.0);
        let phase_row = self.rng.random_range(0.0..std::f64::consts::TAU);
        let phase_col = self.rng.random_range(0.0..std::f64::consts::TAU);
        let phase_diag = self.rng.random_range(0.0..std::f64::consts::TAU);

        debug!(lat, lon, rows, cols, "generating synthetic elevation grid");

        let mut points = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                let (r, c) = (i as f64, j as f64);
                let ridge = 600.0 * (r * 0.7 + phase_row).sin() * (c * 0.5 + phase_col).cos();
                let slope = 250.0 * ((r + c) * 0.3 + phase_diag).sin();
                let noise = self.rng.random_range(-40.0..40.0);
                let elevation = (base + ridge + slope + noise).round();
                points.push((
                    lat + r * GRID_STEP_DEGREES,
                    lon + c * GRID_STEP_DEGREES,
                    elevation,
                ));
            }
        }
        Ok(points)
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
