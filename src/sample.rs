//! Elevation samples and the stable ordering used by every algorithm.
//!
//! A [`Sample`] carries its geographic position, the elevation value and an
//! `original_index` assigned once when the [`Dataset`] is loaded. Ordering never
//! looks at raw elevation alone: [`ComparisonKey`] pairs the elevation with the
//! origin index so that equal elevations always resolve the same way, no matter
//! which algorithm ran or how the working copy was shuffled beforehand.

use std::cmp::Ordering;

/// A raw `(latitude, longitude, elevation)` triple as delivered by a data source.
pub type GridPoint = (f64, f64, f64);

/// One elevation observation with a stable origin index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub original_index: usize,
}

impl Sample {
    pub const fn new(latitude: f64, longitude: f64, elevation: f64, original_index: usize) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
            original_index,
        }
    }

    /// Derives the composite ordering key for this sample.
    #[inline]
    pub fn key(&self) -> ComparisonKey {
        ComparisonKey {
            elevation: self.elevation,
            original_index: self.original_index,
        }
    }

    /// Two samples are the same element when they share an origin index.
    ///
    /// Positions can hold bit-identical elevations from different grid cells, so
    /// identity is what decides whether a write actually moved anything.
    #[inline]
    pub fn same_element(&self, other: &Sample) -> bool {
        self.original_index == other.original_index
    }
}

/// The `(elevation, original_index)` pair, ordered lexicographically.
///
/// Elevation uses [`f64::total_cmp`], so the order is total even for values a
/// broken source might produce (NaN sorts above every finite elevation).
#[derive(Debug, Clone, Copy)]
pub struct ComparisonKey {
    pub elevation: f64,
    pub original_index: usize,
}

impl Ord for ComparisonKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.elevation
            .total_cmp(&other.elevation)
            .then(self.original_index.cmp(&other.original_index))
    }
}

impl PartialOrd for ComparisonKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ComparisonKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ComparisonKey {}

/// Ordered samples of one fetched grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    /// Builds a dataset from raw triples, numbering them in arrival order.
    pub fn from_triples<I>(points: I) -> Self
    where
        I: IntoIterator<Item = GridPoint>,
    {
        let samples = points
            .into_iter()
            .enumerate()
            .map(|(index, (lat, lon, elevation))| Sample::new(lat, lon, elevation, index))
            .collect();
        Self { samples }
    }

    /// Builds a dataset from bare elevations at the origin. Handy for tests and
    /// benchmarks.
    pub fn from_elevations(elevations: &[f64]) -> Self {
        Self::from_triples(elevations.iter().map(|&e| (0.0, 0.0, e)))
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Minimum, median and maximum samples by [`ComparisonKey`].
    ///
    /// Returns `None` for an empty dataset. The median is the lower middle
    /// element for even lengths.
    pub fn summary(&self) -> Option<Summary> {
        summarize(&self.samples)
    }
}

/// On-screen readout of the extremes and midpoint of a sample set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub min: Sample,
    pub median: Sample,
    pub max: Sample,
}

/// Computes a [`Summary`] for any sample slice without mutating it.
pub fn summarize(samples: &[Sample]) -> Option<Summary> {
    if samples.is_empty() {
        return None;
    }
    let mut ordered = samples.to_vec();
    ordered.sort_by_key(Sample::key);
    Some(Summary {
        min: ordered[0],
        median: ordered[(ordered.len() - 1) / 2],
        max: ordered[ordered.len() - 1],
    })
}

/// True when every adjacent pair is ordered by [`ComparisonKey`].
pub fn is_sorted(samples: &[Sample]) -> bool {
    samples.windows(2).all(|w| w[0].key() <= w[1].key())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn key_orders_by_elevation_first() {
        let low = Sample::new(0.0, 0.0, 3.0, 9);
        let high = Sample::new(0.0, 0.0, 5.0, 0);
        assert!(low.key() < high.key());
    }

    #[test]
    fn key_breaks_ties_by_original_index() {
        let first = Sample::new(0.0, 0.0, 5.0, 0);
        let second = Sample::new(0.0, 0.0, 5.0, 2);
        assert!(first.key() < second.key());
        assert_eq!(first.key().cmp(&first.key()), Ordering::Equal);
    }

    #[test]
    fn from_triples_numbers_in_arrival_order() {
        let dataset = Dataset::from_triples(vec![(1.0, 2.0, 10.0), (1.1, 2.0, 7.5)]);
        let indices: Vec<usize> = dataset.samples().iter().map(|s| s.original_index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_relative_eq!(dataset.samples()[1].latitude, 1.1);
    }

    #[test]
    fn summary_picks_min_median_max() {
        let dataset = Dataset::from_elevations(&[4.0, 1.0, 9.0, 4.0, 2.0]);
        let summary = dataset.summary().unwrap();
        assert_relative_eq!(summary.min.elevation, 1.0);
        assert_relative_eq!(summary.median.elevation, 4.0);
        assert_eq!(summary.median.original_index, 0);
        assert_relative_eq!(summary.max.elevation, 9.0);
    }

    #[test]
    fn summary_of_empty_is_none() {
        assert!(Dataset::default().summary().is_none());
    }

    #[test]
    fn summary_is_independent_of_position() {
        let dataset = Dataset::from_elevations(&[5.0, 3.0, 5.0, 1.0]);
        let mut reversed = dataset.samples().to_vec();
        reversed.reverse();
        assert_eq!(summarize(&reversed), dataset.summary());
    }

    #[test]
    fn nan_sorts_last() {
        let nan = Sample::new(0.0, 0.0, f64::NAN, 0);
        let peak = Sample::new(0.0, 0.0, 8848.0, 1);
        assert!(peak.key() < nan.key());
    }
}
