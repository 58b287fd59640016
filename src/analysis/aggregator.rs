use crate::common::{Centroid, Rgb24};
use crate::error::AggregationError;
use serde::Serialize;

/// Below this many samples the density analysis is skipped and the
/// representative is the plain mean.
const MIN_DENSITY_SAMPLES: usize = 3;
/// Half the interquartile range is added to the median distance to form
/// the pass-1 retention threshold.
const SPREAD_FACTOR: f64 = 0.5;
/// Pass 1 must retain at least this share of the samples, otherwise the
/// fallback selection takes over.
const DENSE_MIN_RATIO: f64 = 0.3;
/// Share of samples the fallback selection keeps, by smallest distance.
const FALLBACK_KEEP_RATIO: f64 = 0.5;

/// The consensus color for one emotion category, plus the statistics the
/// reporting layer renders next to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    #[serde(rename = "hex")]
    pub representative_hex: String,
    #[serde(rename = "rgb")]
    pub representative: Rgb24,
    /// Samples retained in the dense region.
    #[serde(rename = "count")]
    pub dense_count: usize,
    pub total_count: usize,
    /// The original, unfiltered sample sequence, kept for distribution
    /// views downstream.
    #[serde(rename = "colors")]
    pub all_samples: Vec<String>,
}

/// Computes a representative color for one emotion from the full set of
/// respondent samples. A plain mean is skewed by a handful of extreme
/// choices; this instead averages the densest cluster of responses,
/// trimming outliers with a quartile-based distance threshold.
pub struct DenseRegionAggregator;

impl Default for DenseRegionAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl DenseRegionAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Aggregates an ordered sequence of `#RRGGBB` samples. Returns
    /// `Ok(None)` for an empty sequence; a malformed sample fails the
    /// whole category so bad entries can never silently skew the result.
    pub fn aggregate(
        &self,
        samples: &[String],
    ) -> Result<Option<AggregationResult>, AggregationError> {
        if samples.is_empty() {
            return Ok(None);
        }

        let points = samples
            .iter()
            .map(|s| {
                Rgb24::parse(s).ok_or_else(|| AggregationError::MalformedSample(s.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let total_count = points.len();

        if total_count < MIN_DENSITY_SAMPLES {
            return Ok(Some(self.assemble(&points, total_count, samples)));
        }

        let centroid = Centroid::of(&points);
        let distances: Vec<f64> = points.iter().map(|p| p.distance_to(&centroid)).collect();
        let threshold = quartile_threshold(&distances);

        // Pass 1: keep everything within the threshold, in input order.
        let mut dense: Vec<Rgb24> = points
            .iter()
            .zip(&distances)
            .filter(|(_, d)| **d <= threshold)
            .map(|(p, _)| *p)
            .collect();

        // Pass 2: if the threshold was too aggressive, fall back to the
        // closest half of the samples so the dense region can never be
        // pathologically small.
        if (dense.len() as f64) < total_count as f64 * DENSE_MIN_RATIO {
            let keep = (total_count as f64 * FALLBACK_KEEP_RATIO).ceil() as usize;
            dense = fallback_selection(&points, &distances, keep);
        }

        Ok(Some(self.assemble(&dense, total_count, samples)))
    }

    fn assemble(
        &self,
        dense: &[Rgb24],
        total_count: usize,
        samples: &[String],
    ) -> AggregationResult {
        let representative = mean_color(dense);
        AggregationResult {
            representative_hex: representative.to_hex(),
            representative,
            dense_count: dense.len(),
            total_count,
            all_samples: samples.to_vec(),
        }
    }
}

/// Retention threshold over the distances to the centroid: median plus
/// half the interquartile range. Quartiles pick the element at the
/// floored index of the ascending sort, without interpolation.
fn quartile_threshold(distances: &[f64]) -> f64 {
    let n = distances.len();
    let mut sorted = distances.to_vec();
    sorted.sort_by(f64::total_cmp);
    let q1 = sorted[n / 4];
    let median = sorted[n / 2];
    let q3 = sorted[3 * n / 4];
    median + SPREAD_FACTOR * (q3 - q1)
}

/// Selects the `keep` samples closest to the centroid. The sort is
/// stable and keyed on distance only, so equal distances keep their
/// original submission order.
fn fallback_selection(points: &[Rgb24], distances: &[f64], keep: usize) -> Vec<Rgb24> {
    let mut by_distance: Vec<(f64, usize)> = distances
        .iter()
        .enumerate()
        .map(|(index, d)| (*d, index))
        .collect();
    by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));
    by_distance
        .iter()
        .take(keep)
        .map(|&(_, index)| points[index])
        .collect()
}

/// Unweighted per-channel mean, with each channel rounded half away
/// from zero (`f64::round`): a mean of 127.5 becomes 128.
fn mean_color(points: &[Rgb24]) -> Rgb24 {
    let centroid = Centroid::of(points);
    Rgb24 {
        r: centroid.r.round() as u8,
        g: centroid.g.round() as u8,
        b: centroid.b.round() as u8,
    }
}
