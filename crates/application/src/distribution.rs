//! Score distribution estimate for the leaderboard chart.
//!
//! A Gaussian kernel density estimate over all submitted scores, with the
//! bandwidth chosen by Scott's rule.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Number of points the curve is sampled at
pub const DEFAULT_GRID_POINTS: usize = 200;

/// How many bandwidths the curve extends past the extreme scores
pub const DEFAULT_CUT: f64 = 3.0;

/// One sample of the density curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityPoint {
    pub score: f64,
    pub density: f64,
}

/// Density curve of the submitted scores
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreDistribution {
    /// Number of scores the estimate was built from
    pub sample_size: usize,
    /// Kernel bandwidth, absent when no curve could be estimated
    pub bandwidth: Option<f64>,
    /// Curve samples in increasing score order
    pub points: Vec<DensityPoint>,
}

impl ScoreDistribution {
    /// Estimate the distribution with the default grid.
    ///
    /// Fewer than two distinct finite scores give an empty curve.
    pub fn estimate(scores: &[f64]) -> Self {
        Self::estimate_with(scores, DEFAULT_GRID_POINTS)
    }

    /// Estimate the distribution sampled at `grid_points` points.
    pub fn estimate_with(scores: &[f64], grid_points: usize) -> Self {
        let samples: Vec<f64> = scores.iter().copied().filter(|s| s.is_finite()).collect();
        let n = samples.len();
        let empty = Self {
            sample_size: n,
            bandwidth: None,
            points: Vec::new(),
        };
        if n < 2 || grid_points < 2 {
            return empty;
        }

        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        let std_dev = variance.sqrt();
        if std_dev == 0.0 || !std_dev.is_finite() {
            return empty;
        }

        let bandwidth = std_dev * (n as f64).powf(-0.2);
        let (min, max) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| (lo.min(*s), hi.max(*s)));
        let low = min - DEFAULT_CUT * bandwidth;
        let high = max + DEFAULT_CUT * bandwidth;
        let step = (high - low) / (grid_points - 1) as f64;
        let norm = 1.0 / (n as f64 * bandwidth * (2.0 * PI).sqrt());

        let points = (0..grid_points)
            .map(|i| {
                let x = low + step * i as f64;
                let density = norm
                    * samples
                        .iter()
                        .map(|s| (-0.5 * ((x - s) / bandwidth).powi(2)).exp())
                        .sum::<f64>();
                DensityPoint { score: x, density }
            })
            .collect();

        Self {
            sample_size: n,
            bandwidth: Some(bandwidth),
            points,
        }
    }

    /// Whether there is no curve to draw
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest density value on the curve
    pub fn peak(&self) -> f64 {
        self.points.iter().map(|p| p.density).fold(0.0, f64::max)
    }
}
