//! Simulation results and distribution summaries

use serde::{Deserialize, Serialize};

use super::matrix::PeriodMatrix;
use super::scenario::{PeriodSeries, ScenarioParameters};

/// Percentiles reported in every [`NpvSummary`]
pub const SUMMARY_PERCENTILES: [f64; 5] = [0.05, 0.25, 0.50, 0.75, 0.95];

/// Per-trial results of evaluating a [`super::TrialBatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub npv: Vec<f64>,
    /// `[n × horizon]` running profit net of upfront cost
    pub cumulative_profit: PeriodMatrix,
}

/// Raw parameter draws of a run, kept so callers can histogram the inputs.
///
/// Growth matrices are the sampled increments without the period-0 column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledParameters {
    pub market_size: Vec<f64>,
    pub rd_cost: Vec<f64>,
    pub trials_cost: Vec<f64>,
    pub market_growth: PeriodMatrix,
    pub share_growth: PeriodMatrix,
}

/// Complete results from one Monte Carlo run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// NPV of every trial, in trial order
    pub npv: Vec<f64>,
    /// Fraction of trials with negative NPV
    pub loss_probability: f64,
    pub summary: NpvSummary,
    pub samples: SampledParameters,
    pub cumulative_profit: PeriodMatrix,
    /// Market size draws that came out negative (before any truncation)
    pub negative_market_size_draws: usize,
}

impl SimulationResult {
    #[must_use]
    pub fn n_trials(&self) -> usize {
        self.npv.len()
    }
}

/// Deterministic single-scenario result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseCaseResult {
    pub parameters: ScenarioParameters,
    pub series: PeriodSeries,
    pub net_pv: f64,
}

impl BaseCaseResult {
    /// Cumulative profit net of upfront cost, one value per period
    #[must_use]
    pub fn net_profit(&self) -> &[f64] {
        &self.series.cumulative_profit
    }
}

/// Summary statistics of an NPV distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpvSummary {
    pub num_trials: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// (percentile as 0-1, value) pairs
    pub percentile_values: Vec<(f64, f64)>,
    pub loss_probability: f64,
}

impl NpvSummary {
    /// Summarize a set of NPV outcomes. Returns `None` for an empty slice.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let percentile_values = SUMMARY_PERCENTILES
            .iter()
            .map(|&p| (p, percentile_of_sorted(&sorted, p)))
            .collect();

        Some(Self {
            num_trials: values.len(),
            mean,
            std_dev: variance.sqrt(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            percentile_values,
            loss_probability: loss_probability(values),
        })
    }

    /// Look up a reported percentile (e.g. `0.5` for the median).
    #[must_use]
    pub fn percentile(&self, p: f64) -> Option<f64> {
        self.percentile_values
            .iter()
            .find(|(q, _)| (q - p).abs() < 1e-9)
            .map(|(_, v)| *v)
    }
}

/// Fraction of outcomes strictly below zero. Zero for an empty slice.
#[must_use]
pub fn loss_probability(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let losses = values.iter().filter(|v| **v < 0.0).count();
    losses as f64 / values.len() as f64
}

/// Linearly interpolated percentile of ascending data, `p` in [0, 1].
#[must_use]
pub fn percentile_of_sorted(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        len => {
            let rank = p.clamp(0.0, 1.0) * (len - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let weight = rank - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * weight
        }
    }
}
