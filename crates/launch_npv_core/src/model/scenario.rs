//! Scenario inputs, both for a single deterministic case and for a batch of
//! Monte Carlo trials.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

use super::matrix::PeriodMatrix;

/// Inputs of a single launch scenario.
///
/// Growth vectors hold one rate per period after the baseline, so their length
/// is `horizon - 1`; period 0 never grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParameters {
    pub initial_market_size: f64,
    pub market_growth_rates: Vec<f64>,
    pub initial_market_share: f64,
    pub share_growth_rates: Vec<f64>,
    pub rd_cost: f64,
    pub trials_cost: f64,
}

impl ScenarioParameters {
    /// Number of periods the scenario spans.
    #[must_use]
    pub fn horizon(&self) -> usize {
        self.market_growth_rates.len() + 1
    }

    /// Upfront spend subtracted from every cumulative profit point and from NPV.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.rd_cost + self.trials_cost
    }
}

/// Per-unit economics and discounting, shared by every trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitEconomics {
    /// Monthly revenue per unit sold
    pub unit_revenue: f64,
    /// Monthly cost per unit sold
    pub unit_cost: f64,
    pub discount_rate: f64,
}

/// Per-period series derived for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSeries {
    pub market_size: Vec<f64>,
    pub market_share: Vec<f64>,
    pub sales: Vec<f64>,
    pub annual_revenue: Vec<f64>,
    pub annual_cost: Vec<f64>,
    pub profit: Vec<f64>,
    pub cumulative_profit: Vec<f64>,
}

/// Outcome of evaluating one scenario through the financial model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub series: PeriodSeries,
    pub net_present_value: f64,
}

/// Scenario inputs for `n` trials at once.
///
/// Growth matrices already carry the zero period-0 column, so they are
/// `[n × horizon]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBatch {
    pub initial_market_size: Vec<f64>,
    pub market_growth_rates: PeriodMatrix,
    pub initial_market_share: Vec<f64>,
    pub share_growth_rates: PeriodMatrix,
    pub rd_cost: Vec<f64>,
    pub trials_cost: Vec<f64>,
}

/// Borrowed view of one trial inside a [`TrialBatch`].
#[derive(Debug, Clone, Copy)]
pub struct TrialView<'a> {
    pub initial_market_size: f64,
    pub market_growth_rates: &'a [f64],
    pub initial_market_share: f64,
    pub share_growth_rates: &'a [f64],
    pub total_cost: f64,
}

impl TrialBatch {
    #[must_use]
    pub fn n_trials(&self) -> usize {
        self.initial_market_size.len()
    }

    /// Check that every per-trial input has `n_trials` rows and the growth
    /// matrices have `horizon` columns.
    pub fn validate_shape(&self, horizon: usize) -> Result<()> {
        let n = self.n_trials();
        ModelError::check_len("initial_market_share", n, self.initial_market_share.len())?;
        ModelError::check_len("rd_cost", n, self.rd_cost.len())?;
        ModelError::check_len("trials_cost", n, self.trials_cost.len())?;
        ModelError::check_len("market_growth_rates rows", n, self.market_growth_rates.rows())?;
        ModelError::check_len("share_growth_rates rows", n, self.share_growth_rates.rows())?;
        ModelError::check_len(
            "market_growth_rates columns",
            horizon,
            self.market_growth_rates.cols(),
        )?;
        ModelError::check_len(
            "share_growth_rates columns",
            horizon,
            self.share_growth_rates.cols(),
        )?;
        Ok(())
    }

    /// View trial `i`. Callers must have validated the shape first.
    #[must_use]
    pub fn trial(&self, i: usize) -> TrialView<'_> {
        TrialView {
            initial_market_size: self.initial_market_size[i],
            market_growth_rates: self.market_growth_rates.row(i),
            initial_market_share: self.initial_market_share[i],
            share_growth_rates: self.share_growth_rates.row(i),
            total_cost: self.rd_cost[i] + self.trials_cost[i],
        }
    }
}

/// Prefix a growth vector with the zero period-0 rate.
#[must_use]
pub fn with_baseline_period(growth_rates: &[f64]) -> Vec<f64> {
    let mut padded = Vec::with_capacity(growth_rates.len() + 1);
    padded.push(0.0);
    padded.extend_from_slice(growth_rates);
    padded
}
