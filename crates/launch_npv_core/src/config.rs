//! Simulation configuration
//!
//! `SimulationConfig` holds every input of a run: the shapes of the five
//! uncertain quantities, the fixed unit economics, the horizon, the trial
//! count and the random seed. Defaults reproduce the reference launch case.
//!
//! ```ignore
//! use launch_npv_core::config::SimulationConfig;
//! use launch_npv_core::simulation::run_simulation;
//!
//! let config = SimulationConfig {
//!     n_trials: 500,
//!     random_seed: 7,
//!     ..Default::default()
//! };
//! let result = run_simulation(&config)?;
//! println!("P(loss) = {:.3}", result.loss_probability);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::model::{ParameterDistribution, ScenarioParameters, UnitEconomics};

/// Complete Monte Carlo configuration
///
/// **Uncertain inputs** (sampled per trial):
/// - market size: normal
/// - R&D cost: uniform
/// - clinical trials cost: lognormal, given by its arithmetic mean/std
/// - market and share growth: triangular, per trial and period
///
/// **Fixed inputs** (shared by all trials): unit revenue and cost, discount
/// rate, initial market share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub market_size_mean: f64,
    pub market_size_std: f64,

    pub rd_cost_min: f64,
    pub rd_cost_max: f64,

    pub trials_cost_mean: f64,
    pub trials_cost_std: f64,

    pub market_growth_min: f64,
    pub market_growth_mode: f64,
    pub market_growth_max: f64,

    pub share_growth_min: f64,
    pub share_growth_mode: f64,
    pub share_growth_max: f64,

    /// Monthly revenue per unit
    pub unit_revenue: f64,
    /// Monthly cost per unit
    pub unit_cost: f64,
    pub discount_rate: f64,
    /// Initial market share, identical in every trial
    pub market_share: f64,

    pub horizon: usize,
    pub n_trials: usize,
    pub random_seed: u64,

    /// Clamp negative market size draws to zero
    pub truncate_market_size: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            market_size_mean: 2_000_000.0,
            market_size_std: 400_000.0,
            rd_cost_min: 600_000_000.0,
            rd_cost_max: 800_000_000.0,
            trials_cost_mean: 150_000_000.0,
            trials_cost_std: 30_000_000.0,
            market_growth_min: 0.02,
            market_growth_mode: 0.03,
            market_growth_max: 0.06,
            share_growth_min: 0.15,
            share_growth_mode: 0.20,
            share_growth_max: 0.25,
            unit_revenue: 130.0,
            unit_cost: 40.0,
            discount_rate: 0.09,
            market_share: 0.08,
            horizon: 5,
            n_trials: 10_000,
            random_seed: 42,
            truncate_market_size: false,
        }
    }
}

impl SimulationConfig {
    #[must_use]
    pub fn market_size_distribution(&self) -> ParameterDistribution {
        ParameterDistribution::Normal {
            mean: self.market_size_mean,
            std_dev: self.market_size_std,
        }
    }

    #[must_use]
    pub fn rd_cost_distribution(&self) -> ParameterDistribution {
        ParameterDistribution::Uniform {
            min: self.rd_cost_min,
            max: self.rd_cost_max,
        }
    }

    #[must_use]
    pub fn trials_cost_distribution(&self) -> ParameterDistribution {
        ParameterDistribution::LogNormal {
            mean: self.trials_cost_mean,
            std_dev: self.trials_cost_std,
        }
    }

    #[must_use]
    pub fn market_growth_distribution(&self) -> ParameterDistribution {
        ParameterDistribution::Triangular {
            min: self.market_growth_min,
            mode: self.market_growth_mode,
            max: self.market_growth_max,
        }
    }

    #[must_use]
    pub fn share_growth_distribution(&self) -> ParameterDistribution {
        ParameterDistribution::Triangular {
            min: self.share_growth_min,
            mode: self.share_growth_mode,
            max: self.share_growth_max,
        }
    }

    #[must_use]
    pub fn economics(&self) -> UnitEconomics {
        UnitEconomics {
            unit_revenue: self.unit_revenue,
            unit_cost: self.unit_cost,
            discount_rate: self.discount_rate,
        }
    }

    /// Number of sampled growth increments per trial (the baseline period never grows).
    #[must_use]
    pub fn growth_periods(&self) -> usize {
        self.horizon.saturating_sub(1)
    }

    /// Validate every field up front so a run never fails halfway through.
    pub fn validate(&self) -> Result<()> {
        if self.n_trials == 0 {
            return Err(ModelError::invalid(
                "n_trials",
                0.0,
                "at least one trial is required",
            ));
        }
        if self.horizon == 0 {
            return Err(ModelError::invalid(
                "horizon",
                0.0,
                "horizon must cover at least one period",
            ));
        }
        if self.n_trials.checked_mul(self.horizon).is_none() {
            return Err(ModelError::invalid(
                "n_trials",
                self.n_trials as f64,
                "trial count times horizon overflows",
            ));
        }
        if !(self.market_share > 0.0 && self.market_share <= 1.0) {
            return Err(ModelError::invalid(
                "market_share",
                self.market_share,
                "initial market share must lie in (0, 1]",
            ));
        }
        for (name, value) in [
            ("unit_revenue", self.unit_revenue),
            ("unit_cost", self.unit_cost),
        ] {
            if !value.is_finite() {
                return Err(ModelError::invalid(name, value, "must be finite"));
            }
        }
        if !self.discount_rate.is_finite() || self.discount_rate <= -1.0 {
            return Err(ModelError::invalid(
                "discount_rate",
                self.discount_rate,
                "discount rate must be finite and greater than -1",
            ));
        }

        self.market_size_distribution().validate("market_size")?;
        self.rd_cost_distribution().validate("rd_cost")?;
        if self.rd_cost_min < 0.0 {
            return Err(ModelError::invalid(
                "rd_cost",
                self.rd_cost_min,
                "R&D cost must be non-negative",
            ));
        }
        self.trials_cost_distribution().validate("trials_cost")?;
        self.market_growth_distribution().validate("market_growth")?;
        self.share_growth_distribution().validate("share_growth")?;
        Ok(())
    }

    /// Deterministic scenario built from each distribution's central value:
    /// mean market size, mid-range R&D cost, mean trials cost and modal growth.
    #[must_use]
    pub fn base_case_parameters(&self) -> ScenarioParameters {
        let periods = self.growth_periods();
        ScenarioParameters {
            initial_market_size: self.market_size_distribution().point_estimate(),
            market_growth_rates: vec![self.market_growth_distribution().point_estimate(); periods],
            initial_market_share: self.market_share,
            share_growth_rates: vec![self.share_growth_distribution().point_estimate(); periods],
            rd_cost: self.rd_cost_distribution().point_estimate(),
            trials_cost: self.trials_cost_distribution().point_estimate(),
        }
    }

    /// Collapse every uncertain input onto its base-case value.
    #[must_use]
    pub fn with_zero_variance(&self) -> Self {
        let rd_mid = self.rd_cost_distribution().point_estimate();
        Self {
            market_size_std: 0.0,
            rd_cost_min: rd_mid,
            rd_cost_max: rd_mid,
            trials_cost_std: 0.0,
            market_growth_min: self.market_growth_mode,
            market_growth_max: self.market_growth_mode,
            share_growth_min: self.share_growth_mode,
            share_growth_max: self.share_growth_mode,
            ..self.clone()
        }
    }
}
