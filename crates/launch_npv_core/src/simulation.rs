use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::SimulationConfig;
use crate::error::{ModelError, Result};
use crate::financial::{evaluate_batch, evaluate_scenario};
use crate::model::{
    BaseCaseResult, NpvSummary, SampledParameters, SimulationResult, TrialBatch, loss_probability,
};
use crate::sampler::{ParameterSampler, clamp_negative};

/// Evaluate the deterministic base case built from the config's point estimates.
pub fn run_base_case(config: &SimulationConfig) -> Result<BaseCaseResult> {
    config.validate()?;
    let parameters = config.base_case_parameters();
    let outcome = evaluate_scenario(&parameters, &config.economics())?;
    tracing::debug!(net_pv = outcome.net_present_value, "Base case evaluated");

    Ok(BaseCaseResult {
        parameters,
        series: outcome.series,
        net_pv: outcome.net_present_value,
    })
}

/// Run a full Monte Carlo simulation seeded from `config.random_seed`.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationResult> {
    let mut rng = SmallRng::seed_from_u64(config.random_seed);
    run_simulation_with_rng(config, &mut rng)
}

/// Run a full Monte Carlo simulation drawing from a caller-provided RNG.
///
/// Parameters are drawn in a fixed order (market size, R&D cost, trials cost,
/// market growth, share growth), so the same RNG state always gives the same
/// result.
pub fn run_simulation_with_rng<R: Rng + ?Sized>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<SimulationResult> {
    config.validate()?;

    let n = config.n_trials;
    let horizon = config.horizon;
    let periods = config.growth_periods();
    tracing::debug!(n_trials = n, horizon, "Starting Monte Carlo simulation");

    let sampler = ParameterSampler::new(config);
    let market_size = sampler.sample_market_size(rng, n)?;
    let rd_cost = sampler.sample_rd_cost(rng, n)?;
    let trials_cost = sampler.sample_trials_cost(rng, n)?;
    let market_growth = sampler.sample_market_growth(rng, n, periods)?;
    let share_growth = sampler.sample_share_growth(rng, n, periods)?;

    let mut initial_market_size = market_size.clone();
    let negative_market_size_draws = if config.truncate_market_size {
        clamp_negative(&mut initial_market_size)
    } else {
        market_size.iter().filter(|v| **v < 0.0).count()
    };
    if negative_market_size_draws > 0 {
        tracing::warn!(
            count = negative_market_size_draws,
            truncated = config.truncate_market_size,
            "Normal market size produced negative draws"
        );
    }

    let batch = TrialBatch {
        initial_market_size,
        market_growth_rates: market_growth.with_leading_zero_column(),
        initial_market_share: vec![config.market_share; n],
        share_growth_rates: share_growth.with_leading_zero_column(),
        rd_cost: rd_cost.clone(),
        trials_cost: trials_cost.clone(),
    };
    let outcome = evaluate_batch(&batch, &config.economics(), horizon)?;

    let loss_probability = loss_probability(&outcome.npv);
    let summary = NpvSummary::from_values(&outcome.npv).ok_or(ModelError::invalid(
        "n_trials",
        0.0,
        "at least one trial is required",
    ))?;
    tracing::debug!(
        mean_npv = summary.mean,
        loss_probability,
        "Monte Carlo simulation complete"
    );

    Ok(SimulationResult {
        npv: outcome.npv,
        loss_probability,
        summary,
        samples: SampledParameters {
            market_size,
            rd_cost,
            trials_cost,
            market_growth,
            share_growth,
        },
        cumulative_profit: outcome.cumulative_profit,
        negative_market_size_draws,
    })
}
