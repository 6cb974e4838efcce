//! Financial model of a product launch
//!
//! Maps market inputs to per-period sales, cash flows, cumulative profit and a
//! discounted NPV. The four building blocks (`compute_series`,
//! `compute_cashflows`, `compute_npv`, `compute_cumulative_profit`) are the
//! only arithmetic; `evaluate_scenario` and `evaluate_batch` both route every
//! trial through them, so a batched trial is bit-identical to the same inputs
//! evaluated on their own.

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::error::{ModelError, Result};
use crate::model::{
    BatchOutcome, PeriodMatrix, PeriodSeries, ScenarioOutcome, ScenarioParameters, TrialBatch,
    TrialView, UnitEconomics, with_baseline_period,
};

/// Revenue and cost inputs are monthly per-unit figures.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Market size, share and sales over the horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSeries {
    pub market_size: Vec<f64>,
    pub market_share: Vec<f64>,
    pub sales: Vec<f64>,
}

/// Annual cash flows derived from sales.
#[derive(Debug, Clone, PartialEq)]
pub struct Cashflows {
    pub revenue: Vec<f64>,
    pub cost: Vec<f64>,
    pub profit: Vec<f64>,
}

/// `initial * Π_{i<=t}(1 + rates[i])` for every t.
fn compound(initial: f64, rates: &[f64]) -> Vec<f64> {
    let mut factor = 1.0;
    rates
        .iter()
        .map(|r| {
            factor *= r + 1.0;
            initial * factor
        })
        .collect()
}

/// Compound market size and share independently, then multiply into sales.
///
/// Both rate vectors must already include the zero period-0 entry and have
/// exactly `periods` elements.
pub fn compute_series(
    initial_size: f64,
    growth_rates: &[f64],
    initial_share: f64,
    share_growth_rates: &[f64],
    periods: usize,
) -> Result<MarketSeries> {
    ModelError::check_len("growth_rates", periods, growth_rates.len())?;
    ModelError::check_len("share_growth_rates", periods, share_growth_rates.len())?;

    let market_size = compound(initial_size, growth_rates);
    let market_share = compound(initial_share, share_growth_rates);
    let sales = market_size
        .iter()
        .zip(&market_share)
        .map(|(size, share)| size * share)
        .collect();

    Ok(MarketSeries {
        market_size,
        market_share,
        sales,
    })
}

/// Annual revenue, cost and profit for monthly per-unit figures.
///
/// Profit grows with `unit_revenue` only for non-negative sales.
#[must_use]
pub fn compute_cashflows(sales: &[f64], unit_revenue: f64, unit_cost: f64) -> Cashflows {
    let revenue: Vec<f64> = sales
        .iter()
        .map(|s| s * unit_revenue * MONTHS_PER_YEAR)
        .collect();
    let cost: Vec<f64> = sales
        .iter()
        .map(|s| s * unit_cost * MONTHS_PER_YEAR)
        .collect();
    let profit = revenue.iter().zip(&cost).map(|(r, c)| r - c).collect();

    Cashflows {
        revenue,
        cost,
        profit,
    }
}

fn check_discount_rate(discount_rate: f64) -> Result<()> {
    if discount_rate.is_finite() && discount_rate > -1.0 {
        Ok(())
    } else {
        Err(ModelError::invalid(
            "discount_rate",
            discount_rate,
            "discount rate must be finite and greater than -1",
        ))
    }
}

/// Present value of the profit stream minus the upfront cost.
///
/// Profit of period `t` is discounted over `t + 1` years, i.e. each period's
/// cash flow lands at the end of its year.
pub fn compute_npv(profit: &[f64], discount_rate: f64, total_cost: f64) -> Result<f64> {
    check_discount_rate(discount_rate)?;
    let base = 1.0 + discount_rate;
    let present_value: f64 = profit
        .iter()
        .enumerate()
        .map(|(t, p)| p / base.powi(t as i32 + 1))
        .sum();
    Ok(present_value - total_cost)
}

/// Running profit with the full upfront cost subtracted from every point.
#[must_use]
pub fn compute_cumulative_profit(profit: &[f64], total_cost: f64) -> Vec<f64> {
    let mut running = 0.0;
    profit
        .iter()
        .map(|p| {
            running += p;
            running - total_cost
        })
        .collect()
}

fn evaluate_trial(
    trial: TrialView<'_>,
    economics: &UnitEconomics,
    periods: usize,
) -> Result<(PeriodSeries, f64)> {
    let market = compute_series(
        trial.initial_market_size,
        trial.market_growth_rates,
        trial.initial_market_share,
        trial.share_growth_rates,
        periods,
    )?;
    let cashflows = compute_cashflows(&market.sales, economics.unit_revenue, economics.unit_cost);
    let npv = compute_npv(&cashflows.profit, economics.discount_rate, trial.total_cost)?;
    let cumulative_profit = compute_cumulative_profit(&cashflows.profit, trial.total_cost);

    let series = PeriodSeries {
        market_size: market.market_size,
        market_share: market.market_share,
        sales: market.sales,
        annual_revenue: cashflows.revenue,
        annual_cost: cashflows.cost,
        profit: cashflows.profit,
        cumulative_profit,
    };
    Ok((series, npv))
}

/// Evaluate a single scenario (the deterministic base case, or one trial
/// pulled out of a batch).
pub fn evaluate_scenario(
    params: &ScenarioParameters,
    economics: &UnitEconomics,
) -> Result<ScenarioOutcome> {
    ModelError::check_len(
        "share_growth_rates",
        params.market_growth_rates.len(),
        params.share_growth_rates.len(),
    )?;
    let horizon = params.horizon();
    let market_growth = with_baseline_period(&params.market_growth_rates);
    let share_growth = with_baseline_period(&params.share_growth_rates);

    let trial = TrialView {
        initial_market_size: params.initial_market_size,
        market_growth_rates: &market_growth,
        initial_market_share: params.initial_market_share,
        share_growth_rates: &share_growth,
        total_cost: params.total_cost(),
    };
    let (series, net_present_value) = evaluate_trial(trial, economics, horizon)?;
    Ok(ScenarioOutcome {
        series,
        net_present_value,
    })
}

/// Evaluate every trial of a batch. Output order matches trial order even
/// when trials are evaluated in parallel.
pub fn evaluate_batch(
    batch: &TrialBatch,
    economics: &UnitEconomics,
    horizon: usize,
) -> Result<BatchOutcome> {
    batch.validate_shape(horizon)?;
    check_discount_rate(economics.discount_rate)?;

    let n = batch.n_trials();
    let run = |i: usize| -> Result<(Vec<f64>, f64)> {
        let (series, npv) = evaluate_trial(batch.trial(i), economics, horizon)?;
        Ok((series.cumulative_profit, npv))
    };

    #[cfg(feature = "parallel")]
    let rows: Vec<(Vec<f64>, f64)> = (0..n).into_par_iter().map(run).collect::<Result<_>>()?;
    #[cfg(not(feature = "parallel"))]
    let rows: Vec<(Vec<f64>, f64)> = (0..n).map(run).collect::<Result<_>>()?;

    let mut npv = Vec::with_capacity(n);
    let mut cumulative = Vec::with_capacity(n * horizon);
    for (row, value) in rows {
        cumulative.extend(row);
        npv.push(value);
    }

    Ok(BatchOutcome {
        npv,
        cumulative_profit: PeriodMatrix::from_data(n, horizon, cumulative)?,
    })
}
