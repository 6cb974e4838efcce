mod distribution;
mod matrix;
mod results;
mod scenario;

pub use distribution::{LogNormalParams, ParameterDistribution, lognormal_moment_match};
pub use matrix::PeriodMatrix;
pub use results::{
    BaseCaseResult, BatchOutcome, NpvSummary, SUMMARY_PERCENTILES, SampledParameters,
    SimulationResult, loss_probability, percentile_of_sorted,
};
pub use scenario::{
    PeriodSeries, ScenarioOutcome, ScenarioParameters, TrialBatch, TrialView, UnitEconomics,
    with_baseline_period,
};
