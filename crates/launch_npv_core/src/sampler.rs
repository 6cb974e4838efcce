//! Parameter sampling for Monte Carlo trials
//!
//! Each `sample_*` method draws `n` independent values of one uncertain input
//! from the distribution configured in [`SimulationConfig`]. The RNG is passed
//! in explicitly, so the draw order of the caller fully determines a run.

use rand::Rng;

use crate::config::SimulationConfig;
use crate::error::{ModelError, Result};
use crate::model::PeriodMatrix;

/// Draws trial-indexed parameter vectors for the uncertain launch inputs.
#[derive(Debug, Clone, Copy)]
pub struct ParameterSampler<'a> {
    config: &'a SimulationConfig,
}

fn check_count(n: usize) -> Result<()> {
    if n == 0 {
        return Err(ModelError::invalid(
            "n_trials",
            0.0,
            "sample count must be positive",
        ));
    }
    Ok(())
}

fn matrix_len(n: usize, periods: usize) -> Result<usize> {
    check_count(n)?;
    n.checked_mul(periods).ok_or(ModelError::invalid(
        "n_trials",
        n as f64,
        "trial count times periods overflows",
    ))
}

impl<'a> ParameterSampler<'a> {
    #[must_use]
    pub fn new(config: &'a SimulationConfig) -> Self {
        Self { config }
    }

    /// Normal market size draws. May be negative; see [`clamp_negative`].
    pub fn sample_market_size<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Result<Vec<f64>> {
        check_count(n)?;
        self.config
            .market_size_distribution()
            .sample_n(rng, "market_size", n)
    }

    /// Uniform R&D cost draws.
    pub fn sample_rd_cost<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Result<Vec<f64>> {
        check_count(n)?;
        self.config.rd_cost_distribution().sample_n(rng, "rd_cost", n)
    }

    /// Lognormal trials cost draws matching the configured arithmetic mean and std.
    pub fn sample_trials_cost<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Result<Vec<f64>> {
        check_count(n)?;
        self.config
            .trials_cost_distribution()
            .sample_n(rng, "trials_cost", n)
    }

    /// `[n × periods]` triangular market growth increments.
    pub fn sample_market_growth<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        n: usize,
        periods: usize,
    ) -> Result<PeriodMatrix> {
        let len = matrix_len(n, periods)?;
        let values = self
            .config
            .market_growth_distribution()
            .sample_n(rng, "market_growth", len)?;
        PeriodMatrix::from_data(n, periods, values)
    }

    /// `[n × periods]` triangular share growth increments.
    pub fn sample_share_growth<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        n: usize,
        periods: usize,
    ) -> Result<PeriodMatrix> {
        let len = matrix_len(n, periods)?;
        let values = self
            .config
            .share_growth_distribution()
            .sample_n(rng, "share_growth", len)?;
        PeriodMatrix::from_data(n, periods, values)
    }
}

/// Clamp negative values to zero in place, returning how many were clamped.
pub fn clamp_negative(values: &mut [f64]) -> usize {
    let mut clamped = 0;
    for v in values.iter_mut().filter(|v| **v < 0.0) {
        *v = 0.0;
        clamped += 1;
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_zero_count_rejected() {
        let config = SimulationConfig::default();
        let sampler = ParameterSampler::new(&config);
        let mut rng = SmallRng::seed_from_u64(1);

        assert!(matches!(
            sampler.sample_market_size(&mut rng, 0),
            Err(ModelError::InvalidParameter {
                parameter: "n_trials",
                ..
            })
        ));
        assert!(sampler.sample_share_growth(&mut rng, 0, 4).is_err());
    }

    #[test]
    fn test_oversized_growth_matrix_rejected() {
        let config = SimulationConfig::default();
        let sampler = ParameterSampler::new(&config);
        let mut rng = SmallRng::seed_from_u64(1);

        for result in [
            sampler.sample_market_growth(&mut rng, usize::MAX / 2, 4),
            sampler.sample_share_growth(&mut rng, usize::MAX / 2, 4),
        ] {
            assert!(matches!(
                result,
                Err(ModelError::InvalidParameter {
                    parameter: "n_trials",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_trials_cost_rejects_non_positive_mean() {
        let config = SimulationConfig {
            trials_cost_mean: 0.0,
            ..Default::default()
        };
        let sampler = ParameterSampler::new(&config);
        let mut rng = SmallRng::seed_from_u64(1);

        let err = sampler.sample_trials_cost(&mut rng, 10).unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidParameter {
                parameter: "trials_cost",
                ..
            }
        ));
    }

    #[test]
    fn test_growth_matrix_shape_and_range() {
        let config = SimulationConfig::default();
        let sampler = ParameterSampler::new(&config);
        let mut rng = SmallRng::seed_from_u64(5);

        let growth = sampler.sample_market_growth(&mut rng, 100, 4).unwrap();
        assert_eq!(growth.shape(), (100, 4));
        assert!(growth.data().iter().all(|g| (0.02..=0.06).contains(g)));

        let share = sampler.sample_share_growth(&mut rng, 100, 4).unwrap();
        assert_eq!(share.shape(), (100, 4));
        assert!(share.data().iter().all(|g| (0.15..=0.25).contains(g)));

        let padded = share.with_leading_zero_column();
        assert_eq!(padded.shape(), (100, 5));
        assert!(padded.column(0).iter().all(|g| *g == 0.0));
    }

    #[test]
    fn test_market_size_is_untruncated_normal() {
        let config = SimulationConfig {
            market_size_mean: 0.0,
            market_size_std: 1.0,
            ..Default::default()
        };
        let sampler = ParameterSampler::new(&config);
        let mut rng = SmallRng::seed_from_u64(9);

        let mut draws = sampler.sample_market_size(&mut rng, 1_000).unwrap();
        let negatives = draws.iter().filter(|v| **v < 0.0).count();
        assert!(negatives > 300 && negatives < 700);

        assert_eq!(clamp_negative(&mut draws), negatives);
        assert!(draws.iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn test_same_seed_same_draws() {
        let config = SimulationConfig::default();
        let sampler = ParameterSampler::new(&config);

        let a = sampler
            .sample_rd_cost(&mut SmallRng::seed_from_u64(3), 50)
            .unwrap();
        let b = sampler
            .sample_rd_cost(&mut SmallRng::seed_from_u64(3), 50)
            .unwrap();
        assert_eq!(a, b);
    }
}
