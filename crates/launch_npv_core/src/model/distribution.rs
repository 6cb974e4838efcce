use rand::{Rng, distr::Distribution};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Probability distribution of one uncertain launch input.
///
/// Zero-variance shapes (`std_dev == 0`, `min == max`, `min == mode == max`)
/// are valid and collapse to a point mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ParameterDistribution {
    Normal {
        mean: f64,
        std_dev: f64,
    },
    Uniform {
        min: f64,
        max: f64,
    },
    /// Lognormal parameterized by the arithmetic mean and standard deviation
    /// of the sampled quantity itself, not of its logarithm.
    LogNormal {
        mean: f64,
        std_dev: f64,
    },
    Triangular {
        min: f64,
        mode: f64,
        max: f64,
    },
}

/// Location and scale of the normal distribution underlying a lognormal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogNormalParams {
    pub mu: f64,
    pub sigma: f64,
}

/// Convert a target arithmetic mean/std of a lognormal quantity into the
/// parameters of the normal distribution whose exponential has those moments.
///
/// `sigma = sqrt(ln(1 + (std/mean)^2))`, `mu = ln(mean) - sigma^2 / 2`
pub fn lognormal_moment_match(mean: f64, std_dev: f64) -> Result<LogNormalParams> {
    if !mean.is_finite() || mean <= 0.0 {
        return Err(ModelError::invalid(
            "lognormal_mean",
            mean,
            "lognormal mean must be positive and finite",
        ));
    }
    if !std_dev.is_finite() || std_dev < 0.0 {
        return Err(ModelError::invalid(
            "lognormal_std",
            std_dev,
            "lognormal std_dev must be non-negative and finite",
        ));
    }
    let sigma = (1.0 + (std_dev / mean).powi(2)).ln().sqrt();
    let mu = mean.ln() - sigma.powi(2) / 2.0;
    Ok(LogNormalParams { mu, sigma })
}

fn finite(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ModelError::invalid(
            parameter,
            value,
            "distribution parameters must be finite",
        ))
    }
}

impl ParameterDistribution {
    /// Check the shape parameters, naming the offending input as `parameter`.
    pub fn validate(&self, parameter: &'static str) -> Result<()> {
        match *self {
            ParameterDistribution::Normal { mean, std_dev } => {
                finite(parameter, mean)?;
                finite(parameter, std_dev)?;
                if std_dev < 0.0 {
                    return Err(ModelError::invalid(
                        parameter,
                        std_dev,
                        "normal std_dev must be non-negative",
                    ));
                }
            }
            ParameterDistribution::Uniform { min, max } => {
                finite(parameter, min)?;
                finite(parameter, max)?;
                if min > max {
                    return Err(ModelError::invalid(
                        parameter,
                        min,
                        "uniform min must not exceed max",
                    ));
                }
            }
            ParameterDistribution::LogNormal { mean, std_dev } => {
                lognormal_moment_match(mean, std_dev).map_err(|e| match e {
                    ModelError::InvalidParameter { value, reason, .. } => {
                        ModelError::invalid(parameter, value, reason)
                    }
                    other => other,
                })?;
            }
            ParameterDistribution::Triangular { min, mode, max } => {
                finite(parameter, min)?;
                finite(parameter, mode)?;
                finite(parameter, max)?;
                if min > mode {
                    return Err(ModelError::invalid(
                        parameter,
                        min,
                        "triangular min must not exceed mode",
                    ));
                }
                if mode > max {
                    return Err(ModelError::invalid(
                        parameter,
                        mode,
                        "triangular mode must not exceed max",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Central value used for the deterministic base case: the mean of a
    /// normal or lognormal, the midpoint of a uniform, the mode of a triangular.
    #[must_use]
    pub fn point_estimate(&self) -> f64 {
        match *self {
            ParameterDistribution::Normal { mean, .. }
            | ParameterDistribution::LogNormal { mean, .. } => mean,
            ParameterDistribution::Uniform { min, max } => (min + max) / 2.0,
            ParameterDistribution::Triangular { mode, .. } => mode,
        }
    }

    /// Whether the distribution has zero variance.
    #[must_use]
    pub fn is_point_mass(&self) -> bool {
        match *self {
            ParameterDistribution::Normal { std_dev, .. }
            | ParameterDistribution::LogNormal { std_dev, .. } => std_dev == 0.0,
            ParameterDistribution::Uniform { min, max } => min == max,
            ParameterDistribution::Triangular { min, max, .. } => min == max,
        }
    }

    /// Draw `n` independent values.
    ///
    /// A point mass yields `n` copies of its value without touching `rng`.
    pub fn sample_n<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        parameter: &'static str,
        n: usize,
    ) -> Result<Vec<f64>> {
        self.validate(parameter)?;
        if self.is_point_mass() {
            return Ok(vec![self.point_estimate(); n]);
        }
        let invalid = |reason| ModelError::invalid(parameter, f64::NAN, reason);

        match *self {
            ParameterDistribution::Normal { mean, std_dev } => {
                let dist = rand_distr::Normal::new(mean, std_dev)
                    .map_err(|_| invalid("normal std_dev must be non-negative and finite"))?;
                Ok(draw(&dist, rng, n))
            }
            ParameterDistribution::Uniform { min, max } => {
                let dist = rand::distr::Uniform::new_inclusive(min, max)
                    .map_err(|_| invalid("uniform range must be finite and ordered"))?;
                Ok(draw(&dist, rng, n))
            }
            ParameterDistribution::LogNormal { mean, std_dev } => {
                let LogNormalParams { mu, sigma } = lognormal_moment_match(mean, std_dev)?;
                let dist = rand_distr::LogNormal::new(mu, sigma)
                    .map_err(|_| invalid("lognormal sigma must be non-negative and finite"))?;
                Ok(draw(&dist, rng, n))
            }
            ParameterDistribution::Triangular { min, mode, max } => {
                // rand_distr orders the arguments (min, max, mode)
                let dist = rand_distr::Triangular::new(min, max, mode)
                    .map_err(|_| invalid("triangular requires min <= mode <= max"))?;
                Ok(draw(&dist, rng, n))
            }
        }
    }
}

fn draw<D, R>(dist: &D, rng: &mut R, n: usize) -> Vec<f64>
where
    D: Distribution<f64>,
    R: Rng + ?Sized,
{
    (0..n).map(|_| dist.sample(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    fn std_dev(values: &[f64]) -> f64 {
        let m = mean(values);
        (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
    }

    #[test]
    fn test_moment_match_formula() {
        let params = lognormal_moment_match(150_000_000.0, 30_000_000.0).unwrap();
        let expected_sigma = (1.0f64 + 0.04).ln().sqrt();
        assert!((params.sigma - expected_sigma).abs() < 1e-15);
        assert!((params.mu - (150_000_000.0f64.ln() - expected_sigma.powi(2) / 2.0)).abs() < 1e-12);

        // Round trip back to the arithmetic moments
        let implied_mean = (params.mu + params.sigma.powi(2) / 2.0).exp();
        assert!((implied_mean / 150_000_000.0 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_moment_match_rejects_non_positive_mean() {
        for bad in [0.0, -5.0, f64::NAN] {
            let err = lognormal_moment_match(bad, 1.0).unwrap_err();
            assert!(matches!(err, ModelError::InvalidParameter { .. }));
        }
        assert!(lognormal_moment_match(1.0, -0.1).is_err());
    }

    #[test]
    fn test_lognormal_sample_moments() {
        let mut rng = SmallRng::seed_from_u64(7);
        let dist = ParameterDistribution::LogNormal {
            mean: 150_000_000.0,
            std_dev: 30_000_000.0,
        };
        let draws = dist.sample_n(&mut rng, "trials_cost", 50_000).unwrap();

        assert!(draws.iter().all(|v| *v > 0.0));
        assert!((mean(&draws) / 150_000_000.0 - 1.0).abs() < 0.01);
        assert!((std_dev(&draws) / 30_000_000.0 - 1.0).abs() < 0.03);
    }

    #[test]
    fn test_triangular_bounds_and_mean() {
        let mut rng = SmallRng::seed_from_u64(11);
        let dist = ParameterDistribution::Triangular {
            min: 0.02,
            mode: 0.03,
            max: 0.06,
        };
        let draws = dist.sample_n(&mut rng, "market_growth", 20_000).unwrap();

        assert!(draws.iter().all(|v| (0.02..=0.06).contains(v)));
        // Triangular mean is (min + mode + max) / 3
        assert!((mean(&draws) - 0.11 / 3.0).abs() < 5e-4);
    }

    #[test]
    fn test_uniform_bounds() {
        let mut rng = SmallRng::seed_from_u64(3);
        let dist = ParameterDistribution::Uniform {
            min: 600_000_000.0,
            max: 800_000_000.0,
        };
        let draws = dist.sample_n(&mut rng, "rd_cost", 10_000).unwrap();
        assert!(draws.iter().all(|v| (600_000_000.0..=800_000_000.0).contains(v)));
        assert!((mean(&draws) / 700_000_000.0 - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_point_masses() {
        let mut rng = SmallRng::seed_from_u64(0);
        let cases = [
            ParameterDistribution::Normal {
                mean: 2.0,
                std_dev: 0.0,
            },
            ParameterDistribution::Uniform { min: 2.0, max: 2.0 },
            ParameterDistribution::LogNormal {
                mean: 2.0,
                std_dev: 0.0,
            },
            ParameterDistribution::Triangular {
                min: 2.0,
                mode: 2.0,
                max: 2.0,
            },
        ];
        for dist in cases {
            let draws = dist.sample_n(&mut rng, "point", 100).unwrap();
            assert!(draws.iter().all(|v| *v == 2.0), "{dist:?} drew {draws:?}");
            assert_eq!(dist.point_estimate(), 2.0);
        }
    }

    #[test]
    fn test_invalid_shapes() {
        let bad = [
            ParameterDistribution::Normal {
                mean: 0.0,
                std_dev: -1.0,
            },
            ParameterDistribution::Uniform { min: 2.0, max: 1.0 },
            ParameterDistribution::LogNormal {
                mean: 0.0,
                std_dev: 1.0,
            },
            ParameterDistribution::Triangular {
                min: 0.1,
                mode: 0.05,
                max: 0.2,
            },
            ParameterDistribution::Triangular {
                min: 0.1,
                mode: 0.3,
                max: 0.2,
            },
            ParameterDistribution::Normal {
                mean: f64::INFINITY,
                std_dev: 1.0,
            },
        ];
        for dist in bad {
            let err = dist.validate("input").unwrap_err();
            assert!(
                matches!(err, ModelError::InvalidParameter { parameter: "input", .. }),
                "{dist:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_serde_tagging() {
        let dist = ParameterDistribution::Triangular {
            min: 0.15,
            mode: 0.2,
            max: 0.25,
        };
        let json = serde_json::to_string(&dist).unwrap();
        assert!(json.contains("\"type\":\"Triangular\""));
        let back: ParameterDistribution = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dist);
    }
}
