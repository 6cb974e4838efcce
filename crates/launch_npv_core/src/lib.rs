//! Monte Carlo NPV engine for a product launch
//!
//! This crate estimates the distribution of net present value for a
//! pharmaceutical-style launch over a short horizon. It supports:
//! - Sampling of uncertain inputs (normal, uniform, moment-matched lognormal, triangular)
//! - A deterministic financial model: compounding market size and share,
//!   annual cash flows, cumulative profit and discounted NPV
//! - Scalar and batched evaluation sharing one computation
//! - Seeded, reproducible Monte Carlo runs with loss probability and summary statistics
//!
//! ```ignore
//! use launch_npv_core::{SimulationConfig, run_base_case, run_simulation};
//!
//! let config = SimulationConfig::default();
//! let base = run_base_case(&config)?;
//! let result = run_simulation(&config)?;
//! println!("base NPV {:.0}, P(loss) {:.3}", base.net_pv, result.loss_probability);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod config;
pub mod error;
pub mod financial;
pub mod model;
pub mod sampler;
pub mod simulation;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::SimulationConfig;
pub use error::ModelError;
pub use simulation::{run_base_case, run_simulation, run_simulation_with_rng};
