//! Command-line front end for the launch NPV Monte Carlo engine
//!
//! Runs the deterministic base case and a Monte Carlo simulation with
//! optional overrides, then renders a plain-text or JSON report.

pub mod logging;
pub mod report;

pub use logging::init_logging;
pub use report::{Report, render_text};
