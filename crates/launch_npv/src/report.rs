//! Text and JSON rendering of a base case plus Monte Carlo run.

use std::fmt::Write;

use launch_npv_core::SimulationConfig;
use launch_npv_core::model::{BaseCaseResult, NpvSummary, SimulationResult};
use serde::Serialize;

/// Everything printed for one invocation.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub config: SimulationConfig,
    pub base_case_npv: f64,
    pub base_case_net_profit: Vec<f64>,
    pub summary: NpvSummary,
    pub negative_market_size_draws: usize,
}

impl Report {
    #[must_use]
    pub fn new(config: &SimulationConfig, base: &BaseCaseResult, result: &SimulationResult) -> Self {
        Self {
            config: config.clone(),
            base_case_npv: base.net_pv,
            base_case_net_profit: base.net_profit().to_vec(),
            summary: result.summary.clone(),
            negative_market_size_draws: result.negative_market_size_draws,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Format a currency amount in millions, e.g. `185.40M`.
fn millions(value: f64) -> String {
    format!("{:.2}M", value / 1_000_000.0)
}

#[must_use]
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    // Writing to a String cannot fail
    let _ = writeln!(out, "Base case");
    let _ = writeln!(out, "  NPV:        {}", millions(report.base_case_npv));
    for (year, value) in report.base_case_net_profit.iter().enumerate() {
        let _ = writeln!(out, "  Net profit year {}: {}", year + 1, millions(*value));
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Monte Carlo ({} trials, seed {})",
        summary.num_trials, report.config.random_seed
    );
    let _ = writeln!(out, "  Mean NPV:   {}", millions(summary.mean));
    let _ = writeln!(out, "  Std dev:    {}", millions(summary.std_dev));
    let _ = writeln!(
        out,
        "  Range:      {} .. {}",
        millions(summary.min),
        millions(summary.max)
    );
    for (p, value) in &summary.percentile_values {
        let _ = writeln!(out, "  P{:<2}:        {}", (p * 100.0).round(), millions(*value));
    }
    let _ = writeln!(
        out,
        "  P(loss):    {:.2}%",
        summary.loss_probability * 100.0
    );

    if report.negative_market_size_draws > 0 {
        let action = if report.config.truncate_market_size {
            "clamped to zero"
        } else {
            "left untruncated"
        };
        let _ = writeln!(
            out,
            "  Note: {} negative market size draws ({action})",
            report.negative_market_size_draws
        );
    }

    out
}
