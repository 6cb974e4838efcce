use clap::Parser;
use launch_npv::{Report, init_logging, render_text};
use launch_npv_core::{SimulationConfig, run_base_case, run_simulation};

#[derive(Parser, Debug)]
#[command(name = "launch-npv")]
#[command(about = "Monte Carlo NPV distribution of a product launch")]
struct Args {
    /// Number of Monte Carlo trials
    #[arg(short = 'n', long)]
    trials: Option<usize>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of yearly periods
    #[arg(long)]
    horizon: Option<usize>,

    /// Monthly revenue per unit
    #[arg(long)]
    unit_revenue: Option<f64>,

    /// Monthly cost per unit
    #[arg(long)]
    unit_cost: Option<f64>,

    /// Annual discount rate
    #[arg(long)]
    discount_rate: Option<f64>,

    /// Clamp negative market size draws to zero
    #[arg(long)]
    truncate_market_size: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn to_config(&self) -> SimulationConfig {
        let defaults = SimulationConfig::default();
        SimulationConfig {
            n_trials: self.trials.unwrap_or(defaults.n_trials),
            random_seed: self.seed.unwrap_or(defaults.random_seed),
            horizon: self.horizon.unwrap_or(defaults.horizon),
            unit_revenue: self.unit_revenue.unwrap_or(defaults.unit_revenue),
            unit_cost: self.unit_cost.unwrap_or(defaults.unit_cost),
            discount_rate: self.discount_rate.unwrap_or(defaults.discount_rate),
            truncate_market_size: self.truncate_market_size,
            ..defaults
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level)?;

    let config = args.to_config();
    tracing::info!(
        n_trials = config.n_trials,
        seed = config.random_seed,
        "Running launch NPV simulation"
    );

    let base = run_base_case(&config)?;
    let result = run_simulation(&config)?;
    let report = Report::new(&config, &base, &result);

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", render_text(&report));
    }

    Ok(())
}
