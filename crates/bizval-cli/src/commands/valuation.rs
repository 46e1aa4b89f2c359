use clap::Args;
use serde_json::Value;

use bizval_core::valuation::dcf::TerminalBasis;
use bizval_core::valuation::monte_carlo::{self, McValuationInput, NonFinitePolicy};
use bizval_core::valuation::scenarios::{self, ScenarioInput};

use crate::input;

/// Arguments for the Monte Carlo valuation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ValueArgs {
    /// Base-year free cash flow
    #[arg(long)]
    pub fcf: Option<f64>,

    /// Lower bound of the annual growth-rate band (e.g. 0.05 for 5%)
    #[arg(long)]
    pub growth_low: Option<f64>,

    /// Upper bound of the annual growth-rate band
    #[arg(long)]
    pub growth_high: Option<f64>,

    /// Discount rate (cost of capital)
    #[arg(long)]
    pub discount_rate: Option<f64>,

    /// Terminal growth rate
    #[arg(long)]
    pub terminal_rate: Option<f64>,

    /// Number of simulation paths
    #[arg(long, default_value_t = 1_000)]
    pub iterations: u32,

    /// Projection horizon in years
    #[arg(long, default_value_t = 5)]
    pub years: u32,

    /// RNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Base the terminal value on the projected final-year cash flow
    /// instead of the base-year figure
    #[arg(long)]
    pub conventional_terminal: bool,

    /// Drop Inf/NaN paths instead of failing the run
    #[arg(long)]
    pub exclude_non_finite: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for deterministic scenario projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScenariosArgs {
    /// Base-year free cash flow
    #[arg(long)]
    pub fcf: Option<f64>,

    /// Lower bound of the annual growth-rate band
    #[arg(long)]
    pub growth_low: Option<f64>,

    /// Upper bound of the annual growth-rate band
    #[arg(long)]
    pub growth_high: Option<f64>,

    /// Discount rate (cost of capital)
    #[arg(long)]
    pub discount_rate: Option<f64>,

    /// Terminal growth rate
    #[arg(long)]
    pub terminal_rate: Option<f64>,

    /// Projection horizon in years
    #[arg(long, default_value_t = 5)]
    pub years: u32,

    /// Base the terminal value on the projected final-year cash flow
    /// instead of the base-year figure
    #[arg(long)]
    pub conventional_terminal: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_value(args: ValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mc_input: McValuationInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        McValuationInput {
            base_fcf: require(args.fcf, "--fcf")?,
            growth_low: require(args.growth_low, "--growth-low")?,
            growth_high: require(args.growth_high, "--growth-high")?,
            discount_rate: require(args.discount_rate, "--discount-rate")?,
            terminal_rate: require(args.terminal_rate, "--terminal-rate")?,
            iterations: args.iterations,
            projection_years: args.years,
            terminal_basis: terminal_basis(args.conventional_terminal),
            growth_distribution: None,
            non_finite: if args.exclude_non_finite {
                NonFinitePolicy::Exclude
            } else {
                NonFinitePolicy::Fail
            },
            seed: args.seed,
        }
    };

    let result = monte_carlo::run_valuation(&mc_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_scenarios(args: ScenariosArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario_input: ScenarioInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ScenarioInput {
            base_fcf: require(args.fcf, "--fcf")?,
            growth_low: require(args.growth_low, "--growth-low")?,
            growth_high: require(args.growth_high, "--growth-high")?,
            discount_rate: require(args.discount_rate, "--discount-rate")?,
            terminal_rate: require(args.terminal_rate, "--terminal-rate")?,
            projection_years: args.years,
            terminal_basis: terminal_basis(args.conventional_terminal),
        }
    };

    let result = scenarios::project_scenarios(&scenario_input)?;
    Ok(serde_json::to_value(result)?)
}

fn terminal_basis(conventional: bool) -> TerminalBasis {
    if conventional {
        TerminalBasis::FinalYearFcf
    } else {
        TerminalBasis::BaseFcf
    }
}

fn require<T>(value: Option<T>, flag: &str) -> Result<T, Box<dyn std::error::Error>> {
    value.ok_or_else(|| format!("{flag} is required (or provide --input / piped JSON)").into())
}
