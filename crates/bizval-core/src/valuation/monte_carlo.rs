use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::distribution::{self, GrowthDistribution};
use crate::error::ValuationError;
use crate::stats::{self, HistogramBin};
use crate::types::{with_metadata, ComputationOutput};
use crate::valuation::dcf::{dcf_valuation, TerminalBasis, DEFAULT_PROJECTION_YEARS};
use crate::ValuationResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How to treat simulation paths that produce Inf or NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NonFinitePolicy {
    /// Abort the whole run on the first non-finite valuation.
    #[default]
    Fail,
    /// Drop non-finite paths and report how many were excluded.
    Exclude,
}

fn default_iterations() -> u32 {
    1_000
}

fn default_projection_years() -> u32 {
    DEFAULT_PROJECTION_YEARS
}

/// Input for a Monte Carlo business valuation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McValuationInput {
    /// Base-year free cash flow. Must be positive.
    pub base_fcf: f64,
    /// Lower bound of the annual growth-rate band.
    pub growth_low: f64,
    /// Upper bound of the annual growth-rate band.
    pub growth_high: f64,
    /// Discount rate (cost of capital), as a decimal.
    pub discount_rate: f64,
    /// Perpetual growth rate for the terminal value.
    pub terminal_rate: f64,
    /// Number of simulation paths.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Explicit projection horizon in years.
    #[serde(default = "default_projection_years")]
    pub projection_years: u32,
    /// Cash-flow basis for the terminal value.
    #[serde(default)]
    pub terminal_basis: TerminalBasis,
    /// Overrides the default uniform draw over [growth_low, growth_high].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_distribution: Option<GrowthDistribution>,
    /// Policy for paths that come out Inf or NaN.
    #[serde(default)]
    pub non_finite: NonFinitePolicy,
    /// Seed for reproducible runs. Fresh entropy when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Output of a Monte Carlo business valuation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McValuationOutput {
    /// Arithmetic mean of all included valuations.
    pub mean: f64,
    /// 10th percentile (linear interpolation).
    pub p10: f64,
    /// 90th percentile (linear interpolation).
    pub p90: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// 20-bin histogram of the valuation distribution.
    pub histogram: Vec<HistogramBin>,
    /// Every included valuation, in simulation order, so callers can render
    /// their own charts without re-simulating.
    pub all_valuations: Vec<f64>,
    /// Paths included in the statistics.
    pub simulation_count: u32,
    /// Paths dropped under `NonFinitePolicy::Exclude`.
    pub excluded_non_finite: u32,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run a Monte Carlo DCF valuation with an RNG resolved from `input.seed`.
pub fn run_valuation(
    input: &McValuationInput,
) -> ValuationResult<ComputationOutput<McValuationOutput>> {
    let mut rng = match input.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    run_valuation_with_rng(input, &mut rng)
}

/// Run a Monte Carlo DCF valuation with a caller-supplied random source.
///
/// Each path draws one growth rate, values it through the DCF kernel, and
/// records the result. Statistics are computed over a sorted copy while
/// `all_valuations` keeps simulation order. Two runs with the same input
/// and equally-seeded RNGs produce bit-identical sample sequences.
pub fn run_valuation_with_rng<R: Rng>(
    input: &McValuationInput,
    rng: &mut R,
) -> ValuationResult<ComputationOutput<McValuationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    super::validate_market_inputs(
        input.base_fcf,
        input.growth_low,
        input.growth_high,
        input.discount_rate,
        input.terminal_rate,
        input.projection_years,
    )?;
    if input.iterations < 1 {
        return Err(ValuationError::InvalidInput {
            field: "iterations".into(),
            reason: "Must be at least 1".into(),
        });
    }
    if let Some(w) = super::degenerate_economics_warning(input.discount_rate, input.terminal_rate)
    {
        warnings.push(w);
    }

    let growth = input
        .growth_distribution
        .clone()
        .unwrap_or_else(|| GrowthDistribution::uniform(input.growth_low, input.growth_high));

    let n = input.iterations as usize;
    let mut valuations: Vec<f64> = Vec::with_capacity(n);
    let mut excluded: u32 = 0;

    for i in 0..n {
        let g = distribution::sample(rng, &growth)?;
        let v = dcf_valuation(
            input.base_fcf,
            g,
            input.discount_rate,
            input.terminal_rate,
            input.projection_years,
            input.terminal_basis,
        );
        if !v.is_finite() {
            match input.non_finite {
                NonFinitePolicy::Fail => {
                    return Err(ValuationError::NonFiniteValuation(format!(
                        "Path {i} produced {v} (growth rate {g}); inputs are too close to the terminal-value singularity"
                    )));
                }
                NonFinitePolicy::Exclude => {
                    excluded += 1;
                    continue;
                }
            }
        }
        valuations.push(v);
    }

    if valuations.is_empty() {
        return Err(ValuationError::InsufficientData(
            "Every simulation path produced a non-finite valuation".into(),
        ));
    }
    if excluded > 0 {
        warnings.push(format!(
            "{excluded} of {} paths excluded as non-finite",
            input.iterations
        ));
    }

    let mut sorted = valuations.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let summary = stats::summarize(&sorted);
    let histogram = stats::build_histogram(&sorted, 20);

    let output = McValuationOutput {
        mean: summary.mean,
        p10: summary.p10,
        p90: summary.p90,
        median: summary.median,
        std_dev: summary.std_dev,
        min: summary.min,
        max: summary.max,
        histogram,
        simulation_count: valuations.len() as u32,
        excluded_non_finite: excluded,
        all_valuations: valuations,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monte Carlo DCF (Gordon-growth terminal value)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
