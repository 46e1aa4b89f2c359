use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput};
use crate::valuation::dcf::{dcf_valuation, TerminalBasis, DEFAULT_PROJECTION_YEARS};
use crate::ValuationResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

fn default_projection_years() -> u32 {
    DEFAULT_PROJECTION_YEARS
}

/// Input for deterministic growth-scenario projections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInput {
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
    /// Explicit projection horizon in years.
    #[serde(default = "default_projection_years")]
    pub projection_years: u32,
    /// Cash-flow basis for the terminal value.
    #[serde(default)]
    pub terminal_basis: TerminalBasis,
}

/// One named growth scenario: its FCF path and deterministic valuation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthScenario {
    pub name: String,
    pub growth_rate: f64,
    /// Projected FCF for years 0..=projection_years.
    pub fcf_path: Vec<f64>,
    pub valuation: f64,
}

/// Output of the scenario projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutput {
    pub scenarios: Vec<GrowthScenario>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project conservative / expected / optimistic growth scenarios.
///
/// The three scenarios take the low bound, the midpoint, and the high bound
/// of the growth band, each valued through the same DCF kernel as the Monte
/// Carlo engine. No randomness is involved.
pub fn project_scenarios(
    input: &ScenarioInput,
) -> ValuationResult<ComputationOutput<ScenarioOutput>> {
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
    if let Some(w) = super::degenerate_economics_warning(input.discount_rate, input.terminal_rate)
    {
        warnings.push(w);
    }

    let expected = (input.growth_low + input.growth_high) / 2.0;
    let cases = [
        ("conservative", input.growth_low),
        ("expected", expected),
        ("optimistic", input.growth_high),
    ];

    let scenarios = cases
        .iter()
        .map(|&(name, growth_rate)| {
            let mut fcf_path = Vec::with_capacity(input.projection_years as usize + 1);
            let mut fcf = input.base_fcf;
            fcf_path.push(fcf);
            for _ in 1..=input.projection_years {
                fcf *= 1.0 + growth_rate;
                fcf_path.push(fcf);
            }

            let valuation = dcf_valuation(
                input.base_fcf,
                growth_rate,
                input.discount_rate,
                input.terminal_rate,
                input.projection_years,
                input.terminal_basis,
            );

            GrowthScenario {
                name: name.to_string(),
                growth_rate,
                fcf_path,
                valuation,
            }
        })
        .collect();

    let output = ScenarioOutput { scenarios };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Deterministic DCF growth scenarios",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValuationError;

    fn basic_input() -> ScenarioInput {
        ScenarioInput {
            base_fcf: 100_000.0,
            growth_low: 0.05,
            growth_high: 0.10,
            discount_rate: 0.10,
            terminal_rate: 0.02,
            projection_years: 5,
            terminal_basis: TerminalBasis::BaseFcf,
        }
    }

    #[test]
    fn test_three_scenarios_at_band_points() {
        let result = project_scenarios(&basic_input()).unwrap();
        let s = &result.result.scenarios;
        assert_eq!(s.len(), 3);
        assert_eq!(s[0].name, "conservative");
        assert_eq!(s[0].growth_rate, 0.05);
        assert_eq!(s[1].name, "expected");
        assert_eq!(s[1].growth_rate, 0.075);
        assert_eq!(s[2].name, "optimistic");
        assert_eq!(s[2].growth_rate, 0.10);
    }

    #[test]
    fn test_fcf_path_compounds_from_base() {
        let result = project_scenarios(&basic_input()).unwrap();
        let optimistic = &result.result.scenarios[2];
        assert_eq!(optimistic.fcf_path.len(), 6);
        assert_eq!(optimistic.fcf_path[0], 100_000.0);
        let expected_y3 = 100_000.0 * 1.10_f64 * 1.10 * 1.10;
        assert!((optimistic.fcf_path[3] - expected_y3).abs() < 1e-6);
    }

    #[test]
    fn test_valuations_match_kernel() {
        let input = basic_input();
        let result = project_scenarios(&input).unwrap();
        for s in &result.result.scenarios {
            let expected = dcf_valuation(
                input.base_fcf,
                s.growth_rate,
                input.discount_rate,
                input.terminal_rate,
                input.projection_years,
                input.terminal_basis,
            );
            assert_eq!(s.valuation, expected);
        }
    }

    #[test]
    fn test_valuations_increase_with_growth() {
        let result = project_scenarios(&basic_input()).unwrap();
        let s = &result.result.scenarios;
        assert!(s[0].valuation < s[1].valuation);
        assert!(s[1].valuation < s[2].valuation);
    }

    #[test]
    fn test_degenerate_band_collapses_scenarios() {
        let mut input = basic_input();
        input.growth_high = input.growth_low;
        let result = project_scenarios(&input).unwrap();
        let s = &result.result.scenarios;
        assert_eq!(s[0].valuation, s[1].valuation);
        assert_eq!(s[1].valuation, s[2].valuation);
    }

    #[test]
    fn test_equal_rates_rejected() {
        let mut input = basic_input();
        input.terminal_rate = input.discount_rate;
        let err = project_scenarios(&input).unwrap_err();
        assert!(matches!(err, ValuationError::InvalidInput { .. }));
    }
}
