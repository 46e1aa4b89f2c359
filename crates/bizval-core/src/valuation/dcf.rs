use serde::{Deserialize, Serialize};

/// Number of explicit projection years used when none is specified.
pub const DEFAULT_PROJECTION_YEARS: u32 = 5;

/// Cash-flow basis for the Gordon-growth terminal value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalBasis {
    /// Year-0 FCF: the perpetuity capitalises the base-year cash flow
    /// rather than the projected one. Kept as the default for backward
    /// compatibility with existing dashboards.
    #[default]
    BaseFcf,
    /// Final projected-year FCF, the conventional Gordon-growth form.
    FinalYearFcf,
}

/// Value a single growth path: `projection_years` of explicit FCF plus a
/// discounted Gordon-growth terminal value.
///
/// Pure arithmetic. The caller validates `discount_rate != terminal_rate`;
/// near the singularity this function will produce huge or non-finite
/// values, which the orchestrator screens per its non-finite policy.
pub fn dcf_valuation(
    base_fcf: f64,
    growth_rate: f64,
    discount_rate: f64,
    terminal_rate: f64,
    projection_years: u32,
    terminal_basis: TerminalBasis,
) -> f64 {
    let mut pv = 0.0_f64;
    let mut discount_factor = 1.0_f64;
    let mut projected_fcf = base_fcf;

    for _ in 1..=projection_years {
        projected_fcf *= 1.0 + growth_rate;
        discount_factor /= 1.0 + discount_rate;
        pv += projected_fcf * discount_factor;
    }

    let terminal_base = match terminal_basis {
        TerminalBasis::BaseFcf => base_fcf,
        TerminalBasis::FinalYearFcf => projected_fcf,
    };
    let terminal_value = terminal_base * (1.0 + terminal_rate) / (discount_rate - terminal_rate);

    pv + terminal_value * discount_factor
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_answer_base_fcf_basis() {
        // fcf=100k, g=5%, discount=10%, terminal=2%, 5 years:
        // TV = 100000 * 1.02 / 0.08 = 1,275,000
        // value = sum_{t=1..5} 100000*1.05^t/1.1^t + TV/1.1^5 ~ 1,227,486.8
        let v = dcf_valuation(100_000.0, 0.05, 0.10, 0.02, 5, TerminalBasis::BaseFcf);

        let mut expected = 0.0_f64;
        for t in 1..=5 {
            expected += 100_000.0 * 1.05_f64.powi(t) / 1.10_f64.powi(t);
        }
        expected += (100_000.0 * 1.02 / 0.08) / 1.10_f64.powi(5);

        assert!((v - expected).abs() < 1e-6, "v={v}, expected={expected}");
        assert!((v - 1_227_486.8).abs() < 1.0, "v={v}");
    }

    #[test]
    fn test_final_year_basis_uses_projected_fcf() {
        let v = dcf_valuation(100_000.0, 0.05, 0.10, 0.02, 5, TerminalBasis::FinalYearFcf);

        let fcf_year5 = 100_000.0 * 1.05_f64.powi(5);
        let mut expected = 0.0_f64;
        for t in 1..=5 {
            expected += 100_000.0 * 1.05_f64.powi(t) / 1.10_f64.powi(t);
        }
        expected += (fcf_year5 * 1.02 / 0.08) / 1.10_f64.powi(5);

        assert!((v - expected).abs() < 1e-6, "v={v}, expected={expected}");
        // Positive growth means the conventional basis values higher
        let base = dcf_valuation(100_000.0, 0.05, 0.10, 0.02, 5, TerminalBasis::BaseFcf);
        assert!(v > base);
    }

    #[test]
    fn test_linearity_in_fcf() {
        let v1 = dcf_valuation(50_000.0, 0.07, 0.09, 0.02, 5, TerminalBasis::BaseFcf);
        let v2 = dcf_valuation(100_000.0, 0.07, 0.09, 0.02, 5, TerminalBasis::BaseFcf);
        assert_eq!(v2, 2.0 * v1);
    }

    #[test]
    fn test_negative_growth_is_defined() {
        let v = dcf_valuation(100_000.0, -0.10, 0.10, 0.02, 5, TerminalBasis::BaseFcf);
        assert!(v.is_finite());
        assert!(v > 0.0);
    }

    #[test]
    fn test_inverted_rates_give_negative_terminal() {
        // discount < terminal: mathematically defined, economically degenerate
        let v = dcf_valuation(100_000.0, 0.0, 0.02, 0.10, 5, TerminalBasis::BaseFcf);
        assert!(v.is_finite());
        assert!(v < 0.0, "negative terminal value should dominate, v={v}");
    }

    #[test]
    fn test_single_year_horizon() {
        let v = dcf_valuation(1_000.0, 0.05, 0.10, 0.02, 1, TerminalBasis::BaseFcf);
        let expected = 1_000.0 * 1.05 / 1.10 + (1_000.0 * 1.02 / 0.08) / 1.10;
        assert!((v - expected).abs() < 1e-9);
    }
}
