pub mod dcf;
pub mod monte_carlo;
pub mod scenarios;

use crate::error::ValuationError;
use crate::ValuationResult;

/// Validate the market assumptions shared by every valuation entry point.
/// Fails fast, before any sampling or projection.
pub(crate) fn validate_market_inputs(
    base_fcf: f64,
    growth_low: f64,
    growth_high: f64,
    discount_rate: f64,
    terminal_rate: f64,
    projection_years: u32,
) -> ValuationResult<()> {
    require_finite("base_fcf", base_fcf)?;
    require_finite("growth_low", growth_low)?;
    require_finite("growth_high", growth_high)?;
    require_finite("discount_rate", discount_rate)?;
    require_finite("terminal_rate", terminal_rate)?;

    if base_fcf <= 0.0 {
        return Err(ValuationError::InvalidInput {
            field: "base_fcf".into(),
            reason: "Free cash flow must be positive".into(),
        });
    }
    if growth_low > growth_high {
        return Err(ValuationError::InvalidInput {
            field: "growth_low".into(),
            reason: format!("Lower bound ({growth_low}) exceeds upper bound ({growth_high})"),
        });
    }
    if projection_years < 1 {
        return Err(ValuationError::InvalidInput {
            field: "projection_years".into(),
            reason: "Must be at least 1".into(),
        });
    }
    // Equality is a hard singularity in the Gordon formula; an inversion is
    // merely degenerate economics and handled via a warning
    if discount_rate == terminal_rate {
        return Err(ValuationError::InvalidInput {
            field: "terminal_rate".into(),
            reason: format!(
                "Must differ from discount_rate ({discount_rate}); the Gordon terminal value divides by their difference"
            ),
        });
    }

    Ok(())
}

fn require_finite(field: &str, value: f64) -> ValuationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValuationError::InvalidInput {
            field: field.into(),
            reason: format!("Must be a finite number (got {value})"),
        })
    }
}

/// Warning text for rate combinations that produce a negative terminal value.
pub(crate) fn degenerate_economics_warning(
    discount_rate: f64,
    terminal_rate: f64,
) -> Option<String> {
    (discount_rate < terminal_rate).then(|| {
        format!(
            "Discount rate ({discount_rate}) is below the terminal growth rate ({terminal_rate}); the Gordon terminal value is negative"
        )
    })
}
