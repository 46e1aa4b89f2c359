use rand::Rng;
use serde::{Deserialize, Serialize};
use statrs::distribution::{LogNormal, Normal, Triangular, Uniform};

use crate::error::ValuationError;
use crate::ValuationResult;

/// Probability distribution for the simulated growth rate.
///
/// `Uniform` over the caller's growth band is the default; the other
/// variants let callers encode asymmetric or fat-tailed growth views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GrowthDistribution {
    Uniform { min: f64, max: f64 },
    Normal { mean: f64, std_dev: f64 },
    Triangular { min: f64, mode: f64, max: f64 },
    LogNormal { mu: f64, sigma: f64 },
}

impl GrowthDistribution {
    /// Uniform over the closed interval `[low, high]`. A zero-width band is
    /// valid and samples the constant.
    pub fn uniform(low: f64, high: f64) -> Self {
        GrowthDistribution::Uniform {
            min: low,
            max: high,
        }
    }
}

/// Draw one growth rate from the distribution using the supplied RNG.
///
/// The random source is always injected; nothing in this crate touches a
/// process-wide generator.
pub fn sample<R: Rng>(rng: &mut R, dist: &GrowthDistribution) -> ValuationResult<f64> {
    match dist {
        // statrs rejects zero-width intervals, but a constant growth rate is
        // a legitimate degenerate band
        GrowthDistribution::Uniform { min, max } if min == max => Ok(*min),
        GrowthDistribution::Uniform { min, max } => {
            let u = Uniform::new(*min, *max).map_err(|e| ValuationError::InvalidInput {
                field: "growth_distribution".into(),
                reason: format!("Invalid Uniform parameters: {e}"),
            })?;
            Ok(rng.sample(u))
        }
        GrowthDistribution::Normal { mean, std_dev } => {
            let n = Normal::new(*mean, *std_dev).map_err(|e| ValuationError::InvalidInput {
                field: "growth_distribution".into(),
                reason: format!("Invalid Normal parameters: {e}"),
            })?;
            Ok(rng.sample(n))
        }
        GrowthDistribution::Triangular { min, mode, max } => {
            let t =
                Triangular::new(*min, *max, *mode).map_err(|e| ValuationError::InvalidInput {
                    field: "growth_distribution".into(),
                    reason: format!("Invalid Triangular parameters: {e}"),
                })?;
            Ok(rng.sample(t))
        }
        GrowthDistribution::LogNormal { mu, sigma } => {
            let ln = LogNormal::new(*mu, *sigma).map_err(|e| ValuationError::InvalidInput {
                field: "growth_distribution".into(),
                reason: format!("Invalid LogNormal parameters: {e}"),
            })?;
            Ok(rng.sample(ln))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
