pub mod distribution;
pub mod error;
pub mod stats;
pub mod types;
pub mod valuation;

pub use error::ValuationError;
pub use types::*;

/// Standard result type for all valuation operations
pub type ValuationResult<T> = Result<T, ValuationError>;
