pub mod error;
pub mod parse;
pub mod projection;
pub mod tax;
pub mod types;

#[cfg(feature = "instruments")]
pub mod instruments;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use error::CalcInvestError;
pub use types::*;

/// Standard result type for all calc-invest operations
pub type CalcInvestResult<T> = Result<T, CalcInvestError>;
