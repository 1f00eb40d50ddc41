pub mod affordability;
pub mod amortization;
pub mod error;
pub mod schedule;
pub mod types;

pub use error::AffordabilityError;
pub use types::*;

/// Standard result type for all affordability operations
pub type AffordabilityResult<T> = Result<T, AffordabilityError>;
