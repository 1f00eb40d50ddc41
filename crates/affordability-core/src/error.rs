use thiserror::Error;

#[derive(Debug, Error)]
pub enum AffordabilityError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Date error: {0}")]
    DateError(String),
}
