use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("transient fetch failure: {0}")]
    Transient(String),

    #[error("payment failed ({status}): {message}")]
    Payment { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Transient failures are retried on the next poll tick; everything else
    /// surfaces to the caller.
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::Transient(_))
    }
}
