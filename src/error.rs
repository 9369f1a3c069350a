use thiserror::Error;

/// Failure taxonomy for talking to the remote course store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("network error: {0}")]
    Network(String),

    #[error("not found")]
    NotFound,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("server error {status}: {body}")]
    Server { status: u16, body: String },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}
