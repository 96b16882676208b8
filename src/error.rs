use thiserror::Error;

/// Failures of share generation and secret reconstruction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("not enough shares to reconstruct secret (need {required}, got {provided})")]
    InsufficientShares { required: usize, provided: usize },

    #[error("duplicate share index x = {0}")]
    DuplicateShareIndex(u64),

    /// The shares do not lie on a single integer polynomial of the declared degree.
    #[error("inconsistent shares: {0}")]
    InconsistentShares(String),
}

pub type Result<T> = std::result::Result<T, ShareError>;
