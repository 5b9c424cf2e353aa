use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyGenError {
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("unsupported algorithm `{0}`")]
    UnsupportedAlgorithm(String),

    #[error("key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("no candidate stream accepted in the iteration {iteration} after {retries} retries")]
    RetryLimitExceeded { iteration: u32, retries: u64 },

    #[error("stream generation cancelled in the iteration {iteration}")]
    Cancelled { iteration: u32 },
}
