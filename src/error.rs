use keygen::KeyGenError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum DrsaError {
    #[error(transparent)]
    KeyGen(#[from] KeyGenError),

    #[error("write `{path}` failed: {msg}")]
    IOFailure { path: String, msg: String },

    #[error("need at least `{need}` bytes stream, but only got `{real}` bytes")]
    ShortStream { need: usize, real: usize },

    #[error("Invalid DER data: {0}")]
    InvalidDer(String),

    #[error("Invalid PEM data: {0}")]
    InvalidPem(String),

    #[error("{0}")]
    Config(String),
}
