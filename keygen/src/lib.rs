//! Deterministic RSA (D-RSA)
//!
//! password + confusion string + iterations -> PBKDF2 -> (bootstrap seed, confusion pattern)
//! -> hash chain expansion gated by the confusion pattern -> pseudo-random stream -> (p, q) -> RSA key pair.
//!
//! The same inputs always reproduce the same stream and the same key pair.

mod error;
pub use error::KeyGenError;

mod params;
pub use params::{HashAlgorithm, Params, ParamsBuilder, ReseedPolicy};

pub mod kdf;
pub use kdf::KDF;

pub mod drsa;
pub use drsa::RandGen;

pub mod rsa;
