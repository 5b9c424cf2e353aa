//! RSA key pair from a D-RSA stream
//!
//! - the stream is split in half, each half is a big-endian integer advanced to the next probable prime;
//! - $n = p * q$, $\phi(n) = (p-1)(q-1)$;
//! - $d = e^{-1} \mod \phi(n)$, `e` is a scheme constant (65537 by default) and is never changed
//!   to make the inverse exist.
//!
//! 原理: 欧拉定理$a^{\phi(n)} \equiv 1 \mod n$
//! - $x ^ {k(p-1)(q-1)+1} \equiv x \mod n$

mod key;
pub use key::{KeyPair, PrivateKey, PublicKey};

mod prime;
pub use prime::PrimeDeriver;

use crate::{KeyGenError, Params, RandGen};

/// password -> stream of `stream_size` bytes -> (p, q) -> key pair
pub fn generate_key_pair(
    params: &Params,
    password: &[u8],
    confusion: &[u8],
    iterations: u32,
    stream_size: usize,
) -> Result<KeyPair, KeyGenError> {
    let stream = RandGen::new(params).generate(password, confusion, iterations, stream_size)?;
    KeyPair::from_stream(params, &stream)
}
