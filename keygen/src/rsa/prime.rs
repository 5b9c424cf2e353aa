use crate::{KeyGenError, Params};
use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sha2::{Digest, Sha256};
use utils::BigUintExt;

#[derive(Clone, Copy, Debug)]
pub struct PrimeDeriver {
    test_rounds: usize,
    distinct: bool,
}

impl PrimeDeriver {
    pub fn new(params: &Params) -> Self {
        Self {
            test_rounds: params.prime_test_rounds(),
            distinct: params.distinct_primes(),
        }
    }

    /// the first half gets the extra byte of an odd length stream
    pub fn split(stream: &[u8]) -> Result<(&[u8], &[u8]), KeyGenError> {
        if stream.len() < 2 {
            return Err(KeyGenError::InvalidParameters(format!(
                "cannot split the stream with `{}` bytes into two non-empty halves",
                stream.len()
            )));
        }

        Ok(stream.split_at((stream.len() + 1) >> 1))
    }

    /// Miller-Rabin witnesses seeded by the half itself, the same half always gets the same prime
    fn witness_rng(half: &[u8]) -> StdRng {
        StdRng::from_seed(Sha256::digest(half).into())
    }

    fn next_prime(&self, half: &[u8]) -> BigUint {
        BigUintExt(BigUint::from_bytes_be(half))
            .next_probable_prime(self.test_rounds, &mut Self::witness_rng(half))
    }

    /// returns `(p, q)`, each the smallest probable prime not less than its half of `stream`.
    ///
    /// note: `p == q` is only rejected when the params require distinct primes.
    pub fn derive(&self, stream: &[u8]) -> Result<(BigUint, BigUint), KeyGenError> {
        let (hp, hq) = Self::split(stream)?;
        let (p, q) = (self.next_prime(hp), self.next_prime(hq));
        log::trace!("derived primes with {} and {} bits", p.bits(), q.bits());

        if p == q {
            if self.distinct {
                return Err(KeyGenError::KeyDerivationFailed(
                    "the two derived primes are equal".to_string(),
                ));
            }
            log::warn!("the two derived primes are equal, the modulus is a perfect square");
        }

        Ok((p, q))
    }
}
