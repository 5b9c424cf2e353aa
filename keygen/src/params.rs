use crate::KeyGenError;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// hash function used by the PBKDF2 PRF (HMAC) and by the stream hash chain
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha512,
}

/// what the working seed becomes after the confusion pattern rejected a candidate stream
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReseedPolicy {
    /// continue the hash chain: the seed is the last digest of the rejected chain
    #[default]
    Chain,
    /// the seed is the trailing `seed_size` bytes of the rejected candidate
    Tail,
    /// keep the seed, every retry reproduces the same candidate, requires a retry limit
    Repeat,
}

#[derive(Clone, Debug)]
pub struct Params {
    seed_size: usize,
    hash: HashAlgorithm,
    public_exponent: u64,
    // 素性测试的错误概率上界 2^{-prime_certainty}
    prime_certainty: usize,
    reseed: ReseedPolicy,
    max_retries: Option<u64>,
    distinct_primes: bool,
}

pub struct ParamsBuilder {
    seed_size: usize,
    hash: HashAlgorithm,
    public_exponent: u64,
    prime_certainty: usize,
    reseed: ReseedPolicy,
    max_retries: Option<u64>,
    distinct_primes: bool,
}

impl HashAlgorithm {
    /// digest byte size
    pub fn digest_size(&self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }
}

impl Display for HashAlgorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = KeyGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" | "sha2-256" => Ok(Self::Sha256),
            "sha512" | "sha-512" | "sha2-512" => Ok(Self::Sha512),
            _ => Err(KeyGenError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl Display for ReseedPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Chain => "chain",
            Self::Tail => "tail",
            Self::Repeat => "repeat",
        })
    }
}

impl FromStr for ReseedPolicy {
    type Err = KeyGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chain" => Ok(Self::Chain),
            "tail" => Ok(Self::Tail),
            "repeat" => Ok(Self::Repeat),
            _ => Err(KeyGenError::InvalidParameters(format!(
                "unknown reseed policy `{s}`, expect one of `chain`, `tail`, `repeat`"
            ))),
        }
    }
}

impl Params {
    /// bootstrap seed byte size
    pub fn seed_size(&self) -> usize {
        self.seed_size
    }

    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    /// e
    pub fn public_exponent(&self) -> BigUint {
        BigUint::from(self.public_exponent)
    }

    pub fn prime_certainty(&self) -> usize {
        self.prime_certainty
    }

    /// Miller-Rabin rounds for the error bound $2^{-certainty}$, each round at most $4^{-1}$
    pub fn prime_test_rounds(&self) -> usize {
        (self.prime_certainty + 1) >> 1
    }

    pub fn reseed(&self) -> ReseedPolicy {
        self.reseed
    }

    /// maximum rejected candidates in one outer iteration
    pub fn max_retries(&self) -> Option<u64> {
        self.max_retries
    }

    pub fn distinct_primes(&self) -> bool {
        self.distinct_primes
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            seed_size: 32,
            hash: HashAlgorithm::Sha256,
            public_exponent: 65537,
            prime_certainty: 100,
            reseed: ReseedPolicy::Chain,
            max_retries: None,
            distinct_primes: false,
        }
    }
}

impl Default for ParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamsBuilder {
    /// 默认值:
    /// seed: 32字节;
    /// hash: SHA-256;
    /// e: 65537;
    /// certainty: 100;
    /// reseed: chain, 不限制重试次数;
    pub fn new() -> Self {
        let p = Params::default();
        Self {
            seed_size: p.seed_size,
            hash: p.hash,
            public_exponent: p.public_exponent,
            prime_certainty: p.prime_certainty,
            reseed: p.reseed,
            max_retries: p.max_retries,
            distinct_primes: p.distinct_primes,
        }
    }

    pub fn seed_size(mut self, seed_size: usize) -> Self {
        self.seed_size = seed_size;
        self
    }

    pub fn hash(mut self, hash: HashAlgorithm) -> Self {
        self.hash = hash;
        self
    }

    pub fn public_exponent(mut self, e: u64) -> Self {
        self.public_exponent = e;
        self
    }

    pub fn prime_certainty(mut self, certainty: usize) -> Self {
        self.prime_certainty = certainty;
        self
    }

    pub fn reseed(mut self, policy: ReseedPolicy) -> Self {
        self.reseed = policy;
        self
    }

    pub fn max_retries(mut self, max_retries: Option<u64>) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn distinct_primes(mut self, distinct: bool) -> Self {
        self.distinct_primes = distinct;
        self
    }

    pub fn build(self) -> Result<Params, KeyGenError> {
        if self.seed_size == 0 {
            return Err(KeyGenError::InvalidParameters(
                "seed size must be not equal to 0".to_string(),
            ));
        } else if self.prime_certainty == 0 {
            return Err(KeyGenError::InvalidParameters(
                "prime certainty must be not equal to 0".to_string(),
            ));
        } else if self.public_exponent < 3 || self.public_exponent & 1 == 0 {
            return Err(KeyGenError::InvalidParameters(format!(
                "public exponent `{}` must be an odd number that great than 2",
                self.public_exponent
            )));
        } else if self.reseed == ReseedPolicy::Repeat && self.max_retries.is_none() {
            return Err(KeyGenError::InvalidParameters(
                "the `repeat` reseed policy never terminates after a rejection, a retry limit is required"
                    .to_string(),
            ));
        }

        Ok(Params {
            seed_size: self.seed_size,
            hash: self.hash,
            public_exponent: self.public_exponent,
            prime_certainty: self.prime_certainty,
            reseed: self.reseed,
            max_retries: self.max_retries,
            distinct_primes: self.distinct_primes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params() {
        let p = ParamsBuilder::new().build().unwrap();
        assert_eq!(p.seed_size(), 32);
        assert_eq!(p.hash(), HashAlgorithm::Sha256);
        assert_eq!(p.public_exponent(), BigUint::from(65537u32));
        assert_eq!(p.prime_test_rounds(), 50);
        assert_eq!(p.reseed(), ReseedPolicy::Chain);
        assert_eq!(p.max_retries(), None);
        assert!(!p.distinct_primes());
    }

    #[test]
    fn invalid_params() {
        for b in [
            ParamsBuilder::new().seed_size(0),
            ParamsBuilder::new().prime_certainty(0),
            ParamsBuilder::new().public_exponent(1),
            ParamsBuilder::new().public_exponent(65536),
            ParamsBuilder::new().reseed(ReseedPolicy::Repeat),
        ] {
            assert!(matches!(
                b.build(),
                Err(KeyGenError::InvalidParameters(_))
            ));
        }

        assert!(ParamsBuilder::new()
            .reseed(ReseedPolicy::Repeat)
            .max_retries(Some(3))
            .build()
            .is_ok());
    }

    #[test]
    fn algorithm_names() {
        assert_eq!("SHA256".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Sha256));
        assert_eq!("sha-512".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Sha512));
        assert_eq!(
            "md5".parse::<HashAlgorithm>(),
            Err(KeyGenError::UnsupportedAlgorithm("md5".to_string()))
        );
        assert_eq!("tail".parse::<ReseedPolicy>(), Ok(ReseedPolicy::Tail));
        assert!("again".parse::<ReseedPolicy>().is_err());
    }
}
