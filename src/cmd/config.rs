use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use config::Config;
use keygen::{KeyGenError, Params, ParamsBuilder, ReseedPolicy};
use serde::{Deserialize, Serialize};

use crate::error::DrsaError;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PerfConfig {
    pub password_sizes: Vec<usize>,
    pub salt_sizes: Vec<usize>,
    pub iterations: Vec<u32>,
    // csv report path
    pub output: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DrsaConfig {
    // byte size
    pub seed_size: usize,

    // sha256 or sha512
    pub hash: String,

    pub public_exponent: u64,

    // the probable prime error is at most 2^{-prime_certainty}
    pub prime_certainty: usize,

    pub reseed: ReseedPolicy,

    // rejected candidates allowed in one iteration, unlimited if not specified
    pub max_retries: Option<u64>,

    pub distinct_primes: bool,

    // byte size of the `generate` output
    pub stream_size: usize,

    // byte size of the stream consumed by the rsa key generation
    pub key_stream_size: usize,

    pub public_key_file: PathBuf,

    pub private_key_file: PathBuf,

    pub perf: PerfConfig,
}

impl Default for PerfConfig {
    fn default() -> Self {
        Self {
            password_sizes: vec![5, 50, 200],
            salt_sizes: vec![5, 50, 200],
            iterations: vec![1, 10, 100],
            output: PathBuf::from("performance.csv"),
        }
    }
}

impl Default for DrsaConfig {
    fn default() -> Self {
        let params = Params::default();
        Self {
            seed_size: params.seed_size(),
            hash: params.hash().to_string(),
            public_exponent: 65537,
            prime_certainty: params.prime_certainty(),
            reseed: params.reseed(),
            max_retries: params.max_retries(),
            distinct_primes: params.distinct_primes(),
            stream_size: 4096,
            key_stream_size: 256,
            public_key_file: PathBuf::from("public_key.pem"),
            private_key_file: PathBuf::from("private_key.pem"),
            perf: PerfConfig::default(),
        }
    }
}

static CONFIG: OnceLock<DrsaConfig> = OnceLock::new();

impl DrsaConfig {
    /// `~/.drsa/config.json`
    pub fn default_file() -> Option<PathBuf> {
        home::home_dir().map(|h| h.join(".drsa").join("config.json"))
    }

    /// load once, later calls return the first loaded configuration
    pub fn init(f: Option<&Path>) -> Result<&'static Self, DrsaError> {
        if let Some(c) = CONFIG.get() {
            return Ok(c);
        }

        let c = Self::load(f)?;
        Ok(CONFIG.get_or_init(|| c))
    }

    /// defaults <- `f` (or the default file) <- `DRSA_*` environment variables
    pub fn load(f: Option<&Path>) -> Result<Self, DrsaError> {
        let to_err = |e: config::ConfigError| DrsaError::Config(e.to_string());
        let default_config = Config::try_from(&DrsaConfig::default()).map_err(to_err)?;

        let mut config = Config::builder().add_source(default_config);
        match f {
            Some(f) => {
                config = config.add_source(config::File::from(f).required(true));
            }
            None => {
                if let Some(f) = Self::default_file() {
                    config = config.add_source(config::File::from(f).required(false));
                }
            }
        }

        let config = config
            .add_source(
                config::Environment::with_prefix("DRSA")
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()
            .map_err(to_err)?;

        let drsa_config: DrsaConfig = config.try_deserialize().map_err(to_err)?;
        log::trace!("{:?}", drsa_config);

        Ok(drsa_config)
    }

    pub fn params(&self) -> Result<Params, KeyGenError> {
        self.params_builder()?.build()
    }

    pub fn params_builder(&self) -> Result<ParamsBuilder, KeyGenError> {
        Ok(ParamsBuilder::new()
            .seed_size(self.seed_size)
            .hash(self.hash.parse()?)
            .public_exponent(self.public_exponent)
            .prime_certainty(self.prime_certainty)
            .reseed(self.reseed)
            .max_retries(self.max_retries)
            .distinct_primes(self.distinct_primes))
    }
}

#[cfg(test)]
mod tests {
    use super::DrsaConfig;
    use keygen::{HashAlgorithm, KeyGenError, ReseedPolicy};

    #[test]
    fn default_params() {
        let c = DrsaConfig::default();
        let p = c.params().unwrap();
        assert_eq!(p.seed_size(), 32);
        assert_eq!(p.hash(), HashAlgorithm::Sha256);
        assert_eq!(p.reseed(), ReseedPolicy::Chain);
        assert_eq!(c.stream_size, 4096);
        assert_eq!(c.key_stream_size, 256);
        assert_eq!(c.perf.iterations, vec![1, 10, 100]);
    }

    #[test]
    fn unsupported_hash() {
        let c = DrsaConfig {
            hash: "md5".to_string(),
            ..Default::default()
        };
        assert_eq!(
            c.params().unwrap_err(),
            KeyGenError::UnsupportedAlgorithm("md5".to_string())
        );
    }

    #[test]
    fn load_file() {
        let f = std::env::temp_dir().join(format!("drsa-config-{}.json", std::process::id()));
        std::fs::write(
            &f,
            r#"{
                "seed_size": 16,
                "hash": "sha512",
                "reseed": "tail",
                "max_retries": 100,
                "perf": { "password_sizes": [8], "salt_sizes": [8], "iterations": [2], "output": "perf.csv" }
            }"#,
        )
        .unwrap();

        let c = DrsaConfig::load(Some(&f)).unwrap();
        std::fs::remove_file(&f).unwrap();

        assert_eq!(c.seed_size, 16);
        assert_eq!(c.max_retries, Some(100));
        assert_eq!(c.reseed, ReseedPolicy::Tail);
        assert_eq!(c.public_exponent, 65537);
        assert_eq!(c.perf.iterations, vec![2]);

        let p = c.params().unwrap();
        assert_eq!(p.hash(), HashAlgorithm::Sha512);
        assert_eq!(p.max_retries(), Some(100));
    }

    #[test]
    fn missing_file() {
        let f = std::env::temp_dir().join("drsa-config-not-exist.json");
        assert!(DrsaConfig::load(Some(&f)).is_err());
    }
}
