//! RFC 8018
//! PKCS #5: Password-Based Cryptography Specification Version 2.1
//!
//! PBKDF2 with HMAC-SHA256 or HMAC-SHA512 as the PRF.

use crate::{HashAlgorithm, KeyGenError, KDF};
use sha2::{Sha256, Sha512};
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

#[derive(Clone)]
pub struct PBKDF2 {
    hash: HashAlgorithm,
    itr_cnt: u32,
    password: Vec<u8>,
    salt: Vec<u8>,
}

impl PBKDF2 {
    pub fn new(
        hash: HashAlgorithm,
        password: Vec<u8>,
        salt: Vec<u8>,
        iteration_count: u32,
    ) -> Result<Self, KeyGenError> {
        if iteration_count == 0 {
            return Err(KeyGenError::InvalidParameters(
                "iteration count must be not equal to 0".to_string(),
            ));
        }

        Ok(Self {
            hash,
            itr_cnt: iteration_count,
            password,
            salt,
        })
    }
}

#[cfg(feature = "sec-zeroize")]
impl Drop for PBKDF2 {
    fn drop(&mut self) {
        self.password.zeroize();
        self.salt.zeroize();
        self.itr_cnt.zeroize();
    }
}

impl KDF for PBKDF2 {
    fn max_key_size(&self) -> usize {
        (u32::MAX as usize).saturating_mul(self.hash.digest_size())
    }

    fn kdf(&mut self, key_size: usize) -> Result<Vec<u8>, KeyGenError> {
        if key_size == 0 {
            return Err(KeyGenError::InvalidParameters(
                "key size can not be zero".to_string(),
            ));
        } else if key_size > self.max_key_size() {
            return Err(KeyGenError::InvalidParameters(format!(
                "key size `{key_size}` cannot great than `{}`",
                self.max_key_size()
            )));
        }

        let mut key = vec![0u8; key_size];
        match self.hash {
            HashAlgorithm::Sha256 => {
                pbkdf2::pbkdf2_hmac::<Sha256>(&self.password, &self.salt, self.itr_cnt, &mut key)
            }
            HashAlgorithm::Sha512 => {
                pbkdf2::pbkdf2_hmac::<Sha512>(&self.password, &self.salt, self.itr_cnt, &mut key)
            }
        }

        Ok(key)
    }
}
