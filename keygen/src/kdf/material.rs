use crate::kdf::{KDF, PBKDF2};
use crate::{KeyGenError, Params};
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// PBKDF2(password, salt = confusion) 的输出, 前`seed_size`字节为 bootstrap seed,
/// 其余`confusion.len()`字节为 confusion pattern.
pub struct DerivedKeyMaterial {
    material: Vec<u8>,
    seed_size: usize,
}

impl DerivedKeyMaterial {
    pub fn derive(
        params: &Params,
        password: &[u8],
        confusion: &[u8],
        iterations: u32,
    ) -> Result<Self, KeyGenError> {
        let seed_size = params.seed_size();
        let key_size = seed_size + confusion.len();
        let mut kdf = PBKDF2::new(
            params.hash(),
            password.to_vec(),
            confusion.to_vec(),
            iterations,
        )?;

        let material = kdf.kdf(key_size)?;
        log::trace!(
            "derived {key_size} bytes key material with {} rounds PBKDF2-HMAC-{}",
            iterations,
            params.hash()
        );

        Ok(Self {
            material,
            seed_size,
        })
    }

    pub fn bootstrap_seed(&self) -> &[u8] {
        &self.material[..self.seed_size]
    }

    pub fn confusion_pattern(&self) -> &[u8] {
        &self.material[self.seed_size..]
    }
}

#[cfg(feature = "sec-zeroize")]
impl Drop for DerivedKeyMaterial {
    fn drop(&mut self) {
        self.material.zeroize();
    }
}
