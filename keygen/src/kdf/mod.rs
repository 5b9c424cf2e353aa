use crate::KeyGenError;

pub trait KDF {
    // 密钥派生的最大长度
    fn max_key_size(&self) -> usize;

    fn kdf(&mut self, key_size: usize) -> Result<Vec<u8>, KeyGenError>;
}

mod pbkdf;
pub use pbkdf::PBKDF2;

mod material;
pub use material::DerivedKeyMaterial;
