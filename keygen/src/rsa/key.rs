use crate::rsa::PrimeDeriver;
use crate::{KeyGenError, Params};
use num_bigint::BigUint;
use num_traits::One;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use utils::BigUintExt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    // n = p * q
    n: BigUint,
    // public exponent, gcd(e, (p-1)(q-1)) = 1
    e: BigUint,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKey {
    n: BigUint,
    // d * e = 1 % phi(n)
    d: BigUint,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    public: PublicKey,
    private: PrivateKey,
}

impl PublicKey {
    /// note: not to check the `n` and `exp` are right RSA parameters
    pub fn new_uncheck(n: BigUint, exp: BigUint) -> Self {
        Self { n, e: exp }
    }

    /// n
    pub fn modules(&self) -> &BigUint {
        &self.n
    }

    /// e
    pub fn exponent(&self) -> &BigUint {
        &self.e
    }

    /// RSAEP: $m^e \mod n, m \lt n$, textbook RSA without padding
    pub fn rsaep(&self, m: &BigUint) -> Result<BigUint, KeyGenError> {
        if m < &self.n {
            Ok(m.modpow(&self.e, &self.n))
        } else {
            Err(KeyGenError::InvalidParameters(format!(
                "rsaep: invalid message that need less than {:#x}",
                self.n
            )))
        }
    }
}

impl PrivateKey {
    /// note: not to check the `n` and `exp` are right RSA parameters
    pub fn new_uncheck(n: BigUint, exp: BigUint) -> Self {
        Self { n, d: exp }
    }

    /// n
    pub fn modules(&self) -> &BigUint {
        &self.n
    }

    /// d
    pub fn exponent(&self) -> &BigUint {
        &self.d
    }

    /// RSADP: $c^d \mod n, c \lt n$
    pub fn rsadp(&self, c: &BigUint) -> Result<BigUint, KeyGenError> {
        if c < &self.n {
            Ok(c.modpow(&self.d, &self.n))
        } else {
            Err(KeyGenError::InvalidParameters(format!(
                "rsadp: invalid cipher message {:#x} that need less than {:#x}",
                c, self.n
            )))
        }
    }
}

impl KeyPair {
    /// $n = p \cdot q$, $\phi = (p-1)(q-1)$, $d = e^{-1} \mod \phi$
    pub fn from_primes(p: &BigUint, q: &BigUint, e: &BigUint) -> Result<Self, KeyGenError> {
        if p <= &BigUint::one() || q <= &BigUint::one() {
            return Err(KeyGenError::InvalidParameters(
                "rsa: prime factor must great than 1".to_string(),
            ));
        }

        let n = p * q;
        let totient = (p - 1u32) * (q - 1u32);
        let d = BigUintExt(e).modinv(&totient).ok_or_else(|| {
            KeyGenError::KeyDerivationFailed(format!(
                "rsa: public exponent {e} has no inverse modulo phi(n), gcd(e, phi(n)) != 1"
            ))
        })?;

        Ok(Self {
            public: PublicKey::new_uncheck(n.clone(), e.clone()),
            private: PrivateKey::new_uncheck(n, d),
        })
    }

    /// build the key pair with the public exponent of `params`
    pub fn build(params: &Params, p: &BigUint, q: &BigUint) -> Result<Self, KeyGenError> {
        Self::from_primes(p, q, &params.public_exponent())
    }

    /// D-RSA stream -> (p, q) -> key pair
    pub fn from_stream(params: &Params, stream: &[u8]) -> Result<Self, KeyGenError> {
        let (p, q) = PrimeDeriver::new(params).derive(stream)?;
        let pair = Self::build(params, &p, &q)?;
        log::debug!("rsa key pair with {} bits modulus", pair.public.n.bits());
        Ok(pair)
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{n: {:#x}, e: {:#x}}}", self.n, self.e)
    }
}

impl Display for PrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{n: {:#x}, d: {:#x}}}", self.n, self.d)
    }
}

#[cfg(test)]
mod tests {
    use super::KeyPair;
    use crate::{KeyGenError, Params};
    use num_bigint::BigUint;
    use num_integer::Integer;
    use num_traits::{Num, One};

    fn hex(s: &str) -> BigUint {
        BigUint::from_str_radix(s, 16).unwrap()
    }

    #[test]
    fn textbook_key() {
        let (p, q) = (BigUint::from(61u32), BigUint::from(53u32));
        let pair = KeyPair::build(&Params::default(), &p, &q).unwrap();
        assert_eq!(pair.public_key().modules(), &BigUint::from(3233u32));
        assert_eq!(pair.public_key().exponent(), &BigUint::from(65537u32));
        assert_eq!(pair.private_key().exponent(), &BigUint::from(2753u32));

        for m in [0u32, 1, 2, 65, 1000, 3232] {
            let m = BigUint::from(m);
            let c = pair.public_key().rsaep(&m).unwrap();
            assert_eq!(pair.private_key().rsadp(&c).unwrap(), m);
        }

        assert!(pair.public_key().rsaep(&BigUint::from(3233u32)).is_err());
    }

    #[test]
    fn no_inverse() {
        // 917519 = 14 * 65537 + 1
        let (p, q) = (BigUint::from(917519u32), BigUint::from(61u32));
        assert!(matches!(
            KeyPair::build(&Params::default(), &p, &q),
            Err(KeyGenError::KeyDerivationFailed(_))
        ));

        let e = BigUint::from(3u32);
        assert!(matches!(
            KeyPair::from_primes(&BigUint::from(7u32), &BigUint::from(11u32), &e),
            Err(KeyGenError::KeyDerivationFailed(_))
        ));
    }

    #[test]
    fn invalid_primes() {
        assert!(matches!(
            KeyPair::build(&Params::default(), &BigUint::one(), &BigUint::from(7u32)),
            Err(KeyGenError::InvalidParameters(_))
        ));
    }

    #[test]
    fn golden_key_pair() {
        let p = hex(concat!(
            "63862408c2d133e84cd0a6cae94dc9513775409860db9718233c2bf983e6c82d",
            "977a97e730084a670fbd7a4b766c89e9a4171b65ceaf0fb4ac80cc1c5664b2fc",
            "fc886c03b639e3b73d9ad221bf3aa7483625a3ef028a3be4f30975219478c35b",
            "d6256ad69f6347fb7556e1f127d8278ac20e23711d1cdac04cdeac64b50db001",
        ));
        let q = hex(concat!(
            "a6e558dff79fdf2aa3d5e26e5ac6673b06ccd5c47a12cb5ec07221b532ff4b3b",
            "b8dab9740480ebefa7061d6a6147e529019cd1c4b6e3ff84fc3c4eecdcb5d152",
            "dce9c554f6dc3ac17d0e367a954b0ee201030fd0dd6ec6933ae6b812bc53f444",
            "cb71a39aafc9ad575715f6f0c088177088658910ae8e67b3ec687b9508efd1ef",
        ));
        let d = hex(concat!(
            "3568304bb26352cdc615ec6f212227f83d4ca3a206318a67b52c54a831ae3bf1",
            "c54c01a2aa88b11556769975a7beea7847b8a1d28c0296d417fd6a48117342d0",
            "6e150fe59fedfbc9a76f65424f74aa60fa3804ad17c28ce7681384262338d354",
            "2ccc961952f8525ff80b788ffa7fd79fd99b9cf6d5ee4ddd7963bafefaa03c55",
            "565db3af193bdcbbc86d6c2c83fbd0a67c69d44bbac4fdfc9f7b0fa939e1e423",
            "23c5edcb9cdc1265c09b5945821e6657cdf5684d26b7439dc1b57a24db4c3e36",
            "456ab52a8ac83b67d8307a98c9e026a29bd68cb97e7dd165dc73b91d779af44e",
            "5dc1c4353e2d13859158537c72a3bfe2cc26ac77beccb05f905b3665e893a001",
        ));

        let pair = KeyPair::build(&Params::default(), &p, &q).unwrap();
        assert_eq!(pair.public_key().modules(), &(&p * &q));
        assert_eq!(pair.private_key().exponent(), &d);

        let n = pair.public_key().modules();
        for m in [
            BigUint::from(2u32),
            BigUint::from(0xdeadbeefu32),
            hex("0123456789abcdef0123456789abcdef0123456789abcdef"),
            n - 2u32,
        ] {
            assert!(m.gcd(n).is_one());
            let c = pair.public_key().rsaep(&m).unwrap();
            assert_eq!(pair.private_key().rsadp(&c).unwrap(), m);
        }
    }

    #[test]
    fn json_roundtrip() {
        let pair = KeyPair::build(
            &Params::default(),
            &BigUint::from(61u32),
            &BigUint::from(53u32),
        )
        .unwrap();
        let s = serde_json::to_string(&pair).unwrap();
        let de: KeyPair = serde_json::from_str(&s).unwrap();
        assert_eq!(pair, de);
    }
}
