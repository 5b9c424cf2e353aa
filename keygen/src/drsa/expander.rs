use crate::HashAlgorithm;
use sha2::{Digest, Sha256, Sha512};

/// hash chain expansion: the stream is `H(s0) || H(H(s0)) || ...` truncated to the output size
#[derive(Clone, Copy, Debug)]
pub struct StreamExpander {
    hash: HashAlgorithm,
}

impl StreamExpander {
    pub fn new(hash: HashAlgorithm) -> Self {
        Self { hash }
    }

    pub fn digest_size(&self) -> usize {
        self.hash.digest_size()
    }

    /// returns `(stream, new_seed)`, `new_seed` is the last digest of the chain, or the seed itself
    /// if `output_size` is 0.
    pub fn expand(&self, seed: &[u8], output_size: usize) -> (Vec<u8>, Vec<u8>) {
        let (mut stream, mut seed) = (vec![0u8; output_size], seed.to_vec());
        self.expand_into(&mut seed, stream.as_mut_slice());
        (stream, seed)
    }

    /// fill the whole `stream`, `seed` is replaced by each digest of the chain in place
    pub fn expand_into(&self, seed: &mut Vec<u8>, stream: &mut [u8]) {
        match self.hash {
            HashAlgorithm::Sha256 => Self::chain::<Sha256>(seed, stream),
            HashAlgorithm::Sha512 => Self::chain::<Sha512>(seed, stream),
        }
    }

    fn chain<D: Digest>(seed: &mut Vec<u8>, stream: &mut [u8]) {
        for chunk in stream.chunks_mut(<D as Digest>::output_size()) {
            let digest = D::digest(seed.as_slice());
            chunk.copy_from_slice(&digest[..chunk.len()]);
            seed.clear();
            seed.extend_from_slice(&digest);
        }
    }
}
