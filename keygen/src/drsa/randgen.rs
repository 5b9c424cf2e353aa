use crate::drsa::{PatternGate, StreamExpander};
use crate::kdf::DerivedKeyMaterial;
use crate::{KeyGenError, Params, ReseedPolicy};
use std::sync::atomic::{AtomicBool, Ordering};

/// rejected candidates of each outer iteration
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenStats {
    retries: Vec<u64>,
}

impl GenStats {
    pub fn retries(&self) -> &[u64] {
        &self.retries
    }

    pub fn total_retries(&self) -> u64 {
        self.retries.iter().sum()
    }
}

/// D-RSA pseudo-random stream generator
///
/// ```text
/// Deriving -> Expanding -> Verifying -(reject)-> Expanding
///                              \-(accept)-> Reseeding -> Expanding | Done
/// ```
pub struct RandGen<'a> {
    params: &'a Params,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> RandGen<'a> {
    pub fn new(params: &'a Params) -> Self {
        Self {
            params,
            cancel: None,
        }
    }

    /// the generation stops with `KeyGenError::Cancelled` once `flag` is set
    pub fn with_cancel(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn generate(
        &self,
        password: &[u8],
        confusion: &[u8],
        iterations: u32,
        output_size: usize,
    ) -> Result<Vec<u8>, KeyGenError> {
        self.generate_with_stats(password, confusion, iterations, output_size)
            .map(|(stream, _)| stream)
    }

    pub fn generate_with_stats(
        &self,
        password: &[u8],
        confusion: &[u8],
        iterations: u32,
        output_size: usize,
    ) -> Result<(Vec<u8>, GenStats), KeyGenError> {
        let seed_size = self.params.seed_size();
        if output_size == 0 {
            return Err(KeyGenError::InvalidParameters(
                "output size must be not equal to 0".to_string(),
            ));
        } else if output_size < seed_size {
            return Err(KeyGenError::InvalidParameters(format!(
                "output size `{output_size}` cannot less than the seed size `{seed_size}`"
            )));
        } else if confusion.len() > output_size {
            // 模式比输出长时永远不会被接受
            return Err(KeyGenError::InvalidParameters(format!(
                "confusion length `{}` cannot great than the output size `{output_size}`",
                confusion.len()
            )));
        }

        let material = DerivedKeyMaterial::derive(self.params, password, confusion, iterations)?;
        let gate = PatternGate::new(material.confusion_pattern());
        let expander = StreamExpander::new(self.params.hash());

        let mut seed = material.bootstrap_seed().to_vec();
        let mut candidate = vec![0u8; output_size];
        let mut chain = Vec::with_capacity(seed_size.max(expander.digest_size()));
        let mut stats = GenStats {
            retries: Vec::with_capacity(iterations as usize),
        };

        for iteration in 1..=iterations {
            let mut retries = 0u64;
            loop {
                self.check_cancel(iteration)?;

                chain.clone_from(&seed);
                expander.expand_into(&mut chain, candidate.as_mut_slice());
                if gate.accepts(candidate.as_slice()) {
                    break;
                }

                retries += 1;
                if self.params.max_retries().is_some_and(|max| retries > max) {
                    log::debug!(
                        "the iteration {iteration} reached the retry limit {}",
                        retries - 1
                    );
                    return Err(KeyGenError::RetryLimitExceeded {
                        iteration,
                        retries: retries - 1,
                    });
                }

                match self.params.reseed() {
                    ReseedPolicy::Chain => std::mem::swap(&mut seed, &mut chain),
                    ReseedPolicy::Tail => {
                        seed.clear();
                        seed.extend_from_slice(&candidate[(output_size - seed_size)..]);
                    }
                    ReseedPolicy::Repeat => {}
                }
            }

            log::trace!("the iteration {iteration} accepted after {retries} retries");
            stats.retries.push(retries);

            // 下一轮的种子是本轮被接受的流的最后`seed_size`字节
            seed.clear();
            seed.extend_from_slice(&candidate[(output_size - seed_size)..]);
        }

        log::debug!(
            "generated {output_size} bytes stream with {iterations} iterations and {} retries",
            stats.total_retries()
        );

        Ok((candidate, stats))
    }

    fn check_cancel(&self, iteration: u32) -> Result<(), KeyGenError> {
        match self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => {
                Err(KeyGenError::Cancelled { iteration })
            }
            _ => Ok(()),
        }
    }
}
