/// exact substring match of a fixed confusion pattern
#[derive(Clone, Copy, Debug)]
pub struct PatternGate<'a> {
    pattern: &'a [u8],
}

impl<'a> PatternGate<'a> {
    pub fn new(pattern: &'a [u8]) -> Self {
        Self { pattern }
    }

    pub fn accepts(&self, candidate: &[u8]) -> bool {
        Self::contains(self.pattern, candidate)
    }

    /// `true` if `pattern` occurs at some contiguous offset of `haystack`.
    ///
    /// An empty pattern matches at the first position, a pattern longer than the haystack never matches.
    pub fn contains(pattern: &[u8], haystack: &[u8]) -> bool {
        if pattern.is_empty() {
            return true;
        } else if pattern.len() > haystack.len() {
            log::debug!(
                "pattern length `{}` great than the stream length `{}`",
                pattern.len(),
                haystack.len()
            );
            return false;
        }

        haystack.windows(pattern.len()).any(|w| w == pattern)
    }
}
