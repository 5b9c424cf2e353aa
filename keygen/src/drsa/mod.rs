//! pseudo-random stream generation
//!
//! - PBKDF2(password, confusion, iterations) -> bootstrap seed || confusion pattern;
//! - `StreamExpander`: seed -> H(seed) || H(H(seed)) || ..., truncated to the output size;
//! - `PatternGate`: a candidate stream is accepted only if it contains the confusion pattern;
//! - `RandGen`: `iterations` rounds of expand-until-accepted, the next round starts from the
//!   trailing `seed_size` bytes of the accepted stream.

mod expander;
pub use expander::StreamExpander;

mod pattern;
pub use pattern::PatternGate;

mod randgen;
pub use randgen::{GenStats, RandGen};
