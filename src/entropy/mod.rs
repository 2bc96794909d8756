//! Randomness sources for dealing and field setup.
//!
//! Every random value in the crate (prime candidates, generator candidates,
//! polynomial coefficients, Miller-Rabin witnesses) is drawn through the
//! [`EntropySource`] trait so callers decide where bytes come from.
//!
//! # Design
//! - **Fail-Closed**: a source that cannot deliver returns an error; callers
//!   abort the operation instead of falling back to a weaker source.
//! - **Blocking**: the OS source may block while the kernel pool is starved.
//!   That is the only suspension point in the crate.

pub mod custom;
pub mod os;

use core::fmt;

pub use custom::CustomSource;
pub use os::OsEntropy;

/// Error types for entropy collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyError {
    /// The platform source refused or failed to produce bytes.
    CollectionFailed,
    /// Source is exhausted (e.g., fixed buffer).
    Exhausted,
}

impl fmt::Display for EntropyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntropyError::CollectionFailed => write!(f, "entropy source failed to collect bytes"),
            EntropyError::Exhausted => write!(f, "entropy source exhausted"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EntropyError {}

/// A trait for entropy sources.
pub trait EntropySource {
    /// Returns a unique identifier for the source.
    fn name(&self) -> &'static str;

    /// Fills `dest` with random bytes from the source.
    ///
    /// # Returns
    /// * `Ok(())` on success.
    /// * `Err(EntropyError)` if the source fails.
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError>;
}
