//! Custom User-Provided Entropy Source.
//!
//! Serves bytes the caller injected ahead of time. Useful for replaying a
//! dealing deterministically or for driving the exhaustion paths in tests.

use alloc::vec::Vec;
use zeroize::Zeroize;

use super::{EntropyError, EntropySource};

/// Source that buffers user-injected entropy.
pub struct CustomSource {
    buffer: Vec<u8>,
}

impl CustomSource {
    /// Creates a new empty CustomSource.
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Creates a source preloaded with `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut source = Self::new();
        source.add_bytes(bytes);
        source
    }

    /// Add entropy bytes to the pool.
    pub fn add_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Bytes still available.
    pub fn remaining(&self) -> usize {
        self.buffer.len()
    }
}

impl Default for CustomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CustomSource {
    fn drop(&mut self) {
        self.buffer.zeroize();
    }
}

impl EntropySource for CustomSource {
    fn name(&self) -> &'static str {
        "CustomInput"
    }

    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        let len = dest.len();
        if self.buffer.len() < len {
            return Err(EntropyError::Exhausted);
        }

        for (d, s) in dest.iter_mut().zip(self.buffer.drain(0..len)) {
            *d = s;
        }
        Ok(())
    }
}
