//! Protocol configuration.
//!
//! Bit sizes, thresholds and search limits live in an immutable value passed
//! to each operation, so several protocol runs with different parameters can
//! coexist in one process.

use core::fmt;

use crate::arith::primality::MIN_MILLER_RABIN_ROUNDS;

/// Default safe prime size in bits.
pub const DEFAULT_SAFE_PRIME_BITS: u64 = 512;

/// Default bound on safe-prime candidates drawn before giving up.
pub const DEFAULT_MAX_PRIME_ATTEMPTS: u64 = 1 << 24;

/// Default bound on generator candidates drawn before giving up.
pub const DEFAULT_MAX_GENERATOR_ATTEMPTS: u64 = 64;

/// Smallest safe prime the crate will search for.
pub const MIN_SAFE_PRIME_BITS: u64 = 16;

/// Configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Threshold is zero or exceeds the participant count.
    InvalidThreshold,
    /// No participants configured.
    NoParticipants,
    /// Safe prime size below [`MIN_SAFE_PRIME_BITS`].
    PrimeTooSmall,
    /// Fewer Miller-Rabin rounds than the 2^-40 confidence floor.
    TooFewRounds,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidThreshold => write!(f, "threshold must satisfy 1 <= k <= n"),
            ConfigError::NoParticipants => write!(f, "at least one participant is required"),
            ConfigError::PrimeTooSmall => {
                write!(f, "safe prime must have at least {} bits", MIN_SAFE_PRIME_BITS)
            }
            ConfigError::TooFewRounds => {
                write!(f, "at least {} Miller-Rabin rounds are required", MIN_MILLER_RABIN_ROUNDS)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Parameters of one sharing epoch.
///
/// Search limits of `None` reproduce the unbounded search loops; callers
/// that need bounded latency should keep them set.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VssConfig {
    /// Bit length of the safe prime p (q has one bit less).
    pub safe_prime_bits: u64,

    /// Number of shares k required to reconstruct.
    pub threshold: u32,

    /// Number of participants n receiving shares (indices 1..=n).
    pub participants: u32,

    /// Miller-Rabin rounds applied to both q and p.
    pub miller_rabin_rounds: u32,

    /// Maximum safe-prime candidates, or `None` for no limit.
    pub max_prime_attempts: Option<u64>,

    /// Maximum generator candidates, or `None` for no limit.
    pub max_generator_attempts: Option<u64>,
}

impl Default for VssConfig {
    fn default() -> Self {
        Self {
            safe_prime_bits: DEFAULT_SAFE_PRIME_BITS,
            threshold: 3,
            participants: 5,
            miller_rabin_rounds: MIN_MILLER_RABIN_ROUNDS,
            max_prime_attempts: Some(DEFAULT_MAX_PRIME_ATTEMPTS),
            max_generator_attempts: Some(DEFAULT_MAX_GENERATOR_ATTEMPTS),
        }
    }
}

impl VssConfig {
    /// Creates a configuration for a `threshold`-of-`participants` sharing
    /// with default search parameters.
    pub fn new(safe_prime_bits: u64, threshold: u32, participants: u32) -> Result<Self, ConfigError> {
        let config = Self {
            safe_prime_bits,
            threshold,
            participants,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Removes both search limits.
    pub fn unbounded(mut self) -> Self {
        self.max_prime_attempts = None;
        self.max_generator_attempts = None;
        self
    }

    /// Checks the internal consistency of the parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.participants == 0 {
            return Err(ConfigError::NoParticipants);
        }
        if self.threshold == 0 || self.threshold > self.participants {
            return Err(ConfigError::InvalidThreshold);
        }
        if self.safe_prime_bits < MIN_SAFE_PRIME_BITS {
            return Err(ConfigError::PrimeTooSmall);
        }
        if self.miller_rabin_rounds < MIN_MILLER_RABIN_ROUNDS {
            return Err(ConfigError::TooFewRounds);
        }
        Ok(())
    }
}
