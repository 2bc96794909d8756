//! Field setup: safe primes and subgroup generators.
//!
//! Produces the shared arithmetic domain `(p, q, g)` where `p = 2q + 1` is a
//! safe prime and `g` generates the subgroup of order `q` in `Z_p^*`.
//! Coefficients, shares and secrets live in `Z_q`; commitments live in that
//! subgroup.
//!
//! # Termination
//! Both searches are probabilistic. They are bounded by caller-supplied
//! attempt limits (see [`VssConfig`]) and report [`DomainError::SearchExhausted`]
//! when the limit is hit. Abandoning a search needs no cleanup.

use alloc::string::String;
use core::fmt;

use num_bigint::BigUint;
use num_traits::One;

use crate::arith::primality::{is_probable_prime, safe_prime_sieve, MIN_MILLER_RABIN_ROUNDS};
use crate::arith::{random_odd_bits, random_range, ArithError};
use crate::config::{ConfigError, VssConfig, MIN_SAFE_PRIME_BITS};
use crate::entropy::EntropySource;

/// Errors for field setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    /// Requested safe prime size is too small.
    InvalidBitLength,
    /// Fewer Miller-Rabin rounds than the 2^-40 confidence floor.
    TooFewRounds,
    /// The attempt limit was reached without finding a candidate.
    SearchExhausted {
        /// Candidates drawn before giving up.
        attempts: u64,
    },
    /// `(p, q, g)` violates a domain invariant.
    InvalidDomain,
    /// Random number generator failure.
    RngFailure,
    /// The supplied configuration is inconsistent.
    Config(ConfigError),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::InvalidBitLength => {
                write!(f, "safe prime must have at least {} bits", MIN_SAFE_PRIME_BITS)
            }
            DomainError::TooFewRounds => {
                write!(f, "at least {} Miller-Rabin rounds are required", MIN_MILLER_RABIN_ROUNDS)
            }
            DomainError::SearchExhausted { attempts } => {
                write!(f, "search gave up after {} attempts", attempts)
            }
            DomainError::InvalidDomain => write!(f, "invalid sharing domain"),
            DomainError::RngFailure => write!(f, "random number generator failure"),
            DomainError::Config(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DomainError {}

impl From<ArithError> for DomainError {
    fn from(e: ArithError) -> Self {
        match e {
            ArithError::Entropy(_) => DomainError::RngFailure,
            ArithError::InvalidBitLength => DomainError::InvalidBitLength,
            ArithError::InvalidBound => DomainError::InvalidDomain,
        }
    }
}

impl From<ConfigError> for DomainError {
    fn from(e: ConfigError) -> Self {
        DomainError::Config(e)
    }
}

/// Shared arithmetic domain of one sharing epoch.
///
/// Immutable once built; share it by reference across any number of
/// concurrent dealings and verifications.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SharingDomain {
    p: BigUint,
    q: BigUint,
    g: BigUint,
}

impl SharingDomain {
    /// Generates a fresh domain according to `config`.
    pub fn generate<R: EntropySource + ?Sized>(
        config: &VssConfig,
        rng: &mut R,
    ) -> Result<Self, DomainError> {
        config.validate()?;

        let (q, p) = generate_safe_prime(
            config.safe_prime_bits,
            config.miller_rabin_rounds,
            config.max_prime_attempts,
            rng,
        )?;
        let g = find_generator(&p, &q, config.max_generator_attempts, rng)?;

        let domain = Self { p, q, g };
        log::info!(
            "Sharing domain ready: {} bits, fingerprint {}",
            domain.p.bits(),
            domain.fingerprint()
        );
        Ok(domain)
    }

    /// Builds a domain from externally supplied values, checking every invariant.
    pub fn new<R: EntropySource + ?Sized>(
        p: BigUint,
        q: BigUint,
        g: BigUint,
        rounds: u32,
        rng: &mut R,
    ) -> Result<Self, DomainError> {
        let domain = Self { p, q, g };
        domain.validate(rounds, rng)?;
        Ok(domain)
    }

    /// Checks `p = 2q + 1`, primality of both, `g^q ≡ 1` and `g ≠ 1`.
    ///
    /// Domains obtained through deserialization should be validated before use.
    pub fn validate<R: EntropySource + ?Sized>(
        &self,
        rounds: u32,
        rng: &mut R,
    ) -> Result<(), DomainError> {
        if rounds < MIN_MILLER_RABIN_ROUNDS {
            return Err(DomainError::TooFewRounds);
        }
        if self.p != &self.q * 2u32 + 1u32 {
            return Err(DomainError::InvalidDomain);
        }
        if !is_subgroup_generator(&self.g, &self.p, &self.q) {
            return Err(DomainError::InvalidDomain);
        }
        if !is_probable_prime(&self.q, rounds, rng)? || !is_probable_prime(&self.p, rounds, rng)? {
            return Err(DomainError::InvalidDomain);
        }
        Ok(())
    }

    /// The safe prime modulus `p`.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// The subgroup order `q = (p - 1) / 2`.
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// Generator of the order-`q` subgroup.
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Short hex identifier of the domain (BLAKE3 over `p`, `q`, `g`).
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for value in [&self.p, &self.q, &self.g] {
            let bytes = value.to_bytes_be();
            hasher.update(&(bytes.len() as u64).to_be_bytes());
            hasher.update(&bytes);
        }
        hex::encode(&hasher.finalize().as_bytes()[..8])
    }
}

/// Searches for a safe prime of `bits` bits.
///
/// Returns `(q, p)` with `p = 2q + 1`, `q` having `bits - 1` bits, and both
/// passing `rounds` Miller-Rabin rounds. `rounds` below
/// [`MIN_MILLER_RABIN_ROUNDS`] is rejected with [`DomainError::TooFewRounds`].
pub fn generate_safe_prime<R: EntropySource + ?Sized>(
    bits: u64,
    rounds: u32,
    max_attempts: Option<u64>,
    rng: &mut R,
) -> Result<(BigUint, BigUint), DomainError> {
    if bits < MIN_SAFE_PRIME_BITS {
        return Err(DomainError::InvalidBitLength);
    }
    if rounds < MIN_MILLER_RABIN_ROUNDS {
        return Err(DomainError::TooFewRounds);
    }

    let mut attempts: u64 = 0;
    loop {
        if max_attempts.is_some_and(|max| attempts >= max) {
            log::warn!("Safe prime search exhausted after {} candidates", attempts);
            return Err(DomainError::SearchExhausted { attempts });
        }
        attempts += 1;

        let q = random_odd_bits(rng, bits - 1)?;
        if !safe_prime_sieve(&q) || !is_probable_prime(&q, rounds, rng)? {
            continue;
        }
        let p = &q * 2u32 + 1u32;
        if is_probable_prime(&p, rounds, rng)? {
            log::debug!("Safe prime of {} bits found after {} candidates", bits, attempts);
            return Ok((q, p));
        }
    }
}

/// Finds a generator of the order-`q` subgroup of `Z_p^*` for `p = 2q + 1`.
///
/// Squares a uniform `h` in `[2, p - 2]` and accepts when the result has
/// order `q`.
pub fn find_generator<R: EntropySource + ?Sized>(
    p: &BigUint,
    q: &BigUint,
    max_attempts: Option<u64>,
    rng: &mut R,
) -> Result<BigUint, DomainError> {
    if p != &(q * 2u32 + 1u32) || p < &BigUint::from(5u32) {
        return Err(DomainError::InvalidDomain);
    }

    let low = BigUint::from(2u32);
    let high = p - 2u32;
    let two = BigUint::from(2u32);

    let mut attempts: u64 = 0;
    loop {
        if max_attempts.is_some_and(|max| attempts >= max) {
            log::warn!("Generator search exhausted after {} candidates", attempts);
            return Err(DomainError::SearchExhausted { attempts });
        }
        attempts += 1;

        let h = random_range(rng, &low, &high)?;
        let g = h.modpow(&two, p);
        if is_subgroup_generator(&g, p, q) {
            return Ok(g);
        }
    }
}

fn is_subgroup_generator(g: &BigUint, p: &BigUint, q: &BigUint) -> bool {
    g < p && !g.is_one() && g.modpow(q, p).is_one()
}

/// Small fixed domain (p = 2039, q = 1019, g = 4) for fast arithmetic tests.
#[cfg(test)]
pub(crate) fn small_domain() -> SharingDomain {
    SharingDomain {
        p: BigUint::from(2039u32),
        q: BigUint::from(1019u32),
        g: BigUint::from(4u32),
    }
}

/// Freshly generated 128-bit domain.
#[cfg(test)]
pub(crate) fn test_domain() -> SharingDomain {
    let config = VssConfig::new(128, 3, 5).unwrap();
    SharingDomain::generate(&config, &mut crate::entropy::OsEntropy::new()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::{CustomSource, OsEntropy};

    #[test]
    fn test_safe_prime_sizes() {
        let mut rng = OsEntropy::new();
        for bits in [128u64, 256] {
            let (q, p) = generate_safe_prime(bits, 20, None, &mut rng).unwrap();
            assert_eq!(p, &q * 2u32 + 1u32);
            assert_eq!(p.bits(), bits);
            assert_eq!(q.bits(), bits - 1);
            assert!(is_probable_prime(&q, 20, &mut rng).unwrap());
            assert!(is_probable_prime(&p, 20, &mut rng).unwrap());
        }
    }

    #[test]
    fn test_safe_prime_rejects_tiny_bits() {
        let mut rng = OsEntropy::new();
        assert_eq!(
            generate_safe_prime(8, 20, None, &mut rng),
            Err(DomainError::InvalidBitLength)
        );
    }

    #[test]
    fn test_too_few_rounds_rejected() {
        let mut rng = OsEntropy::new();
        for rounds in [0u32, 1, MIN_MILLER_RABIN_ROUNDS - 1] {
            assert_eq!(
                generate_safe_prime(64, rounds, Some(1 << 20), &mut rng),
                Err(DomainError::TooFewRounds)
            );
            assert_eq!(small_domain().validate(rounds, &mut rng), Err(DomainError::TooFewRounds));
            assert_eq!(
                SharingDomain::new(
                    BigUint::from(2039u32),
                    BigUint::from(1019u32),
                    BigUint::from(4u32),
                    rounds,
                    &mut rng
                ),
                Err(DomainError::TooFewRounds)
            );
        }
        assert_eq!(small_domain().validate(MIN_MILLER_RABIN_ROUNDS, &mut rng), Ok(()));
    }

    #[test]
    fn test_safe_prime_attempt_limit() {
        let mut rng = OsEntropy::new();
        assert_eq!(
            generate_safe_prime(256, 20, Some(0), &mut rng),
            Err(DomainError::SearchExhausted { attempts: 0 })
        );
    }

    #[test]
    fn test_safe_prime_rng_failure() {
        let mut rng = CustomSource::new();
        assert_eq!(
            generate_safe_prime(128, 20, None, &mut rng),
            Err(DomainError::RngFailure)
        );
    }

    #[test]
    fn test_find_generator() {
        let mut rng = OsEntropy::new();
        let small = small_domain();
        for _ in 0..20 {
            let g = find_generator(small.p(), small.q(), Some(64), &mut rng).unwrap();
            assert!(!g.is_one());
            assert!(g.modpow(small.q(), small.p()).is_one());
        }
    }

    #[test]
    fn test_find_generator_rejects_non_safe_pair() {
        let mut rng = OsEntropy::new();
        let p = BigUint::from(2039u32);
        let q = BigUint::from(1000u32);
        assert_eq!(find_generator(&p, &q, None, &mut rng), Err(DomainError::InvalidDomain));
    }

    #[test]
    fn test_generated_domain_invariants() {
        let domain = test_domain();
        let mut rng = OsEntropy::new();
        assert_eq!(domain.validate(20, &mut rng), Ok(()));
        assert_eq!(domain.fingerprint().len(), 16);
    }

    #[test]
    fn test_new_validates() {
        let mut rng = OsEntropy::new();
        let p = BigUint::from(2039u32);
        let q = BigUint::from(1019u32);

        assert!(SharingDomain::new(p.clone(), q.clone(), BigUint::from(4u32), 20, &mut rng).is_ok());
        // g = 1 is excluded
        assert_eq!(
            SharingDomain::new(p.clone(), q.clone(), BigUint::one(), 20, &mut rng),
            Err(DomainError::InvalidDomain)
        );
        // 7 is a non-residue mod 2039 and has order 2q
        assert_eq!(
            SharingDomain::new(p.clone(), q.clone(), BigUint::from(7u32), 20, &mut rng),
            Err(DomainError::InvalidDomain)
        );
        // p != 2q + 1
        assert_eq!(
            SharingDomain::new(BigUint::from(2027u32), q, BigUint::from(4u32), 20, &mut rng),
            Err(DomainError::InvalidDomain)
        );
    }

    #[test]
    fn test_generate_rejects_bad_config() {
        let config = VssConfig { threshold: 0, ..VssConfig::default() };
        assert_eq!(
            SharingDomain::generate(&config, &mut OsEntropy::new()),
            Err(DomainError::Config(ConfigError::InvalidThreshold))
        );
    }
}
