//! Arbitrary-precision helpers shared by field setup and the VSS engines.
//!
//! All values are `num_bigint::BigUint`. Residues are kept canonical, i.e. in
//! `[0, m)`, at every module boundary.
//!
//! # Components
//! - `modular`: modular subtraction, negation and inversion (extended Euclid).
//! - `primality`: Miller-Rabin testing and random prime candidates.
//! - sampling helpers below: uniform values from an [`EntropySource`].

pub mod modular;
pub mod primality;

use core::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use zeroize::Zeroizing;

use crate::entropy::{EntropyError, EntropySource};

/// Errors for arithmetic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithError {
    /// Sampling bound or modulus is zero / empty range.
    InvalidBound,
    /// Requested bit length is too small to be meaningful.
    InvalidBitLength,
    /// The entropy source failed.
    Entropy(EntropyError),
}

impl fmt::Display for ArithError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithError::InvalidBound => write!(f, "sampling bound must be non-zero"),
            ArithError::InvalidBitLength => write!(f, "bit length too small"),
            ArithError::Entropy(e) => write!(f, "randomness failure: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ArithError {}

impl From<EntropyError> for ArithError {
    fn from(e: EntropyError) -> Self {
        ArithError::Entropy(e)
    }
}

/// Samples a value uniformly from `[0, bound)` by rejection sampling.
///
/// Bytes are drawn big-endian and the top byte is masked down to the bit
/// length of `bound`, so each draw is accepted with probability above 1/2.
pub fn random_below<R: EntropySource + ?Sized>(
    rng: &mut R,
    bound: &BigUint,
) -> Result<BigUint, ArithError> {
    if bound.is_zero() {
        return Err(ArithError::InvalidBound);
    }
    if bound.is_one() {
        return Ok(BigUint::zero());
    }

    let bits = bound.bits();
    let len = bits.div_ceil(8) as usize;
    let top_mask = top_byte_mask(bits);
    let mut buf = Zeroizing::new(alloc::vec![0u8; len]);

    loop {
        rng.fill(&mut buf)?;
        buf[0] &= top_mask;
        let candidate = BigUint::from_bytes_be(&buf);
        if &candidate < bound {
            return Ok(candidate);
        }
    }
}

/// Samples a value uniformly from the inclusive range `[low, high]`.
pub fn random_range<R: EntropySource + ?Sized>(
    rng: &mut R,
    low: &BigUint,
    high: &BigUint,
) -> Result<BigUint, ArithError> {
    if high < low {
        return Err(ArithError::InvalidBound);
    }
    let width = high - low + 1u32;
    Ok(low + random_below(rng, &width)?)
}

/// Samples an odd value with exactly `bits` bits (top bit forced).
pub fn random_odd_bits<R: EntropySource + ?Sized>(
    rng: &mut R,
    bits: u64,
) -> Result<BigUint, ArithError> {
    if bits < 2 {
        return Err(ArithError::InvalidBitLength);
    }
    let len = bits.div_ceil(8) as usize;
    let mut buf = Zeroizing::new(alloc::vec![0u8; len]);
    rng.fill(&mut buf)?;

    buf[0] &= top_byte_mask(bits);
    let top_bit = ((bits - 1) % 8) as u32;
    buf[0] |= 1u8 << top_bit;
    buf[len - 1] |= 1;

    Ok(BigUint::from_bytes_be(&buf))
}

/// Overwrites the digits of `value` with zeros in place, then leaves it at zero.
///
/// `assign_from_slice` reuses the existing allocation, so the old limbs are
/// overwritten rather than merely released.
pub(crate) fn wipe(value: &mut BigUint) {
    let limbs = value.bits().div_ceil(32) as usize;
    let zeros = alloc::vec![0u32; limbs];
    value.assign_from_slice(&zeros);
}

// Mask keeping only the low `bits % 8` bits of the leading byte (all if 0).
fn top_byte_mask(bits: u64) -> u8 {
    match bits % 8 {
        0 => 0xFF,
        r => (1u8 << r) - 1,
    }
}
