//! Additively homomorphic ciphertext combination.
//!
//! For Paillier and its Damgård–Jurik generalisation with public modulus `n`
//! and degree `s`, ciphertexts live in `Z_(n^(s+1))` and multiplying two of
//! them yields an encryption of the sum of the plaintexts mod `n^s`. This
//! module only performs that ring operation; keys, encryption and decryption
//! stay with the external cryptosystem.
//!
//! Inputs outside `[0, n^(s+1))` are rejected instead of reduced, so encoding
//! bugs upstream surface here.

use core::fmt;

use num_bigint::BigUint;
use num_traits::One;

/// Widest ciphertext modulus `n^(s+1)` accepted, in bits.
pub const MAX_MODULUS_BITS: u64 = 1 << 20;

/// Errors for ciphertext combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineError {
    /// `n < 2`, or `n^(s+1)` wider than [`MAX_MODULUS_BITS`].
    InvalidModulus,
    /// A ciphertext is not in `[0, n^(s+1))`.
    CiphertextOutOfRange,
}

impl fmt::Display for CombineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombineError::InvalidModulus => write!(f, "invalid public modulus"),
            CombineError::CiphertextOutOfRange => write!(f, "ciphertext outside [0, n^(s+1))"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CombineError {}

/// Public parameters `(n, s)` of the external cryptosystem, with the
/// ciphertext modulus `n^(s+1)` precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomomorphicParams {
    n: BigUint,
    s: u32,
    modulus: BigUint,
}

impl HomomorphicParams {
    pub fn new(n: BigUint, s: u32) -> Result<Self, CombineError> {
        if n < BigUint::from(2u32) {
            return Err(CombineError::InvalidModulus);
        }
        let exponent = s.checked_add(1).ok_or(CombineError::InvalidModulus)?;
        match n.bits().checked_mul(u64::from(exponent)) {
            Some(width) if width <= MAX_MODULUS_BITS => {}
            _ => return Err(CombineError::InvalidModulus),
        }
        let modulus = n.pow(exponent);
        Ok(Self { n, s, modulus })
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    pub fn s(&self) -> u32 {
        self.s
    }

    /// Ciphertext modulus `n^(s+1)`.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Plaintext modulus `n^s`.
    pub fn plaintext_modulus(&self) -> BigUint {
        self.n.pow(self.s)
    }

    /// Combines two ciphertexts into an encryption of the sum of their plaintexts.
    pub fn combine(&self, c1: &BigUint, c2: &BigUint) -> Result<BigUint, CombineError> {
        self.check_range(c1)?;
        self.check_range(c2)?;
        Ok(c1 * c2 % &self.modulus)
    }

    /// Folds any number of ciphertexts. Order does not matter.
    ///
    /// An empty sequence yields 1, the neutral element (an encryption of 0
    /// with randomness 1).
    pub fn fold<'a, I>(&self, ciphertexts: I) -> Result<BigUint, CombineError>
    where
        I: IntoIterator<Item = &'a BigUint>,
    {
        let mut acc = BigUint::one();
        let mut count = 0usize;
        for c in ciphertexts {
            acc = self.combine(&acc, c)?;
            count += 1;
        }
        log::debug!("Folded {} ciphertexts", count);
        Ok(acc)
    }

    fn check_range(&self, c: &BigUint) -> Result<(), CombineError> {
        if c >= &self.modulus {
            log::warn!("Rejected ciphertext of {} bits (modulus {} bits)", c.bits(), self.modulus.bits());
            return Err(CombineError::CiphertextOutOfRange);
        }
        Ok(())
    }
}

/// Computes `c1 * c2 mod n^(s+1)`.
pub fn combine_ciphertexts(c1: &BigUint, c2: &BigUint, n: &BigUint, s: u32) -> Result<BigUint, CombineError> {
    HomomorphicParams::new(n.clone(), s)?.combine(c1, c2)
}

/// Folds a sequence of ciphertexts under `params`.
pub fn fold_ciphertexts<'a, I>(ciphertexts: I, params: &HomomorphicParams) -> Result<BigUint, CombineError>
where
    I: IntoIterator<Item = &'a BigUint>,
{
    params.fold(ciphertexts)
}
