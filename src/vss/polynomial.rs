//! Dealer polynomials over `Z_q`.
//!
//! f(x) = a_0 + a_1*x + ... + a_{k-1}*x^(k-1), with a_0 the secret and the
//! remaining coefficients uniform in `[0, q)`. Any `k` evaluations determine
//! f; `k - 1` reveal nothing about a_0.
//!
//! A polynomial belongs to one sharing round. It is never serialized and its
//! coefficients are wiped on drop.

use alloc::vec::Vec;
use core::fmt;

use num_bigint::BigUint;
use num_traits::Zero;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::commitment::CommitmentVector;
use super::VssError;
use crate::arith::{random_below, wipe};
use crate::domain::SharingDomain;
use crate::entropy::EntropySource;

/// Secret polynomial of a dealer.
#[derive(Clone)]
pub struct Polynomial {
    coefficients: Vec<BigUint>,
}

impl fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polynomial")
            .field("degree", &self.degree())
            .field("coefficients", &"***SENSITIVE***")
            .finish()
    }
}

impl Zeroize for Polynomial {
    fn zeroize(&mut self) {
        for c in self.coefficients.iter_mut() {
            wipe(c);
        }
        self.coefficients.clear();
    }
}

impl Drop for Polynomial {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for Polynomial {}

impl Polynomial {
    /// Generates a polynomial with `k` coefficients and `secret mod q` as constant term.
    ///
    /// # Returns
    /// * `Err(VssError::InvalidThreshold)` if `k < 1`.
    /// * `Err(VssError::RngFailure)` if the entropy source fails.
    pub fn generate<R: EntropySource + ?Sized>(
        k: u32,
        secret: &BigUint,
        q: &BigUint,
        rng: &mut R,
    ) -> Result<Self, VssError> {
        if k < 1 {
            return Err(VssError::InvalidThreshold);
        }
        if q.is_zero() {
            return Err(VssError::EmptyPolynomial);
        }

        let mut coefficients = Vec::with_capacity(k as usize);
        coefficients.push(secret % q);
        // Build inside `Self` so a mid-way RNG failure still wipes what was drawn.
        let mut poly = Self { coefficients };
        for _ in 1..k {
            poly.coefficients.push(random_below(rng, q)?);
        }
        Ok(poly)
    }

    /// Generates a polynomial with a zero constant term.
    ///
    /// Used for proactive refresh and for distributed key generation rounds
    /// where every party contributes a sharing of zero.
    pub fn generate_zero<R: EntropySource + ?Sized>(
        k: u32,
        q: &BigUint,
        rng: &mut R,
    ) -> Result<Self, VssError> {
        Self::generate(k, &BigUint::zero(), q, rng)
    }

    /// Wraps existing coefficients, reducing each modulo `q`.
    pub fn from_coefficients(coefficients: Vec<BigUint>, q: &BigUint) -> Result<Self, VssError> {
        if coefficients.is_empty() || q.is_zero() {
            return Err(VssError::EmptyPolynomial);
        }
        let mut poly = Self { coefficients };
        for c in poly.coefficients.iter_mut() {
            *c %= q;
        }
        Ok(poly)
    }

    /// Coefficients a_0..a_{k-1}.
    pub fn coefficients(&self) -> &[BigUint] {
        &self.coefficients
    }

    /// Degree k - 1.
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Number of shares needed to reconstruct.
    pub fn threshold(&self) -> usize {
        self.coefficients.len()
    }

    /// Evaluates f(x) mod q.
    pub fn evaluate(&self, x: u32, q: &BigUint) -> BigUint {
        evaluate_polynomial(&self.coefficients, &BigUint::from(x), q)
    }

    /// Feldman commitments to every coefficient.
    pub fn commit(&self, domain: &SharingDomain) -> CommitmentVector {
        CommitmentVector::from_values(
            self.coefficients
                .iter()
                .map(|a| domain.g().modpow(a, domain.p()))
                .collect(),
        )
    }
}

/// Evaluates a polynomial at `x` modulo `q` using Horner's method.
///
/// f(x) = c[0] + c[1]*x + ... + c[k-1]*x^(k-1)
///
/// An empty slice evaluates to 0.
pub(crate) fn evaluate_polynomial(coeffs: &[BigUint], x: &BigUint, q: &BigUint) -> BigUint {
    // result = c[k-1]; result = result * x + c[j] for j = k-2 .. 0
    let x = x % q;
    let mut result = BigUint::zero();
    for c in coeffs.iter().rev() {
        result = (result * &x + c) % q;
    }
    result
}
