//! Secret Share Definition.
//!
//! A share is a point $(i, f(i))$ on the dealer's polynomial.
//! - $i$ (index): positive participant index, public.
//! - $f(i)$ (value): element of $Z_q$, private to the participant.
//!
//! Verification follows Feldman: $g^{f(i)} = \prod_j C_j^{i^j} \pmod p$.
//!
//! # Security
//! - Implements `Zeroize` and `ZeroizeOnDrop` to wipe the value from memory.
//! - `Debug` implementation redacts the actual value.

use core::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::commitment::CommitmentVector;
use super::polynomial::evaluate_polynomial;
use super::VssError;
use crate::arith::wipe;
use crate::domain::SharingDomain;

/// A share of a secret.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Share {
    /// The x-coordinate (>= 1). Public information (who owns the share).
    index: u32,

    /// f(index) mod q. Highly sensitive information.
    value: BigUint,
}

impl fmt::Debug for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Share")
            .field("index", &self.index)
            .field("value", &"***SENSITIVE***")
            .finish()
    }
}

impl Zeroize for Share {
    fn zeroize(&mut self) {
        wipe(&mut self.value);
    }
}

impl Drop for Share {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for Share {}

impl Share {
    /// Creates a new share with validation.
    ///
    /// # Returns
    /// * `Err(VssError::InvalidShareIndex)` if `index` is 0 (x = 0 holds the secret).
    pub fn new(index: u32, value: BigUint) -> Result<Self, VssError> {
        if index == 0 {
            return Err(VssError::InvalidShareIndex);
        }
        Ok(Self { index, value })
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Checks this share against the dealer's commitments.
    pub fn verify(&self, commitments: &CommitmentVector, domain: &SharingDomain) -> bool {
        verify_share(&self.value, self.index, commitments.values(), domain.g(), domain.p())
    }
}

/// Evaluates the dealer polynomial at participant index `i`, modulo `q`.
///
/// # Returns
/// * `Err(VssError::InvalidShareIndex)` for `i = 0`.
/// * `Err(VssError::EmptyPolynomial)` for an empty coefficient slice or zero `q`.
pub fn generate_share(i: u32, coefficients: &[BigUint], q: &BigUint) -> Result<BigUint, VssError> {
    if i == 0 {
        return Err(VssError::InvalidShareIndex);
    }
    if coefficients.is_empty() || q.is_zero() {
        return Err(VssError::EmptyPolynomial);
    }
    Ok(evaluate_polynomial(coefficients, &BigUint::from(i), q))
}

/// Verifies `share` for index `i` against Feldman commitments.
///
/// lhs = g^share mod p, rhs = prod_j C_j^(i^j) mod p, where `i^j` is the
/// plain integer power. A mismatch, index 0, or an empty commitment vector
/// yields `false`; the caller decides what to do with a bad dealer.
pub fn verify_share(share: &BigUint, i: u32, commitments: &[BigUint], g: &BigUint, p: &BigUint) -> bool {
    if i == 0 || commitments.is_empty() || p.is_zero() {
        return false;
    }

    let lhs = g.modpow(share, p);

    let x = BigUint::from(i);
    let mut power = BigUint::one(); // i^j
    let mut rhs = BigUint::one();
    for commitment in commitments {
        rhs = rhs * commitment.modpow(&power, p) % p;
        power *= &x;
    }

    let ok = lhs == rhs;
    if !ok {
        log::warn!("Share verification failed for participant {}", i);
    }
    ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::small_domain;
    use crate::vss::commitment::generate_commitments;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn test_share_creation() {
        let s = Share::new(1, big(10)).unwrap();
        assert_eq!(s.index(), 1);
        assert_eq!(s.value(), &big(10));
    }

    #[test]
    fn test_share_validation() {
        assert_eq!(Share::new(0, big(1)), Err(VssError::InvalidShareIndex));
    }

    #[test]
    fn test_debug_redaction() {
        let s = Share::new(5, big(987_654_321)).unwrap();
        let debug_str = format!("{:?}", s);
        assert!(debug_str.contains("index: 5"));
        assert!(debug_str.contains("***SENSITIVE***"));
        assert!(!debug_str.contains("987654321"));
    }

    #[test]
    fn test_zeroize_keeps_index() {
        let mut s = Share::new(9, big(424_242)).unwrap();
        s.zeroize();
        assert_eq!(s.index(), 9);
        assert!(s.value().is_zero());
    }

    #[test]
    fn test_generate_share_known_values() {
        // f(x) = 7 + 3x + 2x^2 over Z_1019
        let q = big(1019);
        let coeffs = [big(7), big(3), big(2)];
        assert_eq!(generate_share(1, &coeffs, &q).unwrap(), big(12));
        assert_eq!(generate_share(2, &coeffs, &q).unwrap(), big(21));
        assert_eq!(generate_share(50, &coeffs, &q).unwrap(), big((7 + 150 + 5000) % 1019));
        assert_eq!(generate_share(0, &coeffs, &q), Err(VssError::InvalidShareIndex));
        assert_eq!(generate_share(1, &[], &q), Err(VssError::EmptyPolynomial));
    }

    #[test]
    fn test_verify_known_values() {
        let domain = small_domain();
        let coeffs = [big(7), big(3), big(2)];
        let c = generate_commitments(&coeffs, domain.g(), domain.p()).unwrap();

        for i in 1..=10u32 {
            let s = generate_share(i, &coeffs, domain.q()).unwrap();
            assert!(verify_share(&s, i, c.values(), domain.g(), domain.p()), "index {}", i);
            let bad = (&s + 1u32) % domain.q();
            assert!(!verify_share(&bad, i, c.values(), domain.g(), domain.p()), "index {}", i);
        }
    }

    #[test]
    fn test_exponent_not_reduced_mod_q() {
        // i^j exceeds q here; verification must still hold.
        let domain = small_domain();
        let coeffs = [big(11), big(22), big(33), big(44)];
        let c = generate_commitments(&coeffs, domain.g(), domain.p()).unwrap();
        let s = generate_share(1000, &coeffs, domain.q()).unwrap();
        assert!(verify_share(&s, 1000, c.values(), domain.g(), domain.p()));
    }

    #[test]
    fn test_verify_degenerate_inputs() {
        let domain = small_domain();
        let c = generate_commitments(&[big(5)], domain.g(), domain.p()).unwrap();
        assert!(!verify_share(&big(5), 0, c.values(), domain.g(), domain.p()));
        assert!(!verify_share(&big(0), 1, &[], domain.g(), domain.p()));
        assert!(verify_share(&big(5), 1, c.values(), domain.g(), domain.p()));
    }

    #[test]
    fn test_share_verify_method() {
        let domain = small_domain();
        let coeffs = [big(100), big(200)];
        let c = generate_commitments(&coeffs, domain.g(), domain.p()).unwrap();
        let share = Share::new(3, generate_share(3, &coeffs, domain.q()).unwrap()).unwrap();
        assert!(share.verify(&c, &domain));
    }
}
