//! Feldman commitments.
//!
//! `C_j = g^(a_j) mod p` for every coefficient `a_j`. Publishing the vector
//! lets any participant check its share without learning the coefficients,
//! under the discrete-log assumption in the order-q subgroup.

use alloc::vec::Vec;

use num_bigint::BigUint;
use num_traits::Zero;

use super::VssError;

/// Public commitments of one dealing, in coefficient order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommitmentVector {
    values: Vec<BigUint>,
}

impl CommitmentVector {
    /// Wraps commitments received from a dealer.
    pub fn from_values(values: Vec<BigUint>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[BigUint] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Threshold k implied by the commitment count.
    pub fn threshold(&self) -> usize {
        self.values.len()
    }

    /// `C_0 = g^secret mod p`, the public image of the shared secret.
    pub fn constant_term(&self) -> Option<&BigUint> {
        self.values.first()
    }

    /// BLAKE3 digest over the length-prefixed big-endian commitments.
    ///
    /// Participants compare digests to detect a dealer that broadcast
    /// different commitment vectors to different parties.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.values.len() as u64).to_be_bytes());
        for value in &self.values {
            let bytes = value.to_bytes_be();
            hasher.update(&(bytes.len() as u64).to_be_bytes());
            hasher.update(&bytes);
        }
        *hasher.finalize().as_bytes()
    }

    /// Hex form of [`CommitmentVector::digest`].
    pub fn digest_hex(&self) -> alloc::string::String {
        hex::encode(self.digest())
    }
}

/// Computes `g^(a_j) mod p` for each coefficient.
///
/// Pure and deterministic. Fails only on an empty coefficient slice or a
/// zero modulus.
pub fn generate_commitments(
    coefficients: &[BigUint],
    g: &BigUint,
    p: &BigUint,
) -> Result<CommitmentVector, VssError> {
    if coefficients.is_empty() || p.is_zero() {
        return Err(VssError::EmptyPolynomial);
    }
    Ok(CommitmentVector::from_values(
        coefficients.iter().map(|a| g.modpow(a, p)).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::small_domain;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn test_generate_commitments() {
        let domain = small_domain();
        let coeffs = [big(0), big(1), big(2), big(1018)];
        let c = generate_commitments(&coeffs, domain.g(), domain.p()).unwrap();

        assert_eq!(c.len(), 4);
        assert_eq!(c.values()[0], big(1));
        assert_eq!(c.values()[1], big(4));
        assert_eq!(c.values()[2], big(16));
        // g^(q-1) = g^-1 since g has order q
        assert_eq!((&c.values()[3] * domain.g()) % domain.p(), big(1));
        assert_eq!(c.constant_term(), Some(&big(1)));
    }

    #[test]
    fn test_generate_commitments_deterministic() {
        let domain = small_domain();
        let coeffs = [big(17), big(400)];
        assert_eq!(
            generate_commitments(&coeffs, domain.g(), domain.p()).unwrap(),
            generate_commitments(&coeffs, domain.g(), domain.p()).unwrap()
        );
    }

    #[test]
    fn test_empty_rejected() {
        let domain = small_domain();
        assert_eq!(
            generate_commitments(&[], domain.g(), domain.p()),
            Err(VssError::EmptyPolynomial)
        );
    }

    #[test]
    fn test_digest_distinguishes_vectors() {
        let a = CommitmentVector::from_values(vec![big(1), big(4)]);
        let b = CommitmentVector::from_values(vec![big(1), big(16)]);
        // Same bytes, different split.
        let c = CommitmentVector::from_values(vec![big(0x0104)]);
        assert_eq!(a.digest(), a.clone().digest());
        assert_ne!(a.digest(), b.digest());
        assert_ne!(a.digest(), c.digest());
        assert_eq!(a.digest_hex().len(), 64);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let a = CommitmentVector::from_values(vec![big(1), big(4), big(1 << 40)]);
        let json = serde_json::to_string(&a).unwrap();
        let back: CommitmentVector = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }
}
