//! Operations on shares from several dealings.
//!
//! Shares and commitments are linear: summing the shares a participant got
//! from several dealers yields a share of the summed secrets, and the
//! element-wise product of the dealers' commitments commits to the summed
//! polynomial. This gives distributed key generation (every party deals,
//! nobody knows the joint secret) and proactive refresh.
//!
//! # Features
//! - **Aggregation**: Sum of shares / product of commitments.
//! - **Proactive Refresh**: Updates shares without changing the secret.

use alloc::vec::Vec;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use super::commitment::CommitmentVector;
use super::polynomial::Polynomial;
use super::share::Share;
use super::VssError;
use crate::domain::SharingDomain;
use crate::entropy::EntropySource;

/// Sums shares that all belong to the same participant index, modulo `q`.
///
/// # Returns
/// * `Err(VssError::InsufficientShares)` for an empty slice.
/// * `Err(VssError::IndexMismatch)` if indices differ.
pub fn aggregate_shares(shares: &[Share], q: &BigUint) -> Result<Share, VssError> {
    let first = shares.first().ok_or(VssError::InsufficientShares { have: 0, need: 1 })?;
    let index = first.index();
    if shares.iter().any(|s| s.index() != index) {
        return Err(VssError::IndexMismatch);
    }

    let mut sum = BigUint::zero();
    for share in shares {
        sum = (sum + share.value()) % q;
    }
    Share::new(index, sum)
}

/// Multiplies commitment vectors element-wise modulo `p`.
///
/// # Returns
/// * `Err(VssError::EmptyPolynomial)` for an empty slice or empty vectors.
/// * `Err(VssError::LengthMismatch)` if the vectors differ in length.
pub fn aggregate_commitments(vectors: &[CommitmentVector], p: &BigUint) -> Result<CommitmentVector, VssError> {
    let first = vectors.first().ok_or(VssError::EmptyPolynomial)?;
    let len = first.len();
    if len == 0 {
        return Err(VssError::EmptyPolynomial);
    }
    if vectors.iter().any(|v| v.len() != len) {
        return Err(VssError::LengthMismatch);
    }

    let mut product = alloc::vec![BigUint::one(); len];
    for vector in vectors {
        for (acc, c) in product.iter_mut().zip(vector.values()) {
            *acc = &*acc * c % p;
        }
    }
    Ok(CommitmentVector::from_values(product))
}

/// Refreshes shares in place by adding a fresh sharing of zero.
///
/// The secret is unchanged but old shares can no longer be combined with
/// new ones. Returns the refresh commitments (`C_0 = 1`); combine them with
/// the previous commitments via [`aggregate_commitments`] to verify the
/// refreshed shares.
pub fn refresh_shares<R: EntropySource + ?Sized>(
    shares: &mut [Share],
    k: u32,
    domain: &SharingDomain,
    rng: &mut R,
) -> Result<CommitmentVector, VssError> {
    if shares.is_empty() {
        return Err(VssError::InsufficientShares { have: 0, need: 1 });
    }

    let zero = Polynomial::generate_zero(k, domain.q(), rng)?;
    for share in shares.iter_mut() {
        let delta = zero.evaluate(share.index(), domain.q());
        let updated = (share.value() + delta) % domain.q();
        *share = Share::new(share.index(), updated)?;
    }

    log::debug!("Refreshed {} shares with a degree-{} zero sharing", shares.len(), zero.degree());
    Ok(zero.commit(domain))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VssConfig;
    use crate::domain::{small_domain, test_domain};
    use crate::entropy::OsEntropy;
    use crate::vss::dealer::deal;
    use crate::vss::reconstruct::reconstruct_secret;

    #[test]
    fn test_distributed_key_generation() {
        // Every party deals a sharing of zero; the joint secret is zero and
        // aggregated shares verify against aggregated commitments.
        let mut rng = OsEntropy::new();
        let domain = test_domain();
        let (k, n) = (3u32, 5u32);

        let mut polys = Vec::new();
        let mut commitments = Vec::new();
        for _ in 0..n {
            let poly = Polynomial::generate_zero(k, domain.q(), &mut rng).unwrap();
            commitments.push(poly.commit(&domain));
            polys.push(poly);
        }

        // shares[j][i]: share from dealer j to participant i + 1
        let shares: Vec<Vec<Share>> = polys
            .iter()
            .map(|poly| (1..=n).map(|i| Share::new(i, poly.evaluate(i, domain.q())).unwrap()).collect())
            .collect();

        for j in 0..n as usize {
            for i in 0..n as usize {
                assert!(shares[j][i].verify(&commitments[j], &domain));
            }
        }

        let joint = aggregate_commitments(&commitments, domain.p()).unwrap();
        assert_eq!(joint.constant_term(), Some(&BigUint::one()));

        let aggregated: Vec<Share> = (0..n as usize)
            .map(|i| {
                let column: Vec<Share> = shares.iter().map(|row| row[i].clone()).collect();
                aggregate_shares(&column, domain.q()).unwrap()
            })
            .collect();
        assert!(aggregated.iter().all(|s| s.verify(&joint, &domain)));

        let secret = reconstruct_secret(&aggregated[..3], k, domain.q()).unwrap();
        assert!(secret.expose().is_zero());
    }

    #[test]
    fn test_aggregated_secrets_add() {
        let mut rng = OsEntropy::new();
        let domain = test_domain();
        let config = VssConfig::new(128, 2, 3).unwrap();

        let a = deal(&BigUint::from(1000u32), &config, &domain, &mut rng).unwrap();
        let b = deal(&BigUint::from(234u32), &config, &domain, &mut rng).unwrap();

        let summed: Vec<Share> = a
            .shares()
            .iter()
            .zip(b.shares())
            .map(|(x, y)| aggregate_shares(&[x.clone(), y.clone()], domain.q()).unwrap())
            .collect();
        let joint =
            aggregate_commitments(&[a.commitments().clone(), b.commitments().clone()], domain.p()).unwrap();

        assert!(summed.iter().all(|s| s.verify(&joint, &domain)));
        let secret = reconstruct_secret(&summed[1..], 2, domain.q()).unwrap();
        assert_eq!(secret.expose(), &BigUint::from(1234u32));
    }

    #[test]
    fn test_refresh_shares() {
        let mut rng = OsEntropy::new();
        let domain = test_domain();
        let config = VssConfig::new(128, 3, 5).unwrap();
        let secret = BigUint::from(0x1122u32);

        let (commitments, mut shares) = deal(&secret, &config, &domain, &mut rng).unwrap().into_parts();
        let original = shares.clone();

        let refresh = refresh_shares(&mut shares, 3, &domain, &mut rng).unwrap();

        // Shares should be different
        assert_ne!(shares[0].value(), original[0].value());

        let updated = aggregate_commitments(&[commitments, refresh], domain.p()).unwrap();
        assert!(shares.iter().all(|s| s.verify(&updated, &domain)));

        // Reconstruction should still yield original secret
        let recovered = reconstruct_secret(&shares[2..], 3, domain.q()).unwrap();
        assert_eq!(recovered.expose(), &secret);

        // Mixing an old and new share no longer works.
        let mixed = [original[0].clone(), shares[1].clone(), shares[2].clone()];
        let wrong = reconstruct_secret(&mixed, 3, domain.q()).unwrap();
        assert_ne!(wrong.expose(), &secret);
    }

    #[test]
    fn test_aggregate_errors() {
        let domain = small_domain();
        let s1 = Share::new(1, BigUint::from(3u32)).unwrap();
        let s2 = Share::new(2, BigUint::from(4u32)).unwrap();
        assert_eq!(aggregate_shares(&[s1, s2], domain.q()).unwrap_err(), VssError::IndexMismatch);
        assert_eq!(
            aggregate_shares(&[], domain.q()).unwrap_err(),
            VssError::InsufficientShares { have: 0, need: 1 }
        );

        let a = CommitmentVector::from_values(vec![BigUint::one(); 2]);
        let b = CommitmentVector::from_values(vec![BigUint::one(); 3]);
        assert_eq!(aggregate_commitments(&[a, b], domain.p()), Err(VssError::LengthMismatch));
        assert_eq!(aggregate_commitments(&[], domain.p()), Err(VssError::EmptyPolynomial));

        let mut rng = OsEntropy::new();
        assert_eq!(
            refresh_shares(&mut [], 2, &domain, &mut rng),
            Err(VssError::InsufficientShares { have: 0, need: 1 })
        );
    }
}
