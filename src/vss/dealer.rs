//! Dealer side of one sharing round, plus batch verification.
//!
//! `deal` runs the whole pipeline: polynomial, commitments, one share per
//! participant index `1..=n`. The polynomial is dropped (and wiped) before
//! returning; only public commitments and private shares leave.

use alloc::vec::Vec;

use num_bigint::BigUint;

use super::commitment::CommitmentVector;
use super::polynomial::Polynomial;
use super::share::Share;
use super::VssError;
use crate::config::VssConfig;
use crate::domain::SharingDomain;
use crate::entropy::EntropySource;

/// Output of a dealer: public commitments and per-participant shares.
#[derive(Debug, Clone)]
pub struct Dealing {
    commitments: CommitmentVector,
    shares: Vec<Share>,
}

impl Dealing {
    pub fn commitments(&self) -> &CommitmentVector {
        &self.commitments
    }

    pub fn shares(&self) -> &[Share] {
        &self.shares
    }

    /// The share addressed to participant `index`, if any.
    pub fn share_for(&self, index: u32) -> Option<&Share> {
        self.shares.iter().find(|s| s.index() == index)
    }

    pub fn into_parts(self) -> (CommitmentVector, Vec<Share>) {
        (self.commitments, self.shares)
    }

    /// Indices whose share fails verification against the commitments.
    pub fn invalid_indices(&self, domain: &SharingDomain) -> Vec<u32> {
        self.shares
            .iter()
            .filter(|s| !s.verify(&self.commitments, domain))
            .map(Share::index)
            .collect()
    }

    /// `true` when every share verifies.
    pub fn verify_all(&self, domain: &SharingDomain) -> bool {
        self.shares.iter().all(|s| s.verify(&self.commitments, domain))
    }
}

/// Shares `secret` among `config.participants` parties with threshold
/// `config.threshold`.
///
/// # Returns
/// * `Err(VssError::Config)` if the configuration is inconsistent.
/// * `Err(VssError::InvalidShareIndex)` if `n >= q`, since indices would
///   collide modulo q.
/// * `Err(VssError::RngFailure)` if the entropy source fails.
pub fn deal<R: EntropySource + ?Sized>(
    secret: &BigUint,
    config: &VssConfig,
    domain: &SharingDomain,
    rng: &mut R,
) -> Result<Dealing, VssError> {
    config.validate()?;
    if &BigUint::from(config.participants) >= domain.q() {
        return Err(VssError::InvalidShareIndex);
    }

    let polynomial = Polynomial::generate(config.threshold, secret, domain.q(), rng)?;
    let commitments = polynomial.commit(domain);

    let shares = (1..=config.participants)
        .map(|i| Share::new(i, polynomial.evaluate(i, domain.q())))
        .collect::<Result<Vec<_>, _>>()?;

    log::info!(
        "Dealt {} shares with threshold {} (commitments {})",
        shares.len(),
        config.threshold,
        commitments.digest_hex()
    );

    Ok(Dealing { commitments, shares })
}

/// Verifies many shares against one commitment vector on the rayon pool.
///
/// Returns `(index, valid)` in input order.
#[cfg(feature = "parallel")]
pub fn verify_batch(
    shares: &[Share],
    commitments: &CommitmentVector,
    domain: &SharingDomain,
) -> Vec<(u32, bool)> {
    use rayon::prelude::*;

    shares
        .par_iter()
        .map(|s| (s.index(), s.verify(commitments, domain)))
        .collect()
}
