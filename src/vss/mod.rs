//! Feldman Verifiable Secret Sharing over a safe-prime subgroup.
//!
//! A dealer hides a secret as the constant term of a random polynomial of
//! degree `k - 1` over `Z_q`, publishes Feldman commitments `g^a_j mod p` to
//! every coefficient and hands participant `i` the evaluation `f(i)`. Each
//! participant checks its share against the commitments; any `k` shares
//! recover `f(0)` by Lagrange interpolation.
//!
//! # Components
//! - `polynomial`: Random polynomial generation and Horner evaluation.
//! - `commitment`: Feldman commitments to coefficients.
//! - `share`: Share generation and verification.
//! - `reconstruct`: Lagrange interpolation at x = 0.
//! - `dealer`: One-call dealing and batch verification.
//! - `aggregate`: Share/commitment aggregation for distributed key generation
//!   and proactive refresh.
//!
//! # Index convention
//! Participant index `i >= 1` is the x-coordinate of its share. The secret
//! sits at x = 0, which is never handed out.
//!
//! # Security
//! - **Zeroization**: Polynomials, shares and reconstructed secrets are wiped on drop.
//! - **Redaction**: `Debug` output never contains secret values.

pub mod aggregate;
pub mod commitment;
pub mod dealer;
pub mod polynomial;
pub mod reconstruct;
pub mod share;

use alloc::vec::Vec;
use core::fmt;

use num_bigint::BigUint;

use crate::arith::ArithError;
use crate::config::{ConfigError, VssConfig};
use crate::domain::SharingDomain;
use crate::entropy::EntropySource;

pub use commitment::{generate_commitments, CommitmentVector};
pub use dealer::{deal, Dealing};
pub use polynomial::Polynomial;
pub use reconstruct::{lagrange_interpolation, reconstruct_secret, ReconstructedSecret};
pub use share::{generate_share, verify_share, Share};

/// Errors for VSS operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VssError {
    /// Invalid share index (must be >= 1 and distinct modulo q).
    InvalidShareIndex,
    /// Threshold configuration error (k < 1, k > n).
    InvalidThreshold,
    /// Polynomial or commitment vector has no coefficients.
    EmptyPolynomial,
    /// Not enough shares to reconstruct.
    InsufficientShares {
        /// Shares supplied.
        have: usize,
        /// Shares required.
        need: usize,
    },
    /// Duplicate share indices provided.
    DuplicateShareIndex,
    /// A Lagrange denominator has no inverse modulo q.
    NonInvertible,
    /// Shares being combined belong to different indices.
    IndexMismatch,
    /// Commitment vectors being combined have different lengths.
    LengthMismatch,
    /// Random number generator failure.
    RngFailure,
    /// The supplied configuration is inconsistent.
    Config(ConfigError),
}

impl fmt::Display for VssError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VssError::InvalidShareIndex => write!(f, "invalid share index"),
            VssError::InvalidThreshold => write!(f, "invalid threshold"),
            VssError::EmptyPolynomial => write!(f, "polynomial has no coefficients"),
            VssError::InsufficientShares { have, need } => {
                write!(f, "insufficient shares: have {}, need {}", have, need)
            }
            VssError::DuplicateShareIndex => write!(f, "duplicate share index"),
            VssError::NonInvertible => write!(f, "Lagrange denominator is not invertible mod q"),
            VssError::IndexMismatch => write!(f, "shares belong to different indices"),
            VssError::LengthMismatch => write!(f, "commitment vectors differ in length"),
            VssError::RngFailure => write!(f, "random number generator failure"),
            VssError::Config(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for VssError {}

impl From<ArithError> for VssError {
    fn from(e: ArithError) -> Self {
        match e {
            ArithError::Entropy(_) => VssError::RngFailure,
            // Only reachable with a zero modulus.
            ArithError::InvalidBound | ArithError::InvalidBitLength => VssError::EmptyPolynomial,
        }
    }
}

impl From<ConfigError> for VssError {
    fn from(e: ConfigError) -> Self {
        VssError::Config(e)
    }
}

/// Trait for verifiable secret sharing schemes.
pub trait VerifiableSecretSharing {
    type Share;
    type Secret;
    type Commitment;
    type Error;

    /// Splits a secret according to `config`, returning the public commitment
    /// and one share per participant.
    fn split<R: EntropySource + ?Sized>(
        &self,
        secret: &Self::Secret,
        config: &VssConfig,
        rng: &mut R,
    ) -> Result<(Self::Commitment, Vec<Self::Share>), Self::Error>;

    /// Checks a single share against the dealer's commitment.
    fn verify(&self, share: &Self::Share, commitment: &Self::Commitment) -> bool;

    /// Reconstructs the secret from at least `k` shares.
    fn reconstruct(&self, shares: &[Self::Share], k: u32) -> Result<Self::Secret, Self::Error>;
}

/// Feldman VSS bound to a sharing domain.
#[derive(Debug, Clone, Copy)]
pub struct FeldmanVss<'a> {
    domain: &'a SharingDomain,
}

impl<'a> FeldmanVss<'a> {
    pub fn new(domain: &'a SharingDomain) -> Self {
        Self { domain }
    }

    pub fn domain(&self) -> &'a SharingDomain {
        self.domain
    }
}

impl VerifiableSecretSharing for FeldmanVss<'_> {
    type Share = Share;
    type Secret = BigUint;
    type Commitment = CommitmentVector;
    type Error = VssError;

    fn split<R: EntropySource + ?Sized>(
        &self,
        secret: &BigUint,
        config: &VssConfig,
        rng: &mut R,
    ) -> Result<(CommitmentVector, Vec<Share>), VssError> {
        deal(secret, config, self.domain, rng).map(Dealing::into_parts)
    }

    fn verify(&self, share: &Share, commitment: &CommitmentVector) -> bool {
        share.verify(commitment, self.domain)
    }

    fn reconstruct(&self, shares: &[Share], k: u32) -> Result<BigUint, VssError> {
        reconstruct_secret(shares, k, self.domain.q()).map(ReconstructedSecret::into_inner)
    }
}
