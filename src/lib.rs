//! Feldman verifiable secret sharing and homomorphic tally combination.
//!
//! # Components
//! - `domain`: Safe-prime group `(p, q, g)` generation and validation.
//! - `vss`: Polynomials, commitments, shares, verification, reconstruction
//!   and multi-dealer aggregation.
//! - `homomorphic`: Ciphertext combination for Paillier / Damgård–Jurik.
//! - `arith`: Modular helpers, random sampling and primality testing.
//! - `entropy`: Pluggable randomness sources.
//! - `config`: Sharing parameters and search limits.
//!
//! # Security
//! - All randomness comes from an [`entropy::EntropySource`]; the default is
//!   the operating system CSPRNG.
//! - Secret material is wiped on drop and redacted from `Debug` output.
//! - Every operation is a pure function of its inputs and the entropy source.
//!   Values can be shared freely across threads.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod arith;
pub mod config;
pub mod domain;
pub mod entropy;
pub mod homomorphic;
pub mod vss;

pub use config::{ConfigError, VssConfig};
pub use domain::{find_generator, generate_safe_prime, DomainError, SharingDomain};
pub use entropy::{EntropyError, EntropySource, OsEntropy};
pub use homomorphic::{combine_ciphertexts, fold_ciphertexts, CombineError, HomomorphicParams};
pub use vss::{
    aggregate::{aggregate_commitments, aggregate_shares, refresh_shares},
    deal, generate_commitments, generate_share, lagrange_interpolation, reconstruct_secret, verify_share,
    CommitmentVector, Dealing, FeldmanVss, Polynomial, ReconstructedSecret, Share, VerifiableSecretSharing,
    VssError,
};
