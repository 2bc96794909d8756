//! Secret reconstruction from shares.
//!
//! Lagrange interpolation over `Z_q` evaluated at x = 0:
//!
//! l_i = prod_{j != i} (-x_j) * (x_i - x_j)^-1 mod q,
//! secret = sum_i s_i * l_i mod q.
//!
//! Inverses come from the extended Euclidean algorithm. A denominator with no
//! inverse is reported as [`VssError::NonInvertible`], never approximated.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use super::{share::Share, VssError};
use crate::arith::modular::{mod_inverse, mod_neg, mod_sub};
use crate::arith::wipe;

/// A secret recovered by interpolation.
///
/// Wiped on drop; `Debug` is redacted. The caller decides how long it lives.
pub struct ReconstructedSecret(BigUint);

impl ReconstructedSecret {
    /// Borrows the recovered value.
    pub fn expose(&self) -> &BigUint {
        &self.0
    }

    /// Moves the value out; the caller takes over its erasure.
    pub fn into_inner(mut self) -> BigUint {
        core::mem::take(&mut self.0)
    }
}

impl fmt::Debug for ReconstructedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ReconstructedSecret(***SENSITIVE***)")
    }
}

impl Drop for ReconstructedSecret {
    fn drop(&mut self) {
        wipe(&mut self.0);
    }
}

/// Interpolates `{index -> share}` at x = 0 modulo `q`.
///
/// Every supplied point is used; the caller picks the subset. Any `k` points
/// of a degree `k - 1` polynomial give the same result.
///
/// # Returns
/// * `Err(VssError::InsufficientShares)` for an empty map.
/// * `Err(VssError::InvalidShareIndex)` if index 0 is present.
/// * `Err(VssError::NonInvertible)` if two indices coincide modulo `q`.
pub fn lagrange_interpolation(
    shares: &BTreeMap<u32, BigUint>,
    q: &BigUint,
) -> Result<ReconstructedSecret, VssError> {
    if shares.is_empty() {
        return Err(VssError::InsufficientShares { have: 0, need: 1 });
    }
    if q.is_zero() {
        return Err(VssError::NonInvertible);
    }
    if shares.contains_key(&0) {
        return Err(VssError::InvalidShareIndex);
    }

    let xs: Vec<BigUint> = shares.keys().map(|&i| BigUint::from(i)).collect();
    let mut secret = ReconstructedSecret(BigUint::zero());

    for (i, s_i) in shares.values().enumerate() {
        let x_i = &xs[i];
        let mut numerator = BigUint::one();
        let mut denominator = BigUint::one();

        for (j, x_j) in xs.iter().enumerate() {
            if i == j {
                continue;
            }
            numerator = numerator * mod_neg(x_j, q) % q;
            denominator = denominator * mod_sub(x_i, x_j, q) % q;
        }

        let inverse = mod_inverse(&denominator, q).ok_or(VssError::NonInvertible)?;
        let basis = numerator * inverse % q;
        let mut term = s_i * basis % q;

        secret.0 = (&secret.0 + &term) % q;
        wipe(&mut term);
    }

    Ok(secret)
}

/// Reconstructs the secret from at least `k` shares.
///
/// Validates the share set before interpolating: `k >= 1`, at least `k`
/// shares, no duplicate indices.
pub fn reconstruct_secret(shares: &[Share], k: u32, q: &BigUint) -> Result<ReconstructedSecret, VssError> {
    if k < 1 {
        return Err(VssError::InvalidThreshold);
    }
    if shares.len() < k as usize {
        return Err(VssError::InsufficientShares { have: shares.len(), need: k as usize });
    }

    let mut points = collect_points(shares)?;
    let result = lagrange_interpolation(&points, q);
    wipe_points(&mut points);
    if result.is_ok() {
        log::info!("Secret reconstructed from {} shares (threshold {})", shares.len(), k);
    }
    result
}

// Copies share values into an index map. A duplicate index is detected before
// its value is copied, and the partial map is wiped on error.
fn collect_points(shares: &[Share]) -> Result<BTreeMap<u32, BigUint>, VssError> {
    let mut points = BTreeMap::new();
    for share in shares {
        if points.contains_key(&share.index()) {
            wipe_points(&mut points);
            return Err(VssError::DuplicateShareIndex);
        }
        points.insert(share.index(), share.value().clone());
    }
    Ok(points)
}

fn wipe_points(points: &mut BTreeMap<u32, BigUint>) {
    for value in points.values_mut() {
        wipe(value);
    }
}
