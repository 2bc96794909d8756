//! Modular arithmetic over `BigUint` residues.

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::{ExtendedGcd, Integer};
use num_traits::{One, Zero};

/// Computes `(a - b) mod m` without leaving the unsigned domain.
pub fn mod_sub(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    let a = a % m;
    let b = b % m;
    if a >= b {
        a - b
    } else {
        m - (b - a)
    }
}

/// Computes `-a mod m`.
pub fn mod_neg(a: &BigUint, m: &BigUint) -> BigUint {
    let a = a % m;
    if a.is_zero() {
        a
    } else {
        m - a
    }
}

/// Modular inverse via the extended Euclidean algorithm.
///
/// Returns `None` when `gcd(a, m) != 1` (including `a ≡ 0`) or `m` is zero.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    let modulus = BigInt::from_biguint(Sign::Plus, m.clone());
    let value = BigInt::from_biguint(Sign::Plus, a % m);

    let ExtendedGcd { gcd, x, .. } = value.extended_gcd(&modulus);
    if !gcd.is_one() {
        return None;
    }
    x.mod_floor(&modulus).to_biguint()
}
