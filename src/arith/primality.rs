//! Probabilistic primality testing.
//!
//! Miller-Rabin with random witnesses, preceded by trial division against a
//! table of small primes. Each round has false-positive probability at most
//! 1/4, so 20 rounds give at most 2^-40.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use super::{random_range, ArithError};
use crate::entropy::EntropySource;

/// Minimum number of Miller-Rabin rounds accepted by field setup.
pub const MIN_MILLER_RABIN_ROUNDS: u32 = 20;

/// Odd primes below 256, used for trial division and safe-prime sieving.
pub(crate) const SMALL_PRIMES: [u32; 53] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181,
    191, 193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Outcome of trial division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sieve {
    Prime,
    Composite,
    Unknown,
}

fn trial_division(n: &BigUint) -> Sieve {
    if n < &BigUint::from(2u32) {
        return Sieve::Composite;
    }
    if n.is_even() {
        return if n == &BigUint::from(2u32) { Sieve::Prime } else { Sieve::Composite };
    }
    for &p in SMALL_PRIMES.iter() {
        if n == &BigUint::from(p) {
            return Sieve::Prime;
        }
        if (n % p).is_zero() {
            return Sieve::Composite;
        }
    }
    Sieve::Unknown
}

/// Returns `true` if `n` is probably prime after `rounds` Miller-Rabin rounds.
pub fn is_probable_prime<R: EntropySource + ?Sized>(
    n: &BigUint,
    rounds: u32,
    rng: &mut R,
) -> Result<bool, ArithError> {
    match trial_division(n) {
        Sieve::Prime => return Ok(true),
        Sieve::Composite => return Ok(false),
        Sieve::Unknown => {}
    }

    // n - 1 = d * 2^r with d odd
    let n_minus_one = n - 1u32;
    let r = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> r;
    let two = BigUint::from(2u32);
    let high = n - 2u32;

    'witness: for _ in 0..rounds {
        let a = random_range(rng, &two, &high)?;
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..r {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
            if x.is_one() {
                return Ok(false);
            }
        }
        return Ok(false);
    }
    Ok(true)
}

/// Cheap pre-filter for safe-prime candidates: rejects `q` when `q` or
/// `2q + 1` has a small prime factor.
pub(crate) fn safe_prime_sieve(q: &BigUint) -> bool {
    for &r in SMALL_PRIMES.iter() {
        let residue = q % r;
        let small = BigUint::from(r);
        if residue.is_zero() && q != &small {
            return false;
        }
        // 2q + 1 ≡ 0 (mod r)  <=>  q ≡ (r - 1) / 2 (mod r)
        if residue == BigUint::from((r - 1) / 2) && (q * 2u32 + 1u32) != small {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::OsEntropy;

    fn prime(n: u64) -> bool {
        is_probable_prime(&BigUint::from(n), MIN_MILLER_RABIN_ROUNDS, &mut OsEntropy::new()).unwrap()
    }

    #[test]
    fn test_small_values() {
        assert!(!prime(0));
        assert!(!prime(1));
        assert!(prime(2));
        assert!(prime(3));
        assert!(!prime(4));
        assert!(prime(251));
        assert!(!prime(253));
        assert!(prime(257));
        assert!(prime(65537));
    }

    #[test]
    fn test_carmichael_numbers_rejected() {
        for n in [561u64, 1105, 1729, 2465, 2821, 6601, 8911, 41041, 825265] {
            assert!(!prime(n), "{} is a Carmichael number", n);
        }
    }

    #[test]
    fn test_known_large_primes() {
        // 2^127 - 1 (Mersenne) and 2^61 - 1
        let m127 = (BigUint::one() << 127u32) - 1u32;
        let m61 = (BigUint::one() << 61u32) - 1u32;
        let mut rng = OsEntropy::new();
        assert!(is_probable_prime(&m127, 20, &mut rng).unwrap());
        assert!(is_probable_prime(&m61, 20, &mut rng).unwrap());
        assert!(!is_probable_prime(&(&m127 * &m61), 20, &mut rng).unwrap());
    }

    #[test]
    fn test_safe_prime_sieve() {
        // 11 and 23 form a safe-prime pair; q = 13 gives 2q+1 = 27.
        assert!(safe_prime_sieve(&BigUint::from(11u32)));
        assert!(!safe_prime_sieve(&BigUint::from(13u32)));
        // q = 7 is prime but 2q + 1 = 15 is not.
        assert!(!safe_prime_sieve(&BigUint::from(7u32)));
        assert!(!safe_prime_sieve(&BigUint::from(21u32)));
    }
}
