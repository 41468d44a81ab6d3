//! Modular arithmetic over arbitrary-precision integers.
//!
//! Every other module builds on the four operations here: modular
//! exponentiation, modular inversion, uniform range sampling, and a
//! Miller-Rabin probable-prime test. All of them are pure; the samplers
//! take the caller's random source as `&mut (impl RngCore + CryptoRng)`,
//! so a non-cryptographic generator is rejected at the type level.

use num_bigint::{BigInt, BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::{CryptoRng, RngCore};

use crate::errors::Error;

/// Computes `base ^ exponent mod modulus`.
///
/// The base may be negative or outside `[0, modulus)`; it is reduced
/// into range before exponentiation. A modulus of `1` yields `0`.
///
/// # Panics
///
/// Panics on a zero modulus, which is a caller bug.
pub fn mod_pow(base: &BigInt, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    assert!(!modulus.is_zero(), "zero modulus");
    if modulus.is_one() {
        return BigUint::zero();
    }
    let signed_modulus = BigInt::from(modulus.clone());
    let normalized = base
        .mod_floor(&signed_modulus)
        .to_biguint()
        .expect("value reduced mod a positive modulus is non-negative");
    normalized.modpow(exponent, modulus)
}

/// Computes the multiplicative inverse of `a` modulo `modulus` with the
/// extended Euclidean algorithm.
///
/// # Errors
///
/// [`Error::InverseNotFound`] when `gcd(a, modulus) != 1`.
pub fn mod_inv(a: &BigUint, modulus: &BigUint) -> Result<BigUint, Error> {
    let a = BigInt::from(a.clone());
    let signed_modulus = BigInt::from(modulus.clone());
    let ext = a.extended_gcd(&signed_modulus);
    if !ext.gcd.is_one() {
        return Err(Error::InverseNotFound);
    }
    let inverse = ext
        .x
        .mod_floor(&signed_modulus)
        .to_biguint()
        .expect("value reduced mod a positive modulus is non-negative");
    Ok(inverse)
}

/// Samples a uniform integer from `[min, max)`.
///
/// Draws a value matched to the bit length of `max - min` and rejects
/// until it lands inside the range, so every result is equally likely.
///
/// # Panics
///
/// Panics when `min >= max` (empty range), which is a caller bug.
pub fn random_in_range<R>(rng: &mut R, min: &BigUint, max: &BigUint) -> BigUint
where
    R: RngCore + CryptoRng,
{
    assert!(min < max, "empty sampling range");
    let range = max - min;
    let bits = range.bits();
    loop {
        let candidate = rng.gen_biguint(bits);
        if candidate < range {
            return min + candidate;
        }
    }
}

/// Miller-Rabin probable-prime test with `rounds` random witnesses.
///
/// A `true` result is wrong with probability at most `4^-rounds`;
/// `false` is always certain.
pub fn is_probable_prime<R>(n: &BigUint, rounds: usize, rng: &mut R) -> bool
where
    R: RngCore + CryptoRng,
{
    let two = BigUint::from(2u32);
    let three = BigUint::from(3u32);
    if *n == two || *n == three {
        return true;
    }
    if *n < two || n.is_even() {
        return false;
    }

    let n_minus_1 = n - 1u32;
    let (s, d) = factor_powers_of_two(&n_minus_1);

    'witness: for _ in 0..rounds {
        let a = random_in_range(rng, &two, &n_minus_1);
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_1 {
            continue;
        }
        for _ in 0..s - 1 {
            x = (&x * &x) % n;
            if x == n_minus_1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Splits `n` into `(s, d)` with `n = 2^s * d` and `d` odd.
fn factor_powers_of_two(n: &BigUint) -> (u64, BigUint) {
    let mut s = 0;
    let mut d = n.clone();
    while d.is_even() {
        d >>= 1;
        s += 1;
    }
    (s, d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn uint(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn mod_pow_basic() {
        assert_eq!(mod_pow(&BigInt::from(4), &uint(13), &uint(497)), uint(445));
        assert_eq!(mod_pow(&BigInt::from(2), &uint(10), &uint(1000)), uint(24));
    }

    #[test]
    fn mod_pow_normalizes_negative_base() {
        // -2 ≡ 5 (mod 7), and 5^3 = 125 ≡ 6 (mod 7)
        assert_eq!(mod_pow(&BigInt::from(-2), &uint(3), &uint(7)), uint(6));
        // base far above the modulus
        assert_eq!(mod_pow(&BigInt::from(100), &uint(2), &uint(7)), uint(4));
    }

    #[test]
    fn mod_pow_modulus_one() {
        assert_eq!(mod_pow(&BigInt::from(12345), &uint(678), &uint(1)), uint(0));
    }

    #[test]
    fn mod_inv_roundtrip() {
        let p = uint(2069);
        for a in [2u64, 3, 17, 1000, 2068] {
            let a = uint(a);
            let inv = mod_inv(&a, &p).expect("inverse");
            assert_eq!((&a * &inv) % &p, uint(1));
        }
    }

    #[test]
    fn mod_inv_shared_factor() {
        let err = mod_inv(&uint(6), &uint(9));
        assert!(matches!(err, Err(Error::InverseNotFound)));
    }

    #[test]
    fn random_in_range_stays_in_bounds() {
        let mut rng = StdRng::from_entropy();
        let min = uint(100);
        let max = uint(117);
        let mut seen_low = false;
        for _ in 0..500 {
            let v = random_in_range(&mut rng, &min, &max);
            assert!(v >= min && v < max);
            if v == min {
                seen_low = true;
            }
        }
        // the lower bound is inclusive and must be reachable
        assert!(seen_low);
    }

    #[test]
    fn miller_rabin_knowns() {
        let mut rng = StdRng::from_entropy();
        for prime in [2u64, 3, 5, 23, 97, 2069, 1_000_003] {
            assert!(is_probable_prime(&uint(prime), 20, &mut rng), "{prime}");
        }
        for composite in [1u64, 4, 91, 561, 2047, 1_000_001] {
            assert!(!is_probable_prime(&uint(composite), 20, &mut rng), "{composite}");
        }
    }
}
