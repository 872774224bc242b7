use num_bigint::BigUint;
use num_traits::One;
use num_traits::ToPrimitive;
use num_traits::Zero;
use rand::Rng;
use tracing::trace;

use super::other::is_prime;
use crate::error::PolynomialError;

/// Bases checked by trial division before running Miller-Rabin.
const SMALL_PRIMES: [u32; 15] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];

/// Miller-Rabin rounds used by [`random_prime`].
pub const MILLER_RABIN_ROUNDS: usize = 32;

/// Probabilistic primality test: trial division by small primes, then `rounds` rounds of
/// Miller-Rabin with random bases. A composite passes with probability at most `4^-rounds`.
pub fn is_probable_prime<R: Rng + ?Sized>(n: &BigUint, rounds: usize, rng: &mut R) -> bool {
    if let Some(small) = n.to_u64().filter(|&s| s < 2_500) {
        return is_prime(small);
    }
    for &p in &SMALL_PRIMES {
        if (n % p).is_zero() {
            return false;
        }
    }

    let one = BigUint::one();
    let n_minus_one = n - &one;
    let two_adicity = n_minus_one.trailing_zeros().unwrap_or(0);
    let odd_part = &n_minus_one >> two_adicity;

    // bases are drawn from [2, n - 2]
    let base_range = n - 3u32;
    'witness: for _ in 0..rounds {
        let base = BigUint::from(rng.random::<u128>()) % &base_range + 2u32;
        let mut x = base.modpow(&odd_part, n);
        if x == one || x == n_minus_one {
            continue;
        }
        for _ in 1..two_adicity {
            x = x.modpow(&BigUint::from(2u32), n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }

    true
}

/// A random (probable) prime with exactly `digits` decimal digits.
pub fn random_prime<R: Rng + ?Sized>(digits: usize, rng: &mut R) -> Result<BigUint, PolynomialError> {
    if digits == 0 {
        return Err(PolynomialError::InvalidDigitCount(digits));
    }

    let upper = num_traits::pow(BigUint::from(10u32), digits);
    loop {
        let mut candidate = random_decimal(digits, rng);
        if candidate > BigUint::from(2u32) && (&candidate % 2u32).is_zero() {
            candidate += 1u32;
        }
        while candidate < upper {
            if is_probable_prime(&candidate, MILLER_RABIN_ROUNDS, rng) {
                return Ok(candidate);
            }
            candidate += if candidate == BigUint::from(2u32) { 1u32 } else { 2u32 };
        }
        trace!(digits, "ran past the largest {digits}-digit number, redrawing");
    }
}

/// A uniformly random integer with exactly `digits` decimal digits.
fn random_decimal<R: Rng + ?Sized>(digits: usize, rng: &mut R) -> BigUint {
    let leading = rng.random_range(1..10u32);
    (1..digits).fold(BigUint::from(leading), |acc, _| {
        acc * 10u32 + rng.random_range(0..10u32)
    })
}
