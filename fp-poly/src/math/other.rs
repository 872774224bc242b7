use num_traits::checked_pow;

/// Check if `n` is a prime number.
///
/// Uses trial division up to sqrt(n). Suitable for field orders and polynomial degrees,
/// not for large integers; see [`is_probable_prime`](super::primality::is_probable_prime).
pub const fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let mut i = 3;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// The distinct prime divisors of `n`, in increasing order. Empty for 0 and 1.
pub fn prime_divisors(n: usize) -> Vec<usize> {
    let mut divisors = vec![];
    if n < 2 {
        return divisors;
    }

    let mut rest = n;
    let mut candidate = 2;
    while candidate * candidate <= rest {
        if rest % candidate == 0 {
            divisors.push(candidate);
            while rest % candidate == 0 {
                rest /= candidate;
            }
        }
        candidate += 1;
    }
    if rest > 1 {
        divisors.push(rest);
    }

    divisors
}

/// `base^exponent`, or `None` on overflow.
pub fn checked_power(base: usize, exponent: usize) -> Option<usize> {
    checked_pow(base, exponent)
}
