use std::collections::TryReserveError;
use std::fmt;
use std::fmt::Formatter;

use num_bigint::BigUint;
use num_traits::Zero;

/// An arbitrary-precision set of non-negative integers, stored as the bits of a
/// [`BigUint`].
///
/// Positions are `usize` throughout; the backing integer addresses its bits with `u64`.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitIndex(BigUint);

const DIGIT_BITS: usize = u64::BITS as usize;

impl BitIndex {
    pub fn new() -> Self {
        Self(BigUint::zero())
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn test(&self, bit: usize) -> bool {
        self.0.bit(bit as u64)
    }

    /// Fails without modifying the index if the digits needed to hold `bit` cannot be
    /// allocated.
    pub fn set(&mut self, bit: usize) -> Result<(), TryReserveError> {
        self.reserve_bit(bit)?;
        self.0.set_bit(bit as u64, true);
        Ok(())
    }

    /// Checks that the digits needed to hold `bit` can be allocated. Bits below the current
    /// bit length need no allocation.
    pub fn reserve_bit(&self, bit: usize) -> Result<(), TryReserveError> {
        if bit < self.bit_length() {
            return Ok(());
        }
        Vec::<u64>::new().try_reserve_exact(bit / DIGIT_BITS + 1)
    }

    pub fn clear(&mut self, bit: usize) {
        self.0.set_bit(bit as u64, false);
    }

    /// Number of bits needed to represent the index. Zero for the empty index.
    pub fn bit_length(&self) -> usize {
        self.0.bits() as usize
    }

    pub fn count_ones(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// The number of set bits strictly below `bit`.
    pub fn rank(&self, bit: usize) -> usize {
        let full_digits = bit / DIGIT_BITS;
        let remaining_bits = bit % DIGIT_BITS;

        let mut digits = self.0.iter_u64_digits();
        let mut count = 0;
        for digit in digits.by_ref().take(full_digits) {
            count += digit.count_ones() as usize;
        }
        if remaining_bits > 0 {
            if let Some(digit) = digits.next() {
                let mask = (1u64 << remaining_bits) - 1;
                count += (digit & mask).count_ones() as usize;
            }
        }

        count
    }

    /// The position of the `k`-th set bit, counting from zero. `None` if fewer than `k + 1`
    /// bits are set.
    pub fn select(&self, k: usize) -> Option<usize> {
        let mut remaining = k;
        for (digit_index, mut digit) in self.0.iter_u64_digits().enumerate() {
            let ones = digit.count_ones() as usize;
            if remaining >= ones {
                remaining -= ones;
                continue;
            }
            for _ in 0..remaining {
                digit &= digit - 1;
            }
            return Some(digit_index * DIGIT_BITS + digit.trailing_zeros() as usize);
        }

        None
    }

    /// The position of the first set bit at or after `from`.
    pub fn next_set_bit(&self, from: usize) -> Option<usize> {
        let first_digit = from / DIGIT_BITS;
        let skipped_bits = from % DIGIT_BITS;

        for (digit_index, digit) in self.0.iter_u64_digits().enumerate().skip(first_digit) {
            let digit = if digit_index == first_digit {
                digit & (u64::MAX << skipped_bits)
            } else {
                digit
            };
            if digit != 0 {
                return Some(digit_index * DIGIT_BITS + digit.trailing_zeros() as usize);
            }
        }

        None
    }

    /// The positions of all set bits, in increasing order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter_u64_digits()
            .enumerate()
            .flat_map(|(digit_index, digit)| {
                let mut digit = digit;
                std::iter::from_fn(move || {
                    if digit == 0 {
                        return None;
                    }
                    let offset = digit.trailing_zeros() as usize;
                    digit &= digit - 1;
                    Some(digit_index * DIGIT_BITS + offset)
                })
            })
    }
}

impl From<BigUint> for BitIndex {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl From<u64> for BitIndex {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl fmt::Debug for BitIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "BitIndex({:#b})", self.0)
    }
}

impl fmt::Display for BitIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
