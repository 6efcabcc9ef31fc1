//! Remainders of successive powers of two.

use tracing::debug;

use crate::error::{ArithError, ArithResult};

/// `[2^0 mod K, 2^1 mod K, ..., 2^max_exponent mod K]`.
///
/// Each element is the previous one doubled and reduced with a single
/// conditional subtraction. When a fresh remainder returns to `1` the
/// multiplicative period of 2 has been found and the rest of the sequence is
/// tiled from it. For even `K` the sequence never returns to `1` and the
/// doubling simply continues.
pub fn doubling_remainders(modulus: u64, max_exponent: usize) -> ArithResult<Vec<u64>> {
    if modulus < 2 {
        return Err(ArithError::InvalidModulus(modulus));
    }

    let len = max_exponent + 1;
    let mut remainders = Vec::with_capacity(len);
    remainders.push(1);
    if len > 1 {
        remainders.push(2 % modulus);
    }

    while remainders.len() < len {
        let last = remainders[remainders.len() - 1];
        let next = if last >= modulus - last {
            last - (modulus - last)
        } else {
            last * 2
        };

        if next == 1 {
            let period = remainders.len();
            debug!(modulus, period, "doubling remainders cycle found");
            while remainders.len() < len {
                remainders.push(remainders[remainders.len() - period]);
            }
            break;
        }
        remainders.push(next);
    }

    Ok(remainders)
}

/// The additive inverse of `remainder` modulo `modulus`, in `0..modulus`.
pub fn additive_inverse(remainder: u64, modulus: u64) -> u64 {
    (modulus - remainder % modulus) % modulus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odd_modulus_cycles() {
        assert_eq!(doubling_remainders(3, 5).unwrap(), vec![1, 2, 1, 2, 1, 2]);
        assert_eq!(doubling_remainders(7, 6).unwrap(), vec![1, 2, 4, 1, 2, 4, 1]);
        assert_eq!(doubling_remainders(5, 4).unwrap(), vec![1, 2, 4, 3, 1]);
    }

    #[test]
    fn test_even_modulus_tail() {
        assert_eq!(doubling_remainders(2, 3).unwrap(), vec![1, 0, 0, 0]);
        assert_eq!(doubling_remainders(8, 4).unwrap(), vec![1, 2, 4, 0, 0]);
        assert_eq!(doubling_remainders(12, 5).unwrap(), vec![1, 2, 4, 8, 4, 8]);
    }

    #[test]
    fn test_exact_length() {
        assert_eq!(doubling_remainders(9, 0).unwrap(), vec![1]);
        assert_eq!(doubling_remainders(9, 1).unwrap(), vec![1, 2]);
        assert_eq!(doubling_remainders(3, 200).unwrap().len(), 201);
    }

    #[test]
    fn test_large_modulus_does_not_overflow() {
        let k = u64::MAX - 1;
        let remainders = doubling_remainders(k, 70).unwrap();
        assert_eq!(remainders[63], 1u64 << 63);
        assert!(remainders.iter().all(|&r| r < k));
    }

    #[test]
    fn test_invalid_modulus() {
        assert!(matches!(
            doubling_remainders(1, 3),
            Err(ArithError::InvalidModulus(1))
        ));
        assert!(matches!(
            doubling_remainders(0, 3),
            Err(ArithError::InvalidModulus(0))
        ));
    }

    #[test]
    fn test_additive_inverse() {
        assert_eq!(additive_inverse(3, 7), 4);
        assert_eq!(additive_inverse(0, 6), 0);
        assert_eq!(additive_inverse(3, 6), 3);
    }
}
