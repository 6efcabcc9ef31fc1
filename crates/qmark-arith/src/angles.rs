//! Draper phase-addition angles.
//!
//! After a swap-free QFT, wire `i` of a register holding `x` carries the
//! phase `2π·x / 2^(i+1)`. Adding a constant `m` is therefore the product of
//! independent phase rotations
//!
//!   θ[i] = π · (m mod 2^(i+1)) / 2^i
//!
//! one per wire. Only the bits of `m` at or below `i` contribute to wire `i`;
//! higher bits add whole turns.

use std::f64::consts::PI;

use crate::error::{ArithError, ArithResult};

/// Rotation angles that add `addend` to a `width`-qubit register in the phase basis.
///
/// A negative `addend` yields the negated vector (subtraction).
///
/// # Errors
/// [`ArithError::InvalidWidth`] if `|addend| ≥ 2^width` or `width > 63`.
pub fn phase_angles(addend: i64, width: u32) -> ArithResult<Vec<f64>> {
    let magnitude = addend.unsigned_abs();
    if width > 63 || magnitude >> width != 0 {
        return Err(ArithError::InvalidWidth { addend, width });
    }

    let sign = if addend < 0 { -1.0 } else { 1.0 };
    #[allow(clippy::cast_precision_loss)]
    let angles = (0..width)
        .map(|i| {
            let low_bits = magnitude & ((1u64 << (i + 1)) - 1);
            sign * PI * low_bits as f64 / (1u64 << i) as f64
        })
        .collect();
    Ok(angles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_angles(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_single_bit() {
        let angles = phase_angles(1, 3).unwrap();
        assert_angles(&angles, &[PI, PI / 2.0, PI / 4.0]);
    }

    #[test]
    fn test_accumulates_lower_bits() {
        // 5 = 0b101
        let angles = phase_angles(5, 3).unwrap();
        assert_angles(&angles, &[PI, PI / 2.0, 5.0 * PI / 4.0]);
    }

    #[test]
    fn test_negative_is_negated() {
        let add = phase_angles(6, 4).unwrap();
        let sub = phase_angles(-6, 4).unwrap();
        for (a, s) in add.iter().zip(&sub) {
            assert_eq!(*a, -*s);
        }
    }

    #[test]
    fn test_zero_addend() {
        assert_angles(&phase_angles(0, 4).unwrap(), &[0.0; 4]);
        assert!(phase_angles(0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_width() {
        assert!(matches!(
            phase_angles(8, 3),
            Err(ArithError::InvalidWidth { addend: 8, width: 3 })
        ));
        assert!(matches!(
            phase_angles(-8, 3),
            Err(ArithError::InvalidWidth { addend: -8, width: 3 })
        ));
        assert!(phase_angles(7, 3).is_ok());
        assert!(phase_angles(1, 64).is_err());
        assert!(phase_angles(i64::MIN, 63).is_err());
    }
}
