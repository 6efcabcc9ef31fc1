//! Property-based tests for the classical helpers.

use proptest::prelude::*;
use qmark_arith::angles::phase_angles;
use qmark_arith::mod_adder::required_register_width;
use qmark_arith::remainders::{additive_inverse, doubling_remainders};

fn pow_mod(exponent: usize, modulus: u64) -> u64 {
    (0..exponent).fold(1 % modulus, |acc, _| acc * 2 % modulus)
}

proptest! {
    #[test]
    fn remainders_match_modular_powers(modulus in 2u64..=64, max_exponent in 0usize..=200) {
        let remainders = doubling_remainders(modulus, max_exponent).unwrap();
        prop_assert_eq!(remainders.len(), max_exponent + 1);
        for (i, &r) in remainders.iter().enumerate() {
            prop_assert_eq!(r, pow_mod(i, modulus), "2^{} mod {}", i, modulus);
        }
    }

    #[test]
    fn remainders_survive_large_moduli(modulus in (u64::MAX / 2)..=u64::MAX, max_exponent in 0usize..=80) {
        let remainders = doubling_remainders(modulus, max_exponent).unwrap();
        for (i, &r) in remainders.iter().enumerate() {
            prop_assert!(r < modulus);
            if i > 0 {
                let doubled = (u128::from(remainders[i - 1]) * 2 % u128::from(modulus)) as u64;
                prop_assert_eq!(r, doubled);
            }
        }
    }

    #[test]
    fn inverse_sums_to_zero(modulus in 2u64..=1000, r in 0u64..1000) {
        let r = r % modulus;
        let inv = additive_inverse(r, modulus);
        prop_assert!(inv < modulus);
        prop_assert_eq!((r + inv) % modulus, 0);
    }

    #[test]
    fn subtraction_angles_are_negated(width in 1u32..=16, addend in 0i64..65536) {
        let addend = addend % (1 << width);
        let add = phase_angles(addend, width).unwrap();
        let sub = phase_angles(-addend, width).unwrap();
        for (a, s) in add.iter().zip(&sub) {
            prop_assert!((a + s).abs() < 1e-12);
        }
    }

    #[test]
    fn complement_angles_differ_by_whole_turns(width in 1u32..=16, addend in 1i64..65536) {
        let addend = (addend - 1) % ((1 << width) - 1).max(1) + 1;
        prop_assume!(addend < 1 << width);
        let add = phase_angles(addend, width).unwrap();
        let complement = phase_angles((1 << width) - addend, width).unwrap();
        for (a, c) in add.iter().zip(&complement) {
            let turns = (a + c) / (2.0 * std::f64::consts::PI);
            prop_assert!((turns - turns.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn register_width_holds_every_remainder(modulus in 2u64..=100_000) {
        let width = required_register_width(modulus);
        prop_assert!(modulus - 1 < 1 << (width - 1));
        prop_assert!(modulus - 1 >= 1 << (width - 2) || width == 2);
    }
}
