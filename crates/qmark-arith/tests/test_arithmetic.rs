//! Simulated behaviour of the phase adders and modular adders.

use proptest::prelude::*;
use qmark_adapter_sim::Simulator;
use qmark_arith::mod_adder::{ModAdderSpec, build_controlled_modulo_adder, required_register_width};
use qmark_arith::phase_adder::{append_controlled_phase_add, append_phase_add};
use qmark_arith::qft::{QftOptions, qft};
use qmark_ir::{Circuit, QubitId};

const TOL: f64 = 1e-9;

/// `QFT · (+addend) · IQFT` on a fresh `width`-wire register.
fn phase_addition_circuit(width: u32, addend: i64) -> Circuit {
    let forward = qft(width, QftOptions::new()).unwrap().into_shared();
    let inverse = qft(width, QftOptions::new().inverted()).unwrap().into_shared();
    let mut circuit = Circuit::new("add");
    let reg = circuit.add_qreg("reg", width);
    circuit.append(&forward, reg.iter()).unwrap();
    append_phase_add(&mut circuit, reg.qubits(), addend).unwrap();
    circuit.append(&inverse, reg.iter()).unwrap();
    circuit
}

// ---------------------------------------------------------------------------
// Phase adder
// ---------------------------------------------------------------------------

#[test]
fn phase_add_is_addition_mod_two_to_the_width() {
    let sim = Simulator::new();
    for addend in [-5_i64, -1, 0, 1, 3, 6] {
        let circuit = phase_addition_circuit(3, addend);
        for x in 0..8_usize {
            let state = sim.run_from(&circuit, x).unwrap();
            let expected = (x as i64 + addend).rem_euclid(8) as usize;
            assert!(
                (state.probability_of(expected) - 1.0).abs() < TOL,
                "{x} + {addend} should give {expected}"
            );
        }
    }
}

#[test]
fn phase_add_then_subtract_is_identity() {
    let mut circuit = Circuit::with_size("pm", 4, 0);
    let reg: Vec<_> = (0..4).map(QubitId).collect();
    append_phase_add(&mut circuit, &reg, 11).unwrap();
    append_phase_add(&mut circuit, &reg, -11).unwrap();

    let mut prep = Circuit::with_size("prep", 4, 0);
    prep.h_all(&reg).unwrap();
    let sim = Simulator::new();
    let before = sim.run(&prep).unwrap();
    for inst in circuit.instructions() {
        prep.apply(inst.clone()).unwrap();
    }
    let after = sim.run(&prep).unwrap();
    for (a, b) in before.amplitudes().iter().zip(after.amplitudes()) {
        assert!((a - b).norm() < TOL);
    }
}

#[test]
fn controlled_phase_add_respects_control() {
    let forward = qft(3, QftOptions::new()).unwrap().into_shared();
    let inverse = qft(3, QftOptions::new().inverted()).unwrap().into_shared();
    let mut circuit = Circuit::new("cadd");
    let control = circuit.add_qubit();
    let reg = circuit.add_qreg("reg", 3);
    circuit.append(&forward, reg.iter()).unwrap();
    append_controlled_phase_add(&mut circuit, control, reg.qubits(), 3).unwrap();
    circuit.append(&inverse, reg.iter()).unwrap();

    let sim = Simulator::new();
    for x in 0..8_usize {
        let off = sim.run_from(&circuit, x << 1).unwrap();
        assert!((off.probability_of(x << 1) - 1.0).abs() < TOL);

        let on = sim.run_from(&circuit, (x << 1) | 1).unwrap();
        let expected = (((x + 3) % 8) << 1) | 1;
        assert!((on.probability_of(expected) - 1.0).abs() < TOL);
    }
}

// ---------------------------------------------------------------------------
// Modular adder
// ---------------------------------------------------------------------------

/// Basis index of `[control, register, ancilla]` for a modular adder.
fn adder_index(control: bool, x: u64, ancilla: bool, width: u32) -> usize {
    usize::from(control) | ((x as usize) << 1) | (usize::from(ancilla) << (width + 1))
}

fn check_modular_addition(addend: u64, modulus: u64) {
    let spec = ModAdderSpec::new(addend, modulus).with_qfts(true);
    let adder = build_controlled_modulo_adder(&spec).unwrap();
    let width = required_register_width(modulus);
    let sim = Simulator::new();

    for x in 0..modulus {
        for control in [false, true] {
            let state = sim
                .run_from(&adder, adder_index(control, x, false, width))
                .unwrap();
            let sum = if control { (x + addend) % modulus } else { x };
            let expected = adder_index(control, sum, false, width);
            assert!(
                (state.probability_of(expected) - 1.0).abs() < TOL,
                "ctrl={control}: {x} + {addend} mod {modulus} should give {sum}"
            );
        }
    }
}

#[test]
fn modular_adder_truth_tables() {
    for modulus in 2..=9 {
        for addend in 0..modulus {
            check_modular_addition(addend, modulus);
        }
    }
}

#[test]
fn modular_adder_on_wider_register() {
    let spec = ModAdderSpec::new(4, 5).with_width(5).with_qfts(true);
    let adder = build_controlled_modulo_adder(&spec).unwrap();
    let sim = Simulator::new();
    for x in 0..5 {
        let state = sim.run_from(&adder, adder_index(true, x, false, 5)).unwrap();
        let expected = adder_index(true, (x + 4) % 5, false, 5);
        assert!((state.probability_of(expected) - 1.0).abs() < TOL);
    }
}

#[test]
fn modular_adder_inverse_undoes_addition() {
    let adder = build_controlled_modulo_adder(&ModAdderSpec::new(3, 7).with_qfts(true)).unwrap();
    let mut round_trip = adder.clone();
    for inst in adder.inverse().instructions() {
        round_trip.apply(inst.clone()).unwrap();
    }
    let width = required_register_width(7);
    let sim = Simulator::new();
    for x in 0..7 {
        let index = adder_index(true, x, false, width);
        let state = sim.run_from(&round_trip, index).unwrap();
        assert!((state.probability_of(index) - 1.0).abs() < TOL);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn modular_adder_matches_arithmetic(
        (modulus, addend, x) in (2u64..=12).prop_flat_map(|k| (Just(k), 0..k, 0..k))
    ) {
        let spec = ModAdderSpec::new(addend, modulus).with_qfts(true);
        let adder = build_controlled_modulo_adder(&spec).unwrap();
        let width = required_register_width(modulus);
        let state = Simulator::new()
            .run_from(&adder, adder_index(true, x, false, width))
            .unwrap();
        let expected = adder_index(true, (x + addend) % modulus, false, width);
        prop_assert!((state.probability_of(expected) - 1.0).abs() < TOL);
    }
}
