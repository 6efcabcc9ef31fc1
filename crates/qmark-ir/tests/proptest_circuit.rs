//! Property-based tests for circuit transformations.

use proptest::prelude::*;
use qmark_ir::{Circuit, QubitId};
use std::collections::BTreeMap;

/// Gate operations that can be applied to a circuit.
#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    S(u32),
    P(f64, u32),
    Rx(f64, u32),
    CX(u32, u32),
    CP(f64, u32, u32),
}

impl GateOp {
    fn apply(self, circuit: &mut Circuit) {
        // Operand collisions are rejected by the builder; skip them.
        let _ = match self {
            GateOp::H(q) => circuit.h(QubitId(q)).map(|_| ()),
            GateOp::S(q) => circuit.s(QubitId(q)).map(|_| ()),
            GateOp::P(theta, q) => circuit.p(theta, QubitId(q)).map(|_| ()),
            GateOp::Rx(theta, q) => circuit.rx(theta, QubitId(q)).map(|_| ()),
            GateOp::CX(c, t) => circuit.cx(QubitId(c), QubitId(t)).map(|_| ()),
            GateOp::CP(theta, c, t) => circuit.cp(theta, QubitId(c), QubitId(t)).map(|_| ()),
        };
    }
}

fn arb_gate_op(num_qubits: u32) -> impl Strategy<Value = GateOp> {
    let angle = -3.0_f64..3.0;
    prop_oneof![
        (0..num_qubits).prop_map(GateOp::H),
        (0..num_qubits).prop_map(GateOp::S),
        (angle.clone(), 0..num_qubits).prop_map(|(a, q)| GateOp::P(a, q)),
        (angle.clone(), 0..num_qubits).prop_map(|(a, q)| GateOp::Rx(a, q)),
        (0..num_qubits, 0..num_qubits).prop_map(|(c, t)| GateOp::CX(c, t)),
        (angle, 0..num_qubits, 0..num_qubits).prop_map(|(a, c, t)| GateOp::CP(a, c, t)),
    ]
}

fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (1_u32..=5).prop_flat_map(|num_qubits| {
        prop::collection::vec(arb_gate_op(num_qubits), 0..=20).prop_map(move |ops| {
            let mut circuit = Circuit::with_size("random", num_qubits, 0);
            for op in ops {
                op.apply(&mut circuit);
            }
            circuit
        })
    })
}

proptest! {
    #[test]
    fn inverse_is_an_involution(circuit in arb_circuit()) {
        prop_assert_eq!(circuit.inverse().inverse(), circuit);
    }

    #[test]
    fn inverse_preserves_shape(circuit in arb_circuit()) {
        let inv = circuit.inverse();
        prop_assert_eq!(inv.num_qubits(), circuit.num_qubits());
        prop_assert_eq!(inv.num_ops(), circuit.num_ops());
        prop_assert_eq!(inv.depth(), circuit.depth());
    }

    #[test]
    fn inverse_counts_follow_gate_inverses(circuit in arb_circuit()) {
        let mut expected = BTreeMap::new();
        for inst in circuit.instructions() {
            *expected.entry(inst.inverse().name().to_string()).or_insert(0) += 1;
        }
        prop_assert_eq!(circuit.inverse().count_ops(), expected);
    }

    #[test]
    fn depth_never_exceeds_op_count(circuit in arb_circuit()) {
        prop_assert!(circuit.depth() <= circuit.num_ops());
    }

    #[test]
    fn json_roundtrip_preserves_circuit(circuit in arb_circuit()) {
        let json = circuit.to_json().unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, circuit);
    }

    #[test]
    fn decompose_of_wrapped_circuit_matches_inner(circuit in arb_circuit()) {
        let n = circuit.num_qubits();
        let shared = circuit.clone().into_shared();
        let mut outer = Circuit::with_size("random", n as u32, 0);
        outer.append(&shared, (0..n as u32).map(QubitId)).unwrap();
        let flat = outer.decompose();
        prop_assert_eq!(flat.instructions(), circuit.instructions());
    }
}
