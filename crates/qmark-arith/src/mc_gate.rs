//! Linear-depth multi-controlled single-qubit gates.
//!
//! An `n`-controlled `U` on wires `0..=n` (target last) is written as four
//! passes of controlled rotations between wire pairs. Each pass is a pure
//! list of [`RotationStep`]s; only the first-half passes touch the real
//! target, and there the rotation is a controlled fractional power of `U`
//! taken from its eigendecomposition. Every other pair gets a controlled
//! `Rx(±π / 2^e)`.
//!
//! The order of steps inside a pass is part of the identity: pairs are sorted
//! by `control + target`, descending on forward passes and ascending on
//! reverse passes, with ties kept in enumeration order.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::f64::consts::PI;
use tracing::debug;

use qmark_ir::{Circuit, QubitId, Unitary2x2, UnitaryGate};

use crate::error::{ArithError, ArithResult, ensure_wires};

/// Direction of one decomposition pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassDirection {
    /// Controls enumerated from wire 0, pairs sorted by descending `control + target`.
    Forward,
    /// Controls enumerated from wire 1, pairs sorted by ascending `control + target`.
    Reverse,
}

impl PassDirection {
    fn step(self) -> f64 {
        match self {
            PassDirection::Forward => 1.0,
            PassDirection::Reverse => -1.0,
        }
    }
}

/// One of the four passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompositionPass {
    /// Whether this pass spans the real target.
    pub first_half: bool,
    /// Pair ordering and sign.
    pub direction: PassDirection,
}

/// The gate applied at one control/target pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RotationKind {
    /// Controlled `Rx(angle)`.
    Rx(f64),
    /// Controlled `U^(1/root)`, or its inverse.
    FractionalPower {
        /// Root taken of `U`.
        root: f64,
        /// Apply the adjoint.
        inverse: bool,
    },
}

/// A controlled rotation between two local wires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationStep {
    /// Local control wire.
    pub control: u32,
    /// Local target wire.
    pub target: u32,
    /// What to apply.
    pub kind: RotationKind,
}

/// Steps of one pass over local wires `0..num_qubits`.
pub fn decomposition_steps(num_qubits: u32, pass: DecompositionPass) -> Vec<RotationStep> {
    let start = match pass.direction {
        PassDirection::Forward => 0,
        PassDirection::Reverse => 1,
    };
    let mut pairs: Vec<(u32, u32)> = (0..num_qubits)
        .flat_map(|target| (start..target).map(move |control| (control, target)))
        .collect();
    match pass.direction {
        PassDirection::Forward => pairs.sort_by_key(|&(c, t)| Reverse(c + t)),
        PassDirection::Reverse => pairs.sort_by_key(|&(c, t)| c + t),
    }

    pairs
        .into_iter()
        .map(|(control, target)| {
            let mut exponent = target - control;
            if control == 0 {
                exponent -= 1;
            }
            let root = 2f64.powi(exponent as i32);
            let flip = if control == 0 && !pass.first_half { -1.0 } else { 1.0 };
            let sign = pass.direction.step() * flip;

            let kind = if pass.first_half && target == num_qubits - 1 {
                RotationKind::FractionalPower {
                    root,
                    inverse: sign < 0.0,
                }
            } else {
                RotationKind::Rx(sign * PI / root)
            };
            RotationStep {
                control,
                target,
                kind,
            }
        })
        .collect()
}

/// All steps for a gate on `num_qubits` local wires (controls then target).
pub fn mc_gate_steps(num_qubits: u32) -> Vec<RotationStep> {
    let pass = |first_half, direction| DecompositionPass {
        first_half,
        direction,
    };
    let inner = num_qubits.saturating_sub(1);

    let mut steps = decomposition_steps(num_qubits, pass(true, PassDirection::Forward));
    steps.extend(decomposition_steps(num_qubits, pass(true, PassDirection::Reverse)));
    steps.extend(decomposition_steps(inner, pass(false, PassDirection::Forward)));
    steps.extend(decomposition_steps(inner, pass(false, PassDirection::Reverse)));
    steps
}

/// Append `gate` on `target`, applied only when every wire in `controls` is `1`.
///
/// # Errors
/// [`ArithError::UnsupportedGate`] if `gate` is not unitary, or has a
/// repeated eigenvalue while at least one control is given.
pub fn append_mc_gate(
    circuit: &mut Circuit,
    gate: &Unitary2x2,
    controls: &[QubitId],
    target: QubitId,
) -> ArithResult<()> {
    if !gate.is_unitary() {
        return Err(ArithError::UnsupportedGate(format!("{gate:?} is not unitary")));
    }
    let mut wires = controls.to_vec();
    wires.push(target);
    ensure_wires(circuit, &wires, "mc_gate")?;

    if controls.is_empty() {
        circuit.unitary(UnitaryGate::new("U", *gate), [target])?;
        return Ok(());
    }
    if gate.eigen_decomposition().is_none() {
        return Err(ArithError::UnsupportedGate(
            "gate has a repeated eigenvalue".to_string(),
        ));
    }

    // Resolve every step before the first append.
    let num_qubits = wires.len() as u32;
    let mut lowered = Vec::new();
    for step in mc_gate_steps(num_qubits) {
        let op = match step.kind {
            RotationKind::Rx(angle) => LoweredStep::Crx(angle),
            RotationKind::FractionalPower { root, inverse } => {
                let matrix = gate.fractional_power(root).ok_or_else(|| {
                    ArithError::UnsupportedGate("gate has a repeated eigenvalue".to_string())
                })?;
                let root_gate = UnitaryGate::new(format!("U^1/{root}"), matrix);
                LoweredStep::Root(if inverse { root_gate.inverse() } else { root_gate })
            }
        };
        lowered.push((wires[step.control as usize], wires[step.target as usize], op));
    }

    debug!(
        num_controls = controls.len(),
        num_steps = lowered.len(),
        "lowering multi-controlled gate"
    );
    for (control, target, op) in lowered {
        match op {
            LoweredStep::Crx(angle) => circuit.crx(angle, control, target)?,
            LoweredStep::Root(g) => circuit.controlled_unitary(g, control, target)?,
        };
    }
    Ok(())
}

enum LoweredStep {
    Crx(f64),
    Root(UnitaryGate),
}

/// Standalone `num_controls`-controlled `gate` on wires `0..=num_controls`, target last.
pub fn build_multi_controlled_gate(gate: &Unitary2x2, num_controls: u32) -> ArithResult<Circuit> {
    let mut circuit = Circuit::with_size(format!("C{num_controls}-U"), num_controls + 1, 0);
    let controls: Vec<_> = (0..num_controls).map(QubitId).collect();
    append_mc_gate(&mut circuit, gate, &controls, QubitId(num_controls))?;
    Ok(circuit)
}

/// Phase flip on the all-ones state of `num_qubits` wires, named `CZ (n)`.
///
/// Wire `num_qubits - 1` is the target; with one wire this is a plain `Z`.
pub fn multi_control_z(num_qubits: u32) -> ArithResult<Circuit> {
    let num_controls = num_qubits.checked_sub(1).ok_or_else(|| {
        ArithError::UnsupportedGate("multi-controlled Z needs at least one wire".to_string())
    })?;
    Ok(build_multi_controlled_gate(&Unitary2x2::z(), num_controls)?
        .with_name(format!("CZ ({num_qubits})")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(steps: &[RotationStep]) -> Vec<(u32, u32)> {
        steps.iter().map(|s| (s.control, s.target)).collect()
    }

    #[test]
    fn test_forward_pass_order() {
        let steps = decomposition_steps(
            3,
            DecompositionPass {
                first_half: true,
                direction: PassDirection::Forward,
            },
        );
        assert_eq!(pairs(&steps), vec![(1, 2), (0, 2), (0, 1)]);
        assert_eq!(
            steps[0].kind,
            RotationKind::FractionalPower {
                root: 2.0,
                inverse: false
            }
        );
        assert_eq!(
            steps[1].kind,
            RotationKind::FractionalPower {
                root: 2.0,
                inverse: false
            }
        );
        assert_eq!(steps[2].kind, RotationKind::Rx(PI));
    }

    #[test]
    fn test_reverse_pass_skips_wire_zero() {
        let steps = decomposition_steps(
            4,
            DecompositionPass {
                first_half: true,
                direction: PassDirection::Reverse,
            },
        );
        assert_eq!(pairs(&steps), vec![(1, 2), (1, 3), (2, 3)]);
        assert_eq!(steps[0].kind, RotationKind::Rx(-PI / 2.0));
        assert_eq!(
            steps[1].kind,
            RotationKind::FractionalPower {
                root: 4.0,
                inverse: true
            }
        );
    }

    #[test]
    fn test_second_half_flips_root_control() {
        let steps = decomposition_steps(
            2,
            DecompositionPass {
                first_half: false,
                direction: PassDirection::Forward,
            },
        );
        assert_eq!(pairs(&steps), vec![(0, 1)]);
        assert_eq!(steps[0].kind, RotationKind::Rx(-PI));
    }

    #[test]
    fn test_step_counts() {
        assert_eq!(mc_gate_steps(2).len(), 1);
        assert_eq!(mc_gate_steps(3).len(), 5);
        assert_eq!(mc_gate_steps(4).len(), 13);
        assert_eq!(mc_gate_steps(5).len(), 25);
        assert_eq!(mc_gate_steps(6).len(), 41);
    }

    #[test]
    fn test_multi_control_z_shape() {
        let mcz = multi_control_z(4).unwrap();
        assert_eq!(mcz.name(), "CZ (4)");
        assert_eq!(mcz.num_qubits(), 4);
        assert_eq!(mcz.num_ops(), 13);

        let z = multi_control_z(1).unwrap();
        assert_eq!(z.num_ops(), 1);
        assert!(multi_control_z(0).is_err());
    }

    #[test]
    fn test_degenerate_gate_rejected() {
        let result = build_multi_controlled_gate(&Unitary2x2::identity(), 2);
        assert!(matches!(result, Err(ArithError::UnsupportedGate(_))));

        // Without controls no decomposition is needed.
        assert!(build_multi_controlled_gate(&Unitary2x2::identity(), 0).is_ok());
    }

    #[test]
    fn test_non_unitary_rejected() {
        let shear = Unitary2x2::from_real(1.0, 1.0, 0.0, 1.0);
        let mut circuit = Circuit::with_size("c", 2, 0);
        let result = append_mc_gate(&mut circuit, &shear, &[QubitId(0)], QubitId(1));
        assert!(matches!(result, Err(ArithError::UnsupportedGate(_))));
        assert_eq!(circuit.num_ops(), 0);
    }
}
