//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::gate::{Gate, GateKind, StandardGate};
use crate::qubit::QubitId;

/// A gate applied to an ordered list of qubits.
///
/// Operand order is controls first, then targets. For a composite gate the
/// targets are the outer wires that the definition's wires `0..n` map to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate.
    pub gate: Gate,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            gate: gate.into(),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Control wires of this instruction.
    pub fn controls(&self) -> &[QubitId] {
        let n = self.control_count();
        &self.qubits[..n]
    }

    /// Target wires of this instruction.
    pub fn targets(&self) -> &[QubitId] {
        let n = self.control_count();
        &self.qubits[n..]
    }

    fn control_count(&self) -> usize {
        let n = match &self.gate.kind {
            GateKind::Standard(g) => g.controlled_matrix().map_or(0, |(c, _)| c),
            _ => self.gate.num_ctrl_qubits(),
        };
        (n as usize).min(self.qubits.len())
    }

    /// Check if this instruction applies a sub-circuit.
    pub fn is_composite(&self) -> bool {
        matches!(self.gate.kind, GateKind::Composite(_))
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        self.gate.name()
    }

    /// The adjoint instruction on the same operands.
    pub fn inverse(&self) -> Self {
        let kind = match &self.gate.kind {
            GateKind::Standard(g) => GateKind::Standard(g.inverse()),
            GateKind::Unitary(g) => GateKind::Unitary(g.inverse()),
            GateKind::Composite(g) => {
                let mut inverted = g.clone();
                inverted.definition = g.definition.inverse().into_shared();
                GateKind::Composite(inverted)
            }
        };
        Self {
            gate: Gate {
                kind,
                label: self.gate.label.clone(),
            },
            qubits: self.qubits.clone(),
        }
    }
}
