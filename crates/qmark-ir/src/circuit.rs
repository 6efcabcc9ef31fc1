//! High-level circuit builder API.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{IrError, IrResult};
use crate::gate::{CompositeGate, Gate, GateKind, StandardGate, UnitaryGate, inverse_name};
use crate::instruction::Instruction;
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};
use crate::register::QubitRegister;

/// A quantum circuit.
///
/// Instructions are kept in append order, which is also execution order;
/// nothing reorders them. A circuit that has been shared with
/// [`Circuit::into_shared`] is treated as frozen and can only be composed
/// into other circuits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in the circuit.
    qubits: Vec<Qubit>,
    /// Classical bits in the circuit.
    clbits: Vec<Clbit>,
    /// Instructions in append order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            instructions: vec![],
        }
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        if num_clbits > 0 {
            circuit.add_creg("c", num_clbits);
        }
        circuit
    }

    /// Rename the circuit.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Position the next allocated qubit will take.
    #[allow(clippy::cast_possible_truncation)]
    fn next_qubit(&self) -> QubitId {
        QubitId(self.qubits.len() as u32)
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = self.next_qubit();
        self.qubits.push(Qubit::anonymous(id));
        id
    }

    /// Add a quantum register of `size` consecutive qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> QubitRegister {
        let name = name.into();
        let start = self.next_qubit();
        self.qubits
            .extend((0..size).map(|i| Qubit::in_register(start.offset(i), &name, i)));
        QubitRegister::contiguous(name, start.0, size)
    }

    /// Add a classical register of `size` consecutive bits.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let name = name.into();
        let start = ClbitId(self.clbits.len() as u32);
        let ids: Vec<_> = (0..size).map(|i| start.offset(i)).collect();
        self.clbits
            .extend(ids.iter().zip(0..).map(|(&id, i)| Clbit::in_register(id, &name, i)));
        ids
    }

    /// Validate and append an instruction.
    ///
    /// Nothing is appended when validation fails.
    #[allow(clippy::cast_possible_truncation)]
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<()> {
        let gate_name = instruction.name().to_string();

        let expected = instruction.gate.num_qubits();
        let got = instruction.qubits.len() as u32;
        if expected != got {
            return Err(IrError::QubitCountMismatch {
                gate_name,
                expected,
                got,
            });
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if qubit.index() >= self.qubits.len() {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: Some(gate_name),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(gate_name),
                });
            }
        }

        self.instructions.push(instruction);
        Ok(())
    }

    fn standard(&mut self, gate: StandardGate, qubits: &[QubitId]) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits.iter().copied()))?;
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::H, &[qubit])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::X, &[qubit])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::Z, &[qubit])
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::S, &[qubit])
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::Rx(theta), &[qubit])
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::P(theta), &[qubit])
    }

    /// Apply Hadamard to every qubit in `qubits`.
    pub fn h_all(&mut self, qubits: &[QubitId]) -> IrResult<&mut Self> {
        for &q in qubits {
            self.h(q)?;
        }
        Ok(self)
    }

    /// Apply Pauli-X to every qubit in `qubits`.
    pub fn x_all(&mut self, qubits: &[QubitId]) -> IrResult<&mut Self> {
        for &q in qubits {
            self.x(q)?;
        }
        Ok(self)
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::CX, &[control, target])
    }

    /// Apply controlled-phase gate.
    pub fn cp(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::CP(theta), &[control, target])
    }

    /// Apply controlled-Rx gate.
    pub fn crx(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::CRx(theta), &[control, target])
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.standard(StandardGate::Swap, &[q1, q2])
    }

    // =========================================================================
    // Matrix gates and composition
    // =========================================================================

    /// Apply a matrix gate; controls first, then the target.
    pub fn unitary(
        &mut self,
        gate: UnitaryGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))?;
        Ok(self)
    }

    /// Apply a singly-controlled matrix gate.
    pub fn controlled_unitary(
        &mut self,
        gate: UnitaryGate,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.unitary(gate.controlled(1), [control, target])
    }

    /// Apply a shared sub-circuit; `wires[i]` receives the definition's wire `i`.
    pub fn append(
        &mut self,
        definition: &Arc<Circuit>,
        wires: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        let gate = CompositeGate::new(Arc::clone(definition));
        self.apply(Instruction::gate(gate, wires))?;
        Ok(self)
    }

    /// Apply a shared sub-circuit only when every wire in `controls` is `1`.
    pub fn append_controlled(
        &mut self,
        definition: &Arc<Circuit>,
        controls: &[QubitId],
        wires: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        let gate = CompositeGate::new(Arc::clone(definition)).controlled(controls.len() as u32);
        let operands = controls.iter().copied().chain(wires);
        self.apply(Instruction::gate(gate, operands))?;
        Ok(self)
    }

    /// Apply an arbitrary gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))?;
        Ok(self)
    }

    // =========================================================================
    // Transformations
    // =========================================================================

    /// The adjoint circuit: instructions reversed, each one inverted.
    pub fn inverse(&self) -> Circuit {
        Circuit {
            name: inverse_name(&self.name),
            qubits: self.qubits.clone(),
            clbits: self.clbits.clone(),
            instructions: self
                .instructions
                .iter()
                .rev()
                .map(Instruction::inverse)
                .collect(),
        }
    }

    /// Inline uncontrolled sub-circuits one level deep.
    ///
    /// Controlled composites are kept as single instructions.
    pub fn decompose(&self) -> Circuit {
        let mut instructions = Vec::with_capacity(self.instructions.len());
        for inst in &self.instructions {
            match &inst.gate.kind {
                GateKind::Composite(g) if g.num_ctrl_qubits == 0 => {
                    for inner in g.definition.instructions() {
                        let mut mapped = inner.clone();
                        mapped.qubits = inner.qubits.iter().map(|q| inst.qubits[q.index()]).collect();
                        instructions.push(mapped);
                    }
                }
                _ => instructions.push(inst.clone()),
            }
        }
        Circuit {
            name: self.name.clone(),
            qubits: self.qubits.clone(),
            clbits: self.clbits.clone(),
            instructions,
        }
    }

    /// Freeze the circuit for composition into other circuits.
    pub fn into_shared(self) -> Arc<Circuit> {
        Arc::new(self)
    }

    /// Serialize the circuit to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the number of top-level instructions.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Instructions in append order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Get the circuit depth.
    ///
    /// Each top-level instruction counts as one layer on all of its wires.
    pub fn depth(&self) -> usize {
        let mut levels = vec![0usize; self.qubits.len()];
        let mut depth = 0;
        for inst in &self.instructions {
            let level = inst
                .qubits
                .iter()
                .map(|q| levels[q.index()])
                .max()
                .unwrap_or(0)
                + 1;
            for q in &inst.qubits {
                levels[q.index()] = level;
            }
            depth = depth.max(level);
        }
        depth
    }

    /// Count top-level instructions by name.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for inst in &self.instructions {
            *counts.entry(inst.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits in the circuit.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }
}
