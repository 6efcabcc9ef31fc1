//! Quantum gate types.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::circuit::Circuit;
use crate::unitary::Unitary2x2;

/// Built-in gates.
///
/// The set is what the phase-domain arithmetic and its inverses emit:
/// Clifford and phase gates, X rotations for the multi-controlled
/// decomposition, and SWAP for bit reversal. Angles are concrete radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Pauli-X.
    X,
    /// Pauli-Z.
    Z,
    /// Hadamard.
    H,
    /// Quarter turn about Z.
    S,
    /// Inverse quarter turn.
    Sdg,
    /// Rotation about X.
    Rx(f64),
    /// Phase on `|1>`.
    P(f64),
    /// Controlled-X.
    CX,
    /// Controlled phase.
    CP(f64),
    /// Controlled X rotation.
    CRx(f64),
    /// Exchange two wires.
    Swap,
}

impl StandardGate {
    /// Lowercase gate name.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::CP(_) => "cp",
            StandardGate::CRx(_) => "crx",
            StandardGate::Swap => "swap",
        }
    }

    /// Number of wires, controls included.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::CX | StandardGate::CP(_) | StandardGate::CRx(_) | StandardGate::Swap => 2,
            _ => 1,
        }
    }

    /// Split into `(number of controls, single-qubit target matrix)`.
    ///
    /// Returns `None` for SWAP, the only standard gate that is not a
    /// controlled single-qubit operation.
    pub fn controlled_matrix(&self) -> Option<(u32, Unitary2x2)> {
        let lowered = match *self {
            StandardGate::X => (0, Unitary2x2::x()),
            StandardGate::Z => (0, Unitary2x2::z()),
            StandardGate::H => (0, Unitary2x2::h()),
            StandardGate::S => (0, Unitary2x2::s()),
            StandardGate::Sdg => (0, Unitary2x2::s().dagger()),
            StandardGate::Rx(theta) => (0, Unitary2x2::rx(theta)),
            StandardGate::P(lambda) => (0, Unitary2x2::p(lambda)),
            StandardGate::CX => (1, Unitary2x2::x()),
            StandardGate::CP(lambda) => (1, Unitary2x2::p(lambda)),
            StandardGate::CRx(theta) => (1, Unitary2x2::rx(theta)),
            StandardGate::Swap => return None,
        };
        Some(lowered)
    }

    /// The adjoint gate.
    pub fn inverse(&self) -> StandardGate {
        match *self {
            StandardGate::S => StandardGate::Sdg,
            StandardGate::Sdg => StandardGate::S,
            StandardGate::Rx(theta) => StandardGate::Rx(-theta),
            StandardGate::P(lambda) => StandardGate::P(-lambda),
            StandardGate::CP(lambda) => StandardGate::CP(-lambda),
            StandardGate::CRx(theta) => StandardGate::CRx(-theta),
            // Hermitian gates are their own inverse.
            ref other => other.clone(),
        }
    }
}

/// A named single-qubit matrix, optionally with leading control wires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitaryGate {
    /// The name of the gate.
    pub name: String,
    /// The target matrix.
    pub matrix: Unitary2x2,
    /// Number of leading control wires.
    pub num_ctrl_qubits: u32,
}

impl UnitaryGate {
    /// Create an uncontrolled matrix gate.
    pub fn new(name: impl Into<String>, matrix: Unitary2x2) -> Self {
        Self {
            name: name.into(),
            matrix,
            num_ctrl_qubits: 0,
        }
    }

    /// Add `n` leading controls.
    #[must_use]
    pub fn controlled(mut self, n: u32) -> Self {
        self.num_ctrl_qubits += n;
        self
    }

    /// The adjoint gate.
    pub fn inverse(&self) -> Self {
        Self {
            name: inverse_name(&self.name),
            matrix: self.matrix.dagger(),
            num_ctrl_qubits: self.num_ctrl_qubits,
        }
    }
}

/// A sub-circuit applied as a single operation.
///
/// The definition is shared: appending the same `Arc<Circuit>` many times
/// stores one definition, not copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeGate {
    /// The circuit this gate expands to.
    pub definition: Arc<Circuit>,
    /// Number of leading control wires that must all be `1`.
    pub num_ctrl_qubits: u32,
}

impl CompositeGate {
    /// Wrap a shared circuit definition.
    pub fn new(definition: Arc<Circuit>) -> Self {
        Self {
            definition,
            num_ctrl_qubits: 0,
        }
    }

    /// Add `n` leading controls.
    #[must_use]
    pub fn controlled(mut self, n: u32) -> Self {
        self.num_ctrl_qubits += n;
        self
    }

    /// Number of wires the definition acts on.
    pub fn num_target_qubits(&self) -> u32 {
        self.definition.num_qubits() as u32
    }
}

/// A quantum gate: standard, matrix-defined, or composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A single-qubit matrix with optional controls.
    Unitary(UnitaryGate),
    /// A sub-circuit application.
    Composite(CompositeGate),
}

impl GateKind {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Unitary(g) => &g.name,
            GateKind::Composite(g) => g.definition.name(),
        }
    }

    /// Get the number of qubits, controls included.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Unitary(g) => g.num_ctrl_qubits + 1,
            GateKind::Composite(g) => g.num_ctrl_qubits + g.num_target_qubits(),
        }
    }
}

/// A gate with associated metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    pub kind: GateKind,
    /// Optional label for the gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    /// Create a new gate from a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: GateKind::Standard(gate),
            label: None,
        }
    }

    /// Create a new gate from a matrix gate.
    pub fn unitary(gate: UnitaryGate) -> Self {
        Self {
            kind: GateKind::Unitary(gate),
            label: None,
        }
    }

    /// Create a new gate from a sub-circuit.
    pub fn composite(gate: CompositeGate) -> Self {
        Self {
            kind: GateKind::Composite(gate),
            label: None,
        }
    }

    /// Add a label to the gate.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// Number of leading control wires.
    pub fn num_ctrl_qubits(&self) -> u32 {
        match &self.kind {
            GateKind::Standard(_) => 0,
            GateKind::Unitary(g) => g.num_ctrl_qubits,
            GateKind::Composite(g) => g.num_ctrl_qubits,
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

impl From<UnitaryGate> for Gate {
    fn from(gate: UnitaryGate) -> Self {
        Gate::unitary(gate)
    }
}

impl From<CompositeGate> for Gate {
    fn from(gate: CompositeGate) -> Self {
        Gate::composite(gate)
    }
}

/// `name` -> `name_dg`, `name_dg` -> `name`.
pub(crate) fn inverse_name(name: &str) -> String {
    match name.strip_suffix("_dg") {
        Some(base) => base.to_string(),
        None => format!("{name}_dg"),
    }
}
