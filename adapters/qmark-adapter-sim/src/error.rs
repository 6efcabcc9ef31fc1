//! Error types for the simulator crate.

use thiserror::Error;

/// Errors produced while simulating a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// The circuit is wider than the simulator accepts.
    #[error("Circuit has {num_qubits} qubits but simulator only supports {max_qubits}")]
    TooManyQubits {
        /// Width of the circuit.
        num_qubits: usize,
        /// Configured simulator limit.
        max_qubits: u32,
    },

    /// An instruction references a wire outside the statevector.
    #[error("Instruction references qubit {qubit} but statevector only has {num_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: usize,
        /// Number of qubits in the statevector.
        num_qubits: usize,
    },

    /// The requested initial basis state does not exist.
    #[error("Basis state {index} is out of range for {num_qubits} qubits")]
    InvalidBasisState {
        /// Requested basis index.
        index: usize,
        /// Number of qubits in the statevector.
        num_qubits: usize,
    },
}

/// Result type for simulation.
pub type SimResult<T> = Result<T, SimError>;
