//! Error types for the arith crate.

use qmark_ir::{Circuit, IrError, QubitId};
use rustc_hash::FxHashSet;
use thiserror::Error;

/// Errors produced while synthesizing arithmetic circuits and oracles.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArithError {
    /// The addend needs more bits than the register provides.
    #[error("Addend {addend} does not fit in a {width}-qubit register")]
    InvalidWidth {
        /// The offending addend.
        addend: i64,
        /// Register width in qubits.
        width: u32,
    },

    /// Modulus must lie in `2..=i64::MAX`.
    #[error("Modulus must lie in 2..=2^63-1, got {0}")]
    InvalidModulus(u64),

    /// Control wires and control pattern differ in length.
    #[error("Control pattern has {pattern} bits but {wires} control wires were given")]
    ControlPatternLengthMismatch {
        /// Number of control wires.
        wires: usize,
        /// Number of pattern bits.
        pattern: usize,
    },

    /// The gate cannot be lowered into a multi-controlled sequence.
    #[error("Unsupported gate: {0}")]
    UnsupportedGate(String),

    /// The target register cannot hold the modulus plus a guard bit.
    #[error("Register of {width} qubits is too narrow for modulus {modulus} (needs {required})")]
    RegisterTooNarrow {
        /// The modulus.
        modulus: u64,
        /// Supplied register width.
        width: u32,
        /// Minimum width for this modulus.
        required: u32,
    },

    /// The addend of a modular adder must be reduced modulo K.
    #[error("Addend {addend} is out of range for modulus {modulus}")]
    AddendOutOfRange {
        /// The offending addend.
        addend: u64,
        /// The modulus.
        modulus: u64,
    },

    /// The oracle input register needs at least one qubit.
    #[error("Input register must have at least one qubit")]
    InvalidInputWidth,

    /// A cached adder was built with a different QFT approximation.
    #[error("Adder cache uses approximation degree {cache}, oracle requested {requested}")]
    ApproximationMismatch {
        /// Degree the cache is bound to.
        cache: u32,
        /// Degree requested by the oracle configuration.
        requested: u32,
    },

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for arithmetic synthesis.
pub type ArithResult<T> = Result<T, ArithError>;

/// Check that `wires` exist in `circuit` and are pairwise distinct.
pub(crate) fn ensure_wires(circuit: &Circuit, wires: &[QubitId], gate_name: &str) -> ArithResult<()> {
    let mut seen = FxHashSet::default();
    for &qubit in wires {
        if qubit.index() >= circuit.num_qubits() {
            return Err(IrError::QubitNotFound {
                qubit,
                gate_name: Some(gate_name.to_string()),
            }
            .into());
        }
        if !seen.insert(qubit) {
            return Err(IrError::DuplicateQubit {
                qubit,
                gate_name: Some(gate_name.to_string()),
            }
            .into());
        }
    }
    Ok(())
}
