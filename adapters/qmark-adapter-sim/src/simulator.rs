//! Synchronous circuit runner.

use rustc_hash::FxHashMap;
use std::time::Instant;
use tracing::{debug, instrument};

use qmark_ir::Circuit;

use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// Measurement counts keyed by bitstring (wire 0 first).
pub type Counts = FxHashMap<String, u32>;

/// Local statevector simulator.
///
/// Supports circuits up to ~20 qubits by default (limited by memory).
#[derive(Debug, Clone)]
pub struct Simulator {
    /// Maximum number of qubits supported.
    max_qubits: u32,
}

impl Simulator {
    /// Create a new simulator with default settings.
    pub fn new() -> Self {
        Self { max_qubits: 20 }
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self { max_qubits }
    }

    /// Maximum circuit width this simulator accepts.
    pub fn max_qubits(&self) -> u32 {
        self.max_qubits
    }

    /// Run `circuit` from |0...0⟩ and return the final state.
    pub fn run(&self, circuit: &Circuit) -> SimResult<Statevector> {
        self.run_from(circuit, 0)
    }

    /// Run `circuit` from the computational basis state `initial`.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    pub fn run_from(&self, circuit: &Circuit, initial: usize) -> SimResult<Statevector> {
        let num_qubits = circuit.num_qubits();
        if num_qubits > self.max_qubits as usize {
            return Err(SimError::TooManyQubits {
                num_qubits,
                max_qubits: self.max_qubits,
            });
        }

        let start = Instant::now();
        let mut sv = Statevector::from_basis_state(num_qubits, initial)?;
        for inst in circuit.instructions() {
            sv.apply(inst)?;
        }

        debug!(
            num_qubits,
            num_ops = circuit.num_ops(),
            elapsed = ?start.elapsed(),
            "Simulation completed"
        );
        Ok(sv)
    }

    /// Run `circuit` once and sample `shots` measurement outcomes from the final state.
    pub fn sample_counts(&self, circuit: &Circuit, shots: u32) -> SimResult<Counts> {
        let sv = self.run(circuit)?;
        let mut rng = rand::thread_rng();
        let mut counts = Counts::default();
        for _ in 0..shots {
            let outcome = sv.sample_with(&mut rng);
            *counts.entry(sv.outcome_to_bitstring(outcome)).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}
