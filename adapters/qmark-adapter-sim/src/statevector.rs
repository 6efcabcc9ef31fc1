//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;

use qmark_ir::{GateKind, Instruction, QubitId, Unitary2x2};

use crate::error::{SimError, SimResult};

/// A statevector representing a quantum state.
///
/// Basis index bit `q` is the value of wire `q` (little-endian).
#[derive(Debug, Clone)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Create a statevector in the computational basis state `index`.
    pub fn from_basis_state(num_qubits: usize, index: usize) -> SimResult<Self> {
        if index >= 1 << num_qubits {
            return Err(SimError::InvalidBasisState { index, num_qubits });
        }
        let mut sv = Self::new(num_qubits);
        sv.amplitudes.swap(0, index);
        Ok(sv)
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The raw amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Measurement probability of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Measurement probability of one basis state.
    pub fn probability_of(&self, index: usize) -> f64 {
        self.amplitudes.get(index).map_or(0.0, Complex64::norm_sqr)
    }

    /// Marginal distribution over `qubits`; bit `k` of the result index is `qubits[k]`.
    pub fn marginal_probabilities(&self, qubits: &[QubitId]) -> Vec<f64> {
        let mut marginal = vec![0.0; 1 << qubits.len()];
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let reduced = qubits
                .iter()
                .enumerate()
                .fold(0usize, |acc, (k, q)| acc | (((i >> q.index()) & 1) << k));
            marginal[reduced] += amp.norm_sqr();
        }
        marginal
    }

    /// Apply an instruction to the statevector.
    pub fn apply(&mut self, instruction: &Instruction) -> SimResult<()> {
        let qubits = instruction
            .qubits
            .iter()
            .map(|q| self.check_qubit(q.index()))
            .collect::<SimResult<Vec<_>>>()?;
        self.apply_gate(&instruction.gate.kind, &qubits, 0)
    }

    fn check_qubit(&self, qubit: usize) -> SimResult<usize> {
        if qubit < self.num_qubits {
            Ok(qubit)
        } else {
            Err(SimError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
            })
        }
    }

    /// Apply a gate on resolved wire indices under an inherited control mask.
    fn apply_gate(&mut self, gate: &GateKind, qubits: &[usize], ctrl_mask: usize) -> SimResult<()> {
        match gate {
            GateKind::Standard(std_gate) => match std_gate.controlled_matrix() {
                Some((num_ctrl, matrix)) => {
                    self.apply_lowered(num_ctrl as usize, &matrix, qubits, ctrl_mask)
                }
                None => {
                    let [q1, q2] = qubits else {
                        return Err(self.missing_operand(qubits.len()));
                    };
                    self.apply_swap(ctrl_mask, *q1, *q2);
                    Ok(())
                }
            },
            GateKind::Unitary(g) => {
                self.apply_lowered(g.num_ctrl_qubits as usize, &g.matrix, qubits, ctrl_mask)
            }
            GateKind::Composite(g) => {
                let (controls, wires) = qubits.split_at((g.num_ctrl_qubits as usize).min(qubits.len()));
                let mask = ctrl_mask | mask_of(controls);
                for inner in g.definition.instructions() {
                    let mapped = inner
                        .qubits
                        .iter()
                        .map(|q| {
                            wires
                                .get(q.index())
                                .copied()
                                .ok_or_else(|| self.missing_operand(q.index()))
                        })
                        .collect::<SimResult<Vec<_>>>()?;
                    self.apply_gate(&inner.gate.kind, &mapped, mask)?;
                }
                Ok(())
            }
        }
    }

    fn apply_lowered(
        &mut self,
        num_ctrl: usize,
        matrix: &Unitary2x2,
        qubits: &[usize],
        ctrl_mask: usize,
    ) -> SimResult<()> {
        let (controls, rest) = qubits.split_at(num_ctrl.min(qubits.len()));
        let Some(&target) = rest.first() else {
            return Err(self.missing_operand(qubits.len()));
        };
        self.apply_controlled(ctrl_mask | mask_of(controls), target, matrix);
        Ok(())
    }

    fn missing_operand(&self, qubit: usize) -> SimError {
        SimError::QubitOutOfRange {
            qubit,
            num_qubits: self.num_qubits,
        }
    }

    // =========================================================================
    // Kernels
    // =========================================================================

    /// Apply `matrix` to `target` on every basis state where all `ctrl_mask` bits are set.
    fn apply_controlled(&mut self, ctrl_mask: usize, target: usize, matrix: &Unitary2x2) {
        let tgt_mask = 1 << target;
        let [m00, m01, m10, m11] = matrix.data;
        for i in 0..self.amplitudes.len() {
            if i & tgt_mask == 0 && i & ctrl_mask == ctrl_mask {
                let j = i | tgt_mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m00 * a + m01 * b;
                self.amplitudes[j] = m10 * a + m11 * b;
            }
        }
    }

    fn apply_swap(&mut self, ctrl_mask: usize, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..self.amplitudes.len() {
            if i & ctrl_mask == ctrl_mask && i & mask1 != 0 && i & mask2 == 0 {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Sample a measurement outcome.
    pub fn sample(&self) -> usize {
        self.sample_with(&mut rand::thread_rng())
    }

    /// Sample a measurement outcome from the given generator.
    pub fn sample_with<R: Rng>(&self, rng: &mut R) -> usize {
        let r: f64 = rng.r#gen();

        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }

        // Rounding can leave the cumulative sum just below 1.
        self.amplitudes.len() - 1
    }

    /// Convert measurement outcome to bitstring, wire 0 first.
    pub fn outcome_to_bitstring(&self, outcome: usize) -> String {
        format!("{:0width$b}", outcome, width = self.num_qubits)
            .chars()
            .rev()
            .collect()
    }
}

fn mask_of(qubits: &[usize]) -> usize {
    qubits.iter().fold(0, |mask, q| mask | (1 << q))
}
