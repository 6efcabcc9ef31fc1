//! Quantum Fourier transform builder.
//!
//! Produces the swap-free QFT used by the phase-domain adders: for `j` from
//! the top wire down, `H(j)` followed by controlled phases `π·2^(k-j)` from
//! each lower wire `k`. The approximation degree drops the smallest
//! rotations, giving fewer gates at the cost of exactness.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

use qmark_ir::{Circuit, QubitId};

use crate::error::ArithResult;

/// Options for [`qft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QftOptions {
    /// Number of low-significance rotations to drop; `0` is exact.
    #[serde(default)]
    pub approximation_degree: u32,
    /// Reverse wire order at the end of the transform.
    #[serde(default)]
    pub do_swaps: bool,
    /// Build the inverse transform.
    #[serde(default)]
    pub inverse: bool,
}

impl QftOptions {
    /// Exact, swap-free, forward transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the approximation degree.
    #[must_use]
    pub fn with_approximation_degree(mut self, degree: u32) -> Self {
        self.approximation_degree = degree;
        self
    }

    /// Enable or disable the final bit-reversal swaps.
    #[must_use]
    pub fn with_swaps(mut self, do_swaps: bool) -> Self {
        self.do_swaps = do_swaps;
        self
    }

    /// The same options for the inverse transform.
    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.inverse = !self.inverse;
        self
    }
}

/// Build a QFT (named `QFT`) or inverse QFT (named `IQFT`) on `num_qubits` wires.
pub fn qft(num_qubits: u32, options: QftOptions) -> ArithResult<Circuit> {
    debug!(
        num_qubits,
        approximation_degree = options.approximation_degree,
        inverse = options.inverse,
        "building QFT"
    );

    let mut circuit = Circuit::with_size("QFT", num_qubits, 0);
    for j in (0..num_qubits).rev() {
        circuit.h(QubitId(j))?;
        let dropped = options
            .approximation_degree
            .saturating_sub(num_qubits - j - 1);
        let entanglements = j.saturating_sub(dropped);
        for k in ((j - entanglements)..j).rev() {
            let angle = PI / 2f64.powi((j - k) as i32);
            circuit.cp(angle, QubitId(k), QubitId(j))?;
        }
    }
    if options.do_swaps {
        for i in 0..num_qubits / 2 {
            circuit.swap(QubitId(i), QubitId(num_qubits - i - 1))?;
        }
    }

    if options.inverse {
        Ok(circuit.inverse().with_name("IQFT"))
    } else {
        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qmark_ir::{GateKind, StandardGate};

    #[test]
    fn test_exact_gate_counts() {
        let circuit = qft(4, QftOptions::new()).unwrap();
        let counts = circuit.count_ops();
        assert_eq!(counts["h"], 4);
        assert_eq!(counts["cp"], 6);
        assert_eq!(circuit.name(), "QFT");
    }

    #[test]
    fn test_first_rotation_is_quarter_turn() {
        let circuit = qft(2, QftOptions::new()).unwrap();
        let inst = &circuit.instructions()[1];
        assert_eq!(inst.gate.kind, GateKind::Standard(StandardGate::CP(PI / 2.0)));
        assert_eq!(inst.qubits, vec![QubitId(0), QubitId(1)]);
    }

    #[test]
    fn test_approximation_drops_small_rotations() {
        let exact = qft(5, QftOptions::new()).unwrap();
        let approx = qft(5, QftOptions::new().with_approximation_degree(2)).unwrap();
        assert_eq!(exact.count_ops()["cp"], 10);
        assert_eq!(approx.count_ops()["cp"], 7);
        assert_eq!(approx.count_ops()["h"], 5);
    }

    #[test]
    fn test_inverse_and_swaps() {
        let opts = QftOptions::new().with_swaps(true);
        let forward = qft(4, opts).unwrap();
        let inverse = qft(4, opts.inverted()).unwrap();
        assert_eq!(forward.count_ops()["swap"], 2);
        assert_eq!(inverse.name(), "IQFT");
        assert_eq!(inverse.instructions(), forward.inverse().instructions());
    }
}
