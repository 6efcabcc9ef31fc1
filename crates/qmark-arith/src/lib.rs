//! `qmark-arith`: phase-domain modular arithmetic and oracle synthesis.
//!
//! Builds `qmark_ir::Circuit`s for:
//!
//! - **QFT** without swaps, optionally approximated
//! - **Phase adders** adding a classical constant in the Fourier basis
//! - **Controlled modular adders** computing `(x + m) mod K` with one ancilla
//! - **Multi-controlled gates** in linear depth from controlled rotations
//! - **The multiples oracle** marking every input `x` with `x mod K == 0`
//!
//! The resulting circuits can be executed by `qmark-adapter-sim` or
//! serialized for any other backend.
//!
//! # Quick start
//!
//! ```rust
//! use qmark_arith::oracle::{OracleConfig, build_multiples_oracle};
//!
//! // Mark the multiples of 3 among 3-bit inputs.
//! let config = OracleConfig::new(3, 3).with_init_superposition(true);
//! let circuit = build_multiples_oracle(&config).unwrap();
//!
//! // 3 input + 3 remainder + 1 ancilla wires.
//! assert_eq!(circuit.num_qubits(), 7);
//! assert_eq!(circuit.num_clbits(), 3);
//! ```

pub mod angles;
pub mod cache;
pub mod error;
pub mod mc_gate;
pub mod mod_adder;
pub mod oracle;
pub mod phase_adder;
pub mod qft;
pub mod remainders;

pub use angles::phase_angles;
pub use cache::ModAdderCache;
pub use error::{ArithError, ArithResult};
pub use mc_gate::{
    DecompositionPass, PassDirection, RotationKind, RotationStep, append_mc_gate,
    build_multi_controlled_gate, decomposition_steps, mc_gate_steps, multi_control_z,
};
pub use mod_adder::{ModAdderSpec, build_controlled_modulo_adder, required_register_width};
pub use oracle::{MultiplesOracle, OracleConfig, OracleLayout, build_multiples_oracle};
pub use phase_adder::{append_controlled_phase_add, append_phase_add, build_phase_adder};
pub use qft::{QftOptions, qft};
pub use remainders::{additive_inverse, doubling_remainders};
