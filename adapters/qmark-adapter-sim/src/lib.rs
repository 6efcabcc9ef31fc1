//! qmark Local Statevector Simulator
//!
//! Exact statevector simulation of `qmark-ir` circuits, used to verify
//! synthesized arithmetic and oracle circuits in tests. Limited to ~20
//! qubits by default.
//!
//! # Features
//!
//! - **Exact Simulation**: Full statevector representation (no sampling noise)
//! - **Uniform Lowering**: Every gate becomes a multi-controlled 2x2 matrix;
//!   sub-circuits are applied recursively through their wire mapping
//! - **Measurement Sampling**: Probabilistic measurement with configurable shots
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//!
//! # Example
//!
//! ```rust
//! use qmark_adapter_sim::Simulator;
//! use qmark_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2, 0);
//! circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let state = Simulator::new().run(&circuit).unwrap();
//! assert!((state.probability_of(0b11) - 0.5).abs() < 1e-12);
//! ```

mod error;
mod simulator;
mod statevector;

pub use error::{SimError, SimResult};
pub use simulator::{Counts, Simulator};
pub use statevector::Statevector;
