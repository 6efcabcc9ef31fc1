//! qmark Circuit Intermediate Representation
//!
//! This crate provides the circuit data structures that the qmark synthesis
//! layer builds and the simulator adapter executes.
//!
//! # Overview
//!
//! A [`Circuit`] is an ordered list of [`Instruction`]s over positional
//! qubits. Sub-circuits are frozen into an `Arc<Circuit>` with
//! [`Circuit::into_shared`] and applied, optionally under control wires,
//! as a single [`CompositeGate`]. Reusing one shared definition many times
//! stores it once.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`], [`ClbitId`] and named [`QubitRegister`] views
//! - **Gates**: [`StandardGate`] for built-in gates, [`UnitaryGate`] for
//!   controlled single-qubit matrices, [`CompositeGate`] for sub-circuits
//! - **Matrices**: [`Unitary2x2`] with eigendecomposition and fractional powers
//! - **Circuit**: [`Circuit`] high-level builder API
//!
//! # Example: Composing a Sub-circuit
//!
//! ```rust
//! use qmark_ir::{Circuit, QubitId};
//! use std::f64::consts::PI;
//!
//! let mut adder = Circuit::with_size("+1", 2, 0);
//! adder.p(PI / 2.0, QubitId(0)).unwrap().p(PI, QubitId(1)).unwrap();
//! let adder = adder.into_shared();
//!
//! let mut circuit = Circuit::new("main");
//! let ctrl = circuit.add_qubit();
//! let reg = circuit.add_qreg("reg", 2);
//! circuit.append_controlled(&adder, &[ctrl], reg.iter()).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 3);
//! assert_eq!(circuit.num_ops(), 1);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg`, `T`, `Tdg` | 1 | Phase quarter and eighth turns |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | Rotation and phase gates |
//! | `CX`, `CZ` | 2 | Controlled-NOT and Controlled-Z |
//! | `CP`, `CRx`, `CRz` | 2 | Controlled phase and rotations |
//! | `Swap` | 2 | SWAP gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod register;
pub mod unitary;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{CompositeGate, Gate, GateKind, StandardGate, UnitaryGate};
pub use instruction::Instruction;
pub use qubit::{Clbit, ClbitId, Qubit, QubitId, RegisterSlot, Wire};
pub use register::QubitRegister;
pub use unitary::{EigenPair, Unitary2x2};
