//! Controlled addition modulo K in the phase basis.
//!
//! Wires are `[control, register[0..width), ancilla]`. With the register in
//! the phase basis and holding `x < K`, the adder replaces `x` by
//! `(x + m) mod K` when the control is set and returns the ancilla to `0`:
//!
//! 1. add `m` (controlled), subtract `K`, leave the phase basis and copy the
//!    guard bit (set iff `x + m < K`) into the ancilla;
//! 2. re-enter, add `K` back under the ancilla, subtract `m` (controlled),
//!    leave, and clear the ancilla from the negated guard bit;
//! 3. re-enter and add `m` (controlled).
//!
//! The register must have one guard bit above what `K - 1` needs.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use qmark_ir::{Circuit, QubitId};

use crate::angles::phase_angles;
use crate::error::{ArithError, ArithResult};
use crate::phase_adder::emit_rotations;
use crate::qft::{QftOptions, qft};

/// Smallest register that holds `modulus - 1` plus a guard bit.
pub fn required_register_width(modulus: u64) -> u32 {
    let bits = u64::BITS - modulus.saturating_sub(1).leading_zeros();
    bits + 1
}

/// Parameters for [`build_controlled_modulo_adder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModAdderSpec {
    /// Constant to add, `0 ≤ addend < modulus`.
    pub addend: u64,
    /// The modulus K.
    pub modulus: u64,
    /// Target register width, guard bit included.
    pub width: u32,
    /// QFT approximation degree used inside the adder.
    #[serde(default)]
    pub approximation_degree: u32,
    /// Wrap the adder in an outer QFT / inverse QFT pair.
    #[serde(default)]
    pub include_qfts: bool,
}

impl ModAdderSpec {
    /// An exact adder on the narrowest valid register, without outer QFTs.
    pub fn new(addend: u64, modulus: u64) -> Self {
        Self {
            addend,
            modulus,
            width: required_register_width(modulus),
            approximation_degree: 0,
            include_qfts: false,
        }
    }

    /// Use a wider target register.
    #[must_use]
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the QFT approximation degree.
    #[must_use]
    pub fn with_approximation_degree(mut self, degree: u32) -> Self {
        self.approximation_degree = degree;
        self
    }

    /// Include the outer QFT and inverse QFT.
    #[must_use]
    pub fn with_qfts(mut self, include_qfts: bool) -> Self {
        self.include_qfts = include_qfts;
        self
    }

    /// Check the preconditions and return `(addend, modulus)` as signed values.
    fn validate(&self) -> ArithResult<(i64, i64)> {
        let modulus = i64::try_from(self.modulus)
            .ok()
            .filter(|&k| k >= 2)
            .ok_or(ArithError::InvalidModulus(self.modulus))?;
        let required = required_register_width(self.modulus);
        if self.width < required {
            return Err(ArithError::RegisterTooNarrow {
                modulus: self.modulus,
                width: self.width,
                required,
            });
        }
        let addend = i64::try_from(self.addend)
            .ok()
            .filter(|&m| m < modulus)
            .ok_or(ArithError::AddendOutOfRange {
                addend: self.addend,
                modulus: self.modulus,
            })?;
        Ok((addend, modulus))
    }
}

/// Build the controlled `+m mod K` circuit described by `spec`.
pub fn build_controlled_modulo_adder(spec: &ModAdderSpec) -> ArithResult<Circuit> {
    let (addend, modulus) = spec.validate()?;
    let width = spec.width;
    debug!(
        addend = spec.addend,
        modulus = spec.modulus,
        width,
        approximation_degree = spec.approximation_degree,
        "building controlled modular adder"
    );

    let add_m = phase_angles(addend, width)?;
    let sub_m = phase_angles(-addend, width)?;
    let add_k = phase_angles(modulus, width)?;
    let sub_k = phase_angles(-modulus, width)?;

    let options = QftOptions::new().with_approximation_degree(spec.approximation_degree);
    let forward = qft(width, options)?.into_shared();
    let inverse = qft(width, options.inverted())?.into_shared();

    let name = format!("+{} mod {}", spec.addend, spec.modulus);
    let mut circuit = Circuit::with_size(name, width + 2, 0);
    let control = QubitId(0);
    let register: Vec<_> = (1..=width).map(QubitId).collect();
    let guard = QubitId(width);
    let ancilla = QubitId(width + 1);
    let enter = |c: &mut Circuit| append_on(c, &forward, &register);
    let leave = |c: &mut Circuit| append_on(c, &inverse, &register);

    if spec.include_qfts {
        enter(&mut circuit)?;
    }

    // Stage 1: flag "no wraparound" in the ancilla.
    emit_rotations(&mut circuit, Some(control), &register, &add_m)?;
    emit_rotations(&mut circuit, None, &register, &sub_k)?;
    leave(&mut circuit)?;
    circuit.cx(guard, ancilla)?;

    // Stage 2: undo stage 1 and clear the ancilla.
    enter(&mut circuit)?;
    emit_rotations(&mut circuit, Some(ancilla), &register, &add_k)?;
    emit_rotations(&mut circuit, Some(control), &register, &sub_m)?;
    leave(&mut circuit)?;
    circuit.x(guard)?.cx(guard, ancilla)?.x(guard)?;

    // Stage 3: the reduced sum.
    enter(&mut circuit)?;
    emit_rotations(&mut circuit, Some(control), &register, &add_m)?;

    if spec.include_qfts {
        leave(&mut circuit)?;
    }
    Ok(circuit)
}

fn append_on(circuit: &mut Circuit, sub: &Arc<Circuit>, wires: &[QubitId]) -> ArithResult<()> {
    circuit.append(sub, wires.iter().copied())?;
    Ok(())
}
