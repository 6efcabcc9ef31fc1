//! Constant addition in the phase (Fourier) basis.
//!
//! The target register must already be in the phase basis; these builders
//! never apply a Fourier transform themselves.

use tracing::debug;

use qmark_ir::{Circuit, QubitId};

use crate::angles::phase_angles;
use crate::error::{ArithResult, ensure_wires};

/// Append `P(θ[i])` on `register[i]`, adding `addend` to the register.
pub fn append_phase_add(circuit: &mut Circuit, register: &[QubitId], addend: i64) -> ArithResult<()> {
    let angles = phase_angles(addend, register.len() as u32)?;
    ensure_wires(circuit, register, "phase_add")?;
    emit_rotations(circuit, None, register, &angles)
}

/// Append `CP(θ[i])` from `control` onto `register[i]`.
pub fn append_controlled_phase_add(
    circuit: &mut Circuit,
    control: QubitId,
    register: &[QubitId],
    addend: i64,
) -> ArithResult<()> {
    let angles = phase_angles(addend, register.len() as u32)?;
    let mut wires = Vec::with_capacity(register.len() + 1);
    wires.push(control);
    wires.extend_from_slice(register);
    ensure_wires(circuit, &wires, "c_phase_add")?;
    emit_rotations(circuit, Some(control), register, &angles)
}

/// Build a standalone adder on `[control?] ++ register[0..width)`, named `+m` or `-m`.
pub fn build_phase_adder(addend: i64, width: u32, controlled: bool) -> ArithResult<Circuit> {
    debug!(addend, width, controlled, "building phase adder");
    let angles = phase_angles(addend, width)?;

    let offset = u32::from(controlled);
    let mut circuit = Circuit::with_size(format!("{addend:+}"), width + offset, 0);
    let register: Vec<_> = (offset..width + offset).map(QubitId).collect();
    let control = controlled.then_some(QubitId(0));
    emit_rotations(&mut circuit, control, &register, &angles)?;
    Ok(circuit)
}

/// Emit one (controlled) phase rotation per wire from precomputed angles.
pub(crate) fn emit_rotations(
    circuit: &mut Circuit,
    control: Option<QubitId>,
    register: &[QubitId],
    angles: &[f64],
) -> ArithResult<()> {
    for (&qubit, &theta) in register.iter().zip(angles) {
        match control {
            Some(c) => circuit.cp(theta, c, qubit)?,
            None => circuit.p(theta, qubit)?,
        };
    }
    Ok(())
}
