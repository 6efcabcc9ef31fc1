//! Named qubit registers.

use serde::{Deserialize, Serialize};

use crate::qubit::QubitId;

/// A named, fixed-size, ordered group of qubits.
///
/// Qubits are ordered from LSB (index 0) to MSB (index `len - 1`). A
/// register is created once, when its qubits are allocated from a circuit,
/// and never changes size afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QubitRegister {
    /// Register name, used for display.
    name: String,
    /// The qubits in this register, ordered from LSB to MSB.
    qubits: Vec<QubitId>,
}

impl QubitRegister {
    /// Create a register view over existing qubits.
    pub fn new(name: impl Into<String>, qubits: Vec<QubitId>) -> Self {
        Self {
            name: name.into(),
            qubits,
        }
    }

    /// Create a register over the contiguous range `start..start + size`.
    pub fn contiguous(name: impl Into<String>, start: u32, size: u32) -> Self {
        Self::new(name, (start..start + size).map(QubitId).collect())
    }

    /// Get the register name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits in this register.
    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    /// Check if the register is empty.
    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    /// Get the qubits in this register.
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Get a specific qubit by index.
    pub fn qubit(&self, index: usize) -> Option<QubitId> {
        self.qubits.get(index).copied()
    }

    /// Get the LSB qubit.
    pub fn lsb(&self) -> Option<QubitId> {
        self.qubits.first().copied()
    }

    /// Get the MSB qubit.
    pub fn msb(&self) -> Option<QubitId> {
        self.qubits.last().copied()
    }

    /// All qubits except the MSB.
    pub fn without_msb(&self) -> &[QubitId] {
        match self.qubits.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    /// Split the register at an index, returning `(lower, upper)` views.
    pub fn split_at(&self, index: usize) -> (QubitRegister, QubitRegister) {
        let (lower, upper) = self.qubits.split_at(index.min(self.qubits.len()));
        (
            QubitRegister::new(format!("{}_lo", self.name), lower.to_vec()),
            QubitRegister::new(format!("{}_hi", self.name), upper.to_vec()),
        )
    }

    /// Iterate over the qubits.
    pub fn iter(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.qubits.iter().copied()
    }
}

impl<'a> IntoIterator for &'a QubitRegister {
    type Item = &'a QubitId;
    type IntoIter = std::slice::Iter<'a, QubitId>;

    fn into_iter(self) -> Self::IntoIter {
        self.qubits.iter()
    }
}
