//! Positional wire identifiers and their register labels.
//!
//! A wire is nothing but its position in a circuit: `QubitId(3)` means the
//! fourth qubit of whichever circuit it is applied to, and sub-circuits are
//! rewired by mapping positions. Register membership is display metadata
//! recorded once, when the circuit allocates the wire.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! positional_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// The wire position, for indexing per-wire tables.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The wire `offset` places after this one.
            #[inline]
            #[must_use]
            pub fn offset(self, offset: u32) -> Self {
                Self(self.0 + offset)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl From<u32> for $name {
            fn from(position: u32) -> Self {
                Self(position)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;

            fn try_from(position: usize) -> Result<Self, Self::Error> {
                u32::try_from(position).map(Self)
            }
        }
    };
}

positional_id!(
    /// Position of a qubit within a circuit.
    QubitId,
    "q"
);

positional_id!(
    /// Position of a classical bit within a circuit.
    ClbitId,
    "c"
);

/// Where a wire sits inside a named register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegisterSlot {
    /// Register name.
    pub register: String,
    /// Position within the register, LSB first.
    pub offset: u32,
}

/// A circuit wire: its position plus the register slot it was allocated in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wire<I> {
    /// Position in the circuit.
    pub id: I,
    /// Register slot, absent for wires allocated one at a time.
    pub slot: Option<RegisterSlot>,
}

/// A qubit wire.
pub type Qubit = Wire<QubitId>;

/// A classical bit wire.
pub type Clbit = Wire<ClbitId>;

impl<I> Wire<I> {
    /// A wire outside any register.
    pub fn anonymous(id: I) -> Self {
        Self { id, slot: None }
    }

    /// A wire at `offset` inside `register`.
    pub fn in_register(id: I, register: impl Into<String>, offset: u32) -> Self {
        Self {
            id,
            slot: Some(RegisterSlot {
                register: register.into(),
                offset,
            }),
        }
    }

    /// Name of the owning register.
    pub fn register(&self) -> Option<&str> {
        self.slot.as_ref().map(|slot| slot.register.as_str())
    }
}

impl<I: fmt::Display> fmt::Display for Wire<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            Some(slot) => write!(f, "{}[{}]", slot.register, slot.offset),
            None => write!(f, "{}", self.id),
        }
    }
}
