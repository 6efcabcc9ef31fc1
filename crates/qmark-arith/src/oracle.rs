//! The multiples-of-K marking oracle.
//!
//! The oracle folds the input value `x` into a remainder register as
//! `Σ x_i · (2^i mod K)` using controlled modular adders, marks the states
//! whose remainder is zero, and folds the remainder back out with the
//! additive inverses so the remainder register and ancilla end clean.
//!
//! Wire layout is fixed: input register first, then the remainder register
//! (`required_register_width(K)` wires, guard bit last), then one ancilla.

use serde::{Deserialize, Serialize};
use std::iter;
use std::sync::Arc;
use tracing::{debug, instrument};

use qmark_ir::{Circuit, ClbitId, QubitId, QubitRegister};

use crate::cache::ModAdderCache;
use crate::error::{ArithError, ArithResult};
use crate::mc_gate::multi_control_z;
use crate::mod_adder::required_register_width;
use crate::qft::{QftOptions, qft};
use crate::remainders::{additive_inverse, doubling_remainders};

/// Configuration of a multiples oracle.
///
/// Optional fields default as follows:
///
/// | Field | `None` means |
/// |-------|--------------|
/// | `sub_oracle` | phase-flip the multiples of K |
/// | `sub_oracle_wires` | the whole input register |
/// | `control_wires` | apply the sub-oracle unconditionally |
/// | `control_pattern` | all-ones activation |
/// | `name` | `Multiples of K` |
/// | `attach_measurement` | same as `init_superposition` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleConfig {
    /// The modulus K whose multiples are marked.
    pub modulus: u64,
    /// Number of input qubits.
    pub input_width: u32,
    /// QFT approximation degree for every transform in the oracle.
    #[serde(default)]
    pub approximation_degree: u32,
    /// Circuit applied in place of the default phase mark.
    #[serde(default)]
    pub sub_oracle: Option<Arc<Circuit>>,
    /// Wires receiving the sub-oracle's wires, in order.
    #[serde(default)]
    pub sub_oracle_wires: Option<Vec<QubitId>>,
    /// Wires the sub-oracle is controlled on.
    #[serde(default)]
    pub control_wires: Option<Vec<QubitId>>,
    /// Activation bit of each control wire; `control_pattern[i]` belongs to `control_wires[i]`.
    #[serde(default)]
    pub control_pattern: Option<Vec<bool>>,
    /// Circuit name.
    #[serde(default)]
    pub name: Option<String>,
    /// Put the input register in uniform superposition first.
    #[serde(default)]
    pub init_superposition: bool,
    /// Allocate a classical `multiples` register for the input.
    #[serde(default)]
    pub attach_measurement: Option<bool>,
}

impl OracleConfig {
    /// A bare marking oracle for multiples of `modulus` on `input_width` qubits.
    pub fn new(modulus: u64, input_width: u32) -> Self {
        Self {
            modulus,
            input_width,
            approximation_degree: 0,
            sub_oracle: None,
            sub_oracle_wires: None,
            control_wires: None,
            control_pattern: None,
            name: None,
            init_superposition: false,
            attach_measurement: None,
        }
    }

    /// Set the QFT approximation degree.
    #[must_use]
    pub fn with_approximation_degree(mut self, degree: u32) -> Self {
        self.approximation_degree = degree;
        self
    }

    /// Replace the default mark with `sub_oracle`.
    #[must_use]
    pub fn with_sub_oracle(mut self, sub_oracle: Arc<Circuit>) -> Self {
        self.sub_oracle = Some(sub_oracle);
        self
    }

    /// Apply the sub-oracle on `wires` instead of the input register.
    #[must_use]
    pub fn with_sub_oracle_wires(mut self, wires: Vec<QubitId>) -> Self {
        self.sub_oracle_wires = Some(wires);
        self
    }

    /// Control the sub-oracle on `wires`.
    #[must_use]
    pub fn with_control_wires(mut self, wires: Vec<QubitId>) -> Self {
        self.control_wires = Some(wires);
        self
    }

    /// Activate the controlled sub-oracle on `pattern` instead of all ones.
    #[must_use]
    pub fn with_control_pattern(mut self, pattern: Vec<bool>) -> Self {
        self.control_pattern = Some(pattern);
        self
    }

    /// Set the circuit name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Prepare the input register in uniform superposition.
    #[must_use]
    pub fn with_init_superposition(mut self, init_superposition: bool) -> Self {
        self.init_superposition = init_superposition;
        self
    }

    /// Force the classical buffer on or off.
    #[must_use]
    pub fn with_measurement(mut self, attach: bool) -> Self {
        self.attach_measurement = Some(attach);
        self
    }

    /// The circuit name, defaulted.
    pub fn effective_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Multiples of {}", self.modulus))
    }

    /// Whether a classical buffer is allocated, defaulted.
    pub fn attaches_measurement(&self) -> bool {
        self.attach_measurement.unwrap_or(self.init_superposition)
    }

    /// Wire assignment of the oracle this configuration builds.
    pub fn layout(&self) -> ArithResult<OracleLayout> {
        OracleLayout::new(self.modulus, self.input_width, self.attaches_measurement())
    }

    fn validate(&self) -> ArithResult<()> {
        if self.modulus < 2 || i64::try_from(self.modulus).is_err() {
            return Err(ArithError::InvalidModulus(self.modulus));
        }
        if self.input_width == 0 {
            return Err(ArithError::InvalidInputWidth);
        }
        if let Some(pattern) = &self.control_pattern {
            let wires = self.control_wires.as_ref().map_or(0, Vec::len);
            if wires != pattern.len() {
                return Err(ArithError::ControlPatternLengthMismatch {
                    wires,
                    pattern: pattern.len(),
                });
            }
        }
        Ok(())
    }
}

/// Wire assignment of a multiples oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleLayout {
    /// Input register, LSB first.
    pub input: QubitRegister,
    /// Remainder register, guard bit last.
    pub remainders: QubitRegister,
    /// Overflow ancilla of the modular adders.
    pub ancilla: QubitId,
    /// Classical buffer for the input register, if attached.
    pub measurement: Option<Vec<ClbitId>>,
}

impl OracleLayout {
    /// Compute the layout without building anything.
    pub fn new(modulus: u64, input_width: u32, attach_measurement: bool) -> ArithResult<Self> {
        if modulus < 2 || i64::try_from(modulus).is_err() {
            return Err(ArithError::InvalidModulus(modulus));
        }
        let remainder_width = required_register_width(modulus);
        Ok(Self {
            input: QubitRegister::contiguous("input", 0, input_width),
            remainders: QubitRegister::contiguous("remainders", input_width, remainder_width),
            ancilla: QubitId(input_width + remainder_width),
            measurement: attach_measurement.then(|| (0..input_width).map(ClbitId).collect()),
        })
    }

    /// Total number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.input.len() + self.remainders.len() + 1
    }

    /// Remainder wires tested by the mark: everything but the guard bit.
    pub fn marking_wires(&self) -> &[QubitId] {
        self.remainders.without_msb()
    }

    /// Operands of the modular adder controlled by input wire `i`.
    fn adder_wires(&self, i: usize) -> impl Iterator<Item = QubitId> + '_ {
        self.input
            .qubit(i)
            .into_iter()
            .chain(self.remainders.iter())
            .chain(iter::once(self.ancilla))
    }
}

/// Builder for the multiples-of-K oracle.
#[derive(Debug, Clone)]
pub struct MultiplesOracle {
    config: OracleConfig,
}

impl MultiplesOracle {
    /// Wrap a configuration.
    pub fn new(config: OracleConfig) -> Self {
        Self { config }
    }

    /// The configuration.
    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Build with a fresh adder cache.
    pub fn build(&self) -> ArithResult<Circuit> {
        let mut cache = ModAdderCache::new(self.config.approximation_degree);
        self.build_with_cache(&mut cache)
    }

    /// Build, drawing modular adders from `cache`.
    #[instrument(
        skip(self, cache),
        fields(modulus = self.config.modulus, input_width = self.config.input_width)
    )]
    pub fn build_with_cache(&self, cache: &mut ModAdderCache) -> ArithResult<Circuit> {
        let config = &self.config;
        config.validate()?;
        if cache.approximation_degree() != config.approximation_degree {
            return Err(ArithError::ApproximationMismatch {
                cache: cache.approximation_degree(),
                requested: config.approximation_degree,
            });
        }

        let modulus = config.modulus;
        let layout = config.layout()?;
        let remainder_width = layout.remainders.len() as u32;
        let remainders = doubling_remainders(modulus, layout.input.len() - 1)?;

        let options = QftOptions::new().with_approximation_degree(config.approximation_degree);
        let forward = qft(remainder_width, options)?.into_shared();
        let inverse = qft(remainder_width, options.inverted())?.into_shared();

        // Init
        let mut circuit = Circuit::new(config.effective_name());
        circuit.add_qreg(layout.input.name(), config.input_width);
        circuit.add_qreg(layout.remainders.name(), remainder_width);
        circuit.add_qreg("ancilla", 1);
        if let Some(bits) = &layout.measurement {
            circuit.add_creg("multiples", bits.len() as u32);
        }
        if config.init_superposition {
            circuit.h_all(layout.input.qubits())?;
        }

        // Fold-in
        circuit.h_all(layout.remainders.qubits())?;
        for (i, &remainder) in remainders.iter().enumerate() {
            let adder = cache.get_or_build(remainder, modulus)?;
            circuit.append(&adder, layout.adder_wires(i))?;
        }
        circuit.append(&inverse, layout.remainders.iter())?;

        // Mark
        let marking = layout.marking_wires();
        circuit.x_all(marking)?;
        match &config.sub_oracle {
            Some(sub_oracle) => self.append_sub_oracle(&mut circuit, sub_oracle, &layout)?,
            None => {
                let mark = multi_control_z(marking.len() as u32)?.into_shared();
                circuit.append(&mark, marking.iter().copied())?;
            }
        }
        circuit.x_all(marking)?;
        circuit.append(&forward, layout.remainders.iter())?;

        // Fold-out
        for (i, &remainder) in remainders.iter().enumerate() {
            let adder = cache.get_or_build(additive_inverse(remainder, modulus), modulus)?;
            circuit.append(&adder, layout.adder_wires(i))?;
        }
        circuit.append(&inverse, layout.remainders.iter())?;

        debug!(
            num_qubits = circuit.num_qubits(),
            num_ops = circuit.num_ops(),
            cache_size = cache.len(),
            "built multiples oracle"
        );
        Ok(circuit)
    }

    fn append_sub_oracle(
        &self,
        circuit: &mut Circuit,
        sub_oracle: &Arc<Circuit>,
        layout: &OracleLayout,
    ) -> ArithResult<()> {
        let wires = self
            .config
            .sub_oracle_wires
            .as_deref()
            .unwrap_or(layout.input.qubits());

        let Some(controls) = &self.config.control_wires else {
            circuit.append(sub_oracle, wires.iter().copied())?;
            return Ok(());
        };

        let negated: Vec<QubitId> = match &self.config.control_pattern {
            Some(pattern) => controls
                .iter()
                .zip(pattern)
                .filter(|&(_, &bit)| !bit)
                .map(|(&q, _)| q)
                .collect(),
            None => Vec::new(),
        };
        circuit.x_all(&negated)?;
        circuit.append_controlled(sub_oracle, controls, wires.iter().copied())?;
        circuit.x_all(&negated)?;
        Ok(())
    }
}

/// Build the multiples oracle described by `config`.
pub fn build_multiples_oracle(config: &OracleConfig) -> ArithResult<Circuit> {
    MultiplesOracle::new(config.clone()).build()
}
