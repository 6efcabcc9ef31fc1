//! Per-build cache of modular adders.

use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::debug;

use qmark_ir::Circuit;

use crate::error::ArithResult;
use crate::mod_adder::{ModAdderSpec, build_controlled_modulo_adder};

/// Shared `+m mod K` circuits keyed by `(addend, modulus)`.
///
/// Every adder in one cache uses the same QFT approximation degree, the
/// narrowest valid register, and no outer QFTs. Each key is built at most once.
#[derive(Debug, Clone, Default)]
pub struct ModAdderCache {
    approximation_degree: u32,
    adders: FxHashMap<(u64, u64), Arc<Circuit>>,
}

impl ModAdderCache {
    /// Create an empty cache bound to `approximation_degree`.
    pub fn new(approximation_degree: u32) -> Self {
        Self {
            approximation_degree,
            adders: FxHashMap::default(),
        }
    }

    /// The QFT approximation degree of every cached adder.
    pub fn approximation_degree(&self) -> u32 {
        self.approximation_degree
    }

    /// Return the cached adder for `(addend, modulus)`, building it on first use.
    pub fn get_or_build(&mut self, addend: u64, modulus: u64) -> ArithResult<Arc<Circuit>> {
        if let Some(adder) = self.adders.get(&(addend, modulus)) {
            return Ok(Arc::clone(adder));
        }

        let spec = ModAdderSpec::new(addend, modulus)
            .with_approximation_degree(self.approximation_degree);
        let adder = build_controlled_modulo_adder(&spec)?.into_shared();
        self.adders.insert((addend, modulus), Arc::clone(&adder));
        debug!(addend, modulus, cache_size = self.adders.len(), "cached modular adder");
        Ok(adder)
    }

    /// The cached adder for `(addend, modulus)`, if built.
    pub fn get(&self, addend: u64, modulus: u64) -> Option<&Arc<Circuit>> {
        self.adders.get(&(addend, modulus))
    }

    /// Whether `(addend, modulus)` has been built.
    pub fn contains(&self, addend: u64, modulus: u64) -> bool {
        self.adders.contains_key(&(addend, modulus))
    }

    /// Number of distinct adders built.
    pub fn len(&self) -> usize {
        self.adders.len()
    }

    /// Whether nothing has been built yet.
    pub fn is_empty(&self) -> bool {
        self.adders.is_empty()
    }
}
