//! Memoization of equilibrium solves.

use std::collections::HashMap;

use crate::error::Result;
use crate::model::{ModelParameters, PolicyShock};

use super::equilibrium::{solve_equilibrium, Equilibrium};
use super::DEFAULT_CACHE_CAPACITY;

/// Exact bit patterns of the nine parameters and two shocks.
type CacheKey = [u64; 11];

fn cache_key(params: &ModelParameters, shock: PolicyShock) -> CacheKey {
    [
        params.a.to_bits(),
        params.c.to_bits(),
        params.t.to_bits(),
        params.i0.to_bits(),
        params.b.to_bits(),
        params.g0.to_bits(),
        params.k.to_bits(),
        params.h.to_bits(),
        params.m0.to_bits(),
        shock.fiscal.to_bits(),
        shock.monetary.to_bits(),
    ]
}

/// Equilibria keyed on `(parameters, shock)`.
///
/// Outputs are pure functions of the key, so entries never go stale. When the
/// map reaches its capacity it is cleared.
#[derive(Debug)]
pub struct EquilibriumCache {
    entries: HashMap<CacheKey, Equilibrium>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for EquilibriumCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl EquilibriumCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached equilibrium or solve and remember it.
    ///
    /// Failed solves are not cached.
    pub fn get_or_solve(&mut self, params: &ModelParameters, shock: PolicyShock) -> Result<Equilibrium> {
        let key = cache_key(params, shock);
        if let Some(eq) = self.entries.get(&key) {
            self.hits += 1;
            tracing::trace!(output = eq.output, rate = eq.rate, "equilibrium cache hit");
            return Ok(*eq);
        }

        self.misses += 1;
        let eq = solve_equilibrium(params, shock)?;
        if self.entries.len() >= self.capacity {
            tracing::debug!(capacity = self.capacity, "equilibrium cache full, clearing");
            self.entries.clear();
        }
        self.entries.insert(key, eq);
        Ok(eq)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
