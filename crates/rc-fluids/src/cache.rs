//! Per-calculation memoization of property lookups.
//!
//! Cycle solvers ask for the same saturation states repeatedly (evaporator dew point,
//! condenser bubble point, intermediate levels). A `PropertyCache` is created at the start
//! of one calculation and dropped at its end, so nothing is shared between invocations.

use crate::error::FluidResult;
use crate::provider::PropertyProvider;
use crate::refrigerant::Refrigerant;
use crate::state::{StateInput, StateProperties};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

type CacheKey = (Refrigerant, u8, u64, u64);

/// Lookup counters for one cache lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

impl CacheStats {
    pub fn lookups(&self) -> usize {
        self.hits + self.misses
    }
}

/// Memoizing wrapper around any provider.
///
/// Keys are bit-exact: two inputs hit the same entry only when their SI values are
/// identical. Failed lookups are not stored.
pub struct PropertyCache<'a> {
    inner: &'a dyn PropertyProvider,
    entries: RefCell<HashMap<CacheKey, StateProperties>>,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl<'a> PropertyCache<'a> {
    pub fn new(inner: &'a dyn PropertyProvider) -> Self {
        Self {
            inner,
            entries: RefCell::new(HashMap::new()),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.get(),
            misses: self.misses.get(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn key(fluid: Refrigerant, input: &StateInput) -> CacheKey {
        let (tag, a, b) = input.key_parts();
        (fluid, tag, a.to_bits(), b.to_bits())
    }
}

impl PropertyProvider for PropertyCache<'_> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn supports(&self, fluid: Refrigerant) -> bool {
        self.inner.supports(fluid)
    }

    fn lookup(&self, fluid: Refrigerant, input: StateInput) -> FluidResult<StateProperties> {
        let key = Self::key(fluid, &input);
        if let Some(props) = self.entries.borrow().get(&key) {
            self.hits.set(self.hits.get() + 1);
            return Ok(*props);
        }

        self.misses.set(self.misses.get() + 1);
        let props = self.inner.lookup(fluid, input)?;
        self.entries.borrow_mut().insert(key, props);
        Ok(props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FluidError;
    use rc_core::units::{k, pa};
    use uom::si::f64::MassDensity;
    use uom::si::mass_density::kilogram_per_cubic_meter;

    /// Fake provider that counts calls and fails below 1 bar.
    struct Counting {
        calls: Cell<usize>,
    }

    impl PropertyProvider for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        fn supports(&self, _fluid: Refrigerant) -> bool {
            true
        }

        fn lookup(&self, fluid: Refrigerant, input: StateInput) -> FluidResult<StateProperties> {
            self.calls.set(self.calls.get() + 1);
            let (_, a, _) = input.key_parts();
            if a < 1.0e5 {
                return Err(FluidError::OutOfRange {
                    fluid: fluid.key().into(),
                    input: input.to_string(),
                    message: "below test floor".into(),
                });
            }
            Ok(StateProperties {
                pressure: pa(a),
                temperature: k(300.0),
                density: MassDensity::new::<kilogram_per_cubic_meter>(1.0),
                enthalpy: a,
                entropy: 1.0,
                quality: None,
            })
        }
    }

    #[test]
    fn repeated_lookup_hits_cache() {
        let backend = Counting {
            calls: Cell::new(0),
        };
        let cache = PropertyCache::new(&backend);
        let input = StateInput::PQ {
            p: pa(2.0e5),
            q: 1.0,
        };

        let first = cache.lookup(Refrigerant::Ammonia, input).unwrap();
        let second = cache.lookup(Refrigerant::Ammonia, input).unwrap();
        assert_eq!(first, second);
        assert_eq!(backend.calls.get(), 1);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
        assert_eq!(cache.len(), 1);

        // Different fluid is a different entry.
        cache.lookup(Refrigerant::R134a, input).unwrap();
        assert_eq!(backend.calls.get(), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let backend = Counting {
            calls: Cell::new(0),
        };
        let cache = PropertyCache::new(&backend);
        let input = StateInput::PQ {
            p: pa(5.0e4),
            q: 0.0,
        };

        assert!(cache.lookup(Refrigerant::R22, input).is_err());
        assert!(cache.lookup(Refrigerant::R22, input).is_err());
        assert_eq!(backend.calls.get(), 2);
        assert!(cache.is_empty());
    }
}
