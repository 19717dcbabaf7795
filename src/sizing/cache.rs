//! Memoization of pipeline results keyed by the request.
//!
//! Entries are write-once: a key is computed a single time and the stored
//! [`DerivedSpec`] is handed back unchanged on every later lookup. The cache
//! only grows; whoever owns it decides when to drop it.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::engine::SizingPipeline;
use super::types::{DerivedSpec, SizingRequest};
use crate::error::SizingError;

/// Session-scoped sizing cache.
#[derive(Debug, Default, Clone)]
pub struct SpecCache {
    entries: HashMap<String, DerivedSpec>,
    hits: u64,
    misses: u64,
}

impl SpecCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached spec for `request`, running `pipeline` only on a miss.
    ///
    /// Failed computations are not cached.
    ///
    /// # Errors
    ///
    /// Propagates the pipeline's error on a miss.
    pub fn get_or_compute<P: SizingPipeline + ?Sized>(
        &mut self,
        pipeline: &P,
        request: &SizingRequest,
    ) -> Result<DerivedSpec, SizingError> {
        let key = request.cache_key();
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                self.hits += 1;
                tracing::debug!(key = %entry.key(), "spec cache hit");
                Ok(entry.get().clone())
            }
            Entry::Vacant(entry) => {
                self.misses += 1;
                tracing::debug!(key = %entry.key(), "spec cache miss");
                let spec = pipeline.compute(&request.canonical())?;
                Ok(entry.insert(spec).clone())
            }
        }
    }

    /// Cached spec for `request`, without computing.
    pub fn get(&self, request: &SizingRequest) -> Option<&DerivedSpec> {
        self.entries.get(&request.cache_key())
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups served from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that ran the pipeline.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::reference::ReferenceData;

    /// Wraps the real engine and counts how often it runs.
    struct CountingPipeline {
        data: ReferenceData,
        calls: Cell<usize>,
    }

    impl CountingPipeline {
        fn new() -> Self {
            Self {
                data: ReferenceData::builtin(),
                calls: Cell::new(0),
            }
        }
    }

    impl SizingPipeline for CountingPipeline {
        fn compute(&self, request: &SizingRequest) -> Result<DerivedSpec, SizingError> {
            self.calls.set(self.calls.get() + 1);
            self.data.compute(request)
        }
    }

    #[test]
    fn identical_requests_compute_once() {
        let pipeline = CountingPipeline::new();
        let mut cache = SpecCache::new();
        let request = SizingRequest::full_hybrid("EB70 kVA", 12.0);

        let first = cache.get_or_compute(&pipeline, &request).ok();
        let second = cache.get_or_compute(&pipeline, &request).ok();

        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(pipeline.calls.get(), 1);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn any_field_change_is_a_new_entry() {
        let pipeline = CountingPipeline::new();
        let mut cache = SpecCache::new();

        let base = SizingRequest::full_hybrid("EB70 kVA", 12.0);
        let mut other_load = base.clone();
        other_load.continuous_kw = 13.0;
        let mut custom = base.clone();
        custom.custom_charge_rate_kw = Some(20.0);
        let pm = SizingRequest::power_module("EB70 kVA", 65, 12.0);

        for r in [&base, &other_load, &custom, &pm] {
            assert!(cache.get_or_compute(&pipeline, r).is_ok());
        }
        assert_eq!(pipeline.calls.get(), 4);
        assert_eq!(cache.len(), 4);
    }

    #[test]
    fn errors_are_not_cached() {
        let pipeline = CountingPipeline::new();
        let mut cache = SpecCache::new();
        let request = SizingRequest::full_hybrid("nope", 12.0);

        assert!(cache.get_or_compute(&pipeline, &request).is_err());
        assert!(cache.get_or_compute(&pipeline, &request).is_err());
        assert_eq!(pipeline.calls.get(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn cached_value_matches_fresh_computation() {
        let data = ReferenceData::builtin();
        let mut cache = SpecCache::new();
        let request = SizingRequest::power_module("EB220 kVA", 125, 40.0);
        let cached = cache.get_or_compute(&data, &request).ok();
        assert_eq!(cached, data.compute(&request).ok());
        assert_eq!(cache.get(&request).cloned(), cached);
    }

    #[test]
    fn keyed_alias_returns_what_a_fresh_run_would() {
        let data = ReferenceData::builtin();
        let mut cache = SpecCache::new();
        let first = SizingRequest {
            custom_charge_rate_kw: Some(12.3451),
            ..SizingRequest::full_hybrid("EB70 kVA", 10.0001)
        };
        let second = SizingRequest {
            custom_charge_rate_kw: Some(12.3454),
            ..SizingRequest::full_hybrid("EB70 kVA", 10.0004)
        };

        let _ = cache.get_or_compute(&data, &first);
        let cached = cache.get_or_compute(&data, &second).ok();
        assert_eq!(cache.hits(), 1);
        assert_eq!(cached, data.compute(&second).ok());
    }

    #[test]
    fn clear_resets() {
        let data = ReferenceData::builtin();
        let mut cache = SpecCache::new();
        let _ = cache.get_or_compute(&data, &SizingRequest::full_hybrid("EB25 kVA", 5.0));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.misses(), 0);
    }
}
