//! Builder for cache instances.
//!
//! The plain constructors cover the common cases; the builder exists for
//! the combinations they do not, chiefly pinning the RNG seed so tests and
//! simulations get reproducible probe and placement decisions.
//!
//! ## Example
//!
//! ```
//! use sampled_lru::builder::CacheBuilder;
//!
//! let mut cache = CacheBuilder::new(100).seed(42).build::<u64, String>();
//! cache.add(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::policy::sampled_lru::SampledLruCore;
#[cfg(feature = "concurrency")]
use crate::policy::sampled_lru::ConcurrentSampledLru;
use crate::rng::seeded_rng;

/// Builder for [`SampledLruCore`] and [`ConcurrentSampledLru`] instances.
///
/// Key and value types are chosen at `build` time, so the callback-free
/// configuration steps stay free of type annotations.
pub struct CacheBuilder {
    capacity: usize,
    seed: Option<u64>,
}

impl CacheBuilder {
    /// Creates a builder for a cache with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            seed: None,
        }
    }

    /// Pins the RNG seed.
    ///
    /// Without this, the cache seeds itself from the OS entropy source.
    /// Pinning makes placement, shuffling, and probe decisions
    /// reproducible. Intended for tests; unrelated production caches
    /// should never share a seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => seeded_rng(),
        }
    }

    /// Builds a single-threaded cache engine.
    pub fn build<K, V>(self) -> SampledLruCore<K, V>
    where
        K: Clone + Eq + Hash,
    {
        let rng = self.rng();
        SampledLruCore::from_parts(self.capacity, rng, None)
    }

    /// Builds a single-threaded cache engine with an eviction callback.
    ///
    /// # Example
    ///
    /// ```
    /// use sampled_lru::builder::CacheBuilder;
    ///
    /// let mut cache = CacheBuilder::new(1)
    ///     .seed(7)
    ///     .build_with_evict(|k: u32, _v: u32| println!("evicted {k}"));
    /// cache.add(1, 10);
    /// assert!(cache.add(2, 20));
    /// ```
    pub fn build_with_evict<K, V>(
        self,
        on_evict: impl FnMut(K, V) + Send + 'static,
    ) -> SampledLruCore<K, V>
    where
        K: Clone + Eq + Hash,
    {
        let rng = self.rng();
        SampledLruCore::from_parts(self.capacity, rng, Some(Box::new(on_evict)))
    }

    /// Builds a thread-safe cache behind the serialized facade.
    #[cfg(feature = "concurrency")]
    pub fn build_concurrent<K, V>(self) -> ConcurrentSampledLru<K, V>
    where
        K: Clone + Eq + Hash,
    {
        ConcurrentSampledLru::from_core(self.build())
    }

    /// Builds a thread-safe cache with an eviction callback.
    ///
    /// The callback runs under the facade's lock and must not call back
    /// into the same cache.
    #[cfg(feature = "concurrency")]
    pub fn build_concurrent_with_evict<K, V>(
        self,
        on_evict: impl FnMut(K, V) + Send + 'static,
    ) -> ConcurrentSampledLru<K, V>
    where
        K: Clone + Eq + Hash,
    {
        ConcurrentSampledLru::from_core(self.build_with_evict(on_evict))
    }
}
