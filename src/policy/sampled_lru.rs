//! Sampled approximate-LRU cache replacement policy.
//!
//! Implements an LRU approximation that never maintains a recency list.
//! Every entry carries a monotonic recency stamp; on eviction the cache
//! probes a handful of random slots and discards the stalest one it saw.
//! This trades strict LRU ordering for a compact, allocation-free layout
//! with cache-friendly eviction scans.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────────┐
//! │                      SampledLruCore<K, V> Layout                       │
//! │                                                                        │
//! │   items: FxHashMap<K, usize>        data: Vec<Entry<K, V>>             │
//! │          key → slot index                 dense slot array             │
//! │                                                                        │
//! │   ┌──────────┬───────┐             ┌──────────┬──────────┬──────────┐  │
//! │   │   Key    │ index │             │ stamp 17 │ stamp 3  │ stamp 12 │  │
//! │   ├──────────┼───────┤             │ "page7"  │ "page1"  │ "page4"  │  │
//! │   │  "page7" │   0   │────────────►│  v7      │  v1      │  v4      │  │
//! │   │  "page1" │   1   │             └──────────┴──────────┴──────────┘  │
//! │   │  "page4" │   2   │               slot positions are randomized:    │
//! │   └──────────┴───────┘               position carries no recency info  │
//! │                                                                        │
//! │   ┌────────────────────────────────────────────────────────────────┐   │
//! │   │                 Eviction: random probe (O(1))                  │   │
//! │   │                                                                │   │
//! │   │   1. base = rng.gen_range(0..len)                              │   │
//! │   │   2. scan slots base..base+8 (mod len)                         │   │
//! │   │   3. victim = slot with the smallest recency stamp             │   │
//! │   │   4. overwrite the victim slot with the incoming entry         │   │
//! │   └────────────────────────────────────────────────────────────────┘   │
//! └────────────────────────────────────────────────────────────────────────┘
//!
//! Insert Flow (new key, not at capacity)
//! ──────────────────────────────────────
//!
//!   add("new_key", value):
//!     1. stamp = next counter value
//!     2. append entry at index L = len
//!     3. swap with a uniformly random slot j in [0, L+1)  ← placement
//!        randomization; keeps positions uncorrelated with insert order
//!
//! Access Flow
//! ───────────
//!
//!   get("key"):   stamp the entry with a fresh counter value
//!   peek("key"):  read the value, leave the stamp alone
//! ```
//!
//! ## Operations
//!
//! | Operation  | Time       | Notes                                     |
//! |------------|------------|-------------------------------------------|
//! | `add`      | O(1)       | May probe 8 slots and evict               |
//! | `get`      | O(1)       | Refreshes the recency stamp               |
//! | `peek`     | O(1)       | No recency side effect                    |
//! | `contains` | O(1)       | No recency side effect                    |
//! | `remove`   | O(1)       | Swap-with-last, truncate                  |
//! | `purge`    | O(n)       | Drains every entry through the callback   |
//! | `resize`   | O(n log n) | Sorts by stamp; avoid on hot paths        |
//!
//! ## Why random probing approximates LRU
//!
//! Slot positions are kept uniformly random relative to recency: inserts
//! swap the new entry to a random position and `resize` reshuffles the
//! whole array. Sampling 8 positions and evicting the minimum stamp then
//! lands, in expectation, within the oldest ~12% of entries. The sampled
//! victim is rarely *the* oldest entry, which is exactly the trade this
//! policy makes for dropping the linked list.
//!
//! ## Example Usage
//!
//! ```
//! use sampled_lru::policy::sampled_lru::SampledLruCore;
//!
//! let mut cache = SampledLruCore::new(2);
//!
//! cache.add("a", 1);
//! cache.add("b", 2);
//!
//! // Refresh "a", so "b" is now the stalest entry.
//! assert_eq!(cache.get(&"a"), Some(&1));
//!
//! // The next insert evicts "b": with 8 probes over 2 slots the probe
//! // always sees every entry, so the true oldest is chosen.
//! assert!(cache.add("c", 3));
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! ```
//!
//! ## Thread Safety
//!
//! - [`SampledLruCore`]: not thread-safe; single mutator at a time.
//! - [`ConcurrentSampledLru`]: mutex-serialized wrapper, safe to share and
//!   clone across threads (requires the `concurrency` feature).
//!
//! ## Implementation Notes
//!
//! - Storage for the full capacity is allocated at construction; the hot
//!   paths never allocate.
//! - Each cache owns a `SmallRng` seeded from the OS entropy source. No
//!   global RNG is consulted, so caches stay independent and tests can pin
//!   seeds through [`CacheBuilder`](crate::builder::CacheBuilder).
//! - A recency stamp of `0` is reserved to mean "slot never touched"; the
//!   counter starts at 1 and 64 bits make wrap-around unreachable.

use std::fmt;
use std::hash::Hash;
use std::mem;

use rand::rngs::SmallRng;
use rand::Rng;
use rustc_hash::FxHashMap;

use crate::error::InvariantError;
use crate::rng::seeded_rng;
use crate::traits::ReplacementCache;

#[cfg(feature = "concurrency")]
use crossbeam_utils::CachePadded;
#[cfg(feature = "concurrency")]
use parking_lot::Mutex;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

/// Number of slots inspected per eviction decision; the stalest of these
/// is evicted. Eight entries span at most two cache lines, and sampling 8
/// keeps the expected victim within the oldest ~12% of the cache.
pub const RANDOM_PROBES: usize = 8;

/// Callback invoked with the owned key and value of every destroyed live
/// entry: on `add`-eviction, `remove`, `purge`, and `resize`-shrink.
///
/// Runs synchronously inside the mutating operation (and therefore under
/// the facade lock when one is in use). It must not call back into the
/// same cache.
pub type EvictCallback<K, V> = Box<dyn FnMut(K, V) + Send>;

/// A single slot: recency stamp, key, value.
///
/// `last_used == 0` is the reserved "never touched" sentinel; live entries
/// always carry a stamp ≥ 1.
struct Entry<K, V> {
    last_used: u64,
    key: K,
    value: V,
}

/// Core sampled approximate-LRU cache implementation.
///
/// Maintains a dense `Vec` of entries with deliberately randomized
/// positions and an `FxHashMap` from key to slot index. Recency lives in
/// per-entry stamps drawn from a monotonic counter; eviction probes
/// [`RANDOM_PROBES`] random slots and discards the smallest stamp.
///
/// # Type Parameters
///
/// - `K`: key type, `Clone + Eq + Hash` (the key is held in both the slot
///   and the index map)
/// - `V`: value type, opaque to the cache
///
/// # Example
///
/// ```
/// use sampled_lru::policy::sampled_lru::SampledLruCore;
///
/// let mut cache = SampledLruCore::new(100);
///
/// cache.add("key1", "value1");
/// assert!(cache.contains(&"key1"));
///
/// // Replacing a key refreshes it but never evicts.
/// assert!(!cache.add("key1", "new_value"));
/// assert_eq!(cache.get(&"key1"), Some(&"new_value"));
/// ```
///
/// # Eviction Behavior
///
/// Approximate LRU: the victim is the oldest of 8 randomly probed slots,
/// not necessarily the globally oldest entry. Callers that need strict
/// ordering want a different policy.
pub struct SampledLruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Maps key to its slot index in `data`.
    items: FxHashMap<K, usize>,
    /// Dense slot array; live entries occupy the whole length.
    data: Vec<Entry<K, V>>,
    /// Monotonic recency counter; 0 is the "never touched" sentinel.
    counter: u64,
    /// Configured capacity (`data` never grows past this).
    capacity: usize,
    /// Private generator for placement, shuffling, and probe bases.
    rng: SmallRng,
    /// Invoked once per destroyed live entry, if registered.
    on_evict: Option<EvictCallback<K, V>>,
}

impl<K, V> SampledLruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a cache with the given capacity.
    ///
    /// Memory for the full capacity is allocated upfront. A capacity of 0
    /// creates a degenerate cache that accepts calls but stores nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use sampled_lru::policy::sampled_lru::SampledLruCore;
    ///
    /// let cache: SampledLruCore<String, i32> = SampledLruCore::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self::from_parts(capacity, seeded_rng(), None)
    }

    /// Creates a cache that reports every destroyed live entry to
    /// `on_evict`.
    ///
    /// # Example
    ///
    /// ```
    /// use sampled_lru::policy::sampled_lru::SampledLruCore;
    ///
    /// let mut evicted = Vec::new();
    /// let mut cache = SampledLruCore::with_evict(1, move |k: &str, v: i32| {
    ///     evicted.push((k, v));
    /// });
    ///
    /// cache.add("one", 1);
    /// assert!(cache.add("two", 2)); // evicts ("one", 1) through the callback
    /// ```
    pub fn with_evict(capacity: usize, on_evict: impl FnMut(K, V) + Send + 'static) -> Self {
        Self::from_parts(capacity, seeded_rng(), Some(Box::new(on_evict)))
    }

    pub(crate) fn from_parts(
        capacity: usize,
        rng: SmallRng,
        on_evict: Option<EvictCallback<K, V>>,
    ) -> Self {
        Self {
            items: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            data: Vec::with_capacity(capacity),
            counter: 1,
            capacity,
            rng,
            on_evict,
        }
    }

    /// Draws the next recency stamp.
    #[inline]
    fn next_stamp(&mut self) -> u64 {
        // 0 is reserved as the "slot never touched" sentinel. A zero
        // counter can only come from a zero-initialized struct; heal it
        // rather than hand out a sentinel stamp. The branch is almost
        // always predicted as not-taken.
        if self.counter == 0 {
            self.counter = 1;
        }
        let now = self.counter;
        self.counter += 1;
        now
    }

    /// Inserts or replaces a value. Returns `true` if an eviction occurred.
    ///
    /// Replacing an existing key updates its value and recency in place
    /// and never evicts. A new key either appends into free space (and is
    /// swapped to a random position) or overwrites the probe victim.
    ///
    /// # Example
    ///
    /// ```
    /// use sampled_lru::policy::sampled_lru::SampledLruCore;
    ///
    /// let mut cache = SampledLruCore::new(1);
    /// assert!(!cache.add("1", 1));
    /// assert!(cache.add("2", 2)); // at capacity: "1" is evicted
    /// assert!(cache.contains(&"2"));
    /// ```
    pub fn add(&mut self, key: K, value: V) -> bool {
        let now = self.next_stamp();

        if let Some(&i) = self.items.get(&key) {
            let entry = &mut self.data[i];
            entry.last_used = now;
            entry.value = value;
            return false;
        }

        // A zero-sized cache accepts the call but stores nothing.
        if self.capacity == 0 {
            return false;
        }

        let ent = Entry {
            last_used: now,
            key,
            value,
        };

        let evicted = if self.data.len() == self.capacity {
            let victim = match self.find_oldest() {
                Some(off) => off,
                None => panic!("eviction probe on an empty cache"),
            };
            self.replace_slot(victim, ent);
            true
        } else {
            self.add_shuffled(ent);
            false
        };

        #[cfg(debug_assertions)]
        self.validate_invariants();

        evicted
    }

    /// Looks up a key's value, refreshing its recency stamp.
    ///
    /// # Example
    ///
    /// ```
    /// use sampled_lru::policy::sampled_lru::SampledLruCore;
    ///
    /// let mut cache = SampledLruCore::new(100);
    /// cache.add("key", 42);
    ///
    /// assert_eq!(cache.get(&"key"), Some(&42));
    /// assert_eq!(cache.get(&"missing"), None);
    /// ```
    #[inline]
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let i = *self.items.get(key)?;
        let now = self.next_stamp();
        let entry = &mut self.data[i];
        assert!(
            entry.key == *key,
            "index map points at a slot holding a different key"
        );
        entry.last_used = now;
        Some(&entry.value)
    }

    /// Returns a key's value without refreshing its recency.
    ///
    /// # Example
    ///
    /// ```
    /// use sampled_lru::policy::sampled_lru::SampledLruCore;
    ///
    /// let mut cache = SampledLruCore::new(2);
    /// cache.add("1", 1);
    /// cache.add("2", 2);
    ///
    /// // Peeking "1" does not protect it: it is still the oldest.
    /// assert_eq!(cache.peek(&"1"), Some(&1));
    /// cache.add("3", 3);
    /// assert!(!cache.contains(&"1"));
    /// ```
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.items.get(key).map(|&i| &self.data[i].value)
    }

    /// Checks whether a key is present without refreshing its recency.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.items.contains_key(key)
    }

    /// Removes a key, returning whether it was present.
    ///
    /// The removed entry is reported to the eviction callback.
    ///
    /// # Example
    ///
    /// ```
    /// use sampled_lru::policy::sampled_lru::SampledLruCore;
    ///
    /// let mut cache = SampledLruCore::new(10);
    /// cache.add("key", 1);
    ///
    /// assert!(cache.remove(&"key"));
    /// assert!(!cache.remove(&"key"));
    /// assert!(!cache.contains(&"key"));
    /// ```
    pub fn remove(&mut self, key: &K) -> bool {
        let removed = match self.items.get(key) {
            Some(&i) => {
                self.remove_slot(i);
                true
            }
            None => false,
        };

        #[cfg(debug_assertions)]
        self.validate_invariants();

        removed
    }

    /// Returns the number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the configured capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Completely clears the cache.
    ///
    /// Every live entry is drained through the eviction callback (when one
    /// is registered). Storage capacity is retained.
    pub fn purge(&mut self) {
        // Only walk the entries when a callback needs to observe them.
        if let Some(cb) = self.on_evict.as_mut() {
            for ent in self.data.drain(..) {
                if ent.last_used > 0 {
                    cb(ent.key, ent.value);
                }
            }
        } else {
            self.data.clear();
        }

        self.items = FxHashMap::with_capacity_and_hasher(self.capacity, Default::default());
    }

    /// Changes the configured capacity, evicting the oldest entries when
    /// shrinking. Returns the number of entries evicted.
    ///
    /// This is O(n log n): it sorts the slots by recency to find an exact
    /// removable suffix, then reshuffles so random probing stays unbiased.
    /// Not for hot paths.
    ///
    /// # Example
    ///
    /// ```
    /// use sampled_lru::policy::sampled_lru::SampledLruCore;
    ///
    /// let mut cache = SampledLruCore::new(2);
    /// cache.add("1", 1);
    /// cache.add("2", 2);
    ///
    /// // Shrinking evicts exactly the stalest entry.
    /// assert_eq!(cache.resize(1), 1);
    /// assert!(!cache.contains(&"1"));
    /// assert!(cache.contains(&"2"));
    /// ```
    pub fn resize(&mut self, capacity: usize) -> usize {
        let evicted = self.data.len().saturating_sub(capacity);

        // Sort newest-first so the oldest entries form a removable suffix,
        // then point the index map at the new slot positions.
        self.data
            .sort_unstable_by(|a, b| b.last_used.cmp(&a.last_used));
        for (i, ent) in self.data.iter().enumerate() {
            if ent.last_used == 0 {
                continue;
            }
            self.items.insert(ent.key.clone(), i);
        }

        for _ in 0..evicted {
            self.remove_slot(self.data.len() - 1);
        }

        self.capacity = capacity;
        if capacity < self.data.capacity() {
            self.data.shrink_to(capacity);
        } else {
            self.data.reserve_exact(capacity - self.data.len());
        }

        // The sort left positions correlated with recency; restore the
        // randomization that probing depends on.
        self.shuffle();

        #[cfg(debug_assertions)]
        self.validate_invariants();

        evicted
    }

    /// Appends a new entry and swaps it to a uniformly random position.
    ///
    /// The swap is what keeps slot positions independent of insertion
    /// order; without it, random probing would be biased toward whatever
    /// order callers happened to insert in.
    fn add_shuffled(&mut self, ent: Entry<K, V>) {
        assert!(
            self.data.len() < self.capacity,
            "append into a cache already at capacity"
        );

        let i = self.data.len();
        self.items.insert(ent.key.clone(), i);
        self.data.push(ent);

        let j = self.rng.gen_range(0..self.data.len());
        self.swap_slots(i, j);
    }

    /// Swaps two slots, keeping the index map in sync.
    fn swap_slots(&mut self, i: usize, j: usize) {
        // Nothing to do; don't touch memory.
        if i == j {
            return;
        }

        self.items.insert(self.data[i].key.clone(), j);
        self.items.insert(self.data[j].key.clone(), i);
        self.data.swap(i, j);
    }

    /// Fisher–Yates over the whole slot array, index map kept in sync.
    fn shuffle(&mut self) {
        for i in (1..self.data.len()).rev() {
            let j = self.rng.gen_range(0..=i);
            self.swap_slots(i, j);
        }
    }

    /// Identifies an old entry (approximately _the_ oldest).
    ///
    /// Probes [`RANDOM_PROBES`] consecutive slots starting from a random
    /// base, wrapping at the end of the array, and returns the offset of
    /// the smallest recency stamp. Ties go to the first slot in probe
    /// order. Returns `None` only on an empty cache.
    fn find_oldest(&mut self) -> Option<usize> {
        let len = self.data.len();
        if len == 0 {
            return None;
        }

        let base = self.rng.gen_range(0..len);
        let mut oldest_off = base;
        let mut oldest = self.data[base].last_used;

        // When the probe window does not wrap off the end of the array
        // (the overwhelmingly common, well-predicted case), keep the
        // modular reduction out of the inner loop; it is expensive there.
        // The wrap-around case gets its own copy of the loop.
        if base + RANDOM_PROBES - 1 < len {
            for j in 1..RANDOM_PROBES {
                let off = base + j;
                let stamp = self.data[off].last_used;
                if stamp < oldest {
                    oldest_off = off;
                    oldest = stamp;
                }
            }
        } else {
            for j in 1..RANDOM_PROBES {
                let off = (base + j) % len;
                let stamp = self.data[off].last_used;
                if stamp < oldest {
                    oldest_off = off;
                    oldest = stamp;
                }
            }
        }

        Some(oldest_off)
    }

    /// Destroys the entry at `i` by overwriting it with `ent`.
    ///
    /// Used by `add`-eviction so the incoming entry takes the victim's
    /// slot directly; the array length is unchanged. The victim is
    /// reported to the eviction callback.
    fn replace_slot(&mut self, i: usize, ent: Entry<K, V>) {
        self.items.insert(ent.key.clone(), i);
        let old = mem::replace(&mut self.data[i], ent);
        self.items.remove(&old.key);

        if let Some(cb) = self.on_evict.as_mut() {
            cb(old.key, old.value);
        }
    }

    /// Destroys the entry at `i` by swapping it with the last slot and
    /// truncating.
    ///
    /// Used by `remove` and `resize`-shrink; the array length decreases by
    /// one. The removed entry is reported to the eviction callback.
    fn remove_slot(&mut self, i: usize) {
        assert!(i < self.data.len(), "slot removal past the live prefix");

        let last = self.data.len() - 1;
        self.swap_slots(i, last);

        let Some(ent) = self.data.pop() else {
            unreachable!("live prefix was non-empty");
        };
        self.items.remove(&ent.key);

        if let Some(cb) = self.on_evict.as_mut() {
            cb(ent.key, ent.value);
        }
    }

    /// Verifies the structural invariants, returning a description of the
    /// first violation found.
    ///
    /// Intended for tests and debugging; the release hot paths instead
    /// panic at the point where an invariant would break.
    ///
    /// # Example
    ///
    /// ```
    /// use sampled_lru::policy::sampled_lru::SampledLruCore;
    ///
    /// let mut cache = SampledLruCore::new(8);
    /// for i in 0..32 {
    ///     cache.add(i, i);
    /// }
    /// cache.check_invariants().expect("consistent after churn");
    /// ```
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.data.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "length {} exceeds capacity {}",
                self.data.len(),
                self.capacity
            )));
        }
        if self.items.len() != self.data.len() {
            return Err(InvariantError::new(format!(
                "index map holds {} keys for {} live slots",
                self.items.len(),
                self.data.len()
            )));
        }
        for (i, ent) in self.data.iter().enumerate() {
            if ent.last_used == 0 {
                return Err(InvariantError::new(format!(
                    "live slot {i} carries the empty-sentinel stamp"
                )));
            }
            if ent.last_used >= self.counter {
                return Err(InvariantError::new(format!(
                    "slot {i} is stamped ahead of the recency counter"
                )));
            }
            match self.items.get(&ent.key) {
                Some(&j) if j == i => {}
                Some(&j) => {
                    return Err(InvariantError::new(format!(
                        "slot {i} is indexed at {j} in the map"
                    )))
                }
                None => {
                    return Err(InvariantError::new(format!(
                        "slot {i} has no index map entry"
                    )))
                }
            }
        }
        Ok(())
    }

    /// Panics on any broken structural invariant (debug builds only).
    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("{err}");
        }
    }
}

impl<K, V> fmt::Debug for SampledLruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SampledLruCore")
            .field("capacity", &self.capacity)
            .field("len", &self.items.len())
            .finish_non_exhaustive()
    }
}

/// Implementation of [`ReplacementCache`] for the engine, so generic code
/// can hold the policy behind a trait bound.
impl<K, V> ReplacementCache<K, V> for SampledLruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn add(&mut self, key: K, value: V) -> bool {
        SampledLruCore::add(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        SampledLruCore::get(self, key)
    }

    #[inline]
    fn peek(&self, key: &K) -> Option<&V> {
        SampledLruCore::peek(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        SampledLruCore::contains(self, key)
    }

    #[inline]
    fn remove(&mut self, key: &K) -> bool {
        SampledLruCore::remove(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        SampledLruCore::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        SampledLruCore::capacity(self)
    }

    fn purge(&mut self) {
        SampledLruCore::purge(self)
    }

    fn resize(&mut self, capacity: usize) -> usize {
        SampledLruCore::resize(self, capacity)
    }
}

// ---------------------------------------------------------------------------
// ConcurrentSampledLru
// ---------------------------------------------------------------------------

/// Thread-safe facade over [`SampledLruCore`].
///
/// Every operation acquires a single exclusive lock, delegates, and
/// releases on all exit paths, so operations observed through the facade
/// are linearizable in lock-acquisition order. On top of the engine's
/// operation set it provides the composite operations
/// [`contains_or_add`](Self::contains_or_add) and
/// [`peek_or_add`](Self::peek_or_add), which are atomic with respect to
/// concurrent callers.
///
/// Cloning is cheap and shares the same underlying cache. The lock state
/// is cache-line padded so separate cache instances never share a line.
///
/// # Deadlock contract
///
/// Eviction callbacks run synchronously under the facade's lock. A
/// callback must not call back into the same cache; doing so deadlocks.
///
/// # Example
///
/// ```
/// use sampled_lru::policy::sampled_lru::ConcurrentSampledLru;
///
/// let cache: ConcurrentSampledLru<u64, String> = ConcurrentSampledLru::new(100);
///
/// cache.add(1, "one".to_string());
/// assert_eq!(cache.get(&1), Some("one".to_string()));
///
/// let handle = cache.clone();
/// std::thread::spawn(move || {
///     handle.add(2, "two".to_string());
/// })
/// .join()
/// .unwrap();
/// assert!(cache.contains(&2));
/// ```
#[cfg(feature = "concurrency")]
pub struct ConcurrentSampledLru<K, V>
where
    K: Clone + Eq + Hash,
{
    inner: Arc<CachePadded<Mutex<SampledLruCore<K, V>>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for ConcurrentSampledLru<K, V>
where
    K: Clone + Eq + Hash,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentSampledLru<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("ConcurrentSampledLru")
            .field("capacity", &cache.capacity())
            .field("len", &cache.len())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentSampledLru<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a thread-safe cache with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self::from_core(SampledLruCore::new(capacity))
    }

    /// Creates a thread-safe cache with an eviction callback.
    ///
    /// The callback runs under the facade's lock; see the type-level
    /// deadlock contract.
    pub fn with_evict(capacity: usize, on_evict: impl FnMut(K, V) + Send + 'static) -> Self {
        Self::from_core(SampledLruCore::with_evict(capacity, on_evict))
    }

    pub(crate) fn from_core(core: SampledLruCore<K, V>) -> Self {
        Self {
            inner: Arc::new(CachePadded::new(Mutex::new(core))),
        }
    }

    /// Inserts or replaces a value. Returns `true` if an eviction occurred.
    pub fn add(&self, key: K, value: V) -> bool {
        self.inner.lock().add(key, value)
    }

    /// Looks up a value, refreshing its recency. The value is cloned out
    /// under the lock.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Returns a value without refreshing its recency.
    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    /// Checks for a key without refreshing its recency.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    /// Checks for a key and, when absent, adds the value, atomically.
    ///
    /// Returns `(found, evicted)`. When the key is already present its
    /// recency is deliberately **not** refreshed; that is what separates
    /// this from [`add`](Self::add).
    ///
    /// # Example
    ///
    /// ```
    /// use sampled_lru::policy::sampled_lru::ConcurrentSampledLru;
    ///
    /// let cache = ConcurrentSampledLru::new(10);
    ///
    /// assert_eq!(cache.contains_or_add("k", 1), (false, false));
    /// assert_eq!(cache.contains_or_add("k", 2), (true, false));
    /// assert_eq!(cache.peek(&"k"), Some(1)); // original value retained
    /// ```
    pub fn contains_or_add(&self, key: K, value: V) -> (bool, bool) {
        let mut cache = self.inner.lock();
        if cache.contains(&key) {
            return (true, false);
        }
        let evicted = cache.add(key, value);
        (false, evicted)
    }

    /// Peeks a key and, when absent, adds the value, atomically.
    ///
    /// Returns `(previous, evicted)`: `previous` is the already-present
    /// value (recency untouched, nothing inserted) or `None` when the
    /// value was just added.
    pub fn peek_or_add(&self, key: K, value: V) -> (Option<V>, bool)
    where
        V: Clone,
    {
        let mut cache = self.inner.lock();
        if let Some(previous) = cache.peek(&key) {
            return (Some(previous.clone()), false);
        }
        let evicted = cache.add(key, value);
        (None, evicted)
    }

    /// Removes a key, returning whether it was present.
    pub fn remove(&self, key: &K) -> bool {
        self.inner.lock().remove(key)
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Completely clears the cache, draining entries through the eviction
    /// callback.
    pub fn purge(&self) {
        self.inner.lock().purge()
    }

    /// Changes the configured capacity. Returns the number of entries
    /// evicted. O(n log n); not for hot paths.
    pub fn resize(&self, capacity: usize) -> usize {
        self.inner.lock().resize(capacity)
    }
}
