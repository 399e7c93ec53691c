pub use crate::builder::CacheBuilder;
pub use crate::error::InvariantError;
pub use crate::policy::sampled_lru::{EvictCallback, SampledLruCore, RANDOM_PROBES};
pub use crate::traits::ReplacementCache;

#[cfg(feature = "concurrency")]
pub use crate::policy::sampled_lru::ConcurrentSampledLru;
