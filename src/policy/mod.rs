//! Cache replacement policy implementations.

pub mod sampled_lru;
