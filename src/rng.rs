//! RNG construction for cache instances.
//!
//! Every cache owns a private [`SmallRng`]; no global or process-wide
//! generator is ever consulted. The generator itself is a fast,
//! non-cryptographic PRNG; only its 64-bit seed comes from the operating
//! system's cryptographic source, so that independently created caches
//! probe and shuffle along unrelated sequences.

use rand::rngs::{OsRng, SmallRng};
use rand::{RngCore, SeedableRng};

/// Returns a new `SmallRng` seeded with 8 bytes from the OS entropy source.
///
/// Panics if the entropy source is unavailable; a host that cannot produce
/// 8 random bytes cannot run this cache correctly.
pub(crate) fn seeded_rng() -> SmallRng {
    let mut seed_bytes = [0u8; 8];
    OsRng.fill_bytes(&mut seed_bytes);
    SmallRng::seed_from_u64(u64::from_le_bytes(seed_bytes))
}
