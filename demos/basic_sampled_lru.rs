//! Example demonstrating the sampled approximate-LRU cache.
//!
//! The cache approximates LRU by stamping entries with a monotonic
//! counter and, on eviction, probing 8 random slots and discarding the
//! stalest one. Recently used entries survive; the victim is merely close
//! to the oldest, not exactly the oldest.
//!
//! Run with: cargo run --example basic_sampled_lru

use sampled_lru::policy::sampled_lru::SampledLruCore;

fn main() {
    println!("=== Sampled Approximate-LRU Cache Example ===\n");

    // Create a cache with capacity 10.
    let mut cache = SampledLruCore::new(10);

    println!("Created cache: capacity={}\n", cache.capacity());

    // Insert items 1-10.
    for i in 1..=10 {
        cache.add(i, format!("value-{}", i));
    }
    println!("Inserted keys 1-10");
    println!("  len: {}", cache.len());

    // Keep keys 1-3 hot. Unlike a random policy, access matters here:
    // refreshed entries are very unlikely to be chosen for eviction.
    for _ in 0..3 {
        for i in 1..=3 {
            cache.get(&i);
        }
    }
    println!("\nRefreshed keys 1-3 (their recency stamps are now newest)");

    // Insert ten more items; each one evicts an approximately-oldest entry.
    println!("\nInserting keys 11-20 (triggers 10 evictions)...");
    for i in 11..=20 {
        cache.add(i, format!("value-{}", i));
    }

    println!("\nAfter insertions:");
    println!("  len: {}", cache.len());

    let hot_survivors: Vec<_> = (1..=3).filter(|i| cache.contains(i)).collect();
    let cold_survivors: Vec<_> = (4..=10).filter(|i| cache.contains(i)).collect();
    let new_survivors: Vec<_> = (11..=20).filter(|i| cache.contains(i)).collect();

    println!("  hot survivors from 1-3:   {:?}", hot_survivors);
    println!("  cold survivors from 4-10: {:?}", cold_survivors);
    println!("  survivors from 11-20:     {:?}", new_survivors);

    // Peek and contains never refresh recency.
    if let Some(value) = cache.peek(&20) {
        println!("\nPeeked key 20 without refreshing it: {}", value);
    }

    // Shrink to the 5 most recent entries, then clear.
    let evicted = cache.resize(5);
    println!("\nResized to capacity 5: evicted {} entries", evicted);
    println!("  len: {}", cache.len());

    cache.purge();
    println!("\nPurged: len={}", cache.len());
}
