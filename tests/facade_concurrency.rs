// ==============================================
// CONCURRENT FACADE TESTS (integration)
// ==============================================
//
// Exercises ConcurrentSampledLru from multiple threads: capacity bounds
// under contention, atomicity of the composite operations, and
// exactly-once callback reporting when every destruction happens under
// the lock.

#![cfg(feature = "concurrency")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use sampled_lru::prelude::*;

const THREADS: usize = 8;
const OPS_PER_THREAD: usize = 1_000;

#[test]
fn churn_from_many_threads_respects_capacity() {
    let cache: ConcurrentSampledLru<u64, u64> = ConcurrentSampledLru::new(64);

    let handles: Vec<_> = (0..THREADS as u64)
        .map(|t| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..OPS_PER_THREAD as u64 {
                    let key = t * 10_000 + i;
                    cache.add(key, i);
                    if i % 3 == 0 {
                        let _ = cache.get(&key);
                    }
                    if i % 7 == 0 {
                        cache.remove(&(key.saturating_sub(5)));
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(cache.len() <= 64);

    // The cache must still function normally after the stampede.
    cache.add(u64::MAX, 1);
    assert_eq!(cache.get(&u64::MAX), Some(1));
}

#[test]
fn contains_or_add_admits_exactly_one_winner() {
    let cache: ConcurrentSampledLru<&str, usize> = ConcurrentSampledLru::new(8);
    let outcomes = Arc::new(Mutex::new(Vec::new()));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = cache.clone();
            let outcomes = Arc::clone(&outcomes);
            thread::spawn(move || {
                let (found, evicted) = cache.contains_or_add("shared", t);
                outcomes.lock().unwrap().push((t, found, evicted));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let outcomes = outcomes.lock().unwrap();
    let winners: Vec<_> = outcomes.iter().filter(|(_, found, _)| !found).collect();
    assert_eq!(winners.len(), 1, "exactly one thread should insert");

    // The resident value belongs to the winning thread; contains_or_add
    // must not have overwritten it with a loser's value.
    let (winner, _, _) = *winners[0];
    assert_eq!(cache.peek(&"shared"), Some(winner));
}

#[test]
fn peek_or_add_losers_observe_the_winning_value() {
    let cache: ConcurrentSampledLru<&str, usize> = ConcurrentSampledLru::new(8);
    let observed = Arc::new(Mutex::new(Vec::new()));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = cache.clone();
            let observed = Arc::clone(&observed);
            thread::spawn(move || {
                let (previous, _) = cache.peek_or_add("shared", t);
                observed.lock().unwrap().push((t, previous));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let observed = observed.lock().unwrap();
    let winners: Vec<_> = observed
        .iter()
        .filter(|(_, previous)| previous.is_none())
        .collect();
    assert_eq!(winners.len(), 1);

    let winning_value = winners[0].0;
    for (t, previous) in observed.iter() {
        if let Some(seen) = previous {
            assert_eq!(*seen, winning_value, "thread {t} saw a stale value");
        }
    }
    assert_eq!(cache.peek(&"shared"), Some(winning_value));
}

#[test]
fn callbacks_report_exactly_once_under_contention() {
    let destroyed = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&destroyed);
    let cache: ConcurrentSampledLru<u64, u64> =
        ConcurrentSampledLru::with_evict(32, move |_k, _v| {
            hits.fetch_add(1, Ordering::Relaxed);
        });

    // Every key is distinct across threads, so each successful add creates
    // exactly one live entry.
    let handles: Vec<_> = (0..THREADS as u64)
        .map(|t| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..OPS_PER_THREAD as u64 {
                    cache.add(t * 100_000 + i, i);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let creations = THREADS * OPS_PER_THREAD;
    assert_eq!(
        creations - destroyed.load(Ordering::Relaxed),
        cache.len(),
        "destroyed entries must be reported exactly once"
    );
}

#[test]
fn purge_races_with_writers_without_losing_consistency() {
    let cache: ConcurrentSampledLru<u64, u64> = ConcurrentSampledLru::new(16);

    let writers: Vec<_> = (0..4u64)
        .map(|t| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..500 {
                    cache.add(t * 1_000 + i, i);
                }
            })
        })
        .collect();

    let purger = {
        let cache = cache.clone();
        thread::spawn(move || {
            for _ in 0..50 {
                cache.purge();
                thread::yield_now();
            }
        })
    };

    for handle in writers {
        handle.join().unwrap();
    }
    purger.join().unwrap();

    assert!(cache.len() <= 16);
    cache.add(9_999, 1);
    assert!(cache.contains(&9_999));
}
