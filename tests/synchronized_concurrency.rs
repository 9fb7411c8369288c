// ==============================================
// SYNCHRONIZED CACHE CONCURRENCY TESTS (integration)
// ==============================================
//
// A reclaim-aware stack shared across threads through SynchronizedCache,
// with a reclaimer running concurrently on its own thread. These require
// multi-threaded execution and cannot live inline.

#![cfg(feature = "concurrency")]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use softcache::decorator::{ConcurrentCache, ReclaimAwareCache, SynchronizedCache};
use softcache::key::CompositeKey;
use softcache::reclaim::SoftEntry;
use softcache::store::HashMapStore;

type Store = HashMapStore<CompositeKey, SoftEntry<CompositeKey, u64>>;
type Shared = SynchronizedCache<ReclaimAwareCache<Store, CompositeKey, u64>>;

fn key(thread: u64, n: u64) -> CompositeKey {
    let mut key = CompositeKey::new();
    key.update("t").update(thread as i64).update(n as i64);
    key
}

#[test]
fn concurrent_writers_and_readers_see_consistent_values() {
    let cache: Arc<Shared> = Arc::new(SynchronizedCache::new(ReclaimAwareCache::new(
        HashMapStore::new("shared"),
    )));
    let threads = 4;
    let per_thread = 200;
    let barrier = Arc::new(Barrier::new(threads as usize));

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for n in 0..per_thread {
                    cache.put(key(t, n), Arc::new(t * 1_000 + n)).unwrap();
                }
                for n in 0..per_thread {
                    let value = cache.get(&key(t, n)).unwrap().expect("nothing reclaims");
                    assert_eq!(*value, t * 1_000 + n);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread");
    }
    assert_eq!(cache.len().unwrap(), (threads * per_thread) as usize);
}

#[test]
fn background_reclaimer_never_yields_a_tombstone_hit() {
    let cache: Arc<Shared> = Arc::new(SynchronizedCache::new(
        ReclaimAwareCache::with_hot_set_capacity(HashMapStore::new("racy"), 8),
    ));
    let reclaimer = cache.lock().reclaimer();
    let stop = Arc::new(AtomicBool::new(false));

    let collector = {
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut total = 0;
            while !stop.load(Ordering::Relaxed) {
                total += reclaimer.reclaim_unpinned();
                thread::yield_now();
            }
            total
        })
    };

    for n in 0..2_000u64 {
        cache.put(key(0, n % 64), Arc::new(n)).unwrap();
        if let Some(value) = cache.get(&key(0, (n + 1) % 64)).unwrap() {
            // A hit always carries a live value, never a cleared slot.
            assert!(*value < 2_000);
        }
    }

    stop.store(true, Ordering::Relaxed);
    collector.join().expect("reclaimer thread");

    // Once purged, every remaining entry is backed by a live value.
    let len = cache.len().unwrap();
    assert!(len <= 64);
    assert_eq!(len, cache.lock().reclaimer().live_len());
}
