//! DHAT heap profiler for freqtrack.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use freqtrack::tracker::FrequencyTracker;

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (u64::MAX as f64);
        (self.next_u64() as f64) * SCALE
    }
}

/// Hotset workload: 90% of increments hit 10% of keys.
fn hotset_workload(tracker: &mut FrequencyTracker<u64>, operations: usize, universe: u64, seed: u64) {
    let mut rng = XorShift64::new(seed);
    let hot_size = (universe as f64 * 0.1) as u64;

    for _ in 0..operations {
        let key = if rng.next_f64() < 0.9 {
            rng.next_u64() % hot_size
        } else {
            hot_size + (rng.next_u64() % (universe - hot_size))
        };
        tracker.increment(key);
    }
}

/// Mixed workload: increments and decrements with extreme-key queries.
fn churn_workload(tracker: &mut FrequencyTracker<u64>, operations: usize, universe: u64, seed: u64) {
    let mut rng = XorShift64::new(seed);
    for _ in 0..operations {
        let key = rng.next_u64() % universe;
        if rng.next_f64() < 0.6 {
            tracker.increment(key);
        } else {
            tracker.decrement(&key);
        }
        if rng.next_u64() % 8 == 0 {
            let _ = tracker.max_key();
            let _ = tracker.min_key();
        }
    }
}

/// Drain workload: decrement every key back to zero.
fn drain_workload(tracker: &mut FrequencyTracker<u64>) {
    while let Some(&key) = tracker.min_key() {
        tracker.decrement(&key);
    }
}

fn profile_hotset() {
    println!("=== Profiling hotset ===");
    let mut tracker = FrequencyTracker::with_capacity(16_384);
    hotset_workload(&mut tracker, 200_000, 16_384, 42);
    println!(
        "  Keys: {}  Buckets: {}  Approx bytes: {}",
        tracker.len(),
        tracker.bucket_count(),
        tracker.approx_bytes()
    );
}

fn profile_churn() {
    println!("=== Profiling churn ===");
    let mut tracker = FrequencyTracker::new();
    churn_workload(&mut tracker, 200_000, 4_096, 7);
    println!(
        "  Keys: {}  Buckets: {}  Approx bytes: {}",
        tracker.len(),
        tracker.bucket_count(),
        tracker.approx_bytes()
    );
    drain_workload(&mut tracker);
    println!("  After drain: {} keys", tracker.len());
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("freqtrack DHAT Heap Profiling");
    println!("=============================\n");

    profile_hotset();
    profile_churn();

    println!("\n=============================");
    println!("Profile written to dhat-heap.json");
}
