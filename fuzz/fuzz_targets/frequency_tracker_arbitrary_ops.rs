#![no_main]

use libfuzzer_sys::fuzz_target;
use freqtrack::tracker::FrequencyTracker;

// Fuzz arbitrary operation sequences on FrequencyTracker
//
// Tests random sequences of increment, decrement, max/min queries, batch ops
// and clear to find edge cases and invariant violations.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let mut tracker: FrequencyTracker<u32> = FrequencyTracker::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 8;
        let key = u32::from(data[idx + 1] % 32);

        match op {
            0 | 1 | 2 => {
                // Increment (weighted so counts climb past 1)
                let before = tracker.count(&key);
                let after = tracker.increment(key);
                assert_eq!(after, before + 1);
            }
            3 | 4 => {
                // Decrement
                let before = tracker.count(&key);
                match tracker.decrement(&key) {
                    None => assert_eq!(before, 0),
                    Some(after) => assert_eq!(after, before - 1),
                }
            }
            5 => {
                // Extreme queries (read-only)
                if let Some(max) = tracker.max_key() {
                    assert_eq!(Some(tracker.count(max)), tracker.max_count());
                }
                if let Some(min) = tracker.min_key() {
                    assert_eq!(Some(tracker.count(min)), tracker.min_count());
                }
            }
            6 => {
                // Batch increment of a small run
                let run = (key % 4) + 1;
                tracker.increment_batch(key..key + run);
            }
            7 => {
                // Clear, occasionally
                if key == 0 {
                    tracker.clear();
                }
            }
            _ => unreachable!(),
        }

        // Validate invariants after each operation
        tracker.debug_validate_invariants();

        // Check basic consistency
        if tracker.is_empty() {
            assert_eq!(tracker.len(), 0);
            assert_eq!(tracker.bucket_count(), 0);
            assert_eq!(tracker.max_key(), None);
            assert_eq!(tracker.min_key(), None);
        } else {
            assert!(tracker.bucket_count() <= tracker.len());
            assert!(tracker.min_count().unwrap() <= tracker.max_count().unwrap());
        }

        idx += 2;
    }
});
