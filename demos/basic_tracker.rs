use freqtrack::tracker::FrequencyTracker;

fn main() {
    // Bucket creation and removal are logged at TRACE.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let mut tracker = FrequencyTracker::new();
    for word in "the cat saw the dog and the dog saw the cat".split_whitespace() {
        tracker.increment(word);
    }

    println!("max: {:?} ({:?})", tracker.max_key(), tracker.max_count());
    println!("min count: {:?}", tracker.min_count());

    tracker.decrement("and");
    println!("contains and? {}", tracker.contains("and"));
    println!("min count: {:?}", tracker.min_count());
}

// Expected output (log lines omitted):
// max: Some("the") (Some(4))
// min count: Some(1)
// contains and? false
// min count: Some(2)
//
// Explanation: "the" appears four times; "and" is the only word seen once, so
// removing it lifts the minimum to 2.
