//! Listener-facade specs: the scenarios test suites built on the harness
//! actually run.

use crate::prelude::*;
use lookout_core::{LogEvent, NodeListener};
use std::time::{Duration, Instant};

#[test]
fn observes_the_sealer_starting_line() {
    let (_dir, path) = temp_log();
    let listener = NodeListener::tail(&path);

    let watch = listener.listen_for_line("sealer starting", Duration::from_secs(120));
    append(&path, "2024 sealer starting mode=pow");

    let outcome = watch.get();
    assert!(outcome.observed());
    assert_eq!(outcome.observed_events(), ["sealer starting"]);
}

#[test]
fn expires_on_its_own_deadline_not_the_feed_duration() {
    let (_dir, path) = temp_log();
    let listener = NodeListener::tail(&path);

    let watch = listener.listen_for_line("never-appears", Duration::from_secs(2));

    // Keep feeding unrelated lines for ~3 seconds.
    let lines = (0..30).map(|i| format!("noise line {i}")).collect();
    let feeder = feed_lines(&path, lines, Duration::from_millis(100));

    let started = Instant::now();
    let outcome = watch.get();
    let waited = started.elapsed();
    feeder.join().unwrap();

    assert!(outcome.expired());
    assert!(waited >= Duration::from_millis(1900), "waited {waited:?}");
    assert!(waited < Duration::from_millis(2900), "waited {waited:?}");
}

#[test]
fn watches_a_transaction_through_to_sealing() {
    let (_dir, path) = temp_log();
    let listener = NodeListener::tail(&path);
    let hash = [0xab, 0xcd];

    let watch = listener.listen_for_transaction_sealed(&hash, Duration::from_secs(5));
    append(&path, "some earlier block activity");
    append(&path, "Transaction: abcd was sealed into block #91");

    let outcome = watch.get();
    assert!(outcome.observed());
    assert_eq!(
        outcome.observed_events(),
        ["Transaction: abcd was sealed into block"]
    );
    assert!(outcome.observed_at().is_some());
}

#[test]
fn processed_watch_resolves_on_either_marker() {
    let (_dir, path) = temp_log();
    let listener = NodeListener::tail(&path);
    let hash = [0x01, 0x02];

    let watch = listener.listen_for_transaction_processed(&hash, Duration::from_secs(5));
    append(&path, "Transaction: 0102 was rejected");

    let outcome = watch.get();
    assert!(outcome.observed());
    assert_eq!(outcome.observed_events().len(), 1);
}

#[test]
fn composite_and_watch_spans_many_lines() {
    let (_dir, path) = temp_log();
    let listener = NodeListener::tail(&path);

    let event = LogEvent::literal("miner online")
        .and(LogEvent::literal("p2p-status").or(LogEvent::literal("peer connected")));
    let watch = listener.listen_for_event(event, Duration::from_secs(5));

    append(&path, "12:00 peer connected 10.0.0.7");
    append(&path, "12:01 miner online, 4 threads");

    let outcome = watch.get();
    assert!(outcome.observed());
    assert_eq!(outcome.observed_events(), ["peer connected", "miner online"]);
}

#[test]
fn bounded_retrieval_leaves_the_watch_running() {
    let (_dir, path) = temp_log();
    let listener = NodeListener::tail(&path);

    let watch = listener.listen_for_line("slow to arrive", Duration::from_secs(10));

    let bounded = watch.get_timeout(Duration::from_millis(150));
    assert!(bounded.rejected());

    append(&path, "it was slow to arrive but it came");
    assert!(watch.get().observed());
}
