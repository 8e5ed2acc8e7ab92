//! Engine-level specs: admission backpressure, shared-line resolution, and
//! source-loss semantics, driven through real log files.

use crate::prelude::*;
use lookout_core::{LogEvent, LogStream, NodeListener};
use std::fs;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[test]
fn one_line_resolves_two_independent_watches() {
    let (_dir, path) = temp_log();
    let listener = NodeListener::tail(&path);

    let sealed = listener.listen_for_line("was sealed into block", Duration::from_secs(5));
    let height = listener.listen_for_line("height=128", Duration::from_secs(5));

    append(
        &path,
        "Transaction: 00ff was sealed into block height=128",
    );

    // Neither watch steals the line from the other.
    assert!(sealed.get().observed());
    assert!(height.get().observed());
}

#[test]
fn admission_is_strictly_capacity_bounded() {
    let (_dir, path) = temp_log();
    let stream = Arc::new(LogStream::with_capacity(&path, 1));

    let _occupier = stream.pool().submit(
        LogEvent::literal("never-a"),
        Instant::now() + Duration::from_secs(10),
        Instant::now() + Duration::from_secs(10),
    );

    let started = Instant::now();
    let crowded_out = stream.pool().submit(
        LogEvent::literal("never-b"),
        Instant::now() + Duration::from_secs(10),
        Instant::now() + Duration::from_secs(1),
    );
    let waited = started.elapsed();

    assert!(crowded_out.is_none());
    assert!(waited >= Duration::from_millis(950));
    assert!(waited < Duration::from_secs(3), "waited {waited:?}");
    assert_eq!(stream.pool().pending_len(), 1);
}

#[test]
fn losing_the_source_rejects_every_pending_watch() {
    let (_dir, path) = temp_log();
    let listener = NodeListener::tail(&path);

    let watches = vec![
        listener.listen_for_line("first", Duration::from_secs(10)),
        listener.listen_for_line("second", Duration::from_secs(10)),
        listener.listen_for_line("third", Duration::from_secs(10)),
    ];
    assert_eq!(listener.pending_requests(), 3);

    // Give the tailer a moment to reach EOF, then delete the log.
    std::thread::sleep(Duration::from_millis(100));
    fs::remove_file(&path).unwrap();

    for watch in &watches {
        let outcome = watch.get();
        assert!(outcome.rejected());
        assert!(outcome.cause().unwrap().contains("removed"));
    }
    assert_eq!(listener.pending_requests(), 0);
}

#[test]
fn rotation_is_reported_as_the_rejection_cause() {
    let (_dir, path) = temp_log();
    append(&path, "content from the first incarnation of the log");
    let listener = NodeListener::tail(&path);

    let watch = listener.listen_for_line("never-appears", Duration::from_secs(10));
    std::thread::sleep(Duration::from_millis(150));

    // Truncating the file mimics rotation out from under the tailer.
    fs::write(&path, "").unwrap();

    let outcome = watch.get();
    assert!(outcome.rejected());
    assert!(outcome.cause().unwrap().contains("rotated"));
}

#[test]
fn engine_survives_source_loss_for_later_streams() {
    let (_dir, path) = temp_log();
    let listener = NodeListener::tail(&path);
    let doomed = listener.listen_for_line("x", Duration::from_secs(5));

    std::thread::sleep(Duration::from_millis(100));
    fs::remove_file(&path).unwrap();
    assert!(doomed.get().rejected());

    // A new stream over a recreated file is unaffected.
    fs::write(&path, "").unwrap();
    let fresh = NodeListener::tail(&path);
    let watch = fresh.listen_for_line("revived", Duration::from_secs(5));
    append(&path, "revived and well");
    assert!(watch.get().observed());
}
