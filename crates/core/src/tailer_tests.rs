// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::SystemClock;
use crate::event::LogEvent;
use std::fs;
use std::io::Write;
use std::time::Instant;

fn append(path: &Path, text: &str) {
    let mut file = fs::OpenOptions::new().append(true).open(path).unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
}

fn watch(pool: &EventPool<SystemClock>, literal: &str) -> crate::future::EventFuture<SystemClock> {
    pool.submit(
        LogEvent::literal(literal),
        Instant::now() + Duration::from_secs(5),
        Instant::now() + Duration::from_secs(5),
    )
    .unwrap()
}

#[test]
fn delivers_appended_lines_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("node.log");
    fs::write(&path, "").unwrap();

    let pool = EventPool::new(SystemClock);
    let mut tailer = LogTailer::spawn(path.clone(), pool.clone()).unwrap();

    let future = watch(&pool, "hello");
    append(&path, "say hello world\n");

    let outcome = future.get();
    assert!(outcome.observed());
    assert_eq!(outcome.observed_events(), ["hello"]);
    tailer.stop();
}

#[test]
fn waits_for_the_file_to_appear() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("late.log");

    let pool = EventPool::new(SystemClock);
    let mut tailer = LogTailer::spawn(path.clone(), pool.clone()).unwrap();

    let future = watch(&pool, "finally");
    thread::sleep(Duration::from_millis(100));
    fs::write(&path, "finally here\n").unwrap();

    assert!(future.get().observed());
    tailer.stop();
}

#[test]
fn buffers_partially_written_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("node.log");
    fs::write(&path, "").unwrap();

    let pool = EventPool::new(SystemClock);
    let mut tailer = LogTailer::spawn(path.clone(), pool.clone()).unwrap();
    let future = watch(&pool, "partial done");

    append(&path, "par");
    thread::sleep(Duration::from_millis(100));
    append(&path, "tial done\n");

    assert!(future.get().observed());
    tailer.stop();
}

#[test]
fn removed_file_rejects_pending_watches() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("node.log");
    fs::write(&path, "preamble\n").unwrap();

    let pool = EventPool::new(SystemClock);
    let mut tailer = LogTailer::spawn(path.clone(), pool.clone()).unwrap();
    let future = watch(&pool, "never");

    thread::sleep(Duration::from_millis(100));
    fs::remove_file(&path).unwrap();

    let outcome = future.get();
    assert!(outcome.rejected());
    assert_eq!(outcome.cause(), Some("log file removed"));
    tailer.stop();
}

#[test]
fn truncation_is_reported_as_rotation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("node.log");
    fs::write(&path, "old contents before rotation\n").unwrap();

    let pool = EventPool::new(SystemClock);
    let mut tailer = LogTailer::spawn(path.clone(), pool.clone()).unwrap();
    let future = watch(&pool, "never");

    // Let the tailer drain the original contents first.
    thread::sleep(Duration::from_millis(150));
    fs::write(&path, "").unwrap();

    let outcome = future.get();
    assert!(outcome.rejected());
    assert_eq!(outcome.cause(), Some("log file rotated"));
    tailer.stop();
}

#[test]
fn rearms_on_a_recreated_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("node.log");
    fs::write(&path, "first incarnation\n").unwrap();

    let pool = EventPool::new(SystemClock);
    let mut tailer = LogTailer::spawn(path.clone(), pool.clone()).unwrap();
    let doomed = watch(&pool, "never");

    thread::sleep(Duration::from_millis(100));
    fs::remove_file(&path).unwrap();
    assert!(doomed.get().rejected());

    // The same tailer picks the file back up once it returns.
    fs::write(&path, "second incarnation\n").unwrap();
    let revived = watch(&pool, "second incarnation");
    assert!(revived.get().observed());
    tailer.stop();
}

#[test]
fn stop_is_idempotent_and_joins_the_thread() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("node.log");
    fs::write(&path, "").unwrap();

    let pool = EventPool::new(SystemClock);
    let mut tailer = LogTailer::spawn(path, pool).unwrap();
    tailer.stop();
    tailer.stop();
}
