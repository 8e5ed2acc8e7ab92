//! Node lifecycle specs against a stand-in kernel process.

use lookout_core::events;
use lookout_node::{LocalNode, NodeConfig};
use std::path::Path;
use std::time::Duration;

fn write_kernel_script(dir: &Path, body: &str) {
    let path = dir.join("kernel.sh");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
}

fn config_for(dir: &Path) -> NodeConfig {
    NodeConfig::new(dir)
        .with_startup_timeout(Duration::from_secs(5))
        .with_shutdown_timeout(Duration::from_secs(5))
}

#[test]
fn full_lifecycle_with_miner_and_heartbeat_watches() {
    let dir = tempfile::tempdir().unwrap();
    write_kernel_script(
        dir.path(),
        &format!(
            "echo \"{}\"\nsleep 1\necho \"{}\"\necho \"{}\"\nsleep 30",
            events::NODE_STARTED_MARKER,
            events::MINERS_STARTED_MARKER,
            events::HEARTBEAT_MARKER,
        ),
    );

    let mut node = LocalNode::new(config_for(dir.path()));
    node.start().unwrap();
    assert!(node.is_alive());

    let listener = node.listener().unwrap();
    let miners = listener.listen_for_miners_to_start(Duration::from_secs(5));
    let heartbeat = listener.listen_for_heartbeat(Duration::from_secs(5));

    assert!(miners.get().observed());
    assert!(heartbeat.get().observed());

    node.stop().unwrap();
    assert!(!node.is_alive());
}

#[test]
fn stopping_the_node_withdraws_outstanding_watches() {
    let dir = tempfile::tempdir().unwrap();
    write_kernel_script(
        dir.path(),
        &format!("echo \"{}\"\nsleep 30", events::NODE_STARTED_MARKER),
    );

    let mut node = LocalNode::new(config_for(dir.path()));
    node.start().unwrap();

    let listener = node.listener().unwrap();
    let orphan = listener.listen_for_line("never-appears", Duration::from_secs(60));

    node.stop().unwrap();

    let outcome = orphan.get();
    assert!(outcome.unobserved());
    assert!(!outcome.rejected());
    assert!(!outcome.expired());
}

#[test]
fn each_start_gets_a_fresh_log_and_the_old_one_is_archived() {
    let dir = tempfile::tempdir().unwrap();
    write_kernel_script(
        dir.path(),
        &format!("echo \"{}\"\nsleep 30", events::NODE_STARTED_MARKER),
    );

    let mut node = LocalNode::new(config_for(dir.path()));
    node.start().unwrap();
    node.stop().unwrap();

    std::thread::sleep(Duration::from_millis(1100));
    node.start().unwrap();
    node.stop().unwrap();

    let archive = dir.path().join("logs").join("archive");
    let archived: Vec<_> = std::fs::read_dir(&archive).unwrap().collect();
    // First run's out+err pair moved aside before the second run.
    assert_eq!(archived.len(), 2);
}
