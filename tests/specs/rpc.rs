//! Cross-crate specs wiring transactions into log event watches.

use crate::prelude::*;
use lookout_core::NodeListener;
use lookout_rpc::{RpcClient, RpcError, SignedTransaction};
use std::time::Duration;

#[test]
fn a_transactions_hash_drives_its_sealed_watch() {
    let (_dir, path) = temp_log();
    let listener = NodeListener::tail(&path);

    let transaction = SignedTransaction::new(vec![0xf8, 0x6b, 0x01], [0x5a; 32]).unwrap();
    let watch =
        listener.listen_for_transaction_sealed(transaction.hash(), Duration::from_secs(5));

    append(
        &path,
        &format!(
            "Transaction: {} was sealed into block #4",
            transaction.hash_hex()
        ),
    );

    let outcome = watch.get();
    assert!(outcome.observed());
    assert_eq!(
        outcome.observed_events(),
        [format!(
            "Transaction: {} was sealed into block",
            transaction.hash_hex()
        )]
    );
}

#[test]
fn an_unreachable_rpc_server_is_a_transport_error() {
    let client = RpcClient::new("127.0.0.1", 1);
    let transaction = SignedTransaction::new(vec![0x01], [0u8; 32]).unwrap();
    assert!(matches!(
        client.send_raw_transaction(&transaction),
        Err(RpcError::Transport(_))
    ));
}
