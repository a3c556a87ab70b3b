use std::time::Duration;

use postbox::{
    Message,
    relay::{MAX_DATAGRAM_SIZE, RelaySender},
    store::MessageStore,
};
use serde_json::{Value, json};
use tempfile::TempDir;

use crate::helpers::{send_raw, start_relay, wait_for_entries};

#[tokio::test]
async fn datagram_is_stored_under_new_timestamp() {
    let dir = TempDir::new().unwrap();
    let (relay_addr, store) = start_relay(dir.path()).await;

    send_raw(relay_addr, br#"{"username":"bob","message":"hi"}"#).await;

    let entries = wait_for_entries(&store, 1).await;
    let (timestamp, message) = entries.iter().next().unwrap();
    assert!(!timestamp.is_empty());
    assert_eq!(message, &json!({"username": "bob", "message": "hi"}));
}

#[tokio::test]
async fn prior_entries_are_preserved() {
    let dir = TempDir::new().unwrap();
    let seeded = json!({
        "2020-01-01 00:00:00.000000": {"username": "old", "message": "kept", "room": "lobby"},
        "2020-01-02 00:00:00.000000": "free text",
    });
    std::fs::write(dir.path().join("data.json"), seeded.to_string()).unwrap();
    let (relay_addr, store) = start_relay(dir.path()).await;

    send_raw(relay_addr, br#"{"username":"bob","message":"hi"}"#).await;

    let entries = wait_for_entries(&store, 3).await;
    for (key, value) in seeded.as_object().unwrap() {
        assert_eq!(&entries[key], value, "entry {key} changed");
    }
    assert!(
        entries
            .values()
            .any(|m| m == &json!({"username": "bob", "message": "hi"}))
    );
}

#[tokio::test]
async fn invalid_json_is_dropped_and_relay_keeps_running() {
    let dir = TempDir::new().unwrap();
    let (relay_addr, store) = start_relay(dir.path()).await;

    send_raw(relay_addr, b"not json").await;
    send_raw(relay_addr, &[0xff, 0xfe, 0xfd]).await;
    send_raw(relay_addr, b"[1, 2, 3]").await;
    send_raw(relay_addr, br#"{"username":"carol","message":"after"}"#).await;

    let entries = wait_for_entries(&store, 1).await;
    // Give any stray write a chance to land before checking the count.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let entries_after = store.load().await.unwrap();
    assert_eq!(entries, entries_after);
    assert_eq!(entries_after.len(), 1);
    assert!(
        entries_after
            .values()
            .all(|m| m == &json!({"username": "carol", "message": "after"}))
    );
}

#[tokio::test]
async fn oversized_datagram_is_truncated_and_dropped() {
    let dir = TempDir::new().unwrap();
    let (relay_addr, store) = start_relay(dir.path()).await;

    let big = Message::new("big", "x".repeat(MAX_DATAGRAM_SIZE * 2));
    send_raw(relay_addr, &big.to_datagram().unwrap()).await;
    send_raw(relay_addr, br#"{"username":"small","message":"fits"}"#).await;

    wait_for_entries(&store, 1).await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    let stored: Vec<Value> = store
        .load()
        .await
        .unwrap()
        .into_iter()
        .map(|(_, value)| value)
        .collect();
    assert_eq!(stored, vec![json!({"username": "small", "message": "fits"})]);
}

#[tokio::test]
async fn sender_delivers_to_relay() {
    let dir = TempDir::new().unwrap();
    let (relay_addr, store) = start_relay(dir.path()).await;

    let sender = RelaySender::bind(relay_addr).await.unwrap();
    let sent = sender.send(&Message::new("dave", "via sender")).await.unwrap();
    assert!(sent > 0);

    let entries = wait_for_entries(&store, 1).await;
    assert!(
        entries
            .values()
            .any(|m| m == &json!({"username": "dave", "message": "via sender"}))
    );
}
