// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
use crate::model::{Post, PrivateMessage};
use crate::snapshot::{decode_state, encode_state};
use crate::state::FeedState;

#[test]
fn test_snapshot_restart_fidelity() {
    let mut state = FeedState::new();
    state.merge_post(Post::new("1", "alice", "hello", 10));
    state.merge_post(Post::new("1", "bob", "world", 20));
    state.merge_message(PrivateMessage::new("1", "alice", "bob", "psst", 30));
    state.follow("bob", "alice");
    state.follow("carol", "alice");

    let bytes = encode_state(&state, "1").unwrap();
    let restored = decode_state(&bytes).unwrap();

    // Sequences and mapping come back identically, insertion order included.
    assert_eq!(restored.posts(), state.posts());
    assert_eq!(restored.messages(), state.messages());
    assert_eq!(restored.followers(), state.followers());
}

#[test]
fn test_snapshot_record_field_names() {
    let mut state = FeedState::new();
    state.merge_message(PrivateMessage::new("2", "alice", "bob", "psst", 30));

    let bytes = encode_state(&state, "2").unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert!(value["posts"].is_array());
    assert!(value["privateMessages"].is_array());
    assert!(value["followers"].is_object());
    assert_eq!(value["server_id"], "2");
    assert!(value["last_updated"].is_string());
}

#[test]
fn test_snapshot_decode_rejects_garbage() {
    assert!(decode_state(b"not json").is_err());
    assert!(decode_state(br#"{"posts": []}"#).is_err());
}
