// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
use crate::envelope::{Envelope, FollowEdge, ReplicationOp};
use crate::model::Post;

#[test]
fn test_envelope_wire_shape() {
    let edge = FollowEdge {
        follower_id: "bob".to_string(),
        target_user_id: "alice".to_string(),
    };
    let env = Envelope::new(ReplicationOp::Follow(edge), "1");

    let value = serde_json::to_value(&env).unwrap();
    // type/payload/source_server/timestamp/id are all siblings on the wire.
    assert_eq!(value["type"], "follow");
    assert_eq!(value["payload"]["follower_id"], "bob");
    assert_eq!(value["payload"]["target_user_id"], "alice");
    assert_eq!(value["source_server"], "1");
    assert!(value["timestamp"].is_u64());
    assert!(value["id"].is_string());
}

#[test]
fn test_envelope_round_trip_preserves_payload() {
    let post = Post::new("1", "alice", "hello", 42);
    let env = Envelope::new(ReplicationOp::Post(post.clone()), "1");

    let bytes = serde_json::to_vec(&env).unwrap();
    let decoded: Envelope = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(decoded.source_server, "1");
    assert_eq!(decoded.op.kind(), "post");
    match decoded.op {
        ReplicationOp::Post(p) => assert_eq!(p, post),
        other => panic!("unexpected op: {:?}", other),
    }
}

#[test]
fn test_envelope_ids_are_fresh_per_broadcast() {
    let post = Post::new("1", "alice", "hello", 42);
    let a = Envelope::new(ReplicationOp::Post(post.clone()), "1");
    let b = Envelope::new(ReplicationOp::Post(post), "1");
    assert_ne!(a.id, b.id);
}

#[test]
fn test_unknown_kind_is_rejected() {
    let raw = r#"{"type":"retract","payload":{},"source_server":"1","timestamp":1,"id":"x"}"#;
    assert!(serde_json::from_str::<Envelope>(raw).is_err());
}
