// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
use crate::envelope::{FollowEdge, ReplicationOp};
use crate::model::{Post, PrivateMessage};
use crate::state::FeedState;

fn post(id: &str, server: &str, created_at: u64) -> Post {
    Post {
        id: id.to_string(),
        user_id: "alice".to_string(),
        content: format!("post {}", id),
        server_id: server.to_string(),
        created_at,
        client_timestamp: created_at,
    }
}

fn message(id: &str, server: &str) -> PrivateMessage {
    PrivateMessage {
        id: id.to_string(),
        sender_id: "alice".to_string(),
        receiver_id: "bob".to_string(),
        content: "hi".to_string(),
        server_id: server.to_string(),
        created_at: 100,
        client_timestamp: 90,
    }
}

#[test]
fn test_merge_post_deduplicates_by_id() {
    let mut state = FeedState::new();

    assert!(state.merge_post(post("p1", "1", 10)));
    assert!(!state.merge_post(post("p1", "2", 999)));
    assert_eq!(state.posts().len(), 1);
    // First write sticks; the duplicate is a no-op, not an overwrite.
    assert_eq!(state.posts()[0].server_id, "1");
}

#[test]
fn test_merge_message_deduplicates_by_id() {
    let mut state = FeedState::new();

    assert!(state.merge_message(message("m1", "1")));
    assert!(!state.merge_message(message("m1", "1")));
    assert_eq!(state.messages().len(), 1);
}

#[test]
fn test_follow_idempotence() {
    let mut state = FeedState::new();

    // First call creates the edge, second is a no-op.
    assert!(state.follow("bob", "alice"));
    assert!(!state.follow("bob", "alice"));

    let followers = state.followers().get("alice").unwrap();
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0], "bob");

    assert_eq!(state.following("bob"), vec!["alice".to_string()]);
    assert!(state.following("alice").is_empty());
}

#[test]
fn test_posts_newest_first() {
    let mut state = FeedState::new();
    state.merge_post(post("old", "1", 10));
    state.merge_post(post("new", "1", 30));
    state.merge_post(post("mid", "2", 20));

    let ordered = state.posts_newest_first();
    let ids: Vec<&str> = ordered.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["new", "mid", "old"]);

    // Insertion order is untouched.
    assert_eq!(state.posts()[0].id, "old");
}

#[test]
fn test_replication_status_attribution() {
    let mut state = FeedState::new();
    state.merge_post(post("p1", "1", 10));
    state.merge_post(post("p2", "2", 20));
    state.merge_post(post("p3", "2", 30));
    state.merge_message(message("m1", "1"));
    state.follow("bob", "alice");
    state.follow("carol", "alice");
    state.follow("alice", "bob");

    let status = state.replication_status("1");
    assert_eq!(status.server_id, "1");
    assert_eq!(status.posts_count, 3);
    assert_eq!(status.messages_count, 1);
    // Two distinct follow targets: alice and bob.
    assert_eq!(status.followers_count, 2);
    assert_eq!(status.posts_by_server.get("1"), Some(&1));
    assert_eq!(status.posts_by_server.get("2"), Some(&2));
    assert_eq!(status.messages_by_server.get("1"), Some(&1));
}

#[test]
fn test_apply_remote_is_idempotent() {
    let mut state = FeedState::new();
    let ops = vec![
        ReplicationOp::Post(post("p1", "2", 10)),
        ReplicationOp::Message(message("m1", "2")),
        ReplicationOp::Follow(FollowEdge {
            follower_id: "bob".to_string(),
            target_user_id: "alice".to_string(),
        }),
    ];

    for op in &ops {
        assert!(state.apply_remote(op.clone()));
    }
    // Second application of every op changes nothing.
    for op in &ops {
        assert!(!state.apply_remote(op.clone()));
    }

    assert_eq!(state.posts().len(), 1);
    assert_eq!(state.messages().len(), 1);
    assert_eq!(state.followers().get("alice").unwrap().len(), 1);
}

#[test]
fn test_convergence_under_permuted_delivery() {
    let ops = vec![
        ReplicationOp::Post(post("p1", "1", 10)),
        ReplicationOp::Post(post("p2", "2", 20)),
        ReplicationOp::Message(message("m1", "1")),
        ReplicationOp::Follow(FollowEdge {
            follower_id: "bob".to_string(),
            target_user_id: "alice".to_string(),
        }),
        ReplicationOp::Follow(FollowEdge {
            follower_id: "carol".to_string(),
            target_user_id: "alice".to_string(),
        }),
    ];

    // Node A: in order, with duplicates interleaved.
    let mut a = FeedState::new();
    for op in &ops {
        a.apply_remote(op.clone());
        a.apply_remote(op.clone());
    }

    // Node B: reversed delivery order.
    let mut b = FeedState::new();
    for op in ops.iter().rev() {
        b.apply_remote(op.clone());
    }

    let ids = |s: &FeedState| {
        let mut v: Vec<String> = s.posts().iter().map(|p| p.id.clone()).collect();
        v.sort();
        v
    };
    assert_eq!(ids(&a), ids(&b));
    assert_eq!(a.messages().len(), b.messages().len());

    let mut fa: Vec<&String> = a.followers().get("alice").unwrap().iter().collect();
    let mut fb: Vec<&String> = b.followers().get("alice").unwrap().iter().collect();
    fa.sort();
    fb.sort();
    assert_eq!(fa, fb);
}
