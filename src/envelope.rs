// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
//! Replication envelopes.
//!
//! An envelope describes one committed local mutation and is broadcast to
//! every sibling replica on the `"replication"` topic. Envelopes exist only
//! in flight; they are never persisted.

use serde::{Deserialize, Serialize};

use crate::model::{new_id, now_ms, Post, PrivateMessage};

/// The topic every replication envelope is published under.
pub const REPLICATION_TOPIC: &str = "replication";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowEdge {
    pub follower_id: String,
    pub target_user_id: String,
}

/// One committed mutation, tagged by kind on the wire as
/// `{"type": "post" | "message" | "follow", "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ReplicationOp {
    Post(Post),
    Message(PrivateMessage),
    Follow(FollowEdge),
}

impl ReplicationOp {
    pub fn kind(&self) -> &'static str {
        match self {
            ReplicationOp::Post(_) => "post",
            ReplicationOp::Message(_) => "message",
            ReplicationOp::Follow(_) => "follow",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(flatten)]
    pub op: ReplicationOp,
    /// Replica the mutation was committed on. Used for self-echo
    /// suppression on the receiving side.
    pub source_server: String,
    /// Wall-clock send time (ms).
    pub timestamp: u64,
    /// Fresh id per broadcast, distinct from the payload entity id.
    pub id: String,
}

impl Envelope {
    pub fn new(op: ReplicationOp, source_server: &str) -> Self {
        Self {
            op,
            source_server: source_server.to_string(),
            timestamp: now_ms(),
            id: new_id(),
        }
    }
}
