// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
//! Request/reply wire types.
//!
//! Requests form a closed union tagged by `type`; anything that fails to
//! parse is the "unknown kind" branch and gets an error reply, never a
//! dropped request. Replies always carry `status`, `message` and
//! `server_id`, plus the per-kind body flattened alongside.

use ripple_core::model::{Post, PrivateMessage};
use ripple_core::state::ReplicationStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    CreatePost {
        user_id: String,
        content: String,
        client_timestamp: Option<u64>,
    },
    FollowUser {
        follower_id: String,
        target_user_id: String,
        // Accepted on the wire, not stored: follow edges carry no timestamp.
        #[allow(dead_code)]
        client_timestamp: Option<u64>,
    },
    GetFollowing {
        user_id: String,
    },
    GetAllPosts,
    SendPrivateMessage {
        sender_id: String,
        receiver_id: String,
        content: String,
        client_timestamp: Option<u64>,
    },
    GetReplicationStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Per-kind reply payload, flattened into the reply object.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ReplyBody {
    Post {
        post: Post,
    },
    Followed {
        followed: bool,
    },
    Following {
        following: Vec<String>,
    },
    Posts {
        posts: Vec<Post>,
        replication_status: ReplicationStatus,
    },
    Message {
        private_message: PrivateMessage,
    },
    ReplicationStatus {
        replication_status: ReplicationStatus,
    },
}

#[derive(Debug, Serialize)]
pub struct Reply {
    pub status: Status,
    pub message: String,
    pub server_id: String,
    #[serde(flatten)]
    pub body: Option<ReplyBody>,
}

impl Reply {
    pub fn success(server_id: &str, message: impl Into<String>, body: ReplyBody) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            server_id: server_id.to_string(),
            body: Some(body),
        }
    }

    pub fn error(server_id: &str, message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            server_id: server_id.to_string(),
            body: None,
        }
    }

    /// Render the reply. Must never fail: the alternation channel deadlocks
    /// if a request goes unanswered, so encoding trouble degrades to a bare
    /// error reply instead.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::error!("reply encoding failed: {}", e);
            format!(
                "{{\"status\":\"error\",\"message\":\"reply encoding failed\",\"server_id\":\"{}\"}}",
                self.server_id
            )
        })
    }
}
