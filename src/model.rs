// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
//! Feed entities.
//!
//! Posts and private messages are immutable once created: replicas never
//! update or delete them, only append. The `id` is the system-wide
//! deduplication key for replication merges.

use serde::{Deserialize, Serialize};

/// Generate a fresh entity id (UUID v4 rendered as a string).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Wall-clock milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub content: String,
    /// Replica that accepted the original client request.
    pub server_id: String,
    /// Server-assigned creation time (ms).
    pub created_at: u64,
    /// Creation time asserted by the client (ms).
    pub client_timestamp: u64,
}

impl Post {
    pub fn new(server_id: &str, user_id: &str, content: &str, client_timestamp: u64) -> Self {
        Self {
            id: new_id(),
            user_id: user_id.to_string(),
            content: content.to_string(),
            server_id: server_id.to_string(),
            created_at: now_ms(),
            client_timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateMessage {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub server_id: String,
    pub created_at: u64,
    pub client_timestamp: u64,
}

impl PrivateMessage {
    pub fn new(
        server_id: &str,
        sender_id: &str,
        receiver_id: &str,
        content: &str,
        client_timestamp: u64,
    ) -> Self {
        Self {
            id: new_id(),
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            content: content.to_string(),
            server_id: server_id.to_string(),
            created_at: now_ms(),
            client_timestamp,
        }
    }
}
