// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
//! Snapshot record codec.
//!
//! The durable store rewrites one JSON record holding the entire replica
//! state after every mutation. `ripple-node` owns the file I/O; this module
//! owns the record shape and the byte codec.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StateResult;
use crate::model::{Post, PrivateMessage};
use crate::state::FeedState;

#[derive(Debug, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub posts: Vec<Post>,
    #[serde(rename = "privateMessages")]
    pub private_messages: Vec<PrivateMessage>,
    pub followers: BTreeMap<String, Vec<String>>,
    pub server_id: String,
    /// ISO-8601 write time, informational only.
    pub last_updated: String,
}

pub fn encode_state(state: &FeedState, server_id: &str) -> StateResult<Vec<u8>> {
    let record = SnapshotRecord {
        posts: state.posts().to_vec(),
        private_messages: state.messages().to_vec(),
        followers: state.followers().clone(),
        server_id: server_id.to_string(),
        last_updated: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    Ok(serde_json::to_vec_pretty(&record)?)
}

pub fn decode_state(data: &[u8]) -> StateResult<FeedState> {
    let record: SnapshotRecord = serde_json::from_slice(data)?;
    Ok(FeedState::from_parts(
        record.posts,
        record.private_messages,
        record.followers,
    ))
}
