// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
//! The replica aggregate.
//!
//! `FeedState` is owned exclusively by one node. Every mutator is an
//! idempotent merge keyed on entity id (posts, messages) or on the
//! (follower, target) pair, so applying the same replication envelope any
//! number of times, in any order relative to other distinct envelopes,
//! yields the same final sets on every replica.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::envelope::ReplicationOp;
use crate::model::{Post, PrivateMessage};

pub struct FeedState {
    posts: Vec<Post>,
    messages: Vec<PrivateMessage>,
    /// target id -> follower ids, insertion-ordered, logical set semantics.
    followers: BTreeMap<String, Vec<String>>,
}

/// Diagnostic view of how much state each origin replica contributed.
#[derive(Debug, Clone, Serialize)]
pub struct ReplicationStatus {
    pub server_id: String,
    pub posts_count: usize,
    pub messages_count: usize,
    /// Number of distinct users that have at least one follower.
    pub followers_count: usize,
    pub posts_by_server: BTreeMap<String, usize>,
    pub messages_by_server: BTreeMap<String, usize>,
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            posts: Vec::new(),
            messages: Vec::new(),
            followers: BTreeMap::new(),
        }
    }

    pub(crate) fn from_parts(
        posts: Vec<Post>,
        messages: Vec<PrivateMessage>,
        followers: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self { posts, messages, followers }
    }

    // --- Read APIs ---

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn messages(&self) -> &[PrivateMessage] {
        &self.messages
    }

    pub fn followers(&self) -> &BTreeMap<String, Vec<String>> {
        &self.followers
    }

    /// All posts ordered by server-assigned creation time, newest first.
    /// Insertion order breaks ties (stable sort).
    pub fn posts_newest_first(&self) -> Vec<Post> {
        let mut posts = self.posts.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }

    /// Every target the given user currently follows. Linear scan of the
    /// follower mapping.
    pub fn following(&self, user_id: &str) -> Vec<String> {
        self.followers
            .iter()
            .filter(|(_, followers)| followers.iter().any(|f| f == user_id))
            .map(|(target, _)| target.clone())
            .collect()
    }

    pub fn replication_status(&self, server_id: &str) -> ReplicationStatus {
        let mut posts_by_server: BTreeMap<String, usize> = BTreeMap::new();
        for post in &self.posts {
            *posts_by_server.entry(post.server_id.clone()).or_default() += 1;
        }
        let mut messages_by_server: BTreeMap<String, usize> = BTreeMap::new();
        for msg in &self.messages {
            *messages_by_server.entry(msg.server_id.clone()).or_default() += 1;
        }
        ReplicationStatus {
            server_id: server_id.to_string(),
            posts_count: self.posts.len(),
            messages_count: self.messages.len(),
            followers_count: self.followers.len(),
            posts_by_server,
            messages_by_server,
        }
    }

    // --- Write logic ---

    /// Append the post unless its id is already present. Returns whether the
    /// post was applied.
    pub fn merge_post(&mut self, post: Post) -> bool {
        if self.posts.iter().any(|p| p.id == post.id) {
            return false;
        }
        self.posts.push(post);
        true
    }

    /// Append the message unless its id is already present.
    pub fn merge_message(&mut self, message: PrivateMessage) -> bool {
        if self.messages.iter().any(|m| m.id == message.id) {
            return false;
        }
        self.messages.push(message);
        true
    }

    /// Idempotent insert of a follow edge. Returns `true` exactly when the
    /// edge did not exist before.
    pub fn follow(&mut self, follower_id: &str, target_id: &str) -> bool {
        let followers = self.followers.entry(target_id.to_string()).or_default();
        if followers.iter().any(|f| f == follower_id) {
            return false;
        }
        followers.push(follower_id.to_string());
        true
    }

    /// Merge one inbound replication operation. Self-echo filtering happens
    /// upstream; this always attempts the merge.
    pub fn apply_remote(&mut self, op: ReplicationOp) -> bool {
        match op {
            ReplicationOp::Post(post) => self.merge_post(post),
            ReplicationOp::Message(message) => self.merge_message(message),
            ReplicationOp::Follow(edge) => self.follow(&edge.follower_id, &edge.target_user_id),
        }
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}
