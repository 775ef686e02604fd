// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
//! The replica state machine and its request loop.
//!
//! `FeedNode` owns the aggregate exclusively; the request loop and the
//! replication listener share it behind one `tokio::sync::Mutex` and each
//! takes the lock for a full unit of work, which is the entire mutual
//! exclusion story. A mutation is committed once it is applied in memory;
//! snapshot, notification and broadcast are best-effort downstream steps
//! that never roll it back and never fail the client-visible result.

use std::sync::Arc;

use ripple_core::envelope::{Envelope, FollowEdge, ReplicationOp};
use ripple_core::model::{now_ms, Post, PrivateMessage};
use ripple_core::state::FeedState;
use tokio::sync::Mutex;

use crate::api::{Reply, ReplyBody, Request};
use crate::audit::AuditLog;
use crate::config::NodeConfig;
use crate::errors::{NodeError, NodeResult};
use crate::notify::NotificationPublisher;
use crate::persistence::SnapshotStore;
use crate::replication::Replicator;
use crate::transport::{FanOutPublisher, RequestTransport, TransportError};

pub type SharedNode = Arc<Mutex<FeedNode>>;

pub struct FeedNode {
    server_id: String,
    state: FeedState,
    store: SnapshotStore,
    audit: AuditLog,
    notifier: NotificationPublisher,
    replicator: Replicator,
}

impl FeedNode {
    /// Build a node from config, reloading the persisted snapshot if one
    /// exists. A present-but-unreadable snapshot is a startup failure.
    pub fn new(
        cfg: &NodeConfig,
        notify_publisher: Arc<dyn FanOutPublisher>,
        replication_publisher: Arc<dyn FanOutPublisher>,
    ) -> NodeResult<Self> {
        let store = SnapshotStore::new(&cfg.data_path);
        let mut audit = AuditLog::open(&cfg.audit_path, &cfg.server_id)?;

        let state = match store.load()? {
            Some(state) => {
                tracing::info!(
                    posts = state.posts().len(),
                    messages = state.messages().len(),
                    "snapshot reloaded"
                );
                audit.record(&format!(
                    "Data loaded: {} posts, {} messages",
                    state.posts().len(),
                    state.messages().len()
                ));
                state
            }
            None => {
                audit.record("No existing data file. Starting fresh.");
                FeedState::new()
            }
        };

        Ok(Self {
            server_id: cfg.server_id.clone(),
            state,
            store,
            audit,
            notifier: NotificationPublisher::new(notify_publisher),
            replicator: Replicator::new(replication_publisher, &cfg.server_id),
        })
    }

    pub fn server_id(&self) -> &str {
        &self.server_id
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    /// Parse and execute one request. Always returns a reply; the unknown
    /// or malformed case is an error reply, never a dropped request.
    pub async fn handle_request(&mut self, raw: &str) -> Reply {
        match serde_json::from_str::<Request>(raw) {
            Ok(request) => self.dispatch(request).await,
            Err(e) => {
                tracing::warn!("unknown or malformed request: {}", e);
                Reply::error(&self.server_id, "Unknown request type")
            }
        }
    }

    async fn dispatch(&mut self, request: Request) -> Reply {
        match request {
            Request::CreatePost {
                user_id,
                content,
                client_timestamp,
            } => {
                let ts = client_timestamp.unwrap_or_else(now_ms);
                self.create_post(&user_id, &content, ts).await
            }
            Request::SendPrivateMessage {
                sender_id,
                receiver_id,
                content,
                client_timestamp,
            } => {
                let ts = client_timestamp.unwrap_or_else(now_ms);
                self.send_private_message(&sender_id, &receiver_id, &content, ts)
                    .await
            }
            Request::FollowUser {
                follower_id,
                target_user_id,
                client_timestamp: _,
            } => self.follow_user(&follower_id, &target_user_id).await,
            Request::GetFollowing { user_id } => {
                let following = self.state.following(&user_id);
                Reply::success(
                    &self.server_id,
                    format!("Following {} users", following.len()),
                    ReplyBody::Following { following },
                )
            }
            Request::GetAllPosts => {
                let posts = self.state.posts_newest_first();
                let replication_status = self.state.replication_status(&self.server_id);
                Reply::success(
                    &self.server_id,
                    format!("Found {} posts", posts.len()),
                    ReplyBody::Posts {
                        posts,
                        replication_status,
                    },
                )
            }
            Request::GetReplicationStatus => Reply::success(
                &self.server_id,
                "Replication status",
                ReplyBody::ReplicationStatus {
                    replication_status: self.state.replication_status(&self.server_id),
                },
            ),
        }
    }

    async fn create_post(&mut self, user_id: &str, content: &str, client_timestamp: u64) -> Reply {
        let post = Post::new(&self.server_id, user_id, content, client_timestamp);
        self.state.merge_post(post.clone());
        self.commit(&format!(
            "Post created: ID={}, User={}, ClientTime={}",
            post.id, post.user_id, post.client_timestamp
        ));

        let notified = self.notifier.post_created(&post).await;
        if let Err(e) = notified {
            self.downstream_failure("post notification", e);
        }
        let replicated = self.replicator.publish(ReplicationOp::Post(post.clone())).await;
        match replicated {
            Ok(envelope_id) => self
                .audit
                .record(&format!("Replicated post {} - Envelope ID: {}", post.id, envelope_id)),
            Err(e) => self.downstream_failure("post replication", e),
        }

        Reply::success(
            &self.server_id,
            "Post created successfully",
            ReplyBody::Post { post },
        )
    }

    async fn send_private_message(
        &mut self,
        sender_id: &str,
        receiver_id: &str,
        content: &str,
        client_timestamp: u64,
    ) -> Reply {
        let message =
            PrivateMessage::new(&self.server_id, sender_id, receiver_id, content, client_timestamp);
        self.state.merge_message(message.clone());
        self.commit(&format!(
            "Private message sent: ID={}, From={}, To={}",
            message.id, message.sender_id, message.receiver_id
        ));

        let notified = self.notifier.message_sent(&message).await;
        if let Err(e) = notified {
            self.downstream_failure("message notification", e);
        }
        let replicated = self
            .replicator
            .publish(ReplicationOp::Message(message.clone()))
            .await;
        match replicated {
            Ok(envelope_id) => self.audit.record(&format!(
                "Replicated message {} - Envelope ID: {}",
                message.id, envelope_id
            )),
            Err(e) => self.downstream_failure("message replication", e),
        }

        let reply_message = format!("Message sent to user {}", message.receiver_id);
        Reply::success(
            &self.server_id,
            reply_message,
            ReplyBody::Message {
                private_message: message,
            },
        )
    }

    async fn follow_user(&mut self, follower_id: &str, target_user_id: &str) -> Reply {
        let followed = self.state.follow(follower_id, target_user_id);
        if followed {
            self.commit(&format!(
                "Follow relationship: {} -> {}",
                follower_id, target_user_id
            ));
            let edge = FollowEdge {
                follower_id: follower_id.to_string(),
                target_user_id: target_user_id.to_string(),
            };
            let replicated = self.replicator.publish(ReplicationOp::Follow(edge)).await;
            if let Err(e) = replicated {
                self.downstream_failure("follow replication", e);
            }
        }

        let message = if followed {
            format!("Now following user {}", target_user_id)
        } else {
            format!("Already following user {}", target_user_id)
        };
        Reply::success(&self.server_id, message, ReplyBody::Followed { followed })
    }

    /// Merge one inbound envelope. Self-echoes are dropped; a merge that
    /// applied new state is persisted and audited. Returns whether new
    /// state was applied.
    pub fn apply_envelope(&mut self, envelope: Envelope) -> bool {
        if envelope.source_server == self.server_id {
            return false;
        }
        let kind = envelope.op.kind();
        let source = envelope.source_server.clone();
        let applied = self.state.apply_remote(envelope.op);
        if applied {
            self.commit(&format!("Replication received from Server {}: {}", source, kind));
            tracing::debug!(%source, kind, "merged replicated mutation");
        }
        applied
    }

    /// Persist after a mutation and write the audit line. A snapshot
    /// failure is logged and swallowed: in-memory state stays authoritative
    /// for the rest of the process lifetime.
    fn commit(&mut self, audit_message: &str) {
        if let Err(e) = self.store.save(&self.state, &self.server_id) {
            tracing::error!("snapshot write failed: {}", e);
            self.audit.record(&format!("ERROR: snapshot write failed: {}", e));
        }
        self.audit.record(audit_message);
    }

    fn downstream_failure(&mut self, what: &str, e: TransportError) {
        tracing::warn!("{} failed: {}", what, e);
        self.audit.record(&format!("ERROR: {} failed: {}", what, e));
    }
}

/// Strict alternation against the routing fabric: receive one request,
/// process it to completion, reply, repeat. Returns cleanly when the fabric
/// closes the connection.
pub async fn run_request_loop<T: RequestTransport>(
    node: SharedNode,
    mut transport: T,
) -> NodeResult<()> {
    loop {
        let raw = match transport.recv().await {
            Ok(raw) => raw,
            Err(TransportError::Closed) => return Ok(()),
            Err(e) => return Err(NodeError::Transport(e)),
        };
        let reply = {
            let mut node = node.lock().await;
            node.handle_request(&raw).await
        };
        transport.send(reply.to_json()).await?;
    }
}
