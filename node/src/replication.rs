// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
//! Replication engine: broadcast outbound, merge inbound.
//!
//! Best-effort by design. There is no acknowledgment, retry or catch-up:
//! an envelope published while a peer is disconnected is permanently lost
//! to that peer. Convergence relies on every merge being idempotent, not on
//! reliable delivery.

use std::sync::Arc;

use ripple_core::envelope::{Envelope, ReplicationOp, REPLICATION_TOPIC};

use crate::node::SharedNode;
use crate::transport::{FanOutPublisher, FanOutSubscriber, TransportError};

pub struct Replicator {
    publisher: Arc<dyn FanOutPublisher>,
    server_id: String,
}

impl Replicator {
    pub fn new(publisher: Arc<dyn FanOutPublisher>, server_id: &str) -> Self {
        Self {
            publisher,
            server_id: server_id.to_string(),
        }
    }

    /// Wrap the committed mutation in a fresh envelope and broadcast it.
    /// Returns the envelope id for the audit trail.
    pub async fn publish(&self, op: ReplicationOp) -> Result<String, TransportError> {
        let envelope = Envelope::new(op, &self.server_id);
        let frame = serde_json::to_string(&envelope)?;
        self.publisher.publish(REPLICATION_TOPIC, frame).await?;
        Ok(envelope.id)
    }
}

/// Consume inbound envelopes until the subscription closes. Each merge runs
/// to completion under the node lock before the next envelope is awaited.
pub async fn run_replication_listener<S: FanOutSubscriber>(node: SharedNode, mut subscriber: S) {
    while let Some((_topic, payload)) = subscriber.next().await {
        match serde_json::from_str::<Envelope>(&payload) {
            Ok(envelope) => {
                let mut node = node.lock().await;
                node.apply_envelope(envelope);
            }
            Err(e) => {
                tracing::warn!("dropping undecodable replication envelope: {}", e);
            }
        }
    }
    tracing::warn!("replication subscription closed");
}
