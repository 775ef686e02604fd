// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
//! Notification publisher.
//!
//! Fire-and-forget events for external subscribers, independent of
//! replication. New posts go out on the author's id as topic; private
//! message alerts on `<receiver_id>:PM`.

use std::sync::Arc;

use ripple_core::model::{now_ms, Post, PrivateMessage};
use serde_json::json;

use crate::transport::{FanOutPublisher, TransportError};

pub struct NotificationPublisher {
    publisher: Arc<dyn FanOutPublisher>,
}

impl NotificationPublisher {
    pub fn new(publisher: Arc<dyn FanOutPublisher>) -> Self {
        Self { publisher }
    }

    pub async fn post_created(&self, post: &Post) -> Result<(), TransportError> {
        let payload = json!({
            "type": "new_post",
            "post": post,
            "server_timestamp": now_ms(),
        });
        self.publisher.publish(&post.user_id, payload.to_string()).await
    }

    pub async fn message_sent(&self, message: &PrivateMessage) -> Result<(), TransportError> {
        let topic = format!("{}:PM", message.receiver_id);
        let payload = json!({
            "type": "private_message",
            "sender_id": message.sender_id,
            "content": message.content,
            "created_at": message.created_at,
            "client_timestamp": message.client_timestamp,
            "server_timestamp": now_ms(),
        });
        self.publisher.publish(&topic, payload.to_string()).await
    }
}
