// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
//! Transport seams for the routing fabric and the fan-out proxies.
//!
//! The broker and the pub/sub proxies are external collaborators; the node
//! only ever sees these three contracts. `tcp` talks to real endpoints with
//! newline-framed JSON, `channel` wires nodes together in-process for tests.

use async_trait::async_trait;
use thiserror::Error;

pub mod channel;
pub mod tcp;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("framing error: {0}")]
    Frame(String),

    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("transport closed")]
    Closed,
}

/// The node's end of the routing fabric. The caller owns the strict
/// receive/process/reply alternation; implementations only move frames.
#[async_trait]
pub trait RequestTransport: Send {
    /// Block until the next client request arrives.
    async fn recv(&mut self) -> Result<String, TransportError>;

    /// Send the reply to the request most recently received.
    async fn send(&mut self, reply: String) -> Result<(), TransportError>;
}

/// Publishing end of a fan-out proxy. Fire-and-forget: delivery to any
/// particular subscriber is never confirmed.
#[async_trait]
pub trait FanOutPublisher: Send + Sync {
    async fn publish(&self, topic: &str, payload: String) -> Result<(), TransportError>;
}

/// Subscribing end of a fan-out proxy, filtered to one topic prefix.
#[async_trait]
pub trait FanOutSubscriber: Send {
    /// Next matching frame as `(topic, payload)`, or `None` once the
    /// transport has closed.
    async fn next(&mut self) -> Option<(String, String)>;
}
