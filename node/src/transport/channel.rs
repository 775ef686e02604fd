// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
//! In-memory transports over tokio channels.
//!
//! `FanOutHub` plays the role of a pub/sub proxy: every publisher feeds one
//! shared broadcast channel and every subscriber filters it by topic prefix.
//! Delivery has the same guarantees as the real proxy, which is to say none:
//! frames published while a subscriber lags or is absent are lost to it.

use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc};

use super::{FanOutPublisher, FanOutSubscriber, RequestTransport, TransportError};

/// Shared fan-out broker connecting in-process nodes.
#[derive(Clone)]
pub struct FanOutHub {
    tx: broadcast::Sender<(String, String)>,
}

impl FanOutHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(256);
        Self { tx }
    }

    pub fn publisher(&self) -> ChannelPublisher {
        ChannelPublisher {
            tx: self.tx.clone(),
        }
    }

    pub fn subscriber(&self, prefix: &str) -> ChannelSubscriber {
        ChannelSubscriber {
            rx: self.tx.subscribe(),
            prefix: prefix.to_string(),
        }
    }
}

impl Default for FanOutHub {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ChannelPublisher {
    tx: broadcast::Sender<(String, String)>,
}

#[async_trait]
impl FanOutPublisher for ChannelPublisher {
    async fn publish(&self, topic: &str, payload: String) -> Result<(), TransportError> {
        // No subscribers means the frame evaporates, same as the real proxy.
        let _ = self.tx.send((topic.to_string(), payload));
        Ok(())
    }
}

pub struct ChannelSubscriber {
    rx: broadcast::Receiver<(String, String)>,
    prefix: String,
}

#[async_trait]
impl FanOutSubscriber for ChannelSubscriber {
    async fn next(&mut self) -> Option<(String, String)> {
        loop {
            match self.rx.recv().await {
                Ok((topic, payload)) if topic.starts_with(&self.prefix) => {
                    return Some((topic, payload));
                }
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(lagged = n, "fan-out subscriber lagged, frames lost");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// Build a connected (client handle, node transport) pair for exercising the
/// request loop without a broker.
pub fn request_pair(buffer: usize) -> (RequestClient, ChannelRequestTransport) {
    let (req_tx, req_rx) = mpsc::channel(buffer);
    let (reply_tx, reply_rx) = mpsc::channel(buffer);
    (
        RequestClient {
            tx: req_tx,
            rx: reply_rx,
        },
        ChannelRequestTransport {
            rx: req_rx,
            tx: reply_tx,
        },
    )
}

/// Test client: one request in, one reply out.
pub struct RequestClient {
    tx: mpsc::Sender<String>,
    rx: mpsc::Receiver<String>,
}

impl RequestClient {
    pub async fn request(&mut self, body: impl Into<String>) -> Option<String> {
        self.tx.send(body.into()).await.ok()?;
        self.rx.recv().await
    }
}

pub struct ChannelRequestTransport {
    rx: mpsc::Receiver<String>,
    tx: mpsc::Sender<String>,
}

#[async_trait]
impl RequestTransport for ChannelRequestTransport {
    async fn recv(&mut self) -> Result<String, TransportError> {
        self.rx.recv().await.ok_or(TransportError::Closed)
    }

    async fn send(&mut self, reply: String) -> Result<(), TransportError> {
        self.tx
            .send(reply)
            .await
            .map_err(|_| TransportError::Closed)
    }
}
