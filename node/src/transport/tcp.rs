// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
//! Line-framed JSON over TCP.
//!
//! One JSON document per line. Fan-out frames are `<topic> <payload>`, and a
//! subscriber announces its prefix with a single `SUB <prefix>` line after
//! connecting. The proxies on the other end treat both as opaque lines.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_util::codec::{Framed, LinesCodec};

use super::{FanOutPublisher, FanOutSubscriber, RequestTransport, TransportError};

type LineFramed = Framed<TcpStream, LinesCodec>;

async fn connect(addr: &str) -> Result<LineFramed, TransportError> {
    let stream = TcpStream::connect(addr).await?;
    Ok(Framed::new(stream, LinesCodec::new()))
}

fn frame_err(e: tokio_util::codec::LinesCodecError) -> TransportError {
    TransportError::Frame(e.to_string())
}

/// REQ end of the routing fabric.
pub struct TcpRequestTransport {
    framed: LineFramed,
}

impl TcpRequestTransport {
    pub async fn connect(addr: &str) -> Result<Self, TransportError> {
        let framed = connect(addr).await?;
        tracing::info!(%addr, "connected to broker");
        Ok(Self { framed })
    }
}

#[async_trait]
impl RequestTransport for TcpRequestTransport {
    async fn recv(&mut self) -> Result<String, TransportError> {
        match self.framed.next().await {
            Some(line) => line.map_err(frame_err),
            None => Err(TransportError::Closed),
        }
    }

    async fn send(&mut self, reply: String) -> Result<(), TransportError> {
        self.framed.send(reply).await.map_err(frame_err)
    }
}

/// Publishing connection to a fan-out proxy. Shared across components, so
/// the framed stream sits behind a lock.
pub struct TcpPublisher {
    framed: Mutex<LineFramed>,
}

impl TcpPublisher {
    pub async fn connect(addr: &str) -> Result<Self, TransportError> {
        let framed = connect(addr).await?;
        tracing::info!(%addr, "connected to fan-out publisher");
        Ok(Self {
            framed: Mutex::new(framed),
        })
    }
}

#[async_trait]
impl FanOutPublisher for TcpPublisher {
    async fn publish(&self, topic: &str, payload: String) -> Result<(), TransportError> {
        let mut framed = self.framed.lock().await;
        framed
            .send(format!("{} {}", topic, payload))
            .await
            .map_err(frame_err)
    }
}

/// Subscribing connection to a fan-out proxy.
pub struct TcpSubscriber {
    framed: LineFramed,
    prefix: String,
}

impl TcpSubscriber {
    pub async fn connect(addr: &str, prefix: &str) -> Result<Self, TransportError> {
        let mut framed = connect(addr).await?;
        framed.send(format!("SUB {}", prefix)).await.map_err(frame_err)?;
        tracing::info!(%addr, %prefix, "subscribed to fan-out");
        Ok(Self {
            framed,
            prefix: prefix.to_string(),
        })
    }
}

#[async_trait]
impl FanOutSubscriber for TcpSubscriber {
    async fn next(&mut self) -> Option<(String, String)> {
        loop {
            let line = match self.framed.next().await {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    tracing::warn!("fan-out frame error: {}", e);
                    continue;
                }
                None => return None,
            };
            let Some((topic, payload)) = line.split_once(' ') else {
                tracing::warn!("dropping unframed fan-out line");
                continue;
            };
            if topic.starts_with(&self.prefix) {
                return Some((topic.to_string(), payload.to_string()));
            }
        }
    }
}
