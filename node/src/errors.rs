// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
use thiserror::Error;

use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("state error: {0}")]
    State(#[from] ripple_core::error::StateError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NodeResult<T> = Result<T, NodeError>;
