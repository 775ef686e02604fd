// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
//! ripple-core: the pure replicated state machine of a social-feed replica.
//!
//! This crate owns the entities, the idempotent merge rules and the snapshot
//! record format that make replicas converge. Transports, durable storage
//! and telemetry live in `ripple-node`.

pub mod error;
pub mod model;
pub mod state;
pub mod envelope;
pub mod snapshot;

#[cfg(test)]
pub mod tests;
