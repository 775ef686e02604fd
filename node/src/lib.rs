// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
pub mod config;
pub mod errors;
pub mod api;
pub mod transport;
pub mod persistence;
pub mod audit;
pub mod notify;
pub mod replication;
pub mod node;
pub mod telemetry;
