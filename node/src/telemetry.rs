// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging. `RUST_LOG` overrides the default filter.
pub fn init_telemetry() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "ripple_node=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
