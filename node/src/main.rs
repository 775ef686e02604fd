// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
use std::sync::Arc;

use ripple_core::envelope::REPLICATION_TOPIC;
use ripple_node::config::NodeConfig;
use ripple_node::node::{run_request_loop, FeedNode, SharedNode};
use ripple_node::replication::run_replication_listener;
use ripple_node::telemetry;
use ripple_node::transport::tcp::{TcpPublisher, TcpRequestTransport, TcpSubscriber};
use tokio::sync::Mutex;

#[tokio::main]
async fn main() {
    telemetry::init_telemetry();

    // argv: [server_id] [broker_addr] [notify_pub_addr]
    let args: Vec<String> = std::env::args().collect();
    let server_id = args.get(1).cloned().unwrap_or_else(|| "1".to_string());
    let mut cfg = NodeConfig::for_server(&server_id);
    if let Some(addr) = args.get(2) {
        cfg.broker_addr = addr.clone();
    }
    if let Some(addr) = args.get(3) {
        cfg.notify_pub_addr = addr.clone();
    }

    tracing::info!(?cfg, "starting replica");

    // Startup connection failures are fatal: a replica that cannot reach
    // the fabric has nothing to do.
    let request_transport = TcpRequestTransport::connect(&cfg.broker_addr)
        .await
        .expect("failed to connect to broker");
    let notify_publisher = Arc::new(
        TcpPublisher::connect(&cfg.notify_pub_addr)
            .await
            .expect("failed to connect to notification fan-out"),
    );
    let replication_publisher = Arc::new(
        TcpPublisher::connect(&cfg.replication_pub_addr)
            .await
            .expect("failed to connect to replication publish endpoint"),
    );
    let replication_subscriber =
        TcpSubscriber::connect(&cfg.replication_sub_addr, REPLICATION_TOPIC)
            .await
            .expect("failed to subscribe to replication endpoint");

    let node = FeedNode::new(&cfg, notify_publisher, replication_publisher)
        .expect("failed to initialize replica state");
    let shared: SharedNode = Arc::new(Mutex::new(node));

    tokio::spawn(run_replication_listener(
        shared.clone(),
        replication_subscriber,
    ));

    tracing::info!(server_id = %cfg.server_id, "replica ready for requests");

    if let Err(e) = run_request_loop(shared, request_transport).await {
        tracing::error!("request loop failed: {}", e);
        std::process::exit(1);
    }
}
