use std::path::PathBuf;

/// Startup configuration for one replica. Everything the node touches in
/// the outside world (broker, fan-out endpoints, on-disk paths) is injected
/// here; there is no runtime reconfiguration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub server_id: String,
    /// Routing fabric endpoint the node takes requests from.
    pub broker_addr: String,
    /// Fan-out endpoint notifications are published to.
    pub notify_pub_addr: String,
    /// Fan-out endpoint replication envelopes are published to.
    pub replication_pub_addr: String,
    /// Fan-out endpoint replication envelopes are received from.
    pub replication_sub_addr: String,
    pub data_path: PathBuf,
    pub audit_path: PathBuf,
}

impl NodeConfig {
    /// Config for a given replica id with the stock endpoint layout and
    /// per-replica file names.
    pub fn for_server(server_id: &str) -> Self {
        Self {
            server_id: server_id.to_string(),
            broker_addr: "127.0.0.1:5556".to_string(),
            notify_pub_addr: "127.0.0.1:5557".to_string(),
            replication_pub_addr: "127.0.0.1:6000".to_string(),
            replication_sub_addr: "127.0.0.1:6001".to_string(),
            data_path: PathBuf::from(format!("logs/server_{}_data.json", server_id)),
            audit_path: PathBuf::from(format!("logs/server_{}_log.txt", server_id)),
        }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::for_server("1")
    }
}
