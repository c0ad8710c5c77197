use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::Node;

/// ClientConfig is the on-disk form of a client's connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    pub master_node: Node,

    /// Read replicas. Kept for completeness, requests always go to the master.
    #[serde(default)]
    pub read_replica_nodes: Vec<Node>,

    #[serde(default = "default_timeout_seconds")]
    pub connection_timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    2
}

impl ClientConfig {
    pub fn new(master_node: Node) -> Self {
        Self {
            master_node,
            read_replica_nodes: Vec::new(),
            connection_timeout_seconds: default_timeout_seconds(),
        }
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_applies_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"master_node": {{"host": "localhost", "port": 8108, "api_key": "secret"}}}}"#
        )
        .unwrap();

        let config = ClientConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.master_node.protocol, "http");
        assert_eq!(config.master_node.base_url(), "http://localhost:8108");
        assert!(config.read_replica_nodes.is_empty());
        assert_eq!(config.timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_load_with_replicas() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "master_node": {{"host": "master", "port": 8108, "protocol": "https", "api_key": "k"}},
                "read_replica_nodes": [
                    {{"host": "replica-1", "port": 8108, "api_key": "k"}},
                    {{"host": "replica-2", "port": 8108, "api_key": "k"}}
                ],
                "connection_timeout_seconds": 10
            }}"#
        )
        .unwrap();

        let config = ClientConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.read_replica_nodes.len(), 2);
        assert_eq!(config.read_replica_nodes[1].host, "replica-2");
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(ClientConfig::load("/nonexistent/typesense.json").is_err());
    }
}
