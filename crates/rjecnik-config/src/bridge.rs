use serde::{Deserialize, Serialize};

fn default_listen_addr() -> String {
    "127.0.0.1:8765".to_string()
}

/// Local WebSocket bridge used by the bookmarklet page
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct BridgeConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            listen_addr: default_listen_addr(),
        }
    }
}
