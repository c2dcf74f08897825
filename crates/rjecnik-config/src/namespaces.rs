use serde::{Deserialize, Serialize};

fn default_pair() -> String {
    "en-bs".to_string()
}

fn default_known_pairs() -> Vec<String> {
    ["en-bs", "de-bs", "fr-bs", "it-bs", "es-bs", "tr-bs"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NamespaceConfig {
    /// Pair selected on first start
    #[serde(default = "default_pair")]
    pub default_pair: String,
    /// Pairs offered by the selector even before they hold any entry
    #[serde(default = "default_known_pairs")]
    pub known_pairs: Vec<String>,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            default_pair: default_pair(),
            known_pairs: default_known_pairs(),
        }
    }
}
