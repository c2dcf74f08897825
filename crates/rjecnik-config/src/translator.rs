use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://translate.google.com/".to_string()
}

fn default_target() -> String {
    "bs".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Used when the selected pair has no target half
    #[serde(default = "default_target")]
    pub fallback_target: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            fallback_target: default_target(),
        }
    }
}
