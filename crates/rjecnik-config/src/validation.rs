use serde::{Deserialize, Serialize};

fn default_require_translation() -> bool {
    true
}

/// Rules applied on the insert paths of an entry store
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ValidationConfig {
    /// Reject manual adds with an empty translation
    #[serde(default = "default_require_translation")]
    pub require_translation: bool,
    /// Compare `(word, translation)` ignoring case when looking for duplicates
    #[serde(default)]
    pub case_insensitive_duplicates: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            require_translation: default_require_translation(),
            case_insensitive_duplicates: false,
        }
    }
}
