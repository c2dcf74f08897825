use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::bridge::BridgeConfig;
use self::namespaces::NamespaceConfig;
use self::storage::StorageConfig;
use self::translator::TranslatorConfig;
use self::validation::ValidationConfig;

pub mod bridge;
pub mod namespaces;
pub mod storage;
pub mod translator;
pub mod validation;

fn default_log_filter() -> String {
    "info".to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub validation: ValidationConfig,
    pub namespaces: NamespaceConfig,
    pub translator: TranslatorConfig,
    pub bridge: BridgeConfig,

    /// Default `tracing` filter when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            validation: ValidationConfig::default(),
            namespaces: NamespaceConfig::default(),
            translator: TranslatorConfig::default(),
            bridge: BridgeConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Built-in defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Load a JSON config file; missing fields fall back to defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(dir) = env::var("RJECNIK_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }

        if let Ok(pair) = env::var("RJECNIK_DEFAULT_PAIR")
            && !pair.trim().is_empty()
        {
            self.namespaces.default_pair = pair.trim().to_string();
        }

        if let Ok(addr) = env::var("RJECNIK_BRIDGE_ADDR") {
            self.bridge.enabled = true;
            self.bridge.listen_addr = addr;
        }

        if let Ok(filter) = env::var("RJECNIK_LOG") {
            self.log_filter = filter;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "validation": {{ "require_translation": false }} }}"#).unwrap();

        let config = Config::load(file.path()).unwrap();

        assert!(!config.validation.require_translation);
        assert!(!config.validation.case_insensitive_duplicates);
        assert_eq!(config.translator.fallback_target, "bs");
        assert!(config.namespaces.known_pairs.iter().any(|p| p == "de-bs"));
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
