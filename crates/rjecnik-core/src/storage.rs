use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{DictError, Result};

/// Pre-namespace layout: one JSON array for an implicit pair
pub const LEGACY_KEY: &str = "dictionary";
/// JSON object mapping pair key to an array of entries
pub const NAMESPACES_KEY: &str = "dictionaries";
pub const SELECTED_KEY: &str = "selectedPair";
pub const THEME_KEY: &str = "darkMode";

/// String key-value persistence
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Returns once the value is durable
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// One file per key inside a data directory.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so a crash never leaves a half-written value behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DictError::storage(key, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let write = || -> std::io::Result<()> {
            fs::create_dir_all(&self.root)?;
            let mut temp_file = NamedTempFile::new_in(&self.root)?;
            temp_file.write_all(value.as_bytes())?;
            temp_file.as_file().sync_all()?;
            temp_file.persist(self.path_for(key))?;
            Ok(())
        };

        write().map_err(|e| DictError::storage(key, e))?;
        tracing::debug!("Persisted '{}' ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DictError::storage(key, e)),
        }
    }
}
