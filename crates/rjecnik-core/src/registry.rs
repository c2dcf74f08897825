use std::collections::BTreeMap;

use rjecnik_config::namespaces::NamespaceConfig;
use rjecnik_config::validation::ValidationConfig;
use rjecnik_types::ImportReport;

use crate::codec;
use crate::error::{DictError, Result};
use crate::storage::{KeyValueStore, LEGACY_KEY, MemoryStore, NAMESPACES_KEY, SELECTED_KEY};
use crate::store::EntryStore;

static EMPTY_STORE: EntryStore = EntryStore::new();

/// Entry stores keyed by language pair, plus the selected pair.
///
/// Every mutation goes through [`NamespaceRegistry::mutate`], which writes
/// the whole map back to storage before returning.
pub struct NamespaceRegistry {
    storage: Box<dyn KeyValueStore>,
    stores: BTreeMap<String, EntryStore>,
    selected: String,
    default_pairs: Vec<String>,
    dirty: bool,
    memory_only: bool,
}

impl NamespaceRegistry {
    /// Load persisted stores and selection.
    ///
    /// A namespace map that does not parse is an error rather than an empty
    /// dictionary, so the next write cannot overwrite it. Storage that cannot
    /// be read at all is swapped for memory, leaving the stored data alone.
    pub fn open(storage: Box<dyn KeyValueStore>, config: &NamespaceConfig) -> Result<Self> {
        let (storage, stores, selected, memory_only) = match load(storage.as_ref()) {
            Ok((stores, selected)) => (storage, stores, selected, false),
            Err(e @ DictError::StorageUnavailable { .. }) => {
                tracing::warn!("Working in memory only, stored dictionaries unreadable: {}", e);
                let memory: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
                (memory, BTreeMap::new(), None, true)
            }
            Err(e) => return Err(e),
        };
        let selected = selected.unwrap_or_else(|| config.default_pair.clone());

        tracing::info!(
            "Opened {} namespace(s), selected '{}'",
            stores.len(),
            selected
        );

        let mut registry = Self {
            storage,
            stores,
            selected,
            default_pairs: config.known_pairs.clone(),
            dirty: false,
            memory_only,
        };
        registry.touch_selected();
        Ok(registry)
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Switch the active pair. No store is modified.
    pub fn select(&mut self, key: &str) -> Result<()> {
        let key = key.trim();
        if key.is_empty() {
            return Err(DictError::Validation("language pair must not be empty".into()));
        }
        if key == self.selected {
            return Ok(());
        }

        self.selected = key.to_string();
        self.touch_selected();
        tracing::info!("Selected language pair '{}'", key);
        self.storage.set(SELECTED_KEY, key)
    }

    pub fn active(&self) -> &EntryStore {
        self.store(&self.selected)
    }

    /// Store for `key`; unknown keys read as empty
    pub fn store(&self, key: &str) -> &EntryStore {
        self.stores.get(key).unwrap_or(&EMPTY_STORE)
    }

    /// Configured pairs first, then any other persisted pair
    pub fn known_namespaces(&self) -> Vec<String> {
        let mut known = self.default_pairs.clone();
        let mut extra: Vec<String> = self
            .stores
            .keys()
            .filter(|k| !known.contains(k))
            .cloned()
            .collect();
        extra.sort();
        known.extend(extra);
        known
    }

    pub fn mutate_active<T>(&mut self, f: impl FnOnce(&mut EntryStore) -> Result<T>) -> Result<T> {
        let key = self.selected.clone();
        self.mutate(&key, f)
    }

    /// Run `f` against the store for `key` and persist.
    ///
    /// When `f` fails nothing is written. When the write fails the change
    /// stays in memory, the registry is marked dirty and
    /// `StorageUnavailable` is returned.
    pub fn mutate<T>(&mut self, key: &str, f: impl FnOnce(&mut EntryStore) -> Result<T>) -> Result<T> {
        let store = self.stores.entry(key.to_string()).or_default();
        let value = f(store)?;
        self.persist()?;
        Ok(value)
    }

    /// Fold the pre-namespace list into the selected pair, then drop it.
    ///
    /// Returns `None` when there is nothing to migrate.
    pub fn migrate_legacy(&mut self, policy: &ValidationConfig) -> Result<Option<ImportReport>> {
        let Some(raw) = self.storage.get(LEGACY_KEY)? else {
            return Ok(None);
        };

        let candidates = codec::parse_json(&raw)?;
        let selected = self.selected.clone();
        let report = self.mutate(&selected, |store| Ok(store.merge(candidates, policy)))?;
        self.storage.remove(LEGACY_KEY)?;

        tracing::info!(
            "Migrated legacy dictionary into '{}': {} of {} entries added",
            selected,
            report.added,
            report.total
        );
        Ok(Some(report))
    }

    /// Retry a write that failed earlier
    pub fn flush(&mut self) -> Result<()> {
        if self.dirty {
            self.persist()?;
        }
        Ok(())
    }

    /// In-memory state is ahead of storage
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Storage could not be read at startup; nothing will reach the disk
    pub fn is_memory_only(&self) -> bool {
        self.memory_only
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    pub fn storage_mut(&mut self) -> &mut dyn KeyValueStore {
        self.storage.as_mut()
    }

    fn touch_selected(&mut self) {
        self.stores.entry(self.selected.clone()).or_default();
    }

    fn persist(&mut self) -> Result<()> {
        let raw = serde_json::to_string(&self.stores)
            .map_err(|e| DictError::Parse(format!("failed to encode dictionaries: {e}")))?;

        match self.storage.set(NAMESPACES_KEY, &raw) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Keeping changes in memory only: {}", e);
                self.dirty = true;
                Err(e)
            }
        }
    }
}

fn load(storage: &dyn KeyValueStore) -> Result<(BTreeMap<String, EntryStore>, Option<String>)> {
    let stores = match storage.get(NAMESPACES_KEY)? {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| DictError::Parse(format!("stored dictionaries are corrupt: {e}")))?,
        None => BTreeMap::new(),
    };

    let selected = storage
        .get(SELECTED_KEY)?
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Ok((stores, selected))
}
