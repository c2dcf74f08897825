use std::sync::Arc;

use rjecnik_config::Config;
use rjecnik_core::{DictError, FileStore, KeyValueStore, MemoryStore, Session};
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }
}

pub fn open_storage(config: &Config) -> Box<dyn KeyValueStore> {
    if config.storage.ephemeral {
        tracing::info!("Ephemeral storage, nothing is written to disk");
        Box::new(MemoryStore::new())
    } else {
        tracing::info!("Data directory: {}", config.storage.data_dir.display());
        Box::new(FileStore::new(config.storage.data_dir.clone()))
    }
}

pub fn open_session(config: &Config) -> anyhow::Result<Session> {
    let session = Session::open(open_storage(config), config)?;
    tracing::info!(
        "Opened '{}' with {} entries",
        session.selected_pair(),
        session.entries().len()
    );
    Ok(session)
}

/// Apply `--pair`. The switch holds even when it could not be saved; that
/// case comes back as a warning line instead of an error.
pub fn select_startup_pair(session: &mut Session, pair: &str) -> Result<Option<String>, DictError> {
    match session.select(pair) {
        Ok(()) => Ok(None),
        Err(e @ DictError::StorageUnavailable { .. }) => {
            tracing::warn!("{}", e);
            Ok(Some(format!("Language pair '{}' not saved: {e}", session.selected_pair())))
        }
        Err(e) => Err(e),
    }
}
