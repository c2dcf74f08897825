pub mod category;
pub mod codec;
pub mod error;
pub mod link;
pub mod query;
pub mod quickfill;
pub mod registry;
pub mod state;
pub mod storage;
pub mod store;
pub mod undo;

pub use error::DictError;
pub use registry::NamespaceRegistry;
pub use state::Session;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::EntryStore;
