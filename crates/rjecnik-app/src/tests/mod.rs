
use rjecnik_config::Config;
use rjecnik_core::{MemoryStore, Session};

fn memory_session() -> Session {
    Session::open(Box::new(MemoryStore::new()), &Config::default()).unwrap()
}
