use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::Config;
use crate::store::MemoryStore;

/// Shared account store handle
pub type SharedStore = Arc<RwLock<MemoryStore>>;

/// Server state handed to every handler
///
/// Cloning is cheap: the store sits behind an `Arc`. The lock is never held
/// across an await point.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub store: SharedStore,
}

impl ServerState {
    /// Build the state; the store is created once here and lives for the whole process
    pub fn initialize(config: &Config) -> Self {
        let store = if config.seed_demo_data {
            MemoryStore::with_demo_data()
        } else {
            MemoryStore::new()
        };
        tracing::info!(accounts = store.len(), "In-memory store ready");
        Self::with_store(config.clone(), store)
    }

    pub fn with_store(config: Config, store: MemoryStore) -> Self {
        Self {
            config,
            store: Arc::new(RwLock::new(store)),
        }
    }
}
