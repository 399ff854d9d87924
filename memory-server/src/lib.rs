//! In-memory user service
//!
//! Accounts live in process memory and follow the Person → User →
//! Administrator hierarchy from `shared::models`.
//!
//! ```text
//! memory-server/src/
//! ├── core/     # config, state, server, startup errors
//! ├── api/      # HTTP routes and handlers
//! ├── store.rs  # ordered in-memory account store
//! └── utils/    # logging
//! ```

pub mod api;
pub mod core;
pub mod store;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use store::{AccountChanges, MemoryStore, StoreError};
pub use utils::init_logger;
