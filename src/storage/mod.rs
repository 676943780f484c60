//! Storage and persistence layer
//!
//! - Key-value backends (in-memory, file system)
//! - Persisted connection record
//! - Connection store over a single slot

mod backend;
mod connection;
mod file_system;
mod models;

pub use backend::{KeyValueStore, MemoryStore};
pub use connection::ConnectionStore;
pub use file_system::FileStore;
pub use models::StoredConnection;
