use std::io;
use std::sync::Arc;

use super::backend::KeyValueStore;
use super::models::StoredConnection;
use crate::config::SessionConfig;
use crate::error::StorageError;

/// Single-slot store for the selected wallet connection
///
/// Persistence is best effort: write and remove failures are logged and
/// swallowed. Anything unreadable or unparsable in the slot loads as
/// "no record" and is removed.
#[derive(Clone)]
pub struct ConnectionStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    enabled: bool,
}

impl ConnectionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            enabled: true,
        }
    }

    /// Store using the configured key; a no-op store when persistence is disabled
    pub fn from_config(backend: Arc<dyn KeyValueStore>, config: &SessionConfig) -> Self {
        Self {
            backend,
            key: config.storage_key.clone(),
            enabled: config.persist_selection,
        }
    }

    /// Store that never reads or writes its backend
    pub fn disabled(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            enabled: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Replace the slot with `record`; returns whether the backend was written
    pub fn save(&self, record: &StoredConnection) -> bool {
        if !self.enabled {
            return false;
        }
        let json = match serde_json::to_string(record) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize stored connection: {}", e);
                return false;
            }
        };
        match self.backend.set(&self.key, &json) {
            Ok(()) => {
                log::debug!(
                    "Saved connection {}#{} ({})",
                    record.wallet_name,
                    record.account_index,
                    record.account_address
                );
                true
            }
            Err(e) => {
                log::warn!("Failed to persist wallet connection: {}", e);
                false
            }
        }
    }

    /// Read the slot; empty, corrupt or mistyped content is `None`
    pub fn load(&self) -> Option<StoredConnection> {
        if !self.enabled {
            return None;
        }
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(StorageError::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
                log::warn!("Discarding unreadable stored connection: {}", e);
                self.clear();
                return None;
            }
            Err(e) => {
                log::warn!("Failed to read wallet connection slot: {}", e);
                return None;
            }
        };
        match StoredConnection::from_json(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Discarding invalid stored connection: {}", e);
                self.clear();
                None
            }
        }
    }

    /// Remove the slot; clearing an empty slot is fine
    pub fn clear(&self) {
        if !self.enabled {
            return;
        }
        if let Err(e) = self.backend.remove(&self.key) {
            log::warn!("Failed to clear wallet connection slot: {}", e);
        }
    }
}

impl std::fmt::Debug for ConnectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionStore")
            .field("key", &self.key)
            .field("enabled", &self.enabled)
            .finish()
    }
}
