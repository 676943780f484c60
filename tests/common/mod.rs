//! Shared test utilities for wallet session integration tests
//!
//! - Logger setup
//! - Session construction over an in-memory store
//! - Mock wallet helpers

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use wallet_session::{
    ConnectionStore, KeyValueStore, MemoryStore, MockWallet, RefreshController, SessionConfig,
    StaticRegistry, StoredConnection, WalletHandle, WalletSession,
};

pub const STORAGE_KEY: &str = "walletConnection";

pub fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

pub fn test_config() -> SessionConfig {
    SessionConfig {
        storage_key: STORAGE_KEY.to_string(),
        refresh_delay: Duration::from_millis(10),
        ..Default::default()
    }
}

/// Wallet with `addresses`, already authorized for silent connects
pub fn authorized_wallet(name: &str, addresses: &[&str]) -> Arc<MockWallet> {
    Arc::new(MockWallet::with_addresses(name, addresses).authorized(true))
}

pub fn handles(wallets: &[Arc<MockWallet>]) -> Vec<Arc<dyn WalletHandle>> {
    wallets
        .iter()
        .map(|w| Arc::clone(w) as Arc<dyn WalletHandle>)
        .collect()
}

pub fn connection_store(backend: &Arc<MemoryStore>) -> ConnectionStore {
    ConnectionStore::new(Arc::clone(backend) as Arc<dyn KeyValueStore>, STORAGE_KEY)
}

/// Session over a fresh in-memory store
pub struct TestSession {
    pub session: Arc<WalletSession>,
    pub controller: RefreshController,
    pub backend: Arc<MemoryStore>,
    pub registry: Arc<StaticRegistry>,
}

impl TestSession {
    pub fn new(wallets: &[Arc<MockWallet>]) -> Self {
        Self::with_config(wallets, test_config())
    }

    pub fn with_config(wallets: &[Arc<MockWallet>], config: SessionConfig) -> Self {
        let backend = Arc::new(MemoryStore::new());
        let registry = Arc::new(StaticRegistry::new(handles(wallets)));
        let (session, controller) = WalletSession::new(
            config,
            Arc::clone(&registry) as Arc<dyn wallet_session::WalletRegistry>,
            Arc::clone(&backend) as Arc<dyn KeyValueStore>,
        );
        Self {
            session,
            controller,
            backend,
            registry,
        }
    }

    /// Seed the persisted slot as a previous session would have left it
    pub fn seed(&self, record: &StoredConnection) {
        connection_store(&self.backend).save(record);
    }

    pub fn stored(&self) -> Option<StoredConnection> {
        connection_store(&self.backend).load()
    }
}
