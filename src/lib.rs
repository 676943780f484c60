//! Wallet Session: connection persistence for standard wallets
//!
//! Discovers wallets through a registry, derives their connection state as
//! render data, and lets a caller connect, disconnect and pick an account.
//! The picked `{wallet, account, index}` is persisted in a single key-value
//! slot and silently restored on the next session.
//!
//! # Architecture
//!
//! - **Connection Store**: single persisted record over an injected backend
//! - **Auto-Reconnect**: startup silent connect, validated against the stored account
//! - **Selection Sync**: writes user selections, resolves the preferred account
//! - **Refresh Controller**: change subscriptions and delayed full refreshes
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use wallet_session::{
//!     MemoryStore, MockWallet, SessionConfig, StaticRegistry, WalletHandle, WalletSession,
//! };
//!
//! # async fn example() -> wallet_session::Result<()> {
//! let wallet: Arc<dyn WalletHandle> = Arc::new(MockWallet::with_addresses("Sui Wallet", &["0xabc"]));
//! let registry = Arc::new(StaticRegistry::new(vec![wallet]));
//! let (session, _controller) =
//!     WalletSession::new(SessionConfig::default(), registry, Arc::new(MemoryStore::new()));
//!
//! session.initialize().await;
//! session.connect("Sui Wallet").await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod session;
pub mod storage;
pub mod wallet;

pub use config::SessionConfig;
pub use error::{SessionError, StorageError, WalletError};
pub use session::{
    AccountView, AutoReconnect, ReconnectOutcome, RefreshController, RefreshReport, Renderer,
    SelectionSync, SubscriptionRegistry, WalletAction, WalletSession, WalletView,
};
pub use storage::{ConnectionStore, FileStore, KeyValueStore, MemoryStore, StoredConnection};
pub use wallet::{
    ConnectOptions, MockWallet, MockWalletFixture, StaticRegistry, WalletAccount, WalletEvent,
    WalletEventKind, WalletFeatures, WalletHandle, WalletRegistry,
};

// Common result type
pub type Result<T> = std::result::Result<T, SessionError>;
