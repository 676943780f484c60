//! Wallet interface consumed by the session
//!
//! - `handle.rs` - Capability interface of a single wallet
//! - `registry.rs` - Discovery of available wallets
//! - `mock.rs` - In-process wallet for tests and demos

mod handle;
pub mod mock;
mod registry;

pub use handle::{
    ChangeHandler, ConnectOptions, Unsubscribe, WalletAccount, WalletEvent, WalletEventKind,
    WalletFeatures, WalletHandle,
};
pub use mock::{MockWallet, MockWalletFixture};
pub use registry::{StaticRegistry, WalletRegistry};
