//! Wallet session state machine
//!
//! - `manager.rs` - Orchestrator for refresh passes and user actions
//! - `reconnect.rs` - Silent reconnect to the stored connection
//! - `selection.rs` - Selection persistence and preferred-account resolution
//! - `subscriptions.rs` - Per-wallet unsubscribe handles
//! - `refresh.rs` - Change-event driven refresh loop
//! - `view.rs` - Render data

pub mod manager;
pub mod reconnect;
pub mod refresh;
pub mod selection;
pub mod subscriptions;
pub mod view;

pub use manager::{RefreshReport, WalletSession};
pub use reconnect::{AutoReconnect, ReconnectOutcome};
pub use refresh::{RefreshController, Renderer};
pub use selection::SelectionSync;
pub use subscriptions::SubscriptionRegistry;
pub use view::{AccountView, WalletAction, WalletView};
