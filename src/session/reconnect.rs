//! Silent reconnect to the wallet/account stored by a previous session

use std::sync::Arc;

use crate::storage::ConnectionStore;
use crate::wallet::{ConnectOptions, WalletHandle};

/// How the startup reconnect attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconnectOutcome {
    /// Nothing stored, nothing attempted
    NoStoredRecord,
    /// The stored wallet is not installed; record cleared
    WalletNotFound { wallet: String },
    /// The wallet refused the non-interactive connect; record cleared
    SilentConnectRejected { wallet: String, reason: String },
    /// The stored index/address no longer matches the live accounts; record cleared
    StaleAccountReference { wallet: String, account_index: u32 },
    /// Reconnected to the stored account
    Restored { wallet: String, account_index: u32 },
}

impl ReconnectOutcome {
    pub fn restored(&self) -> bool {
        matches!(self, Self::Restored { .. })
    }
}

pub struct AutoReconnect {
    store: ConnectionStore,
}

impl AutoReconnect {
    pub fn new(store: ConnectionStore) -> Self {
        Self { store }
    }

    /// Try to restore the stored connection against `wallets`
    ///
    /// Every failure path clears the stored record so the next session starts
    /// as if nothing had been saved.
    pub async fn resolve(&self, wallets: &[Arc<dyn WalletHandle>]) -> ReconnectOutcome {
        let Some(record) = self.store.load() else {
            log::debug!("No stored wallet connection");
            return ReconnectOutcome::NoStoredRecord;
        };

        let Some(wallet) = wallets.iter().find(|w| w.name() == record.wallet_name) else {
            log::warn!(
                "Stored wallet '{}' is not available, clearing stored connection",
                record.wallet_name
            );
            self.store.clear();
            return ReconnectOutcome::WalletNotFound {
                wallet: record.wallet_name,
            };
        };

        log::info!("Attempting silent reconnect to '{}'", record.wallet_name);
        if let Err(e) = wallet.connect(ConnectOptions::silent()).await {
            log::warn!(
                "Silent reconnect to '{}' failed: {}, clearing stored connection",
                record.wallet_name,
                e
            );
            self.store.clear();
            return ReconnectOutcome::SilentConnectRejected {
                wallet: record.wallet_name,
                reason: e.to_string(),
            };
        }

        let accounts = wallet.accounts();
        let matches = accounts
            .get(record.account_index as usize)
            .is_some_and(|account| account.address == record.account_address);
        if !matches {
            log::warn!(
                "Stored account #{} of '{}' is stale ({} live accounts), clearing stored connection",
                record.account_index,
                record.wallet_name,
                accounts.len()
            );
            self.store.clear();
            return ReconnectOutcome::StaleAccountReference {
                wallet: record.wallet_name,
                account_index: record.account_index,
            };
        }

        log::info!(
            "Restored '{}' account #{} ({})",
            record.wallet_name,
            record.account_index,
            record.account_address
        );
        ReconnectOutcome::Restored {
            wallet: record.wallet_name,
            account_index: record.account_index,
        }
    }
}
