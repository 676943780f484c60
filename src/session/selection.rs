//! Keeps the stored connection in step with user-driven selection changes

use crate::storage::{ConnectionStore, StoredConnection};
use crate::wallet::WalletHandle;

pub struct SelectionSync {
    store: ConnectionStore,
}

impl SelectionSync {
    pub fn new(store: ConnectionStore) -> Self {
        Self { store }
    }

    /// Record a fresh user-initiated connection; always selects the first account
    ///
    /// Returns whether the store was written. A wallet that exposes no
    /// accounts leaves the store untouched.
    pub fn on_connected(&self, wallet: &dyn WalletHandle) -> bool {
        let accounts = wallet.accounts();
        let Some(first) = accounts.first() else {
            log::warn!("'{}' connected without exposing any account", wallet.name());
            return false;
        };
        self.store
            .save(&StoredConnection::new(wallet.name(), first.address.clone(), 0))
    }

    /// Record an account switch; indices outside the live account list are ignored
    ///
    /// Returns whether the store was written, so a disabled store always yields `false`.
    pub fn select(&self, wallet: &dyn WalletHandle, index: u32) -> bool {
        let accounts = wallet.accounts();
        match accounts.get(index as usize) {
            Some(account) => {
                let written = self.store.save(&StoredConnection::new(
                    wallet.name(),
                    account.address.clone(),
                    index,
                ));
                log::info!(
                    "Selected '{}' account #{}{}",
                    wallet.name(),
                    index,
                    if written { "" } else { " (not persisted)" }
                );
                written
            }
            None => {
                log::debug!(
                    "Ignoring selection of account #{} on '{}' ({} accounts)",
                    index,
                    wallet.name(),
                    accounts.len()
                );
                false
            }
        }
    }

    pub fn on_disconnected(&self) {
        self.store.clear();
    }

    /// Account index to mark as preferred when rendering `wallet_name`
    ///
    /// A record for this wallet wins when its index is in range. Index 0 is
    /// the default only while nothing is stored at all, so a record for
    /// another wallet leaves this one without a preferred entry.
    pub fn preferred_index(&self, wallet_name: &str, account_count: usize) -> Option<u32> {
        preferred_index(self.store.load().as_ref(), wallet_name, account_count)
    }
}

pub(crate) fn preferred_index(
    stored: Option<&StoredConnection>,
    wallet_name: &str,
    account_count: usize,
) -> Option<u32> {
    match stored {
        Some(record) if record.is_for_wallet(wallet_name) => {
            ((record.account_index as usize) < account_count).then_some(record.account_index)
        }
        Some(_) => None,
        None => (account_count > 0).then_some(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_index_wins_for_same_wallet() {
        let record = StoredConnection::new("X", "0xc", 2);
        assert_eq!(preferred_index(Some(&record), "X", 3), Some(2));
    }

    #[test]
    fn test_stored_index_out_of_range_marks_nothing() {
        let record = StoredConnection::new("X", "0xc", 2);
        assert_eq!(preferred_index(Some(&record), "X", 2), None);
    }

    #[test]
    fn test_record_for_other_wallet_does_not_leak_default() {
        let record = StoredConnection::new("A", "0xa", 0);
        assert_eq!(preferred_index(Some(&record), "B", 3), None);
    }

    #[test]
    fn test_first_account_is_default_without_record() {
        assert_eq!(preferred_index(None, "X", 3), Some(0));
        assert_eq!(preferred_index(None, "X", 0), None);
    }
}
