use serde::Serialize;

use crate::storage::StoredConnection;
use crate::wallet::{WalletFeatures, WalletHandle};

use super::selection::preferred_index;

/// Control offered next to a wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WalletAction {
    Connect,
    Disconnect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub index: u32,
    pub address: String,
    pub public_key: String,
    pub preferred: bool,
}

/// Render data for one wallet row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletView {
    pub name: String,
    pub connected: bool,
    pub action: WalletAction,
    pub features: WalletFeatures,
    pub accounts: Vec<AccountView>,
}

impl WalletView {
    pub fn build(wallet: &dyn WalletHandle, stored: Option<&StoredConnection>) -> Self {
        let accounts = wallet.accounts();
        let connected = !accounts.is_empty();
        let preferred = preferred_index(stored, wallet.name(), accounts.len());

        let accounts = accounts
            .into_iter()
            .zip(0u32..)
            .map(|(account, index)| AccountView {
                index,
                public_key: account.public_key_hex(),
                address: account.address,
                preferred: preferred == Some(index),
            })
            .collect();

        Self {
            name: wallet.name().to_string(),
            connected,
            action: if connected {
                WalletAction::Disconnect
            } else {
                WalletAction::Connect
            },
            features: wallet.features(),
            accounts,
        }
    }

    pub fn preferred_account(&self) -> Option<&AccountView> {
        self.accounts.iter().find(|a| a.preferred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::mock::MockWallet;
    use crate::wallet::ConnectOptions;

    #[test]
    fn test_disconnected_wallet_offers_connect() {
        let wallet = MockWallet::with_addresses("X", &["0xa", "0xb"]);
        let record = StoredConnection::new("X", "0xb", 1);

        let view = WalletView::build(&wallet, Some(&record));

        assert_eq!(view.name, "X");
        assert!(!view.connected);
        assert_eq!(view.action, WalletAction::Connect);
        assert!(view.accounts.is_empty());
        assert_eq!(view.preferred_account(), None);
    }

    #[tokio::test]
    async fn test_connected_wallet_marks_stored_account() {
        let wallet = MockWallet::with_addresses("X", &["0xa", "0xb"]);
        wallet.connect(ConnectOptions::interactive()).await.unwrap();
        let record = StoredConnection::new("X", "0xb", 1);

        let view = WalletView::build(&wallet, Some(&record));

        assert!(view.connected);
        assert_eq!(view.action, WalletAction::Disconnect);
        assert_eq!(view.accounts.len(), 2);
        assert!(!view.accounts[0].preferred);
        assert_eq!(view.accounts[1].public_key, hex::encode([1u8; 32]));
        assert_eq!(view.preferred_account().map(|a| a.address.as_str()), Some("0xb"));
    }
}
