use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::WalletError;

/// Account exposed by a connected wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAccount {
    pub address: String,
    #[serde(with = "hex_bytes")]
    pub public_key: Vec<u8>,
}

impl WalletAccount {
    pub fn new(address: impl Into<String>, public_key: impl Into<Vec<u8>>) -> Self {
        Self {
            address: address.into(),
            public_key: public_key.into(),
        }
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(&self.public_key)
    }
}

/// Options for the connect capability
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Reconnect without prompting, or fail fast
    pub silent: bool,
}

impl ConnectOptions {
    pub fn interactive() -> Self {
        Self { silent: false }
    }

    pub fn silent() -> Self {
        Self { silent: true }
    }
}

/// Standard capabilities a wallet may expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletFeatures {
    pub connect: bool,
    pub disconnect: bool,
    pub events: bool,
}

impl WalletFeatures {
    pub fn all() -> Self {
        Self {
            connect: true,
            disconnect: true,
            events: true,
        }
    }
}

impl Default for WalletFeatures {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletEventKind {
    AccountsChanged,
    ChainsChanged,
    FeaturesChanged,
}

/// Change notification emitted by a wallet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletEvent {
    pub wallet: String,
    pub kind: WalletEventKind,
}

pub type ChangeHandler = Arc<dyn Fn(WalletEvent) + Send + Sync>;

/// Cancels a subscription when invoked
pub type Unsubscribe = Box<dyn FnOnce() + Send>;

/// Capability interface of an installed wallet
///
/// The session only reads `name`/`accounts` and invokes capabilities; it
/// never mutates a handle. `accounts` is empty while disconnected.
pub trait WalletHandle: Send + Sync {
    fn name(&self) -> &str;

    fn accounts(&self) -> Vec<WalletAccount>;

    fn features(&self) -> WalletFeatures;

    fn connect(&self, options: ConnectOptions) -> BoxFuture<'_, Result<(), WalletError>>;

    fn disconnect(&self) -> BoxFuture<'_, Result<(), WalletError>>;

    /// Register `handler` for change events; `None` when the wallet has no events capability
    fn subscribe(&self, handler: ChangeHandler) -> Option<Unsubscribe>;

    fn is_connected(&self) -> bool {
        !self.accounts().is_empty()
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let trimmed = raw.strip_prefix("0x").unwrap_or(&raw);
        hex::decode(trimmed).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_public_key_as_hex() {
        let account: WalletAccount =
            serde_json::from_str(r#"{"address":"0xabc","publicKey":"0x00ff10"}"#).unwrap();
        assert_eq!(account.public_key, vec![0x00, 0xff, 0x10]);
        assert_eq!(account.public_key_hex(), "00ff10");

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["publicKey"], "00ff10");
    }

    #[test]
    fn test_bad_public_key_hex_is_rejected() {
        let result = serde_json::from_str::<WalletAccount>(r#"{"address":"0xabc","publicKey":"zz"}"#);
        assert!(result.is_err());
    }
}
