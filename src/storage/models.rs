//! Data models for the persisted connection slot

use serde::de::Error as _;
use serde::{Deserialize, Serialize};

/// Last wallet/account pair the user picked
///
/// `account_index` is only a hint: the wallet's account list can change
/// between sessions, so the address at that index must be re-checked
/// before the record is trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredConnection {
    pub wallet_name: String,
    pub account_address: String,
    pub account_index: u32,
}

impl StoredConnection {
    pub fn new(
        wallet_name: impl Into<String>,
        account_address: impl Into<String>,
        account_index: u32,
    ) -> Self {
        Self {
            wallet_name: wallet_name.into(),
            account_address: account_address.into(),
            account_index,
        }
    }

    /// Parse a persisted record; only the JSON object layout is accepted
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom(
                "stored connection must be a JSON object",
            ));
        }
        serde_json::from_value(value)
    }

    pub fn is_for_wallet(&self, wallet_name: &str) -> bool {
        self.wallet_name == wallet_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_camel_case_fields() {
        let record = StoredConnection::new("Sui Wallet", "0xabc", 2);
        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["walletName"], "Sui Wallet");
        assert_eq!(json["accountAddress"], "0xabc");
        assert_eq!(json["accountIndex"], 2);
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_rejects_structurally_invalid_records() {
        let cases = [
            r#"{"walletName":"X","accountAddress":"0xabc"}"#,
            r#"{"walletName":"X","accountAddress":"0xabc","accountIndex":"0"}"#,
            r#"{"walletName":"X","accountAddress":"0xabc","accountIndex":-1}"#,
            r#"{"walletName":"X","accountAddress":"0xabc","accountIndex":1.5}"#,
            r#"{"walletName":7,"accountAddress":"0xabc","accountIndex":0}"#,
            r#"["X","0xabc",0]"#,
            r#"null"#,
            r#""X""#,
        ];
        for raw in cases {
            assert!(
                StoredConnection::from_json(raw).is_err(),
                "expected rejection for {}",
                raw
            );
        }
    }

    #[test]
    fn test_ignores_unknown_fields() {
        let raw = r#"{"walletName":"X","accountAddress":"0xabc","accountIndex":1,"extra":true}"#;
        let record = StoredConnection::from_json(raw).unwrap();
        assert_eq!(record, StoredConnection::new("X", "0xabc", 1));
    }
}
