//! Error types for wallet session operations
//!
//! Storage failures never reach callers of the connection store; they are
//! logged and swallowed there. Wallet capability failures surface through
//! `SessionError` only for user-initiated actions.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Failure reported by a wallet capability (connect, disconnect, ...)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Wallet '{wallet}' does not support {feature}")]
    Unsupported {
        wallet: String,
        feature: &'static str,
    },
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Wallet not found: {0}")]
    WalletNotFound(String),

    #[error("Connect to '{wallet}' failed: {source}")]
    ConnectFailed {
        wallet: String,
        #[source]
        source: WalletError,
    },

    #[error("Disconnect from '{wallet}' failed: {source}")]
    DisconnectFailed {
        wallet: String,
        #[source]
        source: WalletError,
    },
}

impl WalletError {
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    pub fn unsupported(wallet: impl Into<String>, feature: &'static str) -> Self {
        Self::Unsupported {
            wallet: wallet.into(),
            feature,
        }
    }
}
