//! Selection Persistence Tests
//!
//! Drives user actions (connect, select, disconnect) through a
//! `WalletSession` and checks what ends up in the persisted slot and which
//! account the render data marks as preferred.
//!
//! Run with: cargo test --test selection_test -- --nocapture

mod common;

use std::sync::Arc;

use common::{authorized_wallet, init_logging, test_config, TestSession};
use wallet_session::{
    ConnectOptions, MockWallet, SessionConfig, SessionError, StoredConnection, WalletAction,
    WalletHandle,
};

#[tokio::test]
async fn test_fresh_connect_defaults_to_first_account() -> anyhow::Result<()> {
    init_logging();
    let wallet_x = Arc::new(MockWallet::with_addresses("X", &["0xa", "0xb", "0xc"]));
    let wallet_y = authorized_wallet("Y", &["0xy0", "0xy1"]);
    let env = TestSession::new(&[wallet_x, wallet_y]);
    env.seed(&StoredConnection::new("Y", "0xy1", 1));

    env.session.connect("X").await?;

    assert_eq!(env.stored(), Some(StoredConnection::new("X", "0xa", 0)));
    Ok(())
}

#[tokio::test]
async fn test_selection_overwrites_record() -> anyhow::Result<()> {
    init_logging();
    let wallet = Arc::new(MockWallet::with_addresses("X", &["0xa", "0xb", "0xc"]));
    let env = TestSession::new(&[wallet]);

    env.session.connect("X").await?;
    assert!(env.session.select_account("X", 2).await?);

    assert_eq!(env.stored(), Some(StoredConnection::new("X", "0xc", 2)));
    Ok(())
}

#[tokio::test]
async fn test_out_of_range_selection_is_ignored() -> anyhow::Result<()> {
    init_logging();
    let wallet = Arc::new(MockWallet::with_addresses("X", &["0xa", "0xb"]));
    let env = TestSession::new(&[wallet]);

    env.session.connect("X").await?;
    assert!(!env.session.select_account("X", 5).await?);

    assert_eq!(env.stored(), Some(StoredConnection::new("X", "0xa", 0)));
    Ok(())
}

#[tokio::test]
async fn test_selection_on_disconnected_wallet_is_ignored() -> anyhow::Result<()> {
    init_logging();
    let wallet = Arc::new(MockWallet::with_addresses("X", &["0xa"]));
    let env = TestSession::new(&[wallet]);

    assert!(!env.session.select_account("X", 0).await?);
    assert_eq!(env.stored(), None);
    Ok(())
}

#[tokio::test]
async fn test_unknown_wallet() {
    init_logging();
    let env = TestSession::new(&[]);

    let err = env.session.select_account("Ghost", 0).await.unwrap_err();
    assert!(matches!(err, SessionError::WalletNotFound(ref name) if name == "Ghost"));

    let err = env.session.connect("Ghost").await.unwrap_err();
    assert!(matches!(err, SessionError::WalletNotFound(_)));
}

#[tokio::test]
async fn test_disconnect_clears_record() -> anyhow::Result<()> {
    init_logging();
    let wallet = Arc::new(MockWallet::with_addresses("X", &["0xa", "0xb"]));
    let env = TestSession::new(&[wallet.clone()]);

    env.session.connect("X").await?;
    env.session.select_account("X", 1).await?;
    env.session.disconnect("X").await?;

    assert_eq!(env.stored(), None);
    assert!(env.session.views()[0].accounts.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_failed_disconnect_keeps_record() -> anyhow::Result<()> {
    init_logging();
    let wallet = Arc::new(MockWallet::with_addresses("X", &["0xa"]));
    let env = TestSession::new(&[wallet.clone()]);

    env.session.connect("X").await?;
    wallet.fail_disconnect(Some("wallet locked"));

    let err = env.session.disconnect("X").await.unwrap_err();
    assert!(matches!(err, SessionError::DisconnectFailed { .. }));
    assert_eq!(env.stored(), Some(StoredConnection::new("X", "0xa", 0)));
    Ok(())
}

#[tokio::test]
async fn test_failed_connect_leaves_store_untouched() {
    init_logging();
    let wallet = Arc::new(MockWallet::with_addresses("X", &["0xa"]));
    let env = TestSession::new(&[wallet.clone()]);
    let previous = StoredConnection::new("Y", "0xy", 0);
    env.seed(&previous);

    wallet.fail_connect(Some("user rejected the request"));
    let err = env.session.connect("X").await.unwrap_err();

    match err {
        SessionError::ConnectFailed { wallet, source } => {
            assert_eq!(wallet, "X");
            assert!(source.to_string().contains("user rejected"));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(env.stored(), Some(previous));
}

#[tokio::test]
async fn test_preferred_account_in_views() -> anyhow::Result<()> {
    init_logging();
    let wallet_x = Arc::new(MockWallet::with_addresses("X", &["0xa", "0xb", "0xc"]));
    let wallet_y = Arc::new(MockWallet::with_addresses("Y", &["0xy0", "0xy1"]));
    let env = TestSession::new(&[wallet_x, wallet_y.clone()]);

    env.session.connect("X").await?;
    env.session.select_account("X", 2).await?;
    // Connect Y behind the session's back so the record still names X
    wallet_y.connect(ConnectOptions::interactive()).await?;

    let views = env.session.views();
    let x = &views[0];
    assert!(x.connected);
    assert_eq!(x.action, WalletAction::Disconnect);
    assert_eq!(x.preferred_account().map(|a| a.index), Some(2));
    assert_eq!(x.preferred_account().map(|a| a.address.as_str()), Some("0xc"));

    // A record for X must not mark a default in Y
    let y = &views[1];
    assert!(y.connected);
    assert_eq!(y.accounts.len(), 2);
    assert_eq!(y.preferred_account(), None);
    Ok(())
}

#[tokio::test]
async fn test_first_account_preferred_without_record() -> anyhow::Result<()> {
    init_logging();
    let wallet = authorized_wallet("X", &["0xa", "0xb"]);
    let env = TestSession::new(&[wallet.clone()]);

    env.session.connect("X").await?;
    env.session.select_account("X", 1).await?;
    env.session.disconnect("X").await?;

    // Reconnect through the wallet itself, bypassing the session's write
    wallet.connect(ConnectOptions::interactive()).await?;

    let views = env.session.views();
    assert_eq!(views[0].preferred_account().map(|a| a.index), Some(0));
    assert_eq!(views[0].accounts.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_persistence_disabled() -> anyhow::Result<()> {
    init_logging();
    let wallet = Arc::new(MockWallet::with_addresses("X", &["0xa", "0xb"]));
    let config = SessionConfig {
        persist_selection: false,
        ..test_config()
    };
    let env = TestSession::with_config(&[wallet], config);

    env.session.connect("X").await?;
    // The account exists but nothing is written, so the choice is not reported as saved
    assert!(!env.session.select_account("X", 1).await?);

    assert_eq!(env.session.stored_connection(), None);
    assert!(env.backend.is_empty());
    assert_eq!(
        env.session.views()[0].preferred_account().map(|a| a.index),
        Some(0)
    );
    Ok(())
}
