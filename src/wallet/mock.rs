//! In-process wallet used by tests and the demo binary
//!
//! Behaves like a browser wallet extension: accounts are only visible while
//! connected, a silent connect only succeeds once the wallet has been
//! authorized by an interactive connect, and every state change is announced
//! to subscribed listeners.

use futures::future::BoxFuture;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::handle::{
    ChangeHandler, ConnectOptions, Unsubscribe, WalletAccount, WalletEvent, WalletEventKind,
    WalletFeatures, WalletHandle,
};
use crate::error::WalletError;

#[derive(Default)]
struct MockState {
    accounts: Vec<WalletAccount>,
    connected: bool,
    authorized: bool,
    connect_failure: Option<String>,
    disconnect_failure: Option<String>,
    listeners: HashMap<u64, ChangeHandler>,
    next_listener_id: u64,
}

pub struct MockWallet {
    name: String,
    features: WalletFeatures,
    state: Arc<Mutex<MockState>>,
    connect_calls: AtomicUsize,
    silent_connect_calls: AtomicUsize,
}

impl MockWallet {
    pub fn new(name: impl Into<String>, accounts: Vec<WalletAccount>) -> Self {
        Self {
            name: name.into(),
            features: WalletFeatures::all(),
            state: Arc::new(Mutex::new(MockState {
                accounts,
                ..Default::default()
            })),
            connect_calls: AtomicUsize::new(0),
            silent_connect_calls: AtomicUsize::new(0),
        }
    }

    /// Wallet with accounts whose addresses are `addresses`
    pub fn with_addresses(name: impl Into<String>, addresses: &[&str]) -> Self {
        let accounts = addresses
            .iter()
            .enumerate()
            .map(|(i, address)| WalletAccount::new(*address, vec![i as u8; 32]))
            .collect();
        Self::new(name, accounts)
    }

    pub fn with_features(mut self, features: WalletFeatures) -> Self {
        self.features = features;
        self
    }

    /// Whether a silent connect is allowed without a prior interactive one
    pub fn authorized(self, authorized: bool) -> Self {
        self.lock().authorized = authorized;
        self
    }

    // ============================================================================
    // Test controls
    // ============================================================================

    /// Replace the account list and notify listeners
    pub fn set_accounts(&self, accounts: Vec<WalletAccount>) {
        self.lock().accounts = accounts;
        self.emit(WalletEventKind::AccountsChanged);
    }

    pub fn set_authorized(&self, authorized: bool) {
        self.lock().authorized = authorized;
    }

    /// Make every following connect fail with `reason` (`None` restores success)
    pub fn fail_connect(&self, reason: Option<&str>) {
        self.lock().connect_failure = reason.map(str::to_string);
    }

    pub fn fail_disconnect(&self, reason: Option<&str>) {
        self.lock().disconnect_failure = reason.map(str::to_string);
    }

    pub fn connect_calls(&self) -> usize {
        self.connect_calls.load(Ordering::SeqCst)
    }

    pub fn silent_connect_calls(&self) -> usize {
        self.silent_connect_calls.load(Ordering::SeqCst)
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Deliver a change event to every listener
    pub fn emit(&self, kind: WalletEventKind) {
        // Handlers run outside the lock so they may call back into the wallet.
        let listeners: Vec<ChangeHandler> = self.lock().listeners.values().cloned().collect();
        let event = WalletEvent {
            wallet: self.name.clone(),
            kind,
        };
        for listener in listeners {
            listener(event.clone());
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl WalletHandle for MockWallet {
    fn name(&self) -> &str {
        &self.name
    }

    fn accounts(&self) -> Vec<WalletAccount> {
        let state = self.lock();
        if state.connected {
            state.accounts.clone()
        } else {
            Vec::new()
        }
    }

    fn features(&self) -> WalletFeatures {
        self.features
    }

    fn connect(&self, options: ConnectOptions) -> BoxFuture<'_, Result<(), WalletError>> {
        Box::pin(async move {
            if !self.features.connect {
                return Err(WalletError::unsupported(&self.name, "standard:connect"));
            }
            self.connect_calls.fetch_add(1, Ordering::SeqCst);
            if options.silent {
                self.silent_connect_calls.fetch_add(1, Ordering::SeqCst);
            }
            {
                let mut state = self.lock();
                if let Some(reason) = &state.connect_failure {
                    return Err(WalletError::rejected(reason.clone()));
                }
                if options.silent && !state.authorized {
                    return Err(WalletError::rejected("wallet has not authorized this site"));
                }
                state.authorized = true;
                state.connected = true;
            }
            self.emit(WalletEventKind::AccountsChanged);
            Ok(())
        })
    }

    fn disconnect(&self) -> BoxFuture<'_, Result<(), WalletError>> {
        Box::pin(async move {
            if !self.features.disconnect {
                return Err(WalletError::unsupported(&self.name, "standard:disconnect"));
            }
            {
                let mut state = self.lock();
                if let Some(reason) = &state.disconnect_failure {
                    return Err(WalletError::rejected(reason.clone()));
                }
                state.connected = false;
            }
            self.emit(WalletEventKind::AccountsChanged);
            Ok(())
        })
    }

    fn subscribe(&self, handler: ChangeHandler) -> Option<Unsubscribe> {
        if !self.features.events {
            return None;
        }
        let id = {
            let mut state = self.lock();
            let id = state.next_listener_id;
            state.next_listener_id += 1;
            state.listeners.insert(id, handler);
            id
        };
        let state = Arc::clone(&self.state);
        Some(Box::new(move || {
            state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .listeners
                .remove(&id);
        }))
    }
}

/// JSON description of a mock wallet
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockWalletFixture {
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<WalletAccount>,
    #[serde(default)]
    pub authorized: bool,
    #[serde(default = "default_true")]
    pub events: bool,
}

fn default_true() -> bool {
    true
}

impl MockWalletFixture {
    pub fn into_wallet(self) -> MockWallet {
        let features = WalletFeatures {
            events: self.events,
            ..WalletFeatures::all()
        };
        MockWallet::new(self.name, self.accounts)
            .with_features(features)
            .authorized(self.authorized)
    }
}
