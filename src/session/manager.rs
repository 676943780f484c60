//! Wallet Session - Orchestration Layer
//!
//! Coordinates discovery, the startup reconnect, selection persistence and
//! change subscriptions by delegating to the specialized session modules.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

use super::reconnect::{AutoReconnect, ReconnectOutcome};
use super::refresh::RefreshController;
use super::selection::SelectionSync;
use super::subscriptions::SubscriptionRegistry;
use super::view::WalletView;
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::storage::{ConnectionStore, KeyValueStore, StoredConnection};
use crate::wallet::{ChangeHandler, ConnectOptions, WalletEvent, WalletHandle, WalletRegistry};
use crate::Result;

/// Result of one refresh pass
#[derive(Debug, Clone)]
pub struct RefreshReport {
    /// Outcome of the startup reconnect; only set on the initial pass
    pub reconnect: Option<ReconnectOutcome>,
    pub views: Vec<WalletView>,
}

pub struct WalletSession {
    config: SessionConfig,
    registry: Arc<dyn WalletRegistry>,
    store: ConnectionStore,
    reconnect: AutoReconnect,
    selection: SelectionSync,
    subscriptions: Mutex<SubscriptionRegistry>,
    events: mpsc::UnboundedSender<WalletEvent>,
    initialized: AtomicBool,
}

impl WalletSession {
    // ============================================================================
    // Constructor
    // ============================================================================

    /// Create a session and the controller that turns wallet change events into refreshes
    pub fn new(
        config: SessionConfig,
        registry: Arc<dyn WalletRegistry>,
        backend: Arc<dyn KeyValueStore>,
    ) -> (Arc<Self>, RefreshController) {
        let store = ConnectionStore::from_config(backend, &config);
        let (events, receiver) = mpsc::unbounded_channel();
        let delay = config.refresh_delay;

        let session = Arc::new(Self {
            config,
            registry,
            reconnect: AutoReconnect::new(store.clone()),
            selection: SelectionSync::new(store.clone()),
            store,
            subscriptions: Mutex::new(SubscriptionRegistry::new()),
            events,
            initialized: AtomicBool::new(false),
        });
        let controller = RefreshController::new(Arc::downgrade(&session), receiver, delay);
        (session, controller)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ============================================================================
    // Refresh cycle
    // ============================================================================

    /// Initial pass: silent reconnect, then subscribe and build views
    ///
    /// The reconnect runs once per session; later calls behave like `refresh`.
    pub async fn initialize(&self) -> RefreshReport {
        if self.initialized.swap(true, Ordering::SeqCst) {
            log::debug!("Session already initialized, running a plain refresh");
            return self.refresh().await;
        }
        log::info!("Initializing wallet session");
        self.run_pass(true).await
    }

    /// Re-read the wallet list, resubscribe and rebuild views
    pub async fn refresh(&self) -> RefreshReport {
        self.run_pass(false).await
    }

    async fn run_pass(&self, initial: bool) -> RefreshReport {
        let wallets = self.registry.list();
        log::debug!("Refresh pass over {} wallet(s)", wallets.len());

        let reconnect = if initial {
            Some(self.reconnect.resolve(&wallets).await)
        } else {
            None
        };

        self.resubscribe(&wallets);

        RefreshReport {
            reconnect,
            views: self.build_views(&wallets),
        }
    }

    fn resubscribe(&self, wallets: &[Arc<dyn WalletHandle>]) {
        let mut subscriptions = self.lock_subscriptions();
        let cancelled = subscriptions.cancel_all();

        for wallet in wallets {
            if !wallet.features().events {
                continue;
            }
            let sender = self.events.clone();
            let handler: ChangeHandler = Arc::new(move |event: WalletEvent| {
                if sender.send(event).is_err() {
                    log::trace!("Refresh controller gone, dropping change event");
                }
            });
            if let Some(unsubscribe) = wallet.subscribe(handler) {
                subscriptions.insert(wallet.name(), unsubscribe);
            }
        }

        log::debug!(
            "Subscriptions replaced: {} cancelled, {} active",
            cancelled,
            subscriptions.len()
        );
    }

    fn build_views(&self, wallets: &[Arc<dyn WalletHandle>]) -> Vec<WalletView> {
        let stored = self.store.load();
        wallets
            .iter()
            .map(|wallet| WalletView::build(wallet.as_ref(), stored.as_ref()))
            .collect()
    }

    /// Current render data without touching subscriptions
    pub fn views(&self) -> Vec<WalletView> {
        self.build_views(&self.registry.list())
    }

    // ============================================================================
    // User actions
    // ============================================================================

    /// Interactive connect; selects the wallet's first account on success
    pub async fn connect(&self, wallet_name: &str) -> Result<()> {
        let wallet = self.find_wallet(wallet_name)?;
        if let Err(e) = wallet.connect(ConnectOptions::interactive()).await {
            log::error!("Connect to '{}' failed: {}", wallet_name, e);
            return Err(SessionError::ConnectFailed {
                wallet: wallet_name.to_string(),
                source: e,
            });
        }
        log::info!("Connected to '{}'", wallet_name);
        self.selection.on_connected(wallet.as_ref());
        Ok(())
    }

    /// Disconnect and forget the stored selection; a failed disconnect keeps it
    pub async fn disconnect(&self, wallet_name: &str) -> Result<()> {
        let wallet = self.find_wallet(wallet_name)?;
        if let Err(e) = wallet.disconnect().await {
            log::error!("Disconnect from '{}' failed: {}", wallet_name, e);
            return Err(SessionError::DisconnectFailed {
                wallet: wallet_name.to_string(),
                source: e,
            });
        }
        log::info!("Disconnected from '{}'", wallet_name);
        self.selection.on_disconnected();
        Ok(())
    }

    /// Switch the active account
    ///
    /// `Ok(false)` when nothing was persisted: `index` is not a live account,
    /// or persistence is disabled.
    pub async fn select_account(&self, wallet_name: &str, index: u32) -> Result<bool> {
        let wallet = self.find_wallet(wallet_name)?;
        Ok(self.selection.select(wallet.as_ref(), index))
    }

    // ============================================================================
    // Inspection
    // ============================================================================

    pub fn stored_connection(&self) -> Option<StoredConnection> {
        self.store.load()
    }

    pub fn subscription_count(&self) -> usize {
        self.lock_subscriptions().len()
    }

    /// Cancel every wallet subscription
    pub fn shutdown(&self) {
        let cancelled = self.lock_subscriptions().cancel_all();
        log::info!("Wallet session shut down ({} subscriptions cancelled)", cancelled);
    }

    fn find_wallet(&self, wallet_name: &str) -> Result<Arc<dyn WalletHandle>> {
        self.registry
            .find(wallet_name)
            .ok_or_else(|| SessionError::WalletNotFound(wallet_name.to_string()))
    }

    fn lock_subscriptions(&self) -> MutexGuard<'_, SubscriptionRegistry> {
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
