use std::sync::{Arc, PoisonError, RwLock};

use super::handle::WalletHandle;

/// Source of the currently available wallets
pub trait WalletRegistry: Send + Sync {
    /// Snapshot of the wallets available right now, in discovery order
    fn list(&self) -> Vec<Arc<dyn WalletHandle>>;

    /// First wallet whose name equals `name`
    fn find(&self, name: &str) -> Option<Arc<dyn WalletHandle>> {
        self.list().into_iter().find(|w| w.name() == name)
    }
}

/// In-process registry; wallets may register after the session starts
#[derive(Default)]
pub struct StaticRegistry {
    wallets: RwLock<Vec<Arc<dyn WalletHandle>>>,
}

impl StaticRegistry {
    pub fn new(wallets: Vec<Arc<dyn WalletHandle>>) -> Self {
        Self {
            wallets: RwLock::new(wallets),
        }
    }

    pub fn register(&self, wallet: Arc<dyn WalletHandle>) {
        log::info!("Wallet registered: {}", wallet.name());
        self.wallets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(wallet);
    }

    /// Remove every wallet named `name`, returning how many were removed
    pub fn unregister(&self, name: &str) -> usize {
        let mut wallets = self.wallets.write().unwrap_or_else(PoisonError::into_inner);
        let before = wallets.len();
        wallets.retain(|w| w.name() != name);
        let removed = before - wallets.len();
        if removed > 0 {
            log::info!("Wallet unregistered: {}", name);
        }
        removed
    }
}

impl WalletRegistry for StaticRegistry {
    fn list(&self) -> Vec<Arc<dyn WalletHandle>> {
        self.wallets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
