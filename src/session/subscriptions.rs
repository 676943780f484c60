use std::collections::HashMap;

use crate::wallet::Unsubscribe;

/// Active change subscriptions, keyed by wallet name
///
/// Names are not unique across wallets, so a name may hold several handles.
/// Every refresh pass starts with `cancel_all` so listeners never pile up.
#[derive(Default)]
pub struct SubscriptionRegistry {
    handles: HashMap<String, Vec<Unsubscribe>>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, wallet: impl Into<String>, handle: Unsubscribe) {
        self.handles.entry(wallet.into()).or_default().push(handle);
    }

    /// Cancel the subscriptions held for `wallet`, returning how many were cancelled
    pub fn cancel(&mut self, wallet: &str) -> usize {
        let handles = self.handles.remove(wallet).unwrap_or_default();
        let count = handles.len();
        for unsubscribe in handles {
            unsubscribe();
        }
        count
    }

    pub fn cancel_all(&mut self) -> usize {
        let mut count = 0;
        for (_, handles) in self.handles.drain() {
            count += handles.len();
            for unsubscribe in handles {
                unsubscribe();
            }
        }
        count
    }

    pub fn len(&self) -> usize {
        self.handles.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, wallet: &str) -> bool {
        self.handles.get(wallet).is_some_and(|h| !h.is_empty())
    }
}

impl Drop for SubscriptionRegistry {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
