//! Event-driven refresh loop
//!
//! Wallet change notifications arrive over a channel fed by the session's
//! subscriptions. Each notification waits `delay` so the wallet can settle,
//! then the whole wallet list is refreshed and resubscribed. Notifications
//! arriving during the delay are folded into the same refresh.
//!
//! The controller only holds a weak reference to its session. Once the last
//! `Arc<WalletSession>` is dropped, its subscriptions and event sender go
//! with it and the controller winds down.

use std::future::Future;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::mpsc;

use super::manager::{RefreshReport, WalletSession};
use super::view::WalletView;
use crate::wallet::WalletEvent;

/// External rendering surface
pub trait Renderer: Send {
    fn render(&mut self, views: &[WalletView]);
}

impl<F> Renderer for F
where
    F: FnMut(&[WalletView]) + Send,
{
    fn render(&mut self, views: &[WalletView]) {
        self(views)
    }
}

pub struct RefreshController {
    session: Weak<WalletSession>,
    events: mpsc::UnboundedReceiver<WalletEvent>,
    delay: Duration,
}

impl RefreshController {
    pub(crate) fn new(
        session: Weak<WalletSession>,
        events: mpsc::UnboundedReceiver<WalletEvent>,
        delay: Duration,
    ) -> Self {
        Self {
            session,
            events,
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait for the next change notification and run the refresh it triggers
    ///
    /// Returns `None` once the session has been dropped.
    pub async fn next_refresh(&mut self) -> Option<RefreshReport> {
        let event = self.events.recv().await?;
        log::debug!(
            "Change from '{}' ({:?}), refreshing in {:?}",
            event.wallet,
            event.kind,
            self.delay
        );
        tokio::time::sleep(self.delay).await;

        let coalesced = self.drain_pending();
        if coalesced > 0 {
            log::debug!("Coalesced {} queued change event(s)", coalesced);
        }

        let session = self.session.upgrade()?;
        Some(session.refresh().await)
    }

    /// Refresh on every change until `shutdown` resolves, then cancel all subscriptions
    ///
    /// Returns the number of refreshes rendered.
    pub async fn run<R, F>(mut self, renderer: &mut R, shutdown: F) -> usize
    where
        R: Renderer + ?Sized,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut refreshes = 0;

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                report = self.next_refresh() => match report {
                    Some(report) => {
                        renderer.render(&report.views);
                        refreshes += 1;
                    }
                    None => break,
                },
            }
        }

        if let Some(session) = self.session.upgrade() {
            session.shutdown();
        }
        log::info!("Refresh controller stopped after {} refresh(es)", refreshes);
        refreshes
    }

    fn drain_pending(&mut self) -> usize {
        let mut drained = 0;
        while self.events.try_recv().is_ok() {
            drained += 1;
        }
        drained
    }
}
