//! Navigation coordinator.
//!
//! Drives a tab to a target URL and resolves exactly once, when that tab
//! reports load-complete for the navigated document:
//!
//! `Idle -> NavigationIssued -> AwaitingLoad -> LoadComplete -> Deregistered`
//!
//! The per-tab observer lives in [`PendingLoads`]; the host's tab events are
//! fed in through [`NavigationCoordinator::on_tab_updated`] and
//! [`NavigationCoordinator::on_tab_removed`]. Nothing is retried.

mod pending;

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::error::NavigationError;
use crate::host::{TabHost, TabId, TabStatus};

pub use pending::{NavState, PendingLoads};

pub struct NavigationCoordinator<H> {
    host: Arc<H>,
    pending: PendingLoads,
    load_timeout: Option<Duration>,
}

impl<H: TabHost> NavigationCoordinator<H> {
    pub fn new(host: Arc<H>, load_timeout: Option<Duration>) -> Self {
        Self {
            host,
            pending: PendingLoads::new(),
            load_timeout,
        }
    }

    pub fn pending(&self) -> &PendingLoads {
        &self.pending
    }

    /// Navigate `tab` to `url` and wait for its load-complete.
    ///
    /// The observer is registered before the update is sent so no completion
    /// can slip past; it only arms once the host acknowledges the update.
    pub async fn navigate(&self, tab: TabId, url: &Url) -> Result<(), NavigationError> {
        let reg = self.pending.register(tab);
        tracing::debug!(tab_id = tab.0, generation = reg.generation, "navigation issued");

        if let Err(reason) = self.host.update_tab(tab, url.as_str()).await {
            self.pending.abandon(tab, reg.generation);
            tracing::warn!(tab_id = tab.0, %reason, "tab update rejected");
            return Err(NavigationError::UpdateRejected { tab, reason });
        }

        if self.pending.acknowledge(tab, reg.generation) {
            tracing::debug!(tab_id = tab.0, "awaiting load-complete");
        }

        let verdict = match self.load_timeout {
            Some(limit) => match tokio::time::timeout(limit, reg.done).await {
                Ok(received) => received,
                Err(_) => {
                    self.pending.abandon(tab, reg.generation);
                    return Err(NavigationError::LoadTimeout {
                        tab,
                        timeout_ms: limit.as_millis() as u64,
                    });
                }
            },
            None => reg.done.await,
        };

        // The sender is only dropped without a verdict if the registry itself is gone.
        verdict.unwrap_or(Err(NavigationError::TabClosed { tab }))
    }

    /// Host tab-updated event. Returns true if it completed a pending navigation.
    pub fn on_tab_updated(&self, tab: TabId, status: TabStatus) -> bool {
        let fired = self.pending.on_status(tab, status);
        if fired {
            tracing::debug!(tab_id = tab.0, "load-complete; observer deregistered");
        }
        fired
    }

    /// Host tab-removed event.
    pub fn on_tab_removed(&self, tab: TabId) {
        self.pending.on_removed(tab);
    }
}
