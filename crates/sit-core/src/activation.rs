//! One activation cycle, end to end.
//!
//! action clicked → (restricted page? defer to popup) → parse → sanitize →
//! navigate and await load-complete → run the bridge in the loaded page.
//!
//! Each cycle is independent: its failure is logged and returned, never
//! retried, and never affects other tabs or later activations.

use std::sync::Arc;

use crate::bridge::{BridgeCommand, BridgeReport};
use crate::config::SitConfig;
use crate::error::CycleError;
use crate::host::{ActivationEvent, ScriptInjector, TabHost, TabId, TabStatus};
use crate::navigation::NavigationCoordinator;
use crate::sanitizer::{parse_tab_url, Sanitizer};

/// How a cycle that did not fail ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Host-internal page; the fallback popup was shown instead.
    Restricted,
    /// Tab now shows `url`; `report` says whether the copy worked.
    Completed {
        url: String,
        changed: bool,
        report: BridgeReport,
    },
}

pub struct Extension<H> {
    config: SitConfig,
    sanitizer: Sanitizer,
    host: Arc<H>,
    navigation: NavigationCoordinator<H>,
}

impl<H> Extension<H>
where
    H: TabHost + ScriptInjector,
{
    pub fn new(config: SitConfig, host: Arc<H>) -> Self {
        let sanitizer = Sanitizer::from_config(&config);
        let navigation = NavigationCoordinator::new(Arc::clone(&host), config.load_timeout());
        Self {
            config,
            sanitizer,
            host,
            navigation,
        }
    }

    pub fn config(&self) -> &SitConfig {
        &self.config
    }

    pub fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    pub fn navigation(&self) -> &NavigationCoordinator<H> {
        &self.navigation
    }

    /// Run one full cycle for an action click.
    pub async fn on_activated(&self, event: ActivationEvent) -> Result<CycleOutcome, CycleError> {
        let tab = event.tab;

        if self.config.is_restricted(&event.url) {
            tracing::debug!(tab_id = tab.0, url = %event.url, "restricted page, showing fallback popup");
            self.host.open_restricted_popup(tab);
            return Ok(CycleOutcome::Restricted);
        }

        let result = self.run_cycle(tab, &event.url).await;
        match &result {
            Ok(CycleOutcome::Completed { changed, report, .. }) => {
                tracing::info!(tab_id = tab.0, changed, copied = report.copied, "activation cycle complete");
            }
            Ok(CycleOutcome::Restricted) => {}
            Err(e) => tracing::warn!(tab_id = tab.0, error = %e, "activation cycle aborted"),
        }
        result
    }

    async fn run_cycle(&self, tab: TabId, raw_url: &str) -> Result<CycleOutcome, CycleError> {
        let url = parse_tab_url(raw_url)?;
        let sanitized = self.sanitizer.sanitize(&url);
        tracing::info!(tab_id = tab.0, changed = sanitized.changed, "sanitized tab URL");

        let cleaned = sanitized.url.to_string();
        self.navigation.navigate(tab, &sanitized.url).await?;

        let command = BridgeCommand::sanitized(cleaned.clone());
        let report = self.host.execute(tab, &command).await?;

        Ok(CycleOutcome::Completed {
            url: cleaned,
            changed: sanitized.changed,
            report,
        })
    }

    /// Host tab-updated event.
    pub fn on_tab_updated(&self, tab: TabId, status: TabStatus) -> bool {
        self.navigation.on_tab_updated(tab, status)
    }

    /// Host tab-removed event.
    pub fn on_tab_removed(&self, tab: TabId) {
        self.navigation.on_tab_removed(tab);
    }
}

impl<H> Extension<H>
where
    H: TabHost + ScriptInjector + 'static,
{
    /// Spawn a cycle so the host's event loop can keep delivering tab events.
    pub fn spawn_activation(
        self: &Arc<Self>,
        event: ActivationEvent,
    ) -> tokio::task::JoinHandle<Result<CycleOutcome, CycleError>> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.on_activated(event).await })
    }
}
