//! Clipboard/notification bridge.
//!
//! Runs in the context of the freshly loaded page. It receives the cleaned
//! URL as a plain [`BridgeCommand`], copies it (clipboard API first, selection
//! copy as fallback), shows a banner for the outcome, and returns a
//! [`BridgeReport`]. A failed copy never undoes the navigation; it only
//! selects the failure banner.

mod clipboard;
mod message;
mod notification;
mod page;

use std::sync::Arc;

use crate::config::NotificationConfig;
use crate::error::InjectionError;

pub use clipboard::copy_text;
pub use message::{BridgeCommand, BridgeReport, CopyMethod};
pub use notification::{
    BannerKind, BannerPhase, BannerView, Notification, FAILURE_MESSAGE, SUCCESS_MESSAGE,
};
pub use page::{Clipboard, NodeId, PageDom};

pub struct Bridge<C, P> {
    clipboard: C,
    page: Arc<P>,
    timers: NotificationConfig,
}

impl<C, P> Bridge<C, P>
where
    C: Clipboard,
    P: PageDom + 'static,
{
    pub fn new(clipboard: C, page: Arc<P>, timers: NotificationConfig) -> Self {
        Self {
            clipboard,
            page,
            timers,
        }
    }

    /// Copy, show the banner, and report. Returns as soon as the banner is
    /// visible; fading and removal continue on a spawned timer task.
    pub async fn handle(&self, command: &BridgeCommand) -> BridgeReport {
        let url = command.url();
        let report = match copy_text(&self.clipboard, self.page.as_ref(), url).await {
            Ok(method) => {
                tracing::info!(?method, "sanitized URL copied to clipboard");
                BridgeReport::copied(method)
            }
            Err(e) => {
                tracing::warn!(error = %e, "sanitized URL not copied");
                BridgeReport::copy_failed()
            }
        };

        let mut banner = Notification::new(BannerView::for_report(&report, self.timers.fade()));
        match banner.show(self.page.as_ref()) {
            Ok(()) => {
                let page = Arc::clone(&self.page);
                let timers = self.timers.clone();
                tokio::spawn(async move {
                    banner.dismiss_after(page.as_ref(), &timers).await;
                });
            }
            Err(reason) => tracing::warn!(%reason, "could not show banner"),
        }

        report
    }

    /// JSON in, JSON out: the form used when the bridge sits across a real
    /// page boundary.
    pub async fn handle_message(&self, payload: &str) -> Result<String, InjectionError> {
        let command = BridgeCommand::from_json(payload)?;
        self.handle(&command).await.to_json()
    }
}
