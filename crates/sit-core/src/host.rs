//! Interfaces consumed from the browser host.
//!
//! The core never owns tabs or pages. It asks the host to navigate, to run
//! the bridge inside a page, and to show the restricted-page popup; the host
//! feeds tab lifecycle events back in through
//! [`Extension`](crate::activation::Extension).

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::bridge::{BridgeCommand, BridgeReport};
use crate::error::InjectionError;

/// Opaque host tab identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub i64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Load status carried by a tab-updated event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabStatus {
    Loading,
    Complete,
}

/// The user clicked the extension action on this tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationEvent {
    pub tab: TabId,
    /// Tab URL exactly as the host reported it.
    pub url: String,
}

/// Tab control surface of the host.
pub trait TabHost: Send + Sync {
    /// Navigate `tab` to `url`. Resolves once the host has accepted the update,
    /// not when the page has loaded. `Err` carries the host's reason.
    fn update_tab(&self, tab: TabId, url: &str) -> impl Future<Output = Result<(), String>> + Send;

    /// Show the "this page can't be sanitized" popup for a restricted tab.
    fn open_restricted_popup(&self, tab: TabId);
}

/// Runs the bridge inside a page. Only plain data crosses: the command in,
/// the report out.
pub trait ScriptInjector: Send + Sync {
    fn execute(
        &self,
        tab: TabId,
        command: &BridgeCommand,
    ) -> impl Future<Output = Result<BridgeReport, InjectionError>> + Send;
}
