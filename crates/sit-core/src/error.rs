//! Error taxonomy for one activation cycle.
//!
//! Every error here is terminal for the cycle that produced it and none is
//! retried. `ClipboardError` is the exception: it never aborts the cycle, it
//! only turns the banner into its failure state.

use thiserror::Error;

use crate::host::TabId;

/// The tab URL could not be parsed; the cycle stops before sanitizing.
#[derive(Debug, Error)]
#[error("invalid tab URL {input:?}: {source}")]
pub struct ParseError {
    pub input: String,
    #[source]
    pub source: url::ParseError,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The host refused the tab update (tab closed mid-flight, invalid tab id).
    #[error("tab {tab} rejected navigation: {reason}")]
    UpdateRejected { tab: TabId, reason: String },

    /// The tab was removed while we were waiting for load-complete.
    #[error("tab {tab} closed before the page finished loading")]
    TabClosed { tab: TabId },

    /// A newer activation on the same tab replaced this pending navigation.
    #[error("navigation on tab {tab} superseded by a newer activation")]
    Superseded { tab: TabId },

    #[error("tab {tab} did not finish loading within {timeout_ms}ms")]
    LoadTimeout { tab: TabId, timeout_ms: u64 },
}

/// Both the primary clipboard API and the selection fallback failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("clipboard write failed (primary: {primary}; fallback: {fallback})")]
pub struct ClipboardError {
    pub primary: String,
    pub fallback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InjectionError {
    /// The host refused to run the bridge in this page (e.g. a store page).
    #[error("script injection into tab {tab} rejected: {reason}")]
    Rejected { tab: TabId, reason: String },

    /// The command or report could not cross the page boundary intact.
    #[error("malformed bridge message: {0}")]
    Malformed(String),
}

/// Why an activation cycle ended early.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Injection(#[from] InjectionError),
}
