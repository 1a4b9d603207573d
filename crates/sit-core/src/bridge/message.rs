//! Plain-data messages crossing into and out of the page context.

use serde::{Deserialize, Serialize};

use crate::error::InjectionError;

/// Command sent from the coordinator to the bridge running in the page.
///
/// Wire form: `{"action":"sanitized","url":"https://..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum BridgeCommand {
    Sanitized { url: String },
}

impl BridgeCommand {
    pub fn sanitized(url: impl Into<String>) -> Self {
        BridgeCommand::Sanitized { url: url.into() }
    }

    pub fn url(&self) -> &str {
        match self {
            BridgeCommand::Sanitized { url } => url,
        }
    }

    pub fn to_json(&self) -> Result<String, InjectionError> {
        serde_json::to_string(self).map_err(|e| InjectionError::Malformed(e.to_string()))
    }

    pub fn from_json(payload: &str) -> Result<Self, InjectionError> {
        serde_json::from_str(payload).map_err(|e| InjectionError::Malformed(e.to_string()))
    }
}

/// Which clipboard mechanism succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyMethod {
    /// Async clipboard API (`navigator.clipboard.writeText`).
    Primary,
    /// Off-screen textarea + `execCommand("copy")`.
    Fallback,
}

/// What the bridge reports back after handling a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeReport {
    pub copied: bool,
    pub method: Option<CopyMethod>,
}

impl BridgeReport {
    pub fn copied(method: CopyMethod) -> Self {
        Self {
            copied: true,
            method: Some(method),
        }
    }

    pub fn copy_failed() -> Self {
        Self {
            copied: false,
            method: None,
        }
    }

    pub fn to_json(&self) -> Result<String, InjectionError> {
        serde_json::to_string(self).map_err(|e| InjectionError::Malformed(e.to_string()))
    }

    pub fn from_json(payload: &str) -> Result<Self, InjectionError> {
        serde_json::from_str(payload).map_err(|e| InjectionError::Malformed(e.to_string()))
    }
}
