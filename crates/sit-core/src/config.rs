use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How aggressively a URL is cleaned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SanitizeMode {
    /// Remove listed parameters, `/ref` path tails, and tracking-looking fragments only.
    #[default]
    Targeted,
    /// Drop the whole query and fragment, plus `/ref` path tails.
    Strict,
}

/// Banner timers (optional `[notification]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// How long the banner stays fully visible, in milliseconds.
    pub visible_ms: u64,
    /// Length of the fade-out transition, in milliseconds.
    pub fade_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            visible_ms: 3000,
            fade_ms: 500,
        }
    }
}

impl NotificationConfig {
    pub fn visible(&self) -> Duration {
        Duration::from_millis(self.visible_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

/// Global configuration loaded from `~/.config/sanitize-it/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitConfig {
    /// Cleaning policy: "targeted" (default) or "strict".
    #[serde(default)]
    pub mode: SanitizeMode,
    /// Extra exact parameter names treated as tracking, on top of the built-in table.
    #[serde(default)]
    pub extra_params: Vec<String>,
    /// Extra parameter name prefixes, on top of `utm_` and `aff_`.
    #[serde(default)]
    pub extra_prefixes: Vec<String>,
    /// URL schemes the host does not let us touch; activation defers to the fallback popup.
    #[serde(default = "default_restricted_schemes")]
    pub restricted_schemes: Vec<String>,
    /// Upper bound on waiting for load-complete, in milliseconds. 0 = wait until the tab completes or closes.
    #[serde(default = "default_load_timeout_ms")]
    pub load_timeout_ms: u64,
    #[serde(default)]
    pub notification: NotificationConfig,
}

fn default_restricted_schemes() -> Vec<String> {
    vec!["chrome".to_string(), "edge".to_string()]
}

fn default_load_timeout_ms() -> u64 {
    30_000
}

impl Default for SitConfig {
    fn default() -> Self {
        Self {
            mode: SanitizeMode::default(),
            extra_params: Vec::new(),
            extra_prefixes: Vec::new(),
            restricted_schemes: default_restricted_schemes(),
            load_timeout_ms: default_load_timeout_ms(),
            notification: NotificationConfig::default(),
        }
    }
}

impl SitConfig {
    pub fn load_timeout(&self) -> Option<Duration> {
        (self.load_timeout_ms > 0).then(|| Duration::from_millis(self.load_timeout_ms))
    }

    /// True if `url` starts with one of the restricted schemes (e.g. `chrome://settings`).
    pub fn is_restricted(&self, url: &str) -> bool {
        self.restricted_schemes.iter().any(|scheme| {
            url.get(..scheme.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
                && url[scheme.len()..].starts_with("://")
        })
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sanitize-it")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SitConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SitConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<SitConfig> {
    let data = fs::read_to_string(path)?;
    let cfg: SitConfig = toml::from_str(&data)?;
    Ok(cfg)
}
