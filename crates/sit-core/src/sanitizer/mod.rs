//! URL sanitization.
//!
//! Maps a tab URL to its cleaned form: tracking query parameters removed,
//! referral path tails cut, and tracking-looking fragments cleared. The
//! transform is pure and idempotent; sanitizing an already clean URL
//! returns it unchanged.

mod query;

use url::Url;

use crate::config::{SanitizeMode, SitConfig};
use crate::error::ParseError;
use crate::rules::RuleSet;

use query::{strip_tracking_pairs, QueryEdit};

/// Cleaned URL plus whether anything was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub url: Url,
    pub changed: bool,
}

impl Sanitized {
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

/// Parses a tab URL. This is the only place malformed input is rejected.
pub fn parse_tab_url(input: &str) -> Result<Url, ParseError> {
    Url::parse(input).map_err(|source| ParseError {
        input: input.to_string(),
        source,
    })
}

/// Sanitizes with the built-in rules in targeted mode.
///
/// # Examples
///
/// - `https://ex.com/?utm_source=x&id=1` → `https://ex.com/?id=1`
/// - `https://ex.com/item/ref/abc123` → `https://ex.com/item/`
/// - `https://ex.com/#utm_source=x` → `https://ex.com/`
pub fn sanitize(url: &Url) -> Url {
    Sanitizer::default().sanitize(url).url
}

#[derive(Debug, Clone)]
pub struct Sanitizer {
    rules: RuleSet,
    mode: SanitizeMode,
}

impl Default for Sanitizer {
    /// Built-in rules, targeted mode.
    fn default() -> Self {
        Self::new(RuleSet::builtin(), SanitizeMode::Targeted)
    }
}

impl Sanitizer {
    pub fn new(rules: RuleSet, mode: SanitizeMode) -> Self {
        Self { rules, mode }
    }

    pub fn from_config(cfg: &SitConfig) -> Self {
        Self::new(RuleSet::from_config(cfg), cfg.mode)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn mode(&self) -> SanitizeMode {
        self.mode
    }

    /// Parse then sanitize a raw tab URL string.
    pub fn sanitize_str(&self, input: &str) -> Result<Sanitized, ParseError> {
        let url = parse_tab_url(input)?;
        Ok(self.sanitize(&url))
    }

    /// Returns a new, cleaned URL; `url` itself is not modified.
    pub fn sanitize(&self, url: &Url) -> Sanitized {
        let mut out = url.clone();

        match self.mode {
            SanitizeMode::Targeted => {
                if let Some(q) = url.query() {
                    match strip_tracking_pairs(q, &self.rules) {
                        QueryEdit::Unchanged => {}
                        QueryEdit::Replaced(kept) => out.set_query(Some(&kept)),
                        QueryEdit::Cleared => out.set_query(None),
                    }
                }
            }
            SanitizeMode::Strict => out.set_query(None),
        }

        if !out.cannot_be_a_base() {
            let path = url.path();
            let truncated = self.rules.truncate_path(path);
            if truncated.len() != path.len() {
                out.set_path(truncated);
            }
        }

        if let Some(fragment) = url.fragment() {
            let clear = match self.mode {
                SanitizeMode::Targeted => self.rules.is_tracking_fragment(fragment),
                SanitizeMode::Strict => true,
            };
            if clear {
                out.set_fragment(None);
            }
        }

        let changed = out.as_str() != url.as_str();
        Sanitized { url: out, changed }
    }
}
