//! Tracking rule set.
//!
//! A static table of what counts as tracking noise in a URL:
//! - exact query parameter names (`fbclid`, `gclid`, ...)
//! - query parameter name prefixes (`utm_`, `aff_`)
//! - referral path markers (`/ref/`, `/ref=`) that start a droppable path tail
//!
//! Everything here is pure data plus pure predicates. The set never changes
//! during a sanitization pass, so removal order cannot affect the result.

mod fragment;
mod params;
mod path;

use std::collections::HashSet;

use crate::config::SitConfig;

pub use params::{REF_PATH_MARKERS, TRACKING_PARAMS, TRACKING_PREFIXES};

/// One entry of the rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Query parameter with exactly this name.
    Exact(String),
    /// Query parameter whose name starts with this prefix.
    Prefix(String),
    /// Path marker such as `/ref/`; the path is cut at its first occurrence.
    PathTail(String),
}

#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    exact: HashSet<String>,
    prefixes: Vec<String>,
    path_markers: Vec<String>,
}

impl RuleSet {
    pub fn from_rules<I: IntoIterator<Item = Rule>>(rules: I) -> Self {
        let mut set = Self::default();
        for rule in rules {
            set.insert(rule);
        }
        set
    }

    /// The built-in table: UTM, ad click ids, analytics, affiliate and storefront parameters.
    pub fn builtin() -> Self {
        let exact = TRACKING_PARAMS.iter().map(|p| Rule::Exact(p.to_string()));
        let prefixes = TRACKING_PREFIXES.iter().map(|p| Rule::Prefix(p.to_string()));
        let paths = REF_PATH_MARKERS.iter().map(|m| Rule::PathTail(m.to_string()));
        Self::from_rules(exact.chain(prefixes).chain(paths))
    }

    /// Built-in table extended with `extra_params` / `extra_prefixes` from config.
    pub fn from_config(cfg: &SitConfig) -> Self {
        let mut set = Self::builtin();
        for name in &cfg.extra_params {
            set.insert(Rule::Exact(name.clone()));
        }
        for prefix in &cfg.extra_prefixes {
            set.insert(Rule::Prefix(prefix.clone()));
        }
        set
    }

    pub fn insert(&mut self, rule: Rule) {
        match rule {
            Rule::Exact(name) if !name.is_empty() => {
                self.exact.insert(name);
            }
            Rule::Prefix(prefix) if !prefix.is_empty() && !self.prefixes.contains(&prefix) => {
                self.prefixes.push(prefix);
            }
            Rule::PathTail(marker) if !marker.is_empty() && !self.path_markers.contains(&marker) => {
                self.path_markers.push(marker);
            }
            _ => {}
        }
    }

    /// All entries, exact names sorted for stable output.
    pub fn rules(&self) -> Vec<Rule> {
        let mut exact: Vec<&String> = self.exact.iter().collect();
        exact.sort();
        exact
            .into_iter()
            .map(|n| Rule::Exact(n.clone()))
            .chain(self.prefixes.iter().map(|p| Rule::Prefix(p.clone())))
            .chain(self.path_markers.iter().map(|m| Rule::PathTail(m.clone())))
            .collect()
    }

    /// True if a query parameter with this (decoded) name is tracking noise.
    /// Names match case-sensitively.
    pub fn is_tracking_param(&self, name: &str) -> bool {
        self.exact.contains(name) || self.prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }

    /// Path with any referral tail removed; the slash before the marker is kept.
    pub fn truncate_path<'a>(&self, path: &'a str) -> &'a str {
        path::truncate_ref_tail(path, &self.path_markers)
    }

    /// True if the fragment (without `#`) looks like it carries tracking data.
    pub fn is_tracking_fragment(&self, fragment: &str) -> bool {
        fragment::is_tracking_fragment(fragment, |name| self.is_tracking_param(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_exact_and_prefix_matches() {
        let rules = RuleSet::builtin();
        assert!(rules.is_tracking_param("fbclid"));
        assert!(rules.is_tracking_param("utm_source"));
        assert!(rules.is_tracking_param("utm_anything_custom"));
        assert!(rules.is_tracking_param("aff_sub2"));
        assert!(rules.is_tracking_param("pd_rd_wg"));
        assert!(rules.is_tracking_param("linkCode"));
    }

    #[test]
    fn builtin_keeps_content_params() {
        let rules = RuleSet::builtin();
        assert!(!rules.is_tracking_param("id"));
        assert!(!rules.is_tracking_param("q"));
        assert!(!rules.is_tracking_param("page"));
        assert!(!rules.is_tracking_param("v"));
        assert!(!rules.is_tracking_param("UTM_SOURCE"));
        assert!(!rules.is_tracking_param("linkcode"));
    }

    #[test]
    fn config_extends_builtin() {
        let cfg = SitConfig {
            extra_params: vec!["spm".to_string()],
            extra_prefixes: vec!["pk_".to_string()],
            ..SitConfig::default()
        };
        let rules = RuleSet::from_config(&cfg);
        assert!(rules.is_tracking_param("spm"));
        assert!(rules.is_tracking_param("pk_campaign"));
        assert!(rules.is_tracking_param("gclid"));
    }

    #[test]
    fn empty_entries_are_ignored() {
        let rules = RuleSet::from_rules([
            Rule::Prefix(String::new()),
            Rule::Exact(String::new()),
            Rule::PathTail(String::new()),
        ]);
        assert!(rules.rules().is_empty());
        assert!(!rules.is_tracking_param("anything"));
        assert_eq!(rules.truncate_path("/ref/x"), "/ref/x");
    }

    #[test]
    fn rules_lists_every_kind() {
        let rules = RuleSet::builtin();
        let all = rules.rules();
        assert_eq!(
            all.iter().filter(|r| matches!(r, Rule::Exact(_))).count(),
            TRACKING_PARAMS.len()
        );
        assert!(all.contains(&Rule::Prefix("utm_".to_string())));
        assert!(all.contains(&Rule::PathTail("/ref=".to_string())));
    }

    #[test]
    fn fragment_predicate_uses_the_table() {
        let rules = RuleSet::builtin();
        assert!(rules.is_tracking_fragment("utm_source=x"));
        assert!(rules.is_tracking_fragment("x=1&gclid=2"));
        assert!(!rules.is_tracking_fragment("content"));
        assert!(!rules.is_tracking_fragment("id=3"));
    }
}
