//! Query-string filtering that keeps surviving pairs byte-for-byte.

use url::form_urlencoded;

use crate::rules::RuleSet;

/// Result of filtering a raw query string.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum QueryEdit {
    /// Nothing matched; leave the query exactly as it was.
    Unchanged,
    /// Some pairs were dropped; this is the re-joined remainder.
    Replaced(String),
    /// Every pair was dropped; the `?` goes too.
    Cleared,
}

/// Decoded name of one raw `name=value` segment.
fn segment_name(segment: &str) -> Option<String> {
    form_urlencoded::parse(segment.as_bytes())
        .next()
        .map(|(name, _)| name.into_owned())
}

/// Drops every `&`-separated segment whose decoded name is tracking noise.
/// Kept segments are not re-encoded, so `a=b%20c` stays `a=b%20c`.
pub(super) fn strip_tracking_pairs(query: &str, rules: &RuleSet) -> QueryEdit {
    let mut removed = false;
    let kept: Vec<&str> = query
        .split('&')
        .filter(|segment| {
            let tracking = segment_name(segment).is_some_and(|name| rules.is_tracking_param(&name));
            removed |= tracking;
            !tracking
        })
        .collect();

    if !removed {
        return QueryEdit::Unchanged;
    }

    let kept: Vec<&str> = kept.into_iter().filter(|s| !s.is_empty()).collect();
    if kept.is_empty() {
        QueryEdit::Cleared
    } else {
        QueryEdit::Replaced(kept.join("&"))
    }
}
