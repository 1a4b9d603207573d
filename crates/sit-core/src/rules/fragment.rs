//! Tracking-looking fragment detection.

use url::form_urlencoded;

/// A fragment is tracking-like when it carries a literal `?` (a query smuggled
/// after the `#`), or when one of its `&`/`;` separated `name=value` tokens
/// names a tracking parameter. Bare anchors (`#content`, `#ref`) never match.
pub(crate) fn is_tracking_fragment(fragment: &str, is_tracking_param: impl Fn(&str) -> bool) -> bool {
    if fragment.contains('?') {
        return true;
    }
    fragment
        .split(['&', ';'])
        .filter(|token| token.contains('='))
        .filter_map(|token| {
            form_urlencoded::parse(token.as_bytes())
                .next()
                .map(|(name, _)| name.into_owned())
        })
        .any(|name| is_tracking_param(name.as_str()))
}
