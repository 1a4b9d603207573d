//! Referral path tails (`/ref/...`, `/ref=...`).

/// Byte offset where the referral tail starts, i.e. just after the slash that
/// precedes the earliest marker. `None` if no marker occurs.
pub(crate) fn ref_tail_start(path: &str, markers: &[String]) -> Option<usize> {
    markers
        .iter()
        .filter_map(|m| path.find(m.as_str()))
        .min()
        .map(|idx| idx + 1)
}

/// Cuts `path` at the first referral marker, keeping the slash before it.
///
/// `/item/ref/abc123` → `/item/`, `/dp/B0/ref=sr_1_1?x` → `/dp/B0/`.
pub(crate) fn truncate_ref_tail<'a>(path: &'a str, markers: &[String]) -> &'a str {
    match ref_tail_start(path, markers) {
        Some(end) => &path[..end],
        None => path,
    }
}
