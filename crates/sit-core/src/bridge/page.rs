//! What the bridge needs from the page it runs in.

use std::future::Future;

use super::notification::BannerView;

/// Handle to an element the bridge inserted into the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// Async clipboard API of the page (`navigator.clipboard`).
pub trait Clipboard: Send + Sync {
    /// `Err` when the API is missing, the context is insecure, or permission is denied.
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), String>> + Send;
}

/// DOM operations of the page document.
pub trait PageDom: Send + Sync {
    /// Append an off-screen, read-only `<textarea>` holding `text`.
    fn append_scratch_textarea(&self, text: &str) -> Result<NodeId, String>;

    /// Select the full contents of `node`.
    fn select_contents(&self, node: NodeId);

    /// Synchronous `document.execCommand("copy")` on the current selection.
    fn exec_copy(&self) -> bool;

    /// Attach a host element whose shadow root holds `view.stylesheet` and a
    /// `<div class="banner" role="status">` with `view.text` as its text
    /// content. Page CSS cannot reach into the shadow root.
    fn mount_banner(&self, view: &BannerView) -> Result<NodeId, String>;

    /// Add the `fading` class to the banner; the stylesheet's transition takes
    /// it to opacity 0.
    fn start_fade(&self, node: NodeId);

    fn remove_node(&self, node: NodeId);
}
