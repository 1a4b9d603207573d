//! Clipboard write with a selection-based fallback.

use crate::error::ClipboardError;

use super::message::CopyMethod;
use super::page::{Clipboard, NodeId, PageDom};

/// Removes the scratch textarea when dropped, whether the copy worked or not.
struct ScratchGuard<'a, P: PageDom> {
    page: &'a P,
    node: NodeId,
}

impl<P: PageDom> Drop for ScratchGuard<'_, P> {
    fn drop(&mut self) {
        self.page.remove_node(self.node);
    }
}

/// Off-screen textarea, select, `execCommand("copy")`.
fn copy_via_selection<P: PageDom>(page: &P, text: &str) -> Result<(), String> {
    let node = page.append_scratch_textarea(text)?;
    let _guard = ScratchGuard { page, node };
    page.select_contents(node);
    if page.exec_copy() {
        Ok(())
    } else {
        Err("execCommand(\"copy\") returned false".to_string())
    }
}

/// Writes `text` with the clipboard API, falling back to a selection copy.
/// Fails only when both mechanisms fail.
pub async fn copy_text<C: Clipboard, P: PageDom>(
    clipboard: &C,
    page: &P,
    text: &str,
) -> Result<CopyMethod, ClipboardError> {
    let primary = match clipboard.write_text(text).await {
        Ok(()) => return Ok(CopyMethod::Primary),
        Err(e) => e,
    };
    tracing::debug!(%primary, "clipboard API write failed, trying selection copy");

    match copy_via_selection(page, text) {
        Ok(()) => Ok(CopyMethod::Fallback),
        Err(fallback) => Err(ClipboardError { primary, fallback }),
    }
}
