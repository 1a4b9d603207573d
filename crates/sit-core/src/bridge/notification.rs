//! Transient on-page confirmation banner.
//!
//! The banner lives inside its own shadow root with `all: initial`, so page
//! stylesheets neither restyle it nor get restyled by it. Lifecycle:
//! created → visible → fading → removed, driven by two fixed timers.

use std::time::Duration;

use crate::config::NotificationConfig;

use super::message::BridgeReport;
use super::page::{NodeId, PageDom};

pub const SUCCESS_MESSAGE: &str = "URL sanitized and copied to clipboard!";
pub const FAILURE_MESSAGE: &str =
    "URL sanitized, but failed to copy to clipboard. Please try again.";

const SUCCESS_COLOR: &str = "#327834";
const FAILURE_COLOR: &str = "#b3261e";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Failure,
}

impl BannerKind {
    pub fn message(self) -> &'static str {
        match self {
            BannerKind::Success => SUCCESS_MESSAGE,
            BannerKind::Failure => FAILURE_MESSAGE,
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            BannerKind::Success => SUCCESS_COLOR,
            BannerKind::Failure => FAILURE_COLOR,
        }
    }
}

/// Everything the page needs to render the banner. Text is set as text
/// content, never parsed as markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerView {
    pub kind: BannerKind,
    pub text: &'static str,
    pub stylesheet: String,
}

impl BannerView {
    pub fn new(kind: BannerKind, fade: Duration) -> Self {
        Self {
            kind,
            text: kind.message(),
            stylesheet: stylesheet(kind.background(), fade),
        }
    }

    pub fn for_report(report: &BridgeReport, fade: Duration) -> Self {
        let kind = if report.copied {
            BannerKind::Success
        } else {
            BannerKind::Failure
        };
        Self::new(kind, fade)
    }
}

fn stylesheet(background: &str, fade: Duration) -> String {
    format!(
        ":host {{ all: initial; }}\n\
         .banner {{ position: fixed; top: 20px; left: 50%; transform: translateX(-50%); \
         background-color: {background}; color: white; padding: 16px; border-radius: 4px; \
         z-index: 10000; font-family: Arial, sans-serif; font-size: 16px; \
         box-shadow: 0 4px 8px rgba(0,0,0,0.1); opacity: 1; \
         transition: opacity {fade_ms}ms; }}\n\
         .banner.fading {{ opacity: 0; }}\n",
        background = background,
        fade_ms = fade.as_millis(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerPhase {
    Created,
    Visible,
    Fading,
    Removed,
}

/// One banner on one page. Created per completed navigation, never reused.
#[derive(Debug)]
pub struct Notification {
    view: BannerView,
    phase: BannerPhase,
    node: Option<NodeId>,
}

impl Notification {
    pub fn new(view: BannerView) -> Self {
        Self {
            view,
            phase: BannerPhase::Created,
            node: None,
        }
    }

    pub fn phase(&self) -> BannerPhase {
        self.phase
    }

    pub fn view(&self) -> &BannerView {
        &self.view
    }

    /// Created → Visible.
    pub fn show<P: PageDom>(&mut self, page: &P) -> Result<(), String> {
        if self.phase != BannerPhase::Created {
            return Ok(());
        }
        let node = page.mount_banner(&self.view)?;
        self.node = Some(node);
        self.phase = BannerPhase::Visible;
        Ok(())
    }

    /// Visible → Fading.
    pub fn fade<P: PageDom>(&mut self, page: &P) {
        if let (BannerPhase::Visible, Some(node)) = (self.phase, self.node) {
            page.start_fade(node);
            self.phase = BannerPhase::Fading;
        }
    }

    /// Visible/Fading → Removed.
    pub fn remove<P: PageDom>(&mut self, page: &P) {
        if let Some(node) = self.node.take() {
            page.remove_node(node);
        }
        self.phase = BannerPhase::Removed;
    }

    /// Waits out the visible and fade timers, then removes the banner.
    pub async fn dismiss_after<P: PageDom>(mut self, page: &P, timers: &NotificationConfig) {
        tokio::time::sleep(timers.visible()).await;
        self.fade(page);
        tokio::time::sleep(timers.fade()).await;
        self.remove(page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::CopyMethod;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingPage {
        events: Mutex<Vec<String>>,
        mount_fails: bool,
    }

    impl PageDom for RecordingPage {
        fn append_scratch_textarea(&self, _text: &str) -> Result<NodeId, String> {
            Ok(NodeId(99))
        }
        fn select_contents(&self, _node: NodeId) {}
        fn exec_copy(&self) -> bool {
            false
        }
        fn mount_banner(&self, view: &BannerView) -> Result<NodeId, String> {
            if self.mount_fails {
                return Err("no document body".to_string());
            }
            self.events.lock().unwrap().push(format!("mount:{}", view.text));
            Ok(NodeId(7))
        }
        fn start_fade(&self, node: NodeId) {
            self.events.lock().unwrap().push(format!("fade:{}", node.0));
        }
        fn remove_node(&self, node: NodeId) {
            self.events.lock().unwrap().push(format!("remove:{}", node.0));
        }
    }

    #[test]
    fn views_encode_outcome() {
        let ok = BannerView::for_report(
            &BridgeReport::copied(CopyMethod::Primary),
            Duration::from_millis(500),
        );
        assert_eq!(ok.kind, BannerKind::Success);
        assert_eq!(ok.text, SUCCESS_MESSAGE);
        assert!(ok.stylesheet.contains("background-color: #327834"));

        let failed = BannerView::for_report(&BridgeReport::copy_failed(), Duration::from_millis(500));
        assert_eq!(failed.kind, BannerKind::Failure);
        assert_eq!(failed.text, FAILURE_MESSAGE);
        assert!(failed.stylesheet.contains("background-color: #b3261e"));
    }

    #[test]
    fn stylesheet_isolates_and_fades() {
        let view = BannerView::new(BannerKind::Success, Duration::from_millis(500));
        assert!(view.stylesheet.starts_with(":host { all: initial; }"));
        assert!(view.stylesheet.contains("transition: opacity 500ms"));
        assert!(view.stylesheet.contains("z-index: 10000"));
    }

    #[tokio::test(start_paused = true)]
    async fn lifecycle_follows_timers() {
        let page = RecordingPage::default();
        let timers = NotificationConfig::default();
        let mut banner = Notification::new(BannerView::new(BannerKind::Success, timers.fade()));
        assert_eq!(banner.phase(), BannerPhase::Created);
        banner.show(&page).unwrap();
        assert_eq!(banner.phase(), BannerPhase::Visible);

        let start = tokio::time::Instant::now();
        banner.dismiss_after(&page, &timers).await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(3500), "{:?}", elapsed);
        assert!(elapsed < Duration::from_millis(3600), "{:?}", elapsed);
        assert_eq!(
            *page.events.lock().unwrap(),
            vec![format!("mount:{}", SUCCESS_MESSAGE), "fade:7".to_string(), "remove:7".to_string()]
        );
    }

    #[test]
    fn failed_mount_stays_created() {
        let page = RecordingPage {
            mount_fails: true,
            ..RecordingPage::default()
        };
        let mut banner = Notification::new(BannerView::new(BannerKind::Failure, Duration::ZERO));
        assert!(banner.show(&page).is_err());
        assert_eq!(banner.phase(), BannerPhase::Created);
        banner.fade(&page);
        assert_eq!(banner.phase(), BannerPhase::Created);
        banner.remove(&page);
        assert_eq!(banner.phase(), BannerPhase::Removed);
        assert!(page.events.lock().unwrap().is_empty());
    }
}
