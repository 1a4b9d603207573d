//! In-memory browser host for end-to-end cycle tests.
//!
//! Implements the tab, injection, clipboard and page interfaces and records
//! every observable step into one ordered log, so tests can assert that the
//! bridge never runs before the navigated page reports load-complete.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use sit_core::activation::Extension;
use sit_core::bridge::{
    BannerKind, BannerView, Bridge, BridgeCommand, BridgeReport, Clipboard, NodeId, PageDom,
};
use sit_core::config::{NotificationConfig, SitConfig};
use sit_core::error::InjectionError;
use sit_core::host::{ScriptInjector, TabHost, TabId, TabStatus};
use sit_core::navigation::NavState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    UpdateRequested { tab: TabId, url: String },
    Status { tab: TabId, status: TabStatus },
    Injected { tab: TabId, payload: String },
    ClipboardWrite(String),
    SelectionCopy(String),
    BannerShown(BannerKind),
    BannerFading,
    BannerRemoved,
    RestrictedPopup(TabId),
}

#[derive(Default)]
pub struct EventLog(Mutex<Vec<Event>>);

impl EventLog {
    pub fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn snapshot(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn position(&self, pred: impl Fn(&Event) -> bool) -> Option<usize> {
        self.snapshot().iter().position(pred)
    }

    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.snapshot().iter().filter(|e| pred(e)).count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Options {
    pub clipboard_missing: bool,
    pub exec_copy_fails: bool,
    pub reject_update: HashSet<TabId>,
    pub block_injection: HashSet<TabId>,
}

pub struct PageClipboard {
    log: Arc<EventLog>,
    missing: bool,
}

impl Clipboard for PageClipboard {
    async fn write_text(&self, text: &str) -> Result<(), String> {
        if self.missing {
            return Err("navigator.clipboard is undefined".to_string());
        }
        self.log.push(Event::ClipboardWrite(text.to_string()));
        Ok(())
    }
}

pub struct Page {
    log: Arc<EventLog>,
    exec_copy_fails: bool,
    scratch: Mutex<Option<String>>,
    next_node: AtomicU64,
}

impl PageDom for Page {
    fn append_scratch_textarea(&self, text: &str) -> Result<NodeId, String> {
        *self.scratch.lock().unwrap() = Some(text.to_string());
        Ok(NodeId(self.next_node.fetch_add(1, Ordering::Relaxed)))
    }

    fn select_contents(&self, _node: NodeId) {}

    fn exec_copy(&self) -> bool {
        if self.exec_copy_fails {
            return false;
        }
        match self.scratch.lock().unwrap().clone() {
            Some(text) => {
                self.log.push(Event::SelectionCopy(text));
                true
            }
            None => false,
        }
    }

    fn mount_banner(&self, view: &BannerView) -> Result<NodeId, String> {
        self.log.push(Event::BannerShown(view.kind));
        Ok(NodeId(self.next_node.fetch_add(1, Ordering::Relaxed)))
    }

    fn start_fade(&self, _node: NodeId) {
        self.log.push(Event::BannerFading);
    }

    fn remove_node(&self, _node: NodeId) {
        let was_scratch = self.scratch.lock().unwrap().take().is_some();
        if !was_scratch {
            self.log.push(Event::BannerRemoved);
        }
    }
}

pub struct FakeBrowser {
    pub log: Arc<EventLog>,
    options: Options,
    bridge: Bridge<PageClipboard, Page>,
}

impl FakeBrowser {
    pub fn new(options: Options) -> Self {
        let log = Arc::new(EventLog::default());
        let clipboard = PageClipboard {
            log: Arc::clone(&log),
            missing: options.clipboard_missing,
        };
        let page = Arc::new(Page {
            log: Arc::clone(&log),
            exec_copy_fails: options.exec_copy_fails,
            scratch: Mutex::new(None),
            next_node: AtomicU64::new(0),
        });
        let bridge = Bridge::new(clipboard, page, NotificationConfig::default());
        Self {
            log,
            options,
            bridge,
        }
    }
}

impl TabHost for FakeBrowser {
    async fn update_tab(&self, tab: TabId, url: &str) -> Result<(), String> {
        self.log.push(Event::UpdateRequested {
            tab,
            url: url.to_string(),
        });
        if self.options.reject_update.contains(&tab) {
            return Err(format!("No tab with id: {}.", tab));
        }
        Ok(())
    }

    fn open_restricted_popup(&self, tab: TabId) {
        self.log.push(Event::RestrictedPopup(tab));
    }
}

impl ScriptInjector for FakeBrowser {
    async fn execute(&self, tab: TabId, command: &BridgeCommand) -> Result<BridgeReport, InjectionError> {
        if self.options.block_injection.contains(&tab) {
            return Err(InjectionError::Rejected {
                tab,
                reason: "Cannot access contents of the page".to_string(),
            });
        }
        let payload = command.to_json()?;
        self.log.push(Event::Injected {
            tab,
            payload: payload.clone(),
        });
        let reply = self.bridge.handle_message(&payload).await?;
        BridgeReport::from_json(&reply)
    }
}

/// Config used by the cycle tests: no load timeout so the paused clock never trips it.
pub fn test_config() -> SitConfig {
    SitConfig {
        load_timeout_ms: 0,
        ..SitConfig::default()
    }
}

pub fn extension(options: Options) -> (Arc<Extension<FakeBrowser>>, Arc<FakeBrowser>) {
    extension_with(test_config(), options)
}

pub fn extension_with(config: SitConfig, options: Options) -> (Arc<Extension<FakeBrowser>>, Arc<FakeBrowser>) {
    let browser = Arc::new(FakeBrowser::new(options));
    let ext = Arc::new(Extension::new(config, Arc::clone(&browser)));
    (ext, browser)
}

/// Deliver a tab-updated event the way the host would, logging it first.
pub fn deliver(ext: &Extension<FakeBrowser>, browser: &FakeBrowser, tab: TabId, status: TabStatus) -> bool {
    browser.log.push(Event::Status { tab, status });
    ext.on_tab_updated(tab, status)
}

/// Yield until `tab`'s pending navigation reaches `AwaitingLoad`.
pub async fn until_awaiting_load(ext: &Extension<FakeBrowser>, tab: TabId) {
    for _ in 0..200 {
        if ext.navigation().pending().state(tab) == Some(NavState::AwaitingLoad) {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("tab {} never reached AwaitingLoad", tab);
}
