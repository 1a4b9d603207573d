//! Per-tab registry of pending load observers.
//!
//! Each coordinated navigation inserts one record keyed by its tab id and
//! removes it when it fires (or is superseded, closed, or abandoned). At most
//! one record exists per tab, so concurrent activations on different tabs
//! never see each other.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;

use crate::error::NavigationError;
use crate::host::{TabId, TabStatus};

/// Where a registered navigation is in its lifecycle.
///
/// `Idle` is "no record", and `LoadComplete`/`Deregistered` are "record removed
/// after firing", so only the two waiting states are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    /// Update sent to the host, not yet acknowledged. `complete` events still
    /// belong to the previous document and are ignored.
    NavigationIssued,
    /// Update acknowledged; the next `complete` for this tab fires the record.
    AwaitingLoad,
}

pub(crate) type LoadVerdict = Result<(), NavigationError>;

struct PendingLoad {
    generation: u64,
    state: NavState,
    done: oneshot::Sender<LoadVerdict>,
}

/// Handle returned by [`PendingLoads::register`].
pub(crate) struct Registration {
    pub(crate) generation: u64,
    pub(crate) done: oneshot::Receiver<LoadVerdict>,
}

#[derive(Default)]
pub struct PendingLoads {
    entries: Mutex<HashMap<TabId, PendingLoad>>,
    next_generation: AtomicU64,
}

impl PendingLoads {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<TabId, PendingLoad>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a fresh `NavigationIssued` record for `tab`. An older record for
    /// the same tab is resolved with `Superseded` so it can never fire.
    pub(crate) fn register(&self, tab: TabId) -> Registration {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = oneshot::channel();
        let previous = self.entries().insert(
            tab,
            PendingLoad {
                generation,
                state: NavState::NavigationIssued,
                done: tx,
            },
        );
        if let Some(old) = previous {
            tracing::debug!(tab_id = tab.0, generation = old.generation, "pending navigation superseded");
            let _ = old.done.send(Err(NavigationError::Superseded { tab }));
        }
        Registration {
            generation,
            done: rx,
        }
    }

    /// Host accepted the update: move to `AwaitingLoad`. Returns false if the
    /// record is gone or belongs to a newer activation.
    pub(crate) fn acknowledge(&self, tab: TabId, generation: u64) -> bool {
        match self.entries().get_mut(&tab) {
            Some(entry) if entry.generation == generation => {
                entry.state = NavState::AwaitingLoad;
                true
            }
            _ => false,
        }
    }

    /// Feed a tab-updated event. Fires and removes the record on `complete`
    /// while `AwaitingLoad`. Returns true if a record fired.
    pub fn on_status(&self, tab: TabId, status: TabStatus) -> bool {
        if status != TabStatus::Complete {
            return false;
        }
        let mut entries = self.entries();
        let ready = matches!(
            entries.get(&tab),
            Some(entry) if entry.state == NavState::AwaitingLoad
        );
        if !ready {
            return false;
        }
        match entries.remove(&tab) {
            Some(entry) => {
                let _ = entry.done.send(Ok(()));
                true
            }
            None => false,
        }
    }

    /// The tab went away; any waiter for it ends with `TabClosed`.
    pub fn on_removed(&self, tab: TabId) {
        if let Some(entry) = self.entries().remove(&tab) {
            let _ = entry.done.send(Err(NavigationError::TabClosed { tab }));
        }
    }

    /// Drop the record if it is still ours (update rejected, timed out).
    pub(crate) fn abandon(&self, tab: TabId, generation: u64) {
        let mut entries = self.entries();
        if entries.get(&tab).is_some_and(|e| e.generation == generation) {
            entries.remove(&tab);
        }
    }

    pub fn state(&self, tab: TabId) -> Option<NavState> {
        self.entries().get(&tab).map(|e| e.state)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
