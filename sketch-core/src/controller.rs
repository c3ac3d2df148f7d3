//! Undo/redo sequencing on top of the snapshot store.
//!
//! The controller is the only thing that mutates a [`SnapshotStore`]. It
//! decides nothing about *what* is drawn; callers hand it captures at the
//! end of each completed interaction and repaint from whatever undo/redo
//! returns. After every change that actually happened it tells subscribers
//! the new undo/redo availability so affordances stay in sync.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{HistoryConfig, HistoryConfigError};
use crate::snapshot::Snapshot;
use crate::store::SnapshotStore;

/// Whether undo and redo would currently do anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Availability {
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Where the cursor sits relative to the recorded entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryState {
    Empty,
    /// One entry; oldest and newest at once.
    Single,
    AtOldest,
    AtNewest,
    Middle,
}

type Listener = Box<dyn FnMut(Availability)>;

pub struct HistoryController<P> {
    store: SnapshotStore<P>,
    listeners: Vec<Listener>,
}

impl<P> fmt::Debug for HistoryController<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryController")
            .field("len", &self.store.len())
            .field("cursor", &self.store.cursor())
            .field("capacity", &self.store.capacity())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<P> Default for HistoryController<P> {
    fn default() -> Self {
        Self {
            store: SnapshotStore::default(),
            listeners: Vec::new(),
        }
    }
}

impl<P> HistoryController<P> {
    pub fn new(config: HistoryConfig) -> Result<Self, HistoryConfigError> {
        info!(capacity = config.capacity, "creating history controller");
        Ok(Self {
            store: SnapshotStore::new(config)?,
            listeners: Vec::new(),
        })
    }

    /// Register a callback run with the new availability after each change.
    pub fn subscribe(&mut self, listener: impl FnMut(Availability) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Record the surface state after a completed interaction.
    pub fn record(&mut self, snapshot: Snapshot<P>) {
        self.store.record(snapshot);
        self.notify();
    }

    /// Move back one state and return the snapshot to repaint.
    ///
    /// Returns `None` without touching anything when already at the oldest
    /// state.
    pub fn undo(&mut self) -> Option<&Snapshot<P>> {
        if self.store.undo().is_none() {
            debug!("undo ignored: nothing earlier");
            return None;
        }
        info!(cursor = ?self.store.cursor(), len = self.store.len(), "undo");
        self.notify();
        self.store.current()
    }

    /// Move forward one state and return the snapshot to repaint.
    pub fn redo(&mut self) -> Option<&Snapshot<P>> {
        if self.store.redo().is_none() {
            debug!("redo ignored: nothing later");
            return None;
        }
        info!(cursor = ?self.store.cursor(), len = self.store.len(), "redo");
        self.notify();
        self.store.current()
    }

    pub fn can_undo(&self) -> bool {
        self.store.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.store.can_redo()
    }

    pub fn availability(&self) -> Availability {
        Availability {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    pub fn state(&self) -> HistoryState {
        match (self.store.cursor(), self.store.len()) {
            (None, _) => HistoryState::Empty,
            (Some(_), 1) => HistoryState::Single,
            (Some(0), _) => HistoryState::AtOldest,
            (Some(c), len) if c + 1 == len => HistoryState::AtNewest,
            (Some(_), _) => HistoryState::Middle,
        }
    }

    pub fn current(&self) -> Option<&Snapshot<P>> {
        self.store.current()
    }

    /// Read-only view of the underlying store.
    pub fn store(&self) -> &SnapshotStore<P> {
        &self.store
    }

    /// Discard all history, e.g. when the surface is reset.
    pub fn reset(&mut self) {
        self.store.clear();
        self.notify();
    }

    fn notify(&mut self) {
        let availability = self.availability();
        for listener in self.listeners.iter_mut() {
            listener(availability);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn snap(tag: u8) -> Snapshot<u8> {
        Snapshot::new(1, 1, vec![tag]).unwrap()
    }

    fn tag(s: Option<&Snapshot<u8>>) -> Option<u8> {
        s.map(|s| s.pixels()[0])
    }

    #[test]
    fn test_state_transitions() {
        let mut h = HistoryController::default();
        assert_eq!(h.state(), HistoryState::Empty);

        h.record(snap(0));
        assert_eq!(h.state(), HistoryState::Single);

        h.record(snap(1));
        h.record(snap(2));
        assert_eq!(h.state(), HistoryState::AtNewest);

        h.undo();
        assert_eq!(h.state(), HistoryState::Middle);

        h.undo();
        assert_eq!(h.state(), HistoryState::AtOldest);

        h.record(snap(3));
        assert_eq!(h.state(), HistoryState::AtNewest);
    }

    #[test]
    fn test_listeners_see_each_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut h = HistoryController::default();
        let sink = Rc::clone(&seen);
        h.subscribe(move |a| sink.borrow_mut().push(a));

        h.record(snap(0));
        h.record(snap(1));
        h.undo();
        h.redo();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 4);
        assert_eq!(
            seen[0],
            Availability {
                can_undo: false,
                can_redo: false
            }
        );
        assert_eq!(
            seen[2],
            Availability {
                can_undo: false,
                can_redo: true
            }
        );
        assert_eq!(
            seen[3],
            Availability {
                can_undo: true,
                can_redo: false
            }
        );
    }

    #[test]
    fn test_noop_undo_redo_do_not_notify() {
        let calls = Rc::new(RefCell::new(0));
        let mut h = HistoryController::default();
        h.record(snap(0));
        let counter = Rc::clone(&calls);
        h.subscribe(move |_| *counter.borrow_mut() += 1);

        assert!(h.undo().is_none());
        assert!(h.redo().is_none());
        assert_eq!(*calls.borrow(), 0);
        assert_eq!(tag(h.current()), Some(0));
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut h = HistoryController::default();
        h.record(snap(0));
        h.record(snap(1));
        h.record(snap(2));

        assert_eq!(tag(h.undo()), Some(1));
        assert_eq!(tag(h.undo()), Some(0));
        assert_eq!(tag(h.undo()), None);
        assert_eq!(tag(h.current()), Some(0));

        assert_eq!(tag(h.redo()), Some(1));
        h.record(snap(3));
        assert_eq!(tag(h.redo()), None);

        let entries: Vec<u8> = h.store().entries().iter().map(|s| s.pixels()[0]).collect();
        assert_eq!(entries, vec![0, 1, 3]);
    }

    #[test]
    fn test_reset_empties_and_notifies() {
        let last = Rc::new(RefCell::new(None));
        let mut h = HistoryController::default();
        h.record(snap(0));
        h.record(snap(1));
        let sink = Rc::clone(&last);
        h.subscribe(move |a| *sink.borrow_mut() = Some(a));

        h.reset();
        assert_eq!(h.state(), HistoryState::Empty);
        assert_eq!(*last.borrow(), Some(Availability::default()));
    }
}
