//! Ordered snapshot storage with a cursor and a capacity bound.

use tracing::{debug, trace};

use crate::config::{HistoryConfig, HistoryConfigError};
use crate::snapshot::Snapshot;

/// Linear history of snapshots.
///
/// `cursor` is `None` while empty; otherwise it indexes the snapshot that
/// represents what is on the surface right now. Entries before it can be
/// undone to, entries after it can be redone to.
#[derive(Debug, Clone)]
pub struct SnapshotStore<P> {
    entries: Vec<Snapshot<P>>,
    cursor: Option<usize>,
    capacity: usize,
}

impl<P> Default for SnapshotStore<P> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            capacity: HistoryConfig::default().capacity,
        }
    }
}

impl<P> SnapshotStore<P> {
    pub fn new(config: HistoryConfig) -> Result<Self, HistoryConfigError> {
        config.validate()?;
        Ok(Self {
            entries: Vec::with_capacity(config.capacity.min(64)),
            cursor: None,
            capacity: config.capacity,
        })
    }

    /// Store a new current state.
    ///
    /// Truncates the redo branch, appends, then evicts the oldest entry if
    /// the append pushed the store past capacity.
    pub fn record(&mut self, snapshot: Snapshot<P>) {
        let dropped = self.truncate_forward();
        self.entries.push(snapshot);
        self.cursor = Some(self.entries.len() - 1);
        let evicted = self.evict_oldest_if_over_capacity();

        debug!(
            len = self.entries.len(),
            cursor = ?self.cursor,
            dropped,
            evicted,
            "snapshot recorded"
        );
    }

    /// Drop every entry after the cursor. Returns how many were dropped.
    pub fn truncate_forward(&mut self) -> usize {
        let keep = match self.cursor {
            Some(cursor) => cursor + 1,
            None => 0,
        };
        let dropped = self.entries.len().saturating_sub(keep);
        if dropped > 0 {
            trace!(keep, dropped, "discarding redo branch");
            self.entries.truncate(keep);
        }
        dropped
    }

    /// Remove the oldest entry when over capacity, keeping the cursor on
    /// the same snapshot.
    ///
    /// Only sound straight after an append, when the cursor sits on the last
    /// entry and therefore never on index 0 of an over-full store.
    pub(crate) fn evict_oldest_if_over_capacity(&mut self) -> bool {
        if self.entries.len() <= self.capacity {
            return false;
        }
        debug_assert_eq!(self.cursor, Some(self.entries.len() - 1));

        self.entries.remove(0);
        self.cursor = self.cursor.map(|c| c.saturating_sub(1));
        trace!(capacity = self.capacity, "evicted oldest snapshot");
        true
    }

    /// Step back one entry. `None` when there is no earlier state.
    pub fn undo(&mut self) -> Option<&Snapshot<P>> {
        if !self.can_undo() {
            return None;
        }
        let cursor = self.cursor? - 1;
        self.cursor = Some(cursor);
        self.entries.get(cursor)
    }

    /// Step forward one entry. `None` when there is no later state.
    pub fn redo(&mut self) -> Option<&Snapshot<P>> {
        if !self.can_redo() {
            return None;
        }
        let cursor = self.cursor? + 1;
        self.cursor = Some(cursor);
        self.entries.get(cursor)
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.entries.len())
    }

    /// Snapshot at the cursor.
    pub fn current(&self) -> Option<&Snapshot<P>> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> &[Snapshot<P>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        debug!(len = self.entries.len(), "clearing snapshot store");
        self.entries.clear();
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(tag: u8) -> Snapshot<u8> {
        Snapshot::new(2, 1, vec![tag, tag]).unwrap()
    }

    fn tags(store: &SnapshotStore<u8>) -> Vec<u8> {
        store.entries().iter().map(|s| s.pixels()[0]).collect()
    }

    fn store_with(capacity: usize, count: u8) -> SnapshotStore<u8> {
        let mut store = SnapshotStore::new(HistoryConfig { capacity }).unwrap();
        for tag in 0..count {
            store.record(snap(tag));
        }
        store
    }

    #[test]
    fn test_new_store_is_empty() {
        let store: SnapshotStore<u8> = SnapshotStore::default();
        assert!(store.is_empty());
        assert_eq!(store.cursor(), None);
        assert_eq!(store.capacity(), 50);
        assert!(!store.can_undo());
        assert!(!store.can_redo());
        assert!(store.current().is_none());
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert!(SnapshotStore::<u8>::new(HistoryConfig { capacity: 0 }).is_err());
    }

    #[test]
    fn test_record_moves_cursor_to_newest() {
        let store = store_with(50, 3);
        assert_eq!(store.len(), 3);
        assert_eq!(store.cursor(), Some(2));
        assert_eq!(store.current().map(|s| s.pixels()[0]), Some(2));
        assert!(store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let mut store: SnapshotStore<u8> = SnapshotStore::default();
        assert!(store.undo().is_none());
        assert!(store.redo().is_none());
        assert_eq!(store.cursor(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_undo_at_oldest_is_noop() {
        let mut store = store_with(50, 1);
        assert!(store.undo().is_none());
        assert_eq!(store.cursor(), Some(0));
        assert_eq!(tags(&store), vec![0]);
    }

    #[test]
    fn test_redo_at_newest_is_noop() {
        let mut store = store_with(50, 3);
        assert!(store.redo().is_none());
        assert_eq!(store.cursor(), Some(2));
        assert_eq!(tags(&store), vec![0, 1, 2]);
    }

    #[test]
    fn test_undo_then_redo_restores_same_snapshot() {
        for start in 1..5u8 {
            let mut store = store_with(50, 5);
            for _ in 0..(4 - start) {
                store.undo();
            }
            let before = store.current().cloned().unwrap();
            store.undo().unwrap();
            let after = store.redo().cloned().unwrap();
            assert_eq!(before, after);
            assert_eq!(store.cursor(), Some(start as usize));
        }
    }

    #[test]
    fn test_record_after_undo_truncates_branch() {
        let mut store = store_with(50, 3);
        store.undo();
        assert_eq!(store.cursor(), Some(1));

        store.record(snap(3));
        assert_eq!(tags(&store), vec![0, 1, 3]);
        assert_eq!(store.cursor(), Some(2));
        assert!(store.redo().is_none());
    }

    #[test]
    fn test_truncate_forward_reports_dropped() {
        let mut store = store_with(50, 4);
        store.undo();
        store.undo();
        assert_eq!(store.truncate_forward(), 2);
        assert_eq!(tags(&store), vec![0, 1]);
        assert_eq!(store.truncate_forward(), 0);
        assert!(!store.can_redo());
    }

    #[test]
    fn test_truncate_forward_on_empty() {
        let mut store: SnapshotStore<u8> = SnapshotStore::default();
        assert_eq!(store.truncate_forward(), 0);
    }

    #[test]
    fn test_capacity_never_exceeded() {
        let mut store = SnapshotStore::new(HistoryConfig::default()).unwrap();
        for tag in 0..120u8 {
            store.record(snap(tag));
            assert!(store.len() <= 50);
            assert_eq!(store.cursor(), Some(store.len() - 1));
        }
        assert_eq!(store.entries()[0].pixels()[0], 70);
    }

    #[test]
    fn test_eviction_keeps_current_and_availability() {
        let mut store = store_with(50, 50);
        let before = (store.can_undo(), store.can_redo());

        store.record(snap(50));
        assert_eq!(store.len(), 50);
        assert_eq!(store.cursor(), Some(49));
        assert_eq!(store.current().map(|s| s.pixels()[0]), Some(50));
        assert_eq!(store.entries()[0].pixels()[0], 1);
        assert_eq!((store.can_undo(), store.can_redo()), before);
    }

    #[test]
    fn test_evict_is_noop_under_capacity() {
        let mut store = store_with(3, 3);
        assert!(!store.evict_oldest_if_over_capacity());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_capacity_one_keeps_only_latest() {
        let mut store = store_with(1, 4);
        assert_eq!(tags(&store), vec![3]);
        assert_eq!(store.cursor(), Some(0));
        assert!(!store.can_undo());
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut store = store_with(50, 3);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.cursor(), None);
    }
}
