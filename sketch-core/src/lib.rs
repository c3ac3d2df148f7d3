//! sketch-core: bounded undo/redo history over raster canvas snapshots.
//!
//! Design rules:
//! - History stores whole-canvas pixel captures, never stroke commands.
//! - Recording after an undo drops the redo branch.
//! - Memory is bounded by evicting the oldest snapshot, never by failing.
//! - Every operation is total; no-ops are reported as `None`/`false`.

pub mod config;
pub mod controller;
pub mod snapshot;
pub mod store;

pub use config::{HistoryConfig, HistoryConfigError, DEFAULT_HISTORY_CAPACITY};
pub use controller::{Availability, HistoryController, HistoryState};
pub use snapshot::{Snapshot, SnapshotError};
pub use store::SnapshotStore;
