//! Persistence layer
//!
//! The store itself never touches the filesystem. Saving and restoring go
//! through whole-graph snapshots, encoded as JSON or bincode.

pub mod snapshot;

pub use snapshot::{
    load_snapshot, save_snapshot, GraphSnapshot, ParseSnapshotFormatError, SnapshotError,
    SnapshotFormat, SnapshotResult, SNAPSHOT_VERSION,
};
