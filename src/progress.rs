//! Progress reporting seam between the controllers and any UI.
//!
//! Controllers never touch a terminal; they emit events through this trait
//! and an outer adapter (the CLI, or nothing at all) renders them.

use crate::stats::TransferStats;

/// Trait for receiving transfer progress updates.
///
/// Implement this trait to observe upload or download operations. All
/// methods have default no-op implementations for convenience.
pub trait TransferProgress: Send + Sync {
    /// Called once when a transfer starts, with the total raw byte count.
    fn on_transfer_start(&self, _name: &str, _total_bytes: u64) {}

    /// Called after each part completes, with the part's raw byte length.
    fn on_part(&self, _index: u64, _raw_len: u64) {}

    /// Called when the transfer completes successfully.
    fn on_transfer_complete(&self, _name: &str, _stats: &TransferStats) {}

    /// Called when the transfer fails.
    fn on_error(&self, _name: &str, _error: &str) {}
}

/// A null progress implementation that ignores all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl TransferProgress for NoProgress {}
