//! Transfer statistics types.

use std::time::{Duration, Instant};

/// Statistics for a single completed transfer.
#[derive(Debug, Clone)]
pub struct TransferStats {
    /// Raw bytes moved (pre-encoding size).
    pub bytes: u64,
    /// Number of parts exchanged.
    pub parts: u64,
    /// Wall-clock time from first request to completion.
    pub elapsed: Duration,
}

impl TransferStats {
    /// Returns the average raw-byte throughput in bytes per second.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn average_speed(&self) -> u64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.bytes as f64 / secs) as u64
        } else {
            0
        }
    }
}

/// Accumulates part counts and byte totals while a transfer runs.
pub(crate) struct TransferTracker {
    started: Instant,
    bytes: u64,
    parts: u64,
}

impl TransferTracker {
    pub(crate) fn start() -> Self {
        Self {
            started: Instant::now(),
            bytes: 0,
            parts: 0,
        }
    }

    pub(crate) fn record_part(&mut self, raw_len: u64) {
        self.bytes += raw_len;
        self.parts += 1;
    }

    pub(crate) fn finish(self) -> TransferStats {
        TransferStats {
            bytes: self.bytes,
            parts: self.parts,
            elapsed: self.started.elapsed(),
        }
    }
}
