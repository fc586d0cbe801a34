//! Transfer instrumentation.
//!
//! Lock-free counters updated from both interrupt and foreground context
//! with relaxed ordering; they feed diagnostics and the contention tests,
//! never control flow.

use core::sync::atomic::{AtomicU32, Ordering};

/// Per-display activity counters. Index 0 is the main display, 1 the sub.
pub(crate) struct DriverStats {
    transfers_issued: [AtomicU32; 2],
    contended_skips: [AtomicU32; 2],
    flushes: [AtomicU32; 2],
}

impl DriverStats {
    pub(crate) const fn new() -> Self {
        Self {
            transfers_issued: [AtomicU32::new(0), AtomicU32::new(0)],
            contended_skips: [AtomicU32::new(0), AtomicU32::new(0)],
            flushes: [AtomicU32::new(0), AtomicU32::new(0)],
        }
    }

    /// A vblank copy was started for display `idx`.
    pub(crate) fn record_transfer(&self, idx: usize) {
        self.transfers_issued[idx].fetch_add(1, Ordering::Relaxed);
    }

    /// A vblank found display `idx`'s mid buffer locked and skipped it.
    pub(crate) fn record_skip(&self, idx: usize) {
        self.contended_skips[idx].fetch_add(1, Ordering::Relaxed);
    }

    /// A flush into display `idx`'s mid buffer completed.
    pub(crate) fn record_flush(&self, idx: usize) {
        self.flushes[idx].fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, idx: usize) -> StatsSnapshot {
        StatsSnapshot {
            transfers_issued: self.transfers_issued[idx].load(Ordering::Relaxed),
            contended_skips: self.contended_skips[idx].load(Ordering::Relaxed),
            flushes: self.flushes[idx].load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of one display's counters.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatsSnapshot {
    /// Mid-to-front copies started by the vblank handler.
    pub transfers_issued: u32,
    /// Vblank intervals skipped because a flush held the mid buffer.
    pub contended_skips: u32,
    /// Dirty-region flushes written into the mid buffer.
    pub flushes: u32,
}

// =============================================================================
// Tests
// =============================================================================
