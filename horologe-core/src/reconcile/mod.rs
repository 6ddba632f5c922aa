//! Time source reconciliation
//!
//! The orchestrator decides which source is authoritative at boot, applies
//! network corrections handed over through the [`SyncLatch`], and republishes
//! the chosen time on every tick.

pub mod orchestrator;
pub mod render;
pub mod soft_clock;
pub mod sync;

pub use orchestrator::{BootReport, Correction, Orchestrator, TickOutcome, VERIFY_TOLERANCE_S};
pub use render::{DialReading, StatusLine};
pub use soft_clock::SoftwareClock;
pub use sync::{SyncLatch, SyncState};

/// Where the current time came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeSource {
    /// RTC already held a plausible time
    Rtc,
    /// Restored from the last network-verified epoch in the store
    CachedEpoch,
    /// Restored from the firmware build timestamp
    BuildFallback,
    /// Written from a network correction
    Network,
    /// Free-running uptime counter; the RTC could not be written
    Software,
}
