//! Network sync handoff
//!
//! The network side posts corrections, the clock task takes them. Only the
//! latest correction matters, so the latch holds at most one.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Whether a correction is waiting to be applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncState {
    /// Nothing pending
    Unsynced,
    /// A correction was delivered and has not been consumed yet
    Synced,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    pending: Option<i64>,
    ever_synced: bool,
}

/// Single-writer, single-reader correction latch
///
/// Safe to place in a `static` with a `CriticalSectionRawMutex`.
pub struct SyncLatch<M: RawMutex> {
    slot: Mutex<M, Cell<Slot>>,
}

impl<M: RawMutex> SyncLatch<M> {
    /// Create an empty latch
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Cell::new(Slot {
                pending: None,
                ever_synced: false,
            })),
        }
    }

    /// Deliver a corrected epoch, replacing any correction not yet taken
    pub fn post(&self, epoch: i64) {
        self.slot.lock(|slot| {
            slot.set(Slot {
                pending: Some(epoch),
                ever_synced: true,
            })
        });
    }

    /// Take the pending correction, clearing it
    pub fn take(&self) -> Option<i64> {
        self.slot.lock(|slot| {
            let mut s = slot.get();
            let pending = s.pending.take();
            slot.set(s);
            pending
        })
    }

    /// Check if the network source has delivered at least one correction
    pub fn is_synced(&self) -> bool {
        self.slot.lock(|slot| slot.get().ever_synced)
    }

    /// Current handoff state
    pub fn state(&self) -> SyncState {
        self.slot.lock(|slot| match slot.get().pending {
            Some(_) => SyncState::Synced,
            None => SyncState::Unsynced,
        })
    }
}

impl<M: RawMutex> Default for SyncLatch<M> {
    fn default() -> Self {
        Self::new()
    }
}
