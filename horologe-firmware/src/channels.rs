//! Inter-task communication
//!
//! Static signals shared between the clock task and the link tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use horologe_core::reconcile::{StatusLine, SyncLatch};

/// Latest network time, written by the link and consumed by the clock
pub static SYNC_LATCH: SyncLatch<CriticalSectionRawMutex> = SyncLatch::new();

/// Wakes the clock task when a new network time is latched
pub static SYNC_NOTIFY: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Most recent status line, sent over the link by the TX task
pub static STATUS_LINE: Signal<CriticalSectionRawMutex, StatusLine> = Signal::new();

/// Outcome of the last network correction (true = applied)
pub static SYNC_RESULT: Signal<CriticalSectionRawMutex, bool> = Signal::new();

/// Signal that a heartbeat (PING) was received from the link peer
pub static HEARTBEAT_RECEIVED: Signal<CriticalSectionRawMutex, ()> = Signal::new();
