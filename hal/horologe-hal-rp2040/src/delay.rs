//! Busy-wait delay

use embassy_time::{block_for, Duration};
use horologe_hal::DelayUs;

/// Spins on the embassy time driver
///
/// Blocks the executor, so only use it for the few microseconds a
/// bit-banged transfer needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusyDelay;

impl DelayUs for BusyDelay {
    fn delay_us(&mut self, us: u32) {
        block_for(Duration::from_micros(u64::from(us)));
    }
}
