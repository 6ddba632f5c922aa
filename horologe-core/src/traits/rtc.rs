//! Real-time clock trait

use crate::error::ClockError;
use crate::time::CivilTime;

/// Battery-backed calendar clock
///
/// Each call is one bus transaction. Implementations must not retry
/// internally and must not leave the device half-written on failure;
/// retry policy belongs to the caller.
pub trait RtcClock {
    /// Read the current time (UTC)
    fn read(&mut self) -> Result<CivilTime, ClockError>;

    /// Set the current time (UTC)
    fn write(&mut self, time: &CivilTime) -> Result<(), ClockError>;
}
