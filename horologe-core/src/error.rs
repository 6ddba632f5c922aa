//! Clock subsystem errors
//!
//! None of these are fatal. The orchestrator reports them, degrades the
//! display, and tries again on the next tick.

/// Faults observed while keeping time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Bus transaction timed out
    BusTimeout,
    /// Device did not acknowledge its address or a data byte
    BusNack,
    /// Any other bus-level failure (arbitration loss, bus error, overrun)
    BusFault,
    /// Register contents decoded to an out-of-range field
    InvalidRegisterData,
    /// Persistent store could not be read or written
    StoreUnavailable,
    /// RTC read-back after a correction did not match what was written
    SyncVerificationFailed,
    /// A rejected correction could not be undone; RTC contents are unverified
    RollbackFailed,
    /// Epoch cannot be represented as a calendar time in range
    InvalidTime,
}

impl ClockError {
    /// Check if this fault came from the hardware bus
    pub fn is_bus_fault(&self) -> bool {
        matches!(
            self,
            ClockError::BusTimeout | ClockError::BusNack | ClockError::BusFault
        )
    }

    /// Short lowercase description for the status line
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockError::BusTimeout => "bus timeout",
            ClockError::BusNack => "no ack",
            ClockError::BusFault => "bus fault",
            ClockError::InvalidRegisterData => "bad register data",
            ClockError::StoreUnavailable => "store unavailable",
            ClockError::SyncVerificationFailed => "sync verify failed",
            ClockError::RollbackFailed => "sync rollback failed",
            ClockError::InvalidTime => "invalid time",
        }
    }
}
