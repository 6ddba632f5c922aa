//! Events that trigger state transitions

/// Events produced by the orchestrator as it probes its time sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockEvent {
    /// RTC answered with a plausible year
    RtcValid,
    /// RTC was implausible and has been rewritten from the cache or build fallback
    RtcRestored,
    /// RTC could not be read or written
    RtcUnavailable,
    /// A network correction was written and verified
    SyncApplied,
    /// Periodic republishing has begun
    TickStarted,
}

impl ClockEvent {
    /// Check if this event leaves the RTC holding a trusted time
    pub fn establishes_time(&self) -> bool {
        matches!(
            self,
            ClockEvent::RtcValid | ClockEvent::RtcRestored | ClockEvent::SyncApplied
        )
    }
}
