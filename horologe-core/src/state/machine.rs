//! State machine definition
//!
//! What the clock renders on each tick is a function of the current state.

use super::events::ClockEvent;

/// Reconciliation states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockState {
    /// Power-on, no source probed yet
    Booting,
    /// RTC holds a trusted time; ticking has not started
    RtcAuthoritative,
    /// RTC unusable; only a network correction can establish time
    AwaitingNetworkFix,
    /// Republishing the RTC time every tick
    Steady,
}

impl ClockState {
    /// Check if the RTC is the source of displayed time in this state
    pub fn rtc_trusted(&self) -> bool {
        matches!(self, ClockState::RtcAuthoritative | ClockState::Steady)
    }

    /// Check if the clock is running without a usable RTC
    pub fn is_degraded(&self) -> bool {
        matches!(self, ClockState::AwaitingNetworkFix)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: ClockEvent) -> Self {
        use ClockEvent::*;
        use ClockState::*;

        match (self, event) {
            // Boot probing, or a later probe or network fix while degraded
            (Booting | AwaitingNetworkFix, e) if e.establishes_time() => RtcAuthoritative,
            (Booting, RtcUnavailable) => AwaitingNetworkFix,

            // A verified correction re-establishes the RTC
            (Steady | RtcAuthoritative, SyncApplied) => RtcAuthoritative,

            (RtcAuthoritative, TickStarted) => Steady,

            // Read faults while steady are per-tick; they do not demote the RTC
            _ => self,
        }
    }
}
