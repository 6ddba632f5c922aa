//! Numeric clock display trait

/// Fixed non-numeric patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pattern {
    /// No authoritative time yet (also shown when the RTC is unreadable at boot)
    Waiting,
    /// Time source faulted on this tick
    Fault,
}

/// Four-digit display with a centre colon
///
/// Display buses of this class do not report delivery failures, so none
/// of these operations return an error.
pub trait ClockDisplay {
    /// Power the display on at the given brightness (0-7) and blank it
    fn initialize(&mut self, brightness: u8);

    /// Show `hh:mm`, hour tens blanked below 10
    fn render(&mut self, hh: u8, mm: u8, colon: bool);

    /// Show one of the fixed patterns
    fn show_pattern(&mut self, pattern: Pattern);
}
