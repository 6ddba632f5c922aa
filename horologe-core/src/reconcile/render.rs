//! Render policy for the display and the status line

use core::fmt::Write;

use heapless::String;

use crate::error::ClockError;
use crate::time::CivilTime;

/// Status line capacity
pub const STATUS_LINE_LEN: usize = 48;

/// One human-readable status line
pub type StatusLine = String<STATUS_LINE_LEN>;

/// Shown until the first valid time is obtained
pub const WAITING_LINE: &str = "waiting for time sync";

/// What the four digits show for a given local time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DialReading {
    /// 1-12
    pub hour: u8,
    pub minute: u8,
    /// Lit on even seconds
    pub colon: bool,
}

impl DialReading {
    pub fn from_local(local: &CivilTime) -> Self {
        let (hour, _) = local.hour12();
        Self {
            hour,
            minute: local.minute(),
            colon: local.second() % 2 == 0,
        }
    }
}

/// Format `hh:mm:ss AM DD-MM-YYYY ZONE`
pub fn status_line(local: &CivilTime, zone: &str) -> StatusLine {
    let (hour, pm) = local.hour12();
    let mut line = StatusLine::new();
    // Cannot overflow: the longest line is well under capacity
    let _ = write!(
        line,
        "{:02}:{:02}:{:02} {} {:02}-{:02}-{:04} {}",
        hour,
        local.minute(),
        local.second(),
        if pm { "PM" } else { "AM" },
        local.day(),
        local.month(),
        local.year(),
        zone
    );
    line
}

/// Format `RTC fault: <reason>`
pub fn fault_line(err: ClockError) -> StatusLine {
    let mut line = StatusLine::new();
    let _ = write!(line, "RTC fault: {}", err.as_str());
    line
}
