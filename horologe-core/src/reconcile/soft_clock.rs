//! Uptime-based fallback clock

/// Epoch extrapolated from system uptime
///
/// Used only while the RTC cannot be written. Unseeded until a time is
/// known from somewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoftwareClock {
    /// (epoch, uptime in ms at which it was valid)
    anchor: Option<(i64, u64)>,
}

impl SoftwareClock {
    /// Create an unseeded clock
    pub const fn new() -> Self {
        Self { anchor: None }
    }

    /// Anchor the clock at `epoch` as of `uptime_ms`
    pub fn seed(&mut self, epoch: i64, uptime_ms: u64) {
        self.anchor = Some((epoch, uptime_ms));
    }

    /// Forget the anchor
    pub fn clear(&mut self) {
        self.anchor = None;
    }

    pub fn is_seeded(&self) -> bool {
        self.anchor.is_some()
    }

    /// Current epoch, if seeded
    pub fn now(&self, uptime_ms: u64) -> Option<i64> {
        let (epoch, at) = self.anchor?;
        let elapsed_s = uptime_ms.saturating_sub(at) / 1000;
        Some(epoch.saturating_add(i64::try_from(elapsed_s).unwrap_or(i64::MAX)))
    }
}
