//! Clock configuration

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum zone label length
pub const MAX_ZONE_LEN: usize = 8;

/// Brightness range of the display (3-bit field)
pub const MAX_BRIGHTNESS: u8 = 7;

/// Years the RTC can hold (two BCD digits on a fixed century)
pub const RTC_YEAR_RANGE: core::ops::RangeInclusive<u16> = 2000..=2099;

/// Accepted tick periods in milliseconds
pub const TICK_MS_RANGE: core::ops::RangeInclusive<u32> = 100..=60_000;

/// Accepted UTC offsets in minutes (UTC-12:00 to UTC+14:00)
pub const UTC_OFFSET_RANGE: core::ops::RangeInclusive<i16> = -720..=840;

/// Clock behavior configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockConfig {
    /// RTC years below this are treated as an uninitialized clock
    pub min_valid_year: u16,
    /// Local time offset from UTC, in minutes
    pub utc_offset_minutes: i16,
    /// Zone label appended to the status line
    pub zone: String<MAX_ZONE_LEN>,
    /// Republish period
    pub tick_ms: u32,
    /// Display brightness (0-7)
    pub brightness: u8,
}

impl Default for ClockConfig {
    fn default() -> Self {
        let mut zone = String::new();
        let _ = zone.push_str("UTC");

        Self {
            min_valid_year: 2023,
            utc_offset_minutes: 0,
            zone,
            tick_ms: 1000,
            brightness: 4,
        }
    }
}

/// A configuration value outside its accepted range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `min_valid_year` outside the RTC's representable years
    MinValidYear,
    /// `utc_offset_minutes` outside UTC-12:00..UTC+14:00
    UtcOffset,
    /// `tick_ms` outside 100..=60000
    TickPeriod,
    /// `brightness` above 7
    Brightness,
    /// Empty zone label
    Zone,
}

impl ClockConfig {
    /// Check every field against its accepted range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !RTC_YEAR_RANGE.contains(&self.min_valid_year) {
            return Err(ConfigError::MinValidYear);
        }
        if !UTC_OFFSET_RANGE.contains(&self.utc_offset_minutes) {
            return Err(ConfigError::UtcOffset);
        }
        if !TICK_MS_RANGE.contains(&self.tick_ms) {
            return Err(ConfigError::TickPeriod);
        }
        if self.brightness > MAX_BRIGHTNESS {
            return Err(ConfigError::Brightness);
        }
        if self.zone.is_empty() {
            return Err(ConfigError::Zone);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ClockConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.min_valid_year, 2023);
        assert_eq!(config.zone.as_str(), "UTC");
    }

    #[test]
    fn test_range_checks() {
        let mut config = ClockConfig::default();
        config.brightness = 8;
        assert_eq!(config.validate(), Err(ConfigError::Brightness));

        let mut config = ClockConfig::default();
        config.min_valid_year = 1999;
        assert_eq!(config.validate(), Err(ConfigError::MinValidYear));

        let mut config = ClockConfig::default();
        config.utc_offset_minutes = 900;
        assert_eq!(config.validate(), Err(ConfigError::UtcOffset));

        let mut config = ClockConfig::default();
        config.tick_ms = 10;
        assert_eq!(config.validate(), Err(ConfigError::TickPeriod));

        let mut config = ClockConfig::default();
        config.zone.clear();
        assert_eq!(config.validate(), Err(ConfigError::Zone));
    }
}
