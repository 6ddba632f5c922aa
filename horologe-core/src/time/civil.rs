//! Normalized calendar time
//!
//! `CivilTime` is only produced through validated paths: [`CivilTime::new`],
//! [`CivilTime::from_epoch`], or a register decoder that goes through `new`.
//! Weekday is always derived from the date, so two values with the same
//! date and time compare equal regardless of where they came from.

use chrono::{DateTime, Datelike, NaiveDate, Timelike};

/// Earliest representable year
pub const MIN_YEAR: u16 = 1900;

/// Calendar date and time of day, second resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CivilTime {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    /// 0 = Sunday .. 6 = Saturday
    weekday: u8,
}

impl CivilTime {
    /// Build a validated calendar time
    ///
    /// Returns `None` if any field is out of range, including days past the
    /// end of the month.
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Option<Self> {
        if year < MIN_YEAR || hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        let date = NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))?;

        Some(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            weekday: date.weekday().num_days_from_sunday() as u8,
        })
    }

    /// Convert seconds since 1970-01-01T00:00:00Z
    pub fn from_epoch(epoch: i64) -> Option<Self> {
        let dt = DateTime::from_timestamp(epoch, 0)?;
        let year = u16::try_from(dt.year()).ok()?;

        Self::new(
            year,
            dt.month() as u8,
            dt.day() as u8,
            dt.hour() as u8,
            dt.minute() as u8,
            dt.second() as u8,
        )
    }

    /// Seconds since 1970-01-01T00:00:00Z
    pub fn to_epoch(&self) -> i64 {
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )
        .and_then(|date| {
            date.and_hms_opt(
                u32::from(self.hour),
                u32::from(self.minute),
                u32::from(self.second),
            )
        })
        // Fields were validated on construction
        .map_or(0, |dt| dt.and_utc().timestamp())
    }

    /// Shift by a number of minutes (used for local-time rendering)
    pub fn offset_by(&self, minutes: i32) -> Option<Self> {
        Self::from_epoch(self.to_epoch() + i64::from(minutes) * 60)
    }

    /// Hour on a 12-hour dial and whether it is PM
    ///
    /// Midnight and noon both show as 12.
    pub fn hour12(&self) -> (u8, bool) {
        let h = self.hour % 12;
        (if h == 0 { 12 } else { h }, self.hour >= 12)
    }

    /// Absolute year
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Month, 1-12
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Day of month, 1-31
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Hour, 0-23
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute, 0-59
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Second, 0-59
    pub fn second(&self) -> u8 {
        self.second
    }

    /// Day of week, 0 = Sunday .. 6 = Saturday
    pub fn weekday(&self) -> u8 {
        self.weekday
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rejects_out_of_range_fields() {
        assert!(CivilTime::new(1899, 12, 31, 0, 0, 0).is_none());
        assert!(CivilTime::new(2024, 0, 1, 0, 0, 0).is_none());
        assert!(CivilTime::new(2024, 13, 1, 0, 0, 0).is_none());
        assert!(CivilTime::new(2023, 2, 29, 0, 0, 0).is_none());
        assert!(CivilTime::new(2024, 1, 1, 24, 0, 0).is_none());
        assert!(CivilTime::new(2024, 1, 1, 0, 60, 0).is_none());
        assert!(CivilTime::new(2024, 1, 1, 0, 0, 60).is_none());

        // Leap day is fine in a leap year
        assert!(CivilTime::new(2024, 2, 29, 0, 0, 0).is_some());
    }

    #[test]
    fn test_known_epochs() {
        let t = CivilTime::from_epoch(946_684_800).unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2000, 1, 1));
        assert_eq!((t.hour(), t.minute(), t.second()), (0, 0, 0));
        assert_eq!(t.weekday(), 6); // Saturday

        let t = CivilTime::from_epoch(1_704_067_200).unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2024, 1, 1));
        assert_eq!(t.weekday(), 1); // Monday

        let t = CivilTime::new(1970, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(t.to_epoch(), 0);
        assert_eq!(t.weekday(), 4); // Thursday
    }

    #[test]
    fn test_hour12() {
        let at = |h| CivilTime::new(2024, 1, 1, h, 0, 0).unwrap().hour12();
        assert_eq!(at(0), (12, false));
        assert_eq!(at(1), (1, false));
        assert_eq!(at(11), (11, false));
        assert_eq!(at(12), (12, true));
        assert_eq!(at(13), (1, true));
        assert_eq!(at(23), (11, true));
    }

    #[test]
    fn test_offset_crosses_midnight() {
        // 2024-01-01 20:00 UTC is 2024-01-02 01:30 in UTC+5:30
        let utc = CivilTime::new(2024, 1, 1, 20, 0, 0).unwrap();
        let local = utc.offset_by(330).unwrap();
        assert_eq!((local.day(), local.hour(), local.minute()), (2, 1, 30));
        assert_eq!(local.weekday(), 2);
    }

    #[test]
    fn test_epoch_before_min_year_is_rejected() {
        // 1899-12-31T23:59:59Z
        assert!(CivilTime::from_epoch(-2_208_988_801).is_none());
    }

    proptest! {
        #[test]
        fn epoch_roundtrip(epoch in 0i64..4_102_444_800) {
            let t = CivilTime::from_epoch(epoch).unwrap();
            prop_assert_eq!(t.to_epoch(), epoch);
        }
    }
}
