//! DS3231 real-time clock (I2C)
//!
//! The DS3231 keeps time in seven BCD registers starting at 0x00:
//!
//! | Reg  | Contents                                   |
//! |------|--------------------------------------------|
//! | 0x00 | seconds (bit 7 unused)                     |
//! | 0x01 | minutes (bit 7 unused)                     |
//! | 0x02 | hours: bit 6 = 12h mode, bit 5 = PM in 12h |
//! | 0x03 | day of week, 1-7                           |
//! | 0x04 | day of month                               |
//! | 0x05 | month, bit 7 = century                     |
//! | 0x06 | year within century, 00-99                 |
//!
//! Reads and writes are one bus transaction each. The driver never retries
//! and never caches register contents between transactions.

use horologe_core::time::CivilTime;
use horologe_core::traits::RtcClock;
use horologe_core::ClockError;
use horologe_hal::{I2cBus, I2cBusError};

/// Fixed 7-bit bus address
pub const DS3231_ADDR: u8 = 0x68;

/// Register addresses
pub mod reg {
    pub const SECONDS: u8 = 0x00;
    pub const MINUTES: u8 = 0x01;
    pub const HOURS: u8 = 0x02;
    pub const WEEKDAY: u8 = 0x03;
    pub const DATE: u8 = 0x04;
    pub const MONTH: u8 = 0x05;
    pub const YEAR: u8 = 0x06;
}

/// Hours register: 12-hour mode select
const HOURS_12H: u8 = 0x40;
/// Hours register: PM flag (12-hour mode only)
const HOURS_PM: u8 = 0x20;

/// Year register counts from here
pub const CENTURY_BASE: u16 = 2000;

/// Number of timekeeping registers
pub const FRAME_LEN: usize = 7;

/// Decode one packed BCD byte
///
/// Returns `None` if either nibble is above 9.
pub fn decode_bcd(byte: u8) -> Option<u8> {
    let (tens, ones) = (byte >> 4, byte & 0x0F);
    if tens > 9 || ones > 9 {
        return None;
    }
    Some(tens * 10 + ones)
}

/// Encode 0-99 as packed BCD (larger values saturate at 99)
pub fn encode_bcd(value: u8) -> u8 {
    let value = value.min(99);
    ((value / 10) << 4) | (value % 10)
}

/// Decode the hours register to 0-23
///
/// In 12-hour mode the five low bits hold 1-12; 12 is midnight or noon,
/// so it maps to 0 before the PM offset is added.
pub fn decode_hours(byte: u8) -> Option<u8> {
    if byte & HOURS_12H != 0 {
        let hour = decode_bcd(byte & 0x1F)?;
        if !(1..=12).contains(&hour) {
            return None;
        }
        let hour = if hour == 12 { 0 } else { hour };
        Some(if byte & HOURS_PM != 0 { hour + 12 } else { hour })
    } else {
        decode_bcd(byte & 0x3F).filter(|h| *h <= 23)
    }
}

/// Map a 0-based Sunday weekday onto the device's 1-7 range
///
/// Sunday (0) becomes 7; Monday through Saturday keep their number.
pub fn encode_weekday(weekday: u8) -> u8 {
    if weekday == 0 {
        7
    } else {
        weekday & 0x07
    }
}

/// Year relative to the century base, saturating into 0-99
pub fn encode_year(year: u16) -> u8 {
    year.saturating_sub(CENTURY_BASE).min(99) as u8
}

/// The seven timekeeping registers as they travel on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawRegisterFrame(pub [u8; FRAME_LEN]);

impl RawRegisterFrame {
    /// Decode into a validated time
    ///
    /// The weekday register is not trusted; `CivilTime` derives the weekday
    /// from the date.
    pub fn decode(&self) -> Result<CivilTime, ClockError> {
        let r = &self.0;
        let field = |v: Option<u8>| v.ok_or(ClockError::InvalidRegisterData);

        let second = field(decode_bcd(r[reg::SECONDS as usize] & 0x7F))?;
        let minute = field(decode_bcd(r[reg::MINUTES as usize] & 0x7F))?;
        let hour = field(decode_hours(r[reg::HOURS as usize]))?;
        let day = field(decode_bcd(r[reg::DATE as usize] & 0x3F))?;
        let month = field(decode_bcd(r[reg::MONTH as usize] & 0x1F))?;
        let year = CENTURY_BASE + u16::from(field(decode_bcd(r[reg::YEAR as usize]))?);

        CivilTime::new(year, month, day, hour, minute, second).ok_or(ClockError::InvalidRegisterData)
    }

    /// Encode a time, always in 24-hour mode
    pub fn encode(time: &CivilTime) -> Self {
        let mut r = [0u8; FRAME_LEN];
        r[reg::SECONDS as usize] = encode_bcd(time.second());
        r[reg::MINUTES as usize] = encode_bcd(time.minute());
        r[reg::HOURS as usize] = encode_bcd(time.hour());
        r[reg::WEEKDAY as usize] = encode_weekday(time.weekday());
        r[reg::DATE as usize] = encode_bcd(time.day());
        r[reg::MONTH as usize] = encode_bcd(time.month());
        r[reg::YEAR as usize] = encode_bcd(encode_year(time.year()));
        Self(r)
    }
}

fn bus_error(e: I2cBusError) -> ClockError {
    match e {
        I2cBusError::Timeout => ClockError::BusTimeout,
        I2cBusError::Nack => ClockError::BusNack,
        _ => ClockError::BusFault,
    }
}

/// DS3231 driver
pub struct Ds3231<I2C> {
    i2c: I2C,
}

impl<I2C: I2cBus> Ds3231<I2C> {
    /// Create a new driver on the given bus
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Read the raw timekeeping registers
    pub fn read_frame(&mut self) -> Result<RawRegisterFrame, ClockError> {
        let mut buf = [0u8; FRAME_LEN];
        self.i2c
            .write_read(DS3231_ADDR, &[reg::SECONDS], &mut buf)
            .map_err(bus_error)?;
        Ok(RawRegisterFrame(buf))
    }

    /// Write the raw timekeeping registers
    pub fn write_frame(&mut self, frame: &RawRegisterFrame) -> Result<(), ClockError> {
        // Register pointer followed by the seven registers
        let mut tx = [0u8; FRAME_LEN + 1];
        tx[0] = reg::SECONDS;
        tx[1..].copy_from_slice(&frame.0);
        self.i2c.write(DS3231_ADDR, &tx).map_err(bus_error)
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2cBus> RtcClock for Ds3231<I2C> {
    fn read(&mut self) -> Result<CivilTime, ClockError> {
        self.read_frame()?.decode()
    }

    fn write(&mut self, time: &CivilTime) -> Result<(), ClockError> {
        self.write_frame(&RawRegisterFrame::encode(time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Register file behind a fake bus
    struct FakeBus {
        regs: [u8; 0x13],
        pointer: usize,
        fail: Option<I2cBusError>,
        transactions: usize,
    }

    impl FakeBus {
        fn with_frame(frame: [u8; FRAME_LEN]) -> Self {
            let mut regs = [0u8; 0x13];
            regs[..FRAME_LEN].copy_from_slice(&frame);
            Self {
                regs,
                pointer: 0,
                fail: None,
                transactions: 0,
            }
        }
    }

    impl I2cBus for FakeBus {
        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cBusError> {
            self.transactions += 1;
            if let Some(e) = self.fail {
                return Err(e);
            }
            assert_eq!(address, DS3231_ADDR);
            self.pointer = data[0] as usize;
            for (i, b) in data[1..].iter().enumerate() {
                self.regs[self.pointer + i] = *b;
            }
            Ok(())
        }

        fn read(&mut self, _address: u8, buf: &mut [u8]) -> Result<(), I2cBusError> {
            self.transactions += 1;
            if let Some(e) = self.fail {
                return Err(e);
            }
            buf.copy_from_slice(&self.regs[self.pointer..self.pointer + buf.len()]);
            Ok(())
        }

        fn write_read(
            &mut self,
            address: u8,
            write_data: &[u8],
            read_buf: &mut [u8],
        ) -> Result<(), I2cBusError> {
            self.transactions += 1;
            if let Some(e) = self.fail {
                return Err(e);
            }
            assert_eq!(address, DS3231_ADDR);
            self.pointer = write_data[0] as usize;
            read_buf.copy_from_slice(&self.regs[self.pointer..self.pointer + read_buf.len()]);
            Ok(())
        }
    }

    #[test]
    fn test_decode_hours() {
        // 24-hour
        assert_eq!(decode_hours(0x15), Some(15));
        assert_eq!(decode_hours(0x00), Some(0));
        assert_eq!(decode_hours(0x23), Some(23));
        assert_eq!(decode_hours(0x24), None);

        // 12-hour: 0x40 mode bit, 0x20 PM bit
        assert_eq!(decode_hours(0x65), Some(17)); // 5 PM
        assert_eq!(decode_hours(0x45), Some(5)); // 5 AM
        assert_eq!(decode_hours(0x52), Some(0)); // 12 AM
        assert_eq!(decode_hours(0x72), Some(12)); // 12 PM
        assert_eq!(decode_hours(0x51), Some(11)); // 11 AM
        assert_eq!(decode_hours(0x40), None); // hour 0 does not exist on a 12h dial
        assert_eq!(decode_hours(0x53), None);
    }

    #[test]
    fn test_encode_weekday() {
        assert_eq!(encode_weekday(0), 7);
        assert_eq!(encode_weekday(3), 3);
        assert_eq!(encode_weekday(6), 6);
    }

    #[test]
    fn test_encode_year_saturates() {
        assert_eq!(encode_year(1899), 0);
        assert_eq!(encode_year(2000), 0);
        assert_eq!(encode_year(2025), 25);
        assert_eq!(encode_year(2150), 99);
    }

    #[test]
    fn test_invalid_bcd() {
        assert_eq!(decode_bcd(0x1A), None);
        assert_eq!(decode_bcd(0xA1), None);
        assert_eq!(decode_bcd(0x59), Some(59));
    }

    #[test]
    fn test_encode_frame() {
        // Sunday 2024-03-10 17:04:09
        let time = CivilTime::new(2024, 3, 10, 17, 4, 9).unwrap();
        assert_eq!(time.weekday(), 0);

        let frame = RawRegisterFrame::encode(&time);
        assert_eq!(frame.0, [0x09, 0x04, 0x17, 0x07, 0x10, 0x03, 0x24]);
    }

    #[test]
    fn test_encode_out_of_range_years() {
        let frame = RawRegisterFrame::encode(&CivilTime::new(1999, 12, 31, 0, 0, 0).unwrap());
        assert_eq!(frame.0[reg::YEAR as usize], 0x00);

        let frame = RawRegisterFrame::encode(&CivilTime::new(2150, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(frame.0[reg::YEAR as usize], 0x99);
    }

    #[test]
    fn test_decode_frame() {
        // 12-hour mode, 1 PM; century bit and oscillator bit set
        let frame = RawRegisterFrame([0x80 | 0x45, 0x23, 0x61, 0x05, 0x05, 0x80 | 0x09, 0x25]);
        let time = frame.decode().unwrap();
        assert_eq!(
            (time.year(), time.month(), time.day()),
            (2025, 9, 5)
        );
        assert_eq!((time.hour(), time.minute(), time.second()), (13, 23, 45));
        // Friday, derived from the date
        assert_eq!(time.weekday(), 5);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        // All ones, as read from a bus with nothing attached
        let frame = RawRegisterFrame([0xFF; FRAME_LEN]);
        assert_eq!(frame.decode(), Err(ClockError::InvalidRegisterData));

        // Day 31 in a 30-day month
        let frame = RawRegisterFrame([0x00, 0x00, 0x00, 0x01, 0x31, 0x04, 0x24]);
        assert_eq!(frame.decode(), Err(ClockError::InvalidRegisterData));

        // Month zero after an uninitialized power-up
        let frame = RawRegisterFrame([0x00; FRAME_LEN]);
        assert_eq!(frame.decode(), Err(ClockError::InvalidRegisterData));
    }

    #[test]
    fn test_driver_roundtrip() {
        let mut rtc = Ds3231::new(FakeBus::with_frame([0x00, 0x00, 0x00, 0x01, 0x01, 0x01, 0x00]));
        assert_eq!(rtc.read().unwrap().year(), 2000);

        let time = CivilTime::new(2025, 9, 5, 7, 53, 45).unwrap();
        rtc.write(&time).unwrap();
        assert_eq!(rtc.read(), Ok(time));

        let bus = rtc.release();
        assert_eq!(bus.transactions, 3);
        assert_eq!(bus.regs[reg::WEEKDAY as usize], 5);
    }

    #[test]
    fn test_bus_errors() {
        let mut bus = FakeBus::with_frame([0; FRAME_LEN]);
        bus.fail = Some(I2cBusError::Nack);
        let mut rtc = Ds3231::new(bus);
        assert_eq!(rtc.read(), Err(ClockError::BusNack));

        let mut bus = rtc.release();
        bus.fail = Some(I2cBusError::Timeout);
        let mut rtc = Ds3231::new(bus);
        let time = CivilTime::new(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(rtc.write(&time), Err(ClockError::BusTimeout));

        let mut bus = rtc.release();
        bus.fail = Some(I2cBusError::ArbitrationLost);
        let mut rtc = Ds3231::new(bus);
        assert_eq!(rtc.read(), Err(ClockError::BusFault));

        // Nothing was written
        assert_eq!(rtc.release().regs[..FRAME_LEN], [0; FRAME_LEN]);
    }

    proptest! {
        #[test]
        fn bcd_roundtrip(v in 0u8..=99) {
            prop_assert_eq!(decode_bcd(encode_bcd(v)), Some(v));
        }

        #[test]
        fn hours_24h_roundtrip(h in 0u8..=23) {
            prop_assert_eq!(decode_hours(encode_bcd(h)), Some(h));
        }
    }
}
