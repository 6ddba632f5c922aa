//! TM1637 4-digit LED display (bit-banged two-wire bus)
//!
//! # Bus Protocol
//!
//! Two lines, CLK and DIO, both idle high:
//! - START: DIO falls while CLK is high
//! - STOP: DIO rises while CLK is high
//! - Data: 8 bits LSB first, DIO changes while CLK is low and is latched
//!   on the CLK rising edge
//! - ACK: after the 8th bit the chip pulls DIO low for one clock
//!
//! The bus is not I2C: there is no address byte and commands are sent as
//! the first byte of a START/STOP frame.
//!
//! A missing ACK is counted and otherwise ignored. The chip has no way to
//! report why it did not answer, and a glitched frame is overwritten by the
//! next render anyway.

use horologe_core::traits::{ClockDisplay, Pattern};
use horologe_hal::{DelayUs, FlexPin, InputPin, OutputPin};

/// Segment patterns for 0-9 (bit 0 = segment a .. bit 6 = segment g)
pub const DIGITS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

/// All segments off
pub const SEG_BLANK: u8 = 0x00;
/// Middle bar only
pub const SEG_DASH: u8 = 0x40;
/// Colon, wired to the decimal-point bit of the second digit
pub const SEG_COLON: u8 = 0x80;

/// Command bytes
pub mod cmd {
    /// Data command: write display registers, auto-increment address
    pub const DATA_AUTO_INCREMENT: u8 = 0x40;
    /// Address command: start at digit 0
    pub const ADDRESS_DIGIT0: u8 = 0xC0;
    /// Display control: display on, OR with 3-bit brightness
    pub const DISPLAY_ON: u8 = 0x88;
}

/// Line settling times in microseconds
mod timing {
    /// Around START and STOP edges
    pub const EDGE_US: u32 = 5;
    /// Each phase of a data bit
    pub const BIT_US: u32 = 3;
    /// Short phases of the ACK slot
    pub const ACK_US: u32 = 2;
}

/// Segment bytes for the four digit positions plus the colon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitFrame {
    pub segments: [u8; 4],
    pub colon: bool,
}

impl DigitFrame {
    /// Everything off
    pub const BLANK: Self = Self {
        segments: [SEG_BLANK; 4],
        colon: false,
    };

    /// Four dashes, shown until a valid time exists
    pub const WAITING: Self = Self {
        segments: [SEG_DASH; 4],
        colon: false,
    };

    /// "Err"
    pub const FAULT: Self = Self {
        segments: [0x79, 0x50, 0x50, SEG_BLANK],
        colon: false,
    };

    /// `hh:mm` with the leading hour digit blanked below 10
    pub fn hhmm(hh: u8, mm: u8, colon: bool) -> Self {
        let tens = if hh < 10 {
            SEG_BLANK
        } else {
            DIGITS[usize::from((hh / 10) % 10)]
        };

        Self {
            segments: [
                tens,
                DIGITS[usize::from(hh % 10)],
                DIGITS[usize::from((mm / 10) % 10)],
                DIGITS[usize::from(mm % 10)],
            ],
            colon,
        }
    }

    /// Bytes as written to the display registers
    pub fn to_bytes(&self) -> [u8; 4] {
        let mut bytes = self.segments;
        if self.colon {
            bytes[1] |= SEG_COLON;
        }
        bytes
    }
}

/// TM1637 driver
///
/// `CLK` is a plain push-pull output. `DIO` must be able to release the
/// line to a pulled-up input for the ACK slot.
pub struct Tm1637<CLK, DIO, D> {
    clk: CLK,
    dio: DIO,
    delay: D,
    missed_acks: u32,
}

impl<CLK, DIO, D> Tm1637<CLK, DIO, D>
where
    CLK: OutputPin,
    DIO: FlexPin,
    D: DelayUs,
{
    /// Create a new driver and park both lines high
    pub fn new(mut clk: CLK, mut dio: DIO, delay: D) -> Self {
        clk.set_high();
        dio.set_high();
        Self {
            clk,
            dio,
            delay,
            missed_acks: 0,
        }
    }

    /// Set brightness (0-7) and switch the display on
    pub fn set_brightness(&mut self, brightness: u8) {
        self.command(cmd::DISPLAY_ON | (brightness & 0x07));
    }

    /// Write all four digit registers
    pub fn show(&mut self, frame: &DigitFrame) {
        self.command(cmd::DATA_AUTO_INCREMENT);

        self.start();
        self.write_byte(cmd::ADDRESS_DIGIT0);
        for byte in frame.to_bytes() {
            self.write_byte(byte);
        }
        self.stop();
    }

    /// Bytes the chip did not acknowledge since creation
    pub fn missed_acks(&self) -> u32 {
        self.missed_acks
    }

    /// Release the lines and the delay
    pub fn release(self) -> (CLK, DIO, D) {
        (self.clk, self.dio, self.delay)
    }

    fn command(&mut self, byte: u8) {
        self.start();
        self.write_byte(byte);
        self.stop();
    }

    fn start(&mut self) {
        self.dio.set_high();
        self.clk.set_high();
        self.delay.delay_us(timing::EDGE_US);
        self.dio.set_low();
        self.delay.delay_us(timing::EDGE_US);
        self.clk.set_low();
        self.delay.delay_us(timing::EDGE_US);
    }

    fn stop(&mut self) {
        self.clk.set_low();
        self.delay.delay_us(timing::EDGE_US);
        self.dio.set_low();
        self.delay.delay_us(timing::EDGE_US);
        self.clk.set_high();
        self.delay.delay_us(timing::EDGE_US);
        self.dio.set_high();
        self.delay.delay_us(timing::EDGE_US);
    }

    fn write_byte(&mut self, byte: u8) {
        for bit in 0..8 {
            self.clk.set_low();
            self.delay.delay_us(timing::BIT_US);
            self.dio.set_state(byte & (1 << bit) != 0);
            self.delay.delay_us(timing::BIT_US);
            self.clk.set_high();
            self.delay.delay_us(timing::BIT_US);
        }

        // ACK slot
        self.clk.set_low();
        self.delay.delay_us(timing::ACK_US);
        self.dio.set_as_input_pullup();
        self.delay.delay_us(timing::ACK_US);
        self.clk.set_high();
        self.delay.delay_us(timing::BIT_US);
        let acked = self.dio.is_low();
        self.clk.set_low();
        self.delay.delay_us(timing::ACK_US);
        self.dio.set_as_output();

        if !acked {
            self.missed_acks = self.missed_acks.saturating_add(1);
        }
    }
}

impl<CLK, DIO, D> ClockDisplay for Tm1637<CLK, DIO, D>
where
    CLK: OutputPin,
    DIO: FlexPin,
    D: DelayUs,
{
    fn initialize(&mut self, brightness: u8) {
        self.set_brightness(brightness);
        self.show(&DigitFrame::BLANK);
    }

    fn render(&mut self, hh: u8, mm: u8, colon: bool) {
        self.show(&DigitFrame::hhmm(hh, mm, colon));
    }

    fn show_pattern(&mut self, pattern: Pattern) {
        let frame = match pattern {
            Pattern::Waiting => DigitFrame::WAITING,
            Pattern::Fault => DigitFrame::FAULT,
        };
        self.show(&frame);
    }
}
