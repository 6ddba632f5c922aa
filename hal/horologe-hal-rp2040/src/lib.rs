//! RP2040-specific HAL for the clock firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `horologe-hal` traits:
//!
//! - GPIO lines for bit-banged buses (push-pull and open-drain style)
//! - I2C adapter over any `embedded-hal` 1.0 blocking bus
//! - Busy-wait microsecond delay
//! - Flash storage driver (implements `horologe_hal::FlashStorage`)

#![no_std]

pub mod delay;
pub mod flash;
pub mod gpio;
pub mod i2c;

pub use delay::BusyDelay;
pub use flash::Rp2040FlashStorage;
pub use gpio::{FlexLine, PushPullLine};
pub use i2c::BlockingI2c;
