//! Horologe Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the clock drivers are written
//! against. Chip-specific crates implement them, so the register and
//! bit-level codecs can be exercised on the host with mock pins and buses.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  horologe-firmware                      │
//! └─────────────────────────────────────────┘
//!          │                     │
//!          ▼                     ▼
//! ┌─────────────────┐   ┌─────────────────┐
//! │ horologe-core   │   │ horologe-drivers│
//! └─────────────────┘   └─────────────────┘
//!                                │
//!                                ▼
//! ┌─────────────────────────────────────────┐
//! │  horologe-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!          ┌─────────────────────┐
//!          │ horologe-hal-rp2040 │
//!          └─────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::FlexPin`] - Digital I/O
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`delay::DelayUs`] - Calibrated busy-wait delays
//! - [`flash::FlashStorage`] - Persistent storage

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod flash;
pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use delay::DelayUs;
pub use flash::{FlashError, FlashStorage, StorageKey};
pub use gpio::{FlexPin, InputPin, OutputPin};
pub use i2c::{I2cBus, I2cBusError};
