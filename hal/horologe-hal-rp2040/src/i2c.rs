//! I2C adapter
//!
//! Wraps any blocking `embedded-hal` 1.0 I2C master (normally
//! `embassy_rp::i2c::I2c` in blocking mode) and maps its error kinds onto
//! `I2cBusError`.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use horologe_hal::i2c::I2cConfig;
use horologe_hal::{I2cBus, I2cBusError};

/// Build the RP2040 peripheral config for a bus speed
pub fn rp_config(config: I2cConfig) -> embassy_rp::i2c::Config {
    let mut rp = embassy_rp::i2c::Config::default();
    rp.frequency = config.frequency;
    rp
}

/// Map `embedded-hal` error kinds
///
/// The RP2040 blocking master has no transaction timeout, so this adapter
/// never yields `I2cBusError::Timeout`; a wedged bus shows up as `Bus` or
/// `NoAcknowledge` instead.
fn map_error(kind: ErrorKind) -> I2cBusError {
    match kind {
        ErrorKind::Bus => I2cBusError::Bus,
        ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
        ErrorKind::NoAcknowledge(_) => I2cBusError::Nack,
        ErrorKind::Overrun => I2cBusError::Overrun,
        _ => I2cBusError::Other,
    }
}

/// `I2cBus` over an `embedded-hal` blocking master
pub struct BlockingI2c<T> {
    bus: T,
}

impl<T: I2c> BlockingI2c<T> {
    pub fn new(bus: T) -> Self {
        Self { bus }
    }
}

impl<T: I2c> I2cBus for BlockingI2c<T> {
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cBusError> {
        self.bus
            .write(address, data)
            .map_err(|e| map_error(e.kind()))
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), I2cBusError> {
        self.bus.read(address, buf).map_err(|e| map_error(e.kind()))
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), I2cBusError> {
        self.bus
            .write_read(address, write_data, read_buf)
            .map_err(|e| map_error(e.kind()))
    }
}
