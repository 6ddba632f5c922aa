//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs. Pin operations are infallible: bit-banged protocols
//! have no way to recover from a half-driven line anyway.

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Pin that switches between a driven output and a pulled-up input
///
/// Open-drain style buses drive the line as an output while sending and
/// release it to an input with pull-up so the peripheral can pull it low
/// (for example to acknowledge a byte).
pub trait FlexPin: OutputPin + InputPin {
    /// Release the line: switch to input with the pull-up enabled
    fn set_as_input_pullup(&mut self);

    /// Drive the line again with the last output level
    fn set_as_output(&mut self);
}
