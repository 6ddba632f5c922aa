//! GPIO lines for bit-banged buses

use embassy_rp::gpio::{Flex, Level, Output, Pin, Pull};
use embassy_rp::Peri;
use horologe_hal::{FlexPin, InputPin, OutputPin};

/// Plain push-pull output, idles high
pub struct PushPullLine<'d> {
    pin: Output<'d>,
}

impl<'d> PushPullLine<'d> {
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            pin: Output::new(pin, Level::High),
        }
    }
}

impl OutputPin for PushPullLine<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Bidirectional line with the internal pull-up always enabled
///
/// Driven as an output while sending; released to an input so the
/// peripheral can pull it low.
pub struct FlexLine<'d> {
    pin: Flex<'d>,
    level: bool,
}

impl<'d> FlexLine<'d> {
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        let mut pin = Flex::new(pin);
        pin.set_pull(Pull::Up);
        pin.set_high();
        pin.set_as_output();
        Self { pin, level: true }
    }
}

impl OutputPin for FlexLine<'_> {
    fn set_high(&mut self) {
        self.level = true;
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.level = false;
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.level
    }
}

impl InputPin for FlexLine<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

impl FlexPin for FlexLine<'_> {
    fn set_as_input_pullup(&mut self) {
        self.pin.set_as_input();
    }

    fn set_as_output(&mut self) {
        self.pin.set_level(if self.level { Level::High } else { Level::Low });
        self.pin.set_as_output();
    }
}
