//! Sensor bus lines over RP2040 GPIO
//!
//! The sensor bus is open drain: the hub drives a line or releases it to
//! the pull-up and lets the sensor take over. [`Flex`] pins cover exactly
//! that by switching between output and input-with-pull-up modes.

use embassy_rp::gpio::{Flex, Pull};
use embassy_time::Delay;
use embedded_hal::delay::DelayNs;

use hygra_core::traits::BusLine;

/// Settle time after each line transition, in microseconds.
///
/// Also the minimum SCK half period. The sensor accepts 100 kHz at most,
/// so 10us keeps the bus at half that.
const SETTLE_US: u32 = 10;

/// One bus line on a [`Flex`] GPIO pin.
///
/// Starts released. Every transition holds for [`SETTLE_US`] before
/// returning, which gives the driver in `hygra-core` its edge timing
/// without carrying any delay source of its own.
pub struct FlexLine<'d> {
    pin: Flex<'d>,
}

impl<'d> FlexLine<'d> {
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_pull(Pull::Up);
        pin.set_as_input();
        Self { pin }
    }

    fn settle(&self) {
        Delay.delay_us(SETTLE_US);
    }
}

impl BusLine for FlexLine<'_> {
    fn drive_high(&mut self) {
        // Level first, then direction, so the pin never emits a low glitch.
        self.pin.set_high();
        self.pin.set_as_output();
        self.settle();
    }

    fn drive_low(&mut self) {
        self.pin.set_low();
        self.pin.set_as_output();
        self.settle();
    }

    fn release(&mut self) {
        self.pin.set_as_input();
        self.settle();
    }

    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
