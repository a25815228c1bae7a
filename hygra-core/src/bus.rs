//! Two-wire bit transfer primitives
//!
//! The SHT1x bus is a half-duplex synchronous pair: the controller owns the
//! clock line and the data line changes hands between controller and sensor.
//! These helpers are the bounded toggle sequences the channel state machine
//! runs inside a single phase transition. None of them waits on the sensor;
//! every call is a fixed number of line operations.

use crate::traits::BusLine;

/// Signal a transmission start to the sensor.
///
/// The start condition is a data-line dip while the clock is high, followed
/// by a data-line rise during the next clock-high window. Leaves data driven
/// high and the clock low, ready for the command byte.
pub fn start_transmission<L: BusLine>(data: &mut L, sck: &mut L) {
    data.drive_high();
    sck.drive_high();
    data.drive_low();
    sck.drive_low();
    sck.drive_high();
    data.drive_high();
    sck.drive_low();
}

/// Shift one byte out MSB-first, one clock pulse per bit.
pub fn shift_out<L: BusLine>(data: &mut L, sck: &mut L, byte: u8) {
    for bit in (0..8).rev() {
        if byte & (1 << bit) != 0 {
            data.drive_high();
        } else {
            data.drive_low();
        }
        sck.drive_high();
        sck.drive_low();
    }
}

/// Shift one byte in MSB-first.
///
/// The data line must already be released; the sensor presents each bit on
/// the rising clock edge.
pub fn shift_in<L: BusLine>(data: &L, sck: &mut L) -> u8 {
    let mut byte = 0;
    for bit in (0..8).rev() {
        sck.drive_high();
        if data.is_high() {
            byte |= 1 << bit;
        }
        sck.drive_low();
    }
    byte
}

/// Read a completed 16-bit measurement, high byte first.
///
/// The first byte is acknowledged by pulling data low for one clock pulse.
/// After the second byte, data is held high through a final pulse instead,
/// which tells the sensor to skip sending its CRC byte. Leaves data driven
/// high.
pub fn read_measurement<L: BusLine>(data: &mut L, sck: &mut L) -> u16 {
    let high = shift_in(data, sck);

    // Byte acknowledge: data low for one clock.
    data.drive_low();
    sck.drive_high();
    sck.drive_low();
    data.release();

    let low = shift_in(data, sck);

    // No acknowledge on the skip pulse ends the transfer before the CRC.
    data.drive_high();
    sck.drive_high();
    sck.drive_low();

    u16::from(high) << 8 | u16::from(low)
}
