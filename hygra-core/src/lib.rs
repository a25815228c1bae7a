//! Hygra - T/RH Sensor Hub Core
//!
//! Board-agnostic control logic for a three-channel Sensirion SHT1x
//! temperature/relative-humidity hub:
//!
//! - `bus`: bit-banged two-wire transfer primitives
//! - `channel`: the per-channel acquisition state machine
//! - `hub`: the scheduler multiplexing all channels on one thread
//! - `convert`: datasheet calibration maths
//! - `protocol`: the line-oriented serial query protocol
//! - `traits`: hardware seams implemented by the firmware crate
//!
//! Everything here is `no_std` and deterministic: time enters as plain
//! millisecond values, so the whole crate runs on the host, where the test
//! suite drives the state machine against a scripted sensor.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod bus;
pub mod channel;
pub mod convert;
pub mod hub;
pub mod protocol;
pub mod traits;

#[cfg(test)]
pub(crate) mod sim;
