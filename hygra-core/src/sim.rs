//! Scripted SHT1x stand-in for state machine tests
//!
//! Both line handles of a simulated channel share one bus state behind an
//! `Rc`, so the fake sensor can watch clock edges and answer on the data
//! line the way the real part does: detect the start condition, clock in a
//! command, acknowledge it, release the line while "measuring", then stream
//! a queued 16-bit result once the test marks the measurement complete.

use core::cell::RefCell;

use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use crate::channel::MeasureCommand;
use crate::traits::BusLine;

/// Which wire a handle controls.
#[derive(Clone, Copy, PartialEq)]
enum Role {
    Data,
    Sck,
}

/// Controller-side drive state of the data wire.
#[derive(Clone, Copy, PartialEq)]
enum Drive {
    High,
    Low,
    Released,
}

/// Sensor protocol progress.
#[derive(Clone, Copy, PartialEq)]
enum Mode {
    /// Waiting for a transmission start.
    Idle,
    /// Saw the data dip inside a clock-high window.
    Starting,
    /// Clocking in command bits.
    Command,
    /// Holding data low until the controller clocks the acknowledge out.
    AckHold,
    /// Measurement in progress, data released.
    Measuring,
    /// Result queued, data pulled low, bits stream on clock edges.
    Ready,
}

struct BusState {
    data_drive: Drive,
    sck_high: bool,
    /// Level the sensor presents while the controller is not driving.
    sensor_level: bool,
    mode: Mode,
    present: bool,
    release_after_ack: bool,
    bit_count: u8,
    command: u8,
    reply: VecDeque<bool>,
    commands_seen: Vec<u8>,
}

impl BusState {
    fn data_level(&self) -> bool {
        match self.data_drive {
            Drive::High => true,
            Drive::Low => false,
            Drive::Released => self.sensor_level,
        }
    }

    fn set_data_drive(&mut self, drive: Drive) {
        let before = self.data_level();
        self.data_drive = drive;
        let after = self.data_level();
        // Start conditions are data edges written while the clock is high.
        if self.present && self.sck_high && before != after {
            if !after {
                self.mode = Mode::Starting;
            } else if self.mode == Mode::Starting {
                self.mode = Mode::Command;
                self.bit_count = 0;
                self.command = 0;
            }
        }
    }

    fn set_sck(&mut self, high: bool) {
        let was_high = self.sck_high;
        self.sck_high = high;
        if self.present && high && !was_high {
            self.rising_edge();
        }
    }

    fn rising_edge(&mut self) {
        match self.mode {
            Mode::Command => {
                self.command = (self.command << 1) | u8::from(self.data_level());
                self.bit_count += 1;
                if self.bit_count == 8 {
                    self.commands_seen.push(self.command);
                    let known = self.command == MeasureCommand::Temperature.code()
                        || self.command == MeasureCommand::Humidity.code();
                    if known {
                        self.mode = Mode::AckHold;
                        self.sensor_level = false;
                    } else {
                        self.mode = Mode::Idle;
                        self.sensor_level = true;
                    }
                }
            }
            Mode::AckHold => {
                self.mode = Mode::Measuring;
                self.sensor_level = self.release_after_ack;
            }
            Mode::Ready => {
                if self.data_drive == Drive::Released {
                    if let Some(bit) = self.reply.pop_front() {
                        self.sensor_level = bit;
                    }
                } else if self.reply.is_empty() {
                    // Skip pulse after the last byte: transfer over.
                    self.mode = Mode::Idle;
                    self.sensor_level = true;
                }
            }
            Mode::Idle | Mode::Starting | Mode::Measuring => {}
        }
    }
}

/// One handle of the simulated line pair.
pub struct SimLine {
    bus: Rc<RefCell<BusState>>,
    role: Role,
}

impl BusLine for SimLine {
    fn drive_high(&mut self) {
        let mut bus = self.bus.borrow_mut();
        match self.role {
            Role::Data => bus.set_data_drive(Drive::High),
            Role::Sck => bus.set_sck(true),
        }
    }

    fn drive_low(&mut self) {
        let mut bus = self.bus.borrow_mut();
        match self.role {
            Role::Data => bus.set_data_drive(Drive::Low),
            Role::Sck => bus.set_sck(false),
        }
    }

    fn release(&mut self) {
        if self.role == Role::Data {
            self.bus.borrow_mut().set_data_drive(Drive::Released);
        }
    }

    fn is_high(&self) -> bool {
        let bus = self.bus.borrow();
        match self.role {
            Role::Data => bus.data_level(),
            Role::Sck => bus.sck_high,
        }
    }
}

/// Test-side handle to one simulated sensor.
pub struct SensorSim {
    bus: Rc<RefCell<BusState>>,
}

impl SensorSim {
    /// A responsive sensor, idle and ready to acknowledge.
    pub fn new() -> Self {
        Self::with_presence(true)
    }

    /// An empty socket: the data line floats high forever.
    pub fn absent() -> Self {
        Self::with_presence(false)
    }

    fn with_presence(present: bool) -> Self {
        Self {
            bus: Rc::new(RefCell::new(BusState {
                data_drive: Drive::Released,
                sck_high: false,
                sensor_level: true,
                mode: Mode::Idle,
                present,
                release_after_ack: true,
                bit_count: 0,
                command: 0,
                reply: VecDeque::new(),
                commands_seen: Vec::new(),
            })),
        }
    }

    /// The channel's (data, clock) line pair.
    pub fn lines(&self) -> (SimLine, SimLine) {
        (
            SimLine {
                bus: Rc::clone(&self.bus),
                role: Role::Data,
            },
            SimLine {
                bus: Rc::clone(&self.bus),
                role: Role::Sck,
            },
        )
    }

    /// Finish the measurement in progress: pull data low and queue `raw`
    /// for readout, high byte first.
    pub fn complete(&self, raw: u16) {
        let mut bus = self.bus.borrow_mut();
        bus.reply.clear();
        for bit in (0..16).rev() {
            bus.reply.push_back(raw & (1 << bit) != 0);
        }
        bus.sensor_level = false;
        bus.mode = Mode::Ready;
    }

    /// Make the sensor keep the data line low after acknowledging, like a
    /// part stuck mid-handshake.
    pub fn hold_after_ack(&self) {
        self.bus.borrow_mut().release_after_ack = false;
    }

    /// Unplug the sensor: the line floats high and nothing answers anymore.
    pub fn detach(&self) {
        let mut bus = self.bus.borrow_mut();
        bus.present = false;
        bus.sensor_level = true;
        bus.mode = Mode::Idle;
    }

    /// True while a measurement is in progress.
    pub fn measuring(&self) -> bool {
        self.bus.borrow().mode == Mode::Measuring
    }

    /// Command bytes received so far.
    pub fn commands(&self) -> Vec<u8> {
        self.bus.borrow().commands_seen.clone()
    }
}
