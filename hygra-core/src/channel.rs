//! Per-channel acquisition state machine
//!
//! One [`Channel`] owns the data/clock line pair of a single SHT1x sensor
//! and walks it through one measurement at a time. Every [`Channel::tick`]
//! performs at most one phase transition, so three channels interleave on a
//! single thread without ever waiting on each other; a sensor that stops
//! responding trips the phase deadline and resets only its own channel.

use crate::bus;
use crate::traits::BusLine;

/// Pause between completed acquisitions on one channel.
pub const READ_DELAY_MS: u64 = 1_000;

/// How long the sensor may take to move the data line in any waiting phase.
pub const SENSOR_TIMEOUT_MS: u64 = 2_500;

/// SHT1x measurement command, shifted out MSB-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasureCommand {
    /// 14-bit temperature measurement.
    Temperature,
    /// 12-bit relative-humidity measurement.
    Humidity,
}

impl MeasureCommand {
    /// Wire encoding: three address bits (000) plus the command bits.
    pub const fn code(self) -> u8 {
        match self {
            MeasureCommand::Temperature => 0b0000_0011,
            MeasureCommand::Humidity => 0b0000_0101,
        }
    }

    /// The quantity due once this one completes.
    pub const fn next(self) -> Self {
        match self {
            MeasureCommand::Temperature => MeasureCommand::Humidity,
            MeasureCommand::Humidity => MeasureCommand::Temperature,
        }
    }
}

/// Acquisition progress of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Between acquisitions, bus idle.
    Idle,
    /// Command sent; waiting for the sensor to pull data low.
    Started,
    /// Acknowledge clocked out; waiting for the sensor to release the line.
    Acknowledged,
    /// Line released; waiting for data low, the measurement-ready signal.
    Released,
    /// Result waiting on the bus, read on the next tick.
    Measured,
}

/// State machine activity reported by [`Channel::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelEvent {
    /// A measurement command went out on the bus.
    Started(MeasureCommand),
    /// The sensor acknowledged the command.
    Acknowledged,
    /// An acquisition finished with the given raw count.
    Completed { command: MeasureCommand, raw: u16 },
    /// The sensor missed the deadline in this phase; channel reset.
    TimedOut(Phase),
}

/// One sensor channel: its line pair plus acquisition state.
///
/// The raw counts persist across cycles and timeouts; only a completed
/// acquisition of the same quantity overwrites them.
pub struct Channel<L: BusLine> {
    data: L,
    sck: L,
    command: MeasureCommand,
    phase: Phase,
    connected: bool,
    raw_temperature: u16,
    raw_humidity: u16,
    last_read_ms: u64,
    deadline_ms: u64,
}

impl<L: BusLine> Channel<L> {
    /// Bind a channel to its line pair.
    ///
    /// The first acquisition starts one inter-read delay after ticking
    /// begins, which doubles as the sensor's wake-up grace period.
    pub fn new(data: L, sck: L) -> Self {
        Self {
            data,
            sck,
            command: MeasureCommand::Temperature,
            phase: Phase::Idle,
            connected: false,
            raw_temperature: 0,
            raw_humidity: 0,
            last_read_ms: 0,
            deadline_ms: 0,
        }
    }

    /// Current acquisition phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Last-known reachability of the sensor.
    pub fn connected(&self) -> bool {
        self.connected
    }

    /// Measurement in flight, or next due.
    pub fn command(&self) -> MeasureCommand {
        self.command
    }

    /// Raw count of the last completed temperature acquisition.
    pub fn raw_temperature(&self) -> u16 {
        self.raw_temperature
    }

    /// Raw count of the last completed humidity acquisition.
    pub fn raw_humidity(&self) -> u16 {
        self.raw_humidity
    }

    /// Advance the acquisition by at most one phase transition.
    ///
    /// Never blocks: every arm finishes in a bounded number of line
    /// operations.
    pub fn tick(&mut self, now_ms: u64) -> Option<ChannelEvent> {
        match self.phase {
            Phase::Idle => {
                if now_ms.saturating_sub(self.last_read_ms) > READ_DELAY_MS {
                    self.start(now_ms);
                    return Some(ChannelEvent::Started(self.command));
                }
                None
            }
            Phase::Started => {
                if self.data.is_low() {
                    // Clock the acknowledge bit out of the sensor.
                    self.connected = true;
                    self.sck.drive_high();
                    self.sck.drive_low();
                    self.advance(Phase::Acknowledged, now_ms);
                    Some(ChannelEvent::Acknowledged)
                } else {
                    self.check_deadline(now_ms)
                }
            }
            Phase::Acknowledged => {
                if self.data.is_high() {
                    self.advance(Phase::Released, now_ms);
                    None
                } else {
                    self.check_deadline(now_ms)
                }
            }
            Phase::Released => {
                if self.data.is_low() {
                    self.advance(Phase::Measured, now_ms);
                    None
                } else {
                    self.check_deadline(now_ms)
                }
            }
            Phase::Measured => {
                let raw = bus::read_measurement(&mut self.data, &mut self.sck);
                let command = self.command;
                match command {
                    MeasureCommand::Temperature => self.raw_temperature = raw,
                    MeasureCommand::Humidity => self.raw_humidity = raw,
                }
                self.command = command.next();
                self.phase = Phase::Idle;
                self.deadline_ms = 0;
                self.last_read_ms = now_ms;
                Some(ChannelEvent::Completed { command, raw })
            }
        }
    }

    fn start(&mut self, now_ms: u64) {
        bus::start_transmission(&mut self.data, &mut self.sck);
        bus::shift_out(&mut self.data, &mut self.sck, self.command.code());
        self.data.release();
        self.phase = Phase::Started;
        self.deadline_ms = now_ms + SENSOR_TIMEOUT_MS;
    }

    fn advance(&mut self, phase: Phase, now_ms: u64) {
        self.phase = phase;
        self.deadline_ms = now_ms + SENSOR_TIMEOUT_MS;
    }

    /// Reset the channel if the sensor has overrun this phase's deadline.
    ///
    /// The completion timestamp is deliberately left alone so the retry
    /// starts on the very next tick.
    fn check_deadline(&mut self, now_ms: u64) -> Option<ChannelEvent> {
        if now_ms > self.deadline_ms {
            let phase = self.phase;
            self.phase = Phase::Idle;
            self.connected = false;
            self.deadline_ms = 0;
            return Some(ChannelEvent::TimedOut(phase));
        }
        None
    }
}
