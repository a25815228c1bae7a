//! Serial query protocol
//!
//! Line-oriented text commands over the host link: `TC<n>?`, `TF<n>?` and
//! `RH<n>?` with `n` in `1..=3` answer with the converted reading to one
//! decimal. A query against a valid but unresponsive channel gets `NC`, a
//! bad channel digit gets `ERROR 02`, and any other terminated query gets
//! `ERROR 01`. Lines that never see the terminator, outgrow the buffer or
//! do not end in `?` are dropped without a response.
//!
//! The handler is polled from the control loop and consumes at most one
//! line per call; anything else the host has already sent stays buffered in
//! the link until the next tick.

use core::fmt::Write as _;

use heapless::String;
use heapless::Vec;

use crate::convert;
use crate::hub::{ChannelReading, CHANNEL_COUNT};
use crate::traits::{Clock, SerialLink};

/// Input line terminator.
pub const LINE_TERMINATOR: u8 = b'\n';

/// Budget for the rest of a line to arrive once its first byte is in.
pub const SERIAL_TIMEOUT_MS: u64 = 1_000;

/// Longest accepted command line, terminator excluded.
const LINE_CAPACITY: usize = 16;

/// Responses go out with a full CRLF for terminal-friendly output.
const CRLF: &[u8] = b"\r\n";

/// Outcome of one query.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    /// Converted reading of a connected channel.
    Value(f32),
    /// Channel exists but its sensor is not responding.
    NotConnected,
    /// Channel digit missing or out of range.
    BadChannel,
    /// A query, but not a command this device knows.
    Unrecognized,
}

impl Reply {
    /// Response text, line terminator excluded.
    pub fn encode(&self) -> String<16> {
        let mut text = String::new();
        match self {
            Reply::Value(value) => {
                let _ = write!(text, "{:.1}", value);
            }
            Reply::NotConnected => {
                let _ = text.push_str("NC");
            }
            Reply::BadChannel => {
                let _ = text.push_str("ERROR 02");
            }
            Reply::Unrecognized => {
                let _ = text.push_str("ERROR 01");
            }
        }
        text
    }
}

/// Decide the response for one terminated line.
///
/// `None` means stay silent. Checks run in a fixed order (terminator, then
/// channel digit, then connectivity, then command kind), so `XZ9?` reports
/// the bad channel and an unknown query against an unplugged channel
/// reports `NC`. The channel digit lives at byte 2 regardless of what
/// surrounds it.
pub fn evaluate(line: &[u8], readings: &[ChannelReading; CHANNEL_COUNT]) -> Option<Reply> {
    let line = line.trim_ascii();
    if line.last() != Some(&b'?') {
        return None;
    }

    let index = match line.get(2) {
        Some(digit @ b'1'..=b'9') => usize::from(digit - b'1'),
        _ => return Some(Reply::BadChannel),
    };
    let Some(reading) = readings.get(index) else {
        return Some(Reply::BadChannel);
    };

    if !reading.connected {
        return Some(Reply::NotConnected);
    }

    match (line[0], line[1]) {
        (b'T', b'C') => Some(Reply::Value(convert::celsius(reading.raw_temperature))),
        (b'T', b'F') => Some(Reply::Value(convert::fahrenheit(reading.raw_temperature))),
        // A temperature query in an unknown unit gets no answer at all.
        (b'T', _) => None,
        (b'R', _) => Some(Reply::Value(convert::humidity(
            reading.raw_humidity,
            reading.raw_temperature,
        ))),
        _ => Some(Reply::Unrecognized),
    }
}

/// Pull at most one line from the link.
///
/// `None` when no input is pending, when the line outgrows the buffer, or
/// when the terminator fails to arrive within [`SERIAL_TIMEOUT_MS`]; the
/// partial input is discarded in the latter two cases.
fn read_line<S, C>(link: &mut S, clock: &C) -> Option<Vec<u8, LINE_CAPACITY>>
where
    S: SerialLink,
    C: Clock,
{
    let mut byte = link.poll_byte()?;
    let mut line = Vec::new();
    let mut overflowed = false;
    let deadline = clock.now_ms() + SERIAL_TIMEOUT_MS;

    loop {
        if byte == LINE_TERMINATOR {
            return (!overflowed).then_some(line);
        }
        if line.push(byte).is_err() {
            overflowed = true;
        }
        byte = loop {
            if let Some(next) = link.poll_byte() {
                break next;
            }
            if clock.now_ms() >= deadline {
                return None;
            }
        };
    }
}

/// Handle at most one pending query.
///
/// Returns the reply that went out, if any, so the caller can log it.
pub fn poll_query<S, C>(
    link: &mut S,
    clock: &C,
    readings: &[ChannelReading; CHANNEL_COUNT],
) -> Option<Reply>
where
    S: SerialLink,
    C: Clock,
{
    let line = read_line(link, clock)?;
    let reply = evaluate(&line, readings)?;
    link.write_all(reply.encode().as_bytes());
    link.write_all(CRLF);
    Some(reply)
}
