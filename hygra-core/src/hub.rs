//! Channel scheduler
//!
//! [`SensorHub`] owns the fixed set of channels and advances them in order
//! once per control-loop tick, all against the single `now` the caller read
//! for that tick. It also paces the display: each refresh interval it pushes
//! every channel's converted values to the sink. Consumers outside the tick
//! (the query protocol, tests) get read-only [`ChannelReading`] snapshots.

use crate::channel::{Channel, ChannelEvent};
use crate::convert;
use crate::traits::{BusLine, DisplaySink};

/// Number of sensor channels on the hub.
pub const CHANNEL_COUNT: usize = 3;

/// Pause between display refreshes.
pub const DISPLAY_REFRESH_MS: u64 = 2_000;

/// Read-only view of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelReading {
    /// Last-known reachability of the sensor.
    pub connected: bool,
    /// Raw count of the last completed temperature acquisition.
    pub raw_temperature: u16,
    /// Raw count of the last completed humidity acquisition.
    pub raw_humidity: u16,
}

/// All channels plus the display cadence.
pub struct SensorHub<L: BusLine> {
    channels: [Channel<L>; CHANNEL_COUNT],
    last_refresh_ms: u64,
}

impl<L: BusLine> SensorHub<L> {
    /// Take ownership of the readied channels, index order fixed for life.
    pub fn new(channels: [Channel<L>; CHANNEL_COUNT]) -> Self {
        Self {
            channels,
            last_refresh_ms: 0,
        }
    }

    /// Advance every channel once, then refresh the display if it is due.
    ///
    /// Channels never see each other's outcome within a tick; each gets the
    /// same `now_ms`. Render errors are dropped, since a lost display may
    /// not disturb acquisition. Returns the per-channel events for the
    /// caller to log.
    pub fn tick<D: DisplaySink>(
        &mut self,
        now_ms: u64,
        display: &mut D,
    ) -> [Option<ChannelEvent>; CHANNEL_COUNT] {
        let mut events = [None; CHANNEL_COUNT];
        for (event, channel) in events.iter_mut().zip(self.channels.iter_mut()) {
            *event = channel.tick(now_ms);
        }

        if now_ms.saturating_sub(self.last_refresh_ms) > DISPLAY_REFRESH_MS {
            for (index, channel) in self.channels.iter().enumerate() {
                let _ = display.render(
                    index,
                    convert::celsius(channel.raw_temperature()),
                    convert::humidity(channel.raw_humidity(), channel.raw_temperature()),
                    channel.connected(),
                );
            }
            self.last_refresh_ms = now_ms;
        }

        events
    }

    /// Snapshot of every channel's last readings and connectivity.
    pub fn readings(&self) -> [ChannelReading; CHANNEL_COUNT] {
        let mut readings = [ChannelReading::default(); CHANNEL_COUNT];
        for (reading, channel) in readings.iter_mut().zip(self.channels.iter()) {
            *reading = ChannelReading {
                connected: channel.connected(),
                raw_temperature: channel.raw_temperature(),
                raw_humidity: channel.raw_humidity(),
            };
        }
        readings
    }
}
