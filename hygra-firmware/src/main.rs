//! Hygra - T/RH Sensor Hub Firmware
//!
//! Main firmware binary for RP2040-based three channel sensor hubs.
//! Polls SHT1x sensors round-robin, answers text queries on the serial
//! console and keeps a 16x2 character panel current.
//!
//! Named after the Greek "hygros" (ὑγρός) meaning "wet" - the quantity
//! this hub spends most of its time measuring.

#![no_std]
#![no_main]

mod lcd;
mod line;
mod link;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Flex, Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Instant, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use hygra_core::channel::{Channel, ChannelEvent};
use hygra_core::hub::SensorHub;
use hygra_core::protocol;
use hygra_core::traits::{BusLine, Clock};
use hygra_display::Panel;

use crate::lcd::Hd44780;
use crate::line::FlexLine;
use crate::link::UartLink;

/// Serial console baud rate
const BAUD_RATE: u32 = 19_200;

/// How long the boot splash stays up
const SPLASH_SECS: u64 = 3;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Monotonic milliseconds since boot
struct UptimeClock;

impl Clock for UptimeClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Hygra firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Serial console on UART0
    let uart_config = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = BAUD_RATE;
        cfg
    };
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let link = UartLink::new(uart.into_buffered(Irqs, tx_buf, rx_buf));
    info!("Serial console on UART0 at {} baud", BAUD_RATE);

    // One data/clock GPIO pair per sensor channel
    let hub = SensorHub::new([
        sensor_channel(Flex::new(p.PIN_2), Flex::new(p.PIN_3)),
        sensor_channel(Flex::new(p.PIN_4), Flex::new(p.PIN_5)),
        sensor_channel(Flex::new(p.PIN_6), Flex::new(p.PIN_7)),
    ]);
    info!("Sensor channels initialized");

    // 16x2 HD44780 panel in 4-bit mode: RS, E, then D4..D7
    let lcd = Hd44780::new(
        Output::new(p.PIN_8, Level::Low),
        Output::new(p.PIN_9, Level::Low),
        [
            Output::new(p.PIN_10, Level::Low),
            Output::new(p.PIN_11, Level::Low),
            Output::new(p.PIN_12, Level::Low),
            Output::new(p.PIN_13, Level::Low),
        ],
    );
    let panel = Panel::new(lcd);
    info!("Panel initialized");

    spawner.spawn(hub_task(hub, link, panel)).unwrap();
    info!("Hub task spawned, firmware running");
}

/// Build one sensor channel from its data and clock pins
fn sensor_channel(data: Flex<'static>, sck: Flex<'static>) -> Channel<FlexLine<'static>> {
    let data = FlexLine::new(data);
    let mut sck = FlexLine::new(sck);
    // The clock idles low between transactions; data stays released.
    sck.drive_low();
    Channel::new(data, sck)
}

/// Control loop: sensor acquisition, panel refresh and serial queries.
///
/// A single cooperative task. Each pass advances every channel by at most
/// one bus step, lets the hub repaint the panel when a refresh is due,
/// then serves at most one console query.
#[embassy_executor::task]
async fn hub_task(
    mut hub: SensorHub<FlexLine<'static>>,
    mut link: UartLink,
    mut panel: Panel<Hd44780>,
) {
    info!("Hub task started");

    let clock = UptimeClock;

    if let Err(e) = panel.splash(env!("CARGO_PKG_VERSION")) {
        warn!("Splash failed: {:?}", e);
    }
    Timer::after_secs(SPLASH_SECS).await;
    if let Err(e) = panel.main_screen() {
        warn!("Panel setup failed: {:?}", e);
    }

    loop {
        let now_ms = clock.now_ms();

        let events = hub.tick(now_ms, &mut panel);
        for (index, event) in events.iter().enumerate() {
            match event {
                Some(ChannelEvent::Started(command)) => {
                    trace!("ch{}: started {:?}", index, command);
                }
                Some(ChannelEvent::Acknowledged) => {
                    trace!("ch{}: acknowledged", index);
                }
                Some(ChannelEvent::Completed { command, raw }) => {
                    debug!("ch{}: completed {:?} raw={}", index, command, raw);
                }
                Some(ChannelEvent::TimedOut(phase)) => {
                    warn!("ch{}: sensor timed out in {:?}", index, phase);
                }
                None => {}
            }
        }

        let readings = hub.readings();
        if let Some(reply) = protocol::poll_query(&mut link, &clock, &readings) {
            debug!("query answered: {:?}", reply);
        }

        Timer::after_millis(1).await;
    }
}
