//! Serial console glue
//!
//! Adapts the buffered UART to the byte-at-a-time polling interface the
//! query protocol runs on.

use embassy_rp::uart::BufferedUart;
use embedded_io::{Read, ReadReady, Write};

use hygra_core::traits::SerialLink;

/// Host link over UART0.
///
/// Reads never block: the interrupt handler fills the RX ring and
/// [`poll_byte`](SerialLink::poll_byte) only drains it. Writes land in the
/// TX ring and are shifted out behind the control loop's back.
pub struct UartLink {
    uart: BufferedUart,
}

impl UartLink {
    pub fn new(uart: BufferedUart) -> Self {
        Self { uart }
    }
}

impl SerialLink for UartLink {
    fn poll_byte(&mut self) -> Option<u8> {
        if !self.uart.read_ready().ok()? {
            return None;
        }
        let mut byte = [0u8; 1];
        match self.uart.read(&mut byte) {
            Ok(n) if n > 0 => Some(byte[0]),
            _ => None,
        }
    }

    fn write_all(&mut self, bytes: &[u8]) {
        // Replies are best effort; a wedged console must not stall the loop.
        let _ = self.uart.write_all(bytes);
    }
}
