//! Serial link trait for the query protocol

/// Byte-oriented host link.
///
/// Receive is polled: the protocol handler runs inside the control loop and
/// must never park the thread waiting for input. Transmit is best-effort;
/// a reply that cannot be sent is dropped rather than stalling acquisition.
pub trait SerialLink {
    /// Take one received byte if one is waiting. Never blocks.
    fn poll_byte(&mut self) -> Option<u8>;

    /// Queue a complete buffer for transmission.
    fn write_all(&mut self, bytes: &[u8]);
}
