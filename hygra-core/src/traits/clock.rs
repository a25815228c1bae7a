//! Monotonic time source trait

/// Monotonic milliseconds since boot.
///
/// The control loop reads this once per tick and hands the value to the
/// scheduler; the query protocol reads it live while waiting out its input
/// timeout. It never goes backwards and is not expected to wrap within the
/// life of the device.
pub trait Clock {
    /// Current time in milliseconds.
    fn now_ms(&self) -> u64;
}
