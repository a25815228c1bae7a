//! Bus line control trait

/// One wire of the two-wire sensor bus.
///
/// An implementation owns a single GPIO line that can switch between
/// push-pull output and high-impedance input. The data line changes hands
/// between controller and sensor mid-transfer; the clock line only ever
/// drives. Level and mode changes must have settled on the wire by the time
/// a call returns, because the state machine issues them back-to-back and
/// samples immediately afterwards.
pub trait BusLine {
    /// Drive the line high.
    fn drive_high(&mut self);

    /// Drive the line low.
    fn drive_low(&mut self);

    /// Stop driving: switch to input so the sensor (or the pull-up) owns
    /// the level.
    fn release(&mut self);

    /// Sample the current line level.
    fn is_high(&self) -> bool;

    /// Check if the line is low.
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}
