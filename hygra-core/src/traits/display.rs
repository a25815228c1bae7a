//! Display sink trait

/// Consumer of per-channel readings for presentation.
///
/// The scheduler calls [`render`](DisplaySink::render) once per channel on
/// every display refresh and ignores errors: losing the display must not
/// disturb acquisition or the query link. Layout, clamping to physical
/// ranges and the treatment of disconnected channels are entirely the
/// sink's business.
pub trait DisplaySink {
    /// Error type of the underlying display hardware.
    type Error;

    /// Draw one channel's current values.
    ///
    /// `connected == false` means the values are stale; sinks normally show
    /// a placeholder instead of them.
    fn render(
        &mut self,
        index: usize,
        temperature_c: f32,
        humidity_pct: f32,
        connected: bool,
    ) -> Result<(), Self::Error>;
}
