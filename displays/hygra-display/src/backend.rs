//! Display backend trait
//!
//! Defines the interface for character-mode display hardware.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Position outside the character grid
    InvalidPosition,
    /// Display not initialized
    NotInitialized,
}

/// Text display backend trait
///
/// Provides a hardware-agnostic interface for writing to small character
/// displays. Implementations handle the controller specifics (parallel
/// HD44780, I2C backpack, or a host-side fake for tests).
pub trait TextDisplay {
    /// Clear the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at the specified row and column
    ///
    /// - `row`: Row number (0-based)
    /// - `col`: Column number in characters (0-based)
    /// - `text`: Text to display
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);
}
