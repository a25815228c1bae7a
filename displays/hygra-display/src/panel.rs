//! Hub panel layout
//!
//! Renders the three channel readings onto a 16x2 character display.
//! Row 0 carries temperatures, row 1 relative humidities, and the last
//! column holds the unit glyph for its row.

use heapless::String;
use hygra_core::convert::{
    MAX_HUMIDITY_PCT, MAX_TEMPERATURE_C, MIN_HUMIDITY_PCT, MIN_TEMPERATURE_C,
};
use hygra_core::hub::CHANNEL_COUNT;
use hygra_core::traits::DisplaySink;

use crate::backend::{DisplayError, TextDisplay};

/// Number of character columns on the panel
pub const PANEL_COLS: u8 = 16;

/// Number of character rows on the panel
pub const PANEL_ROWS: u8 = 2;

/// First column of each channel's value cell
const CELL_COLUMNS: [u8; CHANNEL_COUNT] = [0, 5, 10];

/// Width of one value cell in characters
const CELL_WIDTH: usize = 4;

/// Column of the per-row unit glyph
const UNIT_COLUMN: u8 = 15;

/// Largest value that still fits a four character cell with one decimal
const ONE_DECIMAL_LIMIT: f32 = 99.95;

/// Fixed panel layout over any [`TextDisplay`].
///
/// All three channels are visible at once:
///
/// ```text
/// col  0123456789012345
///     +----------------+
///     |21.5  9.8  NC  C|
///     |45.3 50.1  NC  %|
///     +----------------+
/// ```
///
/// Each channel owns a four character cell starting at column 0, 5 or 10.
/// Refreshes repaint only the cells, so the unit glyphs drawn once by
/// [`main_screen`](Panel::main_screen) stay put and the panel never
/// flickers from full clears.
pub struct Panel<B: TextDisplay> {
    backend: B,
}

impl<B: TextDisplay> Panel<B> {
    /// Create a panel over the given backend
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Get the underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Draw the boot splash with the firmware version
    pub fn splash(&mut self, version: &str) -> Result<(), DisplayError> {
        self.backend.clear()?;
        self.backend.draw_text(0, 0, "T/RH Sensor Hub")?;

        let mut line: String<16> = String::new();
        let _ = write_to_string(&mut line, format_args!("hygra {}", version));
        self.backend.draw_text(1, 0, &line)
    }

    /// Clear the splash and draw the static unit glyphs
    pub fn main_screen(&mut self) -> Result<(), DisplayError> {
        self.backend.clear()?;
        self.backend.draw_text(0, UNIT_COLUMN, "C")?;
        self.backend.draw_text(1, UNIT_COLUMN, "%")
    }
}

impl<B: TextDisplay> DisplaySink for Panel<B> {
    type Error = DisplayError;

    fn render(
        &mut self,
        index: usize,
        temperature_c: f32,
        humidity_pct: f32,
        connected: bool,
    ) -> Result<(), DisplayError> {
        let Some(&column) = CELL_COLUMNS.get(index) else {
            return Err(DisplayError::InvalidPosition);
        };

        if !connected {
            self.backend.draw_text(0, column, " NC ")?;
            self.backend.draw_text(1, column, " NC ")?;
            return Ok(());
        }

        let temperature = format_cell(temperature_c, MIN_TEMPERATURE_C, MAX_TEMPERATURE_C);
        let humidity = format_cell(humidity_pct, MIN_HUMIDITY_PCT, MAX_HUMIDITY_PCT);
        self.backend.draw_text(0, column, &temperature)?;
        self.backend.draw_text(1, column, &humidity)
    }
}

/// Format one reading into its four character cell, right aligned.
///
/// Values keep one decimal while four characters hold it and fall back to
/// whole units for three digit or negative values. Values outside the
/// sensor's physical range clamp to `MAX`/`MIN` markers.
fn format_cell(value: f32, min: f32, max: f32) -> String<CELL_WIDTH> {
    let mut cell: String<CELL_WIDTH> = String::new();
    if value > max {
        let _ = cell.push_str(" MAX");
    } else if value < min {
        let _ = cell.push_str(" MIN");
    } else if (0.0..ONE_DECIMAL_LIMIT).contains(&value) {
        let _ = write_to_string(&mut cell, format_args!("{:4.1}", value));
    } else {
        let _ = write_to_string(&mut cell, format_args!("{:4.0}", value));
    }
    cell
}

/// Helper to write formatted output to a heapless String
fn write_to_string<const N: usize>(
    s: &mut String<N>,
    args: core::fmt::Arguments<'_>,
) -> core::fmt::Result {
    use core::fmt::Write;
    s.write_fmt(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory character grid standing in for the real display.
    struct GridBackend {
        rows: [[u8; PANEL_COLS as usize]; PANEL_ROWS as usize],
    }

    impl GridBackend {
        fn new() -> Self {
            Self {
                rows: [[b' '; PANEL_COLS as usize]; PANEL_ROWS as usize],
            }
        }

        fn line(&self, row: usize) -> &str {
            core::str::from_utf8(&self.rows[row]).unwrap()
        }
    }

    impl TextDisplay for GridBackend {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.rows = [[b' '; PANEL_COLS as usize]; PANEL_ROWS as usize];
            Ok(())
        }

        fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
            let row = usize::from(row);
            let col = usize::from(col);
            if row >= self.rows.len() || col + text.len() > self.rows[row].len() {
                return Err(DisplayError::InvalidPosition);
            }
            self.rows[row][col..col + text.len()].copy_from_slice(text.as_bytes());
            Ok(())
        }

        fn dimensions(&self) -> (u8, u8) {
            (PANEL_COLS, PANEL_ROWS)
        }
    }

    #[test]
    fn test_splash_names_product_and_version() {
        let mut panel = Panel::new(GridBackend::new());
        panel.splash("0.1.0").unwrap();

        assert_eq!(panel.backend().line(0), "T/RH Sensor Hub ");
        assert_eq!(panel.backend().line(1), "hygra 0.1.0     ");
    }

    #[test]
    fn test_main_screen_draws_unit_glyphs() {
        let mut panel = Panel::new(GridBackend::new());
        panel.main_screen().unwrap();

        assert_eq!(panel.backend().line(0), "               C");
        assert_eq!(panel.backend().line(1), "               %");
    }

    #[test]
    fn test_render_places_cells_by_channel() {
        let mut panel = Panel::new(GridBackend::new());
        panel.main_screen().unwrap();
        panel.render(0, 21.5, 45.3, true).unwrap();
        panel.render(1, 9.8, 50.1, true).unwrap();
        panel.render(2, 103.4, 99.9, true).unwrap();

        assert_eq!(panel.backend().line(0), "21.5  9.8  103 C");
        assert_eq!(panel.backend().line(1), "45.3 50.1 99.9 %");
    }

    #[test]
    fn test_disconnected_renders_nc_in_both_rows() {
        let mut panel = Panel::new(GridBackend::new());
        panel.main_screen().unwrap();
        panel.render(1, 25.0, 50.0, false).unwrap();

        assert_eq!(&panel.backend().line(0)[5..9], " NC ");
        assert_eq!(&panel.backend().line(1)[5..9], " NC ");
    }

    #[test]
    fn test_reconnect_overwrites_placeholder() {
        let mut panel = Panel::new(GridBackend::new());
        panel.main_screen().unwrap();
        panel.render(0, 25.0, 50.0, false).unwrap();
        panel.render(0, 25.0, 50.0, true).unwrap();

        assert_eq!(&panel.backend().line(0)[0..4], "25.0");
        assert_eq!(&panel.backend().line(1)[0..4], "50.0");
    }

    #[test]
    fn test_out_of_range_clamps_to_markers() {
        let mut panel = Panel::new(GridBackend::new());
        panel.render(0, 130.0, -2.0, true).unwrap();

        assert_eq!(&panel.backend().line(0)[0..4], " MAX");
        assert_eq!(&panel.backend().line(1)[0..4], " MIN");
    }

    #[test]
    fn test_negative_temperature_drops_decimals() {
        let mut panel = Panel::new(GridBackend::new());
        panel.render(2, -5.0, 3.2, true).unwrap();

        assert_eq!(&panel.backend().line(0)[10..14], "  -5");
        assert_eq!(&panel.backend().line(1)[10..14], " 3.2");
    }

    #[test]
    fn test_full_scale_humidity_fits_without_decimals() {
        let mut panel = Panel::new(GridBackend::new());
        panel.render(0, 25.0, 100.0, true).unwrap();

        assert_eq!(&panel.backend().line(1)[0..4], " 100");
    }

    #[test]
    fn test_unknown_channel_is_rejected() {
        let mut panel = Panel::new(GridBackend::new());

        assert_eq!(
            panel.render(CHANNEL_COUNT, 25.0, 50.0, true),
            Err(DisplayError::InvalidPosition)
        );
    }

    #[test]
    fn test_cell_switches_precision_at_three_digits() {
        assert_eq!(format_cell(0.0, 0.0, 100.0).as_str(), " 0.0");
        assert_eq!(format_cell(99.94, 0.0, 100.0).as_str(), "99.9");
        assert_eq!(format_cell(99.96, 0.0, 100.0).as_str(), " 100");
    }
}
