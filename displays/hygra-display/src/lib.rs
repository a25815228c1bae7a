//! Display abstraction and panel layout for the Hygra sensor hub
//!
//! This crate provides:
//! - `TextDisplay` trait for small character-mode displays (HD44780 and friends)
//! - `Panel`, the fixed 16x2 hub layout that implements the core `DisplaySink`
//!
//! # Architecture
//!
//! The firmware crate implements `TextDisplay` with its hardware-specific code
//! (parallel 4-bit HD44780 today, an I2C backpack would slot in the same way).
//! The panel renders channel readings into that trait without caring which
//! controller sits behind it, so the whole layout is host-testable against a
//! fake backend.

#![no_std]

pub mod backend;
pub mod panel;

// Re-export key types
pub use backend::{DisplayError, TextDisplay};
pub use panel::{Panel, PANEL_COLS, PANEL_ROWS};
