//! Hardware abstraction traits
//!
//! The core crate talks to the board exclusively through these seams; the
//! firmware crate provides the implementations, and the test suite provides
//! scripted ones.

pub mod clock;
pub mod display;
pub mod line;
pub mod serial;

pub use clock::Clock;
pub use display::DisplaySink;
pub use line::BusLine;
pub use serial::SerialLink;
