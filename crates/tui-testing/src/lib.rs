//! Testing utilities for the desk widgets.
//!
//! - [`TestTerminal`]: render into a headless buffer and read it back as text
//! - [`InputSequence`]: build keyboard and mouse event streams

pub mod input;
pub mod terminal;

pub use input::InputSequence;
pub use terminal::TestTerminal;
