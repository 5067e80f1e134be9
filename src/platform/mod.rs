//! Platform abstraction layer
//!
//! Browser-facing glue kept free of `web_sys` so it runs in native tests:
//! - Key names to game commands
//! - Animation frame timestamps to fixed simulation steps

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::command_for_key;
