//! Rubik's Clock - puzzle module core
//!
//! A double-sided Rubik's Clock with 18 dials, 4 pins and 4 gears, scrambled
//! from a serial-dependent instruction manual. The host drives it through the
//! C ABI in `ffi`; Rust callers can use `clock::RubiksClock` directly.

pub mod clock;
pub mod config;
pub mod error;
pub mod ffi;
pub mod host;
pub mod state;

pub use clock::RubiksClock;
pub use config::{AnimationConfig, PuzzleConfig};
pub use error::{ClockError, Result};
pub use host::{BombInfo, HostHooks, NoopHooks};
pub use state::{PuzzleState, Side};

#[cfg(test)]
mod tests;
