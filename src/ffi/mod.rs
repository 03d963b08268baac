//! C FFI layer for the game host.
//!
//! All functions are marked with `#[no_mangle]` and use `extern "C"`.
//!
//! The actual logic is in the `clock` module. These functions are thin wrappers
//! that handle null checks, pointer safety, and C-to-Rust conversions.

pub mod animation;
pub mod input;
pub mod lifecycle;
pub mod query;

pub use animation::{rc_tick, RcFrame};
pub use input::{rc_explode, rc_press_flip, rc_press_gear, rc_press_pin, rc_press_reset};
pub use lifecycle::{
    rc_create, rc_destroy, rc_init_logging, rc_set_solved_callback, RcBombInfo, RcSolvedCallback,
};
pub use query::{rc_get_clock, rc_get_hint, rc_get_pin, rc_is_front, rc_is_solved};
