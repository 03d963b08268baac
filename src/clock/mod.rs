//! Core puzzle logic.
//!
//! This module contains the geometry tables, the gear engine, instruction
//! modifications, scramble generation, action logging and the module instance
//! that ties them together. The FFI layer in `ffi/` calls into `puzzle`.

pub mod animation;
pub mod gears;
pub mod log;
pub mod modification;
pub mod puzzle;
pub mod scramble;
pub mod tables;
pub mod verify;

pub use animation::{AnimationQueue, AnimationTick, VisualEvent};
pub use gears::{apply_delta, coupled, rotate, wrap_hour, ClockDelta};
pub use log::{Action, AuditLog, ResetStack};
pub use modification::{resolve, Cell, Modification, Modifier, ResolvedMove};
pub use puzzle::{Hint, Mode, Response, RubiksClock};
pub use scramble::{play_backward, play_forward, scramble, Move};
pub use verify::{replay_solution, verify_scramble, verify_seeds};
