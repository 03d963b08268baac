//! Frame-driven animation playback for the host renderer.

use std::time::Duration;

use crate::clock::tables::CLOCK_COUNT;
use crate::clock::{AnimationTick, RubiksClock, VisualEvent};

pub const RC_FRAME_GEAR: u8 = 0;
pub const RC_FRAME_PIN: u8 = 1;
pub const RC_FRAME_FLIP: u8 = 2;

/// One animation frame. `index` is the gear or pin, `flag` is the new pin
/// position or the side turned to, `deltas` is only set for gear turns.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RcFrame {
    pub kind: u8,
    pub index: i32,
    pub flag: u8,
    pub magnitude: u32,
    pub progress: f32,
    pub deltas: [i32; CLOCK_COUNT],
}

impl RcFrame {
    fn new(event: &VisualEvent, progress: f32) -> Self {
        let mut frame = RcFrame {
            kind: RC_FRAME_GEAR,
            index: -1,
            flag: 0,
            magnitude: 0,
            progress,
            deltas: [0; CLOCK_COUNT],
        };
        match *event {
            VisualEvent::GearTurned {
                gear,
                deltas,
                magnitude,
            } => {
                frame.index = gear as i32;
                frame.magnitude = magnitude;
                frame.deltas = deltas;
            }
            VisualEvent::PinMoved { pin, up } => {
                frame.kind = RC_FRAME_PIN;
                frame.index = pin as i32;
                frame.flag = u8::from(up);
            }
            VisualEvent::OrientationFlipped { to_front } => {
                frame.kind = RC_FRAME_FLIP;
                frame.flag = u8::from(to_front);
            }
        }
        frame
    }
}

/// Advances the animation queue by `dt_ms` milliseconds.
///
/// # Safety
/// - `ptr` must be a valid pointer to a puzzle, or null
/// - `out_frame` must be a valid writable pointer, or null
///
/// # Returns
/// 0 if idle, 1 if an animation is playing, 2 if one finished on this frame,
/// -1 on null puzzle pointer. `out_frame` is written for 1 and 2.
#[no_mangle]
pub unsafe extern "C" fn rc_tick(ptr: *mut RubiksClock, dt_ms: u32, out_frame: *mut RcFrame) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    let (status, frame) = match (*ptr).tick(Duration::from_millis(u64::from(dt_ms))) {
        AnimationTick::Idle => return 0,
        AnimationTick::Playing { event, progress } => (1, RcFrame::new(event, progress)),
        AnimationTick::Finished(event) => (2, RcFrame::new(&event, 1.0)),
    };
    if !out_frame.is_null() {
        *out_frame = frame;
    }
    status
}
