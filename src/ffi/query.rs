//! Read-only state queries for rendering and highlighting.

use crate::clock::tables::{CLOCK_COUNT, PIN_COUNT};
use crate::clock::RubiksClock;

/// Gets the hour (0-11, 0 is twelve o'clock) of a physical clock.
///
/// # Safety
/// - `ptr` must be a valid pointer to a puzzle, or null
///
/// # Returns
/// The hour, or -1 on null pointer or out-of-range clock.
#[no_mangle]
pub unsafe extern "C" fn rc_get_clock(ptr: *const RubiksClock, clock: i32) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    match usize::try_from(clock) {
        Ok(clock) if clock < CLOCK_COUNT => i32::from((*ptr).state().clocks[clock]),
        _ => -1,
    }
}

/// Gets a physical pin: 1 if up (seen from the front), 0 if down.
///
/// # Safety
/// - `ptr` must be a valid pointer to a puzzle, or null
///
/// # Returns
/// 1 or 0, or -1 on null pointer or out-of-range pin.
#[no_mangle]
pub unsafe extern "C" fn rc_get_pin(ptr: *const RubiksClock, pin: i32) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    match usize::try_from(pin) {
        Ok(pin) if pin < PIN_COUNT => i32::from((*ptr).state().pins[pin]),
        _ => -1,
    }
}

/// # Safety
/// - `ptr` must be a valid pointer to a puzzle, or null
///
/// # Returns
/// 1 if the front faces the player, 0 if the back does, -1 on null pointer.
#[no_mangle]
pub unsafe extern "C" fn rc_is_front(ptr: *const RubiksClock) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    i32::from((*ptr).state().side.is_front())
}

/// # Safety
/// - `ptr` must be a valid pointer to a puzzle, or null
///
/// # Returns
/// 1 if solved, 0 if not, -1 on null pointer.
#[no_mangle]
pub unsafe extern "C" fn rc_is_solved(ptr: *const RubiksClock) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    i32::from((*ptr).is_solved())
}

/// Writes the physical pin (0-3) and clock (0-17) to light for the active hint.
///
/// # Safety
/// - `ptr` must be a valid pointer to a puzzle, or null
/// - `out_pin` and `out_clock` must be valid writable pointers, or null
///
/// # Returns
/// 1 if a hint is active, 0 if none, -1 on null puzzle pointer.
#[no_mangle]
pub unsafe extern "C" fn rc_get_hint(
    ptr: *const RubiksClock,
    out_pin: *mut i32,
    out_clock: *mut i32,
) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    let Some(hint) = (*ptr).hint() else {
        return 0;
    };
    if !out_pin.is_null() {
        *out_pin = hint.physical_pin() as i32;
    }
    if !out_clock.is_null() {
        *out_clock = hint.physical_clock() as i32;
    }
    1
}
