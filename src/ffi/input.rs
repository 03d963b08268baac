//! Player buttons and the explosion notice.

use std::ffi::c_char;

use crate::clock::{Response, RubiksClock};
use crate::error::Result;

/// Input applied.
pub const RC_APPLIED: i32 = 0;
/// Input ignored because the module is solved.
pub const RC_IGNORED: i32 = 1;
pub const RC_NULL: i32 = -1;
pub const RC_OUT_OF_RANGE: i32 = -2;

fn status(result: Result<Response>) -> i32 {
    match result {
        Ok(Response::Applied) => RC_APPLIED,
        Ok(Response::Ignored) => RC_IGNORED,
        Err(err) => {
            tracing::debug!(%err, "rejected input");
            RC_OUT_OF_RANGE
        }
    }
}

fn index(value: i32) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// Presses a gear button (0-7): `button / 2` is the corner, odd is clockwise.
///
/// # Safety
/// - `ptr` must be a valid pointer to a puzzle, or null
#[no_mangle]
pub unsafe extern "C" fn rc_press_gear(ptr: *mut RubiksClock, button: i32) -> i32 {
    if ptr.is_null() {
        return RC_NULL;
    }
    status((*ptr).press_gear_button(index(button)))
}

/// Presses a pin (0-3) as numbered on the face the player sees.
///
/// # Safety
/// - `ptr` must be a valid pointer to a puzzle, or null
#[no_mangle]
pub unsafe extern "C" fn rc_press_pin(ptr: *mut RubiksClock, pin: i32) -> i32 {
    if ptr.is_null() {
        return RC_NULL;
    }
    status((*ptr).press_pin_button(index(pin)))
}

/// Turns the puzzle over.
///
/// # Safety
/// - `ptr` must be a valid pointer to a puzzle, or null
#[no_mangle]
pub unsafe extern "C" fn rc_press_flip(ptr: *mut RubiksClock) -> i32 {
    if ptr.is_null() {
        return RC_NULL;
    }
    status(Ok((*ptr).press_flip()))
}

/// Returns the puzzle to its scrambled start.
///
/// # Safety
/// - `ptr` must be a valid pointer to a puzzle, or null
#[no_mangle]
pub unsafe extern "C" fn rc_press_reset(ptr: *mut RubiksClock) -> i32 {
    if ptr.is_null() {
        return RC_NULL;
    }
    status(Ok((*ptr).press_reset()))
}

/// Logs the audit trail after the bomb exploded and copies it into `out_buf`
/// as a NUL-terminated string, truncated to fit.
///
/// # Safety
/// - `ptr` must be a valid pointer to a puzzle, or null
/// - `out_buf` must point to at least `buf_len` writable bytes, or be null
///
/// # Returns
/// Number of bytes written excluding the terminator, or -1 on null handle.
#[no_mangle]
pub unsafe extern "C" fn rc_explode(
    ptr: *mut RubiksClock,
    out_buf: *mut c_char,
    buf_len: usize,
) -> i64 {
    if ptr.is_null() {
        return -1;
    }
    let trail = (*ptr).explode();
    if out_buf.is_null() || buf_len == 0 {
        return 0;
    }

    let bytes = trail.as_bytes();
    let len = bytes.len().min(buf_len - 1);
    let out = std::slice::from_raw_parts_mut(out_buf.cast::<u8>(), buf_len);
    out[..len].copy_from_slice(&bytes[..len]);
    out[len] = 0;
    len as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::lifecycle::{rc_destroy, tests::create};
    use std::ptr;

    #[test]
    fn test_press_buttons() {
        let puzzle = create(3);
        unsafe {
            assert_eq!(rc_press_gear(puzzle, 2), RC_APPLIED);
            assert_eq!(rc_press_pin(puzzle, 1), RC_APPLIED);
            assert_eq!(rc_press_flip(puzzle), RC_APPLIED);
            assert_eq!((*puzzle).audit_log().entries().len(), 3);
            assert_eq!(rc_press_reset(puzzle), RC_APPLIED);
            assert!((*puzzle).audit_log().is_empty());
            rc_destroy(puzzle);
        }
    }

    #[test]
    fn test_out_of_range_input() {
        let puzzle = create(3);
        unsafe {
            assert_eq!(rc_press_gear(puzzle, 8), RC_OUT_OF_RANGE);
            assert_eq!(rc_press_gear(puzzle, -1), RC_OUT_OF_RANGE);
            assert_eq!(rc_press_pin(puzzle, 4), RC_OUT_OF_RANGE);
            assert!((*puzzle).audit_log().is_empty());
            rc_destroy(puzzle);
        }
    }

    #[test]
    fn test_explode_copies_trail() {
        let puzzle = create(5);
        let mut buf = [0 as c_char; 16];
        unsafe {
            rc_press_flip(puzzle);
            let written = rc_explode(puzzle, buf.as_mut_ptr(), buf.len());
            assert_eq!(written, 15);
            assert_eq!(buf[15], 0);
            let text: Vec<u8> = buf[..15].iter().map(|&c| c as u8).collect();
            assert_eq!(&text, b"1. turn over to");
            rc_destroy(puzzle);
        }
    }

    #[test]
    fn test_null_pointer_handling() {
        unsafe {
            assert_eq!(rc_press_gear(ptr::null_mut(), 0), RC_NULL);
            assert_eq!(rc_press_pin(ptr::null_mut(), 0), RC_NULL);
            assert_eq!(rc_press_flip(ptr::null_mut()), RC_NULL);
            assert_eq!(rc_press_reset(ptr::null_mut()), RC_NULL);
            assert_eq!(rc_explode(ptr::null_mut(), ptr::null_mut(), 0), -1);
        }
    }
}
