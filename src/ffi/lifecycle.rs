//! Puzzle creation, destruction, host callbacks and logging setup.

use std::ffi::{c_char, CStr};

use tracing_subscriber::EnvFilter;

use crate::clock::RubiksClock;
use crate::config::PuzzleConfig;
use crate::host::{BombInfo, HostHooks};

/// Edgework passed by the host. `serial` is a NUL-terminated ASCII string.
#[repr(C)]
pub struct RcBombInfo {
    pub serial: *const c_char,
    pub batteries: u32,
    pub aa_batteries: u32,
    pub d_batteries: u32,
    pub battery_holders: u32,
    pub lit_indicators: u32,
    pub unlit_indicators: u32,
    pub ports: u32,
    pub port_plates: u32,
    pub port_types: u32,
}

/// Called with the puzzle id when the module is solved.
pub type RcSolvedCallback = extern "C" fn(puzzle: u32);

struct CallbackHooks {
    on_solved: Option<RcSolvedCallback>,
}

impl HostHooks for CallbackHooks {
    fn solved(&mut self, puzzle: u32) {
        if let Some(callback) = self.on_solved {
            callback(puzzle);
        }
    }
}

/// Read a possibly-null C string. Null reads as empty.
unsafe fn read_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return Some(String::new());
    }
    CStr::from_ptr(ptr).to_str().ok().map(str::to_owned)
}

/// Creates and scrambles a puzzle.
///
/// # Safety
/// - `info` must be a valid pointer to an `RcBombInfo` whose `serial` is a
///   valid NUL-terminated string or null
/// - `config_toml` must be a valid NUL-terminated string, or null for defaults
///
/// # Returns
/// A pointer to the new puzzle, or null if the input is invalid. The pointer
/// must eventually be freed with `rc_destroy()`.
#[no_mangle]
pub unsafe extern "C" fn rc_create(
    id: u32,
    info: *const RcBombInfo,
    config_toml: *const c_char,
) -> *mut RubiksClock {
    if info.is_null() {
        return std::ptr::null_mut();
    }
    let raw = &*info;

    let Some(serial) = read_str(raw.serial) else {
        tracing::error!(puzzle = id, "serial number is not valid UTF-8");
        return std::ptr::null_mut();
    };
    let info = BombInfo {
        serial,
        batteries: raw.batteries,
        aa_batteries: raw.aa_batteries,
        d_batteries: raw.d_batteries,
        battery_holders: raw.battery_holders,
        lit_indicators: raw.lit_indicators,
        unlit_indicators: raw.unlit_indicators,
        ports: raw.ports,
        port_plates: raw.port_plates,
        port_types: raw.port_types,
    };

    let config = match read_str(config_toml) {
        Some(text) => match PuzzleConfig::from_toml_str(&text) {
            Ok(config) => config,
            Err(err) => {
                tracing::error!(puzzle = id, %err, "rejected puzzle configuration");
                return std::ptr::null_mut();
            }
        },
        None => {
            tracing::error!(puzzle = id, "configuration is not valid UTF-8");
            return std::ptr::null_mut();
        }
    };

    let hooks = Box::new(CallbackHooks { on_solved: None });
    match RubiksClock::new(id, &info, &config, hooks) {
        Ok(puzzle) => Box::into_raw(Box::new(puzzle)),
        Err(err) => {
            tracing::error!(puzzle = id, %err, "failed to create puzzle");
            std::ptr::null_mut()
        }
    }
}

/// Destroys a puzzle and frees its memory.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `rc_create()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn rc_destroy(ptr: *mut RubiksClock) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Registers the solved callback. Pass null to unregister.
///
/// # Safety
/// - `ptr` must be a valid pointer to a puzzle, or null
///
/// # Returns
/// 0 on success, -1 on null pointer.
#[no_mangle]
pub unsafe extern "C" fn rc_set_solved_callback(
    ptr: *mut RubiksClock,
    callback: Option<RcSolvedCallback>,
) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    (*ptr).set_hooks(Box::new(CallbackHooks {
        on_solved: callback,
    }));
    0
}

/// Installs a `tracing` subscriber filtered by `RUST_LOG`.
///
/// # Returns
/// 0 on success, 1 if a subscriber was already installed.
#[no_mangle]
pub extern "C" fn rc_init_logging() -> i32 {
    match tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::ffi::CString;
    use std::ptr;

    pub(crate) fn bomb_info(serial: &CString) -> RcBombInfo {
        RcBombInfo {
            serial: serial.as_ptr(),
            batteries: 2,
            aa_batteries: 2,
            d_batteries: 0,
            battery_holders: 1,
            lit_indicators: 1,
            unlit_indicators: 1,
            ports: 2,
            port_plates: 1,
            port_types: 2,
        }
    }

    pub(crate) fn create(seed: u64) -> *mut RubiksClock {
        let serial = CString::new("MX4TB7").unwrap();
        let config = CString::new(format!("num_moves = 4\nseed = {seed}\n")).unwrap();
        let info = bomb_info(&serial);
        unsafe { rc_create(9, &info, config.as_ptr()) }
    }

    #[test]
    fn test_create_and_destroy() {
        let puzzle = create(1);
        assert!(!puzzle.is_null());
        unsafe {
            assert_eq!((*puzzle).id(), 9);
            assert_eq!((*puzzle).moves().len(), 4);
            rc_destroy(puzzle);
        }
    }

    #[test]
    fn test_create_with_default_config() {
        let serial = CString::new("MX4TB7").unwrap();
        let info = bomb_info(&serial);
        unsafe {
            let puzzle = rc_create(1, &info, ptr::null());
            assert!(!puzzle.is_null());
            assert_eq!((*puzzle).moves().len(), 5);
            rc_destroy(puzzle);
        }
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let serial = CString::new("x").unwrap();
        let info = bomb_info(&serial);
        let bad_config = CString::new("num_moves = 0").unwrap();
        unsafe {
            assert!(rc_create(1, ptr::null(), ptr::null()).is_null());
            assert!(rc_create(1, &info, ptr::null()).is_null());

            let good_serial = CString::new("MX4TB7").unwrap();
            let good_info = bomb_info(&good_serial);
            assert!(rc_create(1, &good_info, bad_config.as_ptr()).is_null());
        }
    }

    #[test]
    fn test_create_rejects_huge_counts() {
        let serial = CString::new("MX4TB7").unwrap();
        let mut info = bomb_info(&serial);
        info.batteries = u32::MAX;
        info.lit_indicators = u32::MAX;
        info.unlit_indicators = u32::MAX;
        unsafe {
            assert!(rc_create(1, &info, ptr::null()).is_null());

            // Counts are unused without modifications
            let plain = CString::new("modifications = false\nseed = 3\n").unwrap();
            let puzzle = rc_create(1, &info, plain.as_ptr());
            assert!(!puzzle.is_null());
            rc_destroy(puzzle);
        }
    }

    #[test]
    fn test_destroy_null() {
        unsafe {
            // Should not crash
            rc_destroy(ptr::null_mut());
        }
    }

    #[test]
    fn test_set_callback_null_handle() {
        unsafe {
            assert_eq!(rc_set_solved_callback(ptr::null_mut(), None), -1);
        }
    }
}
