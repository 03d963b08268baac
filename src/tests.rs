#[cfg(test)]
mod tests {
    use crate::clock::{verify_scramble, verify_seeds, Move, RubiksClock};
    use crate::config::PuzzleConfig;
    use crate::ffi::input::{RC_APPLIED, RC_IGNORED};
    use crate::ffi::lifecycle::tests::bomb_info;
    use crate::ffi::{
        rc_create, rc_destroy, rc_explode, rc_get_clock, rc_get_hint, rc_is_front, rc_is_solved,
        rc_press_flip, rc_press_gear, rc_press_pin, rc_press_reset, rc_set_solved_callback,
        rc_tick,
    };
    use crate::host::{BombInfo, NoopHooks};
    use crate::state::{PuzzleState, Side};
    use std::ffi::{c_char, CString};
    use std::ptr;
    use std::sync::atomic::{AtomicU32, Ordering};

    static SOLVED_ID: AtomicU32 = AtomicU32::new(0);
    static SOLVED_CALLS: AtomicU32 = AtomicU32::new(0);

    extern "C" fn on_solved(puzzle: u32) {
        SOLVED_ID.store(puzzle, Ordering::SeqCst);
        SOLVED_CALLS.fetch_add(1, Ordering::SeqCst);
    }

    unsafe fn create(id: u32, config: &str) -> *mut RubiksClock {
        let serial = CString::new("KT2BQ9").unwrap();
        let config = CString::new(config).unwrap();
        let info = bomb_info(&serial);
        rc_create(id, &info, config.as_ptr())
    }

    /// Follow one hint using only the C ABI buttons.
    unsafe fn press_move(puzzle: *mut RubiksClock, m: &Move) {
        let facing = if rc_is_front(puzzle) == 1 {
            Side::Front
        } else {
            Side::Back
        };
        if facing != m.side {
            assert_eq!(rc_press_flip(puzzle), RC_APPLIED);
        }
        for (pin, &change) in m.resolved.pins.iter().enumerate() {
            if change {
                assert_eq!(rc_press_pin(puzzle, pin as i32), RC_APPLIED);
            }
        }
        let button = (m.resolved.gear * 2) as i32 + i32::from(m.resolved.turn > 0);
        for _ in 0..m.resolved.turn.unsigned_abs() {
            assert_eq!(rc_press_gear(puzzle, button), RC_APPLIED);
        }
    }

    #[test]
    fn test_full_solve_through_ffi() {
        unsafe {
            let puzzle = create(42, "num_moves = 6\nseed = 2024\n");
            assert!(!puzzle.is_null());
            assert_eq!(rc_set_solved_callback(puzzle, Some(on_solved)), 0);

            let moves = (*puzzle).moves().to_vec();
            assert_eq!(moves.len(), 6);
            for m in &moves {
                assert_eq!(rc_is_solved(puzzle), 0);
                press_move(puzzle, m);
            }

            assert_eq!(rc_is_solved(puzzle), 1);
            for clock in 0..18 {
                assert_eq!(rc_get_clock(puzzle, clock), 0);
            }
            assert_eq!(rc_get_hint(puzzle, ptr::null_mut(), ptr::null_mut()), 0);
            assert_eq!(SOLVED_ID.load(Ordering::SeqCst), 42);
            assert!(SOLVED_CALLS.load(Ordering::SeqCst) >= 1);

            // Frozen
            assert_eq!(rc_press_gear(puzzle, 1), RC_IGNORED);
            assert_eq!(rc_press_reset(puzzle), RC_IGNORED);
            rc_destroy(puzzle);
        }
    }

    #[test]
    fn test_wander_then_reset_then_solve() {
        unsafe {
            let puzzle = create(3, "num_moves = 4\nseed = 77\n");
            assert!(!puzzle.is_null());
            let moves = (*puzzle).moves().to_vec();

            for button in [1, 1, 6, 3] {
                rc_press_gear(puzzle, button);
            }
            rc_press_pin(puzzle, 2);
            rc_press_flip(puzzle);
            rc_press_gear(puzzle, 4);
            assert_eq!(rc_press_reset(puzzle), RC_APPLIED);

            let mut pin = -1;
            let mut clock = -1;
            assert_eq!(rc_get_hint(puzzle, &mut pin, &mut clock), 1);
            assert_eq!((*puzzle).hint().map(|h| h.move_index), Some(0));

            for m in &moves {
                press_move(puzzle, m);
            }
            assert_eq!(rc_is_solved(puzzle), 1);
            rc_destroy(puzzle);
        }
    }

    #[test]
    fn test_animation_drains_after_input() {
        unsafe {
            let puzzle = create(5, "num_moves = 3\nseed = 9\n\n[animation]\ngear_step_ms = 10\npin_ms = 10\nflip_ms = 10\n");
            assert!(!puzzle.is_null());
            (*puzzle).take_animations();

            rc_press_gear(puzzle, 3);
            rc_press_pin(puzzle, 0);
            rc_press_flip(puzzle);

            let mut finished = 0;
            for _ in 0..10 {
                if rc_tick(puzzle, 10, ptr::null_mut()) == 2 {
                    finished += 1;
                }
            }
            assert_eq!(finished, 3);
            assert_eq!(rc_tick(puzzle, 10, ptr::null_mut()), 0);
            rc_destroy(puzzle);
        }
    }

    #[test]
    fn test_explode_reports_merged_turns() {
        unsafe {
            let puzzle = create(8, "num_moves = 3\nseed = 5\nmodifications = false\n");
            assert!(!puzzle.is_null());
            rc_press_gear(puzzle, 7);
            rc_press_gear(puzzle, 7);
            rc_press_gear(puzzle, 7);

            let mut buf = vec![0 as c_char; 256];
            let written = rc_explode(puzzle, buf.as_mut_ptr(), buf.len());
            assert!(written > 0);
            let text: String = buf[..written as usize].iter().map(|&c| c as u8 as char).collect();
            assert!(text.starts_with("1. turn gear 3 clockwise 3 hour(s)"));
            assert!(!text.contains("2."));
            rc_destroy(puzzle);
        }
    }

    #[test]
    fn test_seed_sweep_is_consistent() {
        let info = BombInfo::with_serial("PL7WN3");
        let config = PuzzleConfig {
            num_moves: 5,
            ..PuzzleConfig::default()
        };
        let failing = verify_seeds(0..64, &info, &config, 4).unwrap();
        assert!(failing.is_empty(), "seeds failed to replay: {failing:?}");

        let seeded = PuzzleConfig {
            seed: Some(12),
            ..config
        };
        let puzzle = RubiksClock::new(1, &info, &seeded, Box::new(NoopHooks)).unwrap();
        assert!(verify_scramble(puzzle.state(), puzzle.moves()));
        assert!(!verify_scramble(&PuzzleState::default(), puzzle.moves()));
    }
}
