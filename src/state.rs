//! Core puzzle state and helper methods.

use crate::clock::gears::{self, ClockDelta};
use crate::clock::tables::{CLOCK_COUNT, HOURS, PIN_COUNT};

/// Which face of the puzzle is presented to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Front,
    Back,
}

impl Side {
    #[inline]
    pub fn flipped(self) -> Side {
        match self {
            Side::Front => Side::Back,
            Side::Back => Side::Front,
        }
    }

    #[inline]
    pub fn is_front(self) -> bool {
        self == Side::Front
    }
}

/// The physical state of a Rubik's clock.
///
/// Clocks 0-8 are the front face (row-major), clocks 9-17 the back face, where
/// clock `9 + k` sits directly behind front clock `k`. Pins are indexed by
/// front-face corner and `true` means "up" as seen from the front.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PuzzleState {
    pub clocks: [u8; CLOCK_COUNT],
    pub pins: [bool; PIN_COUNT],
    pub side: Side,
}

impl Default for PuzzleState {
    fn default() -> Self {
        PuzzleState {
            clocks: [0; CLOCK_COUNT],
            pins: [true; PIN_COUNT],
            side: Side::Front,
        }
    }
}

impl PuzzleState {
    /// All clocks at twelve.
    pub fn is_solved(&self) -> bool {
        self.clocks.iter().all(|&hour| hour == 0)
    }

    /// Turn a physical gear by `amount` hours (clockwise as seen from the front)
    /// and return the per-clock delta that was applied.
    pub fn turn_gear(&mut self, gear: usize, amount: i32) -> ClockDelta {
        let delta = gears::rotate(gear, amount, &self.pins);
        gears::apply_delta(&mut self.clocks, &delta);
        debug_assert!(
            self.clocks.iter().all(|&hour| (hour as i32) < HOURS),
            "clock left the 0..12 range"
        );
        delta
    }

    /// Toggle a physical pin and return its new position.
    pub fn toggle_pin(&mut self, pin: usize) -> bool {
        self.pins[pin] = !self.pins[pin];
        self.pins[pin]
    }

    /// Turn the puzzle over and return the side now facing the player.
    pub fn flip(&mut self) -> Side {
        self.side = self.side.flipped();
        self.side
    }

    /// Whether clocks and pins equal the given snapshot. Orientation is not compared.
    pub fn matches(&self, clocks: &[u8; CLOCK_COUNT], pins: &[bool; PIN_COUNT]) -> bool {
        self.clocks == *clocks && self.pins == *pins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_solved() {
        let state = PuzzleState::default();
        assert!(state.is_solved());
        assert!(state.pins.iter().all(|&up| up));
        assert_eq!(state.side, Side::Front);
    }

    #[test]
    fn test_toggle_pin_is_involution() {
        let mut state = PuzzleState::default();
        assert!(!state.toggle_pin(2));
        assert!(state.toggle_pin(2));
        assert_eq!(state.pins, [true; PIN_COUNT]);
    }

    #[test]
    fn test_flip_twice_returns_to_front() {
        let mut state = PuzzleState::default();
        assert_eq!(state.flip(), Side::Back);
        assert_eq!(state.flip(), Side::Front);
    }

    #[test]
    fn test_turn_gear_wraps_hours() {
        let mut state = PuzzleState::default();
        state.turn_gear(0, -1);
        // Corner clock in front of gear 0 always follows it
        assert_eq!(state.clocks[0], 11);
        // Its twin on the back turns the other way
        assert_eq!(state.clocks[9], 1);
        assert!(!state.is_solved());
    }
}
