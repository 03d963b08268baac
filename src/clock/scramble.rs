//! Scramble generation.
//!
//! A scramble is a random solution played backwards: each step picks a lit
//! cell, resolves it through the modifications, and applies the inverse of
//! the resulting move. Playing the recorded moves forwards therefore always
//! returns to all clocks at twelve.

use std::collections::VecDeque;

use rand::Rng;
use tracing::{debug, trace};

use super::modification::{resolve, Cell, Modification, Modifier, ResolvedMove};
use super::tables::{CLOCK_COUNT, FACE_CLOCKS, PIN_COUNT};
use crate::state::{PuzzleState, Side};

/// One hint of the solution, stored in solve order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move {
    /// Cell lit for the player.
    pub lit: Cell,
    /// Empty when modifications are disabled.
    pub modifications: Vec<Modification>,
    /// What the player must do, as seen from `side`.
    pub resolved: ResolvedMove,
    pub side: Side,
    /// State in which this move is the active hint.
    pub clocks_at_start: [u8; CLOCK_COUNT],
    pub pins_at_start: [bool; PIN_COUNT],
}

impl Move {
    /// The resolved move in physical gear and pin indices.
    pub fn physical(&self) -> ResolvedMove {
        self.resolved.physical(self.side)
    }
}

/// Perform a physical move the way a solver would: change pins, then turn.
pub fn play_forward(state: &mut PuzzleState, physical: &ResolvedMove) {
    for (pin, &change) in physical.pins.iter().enumerate() {
        if change {
            state.toggle_pin(pin);
        }
    }
    state.turn_gear(physical.gear, physical.turn);
}

/// Undo a physical move: turn back, then change the same pins.
pub fn play_backward(state: &mut PuzzleState, physical: &ResolvedMove) {
    state.turn_gear(physical.gear, -physical.turn);
    for (pin, &change) in physical.pins.iter().enumerate() {
        if change {
            state.toggle_pin(pin);
        }
    }
}

/// Flip each pin with probability one half.
pub fn randomize_pins<R: Rng + ?Sized>(state: &mut PuzzleState, rng: &mut R) {
    for pin in 0..PIN_COUNT {
        if rng.random_bool(0.5) {
            state.toggle_pin(pin);
        }
    }
}

/// Draw a lit cell whose resolved move actually turns a gear.
///
/// The cell may not be the mirror image of the previous step's cell, which
/// would read as the same physical instruction from the other face.
pub fn draw_move<R: Rng + ?Sized>(
    rng: &mut R,
    previous: Option<Cell>,
    mods: &[Modification],
) -> (Cell, ResolvedMove) {
    loop {
        let lit = Cell::new(
            rng.random_range(0..FACE_CLOCKS),
            rng.random_range(0..PIN_COUNT),
        );
        if previous.is_some_and(|prev| prev.mirrored() == lit) {
            continue;
        }
        let resolved = resolve(lit, mods);
        if resolved.is_degenerate() {
            trace!(clock = lit.clock, pin = lit.pin, "resolved turn is zero, redrawing");
            continue;
        }
        return (lit, resolved);
    }
}

/// Scramble `state` with `num_moves` steps and return the hints in solve order.
///
/// Steps alternate faces, starting with the face opposite the current one.
/// Afterwards the puzzle is turned to the face of the first hint.
pub fn scramble<R: Rng + ?Sized>(
    state: &mut PuzzleState,
    num_moves: usize,
    modifier: Option<&Modifier>,
    rng: &mut R,
) -> Vec<Move> {
    randomize_pins(state, rng);

    let mut moves = VecDeque::with_capacity(num_moves);
    let mut side = state.side;
    let mut previous = None;

    for cur_move in 0..num_moves {
        side = side.flipped();
        let modifications = modifier
            .map(|m| m.for_step(num_moves, cur_move).to_vec())
            .unwrap_or_default();

        let (lit, resolved) = draw_move(rng, previous, &modifications);
        play_backward(state, &resolved.physical(side));

        debug!(
            step = cur_move,
            ?side,
            clock = lit.clock,
            pin = lit.pin,
            gear = resolved.gear,
            turn = resolved.turn,
            "scramble step"
        );

        moves.push_front(Move {
            lit,
            modifications,
            resolved,
            side,
            clocks_at_start: state.clocks,
            pins_at_start: state.pins,
        });
        previous = Some(lit);
    }

    if let Some(first) = moves.front() {
        if state.side != first.side {
            state.flip();
        }
    }

    moves.into()
}
