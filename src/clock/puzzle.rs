//! The module instance: owns the puzzle state, the hint list, the action
//! logs and the animation queue, and exposes the player's buttons.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::animation::{AnimationQueue, AnimationTick, VisualEvent};
use super::log::{Action, AuditLog, ResetStack};
use super::modification::{Cell, Modifier};
use super::scramble::{scramble, Move};
use super::tables::{
    validate_tables, GEAR_BUTTON_COUNT, MIRROR_CLOCKS, MIRROR_PINS, PIN_COUNT,
};
use crate::config::PuzzleConfig;
use crate::error::{ClockError, IndexKind, Result};
use crate::host::{BombInfo, HostHooks};
use crate::state::{PuzzleState, Side};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Playing,
    /// Replaying the reset stack; actions are not logged.
    Resetting,
    /// Frozen. All input is ignored.
    Solved,
}

/// Outcome of a player input that passed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Response {
    Applied,
    Ignored,
}

/// The move the player should make next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hint {
    pub move_index: usize,
    pub lit: Cell,
    /// Face the lit cell is read from.
    pub side: Side,
}

impl Hint {
    /// Physical pin to light.
    pub fn physical_pin(&self) -> usize {
        match self.side {
            Side::Front => self.lit.pin,
            Side::Back => MIRROR_PINS[self.lit.pin],
        }
    }

    /// Physical clock (0-17) to light.
    pub fn physical_clock(&self) -> usize {
        match self.side {
            Side::Front => self.lit.clock,
            Side::Back => MIRROR_CLOCKS[self.lit.clock],
        }
    }
}

pub struct RubiksClock {
    id: u32,
    state: PuzzleState,
    moves: Vec<Move>,
    mode: Mode,
    hint: Option<usize>,
    reset_stack: ResetStack,
    audit: AuditLog,
    animations: AnimationQueue,
    hooks: Box<dyn HostHooks>,
}

impl RubiksClock {
    /// Create and scramble a puzzle. Randomness comes from `config.seed` if
    /// set, OS entropy otherwise.
    pub fn new(
        id: u32,
        info: &BombInfo,
        config: &PuzzleConfig,
        hooks: Box<dyn HostHooks>,
    ) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(id, info, config, hooks, &mut rng)
    }

    pub fn with_rng<R: Rng + ?Sized>(
        id: u32,
        info: &BombInfo,
        config: &PuzzleConfig,
        hooks: Box<dyn HostHooks>,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        validate_tables()?;

        let modifier = if config.modifications {
            info.validate()?;
            Some(Modifier::new(info)?)
        } else {
            None
        };

        let num_moves = config.num_moves as usize;
        let (state, moves) = loop {
            let mut state = PuzzleState::default();
            let moves = scramble(&mut state, num_moves, modifier.as_ref(), rng);
            if !state.is_solved() {
                break (state, moves);
            }
            debug!(puzzle = id, "scramble landed on the solved state, regenerating");
        };

        info!(
            puzzle = id,
            moves = moves.len(),
            modifications = config.modifications,
            side = ?state.side,
            "puzzle scrambled"
        );

        let mut puzzle = RubiksClock {
            id,
            state,
            moves,
            mode: Mode::Playing,
            hint: None,
            reset_stack: ResetStack::default(),
            audit: AuditLog::default(),
            animations: AnimationQueue::new(config.animation.clone()),
            hooks,
        };
        puzzle.check_state();
        Ok(puzzle)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn state(&self) -> &PuzzleState {
        &self.state
    }

    /// Hints in solve order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_solved(&self) -> bool {
        self.mode == Mode::Solved
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }

    pub fn reset_stack(&self) -> &ResetStack {
        &self.reset_stack
    }

    pub fn set_hooks(&mut self, hooks: Box<dyn HostHooks>) {
        self.hooks = hooks;
    }

    /// Hint whose recorded start state equals the current state, if any.
    pub fn hint(&self) -> Option<Hint> {
        self.hint.map(|move_index| {
            let m = &self.moves[move_index];
            Hint {
                move_index,
                lit: m.lit,
                side: m.side,
            }
        })
    }

    /// Gear buttons come in pairs per corner: even is counterclockwise, odd
    /// clockwise, both as seen by the player.
    pub fn press_gear_button(&mut self, button: usize) -> Result<Response> {
        if button >= GEAR_BUTTON_COUNT {
            return Err(ClockError::out_of_range(
                IndexKind::GearButton,
                button,
                GEAR_BUTTON_COUNT,
            ));
        }
        if self.mode == Mode::Solved {
            return Ok(Response::Ignored);
        }

        let (gear, amount) = player_gear(button, self.state.side);
        self.rotate_gear(gear, amount);
        Ok(Response::Applied)
    }

    /// Pin buttons are numbered by the corner the player sees.
    pub fn press_pin_button(&mut self, pin: usize) -> Result<Response> {
        if pin >= PIN_COUNT {
            return Err(ClockError::out_of_range(IndexKind::Pin, pin, PIN_COUNT));
        }
        if self.mode == Mode::Solved {
            return Ok(Response::Ignored);
        }

        let physical = match self.state.side {
            Side::Front => pin,
            Side::Back => MIRROR_PINS[pin],
        };
        self.change_pin(physical);
        Ok(Response::Applied)
    }

    pub fn press_flip(&mut self) -> Response {
        if self.mode == Mode::Solved {
            return Response::Ignored;
        }
        self.flip();
        Response::Applied
    }

    /// Undo every action since the last reset and return to the scrambled
    /// start. The undo is animated; the state itself is restored from the
    /// first hint's snapshot.
    pub fn press_reset(&mut self) -> Response {
        if self.mode == Mode::Solved {
            return Response::Ignored;
        }
        let Some(first) = self.moves.first() else {
            return Response::Ignored;
        };
        let (clocks, pins, side) = (first.clocks_at_start, first.pins_at_start, first.side);

        self.mode = Mode::Resetting;
        let pending: Vec<Action> = self.reset_stack.drain().collect();
        let undone = pending.len();
        for action in pending {
            self.apply(action);
        }
        if self.state.side != side {
            self.flip();
        }
        debug_assert!(
            self.state.matches(&clocks, &pins),
            "reset replay diverged from the scrambled snapshot"
        );

        self.state.clocks = clocks;
        self.state.pins = pins;
        self.state.side = side;
        self.audit.clear();
        self.mode = Mode::Playing;
        self.check_state();

        info!(puzzle = self.id, undone, "puzzle reset");
        Response::Applied
    }

    /// The bomb went off. Returns the audit trail after logging it.
    pub fn explode(&mut self) -> String {
        let trail = self.audit.dump();
        warn!(puzzle = self.id, solved = self.is_solved(), "bomb exploded, actions taken:\n{trail}");
        trail
    }

    /// Advance the animation queue by one frame.
    pub fn tick(&mut self, dt: Duration) -> AnimationTick<'_> {
        self.animations.tick(dt)
    }

    pub fn pending_animations(&self) -> usize {
        self.animations.len()
    }

    /// Drop all queued animations, returning them in order.
    pub fn take_animations(&mut self) -> Vec<VisualEvent> {
        self.animations.finish_all()
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::GearTurn { gear, amount, .. } => self.rotate_gear(gear, amount),
            Action::PinToggle { pin, up, .. } => {
                debug_assert_ne!(self.state.pins[pin], up);
                self.change_pin(pin);
            }
            Action::Flip { .. } => self.flip(),
        }
    }

    fn rotate_gear(&mut self, gear: usize, amount: i32) {
        debug_assert_ne!(self.mode, Mode::Solved, "gear turned after solve");
        let side = self.state.side;
        let deltas = self.state.turn_gear(gear, amount);
        self.animations.push(VisualEvent::GearTurned {
            gear,
            deltas,
            magnitude: amount.unsigned_abs(),
        });
        self.record(Action::GearTurn { gear, amount, side });
    }

    fn change_pin(&mut self, pin: usize) {
        debug_assert_ne!(self.mode, Mode::Solved, "pin changed after solve");
        let side = self.state.side;
        let up = self.state.toggle_pin(pin);
        self.animations.push(VisualEvent::PinMoved { pin, up });
        self.record(Action::PinToggle { pin, up, side });
    }

    fn flip(&mut self) {
        debug_assert_ne!(self.mode, Mode::Solved, "flipped after solve");
        let to_front = self.state.flip().is_front();
        self.animations
            .push(VisualEvent::OrientationFlipped { to_front });
        self.record(Action::Flip { to_front });
    }

    fn record(&mut self, action: Action) {
        if self.mode != Mode::Playing {
            return;
        }
        debug!(puzzle = self.id, %action, "player action");
        self.reset_stack.push(action);
        self.audit.record(action);
        self.check_state();
    }

    fn check_state(&mut self) {
        if self.state.is_solved() {
            self.mode = Mode::Solved;
            self.hint = None;
            info!(
                puzzle = self.id,
                "module solved, actions taken:\n{}",
                self.audit.dump()
            );
            self.hooks.solved(self.id);
            return;
        }

        let state = &self.state;
        self.hint = self
            .moves
            .iter()
            .position(|m| state.matches(&m.clocks_at_start, &m.pins_at_start));
    }
}

/// Physical gear and turn for a gear button pressed while facing `side`.
fn player_gear(button: usize, side: Side) -> (usize, i32) {
    let gear = button / 2;
    let dir = if button % 2 == 1 { 1 } else { -1 };
    match side {
        Side::Front => (gear, dir),
        Side::Back => (MIRROR_PINS[gear], -dir),
    }
}
