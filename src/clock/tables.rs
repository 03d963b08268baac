//! Static geometry of the puzzle: solving instructions, gear couplings and
//! the front/back mirror maps.

use crate::error::{ClockError, Result};

pub const CLOCK_COUNT: usize = 18;
pub const FACE_CLOCKS: usize = 9;
pub const PIN_COUNT: usize = 4;
pub const GEAR_COUNT: usize = 4;
pub const GEAR_BUTTON_COUNT: usize = GEAR_COUNT * 2;
pub const HOURS: i32 = 12;

/// Pin (and gear) index seen at the same corner from the other face.
pub const MIRROR_PINS: [usize; PIN_COUNT] = [1, 0, 3, 2];

/// Clock seen at the same visual position after turning the puzzle over.
///
/// Front position `p` maps to the back clock shown there (`11 10 9 / 14 13 12 /
/// 17 16 15` as laid out from behind) and vice versa.
pub const MIRROR_CLOCKS: [usize; CLOCK_COUNT] = [
    11, 10, 9, 14, 13, 12, 17, 16, 15, //
    2, 1, 0, 5, 4, 3, 8, 7, 6,
];

/// One entry of the solving manual: change two pins, then turn a gear.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub pins: [usize; 2],
    pub gear: usize,
    pub turn: i32,
}

const fn ins(pin_a: usize, pin_b: usize, gear: usize, turn: i32) -> Instruction {
    Instruction {
        pins: [pin_a, pin_b],
        gear,
        turn,
    }
}

/// Manual table indexed by `[lit pin][lit clock]`.
pub const INSTRUCTIONS: [[Instruction; FACE_CLOCKS]; PIN_COUNT] = [
    [
        ins(0, 3, 2, 6),
        ins(2, 3, 0, -2),
        ins(1, 2, 1, 1),
        ins(2, 3, 0, 4),
        ins(0, 2, 2, -1),
        ins(0, 1, 1, 5),
        ins(2, 3, 1, 4),
        ins(1, 2, 1, -1),
        ins(2, 3, 2, -3),
    ],
    [
        ins(0, 1, 3, 6),
        ins(0, 1, 2, 6),
        ins(0, 1, 0, 6),
        ins(0, 2, 3, 1),
        ins(0, 2, 3, -5),
        ins(2, 3, 3, -4),
        ins(2, 3, 3, 2),
        ins(0, 3, 0, -5),
        ins(1, 2, 3, 6),
    ],
    [
        ins(0, 3, 2, -4),
        ins(1, 2, 1, 4),
        ins(1, 3, 3, -4),
        ins(0, 2, 1, 5),
        ins(1, 3, 0, 2),
        ins(0, 3, 2, 2),
        ins(1, 2, 2, 3),
        ins(1, 3, 1, -2),
        ins(1, 3, 1, 6),
    ],
    [
        ins(0, 3, 3, 1),
        ins(1, 2, 1, 3),
        ins(0, 2, 0, -3),
        ins(0, 1, 0, -3),
        ins(1, 3, 2, 3),
        ins(0, 2, 3, -5),
        ins(1, 3, 2, 5),
        ins(0, 3, 0, -2),
        ins(0, 1, 0, -1),
    ],
];

/// Whether a clock is mechanically engaged with a turning gear.
///
/// Every condition is relative to the turning gear's own pin `g`:
/// `Up` is `pins[g]`, `Down` is `!pins[g]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coupling {
    Always,
    Up,
    Down,
    /// `pins[g] == pins[j]`
    Matches(usize),
    /// `pins[g] && (pins[a] || pins[b])`
    UpWithEither(usize, usize),
    /// `!pins[g] && (!pins[a] || !pins[b])`
    DownWithEither(usize, usize),
}

impl Coupling {
    #[inline]
    pub fn engaged(self, gear: usize, pins: &[bool; PIN_COUNT]) -> bool {
        let own = pins[gear];
        match self {
            Coupling::Always => true,
            Coupling::Up => own,
            Coupling::Down => !own,
            Coupling::Matches(j) => own == pins[j],
            Coupling::UpWithEither(a, b) => own && (pins[a] || pins[b]),
            Coupling::DownWithEither(a, b) => !own && (!pins[a] || !pins[b]),
        }
    }
}

use Coupling::{Always, Down, DownWithEither, Matches, Up, UpWithEither};

/// Differential linkage per gear, indexed `[gear][clock]`.
pub const COUPLINGS: [[Coupling; CLOCK_COUNT]; GEAR_COUNT] = [
    [
        Always,
        Up,
        Matches(1),
        Up,
        Up,
        UpWithEither(1, 3),
        Matches(2),
        UpWithEither(2, 3),
        Matches(3),
        // back
        Always,
        Down,
        Matches(1),
        Down,
        Down,
        DownWithEither(1, 3),
        Matches(2),
        DownWithEither(2, 3),
        Matches(3),
    ],
    [
        Matches(0),
        Up,
        Always,
        UpWithEither(0, 2),
        Up,
        Up,
        Matches(2),
        UpWithEither(3, 2),
        Matches(3),
        // back
        Matches(0),
        Down,
        Always,
        DownWithEither(0, 2),
        Down,
        Down,
        Matches(2),
        DownWithEither(3, 2),
        Matches(3),
    ],
    [
        Matches(0),
        UpWithEither(0, 1),
        Matches(1),
        Up,
        Up,
        UpWithEither(3, 1),
        Always,
        Up,
        Matches(3),
        // back
        Matches(0),
        DownWithEither(0, 1),
        Matches(1),
        Down,
        Down,
        DownWithEither(3, 1),
        Always,
        Down,
        Matches(3),
    ],
    [
        Matches(0),
        UpWithEither(1, 0),
        Matches(1),
        UpWithEither(2, 0),
        Up,
        Up,
        Matches(2),
        Up,
        Always,
        // back
        Matches(0),
        DownWithEither(1, 0),
        Matches(1),
        DownWithEither(2, 0),
        Down,
        Down,
        Matches(2),
        Down,
        Always,
    ],
];

/// Horizontal mirror of a 3x3 face position.
#[inline]
pub fn mirror_face_position(position: usize) -> usize {
    let row = position / 3;
    let col = position % 3;
    row * 3 + (2 - col)
}

/// Sanity check of the compiled tables. Run once when a puzzle is created.
pub fn validate_tables() -> Result<()> {
    for (lit_pin, row) in INSTRUCTIONS.iter().enumerate() {
        for (lit_clock, instruction) in row.iter().enumerate() {
            let [a, b] = instruction.pins;
            if a >= PIN_COUNT || b >= PIN_COUNT || a == b {
                return Err(ClockError::InvalidModuleData(format!(
                    "instruction ({lit_pin}, {lit_clock}) names pins {a} and {b}"
                )));
            }
            if instruction.gear >= GEAR_COUNT {
                return Err(ClockError::InvalidModuleData(format!(
                    "instruction ({lit_pin}, {lit_clock}) names gear {}",
                    instruction.gear
                )));
            }
            if instruction.turn == 0 || instruction.turn.abs() > HOURS / 2 {
                return Err(ClockError::InvalidModuleData(format!(
                    "instruction ({lit_pin}, {lit_clock}) turns by {}",
                    instruction.turn
                )));
            }
        }
    }

    for (i, &m) in MIRROR_PINS.iter().enumerate() {
        if m >= PIN_COUNT || MIRROR_PINS[m] != i {
            return Err(ClockError::InvalidModuleData(format!(
                "pin mirror is not an involution at {i}"
            )));
        }
    }
    for (i, &m) in MIRROR_CLOCKS.iter().enumerate() {
        if m >= CLOCK_COUNT || MIRROR_CLOCKS[m] != i || (i < FACE_CLOCKS) == (m < FACE_CLOCKS) {
            return Err(ClockError::InvalidModuleData(format!(
                "clock mirror is not a face-swapping involution at {i}"
            )));
        }
    }

    for (gear, row) in COUPLINGS.iter().enumerate() {
        let always = row.iter().filter(|&&c| c == Coupling::Always).count();
        if always != 2 {
            return Err(ClockError::InvalidModuleData(format!(
                "gear {gear} must drive exactly two corner clocks, found {always}"
            )));
        }
    }

    Ok(())
}
