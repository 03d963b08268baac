//! Serial-driven perturbation of manual instructions.
//!
//! Every scramble step picks two modifications. Each one pairs an action
//! (what to change) with an amount (by how much), read from two 12-row
//! catalogs. The starting row of each catalog comes from one serial number
//! character; later steps walk the rows cyclically.
//!
//! Effects compose in a fixed order regardless of which modification carries
//! them: cell moves, then rotation inversion, then added hours, then pin
//! toggling.

use std::fmt;

use super::tables::{Instruction, FACE_CLOCKS, INSTRUCTIONS, MIRROR_PINS, PIN_COUNT};
use crate::error::{ClockError, Result};
use crate::host::{BombInfo, MAX_COUNT};
use crate::state::Side;

pub const CATALOG_ROWS: usize = 12;

/// Side length of the super-grid formed by 3x3 clocks with 2x2 pins each.
const GRID_SIZE: i32 = 6;

/// Serial characters bucketed in threes, one bucket per catalog row.
pub const SELECTOR_KEYS: [&str; CATALOG_ROWS] = [
    "ABC", "DEF", "GHI", "JKL", "MNO", "PQR", "STU", "VWX", "YZ0", "123", "456", "789",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    Counterclockwise,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModKind {
    MoveBigSquare(Direction),
    MoveSmallSquare(Direction),
    ToggleOtherPins,
    InvertRotation,
    AddHours(Rotation),
}

impl fmt::Display for ModKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModKind::MoveBigSquare(dir) => write!(f, "move big square {dir:?}"),
            ModKind::MoveSmallSquare(dir) => write!(f, "move small square {dir:?}"),
            ModKind::ToggleOtherPins => f.write_str("toggle other pins"),
            ModKind::InvertRotation => f.write_str("invert rotation"),
            ModKind::AddHours(Rotation::Clockwise) => f.write_str("add hours clockwise"),
            ModKind::AddHours(Rotation::Counterclockwise) => {
                f.write_str("add hours counterclockwise")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModificationAction {
    pub key: &'static str,
    pub kind: ModKind,
}

const fn action(key: &'static str, kind: ModKind) -> ModificationAction {
    ModificationAction { key, kind }
}

pub const ACTIONS: [ModificationAction; CATALOG_ROWS] = [
    action("ABC", ModKind::MoveBigSquare(Direction::Up)),
    action("DEF", ModKind::AddHours(Rotation::Clockwise)),
    action("GHI", ModKind::MoveSmallSquare(Direction::Right)),
    action("JKL", ModKind::InvertRotation),
    action("MNO", ModKind::MoveBigSquare(Direction::Left)),
    action("PQR", ModKind::ToggleOtherPins),
    action("STU", ModKind::MoveSmallSquare(Direction::Down)),
    action("VWX", ModKind::AddHours(Rotation::Counterclockwise)),
    action("YZ0", ModKind::MoveBigSquare(Direction::Right)),
    action("123", ModKind::MoveSmallSquare(Direction::Up)),
    action("456", ModKind::MoveBigSquare(Direction::Down)),
    action("789", ModKind::MoveSmallSquare(Direction::Left)),
];

/// Edgework count an amount is derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmountSource {
    Batteries,
    LitIndicators,
    PortPlates,
    AaBatteries,
    UnlitIndicators,
    Ports,
    DBatteries,
    Indicators,
    BatteryHolders,
    SerialLetters,
    SerialDigits,
    PortTypes,
}

impl AmountSource {
    pub fn count(self, info: &BombInfo) -> u32 {
        match self {
            AmountSource::Batteries => info.batteries,
            AmountSource::LitIndicators => info.lit_indicators,
            AmountSource::PortPlates => info.port_plates,
            AmountSource::AaBatteries => info.aa_batteries,
            AmountSource::UnlitIndicators => info.unlit_indicators,
            AmountSource::Ports => info.ports,
            AmountSource::DBatteries => info.d_batteries,
            AmountSource::Indicators => info.indicators(),
            AmountSource::BatteryHolders => info.battery_holders,
            AmountSource::SerialLetters => info.serial_letters(),
            AmountSource::SerialDigits => info.serial_digits(),
            AmountSource::PortTypes => info.port_types,
        }
    }
}

pub const AMOUNT_SOURCES: [(&str, AmountSource); CATALOG_ROWS] = [
    ("ABC", AmountSource::Batteries),
    ("DEF", AmountSource::LitIndicators),
    ("GHI", AmountSource::PortPlates),
    ("JKL", AmountSource::AaBatteries),
    ("MNO", AmountSource::UnlitIndicators),
    ("PQR", AmountSource::Ports),
    ("STU", AmountSource::DBatteries),
    ("VWX", AmountSource::Indicators),
    ("YZ0", AmountSource::BatteryHolders),
    ("123", AmountSource::SerialLetters),
    ("456", AmountSource::SerialDigits),
    ("789", AmountSource::PortTypes),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModificationAmount {
    pub key: &'static str,
    pub source: AmountSource,
    pub quantity: i32,
}

impl ModificationAmount {
    /// Build the amount catalog for a bomb. Every quantity is its count plus
    /// one, with the count capped at `MAX_COUNT`.
    pub fn catalog(info: &BombInfo) -> Vec<ModificationAmount> {
        AMOUNT_SOURCES
            .iter()
            .map(|&(key, source)| ModificationAmount {
                key,
                source,
                quantity: source.count(info).min(MAX_COUNT) as i32 + 1,
            })
            .collect()
    }
}

/// Catalog row for a serial character.
///
/// Letters count from 'A' at 0 and digits from '0' at 26, so the 36 symbols
/// fall into 12 buckets of three.
pub fn selector_bucket(c: char) -> Option<usize> {
    let index = match c {
        'A'..='Z' => c as usize - 'A' as usize,
        '0'..='9' => c as usize - '0' as usize + 26,
        _ => return None,
    };
    Some(index / 3)
}

/// Starting catalog rows for the two modifications of every step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selectors {
    pub first_action: usize,
    pub first_amount: usize,
    pub second_action: usize,
    pub second_amount: usize,
}

impl Selectors {
    /// Read the offsets from the first four serial characters.
    pub fn from_serial(serial: &str) -> Result<Self> {
        let mut rows = [0usize; 4];
        let mut chars = serial.chars();
        for row in rows.iter_mut() {
            *row = chars
                .next()
                .and_then(selector_bucket)
                .ok_or_else(|| ClockError::InvalidSerial(serial.to_string()))?;
        }
        Ok(Selectors {
            first_action: rows[0],
            first_amount: rows[1],
            second_action: rows[2],
            second_amount: rows[3],
        })
    }
}

/// Catalog row used by scramble step `cur_move` out of `num_moves`.
///
/// Rows are consumed backwards during generation so that the solver, who
/// plays the steps in reverse, reads them forwards from `offset`.
#[inline]
pub fn catalog_row(offset: usize, num_moves: usize, cur_move: usize) -> usize {
    (offset + num_moves - 1 - cur_move) % CATALOG_ROWS
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Modification {
    pub action: ModificationAction,
    pub amount: ModificationAmount,
}

impl fmt::Display for Modification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} ({:?})",
            self.action.kind, self.amount.quantity, self.amount.source
        )
    }
}

/// Check catalog cardinality and that row `i` answers to selector bucket `i`.
pub fn validate_catalogs(
    actions: &[ModificationAction],
    amounts: &[ModificationAmount],
) -> Result<()> {
    if actions.len() != CATALOG_ROWS || amounts.len() != CATALOG_ROWS {
        return Err(ClockError::InvalidModuleData(format!(
            "catalogs need {CATALOG_ROWS} rows, got {} actions and {} amounts",
            actions.len(),
            amounts.len()
        )));
    }
    for (row, key) in SELECTOR_KEYS.iter().enumerate() {
        if actions[row].key != *key || amounts[row].key != *key {
            return Err(ClockError::InvalidModuleData(format!(
                "catalog row {row} is not keyed {key}"
            )));
        }
    }
    Ok(())
}

/// Picks the modifications for each scramble step.
#[derive(Clone, Debug)]
pub struct Modifier {
    amounts: Vec<ModificationAmount>,
    selectors: Selectors,
}

impl Modifier {
    pub fn new(info: &BombInfo) -> Result<Self> {
        let amounts = ModificationAmount::catalog(info);
        validate_catalogs(&ACTIONS, &amounts)?;
        let selectors = Selectors::from_serial(&info.serial)?;
        Ok(Modifier { amounts, selectors })
    }

    pub fn for_step(&self, num_moves: usize, cur_move: usize) -> [Modification; 2] {
        let s = self.selectors;
        let pick = |action_offset: usize, amount_offset: usize| Modification {
            action: ACTIONS[catalog_row(action_offset, num_moves, cur_move)],
            amount: self.amounts[catalog_row(amount_offset, num_moves, cur_move)],
        };
        [
            pick(s.first_action, s.first_amount),
            pick(s.second_action, s.second_amount),
        ]
    }
}

/// A lit pin inside a lit clock: one square of the 6x6 manual grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub clock: usize,
    pub pin: usize,
}

impl Cell {
    pub fn new(clock: usize, pin: usize) -> Self {
        debug_assert!(clock < FACE_CLOCKS && pin < PIN_COUNT);
        Cell { clock, pin }
    }

    fn to_grid(self) -> (i32, i32) {
        let x = (self.clock % 3) * 2 + self.pin % 2;
        let y = (self.clock / 3) * 2 + self.pin / 2;
        (x as i32, y as i32)
    }

    fn from_grid(x: i32, y: i32) -> Self {
        let x = x.rem_euclid(GRID_SIZE) as usize;
        let y = y.rem_euclid(GRID_SIZE) as usize;
        Cell {
            clock: (y / 2) * 3 + x / 2,
            pin: (y % 2) * 2 + x % 2,
        }
    }

    /// Move by `steps` grid units, wrapping around the 6x6 grid.
    pub fn translate(self, direction: Direction, steps: i32) -> Self {
        let (x, y) = self.to_grid();
        match direction {
            Direction::Up => Cell::from_grid(x, y - steps),
            Direction::Down => Cell::from_grid(x, y + steps),
            Direction::Left => Cell::from_grid(x - steps, y),
            Direction::Right => Cell::from_grid(x + steps, y),
        }
    }

    /// The same cell as read from the opposite face.
    pub fn mirrored(self) -> Self {
        Cell {
            clock: super::tables::mirror_face_position(self.clock),
            pin: MIRROR_PINS[self.pin],
        }
    }

    pub fn instruction(self) -> Instruction {
        INSTRUCTIONS[self.pin][self.clock]
    }
}

/// The move a player has to make for a lit cell once modifications apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedMove {
    /// Cell the manual was finally read at.
    pub cell: Cell,
    pub gear: usize,
    pub turn: i32,
    /// Pins to change before turning.
    pub pins: [bool; PIN_COUNT],
}

impl ResolvedMove {
    pub fn is_degenerate(&self) -> bool {
        self.turn == 0
    }

    /// Translate from the player's view of `side` into physical indices.
    ///
    /// Seen from the back, gear and pins sit at mirrored corners and a
    /// clockwise turn is counterclockwise from the front, so the gear index
    /// and the turn sign flip together.
    pub fn physical(&self, side: Side) -> ResolvedMove {
        match side {
            Side::Front => *self,
            Side::Back => {
                let mut pins = [false; PIN_COUNT];
                for (pin, &change) in self.pins.iter().enumerate() {
                    pins[MIRROR_PINS[pin]] = change;
                }
                ResolvedMove {
                    cell: self.cell,
                    gear: MIRROR_PINS[self.gear],
                    turn: -self.turn,
                    pins,
                }
            }
        }
    }
}

/// Apply modifications to the manual entry for `lit`.
pub fn resolve(lit: Cell, mods: &[Modification]) -> ResolvedMove {
    let mut cell = lit;
    for m in mods {
        match m.action.kind {
            ModKind::MoveBigSquare(dir) => {
                cell = cell.translate(dir, 2 * m.amount.quantity.rem_euclid(GRID_SIZE))
            }
            ModKind::MoveSmallSquare(dir) => {
                cell = cell.translate(dir, m.amount.quantity.rem_euclid(GRID_SIZE))
            }
            _ => {}
        }
    }

    let instruction = cell.instruction();
    let mut turn = instruction.turn;

    for m in mods {
        if m.action.kind == ModKind::InvertRotation && m.amount.quantity % 2 != 0 {
            turn = -turn;
        }
    }

    for m in mods {
        match m.action.kind {
            ModKind::AddHours(Rotation::Clockwise) => {
                turn = turn.saturating_add(m.amount.quantity)
            }
            ModKind::AddHours(Rotation::Counterclockwise) => {
                // Stays negatable
                turn = turn.saturating_sub(m.amount.quantity).max(-i32::MAX)
            }
            _ => {}
        }
    }

    let mut pins = [false; PIN_COUNT];
    for &pin in &instruction.pins {
        pins[pin] = true;
    }
    for m in mods {
        if m.action.kind == ModKind::ToggleOtherPins && m.amount.quantity % 2 == 0 {
            for change in pins.iter_mut() {
                *change = !*change;
            }
        }
    }

    ResolvedMove {
        cell,
        gear: instruction.gear,
        turn,
        pins,
    }
}
