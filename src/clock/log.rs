//! Player action records: the undo stack used by reset and the audit trail
//! reported when the module is solved or the bomb explodes.

use std::fmt;

use super::tables::MIRROR_PINS;
use crate::state::Side;

/// One primitive player action, in physical indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Turn of a physical gear, clockwise as seen from the front.
    GearTurn { gear: usize, amount: i32, side: Side },
    /// Pin moved to `up` (as seen from the front).
    PinToggle { pin: usize, up: bool, side: Side },
    Flip { to_front: bool },
}

impl Action {
    /// The action that undoes this one.
    pub fn inverse(self) -> Action {
        match self {
            Action::GearTurn { gear, amount, side } => Action::GearTurn {
                gear,
                amount: -amount,
                side,
            },
            Action::PinToggle { pin, up, side } => Action::PinToggle { pin, up: !up, side },
            Action::Flip { to_front } => Action::Flip {
                to_front: !to_front,
            },
        }
    }
}

impl fmt::Display for Action {
    /// Describes the action the way the player saw it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Action::GearTurn { gear, amount, side } => {
                let (gear, amount) = match side {
                    Side::Front => (gear, amount),
                    Side::Back => (MIRROR_PINS[gear], -amount),
                };
                let dir = if amount < 0 { "counterclockwise" } else { "clockwise" };
                write!(
                    f,
                    "turn gear {gear} {dir} {} hour(s) on the {side:?}",
                    amount.abs()
                )
            }
            Action::PinToggle { pin, up, side } => {
                let (pin, up) = match side {
                    Side::Front => (pin, up),
                    Side::Back => (MIRROR_PINS[pin], !up),
                };
                let pos = if up { "up" } else { "down" };
                write!(f, "push pin {pin} {pos} on the {side:?}")
            }
            Action::Flip { to_front: true } => f.write_str("turn over to the front"),
            Action::Flip { to_front: false } => f.write_str("turn over to the back"),
        }
    }
}

/// Inverse actions pending for the next reset, most recent last.
#[derive(Clone, Debug, Default)]
pub struct ResetStack {
    entries: Vec<Action>,
}

impl ResetStack {
    /// Record the inverse of a player action.
    ///
    /// Consecutive turns of the same gear merge into one entry (kept even when
    /// the net amount is zero). Two consecutive toggles of the same pin cancel.
    pub fn push(&mut self, action: Action) {
        let inverse = action.inverse();
        match self.entries.last_mut() {
            Some(Action::GearTurn {
                gear: top_gear,
                amount: top_amount,
                side: top_side,
            }) => {
                if let Action::GearTurn { gear, amount, side } = inverse {
                    if *top_gear == gear {
                        *top_amount += amount;
                        *top_side = side;
                        return;
                    }
                }
            }
            Some(Action::PinToggle { pin: top_pin, .. }) => {
                let cancels = matches!(inverse, Action::PinToggle { pin, .. } if pin == *top_pin);
                if cancels {
                    self.entries.pop();
                    return;
                }
            }
            _ => {}
        }
        self.entries.push(inverse);
    }

    /// Remove every entry, most recent first.
    pub fn drain(&mut self) -> impl Iterator<Item = Action> + '_ {
        self.entries.drain(..).rev()
    }

    pub fn entries(&self) -> &[Action] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Order-preserving record of net player actions since the last reset.
#[derive(Clone, Debug, Default)]
pub struct AuditLog {
    entries: Vec<Action>,
}

impl AuditLog {
    /// Append an action, folding a turn into the previous entry when it is a
    /// turn of the same gear. Pin toggles and flips are never merged.
    pub fn record(&mut self, action: Action) {
        if let (
            Some(Action::GearTurn {
                gear: last_gear,
                amount: last_amount,
                ..
            }),
            Action::GearTurn { gear, amount, .. },
        ) = (self.entries.last_mut(), action)
        {
            if *last_gear == gear {
                *last_amount += amount;
                return;
            }
        }
        self.entries.push(action);
    }

    pub fn entries(&self) -> &[Action] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Numbered, one action per line.
    pub fn dump(&self) -> String {
        if self.entries.is_empty() {
            return "no actions taken".to_string();
        }
        self.entries
            .iter()
            .enumerate()
            .map(|(i, action)| format!("{}. {action}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
