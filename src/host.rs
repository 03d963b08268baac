//! What the embedding host tells the puzzle, and what the puzzle tells it back.

use crate::error::{ClockError, Result};

/// Largest edgework count accepted from the host. Real bombs stay far below.
pub const MAX_COUNT: u32 = 1000;

/// Edgework of the bomb the module sits on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BombInfo {
    pub serial: String,
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

impl BombInfo {
    pub fn with_serial(serial: impl Into<String>) -> Self {
        BombInfo {
            serial: serial.into(),
            ..BombInfo::default()
        }
    }

    pub fn indicators(&self) -> u32 {
        self.lit_indicators.saturating_add(self.unlit_indicators)
    }

    pub fn serial_letters(&self) -> u32 {
        self.serial.chars().filter(char::is_ascii_alphabetic).count() as u32
    }

    pub fn serial_digits(&self) -> u32 {
        self.serial.chars().filter(char::is_ascii_digit).count() as u32
    }

    /// Reject serials the selector buckets cannot read and counts above
    /// `MAX_COUNT`.
    pub fn validate(&self) -> Result<()> {
        let well_formed = self.serial.len() >= 4
            && self
                .serial
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
        if !well_formed {
            return Err(ClockError::InvalidSerial(self.serial.clone()));
        }

        let counts = [
            ("battery", self.batteries),
            ("AA battery", self.aa_batteries),
            ("D battery", self.d_batteries),
            ("battery holder", self.battery_holders),
            ("lit indicator", self.lit_indicators),
            ("unlit indicator", self.unlit_indicators),
            ("port", self.ports),
            ("port plate", self.port_plates),
            ("port type", self.port_types),
        ];
        for (name, count) in counts {
            if count > MAX_COUNT {
                return Err(ClockError::EdgeworkOutOfRange {
                    name,
                    count,
                    max: MAX_COUNT,
                });
            }
        }
        Ok(())
    }
}

/// Lifecycle notifications the puzzle sends to its host.
pub trait HostHooks {
    /// Called exactly once, when every clock reaches twelve.
    fn solved(&mut self, puzzle: u32);
}

/// Host that ignores all notifications.
#[derive(Debug, Default)]
pub struct NoopHooks;

impl HostHooks for NoopHooks {
    fn solved(&mut self, _puzzle: u32) {}
}
