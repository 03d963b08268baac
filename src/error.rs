//! Error type shared by the puzzle core and the host wrappers.

use std::fmt;

use thiserror::Error;

/// Which index domain an out-of-range input belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    GearButton,
    Pin,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndexKind::GearButton => "gear button",
            IndexKind::Pin => "pin",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ClockError {
    /// Static tables or catalogs have the wrong shape. Fatal at setup.
    #[error("invalid module data: {0}")]
    InvalidModuleData(String),

    #[error("invalid serial number '{0}': expected at least 4 characters from A-Z and 0-9")]
    InvalidSerial(String),

    #[error("{name} count {count} exceeds the supported maximum of {max}")]
    EdgeworkOutOfRange {
        name: &'static str,
        count: u32,
        max: u32,
    },

    #[error("{kind} index {index} out of range (expected < {limit})")]
    OutOfRange {
        kind: IndexKind,
        index: usize,
        limit: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to start verification workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ClockError {
    pub(crate) fn out_of_range(kind: IndexKind, index: usize, limit: usize) -> Self {
        ClockError::OutOfRange { kind, index, limit }
    }
}

pub type Result<T> = std::result::Result<T, ClockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = ClockError::out_of_range(IndexKind::Pin, 7, 4);
        assert_eq!(err.to_string(), "pin index 7 out of range (expected < 4)");
    }

    #[test]
    fn test_config_parse_from_toml() {
        let parse: std::result::Result<toml::Value, _> = toml::from_str("num_moves = ");
        let err: ClockError = parse.unwrap_err().into();
        assert!(matches!(err, ClockError::ConfigParse(_)));
    }
}
