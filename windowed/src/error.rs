use alloc::string::String;
use core::fmt;

/// Invalid engine configuration, reported by [`crate::Engine::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither `item_height` nor `estimate_item_height` was configured.
    MissingEstimator,
    /// No `get_item_key` was configured. Every mode needs one to key emitted items.
    MissingKeyResolver,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEstimator => {
                write!(f, "estimate_item_height is required when item_height is not set")
            }
            Self::MissingKeyResolver => write!(f, "get_item_key is required"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// A measurement report the engine refused to record.
///
/// The report is dropped and the engine state is left untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportError {
    /// The index attribute could not be parsed as an item index.
    InvalidIndex { raw: String },
    /// The index is not within `0..count`.
    IndexOutOfRange { index: usize, count: usize },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndex { raw } => {
                write!(f, "measured items must carry a valid index (got {raw:?})")
            }
            Self::IndexOutOfRange { index, count } => {
                write!(f, "measured index {index} is out of range (count={count})")
            }
        }
    }
}

impl core::error::Error for ReportError {}
