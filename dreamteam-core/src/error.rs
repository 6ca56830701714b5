//! Error types for the dream-team core library.

use thiserror::Error;

use crate::types::PlayerId;

/// Top-level error type for all core operations.
#[derive(Error, Debug)]
pub enum DreamTeamError {
    /// The slot does not exist in the formation template.
    #[error("Invalid reference: slot `{slot}` is not part of formation {template}")]
    UnknownSlot {
        /// Template the lookup was made against.
        template: String,
        /// Slot identifier that was not found.
        slot: String,
    },

    /// The player is neither in the pool nor already in the lineup.
    #[error("Invalid reference: player `{0}` is not in the player pool")]
    UnknownPlayer(PlayerId),

    /// No built-in formation template has this name.
    #[error("Unknown formation template: {0}")]
    UnknownTemplate(String),

    /// The slot classifier has no rule for this slot name.
    #[error("Unrecognized slot name `{0}`: no position rule matches it")]
    UnrecognizedSlot(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<::config::ConfigError> for DreamTeamError {
    fn from(err: ::config::ConfigError) -> Self {
        DreamTeamError::Config(err.to_string())
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, DreamTeamError>;
