//! Session error types.

use thiserror::Error;

use dreamteam_api::ApiError;
use dreamteam_core::DreamTeamError;

/// Why a save was refused before reaching the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SaveRejection {
    /// The user name is empty or whitespace.
    #[error("user name is empty")]
    EmptyUserName,
    /// No slot is filled.
    #[error("lineup has no players")]
    EmptyLineup,
}

/// Errors surfaced by [`crate::Session`] and [`crate::update::update`].
///
/// Every error has already been turned into a notice on the state by the
/// time a caller sees it.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A save was rejected locally.
    #[error("Save rejected: {0}")]
    Rejected(SaveRejection),

    /// A remote call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A lineup operation was given an invalid reference.
    #[error(transparent)]
    Core(#[from] DreamTeamError),
}
