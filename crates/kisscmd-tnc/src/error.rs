use std::time::Duration;

use crate::command::TncCommand;

/// Errors that can occur while building or running a TNC command.
#[derive(Debug, thiserror::Error)]
pub enum TncError {
    /// The command name is not in the table.
    #[error("unrecognized command: {0}")]
    UnknownCommand(String),

    /// The command needs a value and none was given.
    #[error("not enough arguments for {0} command")]
    MissingValue(TncCommand),

    /// The supplied value failed validation.
    #[error("invalid value {value:?} for {command} command: {reason}")]
    InvalidValue {
        command: TncCommand,
        value: String,
        reason: String,
    },

    /// Transport-level error.
    #[error("transport error: {0}")]
    Transport(#[from] kisscmd_transport::TransportError),

    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[from] kisscmd_frame::FrameError),

    /// No complete reply frame arrived in time.
    #[error("timeout waiting for response after {0:?}")]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, TncError>;
