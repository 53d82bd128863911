use std::fmt;
use std::io;

use kisscmd_frame::FrameError;
use kisscmd_tnc::TncError;
use kisscmd_transport::TransportError;

// Exit codes shared with the TNC's other command tools.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const USAGE: i32 = 2;
pub const PORT_UNAVAILABLE: i32 = 3;
pub const UNKNOWN_COMMAND: i32 = 4;
pub const INVALID_VALUE: i32 = 5;
pub const TIMEOUT: i32 = 6;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// I/O errors on an open link, including stalled writes.
///
/// `TIMEOUT` is reserved for a missing reply frame, so an `io::Error` of
/// kind `TimedOut` is still a general failure here.
pub fn io_error(context: &str, err: io::Error) -> CliError {
    CliError::new(FAILURE, format!("{context}: {err}"))
}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    match err {
        TransportError::InvalidBaud(_) => CliError::new(USAGE, format!("{context}: {err}")),
        TransportError::Open { .. } | TransportError::Configure(_) => {
            CliError::new(PORT_UNAVAILABLE, format!("{context}: {err}"))
        }
    }
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::Timeout(_) => CliError::new(TIMEOUT, format!("{context}: {err}")),
        other => CliError::new(FAILURE, format!("{context}: {other}")),
    }
}

pub fn tnc_error(context: &str, err: TncError) -> CliError {
    match err {
        TncError::UnknownCommand(_) => CliError::new(UNKNOWN_COMMAND, format!("{context}: {err}")),
        TncError::MissingValue(_) => CliError::new(USAGE, format!("{context}: {err}")),
        TncError::InvalidValue { .. } => CliError::new(INVALID_VALUE, format!("{context}: {err}")),
        TncError::Transport(err) => transport_error(context, err),
        TncError::Frame(err) => frame_error(context, err),
        TncError::Timeout(_) => CliError::new(TIMEOUT, format!("{context}: {err}")),
    }
}
