use std::time::Duration;

/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// `FESC` was followed by something other than `TFEND` or `TFESC`.
    #[error("invalid escape sequence (0xDB followed by {0:#04x})")]
    InvalidEscape(u8),

    /// The decoded frame grew past the configured maximum size.
    #[error("frame too large ({size} bytes, max {max})")]
    FrameTooLarge { size: usize, max: usize },

    /// No complete frame arrived before the deadline.
    #[error("no complete frame within {0:?}")]
    Timeout(Duration),

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream stopped accepting bytes mid-frame.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
