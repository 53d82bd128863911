/// Errors that can occur on the serial transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to open the serial device.
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        source: serialport::Error,
    },

    /// The requested baud rate cannot be used.
    #[error("invalid baud rate {0}")]
    InvalidBaud(u32),

    /// Failed to reconfigure an already open port.
    #[error("failed to configure serial port: {0}")]
    Configure(serialport::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
