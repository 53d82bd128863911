use std::io::{Read, Write};
use std::time::Duration;

use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::debug;

use crate::error::{Result, TransportError};

/// Default read timeout applied to the port.
///
/// Reads block for at most this long, so callers polling against a
/// deadline overshoot it by no more than one interval.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(50);

/// Serial line configuration.
///
/// Line settings are fixed at 8 data bits, no parity, 1 stop bit and no
/// flow control; only the baud rate and read timeout vary.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    /// Baud rate (e.g. 9600, 57600).
    pub baud_rate: u32,
    /// Per-read blocking timeout.
    pub read_timeout: Duration,
}

impl SerialConfig {
    /// Configuration for `baud_rate` with the default read timeout.
    pub fn new(baud_rate: u32) -> Self {
        Self {
            baud_rate,
            ..Self::default()
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: 57_600,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

/// An open serial device.
///
/// The port is owned exclusively by this value and closed when it is
/// dropped, on every exit path.
pub struct SerialLink {
    port: Box<dyn SerialPort>,
    path: String,
}

impl SerialLink {
    /// Open `path` with the given configuration (8N1, no flow control).
    pub fn open(path: &str, config: &SerialConfig) -> Result<Self> {
        if config.baud_rate == 0 {
            return Err(TransportError::InvalidBaud(config.baud_rate));
        }

        let port = serialport::new(path, config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(config.read_timeout)
            .open()
            .map_err(|source| TransportError::Open {
                path: path.to_string(),
                source,
            })?;

        debug!(path, baud = config.baud_rate, "opened serial port");

        Ok(Self {
            port,
            path: path.to_string(),
        })
    }

    /// Drop any bytes buffered in either direction.
    ///
    /// Called before a request so stale output from the TNC is not taken
    /// for the reply.
    pub fn discard_buffers(&self) -> Result<()> {
        self.port
            .clear(ClearBuffer::All)
            .map_err(TransportError::Configure)
    }
}

impl Read for SerialLink {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.port.read(buf)
    }
}

impl Write for SerialLink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.port.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.port.flush()
    }
}

impl Drop for SerialLink {
    fn drop(&mut self) {
        debug!(path = %self.path, "closing serial port");
    }
}

impl std::fmt::Debug for SerialLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialLink")
            .field("path", &self.path)
            .finish()
    }
}
