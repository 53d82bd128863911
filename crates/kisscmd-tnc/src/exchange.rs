use std::io::{Read, Write};
use std::time::Duration;

use bytes::Bytes;
use kisscmd_frame::{to_hex, FrameConfig, FrameError, FrameReader, FrameWriter};
use kisscmd_transport::{SerialConfig, SerialLink};
use tracing::{debug, info};

use crate::command::Request;
use crate::error::{Result, TncError};

/// Bits on the wire per byte at 8N1: start + 8 data + stop.
const BITS_PER_BYTE_8N1: u32 = 10;

/// Configuration for one exchange.
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    /// Line rate used to estimate transmission time.
    pub baud_rate: u32,
    /// Bits per byte on the wire. Default: 10 (8N1).
    pub bits_per_byte: u32,
    /// Multiple of the frame's transmission time to wait before releasing
    /// the port. Default: 1.5.
    pub settle_factor: f64,
    /// Reply framing limits and deadline.
    pub frame: FrameConfig,
}

impl ExchangeConfig {
    /// Default configuration at `baud_rate`.
    pub fn new(baud_rate: u32) -> Self {
        Self {
            baud_rate,
            ..Self::default()
        }
    }

    /// Same configuration with a different reply deadline.
    pub fn with_reply_timeout(mut self, timeout: Duration) -> Self {
        self.frame.reply_timeout = timeout;
        self
    }

    /// Time to hold the port after writing `wire_len` bytes.
    pub fn settle_time(&self, wire_len: usize) -> Duration {
        frame_time(wire_len, self.baud_rate, self.bits_per_byte).mul_f64(self.settle_factor)
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            baud_rate: SerialConfig::default().baud_rate,
            bits_per_byte: BITS_PER_BYTE_8N1,
            settle_factor: 1.5,
            frame: FrameConfig::default(),
        }
    }
}

/// Time to clock `wire_len` bytes out at `baud_rate`.
///
/// Returns zero for a zero baud rate.
pub fn frame_time(wire_len: usize, baud_rate: u32, bits_per_byte: u32) -> Duration {
    if baud_rate == 0 {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(wire_len as f64 * f64::from(bits_per_byte) / f64::from(baud_rate))
}

/// A decoded reply frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    tag: u8,
    body: Bytes,
}

impl Reply {
    /// Split a decoded frame into its leading tag byte and body.
    pub fn from_frame(mut frame: Bytes) -> Self {
        if frame.is_empty() {
            return Self { tag: 0, body: frame };
        }
        let tag = frame[0];
        let body = frame.split_off(1);
        Self { tag, body }
    }

    /// KISS tag byte (port and command nibbles).
    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// Frame contents after the tag byte.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body rendered one character per byte.
    pub fn text(&self) -> String {
        self.body.iter().map(|&b| char::from(b)).collect()
    }
}

/// One send-and-optional-receive cycle over a link it owns.
///
/// [`run`](Self::run) consumes the exchange, so the link is dropped (and a
/// serial port closed) when it returns, whatever the outcome.
pub struct Exchange<T> {
    link: T,
    config: ExchangeConfig,
}

impl Exchange<SerialLink> {
    /// Open the serial device at `config.baud_rate` and wrap it.
    pub fn open(path: &str, config: ExchangeConfig) -> Result<Self> {
        let serial = SerialConfig::new(config.baud_rate);
        let link = SerialLink::open(path, &serial)?;
        link.discard_buffers()?;
        Ok(Self::new(link, config))
    }
}

impl<T: Read + Write> Exchange<T> {
    /// Wrap an already open link.
    pub fn new(link: T, config: ExchangeConfig) -> Self {
        Self { link, config }
    }

    /// Send `request` and, if it expects one, wait for a single reply frame.
    ///
    /// Order: write frame, read reply under the deadline, then sleep
    /// `settle_factor` times the frame's transmission time so the TNC has
    /// the whole frame before the port closes.
    pub fn run(mut self, request: &Request) -> Result<Option<Reply>> {
        let wire_len = {
            let mut writer = FrameWriter::new(&mut self.link);
            let wire = writer.send(&request.payload)?;
            info!(command = %request.command, frame = %to_hex(wire), "sent frame");
            wire.len()
        };

        let reply = if request.expects_reply {
            let mut reader = FrameReader::with_config(&mut self.link, self.config.frame.clone());
            match reader.read_frame() {
                Ok(frame) => {
                    debug!(frame = %to_hex(&frame), "received frame");
                    Some(Reply::from_frame(frame))
                }
                Err(FrameError::Timeout(after)) => return Err(TncError::Timeout(after)),
                Err(err) => return Err(err.into()),
            }
        } else {
            None
        };

        let settle = self.config.settle_time(wire_len);
        debug!(?settle, "waiting for transmission to complete");
        std::thread::sleep(settle);

        Ok(reply)
    }
}
