use std::io::{ErrorKind, Read};
use std::time::Instant;

use bytes::Bytes;
use tracing::debug;

use crate::codec::FrameConfig;
use crate::decoder::{DecodeEvent, KissDecoder};
use crate::error::{FrameError, Result};

/// Reads one complete frame at a time from any `Read` stream.
///
/// The stream is read one byte per call so that nothing past the closing
/// delimiter is consumed.
pub struct FrameReader<T> {
    inner: T,
    decoder: KissDecoder,
    config: FrameConfig,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            decoder: KissDecoder::with_max_frame_size(config.max_frame_size),
            config,
        }
    }

    /// Read the next complete frame, giving up after `reply_timeout`.
    ///
    /// The deadline is checked once per read. Read timeouts, would-block and
    /// zero-length reads count as "no byte yet". A partial frame still
    /// buffered at the deadline is discarded.
    pub fn read_frame(&mut self) -> Result<Bytes> {
        let start = Instant::now();
        let mut byte = [0u8; 1];

        loop {
            if start.elapsed() > self.config.reply_timeout {
                if self.decoder.buffered() > 0 {
                    debug!(
                        discarded = self.decoder.buffered(),
                        "discarding partial frame at deadline"
                    );
                }
                self.decoder.reset();
                return Err(FrameError::Timeout(self.config.reply_timeout));
            }

            match self.inner.read(&mut byte) {
                Ok(0) => {
                    std::thread::sleep(self.config.poll_interval);
                    continue;
                }
                Ok(_) => {}
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::TimedOut => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => {
                    std::thread::sleep(self.config.poll_interval);
                    continue;
                }
                Err(err) => return Err(FrameError::Io(err)),
            }

            if let DecodeEvent::FrameComplete(frame) = self.decoder.feed(byte[0])? {
                return Ok(frame);
            }
        }
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
