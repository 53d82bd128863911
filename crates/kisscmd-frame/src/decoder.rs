use bytes::{BufMut, Bytes, BytesMut};
use tracing::{debug, trace};

use crate::codec::{DEFAULT_MAX_FRAME, FEND, FESC, TFEND, TFESC};
use crate::error::{FrameError, Result};

/// Escape state of a [`KissDecoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderState {
    /// Bytes are taken literally.
    #[default]
    NonEscaped,
    /// The previous byte was `FESC`.
    Escaped,
}

/// Outcome of feeding one byte to a [`KissDecoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeEvent {
    /// The byte was consumed; no frame boundary yet.
    Continue,
    /// A delimiter closed a non-empty frame.
    FrameComplete(Bytes),
    /// A delimiter arrived with nothing buffered (leading or doubled `FEND`).
    FrameDiscarded,
}

/// Incremental KISS frame decoder.
///
/// Owns its escape state and accumulation buffer. Each call to
/// [`feed`](Self::feed) advances exactly one byte; timing is left to the
/// caller.
#[derive(Debug)]
pub struct KissDecoder {
    state: DecoderState,
    buf: BytesMut,
    max_frame_size: usize,
}

impl KissDecoder {
    /// Create a decoder with the default frame size limit.
    pub fn new() -> Self {
        Self::with_max_frame_size(DEFAULT_MAX_FRAME)
    }

    /// Create a decoder that rejects frames longer than `max_frame_size`.
    pub fn with_max_frame_size(max_frame_size: usize) -> Self {
        Self {
            state: DecoderState::NonEscaped,
            buf: BytesMut::new(),
            max_frame_size,
        }
    }

    /// Advance the state machine by one byte.
    ///
    /// An escape followed by anything other than `TFEND`/`TFESC`, or a frame
    /// outgrowing the size limit, resets the decoder and returns an error;
    /// decoding resumes cleanly at the next delimiter.
    pub fn feed(&mut self, byte: u8) -> Result<DecodeEvent> {
        match (self.state, byte) {
            (DecoderState::NonEscaped, FESC) => {
                self.state = DecoderState::Escaped;
                Ok(DecodeEvent::Continue)
            }
            (DecoderState::NonEscaped, FEND) => {
                if self.buf.is_empty() {
                    trace!("empty frame boundary");
                    Ok(DecodeEvent::FrameDiscarded)
                } else {
                    Ok(DecodeEvent::FrameComplete(self.buf.split().freeze()))
                }
            }
            (DecoderState::NonEscaped, other) => self.append(other),
            (DecoderState::Escaped, TFESC) => {
                self.state = DecoderState::NonEscaped;
                self.append(FESC)
            }
            (DecoderState::Escaped, TFEND) => {
                self.state = DecoderState::NonEscaped;
                self.append(FEND)
            }
            (DecoderState::Escaped, other) => {
                debug!(byte = other, dropped = self.buf.len(), "invalid escape, resyncing");
                self.reset();
                Err(FrameError::InvalidEscape(other))
            }
        }
    }

    /// Feed `data` until the first frame completes.
    ///
    /// Returns how many bytes were consumed and the completed frame, if any.
    /// Bytes after the completing delimiter are left untouched.
    pub fn push(&mut self, data: &[u8]) -> Result<(usize, Option<Bytes>)> {
        for (i, &byte) in data.iter().enumerate() {
            if let DecodeEvent::FrameComplete(frame) = self.feed(byte)? {
                return Ok((i + 1, Some(frame)));
            }
        }
        Ok((data.len(), None))
    }

    /// Drop any partial frame and return to the unescaped state.
    pub fn reset(&mut self) {
        self.state = DecoderState::NonEscaped;
        self.buf.clear();
    }

    /// Current escape state.
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Number of decoded bytes held for the frame in progress.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    fn append(&mut self, byte: u8) -> Result<DecodeEvent> {
        if self.buf.len() >= self.max_frame_size {
            let size = self.buf.len() + 1;
            self.reset();
            return Err(FrameError::FrameTooLarge {
                size,
                max: self.max_frame_size,
            });
        }
        self.buf.put_u8(byte);
        Ok(DecodeEvent::Continue)
    }
}

impl Default for KissDecoder {
    fn default() -> Self {
        Self::new()
    }
}
