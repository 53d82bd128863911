//! KISS framing for TNC command exchanges.
//!
//! Every payload travels as a byte-stuffed frame:
//! - a `FEND` (0xC0) delimiter on both ends
//! - each `FEND` inside the payload replaced by `FESC TFEND`
//! - each `FESC` inside the payload replaced by `FESC TFESC`
//!
//! [`KissDecoder`] undoes the stuffing one byte at a time, so frames
//! reassemble correctly no matter how the serial reads are split.

pub mod codec;
pub mod decoder;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{
    decode_stream, encode, encode_frame, to_hex, FrameConfig, DEFAULT_MAX_FRAME,
    DEFAULT_POLL_INTERVAL, DEFAULT_REPLY_TIMEOUT, FEND, FESC, TFEND, TFESC,
};
pub use decoder::{DecodeEvent, DecoderState, KissDecoder};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use writer::FrameWriter;
