use std::fmt::Write as _;
use std::time::Duration;

use bytes::{BufMut, Bytes, BytesMut};

use crate::decoder::KissDecoder;
use crate::error::Result;

/// Frame end delimiter. Also opens every frame.
pub const FEND: u8 = 0xC0;

/// Frame escape.
pub const FESC: u8 = 0xDB;

/// Transposed `FEND`: `FESC TFEND` stands for a literal `FEND`.
pub const TFEND: u8 = 0xDC;

/// Transposed `FESC`: `FESC TFESC` stands for a literal `FESC`.
pub const TFESC: u8 = 0xDD;

/// Default cap on a decoded frame: 1 KiB.
pub const DEFAULT_MAX_FRAME: usize = 1024;

/// Default time to wait for a complete reply frame.
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(2);

/// Default pause after a read that returned no data without blocking.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Encode `payload` into a KISS frame, appending to `dst`.
///
/// Wire format:
/// ```text
/// ┌──────┬──────────────────────────────┬──────┐
/// │ FEND │ payload, FEND/FESC stuffed   │ FEND │
/// │ 0xC0 │ 0xC0 -> DB DC, 0xDB -> DB DD │ 0xC0 │
/// └──────┴──────────────────────────────┴──────┘
/// ```
pub fn encode_frame(payload: &[u8], dst: &mut BytesMut) {
    // Worst case every byte is stuffed.
    dst.reserve(payload.len() * 2 + 2);
    dst.put_u8(FEND);
    for &byte in payload {
        match byte {
            FESC => dst.put_slice(&[FESC, TFESC]),
            FEND => dst.put_slice(&[FESC, TFEND]),
            other => dst.put_u8(other),
        }
    }
    dst.put_u8(FEND);
}

/// Encode `payload` into a freshly allocated frame.
pub fn encode(payload: &[u8]) -> Bytes {
    let mut dst = BytesMut::new();
    encode_frame(payload, &mut dst);
    dst.freeze()
}

/// Decode the first complete frame found in `src`.
///
/// Returns `Ok(None)` if `src` ends before any frame completes. Bytes after
/// the first frame are ignored.
pub fn decode_stream(src: &[u8]) -> Result<Option<Bytes>> {
    let mut decoder = KissDecoder::with_max_frame_size(usize::MAX);
    let (_, frame) = decoder.push(src)?;
    Ok(frame)
}

/// Render bytes as space-separated lowercase hex (`c0 08 00 c0`).
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Configuration for frame reading.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum decoded frame size in bytes. Default: 1 KiB.
    pub max_frame_size: usize,
    /// Wall-clock budget for one complete frame. Default: 2 s.
    pub reply_timeout: Duration,
    /// Pause after an empty, non-blocking read.
    pub poll_interval: Duration,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_frame_size: DEFAULT_MAX_FRAME,
            reply_timeout: DEFAULT_REPLY_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameError;

    #[test]
    fn test_encode_plain_payload() {
        let frame = encode(&[0x08, 0x00]);
        assert_eq!(frame.as_ref(), &[FEND, 0x08, 0x00, FEND]);
    }

    #[test]
    fn test_encode_stuffs_reserved_bytes() {
        let frame = encode(&[0x01, FEND, 0x02, FESC, 0x03]);
        assert_eq!(
            frame.as_ref(),
            &[FEND, 0x01, FESC, TFEND, 0x02, FESC, TFESC, 0x03, FEND]
        );
    }

    #[test]
    fn test_encode_leaves_transposed_bytes_alone() {
        let frame = encode(&[TFEND, TFESC]);
        assert_eq!(frame.as_ref(), &[FEND, TFEND, TFESC, FEND]);
    }

    #[test]
    fn test_encode_empty_payload() {
        assert_eq!(encode(b"").as_ref(), &[FEND, FEND]);
    }

    #[test]
    fn test_encode_appends_to_existing_buffer() {
        let mut buf = BytesMut::from(&b"xx"[..]);
        encode_frame(b"a", &mut buf);
        assert_eq!(buf.as_ref(), &[b'x', b'x', FEND, b'a', FEND]);
    }

    #[test]
    fn test_decode_roundtrip_with_reserved_bytes() {
        let payloads: [&[u8]; 5] = [
            b"hello",
            &[FEND],
            &[FESC],
            &[FESC, TFEND, FEND, TFESC, FESC, FESC],
            &[0x00, 0xFF, FEND, FEND, 0x7F],
        ];
        for payload in payloads {
            let frame = decode_stream(&encode(payload)).unwrap().unwrap();
            assert_eq!(frame.as_ref(), payload);
        }
    }

    #[test]
    fn test_decode_every_byte_value() {
        let payload: Vec<u8> = (0..=255u8).collect();
        let frame = decode_stream(&encode(&payload)).unwrap().unwrap();
        assert_eq!(frame.as_ref(), payload.as_slice());
    }

    #[test]
    fn test_decode_incomplete_frame() {
        let wire = encode(b"partial");
        let result = decode_stream(&wire[..wire.len() - 1]).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_decode_empty_frame_is_not_a_frame() {
        assert!(decode_stream(&[FEND, FEND]).unwrap().is_none());
    }

    #[test]
    fn test_decode_returns_first_frame_only() {
        let mut wire = BytesMut::new();
        encode_frame(b"first", &mut wire);
        encode_frame(b"second", &mut wire);

        let frame = decode_stream(&wire).unwrap().unwrap();
        assert_eq!(frame.as_ref(), b"first");
    }

    #[test]
    fn test_decode_invalid_escape() {
        let result = decode_stream(&[FEND, 0x01, FESC, 0x41, FEND]);
        assert!(matches!(result, Err(FrameError::InvalidEscape(0x41))));
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(&[0xC0, 0x08, 0x00, 0xC0]), "c0 08 00 c0");
        assert_eq!(to_hex(&[]), "");
    }

    #[test]
    fn test_default_config() {
        let cfg = FrameConfig::default();
        assert_eq!(cfg.reply_timeout, Duration::from_secs(2));
        assert_eq!(cfg.max_frame_size, DEFAULT_MAX_FRAME);
    }
}
