use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use tracing::debug;

use crate::codec::encode_frame;
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 64;

/// Writes complete frames to any `Write` stream.
pub struct FrameWriter<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Write> FrameWriter<T> {
    /// Create a new frame writer.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
        }
    }

    /// Encode `payload`, write the whole frame and flush (blocking).
    ///
    /// Returns the frame bytes as they went on the wire.
    pub fn send(&mut self, payload: &[u8]) -> Result<&[u8]> {
        self.buf.clear();
        encode_frame(payload, &mut self.buf);

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.flush()?;
        debug!(wire_len = self.buf.len(), "frame written");
        Ok(&self.buf[..])
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{FEND, FESC, TFEND};

    #[test]
    fn send_writes_encoded_frame() {
        let mut writer = FrameWriter::new(Vec::new());
        let wire = writer.send(&[0x03, FEND]).unwrap().to_vec();

        assert_eq!(wire, vec![FEND, 0x03, FESC, TFEND, FEND]);
        assert_eq!(writer.into_inner(), wire);
    }

    #[test]
    fn consecutive_sends_do_not_accumulate() {
        let mut writer = FrameWriter::new(Vec::new());
        writer.send(b"a").unwrap();
        let second = writer.send(b"b").unwrap().to_vec();

        assert_eq!(second, vec![FEND, b'b', FEND]);
        assert_eq!(writer.into_inner(), vec![FEND, b'a', FEND, FEND, b'b', FEND]);
    }

    #[test]
    fn short_writes_are_completed() {
        let sink = TrickleWriter {
            written: Vec::new(),
            interrupted: false,
        };
        let mut writer = FrameWriter::new(sink);
        writer.send(b"trickle").unwrap();

        let sink = writer.into_inner();
        assert_eq!(sink.written.len(), b"trickle".len() + 2);
    }

    #[test]
    fn zero_length_write_is_connection_closed() {
        let mut writer = FrameWriter::new(ClosedWriter);
        assert!(matches!(
            writer.send(b"x"),
            Err(FrameError::ConnectionClosed)
        ));
    }

    #[test]
    fn write_error_propagates() {
        let mut writer = FrameWriter::new(BrokenWriter);
        let err = writer.send(b"x").unwrap_err();
        assert!(matches!(err, FrameError::Io(e) if e.kind() == ErrorKind::BrokenPipe));
    }

    /// Accepts one byte per call and interrupts every other call.
    struct TrickleWriter {
        written: Vec<u8>,
        interrupted: bool,
    }

    impl Write for TrickleWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.interrupted = !self.interrupted;
            if self.interrupted {
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.written.push(buf[0]);
            Ok(1)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct ClosedWriter;

    impl Write for ClosedWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
