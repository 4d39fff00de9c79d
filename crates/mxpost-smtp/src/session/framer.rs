//! CRLF line framing for the inbound byte stream.

use bytes::{Buf, BytesMut};

use crate::error::{Error, Result};

/// Default buffer size for reading.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Maximum line length to prevent memory exhaustion.
pub const MAX_LINE_LENGTH: usize = 1024 * 1024; // 1 MB

/// Receive buffer that yields complete CRLF-terminated lines.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: BytesMut,
}

impl LineBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(DEFAULT_BUFFER_SIZE),
        }
    }

    /// Appends raw bytes received from the transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer grows past [`MAX_LINE_LENGTH`] without
    /// containing a line break.
    pub fn extend(&mut self, data: &[u8]) -> Result<()> {
        self.buf.extend_from_slice(data);

        if self.buf.len() > MAX_LINE_LENGTH && find_crlf(&self.buf).is_none() {
            return Err(Error::LineTooLong(MAX_LINE_LENGTH));
        }

        Ok(())
    }

    /// Extracts the first complete line, without its CRLF.
    ///
    /// The buffer keeps whatever followed the CRLF.
    pub fn next_line(&mut self) -> Option<String> {
        let pos = find_crlf(&self.buf)?;
        let line = self.buf.split_to(pos);
        self.buf.advance(2);
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Returns the number of buffered bytes not yet framed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

/// Finds the position of CRLF in a buffer.
fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}
