//! Newline-delimited codec for the control link
//!
//! Commands and replies are single text lines terminated by `\n`; an
//! optional `\r` before the terminator is discarded. The decoder
//! accumulates raw transport bytes and yields complete lines.

use bytes::BytesMut;
use thiserror::Error;

/// Maximum accepted line length in bytes; longer input is rejected rather
/// than buffered without bound
pub const MAX_LINE_LEN: usize = 256;

/// Errors that can occur while splitting the byte stream into lines
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("line exceeds {MAX_LINE_LEN} bytes")]
    LineTooLong,

    #[error("line is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Streaming decoder that splits a byte stream into lines
#[derive(Debug, Default)]
pub struct LineDecoder {
    /// Partial line data being accumulated
    buffer: BytesMut,
}

impl LineDecoder {
    /// Create a new line decoder
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(MAX_LINE_LEN),
        }
    }

    /// Add raw bytes from the transport
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Try to take the next complete line, without its terminator
    ///
    /// Call this repeatedly until it returns `Ok(None)` to drain all
    /// complete lines before reading more bytes.
    pub fn next_line(&mut self) -> Result<Option<String>, CodecError> {
        match self.buffer.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                if pos > MAX_LINE_LEN {
                    return Err(CodecError::LineTooLong);
                }

                let mut line = self.buffer.split_to(pos + 1);
                line.truncate(pos);
                if line.last() == Some(&b'\r') {
                    line.truncate(line.len() - 1);
                }

                let text = std::str::from_utf8(&line)?.to_string();
                Ok(Some(text))
            }
            None => {
                if self.buffer.len() > MAX_LINE_LEN {
                    return Err(CodecError::LineTooLong);
                }
                Ok(None)
            }
        }
    }

    /// Buffered byte count (for diagnostics)
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }
}
