//! Streaming WAV framing for responses of unknown length.

use std::io::{self, Write};

use super::format::{WavFormat, HEADER_LEN};
use super::writer::write_header;

/// Size field value meaning "length unknown".
///
/// Players that honor it read PCM until the connection closes.
pub const UNBOUNDED_SIZE: u32 = 0xFFFF_FFFF;

/// Builds the 44-byte mono 16-bit header with both size fields set to
/// [`UNBOUNDED_SIZE`].
pub fn build_header(sample_rate: u32) -> Vec<u8> {
    let mut header = Vec::with_capacity(HEADER_LEN);
    write_header(
        &mut header,
        &WavFormat::mono(sample_rate),
        UNBOUNDED_SIZE,
        UNBOUNDED_SIZE,
    )
    .expect("writing to Vec should not fail");
    header
}

/// Writes an unbounded WAV stream: the header once, then raw PCM chunks.
///
/// The header is never revisited, so the sink need not be seekable.
#[derive(Debug)]
pub struct StreamingWavWriter<W: Write> {
    inner: W,
    sample_rate: u32,
    header_written: bool,
    bytes_written: u64,
}

impl<W: Write> StreamingWavWriter<W> {
    /// Wraps a sink. Nothing is written until the first call.
    pub fn new(inner: W, sample_rate: u32) -> Self {
        Self {
            inner,
            sample_rate,
            header_written: false,
            bytes_written: 0,
        }
    }

    /// Writes the header if it has not been written yet.
    pub fn write_header(&mut self) -> io::Result<()> {
        if !self.header_written {
            self.inner.write_all(&build_header(self.sample_rate))?;
            self.header_written = true;
        }
        Ok(())
    }

    /// Appends one chunk of PCM bytes, writing the header first if needed.
    pub fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.write_header()?;
        self.inner.write_all(chunk)?;
        self.bytes_written += chunk.len() as u64;
        Ok(())
    }

    /// Flushes the sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    /// PCM bytes appended after the header.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Sample rate announced in the header.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Returns the wrapped sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}
