//! Byte sinks: where rendered exposition text goes.
//!
//! The core only requires a `write_all(bytes)` capability and never reads
//! back. Sinks may buffer internally; `BufferedSink` flushes on scope exit.

use std::io;

use bytes::{Bytes, BytesMut};

use crate::Result;

/// Destination for rendered bytes.
pub trait ByteSink {
    /// Accept one chunk of output.
    fn write_all(&mut self, chunk: &[u8]) -> Result<()>;

    /// Accept a single byte.
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write_all(&[byte])
    }
}

/// Collecting into a `Vec<u8>` never fails.
impl ByteSink for Vec<u8> {
    fn write_all(&mut self, chunk: &[u8]) -> Result<()> {
        self.extend_from_slice(chunk);
        Ok(())
    }
}

/// Adapter over any `std::io::Write`.
pub struct IoSink<W: io::Write> {
    writer: W,
}

impl<W: io::Write> IoSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> ByteSink for IoSink<W> {
    fn write_all(&mut self, chunk: &[u8]) -> Result<()> {
        self.writer.write_all(chunk)?;
        Ok(())
    }
}

/// Fixed-capacity buffering decorator. Forwards to the inner sink in
/// `capacity`-sized chunks and flushes any remainder on drop.
pub struct BufferedSink<'a> {
    inner: &'a mut dyn ByteSink,
    buf: BytesMut,
    capacity: usize,
}

impl<'a> BufferedSink<'a> {
    pub fn new(inner: &'a mut dyn ByteSink, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner,
            buf: BytesMut::with_capacity(capacity),
            capacity,
        }
    }

    /// Push buffered bytes to the inner sink.
    pub fn flush(&mut self) -> Result<()> {
        if !self.buf.is_empty() {
            let chunk = self.buf.split();
            self.inner.write_all(&chunk)?;
        }
        Ok(())
    }
}

impl ByteSink for BufferedSink<'_> {
    fn write_all(&mut self, mut chunk: &[u8]) -> Result<()> {
        while !chunk.is_empty() {
            let free = self.capacity - self.buf.len();
            let take = free.min(chunk.len());
            self.buf.extend_from_slice(&chunk[..take]);
            chunk = &chunk[take..];
            if self.buf.len() == self.capacity {
                self.flush()?;
            }
        }
        Ok(())
    }
}

impl Drop for BufferedSink<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "buffered sink flush failed on drop");
        }
    }
}

/// Sink that accumulates frozen `Bytes` chunks, sized for streaming
/// responses (each chunk becomes one body frame).
pub struct ChunkSink {
    chunks: Vec<Bytes>,
    buf: BytesMut,
    chunk_size: usize,
}

impl ChunkSink {
    pub fn new(chunk_size: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunks: Vec::new(),
            buf: BytesMut::with_capacity(chunk_size),
            chunk_size,
        }
    }

    /// Finish writing and take the accumulated chunks.
    pub fn finish(mut self) -> Vec<Bytes> {
        if !self.buf.is_empty() {
            self.chunks.push(self.buf.split().freeze());
        }
        self.chunks
    }
}

impl ByteSink for ChunkSink {
    fn write_all(&mut self, mut chunk: &[u8]) -> Result<()> {
        while !chunk.is_empty() {
            let free = self.chunk_size - self.buf.len();
            let take = free.min(chunk.len());
            self.buf.extend_from_slice(&chunk[..take]);
            chunk = &chunk[take..];
            if self.buf.len() == self.chunk_size {
                self.chunks.push(self.buf.split().freeze());
            }
        }
        Ok(())
    }
}
