//! Buffered pull-based character source.
//!
//! Bytes are buffered on demand from an underlying reader. The consumer
//! peeks ahead with [`CharInput::get`], then commits with
//! [`CharInput::extract`] or [`CharInput::advance`]; committing updates the
//! line/column coordinates by counting line feeds over the consumed region.

use std::io::{self, Cursor, Read};

use parsnip_core::Coordinates;

pub struct CharInput {
    reader: Option<Box<dyn Read>>,
    buffer: Vec<u8>,
    start: usize,
    line: usize,
    column: usize,
}

impl CharInput {
    /// A source with no reader; behaves as immediately exhausted.
    pub fn empty() -> Self {
        Self {
            reader: None,
            buffer: Vec::new(),
            start: 0,
            line: 0,
            column: 0,
        }
    }

    pub fn from_reader(reader: impl Read + 'static) -> Self {
        Self {
            reader: Some(Box::new(reader)),
            ..Self::empty()
        }
    }

    pub fn from_str(text: &str) -> Self {
        Self::from_reader(Cursor::new(text.as_bytes().to_vec()))
    }

    /// Rebind to a new reader, resetting the buffer and coordinates.
    pub fn rebind(&mut self, reader: impl Read + 'static) {
        self.reader = Some(Box::new(reader));
        self.buffer.clear();
        self.start = 0;
        self.line = 0;
        self.column = 0;
    }

    /// Peek at the byte `offset` positions ahead of the current start.
    pub fn get(&mut self, offset: usize) -> io::Result<Option<u8>> {
        if self.fill(self.start + offset + 1)? {
            Ok(Some(self.buffer[self.start + offset]))
        } else {
            Ok(None)
        }
    }

    /// Whether at least one byte remains.
    pub fn good(&mut self) -> io::Result<bool> {
        if self.buffer.len() == self.start {
            let _ = self.fill(self.start + 16)?;
        }
        Ok(self.buffer.len() > self.start)
    }

    pub fn available(&self) -> usize {
        self.buffer.len() - self.start
    }

    /// Consume `length` bytes and return them, updating coordinates.
    pub fn extract(&mut self, length: usize) -> io::Result<String> {
        if !self.fill(self.start + length)? {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "not enough buffered bytes to extract",
            ));
        }
        let region = &self.buffer[self.start..self.start + length];
        let text = String::from_utf8_lossy(region).into_owned();
        self.consume(length);
        Ok(text)
    }

    /// Consume `length` bytes without returning them.
    pub fn advance(&mut self, length: usize) -> io::Result<bool> {
        if !self.fill(self.start + length)? {
            return Ok(false);
        }
        self.consume(length);
        Ok(true)
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.line, self.column)
    }

    fn consume(&mut self, length: usize) {
        let region = &self.buffer[self.start..self.start + length];
        let newlines = region.iter().filter(|&&b| b == b'\n').count();
        if newlines > 0 {
            self.line += newlines;
            let after_last = region.iter().rposition(|&b| b == b'\n').unwrap() + 1;
            self.column = length - after_last;
        } else {
            self.column += length;
        }

        self.start += length;
        self.buffer.drain(..self.start);
        self.start = 0;
    }

    /// Grow the buffer until it holds `total` bytes. False at end of stream.
    fn fill(&mut self, total: usize) -> io::Result<bool> {
        while self.buffer.len() < total {
            let Some(reader) = self.reader.as_mut() else {
                return Ok(false);
            };
            let want = (total - self.buffer.len()).max(16);
            let mut chunk = vec![0u8; want];
            let read = reader.read(&mut chunk)?;
            if read == 0 {
                return Ok(false);
            }
            self.buffer.extend_from_slice(&chunk[..read]);
        }
        Ok(true)
    }
}
