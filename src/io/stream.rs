// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Rewindable byte stream with an explicit rewind budget.
//!
//! Format detection hands the same input to several decoders in turn. The
//! [`RewindableReader`] records every byte read after [`mark`](RewindableReader::mark)
//! up to a budget, so the input can be replayed for the next candidate. Reading
//! past the budget does not fail the read itself; it makes the next
//! [`rewind`](RewindableReader::rewind) fail with
//! [`CodecError::StreamNotRewindable`].

use std::io::{self, Cursor, Read};

use crate::{CodecError, Result};

/// Reader that can be rewound to a marked position within a byte budget.
///
/// # Example
///
/// ```
/// use std::io::Read;
/// use navcodec::io::stream::RewindableReader;
///
/// let mut reader = RewindableReader::from_bytes(b"hello".to_vec());
/// reader.mark(16);
/// let mut first = String::new();
/// reader.read_to_string(&mut first)?;
/// reader.rewind()?;
/// let mut second = String::new();
/// reader.read_to_string(&mut second)?;
/// assert_eq!(first, second);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct RewindableReader<R> {
    /// Underlying source
    inner: R,
    /// Bytes read since the mark
    replay: Vec<u8>,
    /// Read position inside `replay`
    cursor: usize,
    /// Rewind budget, `None` when no mark is set
    budget: Option<usize>,
    /// Bytes consumed from `inner` since the mark
    consumed: usize,
}

impl RewindableReader<Cursor<Vec<u8>>> {
    /// Create a reader over an in-memory buffer.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::new(Cursor::new(bytes))
    }
}

impl<R: Read> RewindableReader<R> {
    /// Wrap `inner` without a mark.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            replay: Vec::new(),
            cursor: 0,
            budget: None,
            consumed: 0,
        }
    }

    /// Mark the current position, allowing up to `budget` bytes to be replayed.
    ///
    /// Any earlier mark is dropped; unread replay bytes stay readable.
    pub fn mark(&mut self, budget: usize) {
        self.replay.drain(..self.cursor);
        self.cursor = 0;
        self.consumed = self.replay.len();
        self.budget = Some(budget);
    }

    /// Rewind budget of the current mark.
    pub fn budget(&self) -> Option<usize> {
        self.budget
    }

    /// Bytes read past the mark so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Rewind to the mark.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::StreamNotRewindable`] when no mark is set or more
    /// bytes than the budget have been read since the mark.
    pub fn rewind(&mut self) -> Result<()> {
        match self.budget {
            Some(budget) if self.consumed <= budget => {
                self.cursor = 0;
                Ok(())
            }
            Some(budget) => Err(CodecError::not_rewindable(budget, self.consumed)),
            None => Err(CodecError::not_rewindable(0, self.consumed)),
        }
    }

    /// Release the wrapper and return the underlying source.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn within_budget(&self) -> bool {
        self.budget.is_some_and(|budget| self.consumed <= budget)
    }
}

impl<R: Read> Read for RewindableReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        if self.cursor < self.replay.len() {
            let n = (self.replay.len() - self.cursor).min(buf.len());
            buf[..n].copy_from_slice(&self.replay[self.cursor..self.cursor + n]);
            self.cursor += n;
            return Ok(n);
        }

        let n = self.inner.read(buf)?;
        if self.budget.is_some() {
            self.consumed += n;
            if self.within_budget() {
                self.replay.extend_from_slice(&buf[..n]);
                self.cursor = self.replay.len();
            } else if !self.replay.is_empty() {
                // Past the budget the replay buffer is useless.
                self.replay = Vec::new();
                self.cursor = 0;
            }
        }
        Ok(n)
    }
}
