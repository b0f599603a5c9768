/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Bounded read/write position over a byte buffer.
//!
//! Every field codec goes through a [`Cursor`]; nothing in the codec indexes
//! a buffer directly. The cursor keeps `position <= limit <= buffer.len()`
//! and moves `position` by exactly the number of bytes read or written.

use boe_core::BufferOverrun;
use std::mem;

/// Read/write position tracker bounding a buffer.
#[derive(Debug, Clone)]
pub struct Cursor<B> {
    buffer: B,
    position: usize,
    limit: usize,
}

impl<B> Cursor<B> {
    /// Current position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Position past which the cursor will not read or write.
    #[inline]
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Bytes between the position and the limit.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// Returns true if the position has reached the limit.
    #[inline]
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.position == self.limit
    }

    /// Moves the position forward by `n` bytes.
    ///
    /// # Returns
    /// The position before the move.
    ///
    /// # Errors
    /// Returns `BufferOverrun` if fewer than `n` bytes remain. The position is
    /// left unchanged.
    #[inline]
    pub fn advance(&mut self, n: usize) -> Result<usize, BufferOverrun> {
        let start = self.position;
        match start.checked_add(n) {
            Some(end) if end <= self.limit => {
                self.position = end;
                Ok(start)
            }
            _ => Err(BufferOverrun {
                position: start,
                requested: n,
                limit: self.limit,
            }),
        }
    }

    /// Moves the position back to the start of the buffer.
    #[inline]
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Moves the position to `position`.
    ///
    /// # Errors
    /// Returns `BufferOverrun` if `position` is past the limit.
    pub fn set_position(&mut self, position: usize) -> Result<(), BufferOverrun> {
        if position > self.limit {
            return Err(BufferOverrun {
                position,
                requested: 0,
                limit: self.limit,
            });
        }
        self.position = position;
        Ok(())
    }

    /// Returns a reference to the underlying buffer.
    #[must_use]
    pub const fn get_ref(&self) -> &B {
        &self.buffer
    }

    /// Consumes the cursor, returning the underlying buffer.
    #[must_use]
    pub fn into_inner(self) -> B {
        self.buffer
    }
}

impl<B: AsRef<[u8]>> Cursor<B> {
    /// Creates a cursor over the whole buffer.
    ///
    /// # Arguments
    /// * `buffer` - The bytes to read from or write into
    #[must_use]
    pub fn new(buffer: B) -> Self {
        let limit = buffer.as_ref().len();
        Self {
            buffer,
            position: 0,
            limit,
        }
    }

    /// Creates a cursor that stops at `limit` bytes.
    ///
    /// # Errors
    /// Returns `BufferOverrun` if `limit` exceeds the buffer length.
    pub fn with_limit(buffer: B, limit: usize) -> Result<Self, BufferOverrun> {
        let len = buffer.as_ref().len();
        if limit > len {
            return Err(BufferOverrun {
                position: 0,
                requested: limit,
                limit: len,
            });
        }
        Ok(Self {
            buffer,
            position: 0,
            limit,
        })
    }

    /// Swaps in a new buffer, returning the old one.
    ///
    /// The position goes back to zero and the limit becomes the new buffer
    /// length.
    pub fn rebind(&mut self, buffer: B) -> B {
        self.limit = buffer.as_ref().len();
        self.position = 0;
        mem::replace(&mut self.buffer, buffer)
    }

    /// Moves the limit, returning the previous one.
    ///
    /// # Errors
    /// Returns `BufferOverrun` if `limit` is before the position or past the
    /// end of the buffer. The limit is left unchanged.
    pub fn set_limit(&mut self, limit: usize) -> Result<usize, BufferOverrun> {
        let len = self.buffer.as_ref().len();
        if limit < self.position || limit > len {
            return Err(BufferOverrun {
                position: self.position,
                requested: limit.saturating_sub(self.position),
                limit: len,
            });
        }
        Ok(mem::replace(&mut self.limit, limit))
    }

    /// Reads the next `n` bytes.
    ///
    /// # Errors
    /// Returns `BufferOverrun` if fewer than `n` bytes remain.
    #[inline]
    pub fn read_bytes(&mut self, n: usize) -> Result<&[u8], BufferOverrun> {
        let start = self.advance(n)?;
        Ok(&self.buffer.as_ref()[start..start + n])
    }

    /// Reads the next `N` bytes into an array.
    ///
    /// # Errors
    /// Returns `BufferOverrun` if fewer than `N` bytes remain.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], BufferOverrun> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Bytes from the start of the buffer up to the position.
    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.position]
    }

    /// Bytes from the position up to the limit.
    #[must_use]
    pub fn unread(&self) -> &[u8] {
        &self.buffer.as_ref()[self.position..self.limit]
    }
}

impl<B: AsMut<[u8]>> Cursor<B> {
    /// Writes `src` at the position.
    ///
    /// # Errors
    /// Returns `BufferOverrun` if fewer than `src.len()` bytes remain.
    #[inline]
    pub fn write_bytes(&mut self, src: &[u8]) -> Result<(), BufferOverrun> {
        let start = self.advance(src.len())?;
        self.buffer.as_mut()[start..start + src.len()].copy_from_slice(src);
        Ok(())
    }

    /// Writes `byte` repeated `n` times.
    ///
    /// # Errors
    /// Returns `BufferOverrun` if fewer than `n` bytes remain.
    #[inline]
    pub fn fill(&mut self, byte: u8, n: usize) -> Result<(), BufferOverrun> {
        let start = self.advance(n)?;
        self.buffer.as_mut()[start..start + n].fill(byte);
        Ok(())
    }

    /// Overwrites bytes that were already written, without moving the position.
    ///
    /// # Errors
    /// Returns `BufferOverrun` if `at + src.len()` is past the position.
    pub fn patch(&mut self, at: usize, src: &[u8]) -> Result<(), BufferOverrun> {
        match at.checked_add(src.len()) {
            Some(end) if end <= self.position => {
                self.buffer.as_mut()[at..end].copy_from_slice(src);
                Ok(())
            }
            _ => Err(BufferOverrun {
                position: at,
                requested: src.len(),
                limit: self.position,
            }),
        }
    }
}
