//! Bounds-checked byte cursor over a borrowed buffer.
//!
//! Two addressing modes are provided:
//!
//! - `*_at(offset)` reads at an explicit offset and never moves the cursor.
//!   Record fields are addressed this way.
//! - `read_*()` reads at the current position and advances past the value.
//!   Sequential header and count fields are read this way.
//!
//! Every read fails with [`Error::OutOfBounds`] instead of panicking when the
//! requested span does not fit in the buffer.

use crate::{Error, Result};

/// A read-only cursor over a byte buffer.
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

macro_rules! fixed_width_reads {
    ($($ty:ty => $at:ident, $read:ident, $from:ident;)*) => {
        $(
            #[doc = concat!("Read a `", stringify!($ty), "` at `offset` (", stringify!($from), ").")]
            pub fn $at(&self, offset: usize) -> Result<$ty> {
                Ok(<$ty>::$from(self.array_at(offset)?))
            }

            #[doc = concat!("Read a `", stringify!($ty), "` at the current position and advance.")]
            pub fn $read(&mut self) -> Result<$ty> {
                let value = self.$at(self.pos)?;
                self.pos += std::mem::size_of::<$ty>();
                Ok(value)
            }
        )*
    };
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// The underlying buffer.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Total buffer length.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the position and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Move the position. Seeking past the end is allowed; the next read fails.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Borrow `len` bytes at `offset`.
    pub fn bytes_at(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        let out_of_bounds = || Error::OutOfBounds {
            offset,
            len,
            available: self.data.len(),
        };
        let end = offset.checked_add(len).ok_or_else(out_of_bounds)?;
        self.data.get(offset..end).ok_or_else(out_of_bounds)
    }

    /// Borrow `len` bytes at the current position and advance.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let bytes = self.bytes_at(self.pos, len)?;
        self.pos += len;
        Ok(bytes)
    }

    /// Everything from the current position to the end of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or(&[])
    }

    /// Copy `N` bytes at `offset` into an array.
    pub fn array_at<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.bytes_at(offset, N)?);
        Ok(out)
    }

    /// Copy `N` bytes at the current position into an array and advance.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let out = self.array_at(self.pos)?;
        self.pos += N;
        Ok(out)
    }

    fixed_width_reads! {
        u8 => u8_at, read_u8, from_le_bytes;
        i8 => i8_at, read_i8, from_le_bytes;
        u32 => u32_be_at, read_u32_be, from_be_bytes;
        u32 => u32_le_at, read_u32_le, from_le_bytes;
        i32 => i32_be_at, read_i32_be, from_be_bytes;
        i32 => i32_le_at, read_i32_le, from_le_bytes;
        u64 => u64_be_at, read_u64_be, from_be_bytes;
        u64 => u64_le_at, read_u64_le, from_le_bytes;
        i64 => i64_be_at, read_i64_be, from_be_bytes;
        i64 => i64_le_at, read_i64_le, from_le_bytes;
        f64 => f64_le_at, read_f64_le, from_le_bytes;
    }

    /// Borrow the null-terminated run starting at `offset`, terminator excluded.
    ///
    /// Fails with `OutOfBounds` if `offset` is at or past the end of the
    /// buffer and with `UnterminatedString` if no zero byte follows it.
    pub fn cstr_at(&self, offset: usize) -> Result<&'a [u8]> {
        let tail = match self.data.get(offset..) {
            Some(tail) if !tail.is_empty() => tail,
            _ => {
                return Err(Error::OutOfBounds {
                    offset,
                    len: 1,
                    available: self.data.len(),
                })
            }
        };
        let end = tail
            .iter()
            .position(|&b| b == 0)
            .ok_or(Error::UnterminatedString { offset })?;
        Ok(&tail[..end])
    }
}
