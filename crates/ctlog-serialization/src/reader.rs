//! Primitive reads over a forward-only byte source
//!
//! [`Reader`] wraps any [`std::io::Read`] and counts the bytes it consumed.
//! All integers are big-endian and unsigned. Lengths of variable-length
//! fields are prefixed with the smallest number of bytes that can hold the
//! field's maximum length, see [`bytes_needed`].

use crate::error::{Error, Result};
use std::io::{ErrorKind, Read};

/// Widest integer [`Reader::read_number`] can assemble
pub const MAX_NUMBER_WIDTH: usize = 8;

/// Number of bytes needed to represent any value in `0..=max_data_length`
///
/// Computed from the bit length of `max_data_length`, so powers of two are
/// exact: 255 needs one byte, 256 needs two.
pub fn bytes_needed(max_data_length: u64) -> usize {
    let bits = (u64::BITS - max_data_length.leading_zeros()) as usize;
    bits.div_ceil(8)
}

/// Cursor over a forward-only byte source
#[derive(Debug)]
pub struct Reader<R> {
    inner: R,
    position: u64,
}

impl<R: Read> Reader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Bytes consumed so far
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read exactly `length` bytes
    ///
    /// The buffer grows as data arrives, so a large declared length on a short
    /// source fails without allocating the declared size up front.
    pub fn read_fixed_length(&mut self, length: usize) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        let read = self
            .inner
            .by_ref()
            .take(length as u64)
            .read_to_end(&mut data)?;
        self.position += read as u64;

        if read < length {
            return Err(Error::TruncatedInput {
                expected: length as u64,
                actual: read as u64,
            });
        }
        Ok(data)
    }

    /// Read a fixed-size array, e.g. a 32 byte hash
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let data = self.read_fixed_length(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(&data);
        Ok(array)
    }

    /// Read a big-endian unsigned integer of `num_bytes` bytes
    ///
    /// Widths above [`MAX_NUMBER_WIDTH`] are rejected before anything is read.
    pub fn read_number(&mut self, num_bytes: usize) -> Result<u64> {
        if num_bytes > MAX_NUMBER_WIDTH {
            return Err(Error::InvalidArgument(format!(
                "cannot read a number of {} bytes, at most {} are supported",
                num_bytes, MAX_NUMBER_WIDTH
            )));
        }

        let mut value = 0u64;
        for read in 0..num_bytes {
            let byte = self.read_byte()?.ok_or(Error::TruncatedInput {
                expected: num_bytes as u64,
                actual: read as u64,
            })?;
            value = (value << 8) | u64::from(byte);
        }
        Ok(value)
    }

    /// Read a length-prefixed field whose length may not exceed `max_data_length`
    pub fn read_variable_length(&mut self, max_data_length: u64) -> Result<Vec<u8>> {
        let length_width = bytes_needed(max_data_length);
        let length = self.read_number(length_width)?;
        if length > max_data_length {
            return Err(Error::CorruptData(format!(
                "declared length {} exceeds maximum {}",
                length, max_data_length
            )));
        }

        let length = usize::try_from(length).map_err(|_| {
            Error::CorruptData(format!("declared length {} does not fit in memory", length))
        })?;
        tracing::trace!(
            "reading {} byte field at offset {}",
            length,
            self.position
        );
        self.read_fixed_length(length)
    }

    /// Read everything left in the source
    pub fn read_to_end(&mut self) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        let read = self.inner.read_to_end(&mut data)?;
        self.position += read as u64;
        Ok(data)
    }

    /// Read until `limit` bytes or the end of the source, whichever comes first
    pub fn read_at_most(&mut self, limit: u64) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        let read = self.inner.by_ref().take(limit).read_to_end(&mut data)?;
        self.position += read as u64;
        Ok(data)
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.position += 1;
                    return Ok(Some(byte[0]));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }
}

impl Reader<&[u8]> {
    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
