//! Primitive reads for the WKB binary format.
//!
//! Every WKB node starts with its own byte order marker, so the reader keeps
//! a current [`ByteOrder`] that multi-byte reads honour.

use crate::error::{DecodeError, Error};
use crate::limits::{BYTE_ORDER_BIG, BYTE_ORDER_LITTLE};

/// Byte order of multi-byte values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    /// XDR, marker `0`.
    BigEndian,
    /// NDR, marker `1`.
    #[default]
    LittleEndian,
}

impl ByteOrder {
    /// Creates a byte order from its wire marker.
    pub fn from_marker(marker: u8) -> Option<ByteOrder> {
        match marker {
            BYTE_ORDER_BIG => Some(ByteOrder::BigEndian),
            BYTE_ORDER_LITTLE => Some(ByteOrder::LittleEndian),
            _ => None,
        }
    }
}

/// Reader for decoding binary data.
///
/// Wraps a byte slice and provides bounds-checked reads. A failed read
/// leaves the position unchanged.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    order: ByteOrder,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            order: ByteOrder::default(),
        }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the byte order used by multi-byte reads.
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or(DecodeError::UnexpectedEof { context })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining_len() {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    #[inline]
    fn read_array<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N, context)?);
        Ok(out)
    }

    /// Reads a byte order marker and switches to that order.
    pub fn read_byte_order(&mut self) -> Result<ByteOrder, DecodeError> {
        let marker = self.read_byte("byte order")?;
        let order = ByteOrder::from_marker(marker).ok_or_else(|| {
            self.pos -= 1;
            DecodeError::InvalidByteOrder { marker }
        })?;
        self.order = order;
        Ok(order)
    }

    /// Reads an unsigned 32-bit integer in the current byte order.
    #[inline]
    pub fn read_u32(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        let bytes = self.read_array(context)?;
        Ok(match self.order {
            ByteOrder::BigEndian => u32::from_be_bytes(bytes),
            ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
        })
    }

    /// Reads a signed 32-bit integer in the current byte order.
    #[inline]
    pub fn read_i32(&mut self, context: &'static str) -> Result<i32, DecodeError> {
        let bytes = self.read_array(context)?;
        Ok(match self.order {
            ByteOrder::BigEndian => i32::from_be_bytes(bytes),
            ByteOrder::LittleEndian => i32::from_le_bytes(bytes),
        })
    }

    /// Reads an element count, rejecting negative values.
    pub fn read_count(&mut self, field: &'static str) -> Result<usize, DecodeError> {
        let count = self.read_i32(field)?;
        usize::try_from(count).map_err(|_| {
            self.pos -= 4;
            DecodeError::NegativeCount { field, count }
        })
    }

    /// Reads an f64 in the current byte order. NaN is allowed (empty points).
    #[inline]
    pub fn read_f64(&mut self, context: &'static str) -> Result<f64, DecodeError> {
        let bytes = self.read_array(context)?;
        Ok(match self.order {
            ByteOrder::BigEndian => f64::from_be_bytes(bytes),
            ByteOrder::LittleEndian => f64::from_le_bytes(bytes),
        })
    }

    /// Reads `n` consecutive f64 values.
    pub fn read_f64s(&mut self, n: usize, context: &'static str) -> Result<Vec<f64>, DecodeError> {
        if n.saturating_mul(8) > self.remaining_len() {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let mut values = Vec::with_capacity(n);
        for _ in 0..n {
            values.push(self.read_f64(context)?);
        }
        Ok(values)
    }
}

/// Decodes hex text (either case, surrounding whitespace ignored) into bytes.
///
/// On failure the error offset is the character index of the offending
/// character in `text`, or the character count up to the end of the hex
/// digits for odd-length input.
pub fn load_hex(text: &str) -> Result<Vec<u8>, Error> {
    let start = text.len() - text.trim_start().len();
    let leading = text[..start].chars().count();
    let trimmed = text.trim();

    // Past this check byte indices and character indices coincide.
    if let Some((index, found)) = trimmed.chars().enumerate().find(|(_, c)| !c.is_ascii()) {
        let index = leading + index;
        return Err(Error::new(DecodeError::InvalidHexCharacter { found, index }, index));
    }

    hex::decode(trimmed).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { c, index } => Error::new(
            DecodeError::InvalidHexCharacter { found: c, index: leading + index },
            leading + index,
        ),
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => Error::new(
            DecodeError::OddHexLength { len: trimmed.len() },
            leading + trimmed.len(),
        ),
    })
}
