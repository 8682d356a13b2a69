//! Byte builder for hand-assembling WKB in tests.

use crate::codec::primitives::ByteOrder;
use crate::limits::{BYTE_ORDER_BIG, BYTE_ORDER_LITTLE};

/// Writes WKB fields in a fixed byte order.
#[derive(Debug, Clone)]
pub struct WkbBuilder {
    buf: Vec<u8>,
    order: ByteOrder,
}

impl WkbBuilder {
    pub fn little() -> Self {
        Self {
            buf: Vec::new(),
            order: ByteOrder::LittleEndian,
        }
    }

    pub fn big() -> Self {
        Self {
            buf: Vec::new(),
            order: ByteOrder::BigEndian,
        }
    }

    /// Writes a byte order marker followed by a type word.
    pub fn header(mut self, word: u32) -> Self {
        self.buf.push(match self.order {
            ByteOrder::BigEndian => BYTE_ORDER_BIG,
            ByteOrder::LittleEndian => BYTE_ORDER_LITTLE,
        });
        self.word(word)
    }

    pub fn word(mut self, value: u32) -> Self {
        match self.order {
            ByteOrder::BigEndian => self.buf.extend_from_slice(&value.to_be_bytes()),
            ByteOrder::LittleEndian => self.buf.extend_from_slice(&value.to_le_bytes()),
        }
        self
    }

    pub fn count(self, n: u32) -> Self {
        self.word(n)
    }

    pub fn int(mut self, value: i32) -> Self {
        match self.order {
            ByteOrder::BigEndian => self.buf.extend_from_slice(&value.to_be_bytes()),
            ByteOrder::LittleEndian => self.buf.extend_from_slice(&value.to_le_bytes()),
        }
        self
    }

    pub fn coords(mut self, values: &[f64]) -> Self {
        for v in values {
            match self.order {
                ByteOrder::BigEndian => self.buf.extend_from_slice(&v.to_be_bytes()),
                ByteOrder::LittleEndian => self.buf.extend_from_slice(&v.to_le_bytes()),
            }
        }
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}
