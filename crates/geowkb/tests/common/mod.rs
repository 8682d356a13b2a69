//! Helpers for assembling WKB in integration tests.

#![allow(dead_code)]

pub use geowkb::limits::{M_BIT, SRID_BIT, Z_BIT};

/// Writes WKB fields, little-endian unless built with [`Wkb::big`].
#[derive(Debug, Clone, Default)]
pub struct Wkb {
    buf: Vec<u8>,
    big_endian: bool,
}

impl Wkb {
    pub fn little() -> Self {
        Self::default()
    }

    pub fn big() -> Self {
        Self {
            buf: Vec::new(),
            big_endian: true,
        }
    }

    /// Switches the order used for the following fields.
    pub fn order(mut self, big_endian: bool) -> Self {
        self.big_endian = big_endian;
        self
    }

    pub fn header(mut self, word: u32) -> Self {
        self.buf.push(if self.big_endian { 0 } else { 1 });
        self.u32(word)
    }

    pub fn u32(mut self, value: u32) -> Self {
        let bytes = if self.big_endian { value.to_be_bytes() } else { value.to_le_bytes() };
        self.buf.extend_from_slice(&bytes);
        self
    }

    pub fn i32(mut self, value: i32) -> Self {
        let bytes = if self.big_endian { value.to_be_bytes() } else { value.to_le_bytes() };
        self.buf.extend_from_slice(&bytes);
        self
    }

    pub fn coords(mut self, values: &[f64]) -> Self {
        for v in values {
            let bytes = if self.big_endian { v.to_be_bytes() } else { v.to_le_bytes() };
            self.buf.extend_from_slice(&bytes);
        }
        self
    }

    /// Appends a complete nested node.
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

/// Type word for `kind` under one of the three dimension encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Legacy,
    Flags,
}

/// Builds the type word of `kind` with dimension `dim` (0 = XY, 1 = Z, 2 = M, 3 = ZM).
pub fn type_word(kind: u32, dim: u32, scheme: Scheme) -> u32 {
    match (dim, scheme) {
        (0, _) => kind,
        (_, Scheme::Legacy) => kind + dim * 1000,
        (1, Scheme::Flags) => kind | Z_BIT,
        (2, Scheme::Flags) => kind | M_BIT,
        (_, Scheme::Flags) => kind | Z_BIT | M_BIT,
    }
}
