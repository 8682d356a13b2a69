//! Error types for WKB/EWKB decoding.

use std::fmt;

use thiserror::Error;

use crate::model::{GeometryKind, TypeCodeLabel};

/// Broad classification of a failure.
///
/// Every [`DecodeError`] belongs to exactly one kind, and wrapping it with
/// position information never changes the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller handed in input of the wrong shape (e.g. malformed hex text).
    InvalidArgument,
    /// The byte stream contained a value the decoder cannot accept.
    UnexpectedValue,
}

impl ErrorKind {
    /// Returns a stable identifier for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid-argument",
            ErrorKind::UnexpectedValue => "unexpected-value",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error raised while loading or decoding a geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    // === Invalid argument ===
    #[error("invalid hex character {found:?} at index {index}")]
    InvalidHexCharacter { found: char, index: usize },

    #[error("hex input has odd length {len}")]
    OddHexLength { len: usize },

    // === Unexpected value ===
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("invalid byte order marker {marker:#04x} (expected 0x00 or 0x01)")]
    InvalidByteOrder { marker: u8 },

    #[error("{field} must be a non-negative integer, found {count}")]
    NegativeCount { field: &'static str, count: i32 },

    #[error("unsupported geometry type {}", type_label(.type_code))]
    UnsupportedType { type_code: u32 },

    #[error(
        "unsupported dimension for {}: bits {bits:#x}",
        type_label(.kind_code)
    )]
    UnsupportedDimension { kind_code: u32, bits: u32 },

    #[error(
        "unexpected {} (dimension bits {}) in {container}, expected {}",
        type_label(.found),
        bits_label(.found_bits),
        kind_list(.expected)
    )]
    UnexpectedChild {
        container: GeometryKind,
        found: u32,
        found_bits: Option<u32>,
        expected: &'static [GeometryKind],
    },

    #[error(
        "bad dimension for {found} in {container}: dimension bits {}, expected {} with dimension bits {}",
        bits_label(.found_bits),
        kind_list(.expected),
        bits_label(.expected_bits)
    )]
    ChildDimensionMismatch {
        container: GeometryKind,
        found: GeometryKind,
        found_bits: Option<u32>,
        expected_bits: Option<u32>,
        expected: &'static [GeometryKind],
    },

    #[error("geometry nesting exceeds maximum depth {max}")]
    DepthExceeded { max: usize },

    #[error("{remaining} trailing bytes after geometry")]
    TrailingBytes { remaining: usize },
}

impl DecodeError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::InvalidHexCharacter { .. } | DecodeError::OddHexLength { .. } => {
                ErrorKind::InvalidArgument
            }
            _ => ErrorKind::UnexpectedValue,
        }
    }
}

/// A [`DecodeError`] annotated with the byte offset at which it was detected.
///
/// This is the error returned by the public entry points. For hex input the
/// offset counts hex characters when the failure happened while loading the
/// text, and decoded bytes otherwise.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error} at byte offset {offset}")]
pub struct Error {
    #[source]
    error: DecodeError,
    offset: usize,
}

impl Error {
    pub(crate) fn new(error: DecodeError, offset: usize) -> Self {
        Self { error, offset }
    }

    /// Returns the kind of the underlying error.
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    /// Returns the offset at which decoding stopped.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the underlying error.
    pub fn error(&self) -> &DecodeError {
        &self.error
    }

    /// Consumes the wrapper, returning the underlying error.
    pub fn into_inner(self) -> DecodeError {
        self.error
    }
}

/// Result type for the public decoding API.
pub type Result<T> = std::result::Result<T, Error>;

fn type_label(code: &u32) -> TypeCodeLabel {
    TypeCodeLabel(*code)
}

fn bits_label(bits: &Option<u32>) -> String {
    match bits {
        Some(bits) => format!("{bits:#x}"),
        None => "none".to_string(),
    }
}

fn kind_list(kinds: &[GeometryKind]) -> String {
    kinds
        .iter()
        .map(|k| k.name())
        .collect::<Vec<_>>()
        .join(" or ")
}
