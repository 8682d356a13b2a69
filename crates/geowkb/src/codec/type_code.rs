//! Resolution of WKB type words.
//!
//! A type word selects the primitive kind, the coordinate dimension and
//! (for EWKB) whether an SRID follows. Two layouts are in use:
//!
//! - ISO SQL/MM adds 1000 (Z), 2000 (M) or 3000 (ZM) to the kind code.
//! - EWKB keeps the kind in the low byte and sets [`Z_BIT`], [`M_BIT`] and
//!   [`SRID_BIT`] in the high bits.
//!
//! Words below `0x20` are plain 2D codes under either layout. All functions
//! here are pure.

use crate::error::DecodeError;
use crate::limits::{
    FLAG_SCHEME_KIND_MASK, FLAG_SCHEME_THRESHOLD, HIGH_FLAG_MASK, LEGACY_M_OFFSET,
    LEGACY_OFFSET_BASE, LEGACY_Z_OFFSET, LEGACY_ZM_OFFSET, M_BIT, TWO_DIMENSIONAL_THRESHOLD, Z_BIT,
};
use crate::model::{Dimension, GeometryKind};

/// Returns true if the word is a bare 2D code with no flags or offset.
#[inline]
pub fn is_two_dimensional(word: u32) -> bool {
    word < TWO_DIMENSIONAL_THRESHOLD
}

/// Extracts the primitive kind code from a type word.
#[inline]
pub fn primitive_kind(word: u32) -> u32 {
    if is_two_dimensional(word) {
        word
    } else if word > FLAG_SCHEME_THRESHOLD {
        word & FLAG_SCHEME_KIND_MASK
    } else {
        word % LEGACY_OFFSET_BASE
    }
}

/// Extracts the raw dimension marker of a type word.
///
/// Returns `None` for bare 2D codes, the Z/M flag bits for EWKB words, and
/// the thousands offset for ISO words. The result is meant to be fed to
/// [`dimension_from_bits`] and [`with_dimension`].
#[inline]
pub fn dimension_marker_bits(word: u32) -> Option<u32> {
    if is_two_dimensional(word) {
        None
    } else if word & HIGH_FLAG_MASK != 0 {
        Some(word & (Z_BIT | M_BIT))
    } else {
        Some(word - word % LEGACY_OFFSET_BASE)
    }
}

/// Maps a dimension marker to a [`Dimension`].
///
/// A zero marker (an EWKB word carrying only the SRID flag) is 2D.
/// `kind_code` only serves the error message.
pub fn dimension_from_bits(kind_code: u32, bits: Option<u32>) -> Result<Dimension, DecodeError> {
    const ZM_BITS: u32 = Z_BIT | M_BIT;
    match bits {
        None | Some(0) => Ok(Dimension::Xy),
        Some(LEGACY_Z_OFFSET) | Some(Z_BIT) => Ok(Dimension::Z),
        Some(LEGACY_M_OFFSET) | Some(M_BIT) => Ok(Dimension::M),
        Some(LEGACY_ZM_OFFSET) | Some(ZM_BITS) => Ok(Dimension::Zm),
        Some(bits) => Err(DecodeError::UnsupportedDimension { kind_code, bits }),
    }
}

/// Rebuilds the type word a child of `kind_code` carries under the given
/// dimension marker.
///
/// Flag markers are OR-ed in; ISO offsets are added.
#[inline]
pub fn with_dimension(kind_code: u32, bits: Option<u32>) -> u32 {
    match bits {
        Some(bits) if bits & (Z_BIT | M_BIT) != 0 => kind_code | bits,
        Some(bits) => kind_code.wrapping_add(bits),
        None => kind_code,
    }
}

/// Returns true if every bit of `flag` is set in `word`.
#[inline]
pub fn has_flag(word: u32, flag: u32) -> bool {
    word & flag == flag
}

/// Resolves the decodable kind of a type word.
pub fn geometry_kind(word: u32) -> Result<GeometryKind, DecodeError> {
    let type_code = primitive_kind(word);
    GeometryKind::from_code(type_code).ok_or(DecodeError::UnsupportedType { type_code })
}
