//! Wire constants and decoding limits for WKB/EWKB.
//!
//! The type word carries the primitive kind plus dimension and SRID
//! information in one of two layouts (see [`crate::codec::type_code`]).

/// Byte order marker for big-endian (XDR) nodes.
pub const BYTE_ORDER_BIG: u8 = 0;

/// Byte order marker for little-endian (NDR) nodes.
pub const BYTE_ORDER_LITTLE: u8 = 1;

/// EWKB flag: Z ordinate present.
pub const Z_BIT: u32 = 0x8000_0000;

/// EWKB flag: M ordinate present.
pub const M_BIT: u32 = 0x4000_0000;

/// EWKB flag: SRID follows the type word.
pub const SRID_BIT: u32 = 0x2000_0000;

/// Any of the EWKB high flag bits.
pub const HIGH_FLAG_MASK: u32 = Z_BIT | M_BIT | SRID_BIT;

/// Type words below this value are plain 2D codes with no flags or offsets.
pub const TWO_DIMENSIONAL_THRESHOLD: u32 = 0x20;

/// Type words above this value use the flag layout (kind in the low byte).
pub const FLAG_SCHEME_THRESHOLD: u32 = 0xFFFF;

/// Mask for the primitive kind under the flag layout.
pub const FLAG_SCHEME_KIND_MASK: u32 = 0xFF;

/// Divisor separating kind from dimension offset under the ISO layout.
pub const LEGACY_OFFSET_BASE: u32 = 1000;

/// ISO SQL/MM offset for Z geometries.
pub const LEGACY_Z_OFFSET: u32 = 1000;

/// ISO SQL/MM offset for M geometries.
pub const LEGACY_M_OFFSET: u32 = 2000;

/// ISO SQL/MM offset for ZM geometries.
pub const LEGACY_ZM_OFFSET: u32 = 3000;

/// Size in bytes of one encoded ordinate.
pub const ORDINATE_SIZE: usize = 8;

/// Smallest possible encoded child node: byte order + type word.
pub const MIN_NODE_SIZE: usize = 1 + 4;

/// Nesting limit applied by [`crate::codec::DecodeOptions::strict`].
pub const STRICT_MAX_DEPTH: usize = 64;
