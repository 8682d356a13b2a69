//! Decoder for WKB and EWKB spatial geometry binaries.
//!
//! Well-Known Binary is the geometry encoding used by spatial databases and
//! GIS tooling. This crate turns a WKB or EWKB buffer (or its hex text) into
//! a typed [`Geometry`] value.
//!
//! # Quick Start
//!
//! ```rust
//! use geowkb::{decode_hex, Geometry, GeometryKind};
//!
//! // SRID=4326;POINT(1 2) as written by PostGIS
//! let decoded = decode_hex("0101000020E6100000000000000000F03F0000000000000040").unwrap();
//!
//! assert_eq!(decoded.kind, GeometryKind::Point);
//! assert_eq!(decoded.srid, Some(4326));
//! assert_eq!(decoded.geometry, Geometry::Point(vec![1.0, 2.0]));
//! assert_eq!(decoded.to_string(), "SRID=4326;POINT (1 2)");
//! ```
//!
//! # Modules
//!
//! - [`model`]: Decoded values (Geometry, Tagged, Decoded, Dimension, GeometryKind)
//! - [`codec`]: Byte reader, type word resolution and the geometry decoder
//! - [`error`]: Error types
//! - [`limits`]: Wire constants
//!
//! # Type words
//!
//! Both dimension layouts are accepted:
//! - ISO SQL/MM: `1000`/`2000`/`3000` added to the kind code for Z/M/ZM
//! - EWKB: `0x80000000` (Z), `0x40000000` (M) and `0x20000000` (SRID) flags
//!
//! The outermost type word fixes the dimension for the whole geometry.
//! Curved kinds (CircularString, CompoundCurve, CurvePolygon, MultiCurve,
//! MultiSurface) and PolyhedralSurface are decoded; TIN and Triangle are
//! rejected as unsupported.
//!
//! # Security
//!
//! The decoder is designed to safely handle untrusted input:
//! - Counts are validated and allocations are bounded by the input length
//! - Nesting is walked with a heap stack, so deep input cannot overflow the
//!   thread stack while decoding or dropping; it can also be limited through
//!   [`DecodeOptions`]
//! - Invalid data is rejected with descriptive errors carrying the offset

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types at crate root
pub use codec::{decode, decode_hex, decode_hex_with_options, decode_with_options, DecodeOptions};
pub use error::{DecodeError, Error, ErrorKind, Result};
pub use model::{Coord, Decoded, Dimension, Geometry, GeometryKind, Tagged};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
