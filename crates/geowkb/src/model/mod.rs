//! Data model types for decoded geometries.
//!
//! - Kinds and raw type codes
//! - Dimensionality
//! - Geometry values and the top-level decode result

pub mod dimension;
pub mod geometry;
pub mod kind;

pub use dimension::Dimension;
pub use geometry::{Coord, Decoded, Geometry, LinearRing, PointSequence, Rings, Tagged};
pub use kind::{codes, GeometryKind, ParseKindError, TypeCodeLabel};
