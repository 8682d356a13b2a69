//! Geometry kinds and their WKB type codes.

use std::fmt;
use std::str::FromStr;

/// Raw primitive type codes as they appear in the low part of a type word.
///
/// `CURVE` and `SURFACE` are abstract and never produced by writers. `TIN`
/// and `TRIANGLE` are defined by the format but not decoded.
pub mod codes {
    pub const POINT: u32 = 1;
    pub const LINESTRING: u32 = 2;
    pub const POLYGON: u32 = 3;
    pub const MULTIPOINT: u32 = 4;
    pub const MULTILINESTRING: u32 = 5;
    pub const MULTIPOLYGON: u32 = 6;
    pub const GEOMETRYCOLLECTION: u32 = 7;
    pub const CIRCULARSTRING: u32 = 8;
    pub const COMPOUNDCURVE: u32 = 9;
    pub const CURVEPOLYGON: u32 = 10;
    pub const MULTICURVE: u32 = 11;
    pub const MULTISURFACE: u32 = 12;
    pub const CURVE: u32 = 13;
    pub const SURFACE: u32 = 14;
    pub const POLYHEDRALSURFACE: u32 = 15;
    pub const TIN: u32 = 16;
    pub const TRIANGLE: u32 = 17;
}

/// The geometry kinds this crate decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(into = "&'static str"))]
#[repr(u32)]
pub enum GeometryKind {
    Point = codes::POINT,
    LineString = codes::LINESTRING,
    Polygon = codes::POLYGON,
    MultiPoint = codes::MULTIPOINT,
    MultiLineString = codes::MULTILINESTRING,
    MultiPolygon = codes::MULTIPOLYGON,
    GeometryCollection = codes::GEOMETRYCOLLECTION,
    CircularString = codes::CIRCULARSTRING,
    CompoundCurve = codes::COMPOUNDCURVE,
    CurvePolygon = codes::CURVEPOLYGON,
    MultiCurve = codes::MULTICURVE,
    MultiSurface = codes::MULTISURFACE,
    PolyhedralSurface = codes::POLYHEDRALSURFACE,
}

impl GeometryKind {
    /// All decodable kinds, in type-code order.
    pub const ALL: [GeometryKind; 13] = [
        GeometryKind::Point,
        GeometryKind::LineString,
        GeometryKind::Polygon,
        GeometryKind::MultiPoint,
        GeometryKind::MultiLineString,
        GeometryKind::MultiPolygon,
        GeometryKind::GeometryCollection,
        GeometryKind::CircularString,
        GeometryKind::CompoundCurve,
        GeometryKind::CurvePolygon,
        GeometryKind::MultiCurve,
        GeometryKind::MultiSurface,
        GeometryKind::PolyhedralSurface,
    ];

    /// Creates a kind from a primitive type code.
    pub fn from_code(code: u32) -> Option<GeometryKind> {
        match code {
            codes::POINT => Some(GeometryKind::Point),
            codes::LINESTRING => Some(GeometryKind::LineString),
            codes::POLYGON => Some(GeometryKind::Polygon),
            codes::MULTIPOINT => Some(GeometryKind::MultiPoint),
            codes::MULTILINESTRING => Some(GeometryKind::MultiLineString),
            codes::MULTIPOLYGON => Some(GeometryKind::MultiPolygon),
            codes::GEOMETRYCOLLECTION => Some(GeometryKind::GeometryCollection),
            codes::CIRCULARSTRING => Some(GeometryKind::CircularString),
            codes::COMPOUNDCURVE => Some(GeometryKind::CompoundCurve),
            codes::CURVEPOLYGON => Some(GeometryKind::CurvePolygon),
            codes::MULTICURVE => Some(GeometryKind::MultiCurve),
            codes::MULTISURFACE => Some(GeometryKind::MultiSurface),
            codes::POLYHEDRALSURFACE => Some(GeometryKind::PolyhedralSurface),
            _ => None,
        }
    }

    /// Returns the primitive type code.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Returns the upper-case WKT keyword for this kind.
    pub fn name(self) -> &'static str {
        match self {
            GeometryKind::Point => "POINT",
            GeometryKind::LineString => "LINESTRING",
            GeometryKind::Polygon => "POLYGON",
            GeometryKind::MultiPoint => "MULTIPOINT",
            GeometryKind::MultiLineString => "MULTILINESTRING",
            GeometryKind::MultiPolygon => "MULTIPOLYGON",
            GeometryKind::GeometryCollection => "GEOMETRYCOLLECTION",
            GeometryKind::CircularString => "CIRCULARSTRING",
            GeometryKind::CompoundCurve => "COMPOUNDCURVE",
            GeometryKind::CurvePolygon => "CURVEPOLYGON",
            GeometryKind::MultiCurve => "MULTICURVE",
            GeometryKind::MultiSurface => "MULTISURFACE",
            GeometryKind::PolyhedralSurface => "POLYHEDRALSURFACE",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<GeometryKind> for &'static str {
    fn from(kind: GeometryKind) -> Self {
        kind.name()
    }
}

/// Error returned when parsing an unknown kind name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown geometry kind name: {0:?}")]
pub struct ParseKindError(pub String);

impl FromStr for GeometryKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeometryKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

/// Display helper for a primitive type code that may not be decodable.
///
/// Supported kinds print their name; the format's remaining named codes
/// print name and number; anything else prints the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeCodeLabel(pub u32);

impl fmt::Display for TypeCodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(kind) = GeometryKind::from_code(self.0) {
            return f.write_str(kind.name());
        }
        let name = match self.0 {
            codes::CURVE => "CURVE",
            codes::SURFACE => "SURFACE",
            codes::TIN => "TIN",
            codes::TRIANGLE => "TRIANGLE",
            other => return write!(f, "{other}"),
        };
        write!(f, "{name} ({})", self.0)
    }
}
