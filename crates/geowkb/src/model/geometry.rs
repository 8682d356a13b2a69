//! Decoded geometry values.
//!
//! Homogeneous containers hold their members directly. Containers whose
//! members may differ in kind hold [`Tagged`] children that keep the kind
//! read from the stream next to the decoded payload.

use std::fmt;

use crate::model::{Dimension, GeometryKind};

/// A single coordinate: X, Y and then Z and/or M as the dimension dictates.
pub type Coord = Vec<f64>;

/// An ordered sequence of coordinates.
pub type PointSequence = Vec<Coord>;

/// A closed sequence of coordinates bounding a polygon.
///
/// Closure is not checked.
pub type LinearRing = Vec<Coord>;

/// A polygon as its rings, exterior first.
pub type Rings = Vec<LinearRing>;

/// A decoded geometry value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Geometry {
    Point(Coord),
    LineString(PointSequence),
    Polygon(Rings),
    MultiPoint(Vec<Coord>),
    MultiLineString(Vec<PointSequence>),
    MultiPolygon(Vec<Rings>),
    GeometryCollection(Vec<Tagged>),
    CircularString(PointSequence),
    /// Segments are `LineString` or `CircularString`.
    CompoundCurve(Vec<Tagged>),
    /// Rings are `LineString`, `CircularString` or `CompoundCurve`.
    CurvePolygon(Vec<Tagged>),
    /// Members are `LineString`, `CircularString` or `CompoundCurve`.
    MultiCurve(Vec<Tagged>),
    /// Members are `Polygon` or `CurvePolygon`.
    MultiSurface(Vec<Tagged>),
    /// Members are `Polygon`.
    PolyhedralSurface(Vec<Tagged>),
}

impl Geometry {
    /// Returns the kind of this value.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryKind::GeometryCollection,
            Geometry::CircularString(_) => GeometryKind::CircularString,
            Geometry::CompoundCurve(_) => GeometryKind::CompoundCurve,
            Geometry::CurvePolygon(_) => GeometryKind::CurvePolygon,
            Geometry::MultiCurve(_) => GeometryKind::MultiCurve,
            Geometry::MultiSurface(_) => GeometryKind::MultiSurface,
            Geometry::PolyhedralSurface(_) => GeometryKind::PolyhedralSurface,
        }
    }

    /// Returns true if this value has no coordinates.
    ///
    /// An empty point is encoded as a coordinate of NaN ordinates.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(coord) => coord.iter().all(|v| v.is_nan()),
            Geometry::LineString(points)
            | Geometry::CircularString(points)
            | Geometry::MultiPoint(points) => points.is_empty(),
            Geometry::Polygon(rings) | Geometry::MultiLineString(rings) => rings.is_empty(),
            Geometry::MultiPolygon(polygons) => polygons.is_empty(),
            Geometry::GeometryCollection(items)
            | Geometry::CompoundCurve(items)
            | Geometry::CurvePolygon(items)
            | Geometry::MultiCurve(items)
            | Geometry::MultiSurface(items)
            | Geometry::PolyhedralSurface(items) => items.is_empty(),
        }
    }

    /// Detaches the tagged members of a heterogeneous container, leaving it empty.
    fn take_members(&mut self) -> Vec<Tagged> {
        match self {
            Geometry::GeometryCollection(items)
            | Geometry::CompoundCurve(items)
            | Geometry::CurvePolygon(items)
            | Geometry::MultiCurve(items)
            | Geometry::MultiSurface(items)
            | Geometry::PolyhedralSurface(items) => std::mem::take(items),
            _ => Vec::new(),
        }
    }
}

/// A container member together with the kind declared for it in the stream.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tagged {
    pub kind: GeometryKind,
    pub geometry: Geometry,
}

impl Tagged {
    pub fn new(kind: GeometryKind, geometry: Geometry) -> Self {
        Self { kind, geometry }
    }
}

// Nesting depth is input-controlled, so members are torn down from a heap
// worklist rather than through recursive drop glue.
impl Drop for Tagged {
    fn drop(&mut self) {
        let mut pending = self.geometry.take_members();
        while let Some(mut member) = pending.pop() {
            pending.append(&mut member.geometry.take_members());
        }
    }
}

/// The result of decoding one top-level geometry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Decoded {
    /// Kind of the outermost geometry.
    pub kind: GeometryKind,
    /// Spatial reference identifier, present only for EWKB input carrying one.
    pub srid: Option<i32>,
    /// The decoded value.
    pub geometry: Geometry,
    /// Dimensionality shared by every coordinate in the value.
    pub dimension: Dimension,
}

impl Decoded {
    /// Returns `""`, `"Z"`, `"M"` or `"ZM"`.
    pub fn dimension_suffix(&self) -> &'static str {
        self.dimension.suffix()
    }

    /// Returns the number of ordinates per coordinate.
    pub fn arity(&self) -> usize {
        self.dimension.arity()
    }
}

/// Renders the value as (E)WKT, e.g. `SRID=4326;POINT Z (1 2 3)`.
impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(srid) = self.srid {
            write!(f, "SRID={srid};")?;
        }
        f.write_str(self.kind.name())?;
        if self.dimension != Dimension::Xy {
            write!(f, " {}", self.dimension)?;
        }
        f.write_str(" ")?;
        write_body(f, &self.geometry)
    }
}

fn write_body(f: &mut fmt::Formatter<'_>, geometry: &Geometry) -> fmt::Result {
    if geometry.is_empty() {
        return f.write_str("EMPTY");
    }
    match geometry {
        Geometry::Point(coord) => {
            f.write_str("(")?;
            write_coord(f, coord)?;
            f.write_str(")")
        }
        Geometry::LineString(points) | Geometry::CircularString(points) => {
            write_sequence(f, points)
        }
        Geometry::MultiPoint(points) => write_list(f, points, |f, coord| {
            f.write_str("(")?;
            write_coord(f, coord)?;
            f.write_str(")")
        }),
        Geometry::Polygon(rings) | Geometry::MultiLineString(rings) => {
            write_list(f, rings, |f, ring| write_sequence(f, ring))
        }
        Geometry::MultiPolygon(polygons) => write_list(f, polygons, |f, rings| {
            write_list(f, rings, |f, ring| write_sequence(f, ring))
        }),
        Geometry::GeometryCollection(items) => {
            write_list(f, items, |f, item| write_tagged(f, item, false))
        }
        Geometry::CompoundCurve(items)
        | Geometry::CurvePolygon(items)
        | Geometry::MultiCurve(items)
        | Geometry::MultiSurface(items)
        | Geometry::PolyhedralSurface(items) => {
            write_list(f, items, |f, item| write_tagged(f, item, true))
        }
    }
}

/// Inside curve containers, WKT leaves linear members without a keyword.
fn write_tagged(f: &mut fmt::Formatter<'_>, item: &Tagged, implicit_linear: bool) -> fmt::Result {
    let implicit = implicit_linear
        && matches!(item.kind, GeometryKind::LineString | GeometryKind::Polygon);
    if !implicit {
        write!(f, "{} ", item.kind)?;
    }
    write_body(f, &item.geometry)
}

fn write_sequence(f: &mut fmt::Formatter<'_>, points: &[Coord]) -> fmt::Result {
    write_list(f, points, |f, coord| write_coord(f, coord))
}

fn write_list<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    mut write_item: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    f.write_str("(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_item(f, item)?;
    }
    f.write_str(")")
}

fn write_coord(f: &mut fmt::Formatter<'_>, coord: &[f64]) -> fmt::Result {
    for (i, v) in coord.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{v}")?;
    }
    Ok(())
}
