//! Geometry decoding for WKB/EWKB.
//!
//! Decoding is a single depth-first pass. The outermost node fixes the
//! dimension for the whole stream; nested nodes only contribute their kind.

use crate::codec::primitives::Reader;
use crate::codec::type_code::{
    dimension_from_bits, dimension_marker_bits, geometry_kind, has_flag, primitive_kind,
    with_dimension,
};
use crate::error::DecodeError;
use crate::limits::{MIN_NODE_SIZE, ORDINATE_SIZE, SRID_BIT, STRICT_MAX_DEPTH};
use crate::model::{Coord, Decoded, Dimension, Geometry, GeometryKind, PointSequence, Rings, Tagged};

const POINT_MEMBERS: &[GeometryKind] = &[GeometryKind::Point];
const LINESTRING_MEMBERS: &[GeometryKind] = &[GeometryKind::LineString];
const POLYGON_MEMBERS: &[GeometryKind] = &[GeometryKind::Polygon];
const SEGMENT_MEMBERS: &[GeometryKind] = &[GeometryKind::LineString, GeometryKind::CircularString];
const CURVE_MEMBERS: &[GeometryKind] = &[
    GeometryKind::LineString,
    GeometryKind::CircularString,
    GeometryKind::CompoundCurve,
];
const SURFACE_MEMBERS: &[GeometryKind] = &[GeometryKind::Polygon, GeometryKind::CurvePolygon];

/// Options for decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum container nesting. `None` bounds nesting only by input size.
    pub max_depth: Option<usize>,
    /// Whether bytes may follow the geometry.
    pub allow_trailing_bytes: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            allow_trailing_bytes: true,
        }
    }
}

impl DecodeOptions {
    /// Creates default options: unlimited nesting, trailing bytes ignored.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that bound nesting and reject trailing bytes.
    pub fn strict() -> Self {
        Self {
            max_depth: Some(STRICT_MAX_DEPTH),
            allow_trailing_bytes: false,
        }
    }

    /// Sets the maximum container nesting. `None` removes the bound.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets whether bytes may follow the geometry.
    pub fn with_trailing_bytes(mut self, allow: bool) -> Self {
        self.allow_trailing_bytes = allow;
        self
    }
}

/// State fixed by the outermost node and shared by every nested node.
#[derive(Debug, Clone, Copy)]
struct Session {
    dimension_bits: Option<u32>,
    arity: usize,
    max_depth: Option<usize>,
}

impl Session {
    fn descend(&self, depth: usize) -> Result<usize, DecodeError> {
        let depth = depth + 1;
        match self.max_depth {
            Some(max) if depth > max => Err(DecodeError::DepthExceeded { max }),
            _ => Ok(depth),
        }
    }
}

// =============================================================================
// ENTRY
// =============================================================================

/// Decodes one geometry starting at the reader's position.
///
/// Errors are returned without position information; the public entry
/// points in [`crate::codec`] attach the offset.
pub fn decode_geometry(reader: &mut Reader<'_>, options: &DecodeOptions) -> Result<Decoded, DecodeError> {
    reader.read_byte_order()?;
    let word = reader.read_u32("geometry type")?;

    let srid = if has_flag(word, SRID_BIT) {
        Some(reader.read_i32("srid")?)
    } else {
        None
    };

    let dimension_bits = dimension_marker_bits(word);
    let dimension = dimension_from_bits(primitive_kind(word), dimension_bits)?;
    let kind = geometry_kind(word)?;
    tracing::trace!(order = ?reader.byte_order(), word, ?srid, "read geometry header");

    let session = Session {
        dimension_bits,
        arity: dimension.arity(),
        max_depth: options.max_depth,
    };
    let geometry = decode_body(reader, &session, kind)?;

    if !options.allow_trailing_bytes && !reader.is_empty() {
        return Err(DecodeError::TrailingBytes {
            remaining: reader.remaining_len(),
        });
    }

    Ok(Decoded {
        kind,
        srid,
        geometry,
        dimension,
    })
}

/// Returns the dimension a type word declares, without reading anything.
pub fn declared_dimension(word: u32) -> Result<Dimension, DecodeError> {
    dimension_from_bits(primitive_kind(word), dimension_marker_bits(word))
}

// =============================================================================
// DISPATCH
// =============================================================================

/// A heterogeneous container whose members are still being read.
struct Frame {
    container: GeometryKind,
    /// Kinds accepted for members; `None` accepts any kind (geometry collection).
    allowed: Option<&'static [GeometryKind]>,
    build: fn(Vec<Tagged>) -> Geometry,
    count: usize,
    members: Vec<Tagged>,
}

impl Frame {
    fn is_complete(&self) -> bool {
        self.members.len() == self.count
    }

    /// Reads the next member's header and returns its kind.
    fn next_member(&self, reader: &mut Reader<'_>, session: &Session) -> Result<GeometryKind, DecodeError> {
        match self.allowed {
            Some(allowed) => read_member_header(reader, session, self.container, allowed),
            None => {
                // Collection members only pick their kind; the dimension stays
                // the one declared by the outermost node.
                reader.read_byte_order()?;
                let word = reader.read_u32("member type")?;
                geometry_kind(word)
            }
        }
    }

    fn finish(self) -> Geometry {
        (self.build)(self.members)
    }
}

enum Node {
    Complete(Geometry),
    Open(Frame),
}

/// Decodes the body of a `kind` node and everything nested in it.
///
/// Heterogeneous containers are walked with an explicit stack of open
/// frames, so nesting depth is bounded by the input rather than the thread
/// stack.
fn decode_body(reader: &mut Reader<'_>, session: &Session, kind: GeometryKind) -> Result<Geometry, DecodeError> {
    let mut open: Vec<Frame> = Vec::new();
    let mut kind = kind;
    loop {
        let mut finished = match open_node(reader, session, kind, open.len())? {
            Node::Complete(geometry) => geometry,
            Node::Open(frame) if frame.is_complete() => frame.finish(),
            Node::Open(frame) => {
                kind = frame.next_member(reader, session)?;
                open.push(frame);
                continue;
            }
        };

        loop {
            let Some(mut parent) = open.pop() else {
                return Ok(finished);
            };
            parent.members.push(Tagged::new(finished.kind(), finished));
            if parent.is_complete() {
                finished = parent.finish();
                continue;
            }
            kind = parent.next_member(reader, session)?;
            open.push(parent);
            break;
        }
    }
}

/// Decodes a node that has no tagged members, or reads the member count of
/// one that does and returns it as an open frame.
fn open_node(
    reader: &mut Reader<'_>,
    session: &Session,
    kind: GeometryKind,
    depth: usize,
) -> Result<Node, DecodeError> {
    let geometry = match kind {
        GeometryKind::Point => Geometry::Point(decode_point(reader, session)?),
        GeometryKind::LineString => Geometry::LineString(decode_point_sequence(reader, session)?),
        GeometryKind::CircularString => {
            Geometry::CircularString(decode_point_sequence(reader, session)?)
        }
        GeometryKind::Polygon => Geometry::Polygon(decode_rings(reader, session)?),
        GeometryKind::MultiPoint => Geometry::MultiPoint(decode_members(
            reader,
            session,
            depth,
            GeometryKind::MultiPoint,
            POINT_MEMBERS,
            decode_point,
        )?),
        GeometryKind::MultiLineString => Geometry::MultiLineString(decode_members(
            reader,
            session,
            depth,
            GeometryKind::MultiLineString,
            LINESTRING_MEMBERS,
            decode_point_sequence,
        )?),
        GeometryKind::MultiPolygon => Geometry::MultiPolygon(decode_members(
            reader,
            session,
            depth,
            GeometryKind::MultiPolygon,
            POLYGON_MEMBERS,
            decode_rings,
        )?),
        GeometryKind::GeometryCollection => {
            return open_frame(reader, session, depth, kind, None, Geometry::GeometryCollection);
        }
        GeometryKind::CompoundCurve => {
            return open_frame(reader, session, depth, kind, Some(SEGMENT_MEMBERS), Geometry::CompoundCurve);
        }
        GeometryKind::CurvePolygon => {
            return open_frame(reader, session, depth, kind, Some(CURVE_MEMBERS), Geometry::CurvePolygon);
        }
        GeometryKind::MultiCurve => {
            return open_frame(reader, session, depth, kind, Some(CURVE_MEMBERS), Geometry::MultiCurve);
        }
        GeometryKind::MultiSurface => {
            return open_frame(reader, session, depth, kind, Some(SURFACE_MEMBERS), Geometry::MultiSurface);
        }
        GeometryKind::PolyhedralSurface => {
            return open_frame(
                reader,
                session,
                depth,
                kind,
                Some(POLYGON_MEMBERS),
                Geometry::PolyhedralSurface,
            );
        }
    };
    Ok(Node::Complete(geometry))
}

// =============================================================================
// TERMINAL NODES
// =============================================================================

fn decode_point(reader: &mut Reader<'_>, session: &Session) -> Result<Coord, DecodeError> {
    reader.read_f64s(session.arity, "point")
}

fn decode_point_sequence(reader: &mut Reader<'_>, session: &Session) -> Result<PointSequence, DecodeError> {
    let count = reader.read_count("point count")?;
    let mut points = Vec::with_capacity(bounded_capacity(
        reader,
        count,
        session.arity * ORDINATE_SIZE,
    ));
    for _ in 0..count {
        points.push(decode_point(reader, session)?);
    }
    Ok(points)
}

fn decode_rings(reader: &mut Reader<'_>, session: &Session) -> Result<Rings, DecodeError> {
    let count = reader.read_count("ring count")?;
    let mut rings = Vec::with_capacity(bounded_capacity(reader, count, 4));
    for _ in 0..count {
        rings.push(decode_point_sequence(reader, session)?);
    }
    Ok(rings)
}

// =============================================================================
// CONTAINERS
// =============================================================================

/// Decodes a homogeneous container whose members all have the same kind.
fn decode_members<T>(
    reader: &mut Reader<'_>,
    session: &Session,
    depth: usize,
    container: GeometryKind,
    allowed: &'static [GeometryKind],
    decode_member: fn(&mut Reader<'_>, &Session) -> Result<T, DecodeError>,
) -> Result<Vec<T>, DecodeError> {
    let count = reader.read_count("member count")?;
    session.descend(depth)?;
    tracing::trace!(%container, count, "decoding members");

    let mut members = Vec::with_capacity(bounded_capacity(reader, count, MIN_NODE_SIZE));
    for _ in 0..count {
        read_member_header(reader, session, container, allowed)?;
        members.push(decode_member(reader, session)?);
    }
    Ok(members)
}

/// Reads the member count of a container whose members may differ in kind.
fn open_frame(
    reader: &mut Reader<'_>,
    session: &Session,
    depth: usize,
    container: GeometryKind,
    allowed: Option<&'static [GeometryKind]>,
    build: fn(Vec<Tagged>) -> Geometry,
) -> Result<Node, DecodeError> {
    let context = match allowed {
        Some(_) => "member count",
        None => "geometry count",
    };
    let count = reader.read_count(context)?;
    let depth = session.descend(depth)?;
    tracing::trace!(%container, count, depth, "decoding tagged members");

    Ok(Node::Open(Frame {
        container,
        allowed,
        build,
        count,
        members: Vec::with_capacity(bounded_capacity(reader, count, MIN_NODE_SIZE)),
    }))
}

/// Reads a member's byte order and type word and checks it against the
/// kinds the container accepts, at the stream's dimension.
fn read_member_header(
    reader: &mut Reader<'_>,
    session: &Session,
    container: GeometryKind,
    allowed: &'static [GeometryKind],
) -> Result<GeometryKind, DecodeError> {
    reader.read_byte_order()?;
    let word = reader.read_u32("member type")?;

    if let Some(kind) = allowed
        .iter()
        .copied()
        .find(|kind| word == with_dimension(kind.code(), session.dimension_bits))
    {
        return Ok(kind);
    }

    let found = primitive_kind(word);
    let found_bits = dimension_marker_bits(word);
    match allowed.iter().copied().find(|kind| kind.code() == found) {
        Some(kind) => Err(DecodeError::ChildDimensionMismatch {
            container,
            found: kind,
            found_bits,
            expected_bits: session.dimension_bits,
            expected: allowed,
        }),
        None => Err(DecodeError::UnexpectedChild {
            container,
            found,
            found_bits,
            expected: allowed,
        }),
    }
}

/// Caps a declared element count by what the remaining input could hold.
fn bounded_capacity(reader: &Reader<'_>, count: usize, min_element_size: usize) -> usize {
    count.min(reader.remaining_len() / min_element_size.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::{M_BIT, Z_BIT};
    use crate::model::codes;
    use crate::testing::WkbBuilder;

    fn decode(bytes: &[u8]) -> Result<Decoded, DecodeError> {
        decode_geometry(&mut Reader::new(bytes), &DecodeOptions::default())
    }

    #[test]
    fn test_point_2d() {
        let bytes = WkbBuilder::little().header(codes::POINT).coords(&[1.0, 2.0]).build();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.kind, GeometryKind::Point);
        assert_eq!(decoded.srid, None);
        assert_eq!(decoded.geometry, Geometry::Point(vec![1.0, 2.0]));
        assert_eq!(decoded.dimension_suffix(), "");
    }

    #[test]
    fn test_point_big_endian_zm() {
        let bytes = WkbBuilder::big()
            .header(codes::POINT + 3000)
            .coords(&[1.0, 2.0, 3.0, 4.0])
            .build();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.dimension, Dimension::Zm);
        assert_eq!(decoded.geometry, Geometry::Point(vec![1.0, 2.0, 3.0, 4.0]));
    }

    #[test]
    fn test_polygon_rings() {
        let bytes = WkbBuilder::little()
            .header(codes::POLYGON)
            .count(2)
            .count(4)
            .coords(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0])
            .count(0)
            .build();
        let decoded = decode(&bytes).unwrap();
        let Geometry::Polygon(rings) = decoded.geometry else {
            panic!("expected polygon");
        };
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0].len(), 4);
        assert_eq!(rings[0][2], vec![1.0, 1.0]);
        assert!(rings[1].is_empty());
    }

    #[test]
    fn test_multipoint_members_inherit_flag_dimension() {
        let bytes = WkbBuilder::little()
            .header(Z_BIT | codes::MULTIPOINT)
            .count(2)
            .header(Z_BIT | codes::POINT)
            .coords(&[1.0, 2.0, 3.0])
            .header(Z_BIT | codes::POINT)
            .coords(&[4.0, 5.0, 6.0])
            .build();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(
            decoded.geometry,
            Geometry::MultiPoint(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
        );
    }

    #[test]
    fn test_multipoint_member_dimension_mismatch() {
        let bytes = WkbBuilder::little()
            .header(1004)
            .count(1)
            .header(codes::POINT)
            .coords(&[1.0, 2.0])
            .build();
        let result = decode(&bytes);
        assert!(matches!(
            result,
            Err(DecodeError::ChildDimensionMismatch {
                container: GeometryKind::MultiPoint,
                found: GeometryKind::Point,
                found_bits: None,
                expected_bits: Some(1000),
                ..
            })
        ));
    }

    #[test]
    fn test_multipolygon() {
        let bytes = WkbBuilder::little()
            .header(codes::MULTIPOLYGON)
            .count(1)
            .header(codes::POLYGON)
            .count(1)
            .count(3)
            .coords(&[0.0, 0.0, 1.0, 0.0, 0.0, 0.0])
            .build();
        let decoded = decode(&bytes).unwrap();
        let Geometry::MultiPolygon(polygons) = decoded.geometry else {
            panic!("expected multipolygon");
        };
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0][0].len(), 3);
    }

    #[test]
    fn test_compound_curve_segments_are_tagged() {
        let bytes = WkbBuilder::little()
            .header(codes::COMPOUNDCURVE)
            .count(2)
            .header(codes::CIRCULARSTRING)
            .count(3)
            .coords(&[0.0, 0.0, 1.0, 1.0, 2.0, 0.0])
            .header(codes::LINESTRING)
            .count(2)
            .coords(&[2.0, 0.0, 3.0, 0.0])
            .build();
        let decoded = decode(&bytes).unwrap();
        let Geometry::CompoundCurve(segments) = decoded.geometry else {
            panic!("expected compound curve");
        };
        assert_eq!(segments[0].kind, GeometryKind::CircularString);
        assert_eq!(segments[1].kind, GeometryKind::LineString);
        assert_eq!(
            segments[1].geometry,
            Geometry::LineString(vec![vec![2.0, 0.0], vec![3.0, 0.0]])
        );
    }

    #[test]
    fn test_compound_curve_rejects_nested_compound() {
        let bytes = WkbBuilder::little()
            .header(codes::COMPOUNDCURVE)
            .count(1)
            .header(codes::COMPOUNDCURVE)
            .count(0)
            .build();
        let result = decode(&bytes);
        assert!(matches!(
            result,
            Err(DecodeError::UnexpectedChild {
                container: GeometryKind::CompoundCurve,
                found: codes::COMPOUNDCURVE,
                ..
            })
        ));
    }

    #[test]
    fn test_curve_polygon_with_compound_ring() {
        let bytes = WkbBuilder::little()
            .header(M_BIT | codes::CURVEPOLYGON)
            .count(1)
            .header(M_BIT | codes::COMPOUNDCURVE)
            .count(1)
            .header(M_BIT | codes::LINESTRING)
            .count(2)
            .coords(&[0.0, 0.0, 7.0, 1.0, 1.0, 8.0])
            .build();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.dimension, Dimension::M);
        let Geometry::CurvePolygon(rings) = decoded.geometry else {
            panic!("expected curve polygon");
        };
        assert_eq!(rings[0].kind, GeometryKind::CompoundCurve);
        let Geometry::CompoundCurve(segments) = &rings[0].geometry else {
            panic!("expected compound curve ring");
        };
        assert_eq!(
            segments[0].geometry,
            Geometry::LineString(vec![vec![0.0, 0.0, 7.0], vec![1.0, 1.0, 8.0]])
        );
    }

    #[test]
    fn test_multi_surface_members() {
        let bytes = WkbBuilder::little()
            .header(codes::MULTISURFACE)
            .count(2)
            .header(codes::POLYGON)
            .count(0)
            .header(codes::CURVEPOLYGON)
            .count(0)
            .build();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(
            decoded.geometry,
            Geometry::MultiSurface(vec![
                Tagged::new(GeometryKind::Polygon, Geometry::Polygon(vec![])),
                Tagged::new(GeometryKind::CurvePolygon, Geometry::CurvePolygon(vec![])),
            ])
        );
    }

    #[test]
    fn test_polyhedral_surface_accepts_only_polygons() {
        let bytes = WkbBuilder::little()
            .header(codes::POLYHEDRALSURFACE)
            .count(1)
            .header(codes::TRIANGLE)
            .count(0)
            .build();
        let result = decode(&bytes);
        assert!(matches!(
            result,
            Err(DecodeError::UnexpectedChild {
                container: GeometryKind::PolyhedralSurface,
                found: codes::TRIANGLE,
                ..
            })
        ));
    }

    #[test]
    fn test_collection_ignores_member_dimension_bits() {
        let bytes = WkbBuilder::little()
            .header(1007)
            .count(1)
            .header(codes::POINT)
            .coords(&[1.0, 2.0, 3.0])
            .build();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(
            decoded.geometry,
            Geometry::GeometryCollection(vec![Tagged::new(
                GeometryKind::Point,
                Geometry::Point(vec![1.0, 2.0, 3.0])
            )])
        );
    }

    #[test]
    fn test_unsupported_top_level_kinds() {
        for code in [codes::TIN, codes::TRIANGLE, codes::CURVE, codes::SURFACE, 0, 99] {
            let bytes = WkbBuilder::little().header(code).count(0).build();
            assert!(
                matches!(decode(&bytes), Err(DecodeError::UnsupportedType { type_code }) if type_code == code),
                "code {code}"
            );
        }
    }

    #[test]
    fn test_srid_read_before_body() {
        let bytes = WkbBuilder::little()
            .header(SRID_BIT | Z_BIT | codes::POINT)
            .int(3857)
            .coords(&[1.0, 2.0, 3.0])
            .build();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.srid, Some(3857));
        assert_eq!(decoded.dimension, Dimension::Z);
    }

    #[test]
    fn test_negative_count() {
        let bytes = WkbBuilder::little().header(codes::LINESTRING).int(-2).build();
        assert!(matches!(
            decode(&bytes),
            Err(DecodeError::NegativeCount { count: -2, .. })
        ));
    }

    #[test]
    fn test_huge_count_fails_without_allocating() {
        let bytes = WkbBuilder::little().header(codes::LINESTRING).int(i32::MAX).build();
        assert!(matches!(
            decode(&bytes),
            Err(DecodeError::UnexpectedEof { context: "point" })
        ));
    }

    #[test]
    fn test_max_depth() {
        let bytes = WkbBuilder::little()
            .header(codes::GEOMETRYCOLLECTION)
            .count(1)
            .header(codes::GEOMETRYCOLLECTION)
            .count(0)
            .build();
        let options = DecodeOptions::new().with_max_depth(Some(1));
        let result = decode_geometry(&mut Reader::new(&bytes), &options);
        assert!(matches!(result, Err(DecodeError::DepthExceeded { max: 1 })));

        let options = DecodeOptions::new().with_max_depth(Some(2));
        assert!(decode_geometry(&mut Reader::new(&bytes), &options).is_ok());
    }

    #[test]
    fn test_trailing_bytes() {
        let mut bytes = WkbBuilder::little().header(codes::POINT).coords(&[1.0, 2.0]).build();
        bytes.push(0xFF);

        assert!(decode(&bytes).is_ok());
        let result = decode_geometry(&mut Reader::new(&bytes), &DecodeOptions::strict());
        assert!(matches!(result, Err(DecodeError::TrailingBytes { remaining: 1 })));
    }

    #[test]
    fn test_declared_dimension() {
        assert_eq!(declared_dimension(2001).unwrap(), Dimension::M);
        assert_eq!(declared_dimension(M_BIT | 1).unwrap(), Dimension::M);
        assert!(declared_dimension(5001).is_err());
    }
}
