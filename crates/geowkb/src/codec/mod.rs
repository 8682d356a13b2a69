//! Binary decoding for WKB/EWKB.
//!
//! The entry points here wrap every failure with the byte offset at which
//! it was detected; the error kind is left as raised.

pub mod geometry;
pub mod primitives;
pub mod type_code;

pub use geometry::{declared_dimension, decode_geometry, DecodeOptions};
pub use primitives::{load_hex, ByteOrder, Reader};

use crate::error::{DecodeError, Error, Result};
use crate::model::Decoded;

/// Decodes one WKB or EWKB geometry from raw bytes.
pub fn decode(input: &[u8]) -> Result<Decoded> {
    decode_with_options(input, &DecodeOptions::default())
}

/// Decodes one geometry from raw bytes with explicit options.
pub fn decode_with_options(input: &[u8], options: &DecodeOptions) -> Result<Decoded> {
    let mut reader = Reader::new(input);
    let decoded = with_position(&mut reader, |reader| decode_geometry(reader, options))?;

    tracing::debug!(
        kind = %decoded.kind,
        srid = ?decoded.srid,
        dimension = decoded.dimension.suffix(),
        consumed = reader.position(),
        "decoded geometry"
    );
    Ok(decoded)
}

/// Decodes one geometry from hex text, as emitted by PostGIS and most GIS tools.
pub fn decode_hex(text: &str) -> Result<Decoded> {
    decode_hex_with_options(text, &DecodeOptions::default())
}

/// Decodes one geometry from hex text with explicit options.
pub fn decode_hex_with_options(text: &str, options: &DecodeOptions) -> Result<Decoded> {
    let bytes = load_hex(text).inspect_err(|error| {
        tracing::debug!(offset = error.offset(), %error, "rejected hex input");
    })?;
    decode_with_options(&bytes, options)
}

/// Runs `f` and attaches the reader's position to any error it returns.
fn with_position<'a, T>(
    reader: &mut Reader<'a>,
    f: impl FnOnce(&mut Reader<'a>) -> std::result::Result<T, DecodeError>,
) -> Result<T> {
    f(reader).map_err(|error| {
        let offset = reader.position();
        tracing::debug!(offset, %error, "failed to decode geometry");
        Error::new(error, offset)
    })
}
