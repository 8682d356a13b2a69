//! Simple inspector for WKB/EWKB values.
//!
//! Usage: `cargo run --example inspect_wkb -- <hex | path-to-binary-file>`

use std::fs;
use std::path::Path;

use geowkb::{decode, decode_hex, Decoded, Geometry, Tagged};

fn count_coords(geometry: &Geometry) -> usize {
    fn tagged(items: &[Tagged]) -> usize {
        items.iter().map(|t| count_coords(&t.geometry)).sum()
    }
    match geometry {
        Geometry::Point(_) => usize::from(!geometry.is_empty()),
        Geometry::LineString(points)
        | Geometry::CircularString(points)
        | Geometry::MultiPoint(points) => points.len(),
        Geometry::Polygon(rings) | Geometry::MultiLineString(rings) => {
            rings.iter().map(Vec::len).sum()
        }
        Geometry::MultiPolygon(polygons) => polygons.iter().flatten().map(Vec::len).sum(),
        Geometry::GeometryCollection(items)
        | Geometry::CompoundCurve(items)
        | Geometry::CurvePolygon(items)
        | Geometry::MultiCurve(items)
        | Geometry::MultiSurface(items)
        | Geometry::PolyhedralSurface(items) => tagged(items),
    }
}

fn print_members(geometry: &Geometry, indent: usize) {
    let items = match geometry {
        Geometry::GeometryCollection(items)
        | Geometry::CompoundCurve(items)
        | Geometry::CurvePolygon(items)
        | Geometry::MultiCurve(items)
        | Geometry::MultiSurface(items)
        | Geometry::PolyhedralSurface(items) => items,
        _ => return,
    };
    for (i, item) in items.iter().enumerate() {
        println!(
            "{:indent$}[{}] {} ({} coords)",
            "",
            i,
            item.kind,
            count_coords(&item.geometry),
            indent = indent
        );
        print_members(&item.geometry, indent + 2);
    }
}

fn main() {
    let arg = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "0101000020E6100000000000000000F03F0000000000000040".to_string());

    let result = if Path::new(&arg).is_file() {
        let data = fs::read(&arg).expect("Failed to read file");
        println!("File size: {} bytes", data.len());
        decode(&data)
    } else {
        decode_hex(&arg)
    };

    let decoded: Decoded = match result {
        Ok(decoded) => decoded,
        Err(err) => {
            eprintln!("error ({}): {}", err.kind(), err);
            std::process::exit(1);
        }
    };

    println!("\n=== Geometry ===");
    println!("Kind: {}", decoded.kind);
    match decoded.srid {
        Some(srid) => println!("SRID: {}", srid),
        None => println!("SRID: none"),
    }
    println!(
        "Dimension: {:?} ({} ordinates, z: {}, m: {})",
        decoded.dimension,
        decoded.arity(),
        decoded.dimension.has_z(),
        decoded.dimension.has_m()
    );
    println!("Coordinates: {}", count_coords(&decoded.geometry));

    println!("\n=== Members ===");
    print_members(&decoded.geometry, 2);

    let wkt = decoded.to_string();
    println!("\n=== WKT ===");
    if wkt.len() > 200 {
        println!("{}...", &wkt[..200]);
    } else {
        println!("{}", wkt);
    }
}
