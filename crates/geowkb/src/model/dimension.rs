//! Coordinate dimensionality.

use std::fmt;

/// Which ordinates follow X and Y in every coordinate of a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Dimension {
    /// X and Y only.
    #[default]
    Xy,
    /// X, Y and elevation.
    Z,
    /// X, Y and measure.
    M,
    /// X, Y, elevation and measure.
    Zm,
}

impl Dimension {
    /// Returns the WKT dimension suffix: `""`, `"Z"`, `"M"` or `"ZM"`.
    pub fn suffix(self) -> &'static str {
        match self {
            Dimension::Xy => "",
            Dimension::Z => "Z",
            Dimension::M => "M",
            Dimension::Zm => "ZM",
        }
    }

    /// Returns the number of ordinates per coordinate.
    pub fn arity(self) -> usize {
        2 + self.suffix().len()
    }

    /// Returns true if coordinates carry an elevation.
    pub fn has_z(self) -> bool {
        matches!(self, Dimension::Z | Dimension::Zm)
    }

    /// Returns true if coordinates carry a measure.
    pub fn has_m(self) -> bool {
        matches!(self, Dimension::M | Dimension::Zm)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}
