//! Box primitive centered at the origin.

use crate::{Aabb3, Point3, Vec3};
use thiserror::Error;

/// Errors from primitive construction.
#[derive(Error, Debug, PartialEq)]
pub enum PrimitiveError {
    /// A box length was zero, negative or not finite.
    #[error("invalid box length along {axis}: {value}")]
    InvalidLength {
        /// Axis name (`x`, `y` or `z`).
        axis: char,
        /// Offending value.
        value: f64,
    },
}

/// Axis-aligned box centered at the origin, with an accumulated translation.
///
/// Mirrors how CAD workplane boxes are placed: `box(10, 20, 5)` spans
/// `[-5, 5] x [-10, 10] x [-2.5, 2.5]` until it is translated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenteredBox {
    lengths: Vec3,
    offset: Vec3,
}

impl CenteredBox {
    /// Build a box with lengths `(lx, ly, lz)`.
    pub fn new(lx: f64, ly: f64, lz: f64) -> Result<Self, PrimitiveError> {
        for (axis, value) in [('x', lx), ('y', ly), ('z', lz)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PrimitiveError::InvalidLength { axis, value });
            }
        }
        Ok(Self {
            lengths: Vec3::new(lx, ly, lz),
            offset: Vec3::zeros(),
        })
    }

    /// Box lengths along each axis.
    pub fn lengths(&self) -> Vec3 {
        self.lengths
    }

    /// Total translation applied so far.
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// A copy of this box moved by `(dx, dy, dz)`.
    pub fn translate(&self, dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            lengths: self.lengths,
            offset: self.offset + Vec3::new(dx, dy, dz),
        }
    }

    /// Exact bounding box of the solid.
    pub fn bounding_box(&self) -> Aabb3 {
        let half = self.lengths * 0.5;
        Aabb3::new(Point3::from(-half), Point3::from(half)).translated(&self.offset)
    }
}
