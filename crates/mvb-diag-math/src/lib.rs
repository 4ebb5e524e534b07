#![warn(missing_docs)]

//! Math types for the mvb-diag geometry diagnostics.
//!
//! Thin wrappers around nalgebra: point and vector aliases, an axis-aligned
//! bounding box, a centered box primitive and polar conversion for turn
//! coordinates.

pub mod aabb;
pub mod polar;
pub mod primitive;

pub use aabb::Aabb3;
pub use polar::PolarCoord;
pub use primitive::{CenteredBox, PrimitiveError};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = nalgebra::Vector3<f64>;

/// Number of millimetres in a metre. MAS documents store lengths in metres.
pub const MM_PER_M: f64 = 1000.0;
