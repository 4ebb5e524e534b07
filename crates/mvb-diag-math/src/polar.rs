//! Polar conversion for planar turn coordinates.

/// A 2D point expressed as radius and angle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarCoord {
    /// Distance from the origin, in the input units.
    pub radius: f64,
    /// Angle from the +X axis in degrees, in `(-180, 180]`.
    pub angle_deg: f64,
}

impl PolarCoord {
    /// Convert cartesian `(x, y)` to polar.
    pub fn from_xy(x: f64, y: f64) -> Self {
        Self {
            radius: x.hypot(y),
            angle_deg: y.atan2(x).to_degrees(),
        }
    }

    /// Same angle, radius multiplied by `factor` (unit conversion).
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            radius: self.radius * factor,
            ..self
        }
    }
}
