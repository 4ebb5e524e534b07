//! Turn placement report: turns grouped by layer, in polar form.

use mvb_diag_math::{PolarCoord, MM_PER_M};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{Magnetic, Turn};
use crate::error::{MasError, Result};

/// Layer name used for turns without one.
pub const UNKNOWN_LAYER: &str = "?";

/// Report options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReportOptions {
    /// Turns kept per layer; `None` keeps all.
    pub per_layer: Option<usize>,
}

impl Default for TurnReportOptions {
    fn default() -> Self {
        Self { per_layer: Some(3) }
    }
}

/// One turn in polar form, radii in mm.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnPolar {
    /// Position in `turnsDescription`.
    pub index: usize,
    /// Turn name, if any.
    pub name: Option<String>,
    /// Rotation in degrees (0 when absent).
    pub rotation: f64,
    /// Main coordinate.
    pub inner: PolarCoord,
    /// First additional coordinate, when it has at least two values.
    pub outer: Option<PolarCoord>,
}

impl TurnPolar {
    fn from_turn(index: usize, turn: &Turn) -> Result<Self> {
        let inner = match turn.coordinates.as_slice() {
            [x, y, ..] => PolarCoord::from_xy(*x, *y).scaled(MM_PER_M),
            other => {
                return Err(MasError::InvalidTurn {
                    index,
                    len: other.len(),
                })
            }
        };
        let outer = turn
            .additional_coordinates
            .as_ref()
            .and_then(|extra| extra.first())
            .and_then(|c| match c.as_slice() {
                [x, y, ..] => Some(PolarCoord::from_xy(*x, *y).scaled(MM_PER_M)),
                _ => None,
            });
        Ok(Self {
            index,
            name: turn.name.clone(),
            rotation: turn.rotation.unwrap_or(0.0),
            inner,
            outer,
        })
    }

    /// Outer angle minus inner angle, outer counting as 0 when absent.
    pub fn angle_diff(&self) -> f64 {
        self.outer.map_or(0.0, |o| o.angle_deg) - self.inner.angle_deg
    }
}

/// Turns of one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerTurns {
    /// Layer name.
    pub layer: String,
    /// Number of turns in the layer before truncation.
    pub total: usize,
    /// Reported turns, in document order.
    pub turns: Vec<TurnPolar>,
}

/// Turns grouped by layer, layers in order of first appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    /// Number of turns in the coil.
    pub turn_count: usize,
    /// Layers.
    pub layers: Vec<LayerTurns>,
}

impl TurnReport {
    /// Build the report. A coil without `turnsDescription` gives zero turns.
    pub fn from_magnetic(magnetic: &Magnetic, options: &TurnReportOptions) -> Result<Self> {
        let turns: &[Turn] = magnetic
            .coil
            .as_ref()
            .and_then(|c| c.turns_description.as_deref())
            .unwrap_or_default();

        let mut layers: Vec<LayerTurns> = Vec::new();
        for (index, turn) in turns.iter().enumerate() {
            let name = turn.layer.as_deref().unwrap_or(UNKNOWN_LAYER);
            let pos = match layers.iter().position(|l| l.layer == name) {
                Some(pos) => pos,
                None => {
                    layers.push(LayerTurns {
                        layer: name.to_string(),
                        total: 0,
                        turns: Vec::new(),
                    });
                    layers.len() - 1
                }
            };
            let layer = &mut layers[pos];
            layer.total += 1;
            if options.per_layer.is_some_and(|n| layer.turns.len() >= n) {
                continue;
            }
            layer.turns.push(TurnPolar::from_turn(index, turn)?);
        }
        debug!(turns = turns.len(), layers = layers.len(), "grouped turns");

        Ok(Self {
            turn_count: turns.len(),
            layers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn magnetic(turns: serde_json::Value) -> Magnetic {
        serde_json::from_value(json!({"coil": {"turnsDescription": turns}})).unwrap()
    }

    fn all() -> TurnReportOptions {
        TurnReportOptions { per_layer: None }
    }

    #[test]
    fn test_layers_in_first_seen_order() {
        let m = magnetic(json!([
            {"layer": "Primary section 0 layer 1", "coordinates": [0.01, 0.0]},
            {"layer": "Primary section 0 layer 0", "coordinates": [0.01, 0.0]},
            {"layer": "Primary section 0 layer 1", "coordinates": [0.01, 0.0]},
            {"coordinates": [0.01, 0.0]}
        ]));
        let r = TurnReport::from_magnetic(&m, &all()).unwrap();
        assert_eq!(r.turn_count, 4);
        let names: Vec<&str> = r.layers.iter().map(|l| l.layer.as_str()).collect();
        assert_eq!(
            names,
            ["Primary section 0 layer 1", "Primary section 0 layer 0", "?"]
        );
        let idx: Vec<usize> = r.layers[0].turns.iter().map(|t| t.index).collect();
        assert_eq!(idx, [0, 2]);
    }

    #[test]
    fn test_per_layer_limit_keeps_total() {
        let turns: Vec<_> = (0..5)
            .map(|i| json!({"layer": "L0", "coordinates": [0.01, i as f64 * 0.001]}))
            .collect();
        let m = magnetic(json!(turns));
        let r = TurnReport::from_magnetic(&m, &TurnReportOptions::default()).unwrap();
        assert_eq!(r.layers[0].total, 5);
        assert_eq!(r.layers[0].turns.len(), 3);
    }

    #[test]
    fn test_polar_values_in_mm_and_degrees() {
        let m = magnetic(json!([{
            "layer": "L0",
            "rotation": 45.0,
            "coordinates": [0.0, 0.012],
            "additionalCoordinates": [[0.02, 0.02]]
        }]));
        let r = TurnReport::from_magnetic(&m, &all()).unwrap();
        let t = &r.layers[0].turns[0];
        assert_relative_eq!(t.rotation, 45.0);
        assert_relative_eq!(t.inner.radius, 12.0, epsilon = 1e-9);
        assert_relative_eq!(t.inner.angle_deg, 90.0);
        let outer = t.outer.unwrap();
        assert_relative_eq!(outer.radius, 20.0 * 2.0_f64.sqrt(), epsilon = 1e-9);
        assert_relative_eq!(outer.angle_deg, 45.0);
        assert_relative_eq!(t.angle_diff(), -45.0);
    }

    #[test]
    fn test_missing_outer_counts_as_zero_angle() {
        let m = magnetic(json!([
            {"coordinates": [-0.01, 0.0]},
            {"coordinates": [-0.01, 0.0], "additionalCoordinates": [[0.01]]}
        ]));
        let r = TurnReport::from_magnetic(&m, &all()).unwrap();
        for t in &r.layers[0].turns {
            assert!(t.outer.is_none());
            assert_relative_eq!(t.rotation, 0.0);
            assert_relative_eq!(t.angle_diff(), -180.0);
        }
    }

    #[test]
    fn test_short_coordinates_fail() {
        let m = magnetic(json!([{"coordinates": [0.01]}]));
        assert!(matches!(
            TurnReport::from_magnetic(&m, &all()),
            Err(MasError::InvalidTurn { index: 0, len: 1 })
        ));
    }

    #[test]
    fn test_truncated_turns_are_not_validated() {
        let m = magnetic(json!([
            {"coordinates": [0.01, 0.0]},
            {"coordinates": []}
        ]));
        let opts = TurnReportOptions { per_layer: Some(1) };
        let r = TurnReport::from_magnetic(&m, &opts).unwrap();
        assert_eq!(r.layers[0].total, 2);
    }

    #[test]
    fn test_no_coil_means_no_turns() {
        let r = TurnReport::from_magnetic(&Magnetic::default(), &all()).unwrap();
        assert_eq!(r.turn_count, 0);
        assert!(r.layers.is_empty());
    }
}
