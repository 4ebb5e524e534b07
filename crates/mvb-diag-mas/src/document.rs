//! Serde model of the MAS fields the reports read.
//!
//! Lengths are in metres, as stored in MAS files.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::Result;

/// A MAS document with a top-level `magnetic` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasDocument {
    /// The magnetic component.
    pub magnetic: Magnetic,
}

impl MasDocument {
    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and deserialize a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading MAS document");
        Self::from_json(&fs::read_to_string(path)?)
    }
}

/// A magnetic component: core plus coil.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Magnetic {
    /// Magnetic core.
    #[serde(default)]
    pub core: Option<Core>,
    /// Coil (bobbin and turns).
    #[serde(default)]
    pub coil: Option<Coil>,
}

impl Magnetic {
    /// Parse either `{"magnetic": {...}}` or a bare magnetic object.
    pub fn from_json_lenient(json: &str) -> Result<Self> {
        let mut value: Value = serde_json::from_str(json)?;
        let inner = match value.get_mut("magnetic") {
            Some(m) => m.take(),
            None => value,
        };
        Ok(serde_json::from_value(inner)?)
    }

    /// Read a file with [`Magnetic::from_json_lenient`].
    pub fn load_lenient(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading magnetic");
        Self::from_json_lenient(&fs::read_to_string(path)?)
    }
}

/// Magnetic core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Core {
    /// Physical pieces (halves, spacers) with their placement.
    #[serde(default)]
    pub geometrical_description: Option<Vec<CorePart>>,
}

/// One physical piece of the core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorePart {
    /// Piece type, e.g. `"half set"` or `"spacer"`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Shape with named dimensions. Absent for spacers.
    #[serde(default)]
    pub shape: Option<CoreShape>,
    /// Euler rotation, kept as the raw JSON values.
    #[serde(default)]
    pub rotation: Vec<Value>,
}

/// Core shape with its named dimensions in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoreShape {
    /// Shape name, e.g. `"ETD 49/25/16"`.
    #[serde(default)]
    pub name: Option<String>,
    /// Dimension name (`"A"`, `"B"`, ...) to value.
    #[serde(default)]
    pub dimensions: Map<String, Value>,
}

/// A shape dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum Dimension {
    /// Tolerance interval.
    Interval {
        /// Lower bound.
        minimum: Option<f64>,
        /// Upper bound.
        maximum: Option<f64>,
        /// Nominal value.
        nominal: Option<f64>,
    },
    /// Any other representation.
    Other,
}

impl Dimension {
    /// Interpret a raw dimension value.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(obj) => Dimension::Interval {
                minimum: obj.get("minimum").and_then(Value::as_f64),
                maximum: obj.get("maximum").and_then(Value::as_f64),
                nominal: obj.get("nominal").and_then(Value::as_f64),
            },
            _ => Dimension::Other,
        }
    }

    /// Midpoint of the interval, `maximum` defaulting to `minimum`.
    ///
    /// `None` unless a minimum is present.
    pub fn mid_value(&self) -> Option<f64> {
        match *self {
            Dimension::Interval {
                minimum: Some(min),
                maximum,
                ..
            } => Some((min + maximum.unwrap_or(min)) / 2.0),
            _ => None,
        }
    }
}

/// Coil description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coil {
    /// Bobbin, inline or by name.
    #[serde(default)]
    pub bobbin: Option<BobbinRef>,
    /// Placed turns.
    #[serde(default)]
    pub turns_description: Option<Vec<Turn>>,
}

/// A bobbin given inline or as a catalogue reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BobbinRef {
    /// Catalogue name.
    Name(String),
    /// Inline data.
    Data(Box<Bobbin>),
}

/// Inline bobbin data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bobbin {
    /// Geometry derived from the functional description.
    #[serde(default)]
    pub processed_description: Option<BobbinProcessed>,
}

/// Processed bobbin geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BobbinProcessed {
    /// Column depth (m).
    pub column_depth: f64,
    /// Column width (m).
    pub column_width: f64,
    /// Column shape, e.g. `"round"` or `"rectangular"`.
    pub column_shape: String,
    /// Winding windows.
    #[serde(default)]
    pub winding_windows: Vec<WindingWindow>,
}

/// Area available for turns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindingWindow {
    /// Height (m). Absent on round windows.
    #[serde(default)]
    pub height: Option<f64>,
    /// Width (m). Absent on round windows.
    #[serde(default)]
    pub width: Option<f64>,
}

/// A placed turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    /// Turn name.
    #[serde(default)]
    pub name: Option<String>,
    /// Layer the turn belongs to.
    #[serde(default)]
    pub layer: Option<String>,
    /// Main (inner) coordinate (m).
    #[serde(default)]
    pub coordinates: Vec<f64>,
    /// Extra coordinates; the first is the outer side on toroids (m).
    #[serde(default)]
    pub additional_coordinates: Option<Vec<Vec<f64>>>,
    /// Rotation (degrees).
    #[serde(default)]
    pub rotation: Option<f64>,
}
