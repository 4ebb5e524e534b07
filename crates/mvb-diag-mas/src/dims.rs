//! Core and bobbin dimension report.

use mvb_diag_math::MM_PER_M;
use serde_json::Value;
use tracing::debug;

use crate::document::{BobbinRef, Dimension, MasDocument};
use crate::error::{MasError, Result};

/// Nominal dimensions of one core piece.
#[derive(Debug, Clone, PartialEq)]
pub struct PartDimensions {
    /// Position in `geometricalDescription`, counting shapeless pieces too.
    pub index: usize,
    /// `(name, value in mm)` in document order.
    pub dimensions: Vec<(String, f64)>,
    /// Rotation as given, empty when absent.
    pub rotation: Vec<Value>,
}

/// Bobbin column summary.
#[derive(Debug, Clone, PartialEq)]
pub struct BobbinSummary {
    /// Column depth (mm).
    pub column_depth_mm: f64,
    /// Column width (mm).
    pub column_width_mm: f64,
    /// Column shape.
    pub column_shape: String,
}

/// First winding window of the bobbin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSummary {
    /// Height (mm).
    pub height_mm: f64,
    /// Width (mm).
    pub width_mm: f64,
}

/// Everything the `dims` command prints.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionReport {
    /// Core pieces that have a shape.
    pub parts: Vec<PartDimensions>,
    /// Bobbin column.
    pub bobbin: BobbinSummary,
    /// First winding window.
    pub winding_window: WindowSummary,
}

impl DimensionReport {
    /// Build the report, failing on the first missing section.
    pub fn from_document(doc: &MasDocument) -> Result<Self> {
        let magnetic = &doc.magnetic;
        let pieces = magnetic
            .core
            .as_ref()
            .and_then(|c| c.geometrical_description.as_ref())
            .ok_or(MasError::MissingField("magnetic.core.geometricalDescription"))?;

        let parts: Vec<PartDimensions> = pieces
            .iter()
            .enumerate()
            .filter_map(|(index, piece)| {
                let shape = piece.shape.as_ref()?;
                let dimensions = shape
                    .dimensions
                    .iter()
                    .filter_map(|(name, value)| {
                        let mid = Dimension::from_value(value).mid_value()?;
                        Some((name.clone(), mid * MM_PER_M))
                    })
                    .collect();
                Some(PartDimensions {
                    index,
                    dimensions,
                    rotation: piece.rotation.clone(),
                })
            })
            .collect();
        debug!(pieces = pieces.len(), shaped = parts.len(), "core pieces");

        let processed = match magnetic.coil.as_ref().and_then(|c| c.bobbin.as_ref()) {
            Some(BobbinRef::Data(bobbin)) => bobbin.processed_description.as_ref(),
            Some(BobbinRef::Name(_)) | None => None,
        }
        .ok_or(MasError::MissingField(
            "magnetic.coil.bobbin.processedDescription",
        ))?;

        let window = processed
            .winding_windows
            .first()
            .ok_or(MasError::MissingField("windingWindows[0]"))?;
        let height = window
            .height
            .ok_or(MasError::MissingField("windingWindows[0].height"))?;
        let width = window
            .width
            .ok_or(MasError::MissingField("windingWindows[0].width"))?;

        Ok(Self {
            parts,
            bobbin: BobbinSummary {
                column_depth_mm: processed.column_depth * MM_PER_M,
                column_width_mm: processed.column_width * MM_PER_M,
                column_shape: processed.column_shape.clone(),
            },
            winding_window: WindowSummary {
                height_mm: height * MM_PER_M,
                width_mm: width * MM_PER_M,
            },
        })
    }
}
