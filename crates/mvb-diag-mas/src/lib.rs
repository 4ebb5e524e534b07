#![warn(missing_docs)]

//! Inspection of MAS magnetic-component descriptions.
//!
//! Models the slice of the MAS JSON schema needed to dump core and bobbin
//! dimensions and to inspect the placement of coil turns. Unknown fields
//! are ignored, so full MAS documents load as-is.

pub mod dims;
pub mod document;
pub mod error;
pub mod turns;

pub use dims::{BobbinSummary, DimensionReport, PartDimensions, WindowSummary};
pub use document::{
    Bobbin, BobbinProcessed, BobbinRef, Coil, Core, CorePart, CoreShape, Dimension, Magnetic,
    MasDocument, Turn, WindingWindow,
};
pub use error::{MasError, Result};
pub use turns::{LayerTurns, TurnPolar, TurnReport, TurnReportOptions};
