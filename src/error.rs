//! Error types for the hardened constructors and layout decoding.
//!
//! Validation itself is total and never returns an error; these variants only
//! surface when a caller opts into checked construction.

use crate::doc::ItemId;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("room {axis} must be positive, got {value}")]
    InvalidRoomDimension { axis: &'static str, value: f64 },
    #[error("door span {door_x}..{door_end} lies outside wall of width {width}")]
    DoorOutsideWall { door_x: f64, door_end: f64, width: f64 },
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),
    #[error("invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("grid unit must be positive, got {0}")]
    InvalidGrid(f64),
    #[error("zoom bounds inverted: min {min} > max {max}")]
    InvertedZoomBounds { min: f64, max: f64 },
    #[error("{field} must be finite and positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}
