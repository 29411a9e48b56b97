//! Error taxonomy for dimension input and loading-meter parameters
//!
//! Every variant is a caller-input error. Nothing here is transient, so callers
//! fix the input and call again.

use thiserror::Error;

/// Errors returned while building volumes and their derived measurements
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VolumeError {
    /// Named dimensions were used and at least one of them is absent.
    /// `missing` lists the absent names in length, width, height order.
    #[error("Missing required dimensions: {}", .missing.join(", "))]
    MissingDimensions { missing: Vec<&'static str> },

    /// A dimension collection did not hold exactly three entries
    #[error("Dimensions must contain exactly 3 values, got {count}")]
    ArrayShape { count: usize },

    /// A keyed dimension collection did not use the keys `length`, `width`, `height`.
    /// `keys` is the sorted key set that was received.
    #[error(
        "Dimensions must use the keys [height, length, width], got [{}]",
        .keys.join(", ")
    )]
    ArrayKeys { keys: Vec<String> },

    /// One or more dimensions is zero, negative, or not finite
    #[error("All dimensions must be positive numbers")]
    NonPositiveDimension,

    /// A positive dimension that becomes zero or infinite once converted to
    /// another supported unit
    #[error("Dimensions must stay positive and finite in cm, dm and m")]
    DimensionOutOfRange,

    /// Loading-meter quantity below one
    #[error("Quantity must be at least 1, got {quantity}")]
    InvalidQuantity { quantity: u32 },

    /// Loading-meter stacking factor not strictly positive
    #[error("Stacking factor must be greater than 0, got {stacking_factor}")]
    InvalidStackingFactor { stacking_factor: f64 },

    /// Loading-meter truck width not strictly positive
    #[error("Truck width must be greater than 0 meters, got {truck_width}")]
    InvalidTruckWidth { truck_width: f64 },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, VolumeError>;
