//! Volume Calculator Core Library
//!
//! Derives freight and storage measurements from the three linear dimensions of
//! a box: cubic volume in cm³, dm³ and m³, floor area in m², and loading meters
//! (the linear truck floor a shipment occupies).
//!
//! ## Input
//!
//! Dimensions arrive as a positional `[length, width, height]` sequence, a map
//! keyed by `length`/`width`/`height`, or three named scalars, in centimeters,
//! decimeters or meters. Everything is normalized to meters on construction and
//! every value object is immutable afterwards.
//!
//! ```
//! use volume_calc_core::{volume, LoadingParams, Measurement, VolumeRequest};
//!
//! let pallet = volume(&VolumeRequest::new().dimensions([120.0, 80.0, 100.0])).unwrap();
//! assert_eq!(pallet.centimeters().format(0), "960,000");
//! assert!((pallet.floor_meters().value() - 0.96).abs() < 1e-12);
//!
//! let ldm = pallet.loading_meters(LoadingParams::default()).unwrap();
//! assert!((ldm.value() - 0.4).abs() < 1e-12);
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;

// Input normalization and derived measurements
pub mod input;
pub mod measure;
pub mod volume;

// Re-export core types
pub use core_types::{Dimensions, LengthUnit, Meters, ParseUnitError};
pub use error::{Result, VolumeError};

// Re-export the calculator surface
pub use input::{DimensionCollection, DimensionInput, NamedDimensions, VolumeRequest};
pub use measure::{
    format_number, CubicCentimeters, CubicDecimeters, CubicMeters, FloorMeters, LoadingMeters,
    LoadingParams, Measurement, NumberFormat, MEGA_TRAILER_WIDTH, STANDARD_TRAILER_WIDTH,
};
pub use volume::{volume, Volume};
