//! Derived measurements: cubic volumes, floor area and loading meters
//!
//! Each measurement is an immutable value that keeps the inputs it was
//! derived from next to the computed scalar.

pub mod cubic;
pub mod floor;
pub mod format;
pub mod loading;

pub use cubic::{CubicCentimeters, CubicDecimeters, CubicMeters};
pub use floor::FloorMeters;
pub use format::{format_number, round_half_away_from_zero, NumberFormat};
pub use loading::{LoadingMeters, LoadingParams, MEGA_TRAILER_WIDTH, STANDARD_TRAILER_WIDTH};

use std::fmt;

/// Shared read-only interface of every derived measurement
///
/// `Display` on implementors prints the raw scalar (`960000`, `0.96`), while
/// [`Measurement::format`] produces a grouped, fixed-decimal string.
pub trait Measurement: Copy + fmt::Display {
    /// The derived scalar
    fn value(&self) -> f64;

    /// Unit symbol of the scalar (`cm³`, `m²`, `ldm`, ...)
    fn symbol(&self) -> &'static str;

    /// Scalar rounded half away from zero with `,` thousands and `.` decimals
    fn format(&self, decimals: usize) -> String {
        format_number(self.value(), decimals, &NumberFormat::default())
    }

    /// Scalar rendered with caller-chosen separators
    fn format_with(&self, decimals: usize, format: &NumberFormat) -> String {
        format_number(self.value(), decimals, format)
    }
}
