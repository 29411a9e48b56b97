//! Core types: length units and validated dimensions

pub mod dimensions;
pub mod units;

pub use dimensions::Dimensions;
pub use units::{LengthUnit, Meters, ParseUnitError};
