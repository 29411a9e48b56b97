//! Floor area (footprint) in square meters

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

use super::Measurement;
use crate::core_types::dimensions::{ensure_convertible, ensure_positive};
use crate::core_types::units::LengthUnit;
use crate::error::{Result, VolumeError};

#[derive(Deserialize)]
struct RawFloor {
    length: f64,
    width: f64,
}

/// Footprint `length × width` in m². Height plays no part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFloor")]
pub struct FloorMeters {
    value: f64,
    length: f64,
    width: f64,
}

impl FloorMeters {
    /// Build the footprint from a length and width in meters.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::NonPositiveDimension`] if either side is zero,
    /// negative or not finite, and [`VolumeError::DimensionOutOfRange`] if a
    /// side cannot be converted to the other units.
    pub fn from_meters(length: f64, width: f64) -> Result<Self> {
        ensure_positive(&[length, width])?;
        ensure_convertible(&[length, width], LengthUnit::Meters)?;
        trace!(length, width, "floor area");
        Ok(Self::from_validated(length, width))
    }

    pub(crate) fn from_validated(length: f64, width: f64) -> Self {
        Self {
            value: length * width,
            length,
            width,
        }
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Length in meters
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Width in meters
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }
}

impl TryFrom<RawFloor> for FloorMeters {
    type Error = VolumeError;

    fn try_from(raw: RawFloor) -> Result<Self> {
        Self::from_meters(raw.length, raw.width)
    }
}

impl Measurement for FloorMeters {
    fn value(&self) -> f64 {
        self.value
    }

    fn symbol(&self) -> &'static str {
        "m²"
    }
}

impl fmt::Display for FloorMeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
