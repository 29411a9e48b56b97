//! Loading meters (LDM): linear truck floor a shipment occupies
//!
//! ```text
//! ldm = (quantity × length_m × width_m) / truck_width_m / stacking_factor
//! ```
//!
//! Validation runs dimensions first, then quantity, stacking factor and truck
//! width, each with its own error so exactly one failure is reported.
//! Deserialized values are recomputed through the same checks.
//!
//! # Usage
//! ```
//! use volume_calc_core::{LoadingMeters, LoadingParams};
//!
//! // Six euro pallets, stacked three high, in a 2.5 m wide trailer
//! let params = LoadingParams::default()
//!     .with_quantity(6)
//!     .with_stacking_factor(3.0)
//!     .with_truck_width(2.5);
//! let ldm = LoadingMeters::from_centimeters(120.0, 80.0, params).unwrap();
//! assert!((ldm.value() - 0.768).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::Measurement;
use crate::core_types::dimensions::{ensure_convertible, ensure_positive};
use crate::core_types::units::LengthUnit;
use crate::error::{Result, VolumeError};

/// Interior width of a standard semi-trailer in meters
pub const STANDARD_TRAILER_WIDTH: f64 = 2.4;

/// Interior width of a mega trailer in meters
pub const MEGA_TRAILER_WIDTH: f64 = 2.48;

/// Quantity, stacking and truck parameters of a loading-meter calculation
///
/// Deserializing fills absent fields from [`LoadingParams::default`]. Values
/// are validated when the calculation runs, not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingParams {
    /// Number of identical units, at least 1
    pub quantity: u32,
    /// How many units stack on one footprint (1.0 = no stacking)
    pub stacking_factor: f64,
    /// Usable truck width in meters
    pub truck_width: f64,
}

impl Default for LoadingParams {
    fn default() -> Self {
        Self {
            quantity: 1,
            stacking_factor: 1.0,
            truck_width: STANDARD_TRAILER_WIDTH,
        }
    }
}

impl LoadingParams {
    #[must_use]
    pub const fn new(quantity: u32, stacking_factor: f64, truck_width: f64) -> Self {
        Self {
            quantity,
            stacking_factor,
            truck_width,
        }
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    #[must_use]
    pub fn with_stacking_factor(mut self, stacking_factor: f64) -> Self {
        self.stacking_factor = stacking_factor;
        self
    }

    #[must_use]
    pub fn with_truck_width(mut self, truck_width: f64) -> Self {
        self.truck_width = truck_width;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.quantity < 1 {
            return Err(VolumeError::InvalidQuantity {
                quantity: self.quantity,
            });
        }
        if !(self.stacking_factor.is_finite() && self.stacking_factor > 0.0) {
            return Err(VolumeError::InvalidStackingFactor {
                stacking_factor: self.stacking_factor,
            });
        }
        if !(self.truck_width.is_finite() && self.truck_width > 0.0) {
            return Err(VolumeError::InvalidTruckWidth {
                truck_width: self.truck_width,
            });
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct RawLoading {
    length: f64,
    width: f64,
    quantity: u32,
    stacking_factor: f64,
    truck_width: f64,
}

/// Loading meters together with every input that produced them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLoading")]
pub struct LoadingMeters {
    value: f64,
    /// Length of one unit in centimeters
    length: f64,
    /// Width of one unit in centimeters
    width: f64,
    quantity: u32,
    stacking_factor: f64,
    truck_width: f64,
}

impl LoadingMeters {
    /// Compute loading meters for units measured in centimeters.
    ///
    /// # Errors
    ///
    /// Checked in this order, first failure wins:
    /// [`VolumeError::NonPositiveDimension`], [`VolumeError::DimensionOutOfRange`],
    /// [`VolumeError::InvalidQuantity`], [`VolumeError::InvalidStackingFactor`],
    /// [`VolumeError::InvalidTruckWidth`].
    pub fn from_centimeters(length: f64, width: f64, params: LoadingParams) -> Result<Self> {
        ensure_positive(&[length, width])?;
        ensure_convertible(&[length, width], LengthUnit::Centimeters)?;
        params.validate()?;

        let length_m = LengthUnit::Centimeters.to_meters(length);
        let width_m = LengthUnit::Centimeters.to_meters(width);
        let value = (f64::from(params.quantity) * (length_m * width_m))
            / params.truck_width
            / params.stacking_factor;

        debug!(
            length_cm = length,
            width_cm = width,
            quantity = params.quantity,
            stacking_factor = params.stacking_factor,
            truck_width = params.truck_width,
            ldm = value,
            "loading meters"
        );

        Ok(Self {
            value,
            length,
            width,
            quantity: params.quantity,
            stacking_factor: params.stacking_factor,
            truck_width: params.truck_width,
        })
    }

    /// Compute loading meters for units measured in meters.
    ///
    /// # Errors
    ///
    /// Same as [`LoadingMeters::from_centimeters`].
    pub fn from_meters(length: f64, width: f64, params: LoadingParams) -> Result<Self> {
        // Checked in meters so a value that overflows centimeters is not
        // mistaken for a non-positive one
        ensure_positive(&[length, width])?;
        ensure_convertible(&[length, width], LengthUnit::Meters)?;
        Self::from_centimeters(
            LengthUnit::Centimeters.meters_to_unit(length),
            LengthUnit::Centimeters.meters_to_unit(width),
            params,
        )
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Unit length in centimeters
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Unit width in centimeters
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub fn stacking_factor(&self) -> f64 {
        self.stacking_factor
    }

    /// Truck width in meters
    #[must_use]
    pub fn truck_width(&self) -> f64 {
        self.truck_width
    }

    /// The parameters this value was computed with
    #[must_use]
    pub fn params(&self) -> LoadingParams {
        LoadingParams::new(self.quantity, self.stacking_factor, self.truck_width)
    }
}

impl TryFrom<RawLoading> for LoadingMeters {
    type Error = VolumeError;

    fn try_from(raw: RawLoading) -> Result<Self> {
        let params = LoadingParams::new(raw.quantity, raw.stacking_factor, raw.truck_width);
        Self::from_centimeters(raw.length, raw.width, params)
    }
}

impl Measurement for LoadingMeters {
    fn value(&self) -> f64 {
        self.value
    }

    fn symbol(&self) -> &'static str {
        "ldm"
    }
}

impl fmt::Display for LoadingMeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_params() {
        let params = LoadingParams::default();
        assert_eq!(params.quantity, 1);
        assert_eq!(params.stacking_factor, 1.0);
        assert_eq!(params.truck_width, 2.4);
    }

    #[test]
    fn test_single_euro_pallet() {
        let ldm = LoadingMeters::from_centimeters(120.0, 80.0, LoadingParams::default()).unwrap();
        assert_relative_eq!(ldm.value(), 0.4, epsilon = 1e-12);
        assert_eq!(ldm.format(2), "0.40");
    }

    #[test]
    fn test_stacked_pallets_keep_inputs() {
        let params = LoadingParams::new(6, 3.0, 2.5);
        let ldm = LoadingMeters::from_centimeters(120.0, 80.0, params).unwrap();
        assert_relative_eq!(ldm.value(), (6.0 * 0.96) / 2.5 / 3.0, epsilon = 1e-12);
        assert_eq!(ldm.length(), 120.0);
        assert_eq!(ldm.width(), 80.0);
        assert_eq!(ldm.quantity(), 6);
        assert_eq!(ldm.stacking_factor(), 3.0);
        assert_eq!(ldm.truck_width(), 2.5);
        assert_eq!(ldm.params(), params);
    }

    #[test]
    fn test_from_meters_delegates_to_centimeters() {
        let from_m = LoadingMeters::from_meters(1.2, 0.8, LoadingParams::default()).unwrap();
        let from_cm =
            LoadingMeters::from_centimeters(120.0, 80.0, LoadingParams::default()).unwrap();
        assert_relative_eq!(from_m.value(), from_cm.value(), epsilon = 1e-12);
        assert_relative_eq!(from_m.length(), 120.0, epsilon = 1e-9);
    }

    #[test]
    fn test_each_parameter_fails_independently() {
        let base = LoadingParams::default();
        assert_eq!(
            LoadingMeters::from_centimeters(120.0, 80.0, base.with_quantity(0)),
            Err(VolumeError::InvalidQuantity { quantity: 0 })
        );
        assert_eq!(
            LoadingMeters::from_centimeters(120.0, 80.0, base.with_stacking_factor(0.0)),
            Err(VolumeError::InvalidStackingFactor {
                stacking_factor: 0.0
            })
        );
        assert_eq!(
            LoadingMeters::from_centimeters(120.0, 80.0, base.with_truck_width(0.0)),
            Err(VolumeError::InvalidTruckWidth { truck_width: 0.0 })
        );

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0] {
            assert!(
                matches!(
                    LoadingMeters::from_centimeters(120.0, 80.0, base.with_stacking_factor(bad)),
                    Err(VolumeError::InvalidStackingFactor { .. })
                ),
                "stacking factor {bad} should be rejected"
            );
            assert!(
                matches!(
                    LoadingMeters::from_centimeters(120.0, 80.0, base.with_truck_width(bad)),
                    Err(VolumeError::InvalidTruckWidth { .. })
                ),
                "truck width {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_extreme_dimensions_report_range() {
        let params = LoadingParams::default();
        assert_eq!(
            LoadingMeters::from_meters(1e307, 1.0, params),
            Err(VolumeError::DimensionOutOfRange)
        );
        assert_eq!(
            LoadingMeters::from_centimeters(5e-324, 80.0, params),
            Err(VolumeError::DimensionOutOfRange)
        );
        assert_eq!(
            LoadingMeters::from_meters(-1.0, 1.0, params),
            Err(VolumeError::NonPositiveDimension)
        );
    }

    #[test]
    fn test_deserialize_revalidates_and_recomputes() {
        let ldm: LoadingMeters = serde_json::from_str(
            r#"{"value": 42.0, "length": 120, "width": 80, "quantity": 6,
                "stacking_factor": 3.0, "truck_width": 2.5}"#,
        )
        .unwrap();
        assert_relative_eq!(ldm.value(), 0.768, epsilon = 1e-12);

        let invalid = r#"{"value": 1.0, "length": 120, "width": 80, "quantity": 0,
                          "stacking_factor": 0.0, "truck_width": -1.0}"#;
        assert!(serde_json::from_str::<LoadingMeters>(invalid).is_err());
    }

    #[test]
    fn test_dimensions_checked_before_parameters() {
        let all_bad = LoadingParams::new(0, 0.0, 0.0);
        assert_eq!(
            LoadingMeters::from_centimeters(0.0, 80.0, all_bad),
            Err(VolumeError::NonPositiveDimension)
        );
        assert_eq!(
            LoadingMeters::from_centimeters(120.0, 80.0, all_bad),
            Err(VolumeError::InvalidQuantity { quantity: 0 })
        );
    }

    #[test]
    fn test_params_deserialize_with_defaults() {
        let params: LoadingParams = serde_json::from_str(r#"{"quantity": 4}"#).unwrap();
        assert_eq!(params, LoadingParams::default().with_quantity(4));
    }
}
