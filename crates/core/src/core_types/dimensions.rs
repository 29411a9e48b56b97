//! Validated length/width/height triple, normalized to meters

use serde::{Deserialize, Serialize};

use crate::core_types::units::{LengthUnit, Meters};
use crate::error::{Result, VolumeError};

/// Reject the triple unless every value is finite and strictly positive.
///
/// This is one combined check: the error never says which value failed.
pub(crate) fn ensure_positive(values: &[f64]) -> Result<()> {
    if values.iter().all(|v| v.is_finite() && *v > 0.0) {
        Ok(())
    } else {
        Err(VolumeError::NonPositiveDimension)
    }
}

/// Reject values in `unit` that underflow to zero or overflow to infinity when
/// expressed in any other supported unit.
///
/// Callers run [`ensure_positive`] first, so a failure here always means the
/// input itself was a valid positive number.
pub(crate) fn ensure_convertible(values: &[f64], unit: LengthUnit) -> Result<()> {
    let representable = values.iter().all(|&value| {
        let meters = unit.to_meters(value);
        LengthUnit::ALL.into_iter().all(|target| {
            let converted = target.meters_to_unit(meters);
            converted.is_finite() && converted > 0.0
        })
    });
    if representable {
        Ok(())
    } else {
        Err(VolumeError::DimensionOutOfRange)
    }
}

/// Serialized form; deserializing goes back through validation
#[derive(Deserialize)]
struct RawDimensions {
    length: f64,
    width: f64,
    height: f64,
}

impl TryFrom<RawDimensions> for Dimensions {
    type Error = VolumeError;

    fn try_from(raw: RawDimensions) -> Result<Self> {
        Self::from_meters(raw.length, raw.width, raw.height)
    }
}

/// Three positive dimensions of a box, stored in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions")]
pub struct Dimensions {
    length: Meters,
    width: Meters,
    height: Meters,
}

impl Dimensions {
    /// Build dimensions from values expressed in `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::NonPositiveDimension`] if any value is zero,
    /// negative, NaN or infinite, and [`VolumeError::DimensionOutOfRange`] if
    /// a value cannot be expressed in every supported unit.
    pub fn new(length: f64, width: f64, height: f64, unit: LengthUnit) -> Result<Self> {
        ensure_positive(&[length, width, height])?;
        ensure_convertible(&[length, width, height], unit)?;
        Ok(Self {
            length: Meters::from_unit(length, unit),
            width: Meters::from_unit(width, unit),
            height: Meters::from_unit(height, unit),
        })
    }

    /// Build dimensions from values already in meters.
    ///
    /// # Errors
    ///
    /// Same as [`Dimensions::new`].
    pub fn from_meters(length: f64, width: f64, height: f64) -> Result<Self> {
        Self::new(length, width, height, LengthUnit::Meters)
    }

    #[must_use]
    pub fn length(&self) -> Meters {
        self.length
    }

    #[must_use]
    pub fn width(&self) -> Meters {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> Meters {
        self.height
    }

    /// `[length, width, height]` expressed in `unit`
    #[must_use]
    pub fn in_unit(&self, unit: LengthUnit) -> [f64; 3] {
        [
            self.length.to_unit(unit),
            self.width.to_unit(unit),
            self.height.to_unit(unit),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_to_meters() {
        let dims = Dimensions::new(120.0, 80.0, 100.0, LengthUnit::Centimeters).unwrap();
        assert!((*dims.length() - 1.2).abs() < 1e-12);
        assert!((*dims.width() - 0.8).abs() < 1e-12);
        assert!((*dims.height() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_in_unit_round_trips_input() {
        let dims = Dimensions::new(12.0, 8.0, 10.0, LengthUnit::Decimeters).unwrap();
        let [l, w, h] = dims.in_unit(LengthUnit::Decimeters);
        assert!((l - 12.0).abs() < 1e-9);
        assert!((w - 8.0).abs() < 1e-9);
        assert!((h - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_zero_negative_and_non_finite() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                Dimensions::from_meters(1.0, bad, 1.0),
                Err(VolumeError::NonPositiveDimension),
                "value {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let dims: Dimensions =
            serde_json::from_str(r#"{"length": 1.2, "width": 0.8, "height": 1.0}"#).unwrap();
        assert_eq!(dims, Dimensions::from_meters(1.2, 0.8, 1.0).unwrap());
        let zero = r#"{"length": 0, "width": 1, "height": 1}"#;
        assert!(serde_json::from_str::<Dimensions>(zero).is_err());
    }

    #[test]
    fn test_rejects_values_lost_in_conversion() {
        // Smallest subnormal in cm underflows to 0 m
        assert_eq!(
            Dimensions::new(5e-324, 1.0, 1.0, LengthUnit::Centimeters),
            Err(VolumeError::DimensionOutOfRange)
        );
        // Finite in meters, infinite in centimeters
        assert_eq!(
            Dimensions::from_meters(1e307, 1.0, 1.0),
            Err(VolumeError::DimensionOutOfRange)
        );
        assert!(Dimensions::from_meters(1e300, 1e-300, 1.0).is_ok());
    }

    #[test]
    fn test_non_positive_reported_before_range() {
        assert_eq!(
            Dimensions::new(5e-324, 0.0, 1.0, LengthUnit::Centimeters),
            Err(VolumeError::NonPositiveDimension)
        );
    }

    #[test]
    fn test_multiple_bad_values_yield_one_error() {
        assert_eq!(
            Dimensions::from_meters(0.0, -2.0, 0.0),
            Err(VolumeError::NonPositiveDimension)
        );
    }
}
