//! Cubic volume in centimeters, decimeters and meters
//!
//! The product is always taken over dimensions already expressed in the
//! target unit, never by scaling a volume from another unit afterwards. The
//! per-unit dimensions stay available on the value. Deserialization goes back
//! through the factory, so the stored product is always recomputed.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

use super::Measurement;
use crate::core_types::dimensions::{ensure_convertible, ensure_positive};
use crate::core_types::units::LengthUnit;
use crate::error::{Result, VolumeError};

/// Serialized dimensions of a cubic value; `value` is ignored on the way in
#[derive(Deserialize)]
struct RawCubic {
    length: f64,
    width: f64,
    height: f64,
}

macro_rules! cubic_measure {
    (
        $(#[$meta:meta])*
        $name:ident, $unit:expr, $symbol:literal, $factory:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
        #[serde(try_from = "RawCubic")]
        pub struct $name {
            value: f64,
            length: f64,
            width: f64,
            height: f64,
        }

        impl $name {
            /// Unit the stored dimensions are expressed in
            pub const UNIT: LengthUnit = $unit;

            /// Build the volume from dimensions given in this unit.
            ///
            /// # Errors
            ///
            /// Returns [`VolumeError::NonPositiveDimension`] if any dimension
            /// is zero, negative or not finite, and
            /// [`VolumeError::DimensionOutOfRange`] if one cannot be
            /// converted to the other units.
            pub fn $factory(length: f64, width: f64, height: f64) -> Result<Self> {
                ensure_positive(&[length, width, height])?;
                ensure_convertible(&[length, width, height], Self::UNIT)?;
                trace!(length, width, height, unit = %Self::UNIT, "cubic volume");
                Ok(Self::from_validated([length, width, height]))
            }

            /// Caller guarantees every dimension already passed [`ensure_positive`]
            /// and [`ensure_convertible`]
            pub(crate) fn from_validated([length, width, height]: [f64; 3]) -> Self {
                Self {
                    value: length * width * height,
                    length,
                    width,
                    height,
                }
            }

            /// Stored dimensions converted into `unit`
            fn dimensions_in(&self, unit: LengthUnit) -> [f64; 3] {
                let factor = Self::UNIT.meters_per_unit() * unit.units_per_meter();
                [self.length * factor, self.width * factor, self.height * factor]
            }

            #[must_use]
            pub fn value(&self) -> f64 {
                self.value
            }

            #[must_use]
            pub fn length(&self) -> f64 {
                self.length
            }

            #[must_use]
            pub fn width(&self) -> f64 {
                self.width
            }

            #[must_use]
            pub fn height(&self) -> f64 {
                self.height
            }

            /// Same box measured in cubic centimeters
            #[must_use]
            pub fn to_centimeters(self) -> CubicCentimeters {
                CubicCentimeters::from_validated(self.dimensions_in(LengthUnit::Centimeters))
            }

            /// Same box measured in cubic decimeters
            #[must_use]
            pub fn to_decimeters(self) -> CubicDecimeters {
                CubicDecimeters::from_validated(self.dimensions_in(LengthUnit::Decimeters))
            }

            /// Same box measured in cubic meters
            #[must_use]
            pub fn to_meters(self) -> CubicMeters {
                CubicMeters::from_validated(self.dimensions_in(LengthUnit::Meters))
            }
        }

        impl TryFrom<RawCubic> for $name {
            type Error = VolumeError;

            fn try_from(raw: RawCubic) -> Result<Self> {
                Self::$factory(raw.length, raw.width, raw.height)
            }
        }

        impl Measurement for $name {
            fn value(&self) -> f64 {
                self.value
            }

            fn symbol(&self) -> &'static str {
                $symbol
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.value)
            }
        }
    };
}

cubic_measure!(
    /// Volume in cubic centimeters (cm³)
    CubicCentimeters,
    LengthUnit::Centimeters,
    "cm³",
    from_centimeters
);

cubic_measure!(
    /// Volume in cubic decimeters (dm³, liters)
    CubicDecimeters,
    LengthUnit::Decimeters,
    "dm³",
    from_decimeters
);

cubic_measure!(
    /// Volume in cubic meters (m³)
    CubicMeters,
    LengthUnit::Meters,
    "m³",
    from_meters
);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_euro_pallet_in_centimeters() {
        let cm = CubicCentimeters::from_centimeters(120.0, 80.0, 100.0).unwrap();
        assert_eq!(cm.value(), 960_000.0);
        assert_eq!(cm.length(), 120.0);
        assert_eq!(cm.to_string(), "960000");
        assert_eq!(cm.format(2), "960,000.00");
    }

    #[test]
    fn test_conversions_scale_dimensions_first() {
        let m = CubicMeters::from_meters(1.2, 0.8, 1.0).unwrap();
        let dm = m.to_decimeters();
        assert_relative_eq!(dm.length(), 12.0, epsilon = 1e-9);
        assert_relative_eq!(dm.value(), 960.0, epsilon = 1e-9);
        assert_relative_eq!(m.to_centimeters().value(), 960_000.0, epsilon = 1e-6);
        assert_relative_eq!(dm.to_meters().value(), 0.96, epsilon = 1e-12);
    }

    #[test]
    fn test_direct_factories_revalidate() {
        assert_eq!(
            CubicMeters::from_meters(1.0, 0.0, 1.0),
            Err(VolumeError::NonPositiveDimension)
        );
        assert_eq!(
            CubicDecimeters::from_decimeters(-1.0, 1.0, 1.0),
            Err(VolumeError::NonPositiveDimension)
        );
        assert_eq!(
            CubicCentimeters::from_centimeters(1.0, 1.0, f64::NAN),
            Err(VolumeError::NonPositiveDimension)
        );
    }

    #[test]
    fn test_factories_reject_unconvertible_dimensions() {
        assert_eq!(
            CubicCentimeters::from_centimeters(5e-324, 1.0, 1.0),
            Err(VolumeError::DimensionOutOfRange)
        );
        assert_eq!(
            CubicMeters::from_meters(1e307, 1.0, 1.0),
            Err(VolumeError::DimensionOutOfRange)
        );
    }

    #[test]
    fn test_deserialize_recomputes_value() {
        let json = r#"{"value": 99.0, "length": 1.2, "width": 0.8, "height": 1.0}"#;
        let m: CubicMeters = serde_json::from_str(json).unwrap();
        assert_eq!(m, CubicMeters::from_meters(1.2, 0.8, 1.0).unwrap());

        let json = serde_json::to_string(&m.to_decimeters()).unwrap();
        let dm: CubicDecimeters = serde_json::from_str(&json).unwrap();
        assert_eq!(dm, m.to_decimeters());
    }

    #[test]
    fn test_deserialize_rejects_invalid_dimensions() {
        let negative = r#"{"value": -5, "length": -1, "width": 0, "height": 2}"#;
        assert!(serde_json::from_str::<CubicMeters>(negative).is_err());
        assert!(serde_json::from_str::<CubicCentimeters>(negative).is_err());
        assert!(serde_json::from_str::<CubicDecimeters>(r#"{"length": 1, "width": 1}"#).is_err());
    }

    #[test]
    fn test_symbols() {
        let cm = CubicCentimeters::from_centimeters(1.0, 1.0, 1.0).unwrap();
        assert_eq!(cm.symbol(), "cm³");
        assert_eq!(cm.to_decimeters().symbol(), "dm³");
        assert_eq!(cm.to_meters().symbol(), "m³");
    }
}
