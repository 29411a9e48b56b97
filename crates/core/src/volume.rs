//! The `Volume` handle and the `volume` entry point
//!
//! A [`Volume`] wraps normalized [`Dimensions`] and hands out every derived
//! measurement on demand. It never changes after construction, so repeated
//! calls return identical values.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core_types::dimensions::Dimensions;
use crate::core_types::units::LengthUnit;
use crate::error::Result;
use crate::input::{DimensionInput, NamedDimensions, VolumeRequest};
use crate::measure::{
    CubicCentimeters, CubicDecimeters, CubicMeters, FloorMeters, LoadingMeters, LoadingParams,
};

/// Compute a volume from a request.
///
/// The request's collection is used when present, the named scalars otherwise;
/// all values are read in the request's unit.
///
/// # Errors
///
/// Any shape or positivity error from [`DimensionInput::resolve`].
pub fn volume(request: &VolumeRequest) -> Result<Volume> {
    Volume::from_input(&request.input(), request.unit)
}

/// A box whose dimensions are known to be positive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    dimensions: Dimensions,
}

impl Volume {
    /// Normalize any accepted input shape.
    ///
    /// # Errors
    ///
    /// Any shape or positivity error from [`DimensionInput::resolve`].
    pub fn from_input(input: &DimensionInput, unit: LengthUnit) -> Result<Self> {
        let dimensions = input.normalize(unit)?;
        debug!(
            length_m = *dimensions.length(),
            width_m = *dimensions.width(),
            height_m = *dimensions.height(),
            %unit,
            "volume dimensions normalized"
        );
        Ok(Self { dimensions })
    }

    /// Build from three values in `unit`.
    ///
    /// # Errors
    ///
    /// [`crate::VolumeError::NonPositiveDimension`] if any value is not
    /// strictly positive and finite.
    pub fn from_unit(length: f64, width: f64, height: f64, unit: LengthUnit) -> Result<Self> {
        Self::from_input(
            &DimensionInput::Named(NamedDimensions::new(length, width, height)),
            unit,
        )
    }

    /// Wrap dimensions that were already validated
    #[must_use]
    pub fn from_dimensions(dimensions: Dimensions) -> Self {
        Self { dimensions }
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Volume in cm³, from dimensions scaled ×100
    #[must_use]
    pub fn centimeters(&self) -> CubicCentimeters {
        CubicCentimeters::from_validated(self.dimensions.in_unit(LengthUnit::Centimeters))
    }

    /// Volume in dm³, from dimensions scaled ×10
    #[must_use]
    pub fn decimeters(&self) -> CubicDecimeters {
        CubicDecimeters::from_validated(self.dimensions.in_unit(LengthUnit::Decimeters))
    }

    /// Volume in m³
    #[must_use]
    pub fn meters(&self) -> CubicMeters {
        CubicMeters::from_validated(self.dimensions.in_unit(LengthUnit::Meters))
    }

    /// Footprint `length × width` in m²
    #[must_use]
    pub fn floor_meters(&self) -> FloorMeters {
        FloorMeters::from_validated(*self.dimensions.length(), *self.dimensions.width())
    }

    /// Loading meters for `params.quantity` of these boxes.
    ///
    /// # Errors
    ///
    /// [`crate::VolumeError::InvalidQuantity`],
    /// [`crate::VolumeError::InvalidStackingFactor`] or
    /// [`crate::VolumeError::InvalidTruckWidth`] for bad parameters.
    pub fn loading_meters(&self, params: LoadingParams) -> Result<LoadingMeters> {
        LoadingMeters::from_centimeters(
            self.length(LengthUnit::Centimeters),
            self.width(LengthUnit::Centimeters),
            params,
        )
    }

    /// Length expressed in `unit`
    #[must_use]
    pub fn length(&self, unit: LengthUnit) -> f64 {
        self.dimensions.length().to_unit(unit)
    }

    /// Width expressed in `unit`
    #[must_use]
    pub fn width(&self, unit: LengthUnit) -> f64 {
        self.dimensions.width().to_unit(unit)
    }

    /// Height expressed in `unit`
    #[must_use]
    pub fn height(&self, unit: LengthUnit) -> f64 {
        self.dimensions.height().to_unit(unit)
    }
}
