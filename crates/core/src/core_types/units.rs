//! Length units and the meter newtype used for normalized dimensions
//!
//! All dimensions are held internally in meters. Callers pick a [`LengthUnit`]
//! at the edges (input and getters) and the conversion goes through the fixed
//! scale factors below.
//!
//! # Usage
//! ```
//! use volume_calc_core::core_types::units::{LengthUnit, Meters};
//!
//! let length = Meters::from_unit(120.0, LengthUnit::Centimeters);
//! assert!((*length - 1.2).abs() < 1e-12);
//! assert!((length.to_unit(LengthUnit::Decimeters) - 12.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// LENGTH UNIT
// ============================================================================

/// Unit a caller supplies or requests linear dimensions in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    /// 1 cm = 0.01 m
    #[default]
    #[serde(rename = "centimeters", alias = "cm")]
    Centimeters,
    /// 1 dm = 0.1 m
    #[serde(rename = "decimeters", alias = "dm")]
    Decimeters,
    /// 1 m = 1 m
    #[serde(rename = "meters", alias = "m")]
    Meters,
}

impl LengthUnit {
    /// Every supported unit, smallest first
    pub const ALL: [LengthUnit; 3] = [
        LengthUnit::Centimeters,
        LengthUnit::Decimeters,
        LengthUnit::Meters,
    ];

    /// Multiply a value in this unit by this factor to get meters
    #[inline]
    #[must_use]
    pub const fn meters_per_unit(self) -> f64 {
        match self {
            LengthUnit::Centimeters => 0.01,
            LengthUnit::Decimeters => 0.1,
            LengthUnit::Meters => 1.0,
        }
    }

    /// Multiply a value in meters by this factor to get this unit
    #[inline]
    #[must_use]
    pub const fn units_per_meter(self) -> f64 {
        match self {
            LengthUnit::Centimeters => 100.0,
            LengthUnit::Decimeters => 10.0,
            LengthUnit::Meters => 1.0,
        }
    }

    /// Short symbol (`cm`, `dm`, `m`)
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Centimeters => "cm",
            LengthUnit::Decimeters => "dm",
            LengthUnit::Meters => "m",
        }
    }

    /// Long lowercase name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            LengthUnit::Centimeters => "centimeters",
            LengthUnit::Decimeters => "decimeters",
            LengthUnit::Meters => "meters",
        }
    }

    /// Convert a value expressed in this unit into meters
    #[inline]
    #[must_use]
    pub fn to_meters(self, value: f64) -> f64 {
        value * self.meters_per_unit()
    }

    /// Convert a value in meters into this unit
    #[inline]
    #[must_use]
    pub fn meters_to_unit(self, meters: f64) -> f64 {
        meters * self.units_per_meter()
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Returned when a string names no known length unit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown length unit '{0}', expected one of cm, dm, m")]
pub struct ParseUnitError(String);

impl FromStr for LengthUnit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        LengthUnit::ALL
            .into_iter()
            .find(|unit| unit.symbol() == needle || unit.name() == needle)
            .ok_or_else(|| ParseUnitError(s.to_string()))
    }
}

// ============================================================================
// METERS
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Meters(f64);

impl Deref for Meters {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Meters {
    /// Convert a value given in `unit` into meters
    #[inline]
    #[must_use]
    pub fn from_unit(value: f64, unit: LengthUnit) -> Self {
        Meters(unit.to_meters(value))
    }

    /// Express this length in `unit`
    #[inline]
    #[must_use]
    pub fn to_unit(self, unit: LengthUnit) -> f64 {
        unit.meters_to_unit(self.0)
    }
}

// ============================================================================
// TESTS
// ============================================================================
