//! Input normalizer: turns any accepted dimension shape into [`Dimensions`]
//!
//! Three shapes are accepted:
//! - an ordered sequence `[length, width, height]`
//! - a keyed map with exactly the keys `length`, `width`, `height`
//! - three named scalars, each optional until resolution
//!
//! A collection always wins over named scalars. Shape errors are reported
//! before positivity, and positivity before unit conversion.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core_types::dimensions::{ensure_positive, Dimensions};
use crate::core_types::units::LengthUnit;
use crate::error::{Result, VolumeError};

/// Names of the three dimensions, in positional order
pub const DIMENSION_NAMES: [&str; 3] = ["length", "width", "height"];

/// Dimensions supplied as one collection
///
/// Deserializes from either a JSON array or a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DimensionCollection {
    /// Positional `[length, width, height]`
    Sequence(Vec<f64>),
    /// Keyed by dimension name
    Keyed(BTreeMap<String, f64>),
}

impl DimensionCollection {
    /// Number of entries supplied
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            DimensionCollection::Sequence(values) => values.len(),
            DimensionCollection::Keyed(map) => map.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn resolve(&self) -> Result<[f64; 3]> {
        let count = self.len();
        if count != 3 {
            return Err(VolumeError::ArrayShape { count });
        }

        match self {
            DimensionCollection::Sequence(values) => Ok([values[0], values[1], values[2]]),
            DimensionCollection::Keyed(map) => {
                let lookup = |name: &str| map.get(name).copied();
                match (lookup("length"), lookup("width"), lookup("height")) {
                    (Some(length), Some(width), Some(height)) => Ok([length, width, height]),
                    // BTreeMap iterates in sorted key order
                    _ => Err(VolumeError::ArrayKeys {
                        keys: map.keys().cloned().collect(),
                    }),
                }
            }
        }
    }
}

impl From<[f64; 3]> for DimensionCollection {
    fn from(values: [f64; 3]) -> Self {
        DimensionCollection::Sequence(values.to_vec())
    }
}

impl From<Vec<f64>> for DimensionCollection {
    fn from(values: Vec<f64>) -> Self {
        DimensionCollection::Sequence(values)
    }
}

impl From<&[f64]> for DimensionCollection {
    fn from(values: &[f64]) -> Self {
        DimensionCollection::Sequence(values.to_vec())
    }
}

impl From<BTreeMap<String, f64>> for DimensionCollection {
    fn from(map: BTreeMap<String, f64>) -> Self {
        DimensionCollection::Keyed(map)
    }
}

/// Dimensions supplied as three separate, possibly absent, scalars
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NamedDimensions {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl NamedDimensions {
    #[must_use]
    pub const fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length: Some(length),
            width: Some(width),
            height: Some(height),
        }
    }

    fn resolve(&self) -> Result<[f64; 3]> {
        match (self.length, self.width, self.height) {
            (Some(length), Some(width), Some(height)) => Ok([length, width, height]),
            (length, width, height) => {
                let missing = [length, width, height]
                    .iter()
                    .zip(DIMENSION_NAMES)
                    .filter(|(value, _)| value.is_none())
                    .map(|(_, name)| name)
                    .collect();
                Err(VolumeError::MissingDimensions { missing })
            }
        }
    }
}

/// One of the accepted input shapes, after the collection-first rule applied
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionInput {
    Collection(DimensionCollection),
    Named(NamedDimensions),
}

impl DimensionInput {
    /// Raw `[length, width, height]` in the caller's unit, shape- and
    /// positivity-checked.
    ///
    /// # Errors
    ///
    /// [`VolumeError::ArrayShape`], [`VolumeError::ArrayKeys`] or
    /// [`VolumeError::MissingDimensions`] for a bad shape, then
    /// [`VolumeError::NonPositiveDimension`] for bad values.
    pub fn resolve(&self) -> Result<[f64; 3]> {
        let values = match self {
            DimensionInput::Collection(collection) => collection.resolve()?,
            DimensionInput::Named(named) => named.resolve()?,
        };
        ensure_positive(&values)?;
        Ok(values)
    }

    /// Resolve and convert to meters using `unit` for all three values.
    ///
    /// # Errors
    ///
    /// Same as [`DimensionInput::resolve`].
    pub fn normalize(&self, unit: LengthUnit) -> Result<Dimensions> {
        let [length, width, height] = self.resolve()?;
        Dimensions::new(length, width, height, unit)
    }
}

impl From<DimensionCollection> for DimensionInput {
    fn from(collection: DimensionCollection) -> Self {
        DimensionInput::Collection(collection)
    }
}

impl From<NamedDimensions> for DimensionInput {
    fn from(named: NamedDimensions) -> Self {
        DimensionInput::Named(named)
    }
}

/// Everything a caller may pass to [`crate::volume`]
///
/// ```
/// use volume_calc_core::{LengthUnit, VolumeRequest};
///
/// let request = VolumeRequest::new()
///     .length(1.2)
///     .width(0.8)
///     .height(1.0)
///     .unit(LengthUnit::Meters);
/// let volume = volume_calc_core::volume(&request).unwrap();
/// assert!((volume.meters().value() - 0.96).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeRequest {
    /// Takes precedence over the named scalars when present
    pub dimensions: Option<DimensionCollection>,
    pub unit: LengthUnit,
    #[serde(flatten)]
    pub named: NamedDimensions,
}

impl VolumeRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn dimensions(mut self, collection: impl Into<DimensionCollection>) -> Self {
        self.dimensions = Some(collection.into());
        self
    }

    #[must_use]
    pub fn unit(mut self, unit: LengthUnit) -> Self {
        self.unit = unit;
        self
    }

    #[must_use]
    pub fn length(mut self, length: f64) -> Self {
        self.named.length = Some(length);
        self
    }

    #[must_use]
    pub fn width(mut self, width: f64) -> Self {
        self.named.width = Some(width);
        self
    }

    #[must_use]
    pub fn height(mut self, height: f64) -> Self {
        self.named.height = Some(height);
        self
    }

    /// The shape that will be resolved: the collection if one was given,
    /// otherwise the named scalars
    #[must_use]
    pub fn input(&self) -> DimensionInput {
        match &self.dimensions {
            Some(collection) => DimensionInput::Collection(collection.clone()),
            None => DimensionInput::Named(self.named),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed(pairs: &[(&str, f64)]) -> DimensionCollection {
        DimensionCollection::Keyed(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), *v))
                .collect(),
        )
    }

    #[test]
    fn test_sequence_is_positional() {
        let input = DimensionInput::from(DimensionCollection::from([120.0, 80.0, 100.0]));
        assert_eq!(input.resolve(), Ok([120.0, 80.0, 100.0]));
    }

    #[test]
    fn test_keyed_map_order_independent() {
        let input = DimensionInput::from(keyed(&[
            ("height", 100.0),
            ("width", 80.0),
            ("length", 120.0),
        ]));
        assert_eq!(input.resolve(), Ok([120.0, 80.0, 100.0]));
    }

    #[test]
    fn test_wrong_count_reports_count() {
        let input = DimensionInput::from(DimensionCollection::from(vec![120.0, 80.0]));
        assert_eq!(input.resolve(), Err(VolumeError::ArrayShape { count: 2 }));

        let four = keyed(&[("length", 1.0), ("width", 1.0), ("height", 1.0), ("depth", 1.0)]);
        assert_eq!(
            DimensionInput::from(four).resolve(),
            Err(VolumeError::ArrayShape { count: 4 })
        );
    }

    #[test]
    fn test_wrong_keys_reports_sorted_keys() {
        let input = DimensionInput::from(keyed(&[
            ("width", 80.0),
            ("length", 120.0),
            ("depth", 1.0),
        ]));
        assert_eq!(
            input.resolve(),
            Err(VolumeError::ArrayKeys {
                keys: vec!["depth".into(), "length".into(), "width".into()]
            })
        );
    }

    #[test]
    fn test_named_missing_lists_every_absent_name() {
        let named = NamedDimensions {
            length: Some(120.0),
            ..NamedDimensions::default()
        };
        assert_eq!(
            DimensionInput::from(named).resolve(),
            Err(VolumeError::MissingDimensions {
                missing: vec!["width", "height"]
            })
        );

        let none = DimensionInput::from(NamedDimensions::default());
        assert_eq!(
            none.resolve(),
            Err(VolumeError::MissingDimensions {
                missing: vec!["length", "width", "height"]
            })
        );
    }

    #[test]
    fn test_shape_checked_before_positivity() {
        let input = DimensionInput::from(DimensionCollection::from(vec![-1.0, 0.0]));
        assert_eq!(input.resolve(), Err(VolumeError::ArrayShape { count: 2 }));
    }

    #[test]
    fn test_positivity_checked_jointly() {
        let input = DimensionInput::from(NamedDimensions::new(0.0, -5.0, 10.0));
        assert_eq!(input.resolve(), Err(VolumeError::NonPositiveDimension));
    }

    #[test]
    fn test_collection_wins_over_named() {
        let request = VolumeRequest::new()
            .dimensions([120.0, 80.0, 100.0])
            .length(1.0);
        assert!(matches!(request.input(), DimensionInput::Collection(_)));

        // Even a broken collection is not rescued by complete named values
        let request = VolumeRequest::new()
            .dimensions(vec![1.0])
            .length(1.0)
            .width(1.0)
            .height(1.0);
        assert_eq!(
            request.input().resolve(),
            Err(VolumeError::ArrayShape { count: 1 })
        );
    }

    #[test]
    fn test_request_deserializes_both_collection_shapes() {
        let from_array: VolumeRequest =
            serde_json::from_str(r#"{"dimensions": [120, 80, 100], "unit": "cm"}"#).unwrap();
        assert_eq!(from_array.input().resolve(), Ok([120.0, 80.0, 100.0]));

        let from_map: VolumeRequest = serde_json::from_str(
            r#"{"dimensions": {"length": 1.2, "width": 0.8, "height": 1}, "unit": "meters"}"#,
        )
        .unwrap();
        assert_eq!(from_map.unit, LengthUnit::Meters);
        assert_eq!(from_map.input().resolve(), Ok([1.2, 0.8, 1.0]));

        let named: VolumeRequest =
            serde_json::from_str(r#"{"length": 120, "width": 80}"#).unwrap();
        assert_eq!(named.unit, LengthUnit::Centimeters);
        assert_eq!(
            named.input().resolve(),
            Err(VolumeError::MissingDimensions {
                missing: vec!["height"]
            })
        );
    }
}
