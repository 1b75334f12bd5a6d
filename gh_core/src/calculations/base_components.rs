//! # Base Components
//!
//! Derives the base trim for each wall category from structure dimensions,
//! wall accessories, and foundation type.
//!
//! ## Algorithm
//!
//! | Category          | Base footage                 | Reduced by accessories |
//! |-------------------|------------------------------|------------------------|
//! | Sidewalls         | length x 2                   | yes                    |
//! | Endwalls          | width x 2                    | yes                    |
//! | Gutter Partitions | length x gutter partitions   | no                     |
//! | Gable Partitions  | width x gable partitions     | no                     |
//!
//! Remaining footage is clamped at zero. A category with nothing left emits
//! nothing. Otherwise a concrete foundation gets base angles (one per
//! `base_angle_length_ft`, rounded up) and anchor bolts per angle; any other
//! foundation gets base stringer by the linear foot, rounded to cents.
//!
//! ## Example
//!
//! ```rust
//! use gh_core::calculations::base_components::{calculate, BaseComponentInput, FoundationFlags};
//! use gh_core::config::EngineSettings;
//!
//! let input = BaseComponentInput {
//!     length_ft: 100.0,
//!     width_ft: 30.0,
//!     gutter_partitions: 0,
//!     gable_partitions: 0,
//!     accessories: vec![],
//!     foundations: FoundationFlags { sidewall_concrete: true, ..Default::default() },
//! };
//!
//! let result = calculate(&input, &EngineSettings::default()).unwrap();
//! assert_eq!(result.totals.base_angle_each, 17.0);
//! assert_eq!(result.totals.anchor_bolt_each, 85.0);
//! assert_eq!(result.totals.base_stringer_linear_ft, 60.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::EngineSettings;
use crate::errors::{CalcError, CalcResult};
use crate::units::non_negative;

pub const BASE_STRINGER_ID: &str = "BASE-STRINGER";
pub const BASE_ANGLE_ID: &str = "BASE-ANGLE";
pub const ANCHOR_BOLT_ID: &str = "ANCHOR-BOLT";

/// Wall category a base component is installed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WallLocation {
    Sidewalls,
    Endwalls,
    #[serde(rename = "Gutter Partitions")]
    GutterPartitions,
    #[serde(rename = "Gable Partitions")]
    GablePartitions,
}

impl WallLocation {
    pub const ALL: [WallLocation; 4] = [
        WallLocation::Sidewalls,
        WallLocation::Endwalls,
        WallLocation::GutterPartitions,
        WallLocation::GablePartitions,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WallLocation::Sidewalls => "Sidewalls",
            WallLocation::Endwalls => "Endwalls",
            WallLocation::GutterPartitions => "Gutter Partitions",
            WallLocation::GablePartitions => "Gable Partitions",
        }
    }

    /// Substring an accessory's free-text location must contain to reduce
    /// this category. Partitions are never reduced.
    fn accessory_match(&self) -> Option<&'static str> {
        match self {
            WallLocation::Sidewalls => Some("sidewall"),
            WallLocation::Endwalls => Some("endwall"),
            WallLocation::GutterPartitions | WallLocation::GablePartitions => None,
        }
    }
}

impl fmt::Display for WallLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// A roll-up or drop wall occupying part of a wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallAccessory {
    /// Free text, e.g. "North Sidewall" or "Endwall"
    pub wall_location: String,
    /// Length in feet
    pub wall_length: f64,
    pub quantity: u32,
}

impl WallAccessory {
    /// Footage removed from the wall (never negative).
    pub fn footage(&self) -> f64 {
        non_negative(self.wall_length) * self.quantity as f64
    }

    fn is_on(&self, location: WallLocation) -> bool {
        location
            .accessory_match()
            .is_some_and(|needle| self.wall_location.to_lowercase().contains(needle))
    }
}

/// Which wall categories sit on a concrete foundation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoundationFlags {
    pub sidewall_concrete: bool,
    pub endwall_concrete: bool,
    pub gutter_partition_concrete: bool,
    pub gable_partition_concrete: bool,
}

impl FoundationFlags {
    pub fn is_concrete(&self, location: WallLocation) -> bool {
        match location {
            WallLocation::Sidewalls => self.sidewall_concrete,
            WallLocation::Endwalls => self.endwall_concrete,
            WallLocation::GutterPartitions => self.gutter_partition_concrete,
            WallLocation::GablePartitions => self.gable_partition_concrete,
        }
    }
}

/// Input parameters for base component derivation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "length_ft": 96.0,
///   "width_ft": 30.0,
///   "gutter_partitions": 1,
///   "gable_partitions": 0,
///   "accessories": [
///     { "wall_location": "Endwall", "wall_length": 20.0, "quantity": 1 }
///   ],
///   "foundations": { "sidewall_concrete": true }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseComponentInput {
    pub length_ft: f64,
    pub width_ft: f64,
    #[serde(default)]
    pub gutter_partitions: u32,
    #[serde(default)]
    pub gable_partitions: u32,
    /// Roll-up and drop walls together
    #[serde(default)]
    pub accessories: Vec<WallAccessory>,
    #[serde(default)]
    pub foundations: FoundationFlags,
}

impl BaseComponentInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [("length_ft", self.length_ft), ("width_ft", self.width_ft)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Dimension must be a non-negative number",
                ));
            }
        }
        for (idx, accessory) in self.accessories.iter().enumerate() {
            if !accessory.wall_length.is_finite() || accessory.wall_length < 0.0 {
                return Err(CalcError::invalid_input(
                    format!("accessories[{}].wall_length", idx),
                    accessory.wall_length.to_string(),
                    "Wall length must be a non-negative number",
                ));
            }
        }
        Ok(())
    }

    /// Category footage before accessory reductions.
    pub fn total_ft(&self, location: WallLocation) -> f64 {
        match location {
            WallLocation::Sidewalls => self.length_ft * 2.0,
            WallLocation::Endwalls => self.width_ft * 2.0,
            WallLocation::GutterPartitions => self.length_ft * self.gutter_partitions as f64,
            WallLocation::GablePartitions => self.width_ft * self.gable_partitions as f64,
        }
    }

    /// Category footage left after accessories, clamped at zero.
    pub fn remaining_ft(&self, location: WallLocation) -> f64 {
        let reduction: f64 = self
            .accessories
            .iter()
            .filter(|a| a.is_on(location))
            .map(WallAccessory::footage)
            .sum();
        non_negative(self.total_ft(location) - reduction)
    }
}

/// Unit a component is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentUnit {
    #[serde(rename = "Linear Ft")]
    LinearFt,
    Each,
}

impl fmt::Display for ComponentUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentUnit::LinearFt => f.pad("Linear Ft"),
            ComponentUnit::Each => f.pad("Each"),
        }
    }
}

/// One line of the component list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedComponent {
    pub assembly_id: String,
    pub description: String,
    pub location: WallLocation,
    pub quantity: f64,
    pub unit: ComponentUnit,
}

impl CalculatedComponent {
    fn new(id: &str, description: &str, location: WallLocation, quantity: f64, unit: ComponentUnit) -> Self {
        CalculatedComponent {
            assembly_id: id.to_string(),
            description: description.to_string(),
            location,
            quantity,
            unit,
        }
    }
}

/// Aggregate quantities across all locations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseComponentTotals {
    pub base_stringer_linear_ft: f64,
    pub base_angle_each: f64,
    pub anchor_bolt_each: f64,
}

impl BaseComponentTotals {
    /// Fold a component list into totals.
    pub fn from_components(components: &[CalculatedComponent]) -> Self {
        components.iter().fold(Self::default(), |mut totals, c| {
            match c.assembly_id.as_str() {
                BASE_STRINGER_ID => totals.base_stringer_linear_ft += c.quantity,
                BASE_ANGLE_ID => totals.base_angle_each += c.quantity,
                ANCHOR_BOLT_ID => totals.anchor_bolt_each += c.quantity,
                _ => {}
            }
            totals
        })
    }
}

/// Base component list with totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseComponentResult {
    /// Components in Sidewalls, Endwalls, Gutter Partitions, Gable Partitions order
    pub components: Vec<CalculatedComponent>,
    pub totals: BaseComponentTotals,
}

impl BaseComponentResult {
    pub fn for_location(&self, location: WallLocation) -> impl Iterator<Item = &CalculatedComponent> {
        self.components.iter().filter(move |c| c.location == location)
    }
}

fn round_cents(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Derive base components for every wall category.
pub fn calculate(input: &BaseComponentInput, settings: &EngineSettings) -> CalcResult<BaseComponentResult> {
    input.validate()?;
    settings.validate()?;

    let mut components = Vec::new();
    for location in WallLocation::ALL {
        let remaining = input.remaining_ft(location);
        if remaining <= 0.0 {
            continue;
        }

        if input.foundations.is_concrete(location) {
            let angles = (remaining / settings.base_angle_length_ft).ceil();
            let bolts = angles * settings.anchor_bolts_per_base_angle as f64;
            components.push(CalculatedComponent::new(
                BASE_ANGLE_ID,
                "Base Angle",
                location,
                angles,
                ComponentUnit::Each,
            ));
            components.push(CalculatedComponent::new(
                ANCHOR_BOLT_ID,
                "Anchor Bolt",
                location,
                bolts,
                ComponentUnit::Each,
            ));
        } else {
            components.push(CalculatedComponent::new(
                BASE_STRINGER_ID,
                "Base Stringer",
                location,
                round_cents(remaining),
                ComponentUnit::LinearFt,
            ));
        }
    }

    let totals = BaseComponentTotals::from_components(&components);
    Ok(BaseComponentResult { components, totals })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(length_ft: f64, width_ft: f64) -> BaseComponentInput {
        BaseComponentInput {
            length_ft,
            width_ft,
            gutter_partitions: 0,
            gable_partitions: 0,
            accessories: Vec::new(),
            foundations: FoundationFlags::default(),
        }
    }

    #[test]
    fn test_concrete_sidewalls() {
        let mut input = input(100.0, 0.0);
        input.foundations.sidewall_concrete = true;

        let result = calculate(&input, &EngineSettings::default()).unwrap();

        assert_eq!(result.components.len(), 2);
        let angle = &result.components[0];
        assert_eq!(angle.description, "Base Angle");
        assert_eq!(angle.location, WallLocation::Sidewalls);
        assert_eq!(angle.quantity, 17.0);
        assert_eq!(angle.unit, ComponentUnit::Each);
        assert_eq!(result.components[1].quantity, 85.0);
    }

    #[test]
    fn test_endwall_accessory_reduction() {
        let mut input = input(0.0, 30.0);
        input.accessories.push(WallAccessory {
            wall_location: "Endwall".to_string(),
            wall_length: 20.0,
            quantity: 1,
        });

        let result = calculate(&input, &EngineSettings::default()).unwrap();

        assert_eq!(result.components.len(), 1);
        let stringer = &result.components[0];
        assert_eq!(stringer.description, "Base Stringer");
        assert_eq!(stringer.location, WallLocation::Endwalls);
        assert_eq!(stringer.quantity, 40.0);
        assert_eq!(stringer.unit.to_string(), "Linear Ft");
    }

    #[test]
    fn test_over_reduction_clamps_to_zero() {
        let mut input = input(50.0, 0.0);
        input.accessories.push(WallAccessory {
            wall_location: "south SIDEWALL".to_string(),
            wall_length: 75.0,
            quantity: 2,
        });

        assert_eq!(input.remaining_ft(WallLocation::Sidewalls), 0.0);
        let result = calculate(&input, &EngineSettings::default()).unwrap();
        assert!(result.for_location(WallLocation::Sidewalls).next().is_none());
    }

    #[test]
    fn test_partitions_ignore_accessories() {
        let mut input = input(96.0, 30.0);
        input.gutter_partitions = 2;
        input.gable_partitions = 1;
        input.accessories.push(WallAccessory {
            wall_location: "Gutter Partition Sidewall".to_string(),
            wall_length: 10.0,
            quantity: 1,
        });

        assert_eq!(input.remaining_ft(WallLocation::GutterPartitions), 192.0);
        assert_eq!(input.remaining_ft(WallLocation::GablePartitions), 30.0);
        assert_eq!(input.remaining_ft(WallLocation::Sidewalls), 182.0);
    }

    #[test]
    fn test_concrete_branch_is_exclusive() {
        let mut input = input(96.0, 30.0);
        input.gutter_partitions = 1;
        input.gable_partitions = 1;
        input.foundations = FoundationFlags {
            sidewall_concrete: true,
            endwall_concrete: false,
            gutter_partition_concrete: true,
            gable_partition_concrete: false,
        };

        let result = calculate(&input, &EngineSettings::default()).unwrap();

        for location in WallLocation::ALL {
            let lines: Vec<_> = result.for_location(location).collect();
            let has_stringer = lines.iter().any(|c| c.assembly_id == BASE_STRINGER_ID);
            let has_angle = lines.iter().any(|c| c.assembly_id == BASE_ANGLE_ID);
            assert!(has_stringer != has_angle, "{} emitted both or neither", location);

            if has_angle {
                let angles = lines.iter().find(|c| c.assembly_id == BASE_ANGLE_ID).unwrap();
                let bolts = lines.iter().find(|c| c.assembly_id == ANCHOR_BOLT_ID).unwrap();
                assert_eq!(bolts.quantity, angles.quantity * 5.0);
            }
        }
    }

    #[test]
    fn test_totals_are_a_fold() {
        let mut input = input(100.0, 30.0);
        input.gable_partitions = 1;
        input.foundations.sidewall_concrete = true;

        let result = calculate(&input, &EngineSettings::default()).unwrap();

        // Endwalls 60 + gable partition 30
        assert_eq!(result.totals.base_stringer_linear_ft, 90.0);
        assert_eq!(result.totals.base_angle_each, 17.0);
        assert_eq!(result.totals.anchor_bolt_each, 85.0);
        assert_eq!(result.totals, BaseComponentTotals::from_components(&result.components));
    }

    #[test]
    fn test_stringer_rounds_to_cents() {
        let input = input(10.0 / 3.0, 0.0);
        let result = calculate(&input, &EngineSettings::default()).unwrap();
        assert_eq!(result.components[0].quantity, 6.67);
    }

    #[test]
    fn test_validation_rejects_negative_dimensions() {
        let err = calculate(&input(-1.0, 30.0), &EngineSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let mut bad = input(96.0, 30.0);
        bad.accessories.push(WallAccessory {
            wall_location: "Sidewall".to_string(),
            wall_length: f64::NAN,
            quantity: 1,
        });
        assert!(calculate(&bad, &EngineSettings::default()).is_err());
    }
}
