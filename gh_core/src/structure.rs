//! # Structure Parameters
//!
//! The dimensions and roof configuration of one greenhouse structure, as
//! the calculators consume them.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "model": "SL18",
//!   "width_ft": 18.0,
//!   "eave_height_ft": 12.0,
//!   "length_ft": 96.0,
//!   "houses": 1,
//!   "bays": { "a": 2, "b": "8", "c": 0 },
//!   "roof_glazing": "PC8",
//!   "roof_vent": "Single Vent"
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::GlazingMaterial;
use crate::units::{parse_count, LooseCount};

/// Roof bay category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Bay {
    A,
    B,
    C,
    D,
}

impl Bay {
    pub const ALL: [Bay; 4] = [Bay::A, Bay::B, Bay::C, Bay::D];

    /// Value stored in the catalog's `bay` column
    pub fn code(&self) -> &'static str {
        match self {
            Bay::A => "A",
            Bay::B => "B",
            Bay::C => "C",
            Bay::D => "D",
        }
    }
}

impl fmt::Display for Bay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bay {}", self.code())
    }
}

/// Roof vent configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoofVentConfig {
    #[serde(rename = "Non-Vented")]
    NonVented,
    #[serde(rename = "Single Vent")]
    SingleVent,
    #[serde(rename = "Double Vent")]
    DoubleVent,
}

impl RoofVentConfig {
    /// Catalog `vent_type` value
    pub fn catalog_vent_type(&self) -> &'static str {
        match self {
            RoofVentConfig::NonVented => "Non-Vented",
            RoofVentConfig::SingleVent => "Single Vent",
            RoofVentConfig::DoubleVent => "Double Vent",
        }
    }
}

/// Bay counts as entered. Values may be numbers or numeric strings;
/// anything unparsable counts as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BayCounts {
    #[serde(default)]
    pub a: Option<LooseCount>,
    #[serde(default)]
    pub b: Option<LooseCount>,
    #[serde(default)]
    pub c: Option<LooseCount>,
    #[serde(default)]
    pub d: Option<LooseCount>,
}

impl BayCounts {
    pub fn new(a: u32, b: u32, c: u32, d: u32) -> Self {
        BayCounts {
            a: Some(a.into()),
            b: Some(b.into()),
            c: Some(c.into()),
            d: Some(d.into()),
        }
    }

    pub fn count(&self, bay: Bay) -> u32 {
        let raw = match bay {
            Bay::A => self.a.as_ref(),
            Bay::B => self.b.as_ref(),
            Bay::C => self.c.as_ref(),
            Bay::D => self.d.as_ref(),
        };
        parse_count(raw)
    }
}

/// Input parameters for one structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureSpec {
    /// Model name or abbreviation (e.g., "SL18")
    pub model: String,

    /// Structure width in feet
    pub width_ft: f64,

    /// Eave height in feet
    pub eave_height_ft: f64,

    /// Structure length in feet
    pub length_ft: f64,

    /// Number of houses (gutter-connected spans)
    #[serde(default = "default_houses")]
    pub houses: u32,

    /// Bay counts by category
    #[serde(default)]
    pub bays: BayCounts,

    /// Roof glazing material
    pub roof_glazing: GlazingMaterial,

    /// Roof vent configuration, if the roof is configured at all
    #[serde(default)]
    pub roof_vent: Option<RoofVentConfig>,
}

fn default_houses() -> u32 {
    1
}

impl StructureSpec {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.model.trim().is_empty() {
            return Err(CalcError::missing_field("model"));
        }
        for (field, value) in [
            ("width_ft", self.width_ft),
            ("eave_height_ft", self.eave_height_ft),
            ("length_ft", self.length_ft),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Dimension must be a non-negative number",
                ));
            }
        }
        Ok(())
    }

    pub fn bay_count(&self, bay: Bay) -> u32 {
        self.bays.count(bay)
    }
}
