//! # Materials Database
//!
//! Glazing material codes and the static geometry the estimator needs for
//! each one, plus curtain fabric catalog entries.
//!
//! ## Material Types
//!
//! - **PC8**: 8 mm twin-wall polycarbonate
//! - **PC80%**: 8 mm polycarbonate, 80% light transmission
//! - **CPC**: corrugated polycarbonate
//! - **GR7**: 7 oz. corrugated fiberglass
//! - **Poly**: film glazing, sold by area (no panels)
//!
//! ## Example
//!
//! ```rust
//! use gh_core::materials::GlazingMaterial;
//!
//! let pc8: GlazingMaterial = "PC8".parse().unwrap();
//! assert_eq!(pc8.panel_width_in(), Some(71.25));
//! assert_eq!(pc8.structural_multiplier(), Some(2.0));
//! assert!(GlazingMaterial::Poly.panel_width_in().is_none());
//! ```

pub mod fabrics;

pub use fabrics::{CurtainFabricSpec, FabricType, PriceTier};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Roof and wall glazing material.
///
/// Serializes to the catalog's `material_type` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlazingMaterial {
    #[serde(rename = "PC8")]
    Pc8,
    #[serde(rename = "PC80%")]
    Pc80,
    #[serde(rename = "CPC")]
    Cpc,
    #[serde(rename = "GR7")]
    Gr7,
    #[serde(rename = "Poly")]
    Poly,
}

/// Geometry of a rigid (paneled) glazing material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidMaterialGeometry {
    pub material: GlazingMaterial,
    /// Installed panel width in inches
    pub panel_width_in: f64,
    /// Panels per foot of structure length, per roof section
    pub structural_multiplier: f64,
}

/// Rigid materials that are estimated in panels.
pub static RIGID_MATERIALS: [RigidMaterialGeometry; 4] = [
    RigidMaterialGeometry {
        material: GlazingMaterial::Pc8,
        panel_width_in: 71.25,
        structural_multiplier: 2.0,
    },
    RigidMaterialGeometry {
        material: GlazingMaterial::Pc80,
        panel_width_in: 71.25,
        structural_multiplier: 2.0,
    },
    RigidMaterialGeometry {
        material: GlazingMaterial::Cpc,
        panel_width_in: 48.0,
        structural_multiplier: 3.0,
    },
    RigidMaterialGeometry {
        material: GlazingMaterial::Gr7,
        panel_width_in: 36.0,
        structural_multiplier: 4.0,
    },
];

impl GlazingMaterial {
    /// All materials, in catalog order
    pub const ALL: [GlazingMaterial; 5] = [
        GlazingMaterial::Pc8,
        GlazingMaterial::Pc80,
        GlazingMaterial::Cpc,
        GlazingMaterial::Gr7,
        GlazingMaterial::Poly,
    ];

    /// Catalog `material_type` code
    pub fn code(&self) -> &'static str {
        match self {
            GlazingMaterial::Pc8 => "PC8",
            GlazingMaterial::Pc80 => "PC80%",
            GlazingMaterial::Cpc => "CPC",
            GlazingMaterial::Gr7 => "GR7",
            GlazingMaterial::Poly => "Poly",
        }
    }

    /// Panel geometry, or `None` for materials not sold in panels
    pub fn rigid_geometry(&self) -> Option<&'static RigidMaterialGeometry> {
        RIGID_MATERIALS.iter().find(|g| g.material == *self)
    }

    /// Panel width in inches
    pub fn panel_width_in(&self) -> Option<f64> {
        self.rigid_geometry().map(|g| g.panel_width_in)
    }

    /// Length-based panel multiplier
    pub fn structural_multiplier(&self) -> Option<f64> {
        self.rigid_geometry().map(|g| g.structural_multiplier)
    }

    pub fn is_rigid(&self) -> bool {
        self.rigid_geometry().is_some()
    }
}

impl fmt::Display for GlazingMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

impl FromStr for GlazingMaterial {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GlazingMaterial::ALL
            .iter()
            .copied()
            .find(|m| m.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CalcError::material_not_found(s))
    }
}
