//! # Catalog Access
//!
//! The estimator reads structure geometry from a catalog it does not own.
//! [`CatalogProvider`] is the seam: calculators receive a [`SharedCatalog`]
//! and never reach for a global client, so every query is visible at the
//! call site and a test can swap in [`InMemoryCatalog`].
//!
//! ## Matching rules
//!
//! Every filter is an exact match. Optional filters (`vent_type`) are
//! `Option<String>`: `None` matches only rows whose field is null, never
//! "any value".
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use gh_core::catalog::{CatalogProvider, InMemoryCatalog, PanelLengthQuery, SharedCatalog};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let catalog: SharedCatalog = Arc::new(InMemoryCatalog::default());
//! let query = PanelLengthQuery {
//!     model: "Solar Light".to_string(),
//!     width: 18.0,
//!     eave_height: 12.0,
//!     section: "Roof".to_string(),
//!     vent_type: None,
//!     material_type: "PC8".to_string(),
//! };
//! assert!(catalog.lookup_panel_length(&query).await.unwrap().is_none());
//! # }
//! ```

pub mod memory;
pub mod settle;

pub use memory::InMemoryCatalog;
pub use settle::{settle_all, Settled};

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::materials::CurtainFabricSpec;

/// Catalog handle passed to every calculator.
pub type SharedCatalog = Arc<dyn CatalogProvider>;

/// Read-only catalog queries used by the estimator.
#[async_trait]
pub trait CatalogProvider: Send + Sync + 'static {
    /// Glazing area rows for one roof bay (or vent) of one structure size.
    async fn lookup_glazing_area(
        &self,
        query: &GlazingAreaQuery,
    ) -> CalcResult<Vec<CatalogGlazingRecord>>;

    /// Panel length for one roof section. At most one row may match.
    async fn lookup_panel_length(
        &self,
        query: &PanelLengthQuery,
    ) -> CalcResult<Option<CatalogPanelRecord>>;

    /// Every glazing requirement row for a structure size, all sections.
    async fn lookup_glazing_requirements(
        &self,
        key: &StructureKey,
    ) -> CalcResult<Vec<GlazingRequirementRow>>;

    /// Curtain fabric by name.
    async fn curtain_fabric(&self, fabric_name: &str) -> CalcResult<Option<CurtainFabricSpec>>;
}

/// Query against `glazing_requirements` for one bay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlazingAreaQuery {
    pub model: String,
    pub width: f64,
    pub eave_height: f64,
    pub section: String,
    pub bay: String,
    pub material_type: String,
}

impl fmt::Display for GlazingAreaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "glazing_requirements(model='{}', width={}, eave_height={}, section='{}', bay='{}', material='{}')",
            self.model, self.width, self.eave_height, self.section, self.bay, self.material_type
        )
    }
}

/// Query against `glazing_panel_requirements` for one roof section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelLengthQuery {
    pub model: String,
    pub width: f64,
    pub eave_height: f64,
    pub section: String,
    /// `None` matches rows with a null vent type only
    pub vent_type: Option<String>,
    pub material_type: String,
}

impl fmt::Display for PanelLengthQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "glazing_panel_requirements(model='{}', width={}, eave_height={}, section='{}', vent_type={}, material='{}')",
            self.model,
            self.width,
            self.eave_height,
            self.section,
            self.vent_type.as_deref().map_or("null".to_string(), |v| format!("'{}'", v)),
            self.material_type
        )
    }
}

/// Structure size key for whole-structure queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureKey {
    pub model: String,
    pub width: f64,
    pub eave_height: f64,
    pub length: f64,
}

/// Projection of a glazing requirement row returned by a bay lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogGlazingRecord {
    pub area_sq_ft: Option<f64>,
    pub vent_type: Option<String>,
    pub width: f64,
    pub eave_height: f64,
}

/// Panel length row. `panel_length` is a mixed-number inch string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPanelRecord {
    pub panel_length: Option<String>,
}

/// Full `glazing_requirements` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlazingRequirementRow {
    pub model: String,
    pub width: f64,
    pub eave_height: f64,
    #[serde(default)]
    pub length: Option<f64>,
    pub section: String,
    #[serde(default)]
    pub bay: Option<String>,
    #[serde(default)]
    pub vent_type: Option<String>,
    pub material_type: String,
    #[serde(default)]
    pub area_sq_ft: Option<f64>,
    #[serde(default)]
    pub linear_ft: Option<f64>,
    #[serde(default)]
    pub panel_count: Option<f64>,
    #[serde(default)]
    pub panel_length: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl GlazingRequirementRow {
    pub fn to_record(&self) -> CatalogGlazingRecord {
        CatalogGlazingRecord {
            area_sq_ft: self.area_sq_ft,
            vent_type: self.vent_type.clone(),
            width: self.width,
            eave_height: self.eave_height,
        }
    }
}

/// Full `glazing_panel_requirements` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRequirementRow {
    pub model: String,
    pub width: f64,
    pub eave_height: f64,
    pub section: String,
    #[serde(default)]
    pub vent_type: Option<String>,
    pub material_type: String,
    #[serde(default)]
    pub panel_length: Option<String>,
}
