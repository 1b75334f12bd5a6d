//! # Roof Bay Area
//!
//! Resolves the unit glazing area of each roof bay category (A-D) from the
//! catalog and multiplies by bay counts to get total roof area.
//!
//! ## Resolution policy
//!
//! One catalog lookup per bay, all four issued concurrently. Each bay
//! resolves independently; the first returned row is used.
//!
//! | Outcome                      | Area | Source                          |
//! |------------------------------|------|---------------------------------|
//! | query returned an error      | 0    | `DB Error: <message>`           |
//! | lookup task aborted          | 0    | `Critical Error: <message>`     |
//! | no matching row              | 0    | `Not found in DB`               |
//! | row with null area           | 0    | `DB (area is null/undefined)`   |
//! | row with an area             | area | `DB`                            |
//!
//! A bay with a zero count contributes zero whatever its lookup outcome.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use gh_core::calculations::bay_area::compute_total_roof_area;
//! use gh_core::catalog::{GlazingRequirementRow, InMemoryCatalog, SharedCatalog};
//! use gh_core::config::EngineSettings;
//! use gh_core::materials::GlazingMaterial;
//! use gh_core::structure::{BayCounts, StructureSpec};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let row = |bay: &str, area: f64| GlazingRequirementRow {
//!     model: "Solar Light".into(), width: 18.0, eave_height: 12.0, length: None,
//!     section: "Roof".into(), bay: Some(bay.into()), vent_type: None,
//!     material_type: "PC8".into(), area_sq_ft: Some(area), linear_ft: None,
//!     panel_count: None, panel_length: None, notes: None,
//! };
//! let catalog: SharedCatalog = Arc::new(
//!     InMemoryCatalog::new().with_glazing_row(row("A", 45.0)).with_glazing_row(row("B", 27.5)),
//! );
//! let spec = StructureSpec {
//!     model: "SL18".into(), width_ft: 18.0, eave_height_ft: 12.0, length_ft: 96.0,
//!     houses: 1, bays: BayCounts::new(2, 8, 0, 0),
//!     roof_glazing: GlazingMaterial::Pc8, roof_vent: None,
//! };
//!
//! let roof = compute_total_roof_area(&catalog, &spec, GlazingMaterial::Pc8, &EngineSettings::default()).await;
//! assert_eq!(roof.total_sq_ft, 310.0);
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{settle_all, CatalogGlazingRecord, GlazingAreaQuery, Settled, SharedCatalog};
use crate::config::EngineSettings;
use crate::errors::Diagnostic;
use crate::materials::GlazingMaterial;
use crate::structure::{Bay, StructureSpec};

/// Where a bay's unit area came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message")]
pub enum AreaSource {
    /// Not yet resolved
    Default,
    /// Catalog row with a numeric area
    Db,
    /// Catalog row whose area column is null
    DbNullArea,
    /// No catalog row matched
    NotFound,
    /// The catalog query returned an error
    DbError(String),
    /// The lookup task itself failed
    CriticalError(String),
}

impl AreaSource {
    /// True when the area came from a catalog value.
    pub fn is_resolved(&self) -> bool {
        matches!(self, AreaSource::Db)
    }
}

impl fmt::Display for AreaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaSource::Default => f.write_str("Default"),
            AreaSource::Db => f.write_str("DB"),
            AreaSource::DbNullArea => f.write_str("DB (area is null/undefined)"),
            AreaSource::NotFound => f.write_str("Not found in DB"),
            AreaSource::DbError(msg) => write!(f, "DB Error: {}", msg),
            AreaSource::CriticalError(msg) => write!(f, "Critical Error: {}", msg),
        }
    }
}

/// Resolved unit area for one bay plus the catalog keys that produced it.
///
/// `width` and `eave_height` are the values on the matched catalog row
/// (falling back to the structure's values), so a follow-up panel length
/// lookup can reuse exactly the same keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaySpecificDetail {
    pub bay: Bay,
    pub count: u32,
    /// Unit area of one bay (sq ft)
    pub area_sq_ft: f64,
    pub source: AreaSource,
    /// count x unit area (sq ft)
    pub contribution_sq_ft: f64,

    // Catalog keys
    pub model: String,
    pub section: String,
    pub vent_type: Option<String>,
    pub material: GlazingMaterial,
    pub width: f64,
    pub eave_height: f64,
}

impl BaySpecificDetail {
    /// Unresolved detail keyed by the structure's own values.
    pub fn default_for(
        bay: Bay,
        spec: &StructureSpec,
        material: GlazingMaterial,
        settings: &EngineSettings,
    ) -> Self {
        BaySpecificDetail {
            bay,
            count: spec.bay_count(bay),
            area_sq_ft: 0.0,
            source: AreaSource::Default,
            contribution_sq_ft: 0.0,
            model: settings.catalog_model(&spec.model).to_string(),
            section: settings.roof_section.clone(),
            vent_type: None,
            material,
            width: spec.width_ft,
            eave_height: spec.eave_height_ft,
        }
    }
}

/// Total roof area with its per-bay breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofAreaResult {
    pub total_sq_ft: f64,
    /// One entry per bay, in A, B, C, D order
    pub bays: Vec<BaySpecificDetail>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RoofAreaResult {
    pub fn bay(&self, bay: Bay) -> Option<&BaySpecificDetail> {
        self.bays.iter().find(|d| d.bay == bay)
    }

    /// count x unit area for a bay, zero if the bay is absent
    pub fn contribution(&self, bay: Bay) -> f64 {
        self.bay(bay).map_or(0.0, |d| d.contribution_sq_ft)
    }
}

fn area_query(detail: &BaySpecificDetail) -> GlazingAreaQuery {
    GlazingAreaQuery {
        model: detail.model.clone(),
        width: detail.width,
        eave_height: detail.eave_height,
        section: detail.section.clone(),
        bay: detail.bay.code().to_string(),
        material_type: detail.material.code().to_string(),
    }
}

/// Apply one settled lookup outcome to a bay detail.
fn apply_outcome(
    mut detail: BaySpecificDetail,
    outcome: Settled<Vec<CatalogGlazingRecord>>,
) -> BaySpecificDetail {
    match outcome {
        Settled::Ok(rows) => match rows.into_iter().next() {
            None => detail.source = AreaSource::NotFound,
            Some(row) => {
                detail.vent_type = row.vent_type;
                detail.width = row.width;
                detail.eave_height = row.eave_height;
                match row.area_sq_ft {
                    Some(area) if area.is_finite() => {
                        detail.area_sq_ft = area.max(0.0);
                        detail.source = AreaSource::Db;
                    }
                    _ => detail.source = AreaSource::DbNullArea,
                }
            }
        },
        Settled::Failed(err) => detail.source = AreaSource::DbError(err.to_string()),
        Settled::Aborted(msg) => detail.source = AreaSource::CriticalError(msg),
    }
    detail.contribution_sq_ft = detail.count as f64 * detail.area_sq_ft;
    detail
}

/// Resolve the unit area of a single bay.
pub async fn resolve_bay_area(
    catalog: &SharedCatalog,
    spec: &StructureSpec,
    bay: Bay,
    material: GlazingMaterial,
    settings: &EngineSettings,
) -> BaySpecificDetail {
    resolve_bays(catalog, spec, &[bay], material, settings)
        .await
        .into_iter()
        .next()
        .unwrap_or_else(|| BaySpecificDetail::default_for(bay, spec, material, settings))
}

async fn resolve_bays(
    catalog: &SharedCatalog,
    spec: &StructureSpec,
    bays: &[Bay],
    material: GlazingMaterial,
    settings: &EngineSettings,
) -> Vec<BaySpecificDetail> {
    let details: Vec<BaySpecificDetail> = bays
        .iter()
        .map(|&bay| BaySpecificDetail::default_for(bay, spec, material, settings))
        .collect();

    let lookups = details
        .iter()
        .map(|detail| {
            let catalog = Arc::clone(catalog);
            let query = area_query(detail);
            tracing::debug!(%query, "resolving bay area");
            async move { catalog.lookup_glazing_area(&query).await }
        })
        .collect();

    let outcomes = settle_all(lookups).await;

    details
        .into_iter()
        .zip(outcomes)
        .map(|(detail, outcome)| apply_outcome(detail, outcome))
        .collect()
}

/// Resolve all four bays and sum `count x unit area` into total roof area.
pub async fn compute_total_roof_area(
    catalog: &SharedCatalog,
    spec: &StructureSpec,
    material: GlazingMaterial,
    settings: &EngineSettings,
) -> RoofAreaResult {
    let bays = resolve_bays(catalog, spec, &Bay::ALL, material, settings).await;

    let mut diagnostics = Vec::new();
    for detail in &bays {
        // Unused bays cannot degrade the total
        if detail.source.is_resolved() || detail.count == 0 {
            continue;
        }
        let message = detail.source.to_string();
        tracing::warn!(bay = %detail.bay, count = detail.count, source = %message, "bay area unresolved");
        diagnostics.push(Diagnostic::lookup(detail.bay.to_string(), message));
    }

    let total_sq_ft = bays.iter().map(|d| d.contribution_sq_ft).sum();

    RoofAreaResult {
        total_sq_ft,
        bays,
        diagnostics,
    }
}
