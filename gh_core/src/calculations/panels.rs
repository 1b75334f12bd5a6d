//! # Roof Panel Quantities
//!
//! Two independent panel counts for rigid roof glazing. They are reported
//! side by side and never reconciled.
//!
//! ## Area-based count
//!
//! For each bay with a non-zero count and a resolved unit area, the panel
//! length is looked up with the exact catalog keys captured while resolving
//! that bay's area:
//!
//! ```text
//! single_panel_area = (panel_width_in / 12) x (panel_length_in / 12)
//! panels_for_bay    = (bay_area / single_panel_area) x bay_count
//! ```
//!
//! Totals are fractional. A bay that cannot be computed is skipped with a
//! diagnostic; the other bays still count.
//!
//! ## Section-based count
//!
//! The roof is broken into logical sections by vent configuration and house
//! count, one panel length lookup per section:
//!
//! | Vent config | Sections                                                         |
//! |-------------|------------------------------------------------------------------|
//! | Non-Vented  | 2 x houses "Roof Slope"                                          |
//! | Single Vent | per house: "Roof Non-Vent Slope", "Roof Vent Slope", "Roof Vent" |
//! | Double Vent | 2 x houses pairs of "Roof Vent Slope", "Roof Vent"               |
//!
//! Quantity for a found section is `(length_ft / 12) x structural_multiplier`.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::bay_area::{BaySpecificDetail, RoofAreaResult};
use crate::catalog::{settle_all, CatalogPanelRecord, PanelLengthQuery, Settled, SharedCatalog};
use crate::config::EngineSettings;
use crate::errors::Diagnostic;
use crate::materials::GlazingMaterial;
use crate::structure::{Bay, RoofVentConfig, StructureSpec};
use crate::units::{inches_to_feet, parse_mixed_length_to_inches, Feet, Inches};

// ============================================================================
// Area-based count
// ============================================================================

/// Area-based panel count for one bay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BayPanelDetail {
    pub bay: Bay,
    pub count: u32,
    pub area_sq_ft: f64,
    /// Panel length as stored in the catalog
    pub panel_length: Option<String>,
    pub panel_length_ft: Option<f64>,
    pub single_panel_area_sq_ft: Option<f64>,
    /// `None` when the bay was skipped
    pub panels: Option<f64>,
}

impl BayPanelDetail {
    fn from_bay(detail: &BaySpecificDetail) -> Self {
        BayPanelDetail {
            bay: detail.bay,
            count: detail.count,
            area_sq_ft: detail.area_sq_ft,
            panel_length: None,
            panel_length_ft: None,
            single_panel_area_sq_ft: None,
            panels: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaPanelResult {
    /// Sum of panels over all computed bays (not rounded)
    pub total_panels: f64,
    pub bays: Vec<BayPanelDetail>,
    pub diagnostics: Vec<Diagnostic>,
}

fn panel_query(detail: &BaySpecificDetail) -> PanelLengthQuery {
    PanelLengthQuery {
        model: detail.model.clone(),
        width: detail.width,
        eave_height: detail.eave_height,
        section: detail.section.clone(),
        vent_type: detail.vent_type.clone(),
        material_type: detail.material.code().to_string(),
    }
}

/// Panel count derived from each bay's resolved area.
pub async fn calculate_area_based_panels(
    catalog: &SharedCatalog,
    roof: &RoofAreaResult,
) -> AreaPanelResult {
    let mut diagnostics = Vec::new();
    let mut lines: Vec<BayPanelDetail> = roof.bays.iter().map(BayPanelDetail::from_bay).collect();

    // Bays that can contribute: counted, with an area, in a paneled material
    let mut eligible = Vec::new();
    for (idx, detail) in roof.bays.iter().enumerate() {
        if detail.count == 0 || detail.area_sq_ft <= 0.0 {
            continue;
        }
        match detail.material.panel_width_in() {
            Some(width_in) => eligible.push((idx, width_in)),
            None => {
                tracing::warn!(bay = %detail.bay, material = %detail.material, "no panel width for material");
                diagnostics.push(Diagnostic::config_gap(
                    detail.bay.to_string(),
                    format!("No panel width known for material {}", detail.material),
                ));
            }
        }
    }

    let lookups = eligible
        .iter()
        .map(|&(idx, _)| {
            let catalog = Arc::clone(catalog);
            let query = panel_query(&roof.bays[idx]);
            tracing::debug!(%query, "looking up bay panel length");
            async move { catalog.lookup_panel_length(&query).await }
        })
        .collect();
    let outcomes = settle_all(lookups).await;

    let mut total_panels = 0.0;
    for ((idx, width_in), outcome) in eligible.into_iter().zip(outcomes) {
        let detail = &roof.bays[idx];
        let line = &mut lines[idx];
        let scope = detail.bay.to_string();

        let raw = match outcome {
            Settled::Ok(Some(CatalogPanelRecord {
                panel_length: Some(raw),
            })) => raw,
            Settled::Ok(_) => {
                tracing::warn!(bay = %detail.bay, "panel length not found");
                diagnostics.push(Diagnostic::lookup(scope, "Panel length not found"));
                continue;
            }
            Settled::Failed(err) => {
                tracing::warn!(bay = %detail.bay, error = %err, "panel length lookup failed");
                diagnostics.push(Diagnostic::lookup(scope, err.to_string()));
                continue;
            }
            Settled::Aborted(msg) => {
                tracing::warn!(bay = %detail.bay, error = %msg, "panel length lookup aborted");
                diagnostics.push(Diagnostic::lookup(scope, msg));
                continue;
            }
        };
        line.panel_length = Some(raw.clone());

        let Some(length_in) = parse_mixed_length_to_inches(Some(&raw)) else {
            tracing::warn!(bay = %detail.bay, panel_length = %raw, "unparsable panel length");
            diagnostics.push(Diagnostic::parse(
                scope,
                format!("Unparsable panel length '{}'", raw),
            ));
            continue;
        };
        let length_ft = inches_to_feet(length_in);
        line.panel_length_ft = Some(length_ft);

        let single_panel_area = (Feet::from(Inches(width_in)) * Feet(length_ft)).value();
        if single_panel_area <= 0.0 {
            tracing::warn!(bay = %detail.bay, panel_length = %raw, "single panel area is zero");
            diagnostics.push(Diagnostic::parse(scope, "Single panel area is zero"));
            continue;
        }
        line.single_panel_area_sq_ft = Some(single_panel_area);

        let panels = (detail.area_sq_ft / single_panel_area) * detail.count as f64;
        line.panels = Some(panels);
        total_panels += panels;
    }

    AreaPanelResult {
        total_panels,
        bays: lines,
        diagnostics,
    }
}

// ============================================================================
// Section-based count
// ============================================================================

/// One logical roof section needing its own panel length lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoofSection {
    /// Display label, unique within a roof (e.g., "Roof Vent 3")
    pub label: String,
    /// Catalog section name
    pub section: String,
    pub vent_type: Option<String>,
}

impl RoofSection {
    fn new(label: String, section: &str, vent: RoofVentConfig) -> Self {
        RoofSection {
            label,
            section: section.to_string(),
            vent_type: Some(vent.catalog_vent_type().to_string()),
        }
    }
}

/// Enumerate the logical roof sections for a vent configuration.
///
/// Only rigid materials are paneled; anything else yields no sections.
pub fn enumerate_roof_sections(
    material: GlazingMaterial,
    vent: Option<RoofVentConfig>,
    houses: u32,
) -> Vec<RoofSection> {
    if !material.is_rigid() {
        return Vec::new();
    }
    let Some(vent) = vent else {
        return Vec::new();
    };

    let mut sections = Vec::new();
    match vent {
        RoofVentConfig::NonVented => {
            for i in 1..=2 * houses {
                sections.push(RoofSection::new(format!("Roof Slope {}", i), "Roof Slope", vent));
            }
        }
        RoofVentConfig::SingleVent => {
            for house in 1..=houses {
                for name in ["Roof Non-Vent Slope", "Roof Vent Slope", "Roof Vent"] {
                    sections.push(RoofSection::new(format!("{} {}", name, house), name, vent));
                }
            }
        }
        RoofVentConfig::DoubleVent => {
            for i in 1..=2 * houses {
                for name in ["Roof Vent Slope", "Roof Vent"] {
                    sections.push(RoofSection::new(format!("{} {}", name, i), name, vent));
                }
            }
        }
    }
    sections
}

/// Panel length lookup outcome for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value")]
pub enum PanelLengthOutcome {
    Found(String),
    NotFound,
    Error(String),
}

impl fmt::Display for PanelLengthOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelLengthOutcome::Found(length) => f.pad(length),
            PanelLengthOutcome::NotFound => f.pad("Not found"),
            PanelLengthOutcome::Error(_) => f.pad("Error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionPanelLine {
    pub label: String,
    pub section: String,
    pub vent_type: Option<String>,
    pub panel_length: PanelLengthOutcome,
    /// `None` when the section's panel length is unknown
    pub quantity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionPanelResult {
    pub material: GlazingMaterial,
    pub sections: Vec<SectionPanelLine>,
    /// Sum of known section quantities
    pub total_quantity: f64,
    pub diagnostics: Vec<Diagnostic>,
}

/// Length-based panel count per logical roof section.
///
/// A structure with a negative or non-finite dimension counts no sections.
pub async fn calculate_section_panels(
    catalog: &SharedCatalog,
    spec: &StructureSpec,
    settings: &EngineSettings,
) -> SectionPanelResult {
    let material = spec.roof_glazing;
    let mut diagnostics = Vec::new();

    if let Err(err) = spec.validate() {
        tracing::warn!(error = %err, "invalid structure, no roof sections counted");
        diagnostics.push(Diagnostic::parse("Roof sections", err.to_string()));
        return SectionPanelResult {
            material,
            sections: Vec::new(),
            total_quantity: 0.0,
            diagnostics,
        };
    }

    let sections = enumerate_roof_sections(material, spec.roof_vent, spec.houses);
    let multiplier = match material.structural_multiplier() {
        Some(m) if !sections.is_empty() => m,
        _ => {
            let reason = if material.is_rigid() {
                "No roof vent configuration selected".to_string()
            } else {
                format!("Material {} is not paneled", material)
            };
            diagnostics.push(Diagnostic::config_gap("Roof sections", reason));
            return SectionPanelResult {
                material,
                sections: Vec::new(),
                total_quantity: 0.0,
                diagnostics,
            };
        }
    };

    let model = settings.catalog_model(&spec.model).to_string();
    let lookups = sections
        .iter()
        .map(|section| {
            let catalog = Arc::clone(catalog);
            let query = PanelLengthQuery {
                model: model.clone(),
                width: spec.width_ft,
                eave_height: spec.eave_height_ft,
                section: section.section.clone(),
                vent_type: section.vent_type.clone(),
                material_type: material.code().to_string(),
            };
            tracing::debug!(%query, label = %section.label, "looking up section panel length");
            async move { catalog.lookup_panel_length(&query).await }
        })
        .collect();
    let outcomes = settle_all(lookups).await;

    let quantity_per_section = spec.length_ft / 12.0 * multiplier;
    let mut lines = Vec::with_capacity(sections.len());
    for (section, outcome) in sections.into_iter().zip(outcomes) {
        let panel_length = match outcome {
            Settled::Ok(Some(CatalogPanelRecord {
                panel_length: Some(raw),
            })) => PanelLengthOutcome::Found(raw),
            Settled::Ok(_) => PanelLengthOutcome::NotFound,
            Settled::Failed(err) => PanelLengthOutcome::Error(err.to_string()),
            Settled::Aborted(msg) => PanelLengthOutcome::Error(msg),
        };

        let quantity = match &panel_length {
            PanelLengthOutcome::Found(_) => Some(quantity_per_section),
            PanelLengthOutcome::NotFound => {
                tracing::warn!(section = %section.label, "section panel length not found");
                diagnostics.push(Diagnostic::lookup(section.label.clone(), "Not found"));
                None
            }
            PanelLengthOutcome::Error(msg) => {
                tracing::warn!(section = %section.label, error = %msg, "section panel lookup failed");
                diagnostics.push(Diagnostic::lookup(section.label.clone(), msg.clone()));
                None
            }
        };

        lines.push(SectionPanelLine {
            label: section.label,
            section: section.section,
            vent_type: section.vent_type,
            panel_length,
            quantity,
        });
    }

    let total_quantity = lines.iter().filter_map(|l| l.quantity).sum();

    SectionPanelResult {
        material,
        sections: lines,
        total_quantity,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::bay_area::compute_total_roof_area;
    use crate::catalog::{GlazingRequirementRow, InMemoryCatalog, PanelRequirementRow};
    use crate::errors::DiagnosticKind;
    use crate::structure::BayCounts;

    fn roof_row(bay: &str, area: f64, width: f64) -> GlazingRequirementRow {
        GlazingRequirementRow {
            model: "Solar Light".to_string(),
            width,
            eave_height: 12.0,
            length: None,
            section: "Roof".to_string(),
            bay: Some(bay.to_string()),
            vent_type: None,
            material_type: "PC8".to_string(),
            area_sq_ft: Some(area),
            linear_ft: None,
            panel_count: None,
            panel_length: None,
            notes: None,
        }
    }

    fn panel_row(section: &str, vent_type: Option<&str>, width: f64, length: &str) -> PanelRequirementRow {
        PanelRequirementRow {
            model: "Solar Light".to_string(),
            width,
            eave_height: 12.0,
            section: section.to_string(),
            vent_type: vent_type.map(str::to_string),
            material_type: "PC8".to_string(),
            panel_length: Some(length.to_string()),
        }
    }

    fn spec(vent: Option<RoofVentConfig>, houses: u32, material: GlazingMaterial) -> StructureSpec {
        StructureSpec {
            model: "SL18".to_string(),
            width_ft: 18.0,
            eave_height_ft: 12.0,
            length_ft: 96.0,
            houses,
            bays: BayCounts::new(2, 8, 0, 0),
            roof_glazing: material,
            roof_vent: vent,
        }
    }

    #[test]
    fn test_enumerate_non_vented() {
        let sections = enumerate_roof_sections(GlazingMaterial::Pc8, Some(RoofVentConfig::NonVented), 2);
        assert_eq!(sections.len(), 4);
        assert_eq!(sections[0].label, "Roof Slope 1");
        assert_eq!(sections[3].label, "Roof Slope 4");
        assert!(sections.iter().all(|s| s.vent_type.as_deref() == Some("Non-Vented")));
    }

    #[test]
    fn test_enumerate_single_vent() {
        let sections = enumerate_roof_sections(GlazingMaterial::Cpc, Some(RoofVentConfig::SingleVent), 2);
        assert_eq!(sections.len(), 6);
        let names: Vec<&str> = sections.iter().take(3).map(|s| s.section.as_str()).collect();
        assert_eq!(names, ["Roof Non-Vent Slope", "Roof Vent Slope", "Roof Vent"]);
        assert!(sections.iter().all(|s| s.vent_type.as_deref() == Some("Single Vent")));
    }

    #[test]
    fn test_enumerate_double_vent() {
        let sections = enumerate_roof_sections(GlazingMaterial::Gr7, Some(RoofVentConfig::DoubleVent), 1);
        assert_eq!(sections.len(), 4);
        assert_eq!(sections[0].section, "Roof Vent Slope");
        assert_eq!(sections[1].section, "Roof Vent");
        assert!(sections.iter().all(|s| s.vent_type.as_deref() == Some("Double Vent")));
    }

    #[test]
    fn test_enumerate_non_rigid_or_unconfigured() {
        assert!(enumerate_roof_sections(GlazingMaterial::Poly, Some(RoofVentConfig::SingleVent), 3).is_empty());
        assert!(enumerate_roof_sections(GlazingMaterial::Pc8, None, 3).is_empty());
    }

    #[tokio::test]
    async fn test_area_based_panels_use_record_keys() {
        let mut spec = spec(None, 1, GlazingMaterial::Pc8);
        spec.width_ft = 18.5;
        let catalog: SharedCatalog = Arc::new(
            InMemoryCatalog::new()
                .with_glazing_row(roof_row("A", 71.25, 18.5))
                .with_glazing_row(roof_row("B", 35.625, 18.5))
                .with_panel_row(panel_row("Roof", None, 18.5, "144\"")),
        );
        let settings = EngineSettings::default();
        let roof = compute_total_roof_area(&catalog, &spec, GlazingMaterial::Pc8, &settings).await;

        let panels = calculate_area_based_panels(&catalog, &roof).await;

        // single panel = 71.25/12 * 12 = 71.25 sq ft
        // A: 71.25 / 71.25 * 2 = 2.0, B: 35.625 / 71.25 * 8 = 4.0
        assert!((panels.total_panels - 6.0).abs() < 1e-9);
        assert!(panels.diagnostics.is_empty());
        let a = panels.bays.iter().find(|b| b.bay == Bay::A).unwrap();
        assert_eq!(a.panel_length_ft, Some(12.0));
    }

    #[tokio::test]
    async fn test_area_based_skips_unparsable_bay() {
        let mut b_row = roof_row("B", 35.625, 18.0);
        b_row.vent_type = Some("Single Vent".to_string());
        let catalog: SharedCatalog = Arc::new(
            InMemoryCatalog::new()
                .with_glazing_row(roof_row("A", 71.25, 18.0))
                .with_glazing_row(b_row)
                .with_panel_row(panel_row("Roof", None, 18.0, "144\""))
                .with_panel_row(panel_row("Roof", Some("Single Vent"), 18.0, "twelve feet")),
        );
        let settings = EngineSettings::default();
        let spec = spec(None, 1, GlazingMaterial::Pc8);
        let roof = compute_total_roof_area(&catalog, &spec, GlazingMaterial::Pc8, &settings).await;

        let panels = calculate_area_based_panels(&catalog, &roof).await;

        assert!((panels.total_panels - 2.0).abs() < 1e-9);
        assert_eq!(panels.diagnostics.len(), 1);
        assert_eq!(panels.diagnostics[0].kind, DiagnosticKind::ParseFailure);
        let b = panels.bays.iter().find(|b| b.bay == Bay::B).unwrap();
        assert!(b.panels.is_none());
    }

    #[tokio::test]
    async fn test_area_based_skips_zero_length_panel() {
        let mut b_row = roof_row("B", 35.625, 18.0);
        b_row.vent_type = Some("Single Vent".to_string());
        let catalog: SharedCatalog = Arc::new(
            InMemoryCatalog::new()
                .with_glazing_row(roof_row("A", 71.25, 18.0))
                .with_glazing_row(b_row)
                .with_panel_row(panel_row("Roof", None, 18.0, "144\""))
                .with_panel_row(panel_row("Roof", Some("Single Vent"), 18.0, "0")),
        );
        let settings = EngineSettings::default();
        let spec = spec(None, 1, GlazingMaterial::Pc8);
        let roof = compute_total_roof_area(&catalog, &spec, GlazingMaterial::Pc8, &settings).await;

        let panels = calculate_area_based_panels(&catalog, &roof).await;

        // Bay A alone: 71.25 / 71.25 * 2
        assert!((panels.total_panels - 2.0).abs() < 1e-9);
        assert_eq!(panels.diagnostics.len(), 1);
        assert_eq!(panels.diagnostics[0].kind, DiagnosticKind::ParseFailure);
        assert_eq!(panels.diagnostics[0].scope, "Bay B");
        let b = panels.bays.iter().find(|b| b.bay == Bay::B).unwrap();
        assert_eq!(b.panel_length_ft, Some(0.0));
        assert!(b.single_panel_area_sq_ft.is_none());
        assert!(b.panels.is_none());
    }

    #[tokio::test]
    async fn test_area_based_poly_is_a_configuration_gap() {
        let mut row = roof_row("A", 50.0, 18.0);
        row.material_type = "Poly".to_string();
        let catalog: SharedCatalog = Arc::new(InMemoryCatalog::new().with_glazing_row(row));
        let settings = EngineSettings::default();
        let spec = spec(None, 1, GlazingMaterial::Poly);
        let roof = compute_total_roof_area(&catalog, &spec, GlazingMaterial::Poly, &settings).await;

        let panels = calculate_area_based_panels(&catalog, &roof).await;
        assert_eq!(panels.total_panels, 0.0);
        assert_eq!(panels.diagnostics[0].kind, DiagnosticKind::ConfigurationGap);
    }

    #[tokio::test]
    async fn test_section_panels_single_vent() {
        let catalog: SharedCatalog = Arc::new(
            InMemoryCatalog::new()
                .with_panel_row(panel_row("Roof Non-Vent Slope", Some("Single Vent"), 18.0, "115 9/16\""))
                .with_panel_row(panel_row("Roof Vent Slope", Some("Single Vent"), 18.0, "60\""))
                .fail_panel_section("Roof Vent", "statement timeout"),
        );
        let spec = spec(Some(RoofVentConfig::SingleVent), 1, GlazingMaterial::Pc8);

        let result = calculate_section_panels(&catalog, &spec, &EngineSettings::default()).await;

        assert_eq!(result.sections.len(), 3);
        // 96 / 12 * 2 = 16 per found section
        assert_eq!(result.sections[0].quantity, Some(16.0));
        assert_eq!(result.sections[0].panel_length.to_string(), "115 9/16\"");
        assert_eq!(result.sections[1].quantity, Some(16.0));
        assert_eq!(result.sections[2].quantity, None);
        assert_eq!(result.sections[2].panel_length.to_string(), "Error");
        assert_eq!(result.total_quantity, 32.0);
        assert_eq!(result.diagnostics.len(), 1);
    }

    #[tokio::test]
    async fn test_section_panels_missing_rows() {
        let catalog: SharedCatalog = Arc::new(InMemoryCatalog::new());
        let spec = spec(Some(RoofVentConfig::NonVented), 1, GlazingMaterial::Gr7);

        let result = calculate_section_panels(&catalog, &spec, &EngineSettings::default()).await;

        assert_eq!(result.sections.len(), 2);
        assert!(result
            .sections
            .iter()
            .all(|s| s.panel_length == PanelLengthOutcome::NotFound && s.quantity.is_none()));
        assert_eq!(result.total_quantity, 0.0);
    }

    #[tokio::test]
    async fn test_section_panels_reject_bad_length() {
        let catalog: SharedCatalog = Arc::new(
            InMemoryCatalog::new().with_panel_row(panel_row("Roof Slope", Some("Non-Vented"), 18.0, "144\"")),
        );
        for length_ft in [-96.0, f64::NAN] {
            let mut spec = spec(Some(RoofVentConfig::NonVented), 1, GlazingMaterial::Pc8);
            spec.length_ft = length_ft;

            let result = calculate_section_panels(&catalog, &spec, &EngineSettings::default()).await;

            assert!(result.sections.is_empty());
            assert_eq!(result.total_quantity, 0.0);
            assert_eq!(result.diagnostics.len(), 1);
            assert_eq!(result.diagnostics[0].kind, DiagnosticKind::ParseFailure);
        }
    }

    #[tokio::test]
    async fn test_section_panels_poly_is_empty() {
        let catalog: SharedCatalog = Arc::new(InMemoryCatalog::new());
        let spec = spec(Some(RoofVentConfig::SingleVent), 1, GlazingMaterial::Poly);

        let result = calculate_section_panels(&catalog, &spec, &EngineSettings::default()).await;
        assert!(result.sections.is_empty());
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::ConfigurationGap);
    }
}
