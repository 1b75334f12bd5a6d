//! # Glazing Requirements Summary
//!
//! Aggregates every catalog glazing row for one structure size into one
//! line per section, in a fixed display order. Area is summed (a null area
//! counts as zero) and the material comes from the section's first row.
//! Sections without rows are left out.

use serde::{Deserialize, Serialize};

use crate::catalog::{GlazingRequirementRow, SharedCatalog, StructureKey};
use crate::config::EngineSettings;
use crate::errors::Diagnostic;
use crate::structure::StructureSpec;

/// Catalog section key and display label, in display order.
pub const SECTION_ORDER: [(&str, &str); 9] = [
    ("roof", "Roof Glazing"),
    ("roof_vent", "Roof Vent"),
    ("sidewall", "Sidewall Covering"),
    ("endwall", "Endwall Covering"),
    ("gable", "Gable Covering"),
    ("gutter_partition", "Gutter Partitions"),
    ("gable_partition", "Gable Partitions"),
    ("rollup_wall", "Roll-up Wall"),
    ("drop_wall", "Drop Wall"),
];

/// Display label for a section key.
pub fn section_label(section: &str) -> Option<&'static str> {
    SECTION_ORDER
        .iter()
        .find(|(key, _)| *key == section)
        .map(|(_, label)| *label)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlazingSectionSummary {
    pub section: String,
    pub label: String,
    pub material: String,
    pub area_sq_ft: f64,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlazingSummary {
    pub sections: Vec<GlazingSectionSummary>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GlazingSummary {
    pub fn total_area_sq_ft(&self) -> f64 {
        self.sections.iter().map(|s| s.area_sq_ft).sum()
    }
}

/// Aggregate already-fetched rows by section.
pub fn summarize(rows: &[GlazingRequirementRow]) -> Vec<GlazingSectionSummary> {
    SECTION_ORDER
        .iter()
        .filter_map(|(key, label)| {
            let mut matching = rows.iter().filter(|r| r.section == *key).peekable();
            let material = matching.peek()?.material_type.clone();
            let (area, count) = matching.fold((0.0, 0), |(area, count), r| {
                (area + r.area_sq_ft.unwrap_or(0.0), count + 1)
            });
            Some(GlazingSectionSummary {
                section: key.to_string(),
                label: label.to_string(),
                material,
                area_sq_ft: area,
                rows: count,
            })
        })
        .collect()
}

/// Fetch and summarize the glazing requirements for a structure.
///
/// A failed lookup produces an empty summary with a diagnostic.
pub async fn glazing_summary(
    catalog: &SharedCatalog,
    spec: &StructureSpec,
    settings: &EngineSettings,
) -> GlazingSummary {
    let key = StructureKey {
        model: settings.catalog_model(&spec.model).to_string(),
        width: spec.width_ft,
        eave_height: spec.eave_height_ft,
        length: spec.length_ft,
    };
    tracing::debug!(?key, "looking up glazing requirements");

    match catalog.lookup_glazing_requirements(&key).await {
        Ok(rows) => GlazingSummary {
            sections: summarize(&rows),
            diagnostics: Vec::new(),
        },
        Err(err) => {
            tracing::warn!(error = %err, "glazing requirements lookup failed");
            GlazingSummary {
                sections: Vec::new(),
                diagnostics: vec![Diagnostic::lookup("Glazing requirements", err.to_string())],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::materials::GlazingMaterial;
    use crate::structure::BayCounts;
    use std::sync::Arc;

    fn row(section: &str, material: &str, area: Option<f64>) -> GlazingRequirementRow {
        GlazingRequirementRow {
            model: "Solar Light".to_string(),
            width: 18.0,
            eave_height: 12.0,
            length: Some(96.0),
            section: section.to_string(),
            bay: None,
            vent_type: None,
            material_type: material.to_string(),
            area_sq_ft: area,
            linear_ft: None,
            panel_count: None,
            panel_length: None,
            notes: None,
        }
    }

    #[test]
    fn test_summarize_orders_and_sums() {
        let rows = vec![
            row("endwall", "Poly", Some(100.0)),
            row("roof", "PC8", Some(300.0)),
            row("roof", "CPC", None),
            row("roof", "PC8", Some(12.5)),
            row("mystery", "PC8", Some(1.0)),
        ];

        let sections = summarize(&rows);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].label, "Roof Glazing");
        assert_eq!(sections[0].material, "PC8");
        assert_eq!(sections[0].area_sq_ft, 312.5);
        assert_eq!(sections[0].rows, 3);
        assert_eq!(sections[1].label, "Endwall Covering");
    }

    #[test]
    fn test_section_labels() {
        assert_eq!(section_label("rollup_wall"), Some("Roll-up Wall"));
        assert_eq!(section_label("Roof"), None);
    }

    #[tokio::test]
    async fn test_summary_uses_model_alias_and_length() {
        let mut other_length = row("sidewall", "Poly", Some(50.0));
        other_length.length = Some(120.0);
        let catalog: SharedCatalog = Arc::new(
            InMemoryCatalog::new()
                .with_glazing_row(row("sidewall", "Poly", Some(400.0)))
                .with_glazing_row(other_length),
        );
        let spec = StructureSpec {
            model: "SL18".to_string(),
            width_ft: 18.0,
            eave_height_ft: 12.0,
            length_ft: 96.0,
            houses: 1,
            bays: BayCounts::default(),
            roof_glazing: GlazingMaterial::Pc8,
            roof_vent: None,
        };

        let summary = glazing_summary(&catalog, &spec, &EngineSettings::default()).await;

        assert_eq!(summary.sections.len(), 1);
        assert_eq!(summary.total_area_sq_ft(), 400.0);
    }
}
