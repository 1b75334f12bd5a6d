//! # Project Estimate
//!
//! Runs every calculator for a project against one catalog and collects the
//! results, with all diagnostics merged into a single list.
//!
//! Only invalid project input is an error. Catalog trouble degrades the
//! affected parts of the estimate and is reported in `diagnostics`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::base_components::{self, BaseComponentResult};
use crate::calculations::bay_area::{compute_total_roof_area, RoofAreaResult};
use crate::calculations::glazing_summary::{glazing_summary, GlazingSummary};
use crate::calculations::insect_screen::{price_from_catalog, InsectScreenQuote};
use crate::calculations::panels::{
    calculate_area_based_panels, calculate_section_panels, AreaPanelResult, SectionPanelResult,
};
use crate::catalog::SharedCatalog;
use crate::config::EngineSettings;
use crate::errors::{CalcResult, Diagnostic};
use crate::project::Project;

/// Insect screen quote for one vent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentScreenEstimate {
    pub vent_id: Uuid,
    pub vent_type: String,
    pub quote: InsectScreenQuote,
}

/// Everything derived for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEstimate {
    pub project_name: String,
    pub roof_area: RoofAreaResult,
    pub area_panels: AreaPanelResult,
    pub section_panels: SectionPanelResult,
    pub base_components: BaseComponentResult,
    pub insect_screens: Vec<VentScreenEstimate>,
    pub glazing_summary: GlazingSummary,
    /// Diagnostics from every part, in the order the parts are listed
    pub diagnostics: Vec<Diagnostic>,
}

impl ProjectEstimate {
    /// True when no part of the estimate was degraded.
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Sum of curtain prices across all priced insect screens.
    pub fn insect_screen_total(&self) -> f64 {
        self.insect_screens
            .iter()
            .filter_map(|v| v.quote.pricing.as_ref())
            .filter_map(|p| p.curtain_price)
            .sum()
    }
}

/// Run the full estimate for a project.
pub async fn run(
    project: &Project,
    catalog: &SharedCatalog,
    settings: &EngineSettings,
) -> CalcResult<ProjectEstimate> {
    settings.validate()?;
    let spec = &project.structure;
    spec.validate()?;

    let base_components = base_components::calculate(&project.base_component_input(), settings)?;

    let roof_area = compute_total_roof_area(catalog, spec, spec.roof_glazing, settings).await;
    let area_panels = calculate_area_based_panels(catalog, &roof_area).await;
    let section_panels = calculate_section_panels(catalog, spec, settings).await;
    let glazing_summary = glazing_summary(catalog, spec, settings).await;

    let mut insect_screens = Vec::new();
    for (id, vent) in project.vents() {
        let Some(input) = vent.insect_screen_input()? else {
            continue;
        };
        let quote = price_from_catalog(catalog, &input, settings).await?;
        insect_screens.push(VentScreenEstimate {
            vent_id: *id,
            vent_type: vent.vent_type.clone(),
            quote,
        });
    }

    let diagnostics: Vec<Diagnostic> = roof_area
        .diagnostics
        .iter()
        .chain(&area_panels.diagnostics)
        .chain(&section_panels.diagnostics)
        .chain(insect_screens.iter().flat_map(|v| &v.quote.diagnostics))
        .chain(&glazing_summary.diagnostics)
        .cloned()
        .collect();

    tracing::info!(
        project = %project.meta.name,
        roof_sq_ft = roof_area.total_sq_ft,
        area_panels = area_panels.total_panels,
        section_panels = section_panels.total_quantity,
        components = base_components.components.len(),
        screens = insect_screens.len(),
        diagnostics = diagnostics.len(),
        "estimate complete"
    );

    Ok(ProjectEstimate {
        project_name: project.meta.name.clone(),
        roof_area,
        area_panels,
        section_panels,
        base_components,
        insect_screens,
        glazing_summary,
        diagnostics,
    })
}
