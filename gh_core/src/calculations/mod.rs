//! # Quantity Calculations
//!
//! Each calculator derives one part of a greenhouse bill of materials.
//! Calculators that only need caller-supplied data follow the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, settings) -> CalcResult<*Result>` - Pure calculation function
//!
//! Calculators that read the catalog are `async`, take a
//! [`SharedCatalog`](crate::catalog::SharedCatalog), and never fail on a
//! lookup: degraded parts carry a provenance string and a
//! [`Diagnostic`](crate::errors::Diagnostic) instead.
//!
//! ## Available Calculations
//!
//! - [`bay_area`] - Roof area from per-bay catalog areas
//! - [`panels`] - Roof panel counts (area-based and per section)
//! - [`base_components`] - Base stringer, base angle, anchor bolts
//! - [`insect_screen`] - Insect screen fabric width, area and price
//! - [`glazing_summary`] - Catalog glazing rows aggregated by section

pub mod base_components;
pub mod bay_area;
pub mod glazing_summary;
pub mod insect_screen;
pub mod panels;

// Re-export commonly used types
pub use base_components::{
    BaseComponentInput, BaseComponentResult, BaseComponentTotals, CalculatedComponent,
    FoundationFlags, WallAccessory, WallLocation,
};
pub use bay_area::{compute_total_roof_area, resolve_bay_area, AreaSource, BaySpecificDetail, RoofAreaResult};
pub use glazing_summary::{glazing_summary, GlazingSectionSummary, GlazingSummary};
pub use insect_screen::{InsectScreen, InsectScreenInput, InsectScreenPricing, InsectScreenQuote, VentConfiguration};
pub use panels::{
    calculate_area_based_panels, calculate_section_panels, enumerate_roof_sections,
    AreaPanelResult, PanelLengthOutcome, RoofSection, SectionPanelResult,
};
