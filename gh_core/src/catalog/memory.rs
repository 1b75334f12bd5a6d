//! In-memory catalog.
//!
//! Holds catalog tables loaded from a JSON export and answers queries with
//! the same exact-match and null-match rules as the hosted database. Used by
//! the CLI and as the test double for every calculator.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "glazing_requirements": [
//!     { "model": "Solar Light", "width": 18, "eave_height": 12, "section": "Roof",
//!       "bay": "A", "material_type": "PC8", "area_sq_ft": 45.0 }
//!   ],
//!   "panel_requirements": [
//!     { "model": "Solar Light", "width": 18, "eave_height": 12, "section": "Roof",
//!       "vent_type": null, "material_type": "PC8", "panel_length": "115 9/16\"" }
//!   ],
//!   "curtain_fabrics": []
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{
    CatalogGlazingRecord, CatalogPanelRecord, CatalogProvider, GlazingAreaQuery,
    GlazingRequirementRow, PanelLengthQuery, PanelRequirementRow, StructureKey,
};
use crate::errors::{CalcError, CalcResult};
use crate::materials::CurtainFabricSpec;

/// Catalog tables held in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryCatalog {
    #[serde(default)]
    pub glazing_requirements: Vec<GlazingRequirementRow>,
    #[serde(default)]
    pub panel_requirements: Vec<PanelRequirementRow>,
    #[serde(default)]
    pub curtain_fabrics: Vec<CurtainFabricSpec>,

    /// Bay -> error message returned for glazing area lookups on that bay
    #[serde(skip)]
    failing_bays: HashMap<String, String>,
    /// Section -> error message returned for panel lookups on that section
    #[serde(skip)]
    failing_sections: HashMap<String, String>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog export.
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a catalog export from disk.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            CalcError::file_error("read", path.display().to_string(), e.to_string())
        })?;
        Self::from_json_str(&text)
    }

    pub fn with_glazing_row(mut self, row: GlazingRequirementRow) -> Self {
        self.glazing_requirements.push(row);
        self
    }

    pub fn with_panel_row(mut self, row: PanelRequirementRow) -> Self {
        self.panel_requirements.push(row);
        self
    }

    pub fn with_fabric(mut self, fabric: CurtainFabricSpec) -> Self {
        self.curtain_fabrics.push(fabric);
        self
    }

    /// Make glazing area lookups for `bay` return an error.
    pub fn fail_glazing_bay(mut self, bay: impl Into<String>, message: impl Into<String>) -> Self {
        self.failing_bays.insert(bay.into(), message.into());
        self
    }

    /// Make panel length lookups for `section` return an error.
    pub fn fail_panel_section(
        mut self,
        section: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.failing_sections.insert(section.into(), message.into());
        self
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn lookup_glazing_area(
        &self,
        query: &GlazingAreaQuery,
    ) -> CalcResult<Vec<CatalogGlazingRecord>> {
        if let Some(message) = self.failing_bays.get(&query.bay) {
            return Err(CalcError::catalog_lookup(query.to_string(), message.clone()));
        }

        Ok(self
            .glazing_requirements
            .iter()
            .filter(|row| {
                row.model == query.model
                    && row.width == query.width
                    && row.eave_height == query.eave_height
                    && row.section == query.section
                    && row.bay.as_deref() == Some(query.bay.as_str())
                    && row.material_type == query.material_type
            })
            .map(GlazingRequirementRow::to_record)
            .collect())
    }

    async fn lookup_panel_length(
        &self,
        query: &PanelLengthQuery,
    ) -> CalcResult<Option<CatalogPanelRecord>> {
        if let Some(message) = self.failing_sections.get(&query.section) {
            return Err(CalcError::catalog_lookup(query.to_string(), message.clone()));
        }

        let mut matches = self.panel_requirements.iter().filter(|row| {
            row.model == query.model
                && row.width == query.width
                && row.eave_height == query.eave_height
                && row.section == query.section
                && row.vent_type == query.vent_type
                && row.material_type == query.material_type
        });

        let first = matches.next();
        if matches.next().is_some() {
            return Err(CalcError::catalog_lookup(
                query.to_string(),
                "multiple rows returned where at most one was expected",
            ));
        }

        Ok(first.map(|row| CatalogPanelRecord {
            panel_length: row.panel_length.clone(),
        }))
    }

    async fn lookup_glazing_requirements(
        &self,
        key: &StructureKey,
    ) -> CalcResult<Vec<GlazingRequirementRow>> {
        Ok(self
            .glazing_requirements
            .iter()
            .filter(|row| {
                row.model == key.model
                    && row.width == key.width
                    && row.eave_height == key.eave_height
                    && row.length == Some(key.length)
            })
            .cloned()
            .collect())
    }

    async fn curtain_fabric(&self, fabric_name: &str) -> CalcResult<Option<CurtainFabricSpec>> {
        Ok(self
            .curtain_fabrics
            .iter()
            .find(|f| f.fabric_name == fabric_name)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel_row(section: &str, vent_type: Option<&str>, length: &str) -> PanelRequirementRow {
        PanelRequirementRow {
            model: "Solar Light".to_string(),
            width: 18.0,
            eave_height: 12.0,
            section: section.to_string(),
            vent_type: vent_type.map(str::to_string),
            material_type: "PC8".to_string(),
            panel_length: Some(length.to_string()),
        }
    }

    fn query(section: &str, vent_type: Option<&str>) -> PanelLengthQuery {
        PanelLengthQuery {
            model: "Solar Light".to_string(),
            width: 18.0,
            eave_height: 12.0,
            section: section.to_string(),
            vent_type: vent_type.map(str::to_string),
            material_type: "PC8".to_string(),
        }
    }

    #[tokio::test]
    async fn test_null_vent_type_is_not_a_wildcard() {
        let catalog = InMemoryCatalog::new()
            .with_panel_row(panel_row("Roof", Some("Single Vent"), "100\""));

        let found = catalog.lookup_panel_length(&query("Roof", None)).await.unwrap();
        assert!(found.is_none());

        let found = catalog
            .lookup_panel_length(&query("Roof", Some("Single Vent")))
            .await
            .unwrap();
        assert_eq!(found.unwrap().panel_length.as_deref(), Some("100\""));
    }

    #[tokio::test]
    async fn test_null_vent_type_matches_null() {
        let catalog = InMemoryCatalog::new().with_panel_row(panel_row("Roof", None, "96\""));
        let found = catalog.lookup_panel_length(&query("Roof", None)).await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_panel_rows_error() {
        let catalog = InMemoryCatalog::new()
            .with_panel_row(panel_row("Roof", None, "96\""))
            .with_panel_row(panel_row("Roof", None, "97\""));
        let err = catalog.lookup_panel_length(&query("Roof", None)).await.unwrap_err();
        assert_eq!(err.error_code(), "CATALOG_LOOKUP");
    }

    #[tokio::test]
    async fn test_injected_section_failure() {
        let catalog = InMemoryCatalog::new().fail_panel_section("Roof Vent", "timeout");
        let err = catalog
            .lookup_panel_length(&query("Roof Vent", Some("Single Vent")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_load_from_json() {
        let json = r#"{
            "glazing_requirements": [
                { "model": "Solar Light", "width": 18, "eave_height": 12, "section": "Roof",
                  "bay": "A", "material_type": "PC8", "area_sq_ft": 45.0 }
            ],
            "curtain_fabrics": [
                { "fabric_name": "Econet", "fabric_type": "Insect Screen",
                  "price_0_5000": 0.4, "price_5000_20000": 0.35, "price_20000_plus": 0.3,
                  "width_size": [10, 12] }
            ]
        }"#;
        let catalog = InMemoryCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.glazing_requirements.len(), 1);
        assert!(catalog.panel_requirements.is_empty());
        assert_eq!(catalog.curtain_fabrics[0].width_size, vec![10.0, 12.0]);
    }
}
