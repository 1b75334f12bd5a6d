//! # Engine Settings
//!
//! Tunables shared by every calculator. Settings load from TOML; every field
//! has a default so an empty file (or no file) is valid.
//!
//! ## Example
//!
//! ```rust
//! use gh_core::config::EngineSettings;
//!
//! let settings = EngineSettings::from_toml_str(r#"
//!     default_slitting_fee_per_ft = 0.25
//!
//!     [model_aliases]
//!     SL30 = "Solar Light 30"
//! "#).unwrap();
//!
//! assert_eq!(settings.catalog_model("SL30"), "Solar Light 30");
//! assert_eq!(settings.catalog_model("Unknown"), "Unknown");
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Settings for a calculation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Model abbreviation -> model name as stored in the catalog
    pub model_aliases: BTreeMap<String, String>,

    /// Insect screen slitting fee when the screen record has none ($/linear ft)
    pub default_slitting_fee_per_ft: f64,

    /// Anchor bolts installed per base angle
    pub anchor_bolts_per_base_angle: u32,

    /// Stock length of one base angle (ft)
    pub base_angle_length_ft: f64,

    /// Catalog section name for roof glazing
    pub roof_section: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        let mut model_aliases = BTreeMap::new();
        model_aliases.insert("SL18".to_string(), "Solar Light".to_string());
        EngineSettings {
            model_aliases,
            default_slitting_fee_per_ft: 0.22,
            anchor_bolts_per_base_angle: 5,
            base_angle_length_ft: 12.0,
            roof_section: "Roof".to_string(),
        }
    }
}

impl EngineSettings {
    /// Parse settings from a TOML document.
    pub fn from_toml_str(s: &str) -> CalcResult<Self> {
        let settings: EngineSettings =
            toml::from_str(s).map_err(|e| CalcError::config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            CalcError::file_error("read", path.display().to_string(), e.to_string())
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !(self.base_angle_length_ft > 0.0) {
            return Err(CalcError::config(format!(
                "base_angle_length_ft must be positive, got {}",
                self.base_angle_length_ft
            )));
        }
        if !(self.default_slitting_fee_per_ft >= 0.0) {
            return Err(CalcError::config(format!(
                "default_slitting_fee_per_ft must be non-negative, got {}",
                self.default_slitting_fee_per_ft
            )));
        }
        Ok(())
    }

    /// Model name to use in catalog queries.
    pub fn catalog_model<'a>(&'a self, model: &'a str) -> &'a str {
        self.model_aliases
            .get(model)
            .map(String::as_str)
            .unwrap_or(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.catalog_model("SL18"), "Solar Light");
        assert_eq!(settings.default_slitting_fee_per_ft, 0.22);
        assert_eq!(settings.anchor_bolts_per_base_angle, 5);
        assert_eq!(settings.base_angle_length_ft, 12.0);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let settings = EngineSettings::from_toml_str("").unwrap();
        assert_eq!(settings, EngineSettings::default());
    }

    #[test]
    fn test_partial_override() {
        let settings = EngineSettings::from_toml_str("anchor_bolts_per_base_angle = 4").unwrap();
        assert_eq!(settings.anchor_bolts_per_base_angle, 4);
        assert_eq!(settings.roof_section, "Roof");
    }

    #[test]
    fn test_invalid_settings() {
        let err = EngineSettings::from_toml_str("base_angle_length_ft = 0.0").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");

        let err = EngineSettings::from_toml_str("anchor_bolts_per_base_angle = \"five\"").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}
