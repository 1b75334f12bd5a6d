//! # Project Data Structures
//!
//! The `Project` struct is the root container for one greenhouse quote:
//! the structure, its base walls, and every accessory attached to it.
//! Projects serialize to human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, name, customer, timestamps)
//! ├── structure: StructureSpec (model, dimensions, bays, roof)
//! ├── walls: WallLayout (partitions, foundations)
//! └── items: BTreeMap<Uuid, Accessory> (roll-up walls, drop walls, vents)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use gh_core::calculations::WallAccessory;
//! use gh_core::materials::GlazingMaterial;
//! use gh_core::project::{Accessory, Project};
//! use gh_core::structure::{BayCounts, StructureSpec};
//!
//! let structure = StructureSpec {
//!     model: "SL18".into(), width_ft: 18.0, eave_height_ft: 12.0, length_ft: 96.0,
//!     houses: 1, bays: BayCounts::new(2, 8, 0, 0),
//!     roof_glazing: GlazingMaterial::Pc8, roof_vent: None,
//! };
//! let mut project = Project::new("North Range", "Valley Growers", structure);
//!
//! project.add_item(Accessory::DropWall(WallAccessory {
//!     wall_location: "Endwall".into(),
//!     wall_length: 20.0,
//!     quantity: 1,
//! }));
//!
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("DropWall"));
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::base_components::{BaseComponentInput, FoundationFlags, WallAccessory};
use crate::calculations::insect_screen::{InsectScreen, InsectScreenInput, VentConfiguration};
use crate::errors::CalcResult;
use crate::structure::StructureSpec;

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Accessories are stored in a UUID-keyed map. A `BTreeMap` keeps
/// iteration (and therefore every derived list) in a stable order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, name, customer)
    pub meta: ProjectMetadata,

    /// The greenhouse structure being quoted
    pub structure: StructureSpec,

    /// Partitions and foundations
    #[serde(default)]
    pub walls: WallLayout,

    /// All accessories, keyed by UUID
    #[serde(default)]
    pub items: BTreeMap<Uuid, Accessory>,
}

impl Project {
    /// Create a new project with no accessories.
    ///
    /// # Arguments
    ///
    /// * `name` - Project name
    /// * `customer` - Customer name
    /// * `structure` - Structure being quoted
    pub fn new(name: impl Into<String>, customer: impl Into<String>, structure: StructureSpec) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                name: name.into(),
                customer: customer.into(),
                created: now,
                modified: now,
            },
            structure,
            walls: WallLayout::default(),
            items: BTreeMap::new(),
        }
    }

    /// Parse a project from JSON.
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add an accessory to the project.
    ///
    /// Returns the UUID assigned to the accessory.
    pub fn add_item(&mut self, item: Accessory) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove an accessory by UUID.
    ///
    /// Returns the removed accessory if it existed.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<Accessory> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&Accessory> {
        self.items.get(id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Roll-up and drop walls together.
    pub fn wall_accessories(&self) -> Vec<WallAccessory> {
        self.items
            .values()
            .filter_map(|item| match item {
                Accessory::RollupWall(w) | Accessory::DropWall(w) => Some(w.clone()),
                Accessory::Vent(_) => None,
            })
            .collect()
    }

    /// Vents with their UUIDs.
    pub fn vents(&self) -> impl Iterator<Item = (&Uuid, &Vent)> {
        self.items.iter().filter_map(|(id, item)| match item {
            Accessory::Vent(v) => Some((id, v)),
            _ => None,
        })
    }

    /// Input for the base component calculator.
    pub fn base_component_input(&self) -> BaseComponentInput {
        BaseComponentInput {
            length_ft: self.structure.length_ft,
            width_ft: self.structure.width_ft,
            gutter_partitions: self.walls.gutter_partitions,
            gable_partitions: self.walls.gable_partitions,
            accessories: self.wall_accessories(),
            foundations: self.walls.foundations,
        }
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub name: String,

    pub customer: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Partition counts and foundation types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallLayout {
    pub gutter_partitions: u32,
    pub gable_partitions: u32,
    pub foundations: FoundationFlags,
}

/// Anything attached to the structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Accessory {
    RollupWall(WallAccessory),
    DropWall(WallAccessory),
    Vent(Vent),
}

impl Accessory {
    pub fn kind(&self) -> &'static str {
        match self {
            Accessory::RollupWall(_) => "Roll-up Wall",
            Accessory::DropWall(_) => "Drop Wall",
            Accessory::Vent(_) => "Vent",
        }
    }
}

/// A vent line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vent {
    /// Vent product, e.g. "Solar Light Roof"
    pub vent_type: String,
    #[serde(default)]
    pub configuration: VentConfiguration,
    /// Vent size in inches
    #[serde(default)]
    pub vent_size_in: Option<f64>,
    pub vent_quantity: u32,
    pub vent_length_ft: f64,
    #[serde(default)]
    pub insect_screen: Option<ScreenSelection>,
}

/// Insect screen chosen for a vent. Quantity and length follow the vent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenSelection {
    pub fabric_name: String,
    pub width_ft: f64,
    #[serde(default)]
    pub slitting_fee: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Vent {
    /// Pricing input for this vent's insect screen, if it has one.
    pub fn insect_screen_input(&self) -> CalcResult<Option<InsectScreenInput>> {
        let Some(selection) = self.insect_screen.as_ref() else {
            return Ok(None);
        };
        let mut screen = InsectScreen::for_vent(
            selection.fabric_name.clone(),
            self.vent_quantity,
            self.vent_length_ft,
            self.configuration,
            selection.width_ft,
            selection.slitting_fee,
        )?;
        screen.notes = selection.notes.clone();
        Ok(Some(InsectScreenInput {
            screen,
            vent_quantity: self.vent_quantity,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::GlazingMaterial;
    use crate::structure::BayCounts;

    fn structure() -> StructureSpec {
        StructureSpec {
            model: "SL18".to_string(),
            width_ft: 30.0,
            eave_height_ft: 12.0,
            length_ft: 96.0,
            houses: 1,
            bays: BayCounts::new(2, 8, 0, 0),
            roof_glazing: GlazingMaterial::Pc8,
            roof_vent: None,
        }
    }

    fn vent(configuration: VentConfiguration) -> Vent {
        Vent {
            vent_type: "Solar Light Roof".to_string(),
            configuration,
            vent_size_in: Some(36.0),
            vent_quantity: 3,
            vent_length_ft: 96.0,
            insect_screen: Some(ScreenSelection {
                fabric_name: "Econet".to_string(),
                width_ft: 3.5,
                slitting_fee: None,
                notes: None,
            }),
        }
    }

    #[test]
    fn test_project_creation() {
        let project = Project::new("North Range", "Valley Growers", structure());
        assert_eq!(project.meta.name, "North Range");
        assert_eq!(project.meta.customer, "Valley Growers");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.item_count(), 0);
    }

    #[test]
    fn test_project_serialization() {
        let mut project = Project::new("North Range", "Valley Growers", structure());
        project.add_item(Accessory::Vent(vent(VentConfiguration::Double)));
        let json = serde_json::to_string_pretty(&project).unwrap();

        assert!(json.contains("\"type\": \"Vent\""));
        assert!(json.contains("Econet"));

        let roundtrip = Project::from_json_str(&json).unwrap();
        assert_eq!(roundtrip.item_count(), 1);
        assert_eq!(roundtrip.structure, project.structure);
    }

    #[test]
    fn test_add_remove_item() {
        let mut project = Project::new("P", "C", structure());
        let id = project.add_item(Accessory::RollupWall(WallAccessory {
            wall_location: "Sidewall".to_string(),
            wall_length: 48.0,
            quantity: 2,
        }));
        assert_eq!(project.item_count(), 1);
        assert_eq!(project.get_item(&id).map(Accessory::kind), Some("Roll-up Wall"));

        let removed = project.remove_item(&id);
        assert!(removed.is_some());
        assert_eq!(project.item_count(), 0);
        assert!(project.remove_item(&id).is_none());
    }

    #[test]
    fn test_base_component_input_merges_walls() {
        let mut project = Project::new("P", "C", structure());
        project.walls.gutter_partitions = 2;
        project.add_item(Accessory::RollupWall(WallAccessory {
            wall_location: "Sidewall".to_string(),
            wall_length: 48.0,
            quantity: 1,
        }));
        project.add_item(Accessory::DropWall(WallAccessory {
            wall_location: "Endwall".to_string(),
            wall_length: 20.0,
            quantity: 1,
        }));
        project.add_item(Accessory::Vent(vent(VentConfiguration::Single)));

        let input = project.base_component_input();
        assert_eq!(input.accessories.len(), 2);
        assert_eq!(input.gutter_partitions, 2);
        assert_eq!(input.width_ft, 30.0);
    }

    #[test]
    fn test_vent_screen_follows_vent() {
        let input = vent(VentConfiguration::Double).insect_screen_input().unwrap().unwrap();
        assert_eq!(input.screen.quantity, 6);
        assert_eq!(input.screen.length_ft, 96.0);
        assert_eq!(input.vent_quantity, 3);

        let mut bare = vent(VentConfiguration::Single);
        bare.insect_screen = None;
        assert!(bare.insect_screen_input().unwrap().is_none());
    }
}
