//! # gh_core - Greenhouse Quantity Derivation Engine
//!
//! `gh_core` turns a greenhouse structure (model, dimensions, bay counts,
//! roof configuration) plus accessories into material quantities and prices:
//! roof glazing area, roof panel counts, base trim, and insect screen fabric.
//! All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Injected catalog**: every lookup goes through a [`catalog::SharedCatalog`]
//!   passed in by the caller
//! - **Best effort**: a failed lookup degrades one part of a result and is
//!   reported as a [`errors::Diagnostic`]; it never aborts the calculation
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use gh_core::catalog::{InMemoryCatalog, SharedCatalog};
//! use gh_core::config::EngineSettings;
//! use gh_core::materials::GlazingMaterial;
//! use gh_core::project::Project;
//! use gh_core::structure::{BayCounts, StructureSpec};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let structure = StructureSpec {
//!     model: "SL18".into(), width_ft: 18.0, eave_height_ft: 12.0, length_ft: 96.0,
//!     houses: 1, bays: BayCounts::new(2, 8, 0, 0),
//!     roof_glazing: GlazingMaterial::Pc8, roof_vent: None,
//! };
//! let project = Project::new("North Range", "Valley Growers", structure);
//! let catalog: SharedCatalog = Arc::new(InMemoryCatalog::new());
//!
//! let estimate = gh_core::estimate::run(&project, &catalog, &EngineSettings::default())
//!     .await
//!     .unwrap();
//! println!("{}", serde_json::to_string_pretty(&estimate).unwrap());
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`project`] - Project container, metadata, and accessories
//! - [`structure`] - Structure dimensions, bays, and roof vent configuration
//! - [`calculations`] - All quantity calculators
//! - [`catalog`] - Catalog lookup interface and in-memory implementation
//! - [`estimate`] - Runs every calculator for a project
//! - [`materials`] - Glazing materials and curtain fabrics
//! - [`config`] - Engine settings
//! - [`units`] - Type-safe unit wrappers and length parsing
//! - [`errors`] - Structured error types and diagnostics

pub mod calculations;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod estimate;
pub mod materials;
pub mod project;
pub mod structure;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use catalog::{CatalogProvider, InMemoryCatalog, SharedCatalog};
pub use config::EngineSettings;
pub use errors::{CalcError, CalcResult, Diagnostic, DiagnosticKind};
pub use estimate::ProjectEstimate;
pub use project::{Accessory, Project, ProjectMetadata};
