//! # Error Types
//!
//! Structured error types for gh_core, plus the diagnostics that calculators
//! attach to partially degraded results.
//!
//! Two layers exist:
//!
//! - [`CalcError`] is returned by catalog providers, input validation and
//!   configuration loading. It is a real `Err`.
//! - [`Diagnostic`] records a lookup that failed, a value that could not be
//!   parsed, or a combination the engine does not support. Calculators never
//!   surface these as errors; they fold them into the result next to the
//!   best-effort numbers.
//!
//! ## Example
//!
//! ```rust
//! use gh_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_ft: f64) -> CalcResult<()> {
//!     if !(length_ft >= 0.0) {
//!         return Err(CalcError::InvalidInput {
//!             field: "length_ft".to_string(),
//!             value: length_ft.to_string(),
//!             reason: "Length must be a non-negative number".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for gh_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for engine operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (negative, NaN, out of range)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Material code not known to the engine
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// A catalog query failed
    #[error("Catalog lookup failed: {query} - {reason}")]
    CatalogLookup { query: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Settings file could not be read
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a CatalogLookup error
    pub fn catalog_lookup(query: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CatalogLookup {
            query: query.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config(reason: impl Into<String>) -> Self {
        CalcError::ConfigError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::CatalogLookup { .. } => "CATALOG_LOOKUP",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::ConfigError { .. } => "CONFIG_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

/// Category of a degraded contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A catalog query errored or returned no row
    LookupFailure,
    /// A length string or numeric input was malformed
    ParseFailure,
    /// Material or vent configuration the engine has no rule for
    ConfigurationGap,
}

/// One reason a partial result is degraded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// What the diagnostic is about (e.g., "Bay A", "Roof Vent Slope 2")
    pub scope: String,
    pub message: String,
}

impl Diagnostic {
    pub fn lookup(scope: impl Into<String>, message: impl Into<String>) -> Self {
        Diagnostic {
            kind: DiagnosticKind::LookupFailure,
            scope: scope.into(),
            message: message.into(),
        }
    }

    pub fn parse(scope: impl Into<String>, message: impl Into<String>) -> Self {
        Diagnostic {
            kind: DiagnosticKind::ParseFailure,
            scope: scope.into(),
            message: message.into(),
        }
    }

    pub fn config_gap(scope: impl Into<String>, message: impl Into<String>) -> Self {
        Diagnostic {
            kind: DiagnosticKind::ConfigurationGap,
            scope: scope.into(),
            message: message.into(),
        }
    }
}
