// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports and retries never need to re-create them)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Invalid template name '{name}': {reason}")]
    InvalidTemplateName { name: String, reason: String },

    #[error("Invalid license name '{name}': {reason}")]
    InvalidLicenseName { name: String, reason: String },

    #[error("Invalid template manifest: {0}")]
    InvalidManifest(String),

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("Unknown template '{name}'")]
    UnknownTemplate { name: String, available: Vec<String> },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Path '{path}' is outside of '{root}'")]
    OutsideRoot { path: String, root: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidPath { .. } => vec![
                "Desired-structure entries must be relative to the project root".into(),
                "Parent components ('..') and absolute paths are rejected".into(),
            ],
            Self::UnknownTemplate { name, available } => {
                let mut out = vec![format!("No template named '{}'", name)];
                if !available.is_empty() {
                    out.push(format!("Available templates: {}", available.join(", ")));
                }
                out.push("Try: stamp list".into());
                out
            }
            Self::InvalidManifest(msg) => vec![
                format!("Details: {}", msg),
                "Check the [template] and [structure] sections of template.toml".into(),
            ],
            Self::InvalidLicenseName { .. } => vec![
                "License names are plain file names under the licenses directory".into(),
                "Try: stamp paths to locate the licenses directory".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPath { .. }
            | Self::InvalidTemplateName { .. }
            | Self::InvalidLicenseName { .. }
            | Self::InvalidManifest(_) => ErrorCategory::Validation,
            Self::UnknownTemplate { .. } => ErrorCategory::NotFound,
            Self::OutsideRoot { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
