//! Application layer errors.
//!
//! These errors represent failures while touching the filesystem or locating
//! inputs, not rule violations. Rule violations are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while running hook operations.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No templates root could be located.
    #[error("Could not locate the templates directory (searched {} location(s))", searched.len())]
    PathResolution { searched: Vec<PathBuf> },

    /// A license or common-directory source is absent.
    #[error("Source not found: {path}")]
    MissingSource { path: PathBuf },

    /// The project directory the hook operates on is absent.
    #[error("Destination directory not found: {path}")]
    DestinationNotFound { path: PathBuf },

    /// The destination is not writable (or the source not readable).
    #[error("Permission denied: cannot {operation} {path}")]
    PermissionDenied { path: PathBuf, operation: String },

    /// Any other I/O failure.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// In-memory filesystem lock poisoned.
    #[error("Filesystem lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::PathResolution { searched } => {
                let mut out = vec!["Searched:".to_string()];
                out.extend(searched.iter().map(|p| format!("  • {}", p.display())));
                out.push("Set STAMP_TEMPLATES_DIR or pass --templates-dir".into());
                out
            }
            Self::MissingSource { path } => vec![
                format!("Expected to find: {}", path.display()),
                "Check the template's license / inherits settings".into(),
                "Try: stamp paths to see where templates are looked up".into(),
            ],
            Self::DestinationNotFound { path } => vec![
                format!("Directory does not exist: {}", path.display()),
                "Hooks run inside the rendered project directory".into(),
                "Pass --project-dir / --dest or cd into the project first".into(),
            ],
            Self::PermissionDenied { path, .. } => vec![
                format!("Check permissions on: {}", path.display()),
                "Ensure no other process holds the file open".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "The project directory may be partially processed; regenerate it".into(),
            ],
            Self::StoreLockError => vec!["This is a bug, please report it".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PathResolution { .. } => ErrorCategory::Configuration,
            Self::MissingSource { .. } | Self::DestinationNotFound { .. } => {
                ErrorCategory::NotFound
            }
            Self::PermissionDenied { .. } | Self::FilesystemError { .. } => {
                ErrorCategory::Internal
            }
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
