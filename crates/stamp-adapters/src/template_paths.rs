//! Templates-root discovery.
//!
//! The hooks need one directory that holds every template, the common
//! directories and the license bodies. [`TemplateRootLocator`] probes the
//! following candidates in order and the first existing directory wins:
//!
//! 1. An explicit override (`--templates-dir` or `templates.root`).
//! 2. `$STAMP_TEMPLATES_DIR`.
//! 3. `<directory of the stamp executable>/templates` (installed layout).
//! 4. `./templates` relative to the current directory.
//! 5. `../templates` (development fallback).
//!
//! An explicit override that does not exist is an error on its own. It never
//! falls through to the other candidates.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use stamp_core::{
    application::ApplicationError,
    domain::PathRegistry,
    error::StampResult,
};

/// Environment variable naming the templates root.
pub const TEMPLATES_DIR_ENV: &str = "STAMP_TEMPLATES_DIR";

/// Inputs to templates-root resolution.
///
/// Built from the live process environment with
/// [`TemplateRootLocator::from_environment`], or field by field in tests.
#[derive(Debug, Clone, Default)]
pub struct TemplateRootLocator {
    pub explicit: Option<PathBuf>,
    pub env_dir: Option<PathBuf>,
    pub exe_dir: Option<PathBuf>,
    pub cwd: PathBuf,
}

impl TemplateRootLocator {
    /// Capture `$STAMP_TEMPLATES_DIR`, the executable's directory and the
    /// working directory.
    pub fn from_environment(explicit: Option<PathBuf>) -> Self {
        Self {
            explicit,
            env_dir: std::env::var_os(TEMPLATES_DIR_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            exe_dir: std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf)),
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// The ordered list of directories that will be probed.
    pub fn candidates(&self) -> Vec<PathBuf> {
        if let Some(explicit) = &self.explicit {
            return vec![explicit.clone()];
        }

        let mut paths = Vec::with_capacity(4);
        if let Some(env_dir) = &self.env_dir {
            debug!(path = %env_dir.display(), "candidate from ${}", TEMPLATES_DIR_ENV);
            paths.push(env_dir.clone());
        }
        if let Some(exe_dir) = &self.exe_dir {
            paths.push(exe_dir.join("templates"));
        }
        paths.push(self.cwd.join("templates"));
        if let Some(parent) = self.cwd.parent() {
            paths.push(parent.join("templates"));
        }
        paths
    }

    /// Return the first candidate that is an existing directory.
    #[instrument(skip(self))]
    pub fn resolve_root(&self) -> StampResult<PathBuf> {
        let searched = self.candidates();
        for candidate in &searched {
            if candidate.is_dir() {
                info!(path = %candidate.display(), "Templates root resolved");
                return Ok(candidate.clone());
            }
            debug!(path = %candidate.display(), "not a directory, skipping");
        }
        Err(ApplicationError::PathResolution { searched }.into())
    }

    /// Resolve the root and derive the registry from it.
    pub fn resolve(&self, common_dir: &str, licenses_dir: &str) -> StampResult<PathRegistry> {
        Ok(PathRegistry::new(self.resolve_root()?)
            .with_common_dir(common_dir)
            .with_licenses_dir(licenses_dir))
    }
}
