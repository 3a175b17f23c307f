//! Command handlers.
//!
//! Each handler translates parsed arguments into a call on the core services
//! and renders the resulting report. The helpers below wire the adapters the
//! same way for every command.

pub mod completions;
pub mod config;
pub mod hook;
pub mod inherit;
pub mod init;
pub mod keep;
pub mod license;
pub mod list;
pub mod paths;

use std::{path::PathBuf, sync::Arc};

use stamp_adapters::{LocalFilesystem, TemplateRootLocator, load_catalog};
use stamp_core::{
    application::ports::Filesystem,
    domain::{PathRegistry, TemplateCatalog},
    error::StampError,
};

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
};

/// Resolve the templates root: `--templates-dir`, then `templates.root`,
/// then discovery.
pub fn resolve_registry(global: &GlobalArgs, config: &AppConfig) -> CliResult<PathRegistry> {
    let explicit = global
        .templates_dir
        .clone()
        .or_else(|| config.templates.root.clone());

    Ok(TemplateRootLocator::from_environment(explicit)
        .resolve(&config.templates.common_dir, &config.templates.licenses_dir)?)
}

/// Built-in templates overlaid with the manifests under the registry root.
pub fn load_templates(registry: &PathRegistry) -> CliResult<TemplateCatalog> {
    load_catalog(registry).map_err(|e| CliError::Core(StampError::from(e)))
}

/// The directory a hook operates on; the working directory by default,
/// which is where the rendering engine runs hooks.
pub fn project_dir(arg: Option<PathBuf>) -> CliResult<PathBuf> {
    match arg {
        Some(dir) => Ok(dir),
        None => std::env::current_dir()
            .with_cli_context(|| "Failed to determine the current directory"),
    }
}

pub fn filesystem() -> Arc<dyn Filesystem> {
    Arc::new(LocalFilesystem::new())
}
