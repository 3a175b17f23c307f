//! `stamp paths`: show how the path registry resolved.

use std::{fs, path::PathBuf};

use serde::Serialize;

use crate::{
    cli::GlobalArgs,
    commands::resolve_registry,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct ResolvedPaths {
    templates_root: PathBuf,
    common_dir: PathBuf,
    licenses_dir: PathBuf,
    licenses: Vec<String>,
}

pub fn execute(global: GlobalArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let registry = resolve_registry(&global, &config)?;

    let licenses_dir = registry.licenses_dir();
    let mut licenses: Vec<String> = fs::read_dir(&licenses_dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .filter(|e| e.path().is_file())
                .filter_map(|e| e.file_name().into_string().ok())
                .collect()
        })
        .unwrap_or_default();
    licenses.sort();

    let resolved = ResolvedPaths {
        templates_root: registry.templates_root().to_path_buf(),
        common_dir: registry.default_common_dir(),
        licenses_dir,
        licenses,
    };

    if output.is_json() {
        output.json(&resolved)?;
        return Ok(());
    }

    output.header("Template paths:")?;
    output.print(&format!("  Templates root: {}", resolved.templates_root.display()))?;
    output.print(&format!("  Common dir:     {}", resolved.common_dir.display()))?;
    output.print(&format!("  Licenses dir:   {}", resolved.licenses_dir.display()))?;
    if resolved.licenses.is_empty() {
        output.warning("No license files found")?;
    } else {
        output.print(&format!("  Licenses:       {}", resolved.licenses.join(", ")))?;
    }
    Ok(())
}
