//! Implementation of the `stamp list` command.

use std::path::PathBuf;

use serde::Serialize;

use stamp_adapters::builtin_catalog;
use stamp_core::{
    domain::{PathRegistry, TemplateCatalog, TemplateDefinition},
    error::StampError,
};

use crate::{
    cli::{GlobalArgs, ListArgs, ListFormat},
    commands::{load_templates, resolve_registry},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// One catalog row as printed by `--format json`.
#[derive(Debug, Serialize)]
struct TemplateRow<'a> {
    name: &'a str,
    description: &'a str,
    license: Option<&'a str>,
    inherits: Option<&'a str>,
    keep: Vec<String>,
    /// The template's directory under the root, when it has one on disk.
    directory: Option<PathBuf>,
}

impl<'a> TemplateRow<'a> {
    fn new(t: &'a TemplateDefinition, registry: Option<&PathRegistry>) -> Self {
        Self {
            name: &t.name,
            description: &t.description,
            license: t.license.as_ref().map(|l| l.as_str()),
            inherits: t.inherits.as_deref(),
            keep: t.desired.entries().iter().map(ToString::to_string).collect(),
            directory: registry
                .map(|r| r.template_dir(&t.name))
                .filter(|dir| dir.is_dir()),
        }
    }
}

pub fn execute(
    args: ListArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let (catalog, registry) = catalog(&global, &config, &output)?;

    match args.format {
        ListFormat::Table => {
            output.header("Available Templates:")?;
            for t in catalog.iter() {
                output.print(&format!(
                    "  {:<16} {:<14} {:<8} {}",
                    t.name,
                    t.license
                        .as_ref()
                        .map(|l| l.as_str())
                        .unwrap_or("-"),
                    t.inherits.as_deref().unwrap_or("-"),
                    t.description,
                ))?;
            }
        }
        ListFormat::Json => {
            let rows: Vec<TemplateRow<'_>> = catalog
                .iter()
                .map(|t| TemplateRow::new(t, registry.as_ref()))
                .collect();
            output.json(&rows)?;
        }
        ListFormat::List => {
            for t in catalog.iter() {
                println!("{}", t.name);
            }
        }
    }

    Ok(())
}

/// The on-disk catalog, or the built-ins when no templates root is found.
fn catalog(
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<(TemplateCatalog, Option<PathRegistry>)> {
    match resolve_registry(global, config) {
        Ok(registry) => Ok((load_templates(&registry)?, Some(registry))),
        Err(e) => {
            tracing::debug!(error = %e, "no templates root, listing built-ins");
            output.warning("No templates directory found; showing built-in templates only")?;
            Ok((builtin_catalog(&config.templates.common_dir).map_err(StampError::from)?, None))
        }
    }
}
