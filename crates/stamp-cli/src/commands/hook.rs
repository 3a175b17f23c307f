//! `stamp hook pre|post`: the entry points the rendering engine calls.
//!
//! Both hooks resolve the templates root, look the template up in the
//! catalog and hand the project directory to [`HookService`]. The process
//! exits non-zero on the first failure so the engine aborts generation.

use tracing::{info, instrument};

use stamp_core::{
    application::HookService,
    domain::{FilterReport, MergeReport},
    error::StampError,
};

use crate::{
    cli::{GlobalArgs, HookCommands, PostHookArgs, PreHookArgs},
    commands::{filesystem, load_templates, project_dir, resolve_registry},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    cmd: HookCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        HookCommands::Pre(args) => pre(args, &global, &config, &output),
        HookCommands::Post(args) => post(args, &global, &config, &output),
    }
}

#[instrument(skip_all, fields(template = %args.template))]
fn pre(
    args: PreHookArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let registry = resolve_registry(global, config)?;
    let catalog = load_templates(&registry)?;
    let template = catalog.get(&args.template).map_err(StampError::from)?;
    let project = project_dir(args.project_dir)?;

    let report = HookService::new(filesystem()).pre_generate(&project, template, &registry)?;
    info!(project = %project.display(), "pre-generate hook finished");

    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }

    if let Some(merge) = &report.merge {
        print_merge(merge, output)?;
    }
    if let Some(license) = &report.license {
        output.success(&format!(
            "License written to {}",
            license.destination.display()
        ))?;
    }
    if report.merge.is_none() && report.license.is_none() {
        output.info(&format!(
            "Template '{}' neither inherits nor sets a license",
            report.template
        ))?;
    }
    Ok(())
}

#[instrument(skip_all, fields(template = %args.template, dry_run = args.dry_run))]
fn post(
    args: PostHookArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let registry = resolve_registry(global, config)?;
    let catalog = load_templates(&registry)?;
    let template = catalog.get(&args.template).map_err(StampError::from)?;
    let project = project_dir(args.project_dir)?;

    let report = HookService::new(filesystem()).post_generate(&project, template, args.dry_run)?;
    info!(project = %project.display(), "post-generate hook finished");

    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }
    print_filter(&report.filter, output)
}

pub(crate) fn print_merge(report: &MergeReport, output: &OutputManager) -> CliResult<()> {
    output.success(&format!(
        "Merged common files: {} copied, {} kept",
        report.copied.len(),
        report.preserved.len()
    ))?;
    for conflict in &report.conflicts {
        output.warning(&format!(
            "{}: project has a {}, common has a {}; left as is",
            conflict.path, conflict.destination_kind, conflict.source_kind
        ))?;
    }
    for link in &report.skipped_links {
        output.warning(&format!("{link}: symlink in common directory, not copied"))?;
    }
    Ok(())
}

pub(crate) fn print_filter(report: &FilterReport, output: &OutputManager) -> CliResult<()> {
    if report.is_noop() {
        output.success("Project already matches the desired structure")?;
        return Ok(());
    }

    let verb = if report.dry_run { "Would remove" } else { "Removed" };
    output.header(&format!("{verb} {} entries:", report.removed.len()))?;
    for entry in &report.removed {
        let suffix = if entry.kind.is_dir() { "/" } else { "" };
        output.print(&format!("  {}{suffix}", entry.path))?;
    }
    if !report.pruned.is_empty() {
        output.info(&format!(
            "Pruned {} empty directories",
            report.pruned.len()
        ))?;
    }
    if report.dry_run {
        output.info("Dry run: nothing was deleted")?;
    }
    Ok(())
}
