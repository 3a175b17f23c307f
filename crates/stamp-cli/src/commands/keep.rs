//! `stamp keep`: reduce a project to an ad-hoc allow-list.
//!
//! Unlike `stamp hook post` this is typed by a person, so the planned
//! removals are shown and confirmed before anything is deleted.

use tracing::{debug, instrument};

use stamp_core::{
    application::StructureFilter,
    domain::{DesiredStructure, FilterReport},
    error::StampError,
};

use crate::{
    cli::{GlobalArgs, KeepArgs},
    commands::{filesystem, hook::print_filter, project_dir},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `stamp keep` command.
///
/// 1. Validate the paths into a desired structure
/// 2. Plan the removals
/// 3. Early-exit on `--dry-run` or when nothing would be removed
/// 4. Confirm unless `--yes`, `--quiet` or JSON output
/// 5. Sweep and prune
#[instrument(skip_all, fields(paths = args.paths.len()))]
pub fn execute(
    args: KeepArgs,
    global: GlobalArgs,
    _config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let desired = DesiredStructure::new(&args.paths).map_err(StampError::from)?;
    let root = project_dir(args.dest)?;
    let filter = StructureFilter::new(filesystem());

    let plan = filter.plan(&root, &desired)?;
    debug!(removals = plan.len(), "Plan computed");

    if args.dry_run || plan.is_empty() {
        let report = FilterReport::planned(plan);
        if output.is_json() {
            output.json(&report)?;
            return Ok(());
        }
        return print_filter(&report, &output);
    }

    if !args.yes && !global.quiet && !output.is_json() {
        print_filter(&FilterReport::planned(plan.clone()), &output)?;
        if !confirm(&format!("Delete these {} entries?", plan.len()))? {
            return Err(CliError::Cancelled);
        }
    }

    let report = filter.keep_files(&root, &desired)?;
    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }
    print_filter(&report, &output)
}

#[cfg(feature = "interactive")]
fn confirm(prompt: &str) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CliError::InvalidInput {
            message: "failed to read confirmation input".into(),
            source: Some(Box::new(e)),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(prompt: &str) -> CliResult<bool> {
    use std::io::{self, Write};

    use crate::error::IntoCli;

    print!("{prompt} [y/N] ");
    io::stdout()
        .flush()
        .with_cli_context(|| "failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "failed to read confirmation input")?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input == "y" || input == "yes")
}
