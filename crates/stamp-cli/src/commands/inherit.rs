//! `stamp inherit`: merge a common directory outside of the pre-generate
//! hook.

use tracing::instrument;

use stamp_core::{application::TemplateMerger, domain::RelativePath, error::StampError};

use crate::{
    cli::{GlobalArgs, InheritArgs},
    commands::{filesystem, hook::print_merge, project_dir, resolve_registry},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(
    args: InheritArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let from = args
        .from
        .unwrap_or_else(|| config.templates.common_dir.clone());
    // Common directories sit directly under the templates root.
    let name = RelativePath::parse(&from).map_err(StampError::from)?;
    if name.depth() != 1 {
        return Err(CliError::InvalidInput {
            message: format!("'{from}' is not a directory name under the templates root"),
            source: None,
        });
    }

    let registry = resolve_registry(&global, &config)?;
    let dest = project_dir(args.dest)?;

    let report = TemplateMerger::new(filesystem())
        .inherit_from_template(&registry.common_dir(&name.to_string()), &dest)?;

    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }
    print_merge(&report, &output)
}
