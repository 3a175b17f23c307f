//! `stamp license`: inject a license outside of the pre-generate hook.

use tracing::instrument;

use stamp_core::{application::LicenseInjector, domain::LicenseName, error::StampError};

use crate::{
    cli::{GlobalArgs, LicenseArgs},
    commands::{filesystem, project_dir, resolve_registry},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(
    args: LicenseArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let name = args
        .name
        .unwrap_or_else(|| config.hooks.default_license.clone());
    let license = LicenseName::new(name).map_err(StampError::from)?;

    let registry = resolve_registry(&global, &config)?;
    let dest = project_dir(args.dest)?;

    let report = LicenseInjector::new(filesystem())
        .include_license(&registry.license_path(&license), &dest)?;

    if output.is_json() {
        output.json(&report)?;
    } else if report.replaced {
        output.success(&format!(
            "Replaced {} with the {license} license",
            report.destination.display()
        ))?;
    } else {
        output.success(&format!(
            "Wrote the {license} license to {}",
            report.destination.display()
        ))?;
    }
    Ok(())
}
