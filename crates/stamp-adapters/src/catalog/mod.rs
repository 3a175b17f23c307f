//! Template catalog: built-in definitions overlaid with on-disk manifests.

mod builtin;
mod manifest;

use tracing::{info, instrument};

use stamp_core::domain::{DomainError, PathRegistry, TemplateCatalog};

pub use builtin::builtin_catalog;
pub use manifest::{MANIFEST_FILE_NAME, ManifestLoader, TemplateManifest, parse_manifest};

/// Build the catalog for the registry's templates root.
///
/// The built-in definitions come first and inherit the registry's common
/// directory. Every valid `<templates_root>/<name>/template.toml` then either
/// replaces the built-in of the same name or adds a new template.
#[instrument(skip_all, fields(root = %registry.templates_root().display()))]
pub fn load_catalog(registry: &PathRegistry) -> Result<TemplateCatalog, DomainError> {
    let mut catalog = builtin_catalog(registry.common_dir_name())?;
    let builtins = catalog.len();

    let mut overridden = 0;
    for template in ManifestLoader::new(registry.templates_root()).load_all()? {
        if catalog.insert(template) {
            overridden += 1;
        }
    }

    info!(
        builtins,
        overridden,
        total = catalog.len(),
        "Template catalog loaded"
    );
    Ok(catalog)
}
