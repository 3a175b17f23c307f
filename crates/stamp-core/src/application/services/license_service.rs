//! License Injector - copies a license template into a project.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{EntryKind, LicenseReport},
    error::StampResult,
};

/// Conventional license file name in a generated project.
pub const LICENSE_FILE_NAME: &str = "LICENSE";

/// Copies license bodies into rendered projects.
pub struct LicenseInjector {
    filesystem: Arc<dyn Filesystem>,
}

impl LicenseInjector {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Copy `license_template` to `destination/LICENSE`, overwriting any
    /// existing file there. The copy is byte-exact.
    #[instrument(
        skip_all,
        fields(
            license = %license_template.display(),
            destination = %destination.display()
        )
    )]
    pub fn include_license(
        &self,
        license_template: &Path,
        destination: &Path,
    ) -> StampResult<LicenseReport> {
        match self.filesystem.entry_kind(license_template) {
            Some(EntryKind::File | EntryKind::Symlink) => {}
            _ => {
                return Err(ApplicationError::MissingSource {
                    path: license_template.to_path_buf(),
                }
                .into());
            }
        }

        if self.filesystem.entry_kind(destination) != Some(EntryKind::Directory) {
            return Err(ApplicationError::DestinationNotFound {
                path: destination.to_path_buf(),
            }
            .into());
        }

        let target = destination.join(LICENSE_FILE_NAME);
        let replaced = self.filesystem.entry_kind(&target).is_some();

        self.filesystem.copy_file(license_template, &target)?;

        info!(replaced, "License injected");
        Ok(LicenseReport {
            source: license_template.to_path_buf(),
            destination: target,
            replaced,
        })
    }
}
