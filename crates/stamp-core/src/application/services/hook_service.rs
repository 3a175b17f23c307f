//! Hook Service - sequences the operations run around template rendering.
//!
//! The rendering engine calls the pre-generate hook before it writes the
//! template content and the post-generate hook afterwards:
//!
//! 1. **pre**: merge the inherited common directory, then inject the license
//!    (additive only)
//! 2. *(engine renders the template)*
//! 3. **post**: filter the project down to the desired structure
//!    (subtractive only)

use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{
        ports::Filesystem,
        services::{LicenseInjector, StructureFilter, TemplateMerger},
    },
    domain::{FilterReport, PathRegistry, PostHookReport, PreHookReport, TemplateDefinition},
    error::StampResult,
};

/// Entry point for the generation hooks.
pub struct HookService {
    licenses: LicenseInjector,
    merger: TemplateMerger,
    filter: StructureFilter,
}

impl HookService {
    /// Create a hook service whose operations all share `filesystem`.
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self {
            licenses: LicenseInjector::new(filesystem.clone()),
            merger: TemplateMerger::new(filesystem.clone()),
            filter: StructureFilter::new(filesystem),
        }
    }

    pub fn licenses(&self) -> &LicenseInjector {
        &self.licenses
    }

    pub fn merger(&self) -> &TemplateMerger {
        &self.merger
    }

    pub fn filter(&self) -> &StructureFilter {
        &self.filter
    }

    /// Run the pre-generate hook for `template` inside `project_dir`.
    #[instrument(skip_all, fields(template = %template.name, project = %project_dir.display()))]
    pub fn pre_generate(
        &self,
        project_dir: &Path,
        template: &TemplateDefinition,
        registry: &PathRegistry,
    ) -> StampResult<PreHookReport> {
        let mut report = PreHookReport {
            template: template.name.clone(),
            ..PreHookReport::default()
        };

        if let Some(common) = &template.inherits {
            let source = registry.common_dir(common);
            report.merge = Some(self.merger.inherit_from_template(&source, project_dir)?);
        }

        if let Some(license) = &template.license {
            let source = registry.license_path(license);
            report.license = Some(self.licenses.include_license(&source, project_dir)?);
        }

        info!("Pre-generate hook completed");
        Ok(report)
    }

    /// Run the post-generate hook for `template` inside `project_dir`.
    ///
    /// With `dry_run` the removals are computed and returned but nothing is
    /// deleted.
    #[instrument(skip_all, fields(template = %template.name, project = %project_dir.display()))]
    pub fn post_generate(
        &self,
        project_dir: &Path,
        template: &TemplateDefinition,
        dry_run: bool,
    ) -> StampResult<PostHookReport> {
        let filter = if dry_run {
            FilterReport::planned(self.filter.plan(project_dir, &template.desired)?)
        } else {
            self.filter.keep_files(project_dir, &template.desired)?
        };

        info!(dry_run, "Post-generate hook completed");
        Ok(PostHookReport {
            template: template.name.clone(),
            filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;

    use super::*;
    use crate::{
        application::ports::output::MockFilesystem,
        domain::{DesiredStructure, EntryKind, LicenseName, WalkEntry},
    };

    fn template() -> TemplateDefinition {
        TemplateDefinition::new("python-package", DesiredStructure::new(["src"]).unwrap())
            .unwrap()
            .license(LicenseName::new("MIT").unwrap())
            .inherits("common")
            .unwrap()
    }

    #[test]
    fn pre_hook_merges_before_injecting_license() {
        let mut fs = MockFilesystem::new();
        fs.expect_entry_kind().returning(|p: &Path| {
            match p.to_str() {
                Some("/t/common") | Some("/p") => Some(EntryKind::Directory),
                Some("/t/licenses/MIT") => Some(EntryKind::File),
                _ => None,
            }
        });
        fs.expect_walk()
            .returning(|_| Ok(vec![WalkEntry::file("tox.ini").unwrap()]));

        let mut seq = Sequence::new();
        fs.expect_copy_file()
            .withf(|from, _| from.as_os_str() == "/t/common/tox.ini")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        fs.expect_copy_file()
            .withf(|from, to| {
                from.as_os_str() == "/t/licenses/MIT" && to.as_os_str() == "/p/LICENSE"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let service = HookService::new(Arc::new(fs));
        let report = service
            .pre_generate(Path::new("/p"), &template(), &PathRegistry::new("/t"))
            .unwrap();

        assert_eq!(report.template, "python-package");
        assert_eq!(report.merge.unwrap().copied.len(), 1);
        assert!(report.license.is_some());
    }

    #[test]
    fn pre_hook_without_inheritance_or_license_is_noop() {
        let mut fs = MockFilesystem::new();
        fs.expect_entry_kind().never();
        fs.expect_copy_file().never();

        let bare = TemplateDefinition::new("bare", DesiredStructure::default()).unwrap();
        let report = HookService::new(Arc::new(fs))
            .pre_generate(Path::new("/p"), &bare, &PathRegistry::new("/t"))
            .unwrap();
        assert!(report.merge.is_none());
        assert!(report.license.is_none());
    }

    #[test]
    fn post_hook_dry_run_only_plans() {
        let mut fs = MockFilesystem::new();
        fs.expect_entry_kind()
            .returning(|_| Some(EntryKind::Directory));
        fs.expect_walk()
            .returning(|_| Ok(vec![WalkEntry::file("setup.py").unwrap()]));
        fs.expect_remove_file().never();
        fs.expect_remove_dir_all().never();

        let report = HookService::new(Arc::new(fs))
            .post_generate(Path::new("/p"), &template(), true)
            .unwrap();
        assert!(report.filter.dry_run);
        assert_eq!(report.filter.removed.len(), 1);
    }
}
