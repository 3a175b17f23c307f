//! `template.toml` manifest loader.
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! ├── common/                  ← shared scaffolding (no manifest)
//! ├── licenses/
//! │   └── MIT
//! └── python-package/
//!     ├── template.toml        ← manifest (optional)
//!     └── {{cookiecutter.project_slug}}/
//! ```
//!
//! # `template.toml` format
//!
//! ```toml
//! [template]
//! name        = "python-package"   # optional, defaults to the directory name
//! description = "Installable Python package"
//! inherits    = "common"           # optional
//! license     = "MIT"              # optional
//!
//! [structure]
//! keep = ["src", "tests", "LICENSE", "pyproject.toml"]
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use stamp_core::domain::{DesiredStructure, DomainError, LicenseName, TemplateDefinition};

/// File name of a template manifest.
pub const MANIFEST_FILE_NAME: &str = "template.toml";

/// Deserialised representation of a `template.toml` file.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct TemplateManifest {
    #[serde(default)]
    pub template: TemplateSection,
    pub structure: StructureSection,
}

/// `[template]` section.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct TemplateSection {
    pub name: Option<String>,
    pub description: Option<String>,
    pub inherits: Option<String>,
    pub license: Option<LicenseName>,
}

/// `[structure]` section.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct StructureSection {
    pub keep: DesiredStructure,
}

impl TemplateManifest {
    /// Convert into a domain definition. `dir_name` names the template when
    /// the manifest does not.
    pub fn into_definition(self, dir_name: &str) -> Result<TemplateDefinition, DomainError> {
        let name = self.template.name.unwrap_or_else(|| dir_name.to_string());
        let mut definition = TemplateDefinition::new(name, self.structure.keep)?
            .description(self.template.description.unwrap_or_default());
        if let Some(license) = self.template.license {
            definition = definition.license(license);
        }
        if let Some(common) = self.template.inherits {
            definition = definition.inherits(common)?;
        }
        Ok(definition)
    }
}

/// Parse a manifest body into a definition.
pub fn parse_manifest(raw: &str, dir_name: &str) -> Result<TemplateDefinition, DomainError> {
    let manifest: TemplateManifest =
        toml::from_str(raw).map_err(|e| DomainError::InvalidManifest(e.to_string()))?;
    manifest.into_definition(dir_name)
}

/// Scans a templates root for manifests.
#[derive(Debug, Clone)]
pub struct ManifestLoader {
    templates_dir: PathBuf,
}

impl ManifestLoader {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    /// Load every valid manifest found one level below the templates root,
    /// sorted by directory name.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidManifest`] if the templates root cannot
    /// be read. Individual directories without a manifest are ignored, and
    /// directories with a malformed one are skipped with a `WARN` log.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load_all(&self) -> Result<Vec<TemplateDefinition>, DomainError> {
        let read_dir = fs::read_dir(&self.templates_dir).map_err(|e| {
            DomainError::InvalidManifest(format!(
                "failed to read templates directory '{}': {e}",
                self.templates_dir.display()
            ))
        })?;

        let mut dirs: Vec<PathBuf> = read_dir
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();

        let mut templates = Vec::new();
        for dir in dirs {
            let manifest_path = dir.join(MANIFEST_FILE_NAME);
            if !manifest_path.is_file() {
                continue;
            }
            match self.load_from_dir(&dir, &manifest_path) {
                Ok(template) => {
                    debug!(name = %template.name, "Loaded template manifest");
                    templates.push(template);
                }
                Err(e) => {
                    warn!(
                        path = %manifest_path.display(),
                        error = %e,
                        "Skipping invalid template manifest"
                    );
                }
            }
        }
        Ok(templates)
    }

    fn load_from_dir(&self, dir: &Path, manifest_path: &Path) -> Result<TemplateDefinition, DomainError> {
        let raw = fs::read_to_string(manifest_path).map_err(|e| {
            DomainError::InvalidManifest(format!(
                "failed to read '{}': {e}",
                manifest_path.display()
            ))
        })?;
        let dir_name = dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        parse_manifest(&raw, dir_name)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    const MINIMAL_MANIFEST: &str = r#"
[template]
description = "Tiny"
license = "Apache-2.0"

[structure]
keep = ["src", "README.md"]
"#;

    #[test]
    fn name_defaults_to_directory() {
        let def = parse_manifest(MINIMAL_MANIFEST, "tiny").unwrap();
        assert_eq!(def.name, "tiny");
        assert_eq!(def.description, "Tiny");
        assert_eq!(def.license.unwrap().as_str(), "Apache-2.0");
        assert!(def.inherits.is_none());
        assert_eq!(def.desired.len(), 2);
    }

    #[test]
    fn rejects_escaping_keep_entries() {
        let raw = "[structure]\nkeep = [\"../etc\"]\n";
        assert!(parse_manifest(raw, "bad").is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        let raw = "[structure]\nkeep = []\nremove = [\"x\"]\n";
        assert!(matches!(
            parse_manifest(raw, "bad"),
            Err(DomainError::InvalidManifest(_))
        ));
    }

    #[test]
    fn load_all_skips_invalid_and_ignores_plain_dirs() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("common")).unwrap();
        fs::create_dir_all(temp.path().join("broken")).unwrap();
        fs::write(temp.path().join("broken/template.toml"), "not = [valid").unwrap();
        fs::create_dir_all(temp.path().join("tiny")).unwrap();
        fs::write(temp.path().join("tiny/template.toml"), MINIMAL_MANIFEST).unwrap();

        let loaded = ManifestLoader::new(temp.path()).load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "tiny");
    }

    #[test]
    fn load_all_reports_missing_root() {
        assert!(ManifestLoader::new("/absolutely/does/not/exist").load_all().is_err());
    }
}
