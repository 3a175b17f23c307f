use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::template::LicenseName;

/// Well-known locations under the installed templates root.
///
/// Resolution (which directory is the root) is an adapter concern; this type
/// only derives the fixed sub-locations once a root is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathRegistry {
    templates_root: PathBuf,
    common_dir_name: String,
    licenses_dir_name: String,
}

impl PathRegistry {
    pub const DEFAULT_COMMON_DIR: &'static str = "common";
    pub const DEFAULT_LICENSES_DIR: &'static str = "licenses";

    pub fn new(templates_root: impl Into<PathBuf>) -> Self {
        Self {
            templates_root: templates_root.into(),
            common_dir_name: Self::DEFAULT_COMMON_DIR.into(),
            licenses_dir_name: Self::DEFAULT_LICENSES_DIR.into(),
        }
    }

    pub fn with_common_dir(mut self, name: impl Into<String>) -> Self {
        self.common_dir_name = name.into();
        self
    }

    pub fn with_licenses_dir(mut self, name: impl Into<String>) -> Self {
        self.licenses_dir_name = name.into();
        self
    }

    pub fn templates_root(&self) -> &Path {
        &self.templates_root
    }

    /// Name of the directory templates inherit from unless they say
    /// otherwise.
    pub fn common_dir_name(&self) -> &str {
        &self.common_dir_name
    }

    /// The default common directory.
    pub fn default_common_dir(&self) -> PathBuf {
        self.templates_root.join(&self.common_dir_name)
    }

    /// A named common directory; templates may inherit from different ones.
    pub fn common_dir(&self, name: &str) -> PathBuf {
        self.templates_root.join(name)
    }

    pub fn licenses_dir(&self) -> PathBuf {
        self.templates_root.join(&self.licenses_dir_name)
    }

    pub fn license_path(&self, license: &LicenseName) -> PathBuf {
        self.licenses_dir().join(license.as_str())
    }

    pub fn template_dir(&self, template: &str) -> PathBuf {
        self.templates_root.join(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_sub_locations() {
        let reg = PathRegistry::new("/opt/stamp/templates");
        let mit = LicenseName::new("MIT").unwrap();

        assert_eq!(reg.default_common_dir(), PathBuf::from("/opt/stamp/templates/common"));
        assert_eq!(reg.licenses_dir(), PathBuf::from("/opt/stamp/templates/licenses"));
        assert_eq!(
            reg.license_path(&mit),
            PathBuf::from("/opt/stamp/templates/licenses/MIT")
        );
        assert_eq!(
            reg.template_dir("flask-service"),
            PathBuf::from("/opt/stamp/templates/flask-service")
        );
    }

    #[test]
    fn sub_directory_names_are_configurable() {
        let reg = PathRegistry::new("/t")
            .with_common_dir("shared")
            .with_licenses_dir("legal");
        assert_eq!(reg.default_common_dir(), PathBuf::from("/t/shared"));
        assert_eq!(reg.common_dir_name(), "shared");
        assert_eq!(reg.licenses_dir(), PathBuf::from("/t/legal"));
    }
}
