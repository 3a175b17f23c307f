//! Template definitions and the catalog that holds them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, structure::DesiredStructure};

/// Validate a name that becomes a single path segment under the templates
/// root (template, common directory or license file).
fn validate_segment(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name cannot be empty".into());
    }
    if name.starts_with('.') {
        return Err("name cannot start with '.'".into());
    }
    if name.contains('/') || name.contains('\\') {
        return Err("name cannot contain path separators".into());
    }
    Ok(())
}

/// Name of a license file under the licenses directory, e.g. `MIT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LicenseName(String);

impl LicenseName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        validate_segment(&name)
            .map_err(|reason| DomainError::InvalidLicenseName { name: name.clone(), reason })?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LicenseName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LicenseName> for String {
    fn from(value: LicenseName) -> Self {
        value.0
    }
}

impl fmt::Display for LicenseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the hooks need to know about one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateDefinition {
    pub name: String,
    pub description: String,
    /// Allow-list applied by the post-generate hook.
    pub desired: DesiredStructure,
    /// License injected by the pre-generate hook.
    pub license: Option<LicenseName>,
    /// Common directory merged by the pre-generate hook.
    pub inherits: Option<String>,
}

impl TemplateDefinition {
    pub fn new(name: impl Into<String>, desired: DesiredStructure) -> Result<Self, DomainError> {
        let name = name.into();
        validate_segment(&name)
            .map_err(|reason| DomainError::InvalidTemplateName { name: name.clone(), reason })?;
        Ok(Self {
            name,
            description: String::new(),
            desired,
            license: None,
            inherits: None,
        })
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn license(mut self, license: LicenseName) -> Self {
        self.license = Some(license);
        self
    }

    pub fn inherits(mut self, common: impl Into<String>) -> Result<Self, DomainError> {
        let common = common.into();
        validate_segment(&common)
            .map_err(|reason| DomainError::InvalidTemplateName { name: common.clone(), reason })?;
        self.inherits = Some(common);
        Ok(self)
    }
}

/// Ordered set of templates keyed by name.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<TemplateDefinition>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a template, replacing any existing one with the same name in
    /// place. Returns `true` if a template was replaced.
    pub fn insert(&mut self, template: TemplateDefinition) -> bool {
        match self.templates.iter_mut().find(|t| t.name == template.name) {
            Some(slot) => {
                *slot = template;
                true
            }
            None => {
                self.templates.push(template);
                false
            }
        }
    }

    pub fn get(&self, name: &str) -> Result<&TemplateDefinition, DomainError> {
        self.templates
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| DomainError::UnknownTemplate {
                name: name.to_string(),
                available: self.names(),
            })
    }

    pub fn names(&self) -> Vec<String> {
        self.templates.iter().map(|t| t.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateDefinition> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(name: &str, keep: &[&str]) -> TemplateDefinition {
        TemplateDefinition::new(name, DesiredStructure::new(keep.iter().copied()).unwrap()).unwrap()
    }

    #[test]
    fn template_names_are_single_segments() {
        let d = DesiredStructure::default();
        assert!(TemplateDefinition::new("flask-service", d.clone()).is_ok());
        assert!(matches!(
            TemplateDefinition::new("a/b", d.clone()),
            Err(DomainError::InvalidTemplateName { .. })
        ));
        assert!(TemplateDefinition::new(".hidden", d.clone()).is_err());
        assert!(TemplateDefinition::new("", d).is_err());
    }

    #[test]
    fn license_names_are_validated() {
        assert_eq!(LicenseName::new("MIT").unwrap().as_str(), "MIT");
        assert!(LicenseName::new("../MIT").is_err());
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut catalog = TemplateCatalog::new();
        assert!(!catalog.insert(def("a", &["x"])));
        assert!(!catalog.insert(def("b", &["y"])));
        assert!(catalog.insert(def("a", &["z"])));

        assert_eq!(catalog.names(), vec!["a", "b"]);
        assert_eq!(catalog.get("a").unwrap().desired.to_string(), "[z]");
    }

    #[test]
    fn unknown_template_lists_available() {
        let mut catalog = TemplateCatalog::new();
        catalog.insert(def("solution", &["src"]));

        match catalog.get("nope") {
            Err(DomainError::UnknownTemplate { name, available }) => {
                assert_eq!(name, "nope");
                assert_eq!(available, vec!["solution"]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
