//! Built-in template definitions.
//!
//! These are the allow-lists for the four templates shipped in the default
//! templates root. Each one is an explicit list value handed to the filter,
//! and a `template.toml` next to the template overrides it.

use stamp_core::domain::{DesiredStructure, DomainError, LicenseName, TemplateCatalog, TemplateDefinition};

const DEFAULT_LICENSE: &str = "MIT";

const PYTHON_PACKAGE: &[&str] = &[
    ".github",
    "docs",
    "src",
    "tests",
    ".gitignore",
    ".pre-commit-config.yaml",
    "CHANGELOG.md",
    "LICENSE",
    "README.md",
    "pyproject.toml",
    "tox.ini",
];

const GRPC_SERVICE: &[&str] = &[
    ".github",
    "docs",
    "protos",
    "src",
    "tests",
    ".dockerignore",
    ".gitignore",
    "Dockerfile",
    "LICENSE",
    "README.md",
    "pyproject.toml",
    "tox.ini",
];

const FLASK_SERVICE: &[&str] = &[
    ".github",
    "docs",
    "src",
    "tests",
    ".dockerignore",
    ".gitignore",
    "Dockerfile",
    "LICENSE",
    "README.md",
    "pyproject.toml",
    "tox.ini",
    "wsgi.py",
];

const SOLUTION: &[&str] = &[
    ".github",
    "assets",
    "docs",
    "pages",
    "src",
    "tests",
    ".gitignore",
    "LICENSE",
    "README.md",
    "app.py",
    "pyproject.toml",
    "tox.ini",
];

fn shipped(
    name: &str,
    description: &str,
    keep: &[&str],
    common_dir: &str,
) -> Result<TemplateDefinition, DomainError> {
    Ok(TemplateDefinition::new(name, DesiredStructure::new(keep.iter().copied())?)?
        .description(description)
        .license(LicenseName::new(DEFAULT_LICENSE)?)
        .inherits(common_dir)?)
}

/// The catalog of shipped templates, in display order. Every one of them
/// inherits from `common_dir`, the configured common directory name.
pub fn builtin_catalog(common_dir: &str) -> Result<TemplateCatalog, DomainError> {
    let mut catalog = TemplateCatalog::new();
    for (name, description, keep) in [
        ("python-package", "Installable Python package", PYTHON_PACKAGE),
        ("grpc-service", "gRPC service with a ping endpoint", GRPC_SERVICE),
        ("flask-service", "Flask web service with blueprints", FLASK_SERVICE),
        ("solution", "Dash web application with pages", SOLUTION),
    ] {
        let template = shipped(name, description, keep, common_dir)?;
        catalog.insert(template);
    }
    Ok(catalog)
}
