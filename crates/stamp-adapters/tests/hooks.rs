//! Pre and post hooks over a templates root laid out on disk.

use std::{fs, path::Path, sync::Arc};

use stamp_adapters::{LocalFilesystem, MemoryFilesystem, TemplateRootLocator, load_catalog};
use stamp_core::prelude::*;
use tempfile::TempDir;

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A templates root with a common dir, one license and a manifest that
/// overrides the built-in `python-package`.
fn templates_root(root: &Path) {
    write(&root.join("common/tox.ini"), "[tox]\n");
    write(&root.join("common/docs/index.md"), "# Docs\n");
    write(&root.join("common/.github/workflows/ci.yml"), "on: push\n");
    write(&root.join("licenses/MIT"), "MIT License\n");
    write(&root.join("licenses/BSD-3-Clause"), "BSD License\n");
    write(
        &root.join("python-package/template.toml"),
        r#"
[template]
description = "Overridden package"
inherits = "common"
license = "BSD-3-Clause"

[structure]
keep = ["src", "docs", "LICENSE", "tox.ini", "pyproject.toml"]
"#,
    );
}

fn registry(root: &Path) -> PathRegistry {
    TemplateRootLocator {
        explicit: Some(root.to_path_buf()),
        ..TemplateRootLocator::default()
    }
    .resolve(PathRegistry::DEFAULT_COMMON_DIR, PathRegistry::DEFAULT_LICENSES_DIR)
    .unwrap()
}

#[test]
fn manifest_overrides_builtin_definition() {
    let temp = TempDir::new().unwrap();
    templates_root(temp.path());

    let catalog = load_catalog(&PathRegistry::new(temp.path())).unwrap();
    assert_eq!(catalog.len(), 4);

    let python = catalog.get("python-package").unwrap();
    assert_eq!(python.description, "Overridden package");
    assert_eq!(python.license.as_ref().unwrap().as_str(), "BSD-3-Clause");
    assert_eq!(catalog.names()[0], "python-package", "override keeps position");
}

#[test]
fn full_generation_cycle() {
    let templates = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    templates_root(templates.path());
    let registry = registry(templates.path());
    let catalog = load_catalog(&registry).unwrap();
    let template = catalog.get("python-package").unwrap();

    let hooks = HookService::new(Arc::new(LocalFilesystem::new()));
    let pre = hooks.pre_generate(project.path(), template, &registry).unwrap();
    assert_eq!(pre.merge.as_ref().unwrap().copied.len(), 3);
    assert_eq!(
        fs::read_to_string(project.path().join("LICENSE")).unwrap(),
        "BSD License\n"
    );

    // What the rendering engine would produce.
    write(&project.path().join("src/pkg/__init__.py"), "");
    write(&project.path().join("pyproject.toml"), "[project]\n");
    write(&project.path().join("setup.py"), "legacy");
    write(&project.path().join("tox.ini"), "[tox]\nenvlist = py312\n");

    let post = hooks.post_generate(project.path(), template, false).unwrap();
    let removed: Vec<String> = post.filter.removed.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(removed, vec![".github", "setup.py"]);

    assert!(project.path().join("docs/index.md").is_file());
    assert!(project.path().join("src/pkg/__init__.py").is_file());
    assert_eq!(
        fs::read_to_string(project.path().join("tox.ini")).unwrap(),
        "[tox]\nenvlist = py312\n"
    );
}

#[test]
fn builtin_templates_inherit_configured_common_dir() {
    let templates = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    write(&templates.path().join("shared/tox.ini"), "[tox]\n");
    write(&templates.path().join("licenses/MIT"), "MIT License\n");

    let registry = TemplateRootLocator {
        explicit: Some(templates.path().to_path_buf()),
        ..TemplateRootLocator::default()
    }
    .resolve("shared", PathRegistry::DEFAULT_LICENSES_DIR)
    .unwrap();
    let catalog = load_catalog(&registry).unwrap();
    let template = catalog.get("grpc-service").unwrap();
    assert_eq!(template.inherits.as_deref(), Some("shared"));

    let pre = HookService::new(Arc::new(LocalFilesystem::new()))
        .pre_generate(project.path(), template, &registry)
        .unwrap();
    assert_eq!(pre.merge.unwrap().copied.len(), 1);
    assert!(project.path().join("tox.ini").is_file());
}

#[test]
fn pre_hook_fails_when_license_is_missing() {
    let templates = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    templates_root(templates.path());
    fs::remove_file(templates.path().join("licenses/BSD-3-Clause")).unwrap();

    let registry = registry(templates.path());
    let catalog = load_catalog(&registry).unwrap();
    let hooks = HookService::new(Arc::new(LocalFilesystem::new()));

    let err = hooks
        .pre_generate(project.path(), catalog.get("python-package").unwrap(), &registry)
        .unwrap_err();
    assert_eq!(err.category(), stamp_core::error::ErrorCategory::NotFound);
    // The merge ran before the license step and is not rolled back.
    assert!(project.path().join("tox.ini").is_file());
}

#[test]
fn post_hook_dry_run_leaves_memory_tree_untouched() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/p/src/main.py", "").unwrap();
    fs.add_file("/p/junk/a.txt", "").unwrap();
    let template =
        TemplateDefinition::new("tiny", DesiredStructure::new(["src"]).unwrap()).unwrap();

    let hooks = HookService::new(Arc::new(fs.clone()));
    let report = hooks.post_generate(Path::new("/p"), &template, true).unwrap();

    assert!(report.filter.dry_run);
    assert_eq!(report.filter.removed.len(), 1);
    assert_eq!(fs.list_files().len(), 2);

    hooks.post_generate(Path::new("/p"), &template, false).unwrap();
    assert_eq!(fs.list_files(), vec![std::path::PathBuf::from("/p/src/main.py")]);
    assert!(!fs.list_dirs().contains(&std::path::PathBuf::from("/p/junk")));
}
