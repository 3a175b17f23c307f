//! Inheritance merge and license injection against real directories.

use std::{fs, path::Path, sync::Arc};

use stamp_adapters::{LocalFilesystem, MemoryFilesystem};
use stamp_core::{application::ApplicationError, prelude::*};
use tempfile::TempDir;

fn merger() -> TemplateMerger {
    TemplateMerger::new(Arc::new(LocalFilesystem::new()))
}

fn write(path: &Path, contents: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn merge_never_changes_existing_files() {
    let common = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    write(&common.path().join("README.md"), b"generic readme");
    write(&common.path().join("docs/index.md"), b"common docs");
    write(&project.path().join("README.md"), b"project readme");

    let report = merger()
        .inherit_from_template(common.path(), project.path())
        .unwrap();

    assert_eq!(
        fs::read(project.path().join("README.md")).unwrap(),
        b"project readme"
    );
    let preserved: Vec<String> = report.preserved.iter().map(ToString::to_string).collect();
    assert_eq!(preserved, vec!["README.md"]);
}

#[test]
fn merge_copies_every_missing_file_byte_for_byte() {
    let common = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let binary = [0u8, 159, 146, 150, b'\n', b'\r', b'\n'];
    write(&common.path().join(".github/workflows/ci.yml"), b"on: push\n");
    write(&common.path().join("docs/logo.png"), &binary);
    write(&common.path().join("tox.ini"), b"[tox]\n");

    let report = merger()
        .inherit_from_template(common.path(), project.path())
        .unwrap();

    for rel in [".github/workflows/ci.yml", "docs/logo.png", "tox.ini"] {
        assert_eq!(
            fs::read(project.path().join(rel)).unwrap(),
            fs::read(common.path().join(rel)).unwrap(),
            "{rel} differs"
        );
    }
    assert_eq!(report.copied.len(), 3);
    assert!(report.conflicts.is_empty());
    assert_eq!(
        fs::read(common.path().join("tox.ini")).unwrap(),
        b"[tox]\n",
        "source must stay untouched"
    );
}

#[test]
fn merge_reports_kind_conflicts_and_keeps_destination() {
    let common = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    write(&common.path().join("docs/index.md"), b"common");
    write(&common.path().join("setup.cfg"), b"[metadata]");
    write(&project.path().join("docs"), b"not a directory");
    fs::create_dir_all(project.path().join("setup.cfg")).unwrap();

    let report = merger()
        .inherit_from_template(common.path(), project.path())
        .unwrap();

    assert_eq!(report.conflicts.len(), 2);
    assert!(project.path().join("docs").is_file());
    assert!(project.path().join("setup.cfg").is_dir());
}

#[cfg(unix)]
#[test]
fn merge_skips_symlinks_and_keeps_going() {
    let common = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    write(&common.path().join("real/x.txt"), b"x");
    write(&common.path().join("zz.txt"), b"last");
    std::os::unix::fs::symlink(common.path().join("real"), common.path().join("alias")).unwrap();
    std::os::unix::fs::symlink(common.path().join("zz.txt"), common.path().join("link.txt"))
        .unwrap();

    let report = merger()
        .inherit_from_template(common.path(), project.path())
        .unwrap();

    let skipped: Vec<String> = report.skipped_links.iter().map(ToString::to_string).collect();
    assert_eq!(skipped, vec!["alias", "link.txt"]);
    assert!(fs::symlink_metadata(project.path().join("alias")).is_err());
    assert!(fs::symlink_metadata(project.path().join("link.txt")).is_err());
    assert_eq!(fs::read(project.path().join("zz.txt")).unwrap(), b"last");
    assert_eq!(fs::read(project.path().join("real/x.txt")).unwrap(), b"x");
}

#[test]
fn merge_into_missing_project_fails() {
    let common = TempDir::new().unwrap();
    let err = merger()
        .inherit_from_template(common.path(), Path::new("/definitely/not/here"))
        .unwrap_err();
    assert!(matches!(
        err,
        StampError::Application(ApplicationError::DestinationNotFound { .. })
    ));
}

#[test]
fn license_bytes_match_source_exactly() {
    let licenses = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let body = "MIT License\r\n\r\nCopyright (c) {{ cookiecutter.author }}\n\u{00a9}".as_bytes();
    write(&licenses.path().join("MIT"), body);
    write(&project.path().join("LICENSE"), b"stale");

    let report = LicenseInjector::new(Arc::new(LocalFilesystem::new()))
        .include_license(&licenses.path().join("MIT"), project.path())
        .unwrap();

    assert!(report.replaced);
    assert_eq!(fs::read(project.path().join("LICENSE")).unwrap(), body);
}

#[test]
fn license_into_locked_project_is_permission_denied() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/t/licenses/MIT", "MIT License").unwrap();
    fs.add_dir("/p").unwrap();
    fs.lock("/p").unwrap();

    let err = LicenseInjector::new(Arc::new(fs.clone()))
        .include_license(Path::new("/t/licenses/MIT"), Path::new("/p"))
        .unwrap_err();

    assert!(matches!(
        err,
        StampError::Application(ApplicationError::PermissionDenied { .. })
    ));
    assert!(fs.read_file(Path::new("/p/LICENSE")).is_none());
}
