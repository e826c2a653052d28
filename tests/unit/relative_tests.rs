//! Tests for the bounded "climb ../ until found" resolver

use pathinfo::services::relative::RelativePathResolver;
use std::fs;
use tempfile::TempDir;

/// `<tmp>/Downloads/Chrome` plus a working directory `<tmp>/a/b/c/d`
fn downloads_layout() -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("Downloads/Chrome")).unwrap();
    let cwd = temp_dir.path().join("a/b/c/d");
    fs::create_dir_all(&cwd).unwrap();
    (temp_dir, cwd)
}

#[test]
fn test_two_levels_short_resolves_within_bound() {
    let (temp_dir, cwd) = downloads_layout();

    let resolver = RelativePathResolver::new(10).with_base_dir(&cwd);
    let resolution = resolver.resolve("../../Downloads/Chrome/").unwrap();

    assert_eq!(resolution.attempts, 2);
    assert_eq!(resolution.candidate, "../../../../Downloads/Chrome/");
    assert_eq!(
        resolution.absolute,
        fs::canonicalize(temp_dir.path().join("Downloads/Chrome")).unwrap()
    );
}

#[test]
fn test_existing_input_needs_no_climb() {
    let (_temp_dir, cwd) = downloads_layout();

    let resolver = RelativePathResolver::default().with_base_dir(&cwd);
    let resolution = resolver.resolve("../../../../Downloads").unwrap();
    assert_eq!(resolution.attempts, 0);
}

#[test]
fn test_bound_is_configurable() {
    let (_temp_dir, cwd) = downloads_layout();

    let resolver = RelativePathResolver::new(1).with_base_dir(&cwd);
    assert_eq!(resolver.max_attempts(), 1);
    assert!(resolver.resolve("../../Downloads/Chrome/").is_none());
}

#[test]
fn test_unresolvable_path_returns_none() {
    let (_temp_dir, cwd) = downloads_layout();

    let resolver = RelativePathResolver::default().with_base_dir(&cwd);
    assert_eq!(resolver.max_attempts(), 10);
    assert!(
        resolver
            .resolve("../pathinfo-missing-7f3a9c21/never/here")
            .is_none()
    );
}

#[test]
fn test_only_upward_relative_inputs_apply() {
    assert!(RelativePathResolver::applies_to("../x"));
    assert!(!RelativePathResolver::applies_to("./x"));
    assert!(!RelativePathResolver::applies_to("x/../y"));
    assert!(!RelativePathResolver::applies_to("/abs/path"));
    assert!(RelativePathResolver::applies_to("../../x/y"));
    assert!(!RelativePathResolver::applies_to("../b/../../secret.txt"));
    assert!(RelativePathResolver::default().resolve("docs").is_none());
}
