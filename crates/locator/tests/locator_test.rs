//! Integration tests for spec file discovery

use api_doc_toolkit_common::{SpecExtension, SpecFileError};
use api_doc_toolkit_locator::SpecLocator;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), "paths: {}\n").unwrap();
}

#[test]
fn test_lists_only_recognized_extensions() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    for name in ["users.yaml", "orders.yml", "billing.json", "LEGACY.YAML"] {
        touch(dir, name);
    }
    for name in ["README.md", "notes.txt", "api.yaml.bak", "Makefile"] {
        touch(dir, name);
    }

    let locator = SpecLocator::new(dir).unwrap();
    let files = locator.spec_files().unwrap();

    assert_eq!(files.len(), 4, "Expected only recognized spec files");
    let names: Vec<String> = files.iter().map(|f| f.file_name()).collect();
    assert_eq!(
        names,
        vec!["LEGACY.YAML", "billing.json", "orders.yml", "users.yaml"]
    );
}

#[test]
fn test_listing_is_not_recursive() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    touch(dir, "top.yaml");

    let nested = dir.join("nested");
    fs::create_dir(&nested).unwrap();
    touch(&nested, "deep.yaml");

    // A directory named like a spec file is not a regular file
    fs::create_dir(dir.join("folder.yaml")).unwrap();

    let files = SpecLocator::new(dir).unwrap().spec_files().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_name(), "top.yaml");
}

#[test]
fn test_empty_directory_has_no_spec_files() {
    let temp_dir = TempDir::new().unwrap();
    let locator = SpecLocator::new(temp_dir.path()).unwrap();

    let err = locator.spec_files().unwrap_err();
    assert!(matches!(err, SpecFileError::NoSpecFilesFound { .. }));
}

#[test]
fn test_only_unrecognized_files() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "schema.xml");
    touch(temp_dir.path(), "notes.txt");

    let err = SpecLocator::new(temp_dir.path())
        .unwrap()
        .spec_files()
        .unwrap_err();
    assert!(matches!(err, SpecFileError::NoSpecFilesFound { .. }));
}

#[test]
fn test_group_by_extension() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    touch(dir, "a.yaml");
    touch(dir, "b.YAML");
    touch(dir, "c.json");

    let grouped = SpecLocator::new(dir).unwrap().group_by_extension().unwrap();

    assert_eq!(grouped.len(), 3, "Every extension should be present");
    assert_eq!(grouped[&SpecExtension::Yaml].len(), 2);
    assert_eq!(grouped[&SpecExtension::Json].len(), 1);
    assert!(grouped[&SpecExtension::Yml].is_empty());
}

#[test]
fn test_has_multiple_spec_files() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let locator = SpecLocator::new(dir).unwrap();

    assert!(!locator.has_multiple_spec_files().unwrap());

    touch(dir, "one.yaml");
    assert!(!locator.has_multiple_spec_files().unwrap());

    touch(dir, "two.json");
    assert!(locator.has_multiple_spec_files().unwrap());
}

#[test]
fn test_listing_reflects_filesystem_changes() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    touch(dir, "first.yaml");

    let locator = SpecLocator::new(dir).unwrap();
    assert_eq!(locator.spec_files().unwrap().len(), 1);

    touch(dir, "second.yaml");
    assert_eq!(locator.spec_files().unwrap().len(), 2);
}

#[test]
fn test_is_valid_spec_file() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    touch(dir, "api.Yml");
    touch(dir, "api.txt");
    fs::create_dir(dir.join("dir.json")).unwrap();

    assert!(SpecLocator::is_valid_spec_file(dir.join("api.Yml")));
    assert!(!SpecLocator::is_valid_spec_file(dir.join("api.txt")));
    assert!(!SpecLocator::is_valid_spec_file(dir.join("dir.json")));
    assert!(!SpecLocator::is_valid_spec_file(dir.join("missing.yaml")));
}

#[test]
fn test_read_contents() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("spec.yaml");
    fs::write(&path, "openapi: 3.0.0\n").unwrap();

    assert_eq!(SpecLocator::read_contents(&path).unwrap(), "openapi: 3.0.0\n");
}
