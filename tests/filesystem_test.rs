//! Tests for the RealFileSystem implementation

use std::fs;

use tempfile::TempDir;

use libcat::infrastructure::traits::{FileSystem, RealFileSystem};

#[test]
fn given_nested_path_when_ensure_parent_then_creates_directories() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("a/b/libcat.toml");
    let fs = RealFileSystem;

    // Act
    fs.ensure_parent(&target).unwrap();
    fs.write(&target, "catalog = \"x\"\n").unwrap();

    // Assert
    assert!(temp.path().join("a/b").is_dir());
    assert!(fs.is_file(&target));
    assert_eq!(fs.read_to_string(&target).unwrap(), "catalog = \"x\"\n");
}

#[test]
fn given_bare_file_name_when_ensure_parent_then_noop() {
    let fs = RealFileSystem;
    fs.ensure_parent(std::path::Path::new("catalog.toml")).unwrap();
}

#[test]
fn given_directory_when_is_file_then_false_but_exists() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("seeds");
    fs::create_dir_all(&dir).unwrap();
    let fs = RealFileSystem;

    assert!(fs.exists(&dir));
    assert!(!fs.is_file(&dir));
}

#[test]
fn given_missing_file_when_reading_then_not_found() {
    let temp = TempDir::new().unwrap();
    let fs = RealFileSystem;

    let err = fs
        .read_to_string(&temp.path().join("missing.toml"))
        .unwrap_err();

    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}
