//! Tests for CatalogService and catalog seed loading

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use libcat::application::services::{CatalogService, SeedSummary};
use libcat::application::ApplicationError;
use libcat::config::Settings;
use libcat::domain::{Book, BookId, BookQuery, ErrorKind, Member, MemberId};
use libcat::infrastructure::di::ServiceContainer;
use libcat::infrastructure::traits::RealFileSystem;
use libcat::util::testing::init_test_setup;

const SEED: &str = r#"
[[book]]
id = 1
title = "Dune"
author = "Frank Herbert"
isbn = "978-0441013593"

[[book]]
id = 2
title = "Emma"
author = "Jane Austen"
isbn = "978-0141439587"

[[member]]
id = 7
name = "Alice"
contact = "555-0100"

[[member]]
id = 8
name = "Bob"

[[loan]]
member = 7
book = 1
"#;

/// Helper to create a seed file for testing
fn create_seed_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write seed file");
    path
}

fn service() -> CatalogService {
    init_test_setup();
    CatalogService::new(Arc::new(RealFileSystem))
}

#[test]
fn given_seed_file_when_loading_then_library_reflects_it() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let seed = create_seed_file(&temp, "catalog.toml", SEED);
    let mut service = service();

    // Act
    let summary = service.load_seed(&seed).unwrap();

    // Assert
    assert_eq!(
        summary,
        SeedSummary {
            books: 2,
            members: 2,
            loans: 1
        }
    );
    let library = service.library();
    assert!(!library.book(BookId::new(1)).unwrap().is_available());
    assert_eq!(library.borrower_of(BookId::new(1)).unwrap().name, "Alice");
    assert_eq!(library.find_member(MemberId::new(8)).unwrap().contact, "");
}

#[test]
fn given_missing_seed_file_when_loading_then_invalid_seed() {
    let temp = TempDir::new().unwrap();
    let mut service = service();

    let err = service
        .load_seed(&temp.path().join("missing.toml"))
        .unwrap_err();

    assert!(matches!(err, ApplicationError::InvalidSeed { .. }));
    assert!(err.kind().is_none());
}

#[test]
fn given_malformed_seed_when_loading_then_invalid_seed_names_file() {
    let temp = TempDir::new().unwrap();
    let seed = create_seed_file(&temp, "broken.toml", "[[book]]\nid = \"one\"\n");
    let mut service = service();

    let err = service.load_seed(&seed).unwrap_err();

    assert!(matches!(err, ApplicationError::InvalidSeed { .. }));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn given_seed_with_duplicate_ids_when_loading_then_rejected_and_library_empty() {
    let temp = TempDir::new().unwrap();
    let seed = create_seed_file(
        &temp,
        "dupes.toml",
        r#"
[[member]]
id = 7
name = "Alice"

[[member]]
id = 7
name = "Alicia"
"#,
    );
    let mut service = service();

    let err = service.load_seed(&seed).unwrap_err();

    assert!(matches!(err, ApplicationError::SeedRejected { .. }));
    assert_eq!(err.kind(), Some(ErrorKind::DuplicateId));
    assert!(service.library().is_empty());
}

#[test]
fn given_seeded_service_when_running_lending_cycle_then_rules_apply() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let seed = create_seed_file(&temp, "catalog.toml", SEED);
    let mut service = service();
    service.load_seed(&seed).unwrap();

    // Act + Assert: Dune is held by Alice
    let err = service
        .lend_book(MemberId::new(8), BookId::new(1))
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::BookUnavailable));

    let err = service.remove_member(MemberId::new(7)).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::OutstandingLoans));

    service.return_book(MemberId::new(7), BookId::new(1)).unwrap();
    service.lend_book(MemberId::new(8), BookId::new(1)).unwrap();

    let held: Vec<u64> = service
        .borrowed_books(MemberId::new(8))
        .unwrap()
        .iter()
        .map(|b| b.id.get())
        .collect();
    assert_eq!(held, vec![1]);
    let removed = service.remove_member(MemberId::new(7)).unwrap();
    assert_eq!(removed.name, "Alice");
}

#[test]
fn given_empty_service_when_adding_and_finding_then_round_trips() {
    let mut service = service();

    service
        .add_book(Book::new(3, "Solaris", "Stanisław Lem", "978-0156027601"))
        .unwrap();
    service.add_member(Member::new(9, "Carol", "")).unwrap();

    let book = service
        .find_book(&BookQuery::by_author("stanislaw"))
        .unwrap();
    assert_eq!(book.id, BookId::new(3));
    assert_eq!(service.find_member(MemberId::new(9)).unwrap().name, "Carol");

    let removed = service.remove_book(BookId::new(3)).unwrap();
    assert_eq!(removed.title, "Solaris");
    let err = service
        .find_book(&BookQuery::by_id(BookId::new(3)))
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::NotFound));
}

#[test]
fn given_container_with_catalog_setting_when_building_service_then_seeded() {
    let temp = TempDir::new().unwrap();
    let seed = create_seed_file(&temp, "catalog.toml", SEED);
    let settings = Settings {
        catalog: Some(seed),
        ..Settings::default()
    };
    let container = ServiceContainer::with_deps(settings, Arc::new(RealFileSystem));

    let service = container.catalog_service().unwrap();

    assert_eq!(service.library().len_books(), 2);
    assert_eq!(service.library().len_members(), 2);
}

#[test]
fn given_container_without_catalog_when_building_service_then_empty() {
    let container = ServiceContainer::new(Settings::default());

    let service = container.catalog_service().unwrap();

    assert!(service.library().is_empty());
}
