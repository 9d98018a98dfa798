//! Catalog service
//!
//! Owns one [`Library`] and runs every catalog, roster and lending operation
//! against it. The library is only reachable through `&mut self`, so all
//! check-then-act sequences are serialized per service instance.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, CatalogSeed};
use crate::domain::{Book, BookId, BookQuery, Library, Member, MemberId};
use crate::infrastructure::traits::FileSystem;

/// Counts of what a seed file added to the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub books: usize,
    pub members: usize,
    pub loans: usize,
}

/// Service for managing the catalog, the roster and loans.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
    library: Library,
}

impl CatalogService {
    /// Create a service over an empty library.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self::with_library(fs, Library::new())
    }

    pub fn with_library(fs: Arc<dyn FileSystem>, library: Library) -> Self {
        Self { fs, library }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Load a catalog seed file into the library.
    ///
    /// The seed is applied all-or-nothing.
    #[instrument(skip(self))]
    pub fn load_seed(&mut self, path: &Path) -> ApplicationResult<SeedSummary> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::InvalidSeed {
                path: path.to_path_buf(),
                message: "file not found".to_string(),
            });
        }
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| ApplicationError::SeedUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
        let seed = CatalogSeed::parse(&content).map_err(|e| ApplicationError::InvalidSeed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        seed.apply(&mut self.library)
            .map_err(|source| ApplicationError::SeedRejected {
                path: path.to_path_buf(),
                source,
            })?;

        let summary = SeedSummary {
            books: seed.books.len(),
            members: seed.members.len(),
            loans: seed.loans.len(),
        };
        info!(
            "seeded catalog from {}: {} books, {} members, {} loans",
            path.display(),
            summary.books,
            summary.members,
            summary.loans
        );
        Ok(summary)
    }

    pub fn add_book(&mut self, book: Book) -> ApplicationResult<()> {
        debug!("add_book: id={}", book.id);
        let id = book.id;
        self.library.add_book(book)?;
        info!("added book {}", id);
        Ok(())
    }

    pub fn remove_book(&mut self, id: BookId) -> ApplicationResult<Book> {
        debug!("remove_book: id={}", id);
        let book = self.library.remove_book(id)?;
        info!("removed book {}", id);
        Ok(book)
    }

    pub fn add_member(&mut self, member: Member) -> ApplicationResult<()> {
        debug!("add_member: id={}", member.id);
        let id = member.id;
        self.library.add_member(member)?;
        info!("added member {}", id);
        Ok(())
    }

    pub fn remove_member(&mut self, id: MemberId) -> ApplicationResult<Member> {
        debug!("remove_member: id={}", id);
        let member = self.library.remove_member(id)?;
        info!("removed member {}", id);
        Ok(member)
    }

    pub fn lend_book(&mut self, member: MemberId, book: BookId) -> ApplicationResult<()> {
        debug!("lend_book: member={}, book={}", member, book);
        self.library.lend_book(member, book)?;
        info!("lent book {} to member {}", book, member);
        Ok(())
    }

    pub fn return_book(&mut self, member: MemberId, book: BookId) -> ApplicationResult<()> {
        debug!("return_book: member={}, book={}", member, book);
        self.library.return_book(member, book)?;
        info!("member {} returned book {}", member, book);
        Ok(())
    }

    pub fn find_book(&self, query: &BookQuery) -> ApplicationResult<&Book> {
        debug!("find_book: query={}", query);
        Ok(self.library.find_book(query)?)
    }

    pub fn find_member(&self, id: MemberId) -> ApplicationResult<&Member> {
        debug!("find_member: id={}", id);
        Ok(self.library.find_member(id)?)
    }

    pub fn borrowed_books(&self, member: MemberId) -> ApplicationResult<Vec<&Book>> {
        Ok(self.library.borrowed_books(member)?)
    }
}
