//! Domain entities: catalog records

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// Catalog identity of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(u64);

/// Roster identity of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(u64);

macro_rules! impl_id {
    ($name:ident) => {
        impl $name {
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

impl_id!(BookId);
impl_id!(MemberId);

/// A book in the catalog.
///
/// Descriptive fields are fixed at construction. Only `available` changes,
/// and only through [`Member::borrow`] and [`Member::return_book`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub isbn: String,
    available: bool,
}

impl Book {
    pub fn new(
        id: u64,
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            id: BookId(id),
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            available: true,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// A book entering the catalog has no holder yet.
    pub(crate) fn clear_loan(&mut self) {
        self.available = true;
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} by {} (ISBN {})", self.id, self.title, self.author, self.isbn)
    }
}

/// A registered library member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    /// Phone number or secondary reference; never used as identity.
    pub contact: String,
    borrowed: BTreeSet<BookId>,
}

impl Member {
    pub fn new(id: u64, name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            id: MemberId(id),
            name: name.into(),
            contact: contact.into(),
            borrowed: BTreeSet::new(),
        }
    }

    /// Ids of the books this member currently holds, ascending.
    pub fn borrowed(&self) -> &BTreeSet<BookId> {
        &self.borrowed
    }

    pub fn has_borrowed(&self, book: BookId) -> bool {
        self.borrowed.contains(&book)
    }

    pub fn loan_count(&self) -> usize {
        self.borrowed.len()
    }

    /// Mark `book` as held by this member.
    ///
    /// Unguarded: the caller checks availability first.
    pub fn borrow(&mut self, book: &mut Book) {
        book.available = false;
        self.borrowed.insert(book.id);
    }

    /// Hand `book` back. Fails without touching either record if this
    /// member does not hold it.
    pub fn return_book(&mut self, book: &mut Book) -> DomainResult<()> {
        if !self.borrowed.remove(&book.id) {
            return Err(DomainError::LoanNotFound {
                member: self.id,
                book: book.id,
            });
        }
        book.available = true;
        Ok(())
    }

    /// Forget any loans carried over from outside the library.
    pub(crate) fn clear_loans(&mut self) {
        self.borrowed.clear();
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contact.is_empty() {
            write!(f, "[{}] {}", self.id, self.name)
        } else {
            write!(f, "[{}] {} <{}>", self.id, self.name, self.contact)
        }
    }
}
