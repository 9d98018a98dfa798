//! The library aggregate: catalog, roster and the lending protocol
//!
//! Every mutating operation validates all of its preconditions before it
//! touches any record, so a failed call leaves the library unchanged.

use crate::domain::entities::{Book, BookId, Member, MemberId};
use crate::domain::error::{DomainError, DomainResult, Entity};
use crate::domain::normalize::contains_folded;
use crate::domain::query::BookQuery;

/// Owns every [`Book`] and [`Member`] record.
///
/// Both collections keep insertion order; searches scan in that order.
#[derive(Debug, Clone, Default)]
pub struct Library {
    books: Vec<Book>,
    members: Vec<Member>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------

    /// Add `book` to the catalog. It enters as available.
    pub fn add_book(&mut self, mut book: Book) -> DomainResult<()> {
        if self.book_index(book.id).is_some() {
            return Err(DomainError::DuplicateId {
                entity: Entity::Book,
                id: book.id.get(),
            });
        }
        book.clear_loan();
        self.books.push(book);
        Ok(())
    }

    /// Remove a book from the catalog.
    ///
    /// A book on loan is refused so no member is left holding an id the
    /// catalog no longer knows.
    pub fn remove_book(&mut self, id: BookId) -> DomainResult<Book> {
        let idx = self
            .book_index(id)
            .ok_or_else(|| DomainError::book_not_found(id))?;
        if !self.books[idx].is_available() {
            return Err(DomainError::BookOnLoan(id));
        }
        Ok(self.books.remove(idx))
    }

    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    pub fn available_books(&self) -> impl Iterator<Item = &Book> {
        self.books.iter().filter(|b| b.is_available())
    }

    pub fn len_books(&self) -> usize {
        self.books.len()
    }

    // ------------------------------------------------------------
    // Roster
    // ------------------------------------------------------------

    /// Register `member`. Loans can only arise through [`Library::lend_book`],
    /// so any borrowed ids carried in are dropped.
    pub fn add_member(&mut self, mut member: Member) -> DomainResult<()> {
        if self.member_index(member.id).is_some() {
            return Err(DomainError::DuplicateId {
                entity: Entity::Member,
                id: member.id.get(),
            });
        }
        member.clear_loans();
        self.members.push(member);
        Ok(())
    }

    /// Remove a member who holds no books.
    pub fn remove_member(&mut self, id: MemberId) -> DomainResult<Member> {
        let idx = self
            .member_index(id)
            .ok_or_else(|| DomainError::member_not_found(id))?;
        let count = self.members[idx].loan_count();
        if count > 0 {
            return Err(DomainError::OutstandingLoans { member: id, count });
        }
        Ok(self.members.remove(idx))
    }

    pub fn find_member(&self, id: MemberId) -> DomainResult<&Member> {
        self.member(id).ok_or_else(|| DomainError::member_not_found(id))
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    pub fn len_members(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && self.members.is_empty()
    }

    // ------------------------------------------------------------
    // Lending
    // ------------------------------------------------------------

    /// Lend book `book_id` to member `member_id`.
    ///
    /// # Errors
    /// - `MemberNotFound` if the member is not registered
    /// - `NotFound` if the book is not in the catalog
    /// - `BookUnavailable` if the book is already on loan
    pub fn lend_book(&mut self, member_id: MemberId, book_id: BookId) -> DomainResult<()> {
        let (mi, bi) = self.loan_parties(member_id, book_id)?;
        if !self.books[bi].is_available() {
            return Err(DomainError::BookUnavailable(book_id));
        }
        self.members[mi].borrow(&mut self.books[bi]);
        Ok(())
    }

    /// Take book `book_id` back from member `member_id`.
    ///
    /// # Errors
    /// - `MemberNotFound` if the member is not registered
    /// - `NotFound` if the book is not in the catalog
    /// - `BookNotOnLoan` if the book is currently available
    /// - `NotFound` (loan relation) if another member holds the book
    pub fn return_book(&mut self, member_id: MemberId, book_id: BookId) -> DomainResult<()> {
        let (mi, bi) = self.loan_parties(member_id, book_id)?;
        if self.books[bi].is_available() {
            return Err(DomainError::BookNotOnLoan(book_id));
        }
        self.members[mi].return_book(&mut self.books[bi])
    }

    /// Books held by `member_id`, in catalog order.
    pub fn borrowed_books(&self, member_id: MemberId) -> DomainResult<Vec<&Book>> {
        let member = self
            .member(member_id)
            .ok_or(DomainError::MemberNotFound(member_id))?;
        Ok(self
            .books
            .iter()
            .filter(|b| member.has_borrowed(b.id))
            .collect())
    }

    /// The member currently holding `book_id`, if any.
    pub fn borrower_of(&self, book_id: BookId) -> Option<&Member> {
        self.members.iter().find(|m| m.has_borrowed(book_id))
    }

    // ------------------------------------------------------------
    // Search
    // ------------------------------------------------------------

    /// Find the first book matching `query`.
    ///
    /// Criteria are tried in order, each scanning the whole catalog before
    /// the next is considered: exact id, exact ISBN, author substring, title
    /// substring. Substring matches ignore case and diacritics.
    pub fn find_book(&self, query: &BookQuery) -> DomainResult<&Book> {
        let by_id = query.id.and_then(|id| self.book(id));
        let by_isbn = || {
            query
                .isbn_key()
                .and_then(|isbn| self.books.iter().find(|b| b.isbn.trim() == isbn))
        };
        let by_author = || {
            query
                .author_key()
                .and_then(|author| self.find_folded(author, |b| b.author.as_str()))
        };
        let by_title = || {
            query
                .title_key()
                .and_then(|title| self.find_folded(title, |b| b.title.as_str()))
        };

        by_id
            .or_else(by_isbn)
            .or_else(by_author)
            .or_else(by_title)
            .ok_or_else(|| DomainError::NoMatch {
                query: query.to_string(),
            })
    }

    // ------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------

    /// First book whose `field` contains `needle` after folding both.
    fn find_folded(&self, needle: &str, field: impl Fn(&Book) -> &str) -> Option<&Book> {
        self.books
            .iter()
            .find(|b| contains_folded(field(b), needle))
    }

    fn book_index(&self, id: BookId) -> Option<usize> {
        self.books.iter().position(|b| b.id == id)
    }

    fn member_index(&self, id: MemberId) -> Option<usize> {
        self.members.iter().position(|m| m.id == id)
    }

    /// Resolve both sides of a loan, member first.
    fn loan_parties(&self, member_id: MemberId, book_id: BookId) -> DomainResult<(usize, usize)> {
        let mi = self
            .member_index(member_id)
            .ok_or(DomainError::MemberNotFound(member_id))?;
        let bi = self
            .book_index(book_id)
            .ok_or_else(|| DomainError::book_not_found(book_id))?;
        Ok((mi, bi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_new_library_when_created_then_is_empty() {
        let library = Library::new();
        assert!(library.is_empty());
        assert_eq!(library.len_books(), 0);
        assert_eq!(library.len_members(), 0);
    }

    #[test]
    fn given_lent_book_when_looking_up_borrower_then_returns_holder() {
        let mut library = Library::new();
        library
            .add_book(Book::new(1, "Dune", "Frank Herbert", "978-0441013593"))
            .unwrap();
        library.add_member(Member::new(7, "Alice", "")).unwrap();
        library.add_member(Member::new(8, "Bob", "")).unwrap();

        library.lend_book(MemberId::new(7), BookId::new(1)).unwrap();

        let holder = library.borrower_of(BookId::new(1)).unwrap();
        assert_eq!(holder.id, MemberId::new(7));
        assert!(library.available_books().next().is_none());
    }

    #[test]
    fn given_member_with_stale_loans_when_added_then_loans_are_cleared() {
        let mut outside = Library::new();
        outside
            .add_book(Book::new(1, "Dune", "Frank Herbert", "978-0441013593"))
            .unwrap();
        outside.add_member(Member::new(7, "Alice", "")).unwrap();
        outside.lend_book(MemberId::new(7), BookId::new(1)).unwrap();
        let alice = outside.find_member(MemberId::new(7)).unwrap().clone();
        let dune = outside.book(BookId::new(1)).unwrap().clone();

        let mut library = Library::new();
        library.add_member(alice).unwrap();
        library.add_book(dune).unwrap();

        assert_eq!(library.find_member(MemberId::new(7)).unwrap().loan_count(), 0);
        assert!(library.book(BookId::new(1)).unwrap().is_available());
    }
}
