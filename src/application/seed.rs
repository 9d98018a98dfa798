//! Catalog seed files
//!
//! A seed is a read-only TOML description of books, members and loans used
//! to start a library in a known state:
//!
//! ```toml
//! [[book]]
//! id = 1
//! title = "Dune"
//! author = "Frank Herbert"
//! isbn = "978-0441013593"
//!
//! [[member]]
//! id = 7
//! name = "Alice"
//!
//! [[loan]]
//! member = 7
//! book = 1
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{Book, BookId, DomainResult, Library, Member, MemberId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogSeed {
    #[serde(rename = "book")]
    pub books: Vec<BookRecord>,
    #[serde(rename = "member")]
    pub members: Vec<MemberRecord>,
    #[serde(rename = "loan")]
    pub loans: Vec<LoanRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookRecord {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub isbn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoanRecord {
    pub member: MemberId,
    pub book: BookId,
}

impl CatalogSeed {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply books, then members, then loans through the regular library
    /// operations. On error `library` is left as it was.
    pub fn apply(&self, library: &mut Library) -> DomainResult<()> {
        let mut staged = library.clone();
        for record in &self.books {
            staged.add_book(Book::new(
                record.id,
                record.title.as_str(),
                record.author.as_str(),
                record.isbn.as_str(),
            ))?;
        }
        for record in &self.members {
            staged.add_member(Member::new(
                record.id,
                record.name.as_str(),
                record.contact.as_str(),
            ))?;
        }
        for loan in &self.loans {
            staged.lend_book(loan.member, loan.book)?;
        }
        *library = staged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;

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

[[loan]]
member = 7
book = 1
"#;

    #[test]
    fn given_seed_toml_when_parsing_then_reads_all_sections() {
        let seed = CatalogSeed::parse(SEED).unwrap();
        assert_eq!(seed.books.len(), 2);
        assert_eq!(seed.members.len(), 1);
        assert_eq!(
            seed.loans,
            vec![LoanRecord {
                member: MemberId::new(7),
                book: BookId::new(1)
            }]
        );
    }

    #[test]
    fn given_seed_when_applying_then_loans_go_through_lending_rules() {
        let seed = CatalogSeed::parse(SEED).unwrap();
        let mut library = Library::new();

        seed.apply(&mut library).unwrap();

        assert!(!library.book(BookId::new(1)).unwrap().is_available());
        assert!(library.book(BookId::new(2)).unwrap().is_available());
        assert!(library
            .find_member(MemberId::new(7))
            .unwrap()
            .has_borrowed(BookId::new(1)));
    }

    #[test]
    fn given_seed_lending_same_book_twice_when_applying_then_library_untouched() {
        let mut seed = CatalogSeed::parse(SEED).unwrap();
        seed.loans.push(LoanRecord {
            member: MemberId::new(7),
            book: BookId::new(1),
        });
        let mut library = Library::new();

        let err = seed.apply(&mut library).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::BookUnavailable);
        assert!(library.is_empty());
    }

    #[test]
    fn given_unknown_field_when_parsing_then_rejected() {
        let result = CatalogSeed::parse("[[book]]\nid = 1\ntitle = \"x\"\nauthor = \"y\"\nisbn = \"z\"\nis_available = false\n");
        assert!(result.is_err());
    }

    #[test]
    fn given_empty_input_when_parsing_then_empty_seed() {
        assert_eq!(CatalogSeed::parse("").unwrap(), CatalogSeed::default());
    }
}
