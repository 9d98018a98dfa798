//! Domain-level errors (no external dependencies)

use std::fmt;

use thiserror::Error;

use crate::domain::entities::{BookId, MemberId};

/// Which kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Book,
    Member,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Book => write!(f, "book"),
            Entity::Member => write!(f, "member"),
        }
    }
}

/// Domain errors represent lending rule violations.
/// Every variant carries the ids involved so adapters can render them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{entity} with id {id} already exists")]
    DuplicateId { entity: Entity, id: u64 },

    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: u64 },

    #[error("book {book} is not on loan to member {member}")]
    LoanNotFound { member: MemberId, book: BookId },

    #[error("no book matches {query}")]
    NoMatch { query: String },

    #[error("member not registered: {0}")]
    MemberNotFound(MemberId),

    #[error("book {0} is not available")]
    BookUnavailable(BookId),

    #[error("book {0} is not on loan")]
    BookNotOnLoan(BookId),

    #[error("book {0} is on loan and cannot be removed")]
    BookOnLoan(BookId),

    #[error("member {member} still holds {count} book(s)")]
    OutstandingLoans { member: MemberId, count: usize },
}

/// Error taxonomy shown to users, independent of the variant payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DuplicateId,
    NotFound,
    MemberNotFound,
    BookUnavailable,
    BookNotOnLoan,
    BookOnLoan,
    OutstandingLoans,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::DuplicateId => "DuplicateIdError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::MemberNotFound => "MemberNotFoundError",
            ErrorKind::BookUnavailable => "BookUnavailableError",
            ErrorKind::BookNotOnLoan => "BookNotOnLoanError",
            ErrorKind::BookOnLoan => "BookOnLoanError",
            ErrorKind::OutstandingLoans => "OutstandingLoansError",
        };
        f.write_str(name)
    }
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::DuplicateId { .. } => ErrorKind::DuplicateId,
            DomainError::NotFound { .. }
            | DomainError::LoanNotFound { .. }
            | DomainError::NoMatch { .. } => ErrorKind::NotFound,
            DomainError::MemberNotFound(_) => ErrorKind::MemberNotFound,
            DomainError::BookUnavailable(_) => ErrorKind::BookUnavailable,
            DomainError::BookNotOnLoan(_) => ErrorKind::BookNotOnLoan,
            DomainError::BookOnLoan(_) => ErrorKind::BookOnLoan,
            DomainError::OutstandingLoans { .. } => ErrorKind::OutstandingLoans,
        }
    }

    pub(crate) fn book_not_found(id: BookId) -> Self {
        DomainError::NotFound {
            entity: Entity::Book,
            id: id.get(),
        }
    }

    pub(crate) fn member_not_found(id: MemberId) -> Self {
        DomainError::NotFound {
            entity: Entity::Member,
            id: id.get(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_loan_relation_error_when_kind_then_is_not_found() {
        let err = DomainError::LoanNotFound {
            member: MemberId::new(7),
            book: BookId::new(1),
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "book 1 is not on loan to member 7");
    }

    #[test]
    fn given_error_kinds_when_displayed_then_use_taxonomy_names() {
        assert_eq!(ErrorKind::DuplicateId.to_string(), "DuplicateIdError");
        assert_eq!(
            ErrorKind::OutstandingLoans.to_string(),
            "OutstandingLoansError"
        );
    }
}
