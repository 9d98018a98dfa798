//! Domain layer: catalog entities and lending rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod library;
pub mod normalize;
pub mod query;

pub use entities::{Book, BookId, Member, MemberId};
pub use error::{DomainError, DomainResult, Entity, ErrorKind};
pub use library::Library;
pub use query::BookQuery;
