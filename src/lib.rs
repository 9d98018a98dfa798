//! libcat: in-memory library catalog manager
//!
//! Tracks books and members and enforces the lending rules between them.
//! The [`domain::Library`] aggregate is the core; the remaining layers wire
//! it to configuration, a catalog seed file and the command line.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{Book, BookId, BookQuery, DomainError, ErrorKind, Library, Member, MemberId};
